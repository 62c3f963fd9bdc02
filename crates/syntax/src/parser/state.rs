//! Mutable state owned by one parse.
//!
//! Everything the rule actions touch lives here: the expression being
//! accumulated, the stacks that save it across nested contexts, the
//! pending whitespace, the identifier/number/text buffers, and the block
//! aggregator state. The driver hands actions exclusive access; nothing is
//! shared or global.

use beef::lean::Cow;

use crate::ast::{self, Ast, Line, QuoteSize, RequiredLine, Segment};

pub(crate) struct State<'src> {
  /// The expression accumulated at the current nesting level.
  pub result: Option<Ast<'src>>,
  /// `result` values saved on entering a nested context.
  pub ast_stack: Vec<Option<Ast<'src>>>,
  /// Whitespace width pending between the previous token and the next.
  pub last_offset: usize,
  /// `last_offset` values saved across nested contexts.
  pub offset_stack: Vec<usize>,
  /// Identifier or operator waiting for its suffix check.
  pub ident: Option<Ast<'src>>,
  pub number_part1: &'src str,
  pub number_part2: &'src str,
  /// Text literals being built, innermost last.
  pub texts: Vec<TextState<'src>>,
  /// One entry per open parenthesis.
  pub parens: Vec<ParenContext>,
  pub block: BlockState<'src>,
  pub block_stack: Vec<BlockState<'src>>,
  /// Empty lines seen since the last submitted line.
  pub pending_empty_lines: Vec<usize>,
  /// Whether a line is currently being accumulated.
  pub line_open: bool,
  pub module: Option<ast::Module<'src>>,
}

impl<'src> State<'src> {
  pub fn new() -> Self {
    Self {
      result: None,
      ast_stack: vec![],
      last_offset: 0,
      offset_stack: vec![],
      ident: None,
      number_part1: "",
      number_part2: "",
      texts: vec![],
      parens: vec![],
      block: BlockState::new(0, true, vec![]),
      block_stack: vec![],
      pending_empty_lines: vec![],
      line_open: true,
      module: None,
    }
  }

  /// Read and clear the pending whitespace.
  #[inline]
  pub fn use_last_offset(&mut self) -> usize {
    std::mem::take(&mut self.last_offset)
  }

  /// Save the pending whitespace and start from zero.
  #[inline]
  pub fn push_last_offset(&mut self) {
    let offset = self.use_last_offset();
    self.offset_stack.push(offset);
  }

  /// Save `result` and start a fresh one.
  #[inline]
  pub fn push_ast(&mut self) {
    let result = self.result.take();
    self.ast_stack.push(result);
  }

  /// Append `node` to `result`: plain store when empty, otherwise
  /// application with the pending whitespace as spacing.
  pub fn app(&mut self, node: Ast<'src>) {
    self.result = Some(match self.result.take() {
      None => node,
      Some(func) => {
        let off = self.use_last_offset();
        ast::app(func, off, node)
      }
    });
  }
}

/// Bookkeeping for one open parenthesis.
pub(crate) struct ParenContext {
  /// Whitespace width just after the `(`.
  pub left_off: usize,
  /// Block stack depth when the group opened; blocks above it belong to
  /// the group and close with it.
  pub block_depth: usize,
}

pub(crate) struct TextState<'src> {
  pub quote: QuoteSize,
  pub segments: Vec<Segment<'src>>,
}

impl<'src> TextState<'src> {
  pub fn new(quote: QuoteSize) -> Self {
    Self {
      quote,
      segments: vec![],
    }
  }

  /// Append plain text, merging into a preceding plain segment so that an
  /// interior quote of the wrong size does not split the text.
  pub fn plain(&mut self, text: &'src str) {
    if let Some(Segment::Plain(prev)) = self.segments.last_mut() {
      *prev = Cow::owned(format!("{prev}{text}"));
    } else {
      self.segments.push(Segment::Plain(Cow::borrowed(text)));
    }
  }

  pub fn escape(&mut self, segment: Segment<'src>) {
    self.segments.push(segment);
  }
}

/// One block being aggregated.
pub(crate) struct BlockState<'src> {
  /// False when the block opened at an indentation level that matches no
  /// enclosing block.
  pub valid: bool,
  pub indent: usize,
  /// Empty lines preceding the first non-empty line.
  pub empty_lines: Vec<usize>,
  pub first_line: Option<RequiredLine<'src>>,
  pub lines: Vec<Line<'src>>,
}

impl<'src> BlockState<'src> {
  pub fn new(indent: usize, valid: bool, empty_lines: Vec<usize>) -> Self {
    Self {
      valid,
      indent,
      empty_lines,
      first_line: None,
      lines: vec![],
    }
  }
}
