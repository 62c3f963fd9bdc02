//! The parser: a stack machine driven by scanner groups.
//!
//! `Parser::new` wires up the group/rule tables; `run` repeatedly takes
//! the longest match of the active group's automaton and dispatches the
//! matched rule's action. Actions mutate [`state::State`], push and pop
//! scanner groups, and aggregate lines into blocks. Input damage becomes
//! error nodes in the tree plus an entry in `errors`; `Err` from `run`
//! only ever reports a broken parser definition.

use span::Span;

use crate::ast;
use crate::pattern::Pattern;
use crate::scanner::{Action, GroupId, Registry, Scanner};
use crate::{Error, Result};

use self::state::State;

mod block;
mod lexical;
pub(crate) mod state;

/// Characters an operator is made of.
const OPERATOR_CHARS: &str = "!$%&*+-/<>?^~|:\\";

/// Characters that may not follow an operator: the operator characters
/// plus `=`, `,` and `.`.
const OPERATOR_SUFFIX_CHARS: &str = "!$%&*+-/<>?^~|:\\=,.";

/// Operators that never take the `=` modifier suffix.
const NO_MOD_OPERATORS: &[&str] = &["=", "==", ">=", "<=", "/=", ".", "..", "...", ","];

/// Characters that legally terminate an identifier. Anything else glued
/// to one becomes an invalid suffix.
const IDENT_BREAKERS: &str = "^`!@#$%^&*()-=+[]{}|;:<>,./ \t\r\n\\";

/// Characters with special meaning inside a text literal.
const TEXT_SPECIALS: &str = "'`\n\\";

/// Parse `src` into a module, discarding the diagnostics.
pub fn parse(src: &str) -> Result<ast::Module<'_>> {
  Ok(Parser::new(src).run()?.module)
}

/// The outcome of a parse: the module is always produced, with lexical
/// damage embedded in the tree and listed in `errors`.
pub struct Parsed<'src> {
  pub module: ast::Module<'src>,
  pub errors: Vec<Error>,
}

pub struct Parser<'src> {
  scanner: Scanner<'src>,
  registry: Registry<'src>,
  groups: Groups,
  group_stack: Vec<GroupId>,
  state: State<'src>,
  errors: Vec<Error>,
  done: bool,
}

pub(crate) struct Groups {
  pub normal: GroupId,
  pub newline: GroupId,
  pub ident_suffix: GroupId,
  pub operator_suffix: GroupId,
  pub operator_modifier: GroupId,
  pub number_phase2: GroupId,
  pub text: GroupId,
  pub parensed: GroupId,
}

impl Groups {
  fn define(registry: &mut Registry<'_>) -> Groups {
    let normal = registry.define_group("NORMAL");
    let newline = registry.define_group("NEWLINE");
    let ident_suffix = registry.define_group("IDENT_SFX_CHECK");
    let operator_suffix = registry.define_group("OPERATOR_SFX_CHECK");
    let operator_modifier = registry.define_group("OPERATOR_MOD_CHECK");
    let number_phase2 = registry.define_group("NUMBER_PHASE2");
    let text = registry.define_group("TEXT");
    let parensed = registry.define_group("PARENSED");

    registry.set_parent(operator_modifier, operator_suffix);
    registry.set_parent(parensed, normal);

    Groups {
      normal,
      newline,
      ident_suffix,
      operator_suffix,
      operator_modifier,
      number_phase2,
      text,
      parensed,
    }
  }
}

fn install_rules<'src>(registry: &mut Registry<'src>, groups: &Groups) {
  let lower = Pattern::range('a', 'z');
  let upper = Pattern::range('A', 'Z');
  let digit = Pattern::range('0', '9');
  let alnum = digit.clone().or(lower.clone()).or(upper.clone());
  let ident_tail = alnum
    .clone()
    .or(Pattern::char('_'))
    .many()
    .then(Pattern::char('\'').many());
  let whitespace = Pattern::char(' ').many1();
  let newline = Pattern::char('\n');

  // NORMAL
  {
    let variable = lower.then(ident_tail.clone());
    let constructor = upper.then(ident_tail);
    let operator = Pattern::any_of(OPERATOR_CHARS).many1();
    let no_mod_operator = NO_MOD_OPERATORS
      .iter()
      .map(|s| Pattern::string(s))
      .reduce(Pattern::or)
      .unwrap_or(Pattern::Never);
    let quote = Pattern::string("'''").or(Pattern::char('\''));
    let group_open = Pattern::char('(').then(Pattern::char(' ').many());

    registry.add_rule(groups.normal, variable, Parser::on_variable);
    registry.add_rule(groups.normal, constructor, Parser::on_constructor);
    registry.add_rule(groups.normal, Pattern::char('_'), Parser::on_wildcard);
    registry.add_rule(groups.normal, operator, Parser::on_operator);
    registry.add_rule(groups.normal, no_mod_operator, Parser::on_no_mod_operator);
    registry.add_rule(groups.normal, digit.clone().many1(), Parser::on_number);
    registry.add_rule(groups.normal, quote, Parser::on_text_begin);
    registry.add_rule(groups.normal, group_open, Parser::on_group_begin);
    registry.add_rule(groups.normal, Pattern::char(')'), Parser::on_unmatched_close);
    registry.add_rule(groups.normal, newline.clone(), Parser::on_newline);
    registry.add_rule(groups.normal, whitespace.clone(), Parser::on_spaces);
    registry.add_rule(groups.normal, Pattern::eof(), Parser::on_eof);
    registry.add_rule(groups.normal, Pattern::any(), Parser::on_unrecognized);
  }

  // NEWLINE
  {
    let lead = whitespace.opt();
    registry.add_rule(
      groups.newline,
      lead.clone().then(newline),
      Parser::on_empty_line,
    );
    registry.add_rule(
      groups.newline,
      lead.clone().then(Pattern::eof()),
      Parser::on_eof_line,
    );
    registry.add_rule(groups.newline, lead, Parser::on_block_newline);
  }

  // IDENT_SFX_CHECK
  registry.add_rule(
    groups.ident_suffix,
    Pattern::none_of(IDENT_BREAKERS).many1(),
    Parser::on_ident_suffix,
  );
  registry.add_rule(groups.ident_suffix, Pattern::Always, Parser::on_no_suffix);

  // OPERATOR_SFX_CHECK, OPERATOR_MOD_CHECK
  registry.add_rule(
    groups.operator_suffix,
    Pattern::any_of(OPERATOR_SUFFIX_CHARS).many1(),
    Parser::on_ident_suffix,
  );
  registry.add_rule(groups.operator_suffix, Pattern::Always, Parser::on_no_suffix);
  registry.add_rule(
    groups.operator_modifier,
    Pattern::char('='),
    Parser::on_modifier,
  );

  // NUMBER_PHASE2
  registry.add_rule(
    groups.number_phase2,
    Pattern::char('_').then(alnum.many1()),
    Parser::on_based_number,
  );
  registry.add_rule(
    groups.number_phase2,
    Pattern::char('_'),
    Parser::on_dangling_base,
  );
  registry.add_rule(groups.number_phase2, Pattern::Always, Parser::on_plain_number);

  // TEXT, longest rules first
  {
    let quote = Pattern::string("'''").or(Pattern::char('\''));
    registry.add_rule(groups.text, quote, Parser::on_text_quote);
    for length in (0..=4).rev() {
      let mut escape = Pattern::string("\\u");
      for _ in 0..length {
        escape = escape.then(Pattern::none_of(TEXT_SPECIALS));
      }
      registry.add_rule(groups.text, escape, Parser::on_text_escape);
    }
    registry.add_rule(
      groups.text,
      Pattern::none_of(TEXT_SPECIALS).many1(),
      Parser::on_text_plain,
    );
    registry.add_rule(groups.text, Pattern::eof(), Parser::on_text_eof);
  }

  // PARENSED
  registry.add_rule(groups.parensed, Pattern::char(')'), Parser::on_group_end);
  registry.add_rule(groups.parensed, Pattern::eof(), Parser::on_group_eof);
}

impl<'src> Parser<'src> {
  pub fn new(src: &'src str) -> Self {
    let mut registry = Registry::new();
    let groups = Groups::define(&mut registry);
    install_rules(&mut registry, &groups);
    let group_stack = vec![groups.normal];

    Self {
      scanner: Scanner::new(src),
      registry,
      groups,
      group_stack,
      state: State::new(),
      errors: Vec::new(),
      done: false,
    }
  }

  /// Drive the scanner to the end of input and hand out the module.
  pub fn run(mut self) -> Result<Parsed<'src>> {
    while !self.done {
      self.advance()?;
    }

    let span = self.scanner.span();
    if self.group_stack.len() != 1
      || !self.state.ast_stack.is_empty()
      || !self.state.offset_stack.is_empty()
      || !self.state.block_stack.is_empty()
    {
      return Err(Error::internal("unbalanced state at end of input", span));
    }
    let module = self
      .state
      .module
      .take()
      .ok_or_else(|| Error::internal("no module produced", span))?;

    Ok(Parsed {
      module,
      errors: self.errors,
    })
  }

  /// Scan one match in the active group and run its action.
  fn advance(&mut self) -> Result<()> {
    let group = *self
      .group_stack
      .last()
      .ok_or_else(|| Error::internal("no active scanner group", self.scanner.span()))?;
    let compiled = self.registry.compiled(group);

    let action: Action<'src> = match self.scanner.next_match(&compiled.dfa) {
      Some(rule) => compiled.actions[rule],
      None => Parser::on_unmatched,
    };
    action(self)
  }

  /// Fallback when the active group accepts nothing here: emit one code
  /// point as unrecognized, or finish up if that code point is the
  /// sentinel.
  fn on_unmatched(&mut self) -> Result<()> {
    self.scanner.bump();
    if self.scanner.matched_eof() {
      self.group_stack.truncate(1);
      return self.on_eof();
    }
    self.on_unrecognized()
  }

  pub(crate) fn on_unrecognized(&mut self) -> Result<()> {
    self.error("unrecognized token");
    let text = self.scanner.current_match();
    self.state.app(ast::unrecognized(text));
    Ok(())
  }

  pub(crate) fn on_spaces(&mut self) -> Result<()> {
    self.state.last_offset += self.scanner.match_len();
    Ok(())
  }

  pub(crate) fn begin_group(&mut self, group: GroupId) {
    self.group_stack.push(group);
  }

  pub(crate) fn end_group(&mut self) -> Result<()> {
    if self.group_stack.len() <= 1 {
      return Err(self.internal("popped the root scanner group"));
    }
    self.group_stack.pop();
    Ok(())
  }

  pub(crate) fn error(&mut self, message: &'static str) {
    self.errors.push(Error::new(message, self.scanner.span()));
  }

  pub(crate) fn internal(&self, message: &'static str) -> Error {
    Error::internal(message, self.scanner.span())
  }

  pub(crate) fn span(&self) -> Span {
    self.scanner.span()
  }

  /// Restore `result` from the AST stack. The current value must already
  /// have been taken.
  pub(crate) fn pop_ast(&mut self) -> Result<()> {
    debug_assert!(self.state.result.is_none());
    let restored = self
      .state
      .ast_stack
      .pop()
      .ok_or_else(|| self.internal("AST stack underflow"))?;
    self.state.result = restored;
    Ok(())
  }

  /// Restore the pending whitespace from the offset stack, discarding the
  /// current (already consumed) value.
  pub(crate) fn pop_last_offset(&mut self) -> Result<()> {
    let restored = self
      .state
      .offset_stack
      .pop()
      .ok_or_else(|| self.internal("offset stack underflow"))?;
    self.state.last_offset = restored;
    Ok(())
  }
}

#[cfg(test)]
mod tests;
