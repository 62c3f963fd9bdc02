//! The syntax tree.
//!
//! Every node stores enough offset information to reproduce its source
//! text exactly; [`std::fmt::Display`] renders a parsed [`Module`] back
//! into the input it came from. Lexically damaged input is represented by
//! dedicated variants (`InvalidSuffix`, `DanglingBase`, the unclosed and
//! unmatched group forms, `InvalidIndentation`, `Unrecognized`) rather
//! than by failing the parse.

use std::fmt;

use beef::lean::Cow;

pub type Ident<'src> = Cow<'src, str>;

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Ast<'src> {
  /// Lowercase-led identifier.
  Var(Ident<'src>),
  /// Uppercase-led identifier.
  Cons(Ident<'src>),
  /// `_`
  Wildcard,
  Operator(Ident<'src>),
  /// An operator immediately followed by `=`, e.g. `+=`.
  Modifier(Ident<'src>),
  /// An identifier or operator glued to characters that may not follow it.
  InvalidSuffix(Box<InvalidSuffix<'src>>),
  /// Left-associative application with preserved spacing.
  App(Box<App<'src>>),
  Number(Box<Number<'src>>),
  /// `digits_` with no base digits following.
  DanglingBase(Ident<'src>),
  Text(Box<Text<'src>>),
  Group(Box<Group<'src>>),
  /// A group still open when input ended.
  UnclosedGroup(Box<UnclosedGroup<'src>>),
  /// `)` with no group open.
  UnmatchedClose,
  Block(Box<Block<'src>>),
  /// A block whose indentation matches no enclosing block.
  InvalidIndentation(Box<Block<'src>>),
  /// A code point no rule matched.
  Unrecognized(Ident<'src>),
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct InvalidSuffix<'src> {
  pub body: Ast<'src>,
  pub suffix: Ident<'src>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct App<'src> {
  pub func: Ast<'src>,
  /// Whitespace width between `func` and `arg`.
  pub off: usize,
  pub arg: Ast<'src>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Number<'src> {
  pub base: Option<Ident<'src>>,
  pub digits: Ident<'src>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Text<'src> {
  pub quote: QuoteSize,
  pub segments: Vec<Segment<'src>>,
  /// False when input ended before the closing quote.
  pub closed: bool,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum QuoteSize {
  Single,
  Triple,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Segment<'src> {
  Plain(Ident<'src>),
  Escape(Escape<'src>),
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Escape<'src> {
  /// `\u` followed by up to four characters, kept as written.
  U16(Ident<'src>),
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Group<'src> {
  /// Whitespace width just after `(`.
  pub left_off: usize,
  pub inner: Option<Ast<'src>>,
  /// Whitespace width just before `)`.
  pub right_off: usize,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct UnclosedGroup<'src> {
  pub left_off: Option<usize>,
  pub inner: Option<Ast<'src>>,
}

/// One line of a block or module. `body: None` is an empty line whose
/// whole width is `off`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Line<'src> {
  pub body: Option<Ast<'src>>,
  /// Trailing whitespace width.
  pub off: usize,
}

/// The first non-empty line of a block.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RequiredLine<'src> {
  pub body: Ast<'src>,
  pub off: usize,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Block<'src> {
  pub indent: usize,
  /// Widths of the empty lines between the enclosing line and `first_line`.
  pub empty_lines: Vec<usize>,
  pub first_line: RequiredLine<'src>,
  pub lines: Vec<Line<'src>>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Module<'src> {
  pub first_line: Line<'src>,
  pub lines: Vec<Line<'src>>,
}

pub fn var<'src>(name: impl Into<Ident<'src>>) -> Ast<'src> {
  Ast::Var(name.into())
}

pub fn cons<'src>(name: impl Into<Ident<'src>>) -> Ast<'src> {
  Ast::Cons(name.into())
}

pub fn operator<'src>(name: impl Into<Ident<'src>>) -> Ast<'src> {
  Ast::Operator(name.into())
}

pub fn modifier<'src>(name: impl Into<Ident<'src>>) -> Ast<'src> {
  Ast::Modifier(name.into())
}

pub fn invalid_suffix<'src>(body: Ast<'src>, suffix: impl Into<Ident<'src>>) -> Ast<'src> {
  Ast::InvalidSuffix(Box::new(InvalidSuffix {
    body,
    suffix: suffix.into(),
  }))
}

pub fn app<'src>(func: Ast<'src>, off: usize, arg: Ast<'src>) -> Ast<'src> {
  Ast::App(Box::new(App { func, off, arg }))
}

pub fn number<'src>(
  base: Option<impl Into<Ident<'src>>>,
  digits: impl Into<Ident<'src>>,
) -> Ast<'src> {
  Ast::Number(Box::new(Number {
    base: base.map(Into::into),
    digits: digits.into(),
  }))
}

pub fn dangling_base<'src>(digits: impl Into<Ident<'src>>) -> Ast<'src> {
  Ast::DanglingBase(digits.into())
}

pub fn text<'src>(quote: QuoteSize, segments: Vec<Segment<'src>>) -> Ast<'src> {
  Ast::Text(Box::new(Text {
    quote,
    segments,
    closed: true,
  }))
}

pub fn unterminated_text<'src>(quote: QuoteSize, segments: Vec<Segment<'src>>) -> Ast<'src> {
  Ast::Text(Box::new(Text {
    quote,
    segments,
    closed: false,
  }))
}

pub fn plain<'src>(s: impl Into<Ident<'src>>) -> Segment<'src> {
  Segment::Plain(s.into())
}

pub fn escape_u16<'src>(hex: impl Into<Ident<'src>>) -> Segment<'src> {
  Segment::Escape(Escape::U16(hex.into()))
}

pub fn group<'src>(left_off: usize, inner: Option<Ast<'src>>, right_off: usize) -> Ast<'src> {
  Ast::Group(Box::new(Group {
    left_off,
    inner,
    right_off,
  }))
}

pub fn unclosed_group<'src>(left_off: Option<usize>, inner: Option<Ast<'src>>) -> Ast<'src> {
  Ast::UnclosedGroup(Box::new(UnclosedGroup { left_off, inner }))
}

pub fn unrecognized<'src>(s: impl Into<Ident<'src>>) -> Ast<'src> {
  Ast::Unrecognized(s.into())
}

pub fn line<'src>(body: Option<Ast<'src>>, off: usize) -> Line<'src> {
  Line { body, off }
}

pub fn block<'src>(
  indent: usize,
  empty_lines: Vec<usize>,
  first_line: RequiredLine<'src>,
  lines: Vec<Line<'src>>,
) -> Ast<'src> {
  Ast::Block(Box::new(Block {
    indent,
    empty_lines,
    first_line,
    lines,
  }))
}

pub fn invalid_block<'src>(
  indent: usize,
  empty_lines: Vec<usize>,
  first_line: RequiredLine<'src>,
  lines: Vec<Line<'src>>,
) -> Ast<'src> {
  Ast::InvalidIndentation(Box::new(Block {
    indent,
    empty_lines,
    first_line,
    lines,
  }))
}

pub fn required<'src>(body: Ast<'src>, off: usize) -> RequiredLine<'src> {
  RequiredLine { body, off }
}

impl QuoteSize {
  pub fn width(&self) -> usize {
    match self {
      QuoteSize::Single => 1,
      QuoteSize::Triple => 3,
    }
  }
}

fn pad(f: &mut fmt::Formatter<'_>, width: usize) -> fmt::Result {
  write!(f, "{:width$}", "")
}

impl fmt::Display for Ast<'_> {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      Ast::Var(name) | Ast::Cons(name) | Ast::Operator(name) => write!(f, "{name}"),
      Ast::Wildcard => write!(f, "_"),
      Ast::Modifier(name) => write!(f, "{name}="),
      Ast::InvalidSuffix(v) => write!(f, "{}{}", v.body, v.suffix),
      Ast::App(v) => {
        write!(f, "{}", v.func)?;
        pad(f, v.off)?;
        write!(f, "{}", v.arg)
      }
      Ast::Number(v) => match &v.base {
        Some(base) => write!(f, "{}_{}", base, v.digits),
        None => write!(f, "{}", v.digits),
      },
      Ast::DanglingBase(digits) => write!(f, "{digits}_"),
      Ast::Text(v) => {
        write!(f, "{}", v.quote)?;
        for segment in &v.segments {
          write!(f, "{segment}")?;
        }
        if v.closed {
          write!(f, "{}", v.quote)?;
        }
        Ok(())
      }
      Ast::Group(v) => {
        write!(f, "(")?;
        pad(f, v.left_off)?;
        if let Some(inner) = &v.inner {
          write!(f, "{inner}")?;
        }
        pad(f, v.right_off)?;
        write!(f, ")")
      }
      Ast::UnclosedGroup(v) => {
        write!(f, "(")?;
        if let Some(left_off) = v.left_off {
          pad(f, left_off)?;
        }
        if let Some(inner) = &v.inner {
          write!(f, "{inner}")?;
        }
        Ok(())
      }
      Ast::UnmatchedClose => write!(f, ")"),
      Ast::Block(v) | Ast::InvalidIndentation(v) => write!(f, "{v}"),
      Ast::Unrecognized(s) => write!(f, "{s}"),
    }
  }
}

impl fmt::Display for QuoteSize {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      QuoteSize::Single => write!(f, "'"),
      QuoteSize::Triple => write!(f, "'''"),
    }
  }
}

impl fmt::Display for Segment<'_> {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      Segment::Plain(s) => write!(f, "{s}"),
      Segment::Escape(Escape::U16(hex)) => write!(f, "\\u{hex}"),
    }
  }
}

impl fmt::Display for Block<'_> {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    for width in &self.empty_lines {
      writeln!(f)?;
      pad(f, *width)?;
    }
    writeln!(f)?;
    pad(f, self.indent)?;
    write!(f, "{}", self.first_line.body)?;
    pad(f, self.first_line.off)?;
    for line in &self.lines {
      writeln!(f)?;
      if let Some(body) = &line.body {
        pad(f, self.indent)?;
        write!(f, "{body}")?;
      }
      pad(f, line.off)?;
    }
    Ok(())
  }
}

impl fmt::Display for Module<'_> {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    if let Some(body) = &self.first_line.body {
      write!(f, "{body}")?;
    }
    pad(f, self.first_line.off)?;
    for line in &self.lines {
      writeln!(f)?;
      if let Some(body) = &line.body {
        write!(f, "{body}")?;
      }
      pad(f, line.off)?;
    }
    Ok(())
  }
}
