use beef::lean::Cow;
use span::Span;

pub mod ast;
pub mod automaton;
pub mod parser;
pub mod pattern;
pub mod scanner;

pub use parser::{parse, Parsed, Parser};

pub type Result<T, E = Error> = std::result::Result<T, E>;

#[derive(Clone, Debug)]
pub struct Error {
  pub message: Cow<'static, str>,
  pub span: Span,
}

impl Error {
  pub fn new(message: impl Into<Cow<'static, str>>, span: impl Into<Span>) -> Self {
    let message = message.into();
    let span = span.into();
    Error { message, span }
  }

  /// An invariant violation inside the parser itself. Seeing one of these
  /// means the rule definitions are broken, not the input.
  pub(crate) fn internal(message: &'static str, span: impl Into<Span>) -> Self {
    Error {
      message: Cow::owned(format!("internal error: {message}")),
      span: span.into(),
    }
  }

  pub fn is_internal(&self) -> bool {
    self.message.as_ref().starts_with("internal error:")
  }
}

impl std::error::Error for Error {}

impl std::fmt::Display for Error {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    let Error { message, span } = self;
    write!(f, "error at {span}: {message}")
  }
}
