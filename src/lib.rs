//! offside — a parser for a small, indentation-sensitive expression
//! language.
//!
//! Input is a character stream; output is a [`ast::Module`]: nested blocks
//! of lines built from identifiers, operators, numbers, quoted text,
//! parenthesized groups and left-associative application. All whitespace
//! is preserved in the tree, so rendering a module with `Display`
//! reproduces the source byte for byte. Malformed input never fails the
//! parse; it becomes dedicated error nodes plus a diagnostic list.
//!
//! ```
//! let parsed = offside::Parser::new("frobnicate (x\n  y z)").run().unwrap();
//! assert!(parsed.errors.is_empty());
//! assert_eq!(parsed.module.to_string(), "frobnicate (x\n  y z)");
//! ```

pub use span::Span;
pub use syntax::ast;
pub use syntax::{parse, Error, Parsed, Parser, Result};

/// Render a parse's diagnostics as human-readable reports, one after the
/// other.
pub fn render_errors(src: &str, errors: &[Error], color: bool) -> String {
  let mut out = String::new();
  for error in errors {
    let report = diag::Report::error(src, error.message.as_ref(), error.span).color(color);
    match report.render() {
      Ok(rendered) => {
        out.push_str(&rendered);
        out.push('\n');
      }
      Err(_) => {
        out.push_str(&error.to_string());
        out.push('\n');
      }
    }
  }
  out
}
