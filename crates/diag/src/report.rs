//! Error reporting
//!
//! A [`Report`] is one diagnostic rendered against the source text it
//! points into: a headline, then the offending line as a short gutter
//! snippet with the spanned range underlined. Reports are deliberately
//! single-line affairs; the parser's spans never cover more than one
//! token, so there is no multi-line machinery here.

use std::fmt;
use std::fmt::{Display, Write};
use std::ops::Range;

use beef::lean::Cow;
use owo_colors as colors;
use span::Span;
use thiserror::Error;

use crate::snippet::Snippet;

#[derive(Clone, Copy, Debug)]
pub enum Level {
  Info,
  Warning,
  Error,
}

impl Level {
  fn accent(self) -> colors::Style {
    match self {
      Level::Info => colors::style().blue(),
      Level::Warning => colors::style().yellow(),
      Level::Error => colors::style().red(),
    }
  }
}

/// One diagnostic, ready to render.
pub struct Report<'a> {
  level: Level,
  source: &'a str,
  name: Option<&'a str>,
  message: Cow<'a, str>,
  span: Span,
  note: Option<Cow<'a, str>>,
  color: bool,
}

impl<'a> Report<'a> {
  pub fn new(
    level: Level,
    source: &'a str,
    message: impl Into<Cow<'a, str>>,
    span: impl Into<Span>,
  ) -> Self {
    Report {
      level,
      source,
      name: None,
      message: message.into(),
      span: span.into(),
      note: None,
      color: true,
    }
  }

  /// An `Error`-level report.
  pub fn error(source: &'a str, message: impl Into<Cow<'a, str>>, span: impl Into<Span>) -> Self {
    Self::new(Level::Error, source, message, span)
  }

  /// A `Warning`-level report.
  pub fn warning(source: &'a str, message: impl Into<Cow<'a, str>>, span: impl Into<Span>) -> Self {
    Self::new(Level::Warning, source, message, span)
  }

  /// An `Info`-level report.
  pub fn info(source: &'a str, message: impl Into<Cow<'a, str>>, span: impl Into<Span>) -> Self {
    Self::new(Level::Info, source, message, span)
  }

  /// Label the source, usually with a file name. Unnamed sources render
  /// as `code`.
  pub fn named(mut self, name: &'a str) -> Self {
    self.name = Some(name);
    self
  }

  /// A remark printed under the snippet.
  pub fn note(mut self, note: impl Into<Cow<'a, str>>) -> Self {
    self.note = Some(note.into());
    self
  }

  pub fn color(mut self, enabled: bool) -> Self {
    self.color = enabled;
    self
  }

  /// Emit the report to `w`.
  ///
  /// The rendered shape is:
  ///
  /// ```text
  /// error: unclosed group
  ///  --> code:2
  ///   |
  ///   | x = (a b
  ///   |     ^^^^^
  ///   |
  ///   = the group is closed at the end of input
  /// ```
  pub fn emit<W: Write>(&self, w: &mut W) -> Result<(), RenderError> {
    if self.source.get(Range::from(self.span)).is_none() {
      return Err(RenderError::Span {
        span: self.span,
        len: self.source.len(),
      });
    }

    let snippet = Snippet::new(self.source, self.span);
    let accent = self.level.accent();
    let frame = colors::style().blue();
    let pipe = self.paint(frame, "|");

    // {level}: {message}
    writeln!(w, "{}: {}", self.paint(accent, self.level), self.message)?;
    // --> {name}:{line}
    writeln!(
      w,
      " {} {}:{}",
      self.paint(frame, "-->"),
      self.name.unwrap_or("code"),
      snippet.line
    )?;
    //  |
    //  | {text}
    //  | {underline}
    //  |
    writeln!(w, "  {pipe}")?;
    writeln!(w, "  {} {}", pipe, snippet.text)?;
    writeln!(
      w,
      "  {} {:pad$}{}",
      pipe,
      "",
      self.paint(accent.bold(), "^".repeat(snippet.width)),
      pad = snippet.column
    )?;
    writeln!(w, "  {pipe}")?;
    if let Some(note) = &self.note {
      // = {note}
      writeln!(w, "  {} {}", self.paint(frame, "="), note)?;
    }

    Ok(())
  }

  /// Render the report to a string.
  pub fn render(&self) -> Result<String, RenderError> {
    let mut out = String::new();
    self.emit(&mut out)?;
    Ok(out)
  }

  fn paint(&self, style: colors::Style, text: impl Display) -> String {
    use colors::OwoColorize;

    if self.color {
      text.style(style).to_string()
    } else {
      text.to_string()
    }
  }
}

#[derive(Debug, Error)]
pub enum RenderError {
  #[error("span {span} is outside the {len}-byte source")]
  Span { span: Span, len: usize },
  #[error(transparent)]
  Fmt(#[from] fmt::Error),
}

impl Display for Level {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    let level = match self {
      Level::Info => "info",
      Level::Warning => "warning",
      Level::Error => "error",
    };
    write!(f, "{level}")
  }
}

#[cfg(test)]
mod tests;
