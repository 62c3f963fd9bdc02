use span::Span;

/// The single source line a span points into, with the span clamped to it.
///
/// Reports always render one line; a span which continues past the end of
/// its first line is underlined up to the line break.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Snippet<'a> {
  /// 1-based line number of `text` in the source.
  pub line: usize,
  /// The line itself, without its terminating newline.
  pub text: &'a str,
  /// Underline start, measured in characters from the start of `text`.
  pub column: usize,
  /// Underline width in characters, at least 1.
  pub width: usize,
}

impl<'a> Snippet<'a> {
  pub fn new(src: &'a str, span: impl Into<Span>) -> Self {
    let span: Span = span.into();

    let line_start = src[..span.start].rfind('\n').map(|i| i + 1).unwrap_or(0);
    let line_end = src[line_start..]
      .find('\n')
      .map(|i| i + line_start)
      .unwrap_or(src.len());
    let text = &src[line_start..line_end];

    let start = span.start - line_start;
    let end = span.end.clamp(span.start, line_end) - line_start;

    let line = src[..span.start].matches('\n').count() + 1;
    let column = text[..start].chars().count();
    let width = text[start..end].chars().count().max(1);

    Self {
      line,
      text,
      column,
      width,
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn snippet_first_line() {
    let src = "one two three";
    assert_eq!(
      Snippet::new(src, 4..7),
      Snippet {
        line: 1,
        text: "one two three",
        column: 4,
        width: 3,
      }
    );
  }

  #[test]
  fn snippet_later_line() {
    let src = "one\ntwo three\nfour";
    assert_eq!(
      Snippet::new(src, 8..13),
      Snippet {
        line: 2,
        text: "two three",
        column: 4,
        width: 5,
      }
    );
  }

  #[test]
  fn snippet_clamps_to_line() {
    let src = "ab\ncd";
    assert_eq!(
      Snippet::new(src, 0..5),
      Snippet {
        line: 1,
        text: "ab",
        column: 0,
        width: 2,
      }
    );
  }

  #[test]
  fn snippet_empty_span_at_eof() {
    let src = "ab";
    assert_eq!(
      Snippet::new(src, 2..2),
      Snippet {
        line: 1,
        text: "ab",
        column: 2,
        width: 1,
      }
    );
  }
}
