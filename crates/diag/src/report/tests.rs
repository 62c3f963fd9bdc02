use super::{Level, RenderError, Report};

#[test]
fn render_single_line() {
  let src = "x = (a b";

  let report = Report::error(src, "unclosed group", 4..8)
    .color(false)
    .render()
    .unwrap();

  assert_eq!(
    report,
    concat!(
      "error: unclosed group\n",
      " --> code:1\n",
      "  |\n",
      "  | x = (a b\n",
      "  |     ^^^^\n",
      "  |\n",
    )
  );
}

#[test]
fn render_with_name_and_note() {
  let src = "a\nb $ c\n";

  let report = Report::warning(src, "unrecognized token", 4..5)
    .named("demo")
    .note("this character starts no token")
    .color(false)
    .render()
    .unwrap();

  assert_eq!(
    report,
    concat!(
      "warning: unrecognized token\n",
      " --> demo:2\n",
      "  |\n",
      "  | b $ c\n",
      "  |   ^\n",
      "  |\n",
      "  = this character starts no token\n",
    )
  );
}

#[test]
fn render_empty_span_at_end_of_input() {
  let src = "(a";

  let report = Report::error(src, "unexpected end of input", 2..2)
    .color(false)
    .render()
    .unwrap();

  assert_eq!(
    report,
    concat!(
      "error: unexpected end of input\n",
      " --> code:1\n",
      "  |\n",
      "  | (a\n",
      "  |   ^\n",
      "  |\n",
    )
  );
}

#[test]
fn render_rejects_out_of_bounds_span() {
  let result = Report::error("ab", "nope", 0..3).render();
  assert!(matches!(result, Err(RenderError::Span { len: 2, .. })));
}

#[test]
fn level_display() {
  assert_eq!(Level::Info.to_string(), "info");
  assert_eq!(Level::Warning.to_string(), "warning");
  assert_eq!(Level::Error.to_string(), "error");
}
