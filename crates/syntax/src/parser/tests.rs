use indoc::indoc;

use super::*;
use crate::ast::{
  app, block, cons, dangling_base, group, invalid_block, invalid_suffix, line, modifier, number,
  operator, plain, required, text, unclosed_group, unterminated_text, var, Ast, QuoteSize,
};

fn module(src: &str) -> ast::Module<'_> {
  parse(src).unwrap()
}

/// The body of the module's first line.
fn first(src: &str) -> Ast<'_> {
  module(src).first_line.body.unwrap()
}

fn errors(src: &str) -> Vec<Error> {
  Parser::new(src).run().unwrap().errors
}

macro_rules! round_trip {
  ($($input:expr),* $(,)?) => {
    $(
      assert_eq!(module($input).to_string(), $input, "round-trip of {:?}", $input);
    )*
  };
}

#[test]
fn application_preserves_spacing() {
  assert_eq!(first("foo bar"), app(var("foo"), 1, var("bar")));
  assert_eq!(
    first("foo   bar Baz"),
    app(app(var("foo"), 3, var("bar")), 1, cons("Baz"))
  );
  let m = module("foo bar");
  assert_eq!(m.first_line.off, 0);
  assert!(m.lines.is_empty());
}

#[test]
fn identifiers() {
  assert_eq!(first("foo"), var("foo"));
  assert_eq!(first("foo'"), var("foo'"));
  assert_eq!(first("Foo"), cons("Foo"));
  assert_eq!(first("_"), Ast::Wildcard);
}

#[test]
fn invalid_identifier_suffixes() {
  assert_eq!(first("xä"), invalid_suffix(var("x"), "ä"));
  assert_eq!(first("_x"), invalid_suffix(Ast::Wildcard, "x"));
  assert_eq!(errors("xä").len(), 1);
}

#[test]
fn operators_and_modifiers() {
  assert_eq!(first("+"), operator("+"));
  assert_eq!(first("+="), modifier("+"));
  assert_eq!(first("=="), operator("=="));
  assert_eq!(first(">="), operator(">="));
  assert_eq!(first("/="), operator("/="));
  assert_eq!(first("..."), operator("..."));
  assert_eq!(first("+=="), invalid_suffix(operator("+"), "=="));
  assert_eq!(first("==,"), invalid_suffix(operator("=="), ","));
}

#[test]
fn dots_prefer_the_longest_form() {
  assert_eq!(first("a.b"), app(app(var("a"), 0, operator(".")), 0, var("b")));
  assert_eq!(
    first("a..b"),
    app(app(var("a"), 0, operator("..")), 0, var("b"))
  );
  assert_eq!(
    first("a...b"),
    app(app(var("a"), 0, operator("...")), 0, var("b"))
  );
}

#[test]
fn numbers() {
  assert_eq!(first("42"), number(None::<&str>, "42"));
  assert_eq!(first("16_ff"), number(Some("16"), "ff"));
  assert_eq!(first("2_1011"), number(Some("2"), "1011"));
  assert_eq!(first("16_"), dangling_base("16"));
  assert_eq!(errors("16_").len(), 1);
}

#[test]
fn texts() {
  assert_eq!(
    first("'hello'"),
    text(QuoteSize::Single, vec![plain("hello")])
  );
  assert_eq!(first("''"), text(QuoteSize::Single, vec![]));
  assert_eq!(
    first("'''x'y'''"),
    text(QuoteSize::Triple, vec![plain("x'y")])
  );
  assert_eq!(
    first("'a\\u0041b'"),
    text(
      QuoteSize::Single,
      vec![plain("a"), crate::ast::escape_u16("0041"), plain("b")]
    )
  );
  assert_eq!(
    first("'\\uAB'"),
    text(QuoteSize::Single, vec![crate::ast::escape_u16("AB")])
  );
}

#[test]
fn unterminated_texts() {
  assert_eq!(
    first("'abc"),
    unterminated_text(QuoteSize::Single, vec![plain("abc")])
  );
  assert_eq!(
    first("''''"),
    unterminated_text(QuoteSize::Triple, vec![plain("'")])
  );
  assert_eq!(errors("'abc").len(), 1);
}

#[test]
fn groups() {
  assert_eq!(first("(a b)"), group(0, Some(app(var("a"), 1, var("b"))), 0));
  assert_eq!(first("()"), group(0, None, 0));
  assert_eq!(first("( a )"), group(1, Some(var("a")), 1));
  assert_eq!(
    first("((a))"),
    group(0, Some(group(0, Some(var("a")), 0)), 0)
  );
}

#[test]
fn unclosed_groups() {
  assert_eq!(first("(a"), unclosed_group(Some(0), Some(var("a"))));
  assert_eq!(first("( "), unclosed_group(None, None));
  assert_eq!(errors("(a").len(), 1);
}

#[test]
fn unmatched_close() {
  assert_eq!(
    first("a)b"),
    app(app(var("a"), 0, Ast::UnmatchedClose), 0, var("b"))
  );
  assert_eq!(errors(")").len(), 1);
}

#[test]
fn unrecognized_code_points() {
  assert_eq!(first("§"), crate::ast::unrecognized("§"));
  assert_eq!(
    first("a §b"),
    app(
      app(var("a"), 1, crate::ast::unrecognized("§")),
      0,
      var("b")
    )
  );
  assert_eq!(errors("a §b").len(), 1);
}

#[test]
fn simple_block() {
  let src = indoc! {"
    a
      b
      c"};
  assert_eq!(
    first(src),
    app(
      var("a"),
      0,
      block(
        2,
        vec![],
        required(var("b"), 0),
        vec![line(Some(var("c")), 0)],
      )
    )
  );
}

#[test]
fn dedent_closes_the_block() {
  let src = indoc! {"
    a
      b
    c"};
  let m = module(src);
  assert_eq!(
    m.first_line.body.as_ref().unwrap(),
    &app(var("a"), 0, block(2, vec![], required(var("b"), 0), vec![]))
  );
  assert_eq!(m.lines, vec![line(Some(var("c")), 0)]);
}

#[test]
fn deeper_nesting() {
  let src = indoc! {"
    a
      b
        c
      d"};
  assert_eq!(
    first(src),
    app(
      var("a"),
      0,
      block(
        2,
        vec![],
        required(app(
          var("b"),
          0,
          block(4, vec![], required(var("c"), 0), vec![])
        ), 0),
        vec![line(Some(var("d")), 0)],
      )
    )
  );
}

#[test]
fn empty_lines_before_a_block_belong_to_it() {
  let src = "a\n\n  b";
  assert_eq!(
    first(src),
    app(var("a"), 0, block(2, vec![0], required(var("b"), 0), vec![]))
  );
}

#[test]
fn inconsistent_indentation_is_flagged() {
  let src = indoc! {"
    a
        b
      c"};
  assert_eq!(
    first(src),
    app(
      app(
        var("a"),
        0,
        block(4, vec![], required(var("b"), 0), vec![])
      ),
      0,
      invalid_block(2, vec![], required(var("c"), 0), vec![])
    )
  );
  assert_eq!(errors(src).len(), 1);
}

#[test]
fn module_of_empty_lines() {
  assert_eq!(
    module(""),
    ast::Module {
      first_line: line(None, 0),
      lines: vec![],
    }
  );
  assert_eq!(
    module("\n"),
    ast::Module {
      first_line: line(None, 0),
      lines: vec![line(None, 0)],
    }
  );
  assert_eq!(
    module("   "),
    ast::Module {
      first_line: line(None, 3),
      lines: vec![],
    }
  );
}

#[test]
fn empty_line_between_lines() {
  let m = module("a\n\nb");
  assert_eq!(m.first_line, line(Some(var("a")), 0));
  assert_eq!(m.lines, vec![line(None, 0), line(Some(var("b")), 0)]);
}

#[test]
fn trailing_newline_is_an_empty_line() {
  let m = module("x\n");
  assert_eq!(m.first_line, line(Some(var("x")), 0));
  assert_eq!(m.lines, vec![line(None, 0)]);
}

#[test]
fn trailing_offsets_survive() {
  let m = module("x  \nyz ");
  assert_eq!(m.first_line, line(Some(var("x")), 2));
  assert_eq!(m.lines, vec![line(Some(var("yz")), 1)]);
}

#[test]
fn blocks_inside_groups_close_with_them() {
  assert_eq!(
    first("(a\n  b)"),
    group(
      0,
      Some(app(
        var("a"),
        0,
        block(2, vec![], required(var("b"), 0), vec![])
      )),
      0
    )
  );
}

#[test]
fn round_trips() {
  round_trip![
    "",
    "x",
    "x\n",
    "x\n  ",
    "\n",
    "\nx",
    "\n\nx",
    "a\nb",
    "a\n\nb",
    "a\n\n\n",
    "a\n  b",
    "a\n  b\n  c",
    "a\n  b\nc",
    "a\n    b\n  c",
    "a\n  b\n    c\n  d",
    "a\n\n  b",
    "x\n\n  b\n c",
    "   ",
    "  \n ",
    "a\n  \n",
    "foo bar",
    "foo   bar  ",
    "16_ff",
    "16_",
    "007",
    "2_1011 55",
    "(a b)",
    "((a))",
    "( a )",
    "(a",
    "( ",
    "()",
    "a)b",
    "'hello'",
    "' '",
    "''",
    "''''",
    "'''x'y'''",
    "'a\\u0041b'",
    "'\\uAB'",
    "'abc",
    "+=",
    "+==",
    "a += 1",
    "x = y",
    "f .. g",
    "...",
    "a.b",
    "_",
    "_x",
    "foo'",
    "Foo Bar'",
    "§",
    "a §b",
    "xä",
    "x  \nyz ",
    "x (a\n",
    "x ( a ",
    "(a\n  b",
    "(a\n  b)",
    "(\n  b)",
  ];
}

#[test]
fn renders_match_insta_snapshots() {
  insta::assert_snapshot!(module("( a  )").to_string(), @"( a  )");
  insta::assert_snapshot!(module("16_ff 'x'").to_string(), @"16_ff 'x'");
}

#[test]
fn diagnostics_accumulate_in_order() {
  let errors = errors("16_ §");
  assert_eq!(errors.len(), 2);
  assert_eq!(errors[0].message.as_ref(), "numeric literal lacks base digits");
  assert_eq!(errors[1].message.as_ref(), "unrecognized token");
  assert_eq!(errors[1].span, span::Span::from(4..6));
}

#[test]
fn diagnostics_render_with_diag() {
  let src = "foo (bar";
  let errors = errors(src);
  assert_eq!(errors.len(), 1);
  let report = diag::Report::error(src, errors[0].message.as_ref(), errors[0].span)
    .color(false)
    .render()
    .unwrap();
  assert!(report.starts_with("error: unclosed group\n"));
  assert!(report.contains("| foo (bar\n"));
}

#[test]
fn nul_acts_as_end_of_input() {
  let m = module("a\0b");
  assert_eq!(m.first_line, line(Some(var("a")), 0));
  assert!(m.lines.is_empty());
}
