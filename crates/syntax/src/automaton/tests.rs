use super::*;
use crate::pattern::Pattern;

/// Walk `dfa` over `input`, returning the longest match as
/// `(rule, length)`. Mirrors what the scanner does, minus the cursor.
fn longest(dfa: &Dfa, input: &str) -> Option<(usize, usize)> {
  let mut state = Dfa::START;
  let mut best = dfa.accept(state).map(|rule| (rule, 0));
  for (consumed, c) in input.chars().enumerate() {
    let next = dfa.next(state, dfa.class_of(c as u32));
    if next == DEAD {
      return best;
    }
    state = next;
    if let Some(rule) = dfa.accept(state) {
      best = Some((rule, consumed + 1));
    }
  }
  best
}

#[test]
fn literal_match() {
  let pattern = Pattern::string("abc");
  let dfa = Dfa::compile(&[&pattern]);
  assert_eq!(longest(&dfa, "abcd"), Some((0, 3)));
  assert_eq!(longest(&dfa, "ab"), None);
  assert_eq!(longest(&dfa, "xbc"), None);
}

#[test]
fn longest_match_wins() {
  let dot = Pattern::string(".");
  let dots2 = Pattern::string("..");
  let dots3 = Pattern::string("...");
  let dfa = Dfa::compile(&[&dot, &dots2, &dots3]);
  assert_eq!(longest(&dfa, "."), Some((0, 1)));
  assert_eq!(longest(&dfa, ".."), Some((1, 2)));
  assert_eq!(longest(&dfa, "...."), Some((2, 3)));
}

#[test]
fn first_declared_rule_wins_ties() {
  let a = Pattern::string("ab");
  let b = Pattern::string("ab");
  let dfa = Dfa::compile(&[&a, &b]);
  assert_eq!(longest(&dfa, "ab"), Some((0, 2)));

  // a one-char rule declared first beats a longer rule at length one,
  // but not at length two
  let eq = Pattern::char('=');
  let run = Pattern::any_of("=,").many1();
  let dfa = Dfa::compile(&[&eq, &run]);
  assert_eq!(longest(&dfa, "="), Some((0, 1)));
  assert_eq!(longest(&dfa, "==,"), Some((1, 3)));
}

#[test]
fn always_accepts_the_empty_string() {
  let fallthrough = Pattern::Always;
  let letters = Pattern::range('a', 'z').many1();
  let dfa = Dfa::compile(&[&letters, &fallthrough]);
  assert_eq!(longest(&dfa, "abc"), Some((0, 3)));
  assert_eq!(longest(&dfa, "123"), Some((1, 0)));
  assert_eq!(longest(&dfa, ""), Some((1, 0)));
}

#[test]
fn never_matches_nothing() {
  let never = Pattern::Never;
  let dfa = Dfa::compile(&[&never]);
  assert_eq!(longest(&dfa, ""), None);
  assert_eq!(longest(&dfa, "a"), None);
}

#[test]
fn many_accepts_zero_or_more() {
  let stars = Pattern::char('*').many();
  let dfa = Dfa::compile(&[&stars]);
  assert_eq!(longest(&dfa, ""), Some((0, 0)));
  assert_eq!(longest(&dfa, "***x"), Some((0, 3)));
}

#[test]
fn many1_requires_one() {
  let stars = Pattern::char('*').many1();
  let dfa = Dfa::compile(&[&stars]);
  assert_eq!(longest(&dfa, ""), None);
  assert_eq!(longest(&dfa, "*"), Some((0, 1)));
  assert_eq!(longest(&dfa, "***x"), Some((0, 3)));
}

#[test]
fn at_most_caps_repetition() {
  let escape = Pattern::string("\\u").then(Pattern::none_of("'\n\\").at_most(4));
  let dfa = Dfa::compile(&[&escape]);
  assert_eq!(longest(&dfa, "\\u"), Some((0, 2)));
  assert_eq!(longest(&dfa, "\\uAB"), Some((0, 4)));
  assert_eq!(longest(&dfa, "\\uABCDEF"), Some((0, 6)));
}

#[test]
fn none_of_stops_at_excluded_chars_and_sentinel() {
  let plain = Pattern::none_of("x").many1();
  let dfa = Dfa::compile(&[&plain]);
  assert_eq!(longest(&dfa, "abxcd"), Some((0, 2)));
  assert_eq!(longest(&dfa, "ab\0cd"), Some((0, 2)));
}

#[test]
fn eof_pattern_matches_the_sentinel() {
  let eof = Pattern::eof();
  let dfa = Dfa::compile(&[&eof]);
  assert_eq!(longest(&dfa, "\0"), Some((0, 1)));
  assert_eq!(longest(&dfa, "a"), None);
}

#[test]
fn any_starts_above_the_placeholder_bound() {
  let any = Pattern::any();
  let dfa = Dfa::compile(&[&any]);
  assert_eq!(longest(&dfa, "\u{5}"), Some((0, 1)));
  assert_eq!(longest(&dfa, "\u{1}"), None);
  assert_eq!(longest(&dfa, "ß"), Some((0, 1)));
}

#[test]
fn unicode_ranges_partition_cleanly() {
  let greek = Pattern::range('α', 'ω').many1();
  let ascii = Pattern::range('a', 'z').many1();
  let dfa = Dfa::compile(&[&greek, &ascii]);
  assert_eq!(longest(&dfa, "βγ"), Some((0, 2)));
  assert_eq!(longest(&dfa, "ab"), Some((1, 2)));
  assert!(dfa.states() > 1);
}

#[test]
fn alternation_of_literals() {
  let ops = ["=", "==", ">=", "<=", "/=", ".", "..", "...", ","]
    .iter()
    .map(|s| Pattern::string(s))
    .reduce(Pattern::or)
    .unwrap();
  let dfa = Dfa::compile(&[&ops]);
  assert_eq!(longest(&dfa, "..."), Some((0, 3)));
  assert_eq!(longest(&dfa, "==5"), Some((0, 2)));
  assert_eq!(longest(&dfa, ">="), Some((0, 2)));
  assert_eq!(longest(&dfa, ">"), None);
}
