//! The pattern algebra scanner rules are written in.
//!
//! Patterns are plain values; nothing here builds an automaton. A pattern
//! becomes executable only when its group is compiled, see
//! [`crate::automaton`].

/// Code point used as the end-of-input sentinel. Rules match it through
/// [`Pattern::eof`]; it never occurs inside well-formed source text.
pub const EOF_CODE: u32 = 0;

/// Lowest code point considered by [`Pattern::any`] and [`Pattern::none_of`].
// FIXME: should this be `EOF_CODE + 1`? As written, code points 1..=4 are
// unmatchable except through an explicit `range`.
pub const MIN_CODE: u32 = 5;

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Pattern {
  /// Matches nothing, not even the empty string.
  Never,
  /// Matches the empty string.
  Always,
  /// Matches one code point in `lo..=hi`.
  Range(u32, u32),
  Or(Box<Pattern>, Box<Pattern>),
  Seq(Box<Pattern>, Box<Pattern>),
  /// Zero or more repetitions.
  Many(Box<Pattern>),
  /// One or more repetitions.
  Many1(Box<Pattern>),
}

impl Pattern {
  pub fn range(lo: char, hi: char) -> Self {
    debug_assert!(lo <= hi);
    Pattern::Range(lo as u32, hi as u32)
  }

  pub fn char(c: char) -> Self {
    Pattern::Range(c as u32, c as u32)
  }

  /// Matches the end-of-input sentinel.
  pub fn eof() -> Self {
    Pattern::Range(EOF_CODE, EOF_CODE)
  }

  /// Matches any single code point except the sentinel.
  pub fn any() -> Self {
    Pattern::Range(MIN_CODE, u32::MAX)
  }

  /// Matches `s` literally. The empty string yields [`Pattern::Always`].
  pub fn string(s: &str) -> Self {
    s.chars()
      .map(Pattern::char)
      .reduce(Pattern::then)
      .unwrap_or(Pattern::Always)
  }

  /// Matches any single character of `chars`.
  pub fn any_of(chars: &str) -> Self {
    chars
      .chars()
      .map(Pattern::char)
      .reduce(Pattern::or)
      .unwrap_or(Pattern::Never)
  }

  /// Matches any single code point not in `chars` (and not the sentinel):
  /// the disjunction of the maximal ranges in `MIN_CODE..=u32::MAX` that
  /// exclude every character of `chars`.
  pub fn none_of(chars: &str) -> Self {
    let mut codes: Vec<u32> = chars.chars().map(|c| c as u32).collect();
    codes.sort_unstable();
    codes.dedup();

    let mut lo = MIN_CODE;
    let mut out = Pattern::Never;
    for code in codes {
      if code < lo {
        continue;
      }
      if code > lo {
        out = out.or(Pattern::Range(lo, code - 1));
      }
      lo = code + 1;
    }
    out.or(Pattern::Range(lo, u32::MAX))
  }

  pub fn or(self, other: Pattern) -> Self {
    Pattern::Or(Box::new(self), Box::new(other))
  }

  pub fn then(self, other: Pattern) -> Self {
    Pattern::Seq(Box::new(self), Box::new(other))
  }

  pub fn many(self) -> Self {
    Pattern::Many(Box::new(self))
  }

  pub fn many1(self) -> Self {
    Pattern::Many1(Box::new(self))
  }

  /// Zero or one occurrence.
  pub fn opt(self) -> Self {
    self.or(Pattern::Always)
  }

  /// At most `n` occurrences.
  pub fn at_most(self, n: usize) -> Self {
    let mut out = Pattern::Always;
    for _ in 0..n {
      out = self.clone().then(out).opt();
    }
    out
  }
}
