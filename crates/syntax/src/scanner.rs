//! Input cursor and scanner groups.
//!
//! The scanner walks the active group's automaton from the current
//! position, remembering the last accepting state it passed through. When
//! it goes dead it backs up to that state, which makes every match a
//! longest match. Groups own their rules and compile lazily on first use;
//! a group's effective rule list is its own rules followed by those of its
//! transitive ancestors, so child rules win ties.

use once_cell::unsync::OnceCell;
use span::Span;

use crate::automaton::{Dfa, DEAD};
use crate::parser::Parser;
use crate::pattern::{Pattern, EOF_CODE};
use crate::Result;

/// Cursor over the code points of one input, with the sentinel appended.
pub struct Scanner<'src> {
  src: &'src str,
  codes: Vec<u32>,
  offsets: Vec<usize>,
  pos: usize,
  start: usize,
  end: usize,
}

impl<'src> Scanner<'src> {
  pub fn new(src: &'src str) -> Self {
    let mut codes = vec![];
    let mut offsets = vec![];
    for (offset, c) in src.char_indices() {
      codes.push(c as u32);
      offsets.push(offset);
    }
    // The sentinel occupies one code point past the input proper.
    codes.push(EOF_CODE);
    offsets.push(src.len());
    offsets.push(src.len());

    Self {
      src,
      codes,
      offsets,
      pos: 0,
      start: 0,
      end: 0,
    }
  }

  /// Simulate `dfa` from the current position and consume the longest
  /// match. Returns the winning rule index, or `None` (consuming nothing)
  /// if not even the empty string is accepted.
  pub fn next_match(&mut self, dfa: &Dfa) -> Option<usize> {
    let mut state = Dfa::START;
    let mut accepted = dfa.accept(state).map(|rule| (self.pos, rule));

    let mut pos = self.pos;
    while pos < self.codes.len() {
      let next = dfa.next(state, dfa.class_of(self.codes[pos]));
      if next == DEAD {
        break;
      }
      state = next;
      pos += 1;
      if let Some(rule) = dfa.accept(state) {
        accepted = Some((pos, rule));
      }
    }

    let (end, rule) = accepted?;
    self.start = self.pos;
    self.end = end;
    self.pos = end;
    Some(rule)
  }

  /// Consume a single code point as the current match.
  pub fn bump(&mut self) {
    self.start = self.pos;
    self.end = (self.pos + 1).min(self.codes.len());
    self.pos = self.end;
  }

  /// The text of the current match. The sentinel contributes no text.
  pub fn current_match(&self) -> &'src str {
    let start = self.offsets[self.start];
    let end = self.offsets[self.end];
    &self.src[start..end]
  }

  /// Width of the current match in code points (the sentinel counts).
  #[inline]
  pub fn match_len(&self) -> usize {
    self.end - self.start
  }

  /// Byte span of the current match, for diagnostics.
  pub fn span(&self) -> Span {
    let end = self.end.min(self.codes.len() - 1).max(self.start);
    (self.offsets[self.start]..self.offsets[end]).into()
  }

  /// Revert the cursor to the start of the current match.
  pub fn rewind(&mut self) {
    self.pos = self.start;
  }

  /// Give back the last `n` code points of the current match.
  pub fn unconsume(&mut self, n: usize) {
    self.pos = self.pos.saturating_sub(n).max(self.start);
  }

  /// Whether the current match consumed the sentinel.
  pub fn matched_eof(&self) -> bool {
    self.end == self.codes.len()
  }

  #[inline]
  pub fn peek(&self) -> u32 {
    self.codes.get(self.pos).copied().unwrap_or(EOF_CODE)
  }
}

/// A rule action: mutates the parser it belongs to.
pub type Action<'src> = fn(&mut Parser<'src>) -> Result<()>;

struct Rule<'src> {
  pattern: Pattern,
  action: Action<'src>,
}

/// Identifies a group in its [`Registry`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct GroupId(usize);

pub struct Group<'src> {
  name: &'static str,
  parent: Option<GroupId>,
  rules: Vec<Rule<'src>>,
  compiled: OnceCell<CompiledGroup<'src>>,
}

/// A group's automaton together with the action table the automaton's
/// accept tags index into (own rules first, then ancestors').
pub struct CompiledGroup<'src> {
  pub dfa: Dfa,
  pub actions: Vec<Action<'src>>,
}

/// All groups of one parser definition.
pub struct Registry<'src> {
  groups: Vec<Group<'src>>,
}

impl<'src> Registry<'src> {
  pub fn new() -> Self {
    Self { groups: vec![] }
  }

  pub fn define_group(&mut self, name: &'static str) -> GroupId {
    self.groups.push(Group {
      name,
      parent: None,
      rules: vec![],
      compiled: OnceCell::new(),
    });
    GroupId(self.groups.len() - 1)
  }

  pub fn set_parent(&mut self, child: GroupId, parent: GroupId) {
    debug_assert!(child != parent);
    self.groups[child.0].parent = Some(parent);
  }

  pub fn add_rule(&mut self, group: GroupId, pattern: Pattern, action: Action<'src>) {
    self.groups[group.0].rules.push(Rule { pattern, action });
  }

  pub fn name(&self, group: GroupId) -> &'static str {
    self.groups[group.0].name
  }

  /// The group's automaton, compiled on first use and memoized.
  pub fn compiled(&self, group: GroupId) -> &CompiledGroup<'src> {
    self.groups[group.0].compiled.get_or_init(|| {
      let mut patterns = vec![];
      let mut actions = vec![];
      let mut current = Some(group);
      while let Some(id) = current {
        let group = &self.groups[id.0];
        for rule in &group.rules {
          patterns.push(&rule.pattern);
          actions.push(rule.action);
        }
        current = group.parent;
      }
      CompiledGroup {
        dfa: Dfa::compile(&patterns),
        actions,
      }
    })
  }
}

impl<'src> Default for Registry<'src> {
  fn default() -> Self {
    Self::new()
  }
}
