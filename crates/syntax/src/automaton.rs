//! Compiles rule patterns into a deterministic automaton.
//!
//! Each group's rules are lowered into one nondeterministic automaton with
//! a shared start state, then determinized by subset construction. The
//! alphabet is the partition of code points induced by the range endpoints
//! of every rule, so a transition row stays small no matter how much of
//! Unicode a pattern covers.
//!
//! Accepting states carry the index of the rule they accept for. When two
//! rules accept in the same state the smaller index wins, which is what
//! gives rules their declaration-order priority at equal match length.

use indexmap::IndexMap;

use crate::pattern::Pattern;

/// Transition-table entry for "no transition".
pub const DEAD: u32 = u32::MAX;

type StateId = usize;

#[derive(Default)]
struct NfaState {
  eps: Vec<StateId>,
  edges: Vec<(u32, u32, StateId)>,
  accept: Option<usize>,
}

struct Nfa {
  states: Vec<NfaState>,
}

impl Nfa {
  fn add(&mut self) -> StateId {
    self.states.push(NfaState::default());
    self.states.len() - 1
  }

  fn eps(&mut self, from: StateId, to: StateId) {
    self.states[from].eps.push(to);
  }

  fn edge(&mut self, from: StateId, lo: u32, hi: u32, to: StateId) {
    self.states[from].edges.push((lo, hi, to));
  }

  /// Thompson construction. Returns the exit state of the fragment that
  /// begins at `entry`.
  fn pattern(&mut self, pattern: &Pattern, entry: StateId) -> StateId {
    match pattern {
      Pattern::Never => self.add(),
      Pattern::Always => {
        let exit = self.add();
        self.eps(entry, exit);
        exit
      }
      Pattern::Range(lo, hi) => {
        let exit = self.add();
        self.edge(entry, *lo, *hi, exit);
        exit
      }
      Pattern::Or(a, b) => {
        let exit_a = self.pattern(a, entry);
        let exit_b = self.pattern(b, entry);
        let exit = self.add();
        self.eps(exit_a, exit);
        self.eps(exit_b, exit);
        exit
      }
      Pattern::Seq(a, b) => {
        let mid = self.pattern(a, entry);
        self.pattern(b, mid)
      }
      Pattern::Many(a) => {
        let exit = self.add();
        self.eps(entry, exit);
        let back = self.pattern(a, exit);
        self.eps(back, exit);
        exit
      }
      Pattern::Many1(a) => {
        let first = self.pattern(a, entry);
        let exit = self.add();
        self.eps(first, exit);
        let back = self.pattern(a, exit);
        self.eps(back, exit);
        exit
      }
    }
  }

  fn closure(&self, seed: &[StateId]) -> Vec<StateId> {
    let mut set = seed.to_vec();
    let mut i = 0;
    while i < set.len() {
      let state = set[i];
      for &next in &self.states[state].eps {
        if !set.contains(&next) {
          set.push(next);
        }
      }
      i += 1;
    }
    set.sort_unstable();
    set.dedup();
    set
  }
}

/// A deterministic automaton with rule-indexed accepting states.
///
/// States are row indices; the start state is [`Dfa::START`]. Code points
/// are mapped to equivalence classes with [`Dfa::class_of`] before lookup.
pub struct Dfa {
  boundaries: Vec<u32>,
  classes: usize,
  transitions: Vec<u32>,
  accept: Vec<Option<usize>>,
}

impl Dfa {
  pub const START: u32 = 0;

  /// Compile an ordered rule list. Index `i` of the result's accept tags
  /// refers to `rules[i]`.
  pub fn compile(rules: &[&Pattern]) -> Dfa {
    let mut nfa = Nfa { states: vec![] };
    let start = nfa.add();
    for (index, pattern) in rules.iter().enumerate() {
      let entry = nfa.add();
      nfa.eps(start, entry);
      let exit = nfa.pattern(pattern, entry);
      let tail = nfa.add();
      nfa.states[tail].accept = Some(index);
      nfa.eps(exit, tail);
    }

    // Partition code points into classes at every range endpoint.
    let mut boundaries = vec![];
    for state in &nfa.states {
      for &(lo, hi, _) in &state.edges {
        boundaries.push(lo);
        if hi < u32::MAX {
          boundaries.push(hi + 1);
        }
      }
    }
    boundaries.sort_unstable();
    boundaries.dedup();
    let classes = boundaries.len() + 1;

    let class_of = |cp: u32| boundaries.partition_point(|&b| b <= cp);

    let mut subsets: IndexMap<Vec<StateId>, u32> = IndexMap::new();
    subsets.insert(nfa.closure(&[start]), 0);
    let mut transitions: Vec<u32> = vec![];
    let mut accept: Vec<Option<usize>> = vec![];

    let mut index = 0;
    while index < subsets.len() {
      let subset = subsets.get_index(index).map(|(k, _)| k.clone());
      let subset = subset.unwrap_or_default();

      accept.push(
        subset
          .iter()
          .filter_map(|&s| nfa.states[s].accept)
          .min(),
      );

      let mut moves: Vec<Vec<StateId>> = vec![vec![]; classes];
      for &state in &subset {
        for &(lo, hi, to) in &nfa.states[state].edges {
          for class in class_of(lo)..=class_of(hi) {
            moves[class].push(to);
          }
        }
      }

      for seed in moves {
        if seed.is_empty() {
          transitions.push(DEAD);
          continue;
        }
        let target = nfa.closure(&seed);
        let next = subsets.len() as u32;
        let id = *subsets.entry(target).or_insert(next);
        transitions.push(id);
      }

      index += 1;
    }

    Dfa {
      boundaries,
      classes,
      transitions,
      accept,
    }
  }

  #[inline]
  pub fn class_of(&self, cp: u32) -> usize {
    self.boundaries.partition_point(|&b| b <= cp)
  }

  #[inline]
  pub fn next(&self, state: u32, class: usize) -> u32 {
    self.transitions[state as usize * self.classes + class]
  }

  /// The winning rule index if `state` accepts.
  #[inline]
  pub fn accept(&self, state: u32) -> Option<usize> {
    self.accept[state as usize]
  }

  pub fn states(&self) -> usize {
    self.accept.len()
  }
}

#[cfg(test)]
mod tests;
