//! `PatternMatch` and the leaf-id index that groups them for the formula
//! evaluator.

use crate::loc::Loc;
use crate::mval::Bindings;
use std::path::PathBuf;
use std::sync::Arc;

/// The unique integer id of a leaf sub-pattern within one formula.
pub type LeafId = u32;

/// A single location a token spans; `tokens` on [`PatternMatch`] is lazy in
/// the sense that backends are free to defer building it (e.g. by wrapping a
/// closure) rather than eagerly materializing every token location for every
/// hit. We model that with an `Arc<dyn Fn() -> Vec<Loc>>` so cloning a
/// `PatternMatch` is cheap regardless of how expensive token recovery is.
pub type TokenThunk = Arc<dyn Fn() -> Vec<Loc> + Send + Sync>;

fn empty_tokens() -> TokenThunk {
  Arc::new(Vec::new)
}

/// A match produced by one of the three backends, keyed by the leaf that
/// produced it.
#[derive(Clone)]
pub struct PatternMatch {
  pub leaf_id: LeafId,
  pub file: PathBuf,
  pub location: (Loc, Loc),
  pub bindings: Bindings,
  tokens: TokenThunk,
}

impl PatternMatch {
  pub fn new(leaf_id: LeafId, file: impl Into<PathBuf>, start: Loc, end: Loc, bindings: Bindings) -> Self {
    Self {
      leaf_id,
      file: file.into(),
      location: (start, end),
      bindings,
      tokens: empty_tokens(),
    }
  }

  pub fn with_tokens(mut self, tokens: TokenThunk) -> Self {
    self.tokens = tokens;
    self
  }

  /// Forces the (possibly lazily-computed) token list.
  pub fn tokens(&self) -> Vec<Loc> {
    (self.tokens)()
  }

  pub fn start_offset(&self) -> usize {
    self.location.0.byte_offset
  }

  pub fn end_offset(&self) -> usize {
    self.location.1.byte_offset
  }
}

/// A mapping from `leaf_id` to the multiset of `PatternMatch`es produced for
/// that leaf. Multiple matches per leaf are the common case, so lookups
/// return a slice rather than a single match.
#[derive(Default)]
pub struct LeafIndex {
  by_leaf: thread_utils::RapidMap<LeafId, Vec<PatternMatch>>,
}

impl LeafIndex {
  pub fn new() -> Self {
    Self {
      by_leaf: thread_utils::get_map(),
    }
  }

  pub fn insert(&mut self, pm: PatternMatch) {
    self.by_leaf.entry(pm.leaf_id).or_default().push(pm);
  }

  pub fn extend(&mut self, pms: impl IntoIterator<Item = PatternMatch>) {
    for pm in pms {
      self.insert(pm);
    }
  }

  /// Matches for `leaf_id`, or an empty slice if the backend produced none
  /// (missing id is not an error, per the formula evaluator's `Leaf` rule).
  pub fn get(&self, leaf_id: LeafId) -> &[PatternMatch] {
    self.by_leaf.get(&leaf_id).map(Vec::as_slice).unwrap_or(&[])
  }
}

#[cfg(test)]
mod test {
  use super::*;

  fn loc(offset: usize) -> Loc {
    Loc::new("f.x", offset, 1, offset + 1)
  }

  #[test]
  fn missing_leaf_id_yields_empty_slice() {
    let index = LeafIndex::new();
    assert!(index.get(42).is_empty());
  }

  #[test]
  fn multiple_matches_for_same_leaf_are_kept() {
    let mut index = LeafIndex::new();
    index.insert(PatternMatch::new(1, "f.x", loc(0), loc(3), Bindings::new()));
    index.insert(PatternMatch::new(1, "f.x", loc(15), loc(18), Bindings::new()));
    assert_eq!(index.get(1).len(), 2);
  }
}
