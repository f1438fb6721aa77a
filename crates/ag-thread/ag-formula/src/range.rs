//! The range algebra (C1): `Range`, `RangeBinding`, the binding-compatible
//! sub-range relation `⊑`, and the `intersect`/`difference`/`filter` set
//! operations the formula evaluator folds over.

use crate::mval::Bindings;
use crate::pattern_match::PatternMatch;

/// A half-open byte interval, `start <= end`, within one specific file. Which
/// file is tracked on the owning [`RangeBinding`]'s `origin`, not here.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Range {
  pub start: usize,
  pub end: usize,
}

impl Range {
  pub fn new(start: usize, end: usize) -> Self {
    debug_assert!(start <= end, "range start must not exceed end");
    Self { start, end }
  }

  /// `self` is nested inside (or equal to) `other`.
  fn nested_in(&self, other: &Range) -> bool {
    self.start >= other.start && self.end <= other.end
  }
}

/// The evaluator's working unit: a range plus the bindings established at
/// that site plus the match record it came from. `origin` rides along
/// unchanged through every combinator so the final surviving ranges can be
/// converted back into `PatternMatch`es faithfully.
#[derive(Clone)]
pub struct RangeBinding {
  pub range: Range,
  pub bindings: Bindings,
  pub origin: PatternMatch,
}

impl RangeBinding {
  pub fn from_match(pm: PatternMatch) -> Self {
    let range = Range::new(pm.start_offset(), pm.end_offset());
    Self {
      range,
      bindings: pm.bindings.clone(),
      origin: pm,
    }
  }

  /// The binding-compatible sub-range relation `a ⊑ b`: `a`'s range nests in
  /// `b`'s, and every binding `a` makes is either absent from `b` or agrees
  /// with `b`'s value for that name.
  ///
  /// Reflexive and transitive, not antisymmetric: two ranges can be mutually
  /// `⊑` while carrying different origins.
  pub fn sub_range_of(&self, other: &RangeBinding) -> bool {
    if !self.range.nested_in(&other.range) {
      return false;
    }
    self.bindings.iter().all(|(name, val)| match other.bindings.get(name) {
      None => true,
      Some(other_val) => other_val == val,
    })
  }
}

/// The range algebra's three operations over lists of [`RangeBinding`].
pub struct RangeAlgebra;

impl RangeAlgebra {
  /// Keeps every `x` in `xs` with some binding-compatible `y` in `ys`
  /// enclosing it, and every `y` in `ys` with some binding-compatible `x` in
  /// `xs` enclosing it, then concatenates. A conjunction is witnessed at the
  /// narrowest enclosing site; whichever side is more specific survives with
  /// its own bindings and origin. Duplicates are permitted and are not
  /// deduplicated here.
  pub fn intersect(xs: Vec<RangeBinding>, ys: Vec<RangeBinding>) -> Vec<RangeBinding> {
    if ys.is_empty() || xs.is_empty() {
      return Vec::new();
    }
    let mut out = Vec::new();
    out.extend(xs.iter().filter(|x| ys.iter().any(|y| x.sub_range_of(y))).cloned());
    out.extend(ys.iter().filter(|y| xs.iter().any(|x| y.sub_range_of(x))).cloned());
    out
  }

  /// Keeps every `p` in `pos` that has no binding-compatible enclosing `n` in
  /// `neg`. Negation does not remove overlaps that are not full
  /// binding-compatible containments.
  pub fn difference(pos: Vec<RangeBinding>, neg: &[RangeBinding]) -> Vec<RangeBinding> {
    if neg.is_empty() {
      return pos;
    }
    pos.into_iter().filter(|p| !neg.iter().any(|n| p.sub_range_of(n))).collect()
  }

  /// Keeps every `x` for which `keep(x.bindings)` is true. The predicate
  /// itself is the `ConditionEvaluator`'s job; the algebra just applies it
  /// elementwise.
  pub fn filter(xs: Vec<RangeBinding>, mut keep: impl FnMut(&Bindings) -> bool) -> Vec<RangeBinding> {
    xs.into_iter().filter(|x| keep(&x.bindings)).collect()
  }
}

#[cfg(test)]
mod test {
  use super::*;
  use crate::loc::Loc;
  use crate::mval::MVal;

  fn loc(offset: usize) -> Loc {
    Loc::new("f.x", offset, 1, offset + 1)
  }

  fn rb(leaf_id: u32, start: usize, end: usize, bindings: Bindings) -> RangeBinding {
    let pm = PatternMatch::new(leaf_id, "f.x", loc(start), loc(end), bindings);
    RangeBinding::from_match(pm)
  }

  fn bound(name: &str, n: i64) -> Bindings {
    let mut b = Bindings::new();
    b.insert(name, MVal::Int(n, loc(0)));
    b
  }

  #[test]
  fn sub_range_soundness() {
    let a = rb(1, 5, 10, Bindings::new());
    let b = rb(2, 0, 20, Bindings::new());
    assert!(a.sub_range_of(&b));
    assert!(a.range.start >= b.range.start && a.range.end <= b.range.end);
  }

  #[test]
  fn sub_range_respects_binding_compatibility() {
    let a = rb(1, 0, 5, bound("$X", 1));
    let b_same = rb(2, 0, 10, bound("$X", 1));
    let b_diff = rb(3, 0, 10, bound("$X", 2));
    let b_unbound = rb(4, 0, 10, Bindings::new());
    assert!(a.sub_range_of(&b_same));
    assert!(!a.sub_range_of(&b_diff));
    assert!(a.sub_range_of(&b_unbound));
  }

  #[test]
  fn sub_range_requires_nesting() {
    let a = rb(1, 0, 10, Bindings::new());
    let b = rb(2, 5, 8, Bindings::new());
    assert!(!a.sub_range_of(&b));
  }

  #[test]
  fn intersect_keeps_only_binding_compatible_enclosures() {
    let foo = rb(1, 0, 6, bound("$X", 1));
    let bar = rb(2, 8, 14, bound("$X", 2));
    let result = RangeAlgebra::intersect(vec![foo], vec![bar]);
    assert!(result.is_empty());
  }

  #[test]
  fn intersect_empty_ys_yields_empty() {
    let foo = rb(1, 0, 6, Bindings::new());
    assert!(RangeAlgebra::intersect(vec![foo], vec![]).is_empty());
  }

  #[test]
  fn intersect_every_result_traces_to_an_input_origin() {
    let x = rb(1, 0, 10, Bindings::new());
    let y = rb(2, 2, 5, Bindings::new());
    let result = RangeAlgebra::intersect(vec![x.clone()], vec![y.clone()]);
    for r in &result {
      let from_x = r.origin.leaf_id == x.origin.leaf_id;
      let from_y = r.origin.leaf_id == y.origin.leaf_id;
      assert!(from_x || from_y);
    }
  }

  #[test]
  fn difference_monotone_and_traces_to_pos() {
    let p1 = rb(1, 0, 5, Bindings::new());
    let p2 = rb(2, 20, 25, Bindings::new());
    let n = rb(3, 0, 10, Bindings::new());
    let result = RangeAlgebra::difference(vec![p1.clone(), p2.clone()], &[n]);
    assert!(result.len() <= 2);
    assert_eq!(result.len(), 1);
    assert_eq!(result[0].origin.leaf_id, p2.origin.leaf_id);
  }

  #[test]
  fn difference_empty_neg_is_identity() {
    let p1 = rb(1, 0, 5, Bindings::new());
    let result = RangeAlgebra::difference(vec![p1.clone()], &[]);
    assert_eq!(result.len(), 1);
  }

  #[test]
  fn difference_does_not_remove_partial_overlaps() {
    let overlapping_but_not_nested = rb(1, 5, 15, Bindings::new());
    let neg = rb(2, 0, 10, Bindings::new());
    let result = RangeAlgebra::difference(vec![overlapping_but_not_nested], &[neg]);
    assert_eq!(result.len(), 1, "difference must not remove partial overlaps");
  }

  #[test]
  fn filter_applies_predicate_elementwise() {
    let a = rb(1, 0, 5, bound("$X", 1));
    let b = rb(2, 10, 15, bound("$X", 3));
    let result = RangeAlgebra::filter(vec![a, b], |bindings| {
      matches!(bindings.get("$X"), Some(MVal::Int(n, _)) if *n % 2 == 1)
    });
    assert_eq!(result.len(), 2);
  }
}
