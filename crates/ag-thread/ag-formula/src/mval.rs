//! Metavariable values and binding sets.
//!
//! `MVal` is kept deliberately opaque: the core never inspects the inside of
//! an AST-backed binding, it only ever compares two of them or stringifies
//! one. Structural equality of the underlying AST is somebody else's
//! problem (the `AstMatcher`); we just carry the comparator along.

use crate::loc::Loc;
use std::fmt;
use std::sync::Arc;

/// The externally-supplied comparator for AST-shaped metavariable values.
///
/// An `AstMatcher` implementation constructs `Arc<dyn AstValue>` handles and
/// is the sole authority on what "the same underlying code region" means;
/// the core only ever calls `ast_eq`.
pub trait AstValue: fmt::Debug + Send + Sync {
  /// Ast-binding equality against another value of (expected to be) the same
  /// underlying representation. Implementations that receive a value they
  /// don't recognize should return `false` rather than panic.
  fn ast_eq(&self, other: &dyn AstValue) -> bool;

  /// Render the value to the textual form used by regex metavariable
  /// conditions and by `Evaluator::bindings_to_env_stringified`.
  fn to_text(&self) -> String;
}

/// An opaque tagged sum of the three kinds of value a metavariable can be
/// bound to.
#[derive(Clone, Debug)]
pub enum MVal {
  /// A sub-AST captured by the structural matcher. Equality and stringification
  /// are delegated to the externally supplied [`AstValue`].
  Ast(Arc<dyn AstValue>),
  /// An integer literal, as produced e.g. by the doc matcher when a capture's
  /// text parses as base-10.
  Int(i64, Loc),
  /// A string literal.
  Str(String, Loc),
  /// A raw textual capture with no further structure (e.g. a doc-matcher
  /// capture that isn't a recognized literal).
  Text(String, Loc),
}

impl MVal {
  /// The conversion to a string form used for regex conditions.
  pub fn to_text(&self) -> String {
    match self {
      MVal::Ast(v) => v.to_text(),
      MVal::Int(n, _) => n.to_string(),
      MVal::Str(s, _) | MVal::Text(s, _) => s.clone(),
    }
  }

  pub fn loc(&self) -> Option<&Loc> {
    match self {
      MVal::Ast(_) => None,
      MVal::Int(_, loc) | MVal::Str(_, loc) | MVal::Text(_, loc) => Some(loc),
    }
  }
}

/// Ast-binding equality: two values are equal when they denote the same
/// underlying code region or the same literal. The core depends only on this
/// relation, never on structural equality of whatever `AstValue` wraps.
impl PartialEq for MVal {
  fn eq(&self, other: &Self) -> bool {
    use MVal::*;
    match (self, other) {
      (Ast(a), Ast(b)) => a.ast_eq(b.as_ref()),
      (Int(a, _), Int(b, _)) => a == b,
      (Str(a, _), Str(b, _)) => a == b,
      (Text(a, _), Text(b, _)) => a == b,
      _ => false,
    }
  }
}

/// A metavariable name together with its bound value.
pub type Binding = (String, MVal);

/// A sequence of `(name, MVal)` pairs; a single name appears at most once.
/// Insertion order is preserved (for reproducibility) but carries no
/// semantic weight.
#[derive(Clone, Debug, Default)]
pub struct Bindings(Vec<Binding>);

impl Bindings {
  pub fn new() -> Self {
    Self(Vec::new())
  }

  pub fn from_pairs(pairs: impl IntoIterator<Item = Binding>) -> Self {
    let mut out = Self::new();
    for (name, val) in pairs {
      out.insert(name, val);
    }
    out
  }

  /// Inserts a binding, replacing any existing value for `name`.
  pub fn insert(&mut self, name: impl Into<String>, val: MVal) {
    let name = name.into();
    if let Some(slot) = self.0.iter_mut().find(|(n, _)| *n == name) {
      slot.1 = val;
    } else {
      self.0.push((name, val));
    }
  }

  pub fn get(&self, name: &str) -> Option<&MVal> {
    self.0.iter().find(|(n, _)| n == name).map(|(_, v)| v)
  }

  pub fn iter(&self) -> impl Iterator<Item = &Binding> {
    self.0.iter()
  }

  pub fn is_empty(&self) -> bool {
    self.0.is_empty()
  }

  pub fn len(&self) -> usize {
    self.0.len()
  }
}

#[cfg(test)]
mod test {
  use super::*;

  #[derive(Debug)]
  struct Lit(i64);
  impl AstValue for Lit {
    fn ast_eq(&self, other: &dyn AstValue) -> bool {
      other
        .to_text()
        .parse::<i64>()
        .map(|n| n == self.0)
        .unwrap_or(false)
    }
    fn to_text(&self) -> String {
      self.0.to_string()
    }
  }

  #[test]
  fn literal_equality_is_by_value() {
    let loc = Loc::new("f.x", 0, 1, 1);
    assert_eq!(MVal::Int(1, loc.clone()), MVal::Int(1, loc.clone()));
    assert_ne!(MVal::Int(1, loc.clone()), MVal::Int(2, loc));
  }

  #[test]
  fn ast_equality_delegates_to_comparator() {
    let a = MVal::Ast(Arc::new(Lit(3)));
    let b = MVal::Ast(Arc::new(Lit(3)));
    let c = MVal::Ast(Arc::new(Lit(4)));
    assert_eq!(a, b);
    assert_ne!(a, c);
  }

  #[test]
  fn cross_kind_values_are_never_equal() {
    let loc = Loc::new("f.x", 0, 1, 1);
    let ast = MVal::Ast(Arc::new(Lit(1)));
    let int = MVal::Int(1, loc);
    assert_ne!(ast, int);
  }

  #[test]
  fn bindings_single_name_last_write_wins() {
    let loc = Loc::new("f.x", 0, 1, 1);
    let mut b = Bindings::new();
    b.insert("$X", MVal::Int(1, loc.clone()));
    b.insert("$X", MVal::Int(2, loc));
    assert_eq!(b.len(), 1);
    assert_eq!(b.get("$X"), Some(&MVal::Int(2, Loc::new("f.x", 0, 1, 1))));
  }
}
