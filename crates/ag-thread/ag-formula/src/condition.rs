//! The condition evaluator (C3): metavariable predicates over a range's
//! bindings, delegated to an externally supplied boolean-expression
//! `Evaluator`.

use crate::mval::{Bindings, MVal};
use std::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// An environment mapping binding names to values, as consumed by
/// [`Evaluator::eval_bool`]. The core only ever builds one of these from a
/// `Bindings`; it never inspects the values beyond what `EnvValue` exposes.
#[derive(Clone, Debug, Default)]
pub struct Env(Vec<(String, EnvValue)>);

impl Env {
  pub fn new() -> Self {
    Self(Vec::new())
  }

  pub fn insert(&mut self, name: impl Into<String>, value: EnvValue) {
    self.0.push((name.into(), value));
  }

  pub fn get(&self, name: &str) -> Option<&EnvValue> {
    self.0.iter().find(|(n, _)| n == name).map(|(_, v)| v)
  }
}

/// A value as it appears in an `Env`: either the original (possibly
/// AST-shaped) `MVal`, or its stringified form, depending on which
/// environment-construction method built it.
#[derive(Clone, Debug)]
pub enum EnvValue {
  Raw(MVal),
  Stringified(String),
}

impl fmt::Display for EnvValue {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      EnvValue::Raw(v) => write!(f, "{}", v.to_text()),
      EnvValue::Stringified(s) => write!(f, "{s}"),
    }
  }
}

/// The small boolean expression language evaluated over an `Env`. The core
/// does not define this language; it only ever passes an opaque `expr`
/// through to `Evaluator::eval_bool`.
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct GenericExpr(pub String);

/// A metavariable condition, as attached to the formula via `Cond`.
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum MetavarCond {
  /// A generic boolean expression evaluated over the binding environment.
  Generic(GenericExpr),
  /// `re.match($name, "<pattern>")`, evaluated via the same evaluator so that
  /// non-string bindings stringify with one well-defined semantics.
  Regex { name: String, pattern: String },
}

/// The externally supplied expression evaluator. The core's only
/// responsibility is constructing the environment and invoking this trait;
/// the expression language, its coercions, and its semantics live entirely
/// on the other side of this boundary.
pub trait Evaluator {
  fn eval_bool(&self, env: &Env, expr: &GenericExpr) -> bool;

  fn bindings_to_env(&self, bindings: &Bindings) -> Env {
    let mut env = Env::new();
    for (name, val) in bindings.iter() {
      env.insert(name.clone(), EnvValue::Raw(val.clone()));
    }
    env
  }

  fn bindings_to_env_stringified(&self, bindings: &Bindings) -> Env {
    let mut env = Env::new();
    for (name, val) in bindings.iter() {
      env.insert(name.clone(), EnvValue::Stringified(val.to_text()));
    }
    env
  }
}

/// Evaluates [`MetavarCond`]s against a range's bindings via an [`Evaluator`].
pub struct ConditionEvaluator<'e, E: Evaluator> {
  evaluator: &'e E,
}

impl<'e, E: Evaluator> ConditionEvaluator<'e, E> {
  pub fn new(evaluator: &'e E) -> Self {
    Self { evaluator }
  }

  pub fn eval(&self, bindings: &Bindings, cond: &MetavarCond) -> bool {
    match cond {
      MetavarCond::Generic(expr) => {
        let env = self.evaluator.bindings_to_env(bindings);
        self.evaluator.eval_bool(&env, expr)
      }
      MetavarCond::Regex { name, pattern } => {
        if bindings.get(name).is_none() {
          return false;
        }
        let env = self.evaluator.bindings_to_env_stringified(bindings);
        let synthesized = GenericExpr(format!("re.match({name}, \"{pattern}\")"));
        self.evaluator.eval_bool(&env, &synthesized)
      }
    }
  }
}

#[cfg(test)]
mod test {
  use super::*;
  use crate::loc::Loc;
  use regex::Regex;

  /// A minimal evaluator used only to exercise the core's own env
  /// construction and condition dispatch; it is not a stand-in for the real
  /// generic expression language, which is out of scope for this crate.
  struct TestEvaluator;

  impl Evaluator for TestEvaluator {
    fn eval_bool(&self, env: &Env, expr: &GenericExpr) -> bool {
      if let Some(rest) = expr.0.strip_prefix("re.match(") {
        let rest = rest.trim_end_matches(')');
        let mut parts = rest.splitn(2, ", \"");
        let name = parts.next().unwrap_or_default();
        let pattern = parts.next().unwrap_or_default().trim_end_matches('"');
        let value = match env.get(name) {
          Some(v) => v.to_string(),
          None => return false,
        };
        return Regex::new(pattern).map(|re| re.is_match(&value)).unwrap_or(false);
      }
      false
    }
  }

  fn bindings_with(name: &str, n: i64) -> Bindings {
    let mut b = Bindings::new();
    b.insert(name, MVal::Int(n, Loc::new("f.x", 0, 1, 1)));
    b
  }

  #[test]
  fn regex_condition_matches_stringified_binding() {
    let eval = TestEvaluator;
    let ce = ConditionEvaluator::new(&eval);
    let cond = MetavarCond::Regex {
      name: "$X".into(),
      pattern: "^[13]$".into(),
    };
    assert!(ce.eval(&bindings_with("$X", 1), &cond));
    assert!(ce.eval(&bindings_with("$X", 3), &cond));
    assert!(!ce.eval(&bindings_with("$X", 2), &cond));
  }

  #[test]
  fn unbound_name_is_false() {
    let eval = TestEvaluator;
    let ce = ConditionEvaluator::new(&eval);
    let cond = MetavarCond::Regex {
      name: "$Y".into(),
      pattern: ".*".into(),
    };
    assert!(!ce.eval(&bindings_with("$X", 1), &cond));
  }
}
