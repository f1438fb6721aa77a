//! The formula language (`F`) and its evaluator (C4): recursive descent over
//! `Leaf`/`Or`/`And`/`Not`/`Cond`, combining the range algebra (C1) and the
//! condition evaluator (C3), enforcing that `Not` and `Cond` only ever
//! appear as direct children of an `And`.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::condition::{ConditionEvaluator, Evaluator, MetavarCond};
use crate::error::CoreError;
use crate::pattern_match::{LeafId, LeafIndex};
use crate::range::{RangeAlgebra, RangeBinding};

/// The body of a leaf sub-pattern: which backend it targets and the pattern
/// text for that backend.
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum XPatternBody {
  Ast(String),
  Doc(String),
  Regex(String),
}

/// An atomic matchable pattern: a unique id, its textual form (for
/// diagnostics), and a body naming which backend executes it.
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct XPattern {
  pub id: LeafId,
  pub text: String,
  pub body: XPatternBody,
}

/// The formula language: a boolean/condition tree naming leaves and
/// combining them.
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Formula {
  Leaf(XPattern),
  Or(Vec<Formula>),
  And(Vec<Formula>),
  Not(Box<Formula>),
  Cond(MetavarCond),
}

impl Formula {
  /// Collects every leaf in the formula. A pure post-order fold over `&Formula`
  /// returning owned references, not a walk into a mutable accumulator.
  pub fn leaves(&self) -> Vec<&XPattern> {
    match self {
      Formula::Leaf(xpat) => vec![xpat],
      Formula::Or(children) | Formula::And(children) => children.iter().flat_map(Formula::leaves).collect(),
      Formula::Not(inner) => inner.leaves(),
      Formula::Cond(_) => Vec::new(),
    }
  }
}

/// Recursive evaluation `eval: (I, F) -> Result<Vec<RangeBinding>, CoreError>`.
pub struct FormulaEvaluator<'e, E: Evaluator> {
  conditions: ConditionEvaluator<'e, E>,
}

impl<'e, E: Evaluator> FormulaEvaluator<'e, E> {
  pub fn new(evaluator: &'e E) -> Self {
    Self {
      conditions: ConditionEvaluator::new(evaluator),
    }
  }

  pub fn eval(&self, index: &LeafIndex, formula: &Formula, rule_id: &str) -> Result<Vec<RangeBinding>, CoreError> {
    match formula {
      Formula::Leaf(xpat) => Ok(index.get(xpat.id).iter().cloned().map(RangeBinding::from_match).collect()),

      Formula::Or(children) => {
        let mut out = Vec::new();
        for child in children {
          out.extend(self.eval(index, child, rule_id)?);
        }
        Ok(out)
      }

      Formula::And(children) => self.eval_and(index, children, rule_id),

      Formula::Not(_) => Err(CoreError::Structural {
        rule_id: rule_id.to_string(),
        reason: "Not only valid inside And",
      }),

      Formula::Cond(_) => Err(CoreError::Structural {
        rule_id: rule_id.to_string(),
        reason: "Cond only valid inside And",
      }),
    }
  }

  fn eval_and(&self, index: &LeafIndex, children: &[Formula], rule_id: &str) -> Result<Vec<RangeBinding>, CoreError> {
    let mut positives = Vec::new();
    let mut negatives = Vec::new();
    let mut conditions = Vec::new();

    for child in children {
      match child {
        Formula::Not(inner) => negatives.push(inner.as_ref()),
        Formula::Cond(cond) => conditions.push(cond),
        other => positives.push(other),
      }
    }

    if positives.is_empty() {
      return Err(CoreError::Structural {
        rule_id: rule_id.to_string(),
        reason: "empty And",
      });
    }

    // Positives first: establish candidate sites.
    let mut ranges = self.eval(index, positives[0], rule_id)?;
    for positive in &positives[1..] {
      let next = self.eval(index, positive, rule_id)?;
      ranges = RangeAlgebra::intersect(ranges, next);
    }

    // Negatives next: prune candidates once they exist.
    for negative in &negatives {
      let neg_ranges = self.eval(index, negative, rule_id)?;
      ranges = RangeAlgebra::difference(ranges, &neg_ranges);
    }

    // Conditions last: the most expensive phase, run only on survivors.
    for cond in &conditions {
      let evaluator = &self.conditions;
      ranges = RangeAlgebra::filter(ranges, |bindings| evaluator.eval(bindings, cond));
    }

    Ok(ranges)
  }
}

#[cfg(test)]
mod test {
  use super::*;
  use crate::condition::{Env, GenericExpr};
  use crate::loc::Loc;
  use crate::mval::{Bindings, MVal};
  use crate::pattern_match::PatternMatch;
  use regex::Regex;

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

  fn loc(offset: usize) -> Loc {
    Loc::new("f.x", offset, 1, offset + 1)
  }

  fn foo_pm(leaf_id: LeafId, start: usize, end: usize, x: i64) -> PatternMatch {
    let mut bindings = Bindings::new();
    bindings.insert("$X", MVal::Int(x, loc(start)));
    PatternMatch::new(leaf_id, "f.x", loc(start), loc(end), bindings)
  }

  fn ast_leaf(id: LeafId) -> XPattern {
    XPattern {
      id,
      text: format!("leaf{id}"),
      body: XPatternBody::Ast(format!("leaf{id}")),
    }
  }

  #[test]
  fn leaf_lifts_every_match_to_a_range_binding() {
    let mut index = LeafIndex::new();
    index.insert(foo_pm(1, 0, 6, 1));
    index.insert(foo_pm(1, 15, 21, 3));
    let evaluator = TestEvaluator;
    let fe = FormulaEvaluator::new(&evaluator);
    let formula = Formula::Leaf(ast_leaf(1));
    let result = fe.eval(&index, &formula, "r1").unwrap();
    assert_eq!(result.len(), 2);
  }

  #[test]
  fn and_of_incompatible_leaves_is_empty() {
    let mut index = LeafIndex::new();
    index.insert(foo_pm(1, 0, 6, 1));
    index.insert(foo_pm(2, 8, 14, 2));
    let evaluator = TestEvaluator;
    let fe = FormulaEvaluator::new(&evaluator);
    let formula = Formula::And(vec![Formula::Leaf(ast_leaf(1)), Formula::Leaf(ast_leaf(2))]);
    let result = fe.eval(&index, &formula, "r1").unwrap();
    assert!(result.is_empty());
  }

  #[test]
  fn and_with_regex_condition_filters_on_stringified_binding() {
    let mut index = LeafIndex::new();
    index.insert(foo_pm(1, 0, 6, 1));
    index.insert(foo_pm(1, 15, 21, 3));
    let evaluator = TestEvaluator;
    let fe = FormulaEvaluator::new(&evaluator);
    let formula = Formula::And(vec![
      Formula::Leaf(ast_leaf(1)),
      Formula::Cond(MetavarCond::Regex {
        name: "$X".into(),
        pattern: "^[13]$".into(),
      }),
    ]);
    let result = fe.eval(&index, &formula, "r1").unwrap();
    assert_eq!(result.len(), 2);
  }

  #[test]
  fn and_with_not_removes_the_negated_site() {
    let mut index = LeafIndex::new();
    index.insert(foo_pm(1, 0, 6, 1));
    index.insert(foo_pm(1, 15, 21, 3));
    index.insert(foo_pm(2, 0, 6, 1));
    let evaluator = TestEvaluator;
    let fe = FormulaEvaluator::new(&evaluator);
    let formula = Formula::And(vec![Formula::Leaf(ast_leaf(1)), Formula::Not(Box::new(Formula::Leaf(ast_leaf(2))))]);
    let result = fe.eval(&index, &formula, "r1").unwrap();
    assert_eq!(result.len(), 1);
    assert_eq!(result[0].origin.start_offset(), 15);
  }

  #[test]
  fn or_concatenates_every_branch() {
    let mut index = LeafIndex::new();
    index.insert(PatternMatch::new(1, "f.x", loc(8), loc(11), Bindings::new()));
    index.insert(foo_pm(2, 0, 6, 1));
    index.insert(foo_pm(2, 15, 21, 3));
    let evaluator = TestEvaluator;
    let fe = FormulaEvaluator::new(&evaluator);
    let formula = Formula::Or(vec![Formula::Leaf(ast_leaf(1)), Formula::Leaf(ast_leaf(2))]);
    let result = fe.eval(&index, &formula, "r1").unwrap();
    assert_eq!(result.len(), 3);
  }

  #[test]
  fn empty_and_is_a_structural_error() {
    let index = LeafIndex::new();
    let evaluator = TestEvaluator;
    let fe = FormulaEvaluator::new(&evaluator);
    let err = fe.eval(&index, &Formula::And(vec![]), "r1").unwrap_err();
    assert!(matches!(err, CoreError::Structural { .. }));
  }

  #[test]
  fn and_of_only_not_is_a_structural_error() {
    let index = LeafIndex::new();
    let evaluator = TestEvaluator;
    let fe = FormulaEvaluator::new(&evaluator);
    let formula = Formula::And(vec![Formula::Not(Box::new(Formula::Leaf(ast_leaf(1))))]);
    let err = fe.eval(&index, &formula, "r1").unwrap_err();
    assert!(matches!(err, CoreError::Structural { .. }));
  }

  #[test]
  fn top_level_not_is_a_structural_error() {
    let index = LeafIndex::new();
    let evaluator = TestEvaluator;
    let fe = FormulaEvaluator::new(&evaluator);
    let formula = Formula::Not(Box::new(Formula::Leaf(ast_leaf(1))));
    let err = fe.eval(&index, &formula, "r1").unwrap_err();
    assert!(matches!(err, CoreError::Structural { .. }));
  }

  #[test]
  fn cond_inside_or_is_a_structural_error() {
    let index = LeafIndex::new();
    let evaluator = TestEvaluator;
    let fe = FormulaEvaluator::new(&evaluator);
    let formula = Formula::Or(vec![Formula::Cond(MetavarCond::Regex {
      name: "$X".into(),
      pattern: ".".into(),
    })]);
    let err = fe.eval(&index, &formula, "r1").unwrap_err();
    assert!(matches!(err, CoreError::Structural { .. }));
  }

  #[test]
  fn leaves_extraction_is_a_pure_fold() {
    let formula = Formula::And(vec![
      Formula::Leaf(ast_leaf(1)),
      Formula::Or(vec![Formula::Leaf(ast_leaf(2)), Formula::Leaf(ast_leaf(3))]),
      Formula::Not(Box::new(Formula::Leaf(ast_leaf(4)))),
    ]);
    let ids: Vec<LeafId> = formula.leaves().into_iter().map(|l| l.id).collect();
    assert_eq!(ids, vec![1, 2, 3, 4]);
  }
}
