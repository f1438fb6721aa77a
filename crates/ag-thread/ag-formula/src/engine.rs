//! The top-level entry point (C5): wires the backend dispatcher and the
//! formula evaluator together into a single `check` call per rule.

use std::path::Path;

use crate::backend::{AstMatcher, Backends, BackendDispatcher, DocMatcher, LanguageTag, RegexEngine};
use crate::condition::Evaluator;
use crate::error::CoreError;
use crate::formula::{Formula, FormulaEvaluator};
use crate::loc::Loc;
use crate::mval::Bindings;
use crate::pattern_match::{LeafIndex, PatternMatch};

/// One rule: an id for diagnostics and error attribution, plus the formula it
/// checks.
#[derive(Clone)]
pub struct Rule {
  pub id: String,
  pub formula: Formula,
}

/// A hook that adapts a rule expressed in some legacy/older shape into the
/// `Rule` this crate evaluates. Kept as a trait rather than a concrete
/// function so callers can version their own rule formats independently of
/// this crate. `Rule` itself converts to a clone of itself, so a caller who
/// already has a canonical rule pays nothing for normalisation.
pub trait Convert {
  fn convert_legacy(&self) -> Rule;
}

impl Convert for Rule {
  fn convert_legacy(&self) -> Rule {
    self.clone()
  }
}

/// Runs one rule against one (file, language, source) target: normalises the
/// rule via [`Convert`], dispatches its leaves to the backends, then folds
/// the formula evaluator over the resulting leaf index, invoking `hook` once
/// per surviving match in emission order before returning the survivors.
/// `lazy_ast`/`parse_doc` are only invoked if some leaf actually needs that
/// backend, same as `BackendDispatcher::dispatch`.
#[allow(clippy::too_many_arguments)]
pub fn check<AM, DM, RE, EV, R>(
  with_caching: bool,
  mut hook: impl FnMut(&Bindings, Vec<Loc>),
  backends: Backends<'_, AM, DM, RE>,
  evaluator: &EV,
  rule: &R,
  file: &Path,
  language: &LanguageTag,
  source: &[u8],
  lazy_ast: impl FnOnce() -> AM::Ast,
  parse_doc: impl FnOnce(&str) -> DM::Doc,
) -> Result<Vec<PatternMatch>, CoreError>
where
  AM: AstMatcher,
  DM: DocMatcher,
  RE: RegexEngine,
  EV: Evaluator,
  R: Convert,
{
  let rule = rule.convert_legacy();
  let leaves: Vec<_> = rule.formula.leaves().into_iter().cloned().collect();
  let dispatcher = BackendDispatcher::new(backends);
  let matches = dispatcher.dispatch(&leaves, file, language, with_caching, source, lazy_ast, parse_doc)?;

  let mut index = LeafIndex::new();
  index.extend(matches);

  let fe = FormulaEvaluator::new(evaluator);
  let survivors = fe.eval(&index, &rule.formula, &rule.id)?;
  for rb in &survivors {
    hook(&rb.bindings, rb.origin.tokens());
  }
  Ok(survivors.into_iter().map(|rb| rb.origin).collect())
}

/// Runs every rule against the same target, collecting one result per rule
/// id. A rule's structural error does not abort the others; it is reported
/// alongside whatever rules did succeed. `hook` is shared across every rule
/// and fires once per surviving match, in emission order within each rule.
#[allow(clippy::too_many_arguments)]
pub fn check_all<AM, DM, RE, EV, R>(
  with_caching: bool,
  mut hook: impl FnMut(&Bindings, Vec<Loc>),
  backends: &Backends<'_, AM, DM, RE>,
  evaluator: &EV,
  rules: &[R],
  file: &Path,
  language: &LanguageTag,
  source: &[u8],
  mut lazy_ast: impl FnMut() -> AM::Ast,
  mut parse_doc: impl FnMut(&str) -> DM::Doc,
) -> Vec<(String, Result<Vec<PatternMatch>, CoreError>)>
where
  AM: AstMatcher,
  DM: DocMatcher,
  RE: RegexEngine,
  EV: Evaluator,
  R: Convert,
{
  rules
    .iter()
    .map(|rule| {
      let backends = Backends {
        ast: backends.ast,
        doc: backends.doc,
        regex: backends.regex,
      };
      let rule = rule.convert_legacy();
      let result = check(with_caching, &mut hook, backends, evaluator, &rule, file, language, source, || lazy_ast(), |s| parse_doc(s));
      (rule.id.clone(), result)
    })
    .collect()
}

#[cfg(test)]
mod test {
  use super::*;
  use crate::backend::{Equivalence, MiniRule, RawAstMatch, RawDocMatch, StdRegexEngine};
  use crate::condition::{Env, GenericExpr};
  use crate::formula::{XPattern, XPatternBody};
  use crate::mval::Bindings;

  struct NoAst;
  impl AstMatcher for NoAst {
    type Ast = ();
    fn check(
      &self,
      _with_caching: bool,
      _mini_rules: &[MiniRule],
      _equivalences: &[Equivalence],
      _file: &Path,
      _language: &str,
      _ast: &(),
    ) -> Result<Vec<RawAstMatch>, CoreError> {
      Ok(Vec::new())
    }
  }

  struct NoDoc;
  impl DocMatcher for NoDoc {
    type Doc = ();
    fn search(&self, _case_sensitive: bool, _source: &str, _pattern: &str, _doc: &()) -> Result<Vec<RawDocMatch>, CoreError> {
      Ok(Vec::new())
    }
  }

  struct NoopEvaluator;
  impl Evaluator for NoopEvaluator {
    fn eval_bool(&self, _env: &Env, _expr: &GenericExpr) -> bool {
      true
    }
  }

  #[test]
  fn check_runs_a_single_regex_leaf_end_to_end() {
    let (ast, doc, regex) = (NoAst, NoDoc, StdRegexEngine);
    let backends = Backends { ast: &ast, doc: &doc, regex: &regex };
    let evaluator = NoopEvaluator;
    let rule = Rule {
      id: "r1".into(),
      formula: Formula::Leaf(XPattern {
        id: 1,
        text: "bar".into(),
        body: XPatternBody::Regex("bar".into()),
      }),
    };
    let file = Path::new("f.x");
    let source = b"foo(1); bar(2); foo(3);\n";
    let result = check(false, |_, _| {}, backends, &evaluator, &rule, file, &LanguageTag::None, source, || (), |_| ()).unwrap();
    assert_eq!(result.len(), 1);
    assert_eq!(result[0].start_offset(), 8);
  }

  #[test]
  fn check_invokes_hook_once_per_surviving_match() {
    let (ast, doc, regex) = (NoAst, NoDoc, StdRegexEngine);
    let backends = Backends { ast: &ast, doc: &doc, regex: &regex };
    let evaluator = NoopEvaluator;
    let rule = Rule {
      id: "r1".into(),
      formula: Formula::Leaf(XPattern {
        id: 1,
        text: "foo".into(),
        body: XPatternBody::Regex("foo".into()),
      }),
    };
    let file = Path::new("f.x");
    let source = b"foo(1); bar(2); foo(3);\n";
    let mut seen = Vec::new();
    let result = check(
      false,
      |bindings, tokens| seen.push((bindings.clone(), tokens)),
      backends,
      &evaluator,
      &rule,
      file,
      &LanguageTag::None,
      source,
      || (),
      |_| (),
    )
    .unwrap();
    assert_eq!(result.len(), 2);
    assert_eq!(seen.len(), 2);
  }

  #[test]
  fn check_reports_malformed_leaf_id_from_the_ast_backend() {
    struct BadAst;
    impl AstMatcher for BadAst {
      type Ast = ();
      fn check(
        &self,
        _with_caching: bool,
        _mini_rules: &[MiniRule],
        _equivalences: &[Equivalence],
        _file: &Path,
        _language: &str,
        _ast: &(),
      ) -> Result<Vec<RawAstMatch>, CoreError> {
        Ok(vec![RawAstMatch {
          leaf_id: "not-a-number".into(),
          start: crate::loc::Loc::new("f.x", 0, 1, 1),
          end: crate::loc::Loc::new("f.x", 3, 1, 4),
          bindings: Bindings::new(),
        }])
      }
    }

    let (ast, doc, regex) = (BadAst, NoDoc, StdRegexEngine);
    let backends = Backends { ast: &ast, doc: &doc, regex: &regex };
    let evaluator = NoopEvaluator;
    let rule = Rule {
      id: "r1".into(),
      formula: Formula::Leaf(XPattern {
        id: 1,
        text: "foo($X)".into(),
        body: XPatternBody::Ast("foo($X)".into()),
      }),
    };
    let file = Path::new("f.x");
    let err = check(
      false,
      |_, _| {},
      backends,
      &evaluator,
      &rule,
      file,
      &LanguageTag::Lang("x".into()),
      b"foo(1);\n",
      || (),
      |_| (),
    )
    .unwrap_err();
    assert!(matches!(err, CoreError::MalformedLeafId(id) if id == "not-a-number"));
  }

  #[test]
  fn check_propagates_structural_errors_with_the_rule_id() {
    let (ast, doc, regex) = (NoAst, NoDoc, StdRegexEngine);
    let backends = Backends { ast: &ast, doc: &doc, regex: &regex };
    let evaluator = NoopEvaluator;
    let rule = Rule {
      id: "bad-rule".into(),
      formula: Formula::And(vec![]),
    };
    let file = Path::new("f.x");
    let err = check(false, |_, _| {}, backends, &evaluator, &rule, file, &LanguageTag::None, b"", || (), |_| ()).unwrap_err();
    match err {
      CoreError::Structural { rule_id, .. } => assert_eq!(rule_id, "bad-rule"),
      other => panic!("expected Structural, got {other:?}"),
    }
  }

  #[test]
  fn check_all_isolates_one_rules_failure_from_the_rest() {
    let (ast, doc, regex) = (NoAst, NoDoc, StdRegexEngine);
    let backends = Backends { ast: &ast, doc: &doc, regex: &regex };
    let evaluator = NoopEvaluator;
    let good = Rule {
      id: "good".into(),
      formula: Formula::Leaf(XPattern {
        id: 1,
        text: "bar".into(),
        body: XPatternBody::Regex("bar".into()),
      }),
    };
    let bad = Rule {
      id: "bad".into(),
      formula: Formula::And(vec![]),
    };
    let file = Path::new("f.x");
    let source = b"foo(1); bar(2); foo(3);\n";
    let results = check_all(false, |_, _| {}, &backends, &evaluator, &[good, bad], file, &LanguageTag::None, source, || (), |_| ());
    assert_eq!(results.len(), 2);
    assert!(results[0].1.is_ok());
    assert!(results[1].1.is_err());
  }
}
