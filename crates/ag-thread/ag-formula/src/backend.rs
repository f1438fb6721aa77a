//! The multi-backend dispatcher (C2): partitions a formula's leaves by
//! backend kind, invokes the AST / doc / regex backends, and lifts their raw
//! matches into uniform [`PatternMatch`] records.
//!
//! `AstMatcher`, `DocMatcher` and `RegexEngine` are external collaborators,
//! out of scope for this crate to implement: this module only defines the
//! trait surface the dispatcher talks to. `StdRegexEngine` is the one
//! concrete implementation this crate ships, since a plain `regex`-backed
//! engine is a reasonable default rather than a component someone else must
//! always supply.

use crate::error::CoreError;
use crate::formula::{XPattern, XPatternBody};
use crate::loc::{Loc, OffsetTableCache};
use crate::mval::{Bindings, MVal};
use crate::pattern_match::{LeafId, PatternMatch};

use std::path::{Path, PathBuf};
use std::sync::Arc;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// The language tag attached to a rule. A concrete language forces the AST
/// backend to run; `None`/`Generic` skip it (not an error, `LanguageMismatch`
/// in the error taxonomy).
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum LanguageTag {
  Lang(String),
  Generic,
  None,
}

impl LanguageTag {
  pub fn is_concrete(&self) -> bool {
    matches!(self, LanguageTag::Lang(_))
  }
}

/// A placeholder for the equivalence classes `AstMatcher.check` accepts.
/// Always passed as an empty slice by this dispatcher; the type exists so
/// the call site reads the same shape as the external interface.
#[derive(Clone, Debug)]
pub struct Equivalence(pub String);

/// The single-pattern adapter record handed to the AST backend.
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct MiniRule {
  pub leaf_id: String,
  pub pattern: String,
  pub languages: Vec<String>,
}

/// A raw hit from the AST backend, before its leaf id has been parsed back
/// from the mini rule's string id.
#[derive(Clone, Debug)]
pub struct RawAstMatch {
  pub leaf_id: String,
  pub start: Loc,
  pub end: Loc,
  pub bindings: Bindings,
}

/// The structural AST-to-AST matcher. Out of scope to implement; the
/// dispatcher only calls through this trait.
pub trait AstMatcher {
  type Ast;

  fn check(
    &self,
    with_caching: bool,
    mini_rules: &[MiniRule],
    equivalences: &[Equivalence],
    file: &Path,
    language: &str,
    ast: &Self::Ast,
  ) -> Result<Vec<RawAstMatch>, CoreError>;
}

/// A raw position as reported by the document matcher: 1-based line, the
/// tree-sitter-style `pos_cnum` (byte offset within the whole source) and
/// `pos_bol` (byte offset of the start of the line), from which `Loc` is
/// derived by `column = pos_cnum - pos_bol + 1`.
#[derive(Clone, Copy, Debug)]
pub struct RawPos {
  pub line: usize,
  pub pos_cnum: usize,
  pub pos_bol: usize,
}

impl RawPos {
  fn to_loc(self, file: &Path, text: impl Into<String>) -> Loc {
    Loc::new(file.to_path_buf(), self.pos_cnum, self.line, self.pos_cnum - self.pos_bol + 1).with_text(text)
  }
}

/// A single named capture from a raw document-matcher hit.
#[derive(Clone, Debug)]
pub struct Capture {
  pub value: String,
  pub loc: RawPos,
}

/// One hit from `DocMatcher.search`. `region`'s first position is used for
/// both ends of the resulting `PatternMatch`'s location. Documented
/// limitation: doc-backed matches do not span the whole hit.
#[derive(Clone, Debug)]
pub struct RawDocMatch {
  pub region: (RawPos, RawPos),
  pub named_captures: Vec<(String, Capture)>,
}

/// The indentation-sensitive document matcher. Out of scope to implement.
pub trait DocMatcher {
  type Doc;

  fn search(&self, case_sensitive: bool, source: &str, pattern: &str, doc: &Self::Doc) -> Result<Vec<RawDocMatch>, CoreError>;
}

/// A single regex match, with capture-group accessors mirroring the external
/// `Match.offset(i)` / `Match.substring(i)` interface. Group 0 is the whole
/// match.
#[derive(Clone, Debug)]
pub struct RegexMatch {
  groups: Vec<Option<(usize, usize, String)>>,
}

impl RegexMatch {
  pub fn offset(&self, i: usize) -> Option<(usize, usize)> {
    self.groups.get(i)?.as_ref().map(|(s, e, _)| (*s, *e))
  }

  pub fn substring(&self, i: usize) -> Option<&str> {
    self.groups.get(i)?.as_ref().map(|(_, _, s)| s.as_str())
  }
}

/// The regular-expression backend. Out of scope to implement in general, but
/// `StdRegexEngine` below provides a real `regex`-crate-backed instance.
pub trait RegexEngine {
  type Compiled;

  fn compile(&self, text: &str) -> Result<Self::Compiled, CoreError>;

  /// A "not found" condition for one leaf is the caller's cue to treat it as
  /// an empty result set (`RegexMiss`), not a rule failure; this method
  /// itself should only return `Err` for a genuine backend failure.
  fn find_all(&self, compiled: &Self::Compiled, bytes: &[u8]) -> Result<Vec<RegexMatch>, CoreError>;
}

/// The default `regex`-crate-backed `RegexEngine`.
#[derive(Default)]
pub struct StdRegexEngine;

impl RegexEngine for StdRegexEngine {
  type Compiled = regex::bytes::Regex;

  fn compile(&self, text: &str) -> Result<Self::Compiled, CoreError> {
    regex::bytes::Regex::new(text).map_err(|e| CoreError::BackendFailure(format!("invalid regex `{text}`: {e}")))
  }

  fn find_all(&self, compiled: &Self::Compiled, bytes: &[u8]) -> Result<Vec<RegexMatch>, CoreError> {
    let mut out = Vec::new();
    for caps in compiled.captures_iter(bytes) {
      let groups = (0..caps.len())
        .map(|i| {
          caps.get(i).map(|m| {
            let text = String::from_utf8_lossy(m.as_bytes()).into_owned();
            (m.start(), m.end(), text)
          })
        })
        .collect();
      out.push(RegexMatch { groups });
    }
    Ok(out)
  }
}

/// The three backend implementations the dispatcher fans leaves out to.
pub struct Backends<'a, AM, DM, RE> {
  pub ast: &'a AM,
  pub doc: &'a DM,
  pub regex: &'a RE,
}

/// Partitions leaves by backend kind, invokes each backend, and normalizes
/// the results into a flat list of `PatternMatch`es in the fixed order
/// `ast ++ regex ++ doc`.
pub struct BackendDispatcher<'a, AM, DM, RE> {
  backends: Backends<'a, AM, DM, RE>,
}

impl<'a, AM: AstMatcher, DM: DocMatcher, RE: RegexEngine> BackendDispatcher<'a, AM, DM, RE> {
  pub fn new(backends: Backends<'a, AM, DM, RE>) -> Self {
    Self { backends }
  }

  /// Runs every backend needed by `leaves` against `file`. `source` is the
  /// file's raw bytes, read once by the caller and shared across the regex
  /// and doc backends. `lazy_ast`/`parse_doc` are only invoked if some leaf
  /// actually needs that backend.
  #[allow(clippy::too_many_arguments)]
  pub fn dispatch(
    &self,
    leaves: &[XPattern],
    file: &Path,
    language: &LanguageTag,
    with_caching: bool,
    source: &[u8],
    lazy_ast: impl FnOnce() -> AM::Ast,
    parse_doc: impl FnOnce(&str) -> DM::Doc,
  ) -> Result<Vec<PatternMatch>, CoreError> {
    let (ast_leaves, doc_leaves, regex_leaves) = partition_leaves(leaves);

    let ast_matches = self.run_ast(&ast_leaves, file, language, with_caching, lazy_ast)?;
    let regex_matches = self.run_regex(&regex_leaves, file, source)?;
    let doc_matches = self.run_doc(&doc_leaves, file, source, parse_doc)?;

    let mut out = Vec::with_capacity(ast_matches.len() + regex_matches.len() + doc_matches.len());
    out.extend(ast_matches);
    out.extend(regex_matches);
    out.extend(doc_matches);
    Ok(out)
  }

  fn run_ast(
    &self,
    ast_leaves: &[&XPattern],
    file: &Path,
    language: &LanguageTag,
    with_caching: bool,
    lazy_ast: impl FnOnce() -> AM::Ast,
  ) -> Result<Vec<PatternMatch>, CoreError> {
    if ast_leaves.is_empty() {
      return Ok(Vec::new());
    }
    let LanguageTag::Lang(lang) = language else {
      // LanguageMismatch: the AST backend yields empty, not an error.
      return Ok(Vec::new());
    };
    let mini_rules: Vec<MiniRule> = ast_leaves
      .iter()
      .map(|leaf| MiniRule {
        leaf_id: leaf.id.to_string(),
        pattern: leaf.text.clone(),
        languages: vec![lang.clone()],
      })
      .collect();
    let ast = lazy_ast();
    let raw = self.backends.ast.check(with_caching, &mini_rules, &[], file, lang, &ast)?;
    raw.into_iter().map(|m| lift_ast_match(file, m)).collect()
  }

  fn run_regex(&self, regex_leaves: &[&XPattern], file: &Path, source: &[u8]) -> Result<Vec<PatternMatch>, CoreError> {
    if regex_leaves.is_empty() {
      return Ok(Vec::new());
    }
    let table = OffsetTableCache::get_or_build(file, source);
    let mut out = Vec::new();
    for leaf in regex_leaves {
      let XPatternBody::Regex(pattern) = &leaf.body else {
        unreachable!("partition_leaves guarantees Regex body");
      };
      // A compile or search failure for one leaf is isolated (`RegexMiss`):
      // it contributes an empty result set, not a rule failure.
      let matches = self
        .backends
        .regex
        .compile(pattern)
        .and_then(|compiled| self.backends.regex.find_all(&compiled, source))
        .unwrap_or_default();
      for m in matches {
        let Some((start, end)) = m.offset(0) else { continue };
        let (start_line, start_col) = table.to_line_col(start);
        let (end_line, end_col) = table.to_line_col(end);
        let start_loc = Loc::new(file.to_path_buf(), start, start_line, start_col);
        let end_loc = Loc::new(file.to_path_buf(), end, end_line, end_col);
        out.push(PatternMatch::new(leaf.id, file, start_loc, end_loc, Bindings::new()));
      }
    }
    Ok(out)
  }

  fn run_doc(
    &self,
    doc_leaves: &[&XPattern],
    file: &Path,
    source: &[u8],
    parse_doc: impl FnOnce(&str) -> DM::Doc,
  ) -> Result<Vec<PatternMatch>, CoreError> {
    if doc_leaves.is_empty() {
      return Ok(Vec::new());
    }
    let source_str = String::from_utf8_lossy(source);
    let doc = parse_doc(&source_str);
    let mut out = Vec::new();
    for leaf in doc_leaves {
      let XPatternBody::Doc(pattern) = &leaf.body else {
        unreachable!("partition_leaves guarantees Doc body");
      };
      let hits = self.backends.doc.search(true, &source_str, pattern, &doc)?;
      for hit in hits {
        out.push(lift_doc_match(leaf.id, file, hit));
      }
    }
    Ok(out)
  }
}

fn lift_ast_match(file: &Path, m: RawAstMatch) -> Result<PatternMatch, CoreError> {
  let leaf_id: LeafId = m.leaf_id.parse().map_err(|_| CoreError::MalformedLeafId(m.leaf_id.clone()))?;
  Ok(PatternMatch::new(leaf_id, file, m.start, m.end, m.bindings))
}

fn lift_doc_match(leaf_id: LeafId, file: &Path, hit: RawDocMatch) -> PatternMatch {
  let loc = hit.region.0.to_loc(file, "");
  let mut bindings = Bindings::new();
  for (name, capture) in hit.named_captures {
    let loc = capture.loc.to_loc(file, capture.value.clone());
    let val = match capture.value.parse::<i64>() {
      Ok(n) => MVal::Int(n, loc),
      Err(_) => MVal::Str(capture.value, loc),
    };
    bindings.insert(format!("${name}"), val);
  }
  // Both ends of a doc-backed PM are the match's first position; the token
  // thunk carries that same single location.
  let token_loc = loc.clone();
  PatternMatch::new(leaf_id, file, loc.clone(), loc, bindings).with_tokens(Arc::new(move || vec![token_loc.clone()]))
}

fn partition_leaves(leaves: &[XPattern]) -> (Vec<&XPattern>, Vec<&XPattern>, Vec<&XPattern>) {
  let mut ast = Vec::new();
  let mut doc = Vec::new();
  let mut regex = Vec::new();
  for leaf in leaves {
    match &leaf.body {
      XPatternBody::Ast(_) => ast.push(leaf),
      XPatternBody::Doc(_) => doc.push(leaf),
      XPatternBody::Regex(_) => regex.push(leaf),
    }
  }
  (ast, doc, regex)
}

#[cfg(test)]
mod test {
  use super::*;
  use crate::formula::XPatternBody;

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

  fn dispatcher<'a>(ast: &'a NoAst, doc: &'a NoDoc, regex: &'a StdRegexEngine) -> BackendDispatcher<'a, NoAst, NoDoc, StdRegexEngine> {
    BackendDispatcher::new(Backends { ast, doc, regex })
  }

  #[test]
  fn regex_leaf_produces_match_at_right_offset() {
    let (ast, doc, regex) = (NoAst, NoDoc, StdRegexEngine);
    let dispatcher = dispatcher(&ast, &doc, &regex);
    let leaves = vec![XPattern {
      id: 1,
      text: "bar".into(),
      body: XPatternBody::Regex("bar".into()),
    }];
    let source = b"foo(1); bar(2); foo(3);\n";
    let out = dispatcher
      .dispatch(&leaves, Path::new("f.x"), &LanguageTag::None, false, source, || (), |_| ())
      .unwrap();
    assert_eq!(out.len(), 1);
    assert_eq!(out[0].start_offset(), 8);
  }

  #[test]
  fn ast_backend_skipped_for_generic_language() {
    let (ast, doc, regex) = (NoAst, NoDoc, StdRegexEngine);
    let dispatcher = dispatcher(&ast, &doc, &regex);
    let leaves = vec![XPattern {
      id: 1,
      text: "foo($X)".into(),
      body: XPatternBody::Ast("foo($X)".into()),
    }];
    let out = dispatcher
      .dispatch(&leaves, Path::new("f.x"), &LanguageTag::Generic, false, b"", || (), |_| ())
      .unwrap();
    assert!(out.is_empty());
  }

  #[test]
  fn invalid_regex_is_treated_as_empty_not_a_failure() {
    let (ast, doc, regex) = (NoAst, NoDoc, StdRegexEngine);
    let dispatcher = dispatcher(&ast, &doc, &regex);
    let leaves = vec![XPattern {
      id: 1,
      text: "bad".into(),
      body: XPatternBody::Regex("(".into()),
    }];
    let out = dispatcher
      .dispatch(&leaves, Path::new("f.x"), &LanguageTag::None, false, b"anything", || (), |_| ())
      .unwrap();
    assert!(out.is_empty());
  }

  struct OneAst;
  impl AstMatcher for OneAst {
    type Ast = ();
    fn check(
      &self,
      _with_caching: bool,
      mini_rules: &[MiniRule],
      _equivalences: &[Equivalence],
      _file: &Path,
      _language: &str,
      _ast: &(),
    ) -> Result<Vec<RawAstMatch>, CoreError> {
      Ok(vec![RawAstMatch {
        leaf_id: mini_rules[0].leaf_id.clone(),
        start: Loc::new("f.x", 0, 1, 1),
        end: Loc::new("f.x", 7, 1, 8),
        bindings: Bindings::new(),
      }])
    }
  }

  #[test]
  fn ast_leaf_id_round_trips_through_the_mini_rule_string_id() {
    let (ast, doc, regex) = (OneAst, NoDoc, StdRegexEngine);
    let dispatcher = BackendDispatcher::new(Backends { ast: &ast, doc: &doc, regex: &regex });
    let leaves = vec![XPattern {
      id: 7,
      text: "foo($X)".into(),
      body: XPatternBody::Ast("foo($X)".into()),
    }];
    let out = dispatcher
      .dispatch(&leaves, Path::new("f.x"), &LanguageTag::Lang("x".into()), false, b"foo(1);\n", || (), |_| ())
      .unwrap();
    assert_eq!(out.len(), 1);
    assert_eq!(out[0].leaf_id, 7);
  }

  struct OneDoc;
  impl DocMatcher for OneDoc {
    type Doc = ();
    fn search(&self, _case_sensitive: bool, _source: &str, _pattern: &str, _doc: &()) -> Result<Vec<RawDocMatch>, CoreError> {
      let pos = RawPos { line: 2, pos_cnum: 4, pos_bol: 0 };
      Ok(vec![RawDocMatch {
        region: (pos, pos),
        named_captures: Vec::new(),
      }])
    }
  }

  #[test]
  fn doc_match_tokens_carry_the_matchs_single_location() {
    let (ast, doc, regex) = (NoAst, OneDoc, StdRegexEngine);
    let dispatcher = BackendDispatcher::new(Backends { ast: &ast, doc: &doc, regex: &regex });
    let leaves = vec![XPattern {
      id: 1,
      text: "heading".into(),
      body: XPatternBody::Doc("heading".into()),
    }];
    let out = dispatcher
      .dispatch(&leaves, Path::new("f.x"), &LanguageTag::None, false, b"doc body\n", || (), |_| ())
      .unwrap();
    assert_eq!(out.len(), 1);
    let tokens = out[0].tokens();
    assert_eq!(tokens.len(), 1);
    assert_eq!(tokens[0].byte_offset, out[0].start_offset());
  }
}
