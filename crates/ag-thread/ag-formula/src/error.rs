//! The error taxonomy. Modeled as a `thiserror`-derived enum so callers can
//! match on failure kind rather than parse exception text, in the same style
//! as `RuleCoreError`/`RuleSerializeError` elsewhere in this workspace.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum CoreError {
  /// `And` with no positive child, or `Not`/`Cond` not directly under `And`.
  /// Fatal for the rule; surfaced with the rule id.
  #[error("structural error in rule `{rule_id}`: {reason}")]
  Structural { rule_id: String, reason: &'static str },

  /// An AST or doc backend raised. Propagates; the rule fails.
  #[error("backend failure: {0}")]
  BackendFailure(String),

  /// A mini-rule's leaf id could not be parsed as an integer. A bug in
  /// backend plumbing, not a user-facing condition.
  #[error("malformed leaf id `{0}`")]
  MalformedLeafId(String),
}

pub type Result<T> = std::result::Result<T, CoreError>;
