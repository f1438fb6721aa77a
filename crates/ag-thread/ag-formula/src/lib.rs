//! Multi-backend formula evaluation: combine AST, indentation-sensitive
//! document, and regex matches into a single range algebra under a boolean
//! formula language, independent of any one backend's own matching logic.

pub mod backend;
pub mod condition;
pub mod engine;
pub mod error;
pub mod formula;
pub mod loc;
pub mod mval;
pub mod pattern_match;
pub mod range;

pub use backend::{AstMatcher, Backends, BackendDispatcher, DocMatcher, LanguageTag, RawAstMatch, RegexEngine, StdRegexEngine};
pub use condition::{ConditionEvaluator, Evaluator, MetavarCond};
pub use engine::{check, check_all, Convert, Rule};
pub use error::CoreError;
pub use formula::{Formula, FormulaEvaluator, XPattern, XPatternBody};
pub use loc::{Loc, LineTable, OffsetTableCache};
pub use mval::{AstValue, Bindings, MVal};
pub use pattern_match::{LeafId, LeafIndex, PatternMatch};
pub use range::{Range, RangeAlgebra, RangeBinding};
