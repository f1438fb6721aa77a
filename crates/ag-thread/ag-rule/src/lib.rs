pub mod combined;
pub mod maybe;
pub mod rule;
pub mod rule_collection;
pub mod rule_config;
pub mod rule_core;
pub mod check_var;

pub use combined::CombinedScan;
pub use relational_rule::{Follows, Has, Inside, Precedes};
pub use rule::referent_rule::{Registration, GlobalRules, RuleRegistration};
pub use rule::{AtomicRule, Rule, RuleError, SerializableRule, ReferentRule, ReferentRuleError, DeserializeEnv, Strictness, PatternStyle, PatternError, CompositeRule, RelationalRule};
pub use rule_collection::{RuleBucket, RuleCollection, SerializableRuleCollection};
pub use rule_config::{Severity, RuleConfigError, SerializableRewriter, SerializableRuleConfig, Metadata};
pub use rule_core::{RuleCore, RuleCoreError, SerializableRuleCore};
pub use check_var::{check_rule_with_hint, CheckHint, check_rewriters_in_transform};
