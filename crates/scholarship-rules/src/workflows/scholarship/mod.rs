//! Scholarship applicant screening against prioritized condition-action rules.
//!
//! A [`RuleSet`] is validated once when it is loaded and then evaluated as an
//! immutable value: every applicant yields exactly one [`Decision`], either the
//! action of the highest-priority matching rule or [`Decision::NoMatch`].

mod defaults;
pub mod definition;
pub mod domain;
pub mod engine;
pub mod import;
pub mod registry;
pub mod router;

#[cfg(test)]
mod tests;

pub use definition::RuleSetError;
pub use domain::{
    ApplicantForm, ApplicantRecord, ComparisonOperator, Condition, Rule, RuleAction,
    UnknownOperator, NO_DECISION_LABEL, NO_DECISION_REASON,
};
pub use engine::{Decision, DecisionOutcome, MatchedRuleView, RuleSet};
pub use import::{ApplicantImportError, ApplicantImporter, ApplicantRow};
pub use registry::RuleSetRegistry;
pub use router::{scholarship_router, EvaluationRequest};
