use std::sync::Arc;

use axum::response::Response;
use serde_json::{json, Value};

use crate::workflows::scholarship::domain::{ComparisonOperator, Rule, RuleAction};
use crate::workflows::scholarship::{
    scholarship_router, ApplicantRecord, RuleSet, RuleSetRegistry,
};

pub(super) fn applicant(
    cgpa: f64,
    co_curricular_score: f64,
    family_income: f64,
    disciplinary_actions: f64,
) -> ApplicantRecord {
    ApplicantRecord::new()
        .with("cgpa", cgpa)
        .with("co_curricular_score", co_curricular_score)
        .with("family_income", family_income)
        .with("disciplinary_actions", disciplinary_actions)
}

pub(super) fn labelled_rule(name: &str, priority: i64, decision: &str) -> Rule {
    Rule::new(name, priority, RuleAction::new(decision, format!("{name} fired")))
}

pub(super) fn cgpa_floor_rule(name: &str, priority: i64, floor: f64, decision: &str) -> Rule {
    labelled_rule(name, priority, decision).when("cgpa", ComparisonOperator::GreaterOrEqual, floor)
}

pub(super) fn standard_rules_json() -> Value {
    serde_json::to_value(RuleSet::standard()).expect("standard rules serialize")
}

pub(super) fn single_rule_json(rule: Value) -> Value {
    json!([rule])
}

pub(super) fn valid_rule_json() -> Value {
    json!({
        "name": "Scholar athlete",
        "priority": 60,
        "conditions": [["co_curricular_score", ">", 90]],
        "action": { "decision": "AWARD_PARTIAL", "reason": "Outstanding co-curricular record" }
    })
}

pub(super) fn registry() -> Arc<RuleSetRegistry> {
    Arc::new(RuleSetRegistry::default())
}

pub(super) fn router_with_registry(registry: Arc<RuleSetRegistry>) -> axum::Router {
    scholarship_router(registry)
}

pub(super) async fn read_json_body(response: Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), 64 * 1024)
        .await
        .expect("read body");
    serde_json::from_slice(&body).expect("json payload")
}
