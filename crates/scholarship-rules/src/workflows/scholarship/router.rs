use std::sync::Arc;

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use tracing::warn;

use super::definition::RuleSetError;
use super::domain::ApplicantRecord;
use super::engine::RuleSet;
use super::registry::RuleSetRegistry;

/// Evaluation payload. Inline `rules` take precedence over the active set.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EvaluationRequest {
    pub applicant: ApplicantRecord,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rules: Option<Value>,
}

/// Router builder exposing evaluation and rule management endpoints.
pub fn scholarship_router(registry: Arc<RuleSetRegistry>) -> Router {
    Router::new()
        .route("/api/v1/scholarship/evaluate", post(evaluate_handler))
        .route(
            "/api/v1/scholarship/rules",
            get(rules_handler).put(replace_rules_handler),
        )
        .route("/api/v1/scholarship/rules/validate", post(validate_handler))
        .with_state(registry)
}

pub(crate) async fn evaluate_handler(
    State(registry): State<Arc<RuleSetRegistry>>,
    Json(request): Json<EvaluationRequest>,
) -> Response {
    let rules = match request.rules {
        Some(raw) => match RuleSet::from_value(raw) {
            Ok(rules) => Arc::new(rules),
            Err(error) => return rule_set_rejection(&error),
        },
        None => registry.snapshot(),
    };

    let outcome = rules.evaluate(&request.applicant).outcome();
    (StatusCode::OK, Json(outcome)).into_response()
}

pub(crate) async fn rules_handler(State(registry): State<Arc<RuleSetRegistry>>) -> Response {
    let rules = registry.snapshot();
    (StatusCode::OK, Json(&*rules)).into_response()
}

pub(crate) async fn replace_rules_handler(
    State(registry): State<Arc<RuleSetRegistry>>,
    Json(raw): Json<Value>,
) -> Response {
    match RuleSet::from_value(raw) {
        Ok(rules) => {
            let count = rules.len();
            registry.replace(rules);
            (StatusCode::OK, Json(json!({ "rules": count }))).into_response()
        }
        Err(error) => rule_set_rejection(&error),
    }
}

pub(crate) async fn validate_handler(Json(raw): Json<Value>) -> Response {
    match RuleSet::from_value(raw) {
        Ok(rules) => (
            StatusCode::OK,
            Json(json!({ "valid": true, "rules": rules.len() })),
        )
            .into_response(),
        Err(error) => rule_set_rejection(&error),
    }
}

fn rule_set_rejection(error: &RuleSetError) -> Response {
    warn!(%error, "rejected scholarship rule set");
    let payload = json!({
        "valid": false,
        "error": error.to_string(),
        "rule": error.rule(),
    });
    (StatusCode::UNPROCESSABLE_ENTITY, Json(payload)).into_response()
}
