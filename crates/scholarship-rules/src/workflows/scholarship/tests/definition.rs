use super::common::*;
use serde_json::json;

use crate::workflows::scholarship::domain::{ComparisonOperator, Condition};
use crate::workflows::scholarship::{RuleSet, RuleSetError};

#[test]
fn loads_rules_from_original_text_format() {
    let raw = r#"[
        {
            "name": "Top merit candidate",
            "priority": 100,
            "conditions": [
                ["cgpa", ">=", 3.7],
                ["disciplinary_actions", "==", 0]
            ],
            "action": {"decision": "AWARD_FULL", "reason": "Excellent record"}
        }
    ]"#;

    let rules = RuleSet::from_json_str(raw).expect("rules validate");

    assert_eq!(rules.len(), 1);
    let rule = &rules.rules()[0];
    assert_eq!(rule.priority, 100);
    assert_eq!(
        rule.conditions,
        vec![
            Condition::new("cgpa", ComparisonOperator::GreaterOrEqual, 3.7),
            Condition::new("disciplinary_actions", ComparisonOperator::Equal, 0.0),
        ]
    );
    assert_eq!(rule.action.decision, "AWARD_FULL");
}

#[test]
fn accepts_empty_conditions_and_empty_sets() {
    let rules = RuleSet::from_value(json!([{
        "name": "Fallback review",
        "priority": 0,
        "conditions": [],
        "action": {"decision": "REVIEW", "reason": "Manual review"}
    }]))
    .expect("empty conditions are valid");
    assert!(rules.rules()[0].conditions.is_empty());

    let empty = RuleSet::from_value(json!([])).expect("empty set is valid");
    assert!(empty.is_empty());
}

#[test]
fn rejects_missing_priority() {
    let mut rule = valid_rule_json();
    rule.as_object_mut()
        .expect("rule is an object")
        .remove("priority");

    let err = RuleSet::from_value(single_rule_json(rule)).expect_err("priority required");

    match err {
        RuleSetError::MissingField { ref rule, field } => {
            assert_eq!(field, "priority");
            assert_eq!(rule, "#1 'Scholar athlete'");
        }
        other => panic!("expected missing priority, got {other:?}"),
    }
}

#[test]
fn rejects_fractional_priority() {
    let mut rule = valid_rule_json();
    rule["priority"] = json!(60.5);

    let err = RuleSet::from_value(single_rule_json(rule)).expect_err("integer priority");

    assert!(matches!(err, RuleSetError::InvalidPriority { .. }));
}

#[test]
fn rejects_missing_conditions() {
    let mut rule = valid_rule_json();
    rule.as_object_mut()
        .expect("rule is an object")
        .remove("conditions");

    let err = RuleSet::from_value(single_rule_json(rule)).expect_err("conditions required");

    assert!(matches!(
        err,
        RuleSetError::MissingField {
            field: "conditions",
            ..
        }
    ));
}

#[test]
fn rejects_unknown_operator_with_location() {
    let mut rule = valid_rule_json();
    rule["conditions"] = json!([["cgpa", ">=", 3.0], ["co_curricular_score", "=>", 90]]);

    let err = RuleSet::from_value(single_rule_json(rule)).expect_err("operator rejected");

    match &err {
        RuleSetError::UnknownOperator {
            rule,
            position,
            operator,
        } => {
            assert_eq!(rule, "#1 'Scholar athlete'");
            assert_eq!(*position, 2);
            assert_eq!(operator, &json!("=>"));
        }
        other => panic!("expected unknown operator, got {other:?}"),
    }
    assert_eq!(err.rule(), Some("#1 'Scholar athlete'"));
    assert!(err.to_string().contains("\"=>\""));
}

#[test]
fn rejects_out_of_range_priority() {
    let mut rule = valid_rule_json();
    rule["priority"] = json!(u64::MAX);

    let err = RuleSet::from_value(single_rule_json(rule)).expect_err("priority overflows i64");

    assert!(matches!(err, RuleSetError::InvalidPriority { .. }));
    assert!(err.to_string().contains("i64 range"));
}

#[test]
fn rejects_padded_operator() {
    let mut rule = valid_rule_json();
    rule["conditions"] = json!([["cgpa", " >= ", 1]]);

    let err = RuleSet::from_value(single_rule_json(rule)).expect_err("operator rejected");

    match &err {
        RuleSetError::UnknownOperator { operator, .. } => assert_eq!(operator, &json!(" >= ")),
        other => panic!("expected unknown operator, got {other:?}"),
    }
}

#[test]
fn rejects_entries_that_are_not_objects() {
    let err = RuleSet::from_value(json!([1])).expect_err("object required");

    assert!(matches!(err, RuleSetError::NotAnObject { .. }));
    assert_eq!(err.rule(), Some("#1"));
}

#[test]
fn rejects_non_string_name() {
    let mut rule = valid_rule_json();
    rule["name"] = json!(5);

    let err = RuleSet::from_value(single_rule_json(rule)).expect_err("string name required");

    assert!(matches!(err, RuleSetError::InvalidName { .. }));
    assert_eq!(err.rule(), Some("#1"));
}

#[test]
fn rejects_conditions_that_are_not_a_list() {
    let mut rule = valid_rule_json();
    rule["conditions"] = json!({ "co_curricular_score": 90 });

    let err = RuleSet::from_value(single_rule_json(rule)).expect_err("list required");

    assert!(matches!(err, RuleSetError::InvalidConditions { .. }));
    assert_eq!(err.rule(), Some("#1 'Scholar athlete'"));
}

#[test]
fn rejects_non_string_condition_field() {
    let mut rule = valid_rule_json();
    rule["conditions"] = json!([["cgpa", ">=", 3.0], [1, ">=", 1]]);

    let err = RuleSet::from_value(single_rule_json(rule)).expect_err("field name rejected");

    assert!(matches!(err, RuleSetError::InvalidField { position: 2, .. }));
    assert_eq!(err.rule(), Some("#1 'Scholar athlete'"));
}

#[test]
fn rejects_missing_action() {
    let mut rule = valid_rule_json();
    rule.as_object_mut().expect("rule is an object").remove("action");

    let err = RuleSet::from_value(single_rule_json(rule)).expect_err("action required");

    assert!(matches!(
        err,
        RuleSetError::MissingField {
            field: "action",
            ..
        }
    ));
    assert_eq!(err.rule(), Some("#1 'Scholar athlete'"));
}

#[test]
fn names_later_rule_by_position_and_name() {
    let mut broken = valid_rule_json();
    broken["name"] = json!("Need top-up");
    broken["priority"] = json!("high");

    let err = RuleSet::from_value(json!([valid_rule_json(), broken])).expect_err("priority rejected");

    assert!(matches!(err, RuleSetError::InvalidPriority { .. }));
    assert_eq!(err.rule(), Some("#2 'Need top-up'"));
}

#[test]
fn rejects_non_numeric_threshold() {
    let mut rule = valid_rule_json();
    rule["conditions"] = json!([["cgpa", ">=", "3.5"]]);

    let err = RuleSet::from_value(single_rule_json(rule)).expect_err("threshold rejected");

    match err {
        RuleSetError::NonNumericThreshold { field, value, .. } => {
            assert_eq!(field, "cgpa");
            assert_eq!(value, json!("3.5"));
        }
        other => panic!("expected non-numeric threshold, got {other:?}"),
    }
}

#[test]
fn rejects_conditions_that_are_not_triples() {
    let mut rule = valid_rule_json();
    rule["conditions"] = json!([["cgpa", ">="]]);

    let err = RuleSet::from_value(single_rule_json(rule)).expect_err("pair rejected");

    assert!(matches!(
        err,
        RuleSetError::MalformedCondition { position: 1, .. }
    ));
}

#[test]
fn rejects_malformed_action() {
    let mut rule = valid_rule_json();
    rule["action"] = json!({ "decision": "AWARD_FULL" });

    let err = RuleSet::from_value(single_rule_json(rule)).expect_err("reason required");

    assert!(matches!(err, RuleSetError::MalformedAction { .. }));
}

#[test]
fn reports_position_when_name_is_missing() {
    let mut nameless = valid_rule_json();
    nameless.as_object_mut().expect("object").remove("name");

    let err = RuleSet::from_value(json!([valid_rule_json(), nameless])).expect_err("name required");

    assert_eq!(err.rule(), Some("#2"));
}

#[test]
fn rejects_non_list_documents() {
    assert!(matches!(
        RuleSet::from_value(json!({ "rules": [] })),
        Err(RuleSetError::NotAList)
    ));
    assert!(matches!(
        RuleSet::from_json_str("[{"),
        Err(RuleSetError::Json(_))
    ));
}

#[test]
fn standard_rules_round_trip_through_json_value() {
    let reloaded = RuleSet::from_value(standard_rules_json()).expect("standard rules validate");

    assert_eq!(reloaded, RuleSet::standard());
}
