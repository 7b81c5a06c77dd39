use std::path::Path;

use serde_json::{Map, Value};

use super::domain::{ComparisonOperator, Condition, Rule, RuleAction};
use super::engine::RuleSet;

/// Structural problems detected while loading a rule set.
///
/// Every variant names the offending rule (by name when it has one, by
/// position otherwise) so callers can block evaluation and point at the fix.
#[derive(Debug, thiserror::Error)]
pub enum RuleSetError {
    #[error("failed to read rule set: {0}")]
    Io(#[from] std::io::Error),
    #[error("rule set is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("rule set must be a JSON list of rules")]
    NotAList,
    #[error("rule {rule} must be a JSON object")]
    NotAnObject { rule: String },
    #[error("rule {rule} is missing required field '{field}'")]
    MissingField { rule: String, field: &'static str },
    #[error("rule {rule} has a non-string name")]
    InvalidName { rule: String },
    #[error("rule {rule} priority {value} must be an integer in i64 range")]
    InvalidPriority { rule: String, value: Value },
    #[error("rule {rule} must list its conditions as a JSON list")]
    InvalidConditions { rule: String },
    #[error("rule {rule} condition {position} must be a [field, operator, value] triple")]
    MalformedCondition { rule: String, position: usize },
    #[error("rule {rule} condition {position} has a non-string field name")]
    InvalidField { rule: String, position: usize },
    #[error("rule {rule} condition {position} uses unknown operator {operator}")]
    UnknownOperator {
        rule: String,
        position: usize,
        operator: Value,
    },
    #[error("rule {rule} condition {position} compares '{field}' against non-numeric value {value}")]
    NonNumericThreshold {
        rule: String,
        position: usize,
        field: String,
        value: Value,
    },
    #[error("rule {rule} action must be an object with string 'decision' and 'reason'")]
    MalformedAction { rule: String },
}

impl RuleSetError {
    /// Label of the rule the error refers to, when it refers to one.
    pub fn rule(&self) -> Option<&str> {
        match self {
            RuleSetError::Io(_) | RuleSetError::Json(_) | RuleSetError::NotAList => None,
            RuleSetError::NotAnObject { rule }
            | RuleSetError::MissingField { rule, .. }
            | RuleSetError::InvalidName { rule }
            | RuleSetError::InvalidPriority { rule, .. }
            | RuleSetError::InvalidConditions { rule }
            | RuleSetError::MalformedCondition { rule, .. }
            | RuleSetError::InvalidField { rule, .. }
            | RuleSetError::UnknownOperator { rule, .. }
            | RuleSetError::NonNumericThreshold { rule, .. }
            | RuleSetError::MalformedAction { rule } => Some(rule.as_str()),
        }
    }
}

impl RuleSet {
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self, RuleSetError> {
        let raw = std::fs::read_to_string(path)?;
        Self::from_json_str(&raw)
    }

    pub fn from_json_str(raw: &str) -> Result<Self, RuleSetError> {
        let value: Value = serde_json::from_str(raw)?;
        Self::from_value(value)
    }

    /// Validate an already-parsed JSON document into a typed rule set.
    pub fn from_value(value: Value) -> Result<Self, RuleSetError> {
        let Value::Array(entries) = value else {
            return Err(RuleSetError::NotAList);
        };

        let rules = entries
            .into_iter()
            .enumerate()
            .map(|(index, entry)| parse_rule(index, entry))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(RuleSet::new(rules))
    }

    pub fn to_json_pretty(&self) -> Result<String, RuleSetError> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

fn parse_rule(index: usize, entry: Value) -> Result<Rule, RuleSetError> {
    let position_label = format!("#{}", index + 1);
    let Value::Object(mut fields) = entry else {
        return Err(RuleSetError::NotAnObject {
            rule: position_label,
        });
    };

    let name = match fields.remove("name") {
        Some(Value::String(name)) => name,
        Some(_) => {
            return Err(RuleSetError::InvalidName {
                rule: position_label,
            })
        }
        None => {
            return Err(RuleSetError::MissingField {
                rule: position_label,
                field: "name",
            })
        }
    };
    let rule = format!("{position_label} '{name}'");

    let priority = match take(&mut fields, &rule, "priority")? {
        Value::Number(number) => number.as_i64().ok_or_else(|| RuleSetError::InvalidPriority {
            rule: rule.clone(),
            value: Value::Number(number.clone()),
        })?,
        other => {
            return Err(RuleSetError::InvalidPriority {
                rule,
                value: other,
            })
        }
    };

    let Value::Array(raw_conditions) = take(&mut fields, &rule, "conditions")? else {
        return Err(RuleSetError::InvalidConditions { rule });
    };
    let conditions = raw_conditions
        .into_iter()
        .enumerate()
        .map(|(offset, raw)| parse_condition(&rule, offset + 1, raw))
        .collect::<Result<Vec<_>, _>>()?;

    let action = take(&mut fields, &rule, "action")?;
    let action: RuleAction = serde_json::from_value(action)
        .map_err(|_| RuleSetError::MalformedAction { rule: rule.clone() })?;

    Ok(Rule {
        name,
        priority,
        conditions,
        action,
    })
}

fn take(
    fields: &mut Map<String, Value>,
    rule: &str,
    field: &'static str,
) -> Result<Value, RuleSetError> {
    fields.remove(field).ok_or_else(|| RuleSetError::MissingField {
        rule: rule.to_string(),
        field,
    })
}

fn parse_condition(rule: &str, position: usize, raw: Value) -> Result<Condition, RuleSetError> {
    let malformed = || RuleSetError::MalformedCondition {
        rule: rule.to_string(),
        position,
    };

    let Value::Array(parts) = raw else {
        return Err(malformed());
    };
    let [field, operator, threshold]: [Value; 3] = parts.try_into().map_err(|_| malformed())?;

    let Value::String(field) = field else {
        return Err(RuleSetError::InvalidField {
            rule: rule.to_string(),
            position,
        });
    };

    let operator = match &operator {
        Value::String(symbol) => symbol.parse::<ComparisonOperator>().ok(),
        _ => None,
    }
    .ok_or_else(|| RuleSetError::UnknownOperator {
        rule: rule.to_string(),
        position,
        operator: operator.clone(),
    })?;

    let threshold = match &threshold {
        Value::Number(number) => number.as_f64(),
        _ => None,
    }
    .ok_or_else(|| RuleSetError::NonNumericThreshold {
        rule: rule.to_string(),
        position,
        field: field.clone(),
        value: threshold.clone(),
    })?;

    Ok(Condition::new(field, operator, threshold))
}
