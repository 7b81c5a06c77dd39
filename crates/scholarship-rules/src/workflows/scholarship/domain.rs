use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize, Serializer};

/// Label reported when no rule in the set matches an applicant.
pub const NO_DECISION_LABEL: &str = "NO_DECISION";
/// Reason reported alongside [`NO_DECISION_LABEL`].
pub const NO_DECISION_REASON: &str = "No rules matched";

/// Closed set of numeric comparisons a condition may apply.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ComparisonOperator {
    GreaterOrEqual,
    LessOrEqual,
    GreaterThan,
    LessThan,
    Equal,
}

impl ComparisonOperator {
    pub const ALL: [ComparisonOperator; 5] = [
        ComparisonOperator::GreaterOrEqual,
        ComparisonOperator::LessOrEqual,
        ComparisonOperator::GreaterThan,
        ComparisonOperator::LessThan,
        ComparisonOperator::Equal,
    ];

    pub fn symbol(&self) -> &'static str {
        match self {
            ComparisonOperator::GreaterOrEqual => ">=",
            ComparisonOperator::LessOrEqual => "<=",
            ComparisonOperator::GreaterThan => ">",
            ComparisonOperator::LessThan => "<",
            ComparisonOperator::Equal => "==",
        }
    }

    pub fn compare(&self, actual: f64, threshold: f64) -> bool {
        match self {
            ComparisonOperator::GreaterOrEqual => actual >= threshold,
            ComparisonOperator::LessOrEqual => actual <= threshold,
            ComparisonOperator::GreaterThan => actual > threshold,
            ComparisonOperator::LessThan => actual < threshold,
            ComparisonOperator::Equal => actual == threshold,
        }
    }
}

impl fmt::Display for ComparisonOperator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

/// Raised when an operator string is not one of the supported symbols.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown comparison operator '{0}' (expected one of >=, <=, >, <, ==)")]
pub struct UnknownOperator(pub String);

impl FromStr for ComparisonOperator {
    type Err = UnknownOperator;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        ComparisonOperator::ALL
            .into_iter()
            .find(|operator| operator.symbol() == raw)
            .ok_or_else(|| UnknownOperator(raw.to_string()))
    }
}

impl Serialize for ComparisonOperator {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.symbol())
    }
}

/// Single comparison of one applicant attribute against a threshold.
#[derive(Debug, Clone, PartialEq)]
pub struct Condition {
    pub field: String,
    pub operator: ComparisonOperator,
    pub threshold: f64,
}

impl Condition {
    pub fn new(field: impl Into<String>, operator: ComparisonOperator, threshold: f64) -> Self {
        Self {
            field: field.into(),
            operator,
            threshold,
        }
    }

    /// An attribute missing from the record never satisfies a condition.
    pub fn is_satisfied_by(&self, applicant: &ApplicantRecord) -> bool {
        applicant
            .get(&self.field)
            .map(|actual| self.operator.compare(actual, self.threshold))
            .unwrap_or(false)
    }
}

impl fmt::Display for Condition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} {}", self.field, self.operator, self.threshold)
    }
}

impl Serialize for Condition {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        (&self.field, self.operator.symbol(), self.threshold).serialize(serializer)
    }
}

/// Outcome a rule issues when all of its conditions hold.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RuleAction {
    pub decision: String,
    pub reason: String,
}

impl RuleAction {
    pub fn new(decision: impl Into<String>, reason: impl Into<String>) -> Self {
        Self {
            decision: decision.into(),
            reason: reason.into(),
        }
    }
}

/// Named, prioritized bundle of conditions plus the action to take when all hold.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Rule {
    pub name: String,
    pub priority: i64,
    pub conditions: Vec<Condition>,
    pub action: RuleAction,
}

impl Rule {
    pub fn new(name: impl Into<String>, priority: i64, action: RuleAction) -> Self {
        Self {
            name: name.into(),
            priority,
            conditions: Vec::new(),
            action,
        }
    }

    pub fn when(
        mut self,
        field: impl Into<String>,
        operator: ComparisonOperator,
        threshold: f64,
    ) -> Self {
        self.conditions
            .push(Condition::new(field, operator, threshold));
        self
    }

    /// A rule without conditions matches every applicant.
    pub fn matches(&self, applicant: &ApplicantRecord) -> bool {
        self.conditions
            .iter()
            .all(|condition| condition.is_satisfied_by(applicant))
    }
}

/// Flat mapping of applicant attribute names to numeric values.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ApplicantRecord(BTreeMap<String, f64>);

impl ApplicantRecord {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, field: impl Into<String>, value: f64) -> Self {
        self.insert(field, value);
        self
    }

    pub fn insert(&mut self, field: impl Into<String>, value: f64) -> Option<f64> {
        self.0.insert(field.into(), value)
    }

    pub fn get(&self, field: &str) -> Option<f64> {
        self.0.get(field).copied()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl FromIterator<(String, f64)> for ApplicantRecord {
    fn from_iter<I: IntoIterator<Item = (String, f64)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

/// Form-shaped applicant input collected by front ends.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApplicantForm {
    pub cgpa: f64,
    pub family_income: u32,
    pub co_curricular_score: u32,
    pub community_service_hours: u32,
    pub semester: u8,
    pub disciplinary_actions: u32,
}

impl ApplicantForm {
    pub fn to_record(&self) -> ApplicantRecord {
        ApplicantRecord::new()
            .with("cgpa", self.cgpa)
            .with("family_income", f64::from(self.family_income))
            .with("co_curricular_score", f64::from(self.co_curricular_score))
            .with(
                "community_service_hours",
                f64::from(self.community_service_hours),
            )
            .with("semester", f64::from(self.semester))
            .with("disciplinary_actions", f64::from(self.disciplinary_actions))
    }
}
