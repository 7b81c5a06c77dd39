use serde::{Deserialize, Serialize};
use tracing::debug;

use super::domain::{ApplicantRecord, Rule, RuleAction, NO_DECISION_LABEL, NO_DECISION_REASON};

/// Ordered, validated collection of rules. Evaluation never mutates it.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct RuleSet {
    rules: Vec<Rule>,
}

impl RuleSet {
    pub fn new(rules: Vec<Rule>) -> Self {
        Self { rules }
    }

    pub fn rules(&self) -> &[Rule] {
        &self.rules
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Rule> {
        self.rules.iter()
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Select the highest-priority rule matching `applicant`.
    ///
    /// Rules are visited in set order and the best candidate is only replaced
    /// on a strictly greater priority, so the earliest rule wins a tie.
    pub fn evaluate<'r>(&'r self, applicant: &ApplicantRecord) -> Decision<'r> {
        let mut selected: Option<&Rule> = None;

        for rule in self.rules.iter().filter(|rule| rule.matches(applicant)) {
            match selected {
                Some(best) if rule.priority <= best.priority => {}
                _ => selected = Some(rule),
            }
        }

        match selected {
            Some(rule) => {
                debug!(
                    rule = %rule.name,
                    priority = rule.priority,
                    decision = %rule.action.decision,
                    "scholarship rule selected"
                );
                Decision::Matched {
                    action: &rule.action,
                    rule,
                }
            }
            None => {
                debug!(rules = self.rules.len(), "no scholarship rule matched");
                Decision::NoMatch
            }
        }
    }
}

impl<'a> IntoIterator for &'a RuleSet {
    type Item = &'a Rule;
    type IntoIter = std::slice::Iter<'a, Rule>;

    fn into_iter(self) -> Self::IntoIter {
        self.rules.iter()
    }
}

/// Result of evaluating one applicant against a rule set.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Decision<'r> {
    Matched {
        action: &'r RuleAction,
        rule: &'r Rule,
    },
    NoMatch,
}

impl<'r> Decision<'r> {
    pub fn label(&self) -> &'r str {
        match *self {
            Decision::Matched { action, .. } => &action.decision,
            Decision::NoMatch => NO_DECISION_LABEL,
        }
    }

    pub fn reason(&self) -> &'r str {
        match *self {
            Decision::Matched { action, .. } => &action.reason,
            Decision::NoMatch => NO_DECISION_REASON,
        }
    }

    pub fn matched_rule(&self) -> Option<&'r Rule> {
        match *self {
            Decision::Matched { rule, .. } => Some(rule),
            Decision::NoMatch => None,
        }
    }

    pub fn is_match(&self) -> bool {
        matches!(self, Decision::Matched { .. })
    }

    pub fn outcome(&self) -> DecisionOutcome {
        DecisionOutcome {
            decision: self.label().to_string(),
            reason: self.reason().to_string(),
            matched: self.is_match(),
            matched_rule: self.matched_rule().map(MatchedRuleView::from),
        }
    }
}

/// Owned, serializable rendering of a [`Decision`] for API and CLI callers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DecisionOutcome {
    pub decision: String,
    pub reason: String,
    pub matched: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub matched_rule: Option<MatchedRuleView>,
}

impl DecisionOutcome {
    pub fn summary(&self) -> String {
        match &self.matched_rule {
            Some(rule) => format!(
                "{}: {} (rule '{}', priority {})",
                self.decision, self.reason, rule.name, rule.priority
            ),
            None => format!("{}: {}", self.decision, self.reason),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchedRuleView {
    pub name: String,
    pub priority: i64,
}

impl From<&Rule> for MatchedRuleView {
    fn from(rule: &Rule) -> Self {
        Self {
            name: rule.name.clone(),
            priority: rule.priority,
        }
    }
}
