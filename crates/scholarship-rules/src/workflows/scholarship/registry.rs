use std::sync::{Arc, PoisonError, RwLock};

use tracing::info;

use super::engine::RuleSet;

/// Holds the rule set new evaluations run against.
///
/// Readers take an `Arc` snapshot, so replacing the set never disturbs an
/// evaluation that is already running.
#[derive(Debug)]
pub struct RuleSetRegistry {
    current: RwLock<Arc<RuleSet>>,
}

impl RuleSetRegistry {
    pub fn new(rules: RuleSet) -> Self {
        Self {
            current: RwLock::new(Arc::new(rules)),
        }
    }

    pub fn snapshot(&self) -> Arc<RuleSet> {
        self.current
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Swap in a new rule set wholesale, returning the one it replaced.
    pub fn replace(&self, rules: RuleSet) -> Arc<RuleSet> {
        let count = rules.len();
        let mut guard = self
            .current
            .write()
            .unwrap_or_else(PoisonError::into_inner);
        let previous = std::mem::replace(&mut *guard, Arc::new(rules));
        info!(rules = count, "active scholarship rule set replaced");
        previous
    }
}

impl Default for RuleSetRegistry {
    fn default() -> Self {
        Self::new(RuleSet::standard())
    }
}
