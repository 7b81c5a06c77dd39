use metrics_exporter_prometheus::PrometheusHandle;
use scholarship_rules::config::AppConfig;
use scholarship_rules::error::AppError;
use scholarship_rules::workflows::scholarship::RuleSet;
use std::path::{Path, PathBuf};
use std::sync::atomic::AtomicBool;
use std::sync::Arc;
use tracing::info;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

/// Resolve the rule file: explicit flag first, then `SCHOLARSHIP_RULES_PATH`.
pub(crate) fn configured_rules_path(
    explicit: Option<PathBuf>,
) -> Result<Option<PathBuf>, AppError> {
    match explicit {
        Some(path) => Ok(Some(path)),
        None => Ok(AppConfig::load()?.rules.path),
    }
}

/// Load and validate the rule set, falling back to the built-in rules.
pub(crate) fn load_rule_set(path: Option<&Path>) -> Result<RuleSet, AppError> {
    match path {
        Some(path) => {
            let rules = RuleSet::from_path(path)?;
            info!(path = %path.display(), rules = rules.len(), "loaded scholarship rules");
            Ok(rules)
        }
        None => {
            let rules = RuleSet::standard();
            info!(rules = rules.len(), "using built-in scholarship rules");
            Ok(rules)
        }
    }
}
