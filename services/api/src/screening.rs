use crate::infra::{configured_rules_path, load_rule_set};
use clap::Args;
use scholarship_rules::error::AppError;
use scholarship_rules::workflows::scholarship::{
    ApplicantForm, ApplicantImporter, ApplicantRow, DecisionOutcome, RuleSet,
};
use std::collections::BTreeMap;
use std::path::PathBuf;

#[derive(Args, Debug, Default)]
pub(crate) struct RuleSourceArgs {
    /// JSON rule set file (defaults to SCHOLARSHIP_RULES_PATH, then the built-in rules)
    #[arg(long)]
    pub(crate) rules: Option<PathBuf>,
}

#[derive(Args, Debug)]
pub(crate) struct EvaluateArgs {
    /// Cumulative grade point average
    #[arg(long)]
    pub(crate) cgpa: f64,
    /// Monthly family income
    #[arg(long)]
    pub(crate) family_income: u32,
    /// Co-curricular activity score
    #[arg(long)]
    pub(crate) co_curricular_score: u32,
    /// Community service hours completed
    #[arg(long, default_value_t = 0)]
    pub(crate) community_service_hours: u32,
    /// Current semester number
    #[arg(long, default_value_t = 1)]
    pub(crate) semester: u8,
    /// Number of recorded disciplinary actions
    #[arg(long, default_value_t = 0)]
    pub(crate) disciplinary_actions: u32,
    /// Print the decision as JSON
    #[arg(long)]
    pub(crate) json: bool,
    #[command(flatten)]
    pub(crate) source: RuleSourceArgs,
}

impl EvaluateArgs {
    pub(crate) fn form(&self) -> ApplicantForm {
        ApplicantForm {
            cgpa: self.cgpa,
            family_income: self.family_income,
            co_curricular_score: self.co_curricular_score,
            community_service_hours: self.community_service_hours,
            semester: self.semester,
            disciplinary_actions: self.disciplinary_actions,
        }
    }
}

#[derive(Args, Debug)]
pub(crate) struct BatchArgs {
    /// CSV file with one applicant per row; headers name the fields
    #[arg(long)]
    pub(crate) csv: PathBuf,
    #[command(flatten)]
    pub(crate) source: RuleSourceArgs,
}

#[derive(Args, Debug)]
pub(crate) struct ValidateArgs {
    /// Rule set file to check
    pub(crate) path: PathBuf,
}

fn active_rules(source: RuleSourceArgs) -> Result<RuleSet, AppError> {
    let path = configured_rules_path(source.rules)?;
    load_rule_set(path.as_deref())
}

pub(crate) fn run_evaluate(args: EvaluateArgs) -> Result<(), AppError> {
    let form = args.form();
    let rules = active_rules(args.source)?;
    let outcome = rules.evaluate(&form.to_record()).outcome();

    if args.json {
        let rendered = serde_json::to_string_pretty(&outcome)
            .map_err(|err| std::io::Error::new(std::io::ErrorKind::Other, err))?;
        println!("{rendered}");
    } else {
        println!("{}", render_outcome(&outcome));
    }

    Ok(())
}

pub(crate) fn run_batch(args: BatchArgs) -> Result<(), AppError> {
    let rules = active_rules(args.source)?;
    let rows = ApplicantImporter::from_path(&args.csv)?;

    println!(
        "Scholarship batch: {} applicant(s), {} rule(s)",
        rows.len(),
        rules.len()
    );
    for line in render_batch(&rules, &rows) {
        println!("{line}");
    }

    Ok(())
}

pub(crate) fn run_rules_show(args: RuleSourceArgs) -> Result<(), AppError> {
    let rules = active_rules(args)?;
    println!("{}", rules.to_json_pretty()?);
    Ok(())
}

pub(crate) fn run_rules_validate(args: ValidateArgs) -> Result<(), AppError> {
    let rules = RuleSet::from_path(&args.path)?;
    println!("{}: {} valid rule(s)", args.path.display(), rules.len());
    for rule in &rules {
        println!(
            "- [{}] {} -> {} ({} condition(s))",
            rule.priority,
            rule.name,
            rule.action.decision,
            rule.conditions.len()
        );
    }
    Ok(())
}

pub(crate) fn render_outcome(outcome: &DecisionOutcome) -> String {
    match &outcome.matched_rule {
        Some(rule) => format!(
            "Decision: {}\nReason: {}\nMatched rule: {} (priority {})",
            outcome.decision, outcome.reason, rule.name, rule.priority
        ),
        None => format!(
            "Decision: {}\nReason: {}\nNo rule matched this applicant",
            outcome.decision, outcome.reason
        ),
    }
}

pub(crate) fn render_batch(rules: &RuleSet, rows: &[ApplicantRow]) -> Vec<String> {
    let mut lines = Vec::with_capacity(rows.len() + 2);
    let mut tally: BTreeMap<String, usize> = BTreeMap::new();

    for row in rows {
        let outcome = rules.evaluate(&row.applicant).outcome();
        *tally.entry(outcome.decision.clone()).or_default() += 1;
        lines.push(format!("- {}: {}", row.label, outcome.summary()));
    }

    lines.push("\nDecision totals".to_string());
    lines.extend(
        tally
            .into_iter()
            .map(|(decision, count)| format!("- {decision}: {count}")),
    );
    lines
}
