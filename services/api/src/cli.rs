use crate::screening::{
    run_batch, run_evaluate, run_rules_show, run_rules_validate, BatchArgs, EvaluateArgs,
    RuleSourceArgs, ValidateArgs,
};
use crate::server;
use clap::{Args, Parser, Subcommand};
use scholarship_rules::error::AppError;

#[derive(Parser, Debug)]
#[command(
    name = "Scholarship Screening",
    about = "Evaluate scholarship applicants against prioritized decision rules",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Start the HTTP service (default command)
    Serve(ServeArgs),
    /// Evaluate a single applicant from form values
    Evaluate(EvaluateArgs),
    /// Evaluate every applicant in a CSV file
    Batch(BatchArgs),
    /// Inspect or check rule set files
    Rules {
        #[command(subcommand)]
        command: RulesCommand,
    },
}

#[derive(Subcommand, Debug)]
enum RulesCommand {
    /// Print the active rule set as JSON
    Show(RuleSourceArgs),
    /// Check a rule set file without evaluating anything
    Validate(ValidateArgs),
}

#[derive(Args, Debug, Default)]
pub(crate) struct ServeArgs {
    /// Override the configured host for the HTTP server
    #[arg(long)]
    pub(crate) host: Option<String>,
    /// Override the configured port for the HTTP server
    #[arg(long)]
    pub(crate) port: Option<u16>,
    #[command(flatten)]
    pub(crate) source: RuleSourceArgs,
}

pub(crate) async fn run() -> Result<(), AppError> {
    let cli = Cli::parse();
    let command = cli
        .command
        .unwrap_or_else(|| Command::Serve(ServeArgs::default()));

    match command {
        Command::Serve(args) => server::run(args).await,
        Command::Evaluate(args) => run_evaluate(args),
        Command::Batch(args) => run_batch(args),
        Command::Rules {
            command: RulesCommand::Show(args),
        } => run_rules_show(args),
        Command::Rules {
            command: RulesCommand::Validate(args),
        } => run_rules_validate(args),
    }
}
