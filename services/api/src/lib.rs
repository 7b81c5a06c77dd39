mod cli;
mod infra;
mod routes;
mod screening;
mod server;

use scholarship_rules::error::AppError;

pub async fn run() -> Result<(), AppError> {
    cli::run().await
}
