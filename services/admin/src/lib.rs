mod cli;
mod commands;
mod infra;

use job_alert::error::AppError;

pub async fn run() -> Result<(), AppError> {
    cli::run().await
}
