use crate::commands::{self, EditArgs, FileArgs, ListArgs};
use crate::infra::AdminContext;
use clap::{Args, Parser, Subcommand};
use job_alert::config::{AppConfig, ApiConfig};
use job_alert::error::AppError;
use job_alert::jobs::JobId;
use job_alert::telemetry;

#[derive(Parser, Debug)]
#[command(
    name = "Job Alert Admin",
    about = "Manage government job postings against the Job Alert REST backend",
    version
)]
struct Cli {
    /// Override the configured REST backend base URL
    #[arg(long, global = true)]
    api_url: Option<String>,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List, inspect, create, edit, and delete job postings
    Jobs {
        #[command(subcommand)]
        command: JobsCommand,
    },
    /// Validate a draft file offline without contacting the backend
    Validate(FileArgs),
    /// Print the public home page feeds
    Feeds,
}

#[derive(Subcommand, Debug)]
enum JobsCommand {
    /// Show one page of the admin listing
    List(ListArgs),
    /// Print a stored job posting as JSON
    Show(IdArgs),
    /// Submit a new job posting from a draft file
    Create(FileArgs),
    /// Load a job posting, apply changes, and submit it
    Edit(EditArgs),
    /// Delete a job posting and show the refreshed listing
    Delete(DeleteArgs),
}

#[derive(Args, Debug)]
struct IdArgs {
    /// Backend identifier of the job posting
    id: String,
}

#[derive(Args, Debug)]
struct DeleteArgs {
    /// Backend identifier of the job posting
    id: String,
    /// Confirm the deletion
    #[arg(long)]
    yes: bool,
    /// Listing page to show after the deletion
    #[arg(long, default_value_t = 1)]
    page: u32,
}

pub(crate) async fn run() -> Result<(), AppError> {
    let Cli { api_url, command } = Cli::parse();

    match command {
        Command::Validate(args) => commands::validate_file(&args),
        Command::Feeds => commands::feeds(&connect(api_url)?).await,
        Command::Jobs { command } => {
            let context = connect(api_url)?;
            match command {
                JobsCommand::List(args) => commands::list(&context, args).await,
                JobsCommand::Show(args) => commands::show(&context, &JobId(args.id)).await,
                JobsCommand::Create(args) => commands::create(&context, &args).await,
                JobsCommand::Edit(args) => commands::edit(&context, args).await,
                JobsCommand::Delete(args) => {
                    commands::delete(&context, &JobId(args.id), args.yes, args.page).await
                }
            }
        }
    }
}

fn connect(api_url: Option<String>) -> Result<AdminContext, AppError> {
    let mut config = AppConfig::load()?;
    if let Some(api_url) = api_url {
        config.api.base_url = ApiConfig::parse_base_url(&api_url)?;
    }

    telemetry::init(&config.telemetry)?;
    AdminContext::connect(&config)
}
