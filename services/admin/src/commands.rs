use crate::infra::{self, AdminContext, ConsoleNotifier};
use chrono::Utc;
use clap::Args;
use job_alert::api::{FeedKind, HttpJobsBackend, JobsBackend};
use job_alert::error::AppError;
use job_alert::feeds::HomeFeeds;
use job_alert::jobs::submission::{FIX_ERRORS_MESSAGE, LOAD_FAILED_MESSAGE};
use job_alert::jobs::{validate, JobField, JobForm, JobId, SubmissionCoordinator, SubmitOutcome};
use std::path::PathBuf;
use tracing::{info, warn};

#[derive(Args, Debug)]
pub(crate) struct ListArgs {
    /// Page to show (1-based)
    #[arg(long, default_value_t = 1)]
    pub(crate) page: u32,
    /// Case-insensitive search term sent to the backend
    #[arg(long, default_value = "")]
    pub(crate) search: String,
}

#[derive(Args, Debug)]
pub(crate) struct FileArgs {
    /// JSON draft file using the camelCase field names of the admin form
    #[arg(long)]
    pub(crate) file: PathBuf,
}

#[derive(Args, Debug)]
pub(crate) struct EditArgs {
    /// Backend identifier of the job posting
    pub(crate) id: String,
    /// Replace the loaded draft with the contents of a JSON draft file
    #[arg(long)]
    pub(crate) file: Option<PathBuf>,
    /// Set a single field, e.g. `--set location=Prayagraj` (repeatable)
    #[arg(long = "set", value_parser = infra::parse_assignment)]
    pub(crate) assignments: Vec<(String, String)>,
}

pub(crate) async fn list(context: &AdminContext, args: ListArgs) -> Result<(), AppError> {
    let mut listing = context.listing(args.page, &args.search);
    if !listing.refresh().await {
        return Err(AppError::Rejected("Failed to load jobs".to_string()));
    }
    infra::print_listing(&listing);
    Ok(())
}

pub(crate) async fn show(context: &AdminContext, id: &JobId) -> Result<(), AppError> {
    let posting = context.backend.as_ref().get_job(id).await?;
    println!("{}", serde_json::to_string_pretty(&posting)?);
    Ok(())
}

pub(crate) async fn create(context: &AdminContext, args: &FileArgs) -> Result<(), AppError> {
    let mut form = JobForm::with_draft(infra::load_draft(&args.file)?);
    submit(context, &mut form).await
}

pub(crate) async fn edit(context: &AdminContext, args: EditArgs) -> Result<(), AppError> {
    let EditArgs {
        id,
        file,
        assignments,
    } = args;
    let id = JobId(id);

    let coordinator = coordinator(context);
    let mut form = coordinator
        .open(&id, || warn!(job_id = %id, "edit aborted"))
        .await
        .ok_or_else(|| AppError::Rejected(LOAD_FAILED_MESSAGE.to_string()))?;

    if let Some(path) = file {
        form.draft = infra::load_draft(&path)?;
    }
    for (name, value) in assignments {
        let field: JobField = name.parse()?;
        form.set(field, &value)?;
    }

    submit(context, &mut form).await
}

pub(crate) async fn delete(
    context: &AdminContext,
    id: &JobId,
    confirmed: bool,
    page: u32,
) -> Result<(), AppError> {
    if !confirmed {
        return Err(AppError::Rejected(format!(
            "refusing to delete job {id} without --yes"
        )));
    }

    let mut listing = context.listing(page, "");
    if !listing.delete(id).await {
        return Err(AppError::Rejected("Failed to delete job".to_string()));
    }
    infra::print_listing(&listing);
    Ok(())
}

pub(crate) fn validate_file(args: &FileArgs) -> Result<(), AppError> {
    let draft = infra::load_draft(&args.file)?;
    let errors = validate(&draft, Utc::now());
    if !errors.is_valid() {
        println!("{} field(s) need attention:", errors.len());
        for line in infra::render_errors(&errors) {
            println!("{line}");
        }
        return Err(AppError::Rejected(FIX_ERRORS_MESSAGE.to_string()));
    }

    let payload = draft.to_payload()?;
    println!("Draft is valid");
    println!("{}", serde_json::to_string_pretty(&payload)?);
    Ok(())
}

pub(crate) async fn feeds(context: &AdminContext) -> Result<(), AppError> {
    let feeds = HomeFeeds::load(context.backend.as_ref()).await;
    for kind in FeedKind::ALL {
        println!("{}", kind.label());
        let entries = feeds.get(kind);
        if entries.is_empty() {
            println!("  (no entries)");
        }
        for entry in entries {
            match &entry.organization {
                Some(organization) => println!(
                    "  {}  {} ({})  {}",
                    entry.date, entry.title, organization, entry.link
                ),
                None => println!("  {}  {}  {}", entry.date, entry.title, entry.link),
            }
        }
    }
    Ok(())
}

fn coordinator(context: &AdminContext) -> SubmissionCoordinator<HttpJobsBackend, ConsoleNotifier> {
    SubmissionCoordinator::new(context.backend.clone(), context.notifier.clone())
}

async fn submit(context: &AdminContext, form: &mut JobForm) -> Result<(), AppError> {
    let mut back_to_listing = false;
    let outcome = coordinator(context)
        .submit(form, || back_to_listing = true)
        .await;

    match outcome {
        SubmitOutcome::Saved { id, .. } => {
            match id {
                Some(id) => info!(job_id = %id, "job saved"),
                None => info!("job saved"),
            }
            if back_to_listing {
                let args = ListArgs {
                    page: 1,
                    search: String::new(),
                };
                list(context, args).await?;
            }
            Ok(())
        }
        SubmitOutcome::Invalid(errors) => {
            for line in infra::render_errors(&errors) {
                println!("{line}");
            }
            Err(AppError::Rejected(FIX_ERRORS_MESSAGE.to_string()))
        }
        SubmitOutcome::Failed { message } => Err(AppError::Rejected(message)),
    }
}
