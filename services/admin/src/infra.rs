use chrono::{DateTime, Local, Utc};
use job_alert::api::HttpJobsBackend;
use job_alert::config::AppConfig;
use job_alert::error::AppError;
use job_alert::jobs::{JobDraft, ListingController, PageLink, ValidationErrors};
use job_alert::notify::{Notification, Notifier, TracingNotifier};
use std::path::Path;
use std::sync::Arc;

pub(crate) type AdminListing = ListingController<HttpJobsBackend, ConsoleNotifier>;

/// Shared handles for every backend-facing command.
pub(crate) struct AdminContext {
    pub(crate) backend: Arc<HttpJobsBackend>,
    pub(crate) notifier: Arc<ConsoleNotifier>,
}

impl AdminContext {
    pub(crate) fn connect(config: &AppConfig) -> Result<Self, AppError> {
        let backend = HttpJobsBackend::new(&config.api)?;
        Ok(Self {
            backend: Arc::new(backend),
            notifier: Arc::new(ConsoleNotifier::default()),
        })
    }

    pub(crate) fn listing(&self, page: u32, search: &str) -> AdminListing {
        ListingController::with_query(self.backend.clone(), self.notifier.clone(), page, search)
    }
}

/// Prints notifications to the terminal and forwards them to the log.
#[derive(Debug, Default, Clone, Copy)]
pub(crate) struct ConsoleNotifier {
    log: TracingNotifier,
}

impl Notifier for ConsoleNotifier {
    fn notify(&self, notification: Notification) {
        println!("[{}] {}", notification.level.label(), notification.message);
        self.log.notify(notification);
    }
}

pub(crate) fn load_draft(path: &Path) -> Result<JobDraft, AppError> {
    let raw = std::fs::read_to_string(path)?;
    Ok(serde_json::from_str(&raw)?)
}

/// Parses a `field=value` pair for `--set`. The value may be empty.
pub(crate) fn parse_assignment(raw: &str) -> Result<(String, String), String> {
    let (field, value) = raw
        .split_once('=')
        .ok_or_else(|| format!("expected FIELD=VALUE, got '{raw}'"))?;
    let field = field.trim();
    if field.is_empty() {
        return Err(format!("missing field name in '{raw}'"));
    }
    Ok((field.to_string(), value.to_string()))
}

pub(crate) fn format_date(value: Option<DateTime<Utc>>) -> String {
    value
        .map(|instant| instant.with_timezone(&Local).format("%d %b %Y").to_string())
        .unwrap_or_else(|| "-".to_string())
}

pub(crate) fn render_pagination(links: &[PageLink]) -> String {
    links
        .iter()
        .map(|link| match link {
            PageLink::Page {
                number,
                current: true,
            } => format!("[{number}]"),
            PageLink::Page { number, .. } => number.to_string(),
            PageLink::Ellipsis => "...".to_string(),
        })
        .collect::<Vec<_>>()
        .join(" ")
}

pub(crate) fn render_errors(errors: &ValidationErrors) -> Vec<String> {
    errors
        .iter()
        .map(|(field, message)| format!("  {field}: {message}"))
        .collect()
}

fn clip(value: &str, width: usize) -> String {
    if value.chars().count() <= width {
        return value.to_string();
    }
    let mut clipped: String = value.chars().take(width.saturating_sub(3)).collect();
    clipped.push_str("...");
    clipped
}

pub(crate) fn print_listing(listing: &AdminListing) {
    if listing.items().is_empty() {
        println!("No jobs found");
    } else {
        println!(
            "{:<26} {:<36} {:<28} {:<16} {:<12} {}",
            "ID", "TITLE", "ORGANIZATION", "LOCATION", "LAST DATE", "STATUS"
        );
        for job in listing.items() {
            println!(
                "{:<26} {:<36} {:<28} {:<16} {:<12} {}",
                clip(&job.id.0, 26),
                clip(&job.title, 36),
                clip(&job.organization, 28),
                clip(&job.location, 16),
                format_date(job.last_date),
                job.status_label()
            );
        }
    }

    if listing.shows_pagination() {
        let previous = if listing.has_previous() { "<" } else { " " };
        let next = if listing.has_next() { ">" } else { " " };
        println!(
            "\n{previous} {} {next}",
            render_pagination(&listing.pagination())
        );
    }

    let range = listing.display_range();
    println!(
        "Showing {} to {} of {} jobs",
        range.first, range.last, range.total
    );
}
