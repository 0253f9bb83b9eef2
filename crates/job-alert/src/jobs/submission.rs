use std::sync::Arc;

use chrono::Utc;
use tracing::{error, info, warn};

use super::domain::{JobId, JobPosting};
use super::form::JobForm;
use super::validation::ValidationErrors;
use crate::api::JobsBackend;
use crate::notify::{Notification, Notifier};

pub const FIX_ERRORS_MESSAGE: &str = "Please fix the errors in the form";
pub const SAVE_FAILED_MESSAGE: &str = "Failed to save job. Please try again.";
pub const LOAD_FAILED_MESSAGE: &str = "Failed to load job";

/// Result of one submit attempt. Backend failures are reported here rather
/// than returned as errors.
#[derive(Debug, Clone, PartialEq)]
pub enum SubmitOutcome {
    /// Validation failed; no request was sent.
    Invalid(ValidationErrors),
    /// The backend accepted the draft. The saved record is present when the
    /// response body could be decoded.
    Saved {
        id: Option<JobId>,
        record: Option<JobPosting>,
    },
    /// The request failed; the draft is unchanged and may be resubmitted.
    Failed { message: String },
}

impl SubmitOutcome {
    pub fn is_saved(&self) -> bool {
        matches!(self, SubmitOutcome::Saved { .. })
    }
}

/// Runs validate, transform, dispatch, and notify for job forms.
pub struct SubmissionCoordinator<B, N> {
    backend: Arc<B>,
    notifier: Arc<N>,
}

impl<B, N> SubmissionCoordinator<B, N>
where
    B: JobsBackend + 'static,
    N: Notifier + 'static,
{
    pub fn new(backend: Arc<B>, notifier: Arc<N>) -> Self {
        Self { backend, notifier }
    }

    /// Loads a stored record into an editing session.
    ///
    /// Any failure, including a missing record, ends the view: the user is
    /// notified and `on_failure` runs (typically a redirect to the listing).
    pub async fn open(&self, id: &JobId, on_failure: impl FnOnce()) -> Option<JobForm> {
        match self.backend.get_job(id).await {
            Ok(mut posting) => {
                if posting.id.is_none() {
                    posting.id = Some(id.clone());
                }
                Some(JobForm::edit(&posting))
            }
            Err(err) => {
                if err.is_not_found() {
                    warn!(job_id = %id, "job not found");
                } else {
                    error!(job_id = %id, error = %err, "failed to load job");
                }
                self.notifier.notify(Notification::error(LOAD_FAILED_MESSAGE));
                on_failure();
                None
            }
        }
    }

    /// Submits the form: one create (new) or update (existing) request.
    ///
    /// `on_success` runs exactly once after the backend accepts the draft.
    pub async fn submit(&self, form: &mut JobForm, on_success: impl FnOnce()) -> SubmitOutcome {
        if !form.validate_at(Utc::now()) {
            self.notifier.notify(Notification::error(FIX_ERRORS_MESSAGE));
            return SubmitOutcome::Invalid(form.errors().clone());
        }

        let payload = match form.draft.to_payload() {
            Ok(payload) => payload,
            Err(err) => {
                error!(error = %err, "draft could not be converted for submission");
                self.notifier.notify(Notification::error(SAVE_FAILED_MESSAGE));
                return SubmitOutcome::Failed {
                    message: SAVE_FAILED_MESSAGE.to_string(),
                };
            }
        };

        form.set_submitting(true);
        let record_id = form.record_id().cloned();
        let result = match &record_id {
            Some(id) => self.backend.update_job(id, &payload).await,
            None => self.backend.create_job(&payload).await,
        };
        form.set_submitting(false);

        match result {
            Ok(record) => {
                let id = record_id.or_else(|| record.as_ref().and_then(|saved| saved.id.clone()));
                let message = if form.is_edit() {
                    "Job updated successfully"
                } else {
                    "Job created successfully"
                };
                info!(job_id = ?id.as_ref().map(|id| id.0.as_str()), slug = %payload.slug, "{message}");
                self.notifier.notify(Notification::success(message));
                on_success();
                SubmitOutcome::Saved { id, record }
            }
            Err(err) => {
                error!(error = %err, slug = %payload.slug, "failed to save job");
                let message = err.user_message(SAVE_FAILED_MESSAGE);
                self.notifier.notify(Notification::error(message.clone()));
                SubmitOutcome::Failed { message }
            }
        }
    }
}
