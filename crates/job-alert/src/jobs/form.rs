use chrono::{DateTime, Utc};

use super::domain::{JobId, JobPosting};
use super::draft::{DraftError, JobDraft, JobField};
use super::validation::{validate, ValidationErrors};

/// One editing session over a draft: a new posting, or an existing record.
///
/// `errors` holds the result of the most recent validation; field updates
/// leave it untouched until the next validation run.
#[derive(Debug, Clone, Default)]
pub struct JobForm {
    pub draft: JobDraft,
    record_id: Option<JobId>,
    errors: ValidationErrors,
    submitting: bool,
}

impl JobForm {
    pub fn create() -> Self {
        Self::default()
    }

    pub fn with_draft(draft: JobDraft) -> Self {
        Self {
            draft,
            ..Self::default()
        }
    }

    /// Session over a stored record. Postings without an id open as new drafts.
    pub fn edit(posting: &JobPosting) -> Self {
        Self {
            draft: JobDraft::from_posting(posting),
            record_id: posting.id.clone(),
            ..Self::default()
        }
    }

    pub fn record_id(&self) -> Option<&JobId> {
        self.record_id.as_ref()
    }

    pub fn is_edit(&self) -> bool {
        self.record_id.is_some()
    }

    pub fn errors(&self) -> &ValidationErrors {
        &self.errors
    }

    pub fn is_submitting(&self) -> bool {
        self.submitting
    }

    pub fn set(&mut self, field: JobField, value: &str) -> Result<(), DraftError> {
        self.draft.set(field, value)
    }

    /// Validates at `now`, stores the result, and reports whether the draft
    /// may be submitted.
    pub fn validate_at(&mut self, now: DateTime<Utc>) -> bool {
        self.errors = validate(&self.draft, now);
        self.errors.is_valid()
    }

    pub(crate) fn set_submitting(&mut self, submitting: bool) {
        self.submitting = submitting;
    }

    /// Label for the submit action.
    pub fn submit_label(&self) -> &'static str {
        match (self.submitting, self.is_edit()) {
            (true, _) => "Saving...",
            (false, true) => "Update Job",
            (false, false) => "Create Job",
        }
    }
}
