//! Job posting administration: drafts, validation, submission, and the
//! paginated admin listing.

pub mod domain;
pub mod draft;
pub mod form;
pub mod listing;
pub mod submission;
pub mod validation;

#[cfg(test)]
mod tests;

pub use domain::{
    ExperienceLevel, ImportantDate, JobId, JobPage, JobPayload, JobPosting, JobSummary, ListQuery,
    QualificationLevel,
};
pub use draft::{DraftError, ImportantDateDraft, ImportantDateField, JobDraft, JobField};
pub use form::JobForm;
pub use listing::{DisplayRange, ListingController, PageLink, PAGE_SIZE};
pub use submission::{SubmissionCoordinator, SubmitOutcome};
pub use validation::{validate, FieldKey, ValidationErrors};
