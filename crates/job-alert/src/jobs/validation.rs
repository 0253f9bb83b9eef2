use std::collections::BTreeMap;
use std::fmt;

use chrono::{DateTime, Utc};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Serialize, Serializer};

use super::draft::{parse_local_input, ImportantDateField, JobDraft, JobField};

const MIN_HTML_CONTENT_CHARS: usize = 100;
const MIN_DESCRIPTION_CHARS: usize = 100;
const MIN_ELIGIBILITY_CHARS: usize = 50;

static SLUG_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[a-z0-9]+(?:-[a-z0-9]+)*$").expect("slug pattern compiles"));
static SALARY_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[0-9]+(\.[0-9]+)?\s*[A-Z]{3}$").expect("salary pattern compiles")
});
static URL_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^https?://.+").expect("url pattern compiles"));
static DIGITS_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[0-9]+$").expect("digits pattern compiles"));
static AGE_LIMIT_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[0-9]+-[0-9]+$").expect("age limit pattern compiles"));

/// Location of a validation message inside a draft.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum FieldKey {
    Field(JobField),
    ImportantDate {
        index: usize,
        field: ImportantDateField,
    },
}

impl fmt::Display for FieldKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldKey::Field(field) => f.write_str(field.name()),
            FieldKey::ImportantDate { index, field } => {
                write!(f, "importantDates[{}].{}", index, field.name())
            }
        }
    }
}

impl Serialize for FieldKey {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl From<JobField> for FieldKey {
    fn from(field: JobField) -> Self {
        FieldKey::Field(field)
    }
}

/// Field-level error map. A missing key means the field is valid.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
#[serde(transparent)]
pub struct ValidationErrors {
    entries: BTreeMap<FieldKey, String>,
}

impl ValidationErrors {
    pub fn is_valid(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, key: impl Into<FieldKey>) -> Option<&str> {
        self.entries.get(&key.into()).map(String::as_str)
    }

    pub fn important_date(&self, index: usize, field: ImportantDateField) -> Option<&str> {
        self.get(FieldKey::ImportantDate { index, field })
    }

    pub fn contains(&self, key: impl Into<FieldKey>) -> bool {
        self.entries.contains_key(&key.into())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&FieldKey, &str)> {
        self.entries.iter().map(|(key, message)| (key, message.as_str()))
    }

    fn insert(&mut self, key: impl Into<FieldKey>, message: &str) {
        self.entries.insert(key.into(), message.to_string());
    }
}

/// Checks every rule against `draft`, treating `now` as the present instant.
///
/// Rules are independent; every violation is reported.
pub fn validate(draft: &JobDraft, now: DateTime<Utc>) -> ValidationErrors {
    let mut errors = ValidationErrors::default();

    if draft.title.is_empty() {
        errors.insert(JobField::Title, "Title is required");
    }

    if draft.slug.is_empty() {
        errors.insert(JobField::Slug, "Slug is required");
    } else if !SLUG_PATTERN.is_match(&draft.slug) {
        errors.insert(
            JobField::Slug,
            "Slug must be URL-friendly (lowercase letters, numbers, and hyphens)",
        );
    }

    if draft.html_content.chars().count() < MIN_HTML_CONTENT_CHARS {
        errors.insert(
            JobField::HtmlContent,
            "Content must be at least 100 characters",
        );
    }

    if draft.organization.is_empty() {
        errors.insert(JobField::Organization, "Organization is required");
    }

    if draft.location.is_empty() {
        errors.insert(JobField::Location, "Location is required");
    }

    if draft.salary.is_empty() {
        errors.insert(JobField::Salary, "Salary is required");
    } else if !SALARY_PATTERN.is_match(&draft.salary) {
        errors.insert(
            JobField::Salary,
            "Salary must be a number followed by currency code (e.g., \"50000 USD\")",
        );
    }

    if let Some(message) = future_date_error(&draft.last_date, now, DateSubject::LastDate) {
        errors.insert(JobField::LastDate, message);
    }

    if draft.apply_link.is_empty() {
        errors.insert(JobField::ApplyLink, "Apply link is required");
    } else if !URL_PATTERN.is_match(&draft.apply_link) {
        errors.insert(JobField::ApplyLink, "Must be a valid URL");
    }

    if draft.description.chars().count() < MIN_DESCRIPTION_CHARS {
        errors.insert(
            JobField::Description,
            "Description must be at least 100 characters",
        );
    }

    if draft.eligibility.chars().count() < MIN_ELIGIBILITY_CHARS {
        errors.insert(
            JobField::Eligibility,
            "Eligibility must be at least 50 characters",
        );
    }

    if draft.total_vacancy.is_empty() {
        errors.insert(JobField::TotalVacancy, "Total vacancy is required");
    } else if !DIGITS_PATTERN.is_match(&draft.total_vacancy) {
        errors.insert(JobField::TotalVacancy, "Total vacancy must be a number");
    }

    if !draft.age_limit.is_empty() && !AGE_LIMIT_PATTERN.is_match(&draft.age_limit) {
        errors.insert(
            JobField::AgeLimit,
            "Age limit must be in format \"min-max\" (e.g., \"18-35\")",
        );
    }

    if !draft.source_url.is_empty() && !URL_PATTERN.is_match(&draft.source_url) {
        errors.insert(JobField::SourceUrl, "Must be a valid URL");
    }

    for (index, row) in draft.important_dates.iter().enumerate() {
        if row.label.is_empty() {
            errors.insert(
                FieldKey::ImportantDate {
                    index,
                    field: ImportantDateField::Label,
                },
                "Label is required",
            );
        }
        if let Some(message) = future_date_error(&row.date, now, DateSubject::ImportantDate) {
            errors.insert(
                FieldKey::ImportantDate {
                    index,
                    field: ImportantDateField::Date,
                },
                message,
            );
        }
    }

    errors
}

/// Messages for the two kinds of date input a draft carries.
#[derive(Clone, Copy)]
enum DateSubject {
    LastDate,
    ImportantDate,
}

impl DateSubject {
    const fn required(self) -> &'static str {
        match self {
            DateSubject::LastDate => "Last date is required",
            DateSubject::ImportantDate => "Date is required",
        }
    }

    const fn unparseable(self) -> &'static str {
        match self {
            DateSubject::LastDate => "Last date must be a valid date and time",
            DateSubject::ImportantDate => "Date must be a valid date and time",
        }
    }

    const fn not_future(self) -> &'static str {
        match self {
            DateSubject::LastDate => "Last date must be in the future",
            DateSubject::ImportantDate => "Date must be in the future",
        }
    }
}

fn future_date_error(raw: &str, now: DateTime<Utc>, subject: DateSubject) -> Option<&'static str> {
    if raw.is_empty() {
        return Some(subject.required());
    }

    match parse_local_input(raw) {
        None => Some(subject.unparseable()),
        Some(instant) if instant <= now => Some(subject.not_future()),
        Some(_) => None,
    }
}
