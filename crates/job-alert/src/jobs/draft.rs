use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Local, NaiveDateTime, TimeZone, Utc};
use serde::{Deserialize, Serialize};

use super::domain::{
    ExperienceLevel, ImportantDate, JobPayload, JobPosting, QualificationLevel,
};

/// Format produced by a `datetime-local` input, in the local time zone.
pub const LOCAL_INPUT_FORMAT: &str = "%Y-%m-%dT%H:%M";
const LOCAL_INPUT_FORMAT_WITH_SECONDS: &str = "%Y-%m-%dT%H:%M:%S";

/// Settable scalar fields of a job posting draft.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum JobField {
    Title,
    Slug,
    HtmlContent,
    Organization,
    Location,
    Salary,
    Qualification,
    Experience,
    LastDate,
    ApplyLink,
    Description,
    Eligibility,
    TotalVacancy,
    AgeLimit,
    Tags,
    MetaTitle,
    MetaDescription,
    SourceUrl,
}

impl JobField {
    pub const ALL: [JobField; 18] = [
        JobField::Title,
        JobField::Slug,
        JobField::HtmlContent,
        JobField::Organization,
        JobField::Location,
        JobField::Salary,
        JobField::Qualification,
        JobField::Experience,
        JobField::LastDate,
        JobField::ApplyLink,
        JobField::Description,
        JobField::Eligibility,
        JobField::TotalVacancy,
        JobField::AgeLimit,
        JobField::Tags,
        JobField::MetaTitle,
        JobField::MetaDescription,
        JobField::SourceUrl,
    ];

    /// Wire name used by the backend and in draft files.
    pub const fn name(self) -> &'static str {
        match self {
            JobField::Title => "title",
            JobField::Slug => "slug",
            JobField::HtmlContent => "htmlContent",
            JobField::Organization => "organization",
            JobField::Location => "location",
            JobField::Salary => "salary",
            JobField::Qualification => "qualification",
            JobField::Experience => "experience",
            JobField::LastDate => "lastDate",
            JobField::ApplyLink => "applyLink",
            JobField::Description => "description",
            JobField::Eligibility => "eligibility",
            JobField::TotalVacancy => "totalVacancy",
            JobField::AgeLimit => "ageLimit",
            JobField::Tags => "tags",
            JobField::MetaTitle => "metaTitle",
            JobField::MetaDescription => "metaDescription",
            JobField::SourceUrl => "sourceUrl",
        }
    }
}

impl fmt::Display for JobField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for JobField {
    type Err = DraftError;

    /// Accepts the wire name (`htmlContent`) or its snake_case form (`html_content`).
    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let wanted: String = value
            .trim()
            .chars()
            .filter(|c| *c != '_' && *c != '-')
            .collect::<String>()
            .to_ascii_lowercase();

        Self::ALL
            .into_iter()
            .find(|field| field.name().to_ascii_lowercase() == wanted)
            .ok_or_else(|| DraftError::UnknownField(value.to_string()))
    }
}

/// Sub-fields of an important date row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ImportantDateField {
    Label,
    Date,
}

impl ImportantDateField {
    pub const fn name(self) -> &'static str {
        match self {
            ImportantDateField::Label => "label",
            ImportantDateField::Date => "date",
        }
    }
}

/// Important date row as typed into the form.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ImportantDateDraft {
    pub label: String,
    pub date: String,
}

/// In-progress job posting, every value kept as the user entered it.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct JobDraft {
    pub title: String,
    pub slug: String,
    pub html_content: String,
    pub organization: String,
    pub location: String,
    pub salary: String,
    pub qualification: QualificationLevel,
    pub experience: ExperienceLevel,
    pub last_date: String,
    pub apply_link: String,
    pub description: String,
    pub eligibility: String,
    pub total_vacancy: String,
    pub age_limit: String,
    pub tags: Vec<String>,
    pub important_dates: Vec<ImportantDateDraft>,
    pub meta_title: String,
    pub meta_description: String,
    pub source_url: String,
}

impl JobDraft {
    /// Pre-populates a draft from a stored posting for editing.
    pub fn from_posting(posting: &JobPosting) -> Self {
        Self {
            title: posting.title.clone(),
            slug: posting.slug.clone(),
            html_content: posting.html_content.clone(),
            organization: posting.organization.clone(),
            location: posting.location.clone(),
            salary: posting.salary.clone(),
            qualification: posting.qualification,
            experience: posting.experience,
            last_date: posting
                .last_date
                .map(format_for_input)
                .unwrap_or_default(),
            apply_link: posting.apply_link.clone(),
            description: posting.description.clone(),
            eligibility: posting.eligibility.clone(),
            total_vacancy: posting.total_vacancy.clone(),
            age_limit: posting.age_limit.clone().unwrap_or_default(),
            tags: posting.tags.clone(),
            important_dates: posting
                .important_dates
                .iter()
                .map(|date| ImportantDateDraft {
                    label: date.label.clone(),
                    date: format_for_input(date.date),
                })
                .collect(),
            meta_title: posting.meta_title.clone().unwrap_or_default(),
            meta_description: posting.meta_description.clone().unwrap_or_default(),
            source_url: posting.source_url.clone().unwrap_or_default(),
        }
    }

    /// Single entry point for field updates.
    pub fn set(&mut self, field: JobField, value: &str) -> Result<(), DraftError> {
        let value_owned = value.to_string();
        match field {
            JobField::Title => self.title = value_owned,
            JobField::Slug => self.slug = value_owned,
            JobField::HtmlContent => self.html_content = value_owned,
            JobField::Organization => self.organization = value_owned,
            JobField::Location => self.location = value_owned,
            JobField::Salary => self.salary = value_owned,
            JobField::Qualification => {
                self.qualification = value
                    .parse()
                    .map_err(|_| DraftError::UnknownQualification(value_owned))?;
            }
            JobField::Experience => {
                self.experience = value
                    .parse()
                    .map_err(|_| DraftError::UnknownExperience(value_owned))?;
            }
            JobField::LastDate => self.last_date = value_owned,
            JobField::ApplyLink => self.apply_link = value_owned,
            JobField::Description => self.description = value_owned,
            JobField::Eligibility => self.eligibility = value_owned,
            JobField::TotalVacancy => self.total_vacancy = value_owned,
            JobField::AgeLimit => self.age_limit = value_owned,
            JobField::Tags => self.tags = parse_tags(value),
            JobField::MetaTitle => self.meta_title = value_owned,
            JobField::MetaDescription => self.meta_description = value_owned,
            JobField::SourceUrl => self.source_url = value_owned,
        }
        Ok(())
    }

    pub fn set_field_named(&mut self, name: &str, value: &str) -> Result<(), DraftError> {
        let field: JobField = name.parse()?;
        self.set(field, value)
    }

    /// Current value rendered as the form would show it.
    pub fn get(&self, field: JobField) -> String {
        match field {
            JobField::Title => self.title.clone(),
            JobField::Slug => self.slug.clone(),
            JobField::HtmlContent => self.html_content.clone(),
            JobField::Organization => self.organization.clone(),
            JobField::Location => self.location.clone(),
            JobField::Salary => self.salary.clone(),
            JobField::Qualification => self.qualification.code().to_string(),
            JobField::Experience => self.experience.code().to_string(),
            JobField::LastDate => self.last_date.clone(),
            JobField::ApplyLink => self.apply_link.clone(),
            JobField::Description => self.description.clone(),
            JobField::Eligibility => self.eligibility.clone(),
            JobField::TotalVacancy => self.total_vacancy.clone(),
            JobField::AgeLimit => self.age_limit.clone(),
            JobField::Tags => self.tags.join(", "),
            JobField::MetaTitle => self.meta_title.clone(),
            JobField::MetaDescription => self.meta_description.clone(),
            JobField::SourceUrl => self.source_url.clone(),
        }
    }

    pub fn add_important_date(&mut self) -> usize {
        self.important_dates.push(ImportantDateDraft::default());
        self.important_dates.len() - 1
    }

    pub fn remove_important_date(&mut self, index: usize) -> Result<ImportantDateDraft, DraftError> {
        if index >= self.important_dates.len() {
            return Err(DraftError::ImportantDateOutOfRange {
                index,
                len: self.important_dates.len(),
            });
        }
        Ok(self.important_dates.remove(index))
    }

    pub fn set_important_date(
        &mut self,
        index: usize,
        field: ImportantDateField,
        value: &str,
    ) -> Result<(), DraftError> {
        let len = self.important_dates.len();
        let row = self
            .important_dates
            .get_mut(index)
            .ok_or(DraftError::ImportantDateOutOfRange { index, len })?;
        match field {
            ImportantDateField::Label => row.label = value.to_string(),
            ImportantDateField::Date => row.date = value.to_string(),
        }
        Ok(())
    }

    /// Converts the draft into the wire body, moving every local-input date
    /// to its canonical UTC instant.
    pub fn to_payload(&self) -> Result<JobPayload, DraftError> {
        let last_date = parse_local_input(&self.last_date).ok_or_else(|| DraftError::InvalidDate {
            field: JobField::LastDate.name().to_string(),
            value: self.last_date.clone(),
        })?;

        let important_dates = self
            .important_dates
            .iter()
            .enumerate()
            .map(|(index, row)| {
                parse_local_input(&row.date)
                    .map(|date| ImportantDate {
                        label: row.label.clone(),
                        date,
                    })
                    .ok_or_else(|| DraftError::InvalidDate {
                        field: format!("importantDates[{index}].date"),
                        value: row.date.clone(),
                    })
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(JobPayload {
            title: self.title.clone(),
            slug: self.slug.clone(),
            html_content: self.html_content.clone(),
            organization: self.organization.clone(),
            location: self.location.clone(),
            salary: self.salary.clone(),
            qualification: self.qualification,
            experience: self.experience,
            last_date,
            apply_link: self.apply_link.clone(),
            description: self.description.clone(),
            eligibility: self.eligibility.clone(),
            total_vacancy: self.total_vacancy.clone(),
            age_limit: self.age_limit.clone(),
            tags: self.tags.clone(),
            important_dates,
            meta_title: self.meta_title.clone(),
            meta_description: self.meta_description.clone(),
            source_url: self.source_url.clone(),
        })
    }
}

/// Splits comma-separated tag input, trimming and dropping empty entries.
pub fn parse_tags(input: &str) -> Vec<String> {
    input
        .split(',')
        .map(str::trim)
        .filter(|tag| !tag.is_empty())
        .map(str::to_string)
        .collect()
}

/// Parses a local-input date (`YYYY-MM-DDTHH:MM[:SS]` in local time) or an
/// RFC 3339 timestamp. Local times skipped by a DST transition yield `None`.
pub fn parse_local_input(raw: &str) -> Option<DateTime<Utc>> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }

    if let Ok(parsed) = DateTime::parse_from_rfc3339(trimmed) {
        return Some(parsed.with_timezone(&Utc));
    }

    let naive = NaiveDateTime::parse_from_str(trimmed, LOCAL_INPUT_FORMAT)
        .or_else(|_| NaiveDateTime::parse_from_str(trimmed, LOCAL_INPUT_FORMAT_WITH_SECONDS))
        .ok()?;

    Local
        .from_local_datetime(&naive)
        .earliest()
        .map(|local| local.with_timezone(&Utc))
}

/// Formats an absolute instant for a `datetime-local` input.
pub fn format_for_input(instant: DateTime<Utc>) -> String {
    instant
        .with_timezone(&Local)
        .format(LOCAL_INPUT_FORMAT)
        .to_string()
}

#[derive(Debug, thiserror::Error)]
pub enum DraftError {
    #[error("unknown job field '{0}'")]
    UnknownField(String),
    #[error("unknown qualification '{0}' (expected HIGH_SCHOOL, BACHELORS, MASTERS, PHD or OTHER)")]
    UnknownQualification(String),
    #[error("unknown experience level '{0}' (expected ENTRY, MID, SENIOR or EXECUTIVE)")]
    UnknownExperience(String),
    #[error("important date {index} does not exist (draft has {len})")]
    ImportantDateOutOfRange { index: usize, len: usize },
    #[error("{field} '{value}' is not a valid date and time")]
    InvalidDate { field: String, value: String },
}
