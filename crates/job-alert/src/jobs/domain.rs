use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};

/// Backend identifier for a stored job posting.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct JobId(pub String);

impl fmt::Display for JobId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Minimum qualification advertised on a posting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum QualificationLevel {
    HighSchool,
    #[default]
    Bachelors,
    Masters,
    Phd,
    Other,
}

impl QualificationLevel {
    pub const ALL: [QualificationLevel; 5] = [
        QualificationLevel::HighSchool,
        QualificationLevel::Bachelors,
        QualificationLevel::Masters,
        QualificationLevel::Phd,
        QualificationLevel::Other,
    ];

    pub const fn code(self) -> &'static str {
        match self {
            QualificationLevel::HighSchool => "HIGH_SCHOOL",
            QualificationLevel::Bachelors => "BACHELORS",
            QualificationLevel::Masters => "MASTERS",
            QualificationLevel::Phd => "PHD",
            QualificationLevel::Other => "OTHER",
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            QualificationLevel::HighSchool => "HIGH SCHOOL",
            QualificationLevel::Bachelors => "BACHELORS",
            QualificationLevel::Masters => "MASTERS",
            QualificationLevel::Phd => "PHD",
            QualificationLevel::Other => "OTHER",
        }
    }
}

impl FromStr for QualificationLevel {
    type Err = ();

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let normalised = value.trim().to_ascii_uppercase().replace(' ', "_");
        Self::ALL
            .into_iter()
            .find(|level| level.code() == normalised)
            .ok_or(())
    }
}

/// Seniority band advertised on a posting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ExperienceLevel {
    #[default]
    Entry,
    Mid,
    Senior,
    Executive,
}

impl ExperienceLevel {
    pub const ALL: [ExperienceLevel; 4] = [
        ExperienceLevel::Entry,
        ExperienceLevel::Mid,
        ExperienceLevel::Senior,
        ExperienceLevel::Executive,
    ];

    pub const fn code(self) -> &'static str {
        match self {
            ExperienceLevel::Entry => "ENTRY",
            ExperienceLevel::Mid => "MID",
            ExperienceLevel::Senior => "SENIOR",
            ExperienceLevel::Executive => "EXECUTIVE",
        }
    }
}

impl FromStr for ExperienceLevel {
    type Err = ();

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let normalised = value.trim().to_ascii_uppercase();
        Self::ALL
            .into_iter()
            .find(|level| level.code() == normalised)
            .ok_or(())
    }
}

/// Labelled milestone (exam date, fee deadline, ...) on a stored posting.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImportantDate {
    #[serde(default)]
    pub label: String,
    pub date: DateTime<Utc>,
}

/// Job posting as stored by the backend.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct JobPosting {
    #[serde(rename = "_id", alias = "id", skip_serializing_if = "Option::is_none")]
    pub id: Option<JobId>,
    pub title: String,
    pub slug: String,
    pub html_content: String,
    pub organization: String,
    pub location: String,
    pub salary: String,
    pub qualification: QualificationLevel,
    pub experience: ExperienceLevel,
    pub last_date: Option<DateTime<Utc>>,
    pub apply_link: String,
    pub description: String,
    pub eligibility: String,
    #[serde(deserialize_with = "string_or_number")]
    pub total_vacancy: String,
    pub age_limit: Option<String>,
    pub tags: Vec<String>,
    pub important_dates: Vec<ImportantDate>,
    pub meta_title: Option<String>,
    pub meta_description: Option<String>,
    pub source_url: Option<String>,
    pub is_active: Option<bool>,
    pub created_at: Option<DateTime<Utc>>,
}

/// Body sent on create and update: the draft with canonical timestamps.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JobPayload {
    pub title: String,
    pub slug: String,
    pub html_content: String,
    pub organization: String,
    pub location: String,
    pub salary: String,
    pub qualification: QualificationLevel,
    pub experience: ExperienceLevel,
    pub last_date: DateTime<Utc>,
    pub apply_link: String,
    pub description: String,
    pub eligibility: String,
    pub total_vacancy: String,
    pub age_limit: String,
    pub tags: Vec<String>,
    pub important_dates: Vec<ImportantDate>,
    pub meta_title: String,
    pub meta_description: String,
    pub source_url: String,
}

/// Row of the admin listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JobSummary {
    #[serde(rename = "_id", alias = "id")]
    pub id: JobId,
    pub title: String,
    #[serde(default)]
    pub organization: String,
    #[serde(default)]
    pub location: String,
    #[serde(default)]
    pub last_date: Option<DateTime<Utc>>,
    #[serde(default = "default_active")]
    pub is_active: bool,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

impl JobSummary {
    pub const fn status_label(&self) -> &'static str {
        if self.is_active {
            "Active"
        } else {
            "Inactive"
        }
    }
}

fn default_active() -> bool {
    true
}

/// One page of listing results plus the backend's total match count.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct JobPage {
    pub jobs: Vec<JobSummary>,
    pub total: u64,
}

/// Query for one page of the admin listing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListQuery {
    pub page: u32,
    pub limit: u32,
    pub search: Option<String>,
}

fn string_or_number<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Text(String),
        Number(serde_json::Number),
        Missing(()),
    }

    Ok(match Raw::deserialize(deserializer)? {
        Raw::Text(text) => text,
        Raw::Number(number) => number.to_string(),
        Raw::Missing(()) => String::new(),
    })
}
