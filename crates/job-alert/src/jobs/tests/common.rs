use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;
use chrono::{Duration, Utc};

use crate::api::{ApiError, ContentSummary, ErrorBody, FeedKind, JobsBackend};
use crate::jobs::domain::{
    ExperienceLevel, ImportantDate, JobId, JobPage, JobPayload, JobPosting, JobSummary, ListQuery,
    QualificationLevel,
};
use crate::jobs::draft::{format_for_input, ImportantDateDraft, JobDraft};
use crate::notify::{Notification, NotificationLevel, Notifier};

pub(super) const HTML_CONTENT: &str = "<p>The Staff Selection Commission invites online applications for the Combined Graduate Level Examination 2030.</p>";
pub(super) const DESCRIPTION: &str = "Recruitment of Group B and Group C posts in various ministries, departments and organisations of the Government of India.";
pub(super) const ELIGIBILITY: &str = "Bachelor's degree from a recognised university on or before the closing date.";

pub(super) fn input_in(days: i64) -> String {
    format_for_input(Utc::now() + Duration::days(days))
}

pub(super) fn valid_draft() -> JobDraft {
    JobDraft {
        title: "SSC CGL 2030".to_string(),
        slug: "ssc-cgl-2030".to_string(),
        html_content: HTML_CONTENT.to_string(),
        organization: "Staff Selection Commission".to_string(),
        location: "All India".to_string(),
        salary: "44900 INR".to_string(),
        qualification: QualificationLevel::Bachelors,
        experience: ExperienceLevel::Entry,
        last_date: input_in(30),
        apply_link: "https://ssc.gov.in/apply".to_string(),
        description: DESCRIPTION.to_string(),
        eligibility: ELIGIBILITY.to_string(),
        total_vacancy: "17727".to_string(),
        age_limit: "18-32".to_string(),
        tags: vec!["ssc".to_string(), "graduate".to_string()],
        important_dates: vec![ImportantDateDraft {
            label: "Tier 1 exam".to_string(),
            date: input_in(60),
        }],
        meta_title: String::new(),
        meta_description: String::new(),
        source_url: String::new(),
    }
}

pub(super) fn stored_posting(id: &str) -> JobPosting {
    let last_date = Utc::now() + Duration::days(20);
    JobPosting {
        id: Some(JobId(id.to_string())),
        title: "RRB NTPC 2030".to_string(),
        slug: "rrb-ntpc-2030".to_string(),
        html_content: HTML_CONTENT.to_string(),
        organization: "Railway Recruitment Board".to_string(),
        location: "All India".to_string(),
        salary: "35400 INR".to_string(),
        qualification: QualificationLevel::HighSchool,
        experience: ExperienceLevel::Entry,
        last_date: Some(last_date),
        apply_link: "https://rrbapply.gov.in".to_string(),
        description: DESCRIPTION.to_string(),
        eligibility: ELIGIBILITY.to_string(),
        total_vacancy: "11558".to_string(),
        age_limit: Some("18-33".to_string()),
        tags: vec!["railway".to_string()],
        important_dates: vec![ImportantDate {
            label: "CBT 1".to_string(),
            date: last_date + Duration::days(45),
        }],
        meta_title: Some("RRB NTPC".to_string()),
        meta_description: None,
        source_url: None,
        is_active: Some(true),
        created_at: None,
    }
}

pub(super) fn summary(id: usize) -> JobSummary {
    JobSummary {
        id: JobId(format!("job-{id:03}")),
        title: format!("Posting {id}"),
        organization: "Public Service Commission".to_string(),
        location: "Delhi".to_string(),
        last_date: None,
        is_active: true,
        created_at: None,
    }
}

#[derive(Debug, Clone, PartialEq)]
pub(super) enum BackendCall {
    List(ListQuery),
    Get(JobId),
    Create(JobPayload),
    Update(JobId, JobPayload),
    Delete(JobId),
    Feed(FeedKind),
}

/// In-memory backend that records every call and can be told to fail.
#[derive(Default)]
pub(super) struct MemoryBackend {
    pub(super) rows: Mutex<Vec<JobSummary>>,
    pub(super) postings: Mutex<HashMap<JobId, JobPosting>>,
    pub(super) calls: Mutex<Vec<BackendCall>>,
    pub(super) list_failure: Mutex<Option<(u16, ErrorBody)>>,
    pub(super) save_failure: Mutex<Option<(u16, ErrorBody)>>,
    pub(super) delete_failure: Mutex<Option<(u16, ErrorBody)>>,
}

impl MemoryBackend {
    pub(super) fn with_rows(count: usize) -> Self {
        let backend = Self::default();
        *backend.rows.lock().expect("rows mutex") = (1..=count).map(summary).collect();
        backend
    }

    pub(super) fn with_posting(posting: JobPosting) -> Self {
        let backend = Self::default();
        let id = posting.id.clone().expect("stored posting has id");
        backend
            .postings
            .lock()
            .expect("postings mutex")
            .insert(id, posting);
        backend
    }

    pub(super) fn calls(&self) -> Vec<BackendCall> {
        self.calls.lock().expect("calls mutex").clone()
    }

    pub(super) fn fail_saves(&self, status: u16, body: ErrorBody) {
        *self.save_failure.lock().expect("failure mutex") = Some((status, body));
    }

    pub(super) fn fail_lists(&self, status: u16) {
        *self.list_failure.lock().expect("failure mutex") = Some((status, ErrorBody::default()));
    }

    pub(super) fn fail_deletes(&self, status: u16) {
        *self.delete_failure.lock().expect("failure mutex") = Some((status, ErrorBody::default()));
    }

    fn record(&self, call: BackendCall) {
        self.calls.lock().expect("calls mutex").push(call);
    }

    fn failure(slot: &Mutex<Option<(u16, ErrorBody)>>) -> Result<(), ApiError> {
        match slot.lock().expect("failure mutex").clone() {
            Some((status, body)) => Err(ApiError::Status { status, body }),
            None => Ok(()),
        }
    }
}

#[async_trait]
impl JobsBackend for MemoryBackend {
    async fn list_jobs(&self, query: &ListQuery) -> Result<JobPage, ApiError> {
        self.record(BackendCall::List(query.clone()));
        Self::failure(&self.list_failure)?;

        let rows = self.rows.lock().expect("rows mutex");
        let matching: Vec<JobSummary> = rows
            .iter()
            .filter(|row| match &query.search {
                Some(term) => row.title.to_lowercase().contains(&term.to_lowercase()),
                None => true,
            })
            .cloned()
            .collect();
        let skip = ((query.page.max(1) - 1) * query.limit) as usize;
        Ok(JobPage {
            total: matching.len() as u64,
            jobs: matching
                .into_iter()
                .skip(skip)
                .take(query.limit as usize)
                .collect(),
        })
    }

    async fn get_job(&self, id: &JobId) -> Result<JobPosting, ApiError> {
        self.record(BackendCall::Get(id.clone()));
        self.postings
            .lock()
            .expect("postings mutex")
            .get(id)
            .cloned()
            .ok_or(ApiError::Status {
                status: 404,
                body: ErrorBody {
                    message: Some("Job not found".to_string()),
                    error: None,
                },
            })
    }

    async fn create_job(&self, payload: &JobPayload) -> Result<Option<JobPosting>, ApiError> {
        self.record(BackendCall::Create(payload.clone()));
        Self::failure(&self.save_failure)?;
        Ok(Some(JobPosting {
            id: Some(JobId("created-1".to_string())),
            title: payload.title.clone(),
            slug: payload.slug.clone(),
            ..JobPosting::default()
        }))
    }

    async fn update_job(
        &self,
        id: &JobId,
        payload: &JobPayload,
    ) -> Result<Option<JobPosting>, ApiError> {
        self.record(BackendCall::Update(id.clone(), payload.clone()));
        Self::failure(&self.save_failure)?;
        Ok(None)
    }

    async fn delete_job(&self, id: &JobId) -> Result<(), ApiError> {
        self.record(BackendCall::Delete(id.clone()));
        Self::failure(&self.delete_failure)?;
        self.rows
            .lock()
            .expect("rows mutex")
            .retain(|row| &row.id != id);
        Ok(())
    }

    async fn feed(&self, kind: FeedKind) -> Result<Vec<ContentSummary>, ApiError> {
        self.record(BackendCall::Feed(kind));
        if kind == FeedKind::LatestAnswerKeys {
            return Err(ApiError::Status {
                status: 503,
                body: ErrorBody::default(),
            });
        }
        Ok(vec![ContentSummary {
            id: format!("{}-1", kind.path()),
            title: format!("{} entry", kind.label()),
            organization: None,
            date: "2030-01-15".to_string(),
            link: format!("/{}/1", kind.path()),
        }])
    }
}

#[derive(Default)]
pub(super) struct MemoryNotifier {
    events: Mutex<Vec<Notification>>,
}

impl MemoryNotifier {
    pub(super) fn events(&self) -> Vec<Notification> {
        self.events.lock().expect("notifier mutex").clone()
    }

    pub(super) fn last(&self) -> Option<Notification> {
        self.events().last().cloned()
    }

    pub(super) fn errors(&self) -> Vec<String> {
        self.events()
            .into_iter()
            .filter(|event| event.level == NotificationLevel::Error)
            .map(|event| event.message)
            .collect()
    }
}

impl Notifier for MemoryNotifier {
    fn notify(&self, notification: Notification) {
        self.events
            .lock()
            .expect("notifier mutex")
            .push(notification);
    }
}
