use serde::Serialize;
use tracing::warn;

use crate::api::{ContentSummary, FeedKind, JobsBackend};

/// The four public home-page feeds. A feed that fails to load is empty.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct HomeFeeds {
    pub daily_updates: Vec<ContentSummary>,
    pub latest_results: Vec<ContentSummary>,
    pub latest_admit_cards: Vec<ContentSummary>,
    pub latest_answer_keys: Vec<ContentSummary>,
}

impl HomeFeeds {
    pub async fn load<B: JobsBackend + ?Sized>(backend: &B) -> Self {
        let mut feeds = Self::default();
        for kind in FeedKind::ALL {
            let entries = match backend.feed(kind).await {
                Ok(entries) => entries,
                Err(err) => {
                    warn!(feed = kind.path(), error = %err, "failed to load feed");
                    Vec::new()
                }
            };
            *feeds.slot_mut(kind) = entries;
        }
        feeds
    }

    pub fn get(&self, kind: FeedKind) -> &[ContentSummary] {
        match kind {
            FeedKind::DailyUpdates => &self.daily_updates,
            FeedKind::LatestResults => &self.latest_results,
            FeedKind::LatestAdmitCards => &self.latest_admit_cards,
            FeedKind::LatestAnswerKeys => &self.latest_answer_keys,
        }
    }

    fn slot_mut(&mut self, kind: FeedKind) -> &mut Vec<ContentSummary> {
        match kind {
            FeedKind::DailyUpdates => &mut self.daily_updates,
            FeedKind::LatestResults => &mut self.latest_results,
            FeedKind::LatestAdmitCards => &mut self.latest_admit_cards,
            FeedKind::LatestAnswerKeys => &mut self.latest_answer_keys,
        }
    }
}
