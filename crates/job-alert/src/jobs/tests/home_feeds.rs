use super::common::*;
use crate::api::FeedKind;
use crate::feeds::HomeFeeds;

#[tokio::test]
async fn each_feed_loads_independently() {
    let backend = MemoryBackend::default();

    let feeds = HomeFeeds::load(&backend).await;

    assert_eq!(feeds.daily_updates.len(), 1);
    assert_eq!(feeds.latest_results[0].title, "Latest Results entry");
    assert_eq!(feeds.get(FeedKind::LatestAdmitCards).len(), 1);
    assert!(
        feeds.latest_answer_keys.is_empty(),
        "a failing feed is empty without affecting the others"
    );
    assert_eq!(
        backend.calls(),
        FeedKind::ALL.into_iter().map(BackendCall::Feed).collect::<Vec<_>>()
    );
}
