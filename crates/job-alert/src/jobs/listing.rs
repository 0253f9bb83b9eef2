use std::sync::Arc;

use serde::Serialize;
use tracing::{error, info};

use super::domain::{JobId, JobSummary, ListQuery};
use crate::api::JobsBackend;
use crate::notify::{Notification, Notifier};

/// Rows per listing page.
pub const PAGE_SIZE: u32 = 10;
/// Contiguous page numbers shown around the current page.
pub const MAX_VISIBLE_PAGES: u32 = 5;

/// Entry of the pagination strip.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum PageLink {
    Page { number: u32, current: bool },
    Ellipsis,
}

/// Pages to render for `current` out of `total_pages`: a window of up to
/// [`MAX_VISIBLE_PAGES`] pages centred on `current` (shifted at the ends),
/// plus the first and last page when the window does not reach them. An
/// ellipsis marks each gap of at least one hidden page.
pub fn page_window(current: u32, total_pages: u32) -> Vec<PageLink> {
    if total_pages == 0 {
        return Vec::new();
    }

    let current = current.clamp(1, total_pages);
    let mut start = current.saturating_sub(MAX_VISIBLE_PAGES / 2).max(1);
    let end = (start + MAX_VISIBLE_PAGES - 1).min(total_pages);
    if end - start + 1 < MAX_VISIBLE_PAGES {
        start = (end + 1).saturating_sub(MAX_VISIBLE_PAGES).max(1);
    }

    let page = |number: u32| PageLink::Page {
        number,
        current: number == current,
    };

    let mut links = Vec::new();
    if start > 1 {
        links.push(page(1));
        if start > 2 {
            links.push(PageLink::Ellipsis);
        }
    }
    links.extend((start..=end).map(page));
    if end < total_pages {
        if end < total_pages - 1 {
            links.push(PageLink::Ellipsis);
        }
        links.push(page(total_pages));
    }
    links
}

/// `ceil(total_count / page_size)`.
pub fn total_pages(total_count: u64, page_size: u32) -> u32 {
    if page_size == 0 {
        return 0;
    }
    let pages = total_count.div_ceil(u64::from(page_size));
    u32::try_from(pages).unwrap_or(u32::MAX)
}

/// "Showing X to Y of Z" bounds for the current page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DisplayRange {
    pub first: u64,
    pub last: u64,
    pub total: u64,
}

/// Paginated, searchable admin listing backed by the REST backend.
///
/// Every page or search change triggers exactly one fetch that replaces the
/// displayed rows wholesale.
pub struct ListingController<B, N> {
    backend: Arc<B>,
    notifier: Arc<N>,
    items: Vec<JobSummary>,
    current_page: u32,
    total_count: u64,
    total_pages: u32,
    search_term: String,
}

impl<B, N> ListingController<B, N>
where
    B: JobsBackend + 'static,
    N: Notifier + 'static,
{
    pub fn new(backend: Arc<B>, notifier: Arc<N>) -> Self {
        Self {
            backend,
            notifier,
            items: Vec::new(),
            current_page: 1,
            total_count: 0,
            total_pages: 1,
            search_term: String::new(),
        }
    }

    /// Controller positioned on `page` with `search` applied, before any fetch.
    pub fn with_query(backend: Arc<B>, notifier: Arc<N>, page: u32, search: &str) -> Self {
        let mut controller = Self::new(backend, notifier);
        controller.current_page = page.max(1);
        controller.search_term = search.to_string();
        controller
    }

    pub fn items(&self) -> &[JobSummary] {
        &self.items
    }

    pub fn current_page(&self) -> u32 {
        self.current_page
    }

    pub fn total_pages(&self) -> u32 {
        self.total_pages
    }

    pub fn total_count(&self) -> u64 {
        self.total_count
    }

    pub fn search_term(&self) -> &str {
        &self.search_term
    }

    pub fn query(&self) -> ListQuery {
        ListQuery {
            page: self.current_page,
            limit: PAGE_SIZE,
            search: if self.search_term.is_empty() {
                None
            } else {
                Some(self.search_term.clone())
            },
        }
    }

    /// Fetches the current page. On failure the displayed rows are kept and
    /// the user is notified.
    pub async fn refresh(&mut self) -> bool {
        let query = self.query();
        match self.backend.list_jobs(&query).await {
            Ok(page) => {
                self.items = page.jobs;
                self.total_count = page.total;
                self.total_pages = total_pages(page.total, PAGE_SIZE);
                true
            }
            Err(err) => {
                error!(page = query.page, error = %err, "failed to load jobs");
                self.notifier.notify(Notification::error("Failed to load jobs"));
                false
            }
        }
    }

    pub async fn set_page(&mut self, page: u32) -> bool {
        self.current_page = page.max(1);
        self.refresh().await
    }

    /// Applies a new search term and returns to the first page.
    pub async fn set_search(&mut self, term: &str) -> bool {
        self.search_term = term.to_string();
        self.current_page = 1;
        self.refresh().await
    }

    pub async fn previous_page(&mut self) -> bool {
        let target = self.current_page.saturating_sub(1).max(1);
        self.set_page(target).await
    }

    pub async fn next_page(&mut self) -> bool {
        let target = (self.current_page + 1).min(self.total_pages.max(1));
        self.set_page(target).await
    }

    pub fn has_previous(&self) -> bool {
        self.current_page > 1
    }

    pub fn has_next(&self) -> bool {
        self.current_page < self.total_pages
    }

    /// Deletes a record, then re-fetches the current page so counts stay
    /// authoritative. A failed delete leaves the rows untouched.
    pub async fn delete(&mut self, id: &JobId) -> bool {
        match self.backend.delete_job(id).await {
            Ok(()) => {
                info!(job_id = %id, "job deleted");
                self.notifier
                    .notify(Notification::success("Job deleted successfully"));
                self.refresh().await;
                true
            }
            Err(err) => {
                error!(job_id = %id, error = %err, "failed to delete job");
                self.notifier.notify(Notification::error("Failed to delete job"));
                false
            }
        }
    }

    pub fn pagination(&self) -> Vec<PageLink> {
        page_window(self.current_page, self.total_pages)
    }

    /// The strip is only rendered when there is more than one page.
    pub fn shows_pagination(&self) -> bool {
        self.total_pages > 1
    }

    pub fn display_range(&self) -> DisplayRange {
        let page_size = u64::from(PAGE_SIZE);
        let offset = u64::from(self.current_page - 1) * page_size;
        let last = (offset + page_size).min(self.total_count);
        if last <= offset {
            return DisplayRange {
                first: 0,
                last: 0,
                total: self.total_count,
            };
        }
        DisplayRange {
            first: offset + 1,
            last,
            total: self.total_count,
        }
    }
}
