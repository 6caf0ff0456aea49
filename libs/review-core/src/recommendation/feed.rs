//! Infinite recommendation list.
//!
//! ```text
//! Idle -> LoadingFirst -> Ready | Exhausted | Failed
//! Ready -> LoadingNext -> Ready | Exhausted | Failed
//! ```
//!
//! The caller performs the fetch; this type only decides *whether* a fetch
//! may start and with which [`PageParam`], then absorbs the outcome.

use serde::Serialize;
use std::collections::HashSet;

use super::cursor::{PageParam, RecommendationItem, RecommendationPage};

/// Current state of the list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type")]
pub enum FeedState {
    Idle,
    LoadingFirst,
    Ready,
    LoadingNext,
    Exhausted,
    Failed { message: String },
}

/// Aggregated pages of recommendations.
#[derive(Debug, Clone)]
pub struct InfiniteList {
    state: FeedState,
    pages: Vec<RecommendationPage>,
    items: Vec<RecommendationItem>,
    seen: HashSet<i64>,
    next: PageParam,
}

impl Default for InfiniteList {
    fn default() -> Self {
        Self::new()
    }
}

impl InfiniteList {
    pub fn new() -> Self {
        Self {
            state: FeedState::Idle,
            pages: Vec::new(),
            items: Vec::new(),
            seen: HashSet::new(),
            next: PageParam::None,
        }
    }

    pub fn state(&self) -> &FeedState {
        &self.state
    }

    pub fn items(&self) -> &[RecommendationItem] {
        &self.items
    }

    pub fn pages(&self) -> &[RecommendationPage] {
        &self.pages
    }

    pub fn has_data(&self) -> bool {
        !self.pages.is_empty()
    }

    pub fn has_next_page(&self) -> bool {
        !self.next.is_none()
    }

    pub fn is_fetching_next_page(&self) -> bool {
        self.state == FeedState::LoadingNext
    }

    pub fn is_loading(&self) -> bool {
        matches!(self.state, FeedState::LoadingFirst | FeedState::LoadingNext)
    }

    /// Begin loading the first page. Returns `None` if a load is in flight
    /// or data is already present.
    pub fn start(&mut self) -> Option<PageParam> {
        if self.is_loading() || self.has_data() {
            return None;
        }
        self.state = FeedState::LoadingFirst;
        Some(PageParam::None)
    }

    /// Begin loading the next page, if there is one and no fetch is running.
    pub fn fetch_next_page(&mut self) -> Option<PageParam> {
        if !self.has_data() || !self.has_next_page() || self.is_loading() {
            return None;
        }
        self.state = FeedState::LoadingNext;
        Some(self.next.clone())
    }

    /// Sentinel visibility callback from the scroll container.
    pub fn on_sentinel_visible(&mut self, visible: bool) -> Option<PageParam> {
        if !visible {
            return None;
        }
        self.fetch_next_page()
    }

    /// Absorb a successfully fetched page.
    pub fn receive(&mut self, page: RecommendationPage) {
        for item in &page.items {
            if self.seen.insert(item.problem_id) {
                self.items.push(item.clone());
            }
        }
        self.next = page.meta.next_page_param();
        self.pages.push(page);
        self.state = if self.has_next_page() {
            FeedState::Ready
        } else {
            FeedState::Exhausted
        };
    }

    /// Record a failed fetch. Loaded pages are kept so the next page can be
    /// retried.
    pub fn fail(&mut self, message: impl Into<String>) {
        self.state = FeedState::Failed {
            message: message.into(),
        };
    }

    /// Drop everything and return to `Idle`.
    pub fn reset(&mut self) {
        *self = Self::new();
    }

    /// Busy banner aggregated across every loaded page.
    pub fn show_busy_banner(&self) -> bool {
        self.pages.iter().any(RecommendationPage::is_busy)
    }
}
