//! Recommendation feed driver.

use chrono::{DateTime, Utc};
use review_core::{
    FeedState, FeedbackAction, FeedbackTracker, InfiniteList, PageParam, RecommendationItem,
    RecommendedIds, Toast,
};
use tracing::{debug, info};

use crate::api::recommendations::{RecommendationQuery, RecommendationSource};
use crate::error::Result;

/// Drives an [`InfiniteList`] against a [`RecommendationSource`].
pub struct RecommendationFeed<S: RecommendationSource> {
    source: S,
    query: RecommendationQuery,
    list: InfiniteList,
    feedback: FeedbackTracker,
}

impl<S: RecommendationSource> RecommendationFeed<S> {
    pub fn new(source: S, query: RecommendationQuery) -> Self {
        Self {
            source,
            query,
            list: InfiniteList::new(),
            feedback: FeedbackTracker::new(),
        }
    }

    pub fn list(&self) -> &InfiniteList {
        &self.list
    }

    pub fn items(&self) -> &[RecommendationItem] {
        self.list.items()
    }

    pub fn feedback(&self) -> &FeedbackTracker {
        &self.feedback
    }

    /// Load the first page. No-op if a page is already loaded.
    pub async fn load_first(&mut self, registry: &mut RecommendedIds) -> Result<()> {
        let Some(page) = self.list.start() else {
            return Ok(());
        };
        self.fetch(page, registry).await
    }

    /// Load the next page. Returns `false` when there was nothing to load
    /// or a load was already running.
    pub async fn load_next(&mut self, registry: &mut RecommendedIds) -> Result<bool> {
        let Some(page) = self.list.fetch_next_page() else {
            return Ok(false);
        };
        self.fetch(page, registry).await.map(|_| true)
    }

    /// Load the first page and then keep paging until `max_pages` pages are
    /// loaded or the feed is exhausted.
    pub async fn load_pages(
        &mut self,
        max_pages: usize,
        registry: &mut RecommendedIds,
    ) -> Result<()> {
        self.load_first(registry).await?;
        while self.list.pages().len() < max_pages {
            if !self.load_next(registry).await? {
                break;
            }
        }
        Ok(())
    }

    async fn fetch(&mut self, page: PageParam, registry: &mut RecommendedIds) -> Result<()> {
        debug!(?page, "loading recommendation page");
        let query = self.query.with_page(page);
        match self.source.fetch_page(&query).await {
            Ok(page) => {
                registry.extend(page.items.iter().map(|item| item.problem_id));
                self.list.receive(page);
                Ok(())
            }
            Err(e) => {
                self.list.fail(e.user_message());
                Err(e)
            }
        }
    }

    /// Send feedback for one card. Errors are absorbed into the tracker's
    /// toast; the returned flag says whether the feedback was recorded.
    pub async fn submit_feedback(
        &mut self,
        problem_id: i64,
        action: FeedbackAction,
        helpful: Option<bool>,
        now: DateTime<Utc>,
    ) -> bool {
        if !self.feedback.begin(problem_id) {
            return false;
        }

        let recommendation_id = self
            .list
            .items()
            .iter()
            .find(|item| item.problem_id == problem_id)
            .and_then(|item| item.recommendation_id.clone());

        let result = self
            .source
            .send_feedback(problem_id, recommendation_id.as_deref(), action, helpful)
            .await;
        match result {
            Ok(()) => {
                info!(problem_id, %action, "recommendation feedback recorded");
                self.feedback.succeed(problem_id, action, now);
                true
            }
            Err(e) => {
                self.feedback.fail(problem_id, &e.user_message(), now);
                false
            }
        }
    }

    pub fn toast(&self, now: DateTime<Utc>) -> Option<&Toast> {
        self.feedback.active_toast(now)
    }
}

/// Plain-text listing of the loaded recommendations.
pub fn render_feed(list: &InfiniteList) -> String {
    let mut out = String::new();
    if list.show_busy_banner() {
        out.push_str("推荐服务繁忙，当前展示的是默认推荐\n");
    }
    if let FeedState::Failed { message } = list.state() {
        out.push_str(&format!("加载失败：{}\n", message));
    }
    if list.items().is_empty() {
        out.push_str("暂无推荐\n");
        return out;
    }

    for item in list.items() {
        let difficulty = item.difficulty.map(|d| d.as_str()).unwrap_or("-");
        out.push_str(&format!("{:>6}  {:<6} {}\n", item.problem_id, difficulty, item.title));
        if let Some(reason) = &item.reason {
            out.push_str(&format!("        {}\n", reason));
        }
    }
    if *list.state() == FeedState::Exhausted {
        out.push_str("没有更多推荐了\n");
    }
    out
}
