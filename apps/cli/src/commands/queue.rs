//! Review queue screen.

use chrono::{DateTime, Utc};
use review_core::{
    due_display, merge_buckets, DaysAheadFilter, QueuePage, RecommendedIds, RequestSequencer,
    ReviewQueueView, ReviewStatus,
};
use tracing::debug;

use crate::api::ApiClient;
use crate::error::Result;

/// Loads and pages the review queue.
///
/// Every load takes a ticket from the sequencer; a response that arrives
/// after a newer load started is dropped.
pub struct ReviewQueueController {
    client: ApiClient,
    view: ReviewQueueView,
    sequencer: RequestSequencer,
}

impl ReviewQueueController {
    pub fn new(client: ApiClient, page_size: u32) -> Result<Self> {
        Ok(Self {
            client,
            view: ReviewQueueView::new(page_size)?,
            sequencer: RequestSequencer::new(),
        })
    }

    pub fn view(&self) -> &ReviewQueueView {
        &self.view
    }

    pub fn set_filter(&mut self, filter: DaysAheadFilter) {
        self.view.set_filter(filter);
    }

    pub fn set_page(&mut self, page: u32) {
        self.view.set_page(page);
    }

    /// Fetch and build the current page. `Ok(None)` means the response was
    /// superseded by a newer load.
    pub async fn load(&self, now: DateTime<Utc>) -> Result<Option<QueuePage>> {
        let ticket = self.sequencer.issue();
        let view = self.view.clone();

        let response = self.client.fetch_review_queue(&view.query()).await?;
        if !self.sequencer.is_current(ticket) {
            debug!(?ticket, "discarding stale review queue response");
            return Ok(None);
        }

        let paging = response.paging();
        let merged = merge_buckets(&response.into_buckets(), now);
        Ok(Some(view.apply(merged, paging)?))
    }
}

fn status_label(status: ReviewStatus) -> &'static str {
    match status {
        ReviewStatus::Overdue => "逾期",
        ReviewStatus::Due => "到期",
        ReviewStatus::Upcoming => "即将",
    }
}

/// Plain-text table of one queue page.
pub fn render_queue_page(
    page: &QueuePage,
    recommended: &RecommendedIds,
    now: DateTime<Utc>,
) -> String {
    if page.items.is_empty() {
        return "没有待复习的题目\n".to_string();
    }

    let mut out = String::new();
    for problem in &page.items {
        let badge = if recommended.contains(problem.problem_id()) {
            " [推荐]"
        } else {
            ""
        };
        out.push_str(&format!(
            "{:>6}  {:<4} {:>5}  {:<8} {:<10} {}{}\n",
            problem.problem_id(),
            status_label(problem.review_status),
            problem.priority_score,
            problem.card.problem_difficulty.as_str(),
            problem.card.state.as_str(),
            problem.card.problem_title,
            badge,
        ));
        out.push_str(&format!(
            "        {}\n",
            due_display(&problem.card.due_date, now)
        ));
    }
    out.push_str(&format!(
        "第 {}/{} 页，共 {} 题（筛选：{}）\n",
        page.current_page,
        page.total_pages.max(1),
        page.total_count,
        page.filter
    ));
    out
}
