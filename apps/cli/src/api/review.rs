//! Review queue and review submission endpoints.

use review_core::pagination::{QueueQuery, ServerPaging};
use review_core::{CardState, QueueBuckets, Rating, ReviewCard, ReviewType};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use super::{new_request_id, ApiClient};
use crate::error::Result;

/// Queue counters reported alongside the cards.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReviewQueueStats {
    #[serde(default)]
    pub due_count: u64,
    #[serde(default)]
    pub overdue_count: u64,
    #[serde(default)]
    pub new_count: u64,
    #[serde(default)]
    pub learning_count: u64,
    #[serde(default)]
    pub review_count: u64,
    #[serde(default)]
    pub relearning_count: u64,
}

/// Response of `GET /review/queue`.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReviewQueueResponse {
    #[serde(default)]
    pub cards: Vec<ReviewCard>,
    #[serde(default)]
    pub total_count: u64,
    #[serde(default = "first_page")]
    pub current_page: u32,
    #[serde(default)]
    pub page_size: u32,
    #[serde(default)]
    pub total_pages: u32,
    #[serde(default)]
    pub stats: ReviewQueueStats,
}

fn first_page() -> u32 {
    1
}

impl ReviewQueueResponse {
    pub fn paging(&self) -> ServerPaging {
        ServerPaging {
            total_count: self.total_count,
            current_page: self.current_page,
            page_size: self.page_size,
            total_pages: self.total_pages,
        }
    }

    pub fn into_buckets(self) -> QueueBuckets {
        QueueBuckets::from_cards(self.cards)
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct SubmitReviewRequest {
    problem_id: i64,
    rating: u8,
    review_type: ReviewType,
    request_id: String,
}

/// Response of `POST /review/submit`.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmitReviewResponse {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub next_review_date: Option<String>,
    #[serde(default)]
    pub new_state: Option<CardState>,
    /// Scheduler-specific preview of the next interval per rating.
    #[serde(default)]
    pub intervals: Option<serde_json::Value>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct OptimizeRequest {
    request_id: String,
}

/// Response of `POST /review/optimize-parameters`.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OptimizeResponse {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub message: Option<String>,
}

impl ApiClient {
    /// GET /review/queue
    pub async fn fetch_review_queue(&self, query: &QueueQuery) -> Result<ReviewQueueResponse> {
        let mut params = vec![
            ("page", query.page.to_string()),
            ("pageSize", query.page_size.to_string()),
        ];
        if let Some(limit) = query.limit {
            params.push(("limit", limit.to_string()));
        }
        if query.show_all {
            params.push(("showAll", "true".to_string()));
        }

        let response: ReviewQueueResponse = self.get_json("/review/queue", &params).await?;
        debug!(
            cards = response.cards.len(),
            total = response.total_count,
            "fetched review queue"
        );
        Ok(response)
    }

    /// POST /review/submit
    pub async fn submit_review(
        &self,
        problem_id: i64,
        rating: Rating,
        review_type: ReviewType,
    ) -> Result<SubmitReviewResponse> {
        let request = SubmitReviewRequest {
            problem_id,
            rating: rating.to_value(),
            review_type,
            request_id: new_request_id(),
        };
        let response: SubmitReviewResponse = self.post_json("/review/submit", &request).await?;
        info!(problem_id, rating = rating.to_value(), "review submitted");
        Ok(response)
    }

    /// POST /review/optimize-parameters
    pub async fn optimize_parameters(&self) -> Result<OptimizeResponse> {
        let request = OptimizeRequest {
            request_id: new_request_id(),
        };
        self.post_json("/review/optimize-parameters", &request).await
    }
}
