//! Review submission and FSRS parameter optimisation.

use chrono::{DateTime, Utc};
use review_core::{due_display, Rating, ReviewType};

use crate::api::ApiClient;
use crate::error::Result;

pub async fn submit(
    client: &ApiClient,
    problem_id: i64,
    rating: Rating,
    review_type: ReviewType,
    now: DateTime<Utc>,
) -> Result<String> {
    let response = client.submit_review(problem_id, rating, review_type).await?;
    if !response.success {
        return Ok(response
            .message
            .unwrap_or_else(|| "复习记录提交失败".to_string()));
    }

    let mut out = format!("题目 {} 复习已记录", problem_id);
    if let Some(state) = response.new_state {
        out.push_str(&format!("，当前状态 {}", state.as_str()));
    }
    if let Some(next) = response.next_review_date.as_deref() {
        out.push_str(&format!("，下次复习：{}", due_display(next, now)));
    }
    Ok(out)
}

pub async fn optimize(client: &ApiClient) -> Result<String> {
    let response = client.optimize_parameters().await?;
    Ok(response.message.unwrap_or_else(|| {
        if response.success {
            "参数优化已开始".to_string()
        } else {
            "参数优化未能开始".to_string()
        }
    }))
}
