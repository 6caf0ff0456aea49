//! Test fixtures and factory functions for backend payloads.

use chrono::{DateTime, TimeZone, Utc};
use serde_json::{json, Value};

use super::ScriptedRecommendations;

/// Fixed "now" all fixture dates are relative to.
pub fn now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 6, 1, 8, 0, 0).unwrap()
}

/// A review card as the queue endpoint returns it.
pub fn card(problem_id: i64, state: &str, due_date: &str, overdue: bool, due: bool) -> Value {
    json!({
        "problemId": problem_id,
        "problemTitle": format!("Problem {}", problem_id),
        "problemDifficulty": "MEDIUM",
        "state": state,
        "dueDate": due_date,
        "reviewCount": 3,
        "lapses": 0,
        "overdue": overdue,
        "due": due
    })
}

/// Four distinct problems, with problem 1 duplicated in a second bucket.
///
/// Relative to [`now`]: 1 is three days overdue, 2 became due two hours ago,
/// 3 is due in two days, 4 in eight.
pub fn mixed_queue() -> Vec<Value> {
    vec![
        card(3, "NEW", "2026-06-03T08:00:00Z", false, false),
        card(2, "LEARNING", "2026-06-01T06:00:00Z", false, true),
        card(1, "REVIEW", "2026-05-29T08:00:00Z", true, false),
        card(4, "REVIEW", "2026-06-09T08:00:00Z", false, false),
        card(1, "RELEARNING", "2026-05-29T08:00:00Z", true, false),
    ]
}

pub fn recommendation_item(problem_id: i64) -> Value {
    json!({
        "problemId": problem_id,
        "recommendationId": format!("rec-{}", problem_id),
        "title": format!("Problem {}", problem_id),
        "difficulty": "EASY",
        "reason": "Similar to problems you struggled with",
        "score": 0.8,
        "topics": ["array"]
    })
}

pub fn recommendation_page(ids: &[i64], meta: Value) -> ScriptedRecommendations {
    ScriptedRecommendations {
        body: json!({
            "items": ids.iter().map(|id| recommendation_item(*id)).collect::<Vec<_>>(),
            "meta": meta
        }),
        rec_source: None,
        rec_source_header: "rec-source",
    }
}
