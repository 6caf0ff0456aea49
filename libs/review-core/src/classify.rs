//! Due-date classification and priority scoring.
//!
//! Scores live in disjoint bands so a plain descending sort ranks every
//! overdue card above every due card, and every due card above every
//! upcoming one:
//!
//! | status   | score                               |
//! |----------|-------------------------------------|
//! | overdue  | `1000 + |days|`                     |
//! | due      | `500 + (24 - hours)`, in `[500,524]`|
//! | upcoming | `max(0, 100 - days)`, in `[0,100]`  |

use chrono::{DateTime, Utc};

use crate::types::{DisplayReviewProblem, ReviewCard, ReviewStatus};

const MS_PER_DAY: i64 = 86_400_000;
const MS_PER_HOUR: i64 = 3_600_000;

pub const OVERDUE_BASE: i64 = 1000;
pub const DUE_BASE: i64 = 500;
pub const UPCOMING_CEILING: i64 = 100;

/// Integer ceiling division for a positive divisor.
fn ceil_div(value: i64, divisor: i64) -> i64 {
    let quotient = value / divisor;
    if value % divisor > 0 {
        quotient + 1
    } else {
        quotient
    }
}

/// Whole days until `due`, rounded up. Negative once a full day has passed.
pub fn days_until_due(due: DateTime<Utc>, now: DateTime<Utc>) -> i64 {
    ceil_div((due - now).num_milliseconds(), MS_PER_DAY)
}

fn hours_until_due(due: DateTime<Utc>, now: DateTime<Utc>) -> i64 {
    ceil_div((due - now).num_milliseconds(), MS_PER_HOUR)
}

/// Classify a card relative to `now`.
///
/// A malformed `due_date` falls back to the server flags alone.
pub fn classify_card(card: &ReviewCard, now: DateTime<Utc>) -> DisplayReviewProblem {
    let due_at = card.parsed_due_date();

    let (review_status, priority_score, days_until) = match due_at {
        Some(due_at) => {
            let diff_days = days_until_due(due_at, now);
            let diff_hours = hours_until_due(due_at, now);

            if card.overdue || diff_days < 0 {
                (ReviewStatus::Overdue, OVERDUE_BASE + diff_days.abs(), Some(diff_days))
            } else if card.due || diff_days == 0 {
                let score = DUE_BASE + (24 - diff_hours.clamp(0, 24));
                (ReviewStatus::Due, score, Some(diff_days))
            } else {
                let score = (UPCOMING_CEILING - diff_days).max(0);
                (ReviewStatus::Upcoming, score, Some(diff_days))
            }
        }
        None if card.overdue => (ReviewStatus::Overdue, OVERDUE_BASE, None),
        None if card.due => (ReviewStatus::Due, DUE_BASE + 24, None),
        None => (ReviewStatus::Upcoming, 0, None),
    };

    DisplayReviewProblem {
        card: card.clone(),
        review_status,
        priority_score,
        days_until_due: days_until,
    }
}

/// Human-readable due label.
pub fn due_display(due_date: &str, now: DateTime<Utc>) -> String {
    let Some(due_at) = crate::types::parse_timestamp(due_date) else {
        return "日期无效".to_string();
    };

    match days_until_due(due_at, now) {
        d if d < 0 => format!("已逾期 {} 天", d.abs()),
        0 => "今天到期".to_string(),
        1 => "明天到期".to_string(),
        d => format!("{} 天后到期", d),
    }
}
