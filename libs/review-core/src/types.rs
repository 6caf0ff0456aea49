//! Core types for the review queue.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::CoreError;

/// FSRS lifecycle stage of a problem for a user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CardState {
    New,
    Learning,
    Review,
    Relearning,
}

impl Default for CardState {
    fn default() -> Self {
        Self::New
    }
}

impl CardState {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::New => "NEW",
            Self::Learning => "LEARNING",
            Self::Review => "REVIEW",
            Self::Relearning => "RELEARNING",
        }
    }
}

/// Problem difficulty as reported by the backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ProblemDifficulty {
    Easy,
    Medium,
    Hard,
}

impl ProblemDifficulty {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Easy => "EASY",
            Self::Medium => "MEDIUM",
            Self::Hard => "HARD",
        }
    }
}

/// Rating for a review.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rating {
    Again,
    Hard,
    Good,
    Easy,
}

impl Rating {
    /// Convert to 4-point numeric value (1-4).
    pub fn to_value(self) -> u8 {
        match self {
            Self::Again => 1,
            Self::Hard => 2,
            Self::Good => 3,
            Self::Easy => 4,
        }
    }

    /// Create from 4-point numeric value.
    pub fn from_value(value: u8) -> Result<Self, CoreError> {
        match value {
            1 => Ok(Self::Again),
            2 => Ok(Self::Hard),
            3 => Ok(Self::Good),
            4 => Ok(Self::Easy),
            other => Err(CoreError::InvalidRating(other)),
        }
    }
}

impl FromStr for Rating {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "again" => Ok(Self::Again),
            "hard" => Ok(Self::Hard),
            "good" => Ok(Self::Good),
            "easy" => Ok(Self::Easy),
            _ => s
                .trim()
                .parse::<u8>()
                .map_err(|_| CoreError::UnparsableRating(s.to_string()))
                .and_then(Self::from_value),
        }
    }
}

/// How a review was initiated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ReviewType {
    Scheduled,
    Manual,
}

impl Default for ReviewType {
    fn default() -> Self {
        Self::Scheduled
    }
}

/// Due card record as returned by `GET /review/queue`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReviewCard {
    pub problem_id: i64,
    pub problem_title: String,
    pub problem_difficulty: ProblemDifficulty,
    pub state: CardState,
    /// Raw ISO-8601 timestamp. Kept as text so a malformed value can be
    /// displayed instead of failing the whole response.
    pub due_date: String,
    #[serde(default)]
    pub review_count: u32,
    #[serde(default)]
    pub lapses: u32,
    #[serde(default)]
    pub overdue: bool,
    #[serde(default)]
    pub due: bool,
}

impl ReviewCard {
    /// Parse `due_date`, returning `None` when it is not a valid timestamp.
    pub fn parsed_due_date(&self) -> Option<DateTime<Utc>> {
        parse_timestamp(&self.due_date)
    }
}

const OFFSET_FORMATS: &[&str] = &["%Y-%m-%dT%H:%M:%S%.f%z", "%Y-%m-%dT%H:%M%z"];
const NAIVE_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M:%S%.f",
];

/// Parse an ISO-8601 timestamp. Seconds and the offset are optional; a
/// timestamp without an offset is UTC, and a bare date is midnight UTC.
pub fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.with_timezone(&Utc));
    }
    for format in OFFSET_FORMATS {
        if let Ok(dt) = DateTime::parse_from_str(raw, format) {
            return Some(dt.with_timezone(&Utc));
        }
    }
    for format in NAIVE_FORMATS {
        if let Ok(naive) = chrono::NaiveDateTime::parse_from_str(raw, format) {
            return Some(naive.and_utc());
        }
    }
    chrono::NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|d| d.and_utc())
}

/// Review status bucket of a classified card.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReviewStatus {
    Overdue,
    Due,
    Upcoming,
}

impl fmt::Display for ReviewStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Overdue => "overdue",
            Self::Due => "due",
            Self::Upcoming => "upcoming",
        };
        f.write_str(label)
    }
}

/// Review card enriched with its computed status and priority.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DisplayReviewProblem {
    #[serde(flatten)]
    pub card: ReviewCard,
    pub review_status: ReviewStatus,
    pub priority_score: i64,
    /// Whole days until due (negative when past), `None` for a malformed date.
    pub days_until_due: Option<i64>,
}

impl DisplayReviewProblem {
    pub fn problem_id(&self) -> i64 {
        self.card.problem_id
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn rating_parses_names_and_numbers() {
        assert_eq!("good".parse::<Rating>().unwrap(), Rating::Good);
        assert_eq!("4".parse::<Rating>().unwrap(), Rating::Easy);
        assert_eq!("5".parse::<Rating>(), Err(CoreError::InvalidRating(5)));
        assert_eq!(
            "meh".parse::<Rating>(),
            Err(CoreError::UnparsableRating("meh".to_string()))
        );
        assert_eq!(
            CoreError::UnparsableRating("meh".to_string()).to_string(),
            "invalid rating \"meh\": expected again, hard, good, easy or 1-4"
        );
    }

    #[test]
    fn review_card_deserializes_camel_case() {
        let card: ReviewCard = serde_json::from_str(
            r#"{
                "problemId": 7,
                "problemTitle": "Two Sum",
                "problemDifficulty": "EASY",
                "state": "RELEARNING",
                "dueDate": "2026-01-02T03:04:05Z",
                "reviewCount": 3,
                "lapses": 1,
                "overdue": true
            }"#,
        )
        .unwrap();

        assert_eq!(card.problem_id, 7);
        assert_eq!(card.state, CardState::Relearning);
        assert!(card.overdue);
        assert!(!card.due);
        assert!(card.parsed_due_date().is_some());
    }

    #[test]
    fn timestamp_parsing_accepts_common_forms() {
        let utc = |s: &str| parse_timestamp(s).map(|d| d.to_rfc3339());
        assert_eq!(utc("2026-05-29T08:00"), Some("2026-05-29T08:00:00+00:00".to_string()));
        assert_eq!(utc("2026-05-29T16:00+0800"), Some("2026-05-29T08:00:00+00:00".to_string()));
        assert_eq!(
            utc("2026-05-29T16:00:30.5+0800").as_deref(),
            Some("2026-05-29T08:00:30.500+00:00")
        );
        assert_eq!(utc("2026-05-29 08:00:00"), Some("2026-05-29T08:00:00+00:00".to_string()));
        assert!(parse_timestamp("2026-01-02T03:04:05+08:00").is_some());
        assert!(parse_timestamp("2026-01-02T03:04:05.123").is_some());
        assert!(parse_timestamp("2026-01-02").is_some());
        assert!(parse_timestamp("invalid").is_none());
        assert!(parse_timestamp("").is_none());
    }
}
