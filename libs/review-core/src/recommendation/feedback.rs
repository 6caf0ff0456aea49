//! Per-card recommendation feedback.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};
use std::fmt;
use std::str::FromStr;

use crate::error::CoreError;

/// How long a toast stays visible.
pub const TOAST_DURATION_SECS: i64 = 3;

/// Feedback a user can give on a recommended problem.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FeedbackAction {
    Accepted,
    Skipped,
    Solved,
    Hidden,
}

impl FeedbackAction {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Accepted => "accepted",
            Self::Skipped => "skipped",
            Self::Solved => "solved",
            Self::Hidden => "hidden",
        }
    }

    fn success_message(&self) -> &'static str {
        match self {
            Self::Accepted => "已加入练习计划",
            Self::Skipped => "已跳过该推荐",
            Self::Solved => "已标记为已解决",
            Self::Hidden => "已隐藏该推荐",
        }
    }
}

impl FromStr for FeedbackAction {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "accepted" => Ok(Self::Accepted),
            "skipped" => Ok(Self::Skipped),
            "solved" => Ok(Self::Solved),
            "hidden" => Ok(Self::Hidden),
            other => Err(CoreError::InvalidFeedbackAction(other.to_string())),
        }
    }
}

impl fmt::Display for FeedbackAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ToastKind {
    Success,
    Error,
}

/// Transient notification.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Toast {
    pub kind: ToastKind,
    pub message: String,
    pub expires_at: DateTime<Utc>,
}

impl Toast {
    fn new(kind: ToastKind, message: impl Into<String>, now: DateTime<Utc>) -> Self {
        Self {
            kind,
            message: message.into(),
            expires_at: now + Duration::seconds(TOAST_DURATION_SECS),
        }
    }

    pub fn is_visible(&self, now: DateTime<Utc>) -> bool {
        now < self.expires_at
    }
}

/// Tracks which cards have feedback in flight or recorded.
///
/// A card whose feedback succeeded stays disabled for the session. A failed
/// submission re-enables it; nothing is retried automatically.
#[derive(Debug, Clone, Default)]
pub struct FeedbackTracker {
    pending: HashSet<i64>,
    submitted: HashMap<i64, FeedbackAction>,
    toast: Option<Toast>,
}

impl FeedbackTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Mark a submission as in flight. Returns `false` if the card's
    /// actions are disabled or a submission is already running.
    pub fn begin(&mut self, problem_id: i64) -> bool {
        if self.is_disabled(problem_id) {
            return false;
        }
        self.pending.insert(problem_id)
    }

    pub fn succeed(&mut self, problem_id: i64, action: FeedbackAction, now: DateTime<Utc>) {
        self.pending.remove(&problem_id);
        self.submitted.insert(problem_id, action);
        self.toast = Some(Toast::new(ToastKind::Success, action.success_message(), now));
    }

    pub fn fail(&mut self, problem_id: i64, reason: &str, now: DateTime<Utc>) {
        self.pending.remove(&problem_id);
        self.toast = Some(Toast::new(
            ToastKind::Error,
            format!("反馈提交失败：{}", reason),
            now,
        ));
    }

    pub fn is_pending(&self, problem_id: i64) -> bool {
        self.pending.contains(&problem_id)
    }

    /// Buttons for this card are disabled.
    pub fn is_disabled(&self, problem_id: i64) -> bool {
        self.submitted.contains_key(&problem_id)
    }

    pub fn action_for(&self, problem_id: i64) -> Option<FeedbackAction> {
        self.submitted.get(&problem_id).copied()
    }

    /// The current toast, if it has not expired yet.
    pub fn active_toast(&self, now: DateTime<Utc>) -> Option<&Toast> {
        self.toast.as_ref().filter(|t| t.is_visible(now))
    }
}
