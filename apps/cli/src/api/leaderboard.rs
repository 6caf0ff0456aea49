//! Leaderboard endpoints.
//!
//! The five panels are independent; the board only fails when every panel
//! does.

use serde::{Deserialize, Serialize};
use tracing::warn;

use super::ApiClient;
use crate::error::{ApiError, Result};

/// One leaderboard panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum LeaderboardKind {
    ProblemsSolved,
    ReviewStreak,
    Accuracy,
    WeeklyActive,
    Rising,
}

impl LeaderboardKind {
    pub const ALL: [LeaderboardKind; 5] = [
        Self::ProblemsSolved,
        Self::ReviewStreak,
        Self::Accuracy,
        Self::WeeklyActive,
        Self::Rising,
    ];

    pub fn path(&self) -> &'static str {
        match self {
            Self::ProblemsSolved => "/leaderboard/problems-solved",
            Self::ReviewStreak => "/leaderboard/review-streak",
            Self::Accuracy => "/leaderboard/accuracy",
            Self::WeeklyActive => "/leaderboard/weekly-active",
            Self::Rising => "/leaderboard/rising",
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            Self::ProblemsSolved => "解题数排行",
            Self::ReviewStreak => "连续复习排行",
            Self::Accuracy => "正确率排行",
            Self::WeeklyActive => "本周活跃排行",
            Self::Rising => "进步最快",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LeaderboardEntry {
    pub rank: u32,
    pub user_id: i64,
    pub username: String,
    pub value: f64,
}

/// Outcome of one panel.
#[derive(Debug, Clone, PartialEq)]
pub enum PanelState {
    Loaded(Vec<LeaderboardEntry>),
    Unavailable { message: String },
}

#[derive(Debug, Clone, PartialEq)]
pub struct LeaderboardPanel {
    pub kind: LeaderboardKind,
    pub state: PanelState,
}

/// All five panels, at least one of them loaded.
#[derive(Debug, Clone, PartialEq)]
pub struct LeaderboardBoard {
    pub panels: Vec<LeaderboardPanel>,
}

impl LeaderboardBoard {
    pub fn panel(&self, kind: LeaderboardKind) -> Option<&LeaderboardPanel> {
        self.panels.iter().find(|p| p.kind == kind)
    }

    pub fn failed_count(&self) -> usize {
        self.panels
            .iter()
            .filter(|p| matches!(p.state, PanelState::Unavailable { .. }))
            .count()
    }
}

/// Combine per-panel results. Errors only when all panels failed, in which
/// case the first error is returned.
pub fn settle(
    results: Vec<(LeaderboardKind, Result<Vec<LeaderboardEntry>>)>,
) -> Result<LeaderboardBoard> {
    let mut panels = Vec::with_capacity(results.len());
    let mut first_error: Option<ApiError> = None;

    for (kind, result) in results {
        let state = match result {
            Ok(entries) => PanelState::Loaded(entries),
            Err(e) => {
                warn!(panel = kind.path(), error = %e, "leaderboard panel failed");
                let message = e.user_message();
                first_error.get_or_insert(e);
                PanelState::Unavailable { message }
            }
        };
        panels.push(LeaderboardPanel { kind, state });
    }

    let all_failed = panels
        .iter()
        .all(|p| matches!(p.state, PanelState::Unavailable { .. }));
    match (all_failed, first_error) {
        (true, Some(e)) => Err(e),
        _ => Ok(LeaderboardBoard { panels }),
    }
}

impl ApiClient {
    /// GET one leaderboard panel.
    pub async fn fetch_leaderboard(&self, kind: LeaderboardKind) -> Result<Vec<LeaderboardEntry>> {
        self.get_json(kind.path(), &[]).await
    }

    /// Fetch every panel concurrently.
    pub async fn fetch_leaderboards(&self) -> Result<LeaderboardBoard> {
        let [a, b, c, d, e] = LeaderboardKind::ALL;
        let (ra, rb, rc, rd, re) = tokio::join!(
            self.fetch_leaderboard(a),
            self.fetch_leaderboard(b),
            self.fetch_leaderboard(c),
            self.fetch_leaderboard(d),
            self.fetch_leaderboard(e),
        );
        settle(vec![(a, ra), (b, rb), (c, rc), (d, rd), (e, re)])
    }
}
