//! Leaderboard screen.

use crate::api::leaderboard::{LeaderboardBoard, PanelState};

/// Plain-text rendering of every panel; failed panels are marked unavailable.
pub fn render_board(board: &LeaderboardBoard) -> String {
    let mut out = String::new();
    for panel in &board.panels {
        out.push_str(&format!("== {} ==\n", panel.kind.title()));
        match &panel.state {
            PanelState::Loaded(entries) if entries.is_empty() => out.push_str("  暂无数据\n"),
            PanelState::Loaded(entries) => {
                for entry in entries {
                    out.push_str(&format!(
                        "  {:>3}. {:<20} {}\n",
                        entry.rank, entry.username, entry.value
                    ));
                }
            }
            PanelState::Unavailable { message } => {
                out.push_str(&format!("  暂不可用（{}）\n", message));
            }
        }
    }
    out
}
