//! Command handlers behind the `srs` subcommands.

pub mod auth;
pub mod leaderboard;
pub mod queue;
pub mod recommend;
pub mod review;

pub use leaderboard::render_board;
pub use queue::{render_queue_page, ReviewQueueController};
pub use recommend::{render_feed, RecommendationFeed};
