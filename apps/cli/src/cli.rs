//! Command-line interface definition.

use clap::{Parser, Subcommand};
use review_core::{DaysAheadFilter, FeedbackAction, Rating};

#[derive(Debug, Parser)]
#[command(name = "srs", version, about = "Spaced-repetition review client")]
pub struct Cli {
    /// Backend base URL, including the `/api/v1` prefix
    #[arg(long, global = true, env = "SRS_API_BASE_URL")]
    pub base_url: Option<String>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Log in and store the session
    Login {
        username: String,
        #[arg(long, env = "SRS_PASSWORD", hide_env_values = true)]
        password: String,
    },
    /// Create an account
    Register {
        username: String,
        email: String,
        #[arg(long, env = "SRS_PASSWORD", hide_env_values = true)]
        password: String,
    },
    /// End the session
    Logout,
    /// Show the prioritised review queue
    Queue {
        /// all, 1day, 3days or 7days
        #[arg(long, default_value = "all")]
        filter: DaysAheadFilter,
        #[arg(long, default_value_t = 1)]
        page: u32,
        #[arg(long)]
        page_size: Option<u32>,
        /// Mark problems that also appear in the recommendation feed
        #[arg(long)]
        with_recommendations: bool,
    },
    /// Record a review result
    Review {
        problem_id: i64,
        /// again, hard, good, easy or 1-4
        rating: Rating,
        /// Review outside the schedule
        #[arg(long)]
        manual: bool,
    },
    /// Re-fit the scheduler parameters from the review history
    Optimize,
    /// Show recommended problems
    Recommend {
        #[arg(long)]
        limit: Option<u32>,
        /// Number of pages to load
        #[arg(long, default_value_t = 1)]
        pages: usize,
    },
    /// Send feedback on a recommendation
    Feedback {
        problem_id: i64,
        /// accepted, skipped, solved or hidden
        action: FeedbackAction,
        #[arg(long)]
        helpful: Option<bool>,
    },
    /// Show all leaderboards
    Leaderboard,
}
