pub mod api;
pub mod cli;
pub mod commands;
pub mod config;
pub mod error;

use std::path::Path;

use chrono::Utc;
use clap::Parser;
use review_core::{RecommendedIds, ReviewType};
use tracing::warn;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::api::recommendations::RecommendationQuery;
use crate::api::{ApiClient, SessionStore};
use crate::cli::{Cli, Command};
use crate::commands::{
    auth, render_board, render_feed, render_queue_page, review, RecommendationFeed,
    ReviewQueueController,
};
use crate::config::Config;
use crate::error::ApiError;

pub async fn run() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "info".into()),
        ))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();
    let mut config = Config::from_env()?;
    if let Some(base_url) = cli.base_url.as_deref() {
        config = config.with_base_url(base_url)?;
    }

    let session = load_session(&config.session_file);
    let client = ApiClient::with_session(config.base_url.clone(), session);

    let outcome = execute(&client, &config, cli.command).await;

    if let Err(e) = client.session().await.save(&config.session_file) {
        warn!(error = %e, "could not persist session");
    }

    match outcome {
        Ok(output) => {
            print!("{}", output);
            Ok(())
        }
        Err(e) => {
            eprint!("{}", error_report(&e));
            std::process::exit(1);
        }
    }
}

/// A persisted session that cannot be read is treated as logged out, so
/// `login` can still replace it.
pub fn load_session(path: &Path) -> SessionStore {
    SessionStore::load(path).unwrap_or_else(|e| {
        warn!(path = %path.display(), error = %e, "ignoring unreadable session file");
        SessionStore::default()
    })
}

/// What the user sees on stderr when a command fails.
pub fn error_report(e: &ApiError) -> String {
    let mut out = format!("{}\n", e.user_message());
    if e.requires_relogin() {
        out.push_str("请运行 `srs login <用户名>` 重新登录\n");
    }
    out
}

/// Run one command and return what should be printed.
pub async fn execute(
    client: &ApiClient,
    config: &Config,
    command: Command,
) -> Result<String, ApiError> {
    let now = Utc::now();
    let recommendation_query = || {
        let mut query = RecommendationQuery::new(config.recommendation_limit);
        query.ab_group = config.ab_group.clone();
        query
    };

    let output = match command {
        Command::Login { username, password } => {
            auth::login(client, &username, &password).await?
        }
        Command::Register {
            username,
            email,
            password,
        } => auth::register(client, &username, &email, &password).await?,
        Command::Logout => auth::logout(client).await,
        Command::Queue {
            filter,
            page,
            page_size,
            with_recommendations,
        } => {
            let mut recommended = RecommendedIds::new();
            if with_recommendations {
                let mut feed = RecommendationFeed::new(client.clone(), recommendation_query());
                if let Err(e) = feed.load_first(&mut recommended).await {
                    warn!(error = %e, "recommendations unavailable, skipping badges");
                }
            }

            let mut controller =
                ReviewQueueController::new(client.clone(), page_size.unwrap_or(config.page_size))?;
            controller.set_filter(filter);
            controller.set_page(page);
            match controller.load(now).await? {
                Some(page) => render_queue_page(&page, &recommended, now),
                None => String::new(),
            }
        }
        Command::Review {
            problem_id,
            rating,
            manual,
        } => {
            let review_type = if manual {
                ReviewType::Manual
            } else {
                ReviewType::Scheduled
            };
            review::submit(client, problem_id, rating, review_type, now).await?
        }
        Command::Optimize => review::optimize(client).await?,
        Command::Recommend { limit, pages } => {
            let mut query = recommendation_query();
            if let Some(limit) = limit {
                query.limit = limit;
            }
            let mut registry = RecommendedIds::new();
            let mut feed = RecommendationFeed::new(client.clone(), query);
            // A failed page is rendered inline with whatever loaded before it.
            if let Err(e) = feed.load_pages(pages.max(1), &mut registry).await {
                warn!(error = %e, "recommendation feed stopped early");
            }
            render_feed(feed.list())
        }
        Command::Feedback {
            problem_id,
            action,
            helpful,
        } => {
            let mut registry = RecommendedIds::new();
            let mut feed = RecommendationFeed::new(client.clone(), recommendation_query());
            if let Err(e) = feed.load_first(&mut registry).await {
                warn!(error = %e, "sending feedback without a recommendation id");
            }
            feed.submit_feedback(problem_id, action, helpful, now).await;
            feed.toast(now)
                .map(|toast| format!("{}\n", toast.message))
                .unwrap_or_default()
        }
        Command::Leaderboard => render_board(&client.fetch_leaderboards().await?),
    };
    Ok(output)
}
