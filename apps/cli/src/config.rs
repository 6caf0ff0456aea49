//! Client configuration loaded from the environment.

use std::path::PathBuf;

use crate::error::{ApiError, Result};

pub const DEFAULT_BASE_URL: &str = "http://localhost:8080/api/v1";

/// Runtime configuration.
///
/// Env vars (a `.env` file is honoured):
/// - SRS_API_BASE_URL: backend base URL including `/api/v1`
/// - SRS_PAGE_SIZE: review queue page size (default 10)
/// - SRS_RECOMMENDATION_LIMIT: recommendations per page (default 10)
/// - SRS_AB_GROUP: optional A/B bucket forwarded to the recommender
/// - SRS_SESSION_FILE: where session cookies are persisted
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub base_url: String,
    pub page_size: u32,
    pub recommendation_limit: u32,
    pub ab_group: Option<String>,
    pub session_file: PathBuf,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            page_size: review_core::pagination::DEFAULT_PAGE_SIZE,
            recommendation_limit: 10,
            ab_group: None,
            session_file: default_session_file(),
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from an arbitrary key lookup; unset keys keep their defaults.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let defaults = Self::default();

        let base_url = normalize_base_url(
            &lookup("SRS_API_BASE_URL").unwrap_or(defaults.base_url),
        )?;

        let page_size = parse_positive(&lookup, "SRS_PAGE_SIZE", defaults.page_size)?;
        let recommendation_limit = parse_positive(
            &lookup,
            "SRS_RECOMMENDATION_LIMIT",
            defaults.recommendation_limit,
        )?;

        Ok(Self {
            base_url,
            page_size,
            recommendation_limit,
            ab_group: lookup("SRS_AB_GROUP").filter(|g| !g.is_empty()),
            session_file: lookup("SRS_SESSION_FILE")
                .map(PathBuf::from)
                .unwrap_or(defaults.session_file),
        })
    }
}

impl Config {
    /// Replace the base URL, applying the same checks as the environment.
    pub fn with_base_url(mut self, base_url: &str) -> Result<Self> {
        self.base_url = normalize_base_url(base_url)?;
        Ok(self)
    }
}

fn normalize_base_url(raw: &str) -> Result<String> {
    if !raw.starts_with("http://") && !raw.starts_with("https://") {
        return Err(ApiError::Config(format!(
            "base URL must be an http(s) URL, got {}",
            raw
        )));
    }
    Ok(raw.trim_end_matches('/').to_string())
}

fn parse_positive(
    lookup: &impl Fn(&str) -> Option<String>,
    key: &str,
    default: u32,
) -> Result<u32> {
    match lookup(key) {
        None => Ok(default),
        Some(raw) => match raw.parse::<u32>() {
            Ok(value) if value > 0 => Ok(value),
            _ => Err(ApiError::Config(format!(
                "{} must be a positive integer, got {}",
                key, raw
            ))),
        },
    }
}

fn default_session_file() -> PathBuf {
    dirs::data_local_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("srs-client")
        .join("session.json")
}
