//! Cookie-based session tokens.

use reqwest::header::{HeaderMap, HeaderValue, COOKIE, SET_COOKIE};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::error::{ApiError, Result};

pub const ACCESS_TOKEN: &str = "ACCESS_TOKEN";
pub const REFRESH_TOKEN: &str = "REFRESH_TOKEN";

/// Access and refresh tokens issued by the backend as cookies.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionStore {
    pub access_token: Option<String>,
    pub refresh_token: Option<String>,
}

impl SessionStore {
    pub fn is_authenticated(&self) -> bool {
        self.access_token.is_some()
    }

    pub fn clear(&mut self) {
        self.access_token = None;
        self.refresh_token = None;
    }

    /// `Cookie` header value carrying every token we hold.
    pub fn cookie_header(&self) -> Option<HeaderValue> {
        let pairs: Vec<String> = [
            (ACCESS_TOKEN, &self.access_token),
            (REFRESH_TOKEN, &self.refresh_token),
        ]
        .iter()
        .filter_map(|(name, value)| value.as_ref().map(|v| format!("{}={}", name, v)))
        .collect();

        if pairs.is_empty() {
            return None;
        }
        HeaderValue::from_str(&pairs.join("; ")).ok()
    }

    /// Apply `Set-Cookie` headers from a response. An empty value or
    /// `Max-Age=0` removes the token.
    pub fn absorb_set_cookies(&mut self, headers: &HeaderMap) -> bool {
        let mut changed = false;
        for raw in headers.get_all(SET_COOKIE) {
            let Ok(raw) = raw.to_str() else { continue };
            let Some((name, value, expired)) = parse_set_cookie(raw) else {
                continue;
            };
            let slot = match name.as_str() {
                ACCESS_TOKEN => &mut self.access_token,
                REFRESH_TOKEN => &mut self.refresh_token,
                _ => continue,
            };
            *slot = if expired || value.is_empty() { None } else { Some(value) };
            changed = true;
        }
        changed
    }

    /// Load a persisted session; a missing file is an empty session.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let content = fs::read_to_string(path).map_err(|e| ApiError::Session(e.to_string()))?;
        serde_json::from_str(&content).map_err(|e| ApiError::Session(e.to_string()))
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|e| ApiError::Session(e.to_string()))?;
        }
        let content =
            serde_json::to_string_pretty(self).map_err(|e| ApiError::Session(e.to_string()))?;
        fs::write(path, content).map_err(|e| ApiError::Session(e.to_string()))
    }
}

/// Returns `(name, value, expired)` for one `Set-Cookie` header.
fn parse_set_cookie(raw: &str) -> Option<(String, String, bool)> {
    let mut parts = raw.split(';');
    let (name, value) = parts.next()?.trim().split_once('=')?;
    let expired = parts.any(|attr| {
        attr.trim()
            .split_once('=')
            .is_some_and(|(k, v)| k.trim().eq_ignore_ascii_case("max-age") && v.trim() == "0")
    });
    Some((name.trim().to_string(), value.trim().to_string(), expired))
}
