//! REST client for the `/api/v1` backend.

pub mod auth;
pub mod leaderboard;
pub mod recommendations;
pub mod review;
pub mod session;

use reqwest::header::COOKIE;
use reqwest::{Client, Method, Response, StatusCode};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::sync::Arc;
use tokio::sync::{Mutex, RwLock};
use tracing::{debug, warn};

use crate::error::{ApiError, Result};
pub use session::SessionStore;

/// Paths that never trigger a silent refresh on 401.
const NO_REFRESH_PATHS: &[&str] = &[
    "/auth/login",
    "/auth/logout",
    "/auth/refresh",
    "/global-problems",
];

/// Generate an idempotency key for a mutating request.
pub fn new_request_id() -> String {
    uuid::Uuid::new_v4().to_string()
}

fn allows_refresh(path: &str) -> bool {
    !NO_REFRESH_PATHS.iter().any(|p| path.starts_with(p))
}

/// Inner state shared across clones.
struct ApiClientInner {
    client: Client,
    base_url: String,
    session: RwLock<SessionStore>,
    refresh_lock: Mutex<()>,
}

/// API client.
///
/// Clone-able; all clones share one session, so a refresh done by one
/// request is seen by every other.
#[derive(Clone)]
pub struct ApiClient {
    inner: Arc<ApiClientInner>,
}

impl ApiClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::with_session(base_url, SessionStore::default())
    }

    pub fn with_session(base_url: impl Into<String>, session: SessionStore) -> Self {
        let base_url: String = base_url.into();
        Self {
            inner: Arc::new(ApiClientInner {
                client: Client::new(),
                base_url: base_url.trim_end_matches('/').to_string(),
                session: RwLock::new(session),
                refresh_lock: Mutex::new(()),
            }),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.inner.base_url
    }

    /// Snapshot of the current session.
    pub async fn session(&self) -> SessionStore {
        self.inner.session.read().await.clone()
    }

    pub async fn clear_session(&self) {
        self.inner.session.write().await.clear();
    }

    pub(crate) async fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, String)],
    ) -> Result<T> {
        let resp = self.send(Method::GET, path, query, None).await?;
        decode(resp).await
    }

    pub(crate) async fn post_json<B: Serialize, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T> {
        let body = serde_json::to_value(body).map_err(|e| ApiError::Parse(e.to_string()))?;
        let resp = self.send(Method::POST, path, &[], Some(body)).await?;
        decode(resp).await
    }

    /// Send a request, refreshing the session and retrying once on 401.
    pub(crate) async fn send(
        &self,
        method: Method,
        path: &str,
        query: &[(&str, String)],
        body: Option<serde_json::Value>,
    ) -> Result<Response> {
        let used_token = self.inner.session.read().await.access_token.clone();
        let resp = self.send_once(method.clone(), path, query, body.as_ref()).await?;

        if resp.status() != StatusCode::UNAUTHORIZED || !allows_refresh(path) {
            return check_status(resp).await;
        }

        debug!(path, "access token rejected, refreshing session");
        match self.refresh_if_stale(used_token.as_deref()).await {
            Ok(()) => {
                let retry = self.send_once(method, path, query, body.as_ref()).await?;
                check_status(retry).await
            }
            Err(e) => {
                warn!(path, error = %e, "session refresh failed");
                if e.requires_relogin() {
                    self.clear_session().await;
                }
                check_status(resp).await
            }
        }
    }

    async fn send_once(
        &self,
        method: Method,
        path: &str,
        query: &[(&str, String)],
        body: Option<&serde_json::Value>,
    ) -> Result<Response> {
        let url = format!("{}{}", self.inner.base_url, path);
        let mut request = self.inner.client.request(method, &url);

        if !query.is_empty() {
            request = request.query(query);
        }
        if let Some(cookie) = self.inner.session.read().await.cookie_header() {
            request = request.header(COOKIE, cookie);
        }
        if let Some(body) = body {
            request = request.json(body);
        }

        let resp = request
            .send()
            .await
            .map_err(|e| ApiError::Network(e.to_string()))?;

        self.inner
            .session
            .write()
            .await
            .absorb_set_cookies(resp.headers());

        Ok(resp)
    }

    /// Refresh once per stale token: if another request already replaced
    /// the token we were rejected with, just retry with the new one.
    async fn refresh_if_stale(&self, rejected_token: Option<&str>) -> Result<()> {
        let _guard = self.inner.refresh_lock.lock().await;

        let current = self.inner.session.read().await.access_token.clone();
        if current.is_some() && current.as_deref() != rejected_token {
            return Ok(());
        }

        let resp = self.send_once(Method::POST, "/auth/refresh", &[], None).await?;
        check_status(resp).await.map(|_| ())
    }
}

/// Turn a non-2xx response into `ApiError::Http`.
async fn check_status(resp: Response) -> Result<Response> {
    let status = resp.status();
    if status.is_success() {
        return Ok(resp);
    }
    let message = resp.text().await.unwrap_or_default();
    Err(ApiError::Http {
        status: status.as_u16(),
        message,
    })
}

/// Read the body, reporting transport and JSON failures separately.
pub(crate) async fn decode<T: DeserializeOwned>(resp: Response) -> Result<T> {
    let text = resp
        .text()
        .await
        .map_err(|e| ApiError::Network(e.to_string()))?;
    serde_json::from_str(&text).map_err(|e| ApiError::Parse(e.to_string()))
}
