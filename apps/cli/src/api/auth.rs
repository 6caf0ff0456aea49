//! Authentication endpoints.

use serde::{Deserialize, Serialize};
use tracing::info;

use super::{new_request_id, ApiClient};
use crate::error::Result;

#[derive(Debug, Serialize)]
struct LoginRequest<'a> {
    username: &'a str,
    password: &'a str,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct RegisterRequest<'a> {
    username: &'a str,
    email: &'a str,
    password: &'a str,
    request_id: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct LogoutRequest {
    request_id: String,
}

/// Authenticated user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserInfo {
    pub id: i64,
    pub username: String,
    #[serde(default)]
    pub email: Option<String>,
}

/// Response body of the auth endpoints. Tokens arrive as cookies.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthResponse {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub user: Option<UserInfo>,
}

impl ApiClient {
    /// POST /auth/login
    pub async fn login(&self, username: &str, password: &str) -> Result<AuthResponse> {
        let response: AuthResponse = self
            .post_json("/auth/login", &LoginRequest { username, password })
            .await?;
        info!(username, "logged in");
        Ok(response)
    }

    /// POST /auth/register
    pub async fn register(
        &self,
        username: &str,
        email: &str,
        password: &str,
    ) -> Result<AuthResponse> {
        let request = RegisterRequest {
            username,
            email,
            password,
            request_id: new_request_id(),
        };
        self.post_json("/auth/register", &request).await
    }

    /// POST /auth/logout. The local session is cleared even if the call fails.
    pub async fn logout(&self) -> Result<AuthResponse> {
        let request = LogoutRequest {
            request_id: new_request_id(),
        };
        let result = self.post_json("/auth/logout", &request).await;
        self.clear_session().await;
        result
    }
}
