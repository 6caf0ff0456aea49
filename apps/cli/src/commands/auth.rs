//! Login, registration and logout.

use tracing::warn;

use crate::api::ApiClient;
use crate::error::Result;

pub async fn login(client: &ApiClient, username: &str, password: &str) -> Result<String> {
    let response = client.login(username, password).await?;
    let name = response
        .user
        .map(|u| u.username)
        .unwrap_or_else(|| username.to_string());
    Ok(format!("欢迎回来，{}", name))
}

pub async fn register(
    client: &ApiClient,
    username: &str,
    email: &str,
    password: &str,
) -> Result<String> {
    let response = client.register(username, email, password).await?;
    Ok(response
        .message
        .unwrap_or_else(|| "注册成功，请登录".to_string()))
}

/// Logging out always succeeds locally.
pub async fn logout(client: &ApiClient) -> String {
    if let Err(e) = client.logout().await {
        warn!(error = %e, "logout request failed, local session cleared anyway");
    }
    "已退出登录".to_string()
}
