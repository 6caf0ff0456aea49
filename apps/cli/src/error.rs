//! Error handling for the API client.

use thiserror::Error;

/// API error types.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Network error: {0}")]
    Network(String),

    #[error("Backend error: {status} - {message}")]
    Http { status: u16, message: String },

    #[error("Parse error: {0}")]
    Parse(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Session storage error: {0}")]
    Session(String),

    #[error(transparent)]
    Core(#[from] review_core::CoreError),
}

impl ApiError {
    /// HTTP status, `0` when the request never got a response.
    pub fn status(&self) -> u16 {
        match self {
            ApiError::Http { status, .. } => *status,
            _ => 0,
        }
    }

    /// The session is gone and the user has to log in again.
    pub fn requires_relogin(&self) -> bool {
        self.status() == 401
    }

    /// Message to show the user.
    pub fn user_message(&self) -> String {
        match self {
            ApiError::Network(_) => "网络连接失败，请检查网络设置".to_string(),
            ApiError::Parse(_) => "服务器响应格式错误".to_string(),
            ApiError::Config(msg) => format!("配置错误：{}", msg),
            ApiError::Session(_) => "无法读取或保存登录状态".to_string(),
            ApiError::Core(e) => format!("参数错误：{}", e),
            ApiError::Http { status, .. } => match status {
                401 => "登录已过期，请重新登录".to_string(),
                403 => "没有权限执行此操作".to_string(),
                429 => "请求过于频繁，请稍后再试".to_string(),
                503 => "服务暂时不可用，请稍后再试".to_string(),
                _ => "请求失败，请稍后重试".to_string(),
            },
        }
    }
}

/// Result type alias for API operations.
pub type Result<T> = std::result::Result<T, ApiError>;
