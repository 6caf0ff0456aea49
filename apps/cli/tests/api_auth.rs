//! Session and silent-refresh tests against the fake backend.

mod common;

use common::FakeBackend;
use pretty_assertions::assert_eq;
use review_core::pagination::QueueQuery;
use srs_client::error::ApiError;

fn first_page() -> QueueQuery {
    QueueQuery {
        limit: None,
        page: 1,
        page_size: 10,
        show_all: false,
    }
}

/// Login stores both tokens from Set-Cookie.
#[tokio::test]
async fn test_login_stores_session_cookies() {
    let backend = FakeBackend::start().await;
    let client = backend.client();

    let response = client.login(common::USERNAME, common::PASSWORD).await.unwrap();

    assert!(response.success);
    assert_eq!(response.user.unwrap().username, common::USERNAME);
    let session = client.session().await;
    assert_eq!(session.access_token.as_deref(), Some("access-1"));
    assert_eq!(session.refresh_token.as_deref(), Some("refresh-1"));
}

/// A rejected login is reported as-is and never triggers a refresh.
#[tokio::test]
async fn test_bad_credentials_do_not_refresh() {
    let backend = FakeBackend::start().await;
    let client = backend.client();

    let err = client.login(common::USERNAME, "wrong").await.unwrap_err();

    assert_eq!(err.status(), 401);
    assert_eq!(backend.state().refresh_calls, 0);
    assert!(!client.session().await.is_authenticated());
}

/// An expired access token is refreshed once and the request retried.
#[tokio::test]
async fn test_expired_token_refreshes_and_retries() {
    let backend = FakeBackend::start().await;
    let client = backend.logged_in_client().await;
    backend.expire_access_token();

    let response = client.fetch_review_queue(&first_page()).await.unwrap();

    assert!(response.cards.is_empty());
    assert_eq!(backend.state().refresh_calls, 1);
    assert_eq!(backend.state().queue_requests.len(), 1);
    assert_eq!(
        client.session().await.access_token.as_deref(),
        Some("access-2")
    );
}

/// Requests rejected together share a single refresh.
#[tokio::test]
async fn test_concurrent_401s_share_one_refresh() {
    let backend = FakeBackend::start().await;
    let client = backend.logged_in_client().await;
    backend.expire_access_token();

    let query = first_page();
    let (a, b) = tokio::join!(
        client.fetch_review_queue(&query),
        client.fetch_review_queue(&query)
    );

    assert!(a.is_ok());
    assert!(b.is_ok());
    assert_eq!(backend.state().refresh_calls, 1);
}

/// A failed refresh surfaces the original 401 and drops the session.
#[tokio::test]
async fn test_failed_refresh_requires_relogin() {
    let backend = FakeBackend::start().await;
    let client = backend.logged_in_client().await;
    backend.expire_access_token();
    backend.state().refresh_rejected = true;

    let err = client.fetch_review_queue(&first_page()).await.unwrap_err();

    assert!(matches!(err, ApiError::Http { status: 401, .. }));
    assert!(err.requires_relogin());
    assert_eq!(err.user_message(), "登录已过期，请重新登录");
    assert_eq!(backend.state().refresh_calls, 1);
    assert!(!client.session().await.is_authenticated());
}

/// Logout clears the local session and the server's tokens.
#[tokio::test]
async fn test_logout_clears_session() {
    let backend = FakeBackend::start().await;
    let client = backend.logged_in_client().await;

    client.logout().await.unwrap();

    assert!(!client.session().await.is_authenticated());
    assert!(backend.state().access_token.is_none());
}

/// Without a session nothing can be refreshed.
#[tokio::test]
async fn test_anonymous_request_fails_after_single_refresh_attempt() {
    let backend = FakeBackend::start().await;
    let client = backend.client();

    let err = client.fetch_review_queue(&first_page()).await.unwrap_err();

    assert_eq!(err.status(), 401);
    assert_eq!(backend.state().refresh_calls, 1);
}
