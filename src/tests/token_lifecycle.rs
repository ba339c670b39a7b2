#[cfg(test)]
mod test {

    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    use axum::Router;
    use chrono::Utc;
    use httpmock::Method::POST;
    use httpmock::MockServer;
    use serde_json::json;

    use crate::cache::token::AccessToken;
    use crate::cache::token_manager::TokenManager;
    use crate::error::AuditError;
    use crate::tests::common::{build_reqwest_client, credentials, spawn_axum, token_route, TOKEN_PATH};

    #[test]
    fn token_expiring_now_is_expired() {
        let token = AccessToken::new("value".into(), 100);
        assert!(token.is_valid_at(99));
        assert!(!token.is_valid_at(100));
        assert!(!token.is_valid_at(101));
        assert_eq!(token.bearer(), "Bearer value");
    }

    #[tokio::test]
    async fn sends_client_credentials_grant() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(POST)
                    .path(TOKEN_PATH)
                    .header("authorization", "Basic a2V5OnNlY3JldA==")
                    .header("content-type", "application/x-www-form-urlencoded")
                    .body("grant_type=client_credentials");
                then.status(200)
                    .json_body(json!({"access_token": "abc-123", "expires_in": 60}));
            })
            .await;

        let tokens = TokenManager::new(build_reqwest_client(), credentials(&server.url(TOKEN_PATH)), 3600);
        let token = tokens.get_valid_token().await.expect("token");

        let now = Utc::now().timestamp();
        assert_eq!(token.value, "abc-123");
        // configured lifetime wins over expires_in
        assert!(token.expires_at > now + 60);
        assert!(token.expires_at <= now + 3600);
        assert_eq!(tokens.cached().await, Some(token));
    }

    #[tokio::test]
    async fn valid_token_is_not_requested_again() {
        let issued = Arc::new(AtomicUsize::new(0));
        let (handle, addr) = spawn_axum(token_route(Router::new(), issued.clone())).await;

        let tokens = TokenManager::new(build_reqwest_client(), credentials(&format!("http://{}{}", addr, TOKEN_PATH)), 3600);
        for _ in 0..3 {
            assert_eq!(tokens.get_valid_token().await.unwrap().value, "token-1");
        }
        assert_eq!(issued.load(Ordering::SeqCst), 1);

        handle.abort();
    }

    #[tokio::test]
    async fn expired_token_is_always_requested_again() {
        let issued = Arc::new(AtomicUsize::new(0));
        let (handle, addr) = spawn_axum(token_route(Router::new(), issued.clone())).await;

        // zero lifetime: expires_at == now, which already counts as expired
        let tokens = TokenManager::new(build_reqwest_client(), credentials(&format!("http://{}{}", addr, TOKEN_PATH)), 0);
        let values = vec![
            tokens.get_valid_token().await.unwrap().value,
            tokens.get_valid_token().await.unwrap().value,
            tokens.get_valid_token().await.unwrap().value,
        ];
        assert_eq!(values, vec!["token-1", "token-2", "token-3"]);
        assert_eq!(issued.load(Ordering::SeqCst), 3);

        handle.abort();
    }

    #[tokio::test]
    async fn huge_lifetime_saturates_instead_of_wrapping() {
        let issued = Arc::new(AtomicUsize::new(0));
        let (handle, addr) = spawn_axum(token_route(Router::new(), issued.clone())).await;

        let tokens = TokenManager::new(build_reqwest_client(), credentials(&format!("http://{}{}", addr, TOKEN_PATH)), u64::MAX);
        let token = tokens.get_valid_token().await.unwrap();
        assert_eq!(token.expires_at, i64::MAX);
        assert_eq!(tokens.get_valid_token().await.unwrap().value, "token-1");
        assert_eq!(issued.load(Ordering::SeqCst), 1);

        handle.abort();
    }

    #[tokio::test]
    async fn rejected_credentials_are_fatal() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(POST).path(TOKEN_PATH);
                then.status(401).body("invalid_client");
            })
            .await;

        let tokens = TokenManager::new(build_reqwest_client(), credentials(&server.url(TOKEN_PATH)), 3600);
        let err = tokens.get_valid_token().await.unwrap_err();

        match err {
            AuditError::Authentication { status, body } => {
                assert_eq!(status, 401);
                assert_eq!(body, "invalid_client");
            }
            other => panic!("unexpected error {:?}", other),
        }
        assert!(tokens.cached().await.is_none());
    }

    #[tokio::test]
    async fn token_response_without_access_token_is_rejected() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(POST).path(TOKEN_PATH);
                then.status(200).json_body(json!({"token_type": "bearer"}));
            })
            .await;

        let tokens = TokenManager::new(build_reqwest_client(), credentials(&server.url(TOKEN_PATH)), 3600);
        let err = tokens.get_valid_token().await.unwrap_err();
        assert!(matches!(err, AuditError::InvalidTokenResponse(_)), "unexpected error {:?}", err);
    }
}
