//! Bearer-token rejection and role/ownership gates.

use eyre::Result;
use reqwest::{Method, StatusCode};
use rstest::rstest;
use serde_json::{Value, json};

use super::support::{TestServer, bearer, error_message};

const AUTHENTICATED_ROUTES: &[(&str, &str)] = &[
    ("GET", "/api/auth/me"),
    ("GET", "/api/dashboard/metrics"),
    ("GET", "/api/clients"),
    ("POST", "/api/clients"),
    ("GET", "/api/clients/c1"),
    ("GET", "/api/conversations"),
    ("POST", "/api/conversations"),
    ("GET", "/api/conversations/conv-1/messages"),
    ("POST", "/api/messages"),
    ("GET", "/api/tests"),
    ("POST", "/api/tests"),
    ("GET", "/api/test-assignments"),
    ("POST", "/api/test-assignments"),
    ("PATCH", "/api/test-assignments/a1"),
];

#[rstest]
#[case::missing(None)]
#[case::bare_scheme(Some("Bearer"))]
#[case::empty_token(Some("Bearer "))]
#[case::lowercase_scheme(Some("bearer abc"))]
#[case::other_scheme(Some("Token abc"))]
#[case::unknown_token(Some("Bearer not-a-session"))]
#[tokio::test]
async fn authenticated_routes_reject_bad_tokens(#[case] header: Option<&'static str>) -> Result<()> {
    let server = TestServer::start().await?;

    for &(verb, path) in AUTHENTICATED_ROUTES {
        let method = Method::from_bytes(verb.as_bytes())?;
        let mut request = server.request(method, path).json(&json!({}));
        if let Some(value) = header {
            request = request.header("Authorization", value);
        }
        let response = request.send().await?;
        assert_eq!(
            response.status(),
            StatusCode::UNAUTHORIZED,
            "{path} with {header:?}"
        );
        assert!(!error_message(response).await?.is_empty());
    }
    Ok(())
}

#[tokio::test]
async fn client_user_lists_only_their_own_client() -> Result<()> {
    let server = TestServer::start().await?;
    let token = server.login("acme").await?;

    let clients: Vec<Value> = bearer(server.get("/api/clients"), &token)
        .send()
        .await?
        .json()
        .await?;

    assert_eq!(clients.len(), 1);
    assert_eq!(clients.first().map(|c| &c["id"]), Some(&json!("c1")));
    Ok(())
}

#[rstest]
#[case::clients("/api/clients")]
#[case::conversations("/api/conversations")]
#[case::conversations_for_another_client("/api/conversations?clientId=c1")]
#[tokio::test]
async fn unbound_client_user_sees_empty_lists(#[case] path: &'static str) -> Result<()> {
    let server = TestServer::start().await?;
    let token = server.login("pending").await?;

    let response = bearer(server.get(path), &token).send().await?;

    assert_eq!(response.status(), StatusCode::OK);
    let listed: Vec<Value> = response.json().await?;
    assert!(listed.is_empty(), "{path} returned {listed:?}");
    Ok(())
}

#[tokio::test]
async fn unbound_client_user_cannot_read_any_client() -> Result<()> {
    let server = TestServer::start().await?;
    let token = server.login("pending").await?;

    let response = bearer(server.get("/api/clients/c1"), &token).send().await?;

    assert_eq!(response.status(), StatusCode::FORBIDDEN);
    Ok(())
}

#[tokio::test]
async fn manager_lists_every_client() -> Result<()> {
    let server = TestServer::start().await?;
    let token = server.login("sarah").await?;

    let clients: Vec<Value> = bearer(server.get("/api/clients"), &token)
        .send()
        .await?
        .json()
        .await?;

    assert_eq!(clients.len(), 4);
    Ok(())
}

#[tokio::test]
async fn client_user_cannot_read_another_client() -> Result<()> {
    let server = TestServer::start().await?;
    let token = server.login("acme").await?;

    let own = bearer(server.get("/api/clients/c1"), &token).send().await?;
    assert_eq!(own.status(), StatusCode::OK);

    let other = bearer(server.get("/api/clients/c2"), &token).send().await?;
    assert_eq!(other.status(), StatusCode::FORBIDDEN);
    assert!(!error_message(other).await?.is_empty());
    Ok(())
}

#[rstest]
#[case::create_client("POST", "/api/clients")]
#[case::list_tests("GET", "/api/tests")]
#[case::create_test("POST", "/api/tests")]
#[tokio::test]
async fn manager_only_routes_forbid_client_users(
    #[case] method: &'static str,
    #[case] path: &'static str,
) -> Result<()> {
    let server = TestServer::start().await?;
    let token = server.login("acme").await?;

    let response = bearer(
        server.request(Method::from_bytes(method.as_bytes())?, path),
        &token,
    )
    .json(&json!({ "name": "Initech", "title": "Quiz", "createdBy": "client-user-1" }))
    .send()
    .await?;

    assert_eq!(response.status(), StatusCode::FORBIDDEN);
    Ok(())
}

#[tokio::test]
async fn client_conversation_filter_ignores_the_query() -> Result<()> {
    let server = TestServer::start().await?;
    let token = server.login("acme").await?;

    let conversations: Vec<Value> = bearer(server.get("/api/conversations?clientId=c2"), &token)
        .send()
        .await?
        .json()
        .await?;

    assert!(!conversations.is_empty());
    assert!(conversations.iter().all(|c| c["clientId"] == "c1"));
    Ok(())
}

#[tokio::test]
async fn client_user_cannot_touch_foreign_conversations() -> Result<()> {
    let server = TestServer::start().await?;
    let token = server.login("acme").await?;

    let history = bearer(server.get("/api/conversations/conv-2/messages"), &token)
        .send()
        .await?;
    assert_eq!(history.status(), StatusCode::FORBIDDEN);

    let post = bearer(server.post("/api/messages"), &token)
        .json(&json!({
            "conversationId": "conv-2",
            "senderId": "client-user-1",
            "senderType": "user",
            "content": "hello"
        }))
        .send()
        .await?;
    assert_eq!(post.status(), StatusCode::FORBIDDEN);
    Ok(())
}

#[tokio::test]
async fn client_user_posts_into_their_own_conversation() -> Result<()> {
    let server = TestServer::start().await?;
    let token = server.login("acme").await?;

    let response = bearer(server.post("/api/messages"), &token)
        .json(&json!({
            "conversationId": "conv-1",
            "senderId": "client-user-1",
            "senderType": "user",
            "content": "Any update on the rollout?"
        }))
        .send()
        .await?;

    assert_eq!(response.status(), StatusCode::CREATED);
    let created: Value = response.json().await?;
    assert_eq!(created["content"], "Any update on the rollout?");
    assert_eq!(created["isRead"], false);
    Ok(())
}

#[tokio::test]
async fn missing_conversation_is_not_found_before_ownership() -> Result<()> {
    let server = TestServer::start().await?;
    let token = server.login("acme").await?;

    let response = bearer(server.get("/api/conversations/nope/messages"), &token)
        .send()
        .await?;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert_eq!(error_message(response).await?, "Conversation not found");
    Ok(())
}

#[tokio::test]
async fn client_user_may_update_any_assignment() -> Result<()> {
    let server = TestServer::start().await?;
    let token = server.login("globex").await?;

    let response = bearer(
        server.request(Method::PATCH, "/api/test-assignments/a1"),
        &token,
    )
    .json(&json!({ "score": 77 }))
    .send()
    .await?;

    assert_eq!(response.status(), StatusCode::OK);
    let updated: Value = response.json().await?;
    assert_eq!(updated["score"], 77);
    Ok(())
}
