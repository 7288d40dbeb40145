//! Login, current user, and logout.

use eyre::Result;
use reqwest::StatusCode;
use serde_json::{Value, json};

use super::support::{TestServer, bearer, error_message};

#[tokio::test]
async fn login_returns_user_and_token() -> Result<()> {
    let server = TestServer::start().await?;

    let body: Value = server
        .post("/api/auth/login")
        .json(&json!({ "username": "sarah", "password": "password123" }))
        .send()
        .await?
        .json()
        .await?;

    assert_eq!(body["user"]["username"], "sarah");
    assert_eq!(body["user"]["role"], "csm");
    assert!(body["token"].as_str().is_some_and(|t| !t.is_empty()));
    Ok(())
}

#[tokio::test]
async fn bad_password_is_unauthorized() -> Result<()> {
    let server = TestServer::start().await?;

    let response = server
        .post("/api/auth/login")
        .json(&json!({ "username": "sarah", "password": "nope" }))
        .send()
        .await?;

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(error_message(response).await?, "Invalid username or password");
    Ok(())
}

#[tokio::test]
async fn malformed_login_body_is_a_bad_request() -> Result<()> {
    let server = TestServer::start().await?;

    for body in [json!({ "username": "sarah" }), json!({ "username": "", "password": "x" })] {
        let response = server.post("/api/auth/login").json(&body).send().await?;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(error_message(response).await?, "Invalid login data");
    }
    Ok(())
}

#[tokio::test]
async fn me_returns_the_attached_user() -> Result<()> {
    let server = TestServer::start().await?;
    let token = server.login("acme").await?;

    let me: Value = bearer(server.get("/api/auth/me"), &token)
        .send()
        .await?
        .json()
        .await?;

    assert_eq!(me["role"], "client");
    assert_eq!(me["clientId"], "c1");
    Ok(())
}

#[tokio::test]
async fn logout_twice_succeeds_and_revokes_the_token() -> Result<()> {
    let server = TestServer::start().await?;
    let token = server.login("sarah").await?;

    for _ in 0..2 {
        let response = bearer(server.post("/api/auth/logout"), &token).send().await?;
        assert_eq!(response.status(), StatusCode::OK);
        let body: Value = response.json().await?;
        assert_eq!(body["message"], "Logged out successfully");
    }

    let me = bearer(server.get("/api/auth/me"), &token).send().await?;
    assert_eq!(me.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(error_message(me).await?, "Invalid or expired token");
    Ok(())
}

#[tokio::test]
async fn logout_without_a_bearer_header_is_unauthorized() -> Result<()> {
    let server = TestServer::start().await?;

    let response = server
        .post("/api/auth/logout")
        .header("Authorization", "Basic abc")
        .send()
        .await?;

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    Ok(())
}
