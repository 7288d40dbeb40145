//! Public reads, creation, and payload validation.

use eyre::Result;
use reqwest::{Method, StatusCode};
use serde_json::{Value, json};

use super::support::{TestServer, bearer, error_message};

#[tokio::test]
async fn health_reports_ok() -> Result<()> {
    let server = TestServer::start().await?;

    let response = server.get("/api/health").send().await?;

    assert_eq!(response.status(), StatusCode::OK);
    let body: Value = response.json().await?;
    assert_eq!(body["status"], "ok");
    Ok(())
}

#[tokio::test]
async fn public_routes_need_no_token() -> Result<()> {
    let server = TestServer::start().await?;

    for path in ["/api/tests/t1", "/api/roi-metrics", "/api/activities"] {
        let response = server.get(path).send().await?;
        assert_eq!(response.status(), StatusCode::OK, "{path}");
    }
    let sync = server.post("/api/gmail/sync").send().await?;
    assert_eq!(sync.status(), StatusCode::OK);
    let body: Value = sync.json().await?;
    assert_eq!(body["success"], true);
    assert!(
        body["messagesImported"]
            .as_u64()
            .is_some_and(|n| (1..=10).contains(&n))
    );
    Ok(())
}

#[tokio::test]
async fn unknown_test_is_not_found() -> Result<()> {
    let server = TestServer::start().await?;

    let response = server.get("/api/tests/nope").send().await?;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert_eq!(error_message(response).await?, "Test not found");
    Ok(())
}

#[tokio::test]
async fn activities_honour_the_limit_newest_first() -> Result<()> {
    let server = TestServer::start().await?;

    let activities: Vec<Value> = server
        .get("/api/activities?limit=2")
        .send()
        .await?
        .json()
        .await?;

    let ids: Vec<&Value> = activities.iter().map(|a| &a["id"]).collect();
    assert_eq!(ids, [&json!("act-1"), &json!("act-2")]);
    Ok(())
}

#[tokio::test]
async fn non_numeric_limit_is_a_bad_request() -> Result<()> {
    let server = TestServer::start().await?;

    let response = server.get("/api/activities?limit=lots").send().await?;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert!(!error_message(response).await?.is_empty());
    Ok(())
}

#[tokio::test]
async fn public_creates_return_created() -> Result<()> {
    let server = TestServer::start().await?;

    let activity = server
        .post("/api/activities")
        .json(&json!({ "clientId": "c1", "activityType": "call", "title": "Kickoff" }))
        .send()
        .await?;
    assert_eq!(activity.status(), StatusCode::CREATED);

    let metric = server
        .post("/api/roi-metrics")
        .json(&json!({
            "clientId": "c1",
            "metricType": "cost_savings",
            "value": "12000",
            "period": "Q2"
        }))
        .send()
        .await?;
    assert_eq!(metric.status(), StatusCode::CREATED);
    Ok(())
}

#[tokio::test]
async fn manager_creates_and_reads_records() -> Result<()> {
    let server = TestServer::start().await?;
    let token = server.login("sarah").await?;

    let client = bearer(server.post("/api/clients"), &token)
        .json(&json!({ "name": "Initech", "roi": "110" }))
        .send()
        .await?;
    assert_eq!(client.status(), StatusCode::CREATED);
    let created: Value = client.json().await?;
    assert_eq!(created["status"], "active");

    let conversation = bearer(server.post("/api/conversations"), &token)
        .json(&json!({ "clientId": created["id"], "subject": "Welcome" }))
        .send()
        .await?;
    assert_eq!(conversation.status(), StatusCode::CREATED);

    let test = bearer(server.post("/api/tests"), &token)
        .json(&json!({ "title": "Adoption survey", "createdBy": "csm-1" }))
        .send()
        .await?;
    assert_eq!(test.status(), StatusCode::CREATED);

    let assignment = bearer(server.post("/api/test-assignments"), &token)
        .json(&json!({ "testId": "t1", "clientId": created["id"] }))
        .send()
        .await?;
    assert_eq!(assignment.status(), StatusCode::CREATED);
    let assigned: Value = assignment.json().await?;
    assert_eq!(assigned["status"], "pending");
    Ok(())
}

#[tokio::test]
async fn conversation_for_unknown_client_is_a_bad_request() -> Result<()> {
    let server = TestServer::start().await?;
    let token = server.login("sarah").await?;

    let response = bearer(server.post("/api/conversations"), &token)
        .json(&json!({ "clientId": "ghost" }))
        .send()
        .await?;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    Ok(())
}

#[tokio::test]
async fn malformed_client_payload_is_a_bad_request() -> Result<()> {
    let server = TestServer::start().await?;
    let token = server.login("sarah").await?;

    for body in [json!({}), json!({ "name": "" }), json!({ "name": "X", "roi": "lots" })] {
        let response = bearer(server.post("/api/clients"), &token)
            .json(&body)
            .send()
            .await?;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST, "{body}");
    }
    Ok(())
}

#[tokio::test]
async fn unknown_assignment_is_not_found() -> Result<()> {
    let server = TestServer::start().await?;
    let token = server.login("sarah").await?;

    let response = bearer(
        server.request(Method::PATCH, "/api/test-assignments/nope"),
        &token,
    )
    .json(&json!({ "status": "completed" }))
    .send()
    .await?;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    Ok(())
}

#[tokio::test]
async fn dashboard_metrics_default_to_the_configured_manager() -> Result<()> {
    let server = TestServer::start().await?;
    let token = server.login("sarah").await?;

    let metrics: Value = bearer(server.get("/api/dashboard/metrics"), &token)
        .send()
        .await?
        .json()
        .await?;

    assert_eq!(metrics["activeClients"], 2);
    assert_eq!(metrics["avgROI"], "173%");
    assert_eq!(metrics["activeTests"], 1);
    assert_eq!(metrics["unreadMessages"], 2);
    Ok(())
}
