//! Tests for the assembled router with a session layer over an in-memory store.

use axum::{
    body::Body,
    http::{header, Method, Request, StatusCode},
    Router,
};
use branchdesk::server::{model::app::AppState, router::routes};
use branchdesk_test_utils::prelude::*;
use tower::ServiceExt;
use tower_sessions::{MemoryStore, SessionManagerLayer};

use crate::util::{body_json, header_value, location};

fn app(test: &TestSetup) -> Router {
    routes()
        .with_state(test.state::<AppState>())
        .layer(SessionManagerLayer::new(MemoryStore::default()))
}

fn get(uri: &str) -> Request<Body> {
    Request::builder()
        .uri(uri)
        .body(Body::empty())
        .unwrap()
}

/// Expect protected API routes to send anonymous visitors to login
#[tokio::test]
async fn redirects_anonymous_to_login() -> Result<(), TestError> {
    let test = test_setup_with_domain_tables!()?;

    for uri in ["/api/branches", "/api/transactions/export", "/api/dashboard"] {
        let response = app(&test).oneshot(get(uri)).await.unwrap();

        assert_eq!(response.status(), StatusCode::SEE_OTHER, "{uri}");
        assert_eq!(location(&response), Some("/auth/login"), "{uri}");
    }

    Ok(())
}

/// Expect the login page to be served as HTML
#[tokio::test]
async fn serves_login_page() -> Result<(), TestError> {
    let test = test_setup_with_domain_tables!()?;

    let response = app(&test).oneshot(get("/auth/login")).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert!(header_value(&response, header::CONTENT_TYPE).starts_with("text/html"));

    Ok(())
}

/// Expect a form-encoded login to set a session cookie and redirect
#[tokio::test]
async fn login_sets_session_cookie() -> Result<(), TestError> {
    let test = TestBuilder::new()
        .with_domain_tables()
        .with_user("admin", "pw", true, &[])
        .build()
        .await?;

    let request = Request::builder()
        .method(Method::POST)
        .uri("/auth/login")
        .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
        .body(Body::from("username=admin&password=pw"))
        .unwrap();
    let response = app(&test).oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), Some("/api/dashboard"));
    assert!(response.headers().contains_key(header::SET_COOKIE));

    Ok(())
}

/// Expect the OpenAPI document to list the registered paths
#[tokio::test]
async fn serves_openapi_document() -> Result<(), TestError> {
    let test = test_setup_with_domain_tables!()?;

    let response = app(&test)
        .oneshot(get("/api/docs/openapi.json"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let document = body_json(response).await;
    let paths = &document["paths"];
    assert!(paths["/api/branches/{id}/delete"]["post"].is_object());
    assert!(paths["/api/work-logs/export"]["get"].is_object());
    assert!(paths["/api/staff/by-branch"]["get"].is_object());

    Ok(())
}
