//! Helpers for reading handler responses in integration tests.

use axum::{
    body::{to_bytes, Body},
    http::{header, Response},
};
use branchdesk::server::model::session::user::SessionUserId;
use branchdesk_test_utils::TestSetup;
use serde_json::Value;

/// Stores `user_id` in the test session as a successful login would
pub async fn log_in(test: &TestSetup, user_id: i32) {
    SessionUserId::insert(&test.session, user_id).await.unwrap();
}

pub fn location(response: &Response<Body>) -> Option<&str> {
    response
        .headers()
        .get(header::LOCATION)
        .and_then(|value| value.to_str().ok())
}

pub fn header_value<'a>(response: &'a Response<Body>, name: header::HeaderName) -> &'a str {
    response
        .headers()
        .get(name)
        .and_then(|value| value.to_str().ok())
        .unwrap_or_default()
}

pub async fn body_text(response: Response<Body>) -> String {
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();

    String::from_utf8(bytes.to_vec()).unwrap()
}

pub async fn body_json(response: Response<Body>) -> Value {
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();

    serde_json::from_slice(&bytes).unwrap()
}
