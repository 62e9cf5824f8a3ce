use axum::{extract::State, http::StatusCode, response::IntoResponse, Form};
use branchdesk::server::{
    controller::auth::{get_user, login, login_page, logout, LoginForm},
    model::{app::AppState, session::user::SessionUserId},
};
use branchdesk_test_utils::prelude::*;

use crate::util::{body_json, body_text, location, log_in};

fn credentials(username: &str, password: &str) -> Form<LoginForm> {
    Form(LoginForm {
        username: username.to_string(),
        password: password.to_string(),
    })
}

/// Expect a superuser to land on the dashboard with the user stored in session
#[tokio::test]
async fn login_redirects_superuser_to_dashboard() -> Result<(), TestError> {
    let test = TestBuilder::new()
        .with_domain_tables()
        .with_user("admin", "correct horse", true, &[])
        .build()
        .await?;
    let state: AppState = test.state();

    let result = login(
        State(state),
        test.session.clone(),
        credentials("admin", "correct horse"),
    )
    .await;

    let response = result.unwrap().into_response();
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), Some("/api/dashboard"));
    assert_eq!(SessionUserId::get(&test.session).await.unwrap(), Some(1));

    Ok(())
}

/// Expect a branch manager to land on the work log listing
#[tokio::test]
async fn login_redirects_branch_manager_to_work_logs() -> Result<(), TestError> {
    let test = TestBuilder::new()
        .with_domain_tables()
        .with_user("mehmet", "pw", false, &[UserGroup::BranchManager])
        .build()
        .await?;
    let state: AppState = test.state();

    let result = login(State(state), test.session.clone(), credentials("mehmet", "pw")).await;

    let response = result.unwrap().into_response();
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), Some("/api/work-logs"));

    Ok(())
}

/// Expect 401 with the form shown again and no session user for a wrong password
#[tokio::test]
async fn login_rejects_wrong_password() -> Result<(), TestError> {
    let test = TestBuilder::new()
        .with_domain_tables()
        .with_user("admin", "pw", true, &[])
        .build()
        .await?;
    let state: AppState = test.state();

    let result = login(State(state), test.session.clone(), credentials("admin", "nope")).await;

    let response = result.unwrap().into_response();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    assert!(SessionUserId::get(&test.session).await.unwrap().is_none());
    let page = body_text(response).await;
    assert!(page.contains("Invalid username or password."));
    assert!(page.contains("value=\"admin\""));

    Ok(())
}

/// Expect the login form for anonymous visitors
#[tokio::test]
async fn login_page_renders_for_anonymous() -> Result<(), TestError> {
    let test = test_setup_with_domain_tables!()?;
    let state: AppState = test.state();

    let result = login_page(State(state), test.session.clone()).await;

    let response = result.unwrap().into_response();
    assert_eq!(response.status(), StatusCode::OK);
    assert!(body_text(response).await.contains("action=\"/auth/login\""));

    Ok(())
}

/// Expect an already logged in user to be redirected away from the login page
#[tokio::test]
async fn login_page_redirects_authenticated() -> Result<(), TestError> {
    let test = TestBuilder::new()
        .with_domain_tables()
        .with_user("ayse", "pw", false, &[UserGroup::Owner])
        .build()
        .await?;
    let state: AppState = test.state();
    log_in(&test, 1).await;

    let result = login_page(State(state), test.session.clone()).await;

    let response = result.unwrap().into_response();
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), Some("/api/dashboard"));

    Ok(())
}

/// Expect logout to clear the session user and redirect to login
#[tokio::test]
async fn logout_clears_session() -> Result<(), TestError> {
    let test = test_setup_with_domain_tables!()?;
    log_in(&test, 1).await;

    let result = logout(test.session.clone()).await;

    let response = result.unwrap().into_response();
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), Some("/auth/login"));
    assert!(SessionUserId::get(&test.session).await.unwrap().is_none());

    Ok(())
}

/// Expect logout without a session user to redirect without failing
#[tokio::test]
async fn logout_without_session() -> Result<(), TestError> {
    let test = test_setup_with_domain_tables!()?;

    let result = logout(test.session.clone()).await;

    let response = result.unwrap().into_response();
    assert_eq!(response.status(), StatusCode::SEE_OTHER);

    Ok(())
}

/// Expect the current user with groups and granted permissions
#[tokio::test]
async fn get_user_returns_identity() -> Result<(), TestError> {
    let test = TestBuilder::new()
        .with_domain_tables()
        .with_user("mehmet", "pw", false, &[UserGroup::BranchManager])
        .build()
        .await?;
    let state: AppState = test.state();
    log_in(&test, 1).await;

    let result = get_user(State(state), test.session.clone()).await;

    let response = result.unwrap().into_response();
    assert_eq!(response.status(), StatusCode::OK);
    let user = body_json(response).await;
    assert_eq!(user["username"], "mehmet");
    assert_eq!(user["groups"][0], "branch_manager");
    assert_eq!(user["branch_manager_restricted"], true);
    let permissions = user["permissions"].as_array().unwrap();
    assert!(permissions.iter().any(|p| p == "add_work_log"));
    assert!(!permissions.iter().any(|p| p == "view_transaction"));

    Ok(())
}

/// Expect anonymous requests for the current user to be sent to login
#[tokio::test]
async fn get_user_redirects_anonymous() -> Result<(), TestError> {
    let test = test_setup_with_domain_tables!()?;
    let state: AppState = test.state();

    let result = get_user(State(state), test.session.clone()).await;

    let response = result.into_response();
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), Some("/auth/login"));

    Ok(())
}
