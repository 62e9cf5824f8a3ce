use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    Form,
};
use branchdesk::server::{
    controller::branch::{
        confirm_delete_branch, create_branch, delete_branch, edit_branch, list_branches,
        update_branch, BranchListParams,
    },
    form::branch::BranchForm,
    model::app::AppState,
};
use branchdesk_test_utils::prelude::*;

use crate::util::{body_json, location, log_in};

fn branch_form(name: &str, kind: &str, address: &str) -> BranchForm {
    BranchForm {
        name: Some(name.to_string()),
        kind: Some(kind.to_string()),
        address: Some(address.to_string()),
        phone: Some("+90 216 555 0101".to_string()),
        manager: Some("Ayşe Demir".to_string()),
    }
}

fn no_filters() -> Query<BranchListParams> {
    Query(BranchListParams {
        q: None,
        page: None,
    })
}

/// Expect a branch to be created, counted, re-addressed and deleted with a flash message at each step
#[tokio::test]
async fn branch_lifecycle() -> Result<(), TestError> {
    let test = TestBuilder::new()
        .with_domain_tables()
        .with_user("admin", "pw", true, &[])
        .build()
        .await?;
    let state: AppState = test.state();
    log_in(&test, 1).await;

    let response = create_branch(
        State(state.clone()),
        test.session.clone(),
        Form(branch_form("Test Branch", "cafe", "Moda Caddesi 12")),
    )
    .await
    .into_response();
    assert_eq!(response.status(), StatusCode::CREATED);
    let id = body_json(response).await["id"].as_i64().unwrap() as i32;

    let response = list_branches(State(state.clone()), test.session.clone(), no_filters())
        .await
        .into_response();
    assert_eq!(response.status(), StatusCode::OK);
    let list = body_json(response).await;
    assert_eq!(list["pagination"]["total_items"], 1);
    assert_eq!(list["branches"][0]["name"], "Test Branch");
    assert_eq!(list["branches"][0]["kind"], "cafe");
    assert_eq!(list["branches"][0]["staff_count"], 0);
    assert_eq!(list["branches"][0]["net"], "0.00");
    assert_eq!(list["messages"][0]["message"], "Branch created successfully.");

    let response = update_branch(
        State(state.clone()),
        test.session.clone(),
        Path(id),
        Form(branch_form("Test Branch", "cafe", "Bağdat Caddesi 300")),
    )
    .await
    .into_response();
    assert_eq!(response.status(), StatusCode::OK);

    let response = edit_branch(State(state.clone()), test.session.clone(), Path(id))
        .await
        .into_response();
    assert_eq!(
        body_json(response).await["branch"]["address"],
        "Bağdat Caddesi 300"
    );

    let response = confirm_delete_branch(State(state.clone()), test.session.clone(), Path(id))
        .await
        .into_response();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["summary"], "Test Branch");

    let response = delete_branch(State(state.clone()), test.session.clone(), Path(id))
        .await
        .into_response();
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), Some("/api/branches"));

    let response = list_branches(State(state.clone()), test.session.clone(), no_filters())
        .await
        .into_response();
    let list = body_json(response).await;
    assert_eq!(list["pagination"]["total_items"], 0);
    let messages = list["messages"].as_array().unwrap();
    assert_eq!(messages.len(), 2);
    assert_eq!(messages[1]["message"], "Branch deleted successfully.");

    let response = edit_branch(State(state), test.session.clone(), Path(id))
        .await
        .into_response();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    Ok(())
}

/// Expect 422 with field messages and nothing saved for a blank submission
#[tokio::test]
async fn create_rejects_blank_form() -> Result<(), TestError> {
    let test = TestBuilder::new()
        .with_domain_tables()
        .with_user("admin", "pw", true, &[])
        .build()
        .await?;
    let state: AppState = test.state();
    log_in(&test, 1).await;

    let response = create_branch(
        State(state.clone()),
        test.session.clone(),
        Form(BranchForm::default()),
    )
    .await
    .into_response();

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let body = body_json(response).await;
    assert_eq!(body["errors"]["name"][0], "This field is required.");
    assert!(body["errors"]["phone"].is_array());

    let list = list_branches(State(state), test.session.clone(), no_filters())
        .await
        .into_response();
    assert_eq!(body_json(list).await["pagination"]["total_items"], 0);

    Ok(())
}

/// Expect owners to be refused branch changes and anonymous visitors to be sent to login
#[tokio::test]
async fn enforces_permissions() -> Result<(), TestError> {
    let mut test = TestBuilder::new()
        .with_domain_tables()
        .with_user("ayse", "pw", false, &[UserGroup::Owner])
        .build()
        .await?;
    let branch = test.branch().insert_branch("Moda Cafe", BranchKind::Cafe).await?;
    let state: AppState = test.state();

    let response = list_branches(State(state.clone()), test.session.clone(), no_filters())
        .await
        .into_response();
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), Some("/auth/login"));

    log_in(&test, 1).await;

    let response = delete_branch(State(state), test.session.clone(), Path(branch.id))
        .await
        .into_response();
    assert_eq!(response.status(), StatusCode::FORBIDDEN);

    Ok(())
}
