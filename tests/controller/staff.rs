use axum::{
    extract::{Query, State},
    http::{header, StatusCode},
    response::IntoResponse,
    Form,
};
use branchdesk::server::{
    controller::staff::{
        create_staff, export_staff, list_staff, print_staff, staff_by_branch,
        StaffByBranchParams, StaffListParams,
    },
    export::XLSX_CONTENT_TYPE,
    form::staff::StaffForm,
    model::app::AppState,
};
use branchdesk_test_utils::prelude::*;

use crate::util::{body_json, body_text, header_value, location, log_in};

fn no_filters() -> Query<StaffListParams> {
    Query(StaffListParams {
        q: None,
        branch: None,
        page: None,
    })
}

/// Expect a staff member to be created for an existing branch and listed with zero hours
#[tokio::test]
async fn create_and_list() -> Result<(), TestError> {
    let mut test = TestBuilder::new()
        .with_domain_tables()
        .with_user("mehmet", "pw", false, &[UserGroup::BranchManager])
        .build()
        .await?;
    let branch = test.branch().insert_branch("Moda Cafe", BranchKind::Cafe).await?;
    let state: AppState = test.state();
    log_in(&test, 1).await;

    let form = StaffForm {
        branch: Some(branch.id.to_string()),
        first_name: Some("Elif".to_string()),
        last_name: Some("Şahin".to_string()),
        position: Some("Barista".to_string()),
        hire_date: Some("2025-09-01".to_string()),
        phone: Some("+90 532 555 0102".to_string()),
        email: None,
    };
    let response = create_staff(State(state.clone()), test.session.clone(), Form(form))
        .await
        .into_response();
    assert_eq!(response.status(), StatusCode::CREATED);

    let response = list_staff(State(state), test.session.clone(), no_filters())
        .await
        .into_response();
    let list = body_json(response).await;
    assert_eq!(list["staff"][0]["full_name"], "Elif Şahin");
    assert_eq!(list["staff"][0]["branch_name"], "Moda Cafe");
    assert_eq!(list["staff"][0]["total_hours"], "0.00");
    assert_eq!(
        list["messages"][0]["message"],
        "Staff member created successfully."
    );

    Ok(())
}

/// Expect a field error when the branch does not exist
#[tokio::test]
async fn create_rejects_unknown_branch() -> Result<(), TestError> {
    let test = TestBuilder::new()
        .with_domain_tables()
        .with_user("admin", "pw", true, &[])
        .build()
        .await?;
    let state: AppState = test.state();
    log_in(&test, 1).await;

    let form = StaffForm {
        branch: Some("42".to_string()),
        first_name: Some("Elif".to_string()),
        last_name: Some("Şahin".to_string()),
        position: Some("Barista".to_string()),
        hire_date: Some("2025-09-01".to_string()),
        phone: Some("+90 532 555 0102".to_string()),
        email: None,
    };
    let response = create_staff(State(state), test.session.clone(), Form(form))
        .await
        .into_response();

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    assert!(body_json(response).await["errors"]["branch"].is_array());

    Ok(())
}

/// Expect the branch's staff for any logged in user and a redirect for anonymous visitors
#[tokio::test]
async fn by_branch_requires_login_only() -> Result<(), TestError> {
    let mut test = TestBuilder::new()
        .with_domain_tables()
        .with_user("ayse", "pw", false, &[UserGroup::Owner])
        .build()
        .await?;
    let cafe = test.branch().insert_branch("Moda Cafe", BranchKind::Cafe).await?;
    let hotel = test.branch().insert_branch("Bosphorus Hotel", BranchKind::Hotel).await?;
    test.staff().insert_staff(cafe.id, "Zeynep", "Kaya", "Barista").await?;
    test.staff().insert_staff(cafe.id, "Ali", "Yilmaz", "Cook").await?;
    test.staff().insert_staff(hotel.id, "Can", "Aydin", "Porter").await?;
    let state: AppState = test.state();
    let params = || {
        Query(StaffByBranchParams {
            branch_id: Some(cafe.id.to_string()),
        })
    };

    let response = staff_by_branch(State(state.clone()), test.session.clone(), params())
        .await
        .into_response();
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), Some("/auth/login"));

    log_in(&test, 1).await;

    let response = staff_by_branch(State(state), test.session.clone(), params())
        .await
        .into_response();
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    let staff = body["staff"].as_array().unwrap();
    assert_eq!(staff.len(), 2);
    assert_eq!(staff[0]["full_name"], "Ali Yilmaz");
    assert_eq!(staff[1]["full_name"], "Zeynep Kaya");

    Ok(())
}

/// Expect a warning and a redirect to the listing when there is nothing to export
#[tokio::test]
async fn export_without_data_redirects() -> Result<(), TestError> {
    let test = TestBuilder::new()
        .with_domain_tables()
        .with_user("admin", "pw", true, &[])
        .build()
        .await?;
    let state: AppState = test.state();
    log_in(&test, 1).await;

    let response = export_staff(State(state.clone()), test.session.clone(), no_filters())
        .await
        .into_response();
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), Some("/api/staff"));

    let response = list_staff(State(state), test.session.clone(), no_filters())
        .await
        .into_response();
    let list = body_json(response).await;
    assert_eq!(list["messages"][0]["level"], "warning");
    assert_eq!(list["messages"][0]["message"], "No data found to export.");

    Ok(())
}

/// Expect an xlsx attachment named staff_list.xlsx
#[tokio::test]
async fn export_returns_workbook() -> Result<(), TestError> {
    let mut test = TestBuilder::new()
        .with_domain_tables()
        .with_user("admin", "pw", true, &[])
        .build()
        .await?;
    let branch = test.branch().insert_branch("Moda Cafe", BranchKind::Cafe).await?;
    test.staff().insert_staff(branch.id, "Elif", "Şahin", "Barista").await?;
    let state: AppState = test.state();
    log_in(&test, 1).await;

    let response = export_staff(State(state), test.session.clone(), no_filters())
        .await
        .into_response();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(header_value(&response, header::CONTENT_TYPE), XLSX_CONTENT_TYPE);
    assert_eq!(
        header_value(&response, header::CONTENT_DISPOSITION),
        "attachment; filename=\"staff_list.xlsx\""
    );

    Ok(())
}

/// Expect the printable page to honour the branch filter
#[tokio::test]
async fn print_filters_by_branch() -> Result<(), TestError> {
    let mut test = TestBuilder::new()
        .with_domain_tables()
        .with_user("admin", "pw", true, &[])
        .build()
        .await?;
    let cafe = test.branch().insert_branch("Moda Cafe", BranchKind::Cafe).await?;
    let hotel = test.branch().insert_branch("Bosphorus Hotel", BranchKind::Hotel).await?;
    test.staff().insert_staff(cafe.id, "Elif", "Şahin", "Barista").await?;
    test.staff().insert_staff(hotel.id, "Can", "Aydin", "Porter").await?;
    let state: AppState = test.state();
    log_in(&test, 1).await;

    let params = Query(StaffListParams {
        q: None,
        branch: Some(hotel.id.to_string()),
        page: None,
    });
    let response = print_staff(State(state), test.session.clone(), params)
        .await
        .into_response();

    assert_eq!(response.status(), StatusCode::OK);
    let page = body_text(response).await;
    assert!(page.contains("Can Aydin"));
    assert!(!page.contains("Elif"));

    Ok(())
}
