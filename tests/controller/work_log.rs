use axum::{
    extract::{Query, State},
    http::{header, StatusCode},
    response::IntoResponse,
    Form,
};
use branchdesk::server::{
    controller::work_log::{
        create_work_log, export_work_logs, list_work_logs, print_work_logs, WorkLogListParams,
    },
    form::work_log::WorkLogForm,
    model::app::AppState,
};
use branchdesk_test_utils::prelude::*;

use crate::util::{body_json, body_text, header_value, location, log_in};

fn month(year: &str, month: &str) -> Query<WorkLogListParams> {
    Query(WorkLogListParams {
        year: Some(year.to_string()),
        month: Some(month.to_string()),
        staff: None,
        branch: None,
        q: None,
        page: None,
    })
}

/// Expect a branch manager to log hours for staff of the selected branch
#[tokio::test]
async fn branch_manager_logs_hours() -> Result<(), TestError> {
    let mut test = TestBuilder::new()
        .with_domain_tables()
        .with_user("mehmet", "pw", false, &[UserGroup::BranchManager])
        .build()
        .await?;
    let branch = test.branch().insert_branch("Moda Cafe", BranchKind::Cafe).await?;
    let staff = test.staff().insert_staff(branch.id, "Elif", "Şahin", "Barista").await?;
    let state: AppState = test.state();
    log_in(&test, 1).await;

    let form = WorkLogForm {
        branch: Some(branch.id.to_string()),
        staff: Some(staff.id.to_string()),
        date: Some("2026-03-14".to_string()),
        hours: Some("7.5".to_string()),
        description: Some("Morning shift".to_string()),
    };
    let response = create_work_log(State(state.clone()), test.session.clone(), Form(form))
        .await
        .into_response();
    assert_eq!(response.status(), StatusCode::CREATED);

    let response = list_work_logs(State(state), test.session.clone(), month("2026", "3"))
        .await
        .into_response();
    assert_eq!(response.status(), StatusCode::OK);
    let list = body_json(response).await;
    assert_eq!(list["work_logs"][0]["staff_name"], "Elif Şahin");
    assert_eq!(list["work_logs"][0]["hours"], "7.50");
    assert_eq!(list["stats"]["total_hours"], "7.50");
    assert_eq!(list["stats"]["staff_count"], 1);

    Ok(())
}

/// Expect a field error when the staff member belongs to another branch
#[tokio::test]
async fn create_rejects_staff_of_other_branch() -> Result<(), TestError> {
    let mut test = TestBuilder::new()
        .with_domain_tables()
        .with_user("admin", "pw", true, &[])
        .build()
        .await?;
    let cafe = test.branch().insert_branch("Moda Cafe", BranchKind::Cafe).await?;
    let hotel = test.branch().insert_branch("Bosphorus Hotel", BranchKind::Hotel).await?;
    let porter = test.staff().insert_staff(hotel.id, "Can", "Aydin", "Porter").await?;
    let state: AppState = test.state();
    log_in(&test, 1).await;

    let form = WorkLogForm {
        branch: Some(cafe.id.to_string()),
        staff: Some(porter.id.to_string()),
        date: Some("2026-03-14".to_string()),
        hours: Some("8".to_string()),
        description: None,
    };
    let response = create_work_log(State(state), test.session.clone(), Form(form))
        .await
        .into_response();

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    assert!(body_json(response).await["errors"]["staff"].is_array());

    Ok(())
}

/// Expect negative hours to be rejected without saving a work log
#[tokio::test]
async fn create_rejects_negative_hours() -> Result<(), TestError> {
    let mut test = TestBuilder::new()
        .with_domain_tables()
        .with_user("mehmet", "pw", false, &[UserGroup::BranchManager])
        .build()
        .await?;
    let branch = test.branch().insert_branch("Moda Cafe", BranchKind::Cafe).await?;
    let staff = test.staff().insert_staff(branch.id, "Elif", "Şahin", "Barista").await?;
    let state: AppState = test.state();
    log_in(&test, 1).await;

    let form = WorkLogForm {
        branch: Some(branch.id.to_string()),
        staff: Some(staff.id.to_string()),
        date: Some("2026-03-14".to_string()),
        hours: Some("-1".to_string()),
        description: None,
    };
    let response = create_work_log(State(state.clone()), test.session.clone(), Form(form))
        .await
        .into_response();
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    assert!(body_json(response).await["errors"]["hours"].is_array());

    let response = list_work_logs(State(state), test.session.clone(), month("2026", "3"))
        .await
        .into_response();
    let list = body_json(response).await;
    assert_eq!(list["pagination"]["total_items"], 0);
    assert_eq!(list["stats"]["total_hours"], "0.00");

    Ok(())
}

/// Expect owners to be refused the work log screens
#[tokio::test]
async fn owner_cannot_view_work_logs() -> Result<(), TestError> {
    let test = TestBuilder::new()
        .with_domain_tables()
        .with_user("ayse", "pw", false, &[UserGroup::Owner])
        .build()
        .await?;
    let state: AppState = test.state();
    log_in(&test, 1).await;

    let response = list_work_logs(State(state), test.session.clone(), month("2026", "3"))
        .await
        .into_response();

    assert_eq!(response.status(), StatusCode::FORBIDDEN);

    Ok(())
}

/// Expect a warning and a redirect when the month has no work logs
#[tokio::test]
async fn export_without_data_redirects() -> Result<(), TestError> {
    let mut test = TestBuilder::new()
        .with_domain_tables()
        .with_user("admin", "pw", true, &[])
        .build()
        .await?;
    let branch = test.branch().insert_branch("Moda Cafe", BranchKind::Cafe).await?;
    let staff = test.staff().insert_staff(branch.id, "Elif", "Şahin", "Barista").await?;
    test.work_log().insert_work_log(staff.id, date(2026, 2, 27), 800).await?;
    let state: AppState = test.state();
    log_in(&test, 1).await;

    let response = export_work_logs(State(state.clone()), test.session.clone(), month("2026", "3"))
        .await
        .into_response();
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), Some("/api/work-logs"));

    let response = list_work_logs(State(state), test.session.clone(), month("2026", "3"))
        .await
        .into_response();
    let list = body_json(response).await;
    assert_eq!(
        list["messages"][0]["message"],
        "No work log data found to export."
    );

    Ok(())
}

/// Expect the monthly report file name to carry the unpadded month
#[tokio::test]
async fn export_names_report_by_month() -> Result<(), TestError> {
    let mut test = TestBuilder::new()
        .with_domain_tables()
        .with_user("admin", "pw", true, &[])
        .build()
        .await?;
    let branch = test.branch().insert_branch("Moda Cafe", BranchKind::Cafe).await?;
    let staff = test.staff().insert_staff(branch.id, "Elif", "Şahin", "Barista").await?;
    test.work_log().insert_work_log(staff.id, date(2026, 3, 2), 800).await?;
    let state: AppState = test.state();
    log_in(&test, 1).await;

    let response = export_work_logs(State(state), test.session.clone(), month("2026", "3"))
        .await
        .into_response();

    assert_eq!(response.status(), StatusCode::OK);
    let disposition = header_value(&response, header::CONTENT_DISPOSITION);
    assert!(disposition.contains("work_log_report_2026-3.xlsx"));

    Ok(())
}

/// Expect the printable page to show the month heading and its logs only
#[tokio::test]
async fn print_limits_to_month() -> Result<(), TestError> {
    let mut test = TestBuilder::new()
        .with_domain_tables()
        .with_user("admin", "pw", true, &[])
        .build()
        .await?;
    let branch = test.branch().insert_branch("Moda Cafe", BranchKind::Cafe).await?;
    let staff = test.staff().insert_staff(branch.id, "Elif", "Şahin", "Barista").await?;
    test.work_log()
        .insert_work_log_with_description(staff.id, date(2026, 3, 2), 800, "Inventory count")
        .await?;
    test.work_log()
        .insert_work_log_with_description(staff.id, date(2026, 4, 1), 600, "Deep clean")
        .await?;
    let state: AppState = test.state();
    log_in(&test, 1).await;

    let response = print_work_logs(State(state), test.session.clone(), month("2026", "3"))
        .await
        .into_response();

    assert_eq!(response.status(), StatusCode::OK);
    let page = body_text(response).await;
    assert!(page.contains("Inventory count"));
    assert!(!page.contains("Deep clean"));

    Ok(())
}
