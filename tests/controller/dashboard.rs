use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::IntoResponse,
};
use branchdesk::server::{
    controller::dashboard::{dashboard, DashboardParams},
    model::app::AppState,
};
use branchdesk_test_utils::prelude::*;

use crate::util::{body_json, location, log_in};

fn month(year: &str, month: &str) -> Query<DashboardParams> {
    Query(DashboardParams {
        year: Some(year.to_string()),
        month: Some(month.to_string()),
    })
}

/// Expect all-time totals alongside per-branch figures limited to the selected month
#[tokio::test]
async fn returns_monthly_figures() -> Result<(), TestError> {
    let mut test = TestBuilder::new()
        .with_domain_tables()
        .with_user("ayse", "pw", false, &[UserGroup::Owner])
        .build()
        .await?;
    let cafe = test.branch().insert_branch("Moda Cafe", BranchKind::Cafe).await?;
    let hotel = test.branch().insert_branch("Bosphorus Hotel", BranchKind::Hotel).await?;
    test.transaction()
        .insert_transaction(cafe.id, TransactionKind::Income, 50_000, date(2026, 3, 10))
        .await?;
    test.transaction()
        .insert_transaction(cafe.id, TransactionKind::Expense, 12_550, date(2026, 3, 31))
        .await?;
    test.transaction()
        .insert_transaction(hotel.id, TransactionKind::Income, 100_000, date(2026, 4, 1))
        .await?;
    let state: AppState = test.state();
    log_in(&test, 1).await;

    let response = dashboard(State(state), test.session.clone(), month("2026", "3"))
        .await
        .into_response();

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["branch_count"], 2);
    assert_eq!(body["cafe_count"], 1);
    assert_eq!(body["hotel_count"], 1);
    assert_eq!(body["totals"]["income"], "1500.00");
    assert_eq!(body["totals"]["expense"], "125.50");
    assert_eq!(body["hotel_totals"]["income"], "1000.00");
    assert_eq!(body["period"]["end"], "2026-04-01");

    let branches = body["branches"].as_array().unwrap();
    let hotel_row = branches
        .iter()
        .find(|row| row["name"] == "Bosphorus Hotel")
        .unwrap();
    assert_eq!(hotel_row["income"], "0.00");
    let cafe_row = branches.iter().find(|row| row["name"] == "Moda Cafe").unwrap();
    assert_eq!(cafe_row["net"], "374.50");

    Ok(())
}

/// Expect branch managers to be sent to the work log listing
#[tokio::test]
async fn redirects_branch_manager() -> Result<(), TestError> {
    let test = TestBuilder::new()
        .with_domain_tables()
        .with_user("mehmet", "pw", false, &[UserGroup::BranchManager])
        .build()
        .await?;
    let state: AppState = test.state();
    log_in(&test, 1).await;

    let response = dashboard(State(state), test.session.clone(), month("2026", "3"))
        .await
        .into_response();

    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), Some("/api/work-logs"));

    Ok(())
}

/// Expect anonymous visitors to be sent to login
#[tokio::test]
async fn redirects_anonymous() -> Result<(), TestError> {
    let test = test_setup_with_domain_tables!()?;
    let state: AppState = test.state();

    let response = dashboard(State(state), test.session.clone(), month("2026", "3"))
        .await
        .into_response();

    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), Some("/auth/login"));

    Ok(())
}
