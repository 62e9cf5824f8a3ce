use axum::{
    extract::{Path, Query, State},
    http::{header, StatusCode},
    response::IntoResponse,
    Form,
};
use branchdesk::server::{
    controller::transaction::{
        create_transaction, delete_transaction, export_transactions, list_transactions,
        update_transaction, TransactionListParams,
    },
    form::transaction::TransactionForm,
    model::app::AppState,
};
use branchdesk_test_utils::prelude::*;

use crate::util::{body_json, header_value, location, log_in};

fn params(kind: Option<&str>, start: Option<&str>, end: Option<&str>) -> Query<TransactionListParams> {
    Query(TransactionListParams {
        kind: kind.map(str::to_string),
        branch: None,
        start: start.map(str::to_string),
        end: end.map(str::to_string),
        page: None,
        per_page: None,
    })
}

fn income_form(branch_id: i32, amount: &str) -> TransactionForm {
    TransactionForm {
        branch: Some(branch_id.to_string()),
        kind: Some("income".to_string()),
        category: Some("cash".to_string()),
        description: Some("Weekend brunch".to_string()),
        amount: Some(amount.to_string()),
        date: Some("2026-03-08".to_string()),
    }
}

/// Expect accounting to book income that shows up in the filtered totals
#[tokio::test]
async fn accounting_books_income() -> Result<(), TestError> {
    let mut test = TestBuilder::new()
        .with_domain_tables()
        .with_user("selin", "pw", false, &[UserGroup::Accounting])
        .build()
        .await?;
    let branch = test.branch().insert_branch("Moda Cafe", BranchKind::Cafe).await?;
    test.transaction()
        .insert_transaction(branch.id, TransactionKind::Expense, 30_000, date(2026, 3, 20))
        .await?;
    let state: AppState = test.state();
    log_in(&test, 1).await;

    let response = create_transaction(
        State(state.clone()),
        test.session.clone(),
        Form(income_form(branch.id, "1250.50")),
    )
    .await
    .into_response();
    assert_eq!(response.status(), StatusCode::CREATED);
    let created = body_json(response).await;
    assert_eq!(created["amount"], "1250.50");
    assert_eq!(created["category"], "cash");

    let response = list_transactions(
        State(state.clone()),
        test.session.clone(),
        params(None, Some("2026-03-01"), Some("2026-03-31")),
    )
    .await
    .into_response();
    let list = body_json(response).await;
    assert_eq!(list["totals"]["income"], "1250.50");
    assert_eq!(list["totals"]["expense"], "300.00");
    assert_eq!(list["totals"]["net"], "950.50");
    assert_eq!(list["transactions"][0]["date"], "2026-03-20");

    let response = list_transactions(
        State(state),
        test.session.clone(),
        params(Some("income"), None, None),
    )
    .await
    .into_response();
    let list = body_json(response).await;
    assert_eq!(list["transactions"].as_array().unwrap().len(), 1);
    assert_eq!(list["totals"]["expense"], "0.00");

    Ok(())
}

/// Expect amounts below one cent or with more than two decimals to be rejected without saving
#[tokio::test]
async fn create_rejects_invalid_amount() -> Result<(), TestError> {
    let mut test = TestBuilder::new()
        .with_domain_tables()
        .with_user("admin", "pw", true, &[])
        .build()
        .await?;
    let branch = test.branch().insert_branch("Moda Cafe", BranchKind::Cafe).await?;
    let state: AppState = test.state();
    log_in(&test, 1).await;

    for amount in ["0", "-5", "10.005"] {
        let response = create_transaction(
            State(state.clone()),
            test.session.clone(),
            Form(income_form(branch.id, amount)),
        )
        .await
        .into_response();

        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY, "{amount}");
        assert!(body_json(response).await["errors"]["amount"].is_array());
    }

    let response = list_transactions(State(state), test.session.clone(), params(None, None, None))
        .await
        .into_response();
    let list = body_json(response).await;
    assert_eq!(list["pagination"]["total_items"], 0);
    assert_eq!(list["totals"]["income"], "0.00");

    Ok(())
}

/// Expect owners to read transactions but be refused changes
#[tokio::test]
async fn owner_is_read_only() -> Result<(), TestError> {
    let mut test = TestBuilder::new()
        .with_domain_tables()
        .with_user("ayse", "pw", false, &[UserGroup::Owner])
        .build()
        .await?;
    let branch = test.branch().insert_branch("Moda Cafe", BranchKind::Cafe).await?;
    let transaction = test
        .transaction()
        .insert_transaction(branch.id, TransactionKind::Income, 10_000, date(2026, 3, 1))
        .await?;
    let state: AppState = test.state();
    log_in(&test, 1).await;

    let response = list_transactions(
        State(state.clone()),
        test.session.clone(),
        params(None, None, None),
    )
    .await
    .into_response();
    assert_eq!(response.status(), StatusCode::OK);

    let response = update_transaction(
        State(state.clone()),
        test.session.clone(),
        Path(transaction.id),
        Form(income_form(branch.id, "5.00")),
    )
    .await
    .into_response();
    assert_eq!(response.status(), StatusCode::FORBIDDEN);

    let response = delete_transaction(State(state), test.session.clone(), Path(transaction.id))
        .await
        .into_response();
    assert_eq!(response.status(), StatusCode::FORBIDDEN);

    Ok(())
}

/// Expect a branch manager to be refused transactions entirely
#[tokio::test]
async fn branch_manager_forbidden() -> Result<(), TestError> {
    let test = TestBuilder::new()
        .with_domain_tables()
        .with_user("mehmet", "pw", false, &[UserGroup::BranchManager])
        .build()
        .await?;
    let state: AppState = test.state();
    log_in(&test, 1).await;

    let response = list_transactions(State(state), test.session.clone(), params(None, None, None))
        .await
        .into_response();

    assert_eq!(response.status(), StatusCode::FORBIDDEN);

    Ok(())
}

/// Expect a dated xlsx attachment when transactions match and a redirect when none do
#[tokio::test]
async fn export_transactions_file() -> Result<(), TestError> {
    let mut test = TestBuilder::new()
        .with_domain_tables()
        .with_user("admin", "pw", true, &[])
        .build()
        .await?;
    let branch = test.branch().insert_branch("Moda Cafe", BranchKind::Cafe).await?;
    test.transaction()
        .insert_transaction(branch.id, TransactionKind::Income, 10_000, date(2026, 3, 1))
        .await?;
    let state: AppState = test.state();
    log_in(&test, 1).await;

    let response = export_transactions(
        State(state.clone()),
        test.session.clone(),
        params(Some("expense"), None, None),
    )
    .await
    .into_response();
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), Some("/api/transactions"));

    let response = export_transactions(
        State(state),
        test.session.clone(),
        params(Some("income"), None, None),
    )
    .await
    .into_response();
    assert_eq!(response.status(), StatusCode::OK);
    let disposition = header_value(&response, header::CONTENT_DISPOSITION);
    assert!(disposition.starts_with("attachment; filename=\"transactions_"));
    assert!(disposition.ends_with(".xlsx\""));

    Ok(())
}
