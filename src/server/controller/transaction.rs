use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Redirect},
    Form, Json,
};
use entity::transaction::TransactionKind;
use serde::Deserialize;
use tower_sessions::Session;
use utoipa::IntoParams;

use crate::{
    model::{
        api::{DeleteConfirmationDto, ErrorDto, ValidationErrorDto},
        transaction::{TransactionDto, TransactionFormDto, TransactionListDto},
    },
    server::{
        controller::util::identity::require_permission,
        data::transaction::TransactionFilter,
        error::Error,
        export::{
            transaction::{transactions_filename, transactions_workbook},
            XlsxDownload,
        },
        form::transaction::TransactionForm,
        model::{
            app::AppState,
            identity::{Action, Permission, Resource},
            session::flash::SessionFlash,
        },
        service::transaction::TransactionService,
        util::{
            pagination::{parse_page, parse_per_page},
            query::{filter_date, filter_enum, filter_id, today},
        },
        view,
    },
};

pub static TRANSACTION_TAG: &str = "transaction";
pub static TRANSACTION_LIST_PATH: &str = "/api/transactions";

#[derive(Deserialize, IntoParams)]
pub struct TransactionListParams {
    /// `income` or `expense`
    pub kind: Option<String>,
    /// Branch ID
    pub branch: Option<String>,
    /// Inclusive `YYYY-MM-DD` lower bound
    pub start: Option<String>,
    /// Inclusive `YYYY-MM-DD` upper bound
    pub end: Option<String>,
    pub page: Option<String>,
    /// 1-100, 15 when omitted
    pub per_page: Option<String>,
}

impl TransactionListParams {
    fn filter(&self) -> TransactionFilter {
        TransactionFilter {
            kind: filter_enum::<TransactionKind>(self.kind.as_deref()),
            branch_id: filter_id(self.branch.as_deref()),
            start: filter_date(self.start.as_deref()),
            end: filter_date(self.end.as_deref()),
            ..Default::default()
        }
    }
}

fn permission(action: Action) -> Permission {
    Permission::new(action, Resource::Transaction)
}

/// List transactions newest first with totals over every matching transaction
///
/// Consumes pending flash messages.
#[utoipa::path(
    get,
    path = "/api/transactions",
    tag = TRANSACTION_TAG,
    params(TransactionListParams),
    responses(
        (status = 200, description = "Page of transactions", body = TransactionListDto),
        (status = 403, description = "Missing view_transaction permission", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn list_transactions(
    State(state): State<AppState>,
    session: Session,
    Query(params): Query<TransactionListParams>,
) -> Result<impl IntoResponse, Error> {
    require_permission(&state, &session, permission(Action::View)).await?;

    let page = parse_page(params.page.as_deref());
    let per_page = parse_per_page(params.per_page.as_deref());

    let mut list = TransactionService::new(&state.db)
        .list(params.filter(), page, per_page)
        .await?;
    list.messages = SessionFlash::take(&session).await?;

    Ok(Json(list))
}

/// Create a transaction from a form submission, dated today when no date is given
#[utoipa::path(
    post,
    path = "/api/transactions",
    tag = TRANSACTION_TAG,
    request_body(content = TransactionForm, content_type = "application/x-www-form-urlencoded"),
    responses(
        (status = 201, description = "Transaction created", body = TransactionDto),
        (status = 403, description = "Missing add_transaction permission", body = ErrorDto),
        (status = 422, description = "Validation failed", body = ValidationErrorDto)
    ),
)]
pub async fn create_transaction(
    State(state): State<AppState>,
    session: Session,
    Form(form): Form<TransactionForm>,
) -> Result<impl IntoResponse, Error> {
    require_permission(&state, &session, permission(Action::Add)).await?;

    let params = form.clean(&state.db, false, today()).await?;
    let transaction = TransactionService::new(&state.db).create(params).await?;

    SessionFlash::success(&session, "Transaction created successfully.").await?;

    Ok((StatusCode::CREATED, Json(transaction)))
}

#[utoipa::path(
    get,
    path = "/api/transactions/new",
    tag = TRANSACTION_TAG,
    responses(
        (status = 200, description = "Blank transaction form dated today", body = TransactionFormDto),
        (status = 403, description = "Missing add_transaction permission", body = ErrorDto)
    ),
)]
pub async fn new_transaction(
    State(state): State<AppState>,
    session: Session,
) -> Result<impl IntoResponse, Error> {
    require_permission(&state, &session, permission(Action::Add)).await?;

    let form = TransactionService::new(&state.db)
        .form(None, today())
        .await?;

    Ok(Json(form))
}

#[utoipa::path(
    get,
    path = "/api/transactions/{id}",
    tag = TRANSACTION_TAG,
    params(("id" = i32, Path, description = "Transaction ID")),
    responses(
        (status = 200, description = "Transaction edit form", body = TransactionFormDto),
        (status = 403, description = "Missing change_transaction permission", body = ErrorDto),
        (status = 404, description = "Transaction not found", body = ErrorDto)
    ),
)]
pub async fn edit_transaction(
    State(state): State<AppState>,
    session: Session,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, Error> {
    require_permission(&state, &session, permission(Action::Change)).await?;

    let form = TransactionService::new(&state.db)
        .form(Some(id), today())
        .await?;

    Ok(Json(form))
}

#[utoipa::path(
    post,
    path = "/api/transactions/{id}",
    tag = TRANSACTION_TAG,
    params(("id" = i32, Path, description = "Transaction ID")),
    request_body(content = TransactionForm, content_type = "application/x-www-form-urlencoded"),
    responses(
        (status = 200, description = "Transaction updated", body = TransactionDto),
        (status = 403, description = "Missing change_transaction permission", body = ErrorDto),
        (status = 404, description = "Transaction not found", body = ErrorDto),
        (status = 422, description = "Validation failed", body = ValidationErrorDto)
    ),
)]
pub async fn update_transaction(
    State(state): State<AppState>,
    session: Session,
    Path(id): Path<i32>,
    Form(form): Form<TransactionForm>,
) -> Result<impl IntoResponse, Error> {
    require_permission(&state, &session, permission(Action::Change)).await?;

    let service = TransactionService::new(&state.db);
    service.get(id).await?;

    let params = form.clean(&state.db, true, today()).await?;
    let transaction = service.update(id, params).await?;

    SessionFlash::success(&session, "Transaction updated successfully.").await?;

    Ok(Json(transaction))
}

#[utoipa::path(
    get,
    path = "/api/transactions/{id}/delete",
    tag = TRANSACTION_TAG,
    params(("id" = i32, Path, description = "Transaction ID")),
    responses(
        (status = 200, description = "Delete confirmation", body = DeleteConfirmationDto),
        (status = 403, description = "Missing delete_transaction permission", body = ErrorDto),
        (status = 404, description = "Transaction not found", body = ErrorDto)
    ),
)]
pub async fn confirm_delete_transaction(
    State(state): State<AppState>,
    session: Session,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, Error> {
    require_permission(&state, &session, permission(Action::Delete)).await?;

    let confirmation = TransactionService::new(&state.db)
        .delete_confirmation(id)
        .await?;

    Ok(Json(confirmation))
}

#[utoipa::path(
    post,
    path = "/api/transactions/{id}/delete",
    tag = TRANSACTION_TAG,
    params(("id" = i32, Path, description = "Transaction ID")),
    responses(
        (status = 303, description = "Deleted, redirect to the listing"),
        (status = 403, description = "Missing delete_transaction permission", body = ErrorDto),
        (status = 404, description = "Transaction not found", body = ErrorDto)
    ),
)]
pub async fn delete_transaction(
    State(state): State<AppState>,
    session: Session,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, Error> {
    require_permission(&state, &session, permission(Action::Delete)).await?;

    TransactionService::new(&state.db).delete(id).await?;

    SessionFlash::success(&session, "Transaction deleted successfully.").await?;

    Ok(Redirect::to(TRANSACTION_LIST_PATH))
}

/// Printable transaction list with the listing's filters applied
#[utoipa::path(
    get,
    path = "/api/transactions/print",
    tag = TRANSACTION_TAG,
    params(TransactionListParams),
    responses(
        (status = 200, description = "Printable HTML page", body = String, content_type = "text/html"),
        (status = 403, description = "Missing view_transaction permission", body = ErrorDto)
    ),
)]
pub async fn print_transactions(
    State(state): State<AppState>,
    session: Session,
    Query(params): Query<TransactionListParams>,
) -> Result<impl IntoResponse, Error> {
    require_permission(&state, &session, permission(Action::View)).await?;

    let filter = params.filter();
    let transactions = TransactionService::new(&state.db)
        .list_all(&filter)
        .await?;

    view::transaction_print(&transactions, filter.start, filter.end)
}

/// Transactions as `transactions_YYYY-MM-DD.xlsx`
///
/// # Responses
/// - 200 (Success): The spreadsheet
/// - 303 (See Other): Nothing matched, warning queued and redirect to the listing
#[utoipa::path(
    get,
    path = "/api/transactions/export",
    tag = TRANSACTION_TAG,
    params(TransactionListParams),
    responses(
        (status = 200, description = "Spreadsheet download", content_type = "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet"),
        (status = 303, description = "Nothing to export, redirect to the listing"),
        (status = 403, description = "Missing view_transaction permission", body = ErrorDto)
    ),
)]
pub async fn export_transactions(
    State(state): State<AppState>,
    session: Session,
    Query(params): Query<TransactionListParams>,
) -> Result<impl IntoResponse, Error> {
    require_permission(&state, &session, permission(Action::View)).await?;

    let transactions = TransactionService::new(&state.db)
        .list_all(&params.filter())
        .await?;

    if transactions.is_empty() {
        SessionFlash::warning(&session, "No data found to export.").await?;

        return Ok(Redirect::to(TRANSACTION_LIST_PATH).into_response());
    }

    let download = XlsxDownload {
        filename: transactions_filename(today()),
        bytes: transactions_workbook(&transactions)?,
    };

    Ok(download.into_response())
}
