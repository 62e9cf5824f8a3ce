use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Redirect},
    Form, Json,
};
use serde::Deserialize;
use tower_sessions::Session;
use utoipa::IntoParams;

use crate::{
    model::{
        api::{DeleteConfirmationDto, ErrorDto, ValidationErrorDto},
        work_log::{WorkLogDto, WorkLogFormDto, WorkLogListDto},
    },
    server::{
        controller::util::identity::require_permission,
        data::work_log::WorkLogFilter,
        error::Error,
        export::{
            work_log::{work_log_filename, work_log_workbook},
            XlsxDownload,
        },
        form::work_log::WorkLogForm,
        model::{
            app::AppState,
            identity::{Action, Permission, Resource, WORK_LOG_LIST_PATH},
            session::flash::SessionFlash,
        },
        service::work_log::WorkLogService,
        util::{
            pagination::parse_page,
            period::MonthPeriod,
            query::{filter_id, filter_text, today},
        },
        view,
    },
};

pub static WORK_LOG_TAG: &str = "work_log";

#[derive(Deserialize, IntoParams)]
pub struct WorkLogListParams {
    /// Defaults to the current year
    pub year: Option<String>,
    /// 1-12, defaults to the current month
    pub month: Option<String>,
    /// Staff ID
    pub staff: Option<String>,
    /// Branch ID of the staff member
    pub branch: Option<String>,
    /// Case-insensitive search on staff names and the description
    pub q: Option<String>,
    pub page: Option<String>,
}

impl WorkLogListParams {
    fn period(&self) -> MonthPeriod {
        MonthPeriod::from_params(self.year.as_deref(), self.month.as_deref(), today())
    }

    fn filter(&self) -> WorkLogFilter {
        WorkLogFilter {
            staff_id: filter_id(self.staff.as_deref()),
            branch_id: filter_id(self.branch.as_deref()),
            q: filter_text(self.q.as_deref()),
            ..Default::default()
        }
    }
}

#[derive(Deserialize, IntoParams)]
pub struct NewWorkLogParams {
    /// Branch whose staff populate the staff choices
    pub branch: Option<String>,
}

fn permission(action: Action) -> Permission {
    Permission::new(action, Resource::WorkLog)
}

/// List the work logs of a month with hour statistics
///
/// Consumes pending flash messages.
#[utoipa::path(
    get,
    path = "/api/work-logs",
    tag = WORK_LOG_TAG,
    params(WorkLogListParams),
    responses(
        (status = 200, description = "Page of work logs", body = WorkLogListDto),
        (status = 403, description = "Missing view_work_log permission", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn list_work_logs(
    State(state): State<AppState>,
    session: Session,
    Query(params): Query<WorkLogListParams>,
) -> Result<impl IntoResponse, Error> {
    require_permission(&state, &session, permission(Action::View)).await?;

    let page = parse_page(params.page.as_deref());

    let mut list = WorkLogService::new(&state.db)
        .list(params.period(), params.filter(), page)
        .await?;
    list.messages = SessionFlash::take(&session).await?;

    Ok(Json(list))
}

/// Create a work log from a form submission, dated today when no date is given
#[utoipa::path(
    post,
    path = "/api/work-logs",
    tag = WORK_LOG_TAG,
    request_body(content = WorkLogForm, content_type = "application/x-www-form-urlencoded"),
    responses(
        (status = 201, description = "Work log created", body = WorkLogDto),
        (status = 403, description = "Missing add_work_log permission", body = ErrorDto),
        (status = 422, description = "Validation failed", body = ValidationErrorDto)
    ),
)]
pub async fn create_work_log(
    State(state): State<AppState>,
    session: Session,
    Form(form): Form<WorkLogForm>,
) -> Result<impl IntoResponse, Error> {
    require_permission(&state, &session, permission(Action::Add)).await?;

    let params = form.clean(&state.db, None, today()).await?;
    let work_log = WorkLogService::new(&state.db).create(params).await?;

    SessionFlash::success(&session, "Work log created successfully.").await?;

    Ok((StatusCode::CREATED, Json(work_log)))
}

#[utoipa::path(
    get,
    path = "/api/work-logs/new",
    tag = WORK_LOG_TAG,
    params(NewWorkLogParams),
    responses(
        (status = 200, description = "Blank work log form dated today", body = WorkLogFormDto),
        (status = 403, description = "Missing add_work_log permission", body = ErrorDto)
    ),
)]
pub async fn new_work_log(
    State(state): State<AppState>,
    session: Session,
    Query(params): Query<NewWorkLogParams>,
) -> Result<impl IntoResponse, Error> {
    require_permission(&state, &session, permission(Action::Add)).await?;

    let form = WorkLogService::new(&state.db)
        .form(None, filter_id(params.branch.as_deref()), today())
        .await?;

    Ok(Json(form))
}

/// Current values of a work log, with the staff member's branch pre-selected
#[utoipa::path(
    get,
    path = "/api/work-logs/{id}",
    tag = WORK_LOG_TAG,
    params(("id" = i32, Path, description = "Work log ID")),
    responses(
        (status = 200, description = "Work log edit form", body = WorkLogFormDto),
        (status = 403, description = "Missing change_work_log permission", body = ErrorDto),
        (status = 404, description = "Work log not found", body = ErrorDto)
    ),
)]
pub async fn edit_work_log(
    State(state): State<AppState>,
    session: Session,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, Error> {
    require_permission(&state, &session, permission(Action::Change)).await?;

    let form = WorkLogService::new(&state.db)
        .form(Some(id), None, today())
        .await?;

    Ok(Json(form))
}

#[utoipa::path(
    post,
    path = "/api/work-logs/{id}",
    tag = WORK_LOG_TAG,
    params(("id" = i32, Path, description = "Work log ID")),
    request_body(content = WorkLogForm, content_type = "application/x-www-form-urlencoded"),
    responses(
        (status = 200, description = "Work log updated", body = WorkLogDto),
        (status = 403, description = "Missing change_work_log permission", body = ErrorDto),
        (status = 404, description = "Work log not found", body = ErrorDto),
        (status = 422, description = "Validation failed", body = ValidationErrorDto)
    ),
)]
pub async fn update_work_log(
    State(state): State<AppState>,
    session: Session,
    Path(id): Path<i32>,
    Form(form): Form<WorkLogForm>,
) -> Result<impl IntoResponse, Error> {
    require_permission(&state, &session, permission(Action::Change)).await?;

    let service = WorkLogService::new(&state.db);
    let existing = service.get_model(id).await?;

    let params = form.clean(&state.db, Some(&existing), today()).await?;
    let work_log = service.update(id, params).await?;

    SessionFlash::success(&session, "Work log updated successfully.").await?;

    Ok(Json(work_log))
}

#[utoipa::path(
    get,
    path = "/api/work-logs/{id}/delete",
    tag = WORK_LOG_TAG,
    params(("id" = i32, Path, description = "Work log ID")),
    responses(
        (status = 200, description = "Delete confirmation", body = DeleteConfirmationDto),
        (status = 403, description = "Missing delete_work_log permission", body = ErrorDto),
        (status = 404, description = "Work log not found", body = ErrorDto)
    ),
)]
pub async fn confirm_delete_work_log(
    State(state): State<AppState>,
    session: Session,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, Error> {
    require_permission(&state, &session, permission(Action::Delete)).await?;

    let confirmation = WorkLogService::new(&state.db)
        .delete_confirmation(id)
        .await?;

    Ok(Json(confirmation))
}

#[utoipa::path(
    post,
    path = "/api/work-logs/{id}/delete",
    tag = WORK_LOG_TAG,
    params(("id" = i32, Path, description = "Work log ID")),
    responses(
        (status = 303, description = "Deleted, redirect to the listing"),
        (status = 403, description = "Missing delete_work_log permission", body = ErrorDto),
        (status = 404, description = "Work log not found", body = ErrorDto)
    ),
)]
pub async fn delete_work_log(
    State(state): State<AppState>,
    session: Session,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, Error> {
    require_permission(&state, &session, permission(Action::Delete)).await?;

    WorkLogService::new(&state.db).delete(id).await?;

    SessionFlash::success(&session, "Work log deleted successfully.").await?;

    Ok(Redirect::to(WORK_LOG_LIST_PATH))
}

/// Printable work logs of a month with the listing's filters applied
#[utoipa::path(
    get,
    path = "/api/work-logs/print",
    tag = WORK_LOG_TAG,
    params(WorkLogListParams),
    responses(
        (status = 200, description = "Printable HTML page", body = String, content_type = "text/html"),
        (status = 403, description = "Missing view_work_log permission", body = ErrorDto)
    ),
)]
pub async fn print_work_logs(
    State(state): State<AppState>,
    session: Session,
    Query(params): Query<WorkLogListParams>,
) -> Result<impl IntoResponse, Error> {
    require_permission(&state, &session, permission(Action::View)).await?;

    let period = params.period();
    let work_logs = WorkLogService::new(&state.db)
        .list_all(period, params.filter())
        .await?;

    view::work_log_print(&work_logs, &period)
}

/// Monthly report as `work_log_report_YYYY-M.xlsx` with a per-staff summary sheet
///
/// # Responses
/// - 200 (Success): The spreadsheet
/// - 303 (See Other): Nothing matched, warning queued and redirect to the listing
#[utoipa::path(
    get,
    path = "/api/work-logs/export",
    tag = WORK_LOG_TAG,
    params(WorkLogListParams),
    responses(
        (status = 200, description = "Spreadsheet download", content_type = "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet"),
        (status = 303, description = "Nothing to export, redirect to the listing"),
        (status = 403, description = "Missing view_work_log permission", body = ErrorDto)
    ),
)]
pub async fn export_work_logs(
    State(state): State<AppState>,
    session: Session,
    Query(params): Query<WorkLogListParams>,
) -> Result<impl IntoResponse, Error> {
    require_permission(&state, &session, permission(Action::View)).await?;

    let service = WorkLogService::new(&state.db);
    let period = params.period();

    let work_logs = service.list_all(period, params.filter()).await?;
    if work_logs.is_empty() {
        SessionFlash::warning(&session, "No work log data found to export.").await?;

        return Ok(Redirect::to(WORK_LOG_LIST_PATH).into_response());
    }
    let summary = service.hours_by_staff(period, params.filter()).await?;

    let download = XlsxDownload {
        filename: work_log_filename(&period),
        bytes: work_log_workbook(&summary, &work_logs)?,
    };

    Ok(download.into_response())
}
