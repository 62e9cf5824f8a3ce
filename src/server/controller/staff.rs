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
        staff::{StaffByBranchDto, StaffDto, StaffFormDto, StaffListDto},
    },
    server::{
        controller::util::identity::{current_identity, require_permission},
        data::staff::StaffFilter,
        error::Error,
        export::{staff::staff_workbook, staff::STAFF_EXPORT_FILENAME, XlsxDownload},
        form::staff::StaffForm,
        model::{
            app::AppState,
            identity::{Action, Permission, Resource},
            session::flash::SessionFlash,
        },
        service::staff::StaffService,
        util::{
            pagination::parse_page,
            query::{filter_id, filter_text},
        },
        view,
    },
};

pub static STAFF_TAG: &str = "staff";
pub static STAFF_LIST_PATH: &str = "/api/staff";

#[derive(Deserialize, IntoParams)]
pub struct StaffListParams {
    /// Case-insensitive search on first name, last name and position
    pub q: Option<String>,
    /// Branch ID
    pub branch: Option<String>,
    pub page: Option<String>,
}

impl StaffListParams {
    fn filter(&self) -> StaffFilter {
        StaffFilter {
            q: filter_text(self.q.as_deref()),
            branch_id: filter_id(self.branch.as_deref()),
        }
    }
}

#[derive(Deserialize, IntoParams)]
pub struct StaffByBranchParams {
    pub branch_id: Option<String>,
}

fn permission(action: Action) -> Permission {
    Permission::new(action, Resource::Staff)
}

/// List staff with their total logged hours
///
/// Consumes pending flash messages.
#[utoipa::path(
    get,
    path = "/api/staff",
    tag = STAFF_TAG,
    params(StaffListParams),
    responses(
        (status = 200, description = "Page of staff", body = StaffListDto),
        (status = 403, description = "Missing view_staff permission", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn list_staff(
    State(state): State<AppState>,
    session: Session,
    Query(params): Query<StaffListParams>,
) -> Result<impl IntoResponse, Error> {
    require_permission(&state, &session, permission(Action::View)).await?;

    let page = parse_page(params.page.as_deref());

    let mut list = StaffService::new(&state.db)
        .list(params.filter(), page)
        .await?;
    list.messages = SessionFlash::take(&session).await?;

    Ok(Json(list))
}

/// Create a staff member from a form submission
#[utoipa::path(
    post,
    path = "/api/staff",
    tag = STAFF_TAG,
    request_body(content = StaffForm, content_type = "application/x-www-form-urlencoded"),
    responses(
        (status = 201, description = "Staff member created", body = StaffDto),
        (status = 403, description = "Missing add_staff permission", body = ErrorDto),
        (status = 422, description = "Validation failed", body = ValidationErrorDto)
    ),
)]
pub async fn create_staff(
    State(state): State<AppState>,
    session: Session,
    Form(form): Form<StaffForm>,
) -> Result<impl IntoResponse, Error> {
    require_permission(&state, &session, permission(Action::Add)).await?;

    let params = form.clean(&state.db).await?;
    let staff = StaffService::new(&state.db).create(params).await?;

    SessionFlash::success(&session, "Staff member created successfully.").await?;

    Ok((StatusCode::CREATED, Json(staff)))
}

#[utoipa::path(
    get,
    path = "/api/staff/new",
    tag = STAFF_TAG,
    responses(
        (status = 200, description = "Blank staff form", body = StaffFormDto),
        (status = 403, description = "Missing add_staff permission", body = ErrorDto)
    ),
)]
pub async fn new_staff(
    State(state): State<AppState>,
    session: Session,
) -> Result<impl IntoResponse, Error> {
    require_permission(&state, &session, permission(Action::Add)).await?;

    let form = StaffService::new(&state.db).form(None).await?;

    Ok(Json(form))
}

#[utoipa::path(
    get,
    path = "/api/staff/{id}",
    tag = STAFF_TAG,
    params(("id" = i32, Path, description = "Staff ID")),
    responses(
        (status = 200, description = "Staff edit form", body = StaffFormDto),
        (status = 403, description = "Missing change_staff permission", body = ErrorDto),
        (status = 404, description = "Staff member not found", body = ErrorDto)
    ),
)]
pub async fn edit_staff(
    State(state): State<AppState>,
    session: Session,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, Error> {
    require_permission(&state, &session, permission(Action::Change)).await?;

    let form = StaffService::new(&state.db).form(Some(id)).await?;

    Ok(Json(form))
}

#[utoipa::path(
    post,
    path = "/api/staff/{id}",
    tag = STAFF_TAG,
    params(("id" = i32, Path, description = "Staff ID")),
    request_body(content = StaffForm, content_type = "application/x-www-form-urlencoded"),
    responses(
        (status = 200, description = "Staff member updated", body = StaffDto),
        (status = 403, description = "Missing change_staff permission", body = ErrorDto),
        (status = 404, description = "Staff member not found", body = ErrorDto),
        (status = 422, description = "Validation failed", body = ValidationErrorDto)
    ),
)]
pub async fn update_staff(
    State(state): State<AppState>,
    session: Session,
    Path(id): Path<i32>,
    Form(form): Form<StaffForm>,
) -> Result<impl IntoResponse, Error> {
    require_permission(&state, &session, permission(Action::Change)).await?;

    let params = form.clean(&state.db).await?;
    let staff = StaffService::new(&state.db).update(id, params).await?;

    SessionFlash::success(&session, "Staff member updated successfully.").await?;

    Ok(Json(staff))
}

#[utoipa::path(
    get,
    path = "/api/staff/{id}/delete",
    tag = STAFF_TAG,
    params(("id" = i32, Path, description = "Staff ID")),
    responses(
        (status = 200, description = "Delete confirmation", body = DeleteConfirmationDto),
        (status = 403, description = "Missing delete_staff permission", body = ErrorDto),
        (status = 404, description = "Staff member not found", body = ErrorDto)
    ),
)]
pub async fn confirm_delete_staff(
    State(state): State<AppState>,
    session: Session,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, Error> {
    require_permission(&state, &session, permission(Action::Delete)).await?;

    let confirmation = StaffService::new(&state.db).delete_confirmation(id).await?;

    Ok(Json(confirmation))
}

/// Delete a staff member and their work logs
#[utoipa::path(
    post,
    path = "/api/staff/{id}/delete",
    tag = STAFF_TAG,
    params(("id" = i32, Path, description = "Staff ID")),
    responses(
        (status = 303, description = "Deleted, redirect to the listing"),
        (status = 403, description = "Missing delete_staff permission", body = ErrorDto),
        (status = 404, description = "Staff member not found", body = ErrorDto)
    ),
)]
pub async fn delete_staff(
    State(state): State<AppState>,
    session: Session,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, Error> {
    require_permission(&state, &session, permission(Action::Delete)).await?;

    StaffService::new(&state.db).delete(id).await?;

    SessionFlash::success(&session, "Staff member deleted successfully.").await?;

    Ok(Redirect::to(STAFF_LIST_PATH))
}

/// Printable staff list with the listing's filters applied
#[utoipa::path(
    get,
    path = "/api/staff/print",
    tag = STAFF_TAG,
    params(StaffListParams),
    responses(
        (status = 200, description = "Printable HTML page", body = String, content_type = "text/html"),
        (status = 403, description = "Missing view_staff permission", body = ErrorDto)
    ),
)]
pub async fn print_staff(
    State(state): State<AppState>,
    session: Session,
    Query(params): Query<StaffListParams>,
) -> Result<impl IntoResponse, Error> {
    require_permission(&state, &session, permission(Action::View)).await?;

    let staff = StaffService::new(&state.db)
        .list_all(&params.filter())
        .await?;

    view::staff_print(&staff)
}

/// Staff list as `staff_list.xlsx`
///
/// # Responses
/// - 200 (Success): The spreadsheet
/// - 303 (See Other): Nothing matched, warning queued and redirect to the listing
#[utoipa::path(
    get,
    path = "/api/staff/export",
    tag = STAFF_TAG,
    params(StaffListParams),
    responses(
        (status = 200, description = "Spreadsheet download", content_type = "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet"),
        (status = 303, description = "Nothing to export, redirect to the listing"),
        (status = 403, description = "Missing view_staff permission", body = ErrorDto)
    ),
)]
pub async fn export_staff(
    State(state): State<AppState>,
    session: Session,
    Query(params): Query<StaffListParams>,
) -> Result<impl IntoResponse, Error> {
    require_permission(&state, &session, permission(Action::View)).await?;

    let staff = StaffService::new(&state.db)
        .list_all(&params.filter())
        .await?;

    if staff.is_empty() {
        SessionFlash::warning(&session, "No data found to export.").await?;

        return Ok(Redirect::to(STAFF_LIST_PATH).into_response());
    }

    let download = XlsxDownload {
        filename: STAFF_EXPORT_FILENAME.to_string(),
        bytes: staff_workbook(&staff)?,
    };

    Ok(download.into_response())
}

/// Staff of a branch for the work log form's dependent staff field
#[utoipa::path(
    get,
    path = "/api/staff/by-branch",
    tag = STAFF_TAG,
    params(StaffByBranchParams),
    responses(
        (status = 200, description = "Staff of the branch, empty without a branch", body = StaffByBranchDto),
        (status = 303, description = "Not logged in, redirect to login")
    ),
)]
pub async fn staff_by_branch(
    State(state): State<AppState>,
    session: Session,
    Query(params): Query<StaffByBranchParams>,
) -> Result<impl IntoResponse, Error> {
    current_identity(&state, &session).await?;

    let staff = StaffService::new(&state.db)
        .by_branch(filter_id(params.branch_id.as_deref()))
        .await?;

    Ok(Json(staff))
}
