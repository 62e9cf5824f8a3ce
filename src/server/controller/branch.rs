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
        branch::{BranchDto, BranchFormDto, BranchListDto},
    },
    server::{
        controller::util::identity::require_permission,
        data::branch::BranchFilter,
        error::Error,
        form::branch::BranchForm,
        model::{
            app::AppState,
            identity::{Action, Permission, Resource},
            session::flash::SessionFlash,
        },
        service::branch::BranchService,
        util::{pagination::parse_page, query::filter_text},
    },
};

pub static BRANCH_TAG: &str = "branch";
pub static BRANCH_LIST_PATH: &str = "/api/branches";

#[derive(Deserialize, IntoParams)]
pub struct BranchListParams {
    /// Case-insensitive search on the branch name
    pub q: Option<String>,
    pub page: Option<String>,
}

fn permission(action: Action) -> Permission {
    Permission::new(action, Resource::Branch)
}

/// List branches with staff counts and all-time totals
///
/// Consumes pending flash messages.
///
/// # Responses
/// - 200 (Success): Page of branches ordered by name descending
/// - 303 (See Other): Not logged in, redirect to login
/// - 403 (Forbidden): Missing `view_branch`
#[utoipa::path(
    get,
    path = "/api/branches",
    tag = BRANCH_TAG,
    params(BranchListParams),
    responses(
        (status = 200, description = "Page of branches", body = BranchListDto),
        (status = 403, description = "Missing view_branch permission", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn list_branches(
    State(state): State<AppState>,
    session: Session,
    Query(params): Query<BranchListParams>,
) -> Result<impl IntoResponse, Error> {
    require_permission(&state, &session, permission(Action::View)).await?;

    let filter = BranchFilter {
        q: filter_text(params.q.as_deref()),
    };
    let page = parse_page(params.page.as_deref());

    let mut list = BranchService::new(&state.db).list(filter, page).await?;
    list.messages = SessionFlash::take(&session).await?;

    Ok(Json(list))
}

/// Create a branch from a form submission
///
/// # Responses
/// - 201 (Created): The saved branch
/// - 422 (Unprocessable Entity): Field errors, nothing was saved
#[utoipa::path(
    post,
    path = "/api/branches",
    tag = BRANCH_TAG,
    request_body(content = BranchForm, content_type = "application/x-www-form-urlencoded"),
    responses(
        (status = 201, description = "Branch created", body = BranchDto),
        (status = 403, description = "Missing add_branch permission", body = ErrorDto),
        (status = 422, description = "Validation failed", body = ValidationErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn create_branch(
    State(state): State<AppState>,
    session: Session,
    Form(form): Form<BranchForm>,
) -> Result<impl IntoResponse, Error> {
    require_permission(&state, &session, permission(Action::Add)).await?;

    let params = form.clean()?;
    let branch = BranchService::new(&state.db).create(params).await?;

    SessionFlash::success(&session, "Branch created successfully.").await?;

    Ok((StatusCode::CREATED, Json(branch)))
}

/// Initial state of the create form
#[utoipa::path(
    get,
    path = "/api/branches/new",
    tag = BRANCH_TAG,
    responses(
        (status = 200, description = "Blank branch form", body = BranchFormDto),
        (status = 403, description = "Missing add_branch permission", body = ErrorDto)
    ),
)]
pub async fn new_branch(
    State(state): State<AppState>,
    session: Session,
) -> Result<impl IntoResponse, Error> {
    require_permission(&state, &session, permission(Action::Add)).await?;

    let form = BranchService::new(&state.db).form(None).await?;

    Ok(Json(form))
}

/// Current values of a branch for the edit form
#[utoipa::path(
    get,
    path = "/api/branches/{id}",
    tag = BRANCH_TAG,
    params(("id" = i32, Path, description = "Branch ID")),
    responses(
        (status = 200, description = "Branch edit form", body = BranchFormDto),
        (status = 403, description = "Missing change_branch permission", body = ErrorDto),
        (status = 404, description = "Branch not found", body = ErrorDto)
    ),
)]
pub async fn edit_branch(
    State(state): State<AppState>,
    session: Session,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, Error> {
    require_permission(&state, &session, permission(Action::Change)).await?;

    let form = BranchService::new(&state.db).form(Some(id)).await?;

    Ok(Json(form))
}

/// Update a branch from a form submission
///
/// # Responses
/// - 200 (Success): The saved branch
/// - 404 (Not Found): No branch with that ID
/// - 422 (Unprocessable Entity): Field errors, nothing was saved
#[utoipa::path(
    post,
    path = "/api/branches/{id}",
    tag = BRANCH_TAG,
    params(("id" = i32, Path, description = "Branch ID")),
    request_body(content = BranchForm, content_type = "application/x-www-form-urlencoded"),
    responses(
        (status = 200, description = "Branch updated", body = BranchDto),
        (status = 403, description = "Missing change_branch permission", body = ErrorDto),
        (status = 404, description = "Branch not found", body = ErrorDto),
        (status = 422, description = "Validation failed", body = ValidationErrorDto)
    ),
)]
pub async fn update_branch(
    State(state): State<AppState>,
    session: Session,
    Path(id): Path<i32>,
    Form(form): Form<BranchForm>,
) -> Result<impl IntoResponse, Error> {
    require_permission(&state, &session, permission(Action::Change)).await?;

    let params = form.clean()?;
    let branch = BranchService::new(&state.db).update(id, params).await?;

    SessionFlash::success(&session, "Branch updated successfully.").await?;

    Ok(Json(branch))
}

/// Summary of the branch shown before deleting it
#[utoipa::path(
    get,
    path = "/api/branches/{id}/delete",
    tag = BRANCH_TAG,
    params(("id" = i32, Path, description = "Branch ID")),
    responses(
        (status = 200, description = "Delete confirmation", body = DeleteConfirmationDto),
        (status = 403, description = "Missing delete_branch permission", body = ErrorDto),
        (status = 404, description = "Branch not found", body = ErrorDto)
    ),
)]
pub async fn confirm_delete_branch(
    State(state): State<AppState>,
    session: Session,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, Error> {
    require_permission(&state, &session, permission(Action::Delete)).await?;

    let confirmation = BranchService::new(&state.db).delete_confirmation(id).await?;

    Ok(Json(confirmation))
}

/// Delete a branch along with its staff, their work logs and its transactions
///
/// # Responses
/// - 303 (See Other): Deleted, redirect to the branch listing
/// - 404 (Not Found): No branch with that ID
#[utoipa::path(
    post,
    path = "/api/branches/{id}/delete",
    tag = BRANCH_TAG,
    params(("id" = i32, Path, description = "Branch ID")),
    responses(
        (status = 303, description = "Deleted, redirect to the listing"),
        (status = 403, description = "Missing delete_branch permission", body = ErrorDto),
        (status = 404, description = "Branch not found", body = ErrorDto)
    ),
)]
pub async fn delete_branch(
    State(state): State<AppState>,
    session: Session,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, Error> {
    require_permission(&state, &session, permission(Action::Delete)).await?;

    BranchService::new(&state.db).delete(id).await?;

    SessionFlash::success(&session, "Branch deleted successfully.").await?;

    Ok(Redirect::to(BRANCH_LIST_PATH))
}
