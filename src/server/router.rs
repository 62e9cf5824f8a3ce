//! HTTP routing and OpenAPI documentation configuration.
//!
//! Every endpoint is registered here together with its OpenAPI path definition. Handlers that share
//! a path (listing and create, edit form and update, delete confirmation and delete) are
//! registered as one route. Swagger UI is served at `/api/docs`.

use axum::Router;
use utoipa::OpenApi;
use utoipa_axum::{router::OpenApiRouter, routes};
use utoipa_swagger_ui::SwaggerUi;

use crate::server::{controller, model::app::AppState};

/// Builds the application's HTTP router with all endpoints and Swagger UI.
///
/// The OpenAPI document is available at `/api/docs/openapi.json`.
///
/// # Example
/// ```ignore
/// let router = routes().with_state(AppState { db }).layer(session);
/// ```
pub fn routes() -> Router<AppState> {
    #[derive(OpenApi)]
    #[openapi(info(title = "branchdesk", description = "Café and hotel back office API"), tags(
        (name = controller::auth::AUTH_TAG, description = "Login and the current user"),
        (name = controller::dashboard::DASHBOARD_TAG, description = "Monthly dashboard"),
        (name = controller::branch::BRANCH_TAG, description = "Branches"),
        (name = controller::staff::STAFF_TAG, description = "Staff, printable list and export"),
        (name = controller::work_log::WORK_LOG_TAG, description = "Work logs, printable list and monthly report"),
        (name = controller::transaction::TRANSACTION_TAG, description = "Income and expenses, printable list and export"),
    ))]
    struct ApiDoc;

    let (routes, api) = OpenApiRouter::with_openapi(ApiDoc::openapi())
        .routes(routes!(controller::auth::login_page, controller::auth::login))
        .routes(routes!(controller::auth::logout))
        .routes(routes!(controller::auth::get_user))
        .routes(routes!(controller::dashboard::dashboard))
        // Branches
        .routes(routes!(
            controller::branch::list_branches,
            controller::branch::create_branch
        ))
        .routes(routes!(controller::branch::new_branch))
        .routes(routes!(
            controller::branch::edit_branch,
            controller::branch::update_branch
        ))
        .routes(routes!(
            controller::branch::confirm_delete_branch,
            controller::branch::delete_branch
        ))
        // Staff
        .routes(routes!(
            controller::staff::list_staff,
            controller::staff::create_staff
        ))
        .routes(routes!(controller::staff::new_staff))
        .routes(routes!(controller::staff::print_staff))
        .routes(routes!(controller::staff::export_staff))
        .routes(routes!(controller::staff::staff_by_branch))
        .routes(routes!(
            controller::staff::edit_staff,
            controller::staff::update_staff
        ))
        .routes(routes!(
            controller::staff::confirm_delete_staff,
            controller::staff::delete_staff
        ))
        // Work logs
        .routes(routes!(
            controller::work_log::list_work_logs,
            controller::work_log::create_work_log
        ))
        .routes(routes!(controller::work_log::new_work_log))
        .routes(routes!(controller::work_log::print_work_logs))
        .routes(routes!(controller::work_log::export_work_logs))
        .routes(routes!(
            controller::work_log::edit_work_log,
            controller::work_log::update_work_log
        ))
        .routes(routes!(
            controller::work_log::confirm_delete_work_log,
            controller::work_log::delete_work_log
        ))
        // Transactions
        .routes(routes!(
            controller::transaction::list_transactions,
            controller::transaction::create_transaction
        ))
        .routes(routes!(controller::transaction::new_transaction))
        .routes(routes!(controller::transaction::print_transactions))
        .routes(routes!(controller::transaction::export_transactions))
        .routes(routes!(
            controller::transaction::edit_transaction,
            controller::transaction::update_transaction
        ))
        .routes(routes!(
            controller::transaction::confirm_delete_transaction,
            controller::transaction::delete_transaction
        ))
        .split_for_parts();

    routes.merge(SwaggerUi::new("/api/docs").url("/api/docs/openapi.json", api))
}
