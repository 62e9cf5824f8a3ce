use axum::{
    extract::{Query, State},
    response::{IntoResponse, Redirect},
    Json,
};
use serde::Deserialize;
use tower_sessions::Session;
use utoipa::IntoParams;

use crate::{
    model::{api::ErrorDto, dashboard::DashboardDto},
    server::{
        controller::util::identity::current_identity,
        error::Error,
        model::{
            app::AppState,
            identity::{RoleScope, WORK_LOG_LIST_PATH},
        },
        service::report::ReportService,
        util::{period::MonthPeriod, query::today},
    },
};

pub static DASHBOARD_TAG: &str = "dashboard";

#[derive(Deserialize, IntoParams)]
pub struct DashboardParams {
    /// Defaults to the current year
    pub year: Option<String>,
    /// 1-12, defaults to the current month
    pub month: Option<String>,
}

/// Branch and staff counts, all-time totals and per-branch figures for a month
///
/// Branch managers are sent to the work log listing instead.
///
/// # Responses
/// - 200 (Success): Dashboard figures
/// - 303 (See Other): Not logged in, or logged in as a branch manager
#[utoipa::path(
    get,
    path = "/api/dashboard",
    tag = DASHBOARD_TAG,
    params(DashboardParams),
    responses(
        (status = 200, description = "Dashboard figures", body = DashboardDto),
        (status = 303, description = "Redirect to login or to the work log listing"),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn dashboard(
    State(state): State<AppState>,
    session: Session,
    Query(params): Query<DashboardParams>,
) -> Result<impl IntoResponse, Error> {
    let identity = current_identity(&state, &session).await?;

    if identity.scope() == RoleScope::BranchManager {
        return Ok(Redirect::to(WORK_LOG_LIST_PATH).into_response());
    }

    let period = MonthPeriod::from_params(params.year.as_deref(), params.month.as_deref(), today());
    let dashboard = ReportService::new(&state.db).dashboard(period).await?;

    Ok(Json(dashboard).into_response())
}
