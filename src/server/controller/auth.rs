use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Redirect},
    Form, Json,
};
use serde::Deserialize;
use tower_sessions::Session;
use utoipa::ToSchema;

use crate::{
    model::{api::ErrorDto, user::UserDto},
    server::{
        controller::util::identity::current_identity,
        error::{
            auth::{AuthError, LOGIN_PATH},
            Error,
        },
        model::{app::AppState, session::user::SessionUserId},
        service::auth::{user_dto, AuthService},
        view,
    },
};

pub static AUTH_TAG: &str = "auth";

#[derive(Deserialize, ToSchema)]
pub struct LoginForm {
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub password: String,
}

/// Login page
///
/// # Responses
/// - 200 (Success): The login form
/// - 303 (See Other): Already logged in, redirect to the user's landing page
#[utoipa::path(
    get,
    path = "/auth/login",
    tag = AUTH_TAG,
    responses(
        (status = 200, description = "Login form", body = String, content_type = "text/html"),
        (status = 303, description = "Already logged in")
    ),
)]
pub async fn login_page(
    State(state): State<AppState>,
    session: Session,
) -> Result<impl IntoResponse, Error> {
    match current_identity(&state, &session).await {
        Ok(identity) => Ok(Redirect::to(identity.landing_path()).into_response()),
        Err(Error::AuthError(AuthError::UserNotInSession | AuthError::UserNotInDatabase(_))) => {
            Ok(view::login_page("", None)?.into_response())
        }
        Err(err) => Err(err),
    }
}

/// Verifies credentials and starts a session
///
/// The session ID is rotated on success.
///
/// # Responses
/// - 303 (See Other): Logged in, redirect to the dashboard or, for branch managers, the work logs
/// - 401 (Unauthorized): Unknown user or wrong password, the form is shown again
#[utoipa::path(
    post,
    path = "/auth/login",
    tag = AUTH_TAG,
    request_body(content = LoginForm, content_type = "application/x-www-form-urlencoded"),
    responses(
        (status = 303, description = "Logged in"),
        (status = 401, description = "Invalid credentials", body = String, content_type = "text/html"),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn login(
    State(state): State<AppState>,
    session: Session,
    Form(form): Form<LoginForm>,
) -> Result<impl IntoResponse, Error> {
    let Some(identity) = AuthService::new(&state.db)
        .login(&form.username, &form.password)
        .await?
    else {
        let page = view::login_page(&form.username, Some("Invalid username or password."))?;

        return Ok((StatusCode::UNAUTHORIZED, page).into_response());
    };

    session.cycle_id().await?;
    SessionUserId::insert(&session, identity.user_id).await?;

    tracing::info!(user_id = identity.user_id, username = %identity.username, "User logged in");

    Ok(Redirect::to(identity.landing_path()).into_response())
}

/// Logs the user out by clearing their session
///
/// # Responses
/// - 303 (See Other): Redirect to the login page
#[utoipa::path(
    get,
    path = "/auth/logout",
    tag = AUTH_TAG,
    responses(
        (status = 303, description = "Logged out, redirect to login"),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn logout(session: Session) -> Result<impl IntoResponse, Error> {
    // Clearing a session that was never stored fails, so only clear an authenticated one
    if SessionUserId::get(&session).await?.is_some() {
        session.clear().await;
    }

    Ok(Redirect::to(LOGIN_PATH))
}

/// The logged in user with groups and permissions
///
/// # Responses
/// - 200 (Success): Current user
/// - 303 (See Other): Not logged in, redirect to login
#[utoipa::path(
    get,
    path = "/api/auth/user",
    tag = AUTH_TAG,
    responses(
        (status = 200, description = "Current user", body = UserDto),
        (status = 303, description = "Not logged in, redirect to login"),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn get_user(
    State(state): State<AppState>,
    session: Session,
) -> Result<impl IntoResponse, Error> {
    let identity = current_identity(&state, &session).await?;

    Ok(Json(user_dto(&identity)))
}
