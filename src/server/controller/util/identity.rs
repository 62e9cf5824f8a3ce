use tower_sessions::Session;

use crate::server::{
    error::{auth::AuthError, Error},
    model::{app::AppState, identity::Identity, identity::Permission, session::user::SessionUserId},
    service::auth::AuthService,
};

/// Builds the identity of the session user from the database
///
/// # Returns
/// - `Ok(Identity)` - User and their current group memberships
/// - `Err(AuthError::UserNotInSession)` - Nobody is logged in
/// - `Err(AuthError::UserNotInDatabase)` - The session user no longer exists, session is cleared
pub async fn current_identity(state: &AppState, session: &Session) -> Result<Identity, Error> {
    let Some(user_id) = SessionUserId::get(session).await? else {
        return Err(AuthError::UserNotInSession.into());
    };

    let Some(identity) = AuthService::new(&state.db).identity(user_id).await? else {
        session.clear().await;

        tracing::warn!(
            user_id = %user_id,
            "Failed to find user in database despite having an active session; cleared session"
        );

        return Err(AuthError::UserNotInDatabase(user_id).into());
    };

    Ok(identity)
}

/// Like [`current_identity`] but also requires `permission`
pub async fn require_permission(
    state: &AppState,
    session: &Session,
    permission: Permission,
) -> Result<Identity, Error> {
    let identity = current_identity(state, session).await?;

    if !identity.has_permission(permission) {
        return Err(AuthError::PermissionDenied {
            username: identity.username,
            permission: permission.to_string(),
        }
        .into());
    }

    Ok(identity)
}
