//! Registration and login handlers.

use axum::Json;
use axum::extract::State;
use taskdeck_auth::password;
use taskdeck_core::users::{AuthResponse, LoginRequest, RegisterRequest};
use taskdeck_store::users::UserRepository;
use tracing::info;

use crate::errors::ApiError;
use crate::state::AppState;

fn internal(err: impl std::error::Error + Send + Sync + 'static) -> ApiError {
    ApiError::Internal(anyhow::Error::new(err))
}

/// `POST /api/auth/register` — create a user and issue a session token.
pub async fn register(
    State(state): State<AppState>,
    Json(body): Json<RegisterRequest>,
) -> Result<Json<AuthResponse>, ApiError> {
    if body.email.trim().is_empty() || !body.email.contains('@') {
        return Err(ApiError::BadRequest("A valid email is required".to_string()));
    }
    if body.name.trim().is_empty() {
        return Err(ApiError::BadRequest("Name is required".to_string()));
    }
    if body.password.is_empty() {
        return Err(ApiError::BadRequest("Password is required".to_string()));
    }

    let password_hash = password::hash_password(&body.password).map_err(internal)?;

    let user = {
        let conn = state.pool.get().map_err(internal)?;
        UserRepository::create(&conn, &body.email, &body.name, &password_hash)?
    };
    let token = state.tokens.encrypt(&user).map_err(internal)?;

    info!(user_id = %user.id, "user registered");
    Ok(Json(AuthResponse { user, token }))
}

/// `POST /api/auth/login` — verify credentials and issue a session token.
///
/// Unknown email and wrong password are indistinguishable to the caller.
pub async fn login(
    State(state): State<AppState>,
    Json(body): Json<LoginRequest>,
) -> Result<Json<AuthResponse>, ApiError> {
    let credentials = {
        let conn = state.pool.get().map_err(internal)?;
        UserRepository::find_by_email(&conn, &body.email)?
    }
    .ok_or(ApiError::InvalidCredentials)?;

    if !password::verify_password(&body.password, &credentials.password_hash) {
        return Err(ApiError::InvalidCredentials);
    }

    let user = credentials.user;
    let token = state.tokens.encrypt(&user).map_err(internal)?;

    info!(user_id = %user.id, "user logged in");
    Ok(Json(AuthResponse { user, token }))
}
