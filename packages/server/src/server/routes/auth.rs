use axum::{extract::Extension, http::StatusCode, Json};

use crate::common::{ApiError, ApiResult};
use crate::domains::auth::password;
use crate::domains::profiles::data::types::{AuthResponse, LoginInput, RegistrationInput};
use crate::domains::profiles::models::User;
use crate::server::app::AppState;

/// Register a new account with its role profile and return a token.
pub async fn registration_handler(
    Extension(state): Extension<AppState>,
    Json(input): Json<RegistrationInput>,
) -> ApiResult<(StatusCode, Json<AuthResponse>)> {
    let command = input.into_command()?;

    if User::username_taken(&command.username, &state.db_pool).await? {
        return Err(ApiError::validation("This username is already taken."));
    }

    let salt = password::generate_salt();
    let hash = password::hash_password(&command.password, &salt);

    let user = User::register(
        command.username,
        command.email,
        hash,
        salt,
        command.role,
        &state.db_pool,
    )
    .await?;

    let token = state
        .jwt_service
        .create_token(user.id, user.username.clone(), user.is_staff)?;

    Ok((
        StatusCode::CREATED,
        Json(AuthResponse {
            token,
            user_id: user.id,
            username: user.username,
            email: user.email,
        }),
    ))
}

/// Authenticate with username and password and return a token.
pub async fn login_handler(
    Extension(state): Extension<AppState>,
    Json(input): Json<LoginInput>,
) -> ApiResult<Json<AuthResponse>> {
    let (username, password_attempt) = input.into_credentials()?;

    let user = User::find_by_username(&username, &state.db_pool)
        .await?
        .ok_or_else(|| ApiError::validation("Invalid username or password."))?;

    if !password::verify_password(&password_attempt, &user.password_salt, &user.password_hash) {
        return Err(ApiError::validation("Invalid username or password."));
    }

    let token = state
        .jwt_service
        .create_token(user.id, user.username.clone(), user.is_staff)?;

    Ok(Json(AuthResponse {
        token,
        user_id: user.id,
        username: user.username,
        email: user.email,
    }))
}
