use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};

use crate::{
    model::{
        api::{ErrorDto, MessageDto, ValidationErrorDto},
        auth::{ChangePasswordDto, LoginDto, LoginResponseDto, ProfileDto, TokenDto},
    },
    server::{
        controller::util::valid_json::ValidJson,
        error::Error,
        model::{app::AppState, auth::AuthUser},
        service::auth::AuthService,
    },
};

pub static AUTH_TAG: &str = "auth";

/// Exchange email and password for an access token
///
/// # Responses
/// - 200 (OK): Token plus the employee's identity and permissions
/// - 400 (Bad Request): Malformed email or missing password
/// - 401 (Unauthorized): Unknown email, wrong password, or the account is not Active
#[utoipa::path(
    post,
    path = "/api/auth/login",
    tag = AUTH_TAG,
    request_body = LoginDto,
    responses(
        (status = 200, description = "Login successful", body = LoginResponseDto),
        (status = 400, description = "Validation error", body = ValidationErrorDto),
        (status = 401, description = "Invalid credentials", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn login(
    State(state): State<AppState>,
    ValidJson(credentials): ValidJson<LoginDto>,
) -> Result<impl IntoResponse, Error> {
    let response = AuthService::new(&state.db, &state.tokens)
        .login(&credentials)
        .await?;

    Ok((StatusCode::OK, Json(response)))
}

/// Get the authenticated employee's profile
#[utoipa::path(
    get,
    path = "/api/auth/profile",
    tag = AUTH_TAG,
    responses(
        (status = 200, description = "The caller's employee record", body = ProfileDto),
        (status = 401, description = "Missing or invalid token", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn profile(
    State(state): State<AppState>,
    user: AuthUser,
) -> Result<impl IntoResponse, Error> {
    let profile = AuthService::new(&state.db, &state.tokens)
        .profile(&user)
        .await?;

    Ok((StatusCode::OK, Json(profile)))
}

/// Replace the caller's password
///
/// # Responses
/// - 200 (OK): Password changed
/// - 400 (Bad Request): Validation failed or the current password is incorrect
#[utoipa::path(
    post,
    path = "/api/auth/change-password",
    tag = AUTH_TAG,
    request_body = ChangePasswordDto,
    responses(
        (status = 200, description = "Password changed", body = MessageDto),
        (status = 400, description = "Validation error or incorrect current password", body = ValidationErrorDto),
        (status = 401, description = "Missing or invalid token", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn change_password(
    State(state): State<AppState>,
    user: AuthUser,
    ValidJson(request): ValidJson<ChangePasswordDto>,
) -> Result<impl IntoResponse, Error> {
    AuthService::new(&state.db, &state.tokens)
        .change_password(&user, &request)
        .await?;

    Ok((
        StatusCode::OK,
        Json(MessageDto::new("Password changed successfully")),
    ))
}

/// Log out
///
/// Tokens are stateless, the client discards its copy.
#[utoipa::path(
    post,
    path = "/api/auth/logout",
    tag = AUTH_TAG,
    responses(
        (status = 200, description = "Logged out", body = MessageDto),
        (status = 401, description = "Missing or invalid token", body = ErrorDto)
    ),
)]
pub async fn logout(user: AuthUser) -> Result<impl IntoResponse, Error> {
    tracing::debug!(employee_id = user.id, "logout");

    Ok((StatusCode::OK, Json(MessageDto::new("Logout successful"))))
}

/// Issue a fresh token for the caller
#[utoipa::path(
    post,
    path = "/api/auth/refresh",
    tag = AUTH_TAG,
    responses(
        (status = 200, description = "New token", body = TokenDto),
        (status = 401, description = "Missing or invalid token", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn refresh(
    State(state): State<AppState>,
    user: AuthUser,
) -> Result<impl IntoResponse, Error> {
    let token = AuthService::new(&state.db, &state.tokens).refresh(&user)?;

    Ok((StatusCode::OK, Json(token)))
}
