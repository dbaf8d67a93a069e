//! Authentication and account endpoints
//!
//! Credential verification only; there are no sessions or tokens. Callers
//! pass the holder identifier to subsequent requests themselves.

use axum::{extract::State, http::StatusCode, Json};

use crate::{
    error::AppResult,
    models::user::{
        ChangePasswordRequest, LoginRequest, RegisterRequest, UpdateContactRequest, UserProfile,
    },
};

/// Verify a holder's credentials
#[utoipa::path(
    post,
    path = "/auth/login",
    tag = "auth",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Credentials valid", body = UserProfile),
        (status = 401, description = "Invalid username or password")
    )
)]
pub async fn login(
    State(state): State<crate::AppState>,
    Json(request): Json<LoginRequest>,
) -> AppResult<Json<UserProfile>> {
    let profile = state
        .services
        .identity
        .authenticate(&request.username, &request.password)?;
    Ok(Json(profile))
}

/// Register a new holder account
#[utoipa::path(
    post,
    path = "/auth/register",
    tag = "auth",
    request_body = RegisterRequest,
    responses(
        (status = 201, description = "Account created", body = UserProfile),
        (status = 400, description = "Invalid input"),
        (status = 409, description = "Username already taken")
    )
)]
pub async fn register(
    State(state): State<crate::AppState>,
    Json(request): Json<RegisterRequest>,
) -> AppResult<(StatusCode, Json<UserProfile>)> {
    let profile = state.services.identity.register(request)?;
    Ok((StatusCode::CREATED, Json(profile)))
}

/// Change a holder's password
#[utoipa::path(
    put,
    path = "/auth/password",
    tag = "auth",
    request_body = ChangePasswordRequest,
    responses(
        (status = 204, description = "Password changed"),
        (status = 401, description = "Old password rejected")
    )
)]
pub async fn change_password(
    State(state): State<crate::AppState>,
    Json(request): Json<ChangePasswordRequest>,
) -> AppResult<StatusCode> {
    state.services.identity.change_password(
        &request.username,
        &request.old_password,
        &request.new_password,
    )?;
    Ok(StatusCode::NO_CONTENT)
}

/// Update a holder's contact information
#[utoipa::path(
    put,
    path = "/auth/profile",
    tag = "auth",
    request_body = UpdateContactRequest,
    responses(
        (status = 200, description = "Profile updated", body = UserProfile),
        (status = 404, description = "User not found")
    )
)]
pub async fn update_profile(
    State(state): State<crate::AppState>,
    Json(request): Json<UpdateContactRequest>,
) -> AppResult<Json<UserProfile>> {
    let profile = state.services.identity.update_contact(
        &request.username,
        request.email,
        request.phone,
    )?;
    Ok(Json(profile))
}
