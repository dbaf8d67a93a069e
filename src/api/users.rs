//! User (holder) endpoints

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use serde::Deserialize;

use crate::{
    error::AppResult,
    models::{user::UserProfile, Loan},
};

/// Query parameters for a holder's loans
#[derive(Debug, Deserialize, utoipa::IntoParams)]
pub struct LoanQuery {
    /// Restrict to loans that are still open.
    #[serde(default)]
    pub active: bool,
}

/// List all holder accounts
#[utoipa::path(
    get,
    path = "/users",
    tag = "users",
    responses(
        (status = 200, description = "All holder accounts", body = Vec<UserProfile>)
    )
)]
pub async fn list_users(State(state): State<crate::AppState>) -> AppResult<Json<Vec<UserProfile>>> {
    Ok(Json(state.services.identity.list_users()))
}

/// Get one holder account
#[utoipa::path(
    get,
    path = "/users/{username}",
    tag = "users",
    params(("username" = String, Path, description = "Holder identifier")),
    responses(
        (status = 200, description = "Holder account", body = UserProfile),
        (status = 404, description = "User not found")
    )
)]
pub async fn get_user(
    State(state): State<crate::AppState>,
    Path(username): Path<String>,
) -> AppResult<Json<UserProfile>> {
    let profile = state.services.identity.get_user(&username)?;
    Ok(Json(profile))
}

/// A holder's loan history, optionally restricted to open loans
#[utoipa::path(
    get,
    path = "/users/{username}/loans",
    tag = "loans",
    params(
        ("username" = String, Path, description = "Holder identifier"),
        LoanQuery
    ),
    responses(
        (status = 200, description = "Loans in insertion order", body = Vec<Loan>)
    )
)]
pub async fn get_user_loans(
    State(state): State<crate::AppState>,
    Path(username): Path<String>,
    Query(query): Query<LoanQuery>,
) -> AppResult<Json<Vec<Loan>>> {
    let loans = if query.active {
        state.services.circulation.open_loans_for(&username)
    } else {
        state.services.circulation.history_for(&username)
    };
    Ok(Json(loans))
}

/// Delete a holder account
#[utoipa::path(
    delete,
    path = "/users/{username}",
    tag = "users",
    params(("username" = String, Path, description = "Holder identifier")),
    responses(
        (status = 204, description = "Account deleted"),
        (status = 404, description = "User not found"),
        (status = 409, description = "Holder still has open loans")
    )
)]
pub async fn delete_user(
    State(state): State<crate::AppState>,
    Path(username): Path<String>,
) -> AppResult<StatusCode> {
    state.services.identity.delete_user(&username)?;
    Ok(StatusCode::NO_CONTENT)
}
