//! Circulation endpoints: check-out and check-in

use axum::{extract::State, http::StatusCode, Json};

use crate::{
    error::AppResult,
    models::{
        loan::{CheckInRequest, CheckOutRequest},
        Loan,
    },
};

/// Check one unit of an item out to a holder
#[utoipa::path(
    post,
    path = "/loans",
    tag = "loans",
    request_body = CheckOutRequest,
    responses(
        (status = 201, description = "Loan created", body = Loan),
        (status = 404, description = "Item not found"),
        (status = 409, description = "Holder already has an open loan for the item"),
        (status = 422, description = "Item out of stock")
    )
)]
pub async fn check_out(
    State(state): State<crate::AppState>,
    Json(request): Json<CheckOutRequest>,
) -> AppResult<(StatusCode, Json<Loan>)> {
    let loan = state
        .services
        .circulation
        .check_out(&request.item_id, &request.holder)?;
    Ok((StatusCode::CREATED, Json(loan)))
}

/// Check a unit back in, closing the holder's open loan
#[utoipa::path(
    post,
    path = "/loans/return",
    tag = "loans",
    request_body = CheckInRequest,
    responses(
        (status = 200, description = "Loan closed", body = Loan),
        (status = 422, description = "No open loan for the pair")
    )
)]
pub async fn check_in(
    State(state): State<crate::AppState>,
    Json(request): Json<CheckInRequest>,
) -> AppResult<Json<Loan>> {
    let loan = state
        .services
        .circulation
        .check_in(&request.item_id, &request.holder)?;
    Ok(Json(loan))
}
