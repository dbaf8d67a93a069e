//! Item (catalog) endpoints

use axum::{
    extract::{Path, Query, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    Json,
};

use crate::{
    error::AppResult,
    models::{
        item::{CreateItem, ItemQuery, UpdateItem},
        Item,
    },
};

/// List catalog items, optionally filtered by a search keyword
#[utoipa::path(
    get,
    path = "/items",
    tag = "items",
    params(ItemQuery),
    responses(
        (status = 200, description = "Items in catalog order", body = Vec<Item>)
    )
)]
pub async fn list_items(
    State(state): State<crate::AppState>,
    Query(query): Query<ItemQuery>,
) -> AppResult<Json<Vec<Item>>> {
    let items = match query.search.as_deref() {
        Some(keyword) if !keyword.is_empty() => state.services.catalog.search_items(keyword),
        _ => state.services.catalog.list_items(),
    };
    Ok(Json(items))
}

/// Get item details by identifier
#[utoipa::path(
    get,
    path = "/items/{id}",
    tag = "items",
    params(("id" = String, Path, description = "Item identifier")),
    responses(
        (status = 200, description = "Item details", body = Item),
        (status = 404, description = "Item not found")
    )
)]
pub async fn get_item(
    State(state): State<crate::AppState>,
    Path(id): Path<String>,
) -> AppResult<Json<Item>> {
    let item = state.services.catalog.get_item(&id)?;
    Ok(Json(item))
}

/// Create a new catalog item
#[utoipa::path(
    post,
    path = "/items",
    tag = "items",
    request_body = CreateItem,
    responses(
        (status = 201, description = "Item created", body = Item),
        (status = 400, description = "Invalid input")
    )
)]
pub async fn create_item(
    State(state): State<crate::AppState>,
    Json(request): Json<CreateItem>,
) -> AppResult<(StatusCode, Json<Item>)> {
    let created = state.services.catalog.create_item(request)?;
    Ok((StatusCode::CREATED, Json(created)))
}

/// Replace an item's record wholesale
#[utoipa::path(
    put,
    path = "/items/{id}",
    tag = "items",
    params(("id" = String, Path, description = "Item identifier")),
    request_body = UpdateItem,
    responses(
        (status = 200, description = "Item updated", body = Item),
        (status = 404, description = "Item not found")
    )
)]
pub async fn update_item(
    State(state): State<crate::AppState>,
    Path(id): Path<String>,
    Json(request): Json<UpdateItem>,
) -> AppResult<Json<Item>> {
    let updated = state.services.catalog.update_item(&id, request)?;
    Ok(Json(updated))
}

/// Delete a catalog item
#[utoipa::path(
    delete,
    path = "/items/{id}",
    tag = "items",
    params(("id" = String, Path, description = "Item identifier")),
    responses(
        (status = 204, description = "Item deleted"),
        (status = 404, description = "Item not found"),
        (status = 409, description = "Item still has open loans")
    )
)]
pub async fn delete_item(
    State(state): State<crate::AppState>,
    Path(id): Path<String>,
) -> AppResult<StatusCode> {
    state.services.catalog.delete_item(&id)?;
    Ok(StatusCode::NO_CONTENT)
}

/// Export the catalog as CSV
#[utoipa::path(
    get,
    path = "/items/export",
    tag = "items",
    responses(
        (status = 200, description = "CSV export of the whole catalog", body = String, content_type = "text/csv")
    )
)]
pub async fn export_items(State(state): State<crate::AppState>) -> AppResult<Response> {
    let csv = state.services.catalog.export_csv()?;
    Ok((
        [
            (header::CONTENT_TYPE, "text/csv; charset=utf-8"),
            (
                header::CONTENT_DISPOSITION,
                "attachment; filename=\"items.csv\"",
            ),
        ],
        csv,
    )
        .into_response())
}
