//! Item (catalog entry) model and related types

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// A catalog entry with a finite, trackable quantity in stock.
///
/// The identifier is immutable after creation and unique across the whole
/// catalog. `quantity` is the number of units currently on the shelf; the
/// unsigned type rules out negative stock by construction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct Item {
    pub id: String,
    pub title: String,
    pub author: String,
    pub category: String,
    pub quantity: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// Create item request (the catalog assigns the identifier)
#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct CreateItem {
    pub title: String,
    pub author: String,
    pub category: String,
    pub quantity: u32,
    pub description: Option<String>,
}

/// Update item request: a wholesale replacement of the stored record.
/// Callers construct the full desired state, including quantity.
#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct UpdateItem {
    pub title: String,
    pub author: String,
    pub category: String,
    pub quantity: u32,
    pub description: Option<String>,
}

/// Query parameters for listing/searching items
#[derive(Debug, Clone, Deserialize, utoipa::IntoParams)]
pub struct ItemQuery {
    /// Case-insensitive substring matched against title, author and category.
    pub search: Option<String>,
}
