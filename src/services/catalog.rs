//! Catalog management service

use crate::{
    error::{AppError, AppResult},
    models::{
        item::{CreateItem, UpdateItem},
        Item,
    },
    services::SharedRepository,
};

#[derive(Clone)]
pub struct CatalogService {
    repository: SharedRepository,
}

impl CatalogService {
    pub fn new(repository: SharedRepository) -> Self {
        Self { repository }
    }

    /// Create a new item with a freshly allocated `BK######` identifier.
    pub fn create_item(&self, request: CreateItem) -> AppResult<Item> {
        if request.title.trim().is_empty() {
            return Err(AppError::Validation("Title cannot be empty".to_string()));
        }

        let mut repo = self
            .repository
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner());

        let item = Item {
            id: repo.catalog.allocate_id(),
            title: request.title,
            author: request.author,
            category: request.category,
            quantity: request.quantity,
            description: request.description,
        };
        repo.catalog.add(item.clone())?;

        tracing::info!("Created item {} ({})", item.id, item.title);
        Ok(item)
    }

    /// Replace an item's record wholesale, quantity included.
    pub fn update_item(&self, id: &str, request: UpdateItem) -> AppResult<Item> {
        if request.title.trim().is_empty() {
            return Err(AppError::Validation("Title cannot be empty".to_string()));
        }

        let mut repo = self
            .repository
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner());

        let item = Item {
            id: id.to_string(),
            title: request.title,
            author: request.author,
            category: request.category,
            quantity: request.quantity,
            description: request.description,
        };
        repo.catalog.update(item.clone())?;
        Ok(item)
    }

    /// Remove an item. An item that still has open loans cannot go: the
    /// check spans both repositories, which is why it lives here and not in
    /// the Catalog itself.
    pub fn delete_item(&self, id: &str) -> AppResult<Item> {
        let mut repo = self
            .repository
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner());

        if repo.catalog.get(id).is_none() {
            return Err(AppError::NotFound(format!("Item {} not found", id)));
        }
        if repo.ledger.has_open_loans_for_item(id) {
            return Err(AppError::ItemHasOpenLoans(format!(
                "Item {} still has open loans",
                id
            )));
        }

        let removed = repo.catalog.remove(id)?;
        tracing::info!("Removed item {} ({})", removed.id, removed.title);
        Ok(removed)
    }

    pub fn get_item(&self, id: &str) -> AppResult<Item> {
        let repo = self
            .repository
            .read()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        repo.catalog
            .get(id)
            .cloned()
            .ok_or_else(|| AppError::NotFound(format!("Item {} not found", id)))
    }

    /// All items in catalog order.
    pub fn list_items(&self) -> Vec<Item> {
        let repo = self
            .repository
            .read()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        repo.catalog.list()
    }

    /// Case-insensitive substring search on title, author and category.
    pub fn search_items(&self, keyword: &str) -> Vec<Item> {
        let repo = self
            .repository
            .read()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        repo.catalog.search(keyword)
    }

    /// Render the whole catalog as CSV: a header row followed by one row per
    /// item in catalog order, absent descriptions as empty strings. A
    /// read-only report, never consumed back into the system.
    pub fn export_csv(&self) -> AppResult<String> {
        let items = self.list_items();

        let mut writer = csv::Writer::from_writer(Vec::new());
        writer
            .write_record(["ID", "Title", "Author", "Category", "Quantity", "Description"])
            .map_err(|e| AppError::Internal(format!("CSV encoding failed: {}", e)))?;
        for item in &items {
            let quantity = item.quantity.to_string();
            writer
                .write_record([
                    item.id.as_str(),
                    item.title.as_str(),
                    item.author.as_str(),
                    item.category.as_str(),
                    quantity.as_str(),
                    item.description.as_deref().unwrap_or(""),
                ])
                .map_err(|e| AppError::Internal(format!("CSV encoding failed: {}", e)))?;
        }

        let bytes = writer
            .into_inner()
            .map_err(|e| AppError::Internal(format!("CSV encoding failed: {}", e)))?;
        String::from_utf8(bytes).map_err(|e| AppError::Internal(format!("CSV encoding failed: {}", e)))
    }
}
