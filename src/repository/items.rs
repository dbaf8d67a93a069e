//! Catalog: the repository owning item records.
//!
//! Enforces identifier uniqueness and keeps items in insertion order. All
//! reads hand out clones; mutation only happens through the explicit calls
//! below, each of which persists the full snapshot before reporting success.

use std::path::Path;

use crate::{
    error::{AppError, AppResult},
    models::Item,
    repository::store::{JsonStore, Snapshot},
};

pub struct Catalog {
    store: JsonStore<Item>,
    items: Vec<Item>,
    next_seq: u64,
}

impl Catalog {
    /// Open the catalog backed by the given snapshot file.
    pub fn open(path: impl AsRef<Path>) -> AppResult<Self> {
        let store = JsonStore::new(path.as_ref());
        let snapshot = store.load()?;
        tracing::info!("Loaded {} catalog items", snapshot.records.len());
        Ok(Self {
            store,
            items: snapshot.records,
            next_seq: snapshot.next_seq,
        })
    }

    /// Hand out the next `BK######` identifier. The sequence is persisted
    /// with the collection on the next successful write and never reused,
    /// even after removals.
    pub fn allocate_id(&mut self) -> String {
        let id = format!("BK{:06}", self.next_seq);
        self.next_seq += 1;
        id
    }

    fn position(&self, id: &str) -> Option<usize> {
        self.items.iter().position(|item| item.id == id)
    }

    /// Insert a new item. Fails with `AlreadyExists` when the identifier is
    /// taken. If the snapshot write fails the insertion is rolled back so
    /// memory keeps mirroring the last durable state.
    pub fn add(&mut self, item: Item) -> AppResult<()> {
        if self.position(&item.id).is_some() {
            return Err(AppError::AlreadyExists(format!(
                "Item {} already exists",
                item.id
            )));
        }

        self.items.push(item);
        if let Err(e) = self.save() {
            self.items.pop();
            return Err(e);
        }
        Ok(())
    }

    /// Remove an item by identifier. The Catalog itself does not know about
    /// loans; the open-loan precondition lives in the service layer.
    pub fn remove(&mut self, id: &str) -> AppResult<Item> {
        let index = self
            .position(id)
            .ok_or_else(|| AppError::NotFound(format!("Item {} not found", id)))?;

        let removed = self.items.remove(index);
        if let Err(e) = self.save() {
            self.items.insert(index, removed);
            return Err(e);
        }
        Ok(removed)
    }

    /// Replace the stored record wholesale. Callers construct the complete
    /// desired item state, including quantity.
    pub fn update(&mut self, item: Item) -> AppResult<()> {
        let index = self
            .position(&item.id)
            .ok_or_else(|| AppError::NotFound(format!("Item {} not found", item.id)))?;

        let previous = std::mem::replace(&mut self.items[index], item);
        if let Err(e) = self.save() {
            self.items[index] = previous;
            return Err(e);
        }
        Ok(())
    }

    pub fn get(&self, id: &str) -> Option<&Item> {
        self.items.iter().find(|item| item.id == id)
    }

    /// Case-insensitive substring search across title, author and category,
    /// in catalog (insertion) order. An empty keyword matches nothing;
    /// callers that want everything should use [`Catalog::list`].
    pub fn search(&self, keyword: &str) -> Vec<Item> {
        if keyword.is_empty() {
            return Vec::new();
        }
        let keyword = keyword.to_lowercase();
        self.items
            .iter()
            .filter(|item| {
                [&item.title, &item.author, &item.category]
                    .iter()
                    .any(|field| field.to_lowercase().contains(&keyword))
            })
            .cloned()
            .collect()
    }

    /// A copy of all items in insertion order.
    pub fn list(&self) -> Vec<Item> {
        self.items.clone()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    fn save(&self) -> AppResult<()> {
        self.store.save(&Snapshot {
            next_seq: self.next_seq,
            records: self.items.clone(),
        })
    }

    /// Test hook: repoint the backing store, e.g. at an unwritable path.
    #[cfg(test)]
    pub(crate) fn redirect_store(&mut self, path: impl Into<std::path::PathBuf>) {
        self.store = JsonStore::new(path.into());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(id: &str, title: &str, author: &str, category: &str, quantity: u32) -> Item {
        Item {
            id: id.to_string(),
            title: title.to_string(),
            author: author.to_string(),
            category: category.to_string(),
            quantity,
            description: None,
        }
    }

    fn open_catalog(dir: &tempfile::TempDir) -> Catalog {
        Catalog::open(dir.path().join("items.json")).unwrap()
    }

    #[test]
    fn add_rejects_duplicate_identifiers() {
        let dir = tempfile::tempdir().unwrap();
        let mut catalog = open_catalog(&dir);

        catalog
            .add(item("BK000001", "Dune", "Herbert", "SF", 3))
            .unwrap();
        let err = catalog
            .add(item("BK000001", "Other", "Other", "SF", 1))
            .unwrap_err();
        assert!(matches!(err, AppError::AlreadyExists(_)));
        assert_eq!(catalog.len(), 1);
    }

    #[test]
    fn update_replaces_wholesale_and_remove_deletes() {
        let dir = tempfile::tempdir().unwrap();
        let mut catalog = open_catalog(&dir);

        catalog
            .add(item("BK000001", "Dune", "Herbert", "SF", 3))
            .unwrap();
        catalog
            .update(item("BK000001", "Dune", "Frank Herbert", "SF", 2))
            .unwrap();
        assert_eq!(catalog.get("BK000001").unwrap().quantity, 2);
        assert_eq!(catalog.get("BK000001").unwrap().author, "Frank Herbert");

        catalog.remove("BK000001").unwrap();
        assert!(catalog.get("BK000001").is_none());
        assert!(matches!(
            catalog.remove("BK000001").unwrap_err(),
            AppError::NotFound(_)
        ));
        assert!(matches!(
            catalog
                .update(item("BK000001", "Dune", "Herbert", "SF", 1))
                .unwrap_err(),
            AppError::NotFound(_)
        ));
    }

    #[test]
    fn search_is_case_insensitive_and_empty_keyword_matches_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let mut catalog = open_catalog(&dir);

        catalog
            .add(item("BK000001", "The Hobbit", "Tolkien", "Fantasy", 1))
            .unwrap();
        catalog
            .add(item("BK000002", "Dune", "Herbert", "Science Fiction", 1))
            .unwrap();

        assert_eq!(catalog.search("toLKi").len(), 1);
        assert_eq!(catalog.search("fiction")[0].id, "BK000002");
        assert!(catalog.search("nothing-like-this").is_empty());
        assert!(catalog.search("").is_empty());
        assert_eq!(catalog.list().len(), 2);
    }

    #[test]
    fn persists_across_reopen_with_monotonic_ids() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("items.json");

        {
            let mut catalog = Catalog::open(&path).unwrap();
            let first = catalog.allocate_id();
            assert_eq!(first, "BK000001");
            catalog
                .add(item(&first, "Dune", "Herbert", "SF", 3))
                .unwrap();
            let second = catalog.allocate_id();
            catalog
                .add(item(&second, "Hobbit", "Tolkien", "Fantasy", 1))
                .unwrap();
            // Removing the newest record must not free its identifier.
            catalog.remove(&second).unwrap();
        }

        let mut catalog = Catalog::open(&path).unwrap();
        assert_eq!(catalog.len(), 1);
        assert_eq!(catalog.allocate_id(), "BK000003");
    }

    #[test]
    fn failed_write_rolls_back_the_in_memory_mutation() {
        let dir = tempfile::tempdir().unwrap();
        let mut catalog = open_catalog(&dir);
        catalog
            .add(item("BK000001", "Dune", "Herbert", "SF", 3))
            .unwrap();

        // A directory as the snapshot path makes every save fail.
        catalog.redirect_store(dir.path());

        let err = catalog
            .update(item("BK000001", "Dune", "Herbert", "SF", 2))
            .unwrap_err();
        assert!(matches!(err, AppError::Persistence(_)));
        assert_eq!(catalog.get("BK000001").unwrap().quantity, 3);

        let err = catalog
            .add(item("BK000002", "Hobbit", "Tolkien", "Fantasy", 1))
            .unwrap_err();
        assert!(matches!(err, AppError::Persistence(_)));
        assert_eq!(catalog.len(), 1);
    }
}
