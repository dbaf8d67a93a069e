//! Repository layer: file-backed snapshot stores
//!
//! Each entity collection is owned by exactly one repository; the Catalog
//! owns items, the Ledger owns loans, and neither calls the other. Only the
//! circulation service above them sees both.

pub mod items;
pub mod loans;
pub mod store;
pub mod users;

use std::path::Path;

use crate::error::AppResult;

pub use items::Catalog;
pub use loans::Ledger;
pub use users::UsersRepository;

/// All persistent state of the system.
pub struct Repository {
    pub catalog: Catalog,
    pub ledger: Ledger,
    pub users: UsersRepository,
}

impl Repository {
    /// Open every snapshot store under the given data directory.
    pub fn open(data_dir: impl AsRef<Path>) -> AppResult<Self> {
        let data_dir = data_dir.as_ref();
        Ok(Self {
            catalog: Catalog::open(data_dir.join("items.json"))?,
            ledger: Ledger::open(data_dir.join("loans.json"))?,
            users: UsersRepository::open(data_dir.join("users.json"))?,
        })
    }
}
