//! Business logic services

pub mod catalog;
pub mod circulation;
pub mod identity;

use std::sync::{Arc, RwLock};

use crate::repository::Repository;

/// Shared handle to all persistent state.
///
/// One process-wide lock serializes every operation that touches an item:
/// circulation operations hold the write lock for their full duration, so
/// two check-outs of the last remaining unit can never both read quantity 1.
/// Nothing holds the lock across an await point.
pub type SharedRepository = Arc<RwLock<Repository>>;

/// Container for all services
#[derive(Clone)]
pub struct Services {
    pub catalog: catalog::CatalogService,
    pub circulation: circulation::CirculationService,
    pub identity: identity::IdentityService,
}

impl Services {
    /// Create all services over one shared repository.
    pub fn new(repository: Repository) -> Self {
        let shared: SharedRepository = Arc::new(RwLock::new(repository));
        Self {
            catalog: catalog::CatalogService::new(shared.clone()),
            circulation: circulation::CirculationService::new(shared.clone()),
            identity: identity::IdentityService::new(shared),
        }
    }
}
