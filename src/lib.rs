//! Libris Library Circulation System
//!
//! Tracks a catalog of physical items with finite stock and the loans
//! recording who currently holds each unit. The circulation engine keeps the
//! two independently-persisted collections consistent, compensating
//! explicitly when one of the paired writes fails. A thin JSON API renders
//! the results.

use std::sync::Arc;

pub mod api;
pub mod config;
pub mod error;
pub mod models;
pub mod repository;
pub mod services;

pub use config::AppConfig;
pub use error::{AppError, AppResult};

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub services: Arc<services::Services>,
}
