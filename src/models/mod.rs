//! Data models for the Libris server

pub mod item;
pub mod loan;
pub mod user;

pub use item::Item;
pub use loan::Loan;
pub use user::{Role, User};
