//! API handlers for the Libris REST endpoints

pub mod auth;
pub mod health;
pub mod items;
pub mod loans;
pub mod openapi;
pub mod users;
