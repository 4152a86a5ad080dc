//! Data layer and terminal admin console for a personal portfolio site.
//!
//! All state lives in a local key-value [`store`]. Each component takes the
//! store it should use and rewrites its whole collection on every change.

pub mod analytics;
pub mod auth;
pub mod catalog;
pub mod config;
pub mod error;
pub mod logging;
pub mod models;
pub mod purchases;
pub mod review;
pub mod store;
pub mod ui;
pub mod wizard;
