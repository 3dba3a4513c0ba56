pub mod error;
pub mod models;
pub mod openapi;
pub mod predict;
pub mod repo;
pub mod routes;
pub mod settings;
pub mod tips;

// Re-export commonly used items for tests / external users
pub use routes::{config, AppState};
