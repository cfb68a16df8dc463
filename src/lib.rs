pub mod ai;
pub mod app;
pub mod catalog;
pub mod config;
pub mod db;
pub mod error;
pub mod health;
pub mod importer;
pub mod plan;
pub mod profile;
pub mod shopping;
pub mod state;

pub use error::ApiError;
pub use state::AppState;
