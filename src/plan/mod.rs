pub mod dates;
pub mod dto;
pub mod handlers;
pub mod repo;
pub mod repo_types;
pub mod slot;

pub use handlers::router;
