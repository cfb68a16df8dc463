pub mod dto;
pub mod handlers;
pub mod saga;
pub mod workflow;

pub use handlers::router;
