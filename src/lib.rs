pub mod api;
pub mod auth;
pub mod config;
pub mod error;
pub mod graphql;
pub mod http;
pub mod logger;
pub mod meta;
pub mod schema;

// Re-export commonly used types
pub use error::{ContractError, Result};
