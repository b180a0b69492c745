pub mod client;
pub mod request;
pub mod response;
pub mod types;

// Re-export commonly used types for convenient access
pub use client::TransportClient;
pub use request::{GraphqlRequest, RequestOptions};
pub use response::Response;
pub use types::{Method, Status};
