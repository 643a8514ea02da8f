pub mod base64;
pub mod file;
pub mod http;

// Re-export common utilities
pub use file::{file_exists, file_get, file_get_async};
pub use http::{HttpFetcher, SubscriptionFetcher};
