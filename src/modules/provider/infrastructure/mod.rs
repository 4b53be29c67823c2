pub mod adapters;
pub mod http_client;

// Re-export commonly used types
pub use adapters::ShikimoriAdapter;
pub use http_client::ApiClient;
