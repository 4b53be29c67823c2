pub mod infrastructure;
pub mod traits;

// Re-exports for easy external access
pub use infrastructure::adapters::{page_url, ShikimoriAdapter};
pub use traits::PageSource;
