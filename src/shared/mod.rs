// Shared kernel: errors, logging, configuration and pagination primitives
// used by every module.

pub mod application; // Pagination primitives
pub mod config; // Environment + CLI configuration
pub mod errors; // Shared error types
pub mod utils; // Logging helpers

pub use config::AppConfig;
pub use errors::{AppError, AppResult};
