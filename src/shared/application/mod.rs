/// Shared application layer patterns
///
/// Pagination primitives used by the feed and the provider adapters.
pub mod pagination;

pub use pagination::*;
