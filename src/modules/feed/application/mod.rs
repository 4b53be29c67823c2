pub mod page_fetcher;
pub mod service;

pub use page_fetcher::{Batch, PageFetcher};
pub use service::FeedService;
