pub mod application;
pub mod domain;

// Re-exports for easy external access
pub use application::{Batch, FeedService, PageFetcher};
pub use domain::{
    AdvancePolicy, EndOfData, FeedOptions, FeedPhase, FeedSnapshot, ListController,
    ScriptedVisibility, VisibilityEvent, VisibilitySource,
};
