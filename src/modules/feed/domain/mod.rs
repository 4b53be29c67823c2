pub mod controller;
pub mod visibility;

pub use controller::{
    AdvancePolicy, AppendOutcome, EndOfData, FeedOptions, FeedPhase, FeedSnapshot, ListController,
};
pub use visibility::{
    ChannelVisibility, LineVisibility, ScriptedVisibility, VisibilityEvent, VisibilitySource,
    DEFAULT_THRESHOLD,
};
