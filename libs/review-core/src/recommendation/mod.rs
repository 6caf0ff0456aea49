//! AI recommendation feed: cursor resolution, infinite-list state,
//! per-card feedback and the recommended-id registry.

pub mod cursor;
pub mod feed;
pub mod feedback;
pub mod registry;

pub use cursor::{
    PageParam, RecommendationHeaders, RecommendationItem, RecommendationMeta, RecommendationPage,
};
pub use feed::{FeedState, InfiniteList};
pub use feedback::{FeedbackAction, FeedbackTracker, Toast, ToastKind};
pub use registry::RecommendedIds;
