//! Core review-queue library shared by the API client and the CLI.
//!
//! Provides:
//! - Due-card classification and priority scoring
//! - Bucket merging with dedup-by-problem-id
//! - Server-side and client-side queue pagination
//! - Recommendation infinite-list state machine and feedback tracking
//! - Shared wire types (ReviewCard, CardState, Rating, etc.)

pub mod classify;
pub mod error;
pub mod pagination;
pub mod queue;
pub mod recommendation;
pub mod sequence;
pub mod types;

pub use classify::{classify_card, days_until_due, due_display};
pub use error::{CoreError, Result};
pub use pagination::{
    paginate, DaysAheadFilter, QueuePage, QueueQuery, ReviewQueueView, ServerPaging,
};
pub use queue::{merge_buckets, QueueBuckets};
pub use recommendation::{
    FeedbackAction, FeedbackTracker, FeedState, InfiniteList, PageParam, RecommendationHeaders,
    RecommendationItem, RecommendationMeta, RecommendationPage, RecommendedIds, Toast, ToastKind,
};
pub use sequence::{RequestSequencer, Ticket};
pub use types::{
    CardState, DisplayReviewProblem, ProblemDifficulty, Rating, ReviewCard, ReviewStatus,
    ReviewType,
};
