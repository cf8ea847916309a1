use thiserror::Error;
use vine_shared::{UserId, ValidationError, VideoId};

/// Errors produced by feed mutations and lookups that must resolve.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FeedError {
    /// Input rejected before any write.
    #[error("Validation failed: {0}")]
    Validation(#[from] ValidationError),

    /// A user id that is not in the store.
    #[error("User not found: {0}")]
    UserNotFound(UserId),

    /// A video id that is not in the store.
    #[error("Video not found: {0}")]
    VideoNotFound(VideoId),
}

impl FeedError {
    /// Whether this is a bad-input rejection rather than a dangling id.
    pub fn is_validation(&self) -> bool {
        matches!(self, FeedError::Validation(_))
    }
}

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, FeedError>;
