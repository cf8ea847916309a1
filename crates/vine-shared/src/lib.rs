pub mod constants;
pub mod error;
pub mod format;
pub mod types;

pub use error::ValidationError;
pub use types::{CommentId, UserId, VideoId};
