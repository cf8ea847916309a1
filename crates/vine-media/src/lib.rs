//! # vine-media
//!
//! Decides which feed item is on screen and keeps exactly that item playing.
//!
//! - [`resolver`]: scroll offset to active index, with hysteresis
//! - [`playback`]: one controller per item, idempotent start/pause
//! - [`feed`]: binds the two together for a whole feed

pub mod feed;
pub mod playback;
pub mod resolver;

pub use feed::{FeedPlayback, FeedTransition};
pub use playback::{MediaError, MediaPlayer, PlaybackController, PlaybackStatus, PlaybackWarning};
pub use resolver::{resolve_index, ActiveChange, ActiveItemResolver};
