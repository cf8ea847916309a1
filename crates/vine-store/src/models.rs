//! Domain model structs held by the [`EntityStore`](crate::EntityStore).
//!
//! Every struct derives `Serialize` and `Deserialize` so it can be handed
//! directly to the UI layer.

use std::collections::BTreeSet;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use vine_shared::{CommentId, UserId, VideoId};

// ---------------------------------------------------------------------------
// User
// ---------------------------------------------------------------------------

/// A registered account.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct User {
    pub id: UserId,
    /// Unique `@handle`, compared case-insensitively.
    pub handle: String,
    pub display_name: String,
    /// Only used by the mock sign-in lookup.
    pub email: String,
    pub avatar_url: String,
    pub verified: bool,
    /// Derived counter. Moves by exactly one per follow toggle against this
    /// user, in the same commit as the follower's `following` set.
    pub followers: u64,
    /// Users this user follows.
    pub following: BTreeSet<UserId>,
    pub bio: String,
}

impl User {
    pub fn is_following(&self, target: UserId) -> bool {
        self.following.contains(&target)
    }

    /// Case-insensitive handle match, ignoring a leading `@`.
    pub fn handle_matches(&self, handle: &str) -> bool {
        self.handle
            .eq_ignore_ascii_case(handle.trim().trim_start_matches('@'))
    }
}

// ---------------------------------------------------------------------------
// Video
// ---------------------------------------------------------------------------

/// A published clip together with its likes and comment thread.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Video {
    pub id: VideoId,
    pub author_id: UserId,
    pub title: String,
    pub description: String,
    /// URI of the playable asset.
    pub media_url: String,
    pub thumbnail_url: String,
    pub duration_secs: u32,
    pub tags: Vec<String>,
    /// Derived counter. Seed data may carry a count that pre-dates
    /// `liked_by`; from then on it moves in lockstep with the set.
    pub likes: u64,
    pub liked_by: BTreeSet<UserId>,
    /// Chronological, append-only.
    pub comments: Vec<Comment>,
    pub created_at: DateTime<Utc>,
}

impl Video {
    pub fn is_liked_by(&self, user: UserId) -> bool {
        self.liked_by.contains(&user)
    }
}

// ---------------------------------------------------------------------------
// Comment
// ---------------------------------------------------------------------------

/// A single comment. Immutable once appended to its video.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Comment {
    pub id: CommentId,
    pub author_id: UserId,
    pub text: String,
    pub created_at: DateTime<Utc>,
}

/// A comment joined with its author, as shown in the comment sheet.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct CommentView {
    pub comment: Comment,
    /// `None` only if the author vanished, which the store never allows.
    pub author_handle: Option<String>,
}

// ---------------------------------------------------------------------------
// Drafts and outcomes
// ---------------------------------------------------------------------------

/// Input to [`FeedEngine::publish`](crate::FeedEngine::publish).
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct VideoDraft {
    pub title: Option<String>,
    pub description: Option<String>,
    /// Playable URI handed back by the upload collaborator.
    pub media_url: Option<String>,
    /// MIME type of the picked file, when the picker reports one.
    pub media_type: Option<String>,
    pub thumbnail_url: Option<String>,
    /// Free text, comma separated.
    pub tags: String,
}

/// Input to [`FeedEngine::register`](crate::FeedEngine::register).
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct RegistrationDraft {
    pub display_name: String,
    pub handle: String,
    pub email: String,
    pub password: String,
    pub confirm_password: String,
}

/// Result of a follow toggle: the new direction and the target's counter.
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
pub struct FollowOutcome {
    pub following: bool,
    pub target_followers: u64,
}
