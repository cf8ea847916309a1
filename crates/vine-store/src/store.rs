//! Snapshot-based entity storage.
//!
//! The [`EntityStore`] keeps each collection behind an [`Arc`].  Readers get
//! a clone of that `Arc` and can hold on to it for as long as they like: a
//! later mutation writes copy-on-write, so a snapshot that has been handed
//! out never changes underneath its reader.

use std::collections::HashSet;
use std::sync::Arc;

use vine_shared::{UserId, ValidationError, VideoId};

use crate::error::Result;
use crate::models::{User, Video};
use crate::seed;

/// Authoritative owner of every user and video in the session.
#[derive(Debug, Clone, Default)]
pub struct EntityStore {
    users: Arc<Vec<User>>,
    /// Most recent first. This is the feed order.
    videos: Arc<Vec<Video>>,
}

impl EntityStore {
    /// Build a store from an initial working set, rejecting data whose
    /// references do not resolve.
    pub fn new(users: Vec<User>, videos: Vec<Video>) -> Result<Self> {
        check_consistency(&users, &videos)?;
        tracing::debug!(
            users = users.len(),
            videos = videos.len(),
            "entity store initialised"
        );
        Ok(Self {
            users: Arc::new(users),
            videos: Arc::new(videos),
        })
    }

    /// The demo working set the client starts with.
    pub fn seeded() -> Self {
        Self {
            users: Arc::new(seed::demo_users()),
            videos: Arc::new(seed::demo_videos()),
        }
    }

    /// Read-only snapshot of all users, in registration order.
    pub fn users(&self) -> Arc<Vec<User>> {
        Arc::clone(&self.users)
    }

    /// Read-only snapshot of the feed, most recent first.
    pub fn videos(&self) -> Arc<Vec<Video>> {
        Arc::clone(&self.videos)
    }

    pub fn find_user(&self, id: UserId) -> Option<&User> {
        self.users.iter().find(|u| u.id == id)
    }

    pub fn find_video(&self, id: VideoId) -> Option<&Video> {
        self.videos.iter().find(|v| v.id == id)
    }

    pub fn find_user_by_handle(&self, handle: &str) -> Option<&User> {
        self.users.iter().find(|u| u.handle_matches(handle))
    }

    pub fn find_user_by_email(&self, email: &str) -> Option<&User> {
        let email = email.trim();
        self.users
            .iter()
            .find(|u| u.email.eq_ignore_ascii_case(email))
    }

    pub(crate) fn user_index(&self, id: UserId) -> Option<usize> {
        self.users.iter().position(|u| u.id == id)
    }

    pub(crate) fn video_index(&self, id: VideoId) -> Option<usize> {
        self.videos.iter().position(|v| v.id == id)
    }

    // Write access is restricted to the engine. Callers must have checked
    // every precondition before asking for it.

    pub(crate) fn users_mut(&mut self) -> &mut Vec<User> {
        Arc::make_mut(&mut self.users)
    }

    pub(crate) fn videos_mut(&mut self) -> &mut Vec<Video> {
        Arc::make_mut(&mut self.videos)
    }
}

fn check_consistency(users: &[User], videos: &[Video]) -> Result<()> {
    let mut ids = HashSet::new();
    let mut handles = HashSet::new();
    for user in users {
        if !ids.insert(user.id) {
            return Err(inconsistent(format!("duplicate user id {}", user.id)));
        }
        if !handles.insert(user.handle.to_ascii_lowercase()) {
            return Err(ValidationError::HandleTaken(user.handle.clone()).into());
        }
    }

    for user in users {
        for target in &user.following {
            if *target == user.id || !ids.contains(target) {
                return Err(inconsistent(format!(
                    "user {} follows invalid target {target}",
                    user.id
                )));
            }
        }
    }

    let mut video_ids = HashSet::new();
    for video in videos {
        if !video_ids.insert(video.id) {
            return Err(inconsistent(format!("duplicate video id {}", video.id)));
        }
        if !ids.contains(&video.author_id) {
            return Err(inconsistent(format!(
                "video {} has unknown author {}",
                video.id, video.author_id
            )));
        }
        if let Some(liker) = video.liked_by.iter().find(|l| !ids.contains(l)) {
            return Err(inconsistent(format!(
                "video {} liked by unknown user {liker}",
                video.id
            )));
        }
        if let Some(c) = video.comments.iter().find(|c| !ids.contains(&c.author_id)) {
            return Err(inconsistent(format!(
                "comment {} on video {} has unknown author {}",
                c.id, video.id, c.author_id
            )));
        }
    }
    Ok(())
}

fn inconsistent(msg: String) -> crate::FeedError {
    ValidationError::InconsistentSeed(msg).into()
}
