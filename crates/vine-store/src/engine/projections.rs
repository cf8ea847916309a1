//! Read projections. Recomputed from the current store on every call.

use vine_shared::{UserId, VideoId};

use super::FeedEngine;
use crate::error::Result;
use crate::models::{CommentView, Video};

impl FeedEngine {
    /// Videos authored by `user_id`, in feed order.
    pub fn videos_by_user(&self, user_id: UserId) -> Vec<Video> {
        self.store
            .videos()
            .iter()
            .filter(|v| v.author_id == user_id)
            .cloned()
            .collect()
    }

    /// Videos `user_id` has liked, in feed order.
    pub fn liked_videos_by_user(&self, user_id: UserId) -> Vec<Video> {
        self.store
            .videos()
            .iter()
            .filter(|v| v.is_liked_by(user_id))
            .cloned()
            .collect()
    }

    /// Whether `follower_id` follows `target_id`. Unknown ids are simply
    /// not following anyone.
    pub fn is_following(&self, follower_id: UserId, target_id: UserId) -> bool {
        self.store
            .find_user(follower_id)
            .is_some_and(|u| u.is_following(target_id))
    }

    /// A video's comment thread with author handles resolved.
    pub fn comments_for(&self, video_id: VideoId) -> Result<Vec<CommentView>> {
        let idx = self.require_video(video_id)?;
        let videos = self.store.videos();
        Ok(videos[idx]
            .comments
            .iter()
            .map(|c| CommentView {
                comment: c.clone(),
                author_handle: self.store.find_user(c.author_id).map(|u| u.handle.clone()),
            })
            .collect())
    }
}
