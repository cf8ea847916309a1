use chrono::Utc;
use tracing::info;
use vine_shared::{CommentId, UserId, ValidationError, VideoId};

use super::FeedEngine;
use crate::error::Result;
use crate::models::Comment;

impl FeedEngine {
    /// Append a comment to the end of a video's thread.
    ///
    /// Text that is empty after trimming is rejected. The stored text is the
    /// trimmed form.
    pub fn add_comment(
        &mut self,
        video_id: VideoId,
        user_id: UserId,
        text: &str,
    ) -> Result<Comment> {
        let text = text.trim();
        if text.is_empty() {
            return Err(ValidationError::EmptyComment.into());
        }
        let idx = self.require_video(video_id)?;
        self.require_user(user_id)?;

        let comment = Comment {
            id: CommentId::new(),
            author_id: user_id,
            text: text.to_string(),
            created_at: Utc::now(),
        };

        let video = &mut self.store.videos_mut()[idx];
        video.comments.push(comment.clone());

        info!(
            video = %video_id,
            author = %user_id,
            comment = %comment.id,
            total = video.comments.len(),
            "comment added"
        );
        Ok(comment)
    }
}
