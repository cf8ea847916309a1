use std::collections::BTreeSet;

use chrono::Utc;
use tracing::info;
use vine_shared::constants::{
    CLIP_DURATION_SECS, DEFAULT_THUMBNAIL_URL, DEFAULT_VIDEO_TITLE, VIDEO_MIME_PREFIX,
};
use vine_shared::{UserId, ValidationError, VideoId};

use super::FeedEngine;
use crate::error::Result;
use crate::models::{Video, VideoDraft};

/// Split free-text tags on commas, trimming each and dropping empties.
pub fn parse_tags(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .map(String::from)
        .collect()
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

impl FeedEngine {
    /// Publish a new clip at the head of the feed.
    pub fn publish(&mut self, author_id: UserId, draft: VideoDraft) -> Result<Video> {
        let media_url = non_blank(draft.media_url).ok_or(ValidationError::MissingMedia)?;
        if let Some(mime) = non_blank(draft.media_type) {
            if !mime.to_ascii_lowercase().starts_with(VIDEO_MIME_PREFIX) {
                return Err(ValidationError::UnsupportedMedia(mime).into());
            }
        }
        self.require_user(author_id)?;

        let video = Video {
            id: VideoId::new(),
            author_id,
            title: non_blank(draft.title).unwrap_or_else(|| DEFAULT_VIDEO_TITLE.to_string()),
            description: non_blank(draft.description).unwrap_or_default(),
            media_url,
            thumbnail_url: non_blank(draft.thumbnail_url)
                .unwrap_or_else(|| DEFAULT_THUMBNAIL_URL.to_string()),
            duration_secs: CLIP_DURATION_SECS,
            tags: parse_tags(&draft.tags),
            likes: 0,
            liked_by: BTreeSet::new(),
            comments: Vec::new(),
            created_at: Utc::now(),
        };

        let videos = self.store.videos_mut();
        videos.insert(0, video.clone());

        info!(
            video = %video.id,
            author = %author_id,
            tags = video.tags.len(),
            feed_len = videos.len(),
            "video published"
        );
        Ok(video)
    }
}
