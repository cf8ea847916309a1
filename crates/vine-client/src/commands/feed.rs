use std::sync::Mutex;

use serde::Serialize;
use tracing::info;
use vine_shared::format::format_count;
use vine_shared::{UserId, VideoId};
use vine_store::{CommentView, EntityStore, User, Video};

use super::lock;
use crate::error::CommandError;
use crate::events::{
    emit_event, VideoUpdatedPayload, EVENT_COMMENT_ADDED, EVENT_VIDEO_UPDATED,
};
use crate::state::AppState;

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthorDto {
    pub id: String,
    pub handle: String,
    pub display_name: String,
    pub avatar_url: String,
    pub verified: bool,
}

impl From<&User> for AuthorDto {
    fn from(u: &User) -> Self {
        Self {
            id: u.id.to_string(),
            handle: u.handle.clone(),
            display_name: u.display_name.clone(),
            avatar_url: u.avatar_url.clone(),
            verified: u.verified,
        }
    }
}

/// One card of the vertical feed (also used for profile grid tiles).
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VideoCardDto {
    pub id: String,
    pub author: Option<AuthorDto>,
    pub title: String,
    pub description: String,
    pub media_url: String,
    pub thumbnail_url: String,
    pub duration_secs: u32,
    pub tags: Vec<String>,
    pub likes: u64,
    pub likes_label: String,
    pub comment_count: usize,
    /// Whether the viewer is in the video's likers.
    pub is_liked: bool,
    pub created_at: String,
}

impl VideoCardDto {
    pub fn build(video: &Video, store: &EntityStore, viewer: Option<UserId>) -> Self {
        Self {
            id: video.id.to_string(),
            author: store.find_user(video.author_id).map(AuthorDto::from),
            title: video.title.clone(),
            description: video.description.clone(),
            media_url: video.media_url.clone(),
            thumbnail_url: video.thumbnail_url.clone(),
            duration_secs: video.duration_secs,
            tags: video.tags.clone(),
            likes: video.likes,
            likes_label: format_count(video.likes),
            comment_count: video.comments.len(),
            is_liked: viewer.is_some_and(|v| video.is_liked_by(v)),
            created_at: video.created_at.to_rfc3339(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CommentDto {
    pub id: String,
    pub author_id: String,
    pub author_handle: Option<String>,
    pub text: String,
    pub created_at: String,
}

impl From<CommentView> for CommentDto {
    fn from(c: CommentView) -> Self {
        Self {
            id: c.comment.id.to_string(),
            author_id: c.comment.author_id.to_string(),
            author_handle: c.author_handle,
            text: c.comment.text,
            created_at: c.comment.created_at.to_rfc3339(),
        }
    }
}

/// The whole feed, most recent first.
pub fn list_feed(state: &Mutex<AppState>) -> Result<Vec<VideoCardDto>, CommandError> {
    let guard = lock(state)?;
    let viewer = guard.require_user()?;
    let store = guard.engine.store();
    Ok(store
        .videos()
        .iter()
        .map(|v| VideoCardDto::build(v, store, Some(viewer)))
        .collect())
}

pub fn like_video(
    state: &Mutex<AppState>,
    video_id: VideoId,
) -> Result<VideoCardDto, CommandError> {
    let mut guard = lock(state)?;
    let viewer = guard.require_user()?;

    let video = guard.engine.like_toggle(video_id, viewer)?;

    emit_event(
        guard.events.as_ref(),
        EVENT_VIDEO_UPDATED,
        VideoUpdatedPayload {
            video_id: video.id.to_string(),
            likes: video.likes,
            comment_count: video.comments.len(),
        },
    );
    Ok(VideoCardDto::build(&video, guard.engine.store(), Some(viewer)))
}

pub fn add_comment(
    state: &Mutex<AppState>,
    video_id: VideoId,
    text: &str,
) -> Result<CommentDto, CommandError> {
    let mut guard = lock(state)?;
    let viewer = guard.require_user()?;

    let comment = guard.engine.add_comment(video_id, viewer, text)?;
    let handle = guard
        .engine
        .store()
        .find_user(viewer)
        .map(|u| u.handle.clone());
    let dto = CommentDto::from(CommentView {
        comment,
        author_handle: handle,
    });

    emit_event(guard.events.as_ref(), EVENT_COMMENT_ADDED, &dto);
    info!(video = %video_id, "comment posted");
    Ok(dto)
}

pub fn list_comments(
    state: &Mutex<AppState>,
    video_id: VideoId,
) -> Result<Vec<CommentDto>, CommandError> {
    let guard = lock(state)?;
    guard.require_user()?;
    let thread = guard.engine.comments_for(video_id)?;
    Ok(thread.into_iter().map(CommentDto::from).collect())
}
