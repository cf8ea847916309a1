//! Scroll, resize and tap input from the feed view, plus media failures
//! the host reports after a play request.

use std::sync::Mutex;

use tracing::debug;
use vine_media::{FeedTransition, MediaError, PlaybackStatus, PlaybackWarning};
use vine_shared::VideoId;
use vine_store::FeedError;

use super::lock;
use crate::error::CommandError;
use crate::events::{
    emit_event, ActiveItemPayload, EventSink, PlaybackStatusPayload, PlaybackWarningPayload,
    EVENT_ACTIVE_ITEM_CHANGED, EVENT_PLAYBACK_WARNING,
};
use crate::state::AppState;

fn emit_warning(sink: &dyn EventSink, warning: &PlaybackWarning) {
    emit_event(
        sink,
        EVENT_PLAYBACK_WARNING,
        PlaybackWarningPayload {
            video_id: warning.item.to_string(),
            message: warning.source.to_string(),
        },
    );
}

/// Announce a change of active item, and the start failure that came with
/// it if there was one.
pub(crate) fn emit_transition(
    sink: &dyn EventSink,
    transition: &FeedTransition,
) -> ActiveItemPayload {
    let payload = ActiveItemPayload {
        index: transition.index,
        video_id: transition.current.map(|id| id.to_string()),
        previous_video_id: transition.previous.map(|id| id.to_string()),
    };
    emit_event(sink, EVENT_ACTIVE_ITEM_CHANGED, &payload);
    if let Some(warning) = &transition.warning {
        emit_warning(sink, warning);
    }
    payload
}

fn require_video(state: &AppState, video_id: VideoId) -> Result<(), CommandError> {
    match state.engine.store().find_video(video_id) {
        Some(_) => Ok(()),
        None => Err(FeedError::VideoNotFound(video_id).into()),
    }
}

/// One scroll tick. Returns the new active item when it changed, and
/// `None` when the tick stayed within the current item.
pub fn scroll(
    state: &Mutex<AppState>,
    offset: f64,
) -> Result<Option<ActiveItemPayload>, CommandError> {
    let mut guard = lock(state)?;
    let viewport_height = guard.viewport_height;

    let transition = guard.playback.on_scroll(offset, viewport_height);
    Ok(transition.map(|t| emit_transition(guard.events.as_ref(), &t)))
}

/// The viewport changed size. The last scroll offset is resolved again
/// against the new height.
pub fn resize(
    state: &Mutex<AppState>,
    height: f64,
) -> Result<Option<ActiveItemPayload>, CommandError> {
    if !height.is_finite() || height <= 0.0 {
        return Err(CommandError::InvalidViewport(height));
    }
    let mut guard = lock(state)?;
    guard.viewport_height = height;
    debug!(height, "viewport resized");

    let transition = guard.playback.refresh(height);
    Ok(transition.map(|t| emit_transition(guard.events.as_ref(), &t)))
}

/// Tap on a feed card: toggles playback of the active card, ignored on any
/// other card.
pub fn tap_video(
    state: &Mutex<AppState>,
    video_id: VideoId,
) -> Result<PlaybackStatusPayload, CommandError> {
    let mut guard = lock(state)?;
    require_video(&guard, video_id)?;

    let status = match guard.playback.tap(video_id) {
        Ok(status) => status,
        Err(warning) => {
            emit_warning(guard.events.as_ref(), &warning);
            PlaybackStatus::Paused
        }
    };
    Ok(PlaybackStatusPayload {
        video_id: video_id.to_string(),
        status,
    })
}

/// The host's media element failed after accepting a play request. The
/// card is marked paused and not retried; a tap starts it again.
pub fn media_failed(
    state: &Mutex<AppState>,
    video_id: VideoId,
    message: String,
) -> Result<PlaybackStatusPayload, CommandError> {
    let mut guard = lock(state)?;
    require_video(&guard, video_id)?;

    if let Some(warning) = guard
        .playback
        .play_failed(video_id, MediaError::Unavailable(message))
    {
        emit_warning(guard.events.as_ref(), &warning);
    }
    let status = guard
        .playback
        .controller(video_id)
        .map(|c| c.status())
        .unwrap_or_default();
    Ok(PlaybackStatusPayload {
        video_id: video_id.to_string(),
        status,
    })
}
