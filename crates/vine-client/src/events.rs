use serde::Serialize;
use serde_json::Value;
use vine_media::PlaybackStatus;

pub const EVENT_ACTIVE_ITEM_CHANGED: &str = "active-item-changed";
pub const EVENT_VIDEO_UPDATED: &str = "video-updated";
pub const EVENT_COMMENT_ADDED: &str = "comment-added";
pub const EVENT_FOLLOW_CHANGED: &str = "follow-changed";
pub const EVENT_VIDEO_PUBLISHED: &str = "video-published";
pub const EVENT_PLAYBACK_WARNING: &str = "playback-warning";
pub const EVENT_SESSION_CHANGED: &str = "session-changed";
pub const EVENT_MEDIA_REQUEST: &str = "media-request";
pub const EVENT_COMMAND_RESULT: &str = "command-result";

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ActiveItemPayload {
    pub index: Option<usize>,
    pub video_id: Option<String>,
    pub previous_video_id: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VideoUpdatedPayload {
    pub video_id: String,
    pub likes: u64,
    pub comment_count: usize,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FollowChangedPayload {
    pub follower_id: String,
    pub target_id: String,
    pub following: bool,
    pub followers: u64,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PlaybackWarningPayload {
    pub video_id: String,
    pub message: String,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionPayload {
    pub user_id: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum MediaAction {
    Play,
    Pause,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MediaRequestPayload {
    pub video_id: String,
    pub action: MediaAction,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PlaybackStatusPayload {
    pub video_id: String,
    pub status: PlaybackStatus,
}

/// Where UI events go. The host bridge writes them to stdout; tests
/// collect them in memory.
pub trait EventSink: Send + Sync {
    fn emit(&self, event: &str, payload: Value) -> std::io::Result<()>;
}

pub fn emit_event<S: Serialize>(sink: &dyn EventSink, event: &str, payload: S) {
    let value = match serde_json::to_value(payload) {
        Ok(v) => v,
        Err(e) => {
            tracing::error!(event, error = %e, "Failed to serialise event");
            return;
        }
    };
    if let Err(e) = sink.emit(event, value) {
        tracing::error!(event, error = %e, "Failed to emit event");
    }
}

#[cfg(test)]
pub(crate) use memory::MemorySink;

#[cfg(test)]
mod memory {
    use std::sync::Mutex;

    use serde_json::Value;

    use super::EventSink;

    /// Keeps every emitted event, in order.
    #[derive(Debug, Default)]
    pub struct MemorySink {
        events: Mutex<Vec<(String, Value)>>,
    }

    impl MemorySink {
        pub fn events(&self) -> Vec<(String, Value)> {
            self.events
                .lock()
                .map(|events| events.clone())
                .unwrap_or_default()
        }

        pub fn names(&self) -> Vec<String> {
            self.events().into_iter().map(|(name, _)| name).collect()
        }
    }

    impl EventSink for MemorySink {
        fn emit(&self, event: &str, payload: Value) -> std::io::Result<()> {
            let mut events = self
                .events
                .lock()
                .map_err(|e| std::io::Error::other(e.to_string()))?;
            events.push((event.to_string(), payload));
            Ok(())
        }
    }
}
