use std::sync::Mutex;

use serde::Deserialize;
use vine_store::VideoDraft;

use super::feed::VideoCardDto;
use super::lock;
use super::viewport::emit_transition;
use crate::error::CommandError;
use crate::events::{emit_event, EVENT_VIDEO_PUBLISHED};
use crate::state::AppState;

/// What the file picker and media upload collaborators handed back.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PickedFile {
    /// Playable URI of the uploaded media.
    pub uri: String,
    pub mime_type: Option<String>,
    pub thumbnail_url: Option<String>,
}

/// The upload form as submitted.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct UploadForm {
    pub title: String,
    pub description: String,
    /// Comma separated.
    pub tags: String,
    pub file: Option<PickedFile>,
}

impl From<UploadForm> for VideoDraft {
    fn from(form: UploadForm) -> Self {
        let (media_url, media_type, thumbnail_url) = match form.file {
            Some(f) => (Some(f.uri), f.mime_type, f.thumbnail_url),
            None => (None, None, None),
        };
        VideoDraft {
            title: Some(form.title),
            description: Some(form.description),
            media_url,
            media_type,
            thumbnail_url,
            tags: form.tags,
        }
    }
}

/// Publish the form as the signed-in user. The new video lands at the head
/// of the feed, so playback is resynced to the new order and, once the user
/// has scrolled, the item under the viewport is switched straight away.
pub fn publish_video(
    state: &Mutex<AppState>,
    form: UploadForm,
) -> Result<VideoCardDto, CommandError> {
    let mut guard = lock(state)?;
    let author = guard.require_user()?;

    let video = guard.engine.publish(author, form.into())?;
    let transition = guard.sync_playback();

    let card = VideoCardDto::build(&video, guard.engine.store(), Some(author));
    emit_event(guard.events.as_ref(), EVENT_VIDEO_PUBLISHED, &card);
    if let Some(transition) = transition {
        emit_transition(guard.events.as_ref(), &transition);
    }
    Ok(card)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::viewport;
    use crate::events::EVENT_ACTIVE_ITEM_CHANGED;
    use crate::state::test_support::seeded_state;
    use vine_media::PlaybackStatus;
    use vine_store::seed::{ALEX, CLOSURES_VIDEO};

    fn signed_in() -> Mutex<AppState> {
        let (mut state, _) = seeded_state();
        state.sign_in(ALEX).unwrap();
        Mutex::new(state)
    }

    #[test]
    fn form_without_file_is_rejected() {
        let state = signed_in();
        let err = publish_video(
            &state,
            UploadForm {
                title: "no file".into(),
                ..UploadForm::default()
            },
        )
        .unwrap_err();
        assert_eq!(err.kind(), "validation");

        let guard = state.lock().unwrap();
        assert_eq!(guard.engine.store().videos().len(), 4);
        assert_eq!(guard.playback.len(), 4);
    }

    #[test]
    fn published_video_heads_feed_and_gets_a_controller() {
        let state = signed_in();
        let card = publish_video(
            &state,
            UploadForm {
                title: "  ".into(),
                tags: "art, speed,".into(),
                file: Some(PickedFile {
                    uri: "https://cdn.example/clip.mp4".into(),
                    mime_type: Some("video/mp4".into()),
                    thumbnail_url: None,
                }),
                ..UploadForm::default()
            },
        )
        .unwrap();
        assert_eq!(card.title, "Untitled Video");
        assert_eq!(card.tags, vec!["art", "speed"]);

        let guard = state.lock().unwrap();
        let videos = guard.engine.store().videos();
        assert_eq!(videos[0].id.to_string(), card.id);
        assert!(guard.playback.controller(videos[0].id).is_some());
    }

    #[test]
    fn publish_hands_playback_to_new_head_without_a_scroll() {
        let (mut state, sink) = seeded_state();
        state.sign_in(ALEX).unwrap();
        let state = Mutex::new(state);
        viewport::scroll(&state, 0.0).unwrap();

        let card = publish_video(
            &state,
            UploadForm {
                file: Some(PickedFile {
                    uri: "blob:fresh".into(),
                    mime_type: Some("video/mp4".into()),
                    thumbnail_url: None,
                }),
                ..UploadForm::default()
            },
        )
        .unwrap();

        let guard = state.lock().unwrap();
        let head = guard.engine.store().videos()[0].id;
        assert_eq!(head.to_string(), card.id);
        assert_eq!(guard.playback.active_item(), Some(head));
        assert_eq!(guard.playback.playing_count(), 1);
        assert_eq!(
            guard.playback.controller(CLOSURES_VIDEO).map(|c| c.status()),
            Some(PlaybackStatus::Paused)
        );

        let names = sink.names();
        assert_eq!(
            names[names.len() - 2..],
            [EVENT_VIDEO_PUBLISHED, EVENT_ACTIVE_ITEM_CHANGED]
        );
    }

    #[test]
    fn form_deserialises_from_camel_case() {
        let form: UploadForm = serde_json::from_value(serde_json::json!({
            "title": "Hi",
            "file": { "uri": "blob:1", "mimeType": "video/webm" }
        }))
        .unwrap();
        let draft = VideoDraft::from(form);
        assert_eq!(draft.media_type.as_deref(), Some("video/webm"));
        assert_eq!(draft.tags, "");
    }
}
