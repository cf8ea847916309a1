//! Line-delimited JSON bridge to the rendering host.
//!
//! The host writes one request per line on stdin:
//!
//! ```json
//! {"id": 7, "type": "like", "videoId": "…"}
//! ```
//!
//! and reads events from stdout, one JSON object per line. Every request is
//! answered with a `command-result` event carrying the same `id`. Requests
//! are applied strictly in arrival order by a single event loop.

use std::io::Write;
use std::str::FromStr;
use std::sync::{Arc, Mutex};

use serde::{Deserialize, Serialize};
use serde_json::Value;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, BufReader};
use tokio::sync::mpsc;
use tracing::{debug, info, warn};
use vine_media::{MediaError, MediaPlayer};
use vine_shared::VideoId;
use vine_store::RegistrationDraft;

use crate::commands::{auth, feed, profile, upload, viewport};
use crate::error::CommandError;
use crate::events::{
    emit_event, EventSink, MediaAction, MediaRequestPayload, EVENT_COMMAND_RESULT,
    EVENT_MEDIA_REQUEST,
};
use crate::state::{AppState, Player, PlayerFactory};

/// A UI event as sent by the host.
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase", rename_all_fields = "camelCase")]
pub enum UiEvent {
    Register {
        display_name: String,
        handle: String,
        email: String,
        password: String,
        confirm_password: String,
    },
    SignIn {
        email: String,
        password: String,
    },
    SignOut,
    CurrentUser,
    ListFeed,
    Like {
        video_id: String,
    },
    Comment {
        video_id: String,
        text: String,
    },
    ListComments {
        video_id: String,
    },
    GetProfile {
        user_id: String,
    },
    Follow {
        user_id: String,
    },
    Publish(upload::UploadForm),
    Scroll {
        offset: f64,
    },
    Resize {
        height: f64,
    },
    Tap {
        video_id: String,
    },
    /// The host's media element failed after a `media-request` to play.
    MediaFailed {
        video_id: String,
        #[serde(default)]
        message: String,
    },
}

/// Payload of the `command-result` event.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CommandResult {
    pub id: Option<u64>,
    pub ok: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<CommandError>,
}

fn parse_id<T: FromStr>(raw: &str) -> Result<T, CommandError> {
    raw.parse().map_err(|_| CommandError::InvalidId(raw.to_string()))
}

/// Split a request line into its correlation id and event.
pub fn parse_request(line: &str) -> (Option<u64>, Result<UiEvent, CommandError>) {
    let value: Value = match serde_json::from_str(line) {
        Ok(v) => v,
        Err(e) => return (None, Err(CommandError::BadRequest(e.to_string()))),
    };
    let id = value.get("id").and_then(Value::as_u64);
    let event =
        serde_json::from_value(value).map_err(|e| CommandError::BadRequest(e.to_string()));
    (id, event)
}

/// Run one UI event against the shared state.
pub fn dispatch(state: &Mutex<AppState>, event: UiEvent) -> Result<Value, CommandError> {
    let value = match event {
        UiEvent::Register {
            display_name,
            handle,
            email,
            password,
            confirm_password,
        } => {
            let draft = RegistrationDraft {
                display_name,
                handle,
                email,
                password,
                confirm_password,
            };
            serde_json::to_value(auth::register(state, draft)?)?
        }
        UiEvent::SignIn { email, password } => {
            serde_json::to_value(auth::sign_in(state, &email, &password)?)?
        }
        UiEvent::SignOut => serde_json::to_value(auth::sign_out(state)?)?,
        UiEvent::CurrentUser => serde_json::to_value(auth::current_user(state)?)?,
        UiEvent::ListFeed => serde_json::to_value(feed::list_feed(state)?)?,
        UiEvent::Like { video_id } => {
            serde_json::to_value(feed::like_video(state, parse_id(&video_id)?)?)?
        }
        UiEvent::Comment { video_id, text } => {
            serde_json::to_value(feed::add_comment(state, parse_id(&video_id)?, &text)?)?
        }
        UiEvent::ListComments { video_id } => {
            serde_json::to_value(feed::list_comments(state, parse_id(&video_id)?)?)?
        }
        UiEvent::GetProfile { user_id } => {
            serde_json::to_value(profile::get_profile(state, parse_id(&user_id)?)?)?
        }
        UiEvent::Follow { user_id } => {
            serde_json::to_value(profile::follow_user(state, parse_id(&user_id)?)?)?
        }
        UiEvent::Publish(form) => serde_json::to_value(upload::publish_video(state, form)?)?,
        UiEvent::Scroll { offset } => serde_json::to_value(viewport::scroll(state, offset)?)?,
        UiEvent::Resize { height } => serde_json::to_value(viewport::resize(state, height)?)?,
        UiEvent::Tap { video_id } => {
            serde_json::to_value(viewport::tap_video(state, parse_id(&video_id)?)?)?
        }
        UiEvent::MediaFailed { video_id, message } => serde_json::to_value(
            viewport::media_failed(state, parse_id(&video_id)?, message)?,
        )?,
    };
    Ok(value)
}

/// Parse, dispatch and answer one request line.
pub fn handle_line(state: &Mutex<AppState>, events: &dyn EventSink, line: &str) {
    let (id, event) = parse_request(line);
    let outcome = event.and_then(|event| {
        debug!(?id, "dispatching UI event");
        dispatch(state, event)
    });
    respond(events, id, outcome);
}

/// Answer one raw line from the host. A line that is not UTF-8 gets a
/// `BadRequest` result; the session carries on.
pub fn handle_raw(state: &Mutex<AppState>, events: &dyn EventSink, raw: Vec<u8>) {
    match String::from_utf8(raw) {
        Ok(line) => handle_line(state, events, &line),
        Err(e) => respond(
            events,
            None,
            Err(CommandError::BadRequest(format!("request is not UTF-8: {e}"))),
        ),
    }
}

fn respond(events: &dyn EventSink, id: Option<u64>, outcome: Result<Value, CommandError>) {
    let result = match outcome {
        Ok(data) => CommandResult {
            id,
            ok: true,
            data: Some(data),
            error: None,
        },
        Err(error) => {
            warn!(?id, kind = error.kind(), %error, "command failed");
            CommandResult {
                id,
                ok: false,
                data: None,
                error: Some(error),
            }
        }
    };
    emit_event(events, EVENT_COMMAND_RESULT, result);
}

/// Forward stdin lines into the event queue until EOF.
pub async fn read_stdin(tx: mpsc::Sender<Vec<u8>>) {
    read_lines(BufReader::new(tokio::io::stdin()), tx).await;
}

/// Forward raw lines, without their terminator, until EOF or an I/O error.
/// Lines are not decoded here, so bad bytes on one line cannot end the
/// session.
pub async fn read_lines<R>(mut reader: R, tx: mpsc::Sender<Vec<u8>>)
where
    R: AsyncBufRead + Unpin,
{
    loop {
        let mut line = Vec::new();
        match reader.read_until(b'\n', &mut line).await {
            Ok(0) => {
                info!("input closed");
                break;
            }
            Ok(_) => {
                if line.last() == Some(&b'\n') {
                    line.pop();
                }
                if line.last() == Some(&b'\r') {
                    line.pop();
                }
                if line.iter().all(u8::is_ascii_whitespace) {
                    continue;
                }
                if tx.send(line).await.is_err() {
                    break;
                }
            }
            Err(e) => {
                warn!(error = %e, "failed to read input");
                break;
            }
        }
    }
}

/// Apply queued requests one at a time until every sender is gone.
pub async fn event_loop(state: Arc<Mutex<AppState>>, mut rx: mpsc::Receiver<Vec<u8>>) {
    let events = match state.lock() {
        Ok(guard) => guard.events.clone(),
        Err(_) => return,
    };

    info!("UI event loop started");
    while let Some(raw) = rx.recv().await {
        handle_raw(&state, events.as_ref(), raw);
    }
    info!("UI event loop stopped");
}

/// Writes each event to stdout as one JSON line.
#[derive(Debug, Default)]
pub struct StdoutSink;

impl EventSink for StdoutSink {
    fn emit(&self, event: &str, payload: Value) -> std::io::Result<()> {
        let line = serde_json::json!({ "event": event, "payload": payload });
        let mut out = std::io::stdout().lock();
        writeln!(out, "{line}")?;
        out.flush()
    }
}

/// Forwards play and pause to the host as `media-request` events.
pub struct HostPlayer {
    item: VideoId,
    events: Arc<dyn EventSink>,
}

impl HostPlayer {
    pub fn new(item: VideoId, events: Arc<dyn EventSink>) -> Self {
        Self { item, events }
    }

    fn request(&self, action: MediaAction) -> std::io::Result<()> {
        let payload = MediaRequestPayload {
            video_id: self.item.to_string(),
            action,
        };
        let value = serde_json::to_value(payload).map_err(std::io::Error::other)?;
        self.events.emit(EVENT_MEDIA_REQUEST, value)
    }
}

impl MediaPlayer for HostPlayer {
    fn play(&mut self) -> Result<(), MediaError> {
        self.request(MediaAction::Play)
            .map_err(|e| MediaError::Unavailable(e.to_string()))
    }

    fn pause(&mut self) {
        if let Err(e) = self.request(MediaAction::Pause) {
            warn!(item = %self.item, error = %e, "pause request not delivered");
        }
    }
}

/// Player factory that hands every feed item a [`HostPlayer`].
pub fn host_players(events: Arc<dyn EventSink>) -> PlayerFactory {
    Box::new(move |item: VideoId| -> Player {
        Box::new(HostPlayer::new(item, events.clone()))
    })
}
