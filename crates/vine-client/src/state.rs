//! Application state shared across all command handlers.
//!
//! The [`AppState`] struct is wrapped in `Arc<Mutex<>>` by the host bridge
//! and locked once per UI event, so events are applied one at a time in
//! arrival order.

use std::sync::Arc;

use tracing::{info, warn};
use vine_media::{FeedPlayback, FeedTransition, MediaPlayer};
use vine_shared::{UserId, VideoId};
use vine_store::{EntityStore, FeedEngine};

use crate::config::ClientConfig;
use crate::error::{CommandError, SessionError};
use crate::events::{emit_event, EventSink, SessionPayload, EVENT_SESSION_CHANGED};
use crate::session::{FileSessionStore, SessionStore};

/// A media element handle supplied by the host.
pub type Player = Box<dyn MediaPlayer + Send>;

/// Creates the player for a feed item the first time it appears.
pub type PlayerFactory = Box<dyn FnMut(VideoId) -> Player + Send>;

/// Central application state.
pub struct AppState {
    pub config: ClientConfig,

    /// Sole owner of the entity store for this session.
    pub engine: FeedEngine,

    /// Signed-in user, resolved from the session store at startup and
    /// updated on sign-in / sign-out. Passed explicitly into engine calls.
    current_user: Option<UserId>,

    session: Box<dyn SessionStore>,

    /// One playback controller per video in the feed.
    pub playback: FeedPlayback<Player>,

    /// Viewport height used to resolve scroll offsets. Starts at the
    /// configured value; the host updates it on resize.
    pub viewport_height: f64,

    pub events: Arc<dyn EventSink>,

    players: PlayerFactory,
}

impl AppState {
    pub fn new(
        config: ClientConfig,
        engine: FeedEngine,
        session: Box<dyn SessionStore>,
        events: Arc<dyn EventSink>,
        players: PlayerFactory,
    ) -> Self {
        let mut state = Self {
            viewport_height: config.viewport_height,
            config,
            engine,
            current_user: None,
            session,
            playback: FeedPlayback::new(),
            events,
            players,
        };
        state.sync_playback();
        state
    }

    /// Build the state the binary runs with: seeded engine, file-backed
    /// session, and a restored sign-in if the stored user still exists.
    pub fn bootstrap(
        config: ClientConfig,
        events: Arc<dyn EventSink>,
        players: PlayerFactory,
    ) -> Result<Self, SessionError> {
        let session = match &config.session_path {
            Some(path) => FileSessionStore::at(path),
            None => FileSessionStore::default_location()?,
        };
        info!(path = %session.path().display(), "using session file");

        let store = if config.seed_demo_data {
            EntityStore::seeded()
        } else {
            EntityStore::default()
        };

        let mut state = Self::new(
            config,
            FeedEngine::new(store),
            Box::new(session),
            events,
            players,
        );
        state.restore_session()?;
        Ok(state)
    }

    pub fn current_user_id(&self) -> Option<UserId> {
        self.current_user
    }

    /// The signed-in user, or [`CommandError::NotSignedIn`].
    pub fn require_user(&self) -> Result<UserId, CommandError> {
        self.current_user.ok_or(CommandError::NotSignedIn)
    }

    /// Adopt the stored session if it names a user this session knows.
    /// The entity store is not persisted, so a stored id can outlive its
    /// user; such a session is cleared.
    pub fn restore_session(&mut self) -> Result<(), SessionError> {
        match self.session.load()? {
            Some(id) if self.engine.store().find_user(id).is_some() => {
                info!(user = %id, "session restored");
                self.current_user = Some(id);
            }
            Some(id) => {
                warn!(user = %id, "stored session names an unknown user, clearing");
                self.session.clear()?;
            }
            None => {}
        }
        Ok(())
    }

    /// Adopt `user` for this run, then persist it. A persistence error is
    /// returned, but the in-memory sign-in stands.
    pub fn sign_in(&mut self, user: UserId) -> Result<(), SessionError> {
        self.current_user = Some(user);
        info!(user = %user, "signed in");
        self.emit_session();
        self.session.save(user)
    }

    pub fn sign_out(&mut self) -> Result<(), SessionError> {
        self.session.clear()?;
        if let Some(user) = self.current_user.take() {
            info!(user = %user, "signed out");
        }
        self.emit_session();
        Ok(())
    }

    /// Rebuild the playback controllers after the feed order changed and
    /// re-resolve the item under the viewport. Returns the resulting
    /// transition, if the active item changed.
    pub fn sync_playback(&mut self) -> Option<FeedTransition> {
        let ids: Vec<VideoId> = self.engine.store().videos().iter().map(|v| v.id).collect();
        let players = &mut self.players;
        self.playback.sync_items(&ids, |id| (*players)(id));
        self.playback.refresh(self.viewport_height)
    }

    fn emit_session(&self) {
        emit_event(
            self.events.as_ref(),
            EVENT_SESSION_CHANGED,
            SessionPayload {
                user_id: self.current_user.map(|u| u.to_string()),
            },
        );
    }
}

#[cfg(test)]
pub(crate) mod test_support {
    use vine_media::MediaError;

    use super::*;
    use crate::events::MemorySink;
    use crate::session::MemorySessionStore;

    pub struct SilentPlayer;

    impl MediaPlayer for SilentPlayer {
        fn play(&mut self) -> Result<(), MediaError> {
            Ok(())
        }

        fn pause(&mut self) {}
    }

    /// Session store on a read-only medium: loads nothing, saves fail.
    pub struct ReadOnlySession;

    impl SessionStore for ReadOnlySession {
        fn load(&self) -> Result<Option<UserId>, SessionError> {
            Ok(None)
        }

        fn save(&mut self, _user: UserId) -> Result<(), SessionError> {
            Err(std::io::Error::other("read-only file system").into())
        }

        fn clear(&mut self) -> Result<(), SessionError> {
            Ok(())
        }
    }

    /// Seeded state with an in-memory session and event sink.
    pub fn seeded_state() -> (AppState, Arc<MemorySink>) {
        seeded_state_with(Box::new(MemorySessionStore::default()))
    }

    pub fn seeded_state_with(session: Box<dyn SessionStore>) -> (AppState, Arc<MemorySink>) {
        let sink = Arc::new(MemorySink::default());
        let state = AppState::new(
            ClientConfig::default(),
            FeedEngine::new(EntityStore::seeded()),
            session,
            sink.clone(),
            Box::new(|_: VideoId| -> Player { Box::new(SilentPlayer) }),
        );
        (state, sink)
    }
}

#[cfg(test)]
mod tests {
    use super::test_support::seeded_state;
    use super::*;
    use vine_store::seed::{MIKE, SARAH};

    #[test]
    fn playback_tracks_the_feed() {
        let (state, _) = seeded_state();
        assert_eq!(state.playback.len(), state.engine.store().videos().len());
    }

    #[test]
    fn sign_in_and_out_round_trip_through_session_store() {
        let (mut state, sink) = seeded_state();
        assert_eq!(state.require_user().unwrap_err().kind(), "notSignedIn");

        state.sign_in(MIKE).unwrap();
        assert_eq!(state.current_user_id(), Some(MIKE));
        assert_eq!(state.session.load().unwrap(), Some(MIKE));

        state.sign_out().unwrap();
        assert_eq!(state.current_user_id(), None);
        assert_eq!(state.session.load().unwrap(), None);
        assert_eq!(sink.names(), vec![EVENT_SESSION_CHANGED, EVENT_SESSION_CHANGED]);
    }

    #[test]
    fn restore_adopts_known_user_and_drops_stale_one() {
        let (mut state, _) = seeded_state();
        state.session.save(SARAH).unwrap();
        state.restore_session().unwrap();
        assert_eq!(state.current_user_id(), Some(SARAH));

        let (mut state, _) = seeded_state();
        state.session.save(UserId::new()).unwrap();
        state.restore_session().unwrap();
        assert_eq!(state.current_user_id(), None);
        assert_eq!(state.session.load().unwrap(), None);
    }
}
