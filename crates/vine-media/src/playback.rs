use serde::Serialize;
use thiserror::Error;
use tracing::{debug, warn};
use vine_shared::VideoId;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MediaError {
    #[error("Autoplay was blocked by the platform")]
    AutoplayBlocked,

    #[error("Media unavailable: {0}")]
    Unavailable(String),
}

/// A playback start that failed. Reported upward, never retried.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Playback failed to start for video {item}: {source}")]
pub struct PlaybackWarning {
    pub item: VideoId,
    #[source]
    pub source: MediaError,
}

/// The rendering layer's handle on one item's media element.
pub trait MediaPlayer {
    fn play(&mut self) -> Result<(), MediaError>;
    fn pause(&mut self);
}

impl<P: MediaPlayer + ?Sized> MediaPlayer for Box<P> {
    fn play(&mut self) -> Result<(), MediaError> {
        (**self).play()
    }

    fn pause(&mut self) {
        (**self).pause()
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum PlaybackStatus {
    #[default]
    Paused,
    Playing,
}

/// Playback state for a single feed item.
///
/// Active/inactive transitions are idempotent: a second `on_became_active`
/// without an intervening `on_became_inactive` issues no play request, and
/// the same holds for pause.
pub struct PlaybackController<P: MediaPlayer> {
    item: VideoId,
    player: P,
    active: bool,
    status: PlaybackStatus,
}

impl<P: MediaPlayer> PlaybackController<P> {
    pub fn new(item: VideoId, player: P) -> Self {
        Self {
            item,
            player,
            active: false,
            status: PlaybackStatus::Paused,
        }
    }

    pub fn on_became_active(&mut self) -> Result<(), PlaybackWarning> {
        if self.active {
            return Ok(());
        }
        self.active = true;
        self.start()
    }

    pub fn on_became_inactive(&mut self) {
        if !self.active {
            return;
        }
        self.active = false;
        self.player.pause();
        self.status = PlaybackStatus::Paused;
        debug!(item = %self.item, "playback paused");
    }

    /// The player reported, after accepting a play request, that the media
    /// did not start. Marks the item paused without retrying. Returns `None`
    /// when the item was not playing, so a late report for an item already
    /// scrolled away raises nothing.
    pub fn on_play_failed(&mut self, source: MediaError) -> Option<PlaybackWarning> {
        if self.status != PlaybackStatus::Playing {
            debug!(item = %self.item, error = %source, "stale playback failure ignored");
            return None;
        }
        self.status = PlaybackStatus::Paused;
        warn!(item = %self.item, error = %source, "playback failed after start");
        Some(PlaybackWarning {
            item: self.item,
            source,
        })
    }

    /// Tap on the active item: pause if playing, resume if paused.
    /// Taps on an inactive item are ignored.
    pub fn toggle(&mut self) -> Result<PlaybackStatus, PlaybackWarning> {
        if !self.active {
            return Ok(self.status);
        }
        match self.status {
            PlaybackStatus::Playing => {
                self.player.pause();
                self.status = PlaybackStatus::Paused;
                debug!(item = %self.item, "playback paused by tap");
            }
            PlaybackStatus::Paused => self.start()?,
        }
        Ok(self.status)
    }

    fn start(&mut self) -> Result<(), PlaybackWarning> {
        match self.player.play() {
            Ok(()) => {
                self.status = PlaybackStatus::Playing;
                debug!(item = %self.item, "playback started");
                Ok(())
            }
            Err(source) => {
                self.status = PlaybackStatus::Paused;
                warn!(item = %self.item, error = %source, "playback failed to start");
                Err(PlaybackWarning {
                    item: self.item,
                    source,
                })
            }
        }
    }

    pub fn item(&self) -> VideoId {
        self.item
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn status(&self) -> PlaybackStatus {
        self.status
    }

    pub fn player(&self) -> &P {
        &self.player
    }
}


#[cfg(test)]
mod tests {
    use super::test_player::CountingPlayer;
    use super::*;

    fn controller(player: CountingPlayer) -> PlaybackController<CountingPlayer> {
        PlaybackController::new(VideoId::new(), player)
    }

    #[test]
    fn active_inactive_cycle_issues_one_request_each() {
        let mut c = controller(CountingPlayer::default());
        c.on_became_active().unwrap();
        c.on_became_active().unwrap();
        assert_eq!(c.player().plays, 1);
        assert_eq!(c.status(), PlaybackStatus::Playing);

        c.on_became_inactive();
        c.on_became_inactive();
        assert_eq!(c.player().pauses, 1);
        assert_eq!(c.status(), PlaybackStatus::Paused);
    }

    #[test]
    fn inactive_before_any_activation_is_a_no_op() {
        let mut c = controller(CountingPlayer::default());
        c.on_became_inactive();
        assert_eq!(c.player().pauses, 0);
    }

    #[test]
    fn failed_start_warns_and_does_not_retry() {
        let mut c = controller(CountingPlayer::failing());
        let warning = c.on_became_active().unwrap_err();
        assert_eq!(warning.item, c.item());
        assert_eq!(warning.source, MediaError::AutoplayBlocked);
        assert_eq!(c.status(), PlaybackStatus::Paused);

        c.on_became_active().unwrap();
        assert_eq!(c.player().plays, 1);

        // The next activation is a fresh attempt.
        c.on_became_inactive();
        c.on_became_active().unwrap();
        assert_eq!(c.player().plays, 2);
        assert_eq!(c.status(), PlaybackStatus::Playing);
    }

    #[test]
    fn late_failure_pauses_without_retry() {
        let mut c = controller(CountingPlayer::default());
        c.on_became_active().unwrap();

        let blocked = MediaError::Unavailable("decode error".into());
        let warning = c.on_play_failed(blocked.clone()).unwrap();
        assert_eq!(warning.source, blocked);
        assert_eq!(c.status(), PlaybackStatus::Paused);
        assert!(c.is_active());
        assert_eq!(c.player().plays, 1);

        // Already paused: a repeated report is dropped.
        assert!(c.on_play_failed(blocked).is_none());

        // A tap is a fresh attempt.
        assert_eq!(c.toggle().unwrap(), PlaybackStatus::Playing);
        assert_eq!(c.player().plays, 2);
    }

    #[test]
    fn tap_toggles_only_while_active() {
        let mut c = controller(CountingPlayer::default());
        assert_eq!(c.toggle().unwrap(), PlaybackStatus::Paused);
        assert_eq!(c.player().plays, 0);

        c.on_became_active().unwrap();
        assert_eq!(c.toggle().unwrap(), PlaybackStatus::Paused);
        assert_eq!(c.toggle().unwrap(), PlaybackStatus::Playing);
        assert_eq!(c.player().plays, 2);
        assert_eq!(c.player().pauses, 1);
    }
}
