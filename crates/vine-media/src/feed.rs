//! One [`PlaybackController`] per feed item, driven by an
//! [`ActiveItemResolver`].
//!
//! Controllers are keyed by video id rather than position, so a publish that
//! prepends a video does not hand one item's playback state to another.

use std::collections::HashMap;

use tracing::{debug, info};
use vine_shared::VideoId;

use crate::playback::{
    MediaError, MediaPlayer, PlaybackController, PlaybackStatus, PlaybackWarning,
};
use crate::resolver::ActiveItemResolver;

/// What a scroll tick changed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeedTransition {
    pub index: Option<usize>,
    pub previous: Option<VideoId>,
    pub current: Option<VideoId>,
    /// Set when the newly active item failed to start.
    pub warning: Option<PlaybackWarning>,
}

pub struct FeedPlayback<P: MediaPlayer> {
    resolver: ActiveItemResolver,
    items: Vec<PlaybackController<P>>,
    active: Option<VideoId>,
    /// Offset of the last scroll tick, replayed by [`refresh`](Self::refresh).
    last_offset: Option<f64>,
}

impl<P: MediaPlayer> Default for FeedPlayback<P> {
    fn default() -> Self {
        Self::new()
    }
}

impl<P: MediaPlayer> FeedPlayback<P> {
    pub fn new() -> Self {
        Self {
            resolver: ActiveItemResolver::new(),
            items: Vec::new(),
            active: None,
            last_offset: None,
        }
    }

    /// Rebuild the controller list for a new feed order.
    ///
    /// Controllers of items still present are kept as they are. Removed
    /// items are paused if they were playing. The next scroll tick always
    /// reports; call [`refresh`](Self::refresh) to activate the item now
    /// under the viewport without waiting for one.
    pub fn sync_items<F>(&mut self, ids: &[VideoId], mut make_player: F)
    where
        F: FnMut(VideoId) -> P,
    {
        let mut existing: HashMap<VideoId, PlaybackController<P>> = self
            .items
            .drain(..)
            .map(|c| (c.item(), c))
            .collect();

        self.items = ids
            .iter()
            .map(|id| {
                existing
                    .remove(id)
                    .unwrap_or_else(|| PlaybackController::new(*id, make_player(*id)))
            })
            .collect();

        for (id, mut removed) in existing {
            if self.active == Some(id) {
                self.active = None;
            }
            removed.on_became_inactive();
        }

        self.resolver.invalidate();
        debug!(items = self.items.len(), "feed playback synced");
    }

    /// Apply one scroll tick. Returns `None` when the tick did not change
    /// the active item.
    pub fn on_scroll(&mut self, offset: f64, viewport_height: f64) -> Option<FeedTransition> {
        self.last_offset = Some(offset);
        let change = self
            .resolver
            .resolve(offset, viewport_height, self.items.len())?;

        let current = change.current.map(|i| self.items[i].item());
        let previous = self.active;
        let mut warning = None;

        if current != previous {
            if let Some(old) = previous.and_then(|id| self.controller_mut(id)) {
                old.on_became_inactive();
            }
            if let Some(new) = change.current.map(|i| &mut self.items[i]) {
                warning = new.on_became_active().err();
            }
            self.active = current;
            info!(previous = ?previous, current = ?current, index = ?change.current, "active video changed");
        }

        Some(FeedTransition {
            index: change.current,
            previous,
            current,
            warning,
        })
    }

    /// Replay the last scroll offset, e.g. after [`sync_items`] or a resize.
    /// Does nothing before the first scroll tick.
    ///
    /// [`sync_items`]: Self::sync_items
    pub fn refresh(&mut self, viewport_height: f64) -> Option<FeedTransition> {
        let offset = self.last_offset?;
        self.on_scroll(offset, viewport_height)
    }

    /// Tap on a card. Only the active card reacts.
    pub fn tap(&mut self, item: VideoId) -> Result<PlaybackStatus, PlaybackWarning> {
        match self.controller_mut(item) {
            Some(c) => c.toggle(),
            None => Ok(PlaybackStatus::Paused),
        }
    }

    /// Forward a late start failure for `item` to its controller.
    pub fn play_failed(&mut self, item: VideoId, source: MediaError) -> Option<PlaybackWarning> {
        self.controller_mut(item)?.on_play_failed(source)
    }

    pub fn active_item(&self) -> Option<VideoId> {
        self.active
    }

    pub fn controller(&self, item: VideoId) -> Option<&PlaybackController<P>> {
        self.items.iter().find(|c| c.item() == item)
    }

    fn controller_mut(&mut self, item: VideoId) -> Option<&mut PlaybackController<P>> {
        self.items.iter_mut().find(|c| c.item() == item)
    }

    /// Number of items currently playing. Never more than one.
    pub fn playing_count(&self) -> usize {
        self.items
            .iter()
            .filter(|c| c.status() == PlaybackStatus::Playing)
            .count()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}
