//! The feed engine: the only way to change an [`EntityStore`].
//!
//! Every operation checks all of its preconditions (ids resolve, input is
//! valid) before its first write, so a rejected call leaves the store
//! exactly as it was.  The writes themselves go through the store's
//! copy-on-write collections, which means snapshots already handed to
//! readers keep showing the prior state until they re-fetch.

mod comments;
mod follows;
mod likes;
mod projections;
mod publish;
mod users;

use vine_shared::{UserId, VideoId};

use crate::error::{FeedError, Result};
use crate::store::EntityStore;

pub use publish::parse_tags;

/// Mutation API and read projections over one [`EntityStore`].
#[derive(Debug, Clone, Default)]
pub struct FeedEngine {
    store: EntityStore,
}

impl FeedEngine {
    pub fn new(store: EntityStore) -> Self {
        Self { store }
    }

    /// Read access to the underlying store.
    pub fn store(&self) -> &EntityStore {
        &self.store
    }

    fn require_user(&self, id: UserId) -> Result<usize> {
        self.store.user_index(id).ok_or(FeedError::UserNotFound(id))
    }

    fn require_video(&self, id: VideoId) -> Result<usize> {
        self.store.video_index(id).ok_or(FeedError::VideoNotFound(id))
    }
}

#[cfg(test)]
pub(crate) mod test_support {
    use super::*;

    pub fn seeded_engine() -> FeedEngine {
        FeedEngine::new(EntityStore::seeded())
    }
}
