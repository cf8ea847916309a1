//! Command handlers invoked by the host bridge.
//!
//! Each sub-module groups related commands by domain. Every handler locks
//! the shared [`AppState`] once, resolves the signed-in user from it, and
//! passes that id explicitly into the feed engine.

pub mod auth;
pub mod feed;
pub mod profile;
pub mod upload;
pub mod viewport;

use std::sync::{Mutex, MutexGuard};

use crate::error::CommandError;
use crate::state::AppState;

pub(crate) fn lock(state: &Mutex<AppState>) -> Result<MutexGuard<'_, AppState>, CommandError> {
    state.lock().map_err(|_| CommandError::LockPoisoned)
}
