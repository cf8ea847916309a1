//! Registration and the mock sign-in.
//!
//! There is no real authentication: every seeded or registered account
//! signs in with the configured demo password.

use std::sync::Mutex;

use tracing::{info, warn};
use vine_store::RegistrationDraft;

use super::lock;
use super::profile::UserDto;
use crate::error::CommandError;
use crate::state::AppState;

/// Create an account and sign into it.
///
/// The account exists once the engine accepts it. If the session cannot be
/// saved, the user stays signed in for this run only and the call still
/// succeeds.
pub fn register(
    state: &Mutex<AppState>,
    draft: RegistrationDraft,
) -> Result<UserDto, CommandError> {
    let mut guard = lock(state)?;
    let user = guard.engine.register(draft)?;
    if let Err(e) = guard.sign_in(user.id) {
        warn!(user = %user.id, error = %e, "registered, but the session was not saved");
    }
    Ok(UserDto::from(&user))
}

pub fn sign_in(
    state: &Mutex<AppState>,
    email: &str,
    password: &str,
) -> Result<UserDto, CommandError> {
    let mut guard = lock(state)?;

    let user = guard
        .engine
        .store()
        .find_user_by_email(email)
        .filter(|_| password == guard.config.demo_password)
        .map(|u| (u.id, UserDto::from(u)));

    match user {
        Some((id, dto)) => {
            if let Err(e) = guard.sign_in(id) {
                warn!(user = %id, error = %e, "signed in, but the session was not saved");
            }
            Ok(dto)
        }
        None => {
            warn!(email, "sign-in rejected");
            Err(CommandError::InvalidCredentials)
        }
    }
}

pub fn sign_out(state: &Mutex<AppState>) -> Result<(), CommandError> {
    let mut guard = lock(state)?;
    guard.sign_out()?;
    info!("session closed");
    Ok(())
}

pub fn current_user(state: &Mutex<AppState>) -> Result<Option<UserDto>, CommandError> {
    let guard = lock(state)?;
    Ok(guard
        .current_user_id()
        .and_then(|id| guard.engine.store().find_user(id))
        .map(UserDto::from))
}
