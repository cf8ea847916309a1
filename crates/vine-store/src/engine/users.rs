use std::collections::BTreeSet;

use tracing::info;
use vine_shared::constants::{DEFAULT_AVATAR_URL, DEFAULT_BIO, MIN_PASSWORD_LEN};
use vine_shared::{UserId, ValidationError};

use super::FeedEngine;
use crate::error::Result;
use crate::models::{RegistrationDraft, User};

impl FeedEngine {
    /// Register a new account.
    ///
    /// The password is checked and then dropped: the session only ever holds
    /// the resulting user id.
    pub fn register(&mut self, draft: RegistrationDraft) -> Result<User> {
        let display_name = required(&draft.display_name, "display name")?;
        let handle = required(draft.handle.trim().trim_start_matches('@'), "handle")?;
        let email = required(&draft.email, "email")?;

        if draft.password != draft.confirm_password {
            return Err(ValidationError::PasswordMismatch.into());
        }
        if draft.password.chars().count() < MIN_PASSWORD_LEN {
            return Err(ValidationError::PasswordTooShort {
                min: MIN_PASSWORD_LEN,
            }
            .into());
        }
        if self.store.find_user_by_handle(&handle).is_some() {
            return Err(ValidationError::HandleTaken(handle).into());
        }

        let user = User {
            id: UserId::new(),
            handle,
            display_name,
            email,
            avatar_url: DEFAULT_AVATAR_URL.to_string(),
            verified: false,
            followers: 0,
            following: BTreeSet::new(),
            bio: DEFAULT_BIO.to_string(),
        };
        self.store.users_mut().push(user.clone());

        info!(user = %user.id, handle = %user.handle, "user registered");
        Ok(user)
    }
}

fn required(value: &str, field: &'static str) -> Result<String> {
    let value = value.trim();
    if value.is_empty() {
        return Err(ValidationError::EmptyField(field).into());
    }
    Ok(value.to_string())
}
