use thiserror::Error;

/// Bad input rejected before any state is touched.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Comment text is empty")]
    EmptyComment,

    #[error("Users cannot follow themselves")]
    SelfFollow,

    #[error("A media reference is required to publish")]
    MissingMedia,

    #[error("Unsupported media type: {0}")]
    UnsupportedMedia(String),

    #[error("Handle already taken: @{0}")]
    HandleTaken(String),

    #[error("Required field is empty: {0}")]
    EmptyField(&'static str),

    #[error("Password must be at least {min} characters")]
    PasswordTooShort { min: usize },

    #[error("Passwords do not match")]
    PasswordMismatch,

    #[error("Inconsistent seed data: {0}")]
    InconsistentSeed(String),
}
