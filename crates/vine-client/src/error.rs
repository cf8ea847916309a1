use serde::ser::SerializeStruct;
use serde::{Serialize, Serializer};
use thiserror::Error;
use vine_store::FeedError;

/// Failures of the current-session store.
#[derive(Error, Debug)]
pub enum SessionError {
    #[error("Could not determine application data directory")]
    NoDataDir,

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Session file is corrupt: {0}")]
    Json(#[from] serde_json::Error),
}

/// Errors returned by command handlers to the UI.
#[derive(Error, Debug)]
pub enum CommandError {
    #[error("Not signed in")]
    NotSignedIn,

    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("Invalid id: {0}")]
    InvalidId(String),

    #[error("Invalid viewport height: {0}")]
    InvalidViewport(f64),

    #[error("Malformed request: {0}")]
    BadRequest(String),

    #[error(transparent)]
    Feed(#[from] FeedError),

    #[error("Session store error: {0}")]
    Session(#[from] SessionError),

    #[error("Failed to encode response: {0}")]
    Encode(#[from] serde_json::Error),

    #[error("Lock poisoned")]
    LockPoisoned,
}

impl CommandError {
    /// Stable machine-readable tag for the UI.
    pub fn kind(&self) -> &'static str {
        match self {
            CommandError::NotSignedIn => "notSignedIn",
            CommandError::InvalidCredentials => "invalidCredentials",
            CommandError::InvalidId(_) => "invalidId",
            CommandError::InvalidViewport(_) | CommandError::BadRequest(_) => "invalidInput",
            CommandError::Feed(e) if e.is_validation() => "validation",
            CommandError::Feed(_) => "notFound",
            CommandError::Session(_) => "session",
            CommandError::Encode(_) | CommandError::LockPoisoned => "internal",
        }
    }
}

impl Serialize for CommandError {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut s = serializer.serialize_struct("CommandError", 2)?;
        s.serialize_field("kind", self.kind())?;
        s.serialize_field("message", &self.to_string())?;
        s.end()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use vine_shared::{ValidationError, VideoId};

    #[test]
    fn serialises_with_kind_tag() {
        let err = CommandError::Feed(ValidationError::EmptyComment.into());
        let json = serde_json::to_value(&err).unwrap();
        assert_eq!(json["kind"], "validation");
        assert_eq!(json["message"], "Validation failed: Comment text is empty");

        let err = CommandError::Feed(FeedError::VideoNotFound(VideoId::new()));
        assert_eq!(err.kind(), "notFound");
    }
}
