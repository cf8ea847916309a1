//! Current-session persistence.
//!
//! The store only remembers which user is signed in. The feed engine never
//! reads it: [`AppState`](crate::state::AppState) resolves the user once and
//! passes the id into every engine call.

use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use vine_shared::UserId;

use crate::error::SessionError;

pub trait SessionStore: Send {
    fn load(&self) -> Result<Option<UserId>, SessionError>;
    fn save(&mut self, user: UserId) -> Result<(), SessionError>;
    fn clear(&mut self) -> Result<(), SessionError>;
}

#[derive(Debug, Default)]
pub struct MemorySessionStore {
    user: Option<UserId>,
}

impl SessionStore for MemorySessionStore {
    fn load(&self) -> Result<Option<UserId>, SessionError> {
        Ok(self.user)
    }

    fn save(&mut self, user: UserId) -> Result<(), SessionError> {
        self.user = Some(user);
        Ok(())
    }

    fn clear(&mut self) -> Result<(), SessionError> {
        self.user = None;
        Ok(())
    }
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SessionRecord {
    user_id: UserId,
    signed_in_at: DateTime<Utc>,
}

/// JSON file holding the signed-in user.
#[derive(Debug, Clone)]
pub struct FileSessionStore {
    path: PathBuf,
}

impl FileSessionStore {
    /// Session file in the platform data directory:
    /// - Linux:   `~/.local/share/vine/session.json`
    /// - macOS:   `~/Library/Application Support/com.vine.vine/session.json`
    /// - Windows: `{FOLDERID_RoamingAppData}\vine\vine\data\session.json`
    pub fn default_location() -> Result<Self, SessionError> {
        let dirs = ProjectDirs::from("com", "vine", "vine").ok_or(SessionError::NoDataDir)?;
        Ok(Self::at(dirs.data_dir().join("session.json")))
    }

    pub fn at(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl SessionStore for FileSessionStore {
    fn load(&self) -> Result<Option<UserId>, SessionError> {
        let raw = match std::fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e.into()),
        };
        let record: SessionRecord = serde_json::from_str(&raw)?;
        Ok(Some(record.user_id))
    }

    fn save(&mut self, user: UserId) -> Result<(), SessionError> {
        if let Some(dir) = self.path.parent() {
            std::fs::create_dir_all(dir)?;
        }
        let record = SessionRecord {
            user_id: user,
            signed_in_at: Utc::now(),
        };
        std::fs::write(&self.path, serde_json::to_vec_pretty(&record)?)?;
        tracing::debug!(path = %self.path.display(), user = %user, "session saved");
        Ok(())
    }

    fn clear(&mut self) -> Result<(), SessionError> {
        match std::fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn file_store_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = FileSessionStore::at(dir.path().join("nested").join("session.json"));
        assert_eq!(store.load().unwrap(), None);

        let user = UserId::new();
        store.save(user).unwrap();
        assert_eq!(store.load().unwrap(), Some(user));

        store.clear().unwrap();
        assert_eq!(store.load().unwrap(), None);
        store.clear().unwrap();
    }

    #[test]
    fn corrupt_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("session.json");
        std::fs::write(&path, "{not json").unwrap();
        assert!(matches!(
            FileSessionStore::at(path).load(),
            Err(SessionError::Json(_))
        ));
    }

    #[test]
    fn memory_store() {
        let mut store = MemorySessionStore::default();
        let user = UserId::new();
        store.save(user).unwrap();
        assert_eq!(store.load().unwrap(), Some(user));
        store.clear().unwrap();
        assert_eq!(store.load().unwrap(), None);
    }
}
