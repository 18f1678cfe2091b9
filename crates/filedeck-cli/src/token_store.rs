//! Bearer token persisted as a small JSON document on disk.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use directories::ProjectDirs;
use filedeck_core::SessionError;
use filedeck_core::TokenStore;
use serde::{Deserialize, Serialize};

const TOKEN_FILE_NAME: &str = "session.json";

#[derive(Debug, Default, Serialize, Deserialize)]
struct StoredSession {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    token: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    username: Option<String>,
}

/// Default token file under the platform config directory.
#[must_use]
pub(crate) fn default_token_path() -> PathBuf {
    ProjectDirs::from("", "", "filedeck").map_or_else(
        || PathBuf::from(".filedeck").join(TOKEN_FILE_NAME),
        |dirs| dirs.config_dir().join(TOKEN_FILE_NAME),
    )
}

/// [`TokenStore`] backed by a JSON file.
#[derive(Debug, Clone)]
pub(crate) struct FileTokenStore {
    path: PathBuf,
}

impl FileTokenStore {
    pub(crate) fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub(crate) fn path(&self) -> &Path {
        &self.path
    }

    fn read(&self) -> StoredSession {
        match fs::read(&self.path) {
            Ok(bytes) => serde_json::from_slice(&bytes).unwrap_or_else(|err| {
                tracing::warn!(
                    path = %self.path.display(),
                    error = %err,
                    "ignoring unreadable token file"
                );
                StoredSession::default()
            }),
            Err(err) if err.kind() == ErrorKind::NotFound => StoredSession::default(),
            Err(err) => {
                tracing::warn!(
                    path = %self.path.display(),
                    error = %err,
                    "failed to read token file"
                );
                StoredSession::default()
            }
        }
    }

    fn write(&self, session: &StoredSession) -> Result<(), SessionError> {
        let storage = |detail: String| SessionError::Storage {
            operation: "write",
            detail,
        };
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|err| storage(err.to_string()))?;
        }
        let bytes = serde_json::to_vec_pretty(session).map_err(|err| storage(err.to_string()))?;
        fs::write(&self.path, bytes).map_err(|err| storage(err.to_string()))
    }
}

impl TokenStore for FileTokenStore {
    fn load_token(&self) -> Option<String> {
        self.read().token
    }

    fn save_token(&self, token: &str) -> Result<(), SessionError> {
        let mut session = self.read();
        session.token = Some(token.to_string());
        self.write(&session)
    }

    fn load_username(&self) -> Option<String> {
        self.read().username
    }

    fn save_username(&self, username: &str) -> Result<(), SessionError> {
        let mut session = self.read();
        session.username = Some(username.to_string());
        self.write(&session)
    }

    fn clear(&self) -> Result<(), SessionError> {
        match fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(()),
            Err(err) => Err(SessionError::Storage {
                operation: "clear",
                detail: err.to_string(),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn round_trips_token_and_username() {
        let dir = tempfile::tempdir().expect("tempdir");
        let store = FileTokenStore::new(dir.path().join("nested").join("session.json"));
        assert!(store.load_token().is_none());

        store.save_token("abc").expect("save token");
        store.save_username("alice").expect("save username");
        assert_eq!(store.load_token().as_deref(), Some("abc"));
        assert_eq!(store.load_username().as_deref(), Some("alice"));

        store.clear().expect("clear");
        assert!(store.load_token().is_none());
        assert!(!store.path().exists());
        store.clear().expect("clearing twice is fine");
    }

    #[test]
    fn corrupt_file_reads_as_empty() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("session.json");
        fs::write(&path, b"{not json").expect("write");
        let store = FileTokenStore::new(&path);
        assert!(store.load_token().is_none());
        store.save_token("fresh").expect("overwrite");
        assert_eq!(store.load_token().as_deref(), Some("fresh"));
    }

    #[test]
    fn default_path_ends_with_file_name() {
        assert!(default_token_path().ends_with(TOKEN_FILE_NAME));
    }
}
