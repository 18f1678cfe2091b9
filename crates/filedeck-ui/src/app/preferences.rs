//! Browser persistence and build-time configuration.

use filedeck_core::{ClientConfig, SessionError, TokenStore};
use gloo::console;
use gloo::storage::{LocalStorage, Storage};

pub(crate) const TOKEN_KEY: &str = "authToken";
pub(crate) const USERNAME_KEY: &str = "username";

/// Base URLs baked in at build time, falling back to the local defaults.
pub(crate) fn client_config() -> ClientConfig {
    ClientConfig::from_overrides(
        option_env!("FILEDECK_API_BASE_URL"),
        option_env!("FILEDECK_FILE_BASE_URL"),
    )
}

/// Session storage in `localStorage`. Values are raw strings, not JSON.
#[derive(Clone, Copy, Debug, Default)]
pub(crate) struct LocalTokenStore;

impl LocalTokenStore {
    fn read(key: &'static str) -> Option<String> {
        match LocalStorage::raw().get_item(key) {
            Ok(value) => value.filter(|value| !value.trim().is_empty()),
            Err(err) => {
                log_storage_error("get", key, &format!("{err:?}"));
                None
            }
        }
    }

    fn write(key: &'static str, value: &str) -> Result<(), SessionError> {
        LocalStorage::raw().set_item(key, value).map_err(|err| {
            let detail = format!("{err:?}");
            log_storage_error("set", key, &detail);
            SessionError::Storage {
                operation: "set",
                detail,
            }
        })
    }

    fn remove(key: &'static str) -> Result<(), SessionError> {
        LocalStorage::raw().remove_item(key).map_err(|err| {
            let detail = format!("{err:?}");
            log_storage_error("remove", key, &detail);
            SessionError::Storage {
                operation: "remove",
                detail,
            }
        })
    }
}

impl TokenStore for LocalTokenStore {
    fn load_token(&self) -> Option<String> {
        Self::read(TOKEN_KEY)
    }

    fn save_token(&self, token: &str) -> Result<(), SessionError> {
        Self::write(TOKEN_KEY, token)
    }

    fn load_username(&self) -> Option<String> {
        Self::read(USERNAME_KEY)
    }

    fn save_username(&self, username: &str) -> Result<(), SessionError> {
        Self::write(USERNAME_KEY, username)
    }

    fn clear(&self) -> Result<(), SessionError> {
        Self::remove(TOKEN_KEY)?;
        Self::remove(USERNAME_KEY)
    }
}

fn log_storage_error(operation: &'static str, key: &'static str, detail: &str) {
    console::error!("storage operation failed", operation, key, detail);
}
