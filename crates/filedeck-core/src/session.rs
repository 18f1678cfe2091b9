//! Bearer-token session handling.
//!
//! # Design
//! - Claims are decoded from the token payload without signature checks. They
//!   pick the display name and the user id used to build list URLs; the server
//!   still authorizes every request from the token itself.
//! - Storage sits behind [`TokenStore`] so the browser, the CLI and tests can
//!   each persist the token their own way.

use std::cell::RefCell;

use base64::Engine as _;
use base64::engine::general_purpose;
use serde_json::Value;

use crate::error::SessionError;

/// Display name used when the token carries no username claim.
pub const DEFAULT_DISPLAY_NAME: &str = "User";

/// Claims read from the token payload. Display and routing hints only.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct UntrustedClaims {
    /// `id` claim, when it is a positive integer.
    pub user_id: Option<i64>,
    /// `username` claim, when present and non-blank.
    pub username: Option<String>,
}

impl UntrustedClaims {
    fn from_json(value: &Value) -> Self {
        let user_id = value
            .get("id")
            .and_then(|id| {
                id.as_i64()
                    .or_else(|| id.as_str().and_then(|raw| raw.trim().parse().ok()))
            })
            .filter(|id| *id > 0);
        let username = value
            .get("username")
            .and_then(Value::as_str)
            .map(str::trim)
            .filter(|name| !name.is_empty())
            .map(str::to_string);
        Self { user_id, username }
    }
}

/// Decode the payload segment of a `header.payload.signature` token.
///
/// # Errors
/// Returns [`SessionError::MalformedToken`] when there is no payload segment,
/// [`SessionError::PayloadEncoding`] when it is not base64 (URL-safe or
/// standard alphabet, padding optional) and [`SessionError::PayloadJson`] when
/// the decoded bytes are not JSON.
pub fn decode_claims(token: &str) -> Result<UntrustedClaims, SessionError> {
    let payload = token
        .trim()
        .split('.')
        .nth(1)
        .filter(|segment| !segment.is_empty())
        .ok_or(SessionError::MalformedToken)?;
    let payload = payload.trim_end_matches('=');
    let bytes = general_purpose::URL_SAFE_NO_PAD
        .decode(payload)
        .or_else(|_| general_purpose::STANDARD_NO_PAD.decode(payload))
        .map_err(|source| SessionError::PayloadEncoding { source })?;
    let value: Value =
        serde_json::from_slice(&bytes).map_err(|source| SessionError::PayloadJson { source })?;
    Ok(UntrustedClaims::from_json(&value))
}

/// An authenticated session: the raw token plus its decoded hints.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Session {
    token: String,
    claims: UntrustedClaims,
}

impl Session {
    /// Build a session from a stored or freshly issued token.
    ///
    /// # Errors
    /// Propagates [`decode_claims`] failures.
    pub fn from_token(token: impl Into<String>) -> Result<Self, SessionError> {
        let token = token.into();
        let claims = decode_claims(&token)?;
        Ok(Self { token, claims })
    }

    /// Raw bearer token.
    #[must_use]
    pub fn token(&self) -> &str {
        &self.token
    }

    /// `Authorization` header value.
    #[must_use]
    pub fn bearer(&self) -> String {
        format!("Bearer {}", self.token)
    }

    /// User id hint used to scope list requests.
    #[must_use]
    pub const fn user_id(&self) -> Option<i64> {
        self.claims.user_id
    }

    /// Display name, falling back to [`DEFAULT_DISPLAY_NAME`].
    #[must_use]
    pub fn username(&self) -> &str {
        self.claims
            .username
            .as_deref()
            .unwrap_or(DEFAULT_DISPLAY_NAME)
    }

    /// Greeting shown at the top of the file manager.
    #[must_use]
    pub fn welcome_message(&self) -> String {
        format!("Welcome, {} 👋!", self.username())
    }
}

/// Persistence for the bearer token and the cached display name.
pub trait TokenStore {
    /// Stored token, if any.
    fn load_token(&self) -> Option<String>;

    /// Replace the stored token.
    ///
    /// # Errors
    /// Returns [`SessionError::Storage`] when the backend rejects the write.
    fn save_token(&self, token: &str) -> Result<(), SessionError>;

    /// Cached display name, if any.
    fn load_username(&self) -> Option<String>;

    /// Replace the cached display name.
    ///
    /// # Errors
    /// Returns [`SessionError::Storage`] when the backend rejects the write.
    fn save_username(&self, username: &str) -> Result<(), SessionError>;

    /// Remove both the token and the cached display name.
    ///
    /// # Errors
    /// Returns [`SessionError::Storage`] when the backend rejects the delete.
    fn clear(&self) -> Result<(), SessionError>;
}

/// Persist a token returned by login and derive the session from it.
///
/// The store is cleared again when the token does not decode, so a broken
/// token never lingers.
///
/// # Errors
/// Returns decode or storage failures.
pub fn persist_login<S: TokenStore + ?Sized>(
    store: &S,
    token: &str,
) -> Result<Session, SessionError> {
    store.save_token(token)?;
    match Session::from_token(token) {
        Ok(session) => {
            store.save_username(session.username())?;
            Ok(session)
        }
        Err(err) => {
            tracing::warn!(error = %err, "login returned an undecodable token");
            store.clear()?;
            Err(err)
        }
    }
}

/// Drop the stored session. No server call is made.
///
/// # Errors
/// Returns storage failures.
pub fn end_session<S: TokenStore + ?Sized>(store: &S) -> Result<(), SessionError> {
    store.clear()
}

/// In-memory store for tests and ephemeral sessions.
#[derive(Debug, Default)]
pub struct MemoryTokenStore {
    token: RefCell<Option<String>>,
    username: RefCell<Option<String>>,
}

impl MemoryTokenStore {
    /// Store pre-populated with a token.
    #[must_use]
    pub fn with_token(token: impl Into<String>) -> Self {
        Self {
            token: RefCell::new(Some(token.into())),
            username: RefCell::new(None),
        }
    }
}

impl TokenStore for MemoryTokenStore {
    fn load_token(&self) -> Option<String> {
        self.token.borrow().clone()
    }

    fn save_token(&self, token: &str) -> Result<(), SessionError> {
        *self.token.borrow_mut() = Some(token.to_string());
        Ok(())
    }

    fn load_username(&self) -> Option<String> {
        self.username.borrow().clone()
    }

    fn save_username(&self, username: &str) -> Result<(), SessionError> {
        *self.username.borrow_mut() = Some(username.to_string());
        Ok(())
    }

    fn clear(&self) -> Result<(), SessionError> {
        self.token.borrow_mut().take();
        self.username.borrow_mut().take();
        Ok(())
    }
}

/// Build an unsigned `header.payload.sig` token around a JSON payload.
#[cfg(test)]
pub(crate) fn test_token(payload: &serde_json::Value) -> String {
    let header = general_purpose::URL_SAFE_NO_PAD.encode(br#"{"alg":"HS256","typ":"JWT"}"#);
    let body = general_purpose::URL_SAFE_NO_PAD.encode(payload.to_string());
    format!("{header}.{body}.signature")
}
