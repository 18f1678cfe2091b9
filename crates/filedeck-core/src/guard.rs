//! Route gating for views that need a session.

use crate::session::{Session, TokenStore};

/// Outcome of checking the token store before rendering a protected view.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum GuardDecision {
    /// A token is stored and decodes; render with this session.
    Admit(Session),
    /// No usable token; send the visitor to the login route.
    RedirectToLogin,
}

impl GuardDecision {
    /// Session carried by an admit decision.
    #[must_use]
    pub fn session(self) -> Option<Session> {
        match self {
            Self::Admit(session) => Some(session),
            Self::RedirectToLogin => None,
        }
    }
}

/// Check the store for a usable token.
///
/// Absence is a normal state and raises nothing. A token that fails to decode
/// is cleared so the next visit starts clean.
pub fn check<S: TokenStore + ?Sized>(store: &S) -> GuardDecision {
    let Some(token) = store.load_token().filter(|token| !token.trim().is_empty()) else {
        return GuardDecision::RedirectToLogin;
    };
    match Session::from_token(token) {
        Ok(session) => GuardDecision::Admit(session),
        Err(err) => {
            tracing::debug!(error = %err, "discarding undecodable stored token");
            if let Err(clear_err) = store.clear() {
                tracing::warn!(error = %clear_err, "failed to clear token store");
            }
            GuardDecision::RedirectToLogin
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::{MemoryTokenStore, test_token};
    use serde_json::json;

    #[test]
    fn empty_store_redirects() {
        assert_eq!(
            check(&MemoryTokenStore::default()),
            GuardDecision::RedirectToLogin
        );
        assert_eq!(
            check(&MemoryTokenStore::with_token("   ")),
            GuardDecision::RedirectToLogin
        );
    }

    #[test]
    fn valid_token_admits_with_session() {
        let store = MemoryTokenStore::with_token(test_token(&json!({"id": 7, "username": "alice"})));
        let session = check(&store).session().expect("admitted");
        assert_eq!(session.user_id(), Some(7));
    }

    #[test]
    fn broken_token_is_cleared() {
        let store = MemoryTokenStore::with_token("not-a-token");
        assert_eq!(check(&store), GuardDecision::RedirectToLogin);
        assert!(store.load_token().is_none());
    }

    #[test]
    fn repeated_checks_follow_the_store() {
        let store = MemoryTokenStore::with_token(test_token(&json!({"id": 7, "username": "alice"})));
        assert!(check(&store).session().is_some());
        store.clear().expect("clear");
        assert_eq!(check(&store), GuardDecision::RedirectToLogin);
        store
            .save_token(&test_token(&json!({"id": 8, "username": "bob"})))
            .expect("save");
        let session = check(&store).session().expect("admitted again");
        assert_eq!(session.user_id(), Some(8));
    }
}
