//! Global yewdux store and the reducers the views dispatch.

use filedeck_core::notify::NoticeQueue;
use filedeck_core::{ActionError, FileAction, FileManagerState, Session};
use yewdux::prelude::Dispatch;
use yewdux::store::Store;

/// Root application state shared across views.
#[derive(Clone, Debug, Default, PartialEq, Store)]
pub struct AppStore {
    /// Logged-in user, filled once the guard admits a route.
    pub session: Option<Session>,
    /// File list, selection, search and preview state.
    pub files: FileManagerState,
    /// Toasts waiting to be shown.
    pub notices: NoticeQueue,
}

/// Dispatcher for the global store.
#[must_use]
pub fn app_dispatch() -> Dispatch<AppStore> {
    Dispatch::<AppStore>::new()
}

/// Record the session the guard admitted. Switching to a different user
/// starts from an empty file list. With no previous session the list is
/// already empty (`sign_out` resets it), and a fetch issued before the guard
/// reports back keeps its ticket.
pub fn admit(store: &mut AppStore, session: Session) {
    if store.session.as_ref() == Some(&session) {
        return;
    }
    let other_user = store
        .session
        .as_ref()
        .is_some_and(|current| current.user_id() != session.user_id());
    if other_user {
        store.files.reset();
    }
    store.session = Some(session);
}

/// Drop the session and everything loaded under it.
pub fn sign_out(store: &mut AppStore) {
    store.session = None;
    store.files.reset();
}

/// Queue the success toast for `action`, if it has one.
pub fn report_success(store: &mut AppStore, action: FileAction) {
    if let Some(text) = action.success_text() {
        store.notices.success(text);
    }
}

/// Queue the failure toast for `action`.
pub fn report_failure(store: &mut AppStore, action: FileAction, err: &ActionError) {
    store.notices.error(action.failure_notice(err));
}

#[cfg(test)]
mod tests {
    use super::*;
    use filedeck_api_models::{ErrorBody, FileListResponse, FileRecord};
    use filedeck_core::notify::NoticeKind;
    use base64::Engine;
    use base64::engine::general_purpose::URL_SAFE_NO_PAD;
    use serde_json::json;

    fn token(user_id: i64, username: &str) -> String {
        let payload = serde_json::to_vec(&json!({"id": user_id, "username": username}))
            .expect("payload");
        format!("header.{}.signature", URL_SAFE_NO_PAD.encode(payload))
    }

    fn session(user_id: i64, username: &str) -> Session {
        Session::from_token(token(user_id, username)).expect("session")
    }

    fn record(id: i64) -> FileRecord {
        FileRecord {
            id,
            file_name: format!("file-{id}.png"),
            file_path: format!("uploads/file-{id}.png"),
            created_at: "2024-01-01T00:00:00Z".into(),
        }
    }

    fn loaded_store() -> AppStore {
        let mut store = AppStore::default();
        admit(&mut store, session(7, "alice"));
        let ticket = store.files.begin_request();
        store.files.apply_page(
            ticket,
            FileListResponse {
                data: vec![record(1)],
                pagination: None,
            },
        );
        store
    }

    #[test]
    fn admit_same_user_keeps_files() {
        let mut store = loaded_store();
        admit(&mut store, session(7, "alice"));
        assert_eq!(store.files.files().len(), 1);
    }

    #[test]
    fn first_admit_keeps_in_flight_page() {
        let mut store = AppStore::default();
        let ticket = store.files.begin_request();
        admit(&mut store, session(7, "alice"));
        let applied = store.files.apply_page(
            ticket,
            FileListResponse {
                data: vec![record(1)],
                pagination: None,
            },
        );
        assert!(applied);
        assert_eq!(store.files.visible_ids(), vec![1]);
    }

    #[test]
    fn admit_after_sign_out_keeps_in_flight_page() {
        let mut store = loaded_store();
        sign_out(&mut store);
        let ticket = store.files.begin_request();
        admit(&mut store, session(8, "bob"));
        assert!(store.files.apply_page(
            ticket,
            FileListResponse {
                data: vec![record(2)],
                pagination: None,
            },
        ));
    }

    #[test]
    fn admit_other_user_resets_files() {
        let mut store = loaded_store();
        admit(&mut store, session(8, "bob"));
        assert!(store.files.files().is_empty());
        assert_eq!(store.session.as_ref().map(Session::username), Some("bob"));
    }

    #[test]
    fn sign_out_clears_session_and_files() {
        let mut store = loaded_store();
        sign_out(&mut store);
        assert!(store.session.is_none());
        assert!(store.files.files().is_empty());
    }

    #[test]
    fn list_success_has_no_toast() {
        let mut store = AppStore::default();
        report_success(&mut store, FileAction::List);
        assert!(store.notices.notices().is_empty());
        report_success(&mut store, FileAction::Upload);
        assert_eq!(store.notices.notices()[0].kind, NoticeKind::Success);
    }

    #[test]
    fn failure_prefers_server_message() {
        let mut store = AppStore::default();
        let err = ActionError::Request {
            status: Some(500),
            body: ErrorBody {
                error: None,
                message: Some("disk full".into()),
            },
        };
        report_failure(&mut store, FileAction::Upload, &err);
        report_failure(&mut store, FileAction::Delete, &ActionError::transport());
        let texts: Vec<_> = store
            .notices
            .notices()
            .iter()
            .map(|notice| notice.message.as_str())
            .collect();
        assert_eq!(texts, vec!["disk full", "Error deleting files."]);
    }
}
