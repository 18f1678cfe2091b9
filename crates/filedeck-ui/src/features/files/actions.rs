//! Async file actions. Each issues one request and folds the outcome into
//! the store.

use crate::services::api::ApiClient;
use crate::state::{app_dispatch, report_failure, report_success};
use filedeck_api_models::DeleteFilesRequest;
use filedeck_core::manager::require_upload;
use filedeck_core::{ActionError, FileAction, Session};
use gloo::console;
use std::rc::Rc;
use web_sys::File;

fn fail(action: FileAction, err: &ActionError) {
    app_dispatch().reduce_mut(|store| report_failure(store, action, err));
}

/// Fetch one page of the user's files.
pub(crate) fn load_page(client: Rc<ApiClient>, session: Session, page: u32) {
    let Some(user_id) = session.user_id() else {
        fail(FileAction::List, &ActionError::MissingUserId);
        return;
    };
    let dispatch = app_dispatch();
    let mut ticket = None;
    dispatch.reduce_mut(|store| ticket = Some(store.files.begin_request()));
    let Some(ticket) = ticket else {
        return;
    };

    yew::platform::spawn_local(async move {
        match client.list_files(&session, user_id, page).await {
            Ok(response) => dispatch.reduce_mut(|store| {
                store.files.apply_page(ticket, response);
            }),
            Err(err) => {
                console::error!("failed to fetch files", err.to_string());
                fail(FileAction::List, &err.into());
            }
        }
    });
}

/// Search the user's files with the query held in the store.
pub(crate) fn search(client: Rc<ApiClient>, session: Session) {
    let dispatch = app_dispatch();
    let mut pending = None;
    dispatch.reduce_mut(|store| {
        pending = Some((
            store.files.begin_request(),
            store.files.search_query().to_string(),
        ));
    });
    let Some((ticket, query)) = pending else {
        return;
    };

    yew::platform::spawn_local(async move {
        match client.search_files(&session, &query).await {
            Ok(response) => dispatch.reduce_mut(|store| {
                store.files.apply_search(ticket, query, response);
            }),
            Err(err) => {
                console::error!("search failed", err.to_string());
                fail(FileAction::Search, &err.into());
            }
        }
    });
}

/// Upload the chosen file, then reload the first page. `on_done` runs after a
/// successful upload so the view can reset its file input.
pub(crate) fn upload(
    client: Rc<ApiClient>,
    session: Session,
    chosen: Option<File>,
    on_done: impl FnOnce() + 'static,
) {
    let file = match require_upload(chosen) {
        Ok(file) => file,
        Err(err) => return fail(FileAction::Upload, &err),
    };
    let Some(user_id) = session.user_id() else {
        fail(FileAction::Upload, &ActionError::MissingUserId);
        return;
    };

    yew::platform::spawn_local(async move {
        match client.upload_file(&session, user_id, &file).await {
            Ok(()) => {
                app_dispatch().reduce_mut(|store| report_success(store, FileAction::Upload));
                on_done();
                load_page(client, session, 1);
            }
            Err(err) => {
                console::error!("upload failed", err.to_string());
                fail(FileAction::Upload, &err.into());
            }
        }
    });
}

/// Delete every selected file, then reload the first page.
pub(crate) fn delete_selected(client: Rc<ApiClient>, session: Session) {
    let file_ids = match app_dispatch().get().files.require_selection() {
        Ok(ids) => ids,
        Err(err) => return fail(FileAction::Delete, &err),
    };

    yew::platform::spawn_local(async move {
        let request = DeleteFilesRequest { file_ids };
        match client.delete_files(&session, &request).await {
            Ok(()) => {
                app_dispatch().reduce_mut(|store| {
                    store.files.delete_succeeded();
                    report_success(store, FileAction::Delete);
                });
                load_page(client, session, 1);
            }
            Err(err) => {
                console::error!("delete failed", err.to_string());
                fail(FileAction::Delete, &err.into());
            }
        }
    });
}
