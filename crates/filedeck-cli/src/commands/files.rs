use std::path::Path;

use anyhow::anyhow;
use filedeck_api_models::{
    DELETE_PATH, DeleteFilesRequest, ErrorBody, FileListResponse, PAGE_PARAM, SEARCH_PARAM,
    SEARCH_PATH, UPLOAD_FILE_FIELD, UPLOAD_PATH, UPLOAD_USER_FIELD, user_files_path,
};
use filedeck_core::manager::require_upload;
use filedeck_core::selection::SelectionSet;
use filedeck_core::{ActionError, FileAction, FileManagerState, Session};
use reqwest::Method;
use reqwest::multipart::{Form, Part};

use crate::cli::{DeleteArgs, ListArgs, OutputFormat, PreviewArgs, SearchArgs, UploadArgs};
use crate::client::{AppContext, CliError, CliResult, classify_problem, transport_failure};
use crate::output::{render_file_list, render_preview};

fn precondition(action: FileAction, err: &ActionError) -> CliError {
    CliError::validation(action.failure_notice(err))
}

fn describe(action: FileAction) -> impl FnOnce(&ErrorBody) -> String {
    move |body| {
        action.failure_notice(&ActionError::Request {
            status: None,
            body: body.clone(),
        })
    }
}

async fn read_list(response: reqwest::Response, action: FileAction) -> CliResult<FileListResponse> {
    if !response.status().is_success() {
        return Err(classify_problem(response, describe(action)).await);
    }
    response
        .json::<FileListResponse>()
        .await
        .map_err(|err| CliError::failure(anyhow!("failed to parse file list: {err}")))
}

/// Fetch one page of the session user's files into `state`.
async fn fetch_page(
    ctx: &AppContext,
    session: &Session,
    state: &mut FileManagerState,
    page: u32,
) -> CliResult<()> {
    let user_id = session
        .user_id()
        .ok_or_else(|| precondition(FileAction::List, &ActionError::MissingUserId))?;
    let ticket = state.begin_request();
    tracing::debug!(user_id, page, "fetching files");

    let response = ctx
        .authorized(Method::GET, &user_files_path(user_id), session)
        .query(&[(PAGE_PARAM, page)])
        .send()
        .await
        .map_err(|err| transport_failure(FileAction::List.fallback_text(), &err))?;
    let list = read_list(response, FileAction::List).await?;
    state.apply_page(ticket, list);
    Ok(())
}

/// After an upload or delete the first page is shown again, when the session
/// names a user. The change is already confirmed, so a failed refresh is only
/// reported.
async fn refresh_first_page(ctx: &AppContext, session: &Session, format: OutputFormat) {
    if session.user_id().is_none() {
        tracing::debug!("session has no user id; skipping refresh");
        return;
    }
    let mut state = FileManagerState::default();
    let refreshed = match fetch_page(ctx, session, &mut state, 1).await {
        Ok(()) => render_file_list(&state, format),
        Err(err) => Err(err),
    };
    if let Err(err) = refreshed {
        let message = err.display_message();
        tracing::warn!(error = %message, "refresh after change failed");
        eprintln!(
            "warning: the change succeeded but the file list could not be refreshed: {message}"
        );
    }
}

fn announce(action: FileAction) {
    if let Some(text) = action.success_text() {
        println!("{text}");
    }
}

pub(crate) async fn handle_list(
    ctx: &AppContext,
    args: ListArgs,
    format: OutputFormat,
) -> CliResult<()> {
    let session = ctx.require_session()?;
    let mut state = FileManagerState::default();
    fetch_page(ctx, &session, &mut state, args.page).await?;
    render_file_list(&state, format)
}

pub(crate) async fn handle_search(
    ctx: &AppContext,
    args: SearchArgs,
    format: OutputFormat,
) -> CliResult<()> {
    let session = ctx.require_session()?;
    let mut state = FileManagerState::default();
    state.set_search_query(args.query);
    let query = state.search_query().to_string();
    let ticket = state.begin_request();
    tracing::debug!(query = %query, "searching files");

    let response = ctx
        .authorized(Method::GET, SEARCH_PATH, &session)
        .query(&[(SEARCH_PARAM, query.as_str())])
        .send()
        .await
        .map_err(|err| transport_failure(FileAction::Search.fallback_text(), &err))?;
    let list = read_list(response, FileAction::Search).await?;
    state.apply_search(ticket, query, list);
    render_file_list(&state, format)
}

pub(crate) async fn handle_upload(
    ctx: &AppContext,
    args: UploadArgs,
    format: OutputFormat,
) -> CliResult<()> {
    let session = ctx.require_session()?;
    let path = require_upload(args.path).map_err(|err| precondition(FileAction::Upload, &err))?;
    let user_id = session
        .user_id()
        .ok_or_else(|| precondition(FileAction::Upload, &ActionError::MissingUserId))?;

    let bytes = tokio::fs::read(&path).await.map_err(|err| {
        CliError::failure(anyhow!("failed to read '{}': {err}", path.display()))
    })?;
    let form = Form::new()
        .text(UPLOAD_USER_FIELD, user_id.to_string())
        .part(UPLOAD_FILE_FIELD, Part::bytes(bytes).file_name(file_name(&path)));
    tracing::debug!(user_id, path = %path.display(), "uploading file");

    let response = ctx
        .authorized(Method::POST, UPLOAD_PATH, &session)
        .multipart(form)
        .send()
        .await
        .map_err(|err| transport_failure(FileAction::Upload.fallback_text(), &err))?;
    if !response.status().is_success() {
        return Err(classify_problem(response, describe(FileAction::Upload)).await);
    }

    announce(FileAction::Upload);
    refresh_first_page(ctx, &session, format).await;
    Ok(())
}

fn file_name(path: &Path) -> String {
    path.file_name().map_or_else(
        || "upload".to_string(),
        |name| name.to_string_lossy().into_owned(),
    )
}

pub(crate) async fn handle_delete(
    ctx: &AppContext,
    args: DeleteArgs,
    format: OutputFormat,
) -> CliResult<()> {
    let session = ctx.require_session()?;
    let mut selection = SelectionSet::default();
    selection.set_all(&args.ids, true);
    if selection.is_empty() {
        return Err(precondition(FileAction::Delete, &ActionError::NoFilesSelected));
    }
    let request = DeleteFilesRequest {
        file_ids: selection.ids(),
    };
    tracing::debug!(count = request.file_ids.len(), "deleting files");

    let response = ctx
        .authorized(Method::DELETE, DELETE_PATH, &session)
        .json(&request)
        .send()
        .await
        .map_err(|err| transport_failure(FileAction::Delete.fallback_text(), &err))?;
    if !response.status().is_success() {
        return Err(classify_problem(response, describe(FileAction::Delete)).await);
    }

    selection.clear();
    announce(FileAction::Delete);
    refresh_first_page(ctx, &session, format).await;
    Ok(())
}

pub(crate) async fn handle_preview(
    ctx: &AppContext,
    args: PreviewArgs,
    format: OutputFormat,
) -> CliResult<()> {
    let session = ctx.require_session()?;
    let mut state = FileManagerState::default();
    fetch_page(ctx, &session, &mut state, args.page).await?;
    if !state.open_preview(args.id) {
        return Err(CliError::validation(format!(
            "file {} is not listed on page {}",
            args.id, args.page
        )));
    }
    let target = state
        .preview_target(&ctx.config)
        .ok_or_else(|| CliError::failure(anyhow!("preview closed unexpectedly")))?;
    render_preview(args.id, &target, format)
}
