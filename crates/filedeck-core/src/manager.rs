//! File manager state: the current page of records, its pagination, the
//! selection set, the search box and the preview modal.
//!
//! Renderers own the I/O. They call [`FileManagerState::begin_request`] before
//! a list or search fetch and hand the response back with the ticket; a
//! response whose ticket has been superseded is dropped.

use filedeck_api_models::{FileListResponse, FileRecord};

use crate::config::ClientConfig;
use crate::error::ActionError;
use crate::generation::{RequestGeneration, Ticket};
use crate::pagination::{PaginationState, PaginationView, derive_view};
use crate::preview::PreviewTarget;
use crate::selection::SelectionSet;

/// Which request produced the list on screen.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum ListMode {
    /// Paginated listing of the user's files.
    #[default]
    Browse,
    /// Results of a search for the given query.
    Search(String),
}

/// User-triggered actions that report their outcome as a notice.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FileAction {
    /// Fetch of one page of the user's files.
    List,
    /// Multipart upload of one local file.
    Upload,
    /// Bulk delete of the selection.
    Delete,
    /// Search by query.
    Search,
}

impl FileAction {
    /// Notice shown on success. Fetches have none.
    #[must_use]
    pub const fn success_text(self) -> Option<&'static str> {
        match self {
            Self::Upload => Some("File uploaded successfully!"),
            Self::Delete => Some("Files deleted successfully!"),
            Self::List | Self::Search => None,
        }
    }

    /// Notice shown on a failed request without a server message.
    #[must_use]
    pub const fn fallback_text(self) -> &'static str {
        match self {
            Self::List => "Error fetching files.",
            Self::Upload => "Error uploading file.",
            Self::Delete => "Error deleting files.",
            Self::Search => "Error fetching search results.",
        }
    }

    /// Notice for a failure of this action.
    #[must_use]
    pub fn failure_notice(self, err: &ActionError) -> String {
        match err {
            ActionError::NoFileChosen => "Please select a file first!".to_string(),
            ActionError::NoFilesSelected => "Please select files to delete!".to_string(),
            ActionError::MissingUserId => {
                "Session is missing a user id. Please log in again.".to_string()
            }
            ActionError::Request { body, .. } => body
                .any_message()
                .unwrap_or_else(|| self.fallback_text())
                .to_string(),
        }
    }
}

/// Upload precondition: a local file must have been chosen.
///
/// # Errors
/// Returns [`ActionError::NoFileChosen`] when `chosen` is empty.
pub fn require_upload<T>(chosen: Option<T>) -> Result<T, ActionError> {
    chosen.ok_or(ActionError::NoFileChosen)
}

/// One table row.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FileRow {
    /// "SR No." column, continuing across pages.
    pub serial: u64,
    /// Record shown in the row.
    pub record: FileRecord,
}

/// State behind the file manager view.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct FileManagerState {
    files: Vec<FileRecord>,
    pagination: Option<PaginationState>,
    selection: SelectionSet,
    search_query: String,
    mode: ListMode,
    preview: Option<FileRecord>,
    generation: RequestGeneration,
}

impl FileManagerState {
    /// Take a ticket for a list or search fetch about to be sent.
    pub fn begin_request(&mut self) -> Ticket {
        self.generation.issue()
    }

    /// Apply a page of the user's files.
    ///
    /// Returns `false` when the response was stale and dropped.
    pub fn apply_page(&mut self, ticket: Ticket, response: FileListResponse) -> bool {
        self.replace_list(ticket, response, ListMode::Browse)
    }

    /// Apply search results for `query`.
    ///
    /// Returns `false` when the response was stale and dropped.
    pub fn apply_search(
        &mut self,
        ticket: Ticket,
        query: impl Into<String>,
        response: FileListResponse,
    ) -> bool {
        self.replace_list(ticket, response, ListMode::Search(query.into()))
    }

    fn replace_list(&mut self, ticket: Ticket, response: FileListResponse, mode: ListMode) -> bool {
        if !self.generation.is_current(ticket) {
            tracing::debug!(ticket = ticket.get(), "dropping stale file list response");
            return false;
        }
        self.files = response.data;
        self.pagination = response.pagination.map(PaginationState::from);
        self.mode = mode;
        let visible = self.visible_ids();
        self.selection.retain_visible(&visible);
        if self
            .preview
            .as_ref()
            .is_some_and(|open| !visible.contains(&open.id))
        {
            self.preview = None;
        }
        true
    }

    /// Records on screen.
    #[must_use]
    pub fn files(&self) -> &[FileRecord] {
        &self.files
    }

    /// Pagination of the last applied response.
    #[must_use]
    pub const fn pagination(&self) -> Option<&PaginationState> {
        self.pagination.as_ref()
    }

    /// Which request produced the list.
    #[must_use]
    pub const fn mode(&self) -> &ListMode {
        &self.mode
    }

    /// Ids of the records on screen, in display order.
    #[must_use]
    pub fn visible_ids(&self) -> Vec<i64> {
        self.files.iter().map(|file| file.id).collect()
    }

    /// Current selection.
    #[must_use]
    pub const fn selection(&self) -> &SelectionSet {
        &self.selection
    }

    /// Row checkbox.
    pub fn toggle_selected(&mut self, id: i64) {
        self.selection.toggle(id);
    }

    /// Header checkbox.
    pub fn set_all_selected(&mut self, checked: bool) {
        let visible = self.visible_ids();
        self.selection.set_all(&visible, checked);
    }

    /// Whether the header checkbox renders checked.
    #[must_use]
    pub fn header_checked(&self) -> bool {
        self.selection.all_selected(&self.visible_ids())
    }

    /// Ids for a delete request.
    ///
    /// # Errors
    /// Returns [`ActionError::NoFilesSelected`] when the selection is empty.
    pub fn require_selection(&self) -> Result<Vec<i64>, ActionError> {
        if self.selection.is_empty() {
            Err(ActionError::NoFilesSelected)
        } else {
            Ok(self.selection.ids())
        }
    }

    /// Record a confirmed delete. The caller re-fetches page 1 afterwards.
    pub fn delete_succeeded(&mut self) {
        self.selection.clear();
    }

    /// Search box contents.
    #[must_use]
    pub fn search_query(&self) -> &str {
        &self.search_query
    }

    /// Update the search box.
    pub fn set_search_query(&mut self, query: impl Into<String>) {
        self.search_query = query.into();
    }

    /// Open the preview modal for a visible record.
    ///
    /// Returns `false` when `id` is not on screen.
    pub fn open_preview(&mut self, id: i64) -> bool {
        match self.files.iter().find(|file| file.id == id) {
            Some(file) => {
                self.preview = Some(file.clone());
                true
            }
            None => false,
        }
    }

    /// Close the preview modal.
    pub fn close_preview(&mut self) {
        self.preview = None;
    }

    /// Record in the preview modal.
    #[must_use]
    pub const fn preview(&self) -> Option<&FileRecord> {
        self.preview.as_ref()
    }

    /// Resolved contents of the preview modal.
    #[must_use]
    pub fn preview_target(&self, config: &ClientConfig) -> Option<PreviewTarget> {
        self.preview
            .as_ref()
            .map(|record| PreviewTarget::for_record(record, config))
    }

    /// Pagination bar for the current list.
    #[must_use]
    pub fn pagination_view(&self) -> PaginationView {
        derive_view(self.pagination.as_ref())
    }

    /// Table rows with serial numbers.
    #[must_use]
    pub fn rows(&self) -> Vec<FileRow> {
        self.files
            .iter()
            .enumerate()
            .map(|(index, record)| FileRow {
                serial: self
                    .pagination
                    .map_or(index as u64 + 1, |page| page.serial_number(index)),
                record: record.clone(),
            })
            .collect()
    }

    /// Forget everything shown, e.g. on logout. Tickets issued before the
    /// reset stay stale.
    pub fn reset(&mut self) {
        let generation = self.generation;
        *self = Self {
            generation,
            ..Self::default()
        };
        self.generation.issue();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use filedeck_api_models::{ErrorBody, PaginationBlock};

    fn record(id: i64, name: &str) -> FileRecord {
        FileRecord {
            id,
            file_name: name.to_string(),
            file_path: format!("uploads/{name}"),
            created_at: "2024-01-02T03:04:05Z".to_string(),
        }
    }

    fn page(ids: &[i64], current_page: u32, last_page: u32, total: u64) -> FileListResponse {
        FileListResponse {
            data: ids.iter().map(|id| record(*id, &format!("f{id}.pdf"))).collect(),
            pagination: Some(PaginationBlock {
                current_page,
                per_page: 2,
                last_page,
                total,
            }),
        }
    }

    fn loaded(ids: &[i64]) -> FileManagerState {
        let mut state = FileManagerState::default();
        let ticket = state.begin_request();
        assert!(state.apply_page(ticket, page(ids, 1, 3, 6)));
        state
    }

    #[test]
    fn header_checkbox_tracks_visible_ids() {
        let mut state = loaded(&[1, 2]);
        state.set_all_selected(true);
        assert_eq!(state.selection().ids(), vec![1, 2]);
        assert!(state.header_checked());
        state.set_all_selected(false);
        assert!(state.selection().is_empty());
        assert!(!state.header_checked());
    }

    #[test]
    fn empty_selection_blocks_delete() {
        let state = loaded(&[1, 2]);
        let err = state.require_selection().expect_err("no selection");
        assert_eq!(err, ActionError::NoFilesSelected);
        assert_eq!(
            FileAction::Delete.failure_notice(&err),
            "Please select files to delete!"
        );
    }

    #[test]
    fn missing_upload_file_is_rejected() {
        let err = require_upload::<&str>(None).expect_err("no file");
        assert_eq!(
            FileAction::Upload.failure_notice(&err),
            "Please select a file first!"
        );
        assert_eq!(require_upload(Some("a.txt")), Ok("a.txt"));
    }

    #[test]
    fn delete_success_clears_selection_and_accepts_refresh() {
        let mut state = loaded(&[1, 2]);
        state.toggle_selected(2);
        assert_eq!(state.require_selection(), Ok(vec![2]));
        state.delete_succeeded();
        let ticket = state.begin_request();
        assert!(state.apply_page(ticket, page(&[1, 3], 1, 3, 5)));
        assert!(state.selection().is_empty());
        assert_eq!(state.visible_ids(), vec![1, 3]);
    }

    #[test]
    fn page_change_prunes_hidden_selection() {
        let mut state = loaded(&[1, 2]);
        state.set_all_selected(true);
        let ticket = state.begin_request();
        state.apply_page(ticket, page(&[2, 3], 2, 3, 6));
        assert_eq!(state.selection().ids(), vec![2]);
    }

    #[test]
    fn stale_response_is_dropped() {
        let mut state = FileManagerState::default();
        let slow = state.begin_request();
        let fast = state.begin_request();
        assert!(state.apply_search(fast, "report", page(&[9], 1, 1, 1)));
        assert!(!state.apply_page(slow, page(&[1, 2], 1, 3, 6)));
        assert_eq!(state.visible_ids(), vec![9]);
        assert_eq!(state.mode(), &ListMode::Search("report".into()));
    }

    #[test]
    fn search_without_pagination_hides_controls() {
        let mut state = loaded(&[1, 2]);
        assert!(state.pagination_view().visible);
        let ticket = state.begin_request();
        let response = FileListResponse {
            data: vec![record(5, "a.zip")],
            pagination: None,
        };
        assert!(state.apply_search(ticket, "a", response));
        assert!(!state.pagination_view().visible);
        assert_eq!(state.rows()[0].serial, 1);
    }

    #[test]
    fn serials_continue_across_pages() {
        let mut state = FileManagerState::default();
        let ticket = state.begin_request();
        state.apply_page(ticket, page(&[5, 6], 2, 3, 6));
        let serials: Vec<_> = state.rows().iter().map(|row| row.serial).collect();
        assert_eq!(serials, vec![3, 4]);
    }

    #[test]
    fn preview_opens_visible_records_only() {
        let mut state = loaded(&[1, 2]);
        assert!(!state.open_preview(42));
        assert!(state.open_preview(2));
        let config = ClientConfig::new("http://h/api", "http://h/");
        let target = state.preview_target(&config).expect("open");
        assert_eq!(target.url, "http://h/uploads/f2.pdf");
        state.close_preview();
        assert!(state.preview().is_none());
    }

    #[test]
    fn request_failures_prefer_server_message() {
        let err = ActionError::Request {
            status: Some(500),
            body: ErrorBody::default(),
        };
        assert_eq!(FileAction::Search.failure_notice(&err), "Error fetching search results.");
        let err = ActionError::from_response(413, br#"{"error":"File too large"}"#);
        assert_eq!(FileAction::Upload.failure_notice(&err), "File too large");
        assert_eq!(FileAction::Upload.success_text(), Some("File uploaded successfully!"));
    }

    #[test]
    fn reset_keeps_old_tickets_stale() {
        let mut state = loaded(&[1]);
        let before = state.begin_request();
        state.reset();
        assert!(state.files().is_empty());
        assert!(!state.apply_page(before, page(&[1], 1, 1, 1)));
    }
}
