#![forbid(unsafe_code)]
#![warn(
    unused,
    unreachable_pub,
    clippy::all,
    clippy::pedantic,
    rustdoc::broken_intra_doc_links,
    missing_docs
)]
//! Shared HTTP DTOs for the FileDeck file API.
//!
//! Both the web UI and the CLI encode requests and decode responses through
//! these types so the wire contract has a single definition. Optional fields
//! default instead of failing: the backend omits `pagination` on some error
//! paths and error bodies carry either `error` or `message`.

use chrono::{DateTime, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};

/// Path of the registration endpoint.
pub const REGISTER_PATH: &str = "/register";
/// Path of the login endpoint.
pub const LOGIN_PATH: &str = "/login";
/// Path of the multipart upload endpoint. The trailing slash is part of the route.
pub const UPLOAD_PATH: &str = "/upload/";
/// Path of the bulk delete endpoint.
pub const DELETE_PATH: &str = "/delete-file";
/// Path of the search endpoint.
pub const SEARCH_PATH: &str = "/search";
/// Query parameter selecting the page of a listing.
pub const PAGE_PARAM: &str = "page";
/// Query parameter carrying the search text.
pub const SEARCH_PARAM: &str = "search";
/// Multipart field carrying the owning user id.
pub const UPLOAD_USER_FIELD: &str = "user_id";
/// Multipart field carrying the file bytes.
pub const UPLOAD_FILE_FIELD: &str = "file";

/// Path listing the files owned by `user_id`.
#[must_use]
pub fn user_files_path(user_id: i64) -> String {
    format!("/users/{user_id}")
}

/// Body of `POST /register`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct RegisterRequest {
    /// Full display name.
    pub name: String,
    /// Account email address.
    pub email: String,
    /// Plain-text password, sent over TLS.
    pub password: String,
}

/// Body of `POST /login`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct LoginRequest {
    /// Account email address.
    pub email: String,
    /// Plain-text password, sent over TLS.
    pub password: String,
}

/// Successful login payload.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
pub struct LoginResponse {
    /// Bearer token, absent when the backend accepted the call without issuing one.
    #[serde(default)]
    pub token: Option<String>,
    /// Human-readable status message.
    #[serde(default)]
    pub message: Option<String>,
}

/// Generic `{message}` acknowledgement returned by register/upload/delete.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
pub struct MessageResponse {
    /// Human-readable status message.
    #[serde(default)]
    pub message: Option<String>,
}

/// Error document returned on non-2xx responses.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
pub struct ErrorBody {
    /// Short error description (login failures use this field).
    #[serde(default)]
    pub error: Option<String>,
    /// Longer message (registration failures use this field).
    #[serde(default)]
    pub message: Option<String>,
}

impl ErrorBody {
    /// Parse an error body, tolerating empty or non-JSON payloads.
    #[must_use]
    pub fn from_slice(bytes: &[u8]) -> Self {
        serde_json::from_slice(bytes).unwrap_or_default()
    }

    /// First non-blank message, preferring `error` over `message`.
    #[must_use]
    pub fn any_message(&self) -> Option<&str> {
        non_blank(self.error.as_deref()).or_else(|| non_blank(self.message.as_deref()))
    }
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.filter(|text| !text.trim().is_empty())
}

/// One stored file owned by the current user.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct FileRecord {
    /// Backend identifier.
    pub id: i64,
    /// Original file name shown to the user.
    pub file_name: String,
    /// Storage path relative to the file-serving base URL.
    pub file_path: String,
    /// Creation timestamp as sent by the backend.
    #[serde(default)]
    pub created_at: String,
}

impl FileRecord {
    /// Render `created_at` as `YYYY-MM-DD HH:MM:SS` (UTC), or the raw value when it
    /// does not parse.
    #[must_use]
    pub fn created_at_label(&self) -> String {
        parse_timestamp(&self.created_at).map_or_else(
            || self.created_at.clone(),
            |ts| ts.format("%Y-%m-%d %H:%M:%S").to_string(),
        )
    }
}

fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();
    if let Ok(parsed) = DateTime::parse_from_rfc3339(raw) {
        return Some(parsed.with_timezone(&Utc));
    }
    NaiveDateTime::parse_from_str(raw, "%Y-%m-%d %H:%M:%S")
        .ok()
        .map(|naive| naive.and_utc())
}

/// Page position metadata attached to list and search responses.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct PaginationBlock {
    /// One-based index of the returned page.
    #[serde(default = "first_page")]
    pub current_page: u32,
    /// Page size used by the backend.
    #[serde(default)]
    pub per_page: u32,
    /// One-based index of the final page.
    #[serde(default = "first_page")]
    pub last_page: u32,
    /// Total number of records across all pages.
    #[serde(default)]
    pub total: u64,
}

const fn first_page() -> u32 {
    1
}

/// Response of `GET /users/{id}` and `GET /search`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
pub struct FileListResponse {
    /// Records on the returned page.
    #[serde(default)]
    pub data: Vec<FileRecord>,
    /// Page metadata, when the backend supplied it.
    #[serde(default)]
    pub pagination: Option<PaginationBlock>,
}

/// Body of `DELETE /delete-file`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct DeleteFilesRequest {
    /// Identifiers of the records to remove.
    pub file_ids: Vec<i64>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn list_response_decodes_backend_payload() {
        let payload = json!({
            "data": [
                {"id": 3, "file_name": "report.PDF", "file_path": "uploads/report.PDF", "created_at": "2024-11-20T10:15:00.000000Z"}
            ],
            "pagination": {"current_page": 2, "per_page": 10, "last_page": 4, "total": 35}
        });
        let parsed: FileListResponse = serde_json::from_value(payload).expect("decode");
        assert_eq!(parsed.data.len(), 1);
        assert_eq!(parsed.data[0].file_name, "report.PDF");
        let pagination = parsed.pagination.expect("pagination present");
        assert_eq!(pagination.current_page, 2);
        assert_eq!(pagination.total, 35);
    }

    #[test]
    fn list_response_tolerates_missing_pagination() {
        let parsed: FileListResponse =
            serde_json::from_value(json!({"data": []})).expect("decode");
        assert!(parsed.pagination.is_none());
        assert!(parsed.data.is_empty());
    }

    #[test]
    fn delete_request_encodes_file_ids() {
        let body = serde_json::to_value(DeleteFilesRequest {
            file_ids: vec![4, 9],
        })
        .expect("encode");
        assert_eq!(body, json!({"file_ids": [4, 9]}));
    }

    #[test]
    fn error_body_prefers_error_field() {
        let body = ErrorBody::from_slice(br#"{"error":"Invalid credentials","message":"x"}"#);
        assert_eq!(body.any_message(), Some("Invalid credentials"));
        let body = ErrorBody::from_slice(br#"{"error":"  ","message":"Email taken"}"#);
        assert_eq!(body.any_message(), Some("Email taken"));
        assert_eq!(ErrorBody::from_slice(b"<html>").any_message(), None);
    }

    #[test]
    fn created_at_label_formats_known_layouts() {
        let mut record = FileRecord {
            id: 1,
            file_name: "a.txt".into(),
            file_path: "uploads/a.txt".into(),
            created_at: "2024-11-20T10:15:00.000000Z".into(),
        };
        assert_eq!(record.created_at_label(), "2024-11-20 10:15:00");
        record.created_at = "2024-11-20 08:00:01".into();
        assert_eq!(record.created_at_label(), "2024-11-20 08:00:01");
        record.created_at = "yesterday".into();
        assert_eq!(record.created_at_label(), "yesterday");
    }

    #[test]
    fn user_files_path_embeds_id() {
        assert_eq!(user_files_path(7), "/users/7");
    }
}
