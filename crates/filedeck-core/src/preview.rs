//! Preview treatment chosen from a file extension.

use filedeck_api_models::FileRecord;

use crate::config::ClientConfig;

/// Shown in place of a preview for unknown extensions.
pub const UNSUPPORTED_PREVIEW_TEXT: &str = "Preview not available for this file type.";

/// How a stored file is shown in the preview modal.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PreviewKind {
    /// Inline `<img>`.
    Image,
    /// Embedded document viewer.
    Pdf,
    /// Word and Excel files; download link only.
    OfficeDocument,
    /// Inline player.
    Video,
    /// Folder icon plus download link.
    Archive,
    /// No preview.
    Unsupported,
}

impl PreviewKind {
    /// Classify a file name by the text after its last `.`, ignoring case.
    #[must_use]
    pub fn classify(name: &str) -> Self {
        extension(name).map_or(Self::Unsupported, |ext| {
            match ext.to_ascii_lowercase().as_str() {
                "png" | "jpg" | "jpeg" | "gif" => Self::Image,
                "pdf" => Self::Pdf,
                "doc" | "docx" | "xls" | "xlsx" => Self::OfficeDocument,
                "mp4" => Self::Video,
                "zip" => Self::Archive,
                _ => Self::Unsupported,
            }
        })
    }

    /// Rendered inside the modal rather than offered as a link.
    #[must_use]
    pub const fn is_inline(self) -> bool {
        matches!(self, Self::Image | Self::Pdf | Self::Video)
    }

    /// Modal shows a download link.
    #[must_use]
    pub const fn offers_download(self) -> bool {
        matches!(self, Self::OfficeDocument | Self::Archive)
    }

    /// Stable lowercase name used in JSON output.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Image => "image",
            Self::Pdf => "pdf",
            Self::OfficeDocument => "office-document",
            Self::Video => "video",
            Self::Archive => "archive",
            Self::Unsupported => "unsupported",
        }
    }
}

fn extension(name: &str) -> Option<&str> {
    let base = name.rsplit(['/', '\\']).next().unwrap_or(name);
    base.rsplit_once('.')
        .map(|(_, ext)| ext)
        .filter(|ext| !ext.is_empty())
}

/// Classify a record by its stored path, falling back to the display name
/// when the path has no extension.
#[must_use]
pub fn classify_record(record: &FileRecord) -> PreviewKind {
    if extension(&record.file_path).is_some() {
        PreviewKind::classify(&record.file_path)
    } else {
        PreviewKind::classify(&record.file_name)
    }
}

/// Resolved modal contents for one record.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PreviewTarget {
    /// Treatment.
    pub kind: PreviewKind,
    /// Public URL of the stored file.
    pub url: String,
    /// Suggested name for download links.
    pub download_name: String,
}

impl PreviewTarget {
    /// Resolve the modal contents for `record`.
    #[must_use]
    pub fn for_record(record: &FileRecord, config: &ClientConfig) -> Self {
        Self {
            kind: classify_record(record),
            url: config.file_url(&record.file_path),
            download_name: record.file_name.clone(),
        }
    }
}
