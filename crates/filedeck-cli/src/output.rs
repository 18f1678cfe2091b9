//! Output renderers for CLI commands.

use anyhow::anyhow;
use filedeck_core::manager::ListMode;
use filedeck_core::preview::{PreviewKind, PreviewTarget, UNSUPPORTED_PREVIEW_TEXT};
use filedeck_core::{FileManagerState, Session};
use serde::Serialize;

use crate::cli::OutputFormat;
use crate::client::{CliError, CliResult};

const EMPTY_LIST_TEXT: &str = "No files available.";

#[derive(Serialize)]
struct FileRowJson<'a> {
    serial: u64,
    id: i64,
    file_name: &'a str,
    file_path: &'a str,
    created_at: &'a str,
}

#[derive(Serialize)]
struct PaginationJson {
    current_page: u32,
    last_page: u32,
    per_page: u32,
    total: u64,
    controls_visible: bool,
}

#[derive(Serialize)]
struct FileListJson<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    search: Option<&'a str>,
    files: Vec<FileRowJson<'a>>,
    pagination: Option<PaginationJson>,
}

#[derive(Serialize)]
struct PreviewJson<'a> {
    id: i64,
    file_name: &'a str,
    kind: &'static str,
    url: &'a str,
    inline: bool,
    download: bool,
}

#[derive(Serialize)]
struct WhoamiJson<'a> {
    username: &'a str,
    user_id: Option<i64>,
}

fn print_json<T: Serialize>(value: &T) -> CliResult<()> {
    let text = serde_json::to_string_pretty(value)
        .map_err(|err| CliError::failure(anyhow!("failed to format JSON: {err}")))?;
    println!("{text}");
    Ok(())
}

/// Render the list held by `state`: table rows plus the pagination footer.
pub(crate) fn render_file_list(state: &FileManagerState, format: OutputFormat) -> CliResult<()> {
    let rows = state.rows();
    match format {
        OutputFormat::Json => {
            let search = match state.mode() {
                ListMode::Search(query) => Some(query.as_str()),
                ListMode::Browse => None,
            };
            let files = rows
                .iter()
                .map(|row| FileRowJson {
                    serial: row.serial,
                    id: row.record.id,
                    file_name: &row.record.file_name,
                    file_path: &row.record.file_path,
                    created_at: &row.record.created_at,
                })
                .collect();
            let pagination = state.pagination().map(|page| PaginationJson {
                current_page: page.current_page,
                last_page: page.last_page,
                per_page: page.per_page,
                total: page.total,
                controls_visible: page.controls_visible(),
            });
            print_json(&FileListJson {
                search,
                files,
                pagination,
            })
        }
        OutputFormat::Table => {
            if rows.is_empty() {
                println!("{EMPTY_LIST_TEXT}");
                return Ok(());
            }
            println!("{:>6} {:>8} {:<19} FILE NAME", "SR NO.", "ID", "CREATED AT");
            for row in &rows {
                println!(
                    "{:>6} {:>8} {:<19} {}",
                    row.serial,
                    row.record.id,
                    row.record.created_at_label(),
                    row.record.file_name
                );
            }
            let view = state.pagination_view();
            if view.visible {
                let previous = view
                    .previous_page
                    .map_or_else(|| "-".to_string(), |page| format!("--page {page}"));
                let next = view
                    .next_page
                    .map_or_else(|| "-".to_string(), |page| format!("--page {page}"));
                println!("{} (previous: {previous}, next: {next})", view.label);
            }
            Ok(())
        }
    }
}

/// Render the resolved preview for one record.
pub(crate) fn render_preview(
    id: i64,
    target: &PreviewTarget,
    format: OutputFormat,
) -> CliResult<()> {
    match format {
        OutputFormat::Json => print_json(&PreviewJson {
            id,
            file_name: &target.download_name,
            kind: target.kind.as_str(),
            url: &target.url,
            inline: target.kind.is_inline(),
            download: target.kind.offers_download(),
        }),
        OutputFormat::Table => {
            println!("file: {}", target.download_name);
            println!("kind: {}", target.kind.as_str());
            match target.kind {
                PreviewKind::Unsupported => println!("{UNSUPPORTED_PREVIEW_TEXT}"),
                PreviewKind::OfficeDocument | PreviewKind::Archive => {
                    println!("download: {}", target.url);
                }
                PreviewKind::Image | PreviewKind::Pdf | PreviewKind::Video => {
                    println!("open: {}", target.url);
                }
            }
            Ok(())
        }
    }
}

/// Render the logged-in user.
pub(crate) fn render_whoami(session: &Session, format: OutputFormat) -> CliResult<()> {
    match format {
        OutputFormat::Json => print_json(&WhoamiJson {
            username: session.username(),
            user_id: session.user_id(),
        }),
        OutputFormat::Table => {
            println!("{}", session.welcome_message());
            if let Some(id) = session.user_id() {
                println!("user id: {id}");
            }
            Ok(())
        }
    }
}
