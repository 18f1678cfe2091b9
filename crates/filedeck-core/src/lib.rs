#![forbid(unsafe_code)]
#![warn(
    unused,
    unreachable_pub,
    clippy::all,
    clippy::pedantic,
    rustdoc::broken_intra_doc_links,
    missing_docs
)]
#![allow(clippy::module_name_repetitions)]
//! DOM-free client logic shared by the FileDeck web UI and CLI.
//!
//! Layout:
//! - `session` / `guard`: bearer token storage, claim decoding and route gating
//! - `auth`: login/register form checks and notice texts
//! - `manager`: the file manager state machine (list, selection, search, preview)
//! - `pagination`, `selection`, `preview`, `generation`: the pieces it is built from
//! - `notify`: bounded notice queue rendered as toasts or terminal lines
//! - `config`: API and file-serving base URLs

pub mod auth;
pub mod config;
pub mod error;
pub mod generation;
pub mod guard;
pub mod manager;
pub mod notify;
pub mod pagination;
pub mod preview;
pub mod selection;
pub mod session;

pub use config::ClientConfig;
pub use error::{ActionError, FormError, SessionError};
pub use manager::{FileAction, FileManagerState, FileRow, ListMode};
pub use session::{Session, TokenStore};
