#![forbid(unsafe_code)]
#![warn(
    unused,
    unreachable_pub,
    clippy::all,
    clippy::pedantic,
    rustdoc::broken_intra_doc_links,
    missing_docs
)]
#![allow(clippy::redundant_pub_crate)]

//! Command-line client for a FileDeck file server.
//!
//! Layout:
//! - `cli.rs`: argument parsing, logging setup and command dispatch
//! - `commands/`: command handlers grouped by concern
//! - `client.rs`: shared HTTP client, session lookup and error classification
//! - `token_store.rs`: bearer token persisted as a JSON file
//! - `output.rs`: table and JSON renderers
//! - `main.rs`: thin entrypoint delegating to `run()`

pub(crate) mod cli;
pub(crate) mod client;
pub(crate) mod commands;
pub(crate) mod output;
pub(crate) mod token_store;

pub use cli::run;
