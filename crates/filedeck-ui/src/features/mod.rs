//! Feature pages.

pub(crate) mod auth;
pub(crate) mod files;
