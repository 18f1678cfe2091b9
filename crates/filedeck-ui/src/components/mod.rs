//! Reusable view components.

pub(crate) mod file_table;
pub(crate) mod guard;
pub(crate) mod pagination;
pub(crate) mod preview_modal;
pub(crate) mod toast;
