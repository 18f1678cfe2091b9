//! File manager page.

pub(crate) mod actions;
pub(crate) mod view;
