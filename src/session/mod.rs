//! Call sites of the compositor: the live preview and the full-resolution export.

pub mod export;
pub mod preview;
