//! Drawing effects layered on top of the basic fills: drop shadow blur and watermark text.

pub(crate) mod blur;
pub mod shadow;
pub mod watermark;
