//! User-facing composition inputs: the style snapshot, its validation and canvas presets.

pub mod presets;
pub mod style;
pub mod validate;
