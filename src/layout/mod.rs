pub mod geometry;
pub mod scale;
