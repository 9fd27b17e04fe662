pub mod compositor;
pub(crate) mod cpu;
pub mod target;
