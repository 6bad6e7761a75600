//! Filesystem-backed producers.

pub mod dir;
pub mod lines;
