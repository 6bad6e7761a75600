#![forbid(unsafe_code)]
//! pipeflow-io: filesystem producers and writer sinks.
//!
//! Readers turn a root path into a lazy stream of regular files
//! (`readers::dir`) and a path stream into a lazy stream of lines
//! (`readers::lines`). Writers drain a flow into any `std::io::Write`.
//! All file handles are owned by the cursor reading them and are closed as
//! soon as that cursor moves past them.

pub mod readers;
pub mod writers;

pub use readers::dir::{dir, dir_with_config, PathTreeSource};
pub use readers::lines::{open_files, FileLinesSource, OpenFiles};
pub use writers::delimited::{out, write, Out, WriteDelimited};
