#![forbid(unsafe_code)]
//! pipeflow-core: the iteration protocol and composition surface.
//!
//! Design intent:
//! - Every producer and combinator is a `DataStream<T>` handing out boxed
//!   `Cursor<T>`s; combinators only ever see that capability set.
//! - Streams are owned through `Flow<'a, T>` and moved into stages with `|`.
//! - Synchronous and single-threaded; no filesystem access lives here.

pub mod config;
pub mod cursor;
pub mod error;
pub mod plan;
pub mod prelude;
pub mod source;
pub mod stream;

pub use config::FlowConfig;
pub use cursor::{BoxCursor, Cursor, CursorIter, EndCursor};
pub use error::{Error, Result};
pub use plan::{Footprint, StageKind};
pub use source::{as_data_flow, SequenceSource};
pub use stream::{DataStream, Flow, Stage};
