//! Convenient re-exports for downstream crates.

pub use crate::config::FlowConfig;
pub use crate::cursor::{BoxCursor, Cursor, CursorIter, EndCursor};
pub use crate::error::{Error, Result};
pub use crate::plan::{Footprint, StageKind};
pub use crate::source::{as_data_flow, SequenceSource};
pub use crate::stream::{DataStream, Flow, Stage};
