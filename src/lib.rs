#![forbid(unsafe_code)]
//! pipeflow: composable, lazily evaluated data pipelines.
//!
//! ```no_run
//! use pipeflow::prelude::*;
//!
//! let squares = as_data_flow(vec![1, 2, 3, 4, 5, 6, 7, 8])
//!     | filter(|x: &i32| x % 2 == 0)
//!     | transform(|x: i32| x * x)
//!     | as_vector();
//! assert_eq!(squares, vec![4, 16, 36, 64]);
//!
//! let lines = dir("logs", true)? | open_files() | split("\n") | as_vector();
//! # let _ = lines;
//! # Ok::<(), pipeflow::Error>(())
//! ```
//!
//! Producers live in [`pipeflow_core`] (in-memory sequences) and
//! [`pipeflow_io`] (directory trees, file lines); combinators and collecting
//! sinks in [`pipeflow_operators`]; writer sinks in [`pipeflow_io`].

pub use pipeflow_core;
pub use pipeflow_io;
pub use pipeflow_operators;

pub use pipeflow_core::{
    as_data_flow, BoxCursor, Cursor, CursorIter, DataStream, EndCursor, Error, Flow, FlowConfig,
    Footprint, Result, SequenceSource, Stage, StageKind,
};
pub use pipeflow_io::{
    dir, dir_with_config, open_files, out, write, FileLinesSource, OpenFiles, Out,
    PathTreeSource, WriteDelimited,
};
pub use pipeflow_operators::{
    aggregate_by_key, as_vector, drop_none, filter, for_each, join, join_with_key, split,
    split_expected, transform, AggregateByKey, AsVector, DropNone, Filter, ForEach, Join,
    JoinResult, JoinWithKey, Partitioned, Split, SplitExpected, Transform, KV,
};

pub mod prelude {
    //! Everything needed to build and run a pipeline.

    pub use pipeflow_core::prelude::*;
    pub use pipeflow_io::{dir, dir_with_config, open_files, out, write, OpenFiles};
    pub use pipeflow_operators::{
        aggregate_by_key, as_vector, drop_none, filter, for_each, join, join_with_key, split,
        split_expected, transform, JoinResult, Partitioned, KV,
    };
}
