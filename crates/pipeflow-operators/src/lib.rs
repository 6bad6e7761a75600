#![forbid(unsafe_code)]
//! pipeflow-operators: combinators (filter/transform/split/aggregate/join)
//! and the collecting sinks.
//!
//! Design intent:
//! - Streaming stages (`Filter`, `Transform`, `Split`, `DropNone`) pull
//!   upstream on demand and never buffer more than one element or token.
//! - Materializing stages (`AggregateByKey`, `SplitExpected`, the build side
//!   of `Join`/`JoinWithKey`) drain their input inside `apply`; each reports
//!   its `Footprint` so the cost is visible before it is paid.
//! - User closures may carry state. They run exactly once per consumed
//!   element, in stream order.

pub mod aggregate;
pub mod collect;
pub mod drop_none;
pub mod filter;
pub mod join;
pub mod map;
pub mod split;
pub mod split_expected;

pub use aggregate::{aggregate_by_key, AggregateByKey};
pub use collect::{as_vector, for_each, AsVector, ForEach};
pub use drop_none::{drop_none, DropNone};
pub use filter::{filter, Filter};
pub use join::{join, join_with_key, Join, JoinResult, JoinWithKey, KV};
pub use map::{transform, Transform};
pub use split::{split, Split};
pub use split_expected::{split_expected, Partitioned, SplitExpected};
