//! Joins: hash join with a materialized build side.
//!
//! The right-hand flow is drained into buckets when the stage is applied;
//! the left-hand flow stays a lazy, streaming pass. Semantics are a
//! left-outer, one-to-many expansion: every left row produces one output row
//! per matching right row, or a single row with no right value.

pub mod hash;

use serde::{Deserialize, Serialize};

pub use hash::{join, join_with_key, Join, JoinWithKey};

/// Key/value record, the natural input shape of [`Join`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct KV<K, V> {
    pub key: K,
    pub value: V,
}

impl<K, V> KV<K, V> {
    pub fn new(key: K, value: V) -> Self {
        Self { key, value }
    }
}

/// One joined row. `right_value` is `None` when the left row had no match.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JoinResult<L, R> {
    pub left_value: L,
    pub right_value: Option<R>,
}

impl<L, R> JoinResult<L, R> {
    pub fn new(left_value: L, right_value: Option<R>) -> Self {
        Self {
            left_value,
            right_value,
        }
    }

    pub fn is_matched(&self) -> bool {
        self.right_value.is_some()
    }
}
