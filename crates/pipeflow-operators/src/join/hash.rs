//! Hash join (build right, probe left).
//!
//! Build: drain the right flow into `key -> [right rows]`, keeping right-side
//! encounter order inside each bucket. Probe: walk the left flow lazily,
//! computing each left key once and expanding it against its bucket.

use std::collections::HashMap;
use std::hash::Hash;
use std::marker::PhantomData;

use pipeflow_core::plan::row_bytes;
use pipeflow_core::prelude::*;

use super::{JoinResult, KV};
use crate::map::Transform;

/// Join with explicit key extraction for both sides.
pub struct JoinWithKey<'a, R, K, LK, RK> {
    right: Flow<'a, R>,
    left_key: LK,
    right_key: RK,
    _key: PhantomData<fn() -> K>,
}

impl<'a, R, K, LK, RK> JoinWithKey<'a, R, K, LK, RK> {
    pub fn new(right: Flow<'a, R>, left_key: LK, right_key: RK) -> Self {
        Self {
            right,
            left_key,
            right_key,
            _key: PhantomData,
        }
    }
}

pub fn join_with_key<'a, L, R, K, LK, RK>(
    right: Flow<'a, R>,
    left_key: LK,
    right_key: RK,
) -> JoinWithKey<'a, R, K, LK, RK>
where
    LK: FnMut(&L) -> K,
    RK: FnMut(&R) -> K,
{
    JoinWithKey::new(right, left_key, right_key)
}

impl<'a, L, R, K, LK, RK> Stage<'a, L> for JoinWithKey<'a, R, K, LK, RK>
where
    L: Clone + 'a,
    R: Clone + 'a,
    K: Eq + Hash + 'a,
    LK: FnMut(&L) -> K + 'a,
    RK: FnMut(&R) -> K,
{
    type Output = Flow<'a, JoinResult<L, R>>;

    fn apply(self, left: Flow<'a, L>) -> Flow<'a, JoinResult<L, R>> {
        let JoinWithKey {
            mut right,
            left_key,
            mut right_key,
            ..
        } = self;

        let mut buckets: HashMap<K, Vec<R>> = HashMap::new();
        right.drain(|value| {
            buckets.entry(right_key(&value)).or_default().push(value);
        });

        #[cfg(feature = "tracing")]
        tracing::debug!(
            rows = buckets.values().map(Vec::len).sum::<usize>(),
            keys = buckets.len(),
            "hash join build side materialized"
        );

        Flow::new(HashJoinStream {
            left,
            buckets,
            left_key,
        })
    }

    fn footprint(&self) -> Footprint {
        Footprint::materializing(row_bytes::<R>() + row_bytes::<K>(), 0)
    }
}

struct HashJoinStream<'a, L, R, K, LK> {
    left: Flow<'a, L>,
    buckets: HashMap<K, Vec<R>>,
    left_key: LK,
}

impl<'a, L, R, K, LK> DataStream<JoinResult<L, R>> for HashJoinStream<'a, L, R, K, LK>
where
    L: Clone + 'a,
    R: Clone + 'a,
    K: Eq + Hash + 'a,
    LK: FnMut(&L) -> K + 'a,
{
    fn begin(&mut self) -> BoxCursor<'_, JoinResult<L, R>> {
        let mut cursor = HashJoinCursor {
            left: self.left.begin(),
            buckets: &self.buckets,
            left_key: &mut self.left_key,
            row: None,
            matches: Default::default(),
            index: 0,
        };
        cursor.settle();
        Box::new(cursor)
    }
}

struct HashJoinCursor<'c, L, R, K, LK> {
    left: BoxCursor<'c, L>,
    buckets: &'c HashMap<K, Vec<R>>,
    left_key: &'c mut LK,
    /// Left row under the cursor; `None` at end.
    row: Option<L>,
    /// Right rows matching `row`; empty for an unmatched row.
    matches: &'c [R],
    index: usize,
}

impl<'c, L, R, K, LK> HashJoinCursor<'c, L, R, K, LK>
where
    K: Eq + Hash,
    LK: FnMut(&L) -> K,
{
    fn settle(&mut self) {
        let buckets: &'c HashMap<K, Vec<R>> = self.buckets;
        self.index = 0;
        self.row = self.left.peek();
        self.matches = match &self.row {
            Some(row) => buckets
                .get(&(self.left_key)(row))
                .map(Vec::as_slice)
                .unwrap_or_default(),
            None => Default::default(),
        };
    }
}

impl<L, R, K, LK> Cursor<JoinResult<L, R>> for HashJoinCursor<'_, L, R, K, LK>
where
    L: Clone,
    R: Clone,
    K: Eq + Hash,
    LK: FnMut(&L) -> K,
{
    fn current(&mut self) -> Result<JoinResult<L, R>> {
        let left_value = self
            .row
            .clone()
            .ok_or(Error::InvalidCursorState("join cursor is at end"))?;
        Ok(JoinResult::new(
            left_value,
            self.matches.get(self.index).cloned(),
        ))
    }

    fn advance(&mut self) {
        if self.row.is_none() {
            return;
        }
        if self.index + 1 < self.matches.len() {
            self.index += 1;
            return;
        }
        self.left.advance();
        self.settle();
    }

    fn is_end(&self) -> bool {
        self.row.is_none()
    }
}

/// Join over key/value records, matching on `KV::key` and yielding the
/// values of both sides.
pub struct Join<'a, K, VR> {
    right: Flow<'a, KV<K, VR>>,
}

impl<'a, K, VR> Join<'a, K, VR> {
    pub fn new(right: Flow<'a, KV<K, VR>>) -> Self {
        Self { right }
    }
}

pub fn join<'a, K, VR>(right: Flow<'a, KV<K, VR>>) -> Join<'a, K, VR> {
    Join::new(right)
}

impl<'a, K, VL, VR> Stage<'a, KV<K, VL>> for Join<'a, K, VR>
where
    K: Eq + Hash + Clone + 'a,
    VL: Clone + 'a,
    VR: Clone + 'a,
{
    type Output = Flow<'a, JoinResult<VL, VR>>;

    fn apply(self, left: Flow<'a, KV<K, VL>>) -> Flow<'a, JoinResult<VL, VR>> {
        let keyed = left
            | JoinWithKey::new(
                self.right,
                |l: &KV<K, VL>| l.key.clone(),
                |r: &KV<K, VR>| r.key.clone(),
            );
        keyed
            | Transform::new(|row: JoinResult<KV<K, VL>, KV<K, VR>>| {
                JoinResult::new(row.left_value.value, row.right_value.map(|kv| kv.value))
            })
    }

    fn footprint(&self) -> Footprint {
        Footprint::materializing(row_bytes::<KV<K, VR>>() + row_bytes::<K>(), 0)
    }
}
