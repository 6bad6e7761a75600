//! AggregateByKey: grouping aggregation in first-seen key order.
//!
//! Materializing. The whole upstream is drained once inside `apply`; the
//! output is a buffered sequence of `(key, accumulator)` pairs. Extra memory
//! is proportional to the number of distinct keys.

use std::collections::hash_map::Entry;
use std::collections::HashMap;
use std::hash::Hash;
use std::marker::PhantomData;

use pipeflow_core::plan::row_bytes;
use pipeflow_core::prelude::*;

pub struct AggregateByKey<K, Acc, A, KF> {
    initial: Acc,
    accumulate: A,
    key: KF,
    _key: PhantomData<fn() -> K>,
}

impl<K, Acc, A, KF> AggregateByKey<K, Acc, A, KF> {
    pub fn new(initial: Acc, accumulate: A, key: KF) -> Self {
        Self {
            initial,
            accumulate,
            key,
            _key: PhantomData,
        }
    }
}

/// Group elements by `key`, folding each group into a copy of `initial`
/// with `accumulate(element, &mut acc)`.
pub fn aggregate_by_key<T, K, Acc, A, KF>(
    initial: Acc,
    accumulate: A,
    key: KF,
) -> AggregateByKey<K, Acc, A, KF>
where
    A: FnMut(&T, &mut Acc),
    KF: FnMut(&T) -> K,
{
    AggregateByKey::new(initial, accumulate, key)
}

impl<'a, T, K, Acc, A, KF> Stage<'a, T> for AggregateByKey<K, Acc, A, KF>
where
    T: 'a,
    K: Eq + Hash + Clone + 'a,
    Acc: Clone + 'a,
    A: FnMut(&T, &mut Acc),
    KF: FnMut(&T) -> K,
{
    type Output = Flow<'a, (K, Acc)>;

    fn apply(self, mut flow: Flow<'a, T>) -> Flow<'a, (K, Acc)> {
        let AggregateByKey {
            initial,
            mut accumulate,
            mut key,
            ..
        } = self;

        // key -> slot in `groups`, which keeps first-seen order.
        let mut slots: HashMap<K, usize> = HashMap::new();
        let mut groups: Vec<(K, Acc)> = Vec::new();
        #[cfg(feature = "tracing")]
        let mut rows = 0usize;

        flow.drain(|value| {
            #[cfg(feature = "tracing")]
            {
                rows += 1;
            }
            let slot = match slots.entry(key(&value)) {
                Entry::Occupied(e) => *e.get(),
                Entry::Vacant(e) => {
                    groups.push((e.key().clone(), initial.clone()));
                    *e.insert(groups.len() - 1)
                }
            };
            accumulate(&value, &mut groups[slot].1);
        });

        #[cfg(feature = "tracing")]
        tracing::debug!(rows, keys = groups.len(), "aggregate_by_key materialized");

        Flow::new(SequenceSource::new(groups))
    }

    fn footprint(&self) -> Footprint {
        Footprint::materializing(
            row_bytes::<(K, Acc)>() + row_bytes::<(K, usize)>(),
            0,
        )
    }
}
