//! SplitExpected: partitions a stream of `Result`s into two streams.
//!
//! Materializing. Upstream is drained once; `Ok` values go to `expected` and
//! `Err` values to `unexpected`, each in encounter order. Nothing is dropped:
//! the two partitions together hold exactly as many elements as the input.

use pipeflow_core::plan::row_bytes;
use pipeflow_core::prelude::*;

#[derive(Debug, Clone, Copy, Default)]
pub struct SplitExpected;

pub fn split_expected() -> SplitExpected {
    SplitExpected
}

/// The two buffered partitions produced by [`SplitExpected`].
#[derive(Debug)]
pub struct Partitioned<'a, T, E> {
    pub expected: Flow<'a, T>,
    pub unexpected: Flow<'a, E>,
}

impl<'a, T, E> Partitioned<'a, T, E> {
    pub fn into_parts(self) -> (Flow<'a, T>, Flow<'a, E>) {
        (self.expected, self.unexpected)
    }
}

impl<'a, T, E> Stage<'a, std::result::Result<T, E>> for SplitExpected
where
    T: Clone + 'a,
    E: Clone + 'a,
{
    type Output = Partitioned<'a, T, E>;

    fn apply(self, mut flow: Flow<'a, std::result::Result<T, E>>) -> Partitioned<'a, T, E> {
        let mut expected = SequenceSource::default();
        let mut unexpected = SequenceSource::default();

        flow.drain(|value| match value {
            Ok(v) => expected.push(v),
            Err(e) => unexpected.push(e),
        });

        #[cfg(feature = "tracing")]
        tracing::debug!(
            expected = expected.len(),
            unexpected = unexpected.len(),
            "split_expected materialized"
        );

        Partitioned {
            expected: Flow::new(expected),
            unexpected: Flow::new(unexpected),
        }
    }

    fn footprint(&self) -> Footprint {
        Footprint::materializing(row_bytes::<std::result::Result<T, E>>(), 0)
    }
}
