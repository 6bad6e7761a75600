//! Streams, the owned `Flow` handle, and stage composition.
//!
//! A `Flow` is exclusively owned: applying a stage moves it into the stage,
//! and the previous owner can no longer touch it. Composition is plain
//! function application, so `flow | a | b` is `b.apply(a.apply(flow))`.

use std::ops::BitOr;

use crate::cursor::{BoxCursor, CursorIter, EndCursor};
use crate::plan::Footprint;

/// A single-pass, pull-based sequence of `T`.
pub trait DataStream<T> {
    /// A cursor resting on the first element, or at end for empty streams.
    fn begin(&mut self) -> BoxCursor<'_, T>;

    /// The end-of-sequence position.
    fn end(&self) -> EndCursor<T> {
        EndCursor::new()
    }
}

/// Owned, type-erased stream. Every producer and combinator hands one out.
pub struct Flow<'a, T> {
    inner: Box<dyn DataStream<T> + 'a>,
}

impl<'a, T> Flow<'a, T> {
    pub fn new<S>(stream: S) -> Self
    where
        S: DataStream<T> + 'a,
    {
        Self {
            inner: Box::new(stream),
        }
    }

    pub fn begin(&mut self) -> BoxCursor<'_, T> {
        self.inner.begin()
    }

    pub fn end(&self) -> EndCursor<T> {
        self.inner.end()
    }

    /// Thread this flow through `stage`. Same as `self | stage`.
    pub fn apply<S>(self, stage: S) -> S::Output
    where
        S: Stage<'a, T>,
    {
        stage.apply(self)
    }

    /// Iterate a fresh cursor of this flow.
    pub fn iter(&mut self) -> CursorIter<'_, T> {
        CursorIter::new(self.begin())
    }

    /// Drain a fresh cursor to end, handing every element to `f` in order.
    pub fn drain<F>(&mut self, mut f: F)
    where
        F: FnMut(T),
    {
        let end = self.end();
        let mut cursor = self.begin();
        while !cursor.same_exhaustion_state(&end) {
            match cursor.current() {
                Ok(value) => f(value),
                Err(_) => break,
            }
            cursor.advance();
        }
    }

    /// Like [`Flow::drain`], stopping at the first error `f` returns.
    pub fn try_drain<F, E>(&mut self, mut f: F) -> std::result::Result<(), E>
    where
        F: FnMut(T) -> std::result::Result<(), E>,
    {
        let end = self.end();
        let mut cursor = self.begin();
        while !cursor.same_exhaustion_state(&end) {
            match cursor.current() {
                Ok(value) => f(value)?,
                Err(_) => break,
            }
            cursor.advance();
        }
        Ok(())
    }
}

impl<'b, 'a, T> IntoIterator for &'b mut Flow<'a, T> {
    type Item = T;
    type IntoIter = CursorIter<'b, T>;

    fn into_iter(self) -> CursorIter<'b, T> {
        self.iter()
    }
}

impl<'a, T> std::fmt::Debug for Flow<'a, T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Flow").finish_non_exhaustive()
    }
}

/// Something a flow can be piped into.
///
/// Combinators return a new `Flow`; sinks consume the flow and return a
/// plain value, which ends the chain.
pub trait Stage<'a, T> {
    type Output;

    fn apply(self, flow: Flow<'a, T>) -> Self::Output;

    /// Memory model of this stage. Streaming unless overridden.
    fn footprint(&self) -> Footprint {
        Footprint::streaming()
    }
}

impl<'a, T, S> BitOr<S> for Flow<'a, T>
where
    S: Stage<'a, T>,
{
    type Output = S::Output;

    fn bitor(self, stage: S) -> S::Output {
        stage.apply(self)
    }
}
