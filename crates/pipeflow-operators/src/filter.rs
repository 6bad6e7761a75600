//! Filter stage: keeps the elements a predicate accepts.
//!
//! The cursor settles on the first accepted element as soon as it is built,
//! and again after every advance, so consumers never see a rejected value.

use pipeflow_core::prelude::*;

pub struct Filter<P> {
    predicate: P,
}

impl<P> Filter<P> {
    pub fn new(predicate: P) -> Self {
        Self { predicate }
    }
}

/// Create a stage that keeps elements for which `predicate` returns `true`.
pub fn filter<T, P>(predicate: P) -> Filter<P>
where
    P: FnMut(&T) -> bool,
{
    Filter::new(predicate)
}

impl<'a, T, P> Stage<'a, T> for Filter<P>
where
    T: Clone + 'a,
    P: FnMut(&T) -> bool + 'a,
{
    type Output = Flow<'a, T>;

    fn apply(self, flow: Flow<'a, T>) -> Flow<'a, T> {
        Flow::new(FilterStream {
            upstream: flow,
            predicate: self.predicate,
        })
    }
}

struct FilterStream<'a, T, P> {
    upstream: Flow<'a, T>,
    predicate: P,
}

impl<'a, T, P> DataStream<T> for FilterStream<'a, T, P>
where
    T: Clone + 'a,
    P: FnMut(&T) -> bool + 'a,
{
    fn begin(&mut self) -> BoxCursor<'_, T> {
        Box::new(FilterCursor::new(
            self.upstream.begin(),
            &mut self.predicate,
        ))
    }
}

struct FilterCursor<'c, T, P> {
    inner: BoxCursor<'c, T>,
    predicate: &'c mut P,
    /// Accepted value under the cursor; `None` once upstream is exhausted.
    head: Option<T>,
}

impl<'c, T, P> FilterCursor<'c, T, P>
where
    T: Clone,
    P: FnMut(&T) -> bool,
{
    fn new(inner: BoxCursor<'c, T>, predicate: &'c mut P) -> Self {
        let mut cursor = Self {
            inner,
            predicate,
            head: None,
        };
        cursor.settle();
        cursor
    }

    fn settle(&mut self) {
        self.head = None;
        while let Some(value) = self.inner.peek() {
            if (self.predicate)(&value) {
                self.head = Some(value);
                return;
            }
            self.inner.advance();
        }
    }
}

impl<T, P> Cursor<T> for FilterCursor<'_, T, P>
where
    T: Clone,
    P: FnMut(&T) -> bool,
{
    fn current(&mut self) -> Result<T> {
        self.head
            .clone()
            .ok_or(Error::InvalidCursorState("filter cursor is at end"))
    }

    fn advance(&mut self) {
        if self.head.is_none() {
            return;
        }
        self.inner.advance();
        self.settle();
    }

    fn is_end(&self) -> bool {
        self.head.is_none()
    }
}
