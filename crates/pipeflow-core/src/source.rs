//! In-memory sequence producer.
//!
//! Also serves as the output buffer of every materializing stage: once a
//! stage has drained its input, its result is a `SequenceSource` and its
//! cursor is a plain index.

use crate::cursor::{BoxCursor, Cursor};
use crate::error::{Error, Result};
use crate::stream::{DataStream, Flow};

/// Owns an ordered collection; hands out index cursors. Re-iterable.
#[derive(Debug, Clone)]
pub struct SequenceSource<T> {
    items: Vec<T>,
}

impl<T> SequenceSource<T> {
    pub fn new(items: Vec<T>) -> Self {
        Self { items }
    }

    pub fn push(&mut self, item: T) {
        self.items.push(item);
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn into_inner(self) -> Vec<T> {
        self.items
    }
}

impl<T> Default for SequenceSource<T> {
    fn default() -> Self {
        Self::new(Vec::new())
    }
}

impl<T> FromIterator<T> for SequenceSource<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

impl<T: Clone> DataStream<T> for SequenceSource<T> {
    fn begin(&mut self) -> BoxCursor<'_, T> {
        Box::new(SequenceCursor {
            items: &self.items,
            index: 0,
        })
    }
}

struct SequenceCursor<'c, T> {
    items: &'c [T],
    index: usize,
}

impl<T: Clone> Cursor<T> for SequenceCursor<'_, T> {
    fn current(&mut self) -> Result<T> {
        self.items
            .get(self.index)
            .cloned()
            .ok_or(Error::InvalidCursorState("sequence cursor is past the last element"))
    }

    fn advance(&mut self) {
        if self.index < self.items.len() {
            self.index += 1;
        }
    }

    fn is_end(&self) -> bool {
        self.index >= self.items.len()
    }
}

/// Wrap any collection into a flow. Always succeeds; the items are moved
/// into the stream.
pub fn as_data_flow<'a, T, I>(items: I) -> Flow<'a, T>
where
    I: IntoIterator<Item = T>,
    T: Clone + 'a,
{
    Flow::new(items.into_iter().collect::<SequenceSource<T>>())
}

impl<'a, T: Clone + 'a> From<Vec<T>> for Flow<'a, T> {
    fn from(items: Vec<T>) -> Self {
        Flow::new(SequenceSource::new(items))
    }
}
