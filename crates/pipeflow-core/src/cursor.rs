//! The single-pass cursor contract handed out by every stream.
//!
//! A cursor rests either on a value that `current` can read or on the end of
//! its sequence. Cursors are compared only to detect exhaustion (through the
//! `is_end` flag every cursor carries), never by position.

use std::marker::PhantomData;

use crate::error::{Error, Result};

/// Owned handle to a cursor borrowing from its stream for `'a`.
pub type BoxCursor<'a, T> = Box<dyn Cursor<T> + 'a>;

pub trait Cursor<T> {
    /// Read the value under the cursor.
    ///
    /// Fails with [`Error::InvalidCursorState`] once the cursor is at end.
    /// Takes `&mut self` because cursors may memoize the value they produce
    /// (see `Transform`), so that user closures run once per element.
    fn current(&mut self) -> Result<T>;

    /// Move to the next position. A no-op at end.
    fn advance(&mut self);

    /// Whether the cursor is at or past the last element.
    fn is_end(&self) -> bool;

    /// Whether both cursors agree on being exhausted.
    fn same_exhaustion_state(&self, other: &dyn Cursor<T>) -> bool {
        self.is_end() == other.is_end()
    }

    /// The current value, or `None` at end.
    fn peek(&mut self) -> Option<T> {
        if self.is_end() {
            return None;
        }
        self.current().ok()
    }
}

impl<T, C: Cursor<T> + ?Sized> Cursor<T> for Box<C> {
    fn current(&mut self) -> Result<T> {
        (**self).current()
    }

    fn advance(&mut self) {
        (**self).advance()
    }

    fn is_end(&self) -> bool {
        (**self).is_end()
    }
}

/// The end-of-sequence position shared by every stream kind.
pub struct EndCursor<T> {
    _marker: PhantomData<fn() -> T>,
}

impl<T> EndCursor<T> {
    pub fn new() -> Self {
        Self {
            _marker: PhantomData,
        }
    }
}

impl<T> Default for EndCursor<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Cursor<T> for EndCursor<T> {
    fn current(&mut self) -> Result<T> {
        Err(Error::InvalidCursorState("dereferenced an end cursor"))
    }

    fn advance(&mut self) {}

    fn is_end(&self) -> bool {
        true
    }
}

/// Adapts a cursor to `std::iter::Iterator`.
///
/// The cursor is advanced lazily, right before the next value is read, so a
/// partially consumed iterator never pulls more from upstream than it
/// returned.
pub struct CursorIter<'a, T> {
    cursor: BoxCursor<'a, T>,
    started: bool,
}

impl<'a, T> CursorIter<'a, T> {
    pub fn new(cursor: BoxCursor<'a, T>) -> Self {
        Self {
            cursor,
            started: false,
        }
    }
}

impl<T> Iterator for CursorIter<'_, T> {
    type Item = T;

    fn next(&mut self) -> Option<T> {
        if self.started {
            self.cursor.advance();
        }
        self.started = true;
        self.cursor.peek()
    }
}
