//! DropNone: unwraps a stream of `Option`s, skipping the `None`s.

use pipeflow_core::prelude::*;

#[derive(Debug, Clone, Copy, Default)]
pub struct DropNone;

pub fn drop_none() -> DropNone {
    DropNone
}

impl<'a, T> Stage<'a, Option<T>> for DropNone
where
    T: Clone + 'a,
{
    type Output = Flow<'a, T>;

    fn apply(self, flow: Flow<'a, Option<T>>) -> Flow<'a, T> {
        Flow::new(DropNoneStream { upstream: flow })
    }
}

struct DropNoneStream<'a, T> {
    upstream: Flow<'a, Option<T>>,
}

impl<'a, T: Clone + 'a> DataStream<T> for DropNoneStream<'a, T> {
    fn begin(&mut self) -> BoxCursor<'_, T> {
        let mut cursor = DropNoneCursor {
            inner: self.upstream.begin(),
            head: None,
        };
        cursor.settle();
        Box::new(cursor)
    }
}

struct DropNoneCursor<'c, T> {
    inner: BoxCursor<'c, Option<T>>,
    head: Option<T>,
}

impl<T> DropNoneCursor<'_, T> {
    fn settle(&mut self) {
        self.head = None;
        while let Some(item) = self.inner.peek() {
            if item.is_some() {
                self.head = item;
                return;
            }
            self.inner.advance();
        }
    }
}

impl<T: Clone> Cursor<T> for DropNoneCursor<'_, T> {
    fn current(&mut self) -> Result<T> {
        self.head
            .clone()
            .ok_or(Error::InvalidCursorState("drop_none cursor is at end"))
    }

    fn advance(&mut self) {
        if self.head.is_some() {
            self.inner.advance();
            self.settle();
        }
    }

    fn is_end(&self) -> bool {
        self.head.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn skips_nones() {
        let mut flow = as_data_flow(vec![None, Some(1), None, None, Some(2), None]) | drop_none();
        assert_eq!(flow.iter().collect::<Vec<_>>(), vec![1, 2]);
    }

    #[test]
    fn all_none_is_empty() {
        let mut flow = as_data_flow(vec![None::<i32>, None]) | drop_none();
        assert!(flow.begin().is_end());
    }
}
