//! Transform stage: maps every element through a function.
//!
//! The function runs when an element is dereferenced, not when the stage is
//! built. The result is memoized until the cursor advances, so a stateful
//! closure observes each consumed element exactly once.

use std::marker::PhantomData;

use pipeflow_core::prelude::*;

pub struct Transform<T, U, F> {
    f: F,
    _types: PhantomData<fn(T) -> U>,
}

impl<T, U, F> Transform<T, U, F>
where
    F: FnMut(T) -> U,
{
    pub fn new(f: F) -> Self {
        Self {
            f,
            _types: PhantomData,
        }
    }
}

/// Create a stage applying `f` to every element.
pub fn transform<T, U, F>(f: F) -> Transform<T, U, F>
where
    F: FnMut(T) -> U,
{
    Transform::new(f)
}

impl<'a, T, U, F> Stage<'a, T> for Transform<T, U, F>
where
    T: 'a,
    U: Clone + 'a,
    F: FnMut(T) -> U + 'a,
{
    type Output = Flow<'a, U>;

    fn apply(self, flow: Flow<'a, T>) -> Flow<'a, U> {
        Flow::new(TransformStream {
            upstream: flow,
            f: self.f,
            _out: PhantomData::<fn() -> U>,
        })
    }
}

struct TransformStream<'a, T, U, F> {
    upstream: Flow<'a, T>,
    f: F,
    _out: PhantomData<fn() -> U>,
}

impl<'a, T, U, F> DataStream<U> for TransformStream<'a, T, U, F>
where
    T: 'a,
    U: Clone + 'a,
    F: FnMut(T) -> U + 'a,
{
    fn begin(&mut self) -> BoxCursor<'_, U> {
        Box::new(TransformCursor {
            inner: self.upstream.begin(),
            f: &mut self.f,
            cached: None,
        })
    }
}

struct TransformCursor<'c, T, U, F> {
    inner: BoxCursor<'c, T>,
    f: &'c mut F,
    cached: Option<U>,
}

impl<T, U, F> Cursor<U> for TransformCursor<'_, T, U, F>
where
    U: Clone,
    F: FnMut(T) -> U,
{
    fn current(&mut self) -> Result<U> {
        if let Some(value) = &self.cached {
            return Ok(value.clone());
        }
        let input = self.inner.current()?;
        let output = (self.f)(input);
        self.cached = Some(output.clone());
        Ok(output)
    }

    fn advance(&mut self) {
        self.cached = None;
        self.inner.advance();
    }

    fn is_end(&self) -> bool {
        self.inner.is_end()
    }
}
