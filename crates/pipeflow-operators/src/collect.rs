//! Collecting sinks: `AsVector` and `ForEach`.

use pipeflow_core::plan::row_bytes;
use pipeflow_core::prelude::*;

/// Drains a flow into a `Vec`, preserving order.
#[derive(Debug, Clone, Copy, Default)]
pub struct AsVector;

pub fn as_vector() -> AsVector {
    AsVector
}

impl<'a, T> Stage<'a, T> for AsVector {
    type Output = Vec<T>;

    fn apply(self, mut flow: Flow<'a, T>) -> Vec<T> {
        let mut out = Vec::new();
        flow.drain(|value| out.push(value));
        out
    }

    fn footprint(&self) -> Footprint {
        Footprint::terminal(row_bytes::<T>())
    }
}

/// Hands every element to a closure, in order.
pub struct ForEach<F> {
    f: F,
}

pub fn for_each<T, F>(f: F) -> ForEach<F>
where
    F: FnMut(T),
{
    ForEach { f }
}

impl<'a, T, F> Stage<'a, T> for ForEach<F>
where
    F: FnMut(T),
{
    type Output = ();

    fn apply(self, mut flow: Flow<'a, T>) {
        flow.drain(self.f);
    }

    fn footprint(&self) -> Footprint {
        Footprint::terminal(0)
    }
}
