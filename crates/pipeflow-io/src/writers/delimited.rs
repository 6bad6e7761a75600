//! Delimited text writers.
//!
//! Every element is written with its `Display` form followed by the
//! delimiter, including the last one. The writer is flushed once the flow is
//! drained.

use std::fmt::Display;
use std::io;

use pipeflow_core::prelude::*;

/// Writes `element delimiter` for every element.
pub struct WriteDelimited<'w, W: ?Sized> {
    out: &'w mut W,
    delimiter: char,
}

impl<'w, W: io::Write + ?Sized> WriteDelimited<'w, W> {
    pub fn new(out: &'w mut W, delimiter: char) -> Self {
        Self { out, delimiter }
    }
}

pub fn write<W: io::Write + ?Sized>(out: &mut W, delimiter: char) -> WriteDelimited<'_, W> {
    WriteDelimited::new(out, delimiter)
}

impl<'a, 'w, T, W> Stage<'a, T> for WriteDelimited<'w, W>
where
    T: Display,
    W: io::Write + ?Sized,
{
    type Output = Result<()>;

    fn apply(self, mut flow: Flow<'a, T>) -> Result<()> {
        let WriteDelimited { out, delimiter } = self;
        flow.try_drain(|value| -> Result<()> {
            write!(out, "{value}{delimiter}")?;
            Ok(())
        })?;
        out.flush()?;
        Ok(())
    }

    fn footprint(&self) -> Footprint {
        Footprint::terminal(0)
    }
}

/// Writes every element on its own line.
pub struct Out<'w, W: ?Sized> {
    inner: WriteDelimited<'w, W>,
}

pub fn out<W: io::Write + ?Sized>(out: &mut W) -> Out<'_, W> {
    Out {
        inner: WriteDelimited::new(out, '\n'),
    }
}

impl<'a, 'w, T, W> Stage<'a, T> for Out<'w, W>
where
    T: Display,
    W: io::Write + ?Sized,
{
    type Output = Result<()>;

    fn apply(self, flow: Flow<'a, T>) -> Result<()> {
        self.inner.apply(flow)
    }

    fn footprint(&self) -> Footprint {
        Footprint::terminal(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn delimiter_follows_every_element() {
        let mut buf: Vec<u8> = Vec::new();
        (as_data_flow(vec![1, 2]) | write(&mut buf, ',')).unwrap();
        assert_eq!(String::from_utf8(buf).unwrap(), "1,2,");
    }

    #[test]
    fn empty_flow_writes_nothing() {
        let mut buf: Vec<u8> = Vec::new();
        (as_data_flow(Vec::<String>::new()) | write(&mut buf, ';')).unwrap();
        assert!(buf.is_empty());
    }

    #[test]
    fn out_is_newline_terminated() {
        let mut buf: Vec<u8> = Vec::new();
        (as_data_flow(vec!["a", "b"]) | out(&mut buf)).unwrap();
        assert_eq!(String::from_utf8(buf).unwrap(), "a\nb\n");
    }

    struct Broken;

    impl io::Write for Broken {
        fn write(&mut self, _: &[u8]) -> io::Result<usize> {
            Err(io::Error::new(io::ErrorKind::BrokenPipe, "closed"))
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn io_errors_surface() {
        let err = (as_data_flow(vec![1]) | write(&mut Broken, ',')).unwrap_err();
        assert!(matches!(err, Error::Io(_)));
    }
}
