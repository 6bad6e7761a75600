//! File-lines producer: turns a stream of paths into a stream of lines.
//!
//! Files are opened one at a time, in path order, and read line by line with
//! the terminators stripped. A file that cannot be opened is skipped, and so
//! is an empty file. A file whose first line is blank is skipped as well
//! unless `FlowConfig::skip_blank_leading_line` is turned off. Lines are
//! decoded lossily: bytes that are not valid UTF-8 become U+FFFD and the
//! line is still produced. Only an I/O error from the reader ends a file
//! early.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use pipeflow_core::prelude::*;

/// Stage turning a path flow into a line flow.
#[derive(Debug, Clone, Default)]
pub struct OpenFiles {
    config: FlowConfig,
}

impl OpenFiles {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(cfg: &FlowConfig) -> Self {
        Self {
            config: cfg.clone(),
        }
    }
}

pub fn open_files() -> OpenFiles {
    OpenFiles::new()
}

impl<'a, P> Stage<'a, P> for OpenFiles
where
    P: AsRef<Path> + 'a,
{
    type Output = Flow<'a, String>;

    fn apply(self, flow: Flow<'a, P>) -> Flow<'a, String> {
        Flow::new(FileLinesSource::with_config(flow, &self.config))
    }
}

/// Lines of every readable file named by an upstream path flow.
pub struct FileLinesSource<'a, P> {
    paths: Flow<'a, P>,
    skip_blank_leading_line: bool,
    strip_carriage_return: bool,
}

impl<'a, P: AsRef<Path>> FileLinesSource<'a, P> {
    pub fn new(paths: Flow<'a, P>) -> Self {
        Self::with_config(paths, &FlowConfig::default())
    }

    pub fn with_config(paths: Flow<'a, P>, cfg: &FlowConfig) -> Self {
        Self {
            paths,
            skip_blank_leading_line: cfg.skip_blank_leading_line,
            strip_carriage_return: cfg.strip_carriage_return,
        }
    }
}

impl<'a, P> DataStream<String> for FileLinesSource<'a, P>
where
    P: AsRef<Path> + 'a,
{
    fn begin(&mut self) -> BoxCursor<'_, String> {
        let mut cursor = FileLinesCursor {
            paths: self.paths.begin(),
            reader: None,
            line: None,
            skip_blank_leading_line: self.skip_blank_leading_line,
            strip_carriage_return: self.strip_carriage_return,
        };
        cursor.open_next();
        Box::new(cursor)
    }
}

struct FileLinesCursor<'c, P> {
    paths: BoxCursor<'c, P>,
    /// Handle of the file being read; dropped as soon as it is exhausted.
    reader: Option<BufReader<File>>,
    line: Option<String>,
    skip_blank_leading_line: bool,
    strip_carriage_return: bool,
}

impl<P: AsRef<Path>> FileLinesCursor<'_, P> {
    /// Move to the first line of the next readable file, or to end.
    fn open_next(&mut self) {
        self.reader = None;
        self.line = None;

        while let Some(path) = self.paths.peek() {
            self.paths.advance();
            let path = path.as_ref();

            let mut reader = match File::open(path) {
                Ok(file) => BufReader::new(file),
                Err(_e) => {
                    #[cfg(feature = "tracing")]
                    tracing::trace!(path = %path.display(), error = %_e, "skipping unopenable file");
                    continue;
                }
            };

            match self.read_line(&mut reader) {
                Some(first) if !(first.is_empty() && self.skip_blank_leading_line) => {
                    self.line = Some(first);
                    self.reader = Some(reader);
                    return;
                }
                _ => {
                    #[cfg(feature = "tracing")]
                    tracing::trace!(path = %path.display(), "skipping file with no leading content");
                }
            }
        }
    }

    fn read_line(&self, reader: &mut BufReader<File>) -> Option<String> {
        let mut buf = Vec::new();
        match reader.read_until(b'\n', &mut buf) {
            Ok(0) => None,
            Ok(_) => {
                if buf.last() == Some(&b'\n') {
                    buf.pop();
                }
                if self.strip_carriage_return && buf.last() == Some(&b'\r') {
                    buf.pop();
                }
                Some(String::from_utf8_lossy(&buf).into_owned())
            }
            Err(_e) => {
                #[cfg(feature = "tracing")]
                tracing::trace!(error = %_e, "read failed, closing file");
                None
            }
        }
    }
}

impl<P: AsRef<Path>> Cursor<String> for FileLinesCursor<'_, P> {
    fn current(&mut self) -> Result<String> {
        self.line
            .clone()
            .ok_or(Error::InvalidCursorState("file lines cursor is at end"))
    }

    fn advance(&mut self) {
        if self.line.is_none() {
            return;
        }
        let next = match self.reader.take() {
            Some(mut reader) => {
                let line = self.read_line(&mut reader);
                if line.is_some() {
                    self.reader = Some(reader);
                }
                line
            }
            None => None,
        };
        match next {
            Some(line) => self.line = Some(line),
            None => self.open_next(),
        }
    }

    fn is_end(&self) -> bool {
        self.line.is_none()
    }
}
