//! Split stage: tokenizes text elements on a set of delimiter characters.
//!
//! Tokens are maximal runs of non-delimiter characters. The cursor keeps the
//! upstream element it is reading together with a byte offset into it, so a
//! single element can yield many tokens across successive advances. The end
//! of an upstream element always closes the token in progress. Empty tokens
//! are never produced.

use std::collections::HashSet;

use pipeflow_core::prelude::*;

#[derive(Debug, Clone)]
pub struct Split {
    delimiters: HashSet<char>,
}

impl Split {
    pub fn new(delimiters: &str) -> Self {
        Self {
            delimiters: delimiters.chars().collect(),
        }
    }

    pub fn delimiters(&self) -> &HashSet<char> {
        &self.delimiters
    }
}

/// Create a stage splitting text on any character of `delimiters`.
pub fn split(delimiters: &str) -> Split {
    Split::new(delimiters)
}

impl<'a, T> Stage<'a, T> for Split
where
    T: AsRef<str> + 'a,
{
    type Output = Flow<'a, String>;

    fn apply(self, flow: Flow<'a, T>) -> Flow<'a, String> {
        Flow::new(SplitStream {
            upstream: flow,
            delimiters: self.delimiters,
        })
    }
}

struct SplitStream<'a, T> {
    upstream: Flow<'a, T>,
    delimiters: HashSet<char>,
}

impl<'a, T> DataStream<String> for SplitStream<'a, T>
where
    T: AsRef<str> + 'a,
{
    fn begin(&mut self) -> BoxCursor<'_, String> {
        Box::new(SplitCursor::new(self.upstream.begin(), &self.delimiters))
    }
}

struct SplitCursor<'c, T> {
    inner: BoxCursor<'c, T>,
    delimiters: &'c HashSet<char>,
    /// Upstream element being tokenized, if any.
    chunk: Option<T>,
    /// Byte offset of the first unread character in `chunk`.
    offset: usize,
    /// Token under the cursor; empty means end.
    token: String,
}

impl<'c, T: AsRef<str>> SplitCursor<'c, T> {
    fn new(inner: BoxCursor<'c, T>, delimiters: &'c HashSet<char>) -> Self {
        let mut cursor = Self {
            inner,
            delimiters,
            chunk: None,
            offset: 0,
            token: String::new(),
        };
        cursor.fill();
        cursor
    }

    /// Read forward until a non-empty token is complete or upstream runs out.
    fn fill(&mut self) {
        self.token.clear();
        loop {
            if self.chunk.is_none() {
                match self.inner.peek() {
                    Some(chunk) => {
                        self.chunk = Some(chunk);
                        self.offset = 0;
                    }
                    None => return,
                }
            }

            if let Some(chunk) = &self.chunk {
                let text = chunk.as_ref();
                for (i, c) in text[self.offset..].char_indices() {
                    if !self.delimiters.contains(&c) {
                        self.token.push(c);
                    } else if !self.token.is_empty() {
                        self.offset += i + c.len_utf8();
                        return;
                    }
                }
            }

            self.chunk = None;
            self.inner.advance();
            if !self.token.is_empty() {
                return;
            }
        }
    }
}

impl<T: AsRef<str>> Cursor<String> for SplitCursor<'_, T> {
    fn current(&mut self) -> Result<String> {
        if self.token.is_empty() {
            return Err(Error::InvalidCursorState("split cursor is at end"));
        }
        Ok(self.token.clone())
    }

    fn advance(&mut self) {
        if !self.token.is_empty() {
            self.fill();
        }
    }

    fn is_end(&self) -> bool {
        self.token.is_empty()
    }
}
