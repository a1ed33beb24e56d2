/// `TokenScanner` - Whitespace tokenizer with line-level access
///
/// This module handles:
/// - Splitting input into whitespace-delimited tokens, lazily
/// - Exposing the current physical line for verbatim passthrough
/// - Parsing demanded numeric fields, reporting `MalformedNumber` on failure
///
/// Lines are read as bytes. Tokens come from a lossy UTF-8 view of the line,
/// while the raw bytes stay available so passthrough lines survive any encoding.
/// End of stream is reported as `None`/`false`, never as an error.
use std::io::{BufRead, BufReader};
use std::path::PathBuf;
use std::str::FromStr;

use crate::error::{Error, Result};

/// Token reported when a number is demanded but the stream has run dry
const END_OF_INPUT: &str = "<end of input>";

/// `TokenScanner` reads tokens and lines from a buffered reader
pub struct TokenScanner<R: BufRead> {
    reader: R,
    /// Name used in read-error diagnostics
    source_name: PathBuf,
    /// Current physical line as read, terminator stripped
    raw: Vec<u8>,
    /// Lossy UTF-8 view of `raw` used for tokenizing
    line: String,
    /// Byte offset of the next unread character in `line`
    cursor: usize,
    line_number: usize,
    exhausted: bool,
}

impl<R: BufRead> TokenScanner<R> {
    /// Create a new `TokenScanner`
    ///
    /// # Arguments
    /// * `reader` - The underlying reader
    pub fn new(reader: R) -> Self {
        Self {
            reader,
            source_name: PathBuf::from("<input>"),
            raw: Vec::new(),
            line: String::new(),
            cursor: 0,
            line_number: 0,
            exhausted: false,
        }
    }

    /// Name the source so read errors point at the right file
    #[must_use]
    pub fn named(mut self, source_name: impl Into<PathBuf>) -> Self {
        self.source_name = source_name.into();
        self
    }

    /// Get the current (1-based) physical line number, 0 before the first read
    pub fn line_number(&self) -> usize {
        self.line_number
    }

    /// Load the next physical line
    ///
    /// Returns `Ok(false)` at end of stream
    pub fn advance_line(&mut self) -> Result<bool> {
        if self.exhausted {
            return Ok(false);
        }
        self.raw.clear();
        self.line.clear();
        self.cursor = 0;
        let read = self
            .reader
            .read_until(b'\n', &mut self.raw)
            .map_err(|e| Error::read(&self.source_name, e))?;
        if read == 0 {
            self.exhausted = true;
            return Ok(false);
        }
        self.line_number += 1;
        if self.raw.ends_with(b"\n") {
            self.raw.pop();
            if self.raw.ends_with(b"\r") {
                self.raw.pop();
            }
        }
        self.line.push_str(&String::from_utf8_lossy(&self.raw));
        Ok(true)
    }

    /// The whole current line, without its terminator
    ///
    /// Invalid UTF-8 sequences show up as U+FFFD here; use
    /// [`raw_line`](Self::raw_line) for the bytes as read.
    pub fn current_line(&self) -> &str {
        &self.line
    }

    /// The bytes of the current line exactly as read, without its terminator
    pub fn raw_line(&self) -> &[u8] {
        &self.raw
    }

    /// Mark the rest of the current line as consumed
    pub fn skip_line(&mut self) {
        self.cursor = self.line.len();
    }

    /// Next token of the current line, `None` once the line is used up
    pub fn next_token_in_line(&mut self) -> Option<&str> {
        let rest = &self.line[self.cursor..];
        let start = self.cursor + (rest.len() - rest.trim_start().len());
        if start == self.line.len() {
            self.cursor = start;
            return None;
        }
        let len = self.line[start..]
            .find(char::is_whitespace)
            .unwrap_or(self.line.len() - start);
        self.cursor = start + len;
        Some(&self.line[start..self.cursor])
    }

    /// Consume and return the raw remainder of the current line
    pub fn rest_of_line(&mut self) -> &str {
        let start = self.cursor;
        self.cursor = self.line.len();
        &self.line[start..]
    }

    /// Next token, crossing line boundaries
    ///
    /// Returns `Ok(None)` at end of stream
    pub fn next_token(&mut self) -> Result<Option<String>> {
        loop {
            if let Some(token) = self.next_token_in_line() {
                return Ok(Some(token.to_string()));
            }
            if !self.advance_line()? {
                return Ok(None);
            }
        }
    }

    /// Parse the next token (crossing lines) as a number
    pub fn next_number<T: FromStr>(&mut self) -> Result<T> {
        let token = self.next_token()?;
        self.parse_number(token.as_deref())
    }

    /// Parse the next token of the current line as a number
    pub fn number_in_line<T: FromStr>(&mut self) -> Result<T> {
        let token = self.next_token_in_line().map(str::to_string);
        self.parse_number(token.as_deref())
    }

    fn parse_number<T: FromStr>(&self, token: Option<&str>) -> Result<T> {
        let token = token.unwrap_or(END_OF_INPUT);
        token.parse::<T>().map_err(|_| Error::MalformedNumber {
            line: self.line_number,
            token: token.to_string(),
        })
    }
}

/// Helper to create `TokenScanner` from a string (for testing)
impl<'a> TokenScanner<BufReader<&'a [u8]>> {
    #[must_use]
    pub fn from_string(s: &'a str) -> Self {
        let reader = BufReader::new(s.as_bytes());
        Self::new(reader)
    }
}
