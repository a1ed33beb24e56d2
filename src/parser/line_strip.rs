//! Line-strip (GRS) record reader
//!
//! Layout:
//! - comment preamble, any number of lines, ended by a line starting with `*`
//! - figure extent: left, top, right, bottom
//! - number of line-strips
//! - per strip: number of vertices, then that many `x y` pairs
//!
//! The numeric section is token based, so values may be spread over lines freely.

use std::io::BufRead;

use super::classify::{is_preamble_terminator, RecordKind};
use super::scanner::TokenScanner;
use crate::error::{Error, Result};

/// One record of a line-strip file
#[derive(Debug, Clone, PartialEq)]
pub enum LineStripRecord {
    /// Preamble line as read, including the terminating `*` line
    Preamble(Vec<u8>),
    /// Declared figure extent: left, top, right, bottom
    Extent([f64; 4]),
    StripCount(usize),
    VertexCount(usize),
    Vertex([f64; 2]),
}

impl LineStripRecord {
    #[must_use]
    pub fn kind(&self) -> RecordKind {
        match self {
            LineStripRecord::Extent(_) | LineStripRecord::Vertex(_) => RecordKind::Geometry,
            LineStripRecord::Preamble(_)
            | LineStripRecord::StripCount(_)
            | LineStripRecord::VertexCount(_) => RecordKind::Passthrough,
        }
    }
}

/// Where the reader is in the file layout
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    Preamble,
    Extent,
    StripCount,
    VertexCount { strips_left: usize },
    Vertices { strips_left: usize, vertices_left: usize },
    Done,
}

impl State {
    /// State after the current strip has been fully read
    fn after_strip(strips_left: usize) -> Self {
        if strips_left == 0 {
            State::Done
        } else {
            State::VertexCount { strips_left }
        }
    }
}

/// Lazy stream of [`LineStripRecord`]s
pub struct LineStripReader<R: BufRead> {
    scanner: TokenScanner<R>,
    state: State,
}

impl<R: BufRead> LineStripReader<R> {
    pub fn new(scanner: TokenScanner<R>) -> Self {
        Self {
            scanner,
            state: State::Preamble,
        }
    }

    /// Read the next record, `None` once the last strip is complete
    pub fn next_record(&mut self) -> Result<Option<LineStripRecord>> {
        let record = match self.state {
            State::Preamble => {
                if !self.scanner.advance_line()? {
                    return Err(Error::UnexpectedEnd {
                        line: self.scanner.line_number(),
                        expected: "a line starting with `*` to end the preamble",
                    });
                }
                if is_preamble_terminator(self.scanner.current_line()) {
                    self.state = State::Extent;
                }
                self.scanner.skip_line();
                LineStripRecord::Preamble(self.scanner.raw_line().to_vec())
            }
            State::Extent => {
                let left: f64 = self.scanner.next_number()?;
                let top: f64 = self.scanner.next_number()?;
                let right: f64 = self.scanner.next_number()?;
                let bottom: f64 = self.scanner.next_number()?;
                self.state = State::StripCount;
                LineStripRecord::Extent([left, top, right, bottom])
            }
            State::StripCount => {
                let strips: usize = self.scanner.next_number()?;
                self.state = State::after_strip(strips);
                LineStripRecord::StripCount(strips)
            }
            State::VertexCount { strips_left } => {
                let vertices: usize = self.scanner.next_number()?;
                let strips_left = strips_left - 1;
                self.state = if vertices == 0 {
                    State::after_strip(strips_left)
                } else {
                    State::Vertices {
                        strips_left,
                        vertices_left: vertices,
                    }
                };
                LineStripRecord::VertexCount(vertices)
            }
            State::Vertices {
                strips_left,
                vertices_left,
            } => {
                let x: f64 = self.scanner.next_number()?;
                let y: f64 = self.scanner.next_number()?;
                let vertices_left = vertices_left - 1;
                self.state = if vertices_left == 0 {
                    State::after_strip(strips_left)
                } else {
                    State::Vertices {
                        strips_left,
                        vertices_left,
                    }
                };
                LineStripRecord::Vertex([x, y])
            }
            State::Done => return Ok(None),
        };
        Ok(Some(record))
    }
}

impl<R: BufRead> Iterator for LineStripReader<R> {
    type Item = Result<LineStripRecord>;

    fn next(&mut self) -> Option<Self::Item> {
        self.next_record().transpose()
    }
}
