//! Pass 2: re-emit every record, transforming geometry and copying the rest
//!
//! Each input record produces exactly one output line, in input order.

use std::io::{BufRead, Write};
use std::path::Path;

use crate::config::Config;
use crate::error::{Error, Result};
use crate::format::number::fixed_fields;
use crate::geometry::TransformParams;
use crate::parser::{LineStripReader, LineStripRecord, MeshReader, MeshRecord, RecordKind};

/// Indent in front of each rewritten line-strip vertex
const LINE_STRIP_VERTEX_INDENT: &str = "  ";

/// Counts of records written in pass 2
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RewriteStats {
    pub records: usize,
    pub geometry: usize,
    pub passthrough: usize,
}

impl RewriteStats {
    fn count(&mut self, kind: RecordKind) {
        self.records += 1;
        match kind {
            RecordKind::Geometry => self.geometry += 1,
            RecordKind::Passthrough => self.passthrough += 1,
        }
    }
}

/// Line writer that attaches the output path to write failures
struct LineSink<'a, W: Write> {
    out: &'a mut W,
    path: &'a Path,
}

impl<W: Write> LineSink<'_, W> {
    fn line(&mut self, text: &str) -> Result<()> {
        self.raw(text.as_bytes())
    }

    fn raw(&mut self, bytes: &[u8]) -> Result<()> {
        self.out
            .write_all(bytes)
            .and_then(|()| self.out.write_all(b"\n"))
            .map_err(|source| self.error(source))
    }

    fn flush(&mut self) -> Result<()> {
        self.out.flush().map_err(|source| self.error(source))
    }

    fn error(&self, source: std::io::Error) -> Error {
        Error::OutputWrite {
            path: self.path.to_path_buf(),
            source,
        }
    }
}

/// Rewrite a mesh stream
///
/// Vertices become `v x  y  z` at the configured precision, followed by any
/// trailing fields. Every other line is copied byte for byte.
pub fn rewrite_mesh<R: BufRead, W: Write>(
    mut reader: MeshReader<R>,
    out: &mut W,
    params: &TransformParams<3>,
    config: &Config,
    output_path: &Path,
) -> Result<RewriteStats> {
    let mut sink = LineSink {
        out,
        path: output_path,
    };
    let mut stats = RewriteStats::default();

    while let Some(record) = reader.next_record()? {
        stats.count(record.kind());
        match record {
            MeshRecord::Vertex { coords, trailing } => {
                let mut line = format!(
                    "v {}",
                    fixed_fields(&params.apply(coords), config.mesh_precision)
                );
                if !trailing.is_empty() {
                    line.push_str("  ");
                    line.push_str(&trailing);
                }
                sink.line(&line)?;
            }
            MeshRecord::Passthrough { line, .. } => sink.raw(&line)?,
        }
    }

    sink.flush()?;
    Ok(stats)
}

/// Rewrite a line-strip stream
///
/// The declared extent is transformed as two corner points, (left, top) and
/// (right, bottom). Counts are written back as plain integers.
pub fn rewrite_line_strip<R: BufRead, W: Write>(
    mut reader: LineStripReader<R>,
    out: &mut W,
    params: &TransformParams<2>,
    config: &Config,
    output_path: &Path,
) -> Result<RewriteStats> {
    let mut sink = LineSink {
        out,
        path: output_path,
    };
    let mut stats = RewriteStats::default();

    while let Some(record) = reader.next_record()? {
        stats.count(record.kind());
        match record {
            LineStripRecord::Preamble(line) => sink.raw(&line)?,
            LineStripRecord::Extent([left, top, right, bottom]) => {
                let [l, t] = params.apply([left, top]);
                let [r, b] = params.apply([right, bottom]);
                sink.line(&fixed_fields(
                    &[l, t, r, b],
                    config.line_strip_extent_precision,
                ))?;
            }
            LineStripRecord::StripCount(n) | LineStripRecord::VertexCount(n) => {
                sink.line(&n.to_string())?;
            }
            LineStripRecord::Vertex(point) => {
                let fields = fixed_fields(&params.apply(point), config.line_strip_precision);
                sink.line(&format!("{LINE_STRIP_VERTEX_INDENT}{fields}"))?;
            }
        }
    }

    sink.flush()?;
    Ok(stats)
}
