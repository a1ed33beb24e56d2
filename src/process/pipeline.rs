//! Two-pass normalization pipeline
//!
//! - Pass 1: survey the geometry records and accumulate their extent
//! - Report the extent to the diagnostic stream
//! - Pass 2 (only when a transform was requested): reopen the input and
//!   rewrite it into a freshly created output file

use std::io::{BufRead, BufWriter, Write};
use std::path::{Path, PathBuf};

use crate::asset::AssetFormat;
use crate::config::Config;
use crate::error::{Error, Result};
use crate::format::report::{write_declared_extent, write_extent_report};
use crate::geometry::{Extent, ExtentAccumulator, TransformMode, TransformParams};
use crate::parser::{LineStripReader, LineStripRecord, MeshReader, MeshRecord, TokenScanner};

use super::output::{create_output, derive_output_path, open_input};
use super::rewrite::{rewrite_line_strip, rewrite_mesh, RewriteStats};

/// Result of pass 1
#[derive(Debug, Clone, PartialEq)]
pub enum Survey {
    Mesh {
        extent: Extent<3>,
        records: usize,
        /// Lines whose leading token matched no known tag
        unknown: usize,
    },
    LineStrip {
        /// Extent of the strip vertices
        extent: Extent<2>,
        /// Figure extent as declared in the file header
        declared: Option<[f64; 4]>,
        records: usize,
    },
}

impl Survey {
    #[must_use]
    pub fn format(&self) -> AssetFormat {
        match self {
            Survey::Mesh { .. } => AssetFormat::Mesh,
            Survey::LineStrip { .. } => AssetFormat::LineStrip,
        }
    }

    /// Total number of records seen
    #[must_use]
    pub fn records(&self) -> usize {
        match self {
            Survey::Mesh { records, .. } | Survey::LineStrip { records, .. } => *records,
        }
    }

    /// Write the extent report
    ///
    /// Line-strips lead with the declared figure extent at
    /// `declared_extent_precision`; the `max`/`min` lines use `report_precision`.
    pub fn write_report<W: Write>(&self, out: &mut W, config: &Config) -> std::io::Result<()> {
        match self {
            Survey::Mesh { extent, .. } => {
                write_extent_report(out, extent, config.report_precision)
            }
            Survey::LineStrip {
                extent, declared, ..
            } => {
                if let Some(declared) = declared {
                    write_declared_extent(out, declared, config.declared_extent_precision)?;
                }
                write_extent_report(out, extent, config.report_precision)
            }
        }
    }

    /// Derive the pass-2 parameters for `mode` from the surveyed extent
    pub fn params(&self, mode: TransformMode) -> Result<Params> {
        let params = match self {
            Survey::Mesh { extent, .. } => Params::Mesh(TransformParams::derive(mode, extent)?),
            Survey::LineStrip { extent, .. } => {
                Params::LineStrip(TransformParams::derive(mode, extent)?)
            }
        };
        log::debug!("{} parameters: {params:?}", mode.name());
        Ok(params)
    }
}

/// Transform parameters in the dimension of the surveyed format
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Params {
    Mesh(TransformParams<3>),
    LineStrip(TransformParams<2>),
}

/// Pass 1 over a mesh stream
pub fn survey_mesh<R: BufRead>(mut reader: MeshReader<R>, config: &Config) -> Result<Survey> {
    let mut acc = ExtentAccumulator::<3>::new();
    let mut records = 0;
    let mut unknown = 0;

    while let Some(record) = reader.next_record()? {
        records += 1;
        match &record {
            MeshRecord::Vertex { coords, .. } => acc.observe(coords),
            MeshRecord::Passthrough { tag, line } if !tag.is_known() => {
                unknown += 1;
                if config.warn_unknown_records {
                    let text = String::from_utf8_lossy(line);
                    let token = text.split_whitespace().next().unwrap_or_default();
                    log::warn!(
                        "line {}: unknown record `{token}`, copied unchanged",
                        reader.line_number()
                    );
                }
            }
            MeshRecord::Passthrough { .. } => {}
        }
    }

    log::debug!("{} vertices observed", acc.observed());
    Ok(Survey::Mesh {
        extent: acc.finish(),
        records,
        unknown,
    })
}

/// Pass 1 over a line-strip stream
///
/// Only strip vertices feed the extent; the declared figure extent is kept
/// aside for the report.
pub fn survey_line_strip<R: BufRead>(mut reader: LineStripReader<R>) -> Result<Survey> {
    let mut acc = ExtentAccumulator::<2>::new();
    let mut declared = None;
    let mut records = 0;

    while let Some(record) = reader.next_record()? {
        records += 1;
        match record {
            LineStripRecord::Vertex(point) => acc.observe(&point),
            LineStripRecord::Extent(extent) => declared = Some(extent),
            LineStripRecord::Preamble(_)
            | LineStripRecord::StripCount(_)
            | LineStripRecord::VertexCount(_) => {}
        }
    }

    log::debug!("{} strip vertices observed", acc.observed());
    Ok(Survey::LineStrip {
        extent: acc.finish(),
        declared,
        records,
    })
}

/// Run pass 1 over `input` in the given format
pub fn survey<R: BufRead>(
    format: AssetFormat,
    input: R,
    source_name: &Path,
    config: &Config,
) -> Result<Survey> {
    let scanner = TokenScanner::new(input).named(source_name);
    match format {
        AssetFormat::Mesh => survey_mesh(MeshReader::new(scanner), config),
        AssetFormat::LineStrip => survey_line_strip(LineStripReader::new(scanner)),
    }
}

/// Run pass 2 over `input`, writing the rewritten records to `out`
pub fn rewrite<R: BufRead, W: Write>(
    params: &Params,
    input: R,
    source_name: &Path,
    out: &mut W,
    config: &Config,
    output_path: &Path,
) -> Result<RewriteStats> {
    let scanner = TokenScanner::new(input).named(source_name);
    match params {
        Params::Mesh(p) => rewrite_mesh(MeshReader::new(scanner), out, p, config, output_path),
        Params::LineStrip(p) => {
            rewrite_line_strip(LineStripReader::new(scanner), out, p, config, output_path)
        }
    }
}

/// One invocation: a single input file and an optional transform
#[derive(Debug, Clone, PartialEq)]
pub struct Job {
    pub input: PathBuf,
    pub format: AssetFormat,
    /// `None` reports the extent without writing any output
    pub mode: Option<TransformMode>,
}

/// What a finished job did
#[derive(Debug, Clone, PartialEq)]
pub struct Outcome {
    pub survey: Survey,
    pub output: Option<PathBuf>,
    pub stats: Option<RewriteStats>,
}

/// Drive both passes for `job`
///
/// The extent report goes to `diag`. A failed report write is logged and does
/// not abort the job. Parameters are derived before the output is created, so
/// an empty or degenerate extent never leaves an output file behind.
pub fn run<D: Write>(job: &Job, config: &Config, diag: &mut D) -> Result<Outcome> {
    let input = open_input(&job.input)?;
    let survey = survey(job.format, input, &job.input, config)?;
    log::debug!(
        "surveyed {} {} records in {}",
        survey.records(),
        survey.format(),
        job.input.display()
    );

    if let Err(e) = survey
        .write_report(diag, config)
        .and_then(|()| diag.flush())
    {
        log::warn!("failed to write extent report: {e}");
    }

    let Some(mode) = job.mode else {
        return Ok(Outcome {
            survey,
            output: None,
            stats: None,
        });
    };

    let params = survey.params(mode)?;
    let output_path = derive_output_path(
        &job.input,
        config.output_dir.as_deref(),
        &config.output_suffix,
    );
    let file = create_output(&output_path)?;
    log::info!("Created file {}", output_path.display());

    let input = open_input(&job.input)?;
    let mut out = BufWriter::new(file);
    let stats = rewrite(&params, input, &job.input, &mut out, config, &output_path)?;
    out.flush().map_err(|source| Error::OutputWrite {
        path: output_path.clone(),
        source,
    })?;

    Ok(Outcome {
        survey,
        output: Some(output_path),
        stats: Some(stats),
    })
}
