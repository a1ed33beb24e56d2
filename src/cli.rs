//! Command-line interface for geonorm.
//!
//! Defines CLI arguments using clap builder API

use std::path::PathBuf;

use clap::{Arg, ArgAction, Command};

use crate::asset::AssetFormat;
use crate::error::{Error, Result};
use crate::geometry::TransformMode;
use crate::process::Job;

/// Subcommand selected on the command line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    /// Report extents, optionally scale or translate
    Transform,
    /// Center on the origin and fit into [-1, 1]
    Unitize,
}

/// Explicit `--mode` override for the transform subcommand
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModeArg {
    Scale,
    Translate,
}

/// CLI arguments parsed from command line
#[derive(Debug, Clone)]
pub struct CliArgs {
    pub operation: Operation,

    /// Mesh or line-strip file to read
    pub input: PathBuf,

    /// Positional numbers after the input (scale factor or offsets)
    pub values: Vec<f64>,

    /// Explicit input format (otherwise inferred from the extension)
    pub format: Option<AssetFormat>,

    /// Override of the per-format default transform mode
    pub mode: Option<ModeArg>,

    /// Directory the output file is created in
    pub output_dir: Option<PathBuf>,

    /// Text inserted between stem and extension of the output name
    pub suffix: Option<String>,

    /// Config file path
    pub config: Option<PathBuf>,

    /// Enable debug output
    pub debug: bool,

    /// Silent mode (errors only, no extent report)
    pub silent: bool,
}

fn input_arg() -> Arg {
    Arg::new("input")
        .help("Mesh (.obj) or line-strip (.grs) file")
        .value_name("FILE")
        .required(true)
        .value_parser(clap::value_parser!(PathBuf))
}

/// Build the clap Command for parsing CLI arguments
#[must_use]
pub fn build_cli() -> Command {
    Command::new("geonorm")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Scale, translate or unitize mesh and line-strip geometry files")
        .subcommand_required(true)
        .arg_required_else_help(true)
        .subcommand(
            Command::new("transform")
                .about("Report extents; with values, scale or translate into <stem>_.<ext>")
                .arg(input_arg())
                .arg(
                    Arg::new("values")
                        .help("Scale factor (mesh default) or x [y [z]] offsets (line-strip default)")
                        .value_name("VALUE")
                        .num_args(0..=3)
                        .allow_negative_numbers(true)
                        .value_parser(clap::value_parser!(f64)),
                )
                .arg(
                    Arg::new("mode")
                        .short('m')
                        .long("mode")
                        .help("Override the default mode for the input format")
                        .value_name("MODE")
                        .value_parser(["scale", "translate"]),
                ),
        )
        .subcommand(
            Command::new("unitize")
                .about("Center the geometry on the origin and fit its longest axis to [-1, 1]")
                .arg(input_arg()),
        )
        .arg(
            Arg::new("format")
                .short('f')
                .long("format")
                .help("Input format: mesh or line-strip [default: from extension]")
                .value_name("FORMAT")
                .global(true)
                .value_parser(|s: &str| s.parse::<AssetFormat>()),
        )
        .arg(
            Arg::new("output-dir")
                .short('o')
                .long("output-dir")
                .help("Directory the output file is created in [default: current directory]")
                .value_name("DIR")
                .global(true)
                .value_parser(clap::value_parser!(PathBuf)),
        )
        .arg(
            Arg::new("suffix")
                .long("suffix")
                .help("Text inserted before the output file's extension [default: _]")
                .value_name("TEXT")
                .global(true),
        )
        .arg(
            Arg::new("config")
                .short('c')
                .long("config")
                .help("Path to configuration file (overrides auto-discovery)")
                .value_name("FILE")
                .global(true)
                .value_parser(clap::value_parser!(PathBuf)),
        )
        .arg(
            Arg::new("debug")
                .short('D')
                .long("debug")
                .help("Enable debug output (shows config and derived parameters)")
                .global(true)
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("silent")
                .short('S')
                .long("silent")
                .help("Silent mode (errors only, no extent report)")
                .global(true)
                .action(ArgAction::SetTrue),
        )
}

/// Parse CLI arguments from command line
#[must_use]
pub fn parse_args() -> CliArgs {
    args_from_matches(&build_cli().get_matches())
}

/// Parse CLI arguments from an iterator (for testing)
#[must_use]
pub fn parse_args_from<I, T>(args: I) -> CliArgs
where
    I: IntoIterator<Item = T>,
    T: Into<std::ffi::OsString> + Clone,
{
    args_from_matches(&build_cli().get_matches_from(args))
}

/// Convert clap `ArgMatches` to `CliArgs`
fn args_from_matches(matches: &clap::ArgMatches) -> CliArgs {
    let (operation, sub) = match matches.subcommand() {
        Some(("unitize", sub)) => (Operation::Unitize, sub),
        Some((_, sub)) => (Operation::Transform, sub),
        // subcommand_required guarantees a subcommand
        None => (Operation::Transform, matches),
    };

    let mode = sub
        .try_get_one::<String>("mode")
        .ok()
        .flatten()
        .map(|m| match m.as_str() {
            "scale" => ModeArg::Scale,
            _ => ModeArg::Translate,
        });

    CliArgs {
        operation,
        input: sub
            .try_get_one::<PathBuf>("input")
            .ok()
            .flatten()
            .cloned()
            .unwrap_or_default(),
        values: sub
            .try_get_many::<f64>("values")
            .ok()
            .flatten()
            .map(|vals| vals.copied().collect())
            .unwrap_or_default(),
        format: sub.get_one::<AssetFormat>("format").copied(),
        mode,
        output_dir: sub.get_one::<PathBuf>("output-dir").cloned(),
        suffix: sub.get_one::<String>("suffix").cloned(),
        config: sub.get_one::<PathBuf>("config").cloned(),
        debug: sub.get_flag("debug"),
        silent: sub.get_flag("silent"),
    }
}

impl CliArgs {
    /// Explicit `--format`, else the format implied by the input's extension
    pub fn resolve_format(&self) -> Result<AssetFormat> {
        self.format
            .or_else(|| AssetFormat::from_path(&self.input))
            .ok_or_else(|| {
                Error::InvalidArguments(format!(
                    "cannot tell the format of {}; use --format mesh|line-strip",
                    self.input.display()
                ))
            })
    }

    /// Map the subcommand, `--mode` and positional values onto a transform
    ///
    /// `None` means report only. Without `--mode`, a mesh takes one scale
    /// factor and a line-strip takes x and optional y offsets.
    pub fn transform_mode(&self, format: AssetFormat) -> Result<Option<TransformMode>> {
        if self.operation == Operation::Unitize {
            return Ok(Some(TransformMode::Unitize));
        }
        if self.values.is_empty() {
            if let Some(mode) = self.mode {
                return Err(Error::InvalidArguments(format!(
                    "--mode {} needs at least one value",
                    mode.name()
                )));
            }
            return Ok(None);
        }

        let mode = self.mode.unwrap_or(match format {
            AssetFormat::Mesh => ModeArg::Scale,
            AssetFormat::LineStrip => ModeArg::Translate,
        });
        match mode {
            ModeArg::Scale => match *self.values.as_slice() {
                [factor] if factor.is_finite() && factor > 0.0 => {
                    Ok(Some(TransformMode::Scale(factor)))
                }
                [factor] => Err(Error::InvalidArguments(format!(
                    "scale factor must be finite and greater than 0, got {factor}"
                ))),
                _ => Err(Error::InvalidArguments(format!(
                    "scale takes exactly one factor, got {} values",
                    self.values.len()
                ))),
            },
            ModeArg::Translate => {
                let axes = format.dimension();
                if self.values.len() > axes {
                    return Err(Error::InvalidArguments(format!(
                        "translate takes at most {axes} offsets for a {format} file, got {}",
                        self.values.len()
                    )));
                }
                if let Some(bad) = self.values.iter().find(|v| !v.is_finite()) {
                    return Err(Error::InvalidArguments(format!(
                        "translate offsets must be finite, got {bad}"
                    )));
                }
                let mut offsets = [0.0; 3];
                offsets[..self.values.len()].copy_from_slice(&self.values);
                Ok(Some(TransformMode::Translate(offsets)))
            }
        }
    }

    /// Resolve the arguments into a [`Job`]
    pub fn job(&self) -> Result<Job> {
        let format = self.resolve_format()?;
        Ok(Job {
            input: self.input.clone(),
            format,
            mode: self.transform_mode(format)?,
        })
    }
}

impl ModeArg {
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            ModeArg::Scale => "scale",
            ModeArg::Translate => "translate",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_builds() {
        let cmd = build_cli();
        // Just verify it builds without panic
        assert_eq!(cmd.get_name(), "geonorm");
        cmd.debug_assert();
    }

    #[test]
    fn test_subcommand_required() {
        assert!(build_cli().try_get_matches_from(vec!["geonorm"]).is_err());
    }

    #[test]
    fn test_report_only() {
        let args = parse_args_from(vec!["geonorm", "transform", "cube.obj"]);
        assert_eq!(args.operation, Operation::Transform);
        assert!(args.values.is_empty());
        let job = args.job().unwrap();
        assert_eq!(job.format, AssetFormat::Mesh);
        assert_eq!(job.mode, None);
    }

    #[test]
    fn test_mesh_default_scale() {
        let args = parse_args_from(vec!["geonorm", "transform", "cube.obj", "2.5"]);
        assert_eq!(args.job().unwrap().mode, Some(TransformMode::Scale(2.5)));
    }

    #[test]
    fn test_line_strip_default_translate_with_negatives() {
        let args = parse_args_from(vec!["geonorm", "transform", "dino.grs", "5", "-5"]);
        assert_eq!(args.values, vec![5.0, -5.0]);
        assert_eq!(
            args.job().unwrap().mode,
            Some(TransformMode::Translate([5.0, -5.0, 0.0]))
        );
    }

    #[test]
    fn test_line_strip_x_only() {
        let args = parse_args_from(vec!["geonorm", "transform", "dino.grs", "-3"]);
        assert_eq!(
            args.job().unwrap().mode,
            Some(TransformMode::Translate([-3.0, 0.0, 0.0]))
        );
    }

    #[test]
    fn test_mesh_translate_override() {
        let args = parse_args_from(vec![
            "geonorm", "transform", "--mode", "translate", "cube.obj", "1", "2", "3",
        ]);
        assert_eq!(args.mode, Some(ModeArg::Translate));
        assert_eq!(
            args.job().unwrap().mode,
            Some(TransformMode::Translate([1.0, 2.0, 3.0]))
        );
    }

    #[test]
    fn test_line_strip_scale_override() {
        let args = parse_args_from(vec!["geonorm", "transform", "-m", "scale", "dino.grs", "3"]);
        assert_eq!(args.job().unwrap().mode, Some(TransformMode::Scale(3.0)));
    }

    #[test]
    fn test_wrong_arity() {
        let args = parse_args_from(vec!["geonorm", "transform", "cube.obj", "1", "2"]);
        assert!(matches!(args.job(), Err(Error::InvalidArguments(_))));

        let args = parse_args_from(vec!["geonorm", "transform", "dino.grs", "1", "2", "3"]);
        assert!(matches!(args.job(), Err(Error::InvalidArguments(_))));

        let args = parse_args_from(vec!["geonorm", "transform", "--mode", "scale", "cube.obj"]);
        assert!(matches!(args.job(), Err(Error::InvalidArguments(_))));
    }

    #[test]
    fn test_scale_factor_must_be_positive_and_finite() {
        for factor in ["0", "-2", "nan", "inf"] {
            let args = parse_args_from(vec!["geonorm", "transform", "cube.obj", factor]);
            match args.job() {
                Err(Error::InvalidArguments(msg)) => {
                    assert!(msg.contains("scale factor"), "{factor}: {msg}");
                }
                other => panic!("{factor}: expected InvalidArguments, got {other:?}"),
            }
        }

        let args = parse_args_from(vec!["geonorm", "transform", "-m", "scale", "dino.grs", "0"]);
        assert!(matches!(args.job(), Err(Error::InvalidArguments(_))));
    }

    #[test]
    fn test_translate_offsets_must_be_finite() {
        let args = parse_args_from(vec!["geonorm", "transform", "dino.grs", "1", "nan"]);
        assert!(matches!(args.job(), Err(Error::InvalidArguments(_))));

        let args = parse_args_from(vec![
            "geonorm", "transform", "-m", "translate", "cube.obj", "0", "inf",
        ]);
        assert!(matches!(args.job(), Err(Error::InvalidArguments(_))));
    }

    #[test]
    fn test_bad_factor_rejected_before_input_is_opened() {
        // the input does not exist; the argument error still wins
        let args = parse_args_from(vec!["geonorm", "transform", "/no/such/dir/cube.obj", "0"]);
        let err = args.job().unwrap_err();
        assert_eq!(err.kind(), crate::error::ErrorKind::InvalidArguments);
    }

    #[test]
    fn test_too_many_values_is_usage_error() {
        let result = build_cli().try_get_matches_from(vec![
            "geonorm", "transform", "cube.obj", "1", "2", "3", "4",
        ]);
        assert!(result.is_err());
    }

    #[test]
    fn test_unitize() {
        let args = parse_args_from(vec!["geonorm", "unitize", "dino.grs", "-o", "out", "-S"]);
        assert_eq!(args.operation, Operation::Unitize);
        assert_eq!(args.output_dir, Some(PathBuf::from("out")));
        assert!(args.silent);
        let job = args.job().unwrap();
        assert_eq!(job.format, AssetFormat::LineStrip);
        assert_eq!(job.mode, Some(TransformMode::Unitize));
    }

    #[test]
    fn test_unitize_rejects_values() {
        let result = build_cli().try_get_matches_from(vec!["geonorm", "unitize", "cube.obj", "2"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_explicit_format() {
        let args = parse_args_from(vec![
            "geonorm", "transform", "--format", "line-strip", "figure.txt",
        ]);
        assert_eq!(args.format, Some(AssetFormat::LineStrip));
        assert_eq!(args.job().unwrap().format, AssetFormat::LineStrip);
    }

    #[test]
    fn test_unknown_extension() {
        let args = parse_args_from(vec!["geonorm", "transform", "figure.txt"]);
        assert!(matches!(args.job(), Err(Error::InvalidArguments(_))));
    }

    #[test]
    fn test_global_options_after_subcommand() {
        let args = parse_args_from(vec![
            "geonorm", "transform", "cube.obj", "-D", "--suffix", "_norm", "-c", "my.toml",
        ]);
        assert!(args.debug);
        assert_eq!(args.suffix.as_deref(), Some("_norm"));
        assert_eq!(args.config, Some(PathBuf::from("my.toml")));
    }
}
