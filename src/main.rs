//! geonorm - Scale, translate and unitize mesh and line-strip geometry files

#![warn(clippy::all)]
#![warn(clippy::pedantic)]

use std::io::{self, Write};
use std::process::ExitCode;

use anyhow::Context;
use geonorm::process::{run, Job};
use geonorm::{parse_args, CliArgs, Config};

/// Exit status for configuration problems, which carry no [`geonorm::Error`] kind
const CONFIG_ERROR_EXIT_CODE: u8 = 9;

fn main() -> ExitCode {
    let args = parse_args();
    init_logging(&args);

    match execute(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            match e.downcast_ref::<geonorm::Error>() {
                Some(err) => {
                    eprintln!("ERROR! {err}");
                    ExitCode::from(err.exit_code())
                }
                None => {
                    eprintln!("ERROR! {e:#}");
                    ExitCode::from(CONFIG_ERROR_EXIT_CODE)
                }
            }
        }
    }
}

/// Set up the `log` backend: `info` by default, `debug` with `--debug`,
/// `error` with `--silent`. `RUST_LOG` takes precedence over all three.
fn init_logging(args: &CliArgs) {
    let level = if args.debug {
        "debug"
    } else if args.silent {
        "error"
    } else {
        "info"
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level))
        .format(|buf, record| writeln!(buf, "[{}] {}", record.level(), record.args()))
        .init();
}

fn execute(args: &CliArgs) -> anyhow::Result<()> {
    let job = args.job()?;
    let config = build_config(args, &job)?;

    let outcome = if args.silent {
        run(&job, &config, &mut io::sink())?
    } else {
        run(&job, &config, &mut io::stderr().lock())?
    };

    if let Some(stats) = outcome.stats {
        log::debug!(
            "wrote {} records ({} geometry, {} passthrough)",
            stats.records,
            stats.geometry,
            stats.passthrough
        );
    }
    Ok(())
}

/// Build configuration from CLI args and config files
///
/// Without `--config`, config files are discovered from the input's directory.
fn build_config(args: &CliArgs, job: &Job) -> anyhow::Result<Config> {
    let mut config = if let Some(config_path) = &args.config {
        log::debug!("Using explicit config file: {}", config_path.display());
        Config::from_toml_file(config_path)
            .with_context(|| format!("failed to load config file {}", config_path.display()))?
    } else {
        let discovered = Config::discover_config_files(&job.input);
        if discovered.is_empty() {
            log::debug!("No config files discovered for: {}", job.input.display());
        } else {
            log::debug!("Discovered config files for {}:", job.input.display());
            for f in &discovered {
                log::debug!("  - {}", f.display());
            }
        }
        Config::from_discovered_files(&job.input)
    };

    // Override with CLI arguments
    if let Some(dir) = &args.output_dir {
        config.output_dir = Some(dir.clone());
    }
    if let Some(suffix) = &args.suffix {
        config.output_suffix.clone_from(suffix);
    }

    log_config_debug(&config);

    if let Some(error) = config.validate() {
        anyhow::bail!("Invalid configuration: {error}");
    }

    Ok(config)
}

/// Dump configuration values at debug level
fn log_config_debug(config: &Config) {
    log::debug!("Configuration:");
    log::debug!("  mesh_precision: {}", config.mesh_precision);
    log::debug!("  line_strip_precision: {}", config.line_strip_precision);
    log::debug!(
        "  line_strip_extent_precision: {}",
        config.line_strip_extent_precision
    );
    log::debug!("  report_precision: {}", config.report_precision);
    log::debug!(
        "  declared_extent_precision: {}",
        config.declared_extent_precision
    );
    log::debug!("  output_suffix: {:?}", config.output_suffix);
    log::debug!("  warn_unknown_records: {}", config.warn_unknown_records);
    if let Some(dir) = &config.output_dir {
        log::debug!("  output_dir: {}", dir.display());
    }
}
