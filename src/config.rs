//! Configuration management for geonorm.
//!
//! This module provides the [`Config`] struct which controls output formatting
//! and output placement. Configuration can be loaded from:
//! - TOML files (`geonorm.toml`)
//! - CLI arguments (which override file settings)
//!
//! Config files are auto-discovered by searching parent directories from the
//! input file up to the filesystem root, plus the user's home directory.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

/// Config file names to search for (in order of priority, later overrides earlier)
const CONFIG_FILE_NAMES: &[&str] = &["geonorm.toml"];

/// Get the user's home directory
fn dirs_home() -> Option<PathBuf> {
    // Try HOME environment variable first (works on Unix and some Windows setups)
    if let Ok(home) = std::env::var("HOME") {
        return Some(PathBuf::from(home));
    }
    // Fallback for Windows
    if let Ok(userprofile) = std::env::var("USERPROFILE") {
        return Some(PathBuf::from(userprofile));
    }
    None
}

// Serde default functions
fn default_mesh_precision() -> usize {
    6
}
fn default_line_strip_precision() -> usize {
    4
}
fn default_line_strip_extent_precision() -> usize {
    6
}
fn default_report_precision() -> usize {
    4
}
fn default_declared_extent_precision() -> usize {
    5
}
fn default_output_suffix() -> String {
    "_".to_string()
}
fn default_true() -> bool {
    true
}

/// Main configuration struct for geonorm
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Decimals for rewritten mesh vertices (default: 6)
    #[serde(default = "default_mesh_precision")]
    pub mesh_precision: usize,

    /// Decimals for rewritten line-strip vertices (default: 4)
    #[serde(default = "default_line_strip_precision")]
    pub line_strip_precision: usize,

    /// Decimals for the rewritten line-strip figure extent (default: 6)
    #[serde(default = "default_line_strip_extent_precision")]
    pub line_strip_extent_precision: usize,

    /// Decimals in the extent report (default: 4)
    #[serde(default = "default_report_precision")]
    pub report_precision: usize,

    /// Decimals for the declared line-strip extent in the report (default: 5)
    #[serde(default = "default_declared_extent_precision")]
    pub declared_extent_precision: usize,

    /// Inserted between file stem and extension of the output name (default: "_")
    #[serde(default = "default_output_suffix")]
    pub output_suffix: String,

    /// Warn about mesh lines with an unrecognized tag (default: true)
    #[serde(default = "default_true")]
    pub warn_unknown_records: bool,

    /// Directory output files are created in (default: current directory)
    #[serde(default)]
    pub output_dir: Option<PathBuf>,
}

/// Partial configuration for TOML parsing
///
/// All fields are `Option<T>` so we can distinguish between
/// "explicitly set" and "not specified" when merging configs.
#[derive(Debug, Clone, Default, Deserialize)]
struct PartialConfig {
    pub mesh_precision: Option<usize>,
    pub line_strip_precision: Option<usize>,
    pub line_strip_extent_precision: Option<usize>,
    pub report_precision: Option<usize>,
    pub declared_extent_precision: Option<usize>,
    pub output_suffix: Option<String>,
    pub warn_unknown_records: Option<bool>,
    pub output_dir: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            mesh_precision: 6,
            line_strip_precision: 4,
            line_strip_extent_precision: 6,
            report_precision: 4,
            declared_extent_precision: 5,
            output_suffix: "_".to_string(),
            warn_unknown_records: true,
            output_dir: None,
        }
    }
}

impl Config {
    /// Maximum number of decimals for any numeric field
    const MAX_PRECISION: usize = 12;

    /// Validate configuration values are within reasonable bounds
    ///
    /// Returns an error message if validation fails, None if valid.
    #[must_use]
    pub fn validate(&self) -> Option<String> {
        let precisions = [
            ("mesh_precision", self.mesh_precision),
            ("line_strip_precision", self.line_strip_precision),
            (
                "line_strip_extent_precision",
                self.line_strip_extent_precision,
            ),
            ("report_precision", self.report_precision),
            ("declared_extent_precision", self.declared_extent_precision),
        ];
        for (name, value) in precisions {
            if value > Self::MAX_PRECISION {
                return Some(format!(
                    "{name} {value} exceeds maximum of {}",
                    Self::MAX_PRECISION
                ));
            }
        }
        if self.output_suffix.is_empty() {
            return Some("output_suffix must not be empty".to_string());
        }
        if self.output_suffix.contains(['/', '\\']) {
            return Some(format!(
                "output_suffix {:?} must not contain a path separator",
                self.output_suffix
            ));
        }
        None
    }

    /// Load configuration from a TOML file
    pub fn from_toml_file(path: &Path) -> anyhow::Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_toml_str(&contents)
    }

    /// Parse configuration from TOML text, defaulting every unset field
    pub fn from_toml_str(contents: &str) -> anyhow::Result<Self> {
        let partial: PartialConfig = toml::from_str(contents)?;
        let mut config = Self::default();
        config.apply_partial(&partial);
        Ok(config)
    }

    /// Apply a partial config, only overriding fields that are explicitly set
    fn apply_partial(&mut self, partial: &PartialConfig) {
        if let Some(v) = partial.mesh_precision {
            self.mesh_precision = v;
        }
        if let Some(v) = partial.line_strip_precision {
            self.line_strip_precision = v;
        }
        if let Some(v) = partial.line_strip_extent_precision {
            self.line_strip_extent_precision = v;
        }
        if let Some(v) = partial.report_precision {
            self.report_precision = v;
        }
        if let Some(v) = partial.declared_extent_precision {
            self.declared_extent_precision = v;
        }
        if let Some(v) = &partial.output_suffix {
            self.output_suffix.clone_from(v);
        }
        if let Some(v) = partial.warn_unknown_records {
            self.warn_unknown_records = v;
        }
        if let Some(v) = &partial.output_dir {
            self.output_dir = Some(v.clone());
        }
    }

    /// Discover config files from parent directories of a given path
    ///
    /// Searches from the file's directory up to the root, then adds home directory config.
    /// Returns list of config file paths in order of priority (least specific first).
    #[must_use]
    pub fn discover_config_files(start_path: &Path) -> Vec<PathBuf> {
        let mut config_files = Vec::new();

        // Add home directory config first (lowest priority)
        if let Some(home) = dirs_home() {
            for config_name in CONFIG_FILE_NAMES {
                let home_config = home.join(config_name);
                if home_config.is_file() {
                    config_files.push(home_config);
                }
            }
        }

        // Start from the file's parent directory (or the path itself if it's a directory)
        let start_dir = if start_path.is_file() {
            start_path.parent().map(Path::to_path_buf)
        } else if start_path.is_dir() {
            Some(start_path.to_path_buf())
        } else {
            // Path doesn't exist, use current directory
            std::env::current_dir().ok()
        };

        // Collect config files from parent directories (from root to current)
        if let Some(dir) = start_dir {
            let mut ancestors: Vec<PathBuf> = dir.ancestors().map(Path::to_path_buf).collect();
            ancestors.reverse();

            for ancestor in ancestors {
                for config_name in CONFIG_FILE_NAMES {
                    let config_path = ancestor.join(config_name);
                    if config_path.is_file() && !config_files.contains(&config_path) {
                        config_files.push(config_path);
                    }
                }
            }
        }

        config_files
    }

    /// Load and merge configuration from discovered config files
    ///
    /// Later files override earlier ones (only explicitly set values).
    /// Unreadable or malformed files are skipped with a warning.
    #[must_use]
    pub fn from_discovered_files(start_path: &Path) -> Self {
        let config_files = Self::discover_config_files(start_path);

        let mut config = Self::default();
        for path in &config_files {
            match std::fs::read_to_string(path) {
                Ok(contents) => match toml::from_str::<PartialConfig>(&contents) {
                    Ok(partial) => {
                        log::debug!("applying config file {}", path.display());
                        config.apply_partial(&partial);
                    }
                    Err(e) => log::warn!("failed to parse {}: {e}", path.display()),
                },
                Err(e) => log::warn!("failed to read {}: {e}", path.display()),
            }
        }
        config
    }
}
