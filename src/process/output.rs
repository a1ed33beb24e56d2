//! Input and output file lifecycle
//!
//! The output name is derived from the input's final path component, and the
//! output file is only ever created, never truncated.

use std::fs::{File, OpenOptions};
use std::io::{self, BufReader};
use std::path::{Path, PathBuf};

use crate::error::{Error, Result};

/// Final component of `input`, splitting on both `/` and `\`
fn final_component(input: &str) -> &str {
    input.rsplit(['/', '\\']).next().unwrap_or(input)
}

/// Derive `<stem><suffix>.<ext>` inside `output_dir`
///
/// The extension is split off at the last `.` of the final component. A name
/// without a `.` gets the suffix appended (`model` → `model_`).
#[must_use]
pub fn derive_output_path(input: &Path, output_dir: Option<&Path>, suffix: &str) -> PathBuf {
    let input = input.to_string_lossy();
    let name = final_component(&input);
    let file_name = match name.rfind('.') {
        Some(dot) => format!("{}{suffix}{}", &name[..dot], &name[dot..]),
        None => format!("{name}{suffix}"),
    };
    match output_dir {
        Some(dir) => dir.join(file_name),
        None => PathBuf::from(file_name),
    }
}

/// Open an input file for one pass
pub fn open_input(path: &Path) -> Result<BufReader<File>> {
    File::open(path)
        .map(BufReader::new)
        .map_err(|source| Error::InputNotFound {
            path: path.to_path_buf(),
            source,
        })
}

/// Create the output file, refusing to touch an existing one
pub fn create_output(path: &Path) -> Result<File> {
    if path.exists() {
        return Err(Error::OutputExists(path.to_path_buf()));
    }
    OpenOptions::new()
        .write(true)
        .create_new(true)
        .open(path)
        .map_err(|source| {
            if source.kind() == io::ErrorKind::AlreadyExists {
                Error::OutputExists(path.to_path_buf())
            } else {
                Error::OutputCreate {
                    path: path.to_path_buf(),
                    source,
                }
            }
        })
}
