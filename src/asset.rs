//! Supported asset formats

use std::fmt;
use std::path::Path;
use std::str::FromStr;

/// Extensions recognized as mesh files
const MESH_EXTENSIONS: &[&str] = &["obj"];

/// Extensions recognized as line-strip files
const LINE_STRIP_EXTENSIONS: &[&str] = &["grs"];

/// Text format of an input asset
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AssetFormat {
    /// Line-oriented 3D mesh with tagged records (OBJ)
    Mesh,
    /// 2D figure: comment preamble, extent, strip and vertex counts (GRS)
    LineStrip,
}

impl AssetFormat {
    /// Infer the format from a file extension (case-insensitive)
    #[must_use]
    pub fn from_path(path: &Path) -> Option<Self> {
        let ext = path.extension()?.to_str()?.to_ascii_lowercase();
        if MESH_EXTENSIONS.contains(&ext.as_str()) {
            Some(AssetFormat::Mesh)
        } else if LINE_STRIP_EXTENSIONS.contains(&ext.as_str()) {
            Some(AssetFormat::LineStrip)
        } else {
            None
        }
    }

    /// Number of axes per coordinate
    #[must_use]
    pub fn dimension(self) -> usize {
        match self {
            AssetFormat::Mesh => 3,
            AssetFormat::LineStrip => 2,
        }
    }

    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            AssetFormat::Mesh => "mesh",
            AssetFormat::LineStrip => "line-strip",
        }
    }
}

impl fmt::Display for AssetFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for AssetFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "mesh" | "obj" => Ok(AssetFormat::Mesh),
            "line-strip" | "linestrip" | "grs" => Ok(AssetFormat::LineStrip),
            other => Err(format!("unknown format `{other}` (expected mesh or line-strip)")),
        }
    }
}
