//! Record classification for both asset formats
//!
//! Mesh records are classified by their leading token against an ordered
//! prefix table; the first matching rule wins. Line-strip files only need the
//! preamble terminator rule, everything after it is positional.

/// Leading tag of a mesh-format line
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MeshTag {
    Comment,
    TextureCoord,
    Normal,
    Face,
    Smoothing,
    Group,
    Object,
    UseMaterial,
    MaterialLib,
    Vertex,
    /// Line with no tokens at all
    Blank,
    /// Tag not present in the prefix table
    Unknown,
}

/// Whether a record is rewritten or copied verbatim
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecordKind {
    Geometry,
    Passthrough,
}

/// Prefix table, checked in order. `v` must stay after `vt` and `vn`.
const MESH_TAG_PREFIXES: &[(&str, MeshTag)] = &[
    ("#", MeshTag::Comment),
    ("vt", MeshTag::TextureCoord),
    ("vn", MeshTag::Normal),
    ("f", MeshTag::Face),
    ("s", MeshTag::Smoothing),
    ("g", MeshTag::Group),
    ("o", MeshTag::Object),
    ("usemtl", MeshTag::UseMaterial),
    ("mtllib", MeshTag::MaterialLib),
    ("v", MeshTag::Vertex),
];

impl MeshTag {
    /// Classify the first token of a mesh line
    #[must_use]
    pub fn classify(token: &str) -> Self {
        if token.is_empty() {
            return MeshTag::Blank;
        }
        MESH_TAG_PREFIXES
            .iter()
            .find(|(prefix, _)| token.starts_with(prefix))
            .map_or(MeshTag::Unknown, |&(_, tag)| tag)
    }

    #[must_use]
    pub fn kind(self) -> RecordKind {
        match self {
            MeshTag::Vertex => RecordKind::Geometry,
            MeshTag::Comment
            | MeshTag::TextureCoord
            | MeshTag::Normal
            | MeshTag::Face
            | MeshTag::Smoothing
            | MeshTag::Group
            | MeshTag::Object
            | MeshTag::UseMaterial
            | MeshTag::MaterialLib
            | MeshTag::Blank
            | MeshTag::Unknown => RecordKind::Passthrough,
        }
    }

    /// Unknown tags are copied but reported as diagnostics
    #[must_use]
    pub fn is_known(self) -> bool {
        self != MeshTag::Unknown
    }
}

/// A line starting with `*` ends the line-strip comment preamble
#[must_use]
pub fn is_preamble_terminator(line: &str) -> bool {
    line.starts_with('*')
}
