//! Transform policy: from a mode and an extent to per-axis offset and scale
//!
//! Every geometry coordinate is mapped as `output = (input + offset) * scale`.

use super::extent::Extent;
use crate::error::{Error, Result};

/// Requested transformation
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TransformMode {
    /// Uniform scale by a positive factor, no translation
    Scale(f64),
    /// Per-axis translation (x, y, z); axes beyond the format's dimension are ignored
    Translate([f64; 3]),
    /// Center on the origin and fit the longest axis to [-1, 1]
    Unitize,
}

impl TransformMode {
    /// Short name used in diagnostics
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            TransformMode::Scale(_) => "scale",
            TransformMode::Translate(_) => "translate",
            TransformMode::Unitize => "unitize",
        }
    }
}

/// Per-axis offset and scale, fixed for the whole of pass 2
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TransformParams<const N: usize> {
    pub offset: [f64; N],
    pub scale: [f64; N],
}

impl<const N: usize> TransformParams<N> {
    #[must_use]
    pub fn identity() -> Self {
        Self {
            offset: [0.0; N],
            scale: [1.0; N],
        }
    }

    /// Derive the parameters for `mode` from the pass-1 extent
    ///
    /// Unitize needs a non-empty extent with a positive longest span; both
    /// failures are reported as geometry errors rather than producing NaNs.
    pub fn derive(mode: TransformMode, extent: &Extent<N>) -> Result<Self> {
        match mode {
            TransformMode::Scale(factor) => {
                if !(factor.is_finite() && factor > 0.0) {
                    return Err(Error::InvalidArguments(format!(
                        "scale factor must be a positive number, got {factor}"
                    )));
                }
                Ok(Self {
                    offset: [0.0; N],
                    scale: [factor; N],
                })
            }
            TransformMode::Translate(offsets) => {
                if let Some(bad) = offsets.iter().find(|v| !v.is_finite()) {
                    return Err(Error::InvalidArguments(format!(
                        "translation offsets must be finite, got {bad}"
                    )));
                }
                Ok(Self {
                    offset: std::array::from_fn(|i| offsets.get(i).copied().unwrap_or(0.0)),
                    scale: [1.0; N],
                })
            }
            TransformMode::Unitize => {
                if extent.is_empty() {
                    return Err(Error::EmptyGeometry);
                }
                let largest = extent.largest_span();
                if !(largest.is_finite() && largest > 0.0) {
                    return Err(Error::DegenerateExtent(largest));
                }
                let center = extent.center();
                let scale = 1.0 / (largest / 2.0);
                Ok(Self {
                    offset: center.map(|c| -c),
                    scale: [scale; N],
                })
            }
        }
    }

    /// Map one coordinate
    #[must_use]
    pub fn apply(&self, coords: [f64; N]) -> [f64; N] {
        std::array::from_fn(|i| (coords[i] + self.offset[i]) * self.scale[i])
    }
}
