//! Geometry core: extents and transform parameters.
//!
//! - [`ExtentAccumulator`] folds pass-1 coordinates into an [`Extent`]
//! - [`TransformParams`] turns a [`TransformMode`] and that extent into the
//!   per-axis offset and scale applied in pass 2
//!
//! Both are generic over the dimension: 3 for meshes, 2 for line-strip figures.

pub mod extent;
pub mod transform;

pub use extent::{Extent, ExtentAccumulator};
pub use transform::{TransformMode, TransformParams};
