//! Axis-aligned extents and the pass-1 accumulator

/// Per-axis `(min, max)` bounds of `N`-dimensional coordinates
///
/// An extent that has seen no coordinate holds the `(+inf, -inf)` sentinel
/// on every axis; check [`Extent::is_empty`] before deriving anything from it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Extent<const N: usize> {
    pub min: [f64; N],
    pub max: [f64; N],
}

impl<const N: usize> Extent<N> {
    pub const EMPTY: Self = Self {
        min: [f64::INFINITY; N],
        max: [f64::NEG_INFINITY; N],
    };

    /// Extent of a set of points
    pub fn from_points<'a, I>(points: I) -> Self
    where
        I: IntoIterator<Item = &'a [f64; N]>,
    {
        let mut acc = ExtentAccumulator::new();
        for point in points {
            acc.observe(point);
        }
        acc.finish()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.min.iter().zip(&self.max).any(|(lo, hi)| lo > hi)
    }

    /// `max - min` for every axis
    #[must_use]
    pub fn spans(&self) -> [f64; N] {
        std::array::from_fn(|i| self.max[i] - self.min[i])
    }

    /// Longest span over all axes
    #[must_use]
    pub fn largest_span(&self) -> f64 {
        self.spans().into_iter().fold(f64::NEG_INFINITY, f64::max)
    }

    #[must_use]
    pub fn center(&self) -> [f64; N] {
        std::array::from_fn(|i| (self.max[i] + self.min[i]) / 2.0)
    }
}

impl<const N: usize> Default for Extent<N> {
    fn default() -> Self {
        Self::EMPTY
    }
}

/// Running per-axis min/max over observed coordinates
#[derive(Debug, Clone, Copy)]
pub struct ExtentAccumulator<const N: usize> {
    extent: Extent<N>,
    observed: usize,
}

impl<const N: usize> ExtentAccumulator<N> {
    #[must_use]
    pub fn new() -> Self {
        Self {
            extent: Extent::EMPTY,
            observed: 0,
        }
    }

    /// Fold one coordinate into the bounds. NaN components never move a bound.
    pub fn observe(&mut self, coords: &[f64; N]) {
        for (axis, &value) in coords.iter().enumerate() {
            if value > self.extent.max[axis] {
                self.extent.max[axis] = value;
            }
            if value < self.extent.min[axis] {
                self.extent.min[axis] = value;
            }
        }
        self.observed += 1;
    }

    /// Number of coordinates observed so far
    #[must_use]
    pub fn observed(&self) -> usize {
        self.observed
    }

    #[must_use]
    pub fn finish(self) -> Extent<N> {
        self.extent
    }
}

impl<const N: usize> Default for ExtentAccumulator<N> {
    fn default() -> Self {
        Self::new()
    }
}
