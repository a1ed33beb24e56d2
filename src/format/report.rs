//! Extent report written to the diagnostic stream after pass 1

use std::io::{self, Write};

use super::number::fixed_fields;
use crate::geometry::Extent;

/// Write the `max`/`min` lines for an extent
///
/// An empty extent prints its sentinels (`-Infinity` max, ` Infinity` min).
pub fn write_extent_report<W: Write, const N: usize>(
    out: &mut W,
    extent: &Extent<N>,
    precision: usize,
) -> io::Result<()> {
    writeln!(out, "max {}", fixed_fields(&extent.max, precision))?;
    writeln!(out, "min {}", fixed_fields(&extent.min, precision))
}

/// Write the figure extent declared in a line-strip file's header
///
/// Printed as soon as the header has been read, so it precedes `max`/`min`.
pub fn write_declared_extent<W: Write>(
    out: &mut W,
    declared: &[f64; 4],
    precision: usize,
) -> io::Result<()> {
    writeln!(out, "Extent: {}", fixed_fields(declared, precision))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mesh_report() {
        let extent = Extent::from_points(&[[1.0, 2.0, 3.0], [-1.0, 0.0, 1.0]]);
        let mut out = Vec::new();
        write_extent_report(&mut out, &extent, 4).unwrap();
        assert_eq!(
            String::from_utf8(out).unwrap(),
            "max  1.0000   2.0000   3.0000\nmin -1.0000   0.0000   1.0000\n"
        );
    }

    #[test]
    fn test_empty_report_shows_sentinels() {
        let mut out = Vec::new();
        write_extent_report(&mut out, &Extent::<2>::EMPTY, 4).unwrap();
        assert_eq!(
            String::from_utf8(out).unwrap(),
            "max -Infinity  -Infinity\nmin  Infinity   Infinity\n"
        );
    }

    #[test]
    fn test_declared_extent() {
        let mut out = Vec::new();
        write_declared_extent(&mut out, &[10.0, -20.0, 30.0, 40.0], 5).unwrap();
        assert_eq!(
            String::from_utf8(out).unwrap(),
            "Extent:  10.00000  -20.00000   30.00000   40.00000\n"
        );
    }
}
