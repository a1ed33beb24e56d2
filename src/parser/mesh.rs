//! Mesh-format (OBJ) record reader
//!
//! Every physical line is one record. The leading token decides whether the
//! line is a vertex to transform or a passthrough line to copy verbatim.

use std::io::BufRead;

use super::classify::{MeshTag, RecordKind};
use super::scanner::TokenScanner;
use crate::error::Result;

/// One line of a mesh file
#[derive(Debug, Clone, PartialEq)]
pub enum MeshRecord {
    /// A `v` line: three coordinates plus any trailing fields (e.g. a weight)
    Vertex { coords: [f64; 3], trailing: String },
    /// Any other line, kept byte for byte as read (minus the line terminator)
    Passthrough { tag: MeshTag, line: Vec<u8> },
}

impl MeshRecord {
    #[must_use]
    pub fn kind(&self) -> RecordKind {
        match self {
            MeshRecord::Vertex { .. } => RecordKind::Geometry,
            MeshRecord::Passthrough { .. } => RecordKind::Passthrough,
        }
    }
}

/// Lazy stream of [`MeshRecord`]s
pub struct MeshReader<R: BufRead> {
    scanner: TokenScanner<R>,
}

impl<R: BufRead> MeshReader<R> {
    pub fn new(scanner: TokenScanner<R>) -> Self {
        Self { scanner }
    }

    /// Line number of the record returned last
    pub fn line_number(&self) -> usize {
        self.scanner.line_number()
    }

    /// Read the next record, `None` at end of input
    pub fn next_record(&mut self) -> Result<Option<MeshRecord>> {
        if !self.scanner.advance_line()? {
            return Ok(None);
        }
        let tag = MeshTag::classify(self.scanner.next_token_in_line().unwrap_or(""));
        let record = match tag.kind() {
            RecordKind::Geometry => {
                let x: f64 = self.scanner.number_in_line()?;
                let y: f64 = self.scanner.number_in_line()?;
                let z: f64 = self.scanner.number_in_line()?;
                MeshRecord::Vertex {
                    coords: [x, y, z],
                    trailing: self.scanner.rest_of_line().trim().to_string(),
                }
            }
            RecordKind::Passthrough => MeshRecord::Passthrough {
                tag,
                line: self.scanner.raw_line().to_vec(),
            },
        };
        Ok(Some(record))
    }
}

impl<R: BufRead> Iterator for MeshReader<R> {
    type Item = Result<MeshRecord>;

    fn next(&mut self) -> Option<Self::Item> {
        self.next_record().transpose()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;

    fn read_all(input: &str) -> Vec<MeshRecord> {
        MeshReader::new(TokenScanner::from_string(input))
            .collect::<Result<Vec<_>>>()
            .unwrap()
    }

    #[test]
    fn test_vertex_and_face() {
        let records = read_all("v 1 2 3\nf 1 2 3\n");
        assert_eq!(
            records[0],
            MeshRecord::Vertex {
                coords: [1.0, 2.0, 3.0],
                trailing: String::new()
            }
        );
        assert_eq!(
            records[1],
            MeshRecord::Passthrough {
                tag: MeshTag::Face,
                line: b"f 1 2 3".to_vec()
            }
        );
    }

    #[test]
    fn test_passthrough_keeps_spacing() {
        let records = read_all("  usemtl   red  \n");
        assert_eq!(
            records[0],
            MeshRecord::Passthrough {
                tag: MeshTag::UseMaterial,
                line: b"  usemtl   red  ".to_vec()
            }
        );
    }

    #[test]
    fn test_non_utf8_comment_is_passthrough() {
        let input: &[u8] = b"# caf\xe9 model\nv 1 2 3\n";
        let records = MeshReader::new(TokenScanner::new(input))
            .collect::<Result<Vec<_>>>()
            .unwrap();
        assert_eq!(
            records[0],
            MeshRecord::Passthrough {
                tag: MeshTag::Comment,
                line: b"# caf\xe9 model".to_vec()
            }
        );
        assert_eq!(records[1].kind(), RecordKind::Geometry);
    }

    #[test]
    fn test_blank_lines_are_records() {
        let records = read_all("# head\n\nv 0 0 0\n");
        assert_eq!(records.len(), 3);
        assert!(matches!(
            records[1],
            MeshRecord::Passthrough {
                tag: MeshTag::Blank,
                ..
            }
        ));
    }

    #[test]
    fn test_vertex_trailing_fields() {
        let records = read_all("v 1 2 3 0.5 1.0\n");
        assert_eq!(
            records[0],
            MeshRecord::Vertex {
                coords: [1.0, 2.0, 3.0],
                trailing: "0.5 1.0".to_string()
            }
        );
    }

    #[test]
    fn test_unknown_line() {
        let records = read_all("l 1 2\n");
        assert_eq!(
            records[0],
            MeshRecord::Passthrough {
                tag: MeshTag::Unknown,
                line: b"l 1 2".to_vec()
            }
        );
        assert_eq!(records[0].kind(), RecordKind::Passthrough);
    }

    #[test]
    fn test_short_vertex_is_malformed() {
        let mut reader = MeshReader::new(TokenScanner::from_string("# ok\nv 1 2\n"));
        assert!(reader.next_record().unwrap().is_some());
        match reader.next_record() {
            Err(Error::MalformedNumber { line, .. }) => assert_eq!(line, 2),
            other => panic!("expected MalformedNumber, got {other:?}"),
        }
    }

    #[test]
    fn test_non_numeric_vertex_field() {
        let mut reader = MeshReader::new(TokenScanner::from_string("v 1 x 3\n"));
        match reader.next_record() {
            Err(Error::MalformedNumber { token, .. }) => assert_eq!(token, "x"),
            other => panic!("expected MalformedNumber, got {other:?}"),
        }
    }
}
