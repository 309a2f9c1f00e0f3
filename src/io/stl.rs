// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! STL mesh loader
//!
//! Binary layout: 80-byte header, little-endian `u32` triangle count, then
//! one 50-byte record per triangle (normal, three vertices, attribute word).
//! Stored normals and attributes are ignored; normals are recomputed from
//! the winding when needed.

use crate::error::ParseError;
use crate::geometry::{Mesh, Triangle};
use nalgebra::Point3;
use std::io::Cursor;
use tracing::{debug, warn};

const HEADER_LEN: usize = 80;
const COUNT_LEN: usize = 4;
const RECORD_LEN: usize = 50;
const PREAMBLE_LEN: usize = HEADER_LEN + COUNT_LEN;

/// How the bytes of an STL file are encoded
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StlEncoding {
    Binary,
    Ascii,
}

impl StlEncoding {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Binary => "binary",
            Self::Ascii => "ascii",
        }
    }
}

/// Loader behavior switches
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoaderOptions {
    /// Accept the textual encoding; when false it is rejected as unsupported
    pub allow_ascii: bool,
}

impl Default for LoaderOptions {
    fn default() -> Self {
        Self { allow_ascii: true }
    }
}

impl LoaderOptions {
    pub fn binary_only() -> Self {
        Self { allow_ascii: false }
    }
}

/// Load an STL mesh from raw bytes with default options
pub fn load_stl(bytes: &[u8]) -> Result<Mesh, ParseError> {
    load_stl_with(bytes, &LoaderOptions::default())
}

/// Load an STL mesh from raw bytes
pub fn load_stl_with(bytes: &[u8], options: &LoaderOptions) -> Result<Mesh, ParseError> {
    let encoding = detect_encoding(bytes);
    debug!(encoding = encoding.name(), len = bytes.len(), "loading STL");

    let mesh = match encoding {
        StlEncoding::Binary => parse_binary(bytes)?,
        StlEncoding::Ascii if options.allow_ascii => match parse_ascii(bytes) {
            Ok(mesh) => mesh,
            Err(ascii_err) if bytes.len() >= PREAMBLE_LEN => {
                debug!(error = %ascii_err, "ASCII parse failed, retrying as binary");
                parse_binary(bytes).map_err(|_| ascii_err)?
            }
            Err(ascii_err) => return Err(ascii_err),
        },
        StlEncoding::Ascii => {
            let unsupported = ParseError::UnsupportedEncoding {
                encoding: encoding.name().to_string(),
            };
            if bytes.len() < PREAMBLE_LEN {
                return Err(unsupported);
            }
            parse_binary(bytes).map_err(|_| unsupported)?
        }
    };

    if let Some(index) = mesh.triangles.iter().position(|t| !t.is_finite()) {
        return Err(ParseError::NonFiniteVertex { triangle: index });
    }

    debug!(triangles = mesh.triangle_count(), "loaded STL");
    Ok(mesh)
}

/// Decide between the binary and textual encodings
///
/// Binary files may legally begin with `solid` in their header, so a buffer
/// whose length matches the binary layout exactly is always binary. Otherwise
/// the text must also carry a `facet` or `endsolid` keyword after the
/// `solid` line to count as ASCII.
pub fn detect_encoding(bytes: &[u8]) -> StlEncoding {
    if let Some(expected) = declared_binary_len(bytes) {
        if expected == bytes.len() as u64 {
            return StlEncoding::Binary;
        }
    }

    let start = bytes
        .iter()
        .position(|b| !b.is_ascii_whitespace())
        .unwrap_or(bytes.len());

    let text = &bytes[start..];
    if text.starts_with(b"solid") && has_ascii_body(text) && std::str::from_utf8(bytes).is_ok() {
        StlEncoding::Ascii
    } else {
        StlEncoding::Binary
    }
}

fn has_ascii_body(text: &[u8]) -> bool {
    let Some(line_end) = text.iter().position(|&b| b == b'\n') else {
        return false;
    };
    let body = &text[line_end + 1..];
    [&b"facet"[..], &b"endsolid"[..]]
        .iter()
        .any(|keyword| body.windows(keyword.len()).any(|w| w == *keyword))
}

fn declared_count(bytes: &[u8]) -> Option<u32> {
    let count = bytes.get(HEADER_LEN..PREAMBLE_LEN)?;
    Some(u32::from_le_bytes([count[0], count[1], count[2], count[3]]))
}

fn declared_binary_len(bytes: &[u8]) -> Option<u64> {
    declared_count(bytes).map(|n| PREAMBLE_LEN as u64 + n as u64 * RECORD_LEN as u64)
}

fn parse_binary(bytes: &[u8]) -> Result<Mesh, ParseError> {
    let count = declared_count(bytes).ok_or(ParseError::Truncated {
        expected: PREAMBLE_LEN as u64,
        actual: bytes.len(),
    })?;

    if count == 0 {
        return Err(ParseError::EmptyMesh);
    }

    let expected = PREAMBLE_LEN as u64 + count as u64 * RECORD_LEN as u64;
    if (bytes.len() as u64) < expected {
        return Err(ParseError::Truncated {
            expected,
            actual: bytes.len(),
        });
    }
    if (bytes.len() as u64) > expected {
        warn!(
            trailing = bytes.len() as u64 - expected,
            "ignoring bytes after the last STL record"
        );
    }

    // `expected` fits in the buffer length, so it fits in usize.
    let records = &bytes[PREAMBLE_LEN..expected as usize];
    let mut mesh = Mesh::with_capacity(count as usize);

    for record in records.chunks_exact(RECORD_LEN) {
        // record[0..12] is the stored normal, record[48..50] the attribute word
        mesh.add_triangle(Triangle::new(
            read_point(&record[12..24]),
            read_point(&record[24..36]),
            read_point(&record[36..48]),
        ));
    }

    Ok(mesh)
}

fn read_point(chunk: &[u8]) -> Point3<f64> {
    let coord = |i: usize| {
        f32::from_le_bytes([chunk[i], chunk[i + 1], chunk[i + 2], chunk[i + 3]]) as f64
    };
    Point3::new(coord(0), coord(4), coord(8))
}

fn parse_ascii(bytes: &[u8]) -> Result<Mesh, ParseError> {
    let mut cursor = Cursor::new(bytes);
    let reader = stl_io::create_stl_reader(&mut cursor).map_err(|e| ParseError::MalformedAscii {
        reason: e.to_string(),
    })?;

    let mut mesh = Mesh::new();
    for triangle in reader {
        let triangle = triangle.map_err(|e| ParseError::MalformedAscii {
            reason: e.to_string(),
        })?;
        let [a, b, c] = triangle.vertices;
        mesh.add_triangle(Triangle::new(
            Point3::new(a[0] as f64, a[1] as f64, a[2] as f64),
            Point3::new(b[0] as f64, b[1] as f64, b[2] as f64),
            Point3::new(c[0] as f64, c[1] as f64, c[2] as f64),
        ));
    }

    if mesh.is_empty() {
        return Err(ParseError::EmptyMesh);
    }

    Ok(mesh)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn binary_with_count(count: u32, records: usize) -> Vec<u8> {
        let mut bytes = vec![0u8; HEADER_LEN];
        bytes.extend_from_slice(&count.to_le_bytes());
        bytes.extend(std::iter::repeat(0u8).take(records * RECORD_LEN));
        bytes
    }

    #[test]
    fn test_zero_count_is_empty() {
        let bytes = binary_with_count(0, 0);
        assert_eq!(load_stl(&bytes), Err(ParseError::EmptyMesh));
    }

    #[test]
    fn test_short_buffer_is_truncated() {
        assert_eq!(
            load_stl(&[0u8; 40]),
            Err(ParseError::Truncated {
                expected: 84,
                actual: 40
            })
        );

        let bytes = binary_with_count(3, 2);
        assert_eq!(
            load_stl(&bytes),
            Err(ParseError::Truncated {
                expected: 234,
                actual: 184
            })
        );
    }

    #[test]
    fn test_huge_declared_count_does_not_overflow() {
        let bytes = binary_with_count(u32::MAX, 1);
        assert!(matches!(load_stl(&bytes), Err(ParseError::Truncated { .. })));
    }

    #[test]
    fn test_binary_header_starting_with_solid() {
        let mut bytes = binary_with_count(1, 1);
        bytes[..5].copy_from_slice(b"solid");
        assert_eq!(detect_encoding(&bytes), StlEncoding::Binary);
        assert_eq!(load_stl(&bytes).unwrap().triangle_count(), 1);
    }

    #[test]
    fn test_solid_header_without_ascii_body_is_binary() {
        let mut bytes = binary_with_count(1, 1);
        bytes[..11].copy_from_slice(b"solid part1");
        bytes.extend_from_slice(&[0u8; 4]);
        assert_eq!(detect_encoding(&bytes), StlEncoding::Binary);

        let mut headed = binary_with_count(1, 1);
        headed[..12].copy_from_slice(b"solid part1\n");
        headed.extend_from_slice(&[0u8; 4]);
        assert_eq!(detect_encoding(&headed), StlEncoding::Binary);
    }

    #[test]
    fn test_non_finite_vertex_rejected() {
        let mut bytes = binary_with_count(2, 2);
        let offset = PREAMBLE_LEN + RECORD_LEN + 24;
        bytes[offset..offset + 4].copy_from_slice(&f32::NAN.to_le_bytes());
        assert_eq!(
            load_stl(&bytes),
            Err(ParseError::NonFiniteVertex { triangle: 1 })
        );
    }

    #[test]
    fn test_ascii_rejected_when_disabled() {
        let text = b"solid part\nendsolid part\n";
        assert_eq!(detect_encoding(text), StlEncoding::Ascii);
        assert_eq!(
            load_stl_with(text, &LoaderOptions::binary_only()),
            Err(ParseError::UnsupportedEncoding {
                encoding: "ascii".into()
            })
        );
    }
}
