//! Reader and writer for the one supported PLY layout.
//!
//! ```text
//! ply
//! format binary_little_endian 1.0
//! element vertex <N>
//! property float x
//! property float y
//! property float z
//! property float intensity
//! end_header
//! <N * 16 bytes>
//! ```
//!
//! Property lines are optional; when present they must describe exactly four
//! 4-byte floats named `x y z intensity`, in that order. Elements declared
//! before `vertex` must be empty, since their data would precede the points.

use std::{
    fs::File,
    io::{BufRead, BufReader, Read, Write},
    path::Path,
};

use byteorder::{ByteOrder, LittleEndian, WriteBytesExt};

use super::Point;
use crate::error::ViewerError;

const SUPPORTED_FORMAT: &str = "binary_little_endian";
const SUPPORTED_VERSION: &str = "1.0";
const FIELDS_PER_RECORD: usize = 4;
const FIELD_NAMES: [&str; FIELDS_PER_RECORD] = ["x", "y", "z", "intensity"];

/// Errors produced while decoding a point cloud file.
#[derive(Debug, thiserror::Error)]
pub enum FormatError {
    /// The header has no `format` line.
    #[error("header declares no format (expected `format binary_little_endian 1.0`)")]
    MissingFormat,
    /// The header declares an encoding other than binary little-endian 1.0.
    #[error("unsupported encoding `{0}`, only `binary_little_endian 1.0` is supported")]
    UnsupportedEncoding(String),
    /// The vertex count is not a non-negative integer that fits in memory.
    #[error("invalid vertex count `{0}`")]
    InvalidVertexCount(String),
    /// The header declares zero vertices or no vertex element at all.
    #[error("file contains no vertices")]
    NoVertices,
    /// The vertex properties do not describe `x y z intensity` as 4-byte
    /// floats, or another element's data precedes the vertices.
    #[error("unsupported vertex layout: {0}")]
    UnsupportedLayout(String),
    /// The stream ended before `end_header`.
    #[error("header is not terminated by `end_header`")]
    UnterminatedHeader,
    /// The body ended before all declared records were read.
    #[error("truncated body: expected {expected} vertices, found {found}")]
    Truncated {
        /// Declared record count.
        expected: usize,
        /// Complete records present.
        found: usize,
    },
    /// Underlying read failure.
    #[error("read failed: {0}")]
    Io(#[from] std::io::Error),
}

/// What the header told us about the body.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Header {
    vertex_count: usize,
}

/// Header scan state; only tracks what the vertex layout check needs.
#[derive(Default)]
struct HeaderScan {
    format_ok: bool,
    vertex_count: Option<usize>,
    in_vertex_element: bool,
    /// `(type, name)` of each vertex property, in declaration order.
    vertex_properties: Vec<(String, String)>,
}

impl HeaderScan {
    fn line(&mut self, line: &str) -> Result<(), FormatError> {
        let mut tokens = line.split_whitespace();
        match tokens.next() {
            Some("format") => {
                let encoding = tokens.next().unwrap_or_default();
                let version = tokens.next().unwrap_or_default();
                if encoding != SUPPORTED_FORMAT || version != SUPPORTED_VERSION {
                    return Err(FormatError::UnsupportedEncoding(
                        format!("{encoding} {version}").trim().to_owned(),
                    ));
                }
                self.format_ok = true;
            }
            Some("element") => {
                let name = tokens.next().unwrap_or_default();
                let raw = tokens.next().unwrap_or_default();
                self.in_vertex_element = name == "vertex";
                if self.in_vertex_element {
                    let count = raw
                        .parse::<usize>()
                        .ok()
                        .filter(|n| n.checked_mul(Point::STRIDE).is_some())
                        .ok_or_else(|| {
                            FormatError::InvalidVertexCount(raw.to_owned())
                        })?;
                    self.vertex_count = Some(count);
                } else if self.vertex_count.is_none() && raw.parse::<u64>() != Ok(0) {
                    // Only elements after `vertex` may carry data.
                    return Err(FormatError::UnsupportedLayout(format!(
                        "element `{name} {raw}` precedes the vertex element"
                    )));
                }
            }
            Some("property") if self.in_vertex_element => {
                let ty = tokens.next().unwrap_or_default();
                let name = tokens.next().unwrap_or_default();
                self.vertex_properties.push((ty.to_owned(), name.to_owned()));
            }
            // `ply`, `comment`, `obj_info`, and properties of other elements.
            _ => {}
        }
        Ok(())
    }

    fn finish(self) -> Result<Header, FormatError> {
        if !self.format_ok {
            return Err(FormatError::MissingFormat);
        }
        let vertex_count = match self.vertex_count {
            None | Some(0) => return Err(FormatError::NoVertices),
            Some(n) => n,
        };
        if !self.vertex_properties.is_empty() {
            let matches = self.vertex_properties.len() == FIELDS_PER_RECORD
                && self
                    .vertex_properties
                    .iter()
                    .zip(FIELD_NAMES)
                    .all(|((ty, name), expected)| {
                        (ty == "float" || ty == "float32") && name == expected
                    });
            if !matches {
                let declared: Vec<String> = self
                    .vertex_properties
                    .iter()
                    .map(|(ty, name)| format!("{ty} {name}"))
                    .collect();
                return Err(FormatError::UnsupportedLayout(format!(
                    "vertex properties [{}], expected float x, y, z, intensity",
                    declared.join(", ")
                )));
            }
        }
        Ok(Header { vertex_count })
    }
}

fn read_header<R: BufRead>(reader: &mut R) -> Result<Header, FormatError> {
    let mut scan = HeaderScan::default();
    let mut raw = Vec::new();
    loop {
        raw.clear();
        if reader.read_until(b'\n', &mut raw)? == 0 {
            return Err(FormatError::UnterminatedHeader);
        }
        let line = String::from_utf8_lossy(&raw);
        let line = line.trim_end_matches(['\n', '\r']);
        if line.trim() == "end_header" {
            return scan.finish();
        }
        scan.line(line)?;
    }
}

/// Decode a full PLY stream into points, in file order.
///
/// # Errors
///
/// Returns [`FormatError`] if the header is malformed or declares an
/// unsupported encoding, if no vertices are declared, or if the body holds
/// fewer records than declared.
pub fn read_points<R: BufRead>(mut reader: R) -> Result<Vec<Point>, FormatError> {
    let header = read_header(&mut reader)?;
    let expected_bytes = header.vertex_count * Point::STRIDE;

    let mut body = Vec::new();
    let _ = reader
        .take(expected_bytes as u64)
        .read_to_end(&mut body)?;
    if body.len() < expected_bytes {
        return Err(FormatError::Truncated {
            expected: header.vertex_count,
            found: body.len() / Point::STRIDE,
        });
    }

    Ok(body.chunks_exact(Point::STRIDE).map(decode_record).collect())
}

fn decode_record(record: &[u8]) -> Point {
    let mut fields = [0.0_f32; FIELDS_PER_RECORD];
    LittleEndian::read_f32_into(record, &mut fields);
    let [x, y, z, intensity] = fields;
    Point { x, y, z, intensity }
}

/// Open and decode a point cloud file.
///
/// # Errors
///
/// Returns [`ViewerError::Open`] if the file cannot be opened and
/// [`ViewerError::Format`] if its contents are rejected.
pub fn load(path: &Path) -> Result<Vec<Point>, ViewerError> {
    let file = File::open(path).map_err(|source| ViewerError::Open {
        path: path.to_path_buf(),
        source,
    })?;
    let points = read_points(BufReader::new(file))?;
    log::info!("loaded {} points from {}", points.len(), path.display());
    Ok(points)
}

/// Encode points in the supported layout, header included.
///
/// # Errors
///
/// Propagates write failures from `writer`.
pub fn write_points<W: Write>(mut writer: W, points: &[Point]) -> std::io::Result<()> {
    write!(
        writer,
        "ply\nformat {SUPPORTED_FORMAT} {SUPPORTED_VERSION}\nelement vertex {}\n\
         property float x\nproperty float y\nproperty float z\n\
         property float intensity\nend_header\n",
        points.len()
    )?;
    for p in points {
        writer.write_f32::<LittleEndian>(p.x)?;
        writer.write_f32::<LittleEndian>(p.y)?;
        writer.write_f32::<LittleEndian>(p.z)?;
        writer.write_f32::<LittleEndian>(p.intensity)?;
    }
    writer.flush()
}
