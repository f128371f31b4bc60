//! STL parsing (binary and ASCII) into a triangle soup

use glam::Vec3;
use tracing::debug;

use super::TriangleSoup;
use crate::error::AssetLoadError;

/// Binary STL header size (80-byte comment + u32 triangle count)
const BINARY_HEADER_SIZE: usize = 84;

/// Binary STL record size: normal + 3 vertices (12 f32) + u16 attribute
const BINARY_RECORD_SIZE: usize = 50;

/// How far into the file to look for the `facet` keyword
const ASCII_PROBE_LEN: usize = 1024;

/// Parse STL data, detecting binary vs ASCII encoding
pub fn parse_stl(data: &[u8]) -> Result<TriangleSoup, AssetLoadError> {
    if is_ascii_stl(data) {
        debug!("Parsing ASCII STL ({} bytes)", data.len());
        parse_ascii_stl(data)
    } else {
        debug!("Parsing binary STL ({} bytes)", data.len());
        parse_binary_stl(data)
    }
}

/// ASCII STL starts with `solid ` and mentions `facet` early on.
///
/// Binary headers are free-form and may also start with `solid`, so the
/// keyword probe is what tells them apart.
fn is_ascii_stl(data: &[u8]) -> bool {
    if !data.starts_with(b"solid ") && !data.starts_with(b"solid\n") {
        return false;
    }
    let probe = &data[..data.len().min(ASCII_PROBE_LEN)];
    probe.windows(5).any(|w| w == b"facet")
}

fn parse_binary_stl(data: &[u8]) -> Result<TriangleSoup, AssetLoadError> {
    if data.len() < BINARY_HEADER_SIZE {
        return Err(AssetLoadError::Parse(format!(
            "binary STL too short: {} bytes, header needs {}",
            data.len(),
            BINARY_HEADER_SIZE
        )));
    }

    let triangle_count = u32::from_le_bytes([data[80], data[81], data[82], data[83]]) as usize;
    let expected_size = BINARY_HEADER_SIZE + triangle_count * BINARY_RECORD_SIZE;
    if data.len() < expected_size {
        return Err(AssetLoadError::Parse(format!(
            "binary STL truncated: expected {} bytes for {} triangles, got {}",
            expected_size,
            triangle_count,
            data.len()
        )));
    }

    let mut soup = TriangleSoup {
        vertices: Vec::with_capacity(triangle_count * 9),
        face_normals: Vec::with_capacity(triangle_count * 3),
        face_indices: Vec::with_capacity(triangle_count * 3),
    };

    for record in data[BINARY_HEADER_SIZE..expected_size].chunks_exact(BINARY_RECORD_SIZE) {
        let normal = read_vec3(&record[0..12]);
        let corners = [
            read_vec3(&record[12..24]),
            read_vec3(&record[24..36]),
            read_vec3(&record[36..48]),
        ];
        // Bytes 48..50 are the attribute count, unused
        soup.push_face(corners, Some(normal));
    }

    Ok(soup)
}

fn parse_ascii_stl(data: &[u8]) -> Result<TriangleSoup, AssetLoadError> {
    let text = std::str::from_utf8(data)
        .map_err(|e| AssetLoadError::Parse(format!("ASCII STL is not valid UTF-8: {e}")))?;

    let mut soup = TriangleSoup::new();
    let mut normal = Vec3::ZERO;
    let mut corners: Vec<Vec3> = Vec::with_capacity(3);

    for (line_no, line) in text.lines().enumerate() {
        let mut parts = line.split_whitespace();
        match parts.next() {
            Some("facet") => {
                // "facet normal nx ny nz"
                if parts.next() != Some("normal") {
                    return Err(AssetLoadError::Parse(format!(
                        "line {}: expected 'facet normal'",
                        line_no + 1
                    )));
                }
                normal = parse_triple(parts, line_no)?;
                corners.clear();
            }
            Some("vertex") => {
                if corners.len() == 3 {
                    return Err(AssetLoadError::Parse(format!(
                        "line {}: facet has more than 3 vertices",
                        line_no + 1
                    )));
                }
                corners.push(parse_triple(parts, line_no)?);
            }
            Some("endfacet") => {
                let [a, b, c] = corners[..] else {
                    return Err(AssetLoadError::Parse(format!(
                        "line {}: facet has {} vertices, expected 3",
                        line_no + 1,
                        corners.len()
                    )));
                };
                soup.push_face([a, b, c], Some(normal));
                corners.clear();
            }
            // solid / outer loop / endloop / endsolid / blank lines
            _ => {}
        }
    }

    Ok(soup)
}

fn parse_triple<'a>(
    mut parts: impl Iterator<Item = &'a str>,
    line_no: usize,
) -> Result<Vec3, AssetLoadError> {
    let mut next = || -> Result<f32, AssetLoadError> {
        parts
            .next()
            .ok_or_else(|| {
                AssetLoadError::Parse(format!("line {}: expected 3 coordinates", line_no + 1))
            })?
            .parse::<f32>()
            .map_err(|e| AssetLoadError::Parse(format!("line {}: {e}", line_no + 1)))
    };
    Ok(Vec3::new(next()?, next()?, next()?))
}

fn read_vec3(bytes: &[u8]) -> Vec3 {
    let f = |o: usize| f32::from_le_bytes([bytes[o], bytes[o + 1], bytes[o + 2], bytes[o + 3]]);
    Vec3::new(f(0), f(4), f(8))
}

/// Encode faces as binary STL
///
/// Used by tests and the CLI to produce fixtures.
pub fn write_binary_stl(faces: &[([Vec3; 3], Vec3)]) -> Vec<u8> {
    let mut out = Vec::with_capacity(BINARY_HEADER_SIZE + faces.len() * BINARY_RECORD_SIZE);
    let mut header = [0u8; 80];
    header[..7].copy_from_slice(b"raymesh");
    out.extend_from_slice(&header);
    out.extend_from_slice(&(faces.len() as u32).to_le_bytes());

    for (corners, normal) in faces {
        for v in std::iter::once(normal).chain(corners.iter()) {
            for c in v.to_array() {
                out.extend_from_slice(&c.to_le_bytes());
            }
        }
        out.extend_from_slice(&0u16.to_le_bytes());
    }
    out
}
