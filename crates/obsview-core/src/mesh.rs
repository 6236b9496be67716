//! Triangle meshes: STL import for the main model and the overlay quad geometry.

use crate::error::MeshError;
use glam::Vec3;

const STL_HEADER_LEN: usize = 80;
const STL_FACET_LEN: usize = 50;

#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct Vertex {
    pub position: [f32; 3],
    pub normal: [f32; 3],
    pub uv: [f32; 2],
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct MeshData {
    pub vertices: Vec<Vertex>,
    pub indices: Vec<u32>,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Bounds {
    pub min: Vec3,
    pub max: Vec3,
}

impl Bounds {
    pub fn center(&self) -> Vec3 {
        (self.min + self.max) * 0.5
    }

    pub fn extent(&self) -> Vec3 {
        self.max - self.min
    }
}

fn face_normal(a: Vec3, b: Vec3, c: Vec3) -> Vec3 {
    (b - a).cross(c - a).normalize_or_zero()
}

impl MeshData {
    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    fn push_facet(&mut self, stored_normal: Vec3, corners: [Vec3; 3]) {
        // Some exporters write zero normals; fall back to the winding.
        let normal = if stored_normal.length_squared() > 1e-12 {
            stored_normal.normalize()
        } else {
            face_normal(corners[0], corners[1], corners[2])
        };
        for p in corners {
            self.indices.push(self.vertices.len() as u32);
            self.vertices.push(Vertex {
                position: p.to_array(),
                normal: normal.to_array(),
                uv: [0.0, 0.0],
            });
        }
    }

    pub fn bounds(&self) -> Option<Bounds> {
        let first = Vec3::from(self.vertices.first()?.position);
        let (min, max) = self
            .vertices
            .iter()
            .map(|v| Vec3::from(v.position))
            .fold((first, first), |(lo, hi), p| (lo.min(p), hi.max(p)));
        Some(Bounds { min, max })
    }

    /// Translate so the bounding box is centred on the origin.
    pub fn centered(mut self) -> Self {
        if let Some(b) = self.bounds() {
            let c = b.center();
            for v in &mut self.vertices {
                v.position = (Vec3::from(v.position) - c).to_array();
            }
        }
        self
    }

    /// Square in the local XY plane facing +Z, `size` units on a side, UVs with
    /// (0, 0) at the bottom-left corner.
    pub fn plane(size: f32) -> Self {
        let h = size * 0.5;
        let corner = |x: f32, y: f32, u: f32, v: f32| Vertex {
            position: [x, y, 0.0],
            normal: [0.0, 0.0, 1.0],
            uv: [u, v],
        };
        Self {
            vertices: vec![
                corner(-h, -h, 0.0, 0.0),
                corner(h, -h, 1.0, 0.0),
                corner(h, h, 1.0, 1.0),
                corner(-h, h, 0.0, 1.0),
            ],
            indices: vec![0, 1, 2, 0, 2, 3],
        }
    }
}

/// Parse binary or ASCII STL.
pub fn parse_stl(bytes: &[u8]) -> Result<MeshData, MeshError> {
    if is_binary_stl(bytes) {
        parse_binary_stl(bytes)
    } else if starts_with_solid(bytes) {
        parse_ascii_stl(bytes)
    } else {
        parse_binary_stl(bytes)
    }
}

fn starts_with_solid(bytes: &[u8]) -> bool {
    let start = bytes
        .iter()
        .position(|b| !b.is_ascii_whitespace())
        .unwrap_or(bytes.len());
    bytes[start..].starts_with(b"solid")
}

fn binary_triangle_count(bytes: &[u8]) -> Option<usize> {
    let count = bytes.get(STL_HEADER_LEN..STL_HEADER_LEN + 4)?;
    Some(u32::from_le_bytes([count[0], count[1], count[2], count[3]]) as usize)
}

// A binary file may also start with "solid"; the exact size settles it.
fn is_binary_stl(bytes: &[u8]) -> bool {
    binary_triangle_count(bytes)
        .and_then(|n| n.checked_mul(STL_FACET_LEN))
        .and_then(|body| body.checked_add(STL_HEADER_LEN + 4))
        .is_some_and(|total| bytes.len() == total)
}

fn read_vec3(chunk: &[u8]) -> Vec3 {
    let f = |i: usize| f32::from_le_bytes([chunk[i], chunk[i + 1], chunk[i + 2], chunk[i + 3]]);
    Vec3::new(f(0), f(4), f(8))
}

fn parse_binary_stl(bytes: &[u8]) -> Result<MeshData, MeshError> {
    let declared = binary_triangle_count(bytes).ok_or(MeshError::Truncated(bytes.len()))?;
    let body = &bytes[STL_HEADER_LEN + 4..];
    let short = || MeshError::TriangleCount {
        declared,
        available: body.len(),
    };
    // A header count past what the body holds must not size any allocation.
    let needed = declared.checked_mul(STL_FACET_LEN).ok_or_else(short)?;
    if body.len() < needed {
        return Err(short());
    }
    if declared == 0 {
        return Err(MeshError::Empty);
    }
    let corner_count = declared.checked_mul(3).ok_or_else(short)?;
    let mut mesh = MeshData {
        vertices: Vec::with_capacity(corner_count),
        indices: Vec::with_capacity(corner_count),
    };
    for facet in body.chunks_exact(STL_FACET_LEN).take(declared) {
        let normal = read_vec3(&facet[0..12]);
        let corners = [
            read_vec3(&facet[12..24]),
            read_vec3(&facet[24..36]),
            read_vec3(&facet[36..48]),
        ];
        mesh.push_facet(normal, corners);
    }
    Ok(mesh)
}

fn parse_floats<'a>(
    mut parts: impl Iterator<Item = &'a str>,
    line: usize,
) -> Result<Vec3, MeshError> {
    let mut next = || -> Result<f32, MeshError> {
        let token = parts.next().ok_or_else(|| MeshError::Ascii {
            line,
            reason: "expected three coordinates".to_string(),
        })?;
        token.parse::<f32>().map_err(|e| MeshError::Ascii {
            line,
            reason: format!("bad number '{}': {}", token, e),
        })
    };
    Ok(Vec3::new(next()?, next()?, next()?))
}

fn parse_ascii_stl(bytes: &[u8]) -> Result<MeshData, MeshError> {
    let text = String::from_utf8_lossy(bytes);
    let mut mesh = MeshData::default();
    let mut normal = Vec3::ZERO;
    let mut corners: Vec<Vec3> = Vec::with_capacity(3);

    for (i, raw) in text.lines().enumerate() {
        let line = i + 1;
        let mut parts = raw.split_whitespace();
        match parts.next() {
            Some("facet") => {
                if parts.next() != Some("normal") {
                    return Err(MeshError::Ascii {
                        line,
                        reason: "expected 'facet normal'".to_string(),
                    });
                }
                normal = parse_floats(parts, line)?;
                corners.clear();
            }
            Some("vertex") => corners.push(parse_floats(parts, line)?),
            Some("endfacet") => {
                if corners.len() != 3 {
                    return Err(MeshError::Ascii {
                        line,
                        reason: format!("facet has {} vertices", corners.len()),
                    });
                }
                mesh.push_facet(normal, [corners[0], corners[1], corners[2]]);
                corners.clear();
            }
            _ => {}
        }
    }
    if mesh.indices.is_empty() {
        return Err(MeshError::Empty);
    }
    Ok(mesh)
}
