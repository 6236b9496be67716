use glam::Vec3;
use obsview_core::mesh::{parse_stl, MeshData};
use obsview_core::MeshError;

fn binary_stl(facets: &[([f32; 3], [[f32; 3]; 3])]) -> Vec<u8> {
    let mut out = vec![0u8; 80];
    // Header text must not confuse detection.
    out[..5].copy_from_slice(b"solid");
    out.extend_from_slice(&(facets.len() as u32).to_le_bytes());
    for (normal, corners) in facets {
        for v in std::iter::once(normal).chain(corners.iter()) {
            for c in v {
                out.extend_from_slice(&c.to_le_bytes());
            }
        }
        out.extend_from_slice(&[0, 0]);
    }
    out
}

const TRIANGLE: [[f32; 3]; 3] = [[0.0, 0.0, 0.0], [1.0, 0.0, 0.0], [0.0, 1.0, 0.0]];

#[test]
fn parses_binary_with_solid_header() {
    let bytes = binary_stl(&[([0.0, 0.0, 1.0], TRIANGLE), ([0.0, 0.0, 1.0], TRIANGLE)]);
    let mesh = parse_stl(&bytes).expect("binary STL");
    assert_eq!(mesh.triangle_count(), 2);
    assert_eq!(mesh.vertices.len(), 6);
    assert_eq!(mesh.vertices[1].position, [1.0, 0.0, 0.0]);
    assert_eq!(mesh.indices, vec![0, 1, 2, 3, 4, 5]);
}

#[test]
fn zero_normal_falls_back_to_winding() {
    let bytes = binary_stl(&[([0.0, 0.0, 0.0], TRIANGLE)]);
    let mesh = parse_stl(&bytes).unwrap();
    assert_eq!(mesh.vertices[0].normal, [0.0, 0.0, 1.0]);
}

#[test]
fn truncated_binary_reports_available_bytes() {
    let mut bytes = binary_stl(&[([0.0, 0.0, 1.0], TRIANGLE)]);
    bytes[0] = b'x';
    // Claim three triangles but only carry one.
    bytes[80..84].copy_from_slice(&3u32.to_le_bytes());
    match parse_stl(&bytes) {
        Err(MeshError::TriangleCount {
            declared,
            available,
        }) => {
            assert_eq!(declared, 3);
            assert_eq!(available, 50);
        }
        other => panic!("unexpected {other:?}"),
    }
}

#[test]
fn maximal_declared_count_is_rejected_without_allocating() {
    let mut bytes = binary_stl(&[([0.0, 0.0, 1.0], TRIANGLE)]);
    bytes[0] = b'x';
    bytes[80..84].copy_from_slice(&u32::MAX.to_le_bytes());
    match parse_stl(&bytes) {
        Err(MeshError::TriangleCount {
            declared,
            available,
        }) => {
            assert_eq!(declared, u32::MAX as usize);
            assert_eq!(available, 50);
        }
        other => panic!("unexpected {other:?}"),
    }
}

#[test]
fn short_file_is_truncated() {
    assert!(matches!(parse_stl(&[1, 2, 3]), Err(MeshError::Truncated(3))));
}

#[test]
fn parses_ascii() {
    let text = "solid cube\n\
        facet normal 0 0 1\n\
          outer loop\n\
            vertex 0 0 0\n\
            vertex 1 0 0\n\
            vertex 0 1 0\n\
          endloop\n\
        endfacet\n\
        facet normal 0 0 0\n\
          outer loop\n\
            vertex 0 0 0\n\
            vertex 0 1 0\n\
            vertex 1 0 0\n\
          endloop\n\
        endfacet\n\
        endsolid cube\n";
    let mesh = parse_stl(text.as_bytes()).expect("ascii STL");
    assert_eq!(mesh.triangle_count(), 2);
    assert_eq!(mesh.vertices[3].normal, [0.0, 0.0, -1.0]);
}

#[test]
fn ascii_errors_carry_line_numbers() {
    let text = "solid bad\nfacet normal 0 0 1\nouter loop\nvertex 0 zero 0\n";
    match parse_stl(text.as_bytes()) {
        Err(MeshError::Ascii { line, reason }) => {
            assert_eq!(line, 4);
            assert!(reason.contains("zero"), "{reason}");
        }
        other => panic!("unexpected {other:?}"),
    }
}

#[test]
fn ascii_without_facets_is_empty() {
    assert!(matches!(
        parse_stl(b"solid nothing\nendsolid nothing\n"),
        Err(MeshError::Empty)
    ));
}

#[test]
fn centred_mesh_bounds_straddle_origin() {
    let bytes = binary_stl(&[(
        [0.0, 0.0, 1.0],
        [[2.0, 2.0, 2.0], [4.0, 2.0, 2.0], [2.0, 6.0, 4.0]],
    )]);
    let mesh = parse_stl(&bytes).unwrap().centered();
    let b = mesh.bounds().unwrap();
    assert!(b.center().length() < 1e-6);
    assert_eq!(b.extent(), Vec3::new(2.0, 4.0, 2.0));
}

#[test]
fn plane_is_square_with_bottom_left_uv_origin() {
    let plane = MeshData::plane(5.0);
    assert_eq!(plane.vertices.len(), 4);
    assert_eq!(plane.triangle_count(), 2);
    let b = plane.bounds().unwrap();
    assert_eq!(b.min, Vec3::new(-2.5, -2.5, 0.0));
    assert_eq!(b.max, Vec3::new(2.5, 2.5, 0.0));
    let bottom_left = plane
        .vertices
        .iter()
        .find(|v| v.position == [-2.5, -2.5, 0.0])
        .unwrap();
    assert_eq!(bottom_left.uv, [0.0, 0.0]);
}
