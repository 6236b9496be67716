// Host-side tests for observation parsing, validation and ingestion.

use glam::{Quat, Vec3, Vec4};
use obsview_core::{
    euler_xyz_to_quat, ingest, ingest_document, parse_document, ObservationError,
    ObservationRecord, Vec3Record,
};

fn record(position: [f32; 3], rotation: [f32; 3], width: f32, height: f32) -> ObservationRecord {
    ObservationRecord {
        camera_position: Vec3Record {
            x: position[0],
            y: position[1],
            z: position[2],
        },
        camera_rotation: Vec3Record {
            x: rotation[0],
            y: rotation[1],
            z: rotation[2],
        },
        camera_width: width,
        camera_height: height,
        camera_near: 0.1,
        camera_far: 100.0,
        map: "mask.png".to_string(),
    }
}

const SCENARIO: &str = r#"{
    "cameraPosition": {"x": 0, "y": 0, "z": 5},
    "cameraRotation": {"x": 0, "y": 0, "z": 0},
    "cameraWidth": 16,
    "cameraHeight": 9,
    "cameraNear": 0.1,
    "cameraFar": 100,
    "map": "mask.png"
}"#;

#[test]
fn parses_single_record_document() {
    let records = parse_document(SCENARIO).expect("valid document");
    assert_eq!(records.len(), 1);
    let r = &records[0];
    assert_eq!(r.camera_position.z, 5.0);
    assert_eq!(r.camera_width, 16.0);
    assert_eq!(r.camera_height, 9.0);
    assert_eq!(r.map, "mask.png");
}

#[test]
fn parses_array_document_in_order() {
    let text = format!("[{}, {}]", SCENARIO, SCENARIO.replace("mask.png", "second.png"));
    let records = parse_document(&text).expect("valid array document");
    assert_eq!(records.len(), 2);
    assert_eq!(records[0].map, "mask.png");
    assert_eq!(records[1].map, "second.png");
}

#[test]
fn rejects_invalid_json_syntax() {
    let err = parse_document("{ cameraPosition: ").unwrap_err();
    assert!(matches!(err, ObservationError::Parse(_)), "got {err:?}");
}

#[test]
fn missing_field_error_names_the_field() {
    let text = SCENARIO.replace("\"cameraNear\": 0.1,", "");
    let err = parse_document(&text).unwrap_err();
    assert!(matches!(err, ObservationError::Parse(_)));
    assert!(err.to_string().contains("cameraNear"), "message: {err}");
}

#[test]
fn non_numeric_field_is_a_parse_error() {
    let text = SCENARIO.replace("\"cameraWidth\": 16", "\"cameraWidth\": \"wide\"");
    assert!(matches!(
        parse_document(&text),
        Err(ObservationError::Parse(_))
    ));
}

#[test]
fn empty_array_is_rejected() {
    assert!(matches!(parse_document("[]"), Err(ObservationError::Empty)));
}

#[test]
fn zero_height_is_rejected_with_field_name() {
    let err = ingest(&record([0.0; 3], [0.0; 3], 4.0, 0.0)).unwrap_err();
    match err {
        ObservationError::NonPositive { field, value } => {
            assert_eq!(field, "cameraHeight");
            assert_eq!(value, 0.0);
        }
        other => panic!("unexpected error {other:?}"),
    }
}

#[test]
fn negative_width_is_rejected() {
    let err = ingest(&record([0.0; 3], [0.0; 3], -1.0, 2.0)).unwrap_err();
    assert!(matches!(
        err,
        ObservationError::NonPositive {
            field: "cameraWidth",
            ..
        }
    ));
}

#[test]
fn clip_range_must_be_ordered() {
    let mut r = record([0.0; 3], [0.0; 3], 4.0, 3.0);
    r.camera_near = 10.0;
    r.camera_far = 10.0;
    assert!(matches!(ingest(&r), Err(ObservationError::ClipRange { .. })));
    r.camera_near = 0.0;
    assert!(matches!(ingest(&r), Err(ObservationError::ClipRange { .. })));
}

#[test]
fn non_finite_pose_is_rejected() {
    let r = record([f32::NAN, 0.0, 0.0], [0.0; 3], 4.0, 3.0);
    assert!(matches!(
        ingest(&r),
        Err(ObservationError::NonFinite {
            field: "cameraPosition.x",
            ..
        })
    ));
}

#[test]
fn overflowing_aspect_is_rejected() {
    let r = record([0.0; 3], [0.0; 3], 3e38, 1e-30);
    assert!(matches!(
        ingest(&r),
        Err(ObservationError::NonFinite { field: "aspect", .. })
    ));
}

#[test]
fn overflowing_projection_is_rejected() {
    let text = SCENARIO
        .replace("\"cameraNear\": 0.1", "\"cameraNear\": 1")
        .replace("\"cameraFar\": 100", "\"cameraFar\": 3e38");
    let err = ingest_document(&text).expect_err("far plane overflows the projection");
    assert!(matches!(
        err,
        ObservationError::NonFinite {
            field: "projection",
            ..
        }
    ));
    assert!(err.to_string().contains("projection"), "message: {err}");
}

#[test]
fn blank_map_is_rejected() {
    let mut r = record([0.0; 3], [0.0; 3], 4.0, 3.0);
    r.map = "  ".to_string();
    assert!(matches!(ingest(&r), Err(ObservationError::MissingMap)));
}

#[test]
fn document_with_one_bad_record_yields_nothing() {
    let bad = SCENARIO.replace("\"cameraHeight\": 9", "\"cameraHeight\": 0");
    let text = format!("[{}, {}]", SCENARIO, bad);
    assert!(ingest_document(&text).is_err());
}

#[test]
fn transform_is_rigid_with_exact_translation() {
    let angles = [
        [0.0, 0.0, 0.0],
        [0.3, -1.2, 2.0],
        [std::f32::consts::FRAC_PI_2, 0.7, -0.4],
        [-2.9, 3.1, 1.5],
    ];
    let position = [1.25, -3.5, 7.0];
    for rot in angles {
        let bundle = ingest(&record(position, rot, 4.0, 3.0)).expect("valid record");
        let m = bundle.transform;
        let cols = [m.x_axis.truncate(), m.y_axis.truncate(), m.z_axis.truncate()];
        for (i, a) in cols.iter().enumerate() {
            assert!((a.length() - 1.0).abs() < 1e-5, "column {i} not unit for {rot:?}");
            for b in cols.iter().skip(i + 1) {
                assert!(a.dot(*b).abs() < 1e-5, "columns not orthogonal for {rot:?}");
            }
        }
        assert!(m.determinant() > 0.0, "rotation must not mirror");
        assert_eq!(m.w_axis, Vec4::new(1.25, -3.5, 7.0, 1.0));
    }
}

#[test]
fn view_inverts_transform() {
    let bundle = ingest(&record([2.0, 1.0, -4.0], [0.4, 0.2, -0.9], 4.0, 3.0)).unwrap();
    let round_trip = bundle.view * bundle.transform;
    let p = Vec3::new(0.3, -0.7, 1.9);
    assert!((round_trip.transform_point3(p) - p).length() < 1e-5);
    // The observation camera sits at the eye-space origin.
    assert!(bundle.view.transform_point3(bundle.position).length() < 1e-5);
}

#[test]
fn euler_order_is_intrinsic_xyz() {
    // Reference: half-angle composition for intrinsic XYZ.
    let (x, y, z) = (0.3_f32, -1.1_f32, 2.2_f32);
    let (s1, c1) = (x / 2.0).sin_cos();
    let (s2, c2) = (y / 2.0).sin_cos();
    let (s3, c3) = (z / 2.0).sin_cos();
    let expected = Quat::from_xyzw(
        s1 * c2 * c3 + c1 * s2 * s3,
        c1 * s2 * c3 - s1 * c2 * s3,
        c1 * c2 * s3 + s1 * s2 * c3,
        c1 * c2 * c3 - s1 * s2 * s3,
    );
    let q = euler_xyz_to_quat(Vec3::new(x, y, z));
    assert!(q.dot(expected).abs() > 1.0 - 1e-6, "q={q:?} expected={expected:?}");
}

#[test]
fn aspect_round_trips_exactly() {
    for (w, h) in [(16.0_f32, 9.0_f32), (4.0, 2.0), (1920.0, 1080.0), (3.0, 7.0)] {
        let bundle = ingest(&record([0.0; 3], [0.0; 3], w, h)).unwrap();
        assert_eq!(bundle.aspect, w / h);
        assert_eq!(bundle.width, w);
        assert_eq!(bundle.height, h);
    }
}

#[test]
fn scenario_record_bundle() {
    let bundles = ingest_document(SCENARIO).expect("scenario ingests");
    let b = &bundles[0];
    assert_eq!(b.position, Vec3::new(0.0, 0.0, 5.0));
    assert_eq!(b.rotation, Quat::IDENTITY);
    assert_eq!(b.texture, "mask.png");
    assert!((b.aspect - 1.778).abs() < 1e-3);
}
