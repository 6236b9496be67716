use glam::{Mat4, Quat, Vec2, Vec3};
use obsview_core::shading::HeatMapFragment;
use obsview_core::{
    ingest, ingest_document, ObservationId, ObservationRecord, ObservationUniforms, QuadUniforms,
    Scene, TextureState, Vec3Record, QUAD_SIZE,
};

const SCENARIO: &str = r#"{
    "cameraPosition": {"x": 0, "y": 0, "z": 5},
    "cameraRotation": {"x": 0, "y": 0, "z": 0},
    "cameraWidth": 16,
    "cameraHeight": 9,
    "cameraNear": 0.1,
    "cameraFar": 100,
    "map": "mask.png"
}"#;

fn rotated(position: [f32; 3], rotation: [f32; 3], map: &str) -> obsview_core::ObservationBundle {
    ingest(&ObservationRecord {
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
        camera_width: 4.0,
        camera_height: 3.0,
        camera_near: 0.1,
        camera_far: 50.0,
        map: map.into(),
    })
    .expect("valid observation")
}

#[test]
fn uniform_block_is_sixteen_byte_aligned() {
    assert_eq!(std::mem::size_of::<ObservationUniforms>() % 16, 0);
    assert_eq!(std::mem::size_of::<ObservationUniforms>(), 208);
}

#[test]
fn scenario_creates_one_quad_at_the_pose() {
    let mut scene = Scene::new();
    assert!(scene.is_empty());
    for bundle in ingest_document(SCENARIO).unwrap() {
        scene.present(bundle);
    }
    assert_eq!(scene.len(), 1);
    let quad = &scene.quads()[0];
    assert_eq!(quad.position, Vec3::new(0.0, 0.0, 5.0));
    assert_eq!(quad.size, QUAD_SIZE);
    assert_eq!(quad.rotation, Quat::IDENTITY);
    let latest = scene.latest().unwrap();
    assert_eq!(latest.bundle.texture, "mask.png");
    assert!((latest.uniforms.aspect - 16.0 / 9.0).abs() < 1e-6);
    assert_eq!(latest.texture, TextureState::Pending);
}

#[test]
fn quad_pose_matches_observation_transform() {
    let mut scene = Scene::new();
    let bundle = rotated([1.0, 2.0, 3.0], [0.4, -0.8, 1.3], "a.png");
    let transform = bundle.transform;
    scene.present(bundle);
    let model = scene.quads()[0].model_matrix();
    assert!(model.abs_diff_eq(transform, 1e-6), "{model:?} vs {transform:?}");
}

#[test]
fn quad_uniforms_carry_the_quad_model_matrix() {
    let mut scene = Scene::new();
    scene.present(rotated([-2.0, 0.5, 4.0], [0.0, 1.1, 0.3], "a.png"));
    let quad = &scene.quads()[0];
    let block = quad.uniforms();
    assert_eq!(std::mem::size_of::<QuadUniforms>(), 64);
    assert_eq!(Mat4::from_cols_array_2d(&block.model), quad.model_matrix());
    assert_eq!(block.model[3], [-2.0, 0.5, 4.0, 1.0]);
}

#[test]
fn second_upload_keeps_first_quad_and_replaces_latest() {
    let mut scene = Scene::new();
    let first = scene.present(rotated([0.0, 0.0, 5.0], [0.0; 3], "first.png"));
    let second = scene.present(rotated([3.0, 0.0, 5.0], [0.0, 0.5, 0.0], "second.png"));
    assert_ne!(first, second);
    assert_eq!(scene.quads().len(), 2);
    assert_eq!(scene.quads()[0].observation, first);
    assert_eq!(scene.quads()[0].position, Vec3::new(0.0, 0.0, 5.0));
    assert_eq!(scene.latest().unwrap().id, second);
    assert_eq!(scene.latest().unwrap().bundle.texture, "second.png");
    assert_eq!(scene.get(first).unwrap().bundle.texture, "first.png");
}

#[test]
fn texture_states_are_tracked_per_observation() {
    let mut scene = Scene::new();
    let a = scene.present(rotated([0.0, 0.0, 5.0], [0.0; 3], "a.png"));
    let b = scene.present(rotated([0.0, 0.0, 6.0], [0.0; 3], "b.png"));
    assert_eq!(scene.pending_textures(), 2);
    assert!(scene.set_texture_state(a, TextureState::Ready));
    assert!(scene.set_texture_state(b, TextureState::Failed));
    assert_eq!(scene.pending_textures(), 0);
    assert!(!scene.set_texture_state(ObservationId(99), TextureState::Ready));
}

#[test]
fn heat_map_union_over_scene() {
    let mut scene = Scene::new();
    assert_eq!(
        scene.heat_map_fragment(Vec3::ZERO, |_, _| Vec3::ONE),
        HeatMapFragment::Discard
    );
    let dark = scene.present(rotated([0.0, 0.0, 5.0], [0.0; 3], "dark.png"));
    scene.present(rotated([0.0, 0.0, 8.0], [0.0; 3], "bright.png"));
    let mask = |id: ObservationId, _uv: Vec2| if id == dark { Vec3::ZERO } else { Vec3::ONE };
    assert!(matches!(
        scene.heat_map_fragment(Vec3::ZERO, mask),
        HeatMapFragment::Paint(_)
    ));
    assert_eq!(
        scene.heat_map_fragment(Vec3::ZERO, |_, _| Vec3::splat(0.05)),
        HeatMapFragment::Discard
    );
}
