use obsview_core::{
    step_frame, ModelSpin, OrbitCamera, RenderParams, ShadingMode, ORBIT_MAX_DISTANCE,
    ORBIT_MIN_DISTANCE, ROTATE_STEP,
};

#[test]
fn defaults_spin_with_standard_shading() {
    let params = RenderParams::default();
    assert!(params.rotate);
    assert!(!params.heat_map);
    assert_eq!(params.shading_mode(), ShadingMode::Standard);
}

#[test]
fn heat_map_toggle_switches_mode() {
    let mut spin = ModelSpin::default();
    let mut params = RenderParams::default();
    params.heat_map = true;
    assert_eq!(step_frame(&mut spin, &params).mode, ShadingMode::HeatMap);
    params.heat_map = false;
    assert_eq!(step_frame(&mut spin, &params).mode, ShadingMode::Standard);
}

#[test]
fn rotate_off_freezes_and_resumes_without_snap_back() {
    let mut spin = ModelSpin::default();
    let mut params = RenderParams::default();
    for _ in 0..3 {
        step_frame(&mut spin, &params);
    }
    let frozen_at = spin.yaw;
    assert!((frozen_at - 3.0 * ROTATE_STEP).abs() < 1e-7);

    params.rotate = false;
    for _ in 0..10 {
        assert_eq!(step_frame(&mut spin, &params).yaw, frozen_at);
    }

    params.rotate = true;
    let resumed = step_frame(&mut spin, &params).yaw;
    assert!((resumed - (frozen_at + ROTATE_STEP)).abs() < 1e-7);
}

#[test]
fn camera_starts_three_units_out_on_z() {
    let camera = OrbitCamera::default();
    assert!((camera.eye() - glam::Vec3::new(0.0, 0.0, 3.0)).length() < 1e-6);
    assert!((camera.fovy_radians - 75f32.to_radians()).abs() < 1e-6);
}

#[test]
fn zoom_is_clamped() {
    let mut camera = OrbitCamera::default();
    for _ in 0..100 {
        camera.zoom(500.0);
    }
    assert_eq!(camera.distance, ORBIT_MAX_DISTANCE);
    for _ in 0..100 {
        camera.zoom(-500.0);
    }
    assert_eq!(camera.distance, ORBIT_MIN_DISTANCE);
}

#[test]
fn pitch_never_flips_over_the_pole() {
    let mut camera = OrbitCamera::default();
    camera.rotate(0.0, 100_000.0);
    assert!(camera.pitch < std::f32::consts::FRAC_PI_2);
    let view = camera.view_matrix();
    assert!(view.is_finite());
}

#[test]
fn viewport_sets_aspect() {
    let mut camera = OrbitCamera::default();
    camera.set_viewport(1600, 900);
    assert!((camera.aspect - 16.0 / 9.0).abs() < 1e-6);
    camera.set_viewport(0, 0);
    assert_eq!(camera.aspect, 1.0);
}
