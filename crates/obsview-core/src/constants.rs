use glam::Vec3;

// Shared scene/shading tuning constants used by the core and the web frontend.

// Overlay quads
pub const QUAD_SIZE: f32 = 5.0; // world-space edge length of every observation quad

// Observation frustum (fixed horizontal half extent at the near plane)
pub const FRUSTUM_HALF_EXTENT: f32 = 0.5;

// Heat-map shading
pub const MASK_THRESHOLD: f32 = 0.1; // channels strictly below this count as black
pub const HEAT_MAP_COLOR: [f32; 4] = [1.0, 1.0, 1.0, 1.0];

// Model spin (radians per frame)
pub const ROTATE_STEP: f32 = 0.005;

// Main camera
pub const CAMERA_FOV_Y_DEG: f32 = 75.0;
pub const CAMERA_NEAR: f32 = 0.1;
pub const CAMERA_FAR: f32 = 1000.0;
pub const CAMERA_START_DISTANCE: f32 = 3.0;
pub const ORBIT_MIN_DISTANCE: f32 = 0.5;
pub const ORBIT_MAX_DISTANCE: f32 = 10.0;
pub const ORBIT_ROTATE_SPEED: f32 = 0.005; // radians per pointer pixel
pub const ORBIT_ZOOM_SPEED: f32 = 0.001; // fraction of distance per wheel unit

// Model material (metallic, rough white)
pub const MODEL_BASE_COLOR: [f32; 3] = [1.0, 1.0, 1.0];
pub const MODEL_METALNESS: f32 = 1.0;
pub const MODEL_ROUGHNESS: f32 = 0.5;

// Tone mapping
pub const TONE_MAPPING_EXPOSURE: f32 = 1.0;

// Static assets (fixed paths, relative to the page)
pub const ENVIRONMENT_MAP_URL: &str = "studio_small_04_4k.hdr";
pub const MODEL_URL: &str = "randomShape.stl";
/// Cube faces in +X, -X, +Y, -Y, +Z, -Z order.
pub const SKYBOX_FACE_URLS: [&str; 6] = [
    "box.png", "box.png", "box2.png", "box2.png", "box.png", "box.png",
];

// Upload
pub const OBSERVATION_FILE_ACCEPT: &str = ".json";

#[inline]
pub fn camera_start_eye() -> Vec3 {
    Vec3::new(0.0, 0.0, CAMERA_START_DISTANCE)
}
