// Page contract and renderer settings for the web frontend

// Element ids (created when the page does not provide them)
pub const CANVAS_ID: &str = "app-canvas";
pub const SETTINGS_PANEL_ID: &str = "settings-panel";
pub const STATUS_BANNER_ID: &str = "status-banner";
pub const ROTATE_TOGGLE_ID: &str = "param-rotate";
pub const HEAT_MAP_TOGGLE_ID: &str = "param-heat-map";
pub const UPLOAD_BUTTON_ID: &str = "upload-observations";
pub const FILE_INPUT_ID: &str = "observation-file";

// Offscreen formats
pub const HDR_FORMAT: wgpu::TextureFormat = wgpu::TextureFormat::Rgba16Float;
pub const DEPTH_FORMAT: wgpu::TextureFormat = wgpu::TextureFormat::Depth32Float;
pub const OBSERVATION_TEXTURE_FORMAT: wgpu::TextureFormat = wgpu::TextureFormat::Rgba8Unorm;
pub const SKYBOX_TEXTURE_FORMAT: wgpu::TextureFormat = wgpu::TextureFormat::Rgba8UnormSrgb;

// Scene pass clear colour (hidden behind the skybox once it is drawn)
pub const CLEAR_COLOR: wgpu::Color = wgpu::Color {
    r: 0.0,
    g: 0.0,
    b: 0.0,
    a: 1.0,
};

// Environment lighting strength for the standard material
pub const ENVIRONMENT_INTENSITY: f32 = 1.0;

// Seconds between frame-rate log lines
pub const FPS_LOG_INTERVAL_SEC: f32 = 5.0;
