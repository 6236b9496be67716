pub mod camera;
pub mod constants;
pub mod error;
pub mod imaging;
pub mod mesh;
pub mod observation;
pub mod params;
pub mod projection;
pub mod scene;
pub mod shading;

pub use camera::*;
pub use constants::*;
pub use error::*;
pub use observation::*;
pub use params::*;
pub use scene::*;

// Shaders bundled as string constants
pub static SKYBOX_WGSL: &str = include_str!("../shaders/skybox.wgsl");
pub static STANDARD_WGSL: &str = include_str!("../shaders/standard.wgsl");
pub static HEATMAP_WGSL: &str = include_str!("../shaders/heatmap.wgsl");
pub static REPROJECTION_WGSL: &str = include_str!("../shaders/reprojection.wgsl");
pub static POST_WGSL: &str = include_str!("../shaders/post.wgsl");
