use thiserror::Error;

/// Errors raised while turning an uploaded document into observation bundles.
#[derive(Debug, Error)]
pub enum ObservationError {
    /// The document is not valid JSON, or a field is missing or has the wrong type.
    #[error("malformed observation document: {0}")]
    Parse(#[from] serde_json::Error),
    /// The document parsed but contained no observation records.
    #[error("observation document contains no records")]
    Empty,
    /// `cameraWidth` / `cameraHeight` must be finite and strictly positive.
    #[error("{field} must be a finite positive number, got {value}")]
    NonPositive { field: &'static str, value: f64 },
    /// A numeric field is NaN or infinite.
    #[error("{field} must be finite, got {value}")]
    NonFinite { field: &'static str, value: f64 },
    /// Clipping bounds violate `0 < near < far`.
    #[error("clipping bounds must satisfy 0 < near < far, got near={near} far={far}")]
    ClipRange { near: f64, far: f64 },
    /// The `map` reference is empty.
    #[error("map must reference an image")]
    MissingMap,
}

#[derive(Debug, Error)]
pub enum MeshError {
    #[error("stl data too short: {0} bytes")]
    Truncated(usize),
    #[error("stl declares {declared} triangles but holds {available} bytes of facet data")]
    TriangleCount { declared: usize, available: usize },
    #[error("ascii stl parse error on line {line}: {reason}")]
    Ascii { line: usize, reason: String },
    #[error("stl contains no triangles")]
    Empty,
}

#[derive(Debug, Error)]
pub enum ImageError {
    #[error("image decode failed: {0}")]
    Decode(#[from] image::ImageError),
    #[error("image has zero size")]
    ZeroSize,
    #[error("image is {width}x{height}, larger than the {max} texel limit of this device")]
    TooLarge { width: u32, height: u32, max: u32 },
    #[error("cube map faces differ in size: face {face} is {width}x{height}, expected {expected_width}x{expected_height}")]
    FaceSize {
        face: usize,
        width: u32,
        height: u32,
        expected_width: u32,
        expected_height: u32,
    },
}
