//! Off-axis perspective projection for observation cameras.
//!
//! Observation cameras do not carry calibrated intrinsics. Every observation
//! uses the same horizontal half extent at the near plane and derives the
//! vertical one from the image aspect ratio.

use crate::constants::FRUSTUM_HALF_EXTENT;
use glam::{Mat4, Vec4};

/// Build an off-axis perspective matrix from six clip bounds.
///
/// Produces the OpenGL-style matrix (right-handed eye space looking down -Z,
/// clip z in [-w, w]). Points on the near plane at `(right, top)` map to NDC
/// `(1, 1)`.
pub fn perspective_off_axis(
    left: f32,
    right: f32,
    bottom: f32,
    top: f32,
    near: f32,
    far: f32,
) -> Mat4 {
    let x = 2.0 * near / (right - left);
    let y = 2.0 * near / (top - bottom);
    let a = (right + left) / (right - left);
    let b = (top + bottom) / (top - bottom);
    let c = -(far + near) / (far - near);
    let d = -2.0 * far * near / (far - near);
    Mat4::from_cols(
        Vec4::new(x, 0.0, 0.0, 0.0),
        Vec4::new(0.0, y, 0.0, 0.0),
        Vec4::new(a, b, c, -1.0),
        Vec4::new(0.0, 0.0, d, 0.0),
    )
}

/// Clip bounds of an observation camera.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ObservationFrustum {
    pub left: f32,
    pub right: f32,
    pub bottom: f32,
    pub top: f32,
    pub near: f32,
    pub far: f32,
}

impl ObservationFrustum {
    /// Bounds for an image of the given aspect ratio (`width / height`).
    pub fn from_aspect(aspect: f32, near: f32, far: f32) -> Self {
        let half_height = FRUSTUM_HALF_EXTENT / aspect;
        Self {
            left: -FRUSTUM_HALF_EXTENT,
            right: FRUSTUM_HALF_EXTENT,
            bottom: -half_height,
            top: half_height,
            near,
            far,
        }
    }

    #[inline]
    pub fn half_width(&self) -> f32 {
        (self.right - self.left) * 0.5
    }

    #[inline]
    pub fn half_height(&self) -> f32 {
        (self.top - self.bottom) * 0.5
    }

    #[inline]
    pub fn width(&self) -> f32 {
        self.right - self.left
    }

    pub fn matrix(&self) -> Mat4 {
        perspective_off_axis(
            self.left,
            self.right,
            self.bottom,
            self.top,
            self.near,
            self.far,
        )
    }
}
