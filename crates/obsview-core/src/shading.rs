//! CPU rendition of the two observation shader programs.
//!
//! `reprojection.wgsl` and `heatmap.wgsl` evaluate exactly these formulas per
//! vertex/fragment. Keeping them here lets the contract be tested on the host
//! and lets the frontend answer "is this point covered" queries without the GPU.

use crate::constants::{HEAT_MAP_COLOR, MASK_THRESHOLD, QUAD_SIZE};
use crate::observation::ObservationBundle;
use crate::projection::ObservationFrustum;
use glam::{Mat4, Vec2, Vec3, Vec4};

/// Transform a world-space point into an observation's clip space.
#[inline]
pub fn observation_clip(view: Mat4, projection: Mat4, point: Vec3) -> Vec4 {
    projection * view * point.extend(1.0)
}

/// Normalized device coordinates, or `None` when the point is behind the camera.
#[inline]
pub fn perspective_divide(clip: Vec4) -> Option<Vec3> {
    (clip.w > 0.0).then(|| clip.truncate() / clip.w)
}

/// UV used by the overlay quad: the vertical axis is rescaled by `1 / (2 * aspect)`
/// before both axes are mapped from [-1, 1] to [0, 1].
#[inline]
pub fn reprojection_uv(ndc: Vec2, aspect: f32) -> Vec2 {
    let rescaled = Vec2::new(ndc.x, ndc.y / (2.0 * aspect));
    rescaled * 0.5 + Vec2::splat(0.5)
}

/// UV used by the heat-map program on the model surface. No aspect rescale.
#[inline]
pub fn heat_map_uv(ndc: Vec2) -> Vec2 {
    ndc * 0.5 + Vec2::splat(0.5)
}

#[inline]
pub fn inside_frustum(ndc: Vec3) -> bool {
    ndc.x.abs() <= 1.0 && ndc.y.abs() <= 1.0 && ndc.z.abs() <= 1.0
}

/// A mask texel is black when every colour channel is strictly below the threshold.
#[inline]
pub fn is_near_black(rgb: Vec3) -> bool {
    rgb.x < MASK_THRESHOLD && rgb.y < MASK_THRESHOLD && rgb.z < MASK_THRESHOLD
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum HeatMapFragment {
    Discard,
    Paint([f32; 4]),
}

/// Mask UV of `world_point` in one observation, if the point lies in its frustum.
pub fn heat_map_sample_uv(bundle: &ObservationBundle, world_point: Vec3) -> Option<Vec2> {
    let clip = observation_clip(bundle.view, bundle.projection, world_point);
    let ndc = perspective_divide(clip)?;
    inside_frustum(ndc).then(|| heat_map_uv(ndc.truncate()))
}

/// Shade one model fragment in heat-map mode.
///
/// The fragment is painted when at least one observation sees it and that
/// observation's mask is not black there. `sample(index, uv)` returns the
/// mask colour of the `index`-th observation at `uv`.
pub fn heat_map_fragment<'a, I, F>(world_point: Vec3, observations: I, mut sample: F) -> HeatMapFragment
where
    I: IntoIterator<Item = &'a ObservationBundle>,
    F: FnMut(usize, Vec2) -> Vec3,
{
    for (index, bundle) in observations.into_iter().enumerate() {
        if let Some(uv) = heat_map_sample_uv(bundle, world_point) {
            if !is_near_black(sample(index, uv)) {
                return HeatMapFragment::Paint(HEAT_MAP_COLOR);
            }
        }
    }
    HeatMapFragment::Discard
}

/// Eye-space depth of the plane the overlay quad samples from: the depth at
/// which a `QUAD_SIZE` wide plane exactly spans the frustum horizontally.
#[inline]
pub fn overlay_plane_depth(frustum: &ObservationFrustum) -> f32 {
    frustum.near * QUAD_SIZE / frustum.width()
}

/// Reprojection UV for a point on the overlay quad, in quad-local units.
///
/// The quad shares the observation pose, so its local frame is the
/// observation's eye frame; the point is lifted onto the image plane at
/// `overlay_plane_depth` and projected from there.
pub fn overlay_uv(bundle: &ObservationBundle, local: Vec2) -> Option<Vec2> {
    let depth = overlay_plane_depth(&bundle.frustum);
    let eye = Vec4::new(local.x, local.y, -depth, 1.0);
    let ndc = perspective_divide(bundle.projection * eye)?;
    Some(reprojection_uv(ndc.truncate(), bundle.aspect))
}
