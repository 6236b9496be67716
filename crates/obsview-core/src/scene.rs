//! Scene-side state of the projective overlay compositor.
//!
//! Every presented observation keeps its own uniform block and texture slot,
//! and gets one overlay quad that stays in the scene for the session. The
//! heat-map pass composites over the whole collection.

use crate::constants::QUAD_SIZE;
use crate::observation::ObservationBundle;
use crate::shading::{self, HeatMapFragment};
use glam::{Mat4, Quat, Vec2, Vec3};
use smallvec::SmallVec;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ObservationId(pub u32);

/// Per-observation uniform block, laid out to match `struct Observation` in WGSL.
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct ObservationUniforms {
    /// Observation pose; also the model matrix of its overlay quad.
    pub transform: [[f32; 4]; 4],
    pub view: [[f32; 4]; 4],
    pub projection: [[f32; 4]; 4],
    pub viewport: [f32; 2],
    pub aspect: f32,
    pub plane_depth: f32,
}

impl ObservationUniforms {
    pub fn from_bundle(bundle: &ObservationBundle) -> Self {
        Self {
            transform: bundle.transform.to_cols_array_2d(),
            view: bundle.view.to_cols_array_2d(),
            projection: bundle.projection.to_cols_array_2d(),
            viewport: [bundle.width, bundle.height],
            aspect: bundle.aspect,
            plane_depth: shading::overlay_plane_depth(&bundle.frustum),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TextureState {
    Pending,
    Ready,
    Failed,
}

#[derive(Clone, Debug)]
pub struct Observation {
    pub id: ObservationId,
    pub bundle: ObservationBundle,
    pub uniforms: ObservationUniforms,
    pub texture: TextureState,
}

/// Flat textured quad showing one observation.
#[derive(Clone, Debug, PartialEq)]
pub struct OverlayQuad {
    pub observation: ObservationId,
    pub position: Vec3,
    pub rotation: Quat,
    pub size: f32,
}

impl OverlayQuad {
    /// Quad geometry is built at full size, so the model matrix is rigid.
    pub fn model_matrix(&self) -> Mat4 {
        Mat4::from_rotation_translation(self.rotation, self.position)
    }

    pub fn uniforms(&self) -> QuadUniforms {
        QuadUniforms {
            model: self.model_matrix().to_cols_array_2d(),
        }
    }
}

/// Per-quad block, laid out to match `struct Quad` in `reprojection.wgsl`.
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct QuadUniforms {
    pub model: [[f32; 4]; 4],
}

#[derive(Default)]
pub struct Scene {
    observations: Vec<Observation>,
    quads: Vec<OverlayQuad>,
    next_id: u32,
}

impl Scene {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an observation and its overlay quad. Earlier observations are kept.
    pub fn present(&mut self, bundle: ObservationBundle) -> ObservationId {
        let id = ObservationId(self.next_id);
        self.next_id += 1;
        self.quads.push(OverlayQuad {
            observation: id,
            position: bundle.position,
            rotation: bundle.rotation,
            size: QUAD_SIZE,
        });
        log::info!(
            "[observations] #{} at ({:.2},{:.2},{:.2}) aspect={:.3} map={}",
            id.0,
            bundle.position.x,
            bundle.position.y,
            bundle.position.z,
            bundle.aspect,
            bundle.texture
        );
        self.observations.push(Observation {
            id,
            uniforms: ObservationUniforms::from_bundle(&bundle),
            bundle,
            texture: TextureState::Pending,
        });
        id
    }

    pub fn set_texture_state(&mut self, id: ObservationId, state: TextureState) -> bool {
        match self.observations.iter_mut().find(|o| o.id == id) {
            Some(o) => {
                o.texture = state;
                true
            }
            None => false,
        }
    }

    pub fn get(&self, id: ObservationId) -> Option<&Observation> {
        self.observations.iter().find(|o| o.id == id)
    }

    /// Most recently presented observation.
    pub fn latest(&self) -> Option<&Observation> {
        self.observations.last()
    }

    pub fn observations(&self) -> &[Observation] {
        &self.observations
    }

    pub fn quads(&self) -> &[OverlayQuad] {
        &self.quads
    }

    pub fn len(&self) -> usize {
        self.observations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.observations.is_empty()
    }

    pub fn pending_textures(&self) -> usize {
        self.observations
            .iter()
            .filter(|o| o.texture == TextureState::Pending)
            .count()
    }

    /// Heat-map shading of a model point over every observation.
    pub fn heat_map_fragment<F>(&self, world_point: Vec3, mut sample: F) -> HeatMapFragment
    where
        F: FnMut(ObservationId, Vec2) -> Vec3,
    {
        let ids: SmallVec<[ObservationId; 8]> = self.observations.iter().map(|o| o.id).collect();
        shading::heat_map_fragment(
            world_point,
            self.observations.iter().map(|o| &o.bundle),
            |index, uv| sample(ids[index], uv),
        )
    }
}
