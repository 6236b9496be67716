//! GPU side of the observation collection: one uniform block, texture and
//! bind group per presented observation, plus the overlay quads that show them.

use super::helpers::{self, GpuMesh, MeshPipelineDesc};
use super::textures;
use obsview_core::constants::QUAD_SIZE;
use obsview_core::imaging::{self, Rgba8Image};
use obsview_core::mesh::MeshData;
use obsview_core::{ObservationId, ObservationUniforms, QuadUniforms, Scene};
use wgpu::util::DeviceExt;

pub(crate) struct ObservationSlot {
    pub(crate) id: ObservationId,
    uniform_buffer: wgpu::Buffer,
    #[allow(dead_code)]
    texture: wgpu::Texture,
    pub(crate) bind_group: wgpu::BindGroup,
}

/// Model matrix of one overlay quad, bound at group 2 of the reprojection pass.
struct QuadSlot {
    observation: ObservationId,
    #[allow(dead_code)]
    buffer: wgpu::Buffer,
    bind_group: wgpu::BindGroup,
}

pub(crate) struct ObservationSlots {
    /// uniform + texture + sampler; shared with the heat-map pipeline.
    pub(crate) bgl: wgpu::BindGroupLayout,
    sampler: wgpu::Sampler,
    quad_bgl: wgpu::BindGroupLayout,
    reprojection_pipeline: wgpu::RenderPipeline,
    quad: GpuMesh,
    slots: Vec<ObservationSlot>,
    quad_slots: Vec<QuadSlot>,
}

impl ObservationSlots {
    pub(crate) fn new(device: &wgpu::Device, scene_bgl: &wgpu::BindGroupLayout) -> Self {
        let bgl = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("observation_bgl"),
            entries: &[
                helpers::uniform_entry(
                    0,
                    wgpu::ShaderStages::VERTEX | wgpu::ShaderStages::FRAGMENT,
                ),
                helpers::texture_entry(1, wgpu::TextureViewDimension::D2),
                helpers::sampler_entry(2),
            ],
        });
        let quad_bgl = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("overlay_quad_bgl"),
            entries: &[helpers::uniform_entry(0, wgpu::ShaderStages::VERTEX)],
        });
        let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("reprojection_shader"),
            source: wgpu::ShaderSource::Wgsl(obsview_core::REPROJECTION_WGSL.into()),
        });
        let layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("reprojection_pl"),
            bind_group_layouts: &[scene_bgl, &bgl, &quad_bgl],
            push_constant_ranges: &[],
        });
        let reprojection_pipeline = helpers::make_mesh_pipeline(
            device,
            MeshPipelineDesc {
                label: "reprojection_pipeline",
                layout: &layout,
                shader: &shader,
                depth: helpers::depth_state(wgpu::CompareFunction::Less, true),
                // Quads are visible from both sides.
                cull_mode: None,
            },
        );
        Self {
            bgl,
            sampler: textures::linear_sampler(
                device,
                "observation_sampler",
                wgpu::AddressMode::ClampToEdge,
            ),
            quad_bgl,
            reprojection_pipeline,
            quad: GpuMesh::new(device, "overlay_quad", &MeshData::plane(QUAD_SIZE)),
            slots: Vec::new(),
            quad_slots: Vec::new(),
        }
    }

    pub(crate) fn slots(&self) -> &[ObservationSlot] {
        &self.slots
    }

    /// Give every observation in `scene` a slot. New slots start with a black
    /// image, which the heat map treats as fully masked until the real one arrives.
    pub(crate) fn sync(&mut self, device: &wgpu::Device, queue: &wgpu::Queue, scene: &Scene) {
        for obs in scene.observations() {
            if self.slots.iter().any(|s| s.id == obs.id) {
                continue;
            }
            let uniform_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
                label: Some("observation_uniforms"),
                contents: bytemuck::bytes_of::<ObservationUniforms>(&obs.uniforms),
                usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            });
            let (texture, view) = textures::upload_observation(
                device,
                queue,
                "observation_placeholder",
                &imaging::placeholder_rgba8(),
            );
            let bind_group = self.bind_group(device, &uniform_buffer, &view);
            log::debug!("[render] slot for observation #{}", obs.id.0);
            self.slots.push(ObservationSlot {
                id: obs.id,
                uniform_buffer,
                texture,
                bind_group,
            });
        }
        for quad in scene.quads() {
            if self.quad_slots.iter().any(|q| q.observation == quad.observation) {
                continue;
            }
            let buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
                label: Some("overlay_quad_uniforms"),
                contents: bytemuck::bytes_of::<QuadUniforms>(&quad.uniforms()),
                usage: wgpu::BufferUsages::UNIFORM,
            });
            let bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
                label: Some("overlay_quad_bg"),
                layout: &self.quad_bgl,
                entries: &[wgpu::BindGroupEntry {
                    binding: 0,
                    resource: buffer.as_entire_binding(),
                }],
            });
            self.quad_slots.push(QuadSlot {
                observation: quad.observation,
                buffer,
                bind_group,
            });
        }
    }

    /// Swap in the decoded image of an observation. Returns false for unknown ids.
    pub(crate) fn set_texture(
        &mut self,
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        id: ObservationId,
        image: &Rgba8Image,
    ) -> bool {
        let Some(index) = self.slots.iter().position(|s| s.id == id) else {
            return false;
        };
        let (texture, view) = textures::upload_observation(device, queue, "observation", image);
        let bind_group = self.bind_group(device, &self.slots[index].uniform_buffer, &view);
        let slot = &mut self.slots[index];
        slot.texture = texture;
        slot.bind_group = bind_group;
        true
    }

    fn bind_group(
        &self,
        device: &wgpu::Device,
        uniform_buffer: &wgpu::Buffer,
        view: &wgpu::TextureView,
    ) -> wgpu::BindGroup {
        device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("observation_bg"),
            layout: &self.bgl,
            entries: &[
                wgpu::BindGroupEntry {
                    binding: 0,
                    resource: uniform_buffer.as_entire_binding(),
                },
                wgpu::BindGroupEntry {
                    binding: 1,
                    resource: wgpu::BindingResource::TextureView(view),
                },
                wgpu::BindGroupEntry {
                    binding: 2,
                    resource: wgpu::BindingResource::Sampler(&self.sampler),
                },
            ],
        })
    }

    /// One draw per overlay quad in `scene`. The quad pose comes from group 2,
    /// its observation image and projection from group 1.
    pub(crate) fn draw_quads<'p>(
        &self,
        rpass: &mut wgpu::RenderPass<'p>,
        scene_bg: &wgpu::BindGroup,
        scene: &Scene,
    ) {
        if scene.quads().is_empty() {
            return;
        }
        rpass.set_pipeline(&self.reprojection_pipeline);
        rpass.set_bind_group(0, scene_bg, &[]);
        for quad in scene.quads() {
            let slot = self.slots.iter().find(|s| s.id == quad.observation);
            let pose = self.quad_slots.iter().find(|q| q.observation == quad.observation);
            let (Some(slot), Some(pose)) = (slot, pose) else {
                continue;
            };
            rpass.set_bind_group(1, &slot.bind_group, &[]);
            rpass.set_bind_group(2, &pose.bind_group, &[]);
            self.quad.draw(rpass);
        }
    }
}
