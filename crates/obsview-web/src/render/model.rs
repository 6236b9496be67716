use super::helpers::{self, GpuMesh, MeshPipelineDesc};
use super::observations::ObservationSlots;
use super::textures;
use obsview_core::imaging::HdrImage;
use obsview_core::mesh::MeshData;
use obsview_core::ShadingMode;

/// The loaded model with its two shading pipelines.
pub(crate) struct ModelPass {
    standard_pipeline: wgpu::RenderPipeline,
    heat_map_pipeline: wgpu::RenderPipeline,
    env_bgl: wgpu::BindGroupLayout,
    env_bind_group: wgpu::BindGroup,
    #[allow(dead_code)]
    env_texture: wgpu::Texture,
    mesh: Option<GpuMesh>,
}

impl ModelPass {
    pub(crate) fn new(
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        scene_bgl: &wgpu::BindGroupLayout,
        observation_bgl: &wgpu::BindGroupLayout,
        env_sampler: &wgpu::Sampler,
    ) -> Self {
        let env_bgl = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("environment_bgl"),
            entries: &[
                helpers::texture_entry(0, wgpu::TextureViewDimension::D2),
                helpers::sampler_entry(1),
            ],
        });

        let standard_shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("standard_shader"),
            source: wgpu::ShaderSource::Wgsl(obsview_core::STANDARD_WGSL.into()),
        });
        let standard_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("standard_pl"),
            bind_group_layouts: &[scene_bgl, &env_bgl],
            push_constant_ranges: &[],
        });
        let standard_pipeline = helpers::make_mesh_pipeline(
            device,
            MeshPipelineDesc {
                label: "standard_pipeline",
                layout: &standard_layout,
                shader: &standard_shader,
                depth: helpers::depth_state(wgpu::CompareFunction::Less, true),
                cull_mode: None,
            },
        );

        let heat_map_shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("heatmap_shader"),
            source: wgpu::ShaderSource::Wgsl(obsview_core::HEATMAP_WGSL.into()),
        });
        let heat_map_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("heatmap_pl"),
            bind_group_layouts: &[scene_bgl, observation_bgl],
            push_constant_ranges: &[],
        });
        // One draw per observation; equal depth lets later draws fill in the union.
        let heat_map_pipeline = helpers::make_mesh_pipeline(
            device,
            MeshPipelineDesc {
                label: "heatmap_pipeline",
                layout: &heat_map_layout,
                shader: &heat_map_shader,
                depth: helpers::depth_state(wgpu::CompareFunction::LessEqual, true),
                cull_mode: None,
            },
        );

        let (env_texture, env_view) =
            textures::upload_environment(device, queue, &HdrImage::placeholder());
        let env_bind_group =
            helpers::texture_bind_group(device, "environment_bg", &env_bgl, &env_view, env_sampler);

        Self {
            standard_pipeline,
            heat_map_pipeline,
            env_bgl,
            env_bind_group,
            env_texture,
            mesh: None,
        }
    }

    pub(crate) fn set_mesh(&mut self, device: &wgpu::Device, mesh: &MeshData) {
        self.mesh = Some(GpuMesh::new(device, "model", mesh));
    }

    pub(crate) fn set_environment(
        &mut self,
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        image: &HdrImage,
        env_sampler: &wgpu::Sampler,
    ) {
        let (texture, view) = textures::upload_environment(device, queue, image);
        self.env_bind_group =
            helpers::texture_bind_group(device, "environment_bg", &self.env_bgl, &view, env_sampler);
        self.env_texture = texture;
    }

    pub(crate) fn draw<'p>(
        &self,
        rpass: &mut wgpu::RenderPass<'p>,
        scene_bg: &wgpu::BindGroup,
        mode: ShadingMode,
        observations: &ObservationSlots,
    ) {
        let Some(mesh) = &self.mesh else {
            return;
        };
        match mode {
            ShadingMode::Standard => {
                rpass.set_pipeline(&self.standard_pipeline);
                rpass.set_bind_group(0, scene_bg, &[]);
                rpass.set_bind_group(1, &self.env_bind_group, &[]);
                mesh.draw(rpass);
            }
            // No observations means nothing survives the heat map.
            ShadingMode::HeatMap => {
                rpass.set_pipeline(&self.heat_map_pipeline);
                rpass.set_bind_group(0, scene_bg, &[]);
                for slot in observations.slots() {
                    rpass.set_bind_group(1, &slot.bind_group, &[]);
                    mesh.draw(rpass);
                }
            }
        }
    }
}
