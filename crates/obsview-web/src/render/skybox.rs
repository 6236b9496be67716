use super::{helpers, textures};
use crate::constants::HDR_FORMAT;
use obsview_core::imaging::CubeFaces;

/// Cube-map background, drawn first as a fullscreen triangle at the far plane.
pub(crate) struct SkyboxPass {
    pipeline: wgpu::RenderPipeline,
    bgl: wgpu::BindGroupLayout,
    bind_group: wgpu::BindGroup,
    #[allow(dead_code)]
    texture: wgpu::Texture,
}

impl SkyboxPass {
    pub(crate) fn new(
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        scene_bgl: &wgpu::BindGroupLayout,
        sampler: &wgpu::Sampler,
    ) -> Self {
        let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("skybox_shader"),
            source: wgpu::ShaderSource::Wgsl(obsview_core::SKYBOX_WGSL.into()),
        });
        let bgl = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("skybox_bgl"),
            entries: &[
                helpers::texture_entry(0, wgpu::TextureViewDimension::Cube),
                helpers::sampler_entry(1),
            ],
        });
        let layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("skybox_pl"),
            bind_group_layouts: &[scene_bgl, &bgl],
            push_constant_ranges: &[],
        });
        let pipeline = device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some("skybox_pipeline"),
            layout: Some(&layout),
            vertex: wgpu::VertexState {
                module: &shader,
                entry_point: Some("vs_fullscreen"),
                buffers: &[],
                compilation_options: wgpu::PipelineCompilationOptions::default(),
            },
            primitive: wgpu::PrimitiveState::default(),
            // Triangle sits at z = 1; LessEqual against the cleared depth keeps it.
            depth_stencil: Some(helpers::depth_state(wgpu::CompareFunction::LessEqual, false)),
            multisample: wgpu::MultisampleState::default(),
            fragment: Some(wgpu::FragmentState {
                module: &shader,
                entry_point: Some("fs_skybox"),
                targets: &[Some(wgpu::ColorTargetState {
                    format: HDR_FORMAT,
                    blend: None,
                    write_mask: wgpu::ColorWrites::ALL,
                })],
                compilation_options: wgpu::PipelineCompilationOptions::default(),
            }),
            cache: None,
            multiview: None,
        });

        let (texture, view) = textures::upload_cube(device, queue, &CubeFaces::placeholder());
        let bind_group = helpers::texture_bind_group(device, "skybox_bg", &bgl, &view, sampler);
        Self {
            pipeline,
            bgl,
            bind_group,
            texture,
        }
    }

    pub(crate) fn set_faces(
        &mut self,
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        faces: &CubeFaces,
        sampler: &wgpu::Sampler,
    ) {
        let (texture, view) = textures::upload_cube(device, queue, faces);
        self.bind_group = helpers::texture_bind_group(device, "skybox_bg", &self.bgl, &view, sampler);
        self.texture = texture;
    }

    pub(crate) fn draw<'p>(&self, rpass: &mut wgpu::RenderPass<'p>, scene_bg: &wgpu::BindGroup) {
        rpass.set_pipeline(&self.pipeline);
        rpass.set_bind_group(0, scene_bg, &[]);
        rpass.set_bind_group(1, &self.bind_group, &[]);
        rpass.draw(0..3, 0..1);
    }
}
