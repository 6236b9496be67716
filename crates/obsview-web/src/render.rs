mod helpers;
mod model;
mod observations;
mod post;
mod skybox;
mod targets;
mod textures;

use crate::constants::{CLEAR_COLOR, ENVIRONMENT_INTENSITY};
use glam::Mat4;
use obsview_core::constants::{
    MODEL_BASE_COLOR, MODEL_METALNESS, MODEL_ROUGHNESS, TONE_MAPPING_EXPOSURE,
};
use obsview_core::imaging::{self, CubeFaces, HdrImage, Rgba8Image};
use obsview_core::mesh::MeshData;
use obsview_core::{FrameUpdate, ImageError, ObservationId, OrbitCamera, Scene};
use web_sys as web;

use model::ModelPass;
use observations::ObservationSlots;
use post::{PostResources, PostUniforms};
use skybox::SkyboxPass;
use targets::RenderTargets;

/// Per-frame scene block, laid out to match `struct Scene` in the WGSL shaders.
#[repr(C)]
#[derive(Copy, Clone, bytemuck::Pod, bytemuck::Zeroable)]
pub(crate) struct SceneUniforms {
    view_proj: [[f32; 4]; 4],
    inv_view_proj: [[f32; 4]; 4],
    model: [[f32; 4]; 4],
    camera_pos: [f32; 4],
    base_color: [f32; 4],
    material: [f32; 4], // metalness, roughness, env intensity, unused
}

impl SceneUniforms {
    fn new(camera: &OrbitCamera, update: &FrameUpdate) -> Self {
        let view_proj = camera.view_projection();
        let eye = camera.eye();
        let [r, g, b] = MODEL_BASE_COLOR;
        Self {
            view_proj: view_proj.to_cols_array_2d(),
            inv_view_proj: view_proj.inverse().to_cols_array_2d(),
            model: Mat4::from_rotation_y(update.yaw).to_cols_array_2d(),
            camera_pos: [eye.x, eye.y, eye.z, 1.0],
            base_color: [r, g, b, 1.0],
            material: [MODEL_METALNESS, MODEL_ROUGHNESS, ENVIRONMENT_INTENSITY, 0.0],
        }
    }
}

pub struct GpuState<'a> {
    surface: wgpu::Surface<'a>,
    device: wgpu::Device,
    queue: wgpu::Queue,
    config: wgpu::SurfaceConfiguration,

    scene_uniform_buffer: wgpu::Buffer,
    scene_bind_group: wgpu::BindGroup,

    targets: RenderTargets,
    linear_sampler: wgpu::Sampler,
    env_sampler: wgpu::Sampler,
    post: PostResources,
    bg_hdr: wgpu::BindGroup,

    skybox: SkyboxPass,
    model: ModelPass,
    observations: ObservationSlots,

    width: u32,
    height: u32,
}

impl<'a> GpuState<'a> {
    pub async fn new(canvas: &'a web::HtmlCanvasElement) -> anyhow::Result<Self> {
        let width = canvas.width().max(1);
        let height = canvas.height().max(1);

        let instance = wgpu::Instance::default();
        let surface = instance.create_surface(wgpu::SurfaceTarget::Canvas(canvas.clone()))?;
        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::HighPerformance,
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await
            .ok_or_else(|| anyhow::anyhow!("No WebGPU adapter"))?;
        let (device, queue) = adapter
            .request_device(
                &wgpu::DeviceDescriptor {
                    required_features: wgpu::Features::empty(),
                    // Use default limits on web to avoid passing unknown fields to older WebGPU impls
                    required_limits: wgpu::Limits::default(),
                    memory_hints: wgpu::MemoryHints::Performance,
                    label: None,
                },
                None,
            )
            .await
            .map_err(|e| anyhow::anyhow!(format!("request_device error: {:?}", e)))?;
        let caps = surface.get_capabilities(&adapter);
        let format = caps
            .formats
            .iter()
            .copied()
            .find(|f| {
                matches!(
                    f,
                    wgpu::TextureFormat::Bgra8UnormSrgb | wgpu::TextureFormat::Rgba8UnormSrgb
                )
            })
            .or_else(|| caps.formats.first().copied())
            .ok_or_else(|| anyhow::anyhow!("Surface reports no texture formats"))?;
        let alpha_mode = caps
            .alpha_modes
            .first()
            .copied()
            .unwrap_or(wgpu::CompositeAlphaMode::Auto);
        let config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format,
            width,
            height,
            present_mode: wgpu::PresentMode::Fifo,
            alpha_mode,
            view_formats: vec![],
            desired_maximum_frame_latency: 2,
        };
        surface.configure(&device, &config);
        log::info!("[gpu] surface {}x{} format={:?}", width, height, format);

        let scene_bgl = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("scene_bgl"),
            entries: &[helpers::uniform_entry(
                0,
                wgpu::ShaderStages::VERTEX | wgpu::ShaderStages::FRAGMENT,
            )],
        });
        let scene_uniform_buffer = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("scene_uniforms"),
            size: std::mem::size_of::<SceneUniforms>() as u64,
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });
        let scene_bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("scene_bg"),
            layout: &scene_bgl,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: scene_uniform_buffer.as_entire_binding(),
            }],
        });

        let linear_sampler =
            textures::linear_sampler(&device, "linear_sampler", wgpu::AddressMode::ClampToEdge);
        // Equirect longitude wraps around.
        let env_sampler =
            textures::linear_sampler(&device, "environment_sampler", wgpu::AddressMode::Repeat);

        let targets = RenderTargets::new(&device, width, height);
        let post_shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("post_shader"),
            source: wgpu::ShaderSource::Wgsl(obsview_core::POST_WGSL.into()),
        });
        let post = post::create_post_resources(&device, &post_shader, format);
        let bg_hdr = post::hdr_bind_group(&device, &post, &targets.hdr_view, &linear_sampler);

        let skybox = SkyboxPass::new(&device, &queue, &scene_bgl, &linear_sampler);
        let observations = ObservationSlots::new(&device, &scene_bgl);
        let model = ModelPass::new(&device, &queue, &scene_bgl, &observations.bgl, &env_sampler);

        Ok(Self {
            surface,
            device,
            queue,
            config,
            scene_uniform_buffer,
            scene_bind_group,
            targets,
            linear_sampler,
            env_sampler,
            post,
            bg_hdr,
            skybox,
            model,
            observations,
            width,
            height,
        })
    }

    pub fn set_model(&mut self, mesh: &MeshData) {
        log::info!(
            "[gpu] model: {} vertices, {} triangles",
            mesh.vertices.len(),
            mesh.triangle_count()
        );
        self.model.set_mesh(&self.device, mesh);
    }

    fn max_texture_side(&self) -> u32 {
        self.device.limits().max_texture_dimension_2d
    }

    pub fn set_environment(&mut self, image: &HdrImage) {
        log::info!("[gpu] environment {}x{}", image.width, image.height);
        let fallback;
        let max = self.max_texture_side();
        let image = match imaging::check_texture_size(image.width, image.height, max) {
            Ok(()) => image,
            Err(e) => {
                log::warn!("[gpu] environment kept as placeholder: {}", e);
                fallback = HdrImage::placeholder();
                &fallback
            }
        };
        self.model
            .set_environment(&self.device, &self.queue, image, &self.env_sampler);
    }

    pub fn set_skybox(&mut self, faces: &CubeFaces) {
        log::info!("[gpu] skybox faces {}x{}", faces.width, faces.height);
        let fallback;
        let max = self.max_texture_side();
        let faces = match imaging::check_texture_size(faces.width, faces.height, max) {
            Ok(()) => faces,
            Err(e) => {
                log::warn!("[gpu] skybox kept as placeholder: {}", e);
                fallback = CubeFaces::placeholder();
                &fallback
            }
        };
        self.skybox
            .set_faces(&self.device, &self.queue, faces, &self.linear_sampler);
    }

    /// Allocate GPU slots for observations presented since the last call.
    pub fn sync_observations(&mut self, scene: &Scene) {
        self.observations.sync(&self.device, &self.queue, scene);
    }

    /// Upload the image of observation `id`. `Ok(false)` means the id has no slot;
    /// an image over the device texture limit is refused before allocation.
    pub fn set_observation_texture(
        &mut self,
        id: ObservationId,
        image: &Rgba8Image,
    ) -> Result<bool, ImageError> {
        imaging::check_texture_size(image.width, image.height, self.max_texture_side())?;
        Ok(self
            .observations
            .set_texture(&self.device, &self.queue, id, image))
    }

    pub fn resize_if_needed(&mut self, width: u32, height: u32) {
        if width == 0 || height == 0 {
            return;
        }
        if width != self.width || height != self.height {
            self.width = width;
            self.height = height;
            self.config.width = width;
            self.config.height = height;
            self.surface.configure(&self.device, &self.config);

            // Recreate offscreen render targets and the composite bind group that samples them
            self.targets.recreate(&self.device, width, height);
            self.bg_hdr = post::hdr_bind_group(
                &self.device,
                &self.post,
                &self.targets.hdr_view,
                &self.linear_sampler,
            );
        }
    }

    /// Reapply the current surface configuration after the surface was lost.
    pub fn reconfigure(&mut self) {
        self.surface.configure(&self.device, &self.config);
    }

    pub fn render(
        &mut self,
        camera: &OrbitCamera,
        update: &FrameUpdate,
        observed: &Scene,
    ) -> Result<(), wgpu::SurfaceError> {
        let frame = self.surface.get_current_texture()?;
        let view = frame
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());

        let scene = SceneUniforms::new(camera, update);
        self.queue
            .write_buffer(&self.scene_uniform_buffer, 0, bytemuck::bytes_of(&scene));
        let post = PostUniforms {
            resolution: [self.width as f32, self.height as f32],
            exposure: TONE_MAPPING_EXPOSURE,
            _pad: 0.0,
        };
        self.queue
            .write_buffer(&self.post.uniform_buffer, 0, bytemuck::bytes_of(&post));

        let mut encoder = self
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("encoder"),
            });
        {
            let mut rpass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("scene_pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &self.targets.hdr_view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(CLEAR_COLOR),
                        store: wgpu::StoreOp::Store,
                    },
                })],
                depth_stencil_attachment: Some(wgpu::RenderPassDepthStencilAttachment {
                    view: &self.targets.depth_view,
                    depth_ops: Some(wgpu::Operations {
                        load: wgpu::LoadOp::Clear(1.0),
                        store: wgpu::StoreOp::Store,
                    }),
                    stencil_ops: None,
                }),
                timestamp_writes: None,
                occlusion_query_set: None,
            });
            self.skybox.draw(&mut rpass, &self.scene_bind_group);
            self.model
                .draw(&mut rpass, &self.scene_bind_group, update.mode, &self.observations);
            self.observations
                .draw_quads(&mut rpass, &self.scene_bind_group, observed);
        }

        // Tone-map the HDR scene onto the swapchain
        post::blit(
            &mut encoder,
            "composite",
            &view,
            CLEAR_COLOR,
            &self.post.composite_pipeline,
            &self.bg_hdr,
        );

        self.queue.submit(Some(encoder.finish()));
        frame.present();
        Ok(())
    }
}
