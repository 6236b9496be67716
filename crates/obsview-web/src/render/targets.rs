use super::helpers;
use crate::constants::{DEPTH_FORMAT, HDR_FORMAT};

/// Offscreen targets of the scene pass.
///
/// - `hdr_*` hold linear scene colour in Rgba16Float for the tone-mapping composite.
/// - `depth_*` is shared by the skybox, model and overlay quads.
pub(crate) struct RenderTargets {
    pub(crate) hdr_tex: wgpu::Texture,
    pub(crate) hdr_view: wgpu::TextureView,
    pub(crate) depth_tex: wgpu::Texture,
    pub(crate) depth_view: wgpu::TextureView,
}

impl RenderTargets {
    pub(crate) fn new(device: &wgpu::Device, width: u32, height: u32) -> Self {
        let (hdr_tex, hdr_view) = Self::hdr(device, width, height);
        let (depth_tex, depth_view) = Self::depth(device, width, height);
        Self {
            hdr_tex,
            hdr_view,
            depth_tex,
            depth_view,
        }
    }

    pub(crate) fn recreate(&mut self, device: &wgpu::Device, width: u32, height: u32) {
        (self.hdr_tex, self.hdr_view) = Self::hdr(device, width, height);
        (self.depth_tex, self.depth_view) = Self::depth(device, width, height);
    }

    fn hdr(device: &wgpu::Device, width: u32, height: u32) -> (wgpu::Texture, wgpu::TextureView) {
        helpers::create_render_texture(
            device,
            "hdr_tex",
            width.max(1),
            height.max(1),
            HDR_FORMAT,
            wgpu::TextureUsages::RENDER_ATTACHMENT | wgpu::TextureUsages::TEXTURE_BINDING,
        )
    }

    fn depth(device: &wgpu::Device, width: u32, height: u32) -> (wgpu::Texture, wgpu::TextureView) {
        helpers::create_render_texture(
            device,
            "depth_tex",
            width.max(1),
            height.max(1),
            DEPTH_FORMAT,
            wgpu::TextureUsages::RENDER_ATTACHMENT,
        )
    }
}
