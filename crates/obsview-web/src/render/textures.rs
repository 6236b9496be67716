use crate::constants::{HDR_FORMAT, OBSERVATION_TEXTURE_FORMAT, SKYBOX_TEXTURE_FORMAT};
use obsview_core::imaging::{CubeFaces, HdrImage, Rgba8Image};
use wgpu::util::DeviceExt;

fn sampled_2d(label: &str, width: u32, height: u32, format: wgpu::TextureFormat) -> wgpu::TextureDescriptor<'_> {
    wgpu::TextureDescriptor {
        label: Some(label),
        size: wgpu::Extent3d {
            width,
            height,
            depth_or_array_layers: 1,
        },
        mip_level_count: 1,
        sample_count: 1,
        dimension: wgpu::TextureDimension::D2,
        format,
        usage: wgpu::TextureUsages::TEXTURE_BINDING | wgpu::TextureUsages::COPY_DST,
        view_formats: &[],
    }
}

/// Observation image or mask, raw values (no sRGB decode on sampling).
pub fn upload_observation(
    device: &wgpu::Device,
    queue: &wgpu::Queue,
    label: &str,
    image: &Rgba8Image,
) -> (wgpu::Texture, wgpu::TextureView) {
    let tex = device.create_texture_with_data(
        queue,
        &sampled_2d(label, image.width, image.height, OBSERVATION_TEXTURE_FORMAT),
        wgpu::util::TextureDataOrder::LayerMajor,
        &image.data,
    );
    let view = tex.create_view(&wgpu::TextureViewDescriptor::default());
    (tex, view)
}

pub fn upload_environment(
    device: &wgpu::Device,
    queue: &wgpu::Queue,
    image: &HdrImage,
) -> (wgpu::Texture, wgpu::TextureView) {
    let tex = device.create_texture_with_data(
        queue,
        &sampled_2d("environment", image.width, image.height, HDR_FORMAT),
        wgpu::util::TextureDataOrder::LayerMajor,
        image.as_bytes(),
    );
    let view = tex.create_view(&wgpu::TextureViewDescriptor::default());
    (tex, view)
}

pub fn upload_cube(
    device: &wgpu::Device,
    queue: &wgpu::Queue,
    faces: &CubeFaces,
) -> (wgpu::Texture, wgpu::TextureView) {
    let data: Vec<u8> = faces
        .faces
        .iter()
        .flat_map(|f| f.data.iter().copied())
        .collect();
    let tex = device.create_texture_with_data(
        queue,
        &wgpu::TextureDescriptor {
            label: Some("skybox"),
            size: wgpu::Extent3d {
                width: faces.width,
                height: faces.height,
                depth_or_array_layers: 6,
            },
            mip_level_count: 1,
            sample_count: 1,
            dimension: wgpu::TextureDimension::D2,
            format: SKYBOX_TEXTURE_FORMAT,
            usage: wgpu::TextureUsages::TEXTURE_BINDING | wgpu::TextureUsages::COPY_DST,
            view_formats: &[],
        },
        wgpu::util::TextureDataOrder::LayerMajor,
        &data,
    );
    let view = tex.create_view(&wgpu::TextureViewDescriptor {
        label: Some("skybox_view"),
        dimension: Some(wgpu::TextureViewDimension::Cube),
        ..Default::default()
    });
    (tex, view)
}

pub fn linear_sampler(device: &wgpu::Device, label: &str, address_mode: wgpu::AddressMode) -> wgpu::Sampler {
    device.create_sampler(&wgpu::SamplerDescriptor {
        label: Some(label),
        address_mode_u: address_mode,
        address_mode_v: wgpu::AddressMode::ClampToEdge,
        address_mode_w: wgpu::AddressMode::ClampToEdge,
        mag_filter: wgpu::FilterMode::Linear,
        min_filter: wgpu::FilterMode::Linear,
        mipmap_filter: wgpu::FilterMode::Linear,
        ..Default::default()
    })
}
