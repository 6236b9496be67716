//! Image decoding for observation masks, skybox faces and the HDR environment.
//!
//! 2D decoders flip rows so that UV (0, 0) is the bottom-left corner of the
//! picture, which is what the reprojection and heat-map UVs assume. Cube faces
//! keep their stored row order.

use crate::error::ImageError;
use half::f16;
use image::{DynamicImage, ImageFormat};

/// Tightly packed RGBA8 pixels.
#[derive(Clone, Debug, PartialEq)]
pub struct Rgba8Image {
    pub width: u32,
    pub height: u32,
    pub data: Vec<u8>,
}

/// Linear RGBA half-float pixels, bottom row first.
#[derive(Clone, Debug, PartialEq)]
pub struct HdrImage {
    pub width: u32,
    pub height: u32,
    pub data: Vec<f16>,
}

impl HdrImage {
    pub fn pixel_count(&self) -> usize {
        (self.width * self.height) as usize
    }

    pub fn as_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.data)
    }

    /// Uniform grey environment used when the real map is unavailable.
    pub fn placeholder() -> Self {
        let grey = f16::from_f32(0.5);
        Self {
            width: 1,
            height: 1,
            data: vec![grey, grey, grey, f16::ONE],
        }
    }
}

/// A single black texel, bound until a real texture arrives.
pub fn placeholder_rgba8() -> Rgba8Image {
    Rgba8Image {
        width: 1,
        height: 1,
        data: vec![0, 0, 0, 255],
    }
}

/// Refuse an image that cannot be allocated as a texture with sides of at most
/// `max_dimension` texels.
pub fn check_texture_size(width: u32, height: u32, max_dimension: u32) -> Result<(), ImageError> {
    if width > max_dimension || height > max_dimension {
        return Err(ImageError::TooLarge {
            width,
            height,
            max: max_dimension,
        });
    }
    Ok(())
}

fn check_size(img: &DynamicImage) -> Result<(), ImageError> {
    if img.width() == 0 || img.height() == 0 {
        return Err(ImageError::ZeroSize);
    }
    Ok(())
}

/// Decode PNG or JPEG bytes (format sniffed from the data).
pub fn decode_rgba8(bytes: &[u8]) -> Result<Rgba8Image, ImageError> {
    let img = image::load_from_memory(bytes)?;
    check_size(&img)?;
    let rgba = img.flipv().into_rgba8();
    Ok(Rgba8Image {
        width: rgba.width(),
        height: rgba.height(),
        data: rgba.into_raw(),
    })
}

/// Decode one skybox face, rows top first.
pub fn decode_cube_face(bytes: &[u8]) -> Result<Rgba8Image, ImageError> {
    let img = image::load_from_memory(bytes)?;
    check_size(&img)?;
    let rgba = img.into_rgba8();
    Ok(Rgba8Image {
        width: rgba.width(),
        height: rgba.height(),
        data: rgba.into_raw(),
    })
}

/// Decode a Radiance `.hdr` file into linear half floats.
pub fn decode_hdr(bytes: &[u8]) -> Result<HdrImage, ImageError> {
    let img = image::load_from_memory_with_format(bytes, ImageFormat::Hdr)?;
    check_size(&img)?;
    let rgba = img.flipv().into_rgba32f();
    Ok(HdrImage {
        width: rgba.width(),
        height: rgba.height(),
        data: rgba.into_raw().into_iter().map(f16::from_f32).collect(),
    })
}

/// Six equally sized faces in +X, -X, +Y, -Y, +Z, -Z order.
#[derive(Clone, Debug)]
pub struct CubeFaces {
    pub width: u32,
    pub height: u32,
    pub faces: Vec<Rgba8Image>,
}

impl CubeFaces {
    pub fn new(faces: Vec<Rgba8Image>) -> Result<Self, ImageError> {
        let first = faces.first().ok_or(ImageError::ZeroSize)?;
        let (width, height) = (first.width, first.height);
        for (face, img) in faces.iter().enumerate() {
            if img.width != width || img.height != height {
                return Err(ImageError::FaceSize {
                    face,
                    width: img.width,
                    height: img.height,
                    expected_width: width,
                    expected_height: height,
                });
            }
        }
        Ok(Self {
            width,
            height,
            faces,
        })
    }

    /// Single-colour faces used before the real skybox has loaded.
    pub fn placeholder() -> Self {
        Self {
            width: 1,
            height: 1,
            faces: (0..6)
                .map(|_| Rgba8Image {
                    width: 1,
                    height: 1,
                    data: vec![8, 10, 20, 255],
                })
                .collect(),
        }
    }
}
