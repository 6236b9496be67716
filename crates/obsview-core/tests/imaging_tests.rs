use image::{ImageOutputFormat, Rgb, RgbaImage};
use obsview_core::imaging::{
    check_texture_size, decode_cube_face, decode_hdr, decode_rgba8, placeholder_rgba8, CubeFaces,
    HdrImage, Rgba8Image,
};
use obsview_core::ImageError;
use std::io::Cursor;

const RED: [u8; 4] = [255, 0, 0, 255];
const BLUE: [u8; 4] = [0, 0, 255, 255];

/// 2x2 PNG: red top row, blue bottom row.
fn two_row_png() -> Vec<u8> {
    let img = RgbaImage::from_fn(2, 2, |_, y| {
        if y == 0 {
            image::Rgba(RED)
        } else {
            image::Rgba(BLUE)
        }
    });
    let mut out = Cursor::new(Vec::new());
    img.write_to(&mut out, ImageOutputFormat::Png)
        .expect("encode png");
    out.into_inner()
}

#[test]
fn masks_are_flipped_so_first_row_is_bottom() {
    let img = decode_rgba8(&two_row_png()).expect("png decodes");
    assert_eq!((img.width, img.height), (2, 2));
    assert_eq!(&img.data[0..4], &BLUE);
    assert_eq!(&img.data[8..12], &RED);
}

#[test]
fn cube_faces_keep_row_order() {
    let img = decode_cube_face(&two_row_png()).expect("png decodes");
    assert_eq!(&img.data[0..4], &RED);
}

#[test]
fn garbage_is_a_decode_error() {
    assert!(matches!(
        decode_rgba8(b"definitely not an image"),
        Err(ImageError::Decode(_))
    ));
}

#[test]
fn hdr_decodes_to_half_floats() {
    let pixels = vec![
        Rgb([1.0_f32, 0.5, 0.25]),
        Rgb([2.0, 2.0, 2.0]),
        Rgb([0.0, 0.0, 0.0]),
        Rgb([4.0, 1.0, 0.5]),
    ];
    let mut bytes = Vec::new();
    image::codecs::hdr::HdrEncoder::new(&mut bytes)
        .encode(&pixels, 2, 2)
        .expect("encode hdr");

    let hdr = decode_hdr(&bytes).expect("hdr decodes");
    assert_eq!((hdr.width, hdr.height), (2, 2));
    assert_eq!(hdr.data.len(), 16);
    assert_eq!(hdr.as_bytes().len(), 32);
    // Bottom row first after the flip: pixel (0, 1) of the source.
    let first = [hdr.data[0].to_f32(), hdr.data[1].to_f32(), hdr.data[2].to_f32()];
    assert!(first.iter().all(|c| c.abs() < 1e-3), "{first:?}");
    let top_left = &hdr.data[8..12];
    assert!((top_left[0].to_f32() - 1.0).abs() < 0.02);
    assert!((top_left[1].to_f32() - 0.5).abs() < 0.02);
    assert!((top_left[3].to_f32() - 1.0).abs() < 1e-3);
}

#[test]
fn placeholder_is_opaque_black() {
    let img = placeholder_rgba8();
    assert_eq!((img.width, img.height), (1, 1));
    assert_eq!(img.data, vec![0, 0, 0, 255]);
}

#[test]
fn hdr_placeholder_is_one_grey_texel() {
    let hdr = HdrImage::placeholder();
    assert_eq!(hdr.pixel_count(), 1);
    assert_eq!(hdr.as_bytes().len(), 8);
    assert_eq!(hdr.data[0].to_f32(), 0.5);
    assert_eq!(hdr.data[3].to_f32(), 1.0);
}

#[test]
fn cube_faces_must_share_a_size() {
    let face = |w: u32, h: u32| Rgba8Image {
        width: w,
        height: h,
        data: vec![0; (w * h * 4) as usize],
    };
    let mut faces: Vec<_> = (0..6).map(|_| face(4, 4)).collect();
    assert!(CubeFaces::new(faces.clone()).is_ok());
    faces[3] = face(4, 2);
    match CubeFaces::new(faces) {
        Err(ImageError::FaceSize { face, height, .. }) => {
            assert_eq!(face, 3);
            assert_eq!(height, 2);
        }
        other => panic!("unexpected {other:?}"),
    }
    assert_eq!(CubeFaces::placeholder().faces.len(), 6);
}

#[test]
fn texture_at_the_device_limit_is_accepted() {
    assert!(check_texture_size(8192, 8192, 8192).is_ok());
    assert!(check_texture_size(1, 8192, 8192).is_ok());
}

#[test]
fn texture_past_the_device_limit_names_its_size() {
    let err = check_texture_size(10_000, 600, 8192).unwrap_err();
    assert!(
        matches!(
            err,
            ImageError::TooLarge {
                width: 10_000,
                height: 600,
                max: 8192
            }
        ),
        "got {err:?}"
    );
    assert!(err.to_string().contains("10000x600"), "message: {err}");
    assert!(matches!(
        check_texture_size(16, 8193, 8192),
        Err(ImageError::TooLarge { height: 8193, .. })
    ));
}
