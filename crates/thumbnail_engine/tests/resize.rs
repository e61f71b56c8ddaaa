use image::imageops::FilterType;
use image::{DynamicImage, GenericImageView, Rgb, RgbImage};
use thumbnail_engine::{LanczosResizer, ResizeError, Resizer};

fn solid(width: u32, height: u32) -> DynamicImage {
    DynamicImage::ImageRgb8(RgbImage::from_pixel(width, height, Rgb([200, 40, 90])))
}

#[test]
fn square_image_resizes_without_drift() {
    let resized = LanczosResizer::default().resize(&solid(100, 100), 32).unwrap();
    assert_eq!(resized.dimensions(), (32, 32));
}

#[test]
fn landscape_image_keeps_aspect_ratio() {
    let source = solid(640, 480);
    let resizer = LanczosResizer::with_filter(FilterType::Triangle);
    for (target, expected_height) in [(32, 24), (64, 48), (200, 150)] {
        let resized = resizer.resize(&source, target).unwrap();
        assert_eq!(resized.dimensions(), (target, expected_height));
    }
}

#[test]
fn upscaling_is_allowed() {
    let resized = LanczosResizer::default().resize(&solid(20, 10), 200).unwrap();
    assert_eq!(resized.dimensions(), (200, 100));
}

#[test]
fn zero_width_is_rejected() {
    let err = LanczosResizer::default().resize(&solid(10, 10), 0).unwrap_err();
    assert!(matches!(err, ResizeError::InvalidWidth(0)));
}
