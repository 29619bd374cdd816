use super::*;
use crate::foundation::core::Rgba8;

fn checker(width: u32, height: u32) -> Raster {
    let mut data = Vec::new();
    for y in 0..height {
        for x in 0..width {
            data.extend_from_slice(&[(x * 20) as u8, (y * 20) as u8, 200, 255]);
        }
    }
    Raster::from_rgba8(width, height, data).unwrap()
}

fn encode_png(raster: &Raster) -> Vec<u8> {
    let img = image::RgbaImage::from_raw(raster.width, raster.height, raster.data.clone()).unwrap();
    let mut buf = Vec::new();
    image::DynamicImage::ImageRgba8(img)
        .write_to(&mut std::io::Cursor::new(&mut buf), image::ImageFormat::Png)
        .unwrap();
    buf
}

fn small_config(grid_enabled: bool) -> AnimationConfig {
    AnimationConfig {
        canvas: Canvas::new(64, 64).unwrap(),
        grid_enabled,
        grid_spacing: Some(16),
        ..AnimationConfig::default()
    }
}

fn opaque_pixels(raster: &Raster) -> usize {
    raster.data.chunks_exact(4).filter(|px| px[3] != 0).count()
}

#[test]
fn png_decodes_to_straight_rgba() {
    let src = checker(3, 2);
    let decoded = decode_image(&encode_png(&src)).unwrap();
    assert_eq!(decoded, src);
}

#[test]
fn garbage_bytes_fail_to_decode() {
    let err = decode_image(b"definitely not an image").unwrap_err();
    assert!(!err.is_config());
}

#[test]
fn even_image_is_centered_on_origin() {
    let img = checker(2, 2);
    let placed = place_centered(&img, Canvas::new(6, 6).unwrap());
    assert_eq!(placed.pixel_at(PixelPos::new(-1, -1)), img.pixel(0, 0));
    assert_eq!(placed.pixel_at(PixelPos::new(0, 0)), img.pixel(1, 1));
    assert_eq!(placed.pixel_at(PixelPos::new(1, 1)), Some(Rgba8::TRANSPARENT));
}

#[test]
fn odd_image_rounds_toward_negative() {
    let img = checker(3, 3);
    let placed = place_centered(&img, Canvas::new(6, 6).unwrap());
    assert_eq!(placed.pixel_at(PixelPos::new(-2, -2)), img.pixel(0, 0));
    assert_eq!(placed.pixel_at(PixelPos::new(0, 0)), img.pixel(2, 2));
}

#[test]
fn oversized_image_is_cropped() {
    let img = checker(8, 8);
    let placed = place_centered(&img, Canvas::new(4, 4).unwrap());
    assert_eq!(placed.pixel(0, 0), img.pixel(2, 2));
    assert_eq!(placed.pixel(3, 3), img.pixel(5, 5));
    assert_eq!(opaque_pixels(&placed), 16);
}

#[test]
fn composed_canvas_carries_axes() {
    let canvas = compose_canvas(None, &small_config(false)).unwrap();
    assert_eq!(canvas.pixel_at(PixelPos::new(10, 0)), Some(Rgba8::BLACK));
    assert_eq!(canvas.pixel_at(PixelPos::new(13, 13)), Some(Rgba8::TRANSPARENT));
}

#[test]
fn grid_adds_ink() {
    let plain = compose_canvas(None, &small_config(false)).unwrap();
    let grid = compose_canvas(None, &small_config(true)).unwrap();
    assert!(opaque_pixels(&grid) > opaque_pixels(&plain));
}

#[test]
fn image_survives_under_the_axes() {
    let img = checker(20, 20);
    let canvas = compose_canvas(Some(&img), &small_config(false)).unwrap();
    // Field (-7, -7) is image pixel (3, 3), well clear of the axis arrows.
    assert_eq!(canvas.pixel_at(PixelPos::new(-7, -7)), img.pixel(3, 3));
}

#[test]
fn source_field_covers_the_canvas() {
    let config = small_config(true);
    let field = prepare_source(Some(&checker(10, 10)), &config).unwrap();
    assert_eq!(field.len(), config.canvas.pixel_count());
    field.check_full_grid(config.canvas).unwrap();
}
