use super::*;

fn gradient(w: u32, h: u32) -> Raster {
    let mut data = Vec::with_capacity((w * h * 4) as usize);
    for y in 0..h {
        for x in 0..w {
            data.extend_from_slice(&[x as u8, y as u8, (x + y) as u8, 255]);
        }
    }
    Raster::from_rgba8(w, h, data).unwrap()
}

#[test]
fn to_field_recenters_in_raster_order() {
    let r = gradient(4, 3);
    let f = to_field(&r);
    assert_eq!(f.len(), 12);
    f.check_full_grid(r.canvas()).unwrap();

    let first = f.as_slice()[0];
    assert_eq!(first.pos, PixelPos::new(-2, -1));
    assert_eq!(first.color, Rgba8::new(0, 0, 0, 255));

    let origin = f.as_slice()[4 + 2];
    assert_eq!(origin.pos, PixelPos::new(0, 0));
    assert_eq!(origin.color, Rgba8::new(2, 1, 3, 255));
}

#[test]
fn field_raster_roundtrip_is_exact() {
    let r = gradient(5, 4);
    assert_eq!(to_raster(&to_field(&r), r.canvas()), r);
}

#[test]
fn unreached_pixels_stay_transparent() {
    let canvas = Canvas::new(3, 3).unwrap();
    let field = SampleField::new(vec![Sample::new(PixelPos::new(0, 0), Rgba8::BLACK)]);
    let r = to_raster(&field, canvas);
    assert_eq!(r.pixel(1, 1), Some(Rgba8::BLACK));
    assert_eq!(r.pixel(0, 0), Some(Rgba8::TRANSPARENT));
    assert_eq!(r.pixel(2, 2), Some(Rgba8::TRANSPARENT));
}

#[test]
fn last_write_wins_on_collision() {
    let canvas = Canvas::new(3, 3).unwrap();
    let red = Rgba8::new(255, 0, 0, 255);
    let blue = Rgba8::new(0, 0, 255, 255);
    let field = SampleField::new(vec![
        Sample::new(PixelPos::new(1, 1), red),
        Sample::new(PixelPos::new(1, 1), blue),
    ]);
    assert_eq!(to_raster(&field, canvas).pixel_at(PixelPos::new(1, 1)), Some(blue));
}

#[test]
fn out_of_bounds_samples_are_dropped_without_wrapping() {
    let canvas = Canvas::new(3, 3).unwrap();
    let field = SampleField::new(vec![
        Sample::new(PixelPos::new(2, 0), Rgba8::BLACK),
        Sample::new(PixelPos::new(0, -5), Rgba8::BLACK),
        Sample::new(PixelPos::new(i64::MAX, 0), Rgba8::BLACK),
    ]);
    let mut r = Raster::transparent(canvas);
    assert_eq!(write_field(&field, &mut r), 3);
    assert!(r.data.iter().all(|&b| b == 0));
}

#[test]
fn from_rgba8_checks_length_and_size() {
    assert!(Raster::from_rgba8(2, 2, vec![0; 15]).is_err());
    assert!(Raster::from_rgba8(0, 2, vec![]).unwrap_err().is_config());
    assert!(Raster::from_rgba8(2, 2, vec![0; 16]).is_ok());
}
