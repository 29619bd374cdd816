use super::*;

#[test]
fn coeff_order_is_row_major() {
    let m = TransformMatrix::new(1.0, 2.0, 3.0, 4.0);
    assert_eq!(m.coeffs(), [1.0, 2.0, 3.0, 4.0]);
    assert_eq!(TransformMatrix::from_coeffs(m.coeffs()), m);
    assert_eq!(
        TransformMatrix::from_rows(Vec2::new(1.0, 2.0), Vec2::new(3.0, 4.0)),
        m
    );
    assert_eq!(m.determinant(), -2.0);
}

#[test]
fn rotation_maps_pixel_like_reference() {
    let rot = TransformMatrix::new(0.0, 1.0, -1.0, 0.0);
    assert_eq!(rot.apply_to_pixel(PixelPos::new(10, 0)), PixelPos::new(0, -10));
}

#[test]
fn apply_to_pixel_floors_fractions() {
    let half = TransformMatrix::new(0.5, 0.0, 0.0, 0.5);
    assert_eq!(half.apply_to_pixel(PixelPos::new(3, -3)), PixelPos::new(1, -2));
}

#[test]
fn degenerate_is_detected_not_rejected() {
    let line = TransformMatrix::new(1.0, 1.0, 1.0, 1.0);
    assert!(line.is_degenerate(1e-9));
    assert!(line.validate().is_ok());
    assert!(!TransformMatrix::IDENTITY.is_degenerate(1e-9));
}

#[test]
fn non_finite_coefficients_are_config_errors() {
    let m = TransformMatrix::new(1.0, f64::NAN, 0.0, 1.0);
    assert!(m.validate().unwrap_err().is_config());
    let m = TransformMatrix::new(1.0, 0.0, f64::INFINITY, 1.0);
    assert!(m.validate().is_err());
}

#[test]
fn parse_from_str() {
    let m: TransformMatrix = "0, 1, -1, 0".parse().unwrap();
    assert_eq!(m, TransformMatrix::new(0.0, 1.0, -1.0, 0.0));
    assert!("1,2,3".parse::<TransformMatrix>().is_err());
    assert!("1,2,x,4".parse::<TransformMatrix>().is_err());
    assert!("1,2,inf,4".parse::<TransformMatrix>().is_err());
}
