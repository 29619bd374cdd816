use super::*;

#[test]
fn dot_and_magnitude() {
    assert_eq!(dot(Vec2::new(1.0, 2.0), Vec2::new(3.0, -4.0)), -5.0);
    assert_eq!(magnitude(Vec2::new(3.0, 4.0)), 5.0);
    assert_eq!(magnitude(Vec2::ZERO), 0.0);
}

#[test]
fn apply_uses_rows() {
    let m = TransformMatrix::new(1.0, 2.0, 3.0, 4.0);
    assert_eq!(apply(m, Vec2::new(1.0, 1.0)), Vec2::new(3.0, 7.0));
    assert_eq!(apply(TransformMatrix::IDENTITY, Vec2::new(-2.5, 9.0)), Vec2::new(-2.5, 9.0));
}

#[test]
fn normal_rotates_quarter_turn() {
    assert_eq!(normal(Vec2::new(1.0, 0.0)), Vec2::new(0.0, 1.0));
    assert_eq!(normal(Vec2::new(3.0, 2.0)), Vec2::new(-2.0, 3.0));
    let v = Vec2::new(0.3, -7.25);
    assert_eq!(dot(v, normal(v)), 0.0);
}

#[test]
fn scale_and_add_keep_precision() {
    let v = add(scale(Vec2::new(1.5, -0.25), 2.0), Vec2::new(0.1, 0.1));
    assert!((v.x - 3.1).abs() < 1e-12);
    assert!((v.y + 0.4).abs() < 1e-12);
}

#[test]
fn non_finite_input_propagates() {
    let v = apply(TransformMatrix::IDENTITY, Vec2::new(f64::NAN, 1.0));
    assert!(v.x.is_nan());
    assert!(magnitude(Vec2::new(f64::INFINITY, 0.0)).is_infinite());
}
