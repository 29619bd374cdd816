use super::*;
use crate::animation::tween::build_transform_path;
use crate::field::raster::{Raster, to_field, to_raster};
use crate::transform::matrix::TransformMatrix;

fn source() -> SampleField {
    let mut data = Vec::new();
    for i in 0..(6 * 6) {
        data.extend_from_slice(&[i as u8, 0, 255 - i as u8, 255]);
    }
    to_field(&Raster::from_rgba8(6, 6, data).unwrap())
}

#[test]
fn precompute_reports_progress_per_frame() {
    let path = build_transform_path(TransformMatrix::new(0.0, 1.0, -1.0, 0.0), 4).unwrap();
    let mut reports = Vec::new();
    let mut sink = |done: usize, total: usize| reports.push((done, total));
    let frames = Precompute::new(FramePlan::new(source(), path)).run_to_end(&mut sink);
    assert_eq!(frames.len(), 5);
    assert_eq!(reports, vec![(1, 5), (2, 5), (3, 5), (4, 5), (5, 5)]);
}

#[test]
fn advance_is_cooperative() {
    let path = build_transform_path(TransformMatrix::IDENTITY, 2).unwrap();
    let mut pre = Precompute::new(FramePlan::new(source(), path));
    assert!(!pre.advance(&mut NoProgress));
    assert_eq!(pre.done(), 1);
    assert!(!pre.advance(&mut NoProgress));
    assert!(pre.advance(&mut NoProgress));
    assert!(pre.advance(&mut NoProgress));
    assert_eq!(pre.done(), 3);
}

#[test]
fn identity_target_frames_are_all_source() {
    let src = source();
    let canvas = crate::foundation::core::Canvas::new(6, 6).unwrap();
    let path = build_transform_path(TransformMatrix::IDENTITY, 4).unwrap();
    let frames = Precompute::new(FramePlan::new(src.clone(), path)).run_to_end(&mut NoProgress);
    let expected = to_raster(&src, canvas);
    for i in 0..5 {
        let f = frames.frame(StepIndex(i)).unwrap();
        assert_eq!(to_raster(&f, canvas), expected);
    }
    assert!(frames.frame(StepIndex(5)).is_none());
}

#[test]
fn lazy_and_eager_frames_agree() {
    let path = build_transform_path(TransformMatrix::new(1.5, -0.5, 0.25, 0.8), 6).unwrap();
    let plan = FramePlan::new(source(), path);
    let lazy = Frames::Lazy(plan.clone());
    let eager = Precompute::new(plan).run_to_end(&mut NoProgress);
    assert_eq!(lazy.len(), eager.len());
    for i in 0..7 {
        assert_eq!(lazy.frame(StepIndex(i)), eager.frame(StepIndex(i)));
    }
    assert_eq!(lazy.path(), eager.path());
}
