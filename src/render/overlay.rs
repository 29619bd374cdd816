//! Reference overlays: coordinate axes and a basis-vector grid, drawn as arrows.
//!
//! Overlays are painted onto the source canvas before it is sampled, so they are transformed
//! together with the image.

use kurbo::PathEl;

use crate::field::raster::Raster;
use crate::foundation::core::{BezPath, Canvas, Point, Rgba8, Vec2};
use crate::foundation::error::{PlanewarpError, PlanewarpResult};
use crate::foundation::math::over_premul_onto_straight;
use crate::transform::linear::{add, magnitude, normal, scale};

/// Shaft width used for the axes.
pub const AXIS_THICKNESS: f64 = 5.0;
/// Shaft width used for grid arrows.
pub const GRID_THICKNESS: f64 = 2.0;
/// The shaft stops at this fraction of the vector; the arrowhead covers the rest.
const SHAFT_FRACTION: f64 = 0.9;

/// Outline of `vector` drawn from `start` as a filled shaft plus a triangular arrowhead.
///
/// The arrowhead's base is `thickness` to either side of the shaft end, its apex at the tip.
/// Zero-length (or non-finite) vectors produce no path.
pub fn arrow_path(vector: Vec2, start: Vec2, thickness: f64) -> Option<BezPath> {
    let len = magnitude(vector);
    if !len.is_finite() || len == 0.0 {
        return None;
    }
    let tip = add(vector, start);
    let unit_normal = scale(normal(vector), 1.0 / len);
    let head_offset = scale(unit_normal, thickness);
    let shaft_offset = scale(unit_normal, thickness / 2.0);
    let shaft_end = add(scale(vector, SHAFT_FRACTION), start);

    let mut path = BezPath::new();
    path.move_to(to_point(add(start, shaft_offset)));
    path.line_to(to_point(add(shaft_end, shaft_offset)));
    path.line_to(to_point(add(shaft_end, scale(shaft_offset, -1.0))));
    path.line_to(to_point(add(start, scale(shaft_offset, -1.0))));
    path.close_path();

    path.move_to(to_point(tip));
    path.line_to(to_point(add(shaft_end, head_offset)));
    path.line_to(to_point(add(shaft_end, scale(head_offset, -1.0))));
    path.close_path();
    Some(path)
}

/// Four arrows from the origin along +y, +x, -y and -x, each half the canvas long.
pub fn axes_paths(canvas: Canvas) -> Vec<BezPath> {
    let len = f64::from(canvas.width.min(canvas.height) / 2);
    [
        Vec2::new(0.0, len),
        Vec2::new(len, 0.0),
        Vec2::new(0.0, -len),
        Vec2::new(-len, 0.0),
    ]
    .into_iter()
    .filter_map(|v| arrow_path(v, Vec2::ZERO, AXIS_THICKNESS))
    .collect()
}

/// The identity basis scaled to `spacing`, drawn from every lattice point that can reach the
/// canvas.
pub fn grid_paths(canvas: Canvas, spacing: u32) -> Vec<BezPath> {
    if spacing == 0 {
        return Vec::new();
    }
    let (ox, oy) = canvas.origin();
    let size = i64::from(canvas.width.max(canvas.height));
    let g = i64::from(spacing);
    let reach = g + GRID_THICKNESS.ceil() as i64;
    let (min_x, max_x) = (-ox - reach, i64::from(canvas.width) - ox + reach);
    let (min_y, max_y) = (-oy - reach, i64::from(canvas.height) - oy + reach);

    let basis = [Vec2::new(g as f64, 0.0), Vec2::new(0.0, g as f64)];
    let mut out = Vec::new();
    for x in (-size..size).step_by(spacing as usize) {
        if x < min_x || x > max_x {
            continue;
        }
        for y in (-size..size).step_by(spacing as usize) {
            if y < min_y || y > max_y {
                continue;
            }
            let start = Vec2::new(x as f64, y as f64);
            out.extend(
                basis
                    .iter()
                    .filter_map(|&v| arrow_path(v, start, GRID_THICKNESS)),
            );
        }
    }
    out
}

/// Fill `paths` (in field space) with `color` on top of `raster`.
pub fn draw_paths(raster: &mut Raster, paths: &[BezPath], color: Rgba8) -> PlanewarpResult<()> {
    if paths.is_empty() {
        return Ok(());
    }
    let w: u16 = raster
        .width
        .try_into()
        .map_err(|_| PlanewarpError::render("overlay raster width exceeds u16"))?;
    let h: u16 = raster
        .height
        .try_into()
        .map_err(|_| PlanewarpError::render("overlay raster height exceeds u16"))?;
    let (ox, oy) = raster.canvas().origin();

    let mut ctx = vello_cpu::RenderContext::new(w, h);
    ctx.set_transform(vello_cpu::kurbo::Affine::translate((ox as f64, oy as f64)));
    ctx.set_paint(vello_cpu::peniko::Color::from_rgba8(
        color.r, color.g, color.b, color.a,
    ));
    for path in paths {
        ctx.fill_path(&bezpath_to_cpu(path));
    }
    ctx.flush();

    let mut pixmap = vello_cpu::Pixmap::new(w, h);
    ctx.render_to_pixmap(&mut pixmap);

    for (dst, src) in raster
        .data
        .chunks_exact_mut(4)
        .zip(pixmap.data_as_u8_slice().chunks_exact(4))
    {
        over_premul_onto_straight(dst, [src[0], src[1], src[2], src[3]]);
    }
    Ok(())
}

/// Draw the coordinate axes in black.
pub fn draw_axes(raster: &mut Raster) -> PlanewarpResult<()> {
    let paths = axes_paths(raster.canvas());
    draw_paths(raster, &paths, Rgba8::BLACK)
}

/// Draw the reference grid in black.
pub fn draw_grid(raster: &mut Raster, spacing: u32) -> PlanewarpResult<()> {
    let paths = grid_paths(raster.canvas(), spacing);
    draw_paths(raster, &paths, Rgba8::BLACK)
}

fn to_point(v: Vec2) -> Point {
    Point::new(v.x, v.y)
}

fn point_to_cpu(p: Point) -> vello_cpu::kurbo::Point {
    vello_cpu::kurbo::Point::new(p.x, p.y)
}

fn bezpath_to_cpu(path: &BezPath) -> vello_cpu::kurbo::BezPath {
    let mut out = vello_cpu::kurbo::BezPath::new();
    for &el in path.elements() {
        match el {
            PathEl::MoveTo(p) => out.move_to(point_to_cpu(p)),
            PathEl::LineTo(p) => out.line_to(point_to_cpu(p)),
            PathEl::QuadTo(p1, p2) => out.quad_to(point_to_cpu(p1), point_to_cpu(p2)),
            PathEl::CurveTo(p1, p2, p3) => {
                out.curve_to(point_to_cpu(p1), point_to_cpu(p2), point_to_cpu(p3));
            }
            PathEl::ClosePath => out.close_path(),
        }
    }
    out
}

#[cfg(test)]
#[path = "../../tests/unit/render/overlay.rs"]
mod tests;
