//! Cylinders, cones/frustums and pipes
//!
//! Sides are split into horizontal slices so that each strip segment stays
//! close to planar: the slice height is bounded by the chord a single sector
//! spans at the widest radius.

use super::circle::{annulus_points, fan_around, ring_points};
use super::{
    ensure_positive, ensure_segments, ensure_vertex_budget, sector_step, GeometryError,
    MeshBuffer, PipeMesh, ShapeMesh, Topology,
};
use crate::core_types::{Vec2, Vec3};

/// Number of vertical slices for a side of `height` at `max_radius`
///
/// `max(1, floor(height / (sin(2π / segments) · max_radius)))`, saturating at
/// `usize::MAX` for extreme aspect ratios. Generators check the resulting
/// point count against [`MAX_VERTICES`](super::MAX_VERTICES) before building.
pub fn slice_count(height: f32, max_radius: f32, segments: u32) -> usize {
    let chord = sector_step(segments).sin() * max_radius;
    ((height / chord).floor() as usize).max(1)
}

/// Strip of (lower, upper) pairs with radius interpolated linearly per slice
///
/// Texture coordinates wrap once around the axis (`u = i / segments`) and run
/// bottom to top (`v = y / height`).
pub(crate) fn side_strip(
    height: f32,
    r_bottom: f32,
    r_top: f32,
    segments: u32,
    slices: usize,
) -> MeshBuffer {
    let slice_height = height / slices as f32;
    let radius_at = |y: f32| r_bottom + (r_top - r_bottom) * (y / height);

    let per_slice = 2 * (segments as usize + 1);
    let mut points = Vec::with_capacity(slices * per_slice);
    let mut tex_coords = Vec::with_capacity(slices * per_slice);

    let mut lower = ring_points(r_bottom, segments, 0.0);
    for slice in 1..=slices {
        let y_low = (slice - 1) as f32 * slice_height;
        let y_high = if slice == slices {
            height
        } else {
            slice as f32 * slice_height
        };
        let upper = ring_points(radius_at(y_high), segments, y_high);

        for (i, (lo, hi)) in lower.iter().zip(&upper).enumerate() {
            let u = i as f32 / segments as f32;
            points.push(*lo);
            points.push(*hi);
            tex_coords.push(Vec2::new(u, y_low / height));
            tex_coords.push(Vec2::new(u, y_high / height));
        }
        lower = upper;
    }

    MeshBuffer::new(Topology::TriangleStrip, points).with_tex_coords(tex_coords)
}

/// Cap radius: zero is allowed (cone tip), negative or non-finite is not
fn ensure_cap_radius(name: &'static str, value: f32) -> Result<f32, GeometryError> {
    if value.is_finite() && value >= 0.0 {
        Ok(value)
    } else {
        Err(GeometryError::NonPositive { name, value })
    }
}

/// Cylinder or frustum standing on the origin
///
/// `side` is a textured triangle strip; `top` and `bottom` are fans at
/// `height` and `0`. Either radius may be zero to make a cone, but not both.
///
/// # Errors
///
/// [`GeometryError`] for a non-positive height, a negative radius, two zero
/// radii, `segments < 3`, or a side needing more than
/// [`MAX_VERTICES`](super::MAX_VERTICES) points.
pub fn cylinder(
    height: f32,
    r_bottom: f32,
    r_top: f32,
    segments: u32,
) -> Result<ShapeMesh, GeometryError> {
    let height = ensure_positive("height", height)?;
    let r_bottom = ensure_cap_radius("radius_bottom", r_bottom)?;
    let r_top = ensure_cap_radius("radius_top", r_top)?;
    let max_radius = ensure_positive("radius", r_bottom.max(r_top))?;
    let segments = ensure_segments(segments)?;

    let slices = slice_count(height, max_radius, segments);
    ensure_vertex_budget(&[slices, 2, segments as usize + 1])?;
    let side = side_strip(height, r_bottom, r_top, segments, slices);

    let top = fan_around(
        Vec3::new(0.0, height, 0.0),
        &ring_points(r_top, segments, height),
    );
    let bottom = fan_around(Vec3::zeros(), &ring_points(r_bottom, segments, 0.0));

    Ok(ShapeMesh {
        side,
        top: MeshBuffer::new(Topology::TriangleFan, top),
        bottom: MeshBuffer::new(Topology::TriangleFan, bottom),
    })
}

/// Hollow cylinder with annular caps
///
/// Both sides use the slice count of the outer radius so their rows line up.
///
/// # Errors
///
/// [`GeometryError`] for non-positive dimensions, `inner >= outer`,
/// `segments < 3`, or sides needing more than
/// [`MAX_VERTICES`](super::MAX_VERTICES) points.
pub fn pipe(
    height: f32,
    inner: f32,
    outer: f32,
    segments: u32,
) -> Result<PipeMesh, GeometryError> {
    let height = ensure_positive("height", height)?;
    let inner = ensure_positive("inner_radius", inner)?;
    let outer = ensure_positive("outer_radius", outer)?;
    if inner >= outer {
        return Err(GeometryError::InvertedRadii { inner, outer });
    }
    let segments = ensure_segments(segments)?;

    let slices = slice_count(height, outer, segments);
    // Inner and outer sides together
    ensure_vertex_budget(&[2, slices, 2, segments as usize + 1])?;

    Ok(PipeMesh {
        inner_side: side_strip(height, inner, inner, segments, slices),
        outer_side: side_strip(height, outer, outer, segments, slices),
        top: MeshBuffer::new(
            Topology::TriangleStrip,
            annulus_points(inner, outer, segments, height),
        ),
        bottom: MeshBuffer::new(
            Topology::TriangleStrip,
            annulus_points(inner, outer, segments, 0.0),
        ),
    })
}
