//! Flat circular primitives: filled circle (fan) and annulus (strip)

use super::{
    ensure_positive, ensure_segments, ensure_vertex_budget, sector_step, GeometryError,
    MeshBuffer, Topology,
};
use crate::core_types::Vec3;

/// Closed ring of `segments + 1` points at height `y`
///
/// The last point repeats the first so consumers never need to wrap indices.
pub(crate) fn ring_points(radius: f32, segments: u32, y: f32) -> Vec<Vec3> {
    let step = sector_step(segments);
    (0..=segments)
        .map(|i| {
            let angle = i as f32 * step;
            Vec3::new(radius * angle.cos(), y, radius * angle.sin())
        })
        .collect()
}

/// Fan ordering: `center` first, then the ring
pub(crate) fn fan_around(center: Vec3, ring: &[Vec3]) -> Vec<Vec3> {
    let mut points = Vec::with_capacity(ring.len() + 1);
    points.push(center);
    points.extend_from_slice(ring);
    points
}

/// Outer/inner pairs per angular step
pub(crate) fn annulus_points(inner: f32, outer: f32, segments: u32, y: f32) -> Vec<Vec3> {
    ring_points(outer, segments, y)
        .into_iter()
        .zip(ring_points(inner, segments, y))
        .flat_map(|(o, i)| [o, i])
        .collect()
}

/// Filled circle in the horizontal plane, as a triangle fan
///
/// Produces the center `(0, 0, 0)` followed by `segments + 1` rim points, i.e.
/// exactly `segments + 2` points.
///
/// # Errors
///
/// [`GeometryError`] when `radius` is not positive, `segments < 3`, or the
/// fan would exceed [`MAX_VERTICES`](super::MAX_VERTICES).
pub fn circle(radius: f32, segments: u32) -> Result<MeshBuffer, GeometryError> {
    let radius = ensure_positive("radius", radius)?;
    let segments = ensure_segments(segments)?;

    let rim = ring_points(radius, segments, 0.0);
    Ok(MeshBuffer::new(
        Topology::TriangleFan,
        fan_around(Vec3::zeros(), &rim),
    ))
}

/// Flat annulus as a triangle strip, outer point first in each pair
///
/// # Errors
///
/// [`GeometryError`] when a radius is not positive, `inner >= outer`,
/// `segments < 3`, or the strip would exceed
/// [`MAX_VERTICES`](super::MAX_VERTICES).
pub fn ring(inner: f32, outer: f32, segments: u32) -> Result<MeshBuffer, GeometryError> {
    let inner = ensure_positive("inner_radius", inner)?;
    let outer = ensure_positive("outer_radius", outer)?;
    if inner >= outer {
        return Err(GeometryError::InvertedRadii { inner, outer });
    }
    let segments = ensure_segments(segments)?;
    ensure_vertex_budget(&[2, segments as usize + 1])?;

    Ok(MeshBuffer::new(
        Topology::TriangleStrip,
        annulus_points(inner, outer, segments, 0.0),
    ))
}
