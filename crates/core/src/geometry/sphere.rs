//! Hemispheres, spheres and capsules built from stacked latitude rings

use super::circle::{fan_around, ring_points};
use super::cylinder::cylinder;
use super::{
    ensure_positive, ensure_segments, ensure_vertex_budget, sector_step, GeometryError,
    MeshBuffer, ShapeMesh, Topology,
};
use crate::core_types::Vec3;

/// Dome resting on the origin, apex at `(0, radius, 0)`
///
/// Rings are stacked every `radius · sin(2π / segments)` with ring radius
/// `sqrt(radius² − h²)` until the height reaches `radius`. Consecutive rings
/// form the `side` strip; the last ring collapses into the apex through the
/// `top` fan. `bottom` is the base disk.
///
/// With very few segments the first step already reaches the apex, leaving
/// an empty side and a cone-shaped `top`.
///
/// # Errors
///
/// [`GeometryError`] when `radius` is not positive, `segments < 3`, or the
/// rings would exceed [`MAX_VERTICES`](super::MAX_VERTICES).
pub fn hemisphere(radius: f32, segments: u32) -> Result<ShapeMesh, GeometryError> {
    let radius = ensure_positive("radius", radius)?;
    let segments = ensure_segments(segments)?;

    let slice_height = radius * sector_step(segments).sin();
    // Ring heights are `k · slice_height`; at most this many fit below the apex
    let max_rings = (radius / slice_height).ceil() as usize;
    let capacity = ensure_vertex_budget(&[max_rings, 2, segments as usize + 1])?;
    let base = ring_points(radius, segments, 0.0);

    let mut side = Vec::with_capacity(capacity);
    let mut lower = base.clone();
    for ring in 1..=max_rings {
        let height = ring as f32 * slice_height;
        if height >= radius {
            break;
        }
        let ring_radius = (radius * radius - height * height).sqrt();
        let upper = ring_points(ring_radius, segments, height);
        for (lo, hi) in lower.iter().zip(&upper) {
            side.push(*lo);
            side.push(*hi);
        }
        lower = upper;
    }

    let apex = Vec3::new(0.0, radius, 0.0);
    Ok(ShapeMesh {
        side: MeshBuffer::new(Topology::TriangleStrip, side),
        top: MeshBuffer::new(Topology::TriangleFan, fan_around(apex, &lower)),
        bottom: MeshBuffer::new(Topology::TriangleFan, fan_around(Vec3::zeros(), &base)),
    })
}

/// Sphere resting on the origin, centered at `(0, radius, 0)`
///
/// The lower half is the hemisphere side mirrored across the equator and
/// reversed, so the combined strip runs continuously from the south cap to the
/// north cap.
///
/// # Errors
///
/// Same as [`hemisphere`].
pub fn sphere(radius: f32, segments: u32) -> Result<ShapeMesh, GeometryError> {
    let hemi = hemisphere(radius, segments)?;
    let lift = Vec3::new(0.0, radius, 0.0);

    let mut side = hemi.side.mirrored_y(0.0).reversed();
    side.append(&hemi.side);

    Ok(ShapeMesh {
        side: side.translated(lift),
        top: hemi.top.translated(lift),
        bottom: hemi.top.mirrored_y(0.0).translated(lift),
    })
}

/// Capsule of total `height` resting on the origin
///
/// A frustum body of length `height − r_bottom − r_top` joins a flipped
/// bottom hemisphere of `r_bottom` and a top hemisphere of `r_top`. When the
/// caps fill the height exactly the body is omitted.
///
/// # Errors
///
/// [`GeometryError`] for non-positive dimensions, `segments < 3`, a height
/// shorter than the two caps, or a tessellation over
/// [`MAX_VERTICES`](super::MAX_VERTICES).
pub fn capsule(
    height: f32,
    r_bottom: f32,
    r_top: f32,
    segments: u32,
) -> Result<ShapeMesh, GeometryError> {
    let height = ensure_positive("height", height)?;
    let r_bottom = ensure_positive("radius_bottom", r_bottom)?;
    let r_top = ensure_positive("radius_top", r_top)?;
    let segments = ensure_segments(segments)?;

    let caps = r_bottom + r_top;
    let body_height = height - caps;
    if body_height < 0.0 {
        return Err(GeometryError::CapsuleTooShort { height, caps });
    }

    let lower = hemisphere(r_bottom, segments)?;
    let upper = hemisphere(r_top, segments)?;
    let top_offset = Vec3::new(0.0, height - r_top, 0.0);

    let mut side = lower.side.mirrored_y(r_bottom).reversed();
    if body_height > 0.0 {
        let body = cylinder(body_height, r_bottom, r_top, segments)?;
        side.append(&body.side.translated(Vec3::new(0.0, r_bottom, 0.0)));
    }
    side.append(&upper.side.translated(top_offset));

    Ok(ShapeMesh {
        side,
        top: upper.top.translated(top_offset),
        bottom: lower.top.mirrored_y(r_bottom),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_hemisphere_points_on_surface() {
        let mesh = hemisphere(1.5, 16).unwrap();
        assert!(!mesh.side.is_empty());
        for p in &mesh.side.points {
            assert_relative_eq!(p.norm(), 1.5, epsilon = 1e-4);
            assert!(p.y >= 0.0 && p.y < 1.5);
        }
    }

    #[test]
    fn test_hemisphere_top_collapses_to_apex() {
        let mesh = hemisphere(1.0, 12).unwrap();
        assert_eq!(mesh.top.points[0], Vec3::new(0.0, 1.0, 0.0));
        assert_eq!(mesh.top.len(), 14);
        assert_eq!(mesh.bottom.points[0], Vec3::zeros());
        assert!(mesh.bottom.points.iter().all(|p| p.y == 0.0));
    }

    #[test]
    fn test_hemisphere_rings_climb() {
        let mesh = hemisphere(1.0, 24).unwrap();
        let ring_len = 2 * 25;
        let heights: Vec<f32> = mesh
            .side
            .points
            .chunks_exact(ring_len)
            .map(|band| band[1].y)
            .collect();
        assert!(heights.windows(2).all(|w| w[1] > w[0]));
    }

    #[test]
    fn test_sphere_sits_on_ground() {
        let mesh = sphere(0.5, 12).unwrap();
        let center = Vec3::new(0.0, 0.5, 0.0);
        for p in &mesh.side.points {
            assert_relative_eq!((p - center).norm(), 0.5, epsilon = 1e-4);
        }
        assert_relative_eq!(mesh.bottom.points[0], Vec3::zeros(), epsilon = 1e-6);
        assert_relative_eq!(mesh.top.points[0], Vec3::new(0.0, 1.0, 0.0), epsilon = 1e-6);
    }

    #[test]
    fn test_sphere_side_is_mirror_symmetric() {
        let hemi = hemisphere(1.0, 8).unwrap();
        let mesh = sphere(1.0, 8).unwrap();
        assert_eq!(mesh.side.len(), 2 * hemi.side.len());
        let first = mesh.side.points[0];
        let last = mesh.side.points[mesh.side.len() - 1];
        assert_relative_eq!(first.y + last.y, 2.0, epsilon = 1e-5);
    }

    #[test]
    fn test_capsule_spans_height() {
        let mesh = capsule(3.0, 0.6, 0.4, 12).unwrap();
        for p in &mesh.side.points {
            assert!(p.y >= -1e-5 && p.y <= 3.0 + 1e-5, "y = {}", p.y);
        }
        assert_relative_eq!(mesh.bottom.points[0], Vec3::zeros(), epsilon = 1e-6);
        assert_relative_eq!(mesh.top.points[0], Vec3::new(0.0, 3.0, 0.0), epsilon = 1e-6);
    }

    #[test]
    fn test_capsule_without_body() {
        let mesh = capsule(2.0, 0.5, 1.5, 12).unwrap();
        let lower = hemisphere(0.5, 12).unwrap();
        let upper = hemisphere(1.5, 12).unwrap();
        assert_eq!(mesh.side.len(), lower.side.len() + upper.side.len());
    }

    #[test]
    fn test_four_segments_leave_no_side() {
        // sin(2π/4) = 1, so the first step already reaches the apex
        let mesh = hemisphere(1.0, 4).unwrap();
        assert!(mesh.side.is_empty());
        assert_eq!(mesh.top.len(), 6);
        assert_eq!(mesh.top.points[0], Vec3::new(0.0, 1.0, 0.0));
        // The cone-shaped top spans the base ring
        assert!(mesh.top.points[1..].iter().all(|p| p.y == 0.0));

        let ball = sphere(1.0, 4).unwrap();
        assert!(ball.side.is_empty());
        assert_relative_eq!(ball.top.points[0], Vec3::new(0.0, 2.0, 0.0), epsilon = 1e-6);
        assert_relative_eq!(ball.bottom.points[0], Vec3::zeros(), epsilon = 1e-6);
        for (top, bottom) in ball.top.points.iter().zip(&ball.bottom.points) {
            assert_relative_eq!(top.y + bottom.y, 2.0, epsilon = 1e-6);
        }
    }

    #[test]
    fn test_three_segments_single_band() {
        // One ring at h = sin(2π/3), the next step overshoots the apex
        let mesh = hemisphere(1.0, 3).unwrap();
        assert_eq!(mesh.side.len(), 2 * 4);
        assert_eq!(mesh.top.len(), 5);
        let ring_height = (std::f32::consts::TAU / 3.0).sin();
        assert!(mesh.top.points[1..]
            .iter()
            .all(|p| (p.y - ring_height).abs() < 1e-6));
        assert_relative_eq!(mesh.top.points[1].x, 0.5, epsilon = 1e-5);

        let ball = sphere(1.0, 3).unwrap();
        assert_eq!(ball.side.len(), 2 * mesh.side.len());
        let first = ball.side.points[0];
        let last = ball.side.points[ball.side.len() - 1];
        assert_relative_eq!(first.y + last.y, 2.0, epsilon = 1e-5);
    }

    #[test]
    fn test_capsule_side_is_body_when_caps_are_flat() {
        let mesh = capsule(3.0, 0.5, 0.5, 4).unwrap();
        let body = cylinder(2.0, 0.5, 0.5, 4).unwrap();
        assert_eq!(mesh.side.len(), body.side.len());
        for (p, q) in mesh.side.points.iter().zip(&body.side.points) {
            assert_relative_eq!(*p, q + Vec3::new(0.0, 0.5, 0.0), epsilon = 1e-6);
        }
    }

    #[test]
    fn test_dense_rings_refused() {
        assert!(matches!(
            hemisphere(1.0, 1 << 20),
            Err(GeometryError::TooManyVertices { .. })
        ));
        assert!(matches!(
            sphere(1.0, u32::MAX),
            Err(GeometryError::TooManyVertices { .. })
        ));
    }

    #[test]
    fn test_capsule_too_short() {
        assert_eq!(
            capsule(1.0, 0.5, 0.75, 12),
            Err(GeometryError::CapsuleTooShort {
                height: 1.0,
                caps: 1.25
            })
        );
    }
}
