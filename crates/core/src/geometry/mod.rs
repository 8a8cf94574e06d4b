//! Procedural geometry for primitive shapes
//!
//! Every generator is a pure function returning ordered point lists ready for
//! GPU upload. The order matters: strips alternate lower/upper (or outer/inner)
//! points, fans start with their center. The [`Topology`] carried by each
//! [`MeshBuffer`] documents which draw primitive the order was built for.
//!
//! # Frame
//!
//! Shapes are generated in their local frame, y-up, with angle
//! `θ = i · 2π / segments` measured in the horizontal plane so that a ring point
//! is `(r·cos θ, y, r·sin θ)`. Closed rings repeat their first point at the end
//! (`segments + 1` points) so fans and strips close without a seam.
//!
//! # Errors
//!
//! Malformed parameters (non-positive dimensions, fewer than three segments)
//! fail fast with a [`GeometryError`] instead of producing degenerate geometry.

pub mod circle;
pub mod cuboid;
pub mod cylinder;
pub mod error;
pub mod plane;
pub mod sphere;
pub mod transform;

pub use circle::{circle, ring};
pub use cuboid::{cuboid, cuboid_tex_coords, textured_cuboid};
pub use cylinder::{cylinder, pipe, slice_count};
pub use error::GeometryError;
pub use plane::{plane, plane_tex_coords, textured_plane};
pub use sphere::{capsule, hemisphere, sphere};

use crate::core_types::{Vec2, Vec3};
use serde::{Deserialize, Serialize};

/// Smallest angular subdivision that still encloses an area
pub const MIN_SEGMENTS: u32 = 3;

/// Largest number of points a single generated buffer may hold
pub const MAX_VERTICES: usize = 1 << 24;

/// Draw primitive a point sequence was ordered for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Topology {
    /// First point is the shared center
    TriangleFan,
    /// Each point after the second closes a triangle with the previous two
    TriangleStrip,
    /// Independent triangles, three points each
    #[default]
    Triangles,
}

/// Ordered point sequence with optional parallel texture coordinates
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct MeshBuffer {
    pub points: Vec<Vec3>,
    /// Same length as `points` when present
    pub tex_coords: Option<Vec<Vec2>>,
    pub topology: Topology,
}

impl MeshBuffer {
    /// Create an untextured buffer
    pub fn new(topology: Topology, points: Vec<Vec3>) -> Self {
        Self {
            points,
            tex_coords: None,
            topology,
        }
    }

    /// Attach texture coordinates, one per point
    pub fn with_tex_coords(mut self, tex_coords: Vec<Vec2>) -> Self {
        debug_assert_eq!(tex_coords.len(), self.points.len());
        self.tex_coords = Some(tex_coords);
        self
    }

    /// Number of points
    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn is_textured(&self) -> bool {
        self.tex_coords.is_some()
    }
}

/// Shape made of a strip side and two cap fans
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ShapeMesh {
    pub side: MeshBuffer,
    pub top: MeshBuffer,
    pub bottom: MeshBuffer,
}

impl ShapeMesh {
    /// Total number of points across all three parts
    pub fn vertex_count(&self) -> usize {
        self.side.len() + self.top.len() + self.bottom.len()
    }

    /// Move every part by `offset`
    pub fn translated(&self, offset: Vec3) -> Self {
        Self {
            side: self.side.translated(offset),
            top: self.top.translated(offset),
            bottom: self.bottom.translated(offset),
        }
    }
}

/// Hollow cylinder: two sides and two annular caps
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct PipeMesh {
    pub inner_side: MeshBuffer,
    pub outer_side: MeshBuffer,
    pub top: MeshBuffer,
    pub bottom: MeshBuffer,
}

impl PipeMesh {
    /// Total number of points across all four parts
    pub fn vertex_count(&self) -> usize {
        self.inner_side.len() + self.outer_side.len() + self.top.len() + self.bottom.len()
    }

    /// Move every part by `offset`
    pub fn translated(&self, offset: Vec3) -> Self {
        Self {
            inner_side: self.inner_side.translated(offset),
            outer_side: self.outer_side.translated(offset),
            top: self.top.translated(offset),
            bottom: self.bottom.translated(offset),
        }
    }
}

/// Reject zero, negative and non-finite dimensions
pub(crate) fn ensure_positive(name: &'static str, value: f32) -> Result<f32, GeometryError> {
    if value.is_finite() && value > 0.0 {
        Ok(value)
    } else {
        Err(GeometryError::NonPositive { name, value })
    }
}

/// Reject fewer than three segments, or more than a single fan can hold
pub(crate) fn ensure_segments(segments: u32) -> Result<u32, GeometryError> {
    if segments < MIN_SEGMENTS {
        return Err(GeometryError::TooFewSegments { segments });
    }
    ensure_vertex_budget(&[(segments as usize).saturating_add(2)])?;
    Ok(segments)
}

/// Point count as the product of `factors`, refused above [`MAX_VERTICES`]
///
/// Generators call this before allocating any buffer.
pub(crate) fn ensure_vertex_budget(factors: &[usize]) -> Result<usize, GeometryError> {
    let count = factors
        .iter()
        .try_fold(1_usize, |acc, &factor| acc.checked_mul(factor));
    match count {
        Some(count) if count <= MAX_VERTICES => Ok(count),
        _ => Err(GeometryError::TooManyVertices {
            requested: factors
                .iter()
                .fold(1_usize, |acc, &factor| acc.saturating_mul(factor)),
        }),
    }
}

/// Angle between two consecutive ring points
#[inline]
pub(crate) fn sector_step(segments: u32) -> f32 {
    std::f32::consts::TAU / segments as f32
}
