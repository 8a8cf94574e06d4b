//! Point-list transforms used to assemble composite shapes

use super::MeshBuffer;
use crate::core_types::Vec3;

/// Offset every point by `offset`
pub fn translate(points: &[Vec3], offset: Vec3) -> Vec<Vec3> {
    points.iter().map(|p| p + offset).collect()
}

/// Component-wise multiply every point by `factors`
pub fn scale(points: &[Vec3], factors: Vec3) -> Vec<Vec3> {
    points.iter().map(|p| p.component_mul(&factors)).collect()
}

/// Reflect every point across the horizontal plane through `pivot / 2`
///
/// Maps `y` to `pivot - y`; a pivot of 0 is a plain mirror across the origin.
pub fn mirror_y(points: &[Vec3], pivot: f32) -> Vec<Vec3> {
    points
        .iter()
        .map(|p| Vec3::new(p.x, pivot - p.y, p.z))
        .collect()
}

impl MeshBuffer {
    pub fn translated(&self, offset: Vec3) -> Self {
        Self {
            points: translate(&self.points, offset),
            tex_coords: self.tex_coords.clone(),
            topology: self.topology,
        }
    }

    pub fn scaled(&self, factors: Vec3) -> Self {
        Self {
            points: scale(&self.points, factors),
            tex_coords: self.tex_coords.clone(),
            topology: self.topology,
        }
    }

    /// Mirror with [`mirror_y`], keeping point order
    pub fn mirrored_y(&self, pivot: f32) -> Self {
        Self {
            points: mirror_y(&self.points, pivot),
            tex_coords: self.tex_coords.clone(),
            topology: self.topology,
        }
    }

    /// Same points in reverse order
    pub fn reversed(&self) -> Self {
        let mut points = self.points.clone();
        points.reverse();
        let tex_coords = self.tex_coords.as_ref().map(|uv| {
            let mut uv = uv.clone();
            uv.reverse();
            uv
        });
        Self {
            points,
            tex_coords,
            topology: self.topology,
        }
    }

    /// Concatenate `other` after this buffer
    ///
    /// Texture coordinates survive only when both sides carry them (an empty
    /// buffer adopts whatever `other` has).
    pub fn append(&mut self, other: &MeshBuffer) {
        if self.points.is_empty() {
            self.tex_coords.clone_from(&other.tex_coords);
        } else {
            self.tex_coords = match (self.tex_coords.take(), &other.tex_coords) {
                (Some(mut mine), Some(theirs)) => {
                    mine.extend_from_slice(theirs);
                    Some(mine)
                }
                _ => None,
            };
        }
        self.points.extend_from_slice(&other.points);
    }

    /// Positions flattened to `x, y, z, x, y, z, ...`
    pub fn to_flat(&self) -> Vec<f32> {
        self.points.iter().flat_map(|p| [p.x, p.y, p.z]).collect()
    }

    /// Positions and texture coordinates interleaved as `x, y, z, u, v, ...`
    ///
    /// Returns `None` for untextured buffers.
    pub fn to_interleaved(&self) -> Option<Vec<f32>> {
        let uv = self.tex_coords.as_ref()?;
        Some(
            self.points
                .iter()
                .zip(uv)
                .flat_map(|(p, t)| [p.x, p.y, p.z, t.x, t.y])
                .collect(),
        )
    }
}
