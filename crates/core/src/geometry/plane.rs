//! Tessellated ground plane as a single serpentine triangle strip

use super::{ensure_positive, ensure_vertex_budget, GeometryError, MeshBuffer, Topology};
use crate::core_types::{Vec2, Vec3};

/// Ground plane of `height` (along z) by `width` (along x), centered on origin
///
/// Rows of `cell`-sized quads are walked alternately left-to-right and
/// right-to-left so the whole grid stays one strip with no restart. Each row
/// emits `(x, 0, z)` / `(x, 0, z + cell)` pairs for `floor(width / cell) + 1`
/// columns, giving `2 · (cols + 1) · rows` points.
///
/// # Errors
///
/// [`GeometryError`] for non-positive dimensions, a cell larger than either
/// extent, or a grid finer than [`MAX_VERTICES`](super::MAX_VERTICES) allows.
pub fn plane(height: f32, width: f32, cell: f32) -> Result<MeshBuffer, GeometryError> {
    let height = ensure_positive("height", height)?;
    let width = ensure_positive("width", width)?;
    let cell = ensure_positive("cell_size", cell)?;

    let rows = (height / cell).floor() as usize;
    if rows == 0 {
        return Err(GeometryError::CellTooLarge {
            cell,
            extent: height,
        });
    }
    let cols = (width / cell).floor() as usize;
    if cols == 0 {
        return Err(GeometryError::CellTooLarge {
            cell,
            extent: width,
        });
    }

    let count = ensure_vertex_budget(&[2, cols.saturating_add(1), rows])?;

    let x_start = -width / 2.0;
    let z_start = -height / 2.0;
    let mut points = Vec::with_capacity(count);
    for row in 0..rows {
        // Odd rows run backwards by mirroring x
        let direction = if row % 2 == 0 { 1.0 } else { -1.0 };
        let z = z_start + row as f32 * cell;
        for col in 0..=cols {
            let x = (x_start + col as f32 * cell) * direction;
            points.push(Vec3::new(x, 0.0, z));
            points.push(Vec3::new(x, 0.0, z + cell));
        }
    }

    Ok(MeshBuffer::new(Topology::TriangleStrip, points))
}

/// Texture coordinates stretching one texture over the whole plane
pub fn plane_tex_coords(points: &[Vec3], height: f32, width: f32) -> Vec<Vec2> {
    points
        .iter()
        .map(|p| Vec2::new((p.x + width / 2.0) / width, (p.z + height / 2.0) / height))
        .collect()
}

/// [`plane`] with [`plane_tex_coords`] attached
///
/// # Errors
///
/// Same as [`plane`].
pub fn textured_plane(height: f32, width: f32, cell: f32) -> Result<MeshBuffer, GeometryError> {
    let mesh = plane(height, width, cell)?;
    let tex_coords = plane_tex_coords(&mesh.points, height, width);
    Ok(mesh.with_tex_coords(tex_coords))
}
