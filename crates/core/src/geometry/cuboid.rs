//! Axis-aligned boxes as independent triangles

use super::{ensure_positive, GeometryError, MeshBuffer, Topology};
use crate::core_types::{Vec2, Vec3};

/// Box corners as (x sign, y level, z sign): x/z are centered, y sits on 0
#[rustfmt::skip]
const CORNERS: [(f32, f32, f32); 36] = [
    // back (-z)
    (-1.0, 0.0, -1.0), (-1.0, 1.0, -1.0), (1.0, 0.0, -1.0),
    (1.0, 0.0, -1.0), (-1.0, 1.0, -1.0), (1.0, 1.0, -1.0),
    // right (+x)
    (1.0, 0.0, -1.0), (1.0, 1.0, -1.0), (1.0, 1.0, 1.0),
    // top (+y)
    (1.0, 1.0, 1.0), (1.0, 1.0, -1.0), (-1.0, 1.0, -1.0),
    (1.0, 1.0, 1.0), (-1.0, 1.0, -1.0), (-1.0, 1.0, 1.0),
    // left (-x)
    (-1.0, 1.0, 1.0), (-1.0, 1.0, -1.0), (-1.0, 0.0, 1.0),
    // front (+z)
    (-1.0, 1.0, 1.0), (-1.0, 0.0, 1.0), (1.0, 1.0, 1.0),
    (1.0, 1.0, 1.0), (-1.0, 0.0, 1.0), (1.0, 0.0, 1.0),
    // right (+x)
    (1.0, 1.0, 1.0), (1.0, 0.0, 1.0), (1.0, 0.0, -1.0),
    // bottom (-y)
    (1.0, 0.0, -1.0), (1.0, 0.0, 1.0), (-1.0, 0.0, 1.0),
    (1.0, 0.0, -1.0), (-1.0, 0.0, 1.0), (-1.0, 0.0, -1.0),
    // left (-x)
    (-1.0, 0.0, -1.0), (-1.0, 0.0, 1.0), (-1.0, 1.0, -1.0),
];

/// Which repeat factor drives each UV axis, per vertex
#[derive(Clone, Copy)]
enum Axis {
    Zero,
    X,
    Y,
    Z,
}

#[rustfmt::skip]
const TEX_AXES: [(Axis, Axis); 36] = {
    use Axis::{Zero as O, X, Y, Z};
    [
        (O, O), (O, Y), (X, O),
        (X, O), (O, Y), (X, Y),
        (O, O), (Y, O), (Y, Z),
        (X, Z), (X, O), (O, O),
        (X, Z), (O, O), (O, Z),
        (Y, Z), (Y, O), (O, Z),
        (O, Y), (O, O), (X, Y),
        (X, Y), (O, O), (X, O),
        (Y, Z), (O, Z), (O, O),
        (X, O), (X, Z), (O, Z),
        (X, O), (O, Z), (O, O),
        (O, O), (O, Z), (Y, O),
    ]
};

/// Box of `dims` centered on the vertical axis with its base at `y = 0`
///
/// 12 triangles, 36 points, for independent-triangle drawing.
///
/// # Errors
///
/// [`GeometryError::NonPositive`] when any dimension is not positive.
pub fn cuboid(dims: Vec3) -> Result<MeshBuffer, GeometryError> {
    let half_x = ensure_positive("width", dims.x)? / 2.0;
    let height = ensure_positive("height", dims.y)?;
    let half_z = ensure_positive("depth", dims.z)? / 2.0;

    let points = CORNERS
        .iter()
        .map(|&(sx, ly, sz)| Vec3::new(sx * half_x, ly * height, sz * half_z))
        .collect();
    Ok(MeshBuffer::new(Topology::Triangles, points))
}

/// Texture coordinates matching [`cuboid`] vertex order
///
/// `repeat` gives how many times the texture tiles along each box axis.
pub fn cuboid_tex_coords(repeat: Vec3) -> Vec<Vec2> {
    let pick = |axis: Axis| match axis {
        Axis::Zero => 0.0,
        Axis::X => repeat.x,
        Axis::Y => repeat.y,
        Axis::Z => repeat.z,
    };
    TEX_AXES
        .iter()
        .map(|&(u, v)| Vec2::new(pick(u), pick(v)))
        .collect()
}

/// [`cuboid`] with [`cuboid_tex_coords`] attached
///
/// # Errors
///
/// [`GeometryError::NonPositive`] when any dimension is not positive.
pub fn textured_cuboid(dims: Vec3, repeat: Vec3) -> Result<MeshBuffer, GeometryError> {
    Ok(cuboid(dims)?.with_tex_coords(cuboid_tex_coords(repeat)))
}
