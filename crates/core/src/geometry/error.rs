//! Invalid-argument errors raised by the shape generators

/// Errors that can occur while generating a shape
#[derive(Debug, Clone, PartialEq)]
pub enum GeometryError {
    /// A dimension that must be strictly positive (and finite) was not
    NonPositive {
        /// Parameter name as it appears in the generator signature
        name: &'static str,
        value: f32,
    },
    /// Fewer than three angular segments were requested
    TooFewSegments { segments: u32 },
    /// Inner radius is not smaller than the outer radius
    InvertedRadii { inner: f32, outer: f32 },
    /// Capsule height cannot fit both hemispherical caps
    CapsuleTooShort {
        height: f32,
        /// Sum of the two cap radii
        caps: f32,
    },
    /// Plane cell is larger than the extent it has to tile
    CellTooLarge { cell: f32, extent: f32 },
    /// Requested tessellation exceeds [`MAX_VERTICES`](super::MAX_VERTICES)
    TooManyVertices {
        /// Point count the parameters call for, saturated at `usize::MAX`
        requested: usize,
    },
}

impl std::fmt::Display for GeometryError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            GeometryError::NonPositive { name, value } => {
                write!(f, "`{name}` must be a positive finite number, got {value}")
            }
            GeometryError::TooFewSegments { segments } => {
                write!(f, "at least 3 segments are required, got {segments}")
            }
            GeometryError::InvertedRadii { inner, outer } => {
                write!(f, "inner radius {inner} must be smaller than outer radius {outer}")
            }
            GeometryError::CapsuleTooShort { height, caps } => {
                write!(f, "capsule height {height} is shorter than its caps ({caps})")
            }
            GeometryError::CellTooLarge { cell, extent } => {
                write!(f, "cell size {cell} does not fit in extent {extent}")
            }
            GeometryError::TooManyVertices { requested } => write!(
                f,
                "tessellation needs {requested} points, limit is {}",
                super::MAX_VERTICES
            ),
        }
    }
}

impl std::error::Error for GeometryError {}
