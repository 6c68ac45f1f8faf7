use nalgebra::{Point3, Vector3};
use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError};

/// Dimensions and placement shared by every kind of spatial grid. The
/// coordinate-system-specific configs embed this.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize, Validate)]
#[serde(default)]
pub struct GridConfig {
    /// Number of cells along the grid's x axis (columns)
    #[validate(range(min = 1, max = 100000))]
    pub width: usize,

    /// Number of cells along the grid's y axis (rows)
    #[validate(range(min = 1, max = 100000))]
    pub height: usize,

    /// World position of the corner of cell `(0, 0)`
    pub anchor: Point3<f64>,
}

/// The plane that a square grid is laid out on
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GridPlane {
    /// Ground plane: grid rows run along world Z. Used by [crate::SquareGrid].
    Xz,
    /// Screen plane: grid rows run along world Y. Used by
    /// [crate::SquareGrid2D].
    Xy,
}

/// Config for a square grid, either flavor
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize, Validate)]
#[serde(default)]
#[validate(schema(function = "validate_square_plane"))]
pub struct SquareGridConfig {
    #[validate]
    pub grid: GridConfig,

    /// Which two world axes the grid spans. The cell size must be positive
    /// on both of them.
    pub plane: GridPlane,

    /// World-space extent of one cell. Components must be finite and
    /// non-negative. The axis that isn't part of the plane is only used to
    /// center cells, so it's allowed to be zero.
    #[validate(custom = "validate_cell_size")]
    pub cell_size: Vector3<f64>,
}

/// Config for a pointy-top hex grid. Unlike square grids, hex cell size is
/// derived from a single radius.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize, Validate)]
#[serde(default)]
pub struct HexGridConfig {
    #[validate]
    pub grid: GridConfig,

    /// Outer radius of each hex, i.e. the distance from the center to any
    /// vertex
    #[validate(custom = "validate_radius")]
    pub radius: f64,
}

impl Default for GridConfig {
    fn default() -> Self {
        Self {
            width: 10,
            height: 10,
            anchor: Point3::origin(),
        }
    }
}

impl Default for SquareGridConfig {
    fn default() -> Self {
        Self {
            grid: GridConfig::default(),
            plane: GridPlane::Xz,
            cell_size: Vector3::new(1.0, 0.0, 1.0),
        }
    }
}

impl Default for HexGridConfig {
    fn default() -> Self {
        Self {
            grid: GridConfig::default(),
            radius: 1.0,
        }
    }
}

fn validate_cell_size(cell_size: &Vector3<f64>) -> Result<(), ValidationError> {
    if cell_size.iter().all(|c| c.is_finite() && *c >= 0.0) {
        Ok(())
    } else {
        Err(ValidationError::new("cell_size"))
    }
}

fn validate_square_plane(
    config: &SquareGridConfig,
) -> Result<(), ValidationError> {
    let size = config.cell_size;
    let active = match config.plane {
        GridPlane::Xz => [size.x, size.z],
        GridPlane::Xy => [size.x, size.y],
    };
    if active.iter().all(|c| *c > 0.0) {
        Ok(())
    } else {
        Err(ValidationError::new("plane"))
    }
}

fn validate_radius(radius: f64) -> Result<(), ValidationError> {
    if radius.is_finite() && radius > 0.0 {
        Ok(())
    } else {
        Err(ValidationError::new("radius"))
    }
}
