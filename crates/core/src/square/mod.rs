//! Square grids, where coordinates map 1:1 onto the backing array. There are
//! two flavors that differ only in which world plane they occupy:
//!
//! - [SquareGrid] lies on the ground plane (XZ). Grid `y` is world Z.
//! - [SquareGrid2D] lies on the screen plane (XY). Grid `y` is world Y, and
//!   world Z is left alone.
//!
//! Square cells tile without ambiguity, so resolving a world position to a
//! cell is a plain floor division. No rounding tricks are needed, unlike
//! [crate::hex].

mod unit;

pub use self::unit::*;

use crate::{
    config::{GridPlane, SquareGridConfig},
    direction::Direction,
    grid::Grid,
    spatial::{CoordinateSystem, Frame, SpatialGrid},
};
use anyhow::{ensure, Context};
use nalgebra::{Point3, Vector3};
use validator::Validate;

/// Square coordinate system on the ground (XZ) plane
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct Square;

/// Square coordinate system on the screen (XY) plane
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct SquarePlanar;

/// A square grid on the ground plane
pub type SquareGrid<T> = SpatialGrid<T, Square>;
/// A square grid on the screen plane
pub type SquareGrid2D<T> = SpatialGrid<T, SquarePlanar>;

/// Floor a float into a grid coordinate component
fn floor_component(value: f64) -> i32 {
    value.floor() as i32
}

fn square_neighbours(coord: SquareCoord) -> Vec<SquareCoord> {
    SquareDir::CLOCKWISE
        .iter()
        .map(|dir| coord.neighbour(*dir))
        .collect()
}

impl CoordinateSystem for Square {
    type Coord = SquareCoord;

    const NAME: &'static str = "square";

    fn to_world(frame: &Frame, coord: SquareCoord) -> Point3<f64> {
        let size = frame.cell_size();
        let offset =
            Vector3::new(coord.x as f64 * size.x, 0.0, coord.y as f64 * size.z);
        frame.anchor() + offset + frame.half_cell_size()
    }

    fn from_world(frame: &Frame, pos: Point3<f64>) -> SquareCoord {
        let relative = pos - frame.anchor();
        let size = frame.cell_size();
        SquareCoord::new(
            floor_component(relative.x / size.x),
            floor_component(relative.z / size.z),
        )
    }

    fn to_index(coord: SquareCoord) -> (i64, i64) {
        (coord.x as i64, coord.y as i64)
    }

    fn from_index(x: usize, y: usize) -> SquareCoord {
        SquareCoord::new(x as i32, y as i32)
    }

    fn neighbours(coord: SquareCoord) -> Vec<SquareCoord> {
        square_neighbours(coord)
    }
}

impl CoordinateSystem for SquarePlanar {
    type Coord = SquareCoord;

    const NAME: &'static str = "planar square";

    fn to_world(frame: &Frame, coord: SquareCoord) -> Point3<f64> {
        let size = frame.cell_size();
        let offset =
            Vector3::new(coord.x as f64 * size.x, coord.y as f64 * size.y, 0.0);
        frame.anchor() + offset + frame.half_cell_size()
    }

    fn from_world(frame: &Frame, pos: Point3<f64>) -> SquareCoord {
        let relative = pos - frame.anchor();
        let size = frame.cell_size();
        SquareCoord::new(
            floor_component(relative.x / size.x),
            floor_component(relative.y / size.y),
        )
    }

    fn to_index(coord: SquareCoord) -> (i64, i64) {
        Square::to_index(coord)
    }

    fn from_index(x: usize, y: usize) -> SquareCoord {
        Square::from_index(x, y)
    }

    fn neighbours(coord: SquareCoord) -> Vec<SquareCoord> {
        square_neighbours(coord)
    }
}

/// Operations common to both square flavors. These can't be generic over the
/// coordinate system because constructors need to know the plane.
macro_rules! impl_square_grid {
    ($system:ty, $plane:expr) => {
        impl<T: Clone + Default> SpatialGrid<T, $system> {
            /// Create a grid where every cell holds `T::default()`
            pub fn new(
                width: usize,
                height: usize,
                anchor: Point3<f64>,
                cell_size: Vector3<f64>,
            ) -> Self {
                Self::filled(width, height, T::default(), anchor, cell_size)
            }

            /// Build a grid from a config, after validating it. Every cell
            /// holds `T::default()`.
            pub fn from_config(
                config: &SquareGridConfig,
            ) -> anyhow::Result<Self> {
                config.validate().context("invalid grid config")?;
                ensure!(
                    config.plane == $plane,
                    "config is for the {:?} plane, but a {} grid lies on {:?}",
                    config.plane,
                    <$system as CoordinateSystem>::NAME,
                    $plane
                );
                Ok(Self::new(
                    config.grid.width,
                    config.grid.height,
                    config.grid.anchor,
                    config.cell_size,
                ))
            }
        }

        impl<T: Clone> SpatialGrid<T, $system> {
            /// Create a grid where every cell holds a copy of `value`
            pub fn filled(
                width: usize,
                height: usize,
                value: T,
                anchor: Point3<f64>,
                cell_size: Vector3<f64>,
            ) -> Self {
                Self::from_parts(
                    Grid::filled(width, height, value),
                    Frame::new(anchor, cell_size),
                )
            }
        }

        impl<T> SpatialGrid<T, $system> {
            /// Place an existing grid into world space
            pub fn with_grid(
                grid: Grid<T>,
                anchor: Point3<f64>,
                cell_size: Vector3<f64>,
            ) -> Self {
                Self::from_parts(grid, Frame::new(anchor, cell_size))
            }

            /// All coordinates exactly `depth` steps away from `coord`
            /// (counting diagonal steps as one). See [SquareCoord::ring].
            pub fn neighbours_at(
                &self,
                coord: SquareCoord,
                depth: u32,
            ) -> Vec<SquareCoord> {
                coord.ring(depth)
            }

            /// World-space center of the cell at column `x`, row `y`
            pub fn get_pos_xy(&self, x: i32, y: i32) -> Point3<f64> {
                self.get_pos(SquareCoord::new(x, y))
            }
        }
    };
}

impl_square_grid!(Square, GridPlane::Xz);
impl_square_grid!(SquarePlanar, GridPlane::Xy);
