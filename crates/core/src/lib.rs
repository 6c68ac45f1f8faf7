//! Gridspace is a set of 2D grids that live in world space. A grid is a dense
//! array of cells of any type, paired with a coordinate system that maps
//! between discrete cell coordinates and continuous world positions.
//!
//! Three coordinate systems are supported:
//!
//! - [SquareGrid]: square cells on the ground (XZ) plane, 8-directional
//! - [SquareGrid2D]: square cells on the screen (XY) plane, 8-directional
//! - [HexGrid]: pointy-top hexagons on the ground plane, 6-directional
//!
//! ```
//! use gridspace::{HexCoord, HexGrid};
//! use nalgebra::Point3;
//!
//! let mut grid: HexGrid<u32> = HexGrid::new(10, 10, Point3::origin(), 1.0);
//! let coord = HexCoord::new(2, 3);
//! grid[coord] = 5;
//!
//! // Find which cell a world position falls in
//! let pos = grid.get_pos(coord);
//! assert_eq!(grid.from_pos(pos), coord);
//! assert_eq!(grid.get_cell_at(pos), 5);
//! ```
//!
//! Grids can also be built from a validated config; see [SquareGridConfig]
//! and [HexGridConfig].

mod config;
mod direction;
mod grid;
pub mod hex;
mod spatial;
pub mod square;

pub use crate::{
    config::{GridConfig, GridPlane, HexGridConfig, SquareGridConfig},
    direction::Direction,
    grid::Grid,
    hex::{HexCoord, HexDir, HexGrid},
    spatial::{CoordinateSystem, Frame, SpatialGrid},
    square::{SquareCoord, SquareDir, SquareGrid, SquareGrid2D},
};
