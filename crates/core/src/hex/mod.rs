//! This module holds the types and grid implementation for hexagon grids.
//!
//! ## Coordinate Systems
//!
//! Hex grids juggle three different coordinate systems:
//!
//! ### Cube Coordinates
//!
//! Cells are addressed with the [cube coordinate system defined by Amit
//! Patel](https://www.redblobgames.com/grids/hexagons/#coordinates-cube).
//! Each coordinate has three integer components (`x`, `y`, and `z`), and **for
//! any cell, `x + y + z = 0`.** That means only two components are actually
//! needed, which is why [HexCoord] stores just `x` and `z` (this pair is
//! known as axial coordinates). The third axis makes neighbour, distance and
//! rounding math much simpler though, so it's always available.
//!
//! **We use "pointy topped" hexes.** Moving along +`x` goes east, and moving
//! along +`z` goes north-east.
//!
//! ### Offset Coordinates
//!
//! Hex grids are stored in the same dense rectangular array as square grids.
//! To fit, each row of hexes is shifted half a cell relative to its neighbours
//! so that every row stays within the same range of columns. A cube coordinate
//! `(x, z)` lives at column `x + z / 2`, row `z` (integer division). See
//! [HexCoord::from_offset] and [HexCoord::to_offset].
//!
//! ### World Coordinates
//!
//! The grid lies on the ground plane (XZ). The center of cell `(0, 0, 0)` is
//! half a cell from the anchor, columns step along world +X by the hex width
//! (`sqrt(3) * radius`), and rows step along world +Z by `1.5 * radius`, with
//! odd rows nudged half a hex east.
//!
//! Going from world space back to a cell is the tricky part, since a point
//! is generally not on a cell center. See [FractionalHex::round] for how that's
//! resolved.

mod data_structure;
mod unit;

pub use self::{data_structure::*, unit::*};

use crate::{
    config::HexGridConfig,
    grid::Grid,
    spatial::{CoordinateSystem, Frame, SpatialGrid},
};
use anyhow::Context;
use nalgebra::{Point3, Vector3};
use validator::Validate;

/// Pointy-top hex coordinate system on the ground (XZ) plane
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct Hex;

/// A grid of pointy-top hexes
pub type HexGrid<T> = SpatialGrid<T, Hex>;

impl CoordinateSystem for Hex {
    type Coord = HexCoord;

    const NAME: &'static str = "hex";

    fn to_world(frame: &Frame, coord: HexCoord) -> Point3<f64> {
        let size = frame.cell_size();
        let half = frame.half_cell_size();
        let (col, row) = coord.to_offset();
        // The integer division in the offset drops half a column on odd
        // rows, so add it back here. Negative odd rows get nudged west.
        let x = col as f64 * size.x + (row % 2) as f64 * half.x;
        let z = row as f64 * half.z * 1.5;
        frame.anchor() + half + Vector3::new(x, 0.0, z)
    }

    fn from_world(frame: &Frame, pos: Point3<f64>) -> HexCoord {
        let half = frame.half_cell_size();
        let local = frame.localize(pos);
        // Invert the hex basis to get fractional axial components
        let z = local.z / (half.z * 1.5);
        let x = local.x / frame.cell_size().x - z / 2.0;
        FractionalHex::from_axial(x, z).round()
    }

    fn to_index(coord: HexCoord) -> (i64, i64) {
        let (col, row) = coord.to_offset();
        (col as i64, row as i64)
    }

    fn from_index(x: usize, y: usize) -> HexCoord {
        HexCoord::from_offset(x as i32, y as i32)
    }

    fn neighbours(coord: HexCoord) -> Vec<HexCoord> {
        coord.neighbours().to_vec()
    }
}

impl<T: Clone + Default> HexGrid<T> {
    /// Create a hex grid where every cell holds `T::default()`. The cell size
    /// is derived from `radius`, the outer radius of each hex.
    pub fn new(
        width: usize,
        height: usize,
        anchor: Point3<f64>,
        radius: f64,
    ) -> Self {
        Self::filled(width, height, T::default(), anchor, radius)
    }

    /// Build a grid from a config, after validating it. Every cell holds
    /// `T::default()`.
    pub fn from_config(config: &HexGridConfig) -> anyhow::Result<Self> {
        config.validate().context("invalid grid config")?;
        Ok(Self::new(
            config.grid.width,
            config.grid.height,
            config.grid.anchor,
            config.radius,
        ))
    }
}

impl<T: Clone> HexGrid<T> {
    /// Create a hex grid where every cell holds a copy of `value`
    pub fn filled(
        width: usize,
        height: usize,
        value: T,
        anchor: Point3<f64>,
        radius: f64,
    ) -> Self {
        Self::with_grid(Grid::filled(width, height, value), anchor, radius)
    }
}

impl<T> HexGrid<T> {
    /// Place an existing grid into world space. The grid's positions are
    /// treated as offset coordinates.
    pub fn with_grid(grid: Grid<T>, anchor: Point3<f64>, radius: f64) -> Self {
        Self::from_parts(grid, Frame::new(anchor, hex_cell_size(radius)))
    }

    /// Outer radius of each hex (center to vertex)
    pub fn radius(&self) -> f64 {
        self.half_cell_size().z
    }

    /// Inner radius of each hex (center to the midpoint of a side)
    pub fn inner_radius(&self) -> f64 {
        self.half_cell_size().x
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::direction::Direction;
    use assert_approx_eq::assert_approx_eq;

    fn unit_grid() -> HexGrid<u32> {
        HexGrid::new(6, 5, Point3::origin(), 1.0)
    }

    #[test]
    fn test_cell_size() {
        let grid = unit_grid();
        assert_approx_eq!(grid.cell_size().x, 1.732, 1e-3);
        assert_approx_eq!(grid.cell_size().y, 0.0);
        assert_approx_eq!(grid.cell_size().z, 2.0);
        assert_approx_eq!(grid.radius(), 1.0);
        assert_approx_eq!(grid.inner_radius(), 0.866, 1e-3);
    }

    #[test]
    fn test_get_pos() {
        let grid = unit_grid();
        let w = grid.cell_size().x;

        let origin = grid.get_pos(HexCoord::ORIGIN);
        assert_approx_eq!(origin.x, w / 2.0);
        assert_approx_eq!(origin.y, 0.0);
        assert_approx_eq!(origin.z, 1.0);
        assert_eq!(grid.from_pos(origin), HexCoord::ORIGIN);

        // Odd rows are shifted half a hex east
        let ne = grid.get_pos(HexCoord::ORIGIN.neighbour(HexDir::NE));
        assert_approx_eq!(ne.x, w);
        assert_approx_eq!(ne.z, 2.5);

        // Even rows line back up with the origin's column
        let two_up = grid.get_pos(HexCoord::from_offset(0, 2));
        assert_approx_eq!(two_up.x, origin.x);
        assert_approx_eq!(two_up.z, 4.0);
    }

    #[test]
    fn test_neighbours_are_equidistant() {
        let grid = unit_grid();
        let center = HexCoord::from_offset(2, 2);
        let center_pos = grid.get_pos(center);
        for neighbour in grid.neighbours(center) {
            let distance = (grid.get_pos(neighbour) - center_pos).norm();
            // Adjacent centers are always one hex width apart
            assert_approx_eq!(distance, grid.cell_size().x, 1e-6);
        }
    }

    #[test]
    fn test_round_trip() {
        let grid = HexGrid::<()>::new(9, 7, Point3::new(-4.0, 2.0, 3.5), 0.6);
        for coord in grid.coords() {
            assert!(grid.is_valid(coord));
            assert_eq!(grid.from_pos(grid.get_pos(coord)), coord);
        }
        // Coordinates outside the grid round trip too
        for coord in HexCoord::new(-3, -3).range(4) {
            assert_eq!(grid.from_pos(grid.get_pos(coord)), coord);
        }
    }

    #[test]
    fn test_from_pos_near_center() {
        let grid = unit_grid();
        let coord = HexCoord::from_offset(3, 1);
        let center = grid.get_pos(coord);
        // Anything within the inner radius is definitely in the cell
        for dir in HexDir::CLOCKWISE {
            let offset = grid.get_pos(coord.neighbour(*dir)) - center;
            let inside = center + offset * 0.45;
            assert_eq!(grid.from_pos(inside), coord, "toward {:?}", dir);
            let outside = center + offset * 0.55;
            assert_eq!(grid.from_pos(outside), coord.neighbour(*dir));
        }
    }

    #[test]
    fn test_is_valid() {
        let grid = unit_grid();
        // (x, z) is stored at column x + z/2
        assert!(grid.is_valid(HexCoord::new(-1, 2)));
        assert!(grid.is_valid(HexCoord::new(5, 1)));
        assert!(!grid.is_valid(HexCoord::new(-1, 1)));
        assert!(!grid.is_valid(HexCoord::new(5, 2)));
        assert!(!grid.is_valid(HexCoord::new(0, 5)));
        assert!(!grid.is_valid(HexCoord::new(0, -1)));
        assert_eq!(grid.coords().count(), 30);
    }

    #[test]
    fn test_get_cell() {
        let mut grid = unit_grid();
        let coord = HexCoord::new(-1, 3);
        grid.set_cell(coord, 9).unwrap();
        assert_eq!(grid.get_cell(coord), 9);
        assert_eq!(grid.grid()[(0, 3)], 9);
        assert_eq!(grid.get_cell_at(grid.get_pos(coord)), 9);
        // Out of bounds is the default
        assert_eq!(grid.get_cell(HexCoord::new(-2, 3)), 0);
        assert_eq!(grid.get_cell_at(Point3::new(-50.0, 0.0, 0.0)), 0);
        assert!(grid.set_cell(HexCoord::new(0, 9), 1).is_err());
    }

    #[test]
    fn test_valid_neighbours() {
        let grid = unit_grid();
        let center = HexCoord::from_offset(2, 2);
        assert_eq!(grid.valid_neighbours(center).count(), 6);
        // Bottom-left corner: only E, NE are in bounds
        let corner: Vec<_> = grid.valid_neighbours(HexCoord::ORIGIN).collect();
        assert_eq!(corner, vec![HexCoord::new(0, 1), HexCoord::new(1, 0)]);
    }

    #[test]
    fn test_from_config() {
        let grid: HexGrid<u8> =
            HexGrid::from_config(&HexGridConfig::default()).unwrap();
        assert_eq!(grid.width(), 10);
        assert_approx_eq!(grid.radius(), 1.0);

        let bad = HexGridConfig {
            radius: -1.0,
            ..Default::default()
        };
        assert!(HexGrid::<u8>::from_config(&bad).is_err());
    }
}
