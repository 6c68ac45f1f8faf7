//! Grids anchored in world space. A [SpatialGrid] pairs a dense [Grid] with
//! a [Frame] (where the grid sits and how big each cell is) and a
//! [CoordinateSystem], which defines how coordinates map to cells and to
//! world positions.

use crate::grid::Grid;
use anyhow::anyhow;
use log::debug;
use nalgebra::{Point3, Vector3};
use serde::{Deserialize, Serialize};
use std::{
    fmt::{Debug, Display},
    hash::Hash,
    marker::PhantomData,
    ops,
};

/// Placement of a grid in world space. Both fields are fixed once the grid is
/// created; spatial grids can't be relocated or rescaled.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Frame {
    /// World position of the corner of cell `(0, 0)`. Cell centers are offset
    /// from here by half a cell.
    anchor: Point3<f64>,
    /// World-space extent of a single cell along each axis
    cell_size: Vector3<f64>,
}

impl Frame {
    pub fn new(anchor: Point3<f64>, cell_size: Vector3<f64>) -> Self {
        Self { anchor, cell_size }
    }

    pub fn anchor(&self) -> Point3<f64> {
        self.anchor
    }

    pub fn cell_size(&self) -> Vector3<f64> {
        self.cell_size
    }

    /// Half of the cell size. Derived on demand, not stored.
    pub fn half_cell_size(&self) -> Vector3<f64> {
        self.cell_size / 2.0
    }

    /// Get a position relative to the center of cell `(0, 0)`
    pub(crate) fn localize(&self, pos: Point3<f64>) -> Vector3<f64> {
        pos - self.anchor - self.half_cell_size()
    }
}

/// The geometry of a particular kind of grid. Each implementor is a stateless
/// marker type that knows how to convert between its coordinates, world
/// positions, and indices into the backing [Grid]. All spatial state lives in
/// the [Frame] that gets passed in.
pub trait CoordinateSystem: 'static + Copy + Debug + Default + PartialEq {
    /// The discrete coordinate type used to address cells
    type Coord: Copy + Debug + Display + Eq + Hash;

    /// Human-readable name, used for logging
    const NAME: &'static str;

    /// Get the world position of the center of the cell at `coord`
    fn to_world(frame: &Frame, coord: Self::Coord) -> Point3<f64>;

    /// Resolve a world position to the coordinate of the cell that contains
    /// it. The returned coordinate may be outside any particular grid.
    fn from_world(frame: &Frame, pos: Point3<f64>) -> Self::Coord;

    /// Convert a coordinate to its `(x, y)` position in the backing array.
    /// The result may be negative or otherwise out of bounds; the caller is
    /// responsible for checking.
    fn to_index(coord: Self::Coord) -> (i64, i64);

    /// Inverse of [Self::to_index]
    fn from_index(x: usize, y: usize) -> Self::Coord;

    /// All coordinates adjacent to `coord`, in the system's canonical
    /// direction order. Bounds are not considered.
    fn neighbours(coord: Self::Coord) -> Vec<Self::Coord>;
}

/// A dense grid of `T` that lives in world space, addressed by the
/// coordinates of the system `S`. See [crate::SquareGrid],
/// [crate::SquareGrid2D] and [crate::HexGrid] for the concrete flavors.
#[derive(Clone, Debug, PartialEq)]
pub struct SpatialGrid<T, S: CoordinateSystem> {
    grid: Grid<T>,
    frame: Frame,
    system: PhantomData<S>,
}

impl<T, S: CoordinateSystem> SpatialGrid<T, S> {
    /// Place an existing grid into world space
    pub fn from_parts(grid: Grid<T>, frame: Frame) -> Self {
        debug!(
            "Creating {}x{} {} grid anchored at {:?} with cell size {:?}",
            grid.width(),
            grid.height(),
            S::NAME,
            frame.anchor(),
            frame.cell_size(),
        );
        Self {
            grid,
            frame,
            system: PhantomData,
        }
    }

    pub fn frame(&self) -> &Frame {
        &self.frame
    }

    pub fn anchor(&self) -> Point3<f64> {
        self.frame.anchor()
    }

    pub fn cell_size(&self) -> Vector3<f64> {
        self.frame.cell_size()
    }

    pub fn half_cell_size(&self) -> Vector3<f64> {
        self.frame.half_cell_size()
    }

    /// The backing array, for position-based (rather than coordinate-based)
    /// access
    pub fn grid(&self) -> &Grid<T> {
        &self.grid
    }

    pub fn grid_mut(&mut self) -> &mut Grid<T> {
        &mut self.grid
    }

    pub fn into_grid(self) -> Grid<T> {
        self.grid
    }

    pub fn width(&self) -> usize {
        self.grid.width()
    }

    pub fn height(&self) -> usize {
        self.grid.height()
    }

    /// World-space center of the cell at `coord`
    pub fn get_pos(&self, coord: S::Coord) -> Point3<f64> {
        S::to_world(&self.frame, coord)
    }

    /// Coordinate of the cell containing (or nearest to) the given world
    /// position. The coordinate is **not** guaranteed to be in this grid.
    pub fn from_pos(&self, pos: Point3<f64>) -> S::Coord {
        S::from_world(&self.frame, pos)
    }

    /// Does this grid have a cell at `coord`?
    pub fn is_valid(&self, coord: S::Coord) -> bool {
        let (x, y) = S::to_index(coord);
        self.grid.is_valid(x, y)
    }

    /// Array position of `coord`, or `None` if it's outside the grid
    fn index_of(&self, coord: S::Coord) -> Option<(usize, usize)> {
        let (x, y) = S::to_index(coord);
        if self.grid.is_valid(x, y) {
            Some((x as usize, y as usize))
        } else {
            None
        }
    }

    pub fn cell(&self, coord: S::Coord) -> Option<&T> {
        let (x, y) = self.index_of(coord)?;
        self.grid.get(x, y)
    }

    pub fn cell_mut(&mut self, coord: S::Coord) -> Option<&mut T> {
        let (x, y) = self.index_of(coord)?;
        self.grid.get_mut(x, y)
    }

    /// Overwrite the cell at `coord`. Fails if the coordinate is outside the
    /// grid.
    pub fn set_cell(
        &mut self,
        coord: S::Coord,
        value: T,
    ) -> anyhow::Result<()> {
        let cell = self.cell_mut(coord).ok_or_else(|| {
            anyhow!("{} {} is outside the grid", S::NAME, coord)
        })?;
        *cell = value;
        Ok(())
    }

    /// Coordinates adjacent to `coord`, in canonical direction order. These
    /// may fall outside the grid, see [Self::valid_neighbours].
    pub fn neighbours(&self, coord: S::Coord) -> Vec<S::Coord> {
        S::neighbours(coord)
    }

    /// Coordinates adjacent to `coord` that are inside this grid
    pub fn valid_neighbours(
        &self,
        coord: S::Coord,
    ) -> impl Iterator<Item = S::Coord> + '_ {
        S::neighbours(coord)
            .into_iter()
            .filter(move |neighbour| self.is_valid(*neighbour))
    }

    /// Every coordinate in this grid, in the same row-major order as
    /// [Grid::iterate]
    pub fn coords(&self) -> impl Iterator<Item = S::Coord> {
        self.grid.positions().map(|(x, y)| S::from_index(x, y))
    }
}

impl<T: Clone + Default, S: CoordinateSystem> SpatialGrid<T, S> {
    /// Get a copy of the cell at `coord`. Queries near the edges are expected,
    /// so an out-of-bounds coordinate yields `T::default()` instead of an
    /// error.
    pub fn get_cell(&self, coord: S::Coord) -> T {
        self.cell(coord).cloned().unwrap_or_default()
    }

    /// Get a copy of the cell at a world position. Equivalent to
    /// `get_cell(from_pos(pos))`.
    pub fn get_cell_at(&self, pos: Point3<f64>) -> T {
        self.get_cell(self.from_pos(pos))
    }
}

/// Unchecked access by coordinate. Panics if the coordinate is outside the
/// grid; use [SpatialGrid::is_valid] or [SpatialGrid::cell] to check first.
impl<T, S: CoordinateSystem> ops::Index<S::Coord> for SpatialGrid<T, S> {
    type Output = T;

    fn index(&self, coord: S::Coord) -> &T {
        match self.cell(coord) {
            Some(cell) => cell,
            None => panic!(
                "{} {} is outside {}x{} grid",
                S::NAME,
                coord,
                self.width(),
                self.height()
            ),
        }
    }
}

impl<T, S: CoordinateSystem> ops::IndexMut<S::Coord> for SpatialGrid<T, S> {
    fn index_mut(&mut self, coord: S::Coord) -> &mut T {
        let (width, height) = (self.width(), self.height());
        match self.cell_mut(coord) {
            Some(cell) => cell,
            None => panic!(
                "{} {} is outside {}x{} grid",
                S::NAME,
                coord,
                width,
                height
            ),
        }
    }
}
