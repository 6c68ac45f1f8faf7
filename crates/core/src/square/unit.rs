//! Basic value types for square grids: coordinates and the 8 compass
//! directions.

use crate::direction::Direction;
use anyhow::anyhow;
use derive_more::{Add, AddAssign, Display, Mul, Neg, Sub, SubAssign};
use nalgebra::Vector3;
use serde::{Deserialize, Serialize};
use strum::EnumIter;

/// A cell coordinate in a square grid. This maps directly onto the backing
/// array: `(x, y)` is column `x`, row `y`. `y` grows "up", which is world +Z
/// for ground-plane grids and world +Y for screen-plane grids.
#[derive(
    Copy,
    Clone,
    Debug,
    Default,
    PartialEq,
    Eq,
    Hash,
    Display,
    Add,
    AddAssign,
    Sub,
    SubAssign,
    Neg,
    Mul,
    Serialize,
    Deserialize,
)]
#[display(fmt = "({}, {})", x, y)]
pub struct SquareCoord {
    pub x: i32,
    pub y: i32,
}

impl SquareCoord {
    pub const ORIGIN: Self = Self::new(0, 0);

    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// The coordinate one step away in the given direction
    pub fn neighbour(self, direction: SquareDir) -> Self {
        self + direction.to_coord()
    }

    /// Manhattan distance, i.e. the number of orthogonal steps needed to get
    /// from one coordinate to the other
    pub fn distance_to(self, other: Self) -> u32 {
        ((self.x - other.x).abs() + (self.y - other.y).abs()) as u32
    }

    /// Chebyshev distance, i.e. the number of steps needed when diagonal moves
    /// are allowed. This is the distance that [Self::ring] is based on.
    pub fn chebyshev_distance_to(self, other: Self) -> u32 {
        (self.x - other.x).abs().max((self.y - other.y).abs()) as u32
    }

    /// All coordinates at exactly `depth` Chebyshev steps from this one: the
    /// hollow square ring of side `2 * depth + 1` centered here. Always
    /// returns `8 * depth` coordinates (none for depth 0).
    ///
    /// The ring is generated per direction: starting `depth` steps out along
    /// each direction, we walk along the ring towards the next direction's
    /// starting point, stopping one short of it. So the output is grouped in
    /// canonical direction order, beginning with [SquareDir::Up].
    pub fn ring(self, depth: u32) -> Vec<Self> {
        let depth = depth as i32;
        let mut ring = Vec::with_capacity(8 * depth as usize);
        for &dir in SquareDir::CLOCKWISE {
            let start = self + dir.to_coord() * depth;
            // Moving from one direction's corner/edge to the next is always a
            // single orthogonal step per unit of depth
            let step = dir.next().to_coord() - dir.to_coord();
            ring.extend((0..depth).map(|i| start + step * i));
        }
        ring
    }
}

/// The 8 directions of a square grid, clockwise starting from up. Diagonals
/// are included, so each cell has 8 neighbours.
///
/// ```text
/// UL U UR
/// L  o  R
/// DL D DR
/// ```
#[derive(
    Copy,
    Clone,
    Debug,
    EnumIter,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum SquareDir {
    Up,
    UpRight,
    Right,
    DownRight,
    Down,
    DownLeft,
    Left,
    UpLeft,
}

impl Direction for SquareDir {
    const CLOCKWISE: &'static [Self] = &[
        Self::Up,
        Self::UpRight,
        Self::Right,
        Self::DownRight,
        Self::Down,
        Self::DownLeft,
        Self::Left,
        Self::UpLeft,
    ];

    fn index(self) -> usize {
        self as usize
    }
}

impl SquareDir {
    /// The 4 orthogonal directions
    pub const CARDINAL: [Self; 4] =
        [Self::Up, Self::Right, Self::Down, Self::Left];
    /// The 4 diagonal directions
    pub const DIAGONAL: [Self; 4] = [
        Self::UpRight,
        Self::DownRight,
        Self::DownLeft,
        Self::UpLeft,
    ];

    /// Unit offset for one step in this direction. Both components are in
    /// `{-1, 0, 1}`.
    pub const fn to_coord(self) -> SquareCoord {
        match self {
            Self::Up => SquareCoord::new(0, 1),
            Self::UpRight => SquareCoord::new(1, 1),
            Self::Right => SquareCoord::new(1, 0),
            Self::DownRight => SquareCoord::new(1, -1),
            Self::Down => SquareCoord::new(0, -1),
            Self::DownLeft => SquareCoord::new(-1, -1),
            Self::Left => SquareCoord::new(-1, 0),
            Self::UpLeft => SquareCoord::new(-1, 1),
        }
    }

    /// This direction as a world vector on the ground (XZ) plane
    pub fn to_vector3(self) -> Vector3<f64> {
        let offset = self.to_coord();
        Vector3::new(offset.x as f64, 0.0, offset.y as f64)
    }

    /// This direction as a world vector on the screen (XY) plane
    pub fn to_vector2d(self) -> Vector3<f64> {
        let offset = self.to_coord();
        Vector3::new(offset.x as f64, offset.y as f64, 0.0)
    }

    pub fn is_diagonal(self) -> bool {
        let offset = self.to_coord();
        offset.x != 0 && offset.y != 0
    }

    /// Reverse of [Self::to_coord]. Fails for any offset that isn't one of
    /// the 8 unit offsets (including zero).
    pub fn from_offset(offset: SquareCoord) -> anyhow::Result<Self> {
        Self::CLOCKWISE
            .iter()
            .copied()
            .find(|dir| dir.to_coord() == offset)
            .ok_or_else(|| anyhow!("{} is not a unit direction offset", offset))
    }
}

impl TryFrom<SquareCoord> for SquareDir {
    type Error = anyhow::Error;

    fn try_from(offset: SquareCoord) -> Result<Self, Self::Error> {
        Self::from_offset(offset)
    }
}

impl TryFrom<u8> for SquareDir {
    type Error = anyhow::Error;

    fn try_from(index: u8) -> Result<Self, Self::Error> {
        Self::from_index(index as usize)
    }
}
