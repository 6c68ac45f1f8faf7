//! This sub-module contains basic types for units that form the hex coordinate
//! system. See the parent module documentation for more info on the coordinate
//! system.

use crate::direction::Direction;
use anyhow::anyhow;
use derive_more::{Add, AddAssign, Display, Mul, Neg, Sub, SubAssign};
use log::trace;
use nalgebra::Vector3;
use serde::{Deserialize, Serialize};
use std::cmp;
use strum::EnumIter;

/// Ratio between a hexagon's inner radius (center to the midpoint of a side)
/// and its outer radius (center to a vertex)
pub const INNER_RADIUS_RATIO: f64 = 0.866025404; // sqrt(3)/2

/// Distance from the center of a hex to the midpoint of any side, given the
/// distance from the center to any vertex
pub fn inner_radius(outer_radius: f64) -> f64 {
    outer_radius * INNER_RADIUS_RATIO
}

/// World-space size of a single pointy-top hex cell with the given outer
/// radius. X is the flat-to-flat width, Z is the point-to-point height. Hexes
/// have no thickness, so Y is always zero.
pub fn hex_cell_size(outer_radius: f64) -> Vector3<f64> {
    Vector3::new(inner_radius(outer_radius), 0.0, outer_radius) * 2.0
}

/// A whole cell in a hex grid, in cube coordinates. See the module-level docs
/// for a description of the coordinate system.
///
/// Cube coordinates always satisfy `x + y + z = 0`, so this only needs to
/// store `x` and `z`; `y` is derived. Equality and hashing are on `(x, z)`,
/// and arithmetic is componentwise on `(x, z)` as well, which keeps the
/// invariant intact.
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
#[display(fmt = "({}, {}, {})", "self.x()", "self.y()", "self.z()")]
pub struct HexCoord {
    x: i32,
    z: i32,
}

impl HexCoord {
    pub const ORIGIN: Self = Self::new(0, 0);

    /// Construct a new hex coordinate with the given x and z. Since x+y+z=0
    /// for all coordinates, we can derive y from x & z.
    pub const fn new(x: i32, z: i32) -> Self {
        Self { x, z }
    }

    /// Construct a hex coordinate from all three cube components. Returns an
    /// error if the components don't fall on the plane x+y+z=0.
    pub fn new_xyz(x: i32, y: i32, z: i32) -> anyhow::Result<Self> {
        // Summed in i64 so extreme components can't overflow
        if x as i64 + y as i64 + z as i64 != 0 {
            Err(anyhow!(
                "invalid hex coordinate ({}, {}, {}); must be on the plane \
                 x+y+z=0",
                x,
                y,
                z
            ))
        } else {
            Ok(Self::new(x, z))
        }
    }

    /// Convert an offset coordinate (column and row in the backing array) to
    /// a cube coordinate. Every row is shifted half a cell relative to the
    /// previous one, so the column needs to be corrected by half the row.
    pub const fn from_offset(col: i32, row: i32) -> Self {
        Self::new(col - row / 2, row)
    }

    /// Inverse of [Self::from_offset]: get `(column, row)` in the backing array
    pub const fn to_offset(self) -> (i32, i32) {
        (self.x + self.z / 2, self.z)
    }

    pub const fn x(self) -> i32 {
        self.x
    }

    pub const fn y(self) -> i32 {
        -self.x - self.z
    }

    pub const fn z(self) -> i32 {
        self.z
    }

    /// The coordinate of the cell adjacent to this one in the given direction
    pub fn neighbour(self, direction: HexDir) -> Self {
        self + direction.to_coord()
    }

    /// All 6 adjacent coordinates, indexed by direction ordinal (see
    /// [HexDir::CLOCKWISE])
    pub fn neighbours(self) -> [Self; 6] {
        let mut neighbours = [self; 6];
        for (neighbour, dir) in neighbours.iter_mut().zip(HexDir::CLOCKWISE) {
            *neighbour = self.neighbour(*dir);
        }
        neighbours
    }

    /// Calculate the path distance between two cells, meaning the number of
    /// hops it takes to get from one to the other. 0 if the coordinates are
    /// equal, 1 if they're adjacent, 2 if there is 1 cell between them, etc.
    pub fn distance_to(self, other: Self) -> u32 {
        // https://www.redblobgames.com/grids/hexagons/#distances
        ((self.x() - other.x()).abs()
            + (self.y() - other.y()).abs()
            + (self.z() - other.z()).abs()) as u32
            // Each step between neighbours changes two components by one
            / 2
    }

    /// All coordinates within `radius` steps of this one, i.e. a hexagon of
    /// cells centered here. Always yields `3r² + 3r + 1` values.
    pub fn range(self, radius: u32) -> impl Iterator<Item = Self> {
        let r = radius as i32;
        (-r..=r).flat_map(move |dx| {
            // If we just do [-r,r] for z as well, then we end up with a
            // diamond pattern instead of a hexagon
            // https://www.redblobgames.com/grids/hexagons/#range
            let z_min = cmp::max(-r, -dx - r);
            let z_max = cmp::min(r, -dx + r);
            (z_min..=z_max).map(move |dz| self + Self::new(dx, dz))
        })
    }

    /// All coordinates exactly `radius` steps from this one. Returns `6 *
    /// radius` coordinates (none for radius 0), grouped in direction order:
    /// starting `radius` steps out in each direction, walk along the ring
    /// towards the next direction.
    pub fn ring(self, radius: u32) -> Vec<Self> {
        let r = radius as i32;
        let mut ring = Vec::with_capacity(6 * radius as usize);
        for &dir in HexDir::CLOCKWISE {
            let start = self + dir.to_coord() * r;
            // Two turns clockwise points from one corner of the ring to the
            // next
            let step = dir.rotate(2).to_coord();
            ring.extend((0..r).map(|i| start + step * i));
        }
        ring
    }
}

impl TryFrom<(i32, i32, i32)> for HexCoord {
    type Error = anyhow::Error;

    fn try_from((x, y, z): (i32, i32, i32)) -> Result<Self, Self::Error> {
        Self::new_xyz(x, y, z)
    }
}

/// A point in cube space with fractional components, e.g. an arbitrary world
/// position converted into the hex coordinate system. Components should
/// satisfy `x + y + z = 0`, up to float imprecision.
#[derive(Copy, Clone, Debug, PartialEq, Display, Serialize, Deserialize)]
#[display(fmt = "({}, {}, {})", x, y, z)]
pub struct FractionalHex {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl FractionalHex {
    pub fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    /// Build from the two axial components, deriving `y`
    pub fn from_axial(x: f64, z: f64) -> Self {
        Self::new(x, -x - z, z)
    }

    /// Snap to the nearest whole cell.
    ///
    /// Rounding each component independently can break the invariant: e.g.
    /// `(0.4, 0.3, -0.7)` rounds to `(0, 0, -1)`. When that happens, the
    /// component that moved the furthest during rounding is the least
    /// trustworthy, so we throw it away and re-derive it from the other two.
    /// The result is always a valid cube coordinate, and is the cell whose
    /// center is closest to this point.
    ///
    /// https://www.redblobgames.com/grids/hexagons/#rounding
    pub fn round(self) -> HexCoord {
        let mut rx = self.x.round();
        let ry = self.y.round();
        let mut rz = self.z.round();
        if rx + ry + rz == 0.0 {
            return HexCoord::new(rx as i32, rz as i32);
        }

        let dx = (rx - self.x).abs();
        let dy = (ry - self.y).abs();
        let dz = (rz - self.z).abs();
        trace!(
            "Repairing rounded hex {} (errors {}, {}, {})",
            self,
            dx,
            dy,
            dz
        );
        if dx > dy && dx > dz {
            rx = -ry - rz;
        } else if dz > dy {
            rz = -rx - ry;
        }
        // Otherwise y had the biggest error. It isn't stored, so there's
        // nothing to fix
        HexCoord::new(rx as i32, rz as i32)
    }
}

/// The 6 directions in which hexes line up side-to-side, clockwise starting
/// from north-east. Grids use pointy-top hexes, so there's no straight north
/// or south.
///
/// ```text
///   NW NE
/// W   o   E
///   SW SE
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
pub enum HexDir {
    /// North-east
    NE,
    /// East
    E,
    /// South-east
    SE,
    /// South-west
    SW,
    /// West
    W,
    /// North-west
    NW,
}

impl Direction for HexDir {
    const CLOCKWISE: &'static [Self] =
        &[Self::NE, Self::E, Self::SE, Self::SW, Self::W, Self::NW];

    fn index(self) -> usize {
        self as usize
    }
}

impl HexDir {
    /// Get the offset that would move a coordinate one cell in this direction
    pub const fn to_coord(self) -> HexCoord {
        match self {
            Self::NE => HexCoord::new(0, 1),
            Self::E => HexCoord::new(1, 0),
            Self::SE => HexCoord::new(1, -1),
            Self::SW => HexCoord::new(0, -1),
            Self::W => HexCoord::new(-1, 0),
            Self::NW => HexCoord::new(-1, 1),
        }
    }

    /// Reverse of [Self::to_coord]. Fails for anything that isn't a unit hex
    /// offset.
    pub fn from_offset(offset: HexCoord) -> anyhow::Result<Self> {
        Self::CLOCKWISE
            .iter()
            .copied()
            .find(|dir| dir.to_coord() == offset)
            .ok_or_else(|| anyhow!("{} is not a unit hex offset", offset))
    }
}

impl TryFrom<u8> for HexDir {
    type Error = anyhow::Error;

    fn try_from(index: u8) -> Result<Self, Self::Error> {
        Self::from_index(index as usize)
    }
}
