use crate::hex::HexCoord;
use fnv::FnvBuildHasher;
use std::collections::{HashMap, HashSet};

/// A set of hex coordinates
pub type HexCoordSet = HashSet<HexCoord, FnvBuildHasher>;
/// A map of hex coordinates to some `T`
pub type HexCoordMap<T> = HashMap<HexCoord, T, FnvBuildHasher>;
