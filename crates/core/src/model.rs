//! Value types shared across the build pass: hardware families, placement
//! regions, and the module-to-FEB channel map.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Donor-experiment hardware family of a module.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Family {
    /// Long single-layer modules (20 strips).
    Minos,
    /// Square double-layer modules with asymmetric strip thickness (8 + 8).
    Cern,
    /// Double-layer modules with half-pitch offset strips (32 + 32).
    Dc,
}

impl Family {
    /// Label used in solid and volume names.
    pub fn label(self) -> &'static str {
        match self {
            Family::Minos => "MINOS",
            Family::Cern => "CERN",
            Family::Dc => "DC",
        }
    }
}

impl fmt::Display for Family {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Physical region of the enclosure a module is placed in.
///
/// Used only for volume naming; the placement arithmetic lives in the tagger
/// builders.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Region {
    Top,
    RimNorth,
    RimSouth,
    RimWest,
    RimEast,
    South,
    North,
    WestSouth,
    WestCenter,
    WestNorth,
    EastSouth,
    EastCenter,
    EastNorth,
    Bottom,
}

impl Region {
    /// Volume-name suffix. Total over the enumeration.
    pub fn suffix(self) -> &'static str {
        match self {
            Region::Top => "Top",
            Region::RimNorth => "RimNorth",
            Region::RimSouth => "RimSouth",
            Region::RimWest => "RimWest",
            Region::RimEast => "RimEast",
            Region::South => "South",
            Region::North => "North",
            Region::WestSouth => "WestSouth",
            Region::WestCenter => "WestCenter",
            Region::WestNorth => "WestNorth",
            Region::EastSouth => "EastSouth",
            Region::EastCenter => "EastCenter",
            Region::EastNorth => "EastNorth",
            Region::Bottom => "Bottom",
        }
    }
}

/// East or west side wall.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WallSide {
    East,
    West,
}

impl fmt::Display for WallSide {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            WallSide::East => "east",
            WallSide::West => "west",
        })
    }
}

/// One of the three stacks along a side wall.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StackPosition {
    South,
    Center,
    North,
}

impl StackPosition {
    pub fn label(self) -> &'static str {
        match self {
            StackPosition::South => "South",
            StackPosition::Center => "Center",
            StackPosition::North => "North",
        }
    }
}

impl fmt::Display for StackPosition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Lateral (east/west) rim selector.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LatRimSide {
    West,
    East,
}

/// Longitudinal (south/north) rim selector.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LongRimSide {
    South,
    North,
}

/// One front-end-board channel assignment: board id plus the module's
/// sub-position on that board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FebChannel {
    pub feb: u32,
    pub pos: u32,
}

impl FebChannel {
    pub fn new(feb: u32, pos: u32) -> Self {
        Self { feb, pos }
    }
}

/// FEB assignment of one module: read out on one board, or split across two.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FebAssignment {
    Single(FebChannel),
    Dual(FebChannel, FebChannel),
}

/// Map from module id to FEB assignment, in module creation order.
///
/// Populated incrementally as the taggers are built; every placed module ends
/// up with exactly one entry.
#[derive(Debug, Clone, Default)]
pub struct FebMap {
    entries: Vec<(u32, FebAssignment)>,
}

impl FebMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record the assignment for a module. Each module id is assigned once
    /// during the single build pass.
    pub fn insert(&mut self, mod_id: u32, assignment: FebAssignment) {
        debug_assert!(
            self.get(mod_id).is_none(),
            "module {mod_id} assigned to a FEB twice"
        );
        self.entries.push((mod_id, assignment));
    }

    pub fn get(&self, mod_id: u32) -> Option<&FebAssignment> {
        self.entries.iter().find(|(id, _)| *id == mod_id).map(|(_, a)| a)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &(u32, FebAssignment)> {
        self.entries.iter()
    }
}
