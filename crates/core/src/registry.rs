//! Deduplicated solid registration.
//!
//! Solids recur heavily (every full-length MINOS module shares one box, every
//! DC strip shares another), so shapes are memoized under a semantic key.
//! The key renders the solid's GDML name; downstream tooling matches on those
//! names, quirks included, so the rendering is kept byte-compatible with the
//! historical output.

use std::collections::HashMap;

use crate::gdml::{Document, Position, Solid};
use crate::model::{Family, LatRimSide, LongRimSide, StackPosition};

/// Which face of a CERN module a strip belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StripFace {
    Top,
    Bottom,
}

/// Constituent of a boolean solid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BoolPart {
    External,
    Internal,
}

/// Part of the chained-subtraction beam solid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BeamPart {
    External,
    Internal,
    FirstSubtraction,
    Full,
}

/// Semantic key of a registered solid: hardware family, role, and cut length
/// where applicable. Dimensions never appear in the key; identical keys mean
/// identical dimensions by construction.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum SolidKey {
    /// Scintillator strip box. `cut` only occurs for the MINOS family,
    /// `face` only for the CERN family.
    Strip { family: Family, cut: Option<u32>, face: Option<StripFace> },
    /// Module enclosure box, outer skin or inner air gap.
    Module { family: Family, cut: Option<u32>, inner: bool },
    /// Side-wall stack enclosure; the south stack is a subtraction with
    /// separately registered constituents.
    SideTagger { pos: StackPosition, part: Option<BoolPart> },
    NorthTagger,
    SouthTagger,
    BottomTagger,
    TopTagger,
    LatRimTagger { side: LatRimSide },
    LongRimTagger { side: LongRimSide },
    Beam { part: BeamPart },
    BeamEnclosure,
    Shell { part: Option<BoolPart> },
    World,
}

impl SolidKey {
    /// GDML solid name for this key.
    ///
    /// The trailing and doubled underscores are load-bearing: channel-map
    /// consumers pattern-match the historical names.
    pub fn name(&self) -> String {
        match self {
            SolidKey::Strip { family, cut, face } => {
                let mut name = format!("AuxDetSensitive_{}", family.label());
                if let Some(cut) = cut {
                    name.push_str(&format!("_cut{cut}_"));
                }
                match face {
                    Some(StripFace::Top) => name.push_str("_top_"),
                    Some(StripFace::Bottom) => name.push_str("_bot_"),
                    None => {}
                }
                name
            }
            SolidKey::Module { family, cut, inner } => {
                let mut name = format!("AuxDet_{}_module_", family.label());
                if let Some(cut) = cut {
                    name.push_str(&format!("cut{cut}"));
                }
                if *inner {
                    name.push_str("_inner");
                }
                name
            }
            SolidKey::SideTagger { pos, part } => {
                let mut name = format!("tagger_SideLat_{}", pos.label());
                match part {
                    Some(BoolPart::External) => name.push_str("_external"),
                    Some(BoolPart::Internal) => name.push_str("_internal"),
                    None => {}
                }
                name
            }
            SolidKey::NorthTagger => "tagger_SideNorth".to_string(),
            SolidKey::SouthTagger => "tagger_SideSouth".to_string(),
            SolidKey::BottomTagger => "tagger_Bottom".to_string(),
            SolidKey::TopTagger => "tagger_Top".to_string(),
            SolidKey::LatRimTagger { side } => match side {
                LatRimSide::West => "tagger_RimWest".to_string(),
                LatRimSide::East => "tagger_RimEast".to_string(),
            },
            SolidKey::LongRimTagger { side } => match side {
                LongRimSide::South => "tagger_RimSouth".to_string(),
                LongRimSide::North => "tagger_RimNorth".to_string(),
            },
            SolidKey::Beam { part } => {
                let base = "TopCRTSupportBeam";
                match part {
                    BeamPart::External => format!("{base}_external"),
                    BeamPart::Internal => format!("{base}_internal"),
                    BeamPart::FirstSubtraction => format!("{base}_firstsubtraction"),
                    BeamPart::Full => base.to_string(),
                }
            }
            SolidKey::BeamEnclosure => "TopCRTSupportBeamEnclosure".to_string(),
            SolidKey::Shell { part } => {
                let mut name = "CRT_Shell".to_string();
                match part {
                    Some(BoolPart::External) => name.push_str("_external"),
                    Some(BoolPart::Internal) => name.push_str("_internal"),
                    None => {}
                }
                name
            }
            SolidKey::World => "World".to_string(),
        }
    }
}

/// Memoizing registry of defined solids.
///
/// A key is defined at most once; asking again returns the existing name and
/// never touches the document, so a name can never be redefined with
/// different dimensions.
#[derive(Debug, Default)]
pub struct SolidRegistry {
    defined: HashMap<SolidKey, String>,
}

impl SolidRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contains(&self, key: &SolidKey) -> bool {
        self.defined.contains_key(key)
    }

    /// Number of distinct solids registered.
    pub fn len(&self) -> usize {
        self.defined.len()
    }

    pub fn is_empty(&self) -> bool {
        self.defined.is_empty()
    }

    /// Define a box solid for `key`, or return the existing definition.
    pub fn get_or_box(&mut self, doc: &mut Document, key: SolidKey, x: f64, y: f64, z: f64) -> String {
        if let Some(name) = self.defined.get(&key) {
            return name.clone();
        }
        let name = key.name();
        doc.add_solid(Solid::Box { name: name.clone(), x, y, z });
        self.defined.insert(key, name.clone());
        name
    }

    /// Define a subtraction solid for `key`, or return the existing
    /// definition. Constituents must already be defined.
    pub fn get_or_subtraction(
        &mut self,
        doc: &mut Document,
        key: SolidKey,
        first: impl Into<String>,
        second: impl Into<String>,
        position: Position,
    ) -> String {
        if let Some(name) = self.defined.get(&key) {
            return name.clone();
        }
        let name = key.name();
        doc.add_solid(Solid::Subtraction {
            name: name.clone(),
            first: first.into(),
            second: second.into(),
            position,
        });
        self.defined.insert(key, name.clone());
        name
    }
}
