//! Geometry document model and XML writer.
//!
//! The document is a flat list of named solids plus a list of logical
//! volumes with nested physical-volume placements, serialized as GDML. Each
//! physical volume gets its own unique logical volume (required by the
//! downstream simulation to track energy depositions per module), while
//! solids are shared freely by name.

use std::fmt::Write as _;

use thiserror::Error;

/// Named translation, centimeters.
#[derive(Debug, Clone, PartialEq)]
pub struct Position {
    pub name: String,
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Position {
    pub fn new(name: impl Into<String>, x: f64, y: f64, z: f64) -> Self {
        Self { name: name.into(), x, y, z }
    }
}

/// Named rotation, degrees about each axis.
#[derive(Debug, Clone, PartialEq)]
pub struct Rotation {
    pub name: String,
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Rotation {
    pub fn new(name: impl Into<String>, x: f64, y: f64, z: f64) -> Self {
        Self { name: name.into(), x, y, z }
    }
}

/// An immutable named shape. Identity is the name.
#[derive(Debug, Clone, PartialEq)]
pub enum Solid {
    Box {
        name: String,
        x: f64,
        y: f64,
        z: f64,
    },
    /// Boolean subtraction of two previously defined solids, with the second
    /// one offset relative to the first.
    Subtraction {
        name: String,
        first: String,
        second: String,
        position: Position,
    },
}

impl Solid {
    pub fn name(&self) -> &str {
        match self {
            Solid::Box { name, .. } => name,
            Solid::Subtraction { name, .. } => name,
        }
    }
}

/// Material reference carried by a logical volume.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Material {
    Air,
    Polystyrene,
    Aluminum,
    Steel,
}

impl Material {
    pub fn gdml_ref(self) -> &'static str {
        match self {
            Material::Air => "Air",
            Material::Polystyrene => "Polystyrene",
            Material::Aluminum => "ALUMINUM_Al",
            Material::Steel => "STEEL_A992",
        }
    }
}

/// Placement of a child logical volume inside its parent.
#[derive(Debug, Clone, PartialEq)]
pub struct PhysVol {
    pub volume: String,
    pub position: Option<Position>,
    pub rotation: Option<Rotation>,
}

impl PhysVol {
    pub fn new(volume: impl Into<String>) -> Self {
        Self { volume: volume.into(), position: None, rotation: None }
    }

    pub fn at(mut self, position: Position) -> Self {
        self.position = Some(position);
        self
    }

    pub fn rotated(mut self, rotation: Rotation) -> Self {
        self.rotation = Some(rotation);
        self
    }
}

/// A named logical volume: one solid, one material, child placements.
#[derive(Debug, Clone, PartialEq)]
pub struct Volume {
    pub name: String,
    pub material: Material,
    pub solid: String,
    pub children: Vec<PhysVol>,
}

impl Volume {
    pub fn new(name: impl Into<String>, material: Material, solid: impl Into<String>) -> Self {
        Self { name: name.into(), material, solid: solid.into(), children: Vec::new() }
    }

    pub fn place(&mut self, child: PhysVol) {
        self.children.push(child);
    }
}

/// Element entry for the standalone materials table.
#[derive(Debug, Clone)]
pub struct Element {
    pub name: &'static str,
    pub formula: &'static str,
    pub z: u32,
    /// Atomic mass, kept as text to preserve the table's formatting.
    pub atom: &'static str,
}

/// Mass fraction of an element within a material.
#[derive(Debug, Clone)]
pub struct Fraction {
    pub n: &'static str,
    pub element: &'static str,
}

/// Material entry for the standalone materials table.
#[derive(Debug, Clone)]
pub struct MaterialDef {
    pub name: &'static str,
    pub formula: Option<&'static str>,
    /// Density in g/cm3, as text.
    pub density: &'static str,
    pub fractions: Vec<Fraction>,
}

/// Element and material definitions emitted in test mode, so the output
/// loads standalone instead of being pasted into the master geometry.
#[derive(Debug, Clone)]
pub struct MaterialsTable {
    pub elements: Vec<Element>,
    pub materials: Vec<MaterialDef>,
}

impl MaterialsTable {
    pub fn standard() -> Self {
        fn el(name: &'static str, formula: &'static str, z: u32, atom: &'static str) -> Element {
            Element { name, formula, z, atom }
        }
        fn fr(n: &'static str, element: &'static str) -> Fraction {
            Fraction { n, element }
        }

        Self {
            elements: vec![
                el("aluminum", "Al", 13, "26.9815"),
                el("nitrogen", "N", 7, "14.0067"),
                el("oxygen", "O", 8, "15.999"),
                el("argon", "Ar", 18, "39.9480"),
                el("hydrogen", "H", 1, "1.0079"),
                el("carbon", "C", 6, "12.0107"),
                el("iron", "Fe", 26, "55.8450"),
                el("niobium", "Nb", 41, "92.90637"),
                el("copper", "Cu", 29, "63.5463"),
                el("manganese", "Mn", 25, "54.938043"),
                el("molybdenum", "Mo", 42, "95.951"),
                el("nickel", "Ni", 28, "58.6934"),
                el("phosphorus", "P", 15, "30.973"),
                el("silicon", "Si", 14, "28.0855"),
                el("sulfur", "S", 16, "32.065"),
                el("vanadium", "V", 23, "50.94151"),
            ],
            materials: vec![
                MaterialDef {
                    name: "ALUMINUM_Al",
                    formula: Some("ALUMINUM_Al"),
                    density: "2.6990",
                    fractions: vec![fr("1.000", "aluminum")],
                },
                MaterialDef {
                    name: "Air",
                    formula: None,
                    density: "0.001205",
                    fractions: vec![
                        fr("0.781154", "nitrogen"),
                        fr("0.209476", "oxygen"),
                        fr("0.00934", "argon"),
                    ],
                },
                MaterialDef {
                    name: "Polystyrene",
                    formula: None,
                    density: "1.19",
                    fractions: vec![fr("0.077418", "hydrogen"), fr("0.922582", "carbon")],
                },
                MaterialDef {
                    name: "STEEL_A992",
                    formula: None,
                    density: "7.85",
                    fractions: vec![
                        fr("0.0022", "carbon"),
                        fr("0.0004", "niobium"),
                        fr("0.005", "copper"),
                        fr("0.01", "manganese"),
                        fr("0.0014", "molybdenum"),
                        fr("0.0044", "nickel"),
                        fr("0.00034", "phosphorus"),
                        fr("0.0039", "silicon"),
                        fr("0.00044", "sulfur"),
                        fr("0.001", "vanadium"),
                        fr("0.97092", "iron"),
                    ],
                },
            ],
        }
    }
}

/// `<setup>` block naming the world volume, emitted in test mode.
#[derive(Debug, Clone)]
pub struct Setup {
    pub name: String,
    pub version: String,
    pub world: String,
}

/// Errors found when checking document consistency.
#[derive(Debug, Error)]
pub enum DocumentError {
    #[error("solid {0:?} defined more than once")]
    DuplicateSolid(String),
    #[error("volume {0:?} defined more than once")]
    DuplicateVolume(String),
    #[error("volume {volume:?} references unknown solid {solid:?}")]
    UnknownSolid { volume: String, solid: String },
    #[error("subtraction {solid:?} references unknown constituent {constituent:?}")]
    UnknownConstituent { solid: String, constituent: String },
    #[error("volume {parent:?} places {child:?}, which is not defined before it")]
    UnplacedChild { parent: String, child: String },
    #[error("setup references unknown world volume {0:?}")]
    UnknownWorld(String),
}

/// The whole geometry document, built once and serialized once.
#[derive(Debug, Clone, Default)]
pub struct Document {
    pub materials: Option<MaterialsTable>,
    pub solids: Vec<Solid>,
    pub volumes: Vec<Volume>,
    pub setup: Option<Setup>,
}

impl Document {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_solid(&mut self, solid: Solid) -> String {
        let name = solid.name().to_string();
        self.solids.push(solid);
        name
    }

    pub fn add_volume(&mut self, volume: Volume) -> String {
        let name = volume.name.clone();
        self.volumes.push(volume);
        name
    }

    pub fn volume(&self, name: &str) -> Option<&Volume> {
        self.volumes.iter().find(|v| v.name == name)
    }

    pub fn solid(&self, name: &str) -> Option<&Solid> {
        self.solids.iter().find(|s| s.name() == name)
    }

    /// Check referential integrity: unique names, resolvable solid and
    /// constituent references, and children defined before the volume that
    /// places them (the order the downstream toolkit requires).
    pub fn validate(&self) -> Result<(), DocumentError> {
        let mut solids = std::collections::HashSet::new();
        for s in &self.solids {
            if !solids.insert(s.name()) {
                return Err(DocumentError::DuplicateSolid(s.name().to_string()));
            }
            if let Solid::Subtraction { name, first, second, .. } = s {
                for part in [first, second] {
                    if !solids.contains(part.as_str()) {
                        return Err(DocumentError::UnknownConstituent {
                            solid: name.clone(),
                            constituent: part.clone(),
                        });
                    }
                }
            }
        }

        let mut volumes = std::collections::HashSet::new();
        for v in &self.volumes {
            if !volumes.insert(v.name.as_str()) {
                return Err(DocumentError::DuplicateVolume(v.name.clone()));
            }
            if !solids.contains(v.solid.as_str()) {
                return Err(DocumentError::UnknownSolid {
                    volume: v.name.clone(),
                    solid: v.solid.clone(),
                });
            }
            for child in &v.children {
                if !volumes.contains(child.volume.as_str()) {
                    return Err(DocumentError::UnplacedChild {
                        parent: v.name.clone(),
                        child: child.volume.clone(),
                    });
                }
            }
        }

        if let Some(setup) = &self.setup {
            if !volumes.contains(setup.world.as_str()) {
                return Err(DocumentError::UnknownWorld(setup.world.clone()));
            }
        }

        Ok(())
    }

    /// Serialize to pretty-printed XML, tab indentation, declaration first.
    pub fn to_xml(&self) -> String {
        let mut out = String::new();
        out.push_str("<?xml version=\"1.0\" ?>\n");
        out.push_str("<gdml>\n");

        if let Some(table) = &self.materials {
            write_materials(&mut out, table);
        }

        out.push_str("\t<solids>\n");
        for solid in &self.solids {
            write_solid(&mut out, solid);
        }
        out.push_str("\t</solids>\n");

        out.push_str("\t<structure>\n");
        for volume in &self.volumes {
            write_volume(&mut out, volume);
        }
        out.push_str("\t</structure>\n");

        if let Some(setup) = &self.setup {
            let _ = writeln!(
                out,
                "\t<setup name=\"{}\" version=\"{}\">\n\t\t<world ref=\"{}\"/>\n\t</setup>",
                setup.name, setup.version, setup.world
            );
        }

        out.push_str("</gdml>\n");
        out
    }
}

/// Shortest decimal rendering of a dimension attribute.
fn num(v: f64) -> String {
    format!("{v}")
}

fn write_materials(out: &mut String, table: &MaterialsTable) {
    out.push_str("\t<materials>\n");
    for e in &table.elements {
        let _ = writeln!(
            out,
            "\t\t<element name=\"{}\" formula=\"{}\" Z=\"{}\">\n\t\t\t<atom value=\"{}\"/>\n\t\t</element>",
            e.name, e.formula, e.z, e.atom
        );
    }
    for m in &table.materials {
        match m.formula {
            Some(formula) => {
                let _ = writeln!(out, "\t\t<material name=\"{}\" formula=\"{}\">", m.name, formula);
            }
            None => {
                let _ = writeln!(out, "\t\t<material name=\"{}\">", m.name);
            }
        }
        let _ = writeln!(out, "\t\t\t<D value=\"{}\" unit=\"g/cm3\"/>", m.density);
        for f in &m.fractions {
            let _ = writeln!(out, "\t\t\t<fraction n=\"{}\" ref=\"{}\"/>", f.n, f.element);
        }
        out.push_str("\t\t</material>\n");
    }
    out.push_str("\t</materials>\n");
}

fn write_solid(out: &mut String, solid: &Solid) {
    match solid {
        Solid::Box { name, x, y, z } => {
            let _ = writeln!(
                out,
                "\t\t<box name=\"{}\" lunit=\"cm\" x=\"{}\" y=\"{}\" z=\"{}\"/>",
                name,
                num(*x),
                num(*y),
                num(*z)
            );
        }
        Solid::Subtraction { name, first, second, position } => {
            let _ = writeln!(out, "\t\t<subtraction name=\"{name}\">");
            let _ = writeln!(out, "\t\t\t<first ref=\"{first}\"/>");
            let _ = writeln!(out, "\t\t\t<second ref=\"{second}\"/>");
            let _ = writeln!(
                out,
                "\t\t\t<position name=\"{}\" unit=\"cm\" x=\"{}\" y=\"{}\" z=\"{}\"/>",
                position.name,
                num(position.x),
                num(position.y),
                num(position.z)
            );
            out.push_str("\t\t</subtraction>\n");
        }
    }
}

fn write_volume(out: &mut String, volume: &Volume) {
    let _ = writeln!(out, "\t\t<volume name=\"{}\">", volume.name);
    let _ = writeln!(out, "\t\t\t<materialref ref=\"{}\"/>", volume.material.gdml_ref());
    let _ = writeln!(out, "\t\t\t<solidref ref=\"{}\"/>", volume.solid);
    for child in &volume.children {
        out.push_str("\t\t\t<physvol>\n");
        let _ = writeln!(out, "\t\t\t\t<volumeref ref=\"{}\"/>", child.volume);
        if let Some(p) = &child.position {
            let _ = writeln!(
                out,
                "\t\t\t\t<position name=\"{}\" unit=\"cm\" x=\"{}\" y=\"{}\" z=\"{}\"/>",
                p.name,
                num(p.x),
                num(p.y),
                num(p.z)
            );
        }
        if let Some(r) = &child.rotation {
            let _ = writeln!(
                out,
                "\t\t\t\t<rotation name=\"{}\" unit=\"deg\" x=\"{}\" y=\"{}\" z=\"{}\"/>",
                r.name,
                num(r.x),
                num(r.y),
                num(r.z)
            );
        }
        out.push_str("\t\t\t</physvol>\n");
    }
    out.push_str("\t\t</volume>\n");
}
