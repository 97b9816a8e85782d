//! The geometry build pass.
//!
//! Builders are called hierarchically: building a module builds its strips,
//! building a tagger builds its modules, and [`build`] assembles the whole
//! enclosure in one deterministic top-to-bottom pass. All bookkeeping
//! (module ids, FEB channels, per-family counts, the solid registry) lives
//! in an explicit [`BuildContext`] threaded through every call.

pub mod enclosure;
pub mod taggers;

use std::fmt;

use serde::Serialize;

use crate::gdml::{Document, MaterialsTable, PhysVol, Position, Rotation, Setup, Volume};
use crate::gdml::Material;
use crate::model::{Family, FebMap, Region};
use crate::params::GeometryParams;
use crate::registry::{SolidKey, SolidRegistry, StripFace};

/// Toggles for standalone output and console diagnostics.
#[derive(Debug, Clone, Copy, Default)]
pub struct BuildOptions {
    /// Emit a self-contained document: materials table, world volume, setup.
    pub test_mode: bool,
    /// Print per-tagger module and FEB id ranges while building.
    pub print_mod_ids: bool,
}

/// A built module: its sequential id (the FEB-map join key) and the name of
/// its outer logical volume.
#[derive(Debug, Clone)]
pub struct ModuleHandle {
    pub id: u32,
    pub volume: String,
}

/// State threaded through the build pass.
///
/// Everything here is append-only: ids and counters advance, the document
/// and FEB map grow, nothing is ever removed or rewritten.
#[derive(Debug)]
pub struct BuildContext {
    pub params: GeometryParams,
    pub opts: BuildOptions,
    pub doc: Document,
    pub solids: SolidRegistry,
    pub feb_map: FebMap,
    pub feb_id: u32,
    next_mod_id: u32,
    beam_id: u32,
    n_minos: u32,
    n_cern: u32,
    n_dc: u32,
}

impl BuildContext {
    pub fn new(params: GeometryParams, opts: BuildOptions) -> Self {
        Self {
            params,
            opts,
            doc: Document::new(),
            solids: SolidRegistry::new(),
            feb_map: FebMap::new(),
            feb_id: 0,
            next_mod_id: 0,
            beam_id: 0,
            n_minos: 0,
            n_cern: 0,
            n_dc: 0,
        }
    }

    /// Total modules built so far; also the id the next module will get.
    pub fn modules_built(&self) -> u32 {
        self.next_mod_id
    }

    pub fn family_count(&self, family: Family) -> u32 {
        match family {
            Family::Minos => self.n_minos,
            Family::Cern => self.n_cern,
            Family::Dc => self.n_dc,
        }
    }

    fn next_mod_id(&mut self, family: Family) -> u32 {
        let id = self.next_mod_id;
        self.next_mod_id += 1;
        match family {
            Family::Minos => self.n_minos += 1,
            Family::Cern => self.n_cern += 1,
            Family::Dc => self.n_dc += 1,
        }
        id
    }

    pub(crate) fn next_beam_id(&mut self) -> u32 {
        self.beam_id += 1;
        self.beam_id
    }

    /// Build one scintillator strip: a shared box solid plus a unique
    /// logical volume whose name encodes family, module number, truncation,
    /// and strip index for downstream traceability.
    fn strip(&mut self, family: Family, modnum: u32, stripnum: usize, cut: Option<f64>) -> String {
        let p = &self.params;
        let face = match family {
            Family::Cern => Some(if stripnum < p.n_strips_cern {
                StripFace::Top
            } else {
                StripFace::Bottom
            }),
            _ => None,
        };
        let (x, y, z) = match family {
            Family::Minos => (
                p.minos_strip_thick,
                p.minos_strip_width,
                cut.unwrap_or(p.minos_strip_length),
            ),
            Family::Cern => (
                p.cern_strip_width,
                match face {
                    Some(StripFace::Top) => p.cern_strip_thick_top,
                    _ => p.cern_strip_thick_bot,
                },
                p.cern_strip_length,
            ),
            Family::Dc => (p.dc_strip_width, p.dc_strip_thick, p.dc_strip_length),
        };
        let cut_tag = cut.map(|l| l.trunc() as u32);

        let mut vname = format!("volAuxDetSensitive_{}_module_{:03}_", family.label(), modnum);
        if let Some(c) = cut_tag {
            vname.push_str(&format!("cut{c}_"));
        }
        match face {
            Some(StripFace::Top) => vname.push_str("top_"),
            Some(StripFace::Bottom) => vname.push_str("bot_"),
            None => {}
        }
        vname.push_str(&format!("strip_{stripnum:02}"));

        let sname = self.solids.get_or_box(
            &mut self.doc,
            SolidKey::Strip { family, cut: cut_tag, face },
            x,
            y,
            z,
        );

        self.doc.add_volume(Volume::new(vname.clone(), Material::Polystyrene, sname));
        vname
    }

    /// Build one module: an aluminum enclosure wrapping an air volume that
    /// holds the strip layer(s) at the family's pitch.
    ///
    /// `region` only affects the volume name. `cut` truncates the strips and
    /// is honored for the MINOS family only; an over-length request is
    /// warned about and used as given.
    pub fn module(&mut self, family: Family, region: Region, cut: Option<f64>) -> ModuleHandle {
        let p = self.params.clone();
        let cut = if family == Family::Minos { cut } else { None };
        if let Some(length) = cut {
            if length > p.minos_strip_length {
                eprintln!(
                    "warning: requested MINOS cut length {length} cm exceeds the nominal {} cm; using it anyway",
                    p.minos_strip_length
                );
            }
        }
        let cut_tag = cut.map(|l| l.trunc() as u32);

        // Outer and wall-thickness-reduced inner envelope per family.
        let (ny, xx, yy, zz, xxsub, yysub, zzsub) = match family {
            Family::Minos => {
                let (zz, zzsub) = match cut {
                    None => (p.minos_mod_length(), p.minos_mod_length() - 2.0 * p.pad_minos),
                    Some(length) => (
                        p.minos_mod_length() - p.minos_strip_length + length,
                        p.minos_mod_length() - 2.0 * p.pad_minos - p.minos_strip_length + length,
                    ),
                };
                (
                    p.n_strips_minos,
                    p.minos_mod_height(),
                    p.minos_mod_width(),
                    zz,
                    p.minos_mod_height() - 2.0 * p.pad_minos,
                    p.minos_mod_width() - 2.0 * p.pad_minos,
                    zzsub,
                )
            }
            Family::Cern => (
                p.n_strips_cern,
                p.cern_mod_width(),
                p.cern_mod_height(),
                p.cern_mod_width(),
                p.cern_mod_width() - 2.0 * p.pad_cern,
                p.cern_mod_height() - 2.0 * p.pad_cern,
                p.cern_mod_width() - 2.0 * p.pad_cern,
            ),
            Family::Dc => (
                p.n_strips_dc,
                p.dc_mod_width(),
                p.dc_mod_height(),
                p.dc_strip_length + 2.0 * p.pad_dc + 2.0 * p.pad_strip,
                p.dc_strip_width * (p.n_strips_dc as f64 + 0.5)
                    + (p.n_strips_dc + 2) as f64 * p.pad_strip,
                // Historical quirk: the DC inner height subtracts the MINOS
                // pad, not the DC pad.
                p.dc_mod_height() - 2.0 * p.pad_minos,
                p.dc_strip_length + 2.0 * p.pad_strip,
            ),
        };

        let modnum = self.next_mod_id(family);

        let mut vname = format!("volAuxDet_{}_module_{:03}_", family.label(), modnum);
        if let Some(c) = cut_tag {
            vname.push_str(&format!("cut{c}_"));
        }
        vname.push_str(region.suffix());

        let sname = self.solids.get_or_box(
            &mut self.doc,
            SolidKey::Module { family, cut: cut_tag, inner: false },
            xx,
            yy,
            zz,
        );
        let snamein = self.solids.get_or_box(
            &mut self.doc,
            SolidKey::Module { family, cut: cut_tag, inner: true },
            xxsub,
            yysub,
            zzsub,
        );

        // First layer (the only one for MINOS), then the second for CERN/DC.
        let mut strips = Vec::with_capacity(ny);
        for stripnum in 0..ny {
            strips.push(self.strip(family, modnum, stripnum, cut));
        }
        let mut strips2 = Vec::new();
        if matches!(family, Family::Cern | Family::Dc) {
            for stripnum in ny..2 * ny {
                strips2.push(self.strip(family, modnum, stripnum, None));
            }
        }

        let vnamein = format!("{vname}_inner");
        let mut inner = Volume::new(vnamein.clone(), Material::Air, snamein);

        for (i, strip_vol) in strips.iter().enumerate() {
            let (dx, dy) = match family {
                Family::Minos => (
                    0.0,
                    (2.0 * i as f64 - ny as f64 + 1.0)
                        * 0.5
                        * (p.minos_strip_width + p.pad_strip),
                ),
                Family::Cern => (
                    (2.0 * i as f64 - ny as f64 + 1.0)
                        * 0.5
                        * (p.cern_strip_width + p.pad_strip),
                    0.5 * (p.cern_strip_thick_bot + p.pad_strip),
                ),
                Family::Dc => (
                    (i as f64 - 0.5 * ny as f64 + 0.25) * (p.dc_strip_width + p.pad_strip),
                    0.5 * (p.dc_strip_thick + p.pad_strip),
                ),
            };
            inner.place(
                PhysVol::new(strip_vol.clone())
                    .at(Position::new(format!("pos{strip_vol}"), dx, dy, 0.0)),
            );
        }

        match family {
            // Second CERN layer runs perpendicular: strips rotated 90 deg
            // about y and pitched along z.
            Family::Cern => {
                for (i, strip_vol) in strips2.iter().enumerate() {
                    let dy = -0.5 * (p.cern_strip_thick_top + p.pad_strip);
                    let dz = (2.0 * i as f64 - ny as f64 + 1.0)
                        * 0.5
                        * (p.cern_strip_width + p.pad_strip);
                    inner.place(
                        PhysVol::new(strip_vol.clone())
                            .at(Position::new(format!("pos{strip_vol}"), 0.0, dy, dz))
                            .rotated(Rotation::new(format!("rot{strip_vol}"), 0.0, 90.0, 0.0)),
                    );
                }
            }
            // Second DC layer is offset by half a strip pitch.
            Family::Dc => {
                for (i, strip_vol) in strips2.iter().enumerate() {
                    let dy = -0.5 * (p.dc_strip_thick + p.pad_strip);
                    let dx = (i as f64 - 0.5 * ny as f64 + 0.75) * (p.dc_strip_width + p.pad_strip);
                    inner.place(
                        PhysVol::new(strip_vol.clone())
                            .at(Position::new(format!("pos{strip_vol}"), dx, dy, 0.0)),
                    );
                }
            }
            Family::Minos => {}
        }

        self.doc.add_volume(inner);

        let mut outer = Volume::new(vname.clone(), Material::Aluminum, sname);
        outer.place(PhysVol::new(vnamein));
        self.doc.add_volume(outer);

        ModuleHandle { id: modnum, volume: vname }
    }
}

/// Per-family module counts and document totals from one build pass.
#[derive(Debug, Clone, Serialize)]
pub struct Summary {
    pub minos_modules: u32,
    pub cern_modules: u32,
    pub dc_modules: u32,
    pub total_modules: u32,
    pub feb_entries: usize,
    pub solids: usize,
    pub volumes: usize,
}

impl fmt::Display for Summary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "MINOS modules generated: {}", self.minos_modules)?;
        writeln!(f, "CERN  modules generated: {}", self.cern_modules)?;
        write!(f, "DblCh modules generated: {}", self.dc_modules)
    }
}

/// Result of the single build pass.
#[derive(Debug)]
pub struct Build {
    pub doc: Document,
    pub feb_map: FebMap,
    pub summary: Summary,
}

/// Run the whole geometry-construction pass: all eight taggers, the support
/// beams, and the enclosure shell. In test mode the document additionally
/// carries the materials table and a world volume so it loads standalone.
pub fn build(params: GeometryParams, opts: BuildOptions) -> Build {
    let mut ctx = BuildContext::new(params, opts);

    if opts.test_mode {
        ctx.doc.materials = Some(MaterialsTable::standard());
    }

    let shell = enclosure::detector_enclosure(&mut ctx);

    if opts.test_mode {
        let world_solid =
            ctx.solids.get_or_box(&mut ctx.doc, SolidKey::World, 1500.0, 1500.0, 3000.0);
        let mut world = Volume::new("volWorld", Material::Air, world_solid);
        world.place(
            PhysVol::new(shell.clone()).at(Position::new(format!("pos{shell}"), 0.0, 0.0, 0.0)),
        );
        ctx.doc.add_volume(world);
        ctx.doc.setup = Some(Setup {
            name: "Default".to_string(),
            version: "1.0".to_string(),
            world: "volWorld".to_string(),
        });
    }

    let summary = Summary {
        minos_modules: ctx.n_minos,
        cern_modules: ctx.n_cern,
        dc_modules: ctx.n_dc,
        total_modules: ctx.next_mod_id,
        feb_entries: ctx.feb_map.len(),
        solids: ctx.doc.solids.len(),
        volumes: ctx.doc.volumes.len(),
    };

    Build { doc: ctx.doc, feb_map: ctx.feb_map, summary }
}
