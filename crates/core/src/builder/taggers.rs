//! The eight tagger builders.
//!
//! Each function builds the modules of one tagger, assigns their FEB
//! channels, and registers an air-filled enclosure volume holding the module
//! placements. Coordinates are in the tagger's local frame; the enclosure
//! placement happens in [`super::enclosure`].

use crate::builder::{BuildContext, ModuleHandle};
use crate::gdml::{Material, PhysVol, Position, Rotation, Volume};
use crate::model::{
    Family, FebAssignment, FebChannel, LatRimSide, LongRimSide, Region, StackPosition, WallSide,
};
use crate::registry::{BoolPart, SolidKey};

fn place_modules(
    vtagger: &mut Volume,
    modules: &[ModuleHandle],
    coords: &[(f64, f64, f64)],
    rotation: impl Fn(&ModuleHandle, f64) -> Option<Rotation>,
) {
    for (handle, &(xc, yc, zc)) in modules.iter().zip(coords) {
        let mut pv = PhysVol::new(handle.volume.clone())
            .at(Position::new(format!("pos{}", handle.volume), xc, yc, zc));
        if let Some(rot) = rotation(handle, xc) {
            pv = pv.rotated(rot);
        }
        vtagger.place(pv);
    }
}

/// Build one stack of full-length MINOS modules for the east or west wall.
///
/// A stack is two layers of modules lying on edge. The center stacks sit on
/// the warm-vessel rollers and hold one module fewer; the south stacks hang
/// over the vessel's south edge and their enclosure is notched so the
/// overhanging top module clears the fixed stacks.
pub fn side_tagger(ctx: &mut BuildContext, side: WallSide, pos: StackPosition) -> String {
    let p = ctx.params.clone();
    let m_mod_w = p.minos_mod_width();

    let mut nstack = p.n_mod_stack;
    if pos == StackPosition::Center {
        nstack -= 1;
    }

    let mut z = p.minos_mod_length() + 2.0 * p.pad_tagger;
    if pos == StackPosition::South {
        z += p.minos_lat_south_active_overhang();
    }

    let xx = p.side_crt_stack_depth();
    let yy = nstack as f64 * m_mod_w
        + (nstack - 1) as f64 * p.side_crt_shelf_thick
        + 2.0 * p.pad_tagger;
    let zz = z;

    let mut coords = Vec::with_capacity(2 * nstack as usize);
    for layer in 0..2u32 {
        let layer_sign = if layer == 0 { 1.0 } else { -1.0 };
        let mut dx = layer_sign * 0.5 * p.layer_space;
        if side == WallSide::West {
            dx = -dx;
        }
        for i in 0..nstack {
            let dy = 0.5 * (2.0 * i as f64 + 1.0 - nstack as f64)
                * (m_mod_w + p.side_crt_shelf_thick);
            let dz = if pos == StackPosition::South {
                if i == nstack - 1 {
                    0.5 * p.minos_lat_south_active_overhang()
                } else {
                    -0.5 * p.minos_lat_south_active_overhang()
                }
            } else {
                0.0
            };
            coords.push((dx, dy, dz));
        }
    }

    let sname = if pos == StackPosition::South {
        let ext = ctx.solids.get_or_box(
            &mut ctx.doc,
            SolidKey::SideTagger { pos, part: Some(BoolPart::External) },
            xx,
            yy,
            zz,
        );
        let int = ctx.solids.get_or_box(
            &mut ctx.doc,
            SolidKey::SideTagger { pos, part: Some(BoolPart::Internal) },
            xx,
            m_mod_w + p.pad_tagger,
            p.minos_lat_south_active_overhang() + p.pad_tagger,
        );
        ctx.solids.get_or_subtraction(
            &mut ctx.doc,
            SolidKey::SideTagger { pos, part: None },
            ext,
            int,
            Position::new(
                "crtsouthtaggersubpos",
                0.0,
                0.5 * ((nstack - 1) as f64 * (m_mod_w + p.side_crt_shelf_thick) + p.pad_tagger),
                -0.5 * (z - p.minos_lat_south_active_overhang()),
            ),
        )
    } else {
        ctx.solids.get_or_box(&mut ctx.doc, SolidKey::SideTagger { pos, part: None }, xx, yy, zz)
    };

    let region = match (side, pos) {
        (WallSide::West, StackPosition::South) => Region::WestSouth,
        (WallSide::West, StackPosition::Center) => Region::WestCenter,
        (WallSide::West, StackPosition::North) => Region::WestNorth,
        (WallSide::East, StackPosition::South) => Region::EastSouth,
        (WallSide::East, StackPosition::Center) => Region::EastCenter,
        (WallSide::East, StackPosition::North) => Region::EastNorth,
    };
    let vname =
        format!("vol_{}_{}", SolidKey::SideTagger { pos, part: None }.name(), region.suffix());

    if ctx.opts.print_mod_ids {
        println!(
            "MINOS tagger, {side}, pos {pos} first module: {}, first FEB: {}",
            ctx.modules_built(),
            ctx.feb_id + 1
        );
    }
    ctx.feb_id += 2;

    // Each pair of adjacent FEBs reads out a group of modules; both boards
    // see every module in the group. Fixed stacks group in threes; the
    // shorter roller stacks run 2,3,3 per layer.
    let mut fmod = 0u32;
    let mut modules = Vec::with_capacity(coords.len());
    let n = coords.len();
    for i in 0..n {
        let handle = ctx.module(Family::Minos, region, None);
        let group = if pos == StackPosition::Center && (i < 2 || (8..10).contains(&i)) {
            2
        } else {
            3
        };
        fmod += 1;
        ctx.feb_map.insert(
            handle.id,
            FebAssignment::Dual(
                FebChannel::new(ctx.feb_id - 1, fmod),
                FebChannel::new(ctx.feb_id, fmod),
            ),
        );
        if fmod == group {
            fmod = 0;
            if i != n - 1 {
                ctx.feb_id += 2;
            }
        }
        modules.push(handle);
    }

    if ctx.opts.print_mod_ids {
        println!("   last module: {}, last FEB: {}", ctx.modules_built() - 1, ctx.feb_id);
    }

    let mut vtagger = Volume::new(vname.clone(), Material::Air, sname);
    place_modules(&mut vtagger, &modules, &coords, |_, _| None);
    ctx.doc.add_volume(vtagger);

    vname
}

/// Build the north (downstream) MINOS tagger: two layers of cut modules
/// lying horizontally, meeting nose-to-nose at the center line.
pub fn north_tagger(ctx: &mut BuildContext) -> String {
    let p = ctx.params.clone();
    let m_mod_l = p.minos_mod_length();
    let m_mod_w = p.minos_mod_width();
    let cuts = p.minos_cut_north.clone();
    let ny = cuts.len();
    let max_cut = cuts.iter().cloned().fold(f64::MIN, f64::max);

    let x = 2.0 * (m_mod_l - p.minos_strip_length + max_cut) + p.pad_minos + 2.0 * p.pad_tagger;
    let y = ny as f64 * m_mod_w + (ny - 1) as f64 * p.side_crt_shelf_thick + 2.0 * p.pad_tagger;

    if ctx.opts.print_mod_ids {
        println!(
            "MINOS tagger North, first module: {}, FEB: {}",
            ctx.modules_built(),
            ctx.feb_id + 1
        );
    }
    let mut fmod = 0u32;
    ctx.feb_id += 4;

    // Rows bottom to top; each row is two columns of cut modules in two
    // layers, read out by a bank of four FEBs (one per module end).
    let mut coords = Vec::with_capacity(ny);
    let mut modules = Vec::with_capacity(ny);
    for (row, &cut) in cuts.iter().enumerate() {
        let zin = 0.5 * p.layer_space;
        let xleft = 0.5 * x - p.pad_tagger - 0.5 * (m_mod_l - p.minos_strip_length + cut);
        let yrow = -0.5 * y
            + p.pad_tagger
            + (row as f64 + 0.5) * m_mod_w
            + row as f64 * p.side_crt_shelf_thick;
        coords.push([
            (xleft, yrow, zin),
            (-xleft, yrow, zin),
            (xleft, yrow, -zin),
            (-xleft, yrow, -zin),
        ]);

        fmod += 4;
        let mut row_modules = Vec::with_capacity(4);
        for i in 0..4u32 {
            let handle = ctx.module(Family::Minos, Region::North, Some(cut));
            ctx.feb_map.insert(
                handle.id,
                FebAssignment::Single(FebChannel::new(ctx.feb_id - 3 + i, fmod / 4)),
            );
            row_modules.push(handle);
        }
        modules.push(row_modules);
        if fmod == 12 {
            fmod = 0;
            if row != ny - 1 {
                ctx.feb_id += 4;
            }
        }
    }

    if ctx.opts.print_mod_ids {
        println!("   last module: {}, FEB: {}", ctx.modules_built() - 1, ctx.feb_id);
    }

    let sname = ctx.solids.get_or_box(
        &mut ctx.doc,
        SolidKey::NorthTagger,
        x,
        y,
        p.side_crt_stack_depth(),
    );
    let vname = format!("vol_{}", SolidKey::NorthTagger.name());
    let mut vtagger = Volume::new(vname.clone(), Material::Air, sname);
    for (row_modules, row_coords) in modules.iter().zip(&coords) {
        for (handle, &(xc, yc, zc)) in row_modules.iter().zip(row_coords) {
            let rot = if xc > 0.0 {
                Rotation::new(format!("rotplus{}", handle.volume), 0.0, 90.0, 0.0)
            } else {
                Rotation::new(format!("rotneg{}", handle.volume), 0.0, -90.0, 0.0)
            };
            vtagger.place(
                PhysVol::new(handle.volume.clone())
                    .at(Position::new(format!("pos{}", handle.volume), xc, yc, zc))
                    .rotated(rot),
            );
        }
    }
    ctx.doc.add_volume(vtagger);

    vname
}

/// Build the south (upstream) MINOS tagger: a picket row of vertical
/// half-length modules flanked by two side stacks of horizontal cut modules.
pub fn south_tagger(ctx: &mut BuildContext) -> String {
    let p = ctx.params.clone();
    let m_mod_l = p.minos_mod_length();
    let m_mod_w = p.minos_mod_width();
    let m_mod_h = p.minos_mod_height();
    let zm = p.minos_strip_length;
    let nmody = p.n_mod_south_vertical;
    let cuts_east = p.minos_cut_southeast.clone();
    let cuts_west = p.minos_cut_southwest.clone();
    let max_east = cuts_east.iter().cloned().fold(f64::MIN, f64::max);

    let x = 2.0 * (m_mod_l - zm + max_east - p.cross_two_module)
        + p.cut_overlap
        + 2.0 * p.pad_tagger;
    let y = m_mod_l + 2.0 * p.pad_tagger;
    let z = p.side_crt_stack_depth() + m_mod_h + p.pad_tagger;

    // Vertical modules sit 12 in from the east side (18 in from the west).
    let offset = 30.48;

    // (dx, dy, dz, vertical)
    let mut coords: Vec<(f64, f64, f64, bool)> = Vec::new();
    for i in 0..2 * nmody + 1 {
        let (dx, dy, dz);
        if i < nmody {
            dx = -0.5 * x
                + offset
                + p.pad_tagger
                + (i as f64 + 0.5) * m_mod_w
                + i as f64 * p.pad_module;
            dy = -0.5 * y + p.pad_tagger + 0.5 * (m_mod_l - 0.5 * zm);
            dz = -0.5 * z + p.pad_tagger + 0.5 * m_mod_h;
        } else if i == nmody {
            dx = -0.5 * x
                + offset
                + p.pad_tagger
                + (i as f64 + 0.5) * m_mod_w
                + i as f64 * p.pad_module;
            dy = -0.5 * y + p.pad_tagger + 0.5 * (m_mod_l - zm + p.vertical_module_length);
            dz = -0.5 * z + p.pad_tagger + 0.5 * m_mod_h;
        } else {
            dx = -0.5 * x
                + offset
                + p.pad_tagger
                + (i as f64 + 0.5 - nmody as f64 - 1.0) * m_mod_w
                + (i - nmody - 1) as f64 * p.pad_module;
            dy = 0.5 * y - p.pad_tagger - 0.5 * (m_mod_l - 0.5 * zm);
            dz = -0.5 * z + p.pad_tagger + m_mod_h + 1.5 * p.side_crt_post_width;
        }
        coords.push((dx, dy, dz, true));
    }

    for (i, &cut) in cuts_east.iter().enumerate() {
        let mut dxeast = 0.5 * (m_mod_l - zm + cut) + p.cut_gap - p.cross_two_module;
        if i == cuts_east.len() - 1 {
            dxeast -= p.offset_on_top_module + p.separate_two_module;
        }
        let dy = -0.5 * y
            + p.pad_tagger
            + (i as f64 + 0.5) * m_mod_w
            + i as f64 * p.side_crt_shelf_thick;
        let dz = 0.5 * z - 1.5 * p.side_crt_post_width - p.separate_two_module;
        coords.push((-dxeast, dy, dz, false));
    }

    for (i, &cut) in cuts_west.iter().enumerate() {
        let dxwest = 0.5 * (m_mod_l - zm + cut) + p.cut_gap - p.cross_two_module;
        let dy = -0.5 * y
            + p.pad_tagger
            + (i as f64 + 0.5) * m_mod_w
            + i as f64 * p.side_crt_shelf_thick;
        let dz = 0.5 * z - 1.5 * p.side_crt_post_width - p.separate_two_module;
        coords.push((dxwest, dy, dz, false));
    }

    if ctx.opts.print_mod_ids {
        println!(
            "MINOS tagger South, first module: {}, FEB: {}",
            ctx.modules_built(),
            ctx.feb_id + 1
        );
    }
    let mut fmod = 0u32;
    ctx.feb_id += 1;

    // One FEB per group of three modules, single-ended readout throughout.
    let n = coords.len();
    let n_vertical = 2 * nmody + 1;
    let mut modules = Vec::with_capacity(n);
    for i in 0..n {
        let cut = if i < n_vertical {
            if i == nmody {
                p.vertical_module_length
            } else {
                0.5 * zm
            }
        } else if i < n_vertical + cuts_east.len() {
            cuts_east[i - n_vertical]
        } else {
            cuts_west[i - n_vertical - cuts_east.len()]
        };
        let handle = ctx.module(Family::Minos, Region::South, Some(cut));
        fmod += 1;
        ctx.feb_map
            .insert(handle.id, FebAssignment::Single(FebChannel::new(ctx.feb_id, fmod)));
        if fmod == 3 {
            fmod = 0;
            if i != n - 1 {
                ctx.feb_id += 1;
            }
        }
        modules.push(handle);
    }

    if ctx.opts.print_mod_ids {
        println!("   last module: {}, FEB: {}", ctx.modules_built() - 1, ctx.feb_id);
    }

    let sname = ctx.solids.get_or_box(&mut ctx.doc, SolidKey::SouthTagger, x, y, z);
    let vname = format!("vol_{}", SolidKey::SouthTagger.name());
    let mut vtagger = Volume::new(vname.clone(), Material::Air, sname);
    for (handle, &(xc, yc, zc, vertical)) in modules.iter().zip(&coords) {
        let rot = if vertical {
            Rotation::new(format!("rot{}", handle.volume), 90.0, 0.0, 90.0)
        } else if xc > 0.0 {
            Rotation::new(format!("rotplus{}", handle.volume), 0.0, 90.0, 0.0)
        } else {
            Rotation::new(format!("rotneg{}", handle.volume), 0.0, -90.0, 0.0)
        };
        vtagger.place(
            PhysVol::new(handle.volume.clone())
                .at(Position::new(format!("pos{}", handle.volume), xc, yc, zc))
                .rotated(rot),
        );
    }
    ctx.doc.add_volume(vtagger);

    vname
}

/// Build the bottom tagger: 14 double-layer modules under the warm vessel,
/// two rows of five plus four rotated modules bridging the center.
pub fn bottom_tagger(ctx: &mut BuildContext) -> String {
    let p = ctx.params.clone();
    let modwidth = p.dc_mod_width();

    let xx = modwidth * 5.0 + p.dc_spacer * 4.0 + 2.0 * p.pad_tagger;
    let yy = 2.0 * (p.dc_strip_thick + p.pad_dc + p.pad_tagger) + 3.0 * p.pad_strip;
    let zz = p.wv_length;

    // (dx, dz, rotated)
    let mut coords: Vec<(f64, f64, bool)> = Vec::with_capacity(14);
    for i in 0..14i32 {
        let (dx, dz) = if i < 5 {
            ((2 * i - 4) as f64 * 0.5 * (modwidth + p.dc_spacer), -p.dc_long_off5())
        } else if i < 7 {
            let sign = if i % 2 == 1 { -1.0 } else { 1.0 };
            ((p.dc_strip_length + 2.0 * (p.pad_dc + p.pad_strip)) * 0.5 * sign, -p.dc_long_off2())
        } else if i < 9 {
            let sign = if i % 2 == 1 { -1.0 } else { 1.0 };
            ((p.dc_strip_length + 2.0 * (p.pad_dc + p.pad_strip)) * 0.5 * sign, p.dc_long_off2())
        } else {
            ((2 * (i - 9) - 4) as f64 * 0.5 * (modwidth + p.dc_spacer), p.dc_long_off5())
        };
        coords.push((dx, dz, i > 4 && i < 9));
    }

    if ctx.opts.print_mod_ids {
        println!("DC tagger, first module: {}, FEB: {}", ctx.modules_built(), ctx.feb_id + 1);
    }

    let mut modules = Vec::with_capacity(coords.len());
    for _ in &coords {
        let handle = ctx.module(Family::Dc, Region::Bottom, None);
        ctx.feb_id += 1;
        ctx.feb_map.insert(handle.id, FebAssignment::Single(FebChannel::new(ctx.feb_id, 1)));
        modules.push(handle);
    }

    if ctx.opts.print_mod_ids {
        println!("   last module: {}, FEB: {}", ctx.modules_built() - 1, ctx.feb_id);
    }

    let sname = ctx.solids.get_or_box(&mut ctx.doc, SolidKey::BottomTagger, xx, yy, zz);
    let vname = format!("vol_{}", SolidKey::BottomTagger.name());
    let mut vtagger = Volume::new(vname.clone(), Material::Air, sname);
    for (handle, &(xc, zc, rotated)) in modules.iter().zip(&coords) {
        let mut pv = PhysVol::new(handle.volume.clone())
            .at(Position::new(format!("pos{}", handle.volume), xc, 0.0, zc));
        if rotated {
            pv = pv.rotated(Rotation::new(format!("rot{}", handle.volume), 0.0, 90.0, 0.0));
        }
        vtagger.place(pv);
    }
    ctx.doc.add_volume(vtagger);

    vname
}

fn cern_tagger_height(p: &crate::params::GeometryParams) -> f64 {
    p.cern_strip_thick_top
        + p.cern_strip_thick_bot
        + 3.0 * p.pad_strip
        + 2.0 * p.pad_cern
        + 2.0 * p.pad_tagger
}

fn cern_pitch(p: &crate::params::GeometryParams) -> f64 {
    p.cern_strip_length + 2.0 * p.pad_cern + (p.n_strips_cern + 1) as f64 * p.pad_strip
}

/// Build the top CERN tagger: a single flat grid of square modules over the
/// warm vessel roof.
pub fn top_tagger(ctx: &mut BuildContext) -> String {
    let p = ctx.params.clone();
    let modwidth = cern_pitch(&p);

    let xx = p.n_top_x as f64 * modwidth + 2.0 * p.pad_tagger + (p.n_top_x - 1) as f64 * p.pad_module;
    let yy = cern_tagger_height(&p);
    let zz = p.n_top_z as f64 * modwidth + 2.0 * p.pad_tagger + (p.n_top_z - 1) as f64 * p.pad_module;

    let mut coords = Vec::with_capacity((p.n_top_x * p.n_top_z) as usize);
    let mut dz = 0.5 * (modwidth + p.pad_module) * (1.0 - p.n_top_z as f64);
    let mut dx = 0.5 * (modwidth + p.pad_module) * (1.0 - p.n_top_x as f64);
    for i in 0..p.n_top_x * p.n_top_z {
        coords.push((dx, 0.0, dz));
        if (i + 1) % p.n_top_z == 0 {
            dx += modwidth + p.pad_module;
            dz = 0.5 * (modwidth + p.pad_module) * (1.0 - p.n_top_z as f64);
        } else {
            dz += modwidth + p.pad_module;
        }
    }

    if ctx.opts.print_mod_ids {
        println!(
            "CERN tagger Top, first module: {}, FEB: {}",
            ctx.modules_built(),
            ctx.feb_id + 1
        );
    }

    let mut modules = Vec::with_capacity(coords.len());
    for _ in &coords {
        let handle = ctx.module(Family::Cern, Region::Top, None);
        ctx.feb_id += 1;
        ctx.feb_map.insert(handle.id, FebAssignment::Single(FebChannel::new(ctx.feb_id, 1)));
        modules.push(handle);
    }

    if ctx.opts.print_mod_ids {
        println!("   last module: {}, FEB: {}", ctx.modules_built() - 1, ctx.feb_id);
    }

    let sname = ctx.solids.get_or_box(&mut ctx.doc, SolidKey::TopTagger, xx, yy, zz);
    let vname = format!("vol_{}", SolidKey::TopTagger.name());
    let mut vtagger = Volume::new(vname.clone(), Material::Air, sname);
    place_modules(&mut vtagger, &modules, &coords, |handle, _| {
        Some(Rotation::new(format!("rot{}", handle.volume), 0.0, 180.0, 0.0))
    });
    ctx.doc.add_volume(vtagger);

    vname
}

/// Build the east or west CERN rim tagger: one row of square modules along
/// the sloping lateral edge of the roof.
pub fn lat_rim_tagger(ctx: &mut BuildContext, side: LatRimSide) -> String {
    let p = ctx.params.clone();
    let modwidth = cern_pitch(&p);

    let xx = modwidth + 2.0 * p.pad_tagger;
    let yy = cern_tagger_height(&p);
    let zz =
        p.n_slope_lat as f64 * modwidth + 2.0 * p.pad_tagger + (p.n_slope_lat - 1) as f64 * p.pad_module;

    let mut coords = Vec::with_capacity(p.n_slope_lat as usize);
    let mut dz = 0.5 * (modwidth + p.pad_module) * (1.0 - p.n_slope_lat as f64);
    for _ in 0..p.n_slope_lat {
        coords.push((0.0, 0.0, dz));
        dz += modwidth + p.pad_module;
    }

    let side_label = match side {
        LatRimSide::West => "west",
        LatRimSide::East => "east",
    };
    if ctx.opts.print_mod_ids {
        println!(
            "CERN tagger Lat, side {side_label} first module: {}, FEB: {}",
            ctx.modules_built(),
            ctx.feb_id + 1
        );
    }

    let region = match side {
        LatRimSide::West => Region::RimWest,
        LatRimSide::East => Region::RimEast,
    };
    let mut modules = Vec::with_capacity(coords.len());
    for _ in &coords {
        let handle = ctx.module(Family::Cern, region, None);
        ctx.feb_id += 1;
        ctx.feb_map.insert(handle.id, FebAssignment::Single(FebChannel::new(ctx.feb_id, 1)));
        modules.push(handle);
    }

    if ctx.opts.print_mod_ids {
        println!("   last module: {}, FEB: {}", ctx.modules_built() - 1, ctx.feb_id);
    }

    let sname =
        ctx.solids.get_or_box(&mut ctx.doc, SolidKey::LatRimTagger { side }, xx, yy, zz);
    let vname = format!("vol_{}", SolidKey::LatRimTagger { side }.name());
    let mut vtagger = Volume::new(vname.clone(), Material::Air, sname);
    place_modules(&mut vtagger, &modules, &coords, |handle, _| match side {
        LatRimSide::West => {
            Some(Rotation::new(format!("rot{}", handle.volume), 0.0, 180.0, 0.0))
        }
        LatRimSide::East => None,
    });
    ctx.doc.add_volume(vtagger);

    vname
}

/// Build the south or north CERN rim tagger: one row of square modules along
/// the sloping front or back edge of the roof.
pub fn long_rim_tagger(ctx: &mut BuildContext, side: LongRimSide) -> String {
    let p = ctx.params.clone();
    let modwidth = cern_pitch(&p);

    let xx = p.n_slope_front as f64 * modwidth
        + 2.0 * p.pad_tagger
        + (p.n_slope_front - 1) as f64 * p.pad_module;
    let yy = cern_tagger_height(&p);
    let zz = modwidth + 2.0 * p.pad_tagger;

    let mut coords = Vec::with_capacity(p.n_slope_front as usize);
    let mut dx = 0.5 * (modwidth + p.pad_module) * (1.0 - p.n_slope_front as f64);
    for _ in 0..p.n_slope_front {
        coords.push((dx, 0.0, 0.0));
        dx += modwidth + p.pad_module;
    }

    let side_label = match side {
        LongRimSide::South => "south",
        LongRimSide::North => "north",
    };
    if ctx.opts.print_mod_ids {
        println!(
            "CERN tagger Long, side {side_label} first module: {}, FEB: {}",
            ctx.modules_built(),
            ctx.feb_id + 1
        );
    }

    let region = match side {
        LongRimSide::South => Region::RimSouth,
        LongRimSide::North => Region::RimNorth,
    };
    let mut modules = Vec::with_capacity(coords.len());
    for _ in &coords {
        let handle = ctx.module(Family::Cern, region, None);
        ctx.feb_id += 1;
        ctx.feb_map.insert(handle.id, FebAssignment::Single(FebChannel::new(ctx.feb_id, 1)));
        modules.push(handle);
    }

    if ctx.opts.print_mod_ids {
        println!("   last module: {}, FEB: {}", ctx.modules_built() - 1, ctx.feb_id);
    }

    let sname =
        ctx.solids.get_or_box(&mut ctx.doc, SolidKey::LongRimTagger { side }, xx, yy, zz);
    let vname = format!("vol_{}", SolidKey::LongRimTagger { side }.name());
    let mut vtagger = Volume::new(vname.clone(), Material::Air, sname);
    place_modules(&mut vtagger, &modules, &coords, |handle, _| {
        let rot = match side {
            LongRimSide::South => Rotation::new(format!("rot{}", handle.volume), 0.0, 90.0, 0.0),
            LongRimSide::North => Rotation::new(format!("rot{}", handle.volume), 0.0, -90.0, 0.0),
        };
        Some(rot)
    });
    ctx.doc.add_volume(vtagger);

    vname
}
