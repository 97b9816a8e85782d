//! Support beams and the outer CRT shell.
//!
//! The shell is the single volume the master geometry includes: a box with
//! the warm-vessel void subtracted, holding every tagger enclosure plus the
//! roof support beams at their surveyed positions.

use crate::builder::BuildContext;
use crate::gdml::{Material, PhysVol, Position, Rotation, Volume};
use crate::model::{LatRimSide, LongRimSide, StackPosition, WallSide};
use crate::registry::{BeamPart, BoolPart, SolidKey};

use super::taggers;

/// Build one wide-flange roof support beam.
///
/// The I profile is carved from a box by subtracting the same channel solid
/// once per side of the web. The solid is shared; each beam gets its own
/// numbered volume.
pub fn beam(ctx: &mut BuildContext) -> String {
    let p = ctx.params.clone();
    let beam_id = ctx.next_beam_id();

    let xxsub = 0.5 * (p.beam_width - p.beam_web_thick);
    let yysub = p.beam_height - 2.0 * p.beam_flange_thick;
    let xsubpos = 0.5 * (p.beam_width - 0.5 * (p.beam_width - p.beam_web_thick));

    if ctx.opts.test_mode && beam_id == 1 {
        let area = p.beam_width * p.beam_height
            - (p.beam_width - p.beam_web_thick) * (p.beam_height - 2.0 * p.beam_flange_thick);
        println!("modeled - true beam areas (cm^2): {}", area - p.beam_true_area);
    }

    let ext = ctx.solids.get_or_box(
        &mut ctx.doc,
        SolidKey::Beam { part: BeamPart::External },
        p.beam_width,
        p.beam_height,
        p.beam_length,
    );
    let int = ctx.solids.get_or_box(
        &mut ctx.doc,
        SolidKey::Beam { part: BeamPart::Internal },
        xxsub,
        yysub,
        p.beam_length,
    );
    let sub1 = ctx.solids.get_or_subtraction(
        &mut ctx.doc,
        SolidKey::Beam { part: BeamPart::FirstSubtraction },
        ext,
        int.clone(),
        Position::new("beamsubpos1", xsubpos, 0.0, 0.0),
    );
    let sname = ctx.solids.get_or_subtraction(
        &mut ctx.doc,
        SolidKey::Beam { part: BeamPart::Full },
        sub1,
        int,
        Position::new("beamsubpos2", -xsubpos, 0.0, 0.0),
    );

    let vname = format!("vol{}_{beam_id}", SolidKey::Beam { part: BeamPart::Full }.name());
    ctx.doc.add_volume(Volume::new(vname.clone(), Material::Steel, sname));
    vname
}

/// Build the air enclosure holding the full rank of roof support beams,
/// evenly spaced along z and turned crosswise.
pub fn beam_volume(ctx: &mut BuildContext) -> String {
    let p = ctx.params.clone();
    let padding = 0.01;

    let xx = p.beam_length + padding;
    let yy = p.beam_height + padding;
    let zz = (p.n_beams - 1) as f64 * p.crt_beam_spacing + p.beam_width + padding;

    let beams: Vec<String> = (0..p.n_beams).map(|_| beam(ctx)).collect();

    let sname = ctx.solids.get_or_box(&mut ctx.doc, SolidKey::BeamEnclosure, xx, yy, zz);
    let vname = format!("vol{}", SolidKey::BeamEnclosure.name());
    let mut v = Volume::new(vname.clone(), Material::Air, sname);
    for (i, beam_vol) in beams.iter().enumerate() {
        let dz = 0.5 * (padding - zz + p.beam_width) + i as f64 * p.crt_beam_spacing;
        v.place(
            PhysVol::new(beam_vol.clone())
                .at(Position::new(format!("pos{beam_vol}"), 0.0, 0.0, dz))
                .rotated(Rotation::new(format!("rot{beam_vol}"), 0.0, 90.0, 0.0)),
        );
    }
    ctx.doc.add_volume(v);
    vname
}

/// Build every tagger and assemble the CRT shell around the warm-vessel
/// void. Returns the shell volume name.
pub fn detector_enclosure(ctx: &mut BuildContext) -> String {
    let p = ctx.params.clone();
    let m_mod_h = p.minos_mod_height();
    let stack_depth = p.side_crt_stack_depth();
    let swo = p.shell_wv_offset();

    let xxint = p.wv_width + 2.0 * p.side_crt_wv_offset;
    let yyint = p.wv_height + 1.0 + p.wv_pad_y;
    let zzint = p.wv_length + 2.0 * p.side_crt_wv_offset;

    let xxext = p.wv_width + 2.0 * p.side_crt_roll_offset + 1.1 * stack_depth;
    let yyext = p.shell_y();
    let zzext = p.shell_z();

    let vws = taggers::side_tagger(ctx, WallSide::West, StackPosition::South);
    let vwc = taggers::side_tagger(ctx, WallSide::West, StackPosition::Center);
    let vwn = taggers::side_tagger(ctx, WallSide::West, StackPosition::North);
    let ves = taggers::side_tagger(ctx, WallSide::East, StackPosition::South);
    let vec = taggers::side_tagger(ctx, WallSide::East, StackPosition::Center);
    let ven = taggers::side_tagger(ctx, WallSide::East, StackPosition::North);
    let vss = taggers::south_tagger(ctx);
    let vnn = taggers::north_tagger(ctx);
    let vbt = taggers::bottom_tagger(ctx);
    let vtt = taggers::top_tagger(ctx);
    let vrw = taggers::lat_rim_tagger(ctx, LatRimSide::West);
    let vre = taggers::lat_rim_tagger(ctx, LatRimSide::East);
    let vrs = taggers::long_rim_tagger(ctx, LongRimSide::South);
    let vrn = taggers::long_rim_tagger(ctx, LongRimSide::North);
    let vbeam = beam_volume(ctx);

    let ext = ctx.solids.get_or_box(
        &mut ctx.doc,
        SolidKey::Shell { part: Some(BoolPart::External) },
        xxext,
        yyext,
        zzext,
    );
    let int = ctx.solids.get_or_box(
        &mut ctx.doc,
        SolidKey::Shell { part: Some(BoolPart::Internal) },
        xxint,
        yyint,
        zzint,
    );
    let sname = ctx.solids.get_or_subtraction(
        &mut ctx.doc,
        SolidKey::Shell { part: None },
        ext,
        int,
        Position::new(
            "crtshellsubpos",
            0.0,
            -0.5 * p.shell_y() + p.wv_foot_elevation + 0.5 * p.wv_height + 0.5 * p.wv_pad_y,
            -swo,
        ),
    );

    let vname = format!("vol{}", SolidKey::Shell { part: None }.name());
    let mut shell = Volume::new(vname.clone(), Material::Air, sname);

    let place = |shell: &mut Volume, v: &str, x: f64, y: f64, z: f64, rot: Option<Rotation>| {
        let mut pv = PhysVol::new(v.to_string()).at(Position::new(format!("pos{v}"), x, y, z));
        if let Some(rot) = rot {
            pv = pv.rotated(rot);
        }
        shell.place(pv);
    };

    // Roof support beams sit just under the top tagger.
    place(
        &mut shell,
        &vbeam,
        0.0,
        p.cern_top_y() - 0.5 * p.beam_height - 0.6 * p.cern_mod_height(),
        0.0,
        None,
    );

    // Side walls: fixed south and north stacks flush against the vessel,
    // center stacks pushed out to clear the rollers.
    let x_fix = 0.5 * p.wv_width + p.side_crt_wv_offset + 0.5 * stack_depth;
    let x_roll = 0.5 * p.wv_width + p.side_crt_roll_offset;
    place(&mut shell, &vws, x_fix, p.minos_lat_fix_y(), p.minos_lat_south_z() - swo, None);
    place(&mut shell, &vwc, x_roll, p.minos_lat_roll_y(), p.minos_lat_cent_z() - swo, None);
    place(&mut shell, &vwn, x_fix, p.minos_lat_fix_y(), p.minos_lat_north_z() - swo, None);
    place(&mut shell, &ves, -x_fix, p.minos_lat_fix_y(), p.minos_lat_south_z() - swo, None);
    place(&mut shell, &vec, -x_roll, p.minos_lat_roll_y(), p.minos_lat_cent_z() - swo, None);
    place(&mut shell, &ven, -x_fix, p.minos_lat_fix_y(), p.minos_lat_north_z() - swo, None);

    place(
        &mut shell,
        &vnn,
        0.0,
        p.minos_north_y(),
        0.5 * p.wv_length + p.side_crt_wv_offset + 0.5 * stack_depth - swo,
        None,
    );
    place(
        &mut shell,
        &vss,
        0.0,
        p.minos_south_y(),
        -(0.5 * p.wv_length
            + p.side_crt_wv_offset
            + 0.5 * (stack_depth + p.pad_tagger + m_mod_h))
            - swo,
        None,
    );

    place(&mut shell, &vbt, 0.0, p.dc_position_y, -swo, None);

    place(&mut shell, &vtt, 0.0, p.cern_top_y(), p.cern_top_z() - swo, None);

    // The four rim taggers hang off the roof edges, tipped to vertical.
    place(
        &mut shell,
        &vrw,
        p.cern_rim_lat_x(),
        p.cern_rim_lat_y(),
        p.cern_rim_lat_z() - swo,
        Some(Rotation::new(format!("rot{vrw}"), 0.0, 0.0, p.slope_inclination)),
    );
    place(
        &mut shell,
        &vre,
        -p.cern_rim_lat_x(),
        p.cern_rim_lat_y(),
        p.cern_rim_lat_z() - swo,
        Some(Rotation::new(format!("rot{vre}"), 0.0, 0.0, -p.slope_inclination)),
    );
    place(
        &mut shell,
        &vrs,
        0.0,
        p.cern_rim_south_y(),
        p.cern_rim_south_z() - swo,
        Some(Rotation::new(format!("rot{vrs}"), p.slope_inclination, 0.0, 0.0)),
    );
    place(
        &mut shell,
        &vrn,
        0.0,
        p.cern_rim_north_y(),
        p.cern_rim_north_z() - swo,
        Some(Rotation::new(format!("rot{vrn}"), -p.slope_inclination, 0.0, 0.0)),
    );

    ctx.doc.add_volume(shell);
    vname
}
