use tagger_core::builder::{BuildContext, BuildOptions};
use tagger_core::model::{Family, Region};
use tagger_core::params::GeometryParams;

fn ctx() -> BuildContext {
    BuildContext::new(GeometryParams::default(), BuildOptions::default())
}

#[test]
fn minos_module_has_one_layer_of_twenty_strips() {
    let mut ctx = ctx();
    let handle = ctx.module(Family::Minos, Region::WestSouth, None);

    assert_eq!(handle.id, 0);
    assert_eq!(handle.volume, "volAuxDet_MINOS_module_000_WestSouth");

    let inner = ctx
        .doc
        .volume("volAuxDet_MINOS_module_000_WestSouth_inner")
        .expect("inner volume");
    assert_eq!(inner.children.len(), 20);

    let outer = ctx.doc.volume(&handle.volume).expect("outer volume");
    assert_eq!(outer.children.len(), 1);
    assert_eq!(outer.children[0].volume, inner.name);
    assert_eq!(outer.solid, "AuxDet_MINOS_module_");

    let strip = ctx
        .doc
        .volume("volAuxDetSensitive_MINOS_module_000_strip_00")
        .expect("first strip");
    assert_eq!(strip.solid, "AuxDetSensitive_MINOS");
}

#[test]
fn cern_module_has_two_perpendicular_layers() {
    let mut ctx = ctx();
    let handle = ctx.module(Family::Cern, Region::Top, None);

    let inner = ctx.doc.volume(&format!("{}_inner", handle.volume)).expect("inner volume");
    assert_eq!(inner.children.len(), 16);

    // Top-face strips come first, then the thicker bottom face.
    assert!(ctx.doc.volume("volAuxDetSensitive_CERN_module_000_top_strip_00").is_some());
    assert!(ctx.doc.volume("volAuxDetSensitive_CERN_module_000_bot_strip_08").is_some());

    // Bottom-layer strips run perpendicular: rotated 90 deg about y.
    for child in &inner.children[..8] {
        assert!(child.rotation.is_none());
    }
    for child in &inner.children[8..] {
        let rot = child.rotation.as_ref().expect("bottom layer rotation");
        assert_eq!(rot.y, 90.0);
    }
}

#[test]
fn dc_module_has_two_offset_layers_of_thirty_two() {
    let mut ctx = ctx();
    let handle = ctx.module(Family::Dc, Region::Bottom, None);

    let inner = ctx.doc.volume(&format!("{}_inner", handle.volume)).expect("inner volume");
    assert_eq!(inner.children.len(), 64);

    // The second layer is shifted by half a strip pitch, not rotated.
    for child in &inner.children {
        assert!(child.rotation.is_none());
    }
    let p = GeometryParams::default();
    let pitch = p.dc_strip_width + p.pad_strip;
    let first = inner.children[0].position.as_ref().expect("position").x;
    let offset = inner.children[32].position.as_ref().expect("position").x;
    assert!((offset - first - 0.5 * pitch).abs() < 1e-9);
}

#[test]
fn cut_length_is_encoded_in_names() {
    let mut ctx = ctx();
    let handle = ctx.module(Family::Minos, Region::North, Some(497.84));

    assert_eq!(handle.volume, "volAuxDet_MINOS_module_000_cut497_North");
    assert!(ctx.doc.solid("AuxDet_MINOS_module_cut497").is_some());
    assert!(ctx.doc.solid("AuxDetSensitive_MINOS_cut497_").is_some());
    assert!(ctx
        .doc
        .volume("volAuxDetSensitive_MINOS_module_000_cut497_strip_00")
        .is_some());
}

#[test]
fn identical_modules_share_solids() {
    let mut ctx = ctx();
    ctx.module(Family::Minos, Region::WestSouth, None);
    let solids_after_first = ctx.doc.solids.len();
    ctx.module(Family::Minos, Region::EastSouth, None);
    assert_eq!(ctx.doc.solids.len(), solids_after_first);

    // A different cut length does add new solids.
    ctx.module(Family::Minos, Region::North, Some(256.54));
    assert!(ctx.doc.solids.len() > solids_after_first);
}

#[test]
fn module_ids_are_sequential_across_families() {
    let mut ctx = ctx();
    assert_eq!(ctx.module(Family::Minos, Region::South, Some(400.0)).id, 0);
    assert_eq!(ctx.module(Family::Cern, Region::Top, None).id, 1);
    assert_eq!(ctx.module(Family::Dc, Region::Bottom, None).id, 2);
    assert_eq!(ctx.module(Family::Minos, Region::North, Some(309.9)).id, 3);
    assert_eq!(ctx.modules_built(), 4);
    assert_eq!(ctx.family_count(Family::Minos), 2);
    assert_eq!(ctx.family_count(Family::Cern), 1);
    assert_eq!(ctx.family_count(Family::Dc), 1);
}

#[test]
fn module_numbers_are_zero_padded_to_three_digits() {
    let mut ctx = ctx();
    for _ in 0..12 {
        ctx.module(Family::Cern, Region::Top, None);
    }
    assert!(ctx.doc.volume("volAuxDet_CERN_module_005_Top").is_some());
    assert!(ctx.doc.volume("volAuxDet_CERN_module_011_Top").is_some());
}
