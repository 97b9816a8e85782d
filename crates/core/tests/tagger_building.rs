use tagger_core::builder::taggers;
use tagger_core::builder::{BuildContext, BuildOptions};
use tagger_core::model::{
    FebAssignment, FebChannel, LatRimSide, LongRimSide, StackPosition, WallSide,
};
use tagger_core::params::GeometryParams;

fn ctx() -> BuildContext {
    BuildContext::new(GeometryParams::default(), BuildOptions::default())
}

fn dual(feb_a: u32, feb_b: u32, pos: u32) -> FebAssignment {
    FebAssignment::Dual(FebChannel::new(feb_a, pos), FebChannel::new(feb_b, pos))
}

fn single(feb: u32, pos: u32) -> FebAssignment {
    FebAssignment::Single(FebChannel::new(feb, pos))
}

#[test]
fn fixed_side_stack_has_eighteen_dual_read_modules() {
    let mut ctx = ctx();
    let vname = taggers::side_tagger(&mut ctx, WallSide::East, StackPosition::North);

    assert_eq!(vname, "vol_tagger_SideLat_North_EastNorth");
    assert_eq!(ctx.modules_built(), 18);
    assert_eq!(ctx.feb_map.len(), 18);

    // Six groups of three, each read out by a pair of boards.
    assert_eq!(ctx.feb_map.get(0), Some(&dual(1, 2, 1)));
    assert_eq!(ctx.feb_map.get(2), Some(&dual(1, 2, 3)));
    assert_eq!(ctx.feb_map.get(3), Some(&dual(3, 4, 1)));
    assert_eq!(ctx.feb_map.get(17), Some(&dual(11, 12, 3)));

    let tagger = ctx.doc.volume(&vname).expect("tagger volume");
    assert_eq!(tagger.children.len(), 18);
}

#[test]
fn center_stack_groups_run_2_3_3_per_layer() {
    let mut ctx = ctx();
    taggers::side_tagger(&mut ctx, WallSide::West, StackPosition::Center);

    assert_eq!(ctx.modules_built(), 16);
    assert_eq!(ctx.feb_map.get(0), Some(&dual(1, 2, 1)));
    assert_eq!(ctx.feb_map.get(1), Some(&dual(1, 2, 2)));
    assert_eq!(ctx.feb_map.get(2), Some(&dual(3, 4, 1)));
    assert_eq!(ctx.feb_map.get(4), Some(&dual(3, 4, 3)));
    assert_eq!(ctx.feb_map.get(7), Some(&dual(5, 6, 3)));
    assert_eq!(ctx.feb_map.get(9), Some(&dual(7, 8, 2)));
    assert_eq!(ctx.feb_map.get(10), Some(&dual(9, 10, 1)));
    assert_eq!(ctx.feb_map.get(15), Some(&dual(11, 12, 3)));
}

#[test]
fn south_stack_enclosure_is_notched_for_the_overhang() {
    let mut ctx = ctx();
    let vname = taggers::side_tagger(&mut ctx, WallSide::West, StackPosition::South);

    assert_eq!(vname, "vol_tagger_SideLat_South_WestSouth");
    assert_eq!(ctx.modules_built(), 18);
    assert!(ctx.doc.solid("tagger_SideLat_South_external").is_some());
    assert!(ctx.doc.solid("tagger_SideLat_South_internal").is_some());
    assert!(matches!(
        ctx.doc.solid("tagger_SideLat_South"),
        Some(tagger_core::gdml::Solid::Subtraction { .. })
    ));

    // Only the top module of each layer shifts south with the overhang.
    let tagger = ctx.doc.volume(&vname).expect("tagger volume");
    let dz: Vec<f64> =
        tagger.children.iter().map(|c| c.position.as_ref().unwrap().z).collect();
    assert!(dz[8] > 0.0);
    assert!(dz[17] > 0.0);
    assert!(dz[..8].iter().all(|&z| z < 0.0));
}

#[test]
fn south_tagger_has_thirty_nine_modules() {
    let mut ctx = ctx();
    let vname = taggers::south_tagger(&mut ctx);

    assert_eq!(vname, "vol_tagger_SideSouth");
    assert_eq!(ctx.modules_built(), 39);
    assert_eq!(ctx.feb_map.len(), 39);

    // Half-length picket modules, with the full odd-length one in the middle.
    assert!(ctx.doc.volume("volAuxDet_MINOS_module_000_cut400_South").is_some());
    assert!(ctx.doc.volume("volAuxDet_MINOS_module_010_cut485_South").is_some());

    // 13 FEBs, one per group of three, single-ended.
    assert_eq!(ctx.feb_map.get(0), Some(&single(1, 1)));
    assert_eq!(ctx.feb_map.get(2), Some(&single(1, 3)));
    assert_eq!(ctx.feb_map.get(3), Some(&single(2, 1)));
    assert_eq!(ctx.feb_map.get(38), Some(&single(13, 3)));

    // Vertical modules stand upright, horizontal ones lie crosswise.
    let tagger = ctx.doc.volume(&vname).expect("tagger volume");
    assert_eq!(tagger.children.len(), 39);
    let rot0 = tagger.children[0].rotation.as_ref().expect("vertical rotation");
    assert_eq!((rot0.x, rot0.y, rot0.z), (90.0, 0.0, 90.0));
    let rot21 = tagger.children[21].rotation.as_ref().expect("horizontal rotation");
    assert_eq!(rot21.y.abs(), 90.0);
}

#[test]
fn north_tagger_is_six_rows_of_four_cut_modules() {
    let mut ctx = ctx();
    let vname = taggers::north_tagger(&mut ctx);

    assert_eq!(vname, "vol_tagger_SideNorth");
    assert_eq!(ctx.modules_built(), 24);

    // A bank of four boards serves three rows at positions 1..3.
    assert_eq!(ctx.feb_map.get(0), Some(&single(1, 1)));
    assert_eq!(ctx.feb_map.get(3), Some(&single(4, 1)));
    assert_eq!(ctx.feb_map.get(4), Some(&single(1, 2)));
    assert_eq!(ctx.feb_map.get(11), Some(&single(4, 3)));
    assert_eq!(ctx.feb_map.get(12), Some(&single(5, 1)));
    assert_eq!(ctx.feb_map.get(23), Some(&single(8, 3)));

    // Modules point inward from both columns.
    let tagger = ctx.doc.volume(&vname).expect("tagger volume");
    assert_eq!(tagger.children.len(), 24);
    for child in &tagger.children {
        let x = child.position.as_ref().unwrap().x;
        let rot = child.rotation.as_ref().expect("rotation");
        if x > 0.0 {
            assert_eq!(rot.y, 90.0);
        } else {
            assert_eq!(rot.y, -90.0);
        }
    }
}

#[test]
fn bottom_tagger_rotates_the_four_bridge_modules() {
    let mut ctx = ctx();
    let vname = taggers::bottom_tagger(&mut ctx);

    assert_eq!(vname, "vol_tagger_Bottom");
    assert_eq!(ctx.modules_built(), 14);
    assert_eq!(ctx.feb_map.get(0), Some(&single(1, 1)));
    assert_eq!(ctx.feb_map.get(13), Some(&single(14, 1)));

    let tagger = ctx.doc.volume(&vname).expect("tagger volume");
    for (i, child) in tagger.children.iter().enumerate() {
        assert_eq!(child.rotation.is_some(), (5..9).contains(&i), "module {i}");
    }
}

#[test]
fn top_tagger_is_an_84_module_grid() {
    let mut ctx = ctx();
    let vname = taggers::top_tagger(&mut ctx);

    assert_eq!(vname, "vol_tagger_Top");
    assert_eq!(ctx.modules_built(), 84);
    assert_eq!(ctx.feb_map.get(0), Some(&single(1, 1)));
    assert_eq!(ctx.feb_map.get(83), Some(&single(84, 1)));

    // 6 columns of 14: x advances once per full z sweep.
    let tagger = ctx.doc.volume(&vname).expect("tagger volume");
    assert_eq!(tagger.children.len(), 84);
    let x0 = tagger.children[0].position.as_ref().unwrap().x;
    let x13 = tagger.children[13].position.as_ref().unwrap().x;
    let x14 = tagger.children[14].position.as_ref().unwrap().x;
    assert_eq!(x0, x13);
    assert!(x14 > x0);
}

#[test]
fn rim_taggers_have_their_surveyed_counts_and_rotations() {
    let mut ctx = ctx();
    let vrw = taggers::lat_rim_tagger(&mut ctx, LatRimSide::West);
    let vre = taggers::lat_rim_tagger(&mut ctx, LatRimSide::East);
    let vrs = taggers::long_rim_tagger(&mut ctx, LongRimSide::South);
    let vrn = taggers::long_rim_tagger(&mut ctx, LongRimSide::North);

    assert_eq!(ctx.modules_built(), 14 + 14 + 6 + 6);

    let west = ctx.doc.volume(&vrw).expect("west rim");
    assert_eq!(west.children.len(), 14);
    assert!(west.children.iter().all(|c| c.rotation.as_ref().is_some_and(|r| r.y == 180.0)));

    let east = ctx.doc.volume(&vre).expect("east rim");
    assert_eq!(east.children.len(), 14);
    assert!(east.children.iter().all(|c| c.rotation.is_none()));

    let south = ctx.doc.volume(&vrs).expect("south rim");
    assert_eq!(south.children.len(), 6);
    assert!(south.children.iter().all(|c| c.rotation.as_ref().is_some_and(|r| r.y == 90.0)));

    let north = ctx.doc.volume(&vrn).expect("north rim");
    assert_eq!(north.children.len(), 6);
    assert!(north.children.iter().all(|c| c.rotation.as_ref().is_some_and(|r| r.y == -90.0)));
}
