use tagger_core::gdml::{
    Document, DocumentError, Material, PhysVol, Position, Rotation, Setup, Solid, Volume,
};

fn slab_doc() -> Document {
    let mut doc = Document::new();
    doc.add_solid(Solid::Box { name: "slab".to_string(), x: 1.0, y: 4.1, z: 800.0 });
    doc.add_volume(Volume::new("volSlab", Material::Polystyrene, "slab"));
    doc
}

#[test]
fn box_solids_serialize_with_cm_units() {
    let doc = slab_doc();
    let xml = doc.to_xml();

    assert!(xml.starts_with("<?xml version=\"1.0\" ?>\n<gdml>\n"));
    assert!(xml.contains("\t<solids>\n"));
    assert!(xml.contains("<box name=\"slab\" lunit=\"cm\" x=\"1\" y=\"4.1\" z=\"800\"/>"));
    assert!(xml.contains("<volume name=\"volSlab\">"));
    assert!(xml.contains("<materialref ref=\"Polystyrene\"/>"));
    assert!(xml.contains("<solidref ref=\"slab\"/>"));
    assert!(xml.ends_with("</gdml>\n"));
}

#[test]
fn subtractions_serialize_constituents_and_offset() {
    let mut doc = Document::new();
    doc.add_solid(Solid::Box { name: "outer".to_string(), x: 10.0, y: 10.0, z: 10.0 });
    doc.add_solid(Solid::Box { name: "inner".to_string(), x: 8.0, y: 8.0, z: 8.0 });
    doc.add_solid(Solid::Subtraction {
        name: "hollow".to_string(),
        first: "outer".to_string(),
        second: "inner".to_string(),
        position: Position::new("subpos", 0.0, -1.5, 0.0),
    });
    doc.validate().expect("valid");

    let xml = doc.to_xml();
    assert!(xml.contains("<subtraction name=\"hollow\">"));
    assert!(xml.contains("<first ref=\"outer\"/>"));
    assert!(xml.contains("<second ref=\"inner\"/>"));
    assert!(xml.contains("<position name=\"subpos\" unit=\"cm\" x=\"0\" y=\"-1.5\" z=\"0\"/>"));
}

#[test]
fn placements_serialize_position_then_rotation() {
    let mut doc = slab_doc();
    doc.add_solid(Solid::Box { name: "holder".to_string(), x: 20.0, y: 20.0, z: 810.0 });
    let mut holder = Volume::new("volHolder", Material::Air, "holder");
    holder.place(
        PhysVol::new("volSlab")
            .at(Position::new("posvolSlab", 0.0, 2.05, 0.0))
            .rotated(Rotation::new("rotvolSlab", 0.0, 90.0, 0.0)),
    );
    doc.add_volume(holder);
    doc.validate().expect("valid");

    let xml = doc.to_xml();
    let pos = xml.find("<position name=\"posvolSlab\"").expect("position");
    let rot = xml.find("<rotation name=\"rotvolSlab\"").expect("rotation");
    assert!(pos < rot);
    assert!(xml.contains("<rotation name=\"rotvolSlab\" unit=\"deg\" x=\"0\" y=\"90\" z=\"0\"/>"));
}

#[test]
fn validate_rejects_duplicate_solids() {
    let mut doc = slab_doc();
    doc.add_solid(Solid::Box { name: "slab".to_string(), x: 2.0, y: 2.0, z: 2.0 });
    assert!(matches!(doc.validate(), Err(DocumentError::DuplicateSolid(name)) if name == "slab"));
}

#[test]
fn validate_rejects_unknown_solid_references() {
    let mut doc = Document::new();
    doc.add_volume(Volume::new("volGhost", Material::Air, "missing"));
    assert!(matches!(
        doc.validate(),
        Err(DocumentError::UnknownSolid { volume, solid }) if volume == "volGhost" && solid == "missing"
    ));
}

#[test]
fn validate_rejects_unknown_subtraction_constituents() {
    let mut doc = Document::new();
    doc.add_solid(Solid::Box { name: "outer".to_string(), x: 1.0, y: 1.0, z: 1.0 });
    doc.add_solid(Solid::Subtraction {
        name: "hollow".to_string(),
        first: "outer".to_string(),
        second: "missing".to_string(),
        position: Position::new("subpos", 0.0, 0.0, 0.0),
    });
    assert!(matches!(
        doc.validate(),
        Err(DocumentError::UnknownConstituent { constituent, .. }) if constituent == "missing"
    ));
}

#[test]
fn validate_requires_children_defined_before_their_parent() {
    let mut doc = Document::new();
    doc.add_solid(Solid::Box { name: "holder".to_string(), x: 1.0, y: 1.0, z: 1.0 });
    let mut holder = Volume::new("volHolder", Material::Air, "holder");
    holder.place(PhysVol::new("volLater"));
    doc.add_volume(holder);
    doc.add_volume(Volume::new("volLater", Material::Air, "holder"));
    assert!(matches!(
        doc.validate(),
        Err(DocumentError::UnplacedChild { parent, child })
            if parent == "volHolder" && child == "volLater"
    ));
}

#[test]
fn validate_checks_the_setup_world_reference() {
    let mut doc = slab_doc();
    doc.setup = Some(Setup {
        name: "Default".to_string(),
        version: "1.0".to_string(),
        world: "volNowhere".to_string(),
    });
    assert!(matches!(
        doc.validate(),
        Err(DocumentError::UnknownWorld(world)) if world == "volNowhere"
    ));
}
