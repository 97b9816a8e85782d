//! tagger-core
//!
//! Core library for generating the cosmic-ray-tagger geometry: a GDML
//! document describing every tagger, module, and scintillator strip, plus
//! the module-to-front-end-board channel map that readout software consumes.
//!
//! This crate defines the parameter set (params), the geometry object model
//! and XML writer (gdml), the solid dedup registry (registry), the builders
//! that assemble the detector (builder), and the file writers (output).
//!
//! The goal is to keep all substantive logic here so it is fully testable and
//! reusable from multiple frontends.

pub mod builder;
pub mod gdml;
pub mod model;
pub mod output;
pub mod params;
pub mod registry;

/// Returns the library version as encoded at compile time.
///
/// Useful for tests and for frontends to report consistent version info.
pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
