//! As-built engineering measurements and derived dimensions.
//!
//! Every number here comes from the detector hall survey or from the donor
//! hardware data sheets. All linear dimensions are centimeters, angles are
//! degrees. Derived quantities (module envelopes, shell dimensions, section
//! anchors) are exposed as methods so the arithmetic lives in one place.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A parameter value the placement arithmetic cannot work with.
#[derive(Debug, Error)]
pub enum ParamsError {
    #[error("{0} must be at least 1")]
    ZeroCount(&'static str),
    #[error("{0} must list at least one cut length")]
    EmptyCutTable(&'static str),
}

/// Full parameter set for the CRT geometry build pass.
///
/// `Default` is the as-built configuration. The struct deserializes with
/// container-level defaults, so a JSON overrides file only needs to name the
/// fields it changes.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GeometryParams {
    // Warm vessel envelope, including support feet.
    pub wv_width: f64,
    pub wv_height: f64,
    pub wv_length: f64,
    /// Height of the bottom of the WV foot w.r.t. the pit floor.
    pub wv_foot_elevation: f64,
    /// Width of the roughly square WV support-feet islands.
    pub island_width: f64,
    /// Vertical padding of the shell void around the warm vessel.
    pub wv_pad_y: f64,

    // Floor-to-component survey measurements.
    pub top_crt_beam_to_floor: f64,
    /// Horizontal center-to-center spacing between top CRT support beams.
    pub crt_beam_spacing: f64,
    /// Distance between the bottom CRT modules and the pit floor.
    pub bottom_roller_height: f64,
    /// Set by the fiberglass Unistrut standoffs on the WV walls.
    pub side_crt_wv_offset: f64,
    /// Unistrut vertical support posts, dimension normal to the CRT plane.
    pub side_crt_post_width: f64,
    /// Set by the Unistrut bracket shelf.
    pub side_crt_post_spacing: f64,
    pub side_crt_shelf_thick: f64,

    // South wall corrections for the cut-module rows.
    /// Removes the residual overlap between two cut modules.
    pub cut_overlap: f64,
    /// Gap between two horizontal south-wall cut modules.
    pub cut_gap: f64,
    /// Overlap allowance between the two horizontal cut-module columns.
    pub cross_two_module: f64,
    /// Gap between the two modules sharing one shelf.
    pub separate_two_module: f64,
    /// 19 inch offset of the topmost module (aluminium pipes in the way).
    pub offset_on_top_module: f64,
    /// The late-addition vertical module (191 in), shorter than the 400 cm rest.
    pub vertical_module_length: f64,

    // Top CRT support beams, wide flange W10 x 49. Web and flange thickness
    // are adjusted from catalog values so the modeled area matches the true
    // cross-section mass.
    pub beam_length: f64,
    pub beam_height: f64,
    pub beam_width: f64,
    pub beam_flange_thick: f64,
    pub beam_web_thick: f64,
    /// True catalog cross-section area, for the test-mode diagnostic.
    pub beam_true_area: f64,
    pub n_beams: usize,

    // MINOS family strips (long single-layer modules).
    pub minos_strip_thick: f64,
    pub minos_strip_width: f64,
    pub minos_strip_length: f64,
    pub minos_straight_snout: f64,
    pub minos_bend_snout: f64,
    pub n_strips_minos: usize,

    // CERN family strips (square double-layer modules, asymmetric thickness).
    pub cern_strip_width: f64,
    pub cern_strip_length: f64,
    pub cern_strip_thick_top: f64,
    pub cern_strip_thick_bot: f64,
    pub n_strips_cern: usize,

    // Double Chooz family strips (double layer, half-pitch offset).
    pub dc_strip_width: f64,
    pub dc_strip_thick: f64,
    pub dc_strip_length: f64,
    pub n_strips_dc: usize,

    // Padding between strips and module skins (Al thickness) and between
    // placed components.
    pub pad_minos: f64,
    pub pad_cern: f64,
    pub pad_dc: f64,
    pub pad_module: f64,
    pub pad_strip: f64,
    pub pad_tagger: f64,

    // MINOS mounting.
    /// Edge-to-edge distance between adjacent side-CRT layers.
    pub layer_space: f64,
    /// Lateral MINOS modules in a single layer of a single stack.
    pub n_mod_stack: usize,
    /// Vertical modules in a single layer of the south wall.
    pub n_mod_south_vertical: usize,
    /// Offset from the outermost WV extent to the center of a rolling stack.
    pub side_crt_roll_offset: f64,
    pub side_crt_north_wall_to_floor: f64,

    // DC mounting.
    /// Foam spacer between DC modules in the rows of five.
    pub dc_spacer: f64,
    /// Longitudinal extent shared by the rows of five.
    pub dc_row_span: f64,
    /// Longitudinal clearance around the central island pair.
    pub dc_island_gap: f64,
    /// Vertical position of the bottom tagger in the enclosure.
    pub dc_position_y: f64,

    // CERN mounting.
    pub cern_mod_space: f64,
    pub n_top_x: usize,
    pub n_top_z: usize,
    pub n_slope_lat: usize,
    pub n_slope_front: usize,
    /// Rim inclination w.r.t. vertical, degrees.
    pub slope_inclination: f64,
    pub cern_rim_south_wv_offset: f64,
    /// North rim sits this much higher than the south rim.
    pub cern_rim_north_rise: f64,
    /// Clearance between the WV wall and the lateral rims.
    pub cern_rim_lat_gap: f64,
    /// Shim between the support beams and the rim modules.
    pub cern_beam_shim: f64,

    // Cut MINOS module lengths including snout; index is the row number
    // starting from the bottom.
    pub minos_cut_north: Vec<f64>,
    pub minos_cut_southeast: Vec<f64>,
    pub minos_cut_southwest: Vec<f64>,
}

impl Default for GeometryParams {
    fn default() -> Self {
        Self {
            wv_width: 1031.8,
            wv_height: 627.4,
            wv_length: 2268.8,
            wv_foot_elevation: 10.16,
            island_width: 118.0,
            wv_pad_y: 43.0,

            top_crt_beam_to_floor: 970.8,
            crt_beam_spacing: 92.71,
            bottom_roller_height: 3.02,
            side_crt_wv_offset: 4.13,
            side_crt_post_width: 4.13,
            side_crt_post_spacing: 4.13,
            side_crt_shelf_thick: 0.56,

            cut_overlap: 0.0065,
            cut_gap: 0.005,
            cross_two_module: 10.7,
            separate_two_module: 0.6,
            offset_on_top_module: 48.26,
            vertical_module_length: 485.14,

            beam_length: 1132.84,
            beam_height: 25.3,
            beam_width: 25.4,
            beam_flange_thick: 1.434,
            beam_web_thick: 0.89407,
            beam_true_area: 92.90304,
            n_beams: 29,

            minos_strip_thick: 1.0,
            minos_strip_width: 4.1,
            minos_strip_length: 800.0,
            minos_straight_snout: 37.5,
            minos_bend_snout: 26.5,
            n_strips_minos: 20,

            cern_strip_width: 23.0,
            cern_strip_length: 184.0,
            cern_strip_thick_top: 1.0,
            cern_strip_thick_bot: 1.5,
            n_strips_cern: 8,

            dc_strip_width: 5.0,
            dc_strip_thick: 1.0,
            dc_strip_length: 322.5,
            n_strips_dc: 32,

            pad_minos: 0.05,
            pad_cern: 0.1,
            pad_dc: 0.05,
            pad_module: 0.1,
            pad_strip: 0.01,
            pad_tagger: 0.001,

            layer_space: 8.27,
            n_mod_stack: 9,
            n_mod_south_vertical: 10,
            side_crt_roll_offset: 44.29,
            side_crt_north_wall_to_floor: 152.2,

            dc_spacer: 32.6,
            dc_row_span: 481.8,
            dc_island_gap: 181.8,
            dc_position_y: -480.135,

            cern_mod_space: 0.2,
            n_top_x: 6,
            n_top_z: 14,
            n_slope_lat: 14,
            n_slope_front: 6,
            slope_inclination: 90.0,
            cern_rim_south_wv_offset: 34.0,
            cern_rim_north_rise: 29.0,
            cern_rim_lat_gap: 38.0,
            cern_beam_shim: 2.54,

            minos_cut_north: vec![256.54, 309.9, 309.9, 508.19, 508.19, 508.19],
            minos_cut_southeast: vec![497.84; 9],
            minos_cut_southwest: vec![
                497.84, 497.84, 497.84, 497.84, 497.84, 497.84, 325.12, 325.12, 325.12,
            ],
        }
    }
}

impl GeometryParams {
    /// Reject counts and cut tables the closed-form placement arithmetic
    /// differences over. The as-built defaults always pass; an overrides
    /// file can zero these.
    pub fn validate(&self) -> Result<(), ParamsError> {
        let counts = [
            ("n_beams", self.n_beams),
            ("n_strips_minos", self.n_strips_minos),
            ("n_strips_cern", self.n_strips_cern),
            ("n_strips_dc", self.n_strips_dc),
            ("n_mod_stack", self.n_mod_stack),
            ("n_mod_south_vertical", self.n_mod_south_vertical),
            ("n_top_x", self.n_top_x),
            ("n_top_z", self.n_top_z),
            ("n_slope_lat", self.n_slope_lat),
            ("n_slope_front", self.n_slope_front),
        ];
        for (field, n) in counts {
            if n == 0 {
                return Err(ParamsError::ZeroCount(field));
            }
        }
        let tables = [
            ("minos_cut_north", &self.minos_cut_north),
            ("minos_cut_southeast", &self.minos_cut_southeast),
            ("minos_cut_southwest", &self.minos_cut_southwest),
        ];
        for (field, table) in tables {
            if table.is_empty() {
                return Err(ParamsError::EmptyCutTable(field));
            }
        }
        Ok(())
    }

    /// Depth of one side-CRT stack: three posts and two bracket gaps.
    pub fn side_crt_stack_depth(&self) -> f64 {
        3.0 * self.side_crt_post_width + 2.0 * self.side_crt_post_spacing
    }

    /// Mean of the straight and bent snout lengths: the stretch of a MINOS
    /// module used for fiber routing, with no scintillator.
    pub fn minos_snout_length(&self) -> f64 {
        0.5 * (self.minos_straight_snout + self.minos_bend_snout)
    }

    /// Outer length of a full MINOS module.
    pub fn minos_mod_length(&self) -> f64 {
        self.minos_strip_length + 2.0 * self.pad_minos + 2.0 * self.pad_strip
    }

    /// Outer width of a MINOS module (the stacked-strip direction).
    pub fn minos_mod_width(&self) -> f64 {
        self.minos_strip_width * self.n_strips_minos as f64
            + 2.0 * self.pad_minos
            + (self.n_strips_minos + 1) as f64 * self.pad_strip
    }

    /// Outer height (thickness) of a MINOS module.
    pub fn minos_mod_height(&self) -> f64 {
        self.minos_strip_thick + 2.0 * self.pad_minos + 2.0 * self.pad_strip
    }

    /// Outer width of a CERN module; the modules are square so this is also
    /// their length.
    pub fn cern_mod_width(&self) -> f64 {
        self.cern_strip_width * self.n_strips_cern as f64
            + 2.0 * self.pad_cern
            + (self.n_strips_cern + 1) as f64 * self.pad_strip
    }

    /// Outer height of a CERN module (two layers of unequal thickness).
    pub fn cern_mod_height(&self) -> f64 {
        self.cern_strip_thick_top + self.cern_strip_thick_bot
            + 2.0 * self.pad_cern
            + 3.0 * self.pad_strip
    }

    /// Outer height of a DC module.
    pub fn dc_mod_height(&self) -> f64 {
        2.0 * self.dc_strip_thick + 2.0 * self.pad_dc + 3.0 * self.pad_strip
    }

    /// Outer width of a DC module. The second layer is offset by half a strip
    /// pitch, hence the extra half strip.
    pub fn dc_mod_width(&self) -> f64 {
        self.dc_strip_width * (self.n_strips_dc as f64 + 0.5)
            + 2.0 * self.pad_dc
            + (self.n_strips_dc + 2) as f64 * self.pad_strip
    }

    /// Length of the CERN roof along z.
    pub fn cern_roof_length(&self) -> f64 {
        self.n_top_z as f64 * self.cern_mod_width()
            + (self.n_top_z - 1) as f64 * self.cern_mod_space
    }

    /// Vertical extent of the CRT shell.
    pub fn shell_y(&self) -> f64 {
        1.1 * self.cern_mod_height() + self.top_crt_beam_to_floor
            - 0.9 * self.bottom_roller_height
    }

    /// Vertical center of the south MINOS wall. The trailing riser terms are
    /// survey fudges measured after installation.
    pub fn minos_south_y(&self) -> f64 {
        -0.5 * self.shell_y() + 0.5 * self.side_stack_height(self.n_mod_stack)
            + self.wv_foot_elevation
            + 18.0
    }

    /// Vertical center of the fixed east/west stacks.
    pub fn minos_lat_fix_y(&self) -> f64 {
        -0.5 * self.shell_y() + 0.5 * self.side_stack_height(self.n_mod_stack)
            + self.wv_foot_elevation
            + 5.0
    }

    /// Vertical center of the rolling (center) east/west stacks.
    pub fn minos_lat_roll_y(&self) -> f64 {
        self.minos_lat_fix_y() - 0.5 * self.minos_mod_width() + 10.0
    }

    /// Inactive overhang of the south-stack modules past the tagger face.
    pub fn minos_lat_south_active_overhang(&self) -> f64 {
        2.0 * self.minos_snout_length()
    }

    pub fn minos_lat_south_z(&self) -> f64 {
        -0.5 * self.wv_length + 0.5 * self.minos_mod_length()
            - 0.5 * self.minos_lat_south_active_overhang()
    }

    pub fn minos_lat_north_z(&self) -> f64 {
        0.5 * self.wv_length - 0.5 * self.minos_mod_length()
    }

    pub fn minos_lat_cent_z(&self) -> f64 {
        0.5 * (-0.5 * self.minos_lat_south_active_overhang()
            + self.minos_lat_south_z()
            + self.minos_lat_north_z())
    }

    /// Lateral clearance the south wall needs for the snouts.
    pub fn side_crt_south_wall_lat_offset(&self) -> f64 {
        1.1 * self.minos_snout_length()
    }

    /// Vertical center of the north MINOS wall.
    pub fn minos_north_y(&self) -> f64 {
        let ny = self.minos_cut_north.len();
        -0.5 * self.shell_y() + 0.5 * self.side_stack_height(ny) - self.pad_tagger
            + self.side_crt_north_wall_to_floor
            - 0.9 * self.bottom_roller_height
    }

    /// Longitudinal offset of the DC rows of five.
    pub fn dc_long_off5(&self) -> f64 {
        (3.0 * self.island_width + self.dc_row_span) * 0.5 + self.dc_island_gap
    }

    /// Longitudinal offset of the central DC pairs.
    pub fn dc_long_off2(&self) -> f64 {
        (self.island_width + self.dc_island_gap) * 0.5
    }

    pub fn cern_top_y(&self) -> f64 {
        0.5 * self.shell_y() - 0.6 * self.cern_mod_height()
    }

    pub fn cern_rim_south_y(&self) -> f64 {
        self.cern_top_y() - 0.5 * self.cern_mod_height() - self.beam_height
            - self.cern_beam_shim
            - 0.5 * self.cern_mod_width()
    }

    pub fn cern_rim_south_z(&self) -> f64 {
        -0.5 * self.wv_length - self.cern_rim_south_wv_offset
    }

    pub fn cern_rim_north_y(&self) -> f64 {
        self.cern_rim_south_y() + self.cern_rim_north_rise
    }

    pub fn cern_rim_north_z(&self) -> f64 {
        self.cern_roof_length() + self.cern_rim_south_z() + 0.6 * self.cern_mod_height()
            + self.crt_beam_spacing
    }

    /// Roof center, assuming the south roof edge is aligned with the south
    /// rim center in z.
    pub fn cern_top_z(&self) -> f64 {
        self.cern_rim_south_z() + 0.5 * self.cern_roof_length()
    }

    pub fn cern_rim_lat_x(&self) -> f64 {
        0.5 * self.wv_width + 0.5 * self.cern_mod_height() + self.cern_rim_lat_gap
    }

    pub fn cern_rim_lat_y(&self) -> f64 {
        self.cern_rim_south_y()
    }

    pub fn cern_rim_lat_z(&self) -> f64 {
        self.cern_top_z()
    }

    /// Southernmost z the side CRT can reach, snouts included.
    fn south_reach(&self) -> f64 {
        self.minos_lat_south_z()
            - (self.minos_mod_length()
                + self.minos_lat_south_active_overhang()
                + self.side_crt_south_wall_lat_offset())
                * 0.5
    }

    /// Longitudinal extent of the CRT shell.
    pub fn shell_z(&self) -> f64 {
        let south_edge = (self.cern_rim_south_z() + 0.5 * self.cern_mod_height())
            .min(self.south_reach());
        1.01 * (0.5 * self.cern_mod_height() + self.cern_rim_north_z() - south_edge)
    }

    /// Longitudinal offset between the shell center and the WV center.
    pub fn shell_wv_offset(&self) -> f64 {
        let base = self.shell_z() * 0.5 / 1.01 - self.wv_length * 0.5;
        if self.cern_rim_south_z() + 0.5 * self.cern_mod_height() < self.south_reach() {
            base - self.cern_rim_south_wv_offset
        } else {
            base - self.minos_lat_south_active_overhang()
        }
    }

    /// Height of a side stack of `n` MINOS modules, shelves and tagger pads
    /// included.
    fn side_stack_height(&self, n: usize) -> f64 {
        n as f64 * self.minos_mod_width()
            + (n - 1) as f64 * self.side_crt_shelf_thick
            + 2.0 * self.pad_tagger
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn minos_module_envelope_matches_hand_calculation() {
        let p = GeometryParams::default();
        assert!((p.minos_mod_width() - 82.31).abs() < 1e-9);
        assert!((p.minos_mod_length() - 800.12).abs() < 1e-9);
        assert!((p.minos_mod_height() - 1.12).abs() < 1e-9);
    }

    #[test]
    fn cern_module_is_square() {
        let p = GeometryParams::default();
        // The top-tagger pitch derives from the strip length while the module
        // width derives from the strip count; both must agree.
        let pitch = p.cern_strip_length + 2.0 * p.pad_cern
            + (p.n_strips_cern + 1) as f64 * p.pad_strip;
        assert!((p.cern_mod_width() - pitch).abs() < 1e-9);
    }

    #[test]
    fn shell_offset_uses_south_branch_for_default_params() {
        let p = GeometryParams::default();
        // With as-built numbers the MINOS side wall reaches further south
        // than the CERN south rim, so the overhang correction applies.
        let base = p.shell_z() * 0.5 / 1.01 - p.wv_length * 0.5;
        assert!((p.shell_wv_offset() - (base - p.minos_lat_south_active_overhang())).abs() < 1e-9);
    }

    #[test]
    fn overrides_fill_missing_fields_with_defaults() {
        let p: GeometryParams = serde_json::from_str(r#"{"wv_width": 1000.0}"#).unwrap();
        assert_eq!(p.wv_width, 1000.0);
        assert_eq!(p.wv_length, GeometryParams::default().wv_length);
        assert_eq!(p.minos_cut_north.len(), 6);
    }

    #[test]
    fn as_built_parameters_validate() {
        assert!(GeometryParams::default().validate().is_ok());
    }

    #[test]
    fn validate_rejects_zero_module_counts() {
        let mut p = GeometryParams::default();
        p.n_mod_stack = 0;
        assert!(matches!(p.validate(), Err(ParamsError::ZeroCount("n_mod_stack"))));

        let mut p = GeometryParams::default();
        p.n_top_z = 0;
        assert!(matches!(p.validate(), Err(ParamsError::ZeroCount("n_top_z"))));
    }

    #[test]
    fn validate_rejects_empty_cut_tables() {
        let mut p = GeometryParams::default();
        p.minos_cut_north.clear();
        assert!(matches!(p.validate(), Err(ParamsError::EmptyCutTable("minos_cut_north"))));
    }
}
