//! Parameters structure for ServoCtrl

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

use eqpt_if::eqpt::arm::NUM_JOINTS;
use serde::Deserialize;

// ---------------------------------------------------------------------------
// DATA STRUCTURES
// ---------------------------------------------------------------------------

/// Parameters for Servo control.
#[derive(Debug, Deserialize)]
pub struct Params {
    // ---- CAPABILITIES ----
    /// Minimum joint absolute position, indexed in canonical joint order.
    ///
    /// Units: degrees
    pub min_limit_deg: [f64; NUM_JOINTS],

    /// Maximum joint absolute position, indexed in canonical joint order.
    ///
    /// Units: degrees
    pub max_limit_deg: [f64; NUM_JOINTS],

    /// Joint positions commanded at initialisation, indexed in canonical
    /// joint order.
    ///
    /// Units: degrees
    pub init_angle_deg: [f64; NUM_JOINTS],

    // ---- COUPLING ----
    /// Elbow moves smaller than this do not disturb the shoulder. The
    /// deadband stops sensor jitter from rippling through the linkage.
    ///
    /// Units: degrees
    pub coupling_deadband_deg: f64,

    /// Fraction of an elbow move imparted onto the shoulder by the
    /// mechanical linkage between the two joints.
    pub coupling_ratio: f64,
}

// ---------------------------------------------------------------------------
// IMPLEMENTATIONS
// ---------------------------------------------------------------------------

impl Default for Params {
    fn default() -> Self {
        Self {
            min_limit_deg: [0.0; NUM_JOINTS],
            max_limit_deg: [180.0; NUM_JOINTS],
            init_angle_deg: [90.0; NUM_JOINTS],
            coupling_deadband_deg: 5.0,
            coupling_ratio: 0.3,
        }
    }
}
