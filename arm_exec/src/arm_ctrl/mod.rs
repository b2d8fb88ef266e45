//! Arm control module

// ---------------------------------------------------------------------------
// MODULES
// ---------------------------------------------------------------------------

mod auto_track;
mod inverse_kinematics;
mod params;
mod state;

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

// Internal
pub use params::*;
pub use state::*;

// ---------------------------------------------------------------------------
// DATA STRUCTURES
// ---------------------------------------------------------------------------

/// Joint angles produced by an inverse kinematics solve.
///
/// Angles are in the servo frame (degrees, neutral offset applied) and are not yet limited to the
/// joints' travel ranges - that is the servo control module's responsibility.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct JointAngles {
    /// Base rotation.
    ///
    /// Units: degrees
    pub theta_1_deg: f64,

    /// Shoulder elevation.
    ///
    /// Units: degrees
    pub theta_2_deg: f64,

    /// Elbow flexion.
    ///
    /// Units: degrees
    pub theta_3_deg: f64,
}

// ---------------------------------------------------------------------------
// ENUMERATIONS
// ---------------------------------------------------------------------------

/// Possible errors that can occur during ArmCtrl operation.
#[derive(Debug, thiserror::Error)]
pub enum ArmCtrlError {
    #[error("Expected there to be an arm command but couldn't find one")]
    NoArmCmd,
}
