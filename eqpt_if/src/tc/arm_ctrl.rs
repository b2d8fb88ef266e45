//! # Arm control telecommands

// ------------------------------------------------------------------------------------------------
// IMPORTS
// ------------------------------------------------------------------------------------------------

use crate::eqpt::arm::JointId;
use serde::{Deserialize, Serialize};

// ------------------------------------------------------------------------------------------------
// STRUCTS
// ------------------------------------------------------------------------------------------------

/// Payload of a direct single-joint command.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct ServoCmd {
    /// The joint to command.
    pub joint: JointId,

    /// Demanded absolute position of the joint.
    ///
    /// The demand is not required to be within the joint's travel limits - the commander clamps
    /// it before actuation.
    ///
    /// Units: degrees
    pub angle_deg: f64,
}

// ------------------------------------------------------------------------------------------------
// ENUMS
// ------------------------------------------------------------------------------------------------

/// A command that can be completed by arm control.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum ArmCmd {
    /// Rotate a single joint to the demanded angular position.
    Servo(ServoCmd),

    /// Stop the arm, maintaining the current joint angles.
    Stop,
}
