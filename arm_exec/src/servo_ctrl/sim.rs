//! Simulated actuator backend

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

// External
use log::trace;

// Internal
use super::ServoBackend;
use eqpt_if::eqpt::arm::JointId;

// ---------------------------------------------------------------------------
// DATA STRUCTURES
// ---------------------------------------------------------------------------

/// Actuator backend which logs writes instead of driving hardware.
///
/// Used for development runs on a host machine. The hardware backend lives
/// with the actuation executable and implements the same trait.
#[derive(Default)]
pub struct SimServoBackend;

// ---------------------------------------------------------------------------
// IMPLEMENTATIONS
// ---------------------------------------------------------------------------

impl ServoBackend for SimServoBackend {
    fn write_angle(&mut self, joint: JointId, angle_deg: f64) {
        trace!("{:?} servo <- {:.1} deg", joint, angle_deg);
    }
}
