//! # Servo Control Module
//!
//! This module keeps the book on the arm's joint states (current angle and
//! travel limits) and applies demanded angles to the actuators. It is the
//! only place allowed to mutate a joint's current angle, which is what makes
//! the travel-limit invariant and the elbow/shoulder coupling rule hold.

// ------------------------------------------------------------------------------------------------
// MODULES
// ------------------------------------------------------------------------------------------------

mod bank;
mod params;
mod sim;

// ------------------------------------------------------------------------------------------------
// IMPORTS
// ------------------------------------------------------------------------------------------------

// External
use serde::{Deserialize, Serialize};

// Internal
pub use bank::*;
pub use params::*;
pub use sim::*;

use eqpt_if::eqpt::arm::{JointId, NUM_JOINTS};

// ------------------------------------------------------------------------------------------------
// TRAITS
// ------------------------------------------------------------------------------------------------

/// Trait to provide a unified API for the actuator backends.
///
/// Writes are fire-and-forget: the servo hardware gives no confirmation, so
/// the backend cannot fail from the commander's point of view. Hardware
/// backends live with the actuation executable, this crate only ships the
/// simulated one.
pub trait ServoBackend {
    /// Write an angle to a joint's actuator.
    ///
    /// ## Arguments
    /// - `joint` - The joint to actuate
    /// - `angle_deg` - The angle to write. The commander guarantees this is
    ///   within the joint's travel limits.
    fn write_angle(&mut self, joint: JointId, angle_deg: f64);
}

// ------------------------------------------------------------------------------------------------
// STRUCTS
// ------------------------------------------------------------------------------------------------

/// Status report for a full demand-set application.
#[derive(Clone, Copy, Default, Serialize, Deserialize, Debug)]
pub struct StatusReport {
    /// Flags raised for joints whose demands were limited to their travel
    /// range, indexed in canonical joint order.
    pub pos_limited: [bool; NUM_JOINTS],

    /// Raised when an elbow demand dragged the shoulder with it.
    pub coupling_applied: bool,
}

/// Report for a single joint application.
#[derive(Clone, Copy, Default, Debug)]
pub struct JointApplyReport {
    /// The demand was limited to the joint's travel range.
    pub pos_limited: bool,

    /// The shoulder was re-commanded as a side effect of this demand.
    pub coupling_applied: bool,
}
