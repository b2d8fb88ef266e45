//! # Equipment interface crate.
//!
//! Provides the common interface definitions shared between the arm control
//! executive and the equipment-side processes (sensor acquisition and servo
//! actuation).

// ------------------------------------------------------------------------------------------------
// MODULES
// ------------------------------------------------------------------------------------------------

pub mod tc;

/// Command and data definitions for equipment (arm actuators and sensors)
pub mod eqpt;
