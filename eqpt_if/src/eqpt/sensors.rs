//! # Environment Sensor Data
//!
//! Snapshot structure produced by the sensor acquisition layer. The executive only consumes the
//! values here - raw ADC reads, pin handling and unit conversion all live with the acquisition
//! process.

// ------------------------------------------------------------------------------------------------
// IMPORTS
// ------------------------------------------------------------------------------------------------

use serde::{Deserialize, Serialize};

// ------------------------------------------------------------------------------------------------
// CONSTANTS
// ------------------------------------------------------------------------------------------------

/// Distance value reported when the ultrasonic sensor gets no echo back.
///
/// The acquisition layer maps a ranging timeout to this large-but-finite value so that the
/// executive can treat it as an ordinary (extreme) reading rather than a fault.
pub const NO_ECHO_DISTANCE_CM: f64 = 999.0;

// ------------------------------------------------------------------------------------------------
// STRUCTS
// ------------------------------------------------------------------------------------------------

/// Sensor readings returned by the acquisition layer to the executive.
#[derive(Serialize, Deserialize, Debug, Clone, Copy)]
pub struct SensorData {
    /// Soil humidity.
    ///
    /// Units: percent
    pub soil_humidity_pct: f64,

    /// Water tank level.
    ///
    /// Units: percent
    pub water_level_pct: f64,

    /// Raw rain detector reading, uncalibrated.
    pub rain_analog: u16,

    /// Soil pH estimate.
    pub ph_value: f64,

    /// Distance to the nearest object ahead of the arm, or [`NO_ECHO_DISTANCE_CM`] if the last
    /// ranging attempt timed out.
    ///
    /// Units: centimeters
    pub distance_cm: f64,
}

// -----------------------------------------------------------------------------------------------
// IMPLS
// -----------------------------------------------------------------------------------------------

impl Default for SensorData {
    fn default() -> Self {
        // Until the first acquisition completes there is no echo to report
        Self {
            soil_humidity_pct: 0.0,
            water_level_pct: 0.0,
            rain_analog: 0,
            ph_value: 7.0,
            distance_cm: NO_ECHO_DISTANCE_CM,
        }
    }
}
