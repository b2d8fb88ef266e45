//! Parameters structure for ArmCtrl

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

use serde::Deserialize;

// ---------------------------------------------------------------------------
// DATA STRUCTURES
// ---------------------------------------------------------------------------

/// Parameters for Arm control.
#[derive(Debug, Deserialize)]
pub struct Params {
    // ---- GEOMETRY ----
    /// Vertical offset from the arm mounting plane to the shoulder axis.
    ///
    /// Units: centimeters
    pub link_1_length_cm: f64,

    /// Length of the upper arm segment (shoulder to elbow).
    ///
    /// Units: centimeters
    pub link_2_length_cm: f64,

    /// Length of the forearm segment (elbow to gripper).
    ///
    /// Units: centimeters
    pub link_3_length_cm: f64,

    // ---- SERVO CONVENTION ----
    /// Offset added to each solved angle, mapping the mathematical zero
    /// reference onto the servos' neutral midpoint.
    ///
    /// Units: degrees
    pub servo_neutral_offset_deg: f64,

    // ---- SOLVER ----
    /// Maximum number of residual inspection iterations per solve.
    pub max_solver_iterations: u32,

    /// Residual magnitude below which the inspection loop exits early.
    pub residual_tolerance: f64,

    /// Fixed temperature assumed for the thermal drift estimate.
    ///
    /// Units: degrees Celsius
    pub assumed_temperature_degc: f64,

    /// Thermal drift coefficient of the servo train.
    ///
    /// Units: 1/degrees Celsius
    pub thermal_coefficient: f64,

    // ---- AUTO TRACKING ----
    /// Lowest distance reading accepted by the target mapper, shorter
    /// readings are treated as this value.
    ///
    /// Units: centimeters
    pub min_track_distance_cm: f64,

    /// Highest distance reading accepted by the target mapper, longer
    /// readings (including the no-echo sentinel) are treated as this value.
    ///
    /// Units: centimeters
    pub max_track_distance_cm: f64,

    /// Base approach height of the tracking target.
    ///
    /// Units: centimeters
    pub approach_height_base_cm: f64,

    /// Divisor of the distance-proportional part of the approach height.
    pub approach_height_divisor: f64,

    /// Distance below which the gripper closes on the tracked object.
    ///
    /// Units: centimeters
    pub grip_distance_cm: f64,

    /// Gripper angle demanded when closing.
    ///
    /// Units: degrees
    pub gripper_closed_deg: f64,

    /// Gripper angle demanded when open.
    ///
    /// Units: degrees
    pub gripper_open_deg: f64,
}

// ---------------------------------------------------------------------------
// IMPLEMENTATIONS
// ---------------------------------------------------------------------------

impl Default for Params {
    fn default() -> Self {
        Self {
            link_1_length_cm: 10.5,
            link_2_length_cm: 15.0,
            link_3_length_cm: 12.0,
            servo_neutral_offset_deg: 90.0,
            max_solver_iterations: 50,
            residual_tolerance: 0.000001,
            assumed_temperature_degc: 45.0,
            thermal_coefficient: 0.0024,
            min_track_distance_cm: 5.0,
            max_track_distance_cm: 30.0,
            approach_height_base_cm: 5.0,
            approach_height_divisor: 5.0,
            grip_distance_cm: 10.0,
            gripper_closed_deg: 160.0,
            gripper_open_deg: 90.0,
        }
    }
}
