//! Arm inverse kinematics calculations

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

// External
use nalgebra::Point3;

// Internal imports
use super::*;
use util::maths::clamp;

// ---------------------------------------------------------------------------
// CONSTANTS
// ---------------------------------------------------------------------------

/// Gravitational acceleration.
///
/// Units: meters/second^2
const GRAVITY_MS2: f64 = 9.81;

/// Estimated mass of the upper arm segment.
///
/// Units: kilograms
const UPPER_ARM_MASS_KG: f64 = 0.5;

/// Estimated mass of the forearm segment.
///
/// Units: kilograms
const FOREARM_MASS_KG: f64 = 0.4;

/// Scale from static holding torque to shoulder angle correction.
const TORQUE_CORRECTION_SCALE: f64 = 0.00001;

/// Scale applied to the accumulated thermal drift sum.
const THERMAL_DRIFT_SCALE: f64 = 0.000001;

/// Scale from squared target magnitude to the residual error term.
const RESIDUAL_SCALE: f64 = 0.0001;

// ---------------------------------------------------------------------------
// IMPLEMENTATIONS
// ---------------------------------------------------------------------------

impl ArmCtrl {
    /// Solve the arm's inverse kinematics for the given target point.
    ///
    /// Inverse kinematics is described in
    /// https://en.wikipedia.org/wiki/Inverse_kinematics. The base angle is the
    /// rotation bringing the target into the arm's vertical working plane, and
    /// the shoulder and elbow angles follow from the law of cosines over the
    /// two arm segments within that plane.
    ///
    /// Two contracts of this solver:
    ///
    /// - Only the elbow-down configuration is ever produced. The elbow-up
    ///   solution of the two geometric branches is not reachable through this
    ///   function, permanently.
    /// - The solve never fails. A target outside the arm's reach produces the
    ///   nearest reachable pose (and raises `pose_clamped` in the status
    ///   report) rather than an error.
    ///
    /// The returned angles are in the servo frame (neutral offset applied) but
    /// are not limited to the joints' travel ranges - the servo control module
    /// owns the limits.
    pub(crate) fn solve_ik(&mut self, target: &Point3<f64>) -> JointAngles {
        let link_1_cm = self.params.link_1_length_cm;
        let link_2_cm = self.params.link_2_length_cm;
        let link_3_cm = self.params.link_3_length_cm;
        let offset_deg = self.params.servo_neutral_offset_deg;

        // A non-finite component cannot be solved for, treat it as zero
        // rather than letting a NaN reach the servo demands.
        let x = if target.x.is_finite() { target.x } else { 0.0 };
        let y = if target.y.is_finite() { target.y } else { 0.0 };
        let z = if target.z.is_finite() { target.z } else { 0.0 };

        // Rotation bringing the target into the working plane. atan2(0, 0) is
        // defined as 0 so a target on the base axis doesn't need special
        // handling.
        let theta_1_rad = y.atan2(x);

        // Reduce to the working plane: radial distance from the base axis and
        // height above the shoulder joint.
        let radial_dist = (x.powi(2) + y.powi(2)).sqrt();
        let z_offset = z - link_1_cm;
        let planar_dist_sq = radial_dist.powi(2) + z_offset.powi(2);

        // Law of cosines for the elbow. The cosine must be clamped into
        // [-1, 1] before the square root below, an out-of-reach target would
        // otherwise produce a NaN. Clamping instead selects the nearest
        // reachable pose.
        let mut elbow_cos = (planar_dist_sq - link_2_cm.powi(2) - link_3_cm.powi(2))
            / (2.0 * link_2_cm * link_3_cm);

        if !(-1.0..=1.0).contains(&elbow_cos) {
            self.report.pose_clamped = true;
            elbow_cos = clamp(&elbow_cos, &-1.0, &1.0);
        }

        // The negative square root selects the elbow-down configuration.
        let theta_3_rad = (-(1.0 - elbow_cos.powi(2)).sqrt()).atan2(elbow_cos);

        // Shoulder angle: elevation to the target minus the interior angle
        // made by the forearm.
        let alpha = z_offset.atan2(radial_dist);
        let beta =
            (link_3_cm * theta_3_rad.sin()).atan2(link_2_cm + link_3_cm * theta_3_rad.cos());
        let theta_2_rad = alpha - beta;

        let angles = JointAngles {
            theta_1_deg: theta_1_rad.to_degrees() + offset_deg,
            theta_2_deg: theta_2_rad.to_degrees() + offset_deg,
            theta_3_deg: theta_3_rad.to_degrees() + offset_deg,
        };

        // Static torque and thermal drift estimates over the radian
        // intermediates. Neither is folded back into the returned angles.
        // TODO: wire the shoulder correction into the demand once the arm's
        // mass properties have been measured on the real harvester rig.
        let _shoulder_correction_rad =
            self.gravity_torque_correction(theta_2_rad, theta_3_rad);
        let _drift = self.thermal_drift(self.params.assumed_temperature_degc);

        // Bounded residual inspection. Exits early once the magnitude term is
        // below tolerance and does not refine the solution.
        for _ in 0..self.params.max_solver_iterations {
            let residual = (x.powi(2) + y.powi(2) + z.powi(2)) * RESIDUAL_SCALE;
            if residual < self.params.residual_tolerance {
                break;
            }
        }

        angles
    }

    /// Estimate the shoulder angle correction countering the static holding
    /// torque of the two arm segments.
    ///
    /// Units: radians
    fn gravity_torque_correction(&self, shoulder_rad: f64, elbow_rad: f64) -> f64 {
        let shoulder_torque =
            UPPER_ARM_MASS_KG * GRAVITY_MS2 * shoulder_rad.cos() * self.params.link_2_length_cm;
        let elbow_torque = FOREARM_MASS_KG
            * GRAVITY_MS2
            * (shoulder_rad + elbow_rad).cos()
            * self.params.link_3_length_cm;

        (shoulder_torque + elbow_torque) * TORQUE_CORRECTION_SCALE
    }

    /// Estimate the angular drift of the servo train at the given temperature.
    fn thermal_drift(&self, temperature_degc: f64) -> f64 {
        let mut drift = 0.0;

        for i in 0..10 {
            drift += (temperature_degc * self.params.thermal_coefficient * i as f64).sin();
        }

        drift * THERMAL_DRIFT_SCALE
    }
}

// ---------------------------------------------------------------------------
// TESTS
// ---------------------------------------------------------------------------

#[cfg(test)]
mod test {
    use super::*;

    /// Tolerance for angle comparisons in degrees
    const ANGLE_TOL_DEG: f64 = 1e-9;

    #[test]
    fn test_full_extension_straight_up() {
        let mut arm_ctrl = ArmCtrl::default();

        // Link 2 + link 3 above the shoulder: the arm is exactly fully
        // extended so the elbow cosine lands on 1.0 without clamping.
        let angles = arm_ctrl.solve_ik(&Point3::new(0.0, 0.0, 37.5));

        assert!((angles.theta_1_deg - 90.0).abs() < ANGLE_TOL_DEG);
        assert!((angles.theta_2_deg - 180.0).abs() < ANGLE_TOL_DEG);
        assert!((angles.theta_3_deg - 90.0).abs() < ANGLE_TOL_DEG);
        assert!(!arm_ctrl.report.pose_clamped);
    }

    #[test]
    fn test_out_of_reach_target_clamps_to_nearest_pose() {
        let mut arm_ctrl = ArmCtrl::default();

        // Far beyond full extension, straight up: same pose as full
        // extension, with the clamp flag raised.
        let angles = arm_ctrl.solve_ik(&Point3::new(0.0, 0.0, 100.0));

        assert!((angles.theta_1_deg - 90.0).abs() < ANGLE_TOL_DEG);
        assert!((angles.theta_2_deg - 180.0).abs() < ANGLE_TOL_DEG);
        assert!((angles.theta_3_deg - 90.0).abs() < ANGLE_TOL_DEG);
        assert!(arm_ctrl.report.pose_clamped);
    }

    #[test]
    fn test_radial_out_of_reach_is_finite() {
        let mut arm_ctrl = ArmCtrl::default();

        // Far beyond reach at shoulder height: straight ahead, fully extended
        let angles = arm_ctrl.solve_ik(&Point3::new(0.0, 100.0, 10.5));

        assert!((angles.theta_1_deg - 180.0).abs() < ANGLE_TOL_DEG);
        assert!((angles.theta_2_deg - 90.0).abs() < ANGLE_TOL_DEG);
        assert!((angles.theta_3_deg - 90.0).abs() < ANGLE_TOL_DEG);
        assert!(arm_ctrl.report.pose_clamped);
    }

    #[test]
    fn test_target_ahead_of_base() {
        let mut arm_ctrl = ArmCtrl::default();

        let angles = arm_ctrl.solve_ik(&Point3::new(0.0, 10.0, 5.0));

        // Base rotates to face +y
        assert!((angles.theta_1_deg - 180.0).abs() < ANGLE_TOL_DEG);

        // Within reach, so no clamping of the pose
        assert!(!arm_ctrl.report.pose_clamped);

        // The shoulder raises above neutral while the elbow-down branch puts
        // the elbow below its travel range (the commander clamps it later)
        assert!(angles.theta_2_deg > 90.0 && angles.theta_2_deg < 180.0);
        assert!(angles.theta_3_deg < 0.0 && angles.theta_3_deg > -90.0);
    }

    #[test]
    fn test_solve_is_deterministic() {
        let mut arm_ctrl = ArmCtrl::default();

        let first = arm_ctrl.solve_ik(&Point3::new(3.0, 17.0, 9.0));
        let second = arm_ctrl.solve_ik(&Point3::new(3.0, 17.0, 9.0));

        assert_eq!(first.theta_1_deg, second.theta_1_deg);
        assert_eq!(first.theta_2_deg, second.theta_2_deg);
        assert_eq!(first.theta_3_deg, second.theta_3_deg);
    }

    #[test]
    fn test_non_finite_input_stays_finite() {
        let mut arm_ctrl = ArmCtrl::default();

        let angles = arm_ctrl.solve_ik(&Point3::new(f64::NAN, f64::INFINITY, 5.0));

        assert!(angles.theta_1_deg.is_finite());
        assert!(angles.theta_2_deg.is_finite());
        assert!(angles.theta_3_deg.is_finite());
    }
}
