//! Autonomous tracking calculations
//!
//! In autonomous mode the arm follows whatever object the ranging sensor sees
//! ahead of it. The single distance reading is mapped onto a Cartesian target
//! in the arm's vertical symmetry plane, the target is solved for joint
//! angles, and the gripper closes once the object is near enough to take.

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

// External
use nalgebra::Point3;

// Internal imports
use super::*;
use eqpt_if::eqpt::arm::JointId;
use util::maths::clamp;

// ---------------------------------------------------------------------------
// IMPLEMENTATIONS
// ---------------------------------------------------------------------------

impl ArmCtrl {
    /// Map a distance reading onto a tracking target and a gripper angle.
    ///
    /// The reading is clamped into the accepted tracking band first, so a
    /// noise spike or the no-echo sentinel degrades to the nearest band edge
    /// rather than an absurd target. The approach height ramps linearly with
    /// distance - farther objects are approached from higher up.
    ///
    /// The gripper policy is a single comparison against the grip distance,
    /// there is deliberately no hysteresis or smoothing here.
    pub(crate) fn map_distance_to_target(&self, distance_cm: f64) -> (Point3<f64>, f64) {
        let p = &self.params;

        let distance_cm = clamp(
            &distance_cm,
            &p.min_track_distance_cm,
            &p.max_track_distance_cm,
        );

        // The target always lies in the vertical symmetry plane
        let target = Point3::new(
            0.0,
            distance_cm,
            p.approach_height_base_cm + distance_cm / p.approach_height_divisor,
        );

        let gripper_deg = if distance_cm < p.grip_distance_cm {
            p.gripper_closed_deg
        } else {
            p.gripper_open_deg
        };

        (target, gripper_deg)
    }

    /// Build the demand set for one autonomous tracking cycle.
    ///
    /// Solved angles are truncated to whole degrees before being demanded,
    /// matching the actuators' command resolution.
    pub(crate) fn calc_auto_track(&mut self, distance_cm: f64) {
        if distance_cm < self.params.min_track_distance_cm
            || distance_cm > self.params.max_track_distance_cm
        {
            self.report.target_clamped = true;
        }

        let (target, gripper_deg) = self.map_distance_to_target(distance_cm);
        let angles = self.solve_ik(&target);

        let pos_deg = &mut self.output.pos_deg;
        pos_deg.insert(JointId::Base, angles.theta_1_deg.trunc());
        pos_deg.insert(JointId::Shoulder, angles.theta_2_deg.trunc());
        pos_deg.insert(JointId::Elbow, angles.theta_3_deg.trunc());
        pos_deg.insert(JointId::Gripper, gripper_deg);
    }
}

// ---------------------------------------------------------------------------
// TESTS
// ---------------------------------------------------------------------------

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_distance_band_floor() {
        let arm_ctrl = ArmCtrl::default();

        // Readings below the band behave exactly as the band floor
        let (below, below_grip) = arm_ctrl.map_distance_to_target(3.0);
        let (floor, floor_grip) = arm_ctrl.map_distance_to_target(5.0);

        assert_eq!(below, floor);
        assert_eq!(below_grip, floor_grip);
    }

    #[test]
    fn test_distance_band_ceiling() {
        let arm_ctrl = ArmCtrl::default();

        // Readings above the band (the no-echo sentinel included) behave
        // exactly as the band ceiling
        let (above, above_grip) = arm_ctrl.map_distance_to_target(50.0);
        let (ceiling, ceiling_grip) = arm_ctrl.map_distance_to_target(30.0);

        assert_eq!(above, ceiling);
        assert_eq!(above_grip, ceiling_grip);
    }

    #[test]
    fn test_target_geometry() {
        let arm_ctrl = ArmCtrl::default();

        let (target, _) = arm_ctrl.map_distance_to_target(20.0);

        assert_eq!(target.x, 0.0);
        assert_eq!(target.y, 20.0);
        assert_eq!(target.z, 9.0);
    }

    #[test]
    fn test_gripper_threshold_is_exclusive_on_close() {
        let arm_ctrl = ArmCtrl::default();

        let (_, just_below) = arm_ctrl.map_distance_to_target(9.9);
        let (_, at_threshold) = arm_ctrl.map_distance_to_target(10.0);

        assert_eq!(just_below, 160.0);
        assert_eq!(at_threshold, 90.0);
    }

    #[test]
    fn test_auto_track_demands_whole_degrees() {
        let mut arm_ctrl = ArmCtrl::default();

        arm_ctrl.calc_auto_track(17.3);

        let dems = &arm_ctrl.output.pos_deg;
        assert_eq!(dems.len(), 4);

        for joint in &[JointId::Base, JointId::Shoulder, JointId::Elbow] {
            let angle_deg = dems[joint];
            assert!(angle_deg.is_finite());
            assert_eq!(angle_deg, angle_deg.trunc());
        }

        // 17.3 cm is outside the grip distance
        assert_eq!(dems[&JointId::Gripper], 90.0);
        assert!(!arm_ctrl.report.target_clamped);
    }

    #[test]
    fn test_auto_track_flags_clamped_reading() {
        let mut arm_ctrl = ArmCtrl::default();

        arm_ctrl.calc_auto_track(eqpt_if::eqpt::sensors::NO_ECHO_DISTANCE_CM);

        assert!(arm_ctrl.report.target_clamped);
        assert_eq!(arm_ctrl.output.pos_deg[&JointId::Gripper], 90.0);
    }
}
