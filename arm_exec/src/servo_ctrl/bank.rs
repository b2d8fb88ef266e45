//! Joint state book-keeping and demand application

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

// External
use log::{trace, warn};
use serde::Serialize;

// Internal
use super::{JointApplyReport, Params, ServoBackend, StatusReport};
use eqpt_if::eqpt::arm::{ArmDems, JointId};
use util::{maths::clamp, params};

// ---------------------------------------------------------------------------
// DATA STRUCTURES
// ---------------------------------------------------------------------------

/// State of a single joint.
#[derive(Clone, Copy, Debug, Serialize)]
pub struct JointState {
    /// The joint this state belongs to.
    pub id: JointId,

    /// The last angle commanded to the actuator.
    ///
    /// Invariant: always within `[min_limit_deg, max_limit_deg]`.
    ///
    /// Units: degrees
    pub angle_deg: f64,

    /// Lower travel limit.
    ///
    /// Units: degrees
    pub min_limit_deg: f64,

    /// Upper travel limit.
    ///
    /// Units: degrees
    pub max_limit_deg: f64,
}

/// The bank of all joint states, and the commander which applies demands to
/// them.
///
/// The bank is owned by the executive's data store and passed explicitly to
/// whoever needs it - there is deliberately no global joint table.
#[derive(Default)]
pub struct JointBank {
    params: Params,

    /// Joint states in canonical order. Empty until `init` is called.
    joints: Vec<JointState>,
}

// ---------------------------------------------------------------------------
// IMPLEMENTATIONS
// ---------------------------------------------------------------------------

impl JointBank {
    /// Initialise the joint bank.
    ///
    /// Expected init data is the path to the parameter file
    pub fn init(&mut self, param_file_path: &str) -> Result<(), params::LoadError> {
        let params = params::load(param_file_path)?;
        self.init_from_params(params);

        Ok(())
    }

    /// Initialise the joint bank from an already-built parameter set.
    pub fn init_from_params(&mut self, params: Params) {
        self.joints = JointId::all()
            .iter()
            .map(|&id| JointState {
                id,
                angle_deg: params.init_angle_deg[id.index()],
                min_limit_deg: params.min_limit_deg[id.index()],
                max_limit_deg: params.max_limit_deg[id.index()],
            })
            .collect();

        self.params = params;
    }

    /// Get the state of a joint.
    ///
    /// # Panics
    /// - If the bank has not been initialised.
    pub fn state(&self, joint: JointId) -> &JointState {
        &self.joints[joint.index()]
    }

    /// Current angle of a joint in degrees.
    ///
    /// # Panics
    /// - If the bank has not been initialised.
    pub fn angle_deg(&self, joint: JointId) -> f64 {
        self.joints[joint.index()].angle_deg
    }

    /// Command the current pose out to the actuators.
    ///
    /// Used at startup so the physical arm matches the book-kept state.
    pub fn write_current_pose(&self, backend: &mut dyn ServoBackend) {
        for joint in &self.joints {
            backend.write_angle(joint.id, joint.angle_deg);
        }
    }

    /// Apply a demanded angle to a single joint.
    ///
    /// The demand is limited to the joint's travel range before anything is
    /// written. An elbow demand whose move exceeds the coupling deadband
    /// drags the shoulder with it (scaled by the coupling ratio and limited
    /// to the shoulder's own range) before the elbow itself is written - the
    /// mechanical linkage between the two joints imparts that reaction
    /// whether we command it or not, so the book-kept state must follow.
    pub fn apply_angle(
        &mut self,
        backend: &mut dyn ServoBackend,
        joint: JointId,
        angle_deg: f64,
    ) -> JointApplyReport {
        let mut report = JointApplyReport::default();

        if self.joints.is_empty() {
            warn!("JointBank demand before init, {:?} not commanded", joint);
            return report;
        }

        // A non-finite demand cannot be limited, keep it away from the
        // actuators and the book-kept state
        if !angle_deg.is_finite() {
            warn!("Non-finite demand for {:?} ignored", joint);
            return report;
        }

        let state = self.joints[joint.index()];
        let limited_deg = clamp(&angle_deg, &state.min_limit_deg, &state.max_limit_deg);

        if limited_deg != angle_deg {
            trace!(
                "{:?} demand {:.1} deg limited to {:.1} deg",
                joint,
                angle_deg,
                limited_deg
            );
            report.pos_limited = true;
        }

        if let JointId::Elbow = joint {
            let delta_deg = limited_deg - state.angle_deg;

            if delta_deg.abs() > self.params.coupling_deadband_deg {
                let shoulder = &mut self.joints[JointId::Shoulder.index()];

                let shoulder_adjust_deg = clamp(
                    &(shoulder.angle_deg + delta_deg * self.params.coupling_ratio),
                    &shoulder.min_limit_deg,
                    &shoulder.max_limit_deg,
                );

                backend.write_angle(JointId::Shoulder, shoulder_adjust_deg);
                shoulder.angle_deg = shoulder_adjust_deg;
                report.coupling_applied = true;
            }
        }

        backend.write_angle(joint, limited_deg);
        self.joints[joint.index()].angle_deg = limited_deg;

        report
    }

    /// Apply a full demand set in canonical joint order.
    ///
    /// Joints absent from the set are not touched.
    pub fn apply_dems(&mut self, backend: &mut dyn ServoBackend, dems: &ArmDems) -> StatusReport {
        let mut report = StatusReport::default();

        for joint in &JointId::all() {
            if let Some(&angle_deg) = dems.pos_deg.get(joint) {
                let joint_report = self.apply_angle(backend, *joint, angle_deg);

                report.pos_limited[joint.index()] = joint_report.pos_limited;
                report.coupling_applied |= joint_report.coupling_applied;
            }
        }

        report
    }
}

// ---------------------------------------------------------------------------
// TESTS
// ---------------------------------------------------------------------------

#[cfg(test)]
mod test {
    use super::*;

    /// Backend recording every write for inspection.
    #[derive(Default)]
    struct RecordingBackend {
        writes: Vec<(JointId, f64)>,
    }

    impl ServoBackend for RecordingBackend {
        fn write_angle(&mut self, joint: JointId, angle_deg: f64) {
            self.writes.push((joint, angle_deg));
        }
    }

    fn bank() -> JointBank {
        let mut bank = JointBank::default();
        bank.init_from_params(Params::default());
        bank
    }

    #[test]
    fn test_demands_limited_to_travel_range() {
        let mut bank = bank();
        let mut backend = RecordingBackend::default();

        let report = bank.apply_angle(&mut backend, JointId::Base, 250.0);

        assert!(report.pos_limited);
        assert_eq!(bank.angle_deg(JointId::Base), 180.0);

        let report = bank.apply_angle(&mut backend, JointId::Base, -40.0);

        assert!(report.pos_limited);
        assert_eq!(bank.angle_deg(JointId::Base), 0.0);

        // Invariant holds whatever was demanded
        for joint in &JointId::all() {
            let state = bank.state(*joint);
            assert!(state.angle_deg >= state.min_limit_deg);
            assert!(state.angle_deg <= state.max_limit_deg);
        }
    }

    #[test]
    fn test_elbow_coupling_drags_shoulder() {
        let mut bank = bank();
        let mut backend = RecordingBackend::default();

        // 10 degree elbow move exceeds the 5 degree deadband, so the
        // shoulder picks up 30% of it before the elbow write
        let report = bank.apply_angle(&mut backend, JointId::Elbow, 100.0);

        assert!(report.coupling_applied);
        assert_eq!(bank.angle_deg(JointId::Shoulder), 93.0);
        assert_eq!(bank.angle_deg(JointId::Elbow), 100.0);
        assert_eq!(
            backend.writes,
            vec![(JointId::Shoulder, 93.0), (JointId::Elbow, 100.0)]
        );
    }

    #[test]
    fn test_elbow_deadband_leaves_shoulder_alone() {
        let mut bank = bank();
        let mut backend = RecordingBackend::default();

        // 3 degrees is within the deadband
        let report = bank.apply_angle(&mut backend, JointId::Elbow, 93.0);

        assert!(!report.coupling_applied);
        assert_eq!(bank.angle_deg(JointId::Shoulder), 90.0);
        assert_eq!(bank.angle_deg(JointId::Elbow), 93.0);
        assert_eq!(backend.writes, vec![(JointId::Elbow, 93.0)]);
    }

    #[test]
    fn test_coupling_respects_shoulder_limits() {
        let mut bank = bank();
        let mut backend = RecordingBackend::default();

        // Put the shoulder near its upper limit first
        bank.apply_angle(&mut backend, JointId::Shoulder, 179.0);

        // A large elbow move would push the shoulder past 180
        bank.apply_angle(&mut backend, JointId::Elbow, 170.0);

        assert_eq!(bank.angle_deg(JointId::Shoulder), 180.0);
        assert_eq!(bank.angle_deg(JointId::Elbow), 170.0);
    }

    #[test]
    fn test_dems_applied_in_canonical_order() {
        let mut bank = bank();
        let mut backend = RecordingBackend::default();

        let mut dems = ArmDems::default();
        dems.pos_deg.insert(JointId::Gripper, 160.0);
        dems.pos_deg.insert(JointId::Base, 100.0);
        dems.pos_deg.insert(JointId::Elbow, 92.0);
        dems.pos_deg.insert(JointId::Shoulder, 110.0);

        bank.apply_dems(&mut backend, &dems);

        let order: Vec<JointId> = backend.writes.iter().map(|(id, _)| *id).collect();
        assert_eq!(
            order,
            vec![
                JointId::Base,
                JointId::Shoulder,
                JointId::Elbow,
                JointId::Gripper
            ]
        );
    }

    #[test]
    fn test_non_finite_demand_is_a_no_op() {
        let mut bank = bank();
        let mut backend = RecordingBackend::default();

        bank.apply_angle(&mut backend, JointId::Shoulder, f64::NAN);

        assert!(backend.writes.is_empty());
        assert_eq!(bank.angle_deg(JointId::Shoulder), 90.0);
    }

    #[test]
    fn test_demand_before_init_is_a_no_op() {
        let mut bank = JointBank::default();
        let mut backend = RecordingBackend::default();

        let report = bank.apply_angle(&mut backend, JointId::Base, 120.0);

        assert!(!report.pos_limited);
        assert!(backend.writes.is_empty());
    }
}
