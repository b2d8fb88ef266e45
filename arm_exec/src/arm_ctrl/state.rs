//! Implementations for the ArmCtrl state structure

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

// External
use log::debug;
use serde::{Deserialize, Serialize};

// Internal
use super::Params;
use eqpt_if::{eqpt::arm::ArmDems, tc::arm_ctrl::ArmCmd};
use util::{module::State, params, session::Session};

// ---------------------------------------------------------------------------
// DATA STRUCTURES
// ---------------------------------------------------------------------------

/// Arm control module state
#[derive(Default)]
pub struct ArmCtrl {
    pub(crate) params: Params,

    pub(crate) report: StatusReport,

    pub(crate) current_cmd: Option<ArmCmd>,

    pub(crate) output: ArmDems,
}

/// Input data to Arm Control.
#[derive(Default)]
pub struct InputData {
    /// The arm command to be executed, or `None` if there is no new command
    /// on this cycle.
    pub cmd: Option<ArmCmd>,

    /// Whether the autonomous tracking mode is engaged this cycle.
    pub auto_mode: bool,

    /// The current distance reading from the ranging sensor.
    ///
    /// Units: centimeters
    pub distance_cm: f64,
}

/// Status report for ArmCtrl processing.
#[derive(Clone, Copy, Default, Serialize, Deserialize, Debug)]
pub struct StatusReport {
    /// The tracking distance was outside the accepted band and was clamped.
    pub target_clamped: bool,

    /// The target was out of the arm's reach and the nearest reachable pose
    /// was solved instead.
    pub pose_clamped: bool,
}

// ---------------------------------------------------------------------------
// IMPLEMENTATIONS
// ---------------------------------------------------------------------------

impl State for ArmCtrl {
    type InitData = &'static str;
    type InitError = params::LoadError;

    type InputData = InputData;
    type OutputData = ArmDems;
    type StatusReport = StatusReport;
    type ProcError = super::ArmCtrlError;

    /// Initialise the ArmCtrl module.
    ///
    /// Expected init data is the path to the parameter file
    fn init(
        &mut self,
        init_data: Self::InitData,
        _session: &Session,
    ) -> Result<(), Self::InitError> {
        // Load the parameters
        self.params = match params::load(init_data) {
            Ok(p) => p,
            Err(e) => return Err(e),
        };

        Ok(())
    }

    /// Perform cyclic processing of Arm Control.
    ///
    /// The output demand set is rebuilt from scratch every cycle - an empty
    /// set means no joint is commanded this cycle.
    fn proc(
        &mut self,
        input_data: &Self::InputData,
    ) -> Result<(Self::OutputData, Self::StatusReport), Self::ProcError> {
        // Clear the status report and the previous cycle's demands
        self.report = StatusReport::default();
        self.output = ArmDems::default();

        // Check to see if there's a new command
        if let Some(cmd) = &input_data.cmd {
            // Update the interal copy of the command
            self.current_cmd = Some(cmd.clone());

            // Ouptut the command in debug mode
            debug!("New ArmCtrl ArmCmd::{:#?}", cmd);

            // Calculate the demands based on this new command.
            self.calc_cmd_dems()?;
        }
        // With no direct command pending the tracking loop owns the arm
        else if input_data.auto_mode {
            self.calc_auto_track(input_data.distance_cm);
        }

        Ok((self.output.clone(), self.report))
    }
}

impl ArmCtrl {
    /// Function called when entering safe mode.
    ///
    /// Must result in no motion of the arm
    pub fn make_safe(&mut self) {
        self.current_cmd = Some(ArmCmd::Stop);
        self.output = ArmDems::default();
    }

    /// Based on the current command calculate the demand set for this cycle.
    ///
    /// A valid command should be set in `self.current_cmd` before calling
    /// this function.
    fn calc_cmd_dems(&mut self) -> Result<(), super::ArmCtrlError> {
        let cmd = match &self.current_cmd {
            Some(c) => c,
            None => return Err(super::ArmCtrlError::NoArmCmd),
        };

        match cmd {
            ArmCmd::Servo(servo_cmd) => {
                self.output = ArmDems::single(servo_cmd.joint, servo_cmd.angle_deg);
            }
            // Stop maintains the current joint angles, which for a
            // position-demand arm means commanding nothing at all.
            ArmCmd::Stop => (),
        }

        Ok(())
    }
}

// ---------------------------------------------------------------------------
// TESTS
// ---------------------------------------------------------------------------

#[cfg(test)]
mod test {
    use super::*;
    use eqpt_if::eqpt::arm::JointId;
    use eqpt_if::tc::arm_ctrl::ServoCmd;

    #[test]
    fn test_idle_cycle_demands_nothing() {
        let mut arm_ctrl = ArmCtrl::default();

        let (dems, _) = arm_ctrl.proc(&InputData::default()).unwrap();

        assert!(dems.pos_deg.is_empty());
    }

    #[test]
    fn test_auto_cycle_demands_all_joints() {
        let mut arm_ctrl = ArmCtrl::default();

        let input = InputData {
            cmd: None,
            auto_mode: true,
            distance_cm: 8.0,
        };

        let (dems, _) = arm_ctrl.proc(&input).unwrap();

        assert_eq!(dems.pos_deg.len(), 4);

        // Inside the grip distance the gripper demand is the closed angle
        assert_eq!(dems.pos_deg[&JointId::Gripper], 160.0);
    }

    #[test]
    fn test_direct_command_overrides_auto() {
        let mut arm_ctrl = ArmCtrl::default();

        let input = InputData {
            cmd: Some(ArmCmd::Servo(ServoCmd {
                joint: JointId::Elbow,
                angle_deg: 120.0,
            })),
            auto_mode: true,
            distance_cm: 8.0,
        };

        let (dems, _) = arm_ctrl.proc(&input).unwrap();

        assert_eq!(dems.pos_deg.len(), 1);
        assert_eq!(dems.pos_deg[&JointId::Elbow], 120.0);
    }

    #[test]
    fn test_stop_command_demands_nothing() {
        let mut arm_ctrl = ArmCtrl::default();

        let input = InputData {
            cmd: Some(ArmCmd::Stop),
            auto_mode: true,
            distance_cm: 8.0,
        };

        let (dems, _) = arm_ctrl.proc(&input).unwrap();

        assert!(dems.pos_deg.is_empty());
    }
}
