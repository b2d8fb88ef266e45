//! # Telecommand processor module
//!
//! The telecommand processor handles various TCs coming from any source.

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

// External
use log::{debug, warn};

// Internal
use arm_lib::data_store::{DataStore, SafeModeCause};
use eqpt_if::tc::{ArmCmd, Tc};

// ---------------------------------------------------------------------------
// PUBLIC FUNCTIONS
// ---------------------------------------------------------------------------

/// Execute a telecommand.
///
/// Mutates the datastore to send commands to different modules. Motion TCs
/// are rejected while the system is in safe mode.
pub(crate) fn exec(ds: &mut DataStore, tc: &Tc) {
    // Handle different Tcs
    match tc {
        Tc::MakeSafe => {
            debug!("Recieved MakeSafe command");
            ds.make_safe(SafeModeCause::MakeSafeTc);
        }
        Tc::MakeUnsafe => {
            debug!("Recieved MakeUnsafe command");
            ds.make_unsafe(SafeModeCause::MakeSafeTc).ok();
        }
        Tc::Servo(cmd) => {
            if ds.safe {
                warn!("Servo TC rejected, system is in safe mode");
            } else {
                ds.arm_ctrl_input.cmd = Some(ArmCmd::Servo(*cmd));
            }
        }
        Tc::AutoMode(cmd) => {
            if ds.safe && cmd.on {
                warn!("AutoMode TC rejected, system is in safe mode");
            } else {
                debug!("Auto mode {}", if cmd.on { "engaged" } else { "disengaged" });
                ds.auto_mode = cmd.on;
            }
        }
        Tc::Pump(cmd) => {
            ds.aux.set_pump(cmd.on);
        }
        Tc::Speaker(cmd) => {
            ds.aux.set_speaker(cmd.on);
        }
    }
}

// ---------------------------------------------------------------------------
// TESTS
// ---------------------------------------------------------------------------

#[cfg(test)]
mod test {
    use super::*;
    use eqpt_if::eqpt::arm::JointId;
    use eqpt_if::tc::{ServoCmd, SwitchCmd};

    #[test]
    fn test_motion_tcs_rejected_in_safe_mode() {
        let mut ds = DataStore::default();
        ds.make_safe(SafeModeCause::MakeSafeTc);
        ds.arm_ctrl_input.cmd = None;

        exec(
            &mut ds,
            &Tc::Servo(ServoCmd {
                joint: JointId::Base,
                angle_deg: 45.0,
            }),
        );
        assert!(ds.arm_ctrl_input.cmd.is_none());

        exec(&mut ds, &Tc::AutoMode(SwitchCmd { on: true }));
        assert!(!ds.auto_mode);

        // Aux switches are not motion and stay accepted
        exec(&mut ds, &Tc::Pump(SwitchCmd { on: true }));
        assert!(ds.aux.pump_on());
    }

    #[test]
    fn test_servo_tc_routed_to_arm_ctrl() {
        let mut ds = DataStore::default();

        exec(
            &mut ds,
            &Tc::Servo(ServoCmd {
                joint: JointId::Gripper,
                angle_deg: 160.0,
            }),
        );

        match ds.arm_ctrl_input.cmd {
            Some(ArmCmd::Servo(cmd)) => {
                assert_eq!(cmd.joint, JointId::Gripper);
                assert_eq!(cmd.angle_deg, 160.0);
            }
            _ => panic!("Expected a Servo arm command"),
        }
    }
}
