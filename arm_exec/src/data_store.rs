//! # Data Store

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

use eqpt_if::eqpt::{arm::ArmDems, sensors::SensorData};
use eqpt_if::tc::ArmCmd;
use log::{info, warn};

use crate::{arm_ctrl, aux_driver::AuxDriver, servo_ctrl};

// ---------------------------------------------------------------------------
// ENUMS
// ---------------------------------------------------------------------------

/// Gives the reason the system has been put into safe mode
#[derive(Debug, Eq, PartialEq, Copy, Clone)]
pub enum SafeModeCause {
    MakeSafeTc,
}

// ---------------------------------------------------------------------------
// DATA STRUCTURES
// ---------------------------------------------------------------------------

/// Global data store for the executable.
#[derive(Default)]
pub struct DataStore {
    // Cycle management
    /// Number of cycles already executed
    pub num_cycles: u128,

    /// True if this cycle falls on a 1Hz boundary
    pub is_1_hz_cycle: bool,

    // Safe mode variables
    /// Determines if the system is in safe mode.
    pub safe: bool,

    /// Gives the reason for the system being in safe mode.
    pub safe_cause: Option<SafeModeCause>,

    // Mode flags
    /// Whether the autonomous tracking mode is engaged. Written only by the
    /// telecommand processor, read once per cycle by the control loop.
    pub auto_mode: bool,

    // Sensors
    /// The most recent sensor snapshot.
    pub latest_sensors: SensorData,

    // ArmCtrl
    pub arm_ctrl: arm_ctrl::ArmCtrl,
    pub arm_ctrl_input: arm_ctrl::InputData,
    pub arm_ctrl_output: ArmDems,
    pub arm_ctrl_status_rpt: arm_ctrl::StatusReport,

    // ServoCtrl
    pub joint_bank: servo_ctrl::JointBank,
    pub servo_ctrl_status_rpt: servo_ctrl::StatusReport,

    // Auxiliary equipment
    pub aux: AuxDriver,

    // Monitoring Counters
    /// Number of consecutive cycle overruns
    pub num_consec_cycle_overruns: u64,
}

// ---------------------------------------------------------------------------
// IMPLS
// ---------------------------------------------------------------------------

impl DataStore {
    /// Puts the system into safe mode with the given cause.
    pub fn make_safe(&mut self, cause: SafeModeCause) {
        if !self.safe {
            warn!("Make safe requested, cause: {:?}", cause);
            self.safe = true;
            self.safe_cause = Some(cause);

            // Safing disengages tracking and stops the arm
            self.auto_mode = false;
            self.arm_ctrl.make_safe();
            self.arm_ctrl_input.cmd = Some(ArmCmd::Stop);
        }
    }

    /// Attempts to disable the safe mode by clearing the given cause.
    ///
    /// Returns `Ok(())` if this cause was cleared and safe mode was disabled, or `Err(())`
    /// otherwise. To remove safe mode the provided cause must match the initial reason for safe
    /// mode being enabled.
    ///
    /// If safe mode was not enabled `Ok(())` is returned
    pub fn make_unsafe(&mut self, cause: SafeModeCause) -> Result<(), ()> {
        if !self.safe {
            return Ok(());
        }

        match self.safe_cause {
            Some(root_cause) => {
                if cause == root_cause {
                    self.safe = false;
                    self.safe_cause = None;
                    info!("Make unsafe requested, root cause match, safe mode disabled");
                    Ok(())
                } else {
                    Err(())
                }
            }
            None => Ok(()),
        }
    }

    /// Perform actions required at the start of a cycle.
    ///
    /// Clears those items that need clearing at the start of a cycle, and sets the 1Hz cycle flag.
    pub fn cycle_start(&mut self, cycle_frequency_hz: f64) {
        self.is_1_hz_cycle = self.num_cycles % (cycle_frequency_hz as u128) == 0;

        self.arm_ctrl_input = arm_ctrl::InputData::default();
        self.arm_ctrl_output = ArmDems::default();
        self.arm_ctrl_status_rpt = arm_ctrl::StatusReport::default();
        self.servo_ctrl_status_rpt = servo_ctrl::StatusReport::default();
    }
}

// ---------------------------------------------------------------------------
// TESTS
// ---------------------------------------------------------------------------

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_safe_mode_disengages_auto() {
        let mut ds = DataStore::default();
        ds.auto_mode = true;

        ds.make_safe(SafeModeCause::MakeSafeTc);

        assert!(ds.safe);
        assert!(!ds.auto_mode);
        assert!(matches!(ds.arm_ctrl_input.cmd, Some(ArmCmd::Stop)));
    }

    #[test]
    fn test_unsafe_requires_matching_cause() {
        let mut ds = DataStore::default();

        ds.make_safe(SafeModeCause::MakeSafeTc);
        assert!(ds.make_unsafe(SafeModeCause::MakeSafeTc).is_ok());
        assert!(!ds.safe);

        // Unsafing an already-unsafe store succeeds
        assert!(ds.make_unsafe(SafeModeCause::MakeSafeTc).is_ok());
    }
}
