//! Main arm-side executable entry point.
//!
//! # Architecture
//!
//! The general execution methodology consists of:
//!
//!     - Initialise all modules
//!     - Main loop:
//!         - Sensor snapshot acquisition
//!         - Telecommand processing and handling
//!         - Arm control processing:
//!             - Autonomous tracking (distance -> target -> joint angles)
//!             - Direct joint commands
//!         - Servo demand application (limits and coupling)
//!         - Cycle pacing
//!
//! # Modules
//!
//! All cyclic modules (e.g. `arm_ctrl`) shall meet the following requirements:
//!     1. Provide a public struct implementing the `util::module::State` trait.

// ---------------------------------------------------------------------------
// USE MODULES FROM LIBRARY
// ---------------------------------------------------------------------------

use arm_lib::{
    data_store::DataStore,
    sensor_client::{SensorClient, SimSensorClient},
    servo_ctrl::SimServoBackend,
};
use eqpt_if::eqpt::arm::JointId;

mod tc_processor;

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

// External
use color_eyre::{
    eyre::{eyre, WrapErr},
    Report,
};
use log::{debug, info, warn};
use serde::Serialize;
use std::env;
use std::thread;
use std::time::{Duration, Instant};

// Internal
use util::{
    archive::Archiver,
    host,
    logger::{logger_init, LevelFilter},
    module::State,
    raise_error,
    script_interpreter::{PendingTcs, ScriptInterpreter},
    session::{self, Session},
};

// ---------------------------------------------------------------------------
// CONSTANTS
// ---------------------------------------------------------------------------

/// Target period of one cycle while idle.
const IDLE_CYCLE_PERIOD_S: f64 = 0.01;

/// Target period of one cycle while autonomous tracking is engaged.
///
/// Tracking intentionally runs at a lower cadence than idle polling - the
/// arm needs time to settle between pose updates.
const AUTO_CYCLE_PERIOD_S: f64 = 0.11;

/// Number of cycles per second at the idle cadence
const CYCLE_FREQUENCY_HZ: f64 = 1.0 / IDLE_CYCLE_PERIOD_S;

// ---------------------------------------------------------------------------
// DATA STRUCTURES
// ---------------------------------------------------------------------------

/// Record of the commanded joint pose, archived once per cycle.
#[derive(Serialize)]
struct JointPoseRecord {
    time_s: f64,
    base_deg: f64,
    shoulder_deg: f64,
    elbow_deg: f64,
    gripper_deg: f64,
    auto_mode: bool,
}

// ---------------------------------------------------------------------------
// FUNCTIONS
// ---------------------------------------------------------------------------

/// Executable main function, entry point.
fn main() -> Result<(), Report> {
    // ---- EARLY INITIALISATION ----

    // Initialise session
    let session = Session::new("arm_exec", "sessions").wrap_err("Failed to create the session")?;

    // Initialise logger
    logger_init(LevelFilter::Trace, &session).wrap_err("Failed to initialise logging")?;

    // Log information on this execution.
    info!("Agribot Arm Control Executable\n");
    info!("Running on: {}", host::get_platform_info());
    info!("Session directory: {:?}\n", session.session_root);

    // ---- INITIALISE TC SOURCE ----

    let mut tc_source = TcSource::None;

    // Collect all arguments
    let args: Vec<String> = env::args().collect();

    debug!("CLI arguments: {:?}", args);

    // The single argument is the path of the command script to run
    if args.len() == 2 {
        info!("Loading script from \"{}\"", &args[1]);

        // Load the script interpreter
        let si = ScriptInterpreter::new(&args[1]).wrap_err("Failed to load script")?;

        // Display some info
        info!(
            "Loaded script lasts {:.02} s and contains {} TCs\n",
            si.get_duration(),
            si.get_num_tcs()
        );

        // Set the interpreter in the source
        tc_source = TcSource::Script(si);
    } else {
        return Err(eyre!(
            "Expected the path to a command script as the only argument, found {} arguments",
            args.len() - 1
        ));
    }

    // ---- INITIALISE DATASTORE ----

    info!("Initialising modules...");

    let mut ds = DataStore::default();

    // ---- INITIALISE MODULES ----

    ds.arm_ctrl
        .init("arm_ctrl.toml", &session)
        .wrap_err("Failed to initialise ArmCtrl")?;
    info!("ArmCtrl init complete");

    ds.joint_bank
        .init("servo_ctrl.toml")
        .wrap_err("Failed to initialise the joint bank")?;
    info!("JointBank init complete");

    info!("Module initialisation complete\n");

    // ---- INITIALISE EQUIPMENT ----

    // Development backends: writes are logged, sensor data is synthesised.
    // The hardware equivalents live with the equipment executables.
    let mut servo_backend = SimServoBackend::default();
    let mut sensor_client = SimSensorClient::default();

    // Drive the actuators to the book-kept initial pose
    ds.joint_bank.write_current_pose(&mut servo_backend);

    let mut pose_archiver = Archiver::from_path(&session, "joint_pose.csv")
        .wrap_err("Failed to initialise the joint pose archive")?;

    info!("Equipment initialisation complete");

    // ---- MAIN LOOP ----

    info!("Begining main loop\n");

    loop {
        // Get cycle start time
        let cycle_start_instant = Instant::now();

        // Clear items that need wiping at the start of the cycle
        ds.cycle_start(CYCLE_FREQUENCY_HZ);

        // ---- DATA INPUT ----

        ds.latest_sensors = sensor_client.snapshot();

        if ds.is_1_hz_cycle {
            debug!(
                "Distance: {:.1} cm, soil humidity: {:.0} %, water level: {:.0} %",
                ds.latest_sensors.distance_cm,
                ds.latest_sensors.soil_humidity_pct,
                ds.latest_sensors.water_level_pct
            );
        }

        // ---- TELECOMMAND PROCESSING ----

        match tc_source {
            // If no source no point in continuing so break
            TcSource::None => raise_error!("No TC source present"),

            TcSource::Script(ref mut si) => match si.get_pending_tcs() {
                PendingTcs::None => (),
                PendingTcs::Some(tc_vec) => {
                    for tc in tc_vec.iter() {
                        tc_processor::exec(&mut ds, tc);
                    }
                }
                // Exit if end of script reached
                PendingTcs::EndOfScript => {
                    info!("End of TC script reached, stopping");
                    break;
                }
            },
        };

        // ---- CONTROL ALGORITHM PROCESSING ----

        // Feed the mode flag and the current distance reading to ArmCtrl
        ds.arm_ctrl_input.auto_mode = ds.auto_mode && !ds.safe;
        ds.arm_ctrl_input.distance_cm = ds.latest_sensors.distance_cm;

        // ArmCtrl processing
        match ds.arm_ctrl.proc(&ds.arm_ctrl_input) {
            Ok((o, r)) => {
                ds.arm_ctrl_output = o;
                ds.arm_ctrl_status_rpt = r;
            }
            Err(e) => {
                // ArmCtrl errors usually just mean you sent the wrong TC, so just issue the
                // warning and continue.
                warn!("Error during ArmCtrl processing: {}", e)
            }
        };

        // Apply the demands to the actuators
        ds.servo_ctrl_status_rpt = ds
            .joint_bank
            .apply_dems(&mut servo_backend, &ds.arm_ctrl_output);

        // ---- WRITE ARCHIVES ----

        let record = JointPoseRecord {
            time_s: session::get_elapsed_seconds(),
            base_deg: ds.joint_bank.angle_deg(JointId::Base),
            shoulder_deg: ds.joint_bank.angle_deg(JointId::Shoulder),
            elbow_deg: ds.joint_bank.angle_deg(JointId::Elbow),
            gripper_deg: ds.joint_bank.angle_deg(JointId::Gripper),
            auto_mode: ds.auto_mode,
        };
        if let Err(e) = pose_archiver.serialise(record) {
            warn!("Could not archive the joint pose: {}", e);
        }

        // ---- CYCLE MANAGEMENT ----

        // Tracking paces the loop down so the arm settles between poses
        let cycle_period_s = match ds.auto_mode {
            true => AUTO_CYCLE_PERIOD_S,
            false => IDLE_CYCLE_PERIOD_S,
        };

        let cycle_dur = Instant::now() - cycle_start_instant;

        // Get sleep duration
        match Duration::from_secs_f64(cycle_period_s).checked_sub(cycle_dur) {
            Some(d) => {
                ds.num_consec_cycle_overruns = 0;
                thread::sleep(d);
            }
            None => {
                warn!(
                    "Cycle overran by {:.06} s",
                    cycle_dur.as_secs_f64() - cycle_period_s
                );
                ds.num_consec_cycle_overruns += 1;
            }
        }

        // Increment cycle counter
        ds.num_cycles += 1;
    }

    // ---- SHUTDOWN ----

    info!("End of execution");

    Ok(())
}

// ---------------------------------------------------------------------------
// ENUMERATIONS
// ---------------------------------------------------------------------------

/// Various sources for the telecommands incoming to the exec.
#[allow(dead_code)]
enum TcSource {
    None,
    Script(ScriptInterpreter),
}
