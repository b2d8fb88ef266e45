//! # Sensor Client
//!
//! The sensor client is the executive's face of the sensor acquisition layer.
//! Acquisition itself (ADC reads, ultrasonic triggering, unit conversion) is
//! owned by a separate process; the executive only ever sees completed
//! [`SensorData`] snapshots.
//!
//! This crate ships the simulated client used for development runs on a host
//! machine. It synthesises a deterministic scene: an object sweeping towards
//! and away from the arm, steady ambient channels, and the occasional missed
//! ultrasonic echo so the sentinel path gets exercised too.

// ------------------------------------------------------------------------------------------------
// IMPORTS
// ------------------------------------------------------------------------------------------------

use eqpt_if::eqpt::sensors::{SensorData, NO_ECHO_DISTANCE_CM};
use util::maths::lin_map;

// ------------------------------------------------------------------------------------------------
// CONSTANTS
// ------------------------------------------------------------------------------------------------

/// Number of snapshots for one full in-and-out sweep of the simulated object.
const SWEEP_PERIOD: u64 = 600;

/// Nearest distance of the simulated object.
///
/// Units: centimeters
const SWEEP_NEAR_CM: f64 = 4.0;

/// Farthest distance of the simulated object.
///
/// Units: centimeters
const SWEEP_FAR_CM: f64 = 35.0;

/// Every n-th snapshot reports a missed echo.
const NO_ECHO_INTERVAL: u64 = 97;

// ------------------------------------------------------------------------------------------------
// TRAITS
// ------------------------------------------------------------------------------------------------

/// Trait providing sensor snapshots to the executive.
pub trait SensorClient {
    /// Get the current sensor snapshot.
    fn snapshot(&mut self) -> SensorData;
}

// ------------------------------------------------------------------------------------------------
// STRUCTS
// ------------------------------------------------------------------------------------------------

/// Simulated sensor client.
#[derive(Default)]
pub struct SimSensorClient {
    num_snapshots: u64,
}

// ------------------------------------------------------------------------------------------------
// IMPLS
// ------------------------------------------------------------------------------------------------

impl SensorClient for SimSensorClient {
    fn snapshot(&mut self) -> SensorData {
        let n = self.num_snapshots;
        self.num_snapshots += 1;

        // Triangle sweep between the near and far points, with a periodic
        // missed echo mapped to the sentinel just as the acquisition layer
        // would
        let distance_cm = if n % NO_ECHO_INTERVAL == NO_ECHO_INTERVAL - 1 {
            NO_ECHO_DISTANCE_CM
        } else {
            let phase = (n % SWEEP_PERIOD) as f64;
            let half = (SWEEP_PERIOD / 2) as f64;

            if phase < half {
                lin_map((0.0, half), (SWEEP_FAR_CM, SWEEP_NEAR_CM), phase)
            } else {
                lin_map((half, SWEEP_PERIOD as f64), (SWEEP_NEAR_CM, SWEEP_FAR_CM), phase)
            }
        };

        // Ambient channels wobble slowly around plausible field values
        let wobble = (n as f64 * 0.01).sin();

        SensorData {
            soil_humidity_pct: lin_map((4095.0, 0.0), (0.0, 100.0), 1600.0 + 200.0 * wobble),
            water_level_pct: 60.0 + 5.0 * wobble,
            rain_analog: 3500,
            ph_value: 7.0 + 0.3 * wobble,
            distance_cm,
        }
    }
}

// -----------------------------------------------------------------------------------------------
// TESTS
// -----------------------------------------------------------------------------------------------

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_distance_stays_in_sweep_band_or_sentinel() {
        let mut client = SimSensorClient::default();

        for _ in 0..(2 * SWEEP_PERIOD) {
            let data = client.snapshot();

            let in_band =
                data.distance_cm >= SWEEP_NEAR_CM && data.distance_cm <= SWEEP_FAR_CM;
            let sentinel = data.distance_cm == NO_ECHO_DISTANCE_CM;

            assert!(in_band || sentinel);
        }
    }

    #[test]
    fn test_no_echo_cycle_reports_sentinel() {
        let mut client = SimSensorClient::default();

        for i in 0..NO_ECHO_INTERVAL {
            let data = client.snapshot();

            if i == NO_ECHO_INTERVAL - 1 {
                assert_eq!(data.distance_cm, NO_ECHO_DISTANCE_CM);
            } else {
                assert_ne!(data.distance_cm, NO_ECHO_DISTANCE_CM);
            }
        }
    }

    #[test]
    fn test_snapshots_are_deterministic() {
        let mut first = SimSensorClient::default();
        let mut second = SimSensorClient::default();

        for _ in 0..100 {
            let a = first.snapshot();
            let b = second.snapshot();

            assert_eq!(a.distance_cm, b.distance_cm);
            assert_eq!(a.soil_humidity_pct, b.soil_humidity_pct);
        }
    }
}
