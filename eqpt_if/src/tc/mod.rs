//! # Telecommand module
//!
//! This module provides telecommand functionality to the equipment interface. Telecommands are
//! JSON packets of the form `{"type": "...", "payload": {...}}`, produced by whatever layer
//! handles external requests and consumed by the executive's telecommand processor.

// ---------------------------------------------------------------------------
// MODULES
// ---------------------------------------------------------------------------

pub mod arm_ctrl;

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

// External
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{self, Value};
use thiserror::Error;

// Internal
pub use arm_ctrl::{ArmCmd, ServoCmd};

// ---------------------------------------------------------------------------
// ENUMERATIONS
// ---------------------------------------------------------------------------

/// A telecommand, i.e. an instruction sent to the executive by an external
/// command interface.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum Tc {
    /// Put the system into safe mode, stopping all arm motion.
    MakeSafe,

    /// Leave safe mode.
    MakeUnsafe,

    /// Command a single joint to an absolute angle.
    Servo(ServoCmd),

    /// Engage or disengage the autonomous tracking mode.
    AutoMode(SwitchCmd),

    /// Switch the irrigation pump relay.
    Pump(SwitchCmd),

    /// Switch the deterrent speaker.
    Speaker(SwitchCmd),
}

/// Possible parsing errors.
#[derive(Debug, Error)]
pub enum TcParseError {
    #[error("TC contains invalid JSON: {0}")]
    InvalidJson(serde_json::Error),

    #[error("TC has an invalid type ({0})")]
    InvalidType(String),

    #[error("TC of type {0} is expected to have a payload but it doesn't")]
    MissingPayload(String),

    #[error("TC of type {0} has an invalid payload: {1}")]
    InvalidPayload(String, serde_json::Error),
}

// ---------------------------------------------------------------------------
// DATA STRUCTURES
// ---------------------------------------------------------------------------

/// Payload for simple on/off telecommands.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct SwitchCmd {
    /// The demanded switch state.
    pub on: bool,
}

// ---------------------------------------------------------------------------
// IMPLEMENTATIONS
// ---------------------------------------------------------------------------

impl Tc {
    /// Parse a new TC from a JSON packet
    pub fn from_json(json_str: &str) -> Result<Self, TcParseError> {
        // Parse the JSON string into a value
        let val: Value = match serde_json::from_str(json_str) {
            Ok(v) => v,
            Err(e) => return Err(TcParseError::InvalidJson(e)),
        };

        // Get the type of the TC
        let type_str = match val["type"].as_str() {
            Some(s) => s,
            None => {
                return Err(TcParseError::InvalidType(String::from(
                    "Expected \"type\" to be a string",
                )))
            }
        };

        // Branch on the type, parsing the payload where one is required
        match type_str {
            "SAFE" => Ok(Tc::MakeSafe),
            "UNSAFE" => Ok(Tc::MakeUnsafe),
            "SERVO" => Ok(Tc::Servo(parse_payload(&val, type_str)?)),
            "AUTO" => Ok(Tc::AutoMode(parse_payload(&val, type_str)?)),
            "PUMP" => Ok(Tc::Pump(parse_payload(&val, type_str)?)),
            "SPKR" => Ok(Tc::Speaker(parse_payload(&val, type_str)?)),
            _ => Err(TcParseError::InvalidType(format!(
                "{} is not a recognised TC type",
                type_str
            ))),
        }
    }
}

// ---------------------------------------------------------------------------
// PRIVATE FUNCTIONS
// ---------------------------------------------------------------------------

/// Deserialise the payload of a TC, or error if it is missing/malformed.
fn parse_payload<T: DeserializeOwned>(val: &Value, type_str: &str) -> Result<T, TcParseError> {
    if val["payload"].is_null() {
        return Err(TcParseError::MissingPayload(type_str.to_string()));
    }

    match serde_json::from_value(val["payload"].clone()) {
        Ok(p) => Ok(p),
        Err(e) => Err(TcParseError::InvalidPayload(type_str.to_string(), e)),
    }
}

// ---------------------------------------------------------------------------
// TESTS
// ---------------------------------------------------------------------------

#[cfg(test)]
mod test {
    use super::*;
    use crate::eqpt::arm::JointId;

    #[test]
    fn test_parse_servo() {
        let tc = Tc::from_json(
            r#"{"type": "SERVO", "payload": {"joint": "Elbow", "angle_deg": 120.0}}"#,
        )
        .unwrap();

        match tc {
            Tc::Servo(cmd) => {
                assert_eq!(cmd.joint, JointId::Elbow);
                assert!((cmd.angle_deg - 120.0).abs() < f64::EPSILON);
            }
            _ => panic!("Expected a Servo TC"),
        }
    }

    #[test]
    fn test_parse_switches() {
        match Tc::from_json(r#"{"type": "AUTO", "payload": {"on": true}}"#).unwrap() {
            Tc::AutoMode(cmd) => assert!(cmd.on),
            _ => panic!("Expected an AutoMode TC"),
        }

        match Tc::from_json(r#"{"type": "PUMP", "payload": {"on": false}}"#).unwrap() {
            Tc::Pump(cmd) => assert!(!cmd.on),
            _ => panic!("Expected a Pump TC"),
        }
    }

    #[test]
    fn test_parse_no_payload_types() {
        assert!(matches!(
            Tc::from_json(r#"{"type": "SAFE"}"#).unwrap(),
            Tc::MakeSafe
        ));
        assert!(matches!(
            Tc::from_json(r#"{"type": "UNSAFE"}"#).unwrap(),
            Tc::MakeUnsafe
        ));
    }

    #[test]
    fn test_parse_errors() {
        // Unknown type
        assert!(matches!(
            Tc::from_json(r#"{"type": "WARP_DRIVE"}"#),
            Err(TcParseError::InvalidType(_))
        ));

        // Missing payload on a type that requires one
        assert!(matches!(
            Tc::from_json(r#"{"type": "SERVO"}"#),
            Err(TcParseError::MissingPayload(_))
        ));

        // Unknown joint name is a parse error, not a runtime no-op
        assert!(matches!(
            Tc::from_json(r#"{"type": "SERVO", "payload": {"joint": "Wrist", "angle_deg": 10.0}}"#),
            Err(TcParseError::InvalidPayload(_, _))
        ));

        // Invalid JSON
        assert!(matches!(
            Tc::from_json("not json at all"),
            Err(TcParseError::InvalidJson(_))
        ));
    }
}
