//! # Arm Equipment Commands

// ------------------------------------------------------------------------------------------------
// IMPORTS
// ------------------------------------------------------------------------------------------------

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

// ------------------------------------------------------------------------------------------------
// CONSTANTS
// ------------------------------------------------------------------------------------------------

/// The number of joints on the arm.
pub const NUM_JOINTS: usize = 4;

// ------------------------------------------------------------------------------------------------
// STRUCTS
// ------------------------------------------------------------------------------------------------

/// Demands that are sent from the arm control executive to the servo layer.
///
/// A joint which is absent from the map shall not be commanded this cycle, so an empty map is a
/// valid "no motion" demand set.
#[derive(Serialize, Deserialize, Debug, Clone, Default)]
pub struct ArmDems {
    /// The demanded position of a joint in degrees.
    pub pos_deg: HashMap<JointId, f64>,
}

// ------------------------------------------------------------------------------------------------
// ENUMS
// ------------------------------------------------------------------------------------------------

/// IDs of all joints available on the arm.
///
/// Using an enumeration rather than a raw channel index makes an invalid joint identity a
/// parse-time error rather than a silent runtime bounds check.
#[derive(Serialize, Deserialize, Debug, Hash, Eq, PartialEq, Copy, Clone)]
pub enum JointId {
    Base,
    Shoulder,
    Elbow,
    Gripper,
}

// -----------------------------------------------------------------------------------------------
// IMPLS
// -----------------------------------------------------------------------------------------------

impl JointId {
    /// All joints in their canonical command order.
    ///
    /// This is also the order in which demand sets are applied to the actuators.
    pub fn all() -> [JointId; NUM_JOINTS] {
        [
            JointId::Base,
            JointId::Shoulder,
            JointId::Elbow,
            JointId::Gripper,
        ]
    }

    /// Position of this joint in the canonical order.
    pub fn index(&self) -> usize {
        match self {
            JointId::Base => 0,
            JointId::Shoulder => 1,
            JointId::Elbow => 2,
            JointId::Gripper => 3,
        }
    }
}

impl ArmDems {
    /// Build a demand set commanding a single joint.
    pub fn single(joint: JointId, angle_deg: f64) -> Self {
        let mut pos_deg = HashMap::new();
        pos_deg.insert(joint, angle_deg);

        Self { pos_deg }
    }
}

// -----------------------------------------------------------------------------------------------
// TESTS
// -----------------------------------------------------------------------------------------------

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_canonical_order() {
        let all = JointId::all();

        for (i, id) in all.iter().enumerate() {
            assert_eq!(id.index(), i);
        }
    }
}
