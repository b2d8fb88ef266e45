//! # Auxiliary equipment driver
//!
//! Switch handling for the irrigation pump relay and the bird-deterrent
//! speaker. No algorithmic content - states change only on telecommand, and
//! the write is a single relay/tone toggle performed by the equipment layer.

// ------------------------------------------------------------------------------------------------
// IMPORTS
// ------------------------------------------------------------------------------------------------

use log::info;

// ------------------------------------------------------------------------------------------------
// STRUCTS
// ------------------------------------------------------------------------------------------------

/// Auxiliary equipment state.
#[derive(Default)]
pub struct AuxDriver {
    pump_on: bool,
    speaker_on: bool,
}

// ------------------------------------------------------------------------------------------------
// IMPLS
// ------------------------------------------------------------------------------------------------

impl AuxDriver {
    /// Switch the pump relay. Repeated demands for the current state are
    /// no-ops.
    pub fn set_pump(&mut self, on: bool) {
        if on != self.pump_on {
            info!("Pump relay switched {}", if on { "on" } else { "off" });
            self.pump_on = on;
        }
    }

    /// Switch the deterrent speaker. Repeated demands for the current state
    /// are no-ops.
    pub fn set_speaker(&mut self, on: bool) {
        if on != self.speaker_on {
            info!("Speaker switched {}", if on { "on" } else { "off" });
            self.speaker_on = on;
        }
    }

    /// Current pump relay state.
    pub fn pump_on(&self) -> bool {
        self.pump_on
    }

    /// Current speaker state.
    pub fn speaker_on(&self) -> bool {
        self.speaker_on
    }
}

// -----------------------------------------------------------------------------------------------
// TESTS
// -----------------------------------------------------------------------------------------------

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_switching() {
        let mut aux = AuxDriver::default();

        assert!(!aux.pump_on());
        assert!(!aux.speaker_on());

        aux.set_pump(true);
        aux.set_speaker(true);
        assert!(aux.pump_on());
        assert!(aux.speaker_on());

        aux.set_pump(true);
        assert!(aux.pump_on());

        aux.set_pump(false);
        assert!(!aux.pump_on());
        assert!(aux.speaker_on());
    }
}
