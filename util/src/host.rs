//! Host platform utility functions

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

use std::path::PathBuf;
use thiserror::Error;

// ---------------------------------------------------------------------------
// CONSTANTS
// ---------------------------------------------------------------------------

/// Environment variable pointing at the root of the software installation.
///
/// Parameter files and session directories are resolved relative to this root.
pub const SW_ROOT_ENV_VAR: &str = "AGRIBOT_SW_ROOT";

// ---------------------------------------------------------------------------
// ENUMERATIONS
// ---------------------------------------------------------------------------

/// Error raised when the software root cannot be determined.
#[derive(Debug, Error)]
#[error("The software root environment variable (AGRIBOT_SW_ROOT) is not set")]
pub struct SwRootNotSet;

// ---------------------------------------------------------------------------
// PUBLIC FUNCTIONS
// ---------------------------------------------------------------------------

/// Get the root directory of the software installation.
pub fn get_agribot_sw_root() -> Result<PathBuf, SwRootNotSet> {
    match std::env::var(SW_ROOT_ENV_VAR) {
        Ok(p) => Ok(PathBuf::from(p)),
        Err(_) => Err(SwRootNotSet),
    }
}

/// Get a short description of the host platform.
pub fn get_platform_info() -> String {
    format!("{} ({})", std::env::consts::OS, std::env::consts::ARCH)
}
