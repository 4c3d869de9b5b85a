use thiserror::Error;

use lumen_api::Error as ApiError;

/// Domain-level failures. The CLI maps these into user-facing diagnostics
/// and exit codes.
#[derive(Debug, Error)]
pub enum CoreError {
    /// The bridge could not be reached for the topology snapshot.
    #[error("Bridge unreachable: {reason}")]
    BridgeUnreachable { reason: String },

    /// The user-supplied name matched neither a room nor a light.
    #[error("No room or light named '{name}'")]
    TargetNotFound { name: String },

    /// A resolved action could not be applied.
    #[error("Command failed for '{target}': {reason}")]
    BridgeCommandFailed { target: String, reason: String },
}

impl CoreError {
    /// Classify an api error raised while reading the topology.
    pub(crate) fn unreachable(err: ApiError) -> Self {
        Self::BridgeUnreachable {
            reason: err.to_string(),
        }
    }

    /// Classify an api error raised while applying an action.
    pub(crate) fn command_failed(target: &str, err: ApiError) -> Self {
        Self::BridgeCommandFailed {
            target: target.to_owned(),
            reason: err.to_string(),
        }
    }
}
