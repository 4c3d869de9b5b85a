//! CLI error types with miette diagnostics.
//!
//! Maps `CoreError` / `ConfigError` variants into user-facing errors with
//! actionable help text. Every failure exits with code 2; discovery
//! failures never reach this type because they degrade to a manual prompt.

use miette::Diagnostic;
use thiserror::Error;

use lumen_config::ConfigError;
use lumen_core::CoreError;

/// Exit codes. Success and help display exit 0 implicitly; every failure
/// path funnels through [`CliError::exit_code`] to 2.
pub mod exit_code {
    pub const FAILURE: i32 = 2;
}

#[derive(Debug, Error, Diagnostic)]
pub enum CliError {
    // ── Configuration ────────────────────────────────────────────────

    #[error("Invalid configuration: {reason}")]
    #[diagnostic(
        code(lumen::config_invalid),
        help(
            "The bridge address must be an IPv4 dotted quad.\n\
             Fix the 'ip' field in {path}, or re-run: lumen --setup"
        )
    )]
    ConfigInvalid { reason: String, path: String },

    // ── Connectivity ─────────────────────────────────────────────────

    #[error("Could not reach the bridge: {reason}")]
    #[diagnostic(
        code(lumen::bridge_unreachable),
        help(
            "Check that the bridge is powered on and that you are on the\n\
             same network. Re-run: lumen --setup to change the address."
        )
    )]
    BridgeUnreachable { reason: String },

    // ── Pairing ──────────────────────────────────────────────────────

    #[error("Pairing failed: {reason}")]
    #[diagnostic(
        code(lumen::pairing_failed),
        help(
            "Press the physical link button on the bridge, then run the\n\
             command again within the button window (about 30 seconds)."
        )
    )]
    PairingFailed { reason: String },

    // ── Resolution ───────────────────────────────────────────────────

    #[error("Couldn't find any room or light named '{name}'")]
    #[diagnostic(
        code(lumen::target_not_found),
        help("Run: lumen --rooms to list rooms, or lumen --lights <room> for lights")
    )]
    TargetNotFound { name: String },

    // ── Dispatch ─────────────────────────────────────────────────────

    #[error("Command failed for '{target}': {reason}")]
    #[diagnostic(code(lumen::command_failed))]
    CommandFailed { target: String, reason: String },

    // ── Interactive ──────────────────────────────────────────────────

    #[error("Interactive prompt failed: {reason}")]
    #[diagnostic(
        code(lumen::prompt),
        help("Setup needs an interactive terminal. Re-run from a TTY.")
    )]
    Prompt { reason: String },

    // ── IO / Serialization ───────────────────────────────────────────

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl CliError {
    /// Map this error to an exit code for process termination.
    pub fn exit_code(&self) -> i32 {
        // One taxonomy, one outcome: every failure is terminal with 2.
        exit_code::FAILURE
    }
}

// ── CoreError → CliError mapping ─────────────────────────────────────

impl From<CoreError> for CliError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::BridgeUnreachable { reason } => Self::BridgeUnreachable { reason },
            CoreError::TargetNotFound { name } => Self::TargetNotFound { name },
            CoreError::BridgeCommandFailed { target, reason } => {
                Self::CommandFailed { target, reason }
            }
        }
    }
}

// ── ConfigError → CliError mapping ───────────────────────────────────

impl From<ConfigError> for CliError {
    fn from(err: ConfigError) -> Self {
        match err {
            ConfigError::Io(e) => Self::Io(e),
            // Absent is normally intercepted by the setup flow; reaching
            // here means a save/load raced the file away.
            other => Self::ConfigInvalid {
                reason: other.to_string(),
                path: lumen_config::config_path().display().to_string(),
            },
        }
    }
}
