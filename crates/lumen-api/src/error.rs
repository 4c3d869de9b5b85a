use thiserror::Error;

/// Top-level error type for the `lumen-api` crate.
///
/// Covers every failure mode across the bridge's local API and the public
/// locator service. `lumen-core` maps these into user-facing diagnostics.
#[derive(Debug, Error)]
pub enum Error {
    // ── Transport ───────────────────────────────────────────────────
    /// HTTP transport error (connection refused, DNS failure, timeout, etc.)
    #[error("HTTP transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// URL parsing error.
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    // ── Pairing ─────────────────────────────────────────────────────
    /// The bridge rejected the pairing request because the link button
    /// was not pressed within the firmware window (error type 101).
    #[error("Link button not pressed")]
    LinkButtonNotPressed,

    /// The pairing response contained neither a credential nor a
    /// recognizable error record.
    #[error("Pairing rejected by bridge: {description}")]
    PairingRejected { description: String },

    // ── Bridge API ──────────────────────────────────────────────────
    /// Structured error from the bridge (parsed from the
    /// `[{"error": {type, address, description}}]` envelope).
    #[error("Bridge API error (type {error_type}): {description}")]
    Bridge { error_type: u16, description: String },

    // ── Data ────────────────────────────────────────────────────────
    /// JSON deserialization failed, with the raw body for debugging.
    #[error("Deserialization error: {message}")]
    Deserialization { message: String, body: String },
}

impl Error {
    /// Returns `true` if this error came from the pairing handshake being
    /// rejected or expiring, as opposed to a transport failure.
    pub fn is_pairing_rejection(&self) -> bool {
        matches!(
            self,
            Self::LinkButtonNotPressed | Self::PairingRejected { .. }
        )
    }

    /// Returns `true` if this error indicates the bridge could not be
    /// reached at all (connect failure, DNS, timeout).
    pub fn is_unreachable(&self) -> bool {
        match self {
            Self::Transport(e) => e.is_connect() || e.is_timeout(),
            _ => false,
        }
    }
}
