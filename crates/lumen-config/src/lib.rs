//! Persisted bridge settings for the lumen workspace.
//!
//! The config is a single JSON object (`ip`, `apiKey`, `appName`) on local
//! storage. Loading is layered via figment (file, then `LUMEN_*` env
//! overrides); saving is always a full atomic replace. The tool is
//! single-shot, so no file locking is needed.

use std::net::Ipv4Addr;
use std::path::{Path, PathBuf};

use directories::ProjectDirs;
use figment::{
    providers::{Env, Format, Json},
    Figment,
};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors from loading, validating, or saving the config.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// No config file exists yet. Recoverable: callers run interactive
    /// setup instead of failing.
    #[error("No configuration found at {path}")]
    Absent { path: PathBuf },

    /// The config exists but cannot be used for this run. Fatal.
    #[error("Invalid configuration: {reason}")]
    Invalid { reason: String },

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Figment(Box<figment::Error>),
}

impl From<figment::Error> for ConfigError {
    fn from(err: figment::Error) -> Self {
        Self::Figment(Box::new(err))
    }
}

/// Bridge connection settings, as persisted.
///
/// Created once at setup and mutated only to attach a freshly paired
/// credential; otherwise immutable for the process lifetime.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// Bridge LAN address, strict IPv4 dotted quad.
    pub ip: String,

    /// API credential obtained through pairing. Absent until the first
    /// successful handshake.
    #[serde(rename = "apiKey")]
    pub api_key: Option<String>,

    /// Devicetype name this tool registers with the bridge.
    #[serde(rename = "appName")]
    pub app_name: Option<String>,
}

impl Config {
    /// A fresh config for a newly entered bridge address, not yet paired.
    pub fn new(ip: String, app_name: Option<String>) -> Self {
        Self {
            ip,
            api_key: None,
            app_name,
        }
    }

    /// Whether a pairing credential is already attached.
    pub fn has_credential(&self) -> bool {
        self.api_key.as_deref().is_some_and(|k| !k.is_empty())
    }

    /// Attach a freshly obtained credential.
    pub fn with_credential(mut self, api_key: String) -> Self {
        self.api_key = Some(api_key);
        self
    }

    /// Validate the bridge address. A missing or malformed IPv4 address is
    /// fatal for the run; nothing is sent over the network before this
    /// passes.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if is_valid_ipv4(&self.ip) {
            Ok(())
        } else {
            Err(ConfigError::Invalid {
                reason: format!(
                    "'{}' is not an IPv4 address (expected four dot-separated octets 0-255)",
                    self.ip
                ),
            })
        }
    }
}

/// Strict dotted-quad check: four octets, each 0-255.
pub fn is_valid_ipv4(addr: &str) -> bool {
    addr.parse::<Ipv4Addr>().is_ok()
}

// ── Config file path ─────────────────────────────────────────────────

/// Resolve the config file path via XDG / platform conventions.
pub fn config_path() -> PathBuf {
    ProjectDirs::from("io", "lumen-cli", "lumen")
        .map(|dirs| dirs.config_dir().join("config.json"))
        .unwrap_or_else(|| {
            let mut p = PathBuf::from(std::env::var("HOME").unwrap_or_else(|_| ".".into()));
            p.push(".config");
            p.push("lumen");
            p.push("config.json");
            p
        })
}

// ── Load / save ──────────────────────────────────────────────────────

/// Load the config from `path`, layering `LUMEN_*` env overrides on top.
///
/// Signals [`ConfigError::Absent`] when no file exists, which callers
/// treat as "run setup", not as a failure.
pub fn load_from(path: &Path) -> Result<Config, ConfigError> {
    if !path.exists() {
        return Err(ConfigError::Absent {
            path: path.to_path_buf(),
        });
    }

    let figment = Figment::new()
        .merge(Json::file(path))
        .merge(Env::prefixed("LUMEN_").map(|key| {
            match key.as_str() {
                "api_key" => "apiKey".into(),
                "app_name" => "appName".into(),
                other => other.to_owned().into(),
            }
        }));

    let config: Config = figment.extract()?;
    Ok(config)
}

/// Load from the default platform path.
pub fn load() -> Result<Config, ConfigError> {
    load_from(&config_path())
}

/// Persist the full config to `path` as a single atomic replace.
///
/// Writes a sibling temp file and renames it over the target, so a crash
/// mid-write never leaves a half-written config behind.
pub fn save_to(config: &Config, path: &Path) -> Result<(), ConfigError> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }

    let json = serde_json::to_string_pretty(config).map_err(|e| ConfigError::Invalid {
        reason: format!("could not serialize config: {e}"),
    })?;

    let tmp = path.with_extension("json.tmp");
    std::fs::write(&tmp, json)?;
    std::fs::rename(&tmp, path)?;
    Ok(())
}

/// Persist to the default platform path.
pub fn save(config: &Config) -> Result<(), ConfigError> {
    save_to(config, &config_path())
}

// ── Tests ────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use super::*;

    #[test]
    fn valid_ipv4_accepted() {
        for addr in ["0.0.0.0", "192.168.1.42", "255.255.255.255", "10.0.0.1"] {
            assert!(is_valid_ipv4(addr), "{addr} should be valid");
        }
    }

    #[test]
    fn invalid_ipv4_rejected() {
        for addr in [
            "",
            "search",
            "256.1.1.1",
            "1.2.3",
            "1.2.3.4.5",
            "192.168.1.",
            "1.2.3.999",
            "a.b.c.d",
        ] {
            assert!(!is_valid_ipv4(addr), "{addr} should be invalid");
        }
    }

    #[test]
    fn validate_rejects_bad_address() {
        let cfg = Config::new("300.1.1.1".into(), None);
        assert!(matches!(cfg.validate(), Err(ConfigError::Invalid { .. })));
    }

    #[test]
    fn save_load_round_trip_preserves_fields() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");

        let cfg = Config {
            ip: "192.168.1.42".into(),
            api_key: Some("abc123".into()),
            app_name: Some("lumen#desk".into()),
        };
        save_to(&cfg, &path).unwrap();
        let loaded = load_from(&path).unwrap();
        assert_eq!(loaded, cfg);

        // Saving what was loaded must reproduce identical contents.
        save_to(&loaded, &path).unwrap();
        assert_eq!(load_from(&path).unwrap(), cfg);
    }

    #[test]
    fn persisted_json_uses_wire_field_names() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");

        let cfg = Config::new("10.0.0.2".into(), Some("lumen".into()));
        save_to(&cfg, &path).unwrap();

        let raw: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(raw["ip"], "10.0.0.2");
        assert_eq!(raw["appName"], "lumen");
        assert!(raw["apiKey"].is_null());
    }

    #[test]
    fn missing_file_signals_absent() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nope.json");
        assert!(matches!(
            load_from(&path),
            Err(ConfigError::Absent { .. })
        ));
    }

    #[test]
    fn credential_attachment() {
        let cfg = Config::new("192.168.1.42".into(), None);
        assert!(!cfg.has_credential());
        let paired = cfg.with_credential("secret".into());
        assert!(paired.has_credential());
        assert_eq!(paired.ip, "192.168.1.42");
    }
}
