//! Configuration and pairing flow.
//!
//! `configure` produces a validated config, running the interactive wizard
//! when none exists (or `--setup` forces it). `ensure_credential` gates the
//! single pairing handshake behind the link-button prompt and persists the
//! credential on success.

use std::future::Future;
use std::io::IsTerminal;

use dialoguer::{Confirm, Input};
use owo_colors::OwoColorize;
use tracing::warn;
use url::Url;

use lumen_api::{discover, pair, DiscoveredBridge};
use lumen_config::{self as config, Config, ConfigError};

use crate::error::CliError;

/// Map a dialoguer / interactive I/O failure into CliError.
fn prompt_err(e: impl std::fmt::Display) -> CliError {
    CliError::Prompt {
        reason: e.to_string(),
    }
}

/// Setup and pairing prompt the user; refuse to run them without a TTY
/// rather than looping on a closed stdin.
fn require_terminal() -> Result<(), CliError> {
    if std::io::stdin().is_terminal() {
        Ok(())
    } else {
        Err(CliError::Prompt {
            reason: "setup requires an interactive terminal".into(),
        })
    }
}

/// Load the persisted config, or run the setup wizard when absent or
/// explicitly requested. The returned config always passes validation.
pub async fn configure(force_setup: bool, http: &reqwest::Client) -> Result<Config, CliError> {
    let existing = if force_setup {
        None
    } else {
        match config::load() {
            Ok(cfg) => Some(cfg),
            Err(ConfigError::Absent { .. }) => None,
            Err(other) => return Err(other.into()),
        }
    };

    let cfg = match existing {
        Some(cfg) => cfg,
        None => run_wizard(http).await?,
    };

    cfg.validate()?;
    Ok(cfg)
}

/// Interactive first-run wizard: app name, bridge address (with one
/// discovery attempt), validate, persist.
async fn run_wizard(http: &reqwest::Client) -> Result<Config, CliError> {
    require_terminal()?;
    eprintln!("lumen is not configured yet, let's do this now:");

    let app_name: String = Input::new()
        .with_prompt("Name for this app on the bridge")
        .default("lumen".into())
        .interact_text()
        .map_err(prompt_err)?;

    let entry: String = Input::new()
        .with_prompt("Bridge IP (or 'search' to find it automatically)")
        .interact_text()
        .map_err(prompt_err)?;

    let search = async { first_discovered(discover(http).await) };
    let ip = resolve_address(&entry, search, || {
        Input::new()
            .with_prompt("Bridge IP")
            .interact_text()
            .map_err(prompt_err)
    })
    .await?;

    let cfg = Config::new(ip, Some(app_name));
    cfg.validate()?;
    config::save(&cfg)?;
    eprintln!(
        "{} Configuration written to {}",
        "✓".green(),
        config::config_path().display()
    );
    Ok(cfg)
}

/// Turn the wizard's address entry into a concrete IP.
///
/// The literal entry `search` polls `search` at most once. Discovery is a
/// convenience, never a hard dependency: an empty or failed search degrades
/// to exactly one manual prompt, never a second automatic attempt.
async fn resolve_address<S, F>(entry: &str, search: S, mut manual: F) -> Result<String, CliError>
where
    S: Future<Output = Option<String>>,
    F: FnMut() -> Result<String, CliError>,
{
    if !entry.trim().eq_ignore_ascii_case("search") {
        return Ok(entry.trim().to_owned());
    }

    match search.await {
        Some(address) => Ok(address),
        None => {
            eprintln!("Couldn't find a bridge (are you on the right network?)");
            manual()
        }
    }
}

/// Interpret one locator outcome. No retries: transport failure, decode
/// failure, and an empty result all read as "nothing found".
fn first_discovered(outcome: Result<Vec<DiscoveredBridge>, lumen_api::Error>) -> Option<String> {
    match outcome {
        Ok(bridges) => {
            let first = bridges.first()?;
            eprintln!("Found bridge {} at {}", first.id, first.internalipaddress);
            Some(first.internalipaddress.clone())
        }
        Err(e) => {
            warn!(error = %e, "bridge discovery failed");
            None
        }
    }
}

/// Make sure the config carries a pairing credential, performing the
/// link-button handshake when it doesn't.
///
/// The handshake is one request; an expired button window or a rejection
/// ends the run. Re-pairing requires a fresh invocation (and a fresh
/// button press).
pub async fn ensure_credential(config: Config, http: &reqwest::Client) -> Result<Config, CliError> {
    if config.has_credential() {
        return Ok(config);
    }

    require_terminal()?;
    let devicetype = config.app_name.clone().unwrap_or_else(|| "lumen".into());

    eprintln!("The bridge has not authorized this app yet.");
    let ready = Confirm::new()
        .with_prompt("Press the link button on the bridge, then continue")
        .default(true)
        .interact()
        .map_err(prompt_err)?;
    if !ready {
        return Err(CliError::PairingFailed {
            reason: "cancelled before the link button was pressed".into(),
        });
    }

    let base = bridge_base_url(&config.ip)?;
    let credential = pair(http, &base, &devicetype)
        .await
        .map_err(pairing_error)?;

    let config = config.with_credential(credential);
    config::save(&config)?;
    eprintln!("{} Paired with bridge, credential stored", "✓".green());
    Ok(config)
}

/// Classify a handshake failure. A bridge that could not be reached at
/// all keeps its connectivity diagnostic; everything the bridge itself
/// answered (rejection, expired button window, malformed reply) reads as
/// a pairing failure.
fn pairing_error(e: lumen_api::Error) -> CliError {
    if e.is_unreachable() {
        CliError::BridgeUnreachable {
            reason: e.to_string(),
        }
    } else {
        CliError::PairingFailed {
            reason: e.to_string(),
        }
    }
}

/// The bridge root URL for a validated address.
pub fn bridge_base_url(ip: &str) -> Result<Url, CliError> {
    format!("http://{ip}/")
        .parse()
        .map_err(|e| CliError::ConfigInvalid {
            reason: format!("bad bridge address: {e}"),
            path: config::config_path().display().to_string(),
        })
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use serde_json::json;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use lumen_api::discover_at;

    use super::{first_discovered, pairing_error, resolve_address};
    use crate::error::CliError;

    #[tokio::test]
    async fn literal_entry_skips_discovery_and_fallback() {
        let mut prompts = 0;
        let ip = resolve_address(" 192.168.1.10 ", async { None }, || {
            prompts += 1;
            Ok(String::new())
        })
        .await
        .unwrap();
        assert_eq!(ip, "192.168.1.10");
        assert_eq!(prompts, 0);
    }

    #[tokio::test]
    async fn empty_discovery_degrades_to_one_manual_prompt() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
            // One locator query, never a second automatic attempt.
            .expect(1)
            .mount(&server)
            .await;

        let http = reqwest::Client::new();
        let locator = server.uri().parse().unwrap();
        let search = async { first_discovered(discover_at(&http, locator).await) };

        let mut prompts = 0;
        let ip = resolve_address("search", search, || {
            prompts += 1;
            Ok("192.168.1.50".into())
        })
        .await
        .unwrap();

        assert_eq!(ip, "192.168.1.50");
        assert_eq!(prompts, 1, "exactly one fallback prompt");
    }

    #[tokio::test]
    async fn successful_discovery_needs_no_fallback() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([
                { "id": "001788fffe4c2912", "internalipaddress": "192.168.1.42" }
            ])))
            .expect(1)
            .mount(&server)
            .await;

        let http = reqwest::Client::new();
        let locator = server.uri().parse().unwrap();
        let search = async { first_discovered(discover_at(&http, locator).await) };

        let mut prompts = 0;
        let ip = resolve_address("search", search, || {
            prompts += 1;
            Ok(String::new())
        })
        .await
        .unwrap();

        assert_eq!(ip, "192.168.1.42");
        assert_eq!(prompts, 0);
    }

    #[test]
    fn bridge_rejection_maps_to_pairing_failure() {
        let err = pairing_error(lumen_api::Error::LinkButtonNotPressed);
        assert!(matches!(err, CliError::PairingFailed { .. }));
    }
}
