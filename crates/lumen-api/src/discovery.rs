//! Bridge discovery via the public locator service.
//!
//! The locator (N-UPnP) endpoint reports bridges that have recently phoned
//! home from the caller's public IP. It is a convenience only: callers are
//! expected to fall back to manual address entry when it fails or returns
//! nothing, so this module makes exactly one request and never retries.

use serde::Deserialize;
use tracing::debug;
use url::Url;

use crate::error::Error;

/// Well-known public locator endpoint.
pub const LOCATOR_URL: &str = "https://discovery.meethue.com/";

/// One bridge record as reported by the locator service.
#[derive(Debug, Clone, Deserialize)]
pub struct DiscoveredBridge {
    /// Bridge identifier (serial-derived).
    #[serde(default)]
    pub id: String,
    /// LAN address of the bridge as last seen by the locator.
    pub internalipaddress: String,
}

/// Query the default locator endpoint for bridges on the local network.
///
/// Issues a single GET; any transport or decode failure surfaces as an
/// error for the caller to degrade on. An empty list is a valid outcome.
pub async fn discover(http: &reqwest::Client) -> Result<Vec<DiscoveredBridge>, Error> {
    let url: Url = LOCATOR_URL.parse()?;
    discover_at(http, url).await
}

/// Query a specific locator endpoint. Split out for testability.
pub async fn discover_at(
    http: &reqwest::Client,
    url: Url,
) -> Result<Vec<DiscoveredBridge>, Error> {
    debug!("GET {url}");

    let resp = http.get(url).send().await?.error_for_status()?;
    let body = resp.text().await?;

    let bridges: Vec<DiscoveredBridge> =
        serde_json::from_str(&body).map_err(|e| Error::Deserialization {
            message: e.to_string(),
            body,
        })?;

    debug!(count = bridges.len(), "locator returned bridges");
    Ok(bridges)
}
