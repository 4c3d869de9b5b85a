// Bridge HTTP client
//
// Wraps `reqwest::Client` with bridge-specific URL construction and error
// envelope handling. The bridge returns plain JSON objects on success but
// a `[{"error": {...}}]` array on failure (bad credential, unknown id),
// so every response goes through the same envelope check.

use std::collections::BTreeMap;

use serde::de::DeserializeOwned;
use serde::Deserialize;
use tracing::debug;
use url::Url;

use crate::error::Error;
use crate::models::{GroupAttributes, LightAttributes, StateUpdate};
use crate::pairing::BridgeErrorBody;
use crate::transport::TransportConfig;

/// Raw HTTP client for a paired bridge.
///
/// All methods are credential-scoped: paths are built as
/// `{base}/api/{username}/{path}`. Callers own retry policy (there is
/// none here) and domain mapping.
pub struct BridgeClient {
    http: reqwest::Client,
    base_url: Url,
    username: String,
}

#[derive(Debug, Deserialize)]
struct ErrorReply {
    error: Option<BridgeErrorBody>,
}

impl BridgeClient {
    /// Create a new bridge client from a `TransportConfig`.
    ///
    /// `base_url` is the bridge root, e.g. `http://192.168.1.42`.
    pub fn new(
        base_url: Url,
        username: String,
        transport: &TransportConfig,
    ) -> Result<Self, Error> {
        let http = transport.build_client()?;
        Ok(Self::with_client(http, base_url, username))
    }

    /// Create a bridge client with a pre-built `reqwest::Client`.
    pub fn with_client(http: reqwest::Client, base_url: Url, username: String) -> Self {
        Self {
            http,
            base_url,
            username,
        }
    }

    /// The bridge base URL.
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// The underlying HTTP client (shared with the pairing handshake).
    pub fn http(&self) -> &reqwest::Client {
        &self.http
    }

    /// Build a credential-scoped URL: `{base}/api/{username}/{path}`.
    fn api_url(&self, path: &str) -> Result<Url, Error> {
        Ok(self
            .base_url
            .join(&format!("api/{}/{}", self.username, path))?)
    }

    // ── Topology reads ───────────────────────────────────────────────

    /// Fetch all groups, keyed by group id.
    pub async fn groups(&self) -> Result<BTreeMap<String, GroupAttributes>, Error> {
        self.get(self.api_url("groups")?).await
    }

    /// Fetch all lights, keyed by light id.
    pub async fn lights(&self) -> Result<BTreeMap<String, LightAttributes>, Error> {
        self.get(self.api_url("lights")?).await
    }

    // ── State writes ─────────────────────────────────────────────────

    /// Apply a state update to a group: `PUT groups/{id}/action`.
    pub async fn set_group_state(&self, id: &str, update: &StateUpdate) -> Result<(), Error> {
        self.put(self.api_url(&format!("groups/{id}/action"))?, update)
            .await
    }

    /// Apply a state update to a single light: `PUT lights/{id}/state`.
    pub async fn set_light_state(&self, id: &str, update: &StateUpdate) -> Result<(), Error> {
        self.put(self.api_url(&format!("lights/{id}/state"))?, update)
            .await
    }

    // ── Request helpers ──────────────────────────────────────────────

    async fn get<T: DeserializeOwned>(&self, url: Url) -> Result<T, Error> {
        debug!("GET {url}");
        let resp = self.http.get(url).send().await?;
        let body = resp.text().await?;
        parse_body(&body)
    }

    async fn put(&self, url: Url, update: &StateUpdate) -> Result<(), Error> {
        debug!("PUT {url}");
        let resp = self.http.put(url).json(update).send().await?;
        let body = resp.text().await?;

        // Writes return an array of per-field success/error records.
        let replies: Vec<ErrorReply> =
            serde_json::from_str(&body).map_err(|e| Error::Deserialization {
                message: e.to_string(),
                body: body.clone(),
            })?;
        check_for_error(replies)
    }
}

/// Deserialize a success payload, falling back to the error envelope when
/// the body is not the expected shape.
fn parse_body<T: DeserializeOwned>(body: &str) -> Result<T, Error> {
    match serde_json::from_str::<T>(body) {
        Ok(value) => Ok(value),
        Err(e) => {
            if let Ok(replies) = serde_json::from_str::<Vec<ErrorReply>>(body) {
                check_for_error(replies)?;
            }
            Err(Error::Deserialization {
                message: e.to_string(),
                body: body.to_owned(),
            })
        }
    }
}

fn check_for_error(replies: Vec<ErrorReply>) -> Result<(), Error> {
    for reply in replies {
        if let Some(err) = reply.error {
            return Err(Error::Bridge {
                error_type: err.error_type,
                description: err.description,
            });
        }
    }
    Ok(())
}
