//! Link-button pairing handshake.
//!
//! `POST /api` with a devicetype registers a new application on the bridge
//! and returns a durable username (the API credential). The bridge only
//! accepts the request inside the firmware-defined window after its physical
//! link button was pressed; outside it, the reply is error type 101.
//!
//! The handshake is a single request by design. Re-trying it without a new
//! button press cannot succeed, so any retry policy belongs to the user,
//! not this client.

use serde::Deserialize;
use tracing::debug;
use url::Url;

use crate::error::Error;

/// Error type the bridge reports when the link button was not pressed.
const LINK_BUTTON_NOT_PRESSED: u16 = 101;

#[derive(Debug, Deserialize)]
struct PairingReply {
    success: Option<PairingSuccess>,
    error: Option<BridgeErrorBody>,
}

#[derive(Debug, Deserialize)]
struct PairingSuccess {
    username: String,
}

#[derive(Debug, Deserialize)]
pub(crate) struct BridgeErrorBody {
    #[serde(rename = "type")]
    pub error_type: u16,
    pub description: String,
}

/// Perform the pairing handshake against the bridge at `base_url`.
///
/// Returns the freshly minted credential on success. The caller is expected
/// to have prompted the user to press the link button before calling this.
pub async fn pair(
    http: &reqwest::Client,
    base_url: &Url,
    devicetype: &str,
) -> Result<String, Error> {
    let url = base_url.join("api")?;
    debug!("POST {url} (devicetype={devicetype})");

    let resp = http
        .post(url)
        .json(&serde_json::json!({ "devicetype": devicetype }))
        .send()
        .await?;

    let body = resp.text().await?;
    let replies: Vec<PairingReply> =
        serde_json::from_str(&body).map_err(|e| Error::Deserialization {
            message: e.to_string(),
            body: body.clone(),
        })?;

    for reply in replies {
        if let Some(success) = reply.success {
            return Ok(success.username);
        }
        if let Some(err) = reply.error {
            if err.error_type == LINK_BUTTON_NOT_PRESSED {
                return Err(Error::LinkButtonNotPressed);
            }
            return Err(Error::PairingRejected {
                description: err.description,
            });
        }
    }

    Err(Error::Deserialization {
        message: "pairing reply carried neither success nor error".into(),
        body,
    })
}
