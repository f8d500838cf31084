//! EIP-3668 offchain lookups and ENSIP-10 name encoding.

use crate::{EnsError, contracts::IOffchain::OffchainLookup};
use alloy_primitives::{Address, Bytes, hex, keccak256};
use alloy_sol_types::SolValue;
use serde::{Deserialize, Serialize};
use std::{borrow::Cow, time::Duration};
use url::Url;

/// Offchain lookups followed for a single call before giving up.
pub const MAX_LOOKUPS: usize = 4;

/// DNS wire-format encoding of `name`, as passed to ENSIP-10 `resolve`.
///
/// Labels longer than 255 bytes are replaced by their `[<labelhash>]` form.
pub fn dns_encode(name: &str) -> Bytes {
    let mut encoded = Vec::with_capacity(name.len() + 2);
    for label in name.split('.').filter(|label| !label.is_empty()) {
        let label = match u8::try_from(label.len()) {
            Ok(_) => Cow::Borrowed(label),
            Err(_) => Cow::Owned(format!("[{}]", hex::encode(keccak256(label)))),
        };
        // a hashed label is 66 bytes
        encoded.push(u8::try_from(label.len()).unwrap_or(u8::MAX));
        encoded.extend_from_slice(label.as_bytes());
    }
    encoded.push(0);
    encoded.into()
}

/// A request to a CCIP-read gateway.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum GatewayRequest {
    /// The URL template has a `{data}` placeholder.
    Get(Url),
    /// The call data travels in a JSON body.
    Post(Url, GatewayBody),
}

/// JSON body of a `POST` gateway request.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct GatewayBody {
    /// Lowercase `0x` hex call data.
    pub data: String,
    /// Lowercase `0x` hex sender.
    pub sender: String,
}

impl GatewayRequest {
    /// Expands a gateway URL template for `sender` and `data`.
    pub fn new(template: &str, sender: Address, data: &[u8]) -> Result<Self, EnsError> {
        let sender = format!("{sender:#x}");
        let data = hex::encode_prefixed(data);
        let expanded = template.replace("{sender}", &sender);
        let parse = |url: &str| {
            Url::parse(url)
                .map_err(|err| EnsError::Offchain(format!("invalid gateway `{url}`: {err}")))
        };
        if expanded.contains("{data}") {
            return Ok(Self::Get(parse(&expanded.replace("{data}", &data))?));
        }
        Ok(Self::Post(parse(&expanded)?, GatewayBody { data, sender }))
    }

    fn url(&self) -> &Url {
        match self {
            Self::Get(url) | Self::Post(url, _) => url,
        }
    }
}

#[derive(Deserialize)]
struct GatewayResponse {
    data: String,
}

/// Returns the call data of the callback that completes `lookup` with the gateway `response`.
pub fn callback_data(lookup: &OffchainLookup, response: Bytes) -> Bytes {
    let args = (response, lookup.extraData.clone()).abi_encode_params();
    [lookup.callbackFunction.as_slice(), args.as_slice()].concat().into()
}

/// HTTP client of CCIP-read gateways.
#[derive(Clone, Debug)]
pub struct Gateway {
    client: reqwest::Client,
}

impl Gateway {
    /// Request timeout.
    pub const TIMEOUT: Duration = Duration::from_secs(30);

    /// Creates a new client.
    pub fn new() -> Result<Self, EnsError> {
        let client = reqwest::Client::builder()
            .timeout(Self::TIMEOUT)
            .build()
            .map_err(|err| EnsError::Offchain(err.to_string()))?;
        Ok(Self { client })
    }

    /// Serves `lookup`, reverted by a call to `to`, and returns the callback call data.
    ///
    /// Gateways are tried in order; a `4xx` answer ends the lookup.
    pub async fn lookup(&self, to: Address, lookup: &OffchainLookup) -> Result<Bytes, EnsError> {
        if lookup.sender != to {
            return Err(EnsError::Offchain(format!(
                "lookup sender {} does not match {to}",
                lookup.sender
            )));
        }
        let mut last_error = EnsError::Offchain("no gateway urls".to_string());
        for template in &lookup.urls {
            let request = GatewayRequest::new(template, lookup.sender, &lookup.callData)?;
            debug!(url = %request.url(), "querying gateway");
            match self.fetch(&request).await {
                Ok(response) => return Ok(callback_data(lookup, response)),
                Err((err, retry)) => {
                    debug!(%err, "gateway failed");
                    if !retry {
                        return Err(err);
                    }
                    last_error = err;
                }
            }
        }
        Err(last_error)
    }

    /// Fetches the gateway answer. The flag on errors tells whether the next gateway may be tried.
    async fn fetch(&self, request: &GatewayRequest) -> Result<Bytes, (EnsError, bool)> {
        let builder = match request {
            GatewayRequest::Get(url) => self.client.get(url.clone()),
            GatewayRequest::Post(url, body) => self.client.post(url.clone()).json(body),
        };
        let failed = |reason: String| EnsError::Offchain(format!("{}: {reason}", request.url()));
        let response = builder.send().await.map_err(|err| (failed(err.to_string()), true))?;
        let status = response.status();
        if !status.is_success() {
            let reason = format!("gateway responded with {status}");
            return Err((failed(reason), !status.is_client_error()));
        }
        let body = response
            .json::<GatewayResponse>()
            .await
            .map_err(|err| (failed(err.to_string()), true))?;
        hex::decode(&body.data).map(Bytes::from).map_err(|err| (failed(err.to_string()), true))
    }
}
