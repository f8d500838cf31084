//! # atlas-config
//!
//! Layered configuration for the atlas CLI.
//!
//! Values are merged in this order, later sources winning:
//!
//! 1. built-in defaults,
//! 2. `atlas.toml` in the working directory (or the file named by `ATLAS_CONFIG`),
//! 3. the `ETH_RPC_URL` environment variable,
//! 4. `ATLAS_`-prefixed environment variables, e.g. `ATLAS_PRIVATE_KEY`,
//! 5. command line flags, merged in by the caller.

#![warn(missing_docs, unused_crate_dependencies)]

#[macro_use]
extern crate tracing;

use figment::{
    Figment, Metadata, Profile, Provider,
    providers::{Env, Format, Serialized, Toml},
    value::{Dict, Map},
};
use serde::{Deserialize, Serialize};
use std::fmt;
use url::Url;

mod error;
pub use error::ConfigError;

pub use figment;

/// Atlas configuration.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// JSON-RPC endpoint used for every chain call.
    pub eth_rpc_url: String,
    /// Hex encoded private key used to sign write transactions.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub private_key: Option<String>,
    /// Chain whose ENS deployment is used.
    pub chain_id: u64,
    /// GraphQL endpoint of the ENS subgraph, used to discover text record keys.
    pub subgraph_url: String,
}

impl Config {
    /// The default name of the configuration file.
    pub const FILE_NAME: &'static str = "atlas.toml";

    /// Environment variable that points at an alternative configuration file.
    pub const CONFIG_ENV: &'static str = "ATLAS_CONFIG";

    /// Prefix of the environment variables that map onto config keys.
    pub const ENV_PREFIX: &'static str = "ATLAS_";

    /// Public RPC endpoint used when none is configured.
    pub const DEFAULT_RPC_URL: &'static str = "https://eth.drpc.org";

    /// ENS subgraph used when none is configured.
    pub const DEFAULT_SUBGRAPH_URL: &'static str = "https://api.alpha.ensnode.io/subgraph";

    /// Returns the figment that merges defaults, the config file and the environment.
    pub fn figment() -> Figment {
        let file = Env::var_or(Self::CONFIG_ENV, Self::FILE_NAME);
        trace!(%file, "loading config");
        Figment::from(Self::default())
            .merge(Toml::file(file))
            .merge(Env::raw().only(&["ETH_RPC_URL"]))
            .merge(Env::prefixed(Self::ENV_PREFIX).ignore(&["CONFIG", "DEBUG"]))
    }

    /// Loads the configuration from the config file and the environment.
    pub fn load() -> Result<Self, ConfigError> {
        Self::from_provider(Self::figment())
    }

    /// Extracts a configuration from the given provider.
    pub fn from_provider<T: Provider>(provider: T) -> Result<Self, ConfigError> {
        Ok(Figment::from(provider).extract()?)
    }

    /// Returns the parsed RPC endpoint.
    pub fn rpc_url(&self) -> Result<Url, ConfigError> {
        parse_url("eth_rpc_url", &self.eth_rpc_url)
    }

    /// Returns the parsed subgraph endpoint.
    pub fn subgraph_url(&self) -> Result<Url, ConfigError> {
        parse_url("subgraph_url", &self.subgraph_url)
    }

    /// Returns the configured private key, treating an empty value as unset.
    pub fn private_key(&self) -> Option<&str> {
        self.private_key.as_deref().map(str::trim).filter(|key| !key.is_empty())
    }
}

fn parse_url(setting: &'static str, url: &str) -> Result<Url, ConfigError> {
    Url::parse(url)
        .map_err(|source| ConfigError::InvalidUrl { setting, url: url.to_string(), source })
}

impl Default for Config {
    fn default() -> Self {
        Self {
            eth_rpc_url: Self::DEFAULT_RPC_URL.to_string(),
            private_key: None,
            chain_id: 1,
            subgraph_url: Self::DEFAULT_SUBGRAPH_URL.to_string(),
        }
    }
}

impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("eth_rpc_url", &self.eth_rpc_url)
            .field("private_key", &self.private_key.as_ref().map(|_| "<redacted>"))
            .field("chain_id", &self.chain_id)
            .field("subgraph_url", &self.subgraph_url)
            .finish()
    }
}

impl Provider for Config {
    fn metadata(&self) -> Metadata {
        Metadata::named("Atlas Config")
    }

    fn data(&self) -> Result<Map<Profile, Dict>, figment::Error> {
        Serialized::defaults(self).data()
    }
}
