use crate::opts::signer;
use alloy_network::EthereumWallet;
use alloy_provider::{DynProvider, Provider, ProviderBuilder};
use atlas_config::{Config, figment::Figment};
use atlas_ens::{Deployment, ProviderEns, subgraph::SubgraphClient};
use eyre::{Result, WrapErr};
use tracing_subscriber::{EnvFilter, prelude::*};

/// Initializes a tracing subscriber that logs to stderr, filtered by `RUST_LOG`.
pub fn subscriber() {
    tracing_subscriber::Registry::default()
        .with(EnvFilter::from_default_env())
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init()
}

/// Loads a `.env` file from the working directory, if there is one.
pub fn load_dotenv() {
    match dotenvy::dotenv() {
        Ok(path) => trace!(path = %path.display(), "loaded .env"),
        Err(err) if err.not_found() => {}
        Err(err) => warn!(%err, "failed to load .env"),
    }
}

/// Loads the [`Config`] layered under a set of command line options.
pub trait LoadConfig {
    /// Loads the config, with `self` taking precedence over every other source.
    fn load_config(&self) -> Result<Config>;
}

impl<T> LoadConfig for T
where
    for<'a> &'a T: Into<Figment>,
{
    fn load_config(&self) -> Result<Config> {
        let config = Config::from_provider(self.into())?;
        debug!(?config, "loaded config");
        Ok(config)
    }
}

/// Returns a read-only provider for the configured RPC endpoint.
pub fn get_provider(config: &Config) -> Result<DynProvider> {
    let url = config.rpc_url()?;
    Ok(ProviderBuilder::new().connect_http(url).erased())
}

/// Returns a provider that signs with the configured private key, `None` without one.
pub fn get_signer_provider(config: &Config) -> Result<Option<DynProvider>> {
    let Some(signer) = signer(config)? else {
        return Ok(None);
    };
    debug!(from = %signer.address(), "using local signer");
    let url = config.rpc_url()?;
    let provider =
        ProviderBuilder::new().wallet(EthereumWallet::from(signer)).connect_http(url).erased();
    Ok(Some(provider))
}

fn deployment(config: &Config) -> Result<Deployment> {
    Deployment::for_chain(config.chain_id)
        .wrap_err_with(|| format!("unsupported `chain_id` {}", config.chain_id))
}

/// Returns the ENS reader of the configured chain.
pub fn get_ens(config: &Config) -> Result<ProviderEns> {
    Ok(ProviderEns::new(get_provider(config)?, deployment(config)?)?)
}

/// Returns the ENS writer of the configured chain, `None` if no wallet is configured.
pub fn get_ens_writer(config: &Config) -> Result<Option<ProviderEns>> {
    let Some(provider) = get_signer_provider(config)? else {
        return Ok(None);
    };
    Ok(Some(ProviderEns::new(provider, deployment(config)?)?))
}

/// Returns the subgraph client of the configured endpoint.
pub fn get_subgraph(config: &Config) -> Result<SubgraphClient> {
    Ok(SubgraphClient::new(config.subgraph_url()?)?)
}
