use alloy_primitives::{B256, hex::FromHex};
use alloy_signer_local::PrivateKeySigner;
use atlas_config::{Config, figment::value::Dict};
use clap::Parser;

/// Errors raised while turning the configured private key into a signer.
#[derive(Debug, thiserror::Error)]
pub enum PrivateKeyError {
    #[error("Failed to create wallet from private key. Private key is invalid hex")]
    InvalidHex,
    #[error(
        "Failed to create wallet from private key. Invalid private key. But env var {0} exists. Is the `$` anchor missing?"
    )]
    ExistsAsEnvVar(String),
    #[error("Failed to create wallet from private key: {0}")]
    Invalid(String),
}

/// Signing options for record edits.
#[derive(Clone, Default, Parser)]
pub struct WalletOpts {
    /// The private key used to sign transactions, overriding `ATLAS_PRIVATE_KEY`.
    #[arg(long, global = true, value_name = "KEY")]
    pub private_key: Option<String>,
}

impl std::fmt::Debug for WalletOpts {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WalletOpts")
            .field("private_key", &self.private_key.as_ref().map(|_| "<redacted>"))
            .finish()
    }
}

impl WalletOpts {
    pub fn dict(&self) -> Dict {
        let mut dict = Dict::new();
        if let Some(key) = &self.private_key {
            dict.insert("private_key".into(), key.clone().into());
        }
        dict
    }
}

fn ensure_pk_not_env(pk: &str) -> Result<(), PrivateKeyError> {
    if !pk.starts_with("0x") && std::env::var(pk).is_ok() {
        return Err(PrivateKeyError::ExistsAsEnvVar(pk.to_string()));
    }
    Ok(())
}

/// Creates a local signer from a hex encoded private key.
pub fn create_private_key_signer(private_key: &str) -> Result<PrivateKeySigner, PrivateKeyError> {
    let private_key = private_key.trim();
    let Ok(bytes) = B256::from_hex(private_key) else {
        ensure_pk_not_env(private_key)?;
        return Err(PrivateKeyError::InvalidHex);
    };
    PrivateKeySigner::from_bytes(&bytes).map_err(|err| {
        ensure_pk_not_env(private_key).err().unwrap_or(PrivateKeyError::Invalid(err.to_string()))
    })
}

/// Returns the signer of the configured private key, `None` if no key is configured.
pub fn signer(config: &Config) -> Result<Option<PrivateKeySigner>, PrivateKeyError> {
    config.private_key().map(create_private_key_signer).transpose()
}
