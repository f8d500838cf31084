use crate::{EnsError, abi_record::EncodedAbi};
use alloy_primitives::{Address, TxHash};
use async_trait::async_trait;
use std::{fmt, str::FromStr};

/// The contract a resolver change is sent to.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ResolverContract {
    /// The ENS registry, for unwrapped names.
    #[default]
    Registry,
    /// The name wrapper, for wrapped names.
    NameWrapper,
}

impl FromStr for ResolverContract {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "registry" => Ok(Self::Registry),
            "nameWrapper" | "name-wrapper" | "namewrapper" => Ok(Self::NameWrapper),
            other => {
                Err(format!("unknown contract `{other}`, expected `registry` or `nameWrapper`"))
            }
        }
    }
}

impl fmt::Display for ResolverContract {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Registry => "registry",
            Self::NameWrapper => "nameWrapper",
        })
    }
}

/// Write access to ENS records.
///
/// Every method returns as soon as the node accepted the transaction, without waiting for it to
/// be mined.
#[async_trait]
pub trait EnsWriter: Send + Sync {
    /// Sets the text record `key` of `name`. An empty value clears the record.
    async fn set_text(
        &self,
        name: &str,
        key: &str,
        value: &str,
        resolver: Address,
    ) -> Result<TxHash, EnsError>;

    /// Sets the address record of `name` for `coin`.
    async fn set_address(
        &self,
        name: &str,
        coin: &str,
        value: &str,
        resolver: Address,
    ) -> Result<TxHash, EnsError>;

    /// Points `name` at a new resolver.
    async fn set_resolver(
        &self,
        name: &str,
        resolver: Address,
        contract: ResolverContract,
    ) -> Result<TxHash, EnsError>;

    /// Makes `name` the primary name of the signer.
    async fn set_primary_name(&self, name: &str) -> Result<TxHash, EnsError>;

    /// Sets the ABI record of `name`.
    async fn set_abi_record(
        &self,
        name: &str,
        abi: &EncodedAbi,
        resolver: Address,
    ) -> Result<TxHash, EnsError>;

    /// Sets the content hash of `name` from its text form. An empty value clears the record.
    async fn set_content_hash(
        &self,
        name: &str,
        content_hash: &str,
        resolver: Address,
    ) -> Result<TxHash, EnsError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_contract() {
        assert_eq!("registry".parse::<ResolverContract>().unwrap(), ResolverContract::Registry);
        assert_eq!(
            "nameWrapper".parse::<ResolverContract>().unwrap(),
            ResolverContract::NameWrapper
        );
        assert_eq!(
            "name-wrapper".parse::<ResolverContract>().unwrap(),
            ResolverContract::NameWrapper
        );
        assert!("wrapper".parse::<ResolverContract>().is_err());
    }
}
