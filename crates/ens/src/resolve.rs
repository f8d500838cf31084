//! Dual resolution of a name or an address.

use crate::{EnsError, EnsReader, InputKind, classify};
use alloy_primitives::Address;
use std::str::FromStr;

/// The `(name, address)` pair an input resolved to.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ResolvedIdentity {
    /// The normalized name, or the primary name of the address.
    pub name: Option<String>,
    /// The input address, or the address the name resolves to.
    pub address: Option<Address>,
    /// What the input was.
    pub kind: InputKind,
}

impl ResolvedIdentity {
    /// The result of a failed resolution.
    pub const fn not_found() -> Self {
        Self { name: None, address: None, kind: InputKind::Name }
    }

    /// Returns `true` if neither half resolved.
    pub fn is_not_found(&self) -> bool {
        self.name.is_none() && self.address.is_none()
    }

    /// Returns `true` if both halves resolved.
    pub fn is_complete(&self) -> bool {
        self.name.is_some() && self.address.is_some()
    }
}

/// Why [`try_resolve`] failed.
#[derive(Debug, thiserror::Error)]
pub enum ResolveError {
    /// The input looked like a name but failed normalization.
    #[error("invalid name `{input}`")]
    InvalidName {
        /// The raw input.
        input: String,
        /// The normalization error.
        #[source]
        source: EnsError,
    },
    /// The input looked like an address but is not 20 bytes of hex.
    #[error("invalid address `{input}`")]
    InvalidAddress {
        /// The raw input.
        input: String,
        /// The parse error.
        #[source]
        source: EnsError,
    },
    /// The lookup itself failed, e.g. because the node is unreachable.
    #[error("failed to resolve `{input}`")]
    Lookup {
        /// The raw input.
        input: String,
        /// The lookup error.
        #[source]
        source: EnsError,
    },
}

impl ResolveError {
    /// Returns the raw input that failed to resolve.
    pub fn input(&self) -> &str {
        match self {
            Self::InvalidName { input, .. }
            | Self::InvalidAddress { input, .. }
            | Self::Lookup { input, .. } => input,
        }
    }
}

/// Resolves the counterpart of `input`, distinguishing failures from absent records.
///
/// An address input is reverse resolved, a name input is normalized and forward resolved. An
/// unbound counterpart is `None`, not an error.
pub async fn try_resolve<R: EnsReader + ?Sized>(
    reader: &R,
    input: &str,
) -> Result<ResolvedIdentity, ResolveError> {
    match classify(input) {
        InputKind::Address => {
            let address = Address::from_str(input).map_err(|_| ResolveError::InvalidAddress {
                input: input.to_string(),
                source: EnsError::InvalidAddress(input.to_string()),
            })?;
            let name = reader
                .lookup_address(address)
                .await
                .map_err(|source| ResolveError::Lookup { input: input.to_string(), source })?;
            Ok(ResolvedIdentity { name, address: Some(address), kind: InputKind::Address })
        }
        InputKind::Name => {
            let name = reader
                .normalize(input)
                .map_err(|source| ResolveError::InvalidName { input: input.to_string(), source })?;
            let address = reader
                .resolve_name(&name)
                .await
                .map_err(|source| ResolveError::Lookup { input: input.to_string(), source })?;
            Ok(ResolvedIdentity { name: Some(name), address, kind: InputKind::Name })
        }
    }
}

/// Resolves the counterpart of `input`, collapsing every failure into
/// [`ResolvedIdentity::not_found`].
pub async fn resolve<R: EnsReader + ?Sized>(reader: &R, input: &str) -> ResolvedIdentity {
    try_resolve(reader, input).await.unwrap_or_else(|err| {
        let err = eyre::Report::new(err);
        debug!(%input, err = format!("{err:#}"), "resolution failed");
        ResolvedIdentity::not_found()
    })
}
