use crate::normalize::NormalizeError;
use alloy_transport::TransportError;

/// Errors raised by the ENS collaborators.
#[derive(Debug, thiserror::Error)]
pub enum EnsError {
    /// The name failed normalization.
    #[error(transparent)]
    Normalize(#[from] NormalizeError),
    /// A record value could not be encoded or decoded.
    #[error(transparent)]
    Codec(#[from] CodecError),
    /// The input is not a 20 byte hex address.
    #[error("invalid address `{0}`")]
    InvalidAddress(String),
    /// A read-only contract call failed.
    #[error("failed to call `{method}`: {source}")]
    Call {
        /// The contract method.
        method: &'static str,
        /// The underlying error.
        #[source]
        source: alloy_contract::Error,
    },
    /// A transaction could not be submitted.
    #[error("failed to send `{method}`: {source}")]
    Send {
        /// The contract method.
        method: &'static str,
        /// The underlying error.
        #[source]
        source: alloy_contract::Error,
    },
    /// The subgraph request failed.
    #[error("subgraph request failed: {0}")]
    Subgraph(#[from] reqwest::Error),
    /// The subgraph answered with GraphQL errors.
    #[error("subgraph error: {0}")]
    SubgraphResponse(String),
    /// There is no known ENS deployment on the chain.
    #[error("no ENS deployment known for chain {0}")]
    UnsupportedChain(u64),
    /// The name has no resolver set.
    #[error("no resolver found for `{0}`")]
    NoResolver(String),
    /// A resolver answered with data that doesn't match the call.
    #[error("failed to decode resolver response: {0}")]
    Decode(#[from] alloy_sol_types::Error),
    /// An EIP-3668 offchain lookup failed.
    #[error("offchain lookup failed: {0}")]
    Offchain(String),
}

impl From<alloy_ens::EnsError> for EnsError {
    fn from(err: alloy_ens::EnsError) -> Self {
        use alloy_ens::EnsError as Registry;
        let (method, source) = match err {
            Registry::ResolverNotFound(name) => return Self::NoResolver(name),
            Registry::ReverseRegistrarNotFound => {
                return Self::NoResolver(alloy_ens::ENS_REVERSE_REGISTRAR_DOMAIN.to_string());
            }
            Registry::Resolver(source) => ("resolver", source),
            Registry::RevRegistrar(source) => ("owner", source),
            Registry::Lookup(source) => ("name", source),
            Registry::Resolve(source) => ("addr", source),
            Registry::ResolveTxtRecord(source) => ("text", source),
        };
        Self::Call { method, source }
    }
}

impl EnsError {
    /// Returns the short diagnostic of the failing collaborator.
    ///
    /// For JSON-RPC failures this is the message of the error payload returned by the node, e.g.
    /// `execution reverted`, rather than the full request context.
    pub fn short_message(&self) -> String {
        match self {
            Self::Call { source, .. } | Self::Send { source, .. } => contract_message(source),
            Self::Subgraph(err) => match err.status() {
                Some(status) => format!("subgraph responded with {status}"),
                None => err.to_string(),
            },
            err => err.to_string(),
        }
    }
}

fn contract_message(err: &alloy_contract::Error) -> String {
    match err {
        alloy_contract::Error::TransportError(err) => transport_message(err),
        err => err.to_string(),
    }
}

fn transport_message(err: &TransportError) -> String {
    match err.as_error_resp() {
        Some(payload) => payload.message.to_string(),
        None => err.to_string(),
    }
}

/// Errors raised while encoding or decoding record values.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum CodecError {
    /// The coin symbol or coin type is not supported.
    #[error("unsupported coin `{0}`")]
    UnknownCoin(String),
    /// The value is not a valid address for the coin.
    #[error("invalid {coin} address `{value}`: {reason}")]
    InvalidCoinAddress {
        /// The coin symbol.
        coin: String,
        /// The rejected value.
        value: String,
        /// Why it was rejected.
        reason: String,
    },
    /// The on-chain coin record bytes can't be rendered for the coin.
    #[error("malformed {coin} record 0x{data}")]
    MalformedCoinRecord {
        /// The coin symbol.
        coin: String,
        /// Hex encoded record bytes.
        data: String,
    },
    /// The content hash is malformed.
    #[error("invalid content hash `{0}`")]
    InvalidContentHash(String),
    /// The content hash uses a protocol this codec doesn't know.
    #[error("unsupported content hash protocol `{0}`")]
    UnsupportedProtocol(String),
    /// The ABI can't be encoded in the requested format.
    #[error("invalid ABI record: {0}")]
    InvalidAbi(String),
}
