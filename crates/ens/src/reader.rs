use crate::{EnsError, coins::CoinRecord, contenthash::ContentHash, normalize::normalize};
use alloy_primitives::Address;
use async_trait::async_trait;

/// Read access to ENS records.
///
/// Absent records are `Ok(None)`, errors are reserved for invalid input and failed lookups.
#[async_trait]
pub trait EnsReader: Send + Sync {
    /// Normalizes a name.
    fn normalize(&self, name: &str) -> Result<String, EnsError> {
        Ok(normalize(name)?)
    }

    /// Returns the address `name` resolves to.
    async fn resolve_name(&self, name: &str) -> Result<Option<Address>, EnsError>;

    /// Returns the primary name of `address`.
    async fn lookup_address(&self, address: Address) -> Result<Option<String>, EnsError>;

    /// Returns the resolver set for `name`.
    async fn resolver(&self, name: &str) -> Result<Option<Address>, EnsError>;

    /// Returns the text record `key` of `name`.
    async fn text(&self, name: &str, key: &str) -> Result<Option<String>, EnsError>;

    /// Returns the decoded content hash of `name`.
    async fn content_hash(&self, name: &str) -> Result<Option<ContentHash>, EnsError>;

    /// Returns one address record per coin in `coins`, in order.
    async fn coin_records(&self, name: &str, coins: &[&str]) -> Result<Vec<CoinRecord>, EnsError>;
}
