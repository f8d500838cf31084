//! In-memory [`EnsReader`] for tests.

#![allow(missing_docs)]

use crate::{
    EnsError, EnsReader,
    coins::{Coin, CoinRecord},
    contenthash::ContentHash,
};
use alloy_primitives::{Address, address};
use alloy_transport::TransportErrorKind;
use async_trait::async_trait;
use std::{
    collections::HashMap,
    sync::{Mutex, PoisonError},
};

pub const VITALIK: &str = "vitalik.eth";
pub const VITALIK_ADDRESS: Address = address!("0xd8dA6BF26964aF9D7eEd9e03E53415D37aA96045");
pub const PUBLIC_RESOLVER: Address = address!("0x231b0Ee14048e9dCcD1d247744d114a4EB5E8E63");

#[derive(Debug, Default)]
pub struct MockEns {
    names: HashMap<String, Address>,
    primary: HashMap<Address, String>,
    texts: HashMap<(String, String), String>,
    coins: HashMap<(String, u64), String>,
    content_hashes: HashMap<String, ContentHash>,
    fail: bool,
    fail_records: bool,
    calls: Mutex<Vec<String>>,
}

impl MockEns {
    pub fn vitalik() -> Self {
        Self::default()
            .with_name(VITALIK, VITALIK_ADDRESS)
            .with_primary(VITALIK_ADDRESS, VITALIK)
            .with_text(VITALIK, "url", "https://vitalik.ca")
            .with_text(VITALIK, "com.twitter", "VitalikButerin")
            .with_coin(VITALIK, 60, &VITALIK_ADDRESS.to_checksum(None))
            .with_content_hash(VITALIK, "ipfs", "QmRAQB6YaCyidP37UdDnjFY5vQuiBrcqdyoW1CuDgwxkD4")
    }

    pub fn with_name(mut self, name: &str, address: Address) -> Self {
        self.names.insert(name.to_string(), address);
        self
    }

    pub fn with_primary(mut self, address: Address, name: &str) -> Self {
        self.primary.insert(address, name.to_string());
        self
    }

    pub fn with_text(mut self, name: &str, key: &str, value: &str) -> Self {
        self.texts.insert((name.to_string(), key.to_string()), value.to_string());
        self
    }

    pub fn with_coin(mut self, name: &str, coin_type: u64, value: &str) -> Self {
        self.coins.insert((name.to_string(), coin_type), value.to_string());
        self
    }

    pub fn with_content_hash(mut self, name: &str, protocol: &str, decoded: &str) -> Self {
        let hash =
            ContentHash { protocol_type: protocol.to_string(), decoded: decoded.to_string() };
        self.content_hashes.insert(name.to_string(), hash);
        self
    }

    /// Makes every lookup fail like an unreachable node.
    pub fn failing(mut self) -> Self {
        self.fail = true;
        self
    }

    /// Makes record lookups fail while names and addresses still resolve.
    pub fn failing_records(mut self) -> Self {
        self.fail_records = true;
        self
    }

    /// Returns the recorded lookups, `"<method> <argument>"`.
    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap_or_else(PoisonError::into_inner).clone()
    }

    fn record(&self, call: String) -> Result<(), EnsError> {
        self.log(call, self.fail)
    }

    fn record_lookup(&self, call: String) -> Result<(), EnsError> {
        self.log(call, self.fail || self.fail_records)
    }

    fn log(&self, call: String, fail: bool) -> Result<(), EnsError> {
        self.calls.lock().unwrap_or_else(PoisonError::into_inner).push(call);
        if fail {
            return Err(EnsError::Call {
                method: "mock",
                source: alloy_contract::Error::TransportError(TransportErrorKind::custom_str(
                    "connection refused",
                )),
            });
        }
        Ok(())
    }
}

#[async_trait]
impl EnsReader for MockEns {
    async fn resolve_name(&self, name: &str) -> Result<Option<Address>, EnsError> {
        self.record(format!("resolve_name {name}"))?;
        Ok(self.names.get(name).copied())
    }

    async fn lookup_address(&self, address: Address) -> Result<Option<String>, EnsError> {
        self.record(format!("lookup_address {address}"))?;
        Ok(self.primary.get(&address).cloned())
    }

    async fn resolver(&self, name: &str) -> Result<Option<Address>, EnsError> {
        self.record(format!("resolver {name}"))?;
        Ok(self.names.contains_key(name).then_some(PUBLIC_RESOLVER))
    }

    async fn text(&self, name: &str, key: &str) -> Result<Option<String>, EnsError> {
        self.record_lookup(format!("text {name} {key}"))?;
        Ok(self.texts.get(&(name.to_string(), key.to_string())).cloned())
    }

    async fn content_hash(&self, name: &str) -> Result<Option<ContentHash>, EnsError> {
        self.record_lookup(format!("content_hash {name}"))?;
        Ok(self.content_hashes.get(name).cloned())
    }

    async fn coin_records(&self, name: &str, coins: &[&str]) -> Result<Vec<CoinRecord>, EnsError> {
        self.record_lookup(format!("coin_records {name} {}", coins.join(",")))?;
        coins
            .iter()
            .map(|symbol| -> Result<CoinRecord, EnsError> {
                let coin = Coin::from_symbol(symbol)?;
                let value = self.coins.get(&(name.to_string(), coin.coin_type)).cloned();
                Ok(CoinRecord { symbol: coin.symbol, coin_type: coin.coin_type, value })
            })
            .collect()
    }
}
