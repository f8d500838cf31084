//! [`EnsReader`] and [`EnsWriter`] over an `alloy` provider.
//!
//! Reads go through the universal resolver of the deployment, which resolves ENSIP-10 wildcards
//! and reverts with EIP-3668 offchain lookups that are served by a [`Gateway`]. When the universal
//! resolver can't serve a name, the resolver set in the registry is queried directly.

use crate::{
    EnsError, EnsReader, EnsWriter, ResolverContract,
    abi_record::EncodedAbi,
    ccip::{self, Gateway, dns_encode},
    coins::{Coin, CoinRecord},
    contenthash::{self, ContentHash},
    contracts::{
        AbiResolver, AddrResolver, ContentHashResolver, EnsRegistry, IOffchain::OffchainLookup,
        MultiCoinResolver, NameResolver, NameWrapper, ReverseRegistrar, TextResolver,
        UniversalResolver,
    },
    deployments::Deployment,
    hash::{namehash, reverse_name},
    normalize::normalize,
};
use alloy_ens::ProviderEnsExt;
use alloy_network::{Ethereum, Network, TransactionBuilder};
use alloy_primitives::{Address, B256, Bytes, TxHash, U256};
use alloy_provider::{DynProvider, Provider};
use alloy_sol_types::{SolCall, SolError};
use alloy_transport::TransportResult;
use async_trait::async_trait;
use std::fmt;

type TransactionRequest = <Ethereum as Network>::TransactionRequest;

/// ENS access through the contracts of a [`Deployment`].
///
/// Reads only need a plain provider; writes need a provider that carries a wallet.
#[derive(Clone)]
pub struct ProviderEns {
    provider: DynProvider,
    deployment: Deployment,
    gateway: Gateway,
}

impl fmt::Debug for ProviderEns {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ProviderEns").field("deployment", &self.deployment).finish_non_exhaustive()
    }
}

impl ProviderEns {
    /// Creates a new instance.
    pub fn new(provider: DynProvider, deployment: Deployment) -> Result<Self, EnsError> {
        Ok(Self { provider, deployment, gateway: Gateway::new()? })
    }

    /// Returns the deployment in use.
    pub fn deployment(&self) -> &Deployment {
        &self.deployment
    }

    /// Returns the resolver of `node` in the registry, `None` if unset.
    async fn resolver_of(&self, node: B256, name: &str) -> Result<Option<Address>, EnsError> {
        match self.provider.get_resolver(node, name).await {
            Ok(resolver) => {
                trace!(%node, resolver = %resolver.address(), "resolver");
                Ok(Some(*resolver.address()))
            }
            Err(alloy_ens::EnsError::ResolverNotFound(_)) => Ok(None),
            Err(err) => Err(err.into()),
        }
    }

    async fn eth_call(&self, to: Address, input: Bytes) -> TransportResult<Bytes> {
        let tx = TransactionRequest::default().with_to(to).with_input(input);
        self.provider.call(tx).await
    }

    /// Runs the resolver call `data` for `name` through the universal resolver.
    ///
    /// Returns `None` when the universal resolver reverts with anything but an offchain lookup.
    /// Other node errors are returned as is.
    async fn universal_call(
        &self,
        name: &str,
        data: Vec<u8>,
        method: &'static str,
    ) -> Result<Option<Bytes>, EnsError> {
        let universal_resolver = self.deployment.universal_resolver;
        let call = UniversalResolver::resolveCall { name: dns_encode(name), data: data.into() };
        let mut input = Bytes::from(call.abi_encode());
        for _ in 0..=ccip::MAX_LOOKUPS {
            let err = match self.eth_call(universal_resolver, input.clone()).await {
                Ok(output) => {
                    let UniversalResolver::resolveReturn { result, resolver } =
                        UniversalResolver::resolveCall::abi_decode_returns(&output)?;
                    trace!(%name, %resolver, method, "universal resolver");
                    return Ok(Some(result));
                }
                Err(err) => err,
            };
            let revert = err
                .as_error_resp()
                .filter(|payload| payload.message.contains("revert"))
                .map(|payload| (payload.message.to_string(), payload.as_revert_data()));
            let Some((message, data)) = revert else {
                let source = alloy_contract::Error::TransportError(err);
                return Err(EnsError::Call { method, source });
            };
            let lookup = data.and_then(|data| OffchainLookup::abi_decode(&data).ok());
            let Some(lookup) = lookup else {
                debug!(%name, %message, "universal resolver reverted, using the registry");
                return Ok(None);
            };
            debug!(%name, urls = ?lookup.urls, "offchain lookup");
            input = self.gateway.lookup(universal_resolver, &lookup).await?;
        }
        Err(EnsError::Offchain(format!("more than {} lookups for `{name}`", ccip::MAX_LOOKUPS)))
    }

    /// Reads `call` from the resolver of `name`, `None` if the name has no resolver.
    async fn read<C: SolCall>(
        &self,
        name: &str,
        node: B256,
        method: &'static str,
        call: C,
    ) -> Result<Option<C::Return>, EnsError> {
        let data = call.abi_encode();
        let output = match self.universal_call(name, data.clone(), method).await? {
            Some(output) => output,
            None => {
                let Some(resolver) = self.resolver_of(node, name).await? else {
                    return Ok(None);
                };
                self.eth_call(resolver, data.into()).await.map_err(|err| EnsError::Call {
                    method,
                    source: alloy_contract::Error::TransportError(err),
                })?
            }
        };
        Ok(Some(C::abi_decode_returns(&output)?))
    }
}

fn node_of(name: &str) -> Result<(String, B256), EnsError> {
    let name = normalize(name)?;
    let node = namehash(&name);
    Ok((name, node))
}

#[async_trait]
impl EnsReader for ProviderEns {
    async fn resolve_name(&self, name: &str) -> Result<Option<Address>, EnsError> {
        let (name, node) = node_of(name)?;
        debug!(%name, %node, "resolving name");
        let address = self.read(&name, node, "addr", AddrResolver::addrCall { node }).await?;
        Ok(address.filter(|address| !address.is_zero()))
    }

    async fn lookup_address(&self, address: Address) -> Result<Option<String>, EnsError> {
        let reverse = reverse_name(&address);
        let node = namehash(&reverse);
        debug!(%address, %node, "looking up address");
        let call = NameResolver::nameCall { node };
        let name = match self.universal_call(&reverse, call.abi_encode(), "name").await? {
            Some(output) => NameResolver::nameCall::abi_decode_returns(&output)?,
            None => match self.provider.lookup_address(&address).await {
                Ok(name) => name,
                Err(alloy_ens::EnsError::ResolverNotFound(_)) => return Ok(None),
                Err(err) => return Err(err.into()),
            },
        };
        if name.is_empty() {
            return Ok(None);
        }

        // a reverse record only counts if the name resolves back to the address
        match self.resolve_name(&name).await {
            Ok(Some(resolved)) if resolved == address => Ok(Some(name)),
            Ok(resolved) => {
                debug!(%name, ?resolved, "reverse record does not resolve back");
                Ok(None)
            }
            Err(EnsError::Normalize(err)) => {
                debug!(%err, "reverse record is not a valid name");
                Ok(None)
            }
            Err(err) => Err(err),
        }
    }

    async fn resolver(&self, name: &str) -> Result<Option<Address>, EnsError> {
        let (name, node) = node_of(name)?;
        self.resolver_of(node, &name).await
    }

    async fn text(&self, name: &str, key: &str) -> Result<Option<String>, EnsError> {
        let (name, node) = node_of(name)?;
        debug!(%name, key, "fetching text record");
        let call = TextResolver::textCall { node, key: key.to_string() };
        let value = self.read(&name, node, "text", call).await?;
        Ok(value.filter(|value| !value.is_empty()))
    }

    async fn content_hash(&self, name: &str) -> Result<Option<ContentHash>, EnsError> {
        let (name, node) = node_of(name)?;
        debug!(%name, "fetching content hash");
        let call = ContentHashResolver::contenthashCall { node };
        match self.read(&name, node, "contenthash", call).await? {
            Some(raw) if !raw.is_empty() => Ok(Some(contenthash::decode(&raw)?)),
            _ => Ok(None),
        }
    }

    async fn coin_records(&self, name: &str, coins: &[&str]) -> Result<Vec<CoinRecord>, EnsError> {
        let (name, node) = node_of(name)?;
        let coins =
            coins.iter().map(|coin| Coin::from_symbol(coin)).collect::<Result<Vec<_>, _>>()?;
        debug!(%name, coins = coins.len(), "fetching coin records");

        let mut records = Vec::with_capacity(coins.len());
        for coin in coins {
            let call = MultiCoinResolver::addrCall { node, coinType: U256::from(coin.coin_type) };
            let value = match self.read(&name, node, "addr", call).await? {
                Some(raw) if !raw.is_empty() => Some(coin.decode(&raw)?),
                _ => None,
            };
            records.push(CoinRecord { symbol: coin.symbol, coin_type: coin.coin_type, value });
        }
        Ok(records)
    }
}

#[async_trait]
impl EnsWriter for ProviderEns {
    async fn set_text(
        &self,
        name: &str,
        key: &str,
        value: &str,
        resolver: Address,
    ) -> Result<TxHash, EnsError> {
        let (name, node) = node_of(name)?;
        debug!(%name, key, %resolver, "setting text record");
        let pending = TextResolver::new(resolver, &self.provider)
            .setText(node, key.to_string(), value.to_string())
            .send()
            .await
            .map_err(|source| EnsError::Send { method: "setText", source })?;
        Ok(*pending.tx_hash())
    }

    async fn set_address(
        &self,
        name: &str,
        coin: &str,
        value: &str,
        resolver: Address,
    ) -> Result<TxHash, EnsError> {
        let (name, node) = node_of(name)?;
        let coin = Coin::from_symbol(coin)?;
        let encoded = coin.encode(value)?;
        debug!(%name, coin = %coin.symbol, %resolver, "setting address record");
        let pending = MultiCoinResolver::new(resolver, &self.provider)
            .setAddr(node, U256::from(coin.coin_type), Bytes::from(encoded))
            .send()
            .await
            .map_err(|source| EnsError::Send { method: "setAddr", source })?;
        Ok(*pending.tx_hash())
    }

    async fn set_resolver(
        &self,
        name: &str,
        resolver: Address,
        contract: ResolverContract,
    ) -> Result<TxHash, EnsError> {
        let (name, node) = node_of(name)?;
        debug!(%name, %resolver, %contract, "setting resolver");
        let pending = match contract {
            ResolverContract::Registry => {
                EnsRegistry::new(self.deployment.registry, &self.provider)
                    .setResolver(node, resolver)
                    .send()
                    .await
            }
            ResolverContract::NameWrapper => {
                NameWrapper::new(self.deployment.name_wrapper, &self.provider)
                    .setResolver(node, resolver)
                    .send()
                    .await
            }
        }
        .map_err(|source| EnsError::Send { method: "setResolver", source })?;
        Ok(*pending.tx_hash())
    }

    async fn set_primary_name(&self, name: &str) -> Result<TxHash, EnsError> {
        let name = normalize(name)?;
        debug!(%name, "setting primary name");
        let pending = ReverseRegistrar::new(self.deployment.reverse_registrar, &self.provider)
            .setName(name)
            .send()
            .await
            .map_err(|source| EnsError::Send { method: "setName", source })?;
        Ok(*pending.tx_hash())
    }

    async fn set_abi_record(
        &self,
        name: &str,
        abi: &EncodedAbi,
        resolver: Address,
    ) -> Result<TxHash, EnsError> {
        let (name, node) = node_of(name)?;
        debug!(%name, content_type = abi.content_type, len = abi.data.len(), "setting ABI record");
        let pending = AbiResolver::new(resolver, &self.provider)
            .setABI(node, U256::from(abi.content_type), abi.data.clone())
            .send()
            .await
            .map_err(|source| EnsError::Send { method: "setABI", source })?;
        Ok(*pending.tx_hash())
    }

    async fn set_content_hash(
        &self,
        name: &str,
        content_hash: &str,
        resolver: Address,
    ) -> Result<TxHash, EnsError> {
        let (name, node) = node_of(name)?;
        let encoded = match content_hash {
            "" => Vec::new(),
            value => contenthash::encode(value)?,
        };
        debug!(%name, %resolver, "setting content hash");
        let pending = ContentHashResolver::new(resolver, &self.provider)
            .setContenthash(node, Bytes::from(encoded))
            .send()
            .await
            .map_err(|source| EnsError::Send { method: "setContenthash", source })?;
        Ok(*pending.tx_hash())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::deployments::MAINNET;
    use alloy_primitives::{FixedBytes, address, hex};
    use alloy_provider::{ProviderBuilder, mock::Asserter};
    use alloy_sol_types::SolValue;

    const VITALIK: Address = address!("0xd8dA6BF26964aF9D7eEd9e03E53415D37aA96045");
    const RESOLVER: Address = address!("0x231b0Ee14048e9dCcD1d247744d114a4EB5E8E63");

    fn ens(asserter: &Asserter) -> ProviderEns {
        let provider = ProviderBuilder::new()
            .disable_recommended_fillers()
            .connect_mocked_client(asserter.clone())
            .erased();
        ProviderEns::new(provider, MAINNET).unwrap()
    }

    /// Queues a universal resolver answer wrapping the encoded resolver return `result`.
    fn resolved(asserter: &Asserter, result: Vec<u8>) {
        let output = (Bytes::from(result), RESOLVER).abi_encode_params();
        asserter.push_success(&Bytes::from(output));
    }

    fn reverted(asserter: &Asserter, data: &[u8]) {
        let payload = serde_json::json!({
            "code": 3,
            "message": "execution reverted",
            "data": hex::encode_prefixed(data),
        });
        asserter.push_failure(serde_json::from_value(payload).unwrap());
    }

    #[tokio::test]
    async fn reads_through_universal_resolver() {
        let asserter = Asserter::new();
        let ens = ens(&asserter);

        resolved(&asserter, (VITALIK,).abi_encode_params());
        assert_eq!(ens.resolve_name("vitalik.eth").await.unwrap(), Some(VITALIK));

        resolved(&asserter, ("https://vitalik.ca".to_string(),).abi_encode_params());
        let url = ens.text("sub.vitalik.eth", "url").await.unwrap();
        assert_eq!(url.as_deref(), Some("https://vitalik.ca"));

        resolved(&asserter, (String::new(),).abi_encode_params());
        assert_eq!(ens.text("vitalik.eth", "com.github").await.unwrap(), None);
        assert!(asserter.read_q().is_empty());
    }

    #[tokio::test]
    async fn revert_falls_back_to_registry() {
        let asserter = Asserter::new();
        let ens = ens(&asserter);

        reverted(&asserter, &[0x77, 0x20, 0x9f, 0xe8]);
        asserter.push_success(&Bytes::from((RESOLVER,).abi_encode_params()));
        asserter.push_success(&Bytes::from((VITALIK,).abi_encode_params()));
        assert_eq!(ens.resolve_name("vitalik.eth").await.unwrap(), Some(VITALIK));
        assert!(asserter.read_q().is_empty());
    }

    #[tokio::test]
    async fn missing_resolver_is_none() {
        let asserter = Asserter::new();
        let ens = ens(&asserter);

        reverted(&asserter, &[0x77, 0x20, 0x9f, 0xe8]);
        asserter.push_success(&Bytes::from((Address::ZERO,).abi_encode_params()));
        assert_eq!(ens.resolve_name("nobody.eth").await.unwrap(), None);

        asserter.push_success(&Bytes::from((Address::ZERO,).abi_encode_params()));
        assert_eq!(ens.resolver("nobody.eth").await.unwrap(), None);
    }

    #[tokio::test]
    async fn node_errors_propagate() {
        let asserter = Asserter::new();
        asserter.push_failure_msg("rate limited");
        let err = ens(&asserter).text("vitalik.eth", "url").await.unwrap_err();
        assert!(matches!(err, EnsError::Call { method: "text", .. }), "{err}");
        assert_eq!(err.short_message(), "rate limited");
    }

    #[tokio::test]
    async fn offchain_lookup_must_come_from_universal_resolver() {
        let asserter = Asserter::new();
        let lookup = OffchainLookup {
            sender: RESOLVER,
            urls: vec!["https://gateway.example/{sender}/{data}.json".to_string()],
            callData: Bytes::new(),
            callbackFunction: FixedBytes::ZERO,
            extraData: Bytes::new(),
        };
        reverted(&asserter, &lookup.abi_encode());
        let err = ens(&asserter).resolve_name("vitalik.eth").await.unwrap_err();
        assert!(matches!(err, EnsError::Offchain(_)), "{err}");
    }

    #[tokio::test]
    async fn primary_name_is_verified_forward() {
        let asserter = Asserter::new();
        let ens = ens(&asserter);

        resolved(&asserter, ("vitalik.eth".to_string(),).abi_encode_params());
        resolved(&asserter, (VITALIK,).abi_encode_params());
        assert_eq!(ens.lookup_address(VITALIK).await.unwrap().as_deref(), Some("vitalik.eth"));

        resolved(&asserter, ("vitalik.eth".to_string(),).abi_encode_params());
        resolved(&asserter, (RESOLVER,).abi_encode_params());
        assert_eq!(ens.lookup_address(VITALIK).await.unwrap(), None);
    }
}
