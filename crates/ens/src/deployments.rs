//! Known ENS contract deployments.

use crate::EnsError;
use alloy_primitives::{Address, address};

/// The ENS contracts deployed on one chain.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Deployment {
    /// Chain id.
    pub chain_id: u64,
    /// Human readable chain name.
    pub chain_name: &'static str,
    /// ENS registry.
    pub registry: Address,
    /// `.eth` base registrar (ERC-721 owner of second level names).
    pub base_registrar: Address,
    /// `.eth` registration controller.
    pub eth_registrar_controller: Address,
    /// Name wrapper.
    pub name_wrapper: Address,
    /// Default public resolver.
    pub public_resolver: Address,
    /// Reverse registrar.
    pub reverse_registrar: Address,
    /// Universal resolver.
    pub universal_resolver: Address,
    /// Bulk renewal helper.
    pub bulk_renewal: Address,
    /// DNSSEC registrar.
    pub dns_registrar: Address,
    /// Multicall3.
    pub multicall3: Address,
}

/// Ethereum mainnet.
pub const MAINNET: Deployment = Deployment {
    chain_id: 1,
    chain_name: "mainnet",
    registry: address!("0x00000000000C2E074eC69A0dFb2997BA6C7d2e1e"),
    base_registrar: address!("0x57f1887a8BF19b14fC0dF6Fd9B2acc9Af147eA85"),
    eth_registrar_controller: address!("0x253553366Da8546fC250F225fe3d25d0C782303b"),
    name_wrapper: address!("0xD4416b13d2b3a9aBae7AcD5D6C2BbDBE25686401"),
    public_resolver: address!("0x231b0Ee14048e9dCcD1d247744d114a4EB5E8E63"),
    reverse_registrar: address!("0xa58E81fe9b61B5c3fE2AFD33CF304c454AbFc7Cb"),
    universal_resolver: address!("0xce01f8eee7E479C928F8919abD53E553a36CeF67"),
    bulk_renewal: address!("0xa12159e5131b1eEf6B4857EEE3e1954744b5033A"),
    dns_registrar: address!("0xB32cB5677a7C971689228EC835800432B339bA2B"),
    multicall3: address!("0xcA11bde05977b3631167028862bE2a173976CA11"),
};

/// Sepolia testnet.
pub const SEPOLIA: Deployment = Deployment {
    chain_id: 11155111,
    chain_name: "sepolia",
    registry: address!("0x00000000000C2E074eC69A0dFb2997BA6C7d2e1e"),
    base_registrar: address!("0x57f1887a8BF19b14fC0dF6Fd9B2acc9Af147eA85"),
    eth_registrar_controller: address!("0xFED6a969AaA60E4961FCD3EBF1A2e8913ac65B72"),
    name_wrapper: address!("0x0635513f179D50A207757E05759CbD106d7dFcE8"),
    public_resolver: address!("0x8948458626811dd0c23EB25Cc74291247077cC51"),
    reverse_registrar: address!("0xCF75B92126B02C9811d8c632144288a3eb84afC8"),
    universal_resolver: address!("0xc8Af999e38273D658BE1b921b88A9Ddf005769cC"),
    bulk_renewal: address!("0x4EF77b90762Eddb33C8Eba5B5a19558DaE53D7a1"),
    dns_registrar: address!("0x5a07C75Ae469Bf3ee2657B588e8E6ABAC6741b4f"),
    multicall3: address!("0xcA11bde05977b3631167028862bE2a173976CA11"),
};

/// Every known deployment, ordered by chain id.
pub const DEPLOYMENTS: &[Deployment] = &[MAINNET, SEPOLIA];

impl Deployment {
    /// Returns the deployment on `chain_id`.
    pub fn for_chain(chain_id: u64) -> Result<Self, EnsError> {
        DEPLOYMENTS
            .iter()
            .find(|deployment| deployment.chain_id == chain_id)
            .copied()
            .ok_or(EnsError::UnsupportedChain(chain_id))
    }

    /// Returns the contracts of this deployment with their conventional names.
    pub fn contracts(&self) -> [(&'static str, Address); 10] {
        [
            ("ensBaseRegistrarImplementation", self.base_registrar),
            ("ensBulkRenewal", self.bulk_renewal),
            ("ensDnsRegistrar", self.dns_registrar),
            ("ensEthRegistrarController", self.eth_registrar_controller),
            ("ensNameWrapper", self.name_wrapper),
            ("ensPublicResolver", self.public_resolver),
            ("ensRegistry", self.registry),
            ("ensReverseRegistrar", self.reverse_registrar),
            ("ensUniversalResolver", self.universal_resolver),
            ("multicall3", self.multicall3),
        ]
    }
}

impl Default for Deployment {
    fn default() -> Self {
        MAINNET
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lookup_by_chain() {
        assert_eq!(Deployment::for_chain(1).unwrap(), MAINNET);
        assert_eq!(Deployment::for_chain(11155111).unwrap().chain_name, "sepolia");
        assert!(matches!(Deployment::for_chain(10), Err(EnsError::UnsupportedChain(10))));
    }

    #[test]
    fn registry_is_shared() {
        assert_eq!(MAINNET.registry, SEPOLIA.registry);
        assert_ne!(MAINNET.public_resolver, SEPOLIA.public_resolver);
    }

    #[test]
    fn contracts_are_distinct() {
        for deployment in DEPLOYMENTS {
            let contracts = deployment.contracts();
            for (i, (name, address)) in contracts.iter().enumerate() {
                assert!(!address.is_zero(), "{name}");
                assert!(contracts[i + 1..].iter().all(|(_, other)| other != address), "{name}");
            }
        }
    }
}
