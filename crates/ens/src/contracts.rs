//! Bindings for the ENS contracts atlas talks to.

#![allow(missing_docs)]

use alloy_sol_types::sol;

sol! {
    /// ENS registry.
    #[sol(rpc)]
    contract EnsRegistry {
        function resolver(bytes32 node) external view returns (address);
        function setResolver(bytes32 node, address resolver) external;
    }

    /// ENS name wrapper, owner of wrapped names in the registry.
    #[sol(rpc)]
    contract NameWrapper {
        function setResolver(bytes32 node, address resolver) external;
    }

    /// EIP-137 address resolution.
    #[sol(rpc)]
    interface AddrResolver {
        function addr(bytes32 node) external view returns (address payable);
    }

    /// ENSIP-9 multi-coin address resolution.
    #[sol(rpc)]
    interface MultiCoinResolver {
        function addr(bytes32 node, uint256 coinType) external view returns (bytes memory);
        function setAddr(bytes32 node, uint256 coinType, bytes calldata a) external;
    }

    /// ENSIP-5 text records.
    #[sol(rpc)]
    interface TextResolver {
        function text(bytes32 node, string calldata key) external view returns (string memory);
        function setText(bytes32 node, string calldata key, string calldata value) external;
    }

    /// Reverse resolution.
    #[sol(rpc)]
    interface NameResolver {
        function name(bytes32 node) external view returns (string memory);
    }

    /// ENSIP-7 content hashes.
    #[sol(rpc)]
    interface ContentHashResolver {
        function contenthash(bytes32 node) external view returns (bytes memory);
        function setContenthash(bytes32 node, bytes calldata hash) external;
    }

    /// ENSIP-4 ABI records.
    #[sol(rpc)]
    interface AbiResolver {
        function setABI(bytes32 node, uint256 contentType, bytes calldata data) external;
    }

    /// Universal resolver, resolves ENSIP-10 wildcards and follows offchain lookups.
    contract UniversalResolver {
        function resolve(bytes name, bytes data)
            external view returns (bytes result, address resolver);
    }

    /// EIP-3668 offchain data retrieval.
    interface IOffchain {
        error OffchainLookup(
            address sender,
            string[] urls,
            bytes callData,
            bytes4 callbackFunction,
            bytes extraData
        );
    }

    /// Reverse registrar, sets the primary name of the sender.
    #[sol(rpc)]
    contract ReverseRegistrar {
        function setName(string memory name) external returns (bytes32);
    }
}
