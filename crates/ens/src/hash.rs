//! EIP-137 name hashing.

use alloy_primitives::{Address, B256, hex, keccak256};

/// Computes the EIP-137 namehash of `name`.
///
/// The name is hashed as given; normalize it first. The empty name hashes to the zero node, and
/// labels in the encoded `[<labelhash>]` form contribute their hash verbatim.
pub fn namehash(name: &str) -> B256 {
    if !name.split('.').any(|label| encoded_labelhash(label).is_some()) {
        return alloy_ens::namehash(name);
    }
    name.rsplit('.').fold(B256::ZERO, |node, label| {
        keccak256([node.as_slice(), labelhash(label).as_slice()].concat())
    })
}

/// Computes the keccak256 hash of a single label.
pub fn labelhash(label: &str) -> B256 {
    if label.is_empty() {
        return B256::ZERO;
    }
    encoded_labelhash(label).unwrap_or_else(|| keccak256(label.as_bytes()))
}

/// Parses a label of the form `[<64 hex chars>]`.
fn encoded_labelhash(label: &str) -> Option<B256> {
    let digits = label.strip_prefix('[')?.strip_suffix(']')?;
    if digits.len() != 64 {
        return None;
    }
    hex::decode(digits).ok().map(|bytes| B256::from_slice(&bytes))
}

/// Returns the reverse name of `address`, `<lowercase hex>.addr.reverse`.
pub fn reverse_name(address: &Address) -> String {
    alloy_ens::reverse_address(address)
}

/// Returns the namehash of the reverse name of `address`.
pub fn reverse_node(address: &Address) -> B256 {
    namehash(&reverse_name(address))
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloy_primitives::{address, b256};

    #[test]
    fn known_namehashes() {
        assert_eq!(namehash(""), B256::ZERO);
        assert_eq!(
            namehash("eth"),
            b256!("0x93cdeb708b7545dc668eb9280176169d1c33cfd8ed6f04690a0bcc88a93fc4ae")
        );
        assert_eq!(
            namehash("foo.eth"),
            b256!("0xde9b09fd7c5f901e23a3f19fecc54828e9c848539801e86591bd9801b019f84f")
        );
        assert_eq!(
            namehash("vitalik.eth"),
            b256!("0xee6c4522aab0003e8d14cd40a6af439055fd2577951148c14b6cea9a53475835")
        );
    }

    #[test]
    fn matches_alloy_namehash() {
        for name in ["", "eth", "vitalik.eth", "sub.nick.eth", "addr.reverse", "🚀.eth"] {
            assert_eq!(namehash(name), alloy_ens::namehash(name), "{name}");
        }
    }

    #[test]
    fn labelhashes() {
        assert_eq!(labelhash(""), B256::ZERO);
        assert_eq!(
            labelhash("vitalik"),
            b256!("0xaf2caa1c2ca1d027f1ac823b529d0a67cd144264b2789fa2ea4d63a67c7103cc")
        );
        assert_eq!(
            labelhash("eth"),
            b256!("0x4f5b812789fc606be1b3b16908db13fc7a9adf7ca72641f84d75b47069d3d7f0")
        );
    }

    #[test]
    fn encoded_labels() {
        let encoded = "[af2caa1c2ca1d027f1ac823b529d0a67cd144264b2789fa2ea4d63a67c7103cc]";
        assert_eq!(labelhash(encoded), labelhash("vitalik"));
        assert_eq!(namehash(&format!("{encoded}.eth")), namehash("vitalik.eth"));
        // not 64 hex chars, hashed as a plain label
        assert_eq!(labelhash("[abc]"), keccak256("[abc]"));
    }

    #[test]
    fn reverse_names() {
        let addr = address!("0xd8dA6BF26964aF9D7eEd9e03E53415D37aA96045");
        assert_eq!(reverse_name(&addr), "d8da6bf26964af9d7eed9e03e53415d37aa96045.addr.reverse");
        assert_eq!(reverse_node(&addr), namehash(&reverse_name(&addr)));
    }
}
