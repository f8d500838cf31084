//! Input classification.

use std::fmt;

/// What a raw user input denotes.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum InputKind {
    /// A hex encoded address.
    Address,
    /// A human readable name.
    Name,
}

impl fmt::Display for InputKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Address => "address",
            Self::Name => "name",
        })
    }
}

/// Classifies `input` as an [`InputKind::Address`] if it is a `0x` prefixed hex string, and as an
/// [`InputKind::Name`] otherwise.
///
/// The length is not checked here: a malformed address is still an address and is rejected when
/// it is resolved.
pub fn classify(input: &str) -> InputKind {
    match input.strip_prefix("0x") {
        Some(digits) if digits.bytes().all(|b| b.is_ascii_hexdigit()) => InputKind::Address,
        _ => InputKind::Name,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn classifies_inputs() {
        assert_eq!(classify("0xd8dA6BF26964aF9D7eEd9e03E53415D37aA96045"), InputKind::Address);
        assert_eq!(classify("0xdeadbeef"), InputKind::Address);
        assert_eq!(classify("0x"), InputKind::Address);
        assert_eq!(classify("vitalik.eth"), InputKind::Name);
        assert_eq!(classify("0xvitalik.eth"), InputKind::Name);
        assert_eq!(classify("0Xd8da"), InputKind::Name);
        assert_eq!(classify("d8da6bf26964af9d7eed9e03e53415d37aa96045"), InputKind::Name);
        assert_eq!(classify(""), InputKind::Name);
    }

    proptest! {
        #[test]
        fn hex_is_address(digits in "[0-9a-fA-F]{0,64}") {
            prop_assert_eq!(classify(&format!("0x{digits}")), InputKind::Address);
        }

        #[test]
        fn non_hex_is_name(input in "\\PC*") {
            let is_hex = input
                .strip_prefix("0x")
                .is_some_and(|rest| rest.chars().all(|c| c.is_ascii_hexdigit()));
            prop_assume!(!is_hex);
            prop_assert_eq!(classify(&input), InputKind::Name);
        }

        #[test]
        fn deterministic(input in "\\PC*") {
            prop_assert_eq!(classify(&input), classify(&input));
        }
    }
}
