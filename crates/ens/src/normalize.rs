//! ENS name normalization.

use idna::uts46::{AsciiDenyList, Hyphens, Uts46};

/// A name rejected by [`normalize`].
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum NormalizeError {
    /// UTS-46 processing reported an error.
    #[error("invalid name `{0}`: contains disallowed characters")]
    Disallowed(String),
    /// The name contains an empty label, e.g. `a..eth` or `vitalik.eth.`.
    #[error("invalid name `{0}`: empty label")]
    EmptyLabel(String),
    /// The name contains an ASCII character that is not allowed in a label.
    #[error("invalid name `{name}`: illegal character {ch:?}")]
    IllegalCharacter {
        /// The rejected name.
        name: String,
        /// The offending character.
        ch: char,
    },
}

/// Normalizes `name` with UTS-46 (non-transitional, hyphens allowed) and validates its labels.
///
/// The empty string is the root name and is returned as is.
pub fn normalize(name: &str) -> Result<String, NormalizeError> {
    if name.is_empty() {
        return Ok(String::new());
    }

    let (mapped, result) =
        Uts46::new().to_unicode(name.as_bytes(), AsciiDenyList::EMPTY, Hyphens::Allow);
    if result.is_err() {
        return Err(NormalizeError::Disallowed(name.to_string()));
    }

    for label in mapped.split('.') {
        if label.is_empty() {
            return Err(NormalizeError::EmptyLabel(name.to_string()));
        }
        if let Some(ch) = label.chars().find(|&c| c.is_ascii() && !is_label_char(c)) {
            return Err(NormalizeError::IllegalCharacter { name: name.to_string(), ch });
        }
    }

    trace!(name, normalized = %mapped, "normalized name");
    Ok(mapped.into_owned())
}

const fn is_label_char(c: char) -> bool {
    matches!(c, 'a'..='z' | '0'..='9' | '-' | '_' | '$')
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lowercases() {
        assert_eq!(normalize("Vitalik.ETH").unwrap(), "vitalik.eth");
        assert_eq!(normalize("nick.eth").unwrap(), "nick.eth");
        assert_eq!(normalize("_dmarc$.eth").unwrap(), "_dmarc$.eth");
    }

    #[test]
    fn maps_fullwidth() {
        assert_eq!(normalize("ＶＩＴＡＬＩＫ.eth").unwrap(), "vitalik.eth");
    }

    #[test]
    fn keeps_emoji() {
        assert_eq!(normalize("🚀.eth").unwrap(), "🚀.eth");
    }

    #[test]
    fn root_is_empty() {
        assert_eq!(normalize("").unwrap(), "");
    }

    #[test]
    fn rejects_empty_labels() {
        assert_eq!(normalize("a..eth"), Err(NormalizeError::EmptyLabel("a..eth".to_string())));
        assert!(matches!(normalize("vitalik.eth."), Err(NormalizeError::EmptyLabel(_))));
        assert!(matches!(normalize(".eth"), Err(NormalizeError::EmptyLabel(_))));
    }

    #[test]
    fn rejects_illegal_ascii() {
        assert_eq!(
            normalize("hello world.eth"),
            Err(NormalizeError::IllegalCharacter {
                name: "hello world.eth".to_string(),
                ch: ' '
            })
        );
        assert!(matches!(
            normalize("vitalik!.eth"),
            Err(NormalizeError::IllegalCharacter { ch: '!', .. })
        ));
    }
}
