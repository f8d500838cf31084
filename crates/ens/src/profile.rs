//! Aggregated profile of a name.

use crate::{EnsError, EnsReader, ResolvedIdentity, coins::CoinRecord, contenthash::ContentHash};
use alloy_primitives::Address;
use itertools::Itertools;

/// Coins whose address records are part of a profile.
pub const PROFILE_COINS: &[&str] = &["ETH", "BTC", "LTC", "DOGE", "SOL"];

/// Text keys always read for a profile, on top of the keys known to the subgraph.
///
/// These are the ENSIP-5 global and service keys plus a few common extras.
pub const PROFILE_TEXT_KEYS: &[&str] = &[
    "avatar",
    "description",
    "display",
    "email",
    "location",
    "phone",
    "url",
    "com.github",
    "com.twitter",
    "com.linkedin",
    "com.discord",
    "com.warpcast",
    "io.keybase",
    "org.telegram",
    "timezone",
    "pronouns",
];

/// Returns the human label of a text record key.
///
/// Unknown keys are returned with their first letter upper cased.
pub fn display_key(key: &str) -> String {
    let known = match key {
        "avatar" => "Avatar",
        "description" => "Bio",
        "display" => "Display Name",
        "email" => "Email",
        "keywords" => "Keywords",
        "mail" => "Mail",
        "notice" => "Notice",
        "location" => "Location",
        "phone" => "Phone",
        "url" => "Website",
        "com.github" => "GitHub",
        "com.twitter" => "Twitter",
        "com.linkedin" => "LinkedIn",
        "com.discord" => "Discord",
        "com.warpcast" => "Warpcast",
        "com.peepeth" => "Peepeth",
        "io.keybase" => "Keybase",
        "org.telegram" => "Telegram",
        "vnd.github" => "GitHub (Legacy)",
        "vnd.peepeth" => "Peepeth (Legacy)",
        "vnd.twitter" => "Twitter (Legacy)",
        "timezone" => "Timezone",
        "pronouns" => "Pronouns",
        "ipcm" => "IPCM",
        _ => {
            let mut chars = key.chars();
            return match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect(),
                None => String::new(),
            };
        }
    };
    known.to_string()
}

/// A set text record.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TextRecord {
    /// The record key.
    pub key: String,
    /// The record value.
    pub value: String,
}

/// Everything `profile` prints about a name.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Profile {
    /// The normalized name.
    pub name: String,
    /// The address the name resolves to.
    pub address: Address,
    /// Set text records, in lookup order.
    pub texts: Vec<TextRecord>,
    /// Address records of [`PROFILE_COINS`], set or not.
    pub coins: Vec<CoinRecord>,
    /// The content hash, if set.
    pub content_hash: Option<ContentHash>,
    /// The resolver of the name, if set.
    pub resolver: Option<Address>,
}

/// Reads the profile of a resolved identity.
///
/// `extra_keys` are read before [`PROFILE_TEXT_KEYS`]; duplicates are read once. Returns `None`
/// for an incomplete identity without any lookup.
pub async fn fetch_profile<R: EnsReader + ?Sized>(
    reader: &R,
    identity: &ResolvedIdentity,
    extra_keys: &[String],
) -> Result<Option<Profile>, EnsError> {
    let (Some(name), Some(address)) = (identity.name.as_deref(), identity.address) else {
        return Ok(None);
    };
    let name = reader.normalize(name)?;

    let keys = extra_keys.iter().map(String::as_str).chain(PROFILE_TEXT_KEYS.iter().copied());
    let mut texts = Vec::new();
    for key in keys.unique() {
        if let Some(value) = reader.text(&name, key).await? {
            texts.push(TextRecord { key: key.to_string(), value });
        }
    }
    debug!(%name, texts = texts.len(), "read text records");

    let coins = reader.coin_records(&name, PROFILE_COINS).await?;
    let content_hash = reader.content_hash(&name).await?;
    let resolver = reader.resolver(&name).await?;

    Ok(Some(Profile { name, address, texts, coins, content_hash, resolver }))
}
