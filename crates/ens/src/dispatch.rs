//! Record query dispatch on a resolved identity.

use crate::{CodecError, EnsError, EnsReader, InputKind, ResolvedIdentity};
use std::fmt;

/// The single record lookup a `resolve` invocation performs.
///
/// Built once from the command line modifiers, so at most one mode can ever be requested.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum RecordQuery {
    /// The text record with the given key.
    Txt(String),
    /// The content hash record.
    ContentHash,
    /// The address record of the given coin symbol.
    Coin(String),
    /// The counterpart of the input: the address of a name, the name of an address.
    #[default]
    Default,
}

impl RecordQuery {
    /// Builds the query from the optional modifiers.
    ///
    /// When several modifiers are given, the first one in `txt`, `content_hash`, `chain` order
    /// wins and the rest are ignored.
    pub fn from_modifiers(txt: Option<String>, content_hash: bool, chain: Option<String>) -> Self {
        match (txt, content_hash, chain) {
            (Some(key), ..) => Self::Txt(key),
            (None, true, _) => Self::ContentHash,
            (None, false, Some(symbol)) => Self::Coin(symbol),
            (None, false, None) => Self::Default,
        }
    }

    /// Returns the human name of the record this query reads, if it reads one.
    pub const fn record(&self) -> Option<&'static str> {
        match self {
            Self::Txt(_) => Some("TXT record"),
            Self::ContentHash => Some("content hash"),
            Self::Coin(_) => Some("chain record"),
            Self::Default => None,
        }
    }
}

/// A single `resolve` invocation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ResolveRequest {
    /// The raw input, a name or an address.
    pub input: String,
    /// The record to read.
    pub query: RecordQuery,
    /// Resolver override, taken verbatim from the command line. Reads only report it.
    pub resolver: Option<String>,
}

impl ResolveRequest {
    /// Creates a request for the counterpart of `input`.
    pub fn new(input: impl Into<String>) -> Self {
        Self { input: input.into(), query: RecordQuery::Default, resolver: None }
    }

    /// Sets the record to read.
    pub fn with_query(mut self, query: RecordQuery) -> Self {
        self.query = query;
        self
    }

    /// Sets the resolver override.
    pub fn with_resolver(mut self, resolver: Option<String>) -> Self {
        self.resolver = resolver;
        self
    }
}

/// The outcome of [`dispatch`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Rendered {
    /// The record value.
    Value(String),
    /// The record is unset and the mode renders nothing for it.
    Absent,
    /// The record is unset and the mode renders a `Not found` marker.
    Missing,
    /// The input did not resolve.
    NotFound,
}

impl Rendered {
    /// Returns the line to print, if any.
    pub fn line(&self) -> Option<&str> {
        match self {
            Self::Value(value) => Some(value),
            Self::Absent => None,
            Self::Missing => Some("Not found"),
            Self::NotFound => Some("404: Name not found"),
        }
    }
}

impl fmt::Display for Rendered {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.line().unwrap_or_default())
    }
}

/// A record lookup failed.
#[derive(Debug, thiserror::Error)]
#[error("failed to fetch {record}: {source}")]
pub struct LookupError {
    /// The human name of the record, e.g. `TXT record`.
    pub record: &'static str,
    /// The collaborator error.
    #[source]
    pub source: EnsError,
}

/// Runs `query` against `identity`.
///
/// Incomplete identities short-circuit to [`Rendered::NotFound`] without any lookup. Otherwise
/// exactly one lookup is issued.
pub async fn dispatch<R: EnsReader + ?Sized>(
    reader: &R,
    identity: &ResolvedIdentity,
    query: &RecordQuery,
) -> Result<Rendered, LookupError> {
    let (Some(name), Some(address)) = (identity.name.as_deref(), identity.address) else {
        return Ok(Rendered::NotFound);
    };
    let record = query.record().unwrap_or("record");
    let fail = |source: EnsError| LookupError { record, source };

    match query {
        RecordQuery::Txt(key) => {
            let name = reader.normalize(name).map_err(fail)?;
            trace!(%name, %key, "text lookup");
            let value = reader.text(&name, key).await.map_err(fail)?;
            Ok(value.map_or(Rendered::Absent, Rendered::Value))
        }
        RecordQuery::ContentHash => {
            trace!(%name, "content hash lookup");
            let hash = reader.content_hash(name).await.map_err(fail)?;
            Ok(hash.map_or(Rendered::Missing, |hash| Rendered::Value(hash.decoded)))
        }
        RecordQuery::Coin(symbol) => {
            trace!(%name, %symbol, "coin lookup");
            let records = match reader.coin_records(name, &[symbol.as_str()]).await {
                Ok(records) => records,
                Err(EnsError::Codec(CodecError::UnknownCoin(coin))) => {
                    debug!(%coin, "no coin type known for symbol");
                    return Ok(Rendered::Missing);
                }
                Err(err) => return Err(fail(err)),
            };
            let value = records.into_iter().next().and_then(|record| record.value);
            Ok(value.map_or(Rendered::Missing, Rendered::Value))
        }
        RecordQuery::Default => Ok(Rendered::Value(match identity.kind {
            InputKind::Name => address.to_checksum(None),
            InputKind::Address => name.to_string(),
        })),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        mock::{MockEns, VITALIK, VITALIK_ADDRESS},
        resolve,
    };

    async fn run(ens: &MockEns, input: &str, query: RecordQuery) -> Result<Rendered, LookupError> {
        let identity = resolve(ens, input).await;
        dispatch(ens, &identity, &query).await
    }

    #[test]
    fn modifier_priority() {
        let txt = Some("url".to_string());
        let chain = Some("BTC".to_string());
        assert_eq!(
            RecordQuery::from_modifiers(txt.clone(), true, chain.clone()),
            RecordQuery::Txt("url".into())
        );
        assert_eq!(
            RecordQuery::from_modifiers(None, true, chain.clone()),
            RecordQuery::ContentHash
        );
        assert_eq!(
            RecordQuery::from_modifiers(None, false, chain),
            RecordQuery::Coin("BTC".into())
        );
        assert_eq!(RecordQuery::from_modifiers(None, false, None), RecordQuery::Default);
    }

    #[tokio::test]
    async fn txt_wins_over_content_hash() {
        let ens = MockEns::vitalik();
        let query = RecordQuery::from_modifiers(Some("url".into()), true, None);
        let rendered = run(&ens, VITALIK, query).await.unwrap();
        assert_eq!(rendered, Rendered::Value("https://vitalik.ca".into()));
        assert!(ens.calls().iter().all(|call| !call.starts_with("content_hash")));
        assert_eq!(ens.calls(), ["resolve_name vitalik.eth", "text vitalik.eth url"]);
    }

    #[tokio::test]
    async fn unset_txt_renders_nothing() {
        let ens = MockEns::vitalik();
        let rendered = run(&ens, VITALIK, RecordQuery::Txt("com.github".into())).await.unwrap();
        assert_eq!(rendered, Rendered::Absent);
        assert_eq!(rendered.line(), None);
    }

    #[tokio::test]
    async fn nonexistent_name_short_circuits() {
        let ens = MockEns::vitalik();
        let rendered =
            run(&ens, "nonexistent12345.eth", RecordQuery::Txt("url".into())).await.unwrap();
        assert_eq!(rendered, Rendered::NotFound);
        assert_eq!(rendered.to_string(), "404: Name not found");
        assert_eq!(ens.calls(), ["resolve_name nonexistent12345.eth"]);
    }

    #[tokio::test]
    async fn not_found_skips_lookups() {
        let ens = MockEns::vitalik();
        let identity = ResolvedIdentity::not_found();
        for query in [
            RecordQuery::Default,
            RecordQuery::ContentHash,
            RecordQuery::Coin("ETH".into()),
            RecordQuery::Txt("url".into()),
        ] {
            assert_eq!(dispatch(&ens, &identity, &query).await.unwrap(), Rendered::NotFound);
        }
        assert!(ens.calls().is_empty());
    }

    #[tokio::test]
    async fn content_hash() {
        let ens = MockEns::vitalik();
        let rendered = run(&ens, VITALIK, RecordQuery::ContentHash).await.unwrap();
        assert_eq!(
            rendered,
            Rendered::Value("QmRAQB6YaCyidP37UdDnjFY5vQuiBrcqdyoW1CuDgwxkD4".into())
        );

        let ens = MockEns::vitalik().with_name("nohash.eth", VITALIK_ADDRESS);
        let rendered = run(&ens, "nohash.eth", RecordQuery::ContentHash).await.unwrap();
        assert_eq!(rendered, Rendered::Missing);
    }

    #[tokio::test]
    async fn missing_coin_record() {
        let ens = MockEns::vitalik();
        let rendered = run(&ens, VITALIK, RecordQuery::Coin("BTC".into())).await.unwrap();
        assert_eq!(rendered, Rendered::Missing);
        assert_eq!(rendered.to_string(), "Not found");
        assert_eq!(ens.calls().last().unwrap(), "coin_records vitalik.eth BTC");
    }

    #[tokio::test]
    async fn coin_record() {
        let ens = MockEns::vitalik();
        let rendered = run(&ens, VITALIK, RecordQuery::Coin("eth".into())).await.unwrap();
        assert_eq!(rendered, Rendered::Value(VITALIK_ADDRESS.to_checksum(None)));
    }

    #[tokio::test]
    async fn default_echoes_counterpart() {
        let ens = MockEns::vitalik();
        let rendered = run(&ens, VITALIK, RecordQuery::Default).await.unwrap();
        assert_eq!(rendered, Rendered::Value("0xd8dA6BF26964aF9D7eEd9e03E53415D37aA96045".into()));

        let rendered = run(&ens, "0xd8da6bf26964af9d7eed9e03e53415d37aa96045", RecordQuery::Default)
            .await
            .unwrap();
        assert_eq!(rendered, Rendered::Value(VITALIK.into()));
    }

    #[tokio::test]
    async fn lookup_failure_is_reported() {
        let ens = MockEns::vitalik().failing();
        let identity = ResolvedIdentity {
            name: Some(VITALIK.into()),
            address: Some(VITALIK_ADDRESS),
            kind: InputKind::Name,
        };
        let err = dispatch(&ens, &identity, &RecordQuery::ContentHash).await.unwrap_err();
        assert_eq!(err.record, "content hash");
        assert!(err.source.short_message().contains("connection refused"));
    }

    #[tokio::test]
    async fn unknown_coin_is_missing() {
        let ens = MockEns::vitalik();
        let rendered = run(&ens, VITALIK, RecordQuery::Coin("NOPE".into())).await.unwrap();
        assert_eq!(rendered, Rendered::Missing);
        assert_eq!(rendered.line(), Some("Not found"));

        let rendered = run(&ens, VITALIK, RecordQuery::Coin("foo".into())).await.unwrap();
        assert_eq!(rendered, Rendered::Missing);
    }
}
