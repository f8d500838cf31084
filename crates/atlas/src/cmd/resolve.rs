use super::{Line, print_lines, resolve_input};
use atlas_cli::{
    opts::EthereumOpts,
    utils::{self, LoadConfig},
};
use atlas_common::term::Spinner;
use atlas_ens::{EnsReader, RecordQuery, Rendered, ResolveRequest, dispatch};
use clap::Parser;
use eyre::Result;

/// CLI arguments for `atlas resolve`.
///
/// At most one record is read. With several modifiers, `--txt` wins over `--contenthash`, which
/// wins over `--chain`.
#[derive(Clone, Debug, Parser)]
pub struct ResolveArgs {
    /// An address or an ENS name.
    #[arg(value_name = "ADDRESS|NAME")]
    pub input: String,

    /// Query a specific TXT record, e.g. `com.twitter`.
    #[arg(long, short, value_name = "KEY")]
    pub txt: Option<String>,

    /// Fetch the content hash.
    #[arg(long, short = 'c')]
    pub contenthash: bool,

    /// Get the address for a specific chain, e.g. `BTC` or `OP`.
    #[arg(long, value_name = "COIN")]
    pub chain: Option<String>,

    /// Use a custom resolver.
    ///
    /// Reads still go through the universal resolver, the value is only reported.
    #[arg(long, short, value_name = "ADDRESS")]
    pub resolver: Option<String>,
}

impl ResolveArgs {
    pub fn into_request(self) -> ResolveRequest {
        let Self { input, txt, contenthash, chain, resolver } = self;
        ResolveRequest::new(input)
            .with_query(RecordQuery::from_modifiers(txt, contenthash, chain))
            .with_resolver(resolver)
    }

    pub async fn run(self, eth: &EthereumOpts) -> Result<()> {
        let config = eth.load_config()?;
        let ens = utils::get_ens(&config)?;
        execute(&ens, &self.into_request()).await
    }
}

/// Resolves the request input and prints the requested record.
pub async fn execute<R: EnsReader + ?Sized>(ens: &R, request: &ResolveRequest) -> Result<()> {
    let mut spinner = Spinner::start();
    let lines = report(ens, request).await;
    spinner.stop();
    print_lines(&lines)
}

/// Runs the request and returns the output lines in print order.
pub async fn report<R: EnsReader + ?Sized>(ens: &R, request: &ResolveRequest) -> Vec<Line> {
    let mut lines = Vec::new();
    let identity = resolve_input(ens, &request.input, &mut lines).await;
    if !identity.is_complete() {
        lines.push(Line::Out(Rendered::NotFound.to_string()));
        return lines;
    }

    if let Some(resolver) = &request.resolver {
        lines.push(Line::Note(format!("Note: Using custom resolver: {resolver}")));
        lines.push(Line::Note("(Custom resolver support for read operations is limited)".into()));
        lines.push(Line::Note(String::new()));
    }

    match dispatch(ens, &identity, &request.query).await {
        Ok(rendered) => lines.extend(rendered.line().map(|line| Line::Out(line.to_string()))),
        Err(err) => lines.push(Line::Err(format!(
            "Error fetching {}: {}",
            err.record,
            err.source.short_message()
        ))),
    }
    lines
}

#[cfg(test)]
mod tests {
    use super::*;
    use atlas_ens::mock::{MockEns, VITALIK, VITALIK_ADDRESS};

    fn request(input: &str, query: RecordQuery) -> ResolveRequest {
        ResolveRequest::new(input).with_query(query)
    }

    #[tokio::test]
    async fn prints_counterpart() {
        let ens = MockEns::vitalik();
        let lines = report(&ens, &request(VITALIK, RecordQuery::Default)).await;
        assert_eq!(lines, [Line::Out(VITALIK_ADDRESS.to_checksum(None))]);

        let by_address = request(&VITALIK_ADDRESS.to_string(), RecordQuery::Default);
        let lines = report(&ens, &by_address).await;
        assert_eq!(lines, [Line::Out(VITALIK.to_string())]);
    }

    #[tokio::test]
    async fn prints_txt_record() {
        let ens = MockEns::vitalik();
        let lines = report(&ens, &request(VITALIK, RecordQuery::Txt("url".into()))).await;
        assert_eq!(lines, [Line::Out("https://vitalik.ca".into())]);
    }

    #[tokio::test]
    async fn unset_txt_record_prints_nothing() {
        let ens = MockEns::vitalik();
        let lines = report(&ens, &request(VITALIK, RecordQuery::Txt("com.github".into()))).await;
        assert!(lines.is_empty(), "{lines:?}");
    }

    #[tokio::test]
    async fn missing_content_hash() {
        let ens = MockEns::default().with_name("nick.eth", VITALIK_ADDRESS);
        let lines = report(&ens, &request("nick.eth", RecordQuery::ContentHash)).await;
        assert_eq!(lines, [Line::Out("Not found".into())]);
    }

    #[tokio::test]
    async fn resolver_note_precedes_record() {
        let ens = MockEns::vitalik();
        let request = request(VITALIK, RecordQuery::Txt("com.twitter".into()))
            .with_resolver(Some("not-an-address".into()));
        let lines = report(&ens, &request).await;
        assert_eq!(
            lines,
            [
                Line::Note("Note: Using custom resolver: not-an-address".into()),
                Line::Note("(Custom resolver support for read operations is limited)".into()),
                Line::Note(String::new()),
                Line::Out("VitalikButerin".into()),
            ]
        );
    }

    #[tokio::test]
    async fn not_found_skips_resolver_note() {
        let ens = MockEns::vitalik();
        let request = request("nobody.eth", RecordQuery::Default)
            .with_resolver(Some("0x231b0Ee14048e9dCcD1d247744d114a4EB5E8E63".into()));
        let lines = report(&ens, &request).await;
        assert_eq!(lines, [Line::Out("404: Name not found".into())]);
        assert_eq!(ens.calls(), ["resolve_name nobody.eth"]);
    }

    #[tokio::test]
    async fn invalid_input_reports_failure_then_not_found() {
        let ens = MockEns::vitalik();
        let lines = report(&ens, &request("a..eth", RecordQuery::Txt("url".into()))).await;
        assert_eq!(
            lines,
            [
                Line::Err("Failed to resolve: a..eth".into()),
                Line::Out("404: Name not found".into()),
            ]
        );
        assert!(ens.calls().is_empty());
    }

    #[tokio::test]
    async fn lookup_failure_goes_to_stderr() {
        let ens = MockEns::vitalik().failing_records();
        let lines = report(&ens, &request(VITALIK, RecordQuery::ContentHash)).await;
        assert_eq!(lines, [Line::Err("Error fetching content hash: connection refused".into())]);
    }
}
