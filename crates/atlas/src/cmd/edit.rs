use alloy_primitives::{Address, TxHash};
use atlas_cli::{
    opts::EthereumOpts,
    utils::{self, LoadConfig},
};
use atlas_common::term::Spinner;
use atlas_ens::{
    EnsError, EnsReader, EnsWriter, ResolverContract,
    abi_record::{AbiEncoding, EncodedAbi},
};
use clap::Subcommand;
use eyre::{Result, WrapErr};
use std::path::PathBuf;

/// Value that clears a record.
const NULL: &str = "null";

const RPC_HINT: &str =
    "If you are receiving HTTP errors consider setting ETH_RPC_URL as an environment variable";

/// Record edits. Every edit is a transaction signed with the configured private key.
#[derive(Clone, Debug, Subcommand)]
pub enum EditSubcommand {
    /// Set a TXT record (use 'null' to clear the record).
    Txt {
        /// The ENS name.
        name: String,
        /// The record key, e.g. `com.discord`.
        key: String,
        /// The record value, or 'null' to clear it.
        value: String,
        /// Resolver to write to, detected from the registry when omitted.
        #[arg(long, short, value_name = "ADDRESS")]
        resolver: Option<Address>,
    },

    /// Set the address record of a coin or chain.
    Address {
        /// The ENS name.
        name: String,
        /// Coin symbol or coin type, e.g. `ETH`, `BTC`, `SOL`.
        coin: String,
        /// The address.
        value: String,
        /// Resolver to write to, detected from the registry when omitted.
        #[arg(long, short, value_name = "ADDRESS")]
        resolver: Option<Address>,
    },

    /// Set the resolver of an ENS name.
    Resolver {
        /// The ENS name.
        name: String,
        /// The new resolver.
        resolver: Address,
        /// Contract the change is sent to: `registry` or `nameWrapper`.
        #[arg(long, short, default_value_t = ResolverContract::Registry)]
        contract: ResolverContract,
    },

    /// Set the primary ENS name of your address.
    #[command(visible_alias = "primaryName")]
    Primary {
        /// The ENS name.
        name: String,
    },

    /// Set the ABI record (use 'null' to clear the record).
    Abi {
        /// The ENS name.
        name: String,
        /// Path to an ABI JSON file, or 'null' to clear the record.
        abi: String,
        /// Encoding of the record: json, zlib, cbor or uri.
        #[arg(long = "encode", short, default_value_t = AbiEncoding::Json)]
        encode: AbiEncoding,
        /// Resolver to write to, detected from the registry when omitted.
        #[arg(long, short, value_name = "ADDRESS")]
        resolver: Option<Address>,
    },

    /// Set the content hash (use 'null' to clear the record).
    Contenthash {
        /// The ENS name.
        name: String,
        /// Content hash, e.g. `ipfs://<cid>`, or 'null' to clear it.
        hash: String,
        /// Resolver to write to, detected from the registry when omitted.
        #[arg(long, short, value_name = "ADDRESS")]
        resolver: Option<Address>,
    },
}

impl EditSubcommand {
    /// Capitalized name of the edited record.
    fn subject(&self) -> &'static str {
        match self {
            Self::Txt { .. } => "TXT record",
            Self::Address { .. } => "Address record",
            Self::Resolver { .. } => "Resolver",
            Self::Primary { .. } => "Primary name",
            Self::Abi { .. } => "ABI record",
            Self::Contenthash { .. } => "Content hash",
        }
    }

    /// Name of the edited record inside a sentence.
    fn record(&self) -> &'static str {
        match self {
            Self::Txt { .. } => "TXT record",
            Self::Address { .. } => "address record",
            Self::Resolver { .. } => "resolver",
            Self::Primary { .. } => "primary name",
            Self::Abi { .. } => "ABI record",
            Self::Contenthash { .. } => "content hash",
        }
    }

    /// Returns `true` if the edit clears the record.
    fn clears(&self) -> bool {
        match self {
            Self::Txt { value, .. } => value.is_empty() || value == NULL,
            Self::Abi { abi, .. } => abi == NULL,
            Self::Contenthash { hash, .. } => hash.is_empty() || hash == NULL,
            _ => false,
        }
    }

    pub async fn run(self, eth: &EthereumOpts) -> Result<()> {
        let config = eth.load_config()?;
        let mut spinner = Spinner::start();
        let Some(ens) = utils::get_ens_writer(&config)? else {
            spinner.stop();
            sh_err!("Wallet not configured. Please set ATLAS_PRIVATE_KEY environment variable.")?;
            return Ok(());
        };

        let result = self.submit(&ens).await;
        spinner.stop();
        match result {
            Ok(hash) => {
                let verb = if self.clears() { "cleared" } else { "set" };
                sh_println!("✓ {} {verb} successfully", self.subject())?;
                sh_println!("Transaction hash: {hash}")?;
            }
            Err(err) if is_missing_resolver(&err) => {
                sh_err!("No resolver found for this name")?;
            }
            Err(err) => {
                let message = match err.downcast_ref::<EnsError>() {
                    Some(err) => err.short_message(),
                    None => atlas_common::errors::display_chain(&err),
                };
                sh_eprintln!("Error setting {}: {message}", self.record())?;
                sh_eprintln!("{RPC_HINT}")?;
            }
        }
        Ok(())
    }

    async fn submit<E: EnsReader + EnsWriter>(&self, ens: &E) -> Result<TxHash> {
        let hash = match self {
            Self::Txt { name, key, value, resolver } => {
                let value = if value == NULL { "" } else { value.as_str() };
                let resolver = resolver_of(ens, name, *resolver).await?;
                ens.set_text(name, key, value, resolver).await?
            }
            Self::Address { name, coin, value, resolver } => {
                let resolver = resolver_of(ens, name, *resolver).await?;
                ens.set_address(name, coin, value, resolver).await?
            }
            Self::Resolver { name, resolver, contract } => {
                ens.set_resolver(name, *resolver, *contract).await?
            }
            Self::Primary { name } => ens.set_primary_name(name).await?,
            Self::Abi { name, abi, encode, resolver } => {
                let encoded = encode_abi(abi, *encode)?;
                let resolver = resolver_of(ens, name, *resolver).await?;
                ens.set_abi_record(name, &encoded, resolver).await?
            }
            Self::Contenthash { name, hash, resolver } => {
                let hash = if hash == NULL { "" } else { hash.as_str() };
                let resolver = resolver_of(ens, name, *resolver).await?;
                ens.set_content_hash(name, hash, resolver).await?
            }
        };
        Ok(hash)
    }
}

/// Returns the resolver override, or the resolver currently set for `name`.
async fn resolver_of<R: EnsReader + ?Sized>(
    ens: &R,
    name: &str,
    resolver: Option<Address>,
) -> Result<Address, EnsError> {
    if let Some(resolver) = resolver {
        return Ok(resolver);
    }
    ens.resolver(name).await?.ok_or_else(|| EnsError::NoResolver(name.to_string()))
}

fn is_missing_resolver(err: &eyre::Report) -> bool {
    matches!(err.downcast_ref::<EnsError>(), Some(EnsError::NoResolver(_)))
}

/// Reads and encodes the ABI file at `path`, or encodes an empty record for `null`.
fn encode_abi(path: &str, encoding: AbiEncoding) -> Result<EncodedAbi> {
    if path == NULL {
        return Ok(EncodedAbi::encode(encoding, None)?);
    }
    let path = PathBuf::from(path);
    let content = std::fs::read_to_string(&path)
        .wrap_err_with(|| format!("failed to read ABI file {}", path.display()))?;
    let abi: serde_json::Value = serde_json::from_str(&content)
        .wrap_err_with(|| format!("invalid ABI JSON in {}", path.display()))?;
    Ok(EncodedAbi::encode(encoding, Some(&abi))?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn null_clears() {
        let txt = EditSubcommand::Txt {
            name: "vitalik.eth".into(),
            key: "url".into(),
            value: NULL.into(),
            resolver: None,
        };
        assert!(txt.clears());
        assert_eq!(txt.subject(), "TXT record");

        let primary = EditSubcommand::Primary { name: "vitalik.eth".into() };
        assert!(!primary.clears());
        assert_eq!(primary.record(), "primary name");
    }

    #[test]
    fn encodes_abi_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"[{{"type":"function","name":"foo","inputs":[],"outputs":[]}}]"#).unwrap();
        let path = file.path().to_str().unwrap();

        let encoded = encode_abi(path, AbiEncoding::Json).unwrap();
        assert_eq!(encoded.content_type, 1);
        assert!(!encoded.is_empty());

        let cleared = encode_abi(NULL, AbiEncoding::Zlib).unwrap();
        assert_eq!(cleared.content_type, 2);
        assert!(cleared.is_empty());
    }

    #[test]
    fn missing_abi_file_is_reported() {
        let err = encode_abi("/definitely/not/here.json", AbiEncoding::Json).unwrap_err();
        assert!(err.to_string().contains("failed to read ABI file"), "{err}");
    }
}
