use super::{print_lines, resolve_input};
use atlas_cli::{
    opts::EthereumOpts,
    utils::{self, LoadConfig},
};
use atlas_common::{io::style::LABEL, term::Spinner};
use atlas_ens::{
    Rendered,
    profile::{Profile, display_key, fetch_profile},
};
use clap::Parser;
use eyre::Result;
use yansi::Paint;

/// CLI arguments for `atlas profile`.
#[derive(Clone, Debug, Parser)]
pub struct ProfileArgs {
    /// An address or an ENS name.
    #[arg(value_name = "ADDRESS|NAME")]
    pub input: String,

    /// Use a custom resolver. Currently ignored, profiles are read through the universal resolver.
    #[arg(long, short, value_name = "ADDRESS")]
    pub resolver: Option<String>,
}

impl ProfileArgs {
    pub async fn run(self, eth: &EthereumOpts) -> Result<()> {
        let config = eth.load_config()?;
        let ens = utils::get_ens(&config)?;
        let subgraph = utils::get_subgraph(&config)?;
        if let Some(resolver) = &self.resolver {
            debug!(%resolver, "ignoring resolver override");
        }

        let mut spinner = Spinner::start();
        let mut lines = Vec::new();
        let identity = resolve_input(&ens, &self.input, &mut lines).await;
        let Some(name) = identity.name.as_deref().filter(|_| identity.is_complete()) else {
            spinner.stop();
            print_lines(&lines)?;
            sh_println!("{}", Rendered::NotFound)?;
            return Ok(());
        };

        let keys = match subgraph.text_keys(name).await {
            Ok(keys) => keys,
            Err(err) => {
                warn!(%err, url = %subgraph.url(), "failed to fetch text keys from the subgraph");
                Vec::new()
            }
        };

        let profile = fetch_profile(&ens, &identity, &keys).await;
        spinner.stop();
        match profile {
            Ok(Some(profile)) => print_profile(&profile)?,
            Ok(None) => sh_println!("{}", Rendered::NotFound)?,
            Err(err) => sh_eprintln!("Error fetching profile record: {}", err.short_message())?,
        }
        Ok(())
    }
}

fn label(text: &str) -> yansi::Painted<&str> {
    text.paint(LABEL)
}

fn print_profile(profile: &Profile) -> Result<()> {
    sh_println!("{}", label("\nENS Profile"))?;
    sh_println!("{}", label("============\n"))?;

    sh_println!("{}        {}", label("Name:"), profile.name)?;
    sh_println!("{}     {}", label("Address:"), profile.address)?;

    if !profile.texts.is_empty() {
        sh_println!("\n{}", label("Text Records:"))?;
        for text in &profile.texts {
            let key = display_key(&text.key);
            let pad = " ".repeat(12usize.saturating_sub(key.chars().count()).max(1));
            sh_println!("{}{pad}{}", format!("{key}:").paint(LABEL), text.value)?;
        }
    }

    if profile.coins.iter().any(|coin| coin.value.is_some()) {
        sh_println!("\n{}", label("Coin Records:"))?;
        for coin in &profile.coins {
            if let Some(value) = &coin.value {
                let symbol = format!("{}:", coin.symbol.to_uppercase());
                sh_println!("{}         {value}", symbol.paint(LABEL))?;
            }
        }
    }

    if let Some(hash) = &profile.content_hash {
        sh_println!("\n{}", label("Content Hash:"))?;
        sh_println!("{}        {}", label("Type:"), hash.protocol_type)?;
        sh_println!("{}        {}", label("Hash:"), hash.decoded)?;
    }

    if let Some(resolver) = profile.resolver {
        sh_println!("\n{}    {resolver}", label("Resolver:"))?;
    }

    sh_println!()?;
    Ok(())
}
