use crate::opts::{Atlas, AtlasSubcommand};
use atlas_cli::{handler, utils, utils::LoadConfig};
use atlas_common::term::spin;
use atlas_ens::{EnsReader, deployments::DEPLOYMENTS, labelhash, namehash};
use clap::Parser;
use eyre::Result;

/// Run the `atlas` command-line interface.
pub fn run() -> Result<()> {
    setup()?;

    let args = Atlas::parse();
    args.global.init()?;
    args.global.tokio_runtime()?.block_on(run_command(args))
}

/// Setup the global logger and other utilities.
pub fn setup() -> Result<()> {
    handler::install();
    utils::load_dotenv();
    utils::subscriber();

    Ok(())
}

/// Run the subcommand.
pub async fn run_command(args: Atlas) -> Result<()> {
    let eth = &args.global.eth;
    match args.cmd {
        AtlasSubcommand::Profile(cmd) => cmd.run(eth).await?,
        AtlasSubcommand::Resolve(cmd) => cmd.run(eth).await?,
        AtlasSubcommand::Namehash { name } => {
            sh_println!("{}", namehash(&name))?;
        }
        AtlasSubcommand::Labelhash { label } => {
            sh_println!("{}", labelhash(&label))?;
        }
        AtlasSubcommand::Resolver { name } => {
            let config = eth.load_config()?;
            let ens = utils::get_ens(&config)?;
            match spin(ens.resolver(&name)).await? {
                Some(resolver) => sh_println!("{resolver}")?,
                None => sh_println!("null")?,
            }
        }
        AtlasSubcommand::Deployments => {
            for deployment in DEPLOYMENTS {
                sh_println!("Chain ID: {}", deployment.chain_id)?;
                for (name, address) in deployment.contracts() {
                    sh_println!("  {name}: {address}")?;
                }
            }
        }
        AtlasSubcommand::Edit { command } => command.run(eth).await?,
    }
    Ok(())
}
