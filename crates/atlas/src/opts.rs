use crate::cmd::{edit::EditSubcommand, profile::ProfileArgs, resolve::ResolveArgs};
use atlas_cli::opts::GlobalArgs;
use clap::{Parser, Subcommand};

const BANNER: &str = r"
        ++   ++
     +++  +++  +++             ##       ##########    ##              ##         #####
   +++++ +++++  ++++          ####          ##        ##             ###       ##     ##
  +++++ +++++++ +++++         ## ##         ##        ##            ## ##      ##
  +++++ +++++++ +++++        ##  ##         ##        ##            ##  ##     #####
  +++++ +++++++ +++++        #    ##        ##        ##           ##   ##          ####
  +++++ +++++++ +++++       #########       ##        ##          #########            ##
   +++++ +++++  ++++       ##      ##       ##        ##          ##      ##   ##     ##
     +++  +++  +++         ##       ##      ##        #########  ##       ##     ######
         ++  +

         A CLI for exploring ENS
         https://github.com/stevedylandev/atlas
";

/// A CLI for exploring ENS.
#[derive(Parser)]
#[command(
    name = "atlas",
    version,
    about = "A CLI for exploring ENS",
    long_about = None,
    before_long_help = BANNER,
)]
pub struct Atlas {
    #[command(flatten)]
    pub global: GlobalArgs,

    #[command(subcommand)]
    pub cmd: AtlasSubcommand,
}

#[derive(Subcommand)]
pub enum AtlasSubcommand {
    /// Print the profile of an ENS name or address.
    Profile(ProfileArgs),

    /// Resolve an ENS name to an address or vice versa.
    Resolve(ResolveArgs),

    /// Get the namehash of an ENS name.
    Namehash {
        /// The ENS name.
        name: String,
    },

    /// Get the labelhash of a label.
    Labelhash {
        /// The label.
        label: String,
    },

    /// Get the current resolver of an ENS name.
    Resolver {
        /// The ENS name.
        name: String,
    },

    /// Print the known ENS contract deployments.
    Deployments,

    /// Edit the records of an ENS name.
    Edit {
        #[command(subcommand)]
        command: EditSubcommand,
    },
}
