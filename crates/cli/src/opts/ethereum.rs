use super::{RpcOpts, WalletOpts};
use atlas_config::{
    Config,
    figment::{
        self, Metadata, Profile,
        value::{Dict, Map},
    },
};
use clap::Parser;

/// Chain access options shared by every command.
#[derive(Clone, Debug, Default, Parser)]
pub struct EthereumOpts {
    #[command(flatten)]
    pub rpc: RpcOpts,

    #[command(flatten)]
    pub wallet: WalletOpts,
}

impl EthereumOpts {
    pub fn dict(&self) -> Dict {
        let mut dict = self.rpc.dict();
        dict.extend(self.wallet.dict());
        dict
    }
}

impl figment::Provider for EthereumOpts {
    fn metadata(&self) -> Metadata {
        Metadata::named("Ethereum Opts Provider")
    }

    fn data(&self) -> Result<Map<Profile, Dict>, figment::Error> {
        Ok(Map::from([(Profile::Default, self.dict())]))
    }
}

impl From<&EthereumOpts> for figment::Figment {
    fn from(opts: &EthereumOpts) -> Self {
        Config::figment().merge(opts.clone())
    }
}
