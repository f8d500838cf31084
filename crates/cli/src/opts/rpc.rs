use atlas_config::figment::value::Dict;
use clap::Parser;

/// RPC endpoint options.
#[derive(Clone, Debug, Default, Parser)]
pub struct RpcOpts {
    /// The RPC endpoint, overriding `ETH_RPC_URL` and the config file.
    #[arg(long = "rpc-url", global = true, value_name = "URL")]
    pub url: Option<String>,
}

impl RpcOpts {
    pub fn dict(&self) -> Dict {
        let mut dict = Dict::new();
        if let Some(url) = &self.url {
            dict.insert("eth_rpc_url".into(), url.clone().into());
        }
        dict
    }
}
