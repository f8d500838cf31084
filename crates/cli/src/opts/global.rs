use super::{EthereumOpts, ShellOptions};
use clap::Parser;

/// Options shared by every atlas command.
#[derive(Clone, Debug, Default, Parser)]
pub struct GlobalArgs {
    #[command(flatten)]
    pub shell: ShellOptions,

    #[command(flatten, next_help_heading = "Chain options")]
    pub eth: EthereumOpts,
}

impl GlobalArgs {
    /// Applies the global options to the process.
    pub fn init(&self) -> eyre::Result<()> {
        self.shell.set_global_shell();
        Ok(())
    }

    /// Builds the runtime commands run on.
    ///
    /// Each invocation handles a single request, so a current-thread runtime is enough.
    pub fn tokio_runtime(&self) -> eyre::Result<tokio::runtime::Runtime> {
        Ok(tokio::runtime::Builder::new_current_thread().enable_all().build()?)
    }
}
