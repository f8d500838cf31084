use eyre::EyreHandler;
use itertools::Itertools;
use std::{error::Error, fmt};

/// Environment variable that switches error reports to the verbose color-eyre format.
pub const DEBUG_ENV: &str = "ATLAS_DEBUG";

const PANIC_SECTION: &str =
    "This is a bug. Consider reporting it at https://github.com/stevedylandev/atlas";

/// Renders `eyre` reports for the atlas binary.
///
/// A report prints as its outermost message followed by a `Context:` list of the distinct
/// causes. With [`DEBUG_ENV`] set, reports go to color-eyre instead.
pub struct Handler {
    verbose: Option<Box<dyn EyreHandler>>,
}

impl Handler {
    fn new(verbose: Option<Box<dyn EyreHandler>>) -> Self {
        Self { verbose }
    }
}

impl EyreHandler for Handler {
    fn display(&self, error: &(dyn Error + 'static), f: &mut fmt::Formatter<'_>) -> fmt::Result {
        use fmt::Display;
        atlas_common::errors::dedup_chain(error).into_iter().format("; ").fmt(f)
    }

    fn debug(&self, error: &(dyn Error + 'static), f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(verbose) = &self.verbose {
            return verbose.debug(error, f);
        }
        if f.alternate() {
            return fmt::Debug::fmt(error, f);
        }

        let chain = atlas_common::errors::dedup_chain(error);
        let Some((message, causes)) = chain.split_first() else {
            return Ok(());
        };
        f.write_str(message)?;
        if !causes.is_empty() {
            write!(f, "\n\nContext:")?;
            for cause in causes {
                write!(f, "\n- {cause}")?;
            }
        }
        Ok(())
    }

    fn track_caller(&mut self, location: &'static std::panic::Location<'static>) {
        if let Some(verbose) = &mut self.verbose {
            verbose.track_caller(location);
        }
    }
}

/// Installs the color-eyre panic hook and the atlas [`Handler`] as the global `eyre` hook.
pub fn install() {
    let (panic_hook, eyre_hook) = color_eyre::config::HookBuilder::default()
        .panic_section(PANIC_SECTION)
        .display_env_section(false)
        .into_hooks();
    panic_hook.install();

    let verbose = std::env::var_os(DEBUG_ENV).is_some();
    let eyre_hook = eyre_hook.into_eyre_hook();
    let installed = eyre::set_hook(Box::new(move |err| {
        Box::new(Handler::new(verbose.then(|| eyre_hook(err))))
    }));
    if let Err(err) = installed {
        debug!(%err, "eyre hook already installed");
    }
}
