//! Subcommands of the `atlas` binary.

use atlas_common::errors::display_chain;
use atlas_ens::{EnsReader, ResolvedIdentity, try_resolve};
use eyre::Result;

pub mod edit;
pub mod profile;
pub mod resolve;

/// A line of command output, buffered while the spinner runs.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Line {
    /// A result on stdout.
    Out(String),
    /// An informational line on stdout, silenced by `--quiet`.
    Note(String),
    /// A diagnostic on stderr.
    Err(String),
}

impl Line {
    pub fn print(&self) -> Result<()> {
        match self {
            Self::Out(line) => sh_println!("{line}"),
            Self::Note(line) => sh_note!("{line}"),
            Self::Err(line) => sh_eprintln!("{line}"),
        }
    }
}

/// Prints `lines` in order.
pub(crate) fn print_lines(lines: &[Line]) -> Result<()> {
    lines.iter().try_for_each(Line::print)
}

/// Resolves `input`, reporting a failed resolution in `lines` and collapsing it into
/// [`ResolvedIdentity::not_found`].
pub(crate) async fn resolve_input<R: EnsReader + ?Sized>(
    ens: &R,
    input: &str,
    lines: &mut Vec<Line>,
) -> ResolvedIdentity {
    match try_resolve(ens, input).await {
        Ok(identity) => identity,
        Err(err) => {
            lines.push(Line::Err(format!("Failed to resolve: {}", err.input())));
            let err = eyre::Report::new(err);
            debug!(err = %display_chain(&err), "resolution failed");
            ResolvedIdentity::not_found()
        }
    }
}
