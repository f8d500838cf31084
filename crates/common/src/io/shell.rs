//! Utility functions for writing to [`stdout`](std::io::stdout) and [`stderr`](std::io::stderr).

use super::style::{ERROR, WARN};
use clap::ValueEnum;
use eyre::Result;
use std::{
    fmt,
    io::{self, Write},
    sync::{Mutex, MutexGuard, OnceLock, PoisonError},
};
use yansi::Paint;

/// Returns the currently set verbosity.
pub fn verbosity() -> Verbosity {
    Shell::get().verbosity()
}

/// Returns whether the output mode is [`Verbosity::Quiet`].
pub fn is_quiet() -> bool {
    verbosity().is_quiet()
}

/// The global shell instance.
static GLOBAL_SHELL: OnceLock<Mutex<Shell>> = OnceLock::new();

/// Terminal coloring choice.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum)]
pub enum ColorChoice {
    /// Intelligently guess whether to use color output (default).
    #[default]
    Auto,
    /// Force color output.
    Always,
    /// Force disable color output.
    Never,
}

impl ColorChoice {
    fn apply(self) {
        match self {
            Self::Auto => yansi::whenever(yansi::Condition::TTY_AND_COLOR),
            Self::Always => yansi::enable(),
            Self::Never => yansi::disable(),
        }
    }
}

/// The verbosity level.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Verbosity {
    /// All output.
    Verbose,
    /// Default output.
    #[default]
    Normal,
    /// Only results and errors.
    Quiet,
}

impl Verbosity {
    /// Returns true if the verbosity level is `Verbose`.
    #[inline]
    pub const fn is_verbose(self) -> bool {
        matches!(self, Self::Verbose)
    }

    /// Returns true if the verbosity level is `Quiet`.
    #[inline]
    pub const fn is_quiet(self) -> bool {
        matches!(self, Self::Quiet)
    }
}

/// An abstraction around console output that remembers preferences for output verbosity and
/// color.
///
/// Results are always written, `--quiet` only silences notes, warnings and progress output.
#[derive(Debug, Default)]
pub struct Shell {
    color: ColorChoice,
    verbosity: Verbosity,
}

impl Shell {
    /// Creates a new shell with default color choice and verbosity.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a new shell with the given color choice and verbosity.
    pub fn new_with(color: ColorChoice, verbosity: Verbosity) -> Self {
        Self { color, verbosity }
    }

    /// Get a static reference to the global shell.
    ///
    /// Initializes the global shell with the default values if it has not been set yet.
    pub fn get() -> MutexGuard<'static, Self> {
        GLOBAL_SHELL.get_or_init(Default::default).lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Set the global shell and apply its color choice.
    pub fn set(self) {
        self.color.apply();
        *Self::get() = self;
    }

    /// Gets the verbosity of the shell.
    pub fn verbosity(&self) -> Verbosity {
        self.verbosity
    }

    /// Gets the current color choice.
    pub fn color_choice(&self) -> ColorChoice {
        self.color
    }

    /// Returns `true` if the shell is quiet.
    pub fn is_quiet(&self) -> bool {
        self.verbosity.is_quiet()
    }

    /// Write a message to stdout.
    pub fn print_out(&mut self, fmt: fmt::Arguments<'_>) -> Result<()> {
        let mut stdout = io::stdout().lock();
        stdout.write_fmt(fmt)?;
        stdout.flush()?;
        Ok(())
    }

    /// Write a message to stderr.
    pub fn print_err(&mut self, fmt: fmt::Arguments<'_>) -> Result<()> {
        let mut stderr = io::stderr().lock();
        stderr.write_fmt(fmt)?;
        stderr.flush()?;
        Ok(())
    }

    /// Prints a red `Error:` message to stderr.
    pub fn error(&mut self, message: impl fmt::Display) -> Result<()> {
        self.print_err(format_args!("{}: {message}\n", "Error".paint(ERROR)))
    }

    /// Prints a yellow `Warning:` message to stderr, unless the shell is quiet.
    pub fn warn(&mut self, message: impl fmt::Display) -> Result<()> {
        if self.is_quiet() {
            return Ok(());
        }
        self.print_err(format_args!("{}: {message}\n", "Warning".paint(WARN)))
    }

    /// Prints an informational line to stdout, unless the shell is quiet.
    pub fn note(&mut self, message: impl fmt::Display) -> Result<()> {
        if self.is_quiet() {
            return Ok(());
        }
        self.print_out(format_args!("{message}\n"))
    }
}
