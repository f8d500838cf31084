//! Errors produced while loading the configuration.

use figment::providers::{Format, Toml};

/// Represents a failed attempt to build a [`Config`](crate::Config).
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// The layered configuration could not be extracted.
    #[error("failed to extract atlas config: {}", describe(.0))]
    Extract(#[from] figment::Error),
    /// A configured endpoint is not a valid URL.
    #[error("invalid URL `{url}` for setting `{setting}`: {source}")]
    InvalidUrl {
        /// The setting that holds the URL.
        setting: &'static str,
        /// The offending value.
        url: String,
        /// The parse error.
        source: url::ParseError,
    },
}

/// Renders every distinct figment error on its own line, naming the setting it belongs to.
fn describe(error: &figment::Error) -> String {
    let mut lines: Vec<String> = Vec::with_capacity(error.count());
    for err in error.clone() {
        let from_toml =
            err.metadata.as_ref().map(|meta| meta.name.contains(Toml::NAME)).unwrap_or_default();
        let mut line = if from_toml { format!("atlas.toml error: {err}") } else { err.to_string() };
        if !err.path.is_empty() {
            line.push_str(&format!(" for setting `{}`", err.path.join(".")));
        }
        if !lines.contains(&line) {
            lines.push(line);
        }
    }
    lines.join("\n")
}
