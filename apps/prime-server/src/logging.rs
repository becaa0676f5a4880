//! Logging bootstrap for the server process.

use anyhow::Context as _;
use serde::{Deserialize, Serialize};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LoggingConfig {
    /// Default `EnvFilter` directive, e.g. `info` or `prime_counter=debug,info`.
    #[serde(default = "default_level")]
    pub level: String,
    #[serde(default)]
    pub format: LogFormat,
    #[serde(default = "default_ansi")]
    pub ansi: bool,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LogFormat {
    #[default]
    Text,
    Json,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_level(),
            format: LogFormat::default(),
            ansi: default_ansi(),
        }
    }
}

fn default_level() -> String {
    "info".to_owned()
}

fn default_ansi() -> bool {
    true
}

/// Pick the filter directive: `RUST_LOG` wins, then `-v` flags, then config.
#[must_use]
pub fn filter_directive(cfg: &LoggingConfig, verbose: u8, rust_log: Option<&str>) -> String {
    if let Some(directive) = rust_log.filter(|d| !d.trim().is_empty()) {
        return directive.to_owned();
    }
    match verbose {
        0 => cfg.level.clone(),
        1 => "info".to_owned(),
        2 => "debug".to_owned(),
        _ => "trace".to_owned(),
    }
}

/// Install the global subscriber. Logs go to stderr.
///
/// # Errors
/// Returns an error if the filter directive is invalid or a global subscriber
/// is already installed.
pub fn init_logging(cfg: &LoggingConfig, verbose: u8) -> anyhow::Result<()> {
    let rust_log = std::env::var(EnvFilter::DEFAULT_ENV).ok();
    let directive = filter_directive(cfg, verbose, rust_log.as_deref());
    let filter = EnvFilter::try_new(&directive)
        .with_context(|| format!("invalid log filter '{directive}'"))?;

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_ansi(cfg.ansi)
        .with_writer(std::io::stderr);

    let installed = match cfg.format {
        LogFormat::Text => builder.try_init(),
        LogFormat::Json => builder.json().try_init(),
    };
    installed.map_err(|e| anyhow::anyhow!("failed to install log subscriber: {e}"))
}
