//! Layered application configuration.
//!
//! Precedence, lowest to highest: built-in defaults, the YAML file, `APP__*`
//! environment variables, CLI flags.

use std::path::Path;

use anyhow::{Context as _, Result, bail};
use figment::Figment;
use figment::providers::{Env, Format as _, Serialized, Yaml};
use prime_counter::{HostConfig, PrimeCounterConfig};
use serde::{Deserialize, Serialize};
use tracing_subscriber::EnvFilter;

use crate::logging::LoggingConfig;

pub const ENV_PREFIX: &str = "APP__";

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AppConfig {
    #[serde(default)]
    pub server: HostConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
    #[serde(default)]
    pub prime_counter: PrimeCounterConfig,
}

impl AppConfig {
    fn figment(path: Option<&Path>) -> Figment {
        let mut figment = Figment::from(Serialized::defaults(Self::default()));
        if let Some(path) = path {
            figment = figment.merge(Yaml::file(path));
        }
        figment.merge(Env::prefixed(ENV_PREFIX).split("__"))
    }

    /// Load defaults, then the optional YAML file, then `APP__*` env vars.
    ///
    /// # Errors
    /// Returns an error if the file is missing or any layer fails to parse.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        if let Some(path) = path
            && !path.is_file()
        {
            bail!("config file does not exist: {}", path.display());
        }
        Self::figment(path)
            .extract()
            .context("failed to parse configuration (YAML file or APP__ environment)")
    }

    pub fn apply_cli_overrides(&mut self, port: Option<u16>) {
        if let Some(port) = port {
            self.server.port = port;
        }
    }

    /// # Errors
    /// Returns the first invalid setting found.
    pub fn validate(&self) -> Result<()> {
        self.server.socket_addr()?;
        if self.server.body_limit_bytes == 0 {
            bail!("server.body_limit_bytes must be greater than zero");
        }
        if self.server.request_timeout_secs == 0 {
            bail!("server.request_timeout_secs must be greater than zero");
        }
        if self.prime_counter.max_bound.get() == 0 {
            bail!("prime_counter.max_bound must be greater than zero");
        }
        if self.prime_counter.sync_max_bound.get() == 0 {
            bail!("prime_counter.sync_max_bound must be greater than zero");
        }
        EnvFilter::try_new(&self.logging.level)
            .with_context(|| format!("invalid logging.level '{}'", self.logging.level))?;
        Ok(())
    }

    /// Effective configuration as pretty JSON, which is also valid YAML.
    ///
    /// # Errors
    /// Returns an error if serialization fails.
    pub fn to_pretty(&self) -> Result<String> {
        serde_json::to_string_pretty(self).context("failed to serialize configuration")
    }
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;
    use crate::logging::LogFormat;
    use figment::Jail;
    use prime_counter::Bound;

    #[test]
    fn defaults_are_valid() {
        let cfg = AppConfig::default();
        cfg.validate().unwrap();
        assert_eq!(cfg.server.port, 3000);
        assert_eq!(cfg.prime_counter.max_bound.get(), 1_000_000_000);
        assert_eq!(cfg.prime_counter.sync_max_bound.get(), 10_000_000);
    }

    #[test]
    fn yaml_overrides_defaults() {
        Jail::expect_with(|jail| {
            jail.create_file(
                "config.yaml",
                "server:\n  port: 8081\nlogging:\n  format: json\nprime_counter:\n  max_bound: 5000\n",
            )?;
            let cfg = AppConfig::load(Some(Path::new("config.yaml"))).map_err(|e| e.to_string())?;
            assert_eq!(cfg.server.port, 8081);
            assert_eq!(cfg.server.bind_addr, "127.0.0.1");
            assert_eq!(cfg.logging.format, LogFormat::Json);
            assert_eq!(cfg.prime_counter.max_bound.get(), 5000);
            Ok(())
        });
    }

    #[test]
    fn env_overrides_yaml() {
        Jail::expect_with(|jail| {
            jail.create_file("config.yaml", "server:\n  port: 8081\n")?;
            jail.set_env("APP__SERVER__PORT", "9090");
            jail.set_env("APP__PRIME_COUNTER__MAX_BOUND", "123");
            let cfg = AppConfig::load(Some(Path::new("config.yaml"))).map_err(|e| e.to_string())?;
            assert_eq!(cfg.server.port, 9090);
            assert_eq!(cfg.prime_counter.max_bound.get(), 123);
            Ok(())
        });
    }

    #[test]
    fn cli_port_wins() {
        Jail::expect_with(|jail| {
            jail.set_env("APP__SERVER__PORT", "9090");
            let mut cfg = AppConfig::load(None).map_err(|e| e.to_string())?;
            cfg.apply_cli_overrides(Some(7000));
            assert_eq!(cfg.server.port, 7000);
            Ok(())
        });
    }

    #[test]
    fn unknown_keys_are_rejected() {
        Jail::expect_with(|jail| {
            jail.create_file("config.yaml", "server:\n  prot: 1\n")?;
            assert!(AppConfig::load(Some(Path::new("config.yaml"))).is_err());
            Ok(())
        });
    }

    #[test]
    fn missing_file_is_an_error() {
        let err = AppConfig::load(Some(Path::new("/definitely/not/here.yaml"))).unwrap_err();
        assert!(err.to_string().contains("does not exist"));
    }

    #[test]
    fn validate_rejects_bad_settings() {
        let mut cfg = AppConfig::default();
        cfg.prime_counter.max_bound = Bound::new(0);
        assert!(cfg.validate().unwrap_err().to_string().contains("max_bound"));

        let mut cfg = AppConfig::default();
        cfg.prime_counter.sync_max_bound = Bound::new(0);
        assert!(cfg.validate().unwrap_err().to_string().contains("sync_max_bound"));

        let mut cfg = AppConfig::default();
        cfg.server.bind_addr = "not-an-ip".to_owned();
        assert!(cfg.validate().is_err());

        let mut cfg = AppConfig::default();
        cfg.server.body_limit_bytes = 0;
        assert!(cfg.validate().unwrap_err().to_string().contains("body_limit_bytes"));

        let mut cfg = AppConfig::default();
        cfg.logging.level = "prime_counter=loud".to_owned();
        assert!(cfg.validate().is_err());
    }

    #[test]
    fn printed_config_parses_back() {
        let text = AppConfig::default().to_pretty().unwrap();
        let back: AppConfig = serde_saphyr::from_str(&text).unwrap();
        assert_eq!(back.server.port, 3000);
        assert_eq!(back.logging.level, "info");
    }
}
