//! Layered runtime settings.
//!
//! Defaults, then an optional TOML file, then `PULSEWATCH_*` environment
//! variables. CLI flags override the result in `main`.

use std::path::Path;
use std::time::Duration;

use anyhow::{Context, Result};
use config::{Config, Environment, File};
use serde::Deserialize;

use crate::data::duration::parse_interval;

/// Fallback polling cadence when the configured value does not parse.
const DEFAULT_REFRESH: Duration = Duration::from_secs(30);

#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    /// Root of the uptime service's REST API.
    pub base_url: String,
    /// Polling cadence as an interval string (e.g. "30s", "2m").
    pub refresh: String,
}

impl Settings {
    /// Load settings, optionally merging a TOML file.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let mut builder = Config::builder()
            .set_default("base_url", "http://localhost:3000/api")?
            .set_default("refresh", "30s")?;

        if let Some(path) = path {
            builder = builder.add_source(File::from(path));
        }

        let config = builder
            .add_source(Environment::with_prefix("PULSEWATCH"))
            .build()
            .context("failed to load settings")?;

        config
            .try_deserialize()
            .context("failed to parse settings")
    }

    /// The polling cadence as a duration.
    pub fn refresh_interval(&self) -> Duration {
        parse_interval(&self.refresh).unwrap_or(DEFAULT_REFRESH)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_defaults() {
        let settings = Settings::load(None).unwrap();
        assert_eq!(settings.base_url, "http://localhost:3000/api");
        assert_eq!(settings.refresh_interval(), Duration::from_secs(30));
    }

    #[test]
    fn test_file_overrides_defaults() {
        let mut file = NamedTempFile::with_suffix(".toml").unwrap();
        writeln!(file, "base_url = \"https://status.example.com/api\"").unwrap();
        writeln!(file, "refresh = \"5s\"").unwrap();
        file.flush().unwrap();

        let settings = Settings::load(Some(file.path())).unwrap();
        assert_eq!(settings.base_url, "https://status.example.com/api");
        assert_eq!(settings.refresh_interval(), Duration::from_secs(5));
    }

    #[test]
    fn test_bad_refresh_falls_back() {
        let mut file = NamedTempFile::with_suffix(".toml").unwrap();
        writeln!(file, "refresh = \"whenever\"").unwrap();
        file.flush().unwrap();

        let settings = Settings::load(Some(file.path())).unwrap();
        assert_eq!(settings.refresh_interval(), DEFAULT_REFRESH);
    }
}
