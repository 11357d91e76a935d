//! Runtime configuration for the GDELT client.
//!
//! Values come from built-in defaults, optionally overridden by a YAML file
//! (`--config`) and then by `--api-url` / `GDELT_API_URL`.
//!
//! ```yaml
//! api_url: https://api.gdeltproject.org/api/v2/doc/doc
//! timeout_secs: 30
//! user_agent: gdelt_rank/0.1.0
//! ```

use crate::error::{NewsError, Result};
use serde::Deserialize;
use std::path::Path;
use tracing::{debug, info, instrument, warn};
use url::Url;

pub const DEFAULT_API_URL: &str = "https://api.gdeltproject.org/api/v2/doc/doc";
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// GDELT DOC 2.0 endpoint.
    pub api_url: String,
    /// Whole-request timeout enforced by the HTTP client.
    pub timeout_secs: u64,
    pub user_agent: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            user_agent: concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")).to_string(),
        }
    }
}

impl Config {
    /// Resolve the effective configuration.
    ///
    /// # Errors
    ///
    /// Returns [`NewsError::Io`] if the file cannot be read, and
    /// [`NewsError::Config`] if it cannot be parsed or fails validation.
    #[instrument(level = "debug", skip_all)]
    pub fn load(path: Option<&Path>, api_url: Option<&str>) -> Result<Self> {
        let mut config = match path {
            Some(path) => {
                let config = Self::from_file(path)?;
                info!(path = %path.display(), "Loaded configuration");
                config
            }
            None => Self::default(),
        };

        if let Some(api_url) = api_url {
            config.api_url = api_url.to_string();
        }

        config.validate()?;
        debug!(?config, "Effective configuration");
        Ok(config)
    }

    /// Read a YAML config file. Missing keys take their defaults.
    ///
    /// # Errors
    ///
    /// Returns [`NewsError::Io`] if the file cannot be read and
    /// [`NewsError::Config`] if it is not valid YAML for [`Config`].
    pub fn from_file(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path).inspect_err(|e| {
            warn!(path = %path.display(), error = %e, "Cannot read config file");
        })?;
        Ok(serde_yaml::from_str(&text)?)
    }

    fn validate(&self) -> Result<()> {
        if self.timeout_secs == 0 {
            return Err(NewsError::Config("timeout_secs must be > 0".into()));
        }
        let url = Url::parse(&self.api_url)
            .map_err(|e| NewsError::Config(format!("api_url {:?}: {e}", self.api_url)))?;
        if !matches!(url.scheme(), "http" | "https") {
            return Err(NewsError::Config(format!(
                "api_url must be http(s), got {}",
                url.scheme()
            )));
        }
        Ok(())
    }
}
