//! ---
//! pw_section: "03-configuration-logging"
//! pw_subsection: "module"
//! pw_type: "source"
//! pw_scope: "code"
//! pw_description: "TOML configuration model and loader."
//! pw_version: "v0.1.0-dev"
//! pw_owner: "tbd"
//! ---
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{anyhow, Context, Result};
use serde::{Deserialize, Serialize};
use serde_with::{serde_as, DurationSeconds};
use tracing::debug;
use url::Url;

fn default_base_url() -> Url {
    "http://127.0.0.1:5000/"
        .parse()
        .expect("valid default base url")
}

fn default_clock_interval() -> Duration {
    Duration::from_secs(1)
}

fn default_data_interval() -> Duration {
    Duration::from_secs(5)
}

fn default_chart_interval() -> Duration {
    Duration::from_secs(30)
}

fn default_reload_delay() -> Duration {
    Duration::from_secs(5)
}

fn default_gauge_diameter() -> u32 {
    160
}

/// Primary configuration object for the dashboard client.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct AppConfig {
    #[serde(default)]
    pub api: ApiConfig,
    #[serde(default)]
    pub refresh: RefreshConfig,
    #[serde(default)]
    pub ui: UiConfig,
}

/// Metadata describing where an [`AppConfig`] was loaded from.
#[derive(Debug, Clone)]
pub struct LoadedAppConfig {
    pub config: AppConfig,
    pub source: Option<PathBuf>,
}

impl AppConfig {
    pub const ENV_CONFIG_PATH: &str = "PLANTWATCH_CONFIG";

    /// Load configuration from disk, respecting the `PLANTWATCH_CONFIG`
    /// override. When no candidate exists the built-in defaults apply.
    pub fn load<P: AsRef<Path>>(candidates: &[P]) -> Result<Self> {
        Ok(Self::load_with_source(candidates)?.config)
    }

    /// Load configuration together with the effective source path, `None`
    /// when defaults were used.
    pub fn load_with_source<P: AsRef<Path>>(candidates: &[P]) -> Result<LoadedAppConfig> {
        if let Ok(env_path) = std::env::var(Self::ENV_CONFIG_PATH) {
            if !env_path.trim().is_empty() {
                let path = PathBuf::from(env_path);
                let config = Self::from_path(path.clone())?;
                return Ok(LoadedAppConfig {
                    config,
                    source: Some(path),
                });
            }
        }

        for candidate in candidates {
            if candidate.as_ref().exists() {
                let path = candidate.as_ref().to_path_buf();
                let config = Self::from_path(path.clone())?;
                return Ok(LoadedAppConfig {
                    config,
                    source: Some(path),
                });
            }
        }

        let config = AppConfig::default();
        config.validate()?;
        Ok(LoadedAppConfig {
            config,
            source: None,
        })
    }

    fn from_path(path: PathBuf) -> Result<Self> {
        debug!(config_path = %path.display(), "loading configuration");
        let contents = fs::read_to_string(&path)
            .with_context(|| format!("unable to read config file {}", path.display()))?;
        let config = toml::from_str::<AppConfig>(&contents)
            .with_context(|| format!("failed to parse config file {}", path.display()))?;
        config.validate()?;
        Ok(config)
    }

    /// Validate structural invariants.
    pub fn validate(&self) -> Result<()> {
        self.api.validate()?;
        self.refresh.validate()?;
        self.ui.validate()?;
        Ok(())
    }
}

impl std::str::FromStr for AppConfig {
    type Err = anyhow::Error;

    fn from_str(content: &str) -> std::result::Result<Self, Self::Err> {
        let config: AppConfig =
            toml::from_str(content).with_context(|| "failed to parse configuration")?;
        config.validate()?;
        Ok(config)
    }
}

/// Backend endpoint settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    #[serde(default = "default_base_url")]
    pub base_url: Url,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
        }
    }
}

impl ApiConfig {
    pub fn validate(&self) -> Result<()> {
        match self.base_url.scheme() {
            "http" | "https" => Ok(()),
            other => Err(anyhow!("api base_url scheme '{}' is not supported", other)),
        }
    }
}

/// Polling cadences for the three refresh loops plus the reload delay.
#[serde_as]
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RefreshConfig {
    #[serde(default = "default_clock_interval")]
    #[serde_as(as = "DurationSeconds<u64>")]
    pub clock_interval: Duration,
    #[serde(default = "default_data_interval")]
    #[serde_as(as = "DurationSeconds<u64>")]
    pub data_interval: Duration,
    #[serde(default = "default_chart_interval")]
    #[serde_as(as = "DurationSeconds<u64>")]
    pub chart_interval: Duration,
    #[serde(default = "default_reload_delay")]
    #[serde_as(as = "DurationSeconds<u64>")]
    pub reload_delay: Duration,
}

impl Default for RefreshConfig {
    fn default() -> Self {
        Self {
            clock_interval: default_clock_interval(),
            data_interval: default_data_interval(),
            chart_interval: default_chart_interval(),
            reload_delay: default_reload_delay(),
        }
    }
}

impl RefreshConfig {
    pub fn validate(&self) -> Result<()> {
        if self.clock_interval.is_zero()
            || self.data_interval.is_zero()
            || self.chart_interval.is_zero()
        {
            return Err(anyhow!("refresh intervals must be non-zero"));
        }
        Ok(())
    }
}

/// Presentation settings for the terminal dashboard.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UiConfig {
    #[serde(default = "default_gauge_diameter")]
    pub gauge_diameter: u32,
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            gauge_diameter: default_gauge_diameter(),
        }
    }
}

impl UiConfig {
    pub fn validate(&self) -> Result<()> {
        if self.gauge_diameter == 0 {
            return Err(anyhow!("ui gauge_diameter must be non-zero"));
        }
        Ok(())
    }
}
