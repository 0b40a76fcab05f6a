use std::path::PathBuf;
use std::time::Duration;

use log::{info, warn};
use serde::{Deserialize, Serialize};

use super::error::ConfigError;

pub const DEFAULT_SERVER: &str = "http://localhost:9000/";
pub const DEFAULT_TIMEOUT_SECS: u64 = 300;
pub const DEFAULT_REFRESH_PERIOD_SECS: u64 = 1;

/// Location of the configuration file following the XDG Base Directory specification
/// (`~/.config/sonar-qualitygate/config.toml` on Linux).
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("sonar-qualitygate").join("config.toml"))
}

/// Expands environment variables in a string value.
/// Supports ${VAR} and $VAR syntax.
pub fn expand_env_vars(value: &str) -> Result<String, ConfigError> {
    shellexpand::env(value)
        .map(std::borrow::Cow::into_owned)
        .map_err(|e| ConfigError::Expand {
            value: value.to_string(),
            reason: e.to_string(),
        })
}

/// Settings read from the configuration file or the command line.
/// Every field is optional; missing values are filled in by [`GateConfig::merge`]
/// and the built-in defaults in [`GateConfig::resolve`]. Only values read by
/// [`GateConfig::from_str`] go through environment variable expansion.
#[derive(Deserialize, Serialize, Clone, Default, PartialEq)]
pub struct GateConfig {
    pub server: Option<String>,
    pub project: Option<String>,
    pub token: Option<String>,
    pub password: Option<String>,
    pub timeout: Option<u64>,
    pub refresh_period: Option<u64>,
    pub proxy: Option<String>,
    #[serde(skip)]
    pub path: Option<PathBuf>,
}

impl std::fmt::Debug for GateConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GateConfig")
            .field("server", &self.server)
            .field("project", &self.project)
            .field("token", &self.token.as_ref().map(|_| "***redacted***"))
            .field("password", &self.password.as_ref().map(|_| "***redacted***"))
            .field("timeout", &self.timeout)
            .field("refresh_period", &self.refresh_period)
            .field("proxy", &self.proxy)
            .field("path", &self.path)
            .finish()
    }
}

impl GateConfig {
    pub fn from_file(config_path: Option<&PathBuf>) -> anyhow::Result<Self> {
        let path = match config_path {
            Some(path) if path.exists() => path.clone(),
            Some(path) => {
                anyhow::bail!("Configuration file {} does not exist", path.display())
            }
            None => match default_config_path() {
                Some(path) => path,
                None => {
                    warn!("No configuration directory found, using defaults");
                    return Ok(Self::default());
                }
            },
        };
        info!("Using configuration path: {}", path.display());

        // No file at the default path means an empty configuration
        let toml_config = std::fs::read_to_string(&path).unwrap_or_default();
        let mut config = Self::from_str(&toml_config)?;
        config.path = Some(path);
        Ok(config)
    }

    /// Parse a TOML configuration and expand `${VAR}` / `$VAR` in its string values.
    pub fn from_str(config: &str) -> anyhow::Result<Self> {
        let mut config: GateConfig = toml::from_str(config)?;
        for value in [
            &mut config.server,
            &mut config.project,
            &mut config.token,
            &mut config.password,
            &mut config.proxy,
        ]
        .into_iter()
        .flatten()
        {
            *value = expand_env_vars(value)?;
        }
        info!(
            "Loaded config: server={:?}, project={:?}",
            config.server, config.project
        );
        Ok(config)
    }

    /// Fill every unset field of `self` from `fallback`.
    #[must_use]
    pub fn merge(self, fallback: GateConfig) -> GateConfig {
        GateConfig {
            server: self.server.or(fallback.server),
            project: self.project.or(fallback.project),
            token: self.token.or(fallback.token),
            password: self.password.or(fallback.password),
            timeout: self.timeout.or(fallback.timeout),
            refresh_period: self.refresh_period.or(fallback.refresh_period),
            proxy: self.proxy.or(fallback.proxy),
            path: self.path.or(fallback.path),
        }
    }

    /// Apply defaults and validate. Values are used as given.
    pub fn resolve(self) -> Result<CheckSettings, ConfigError> {
        let project_key = non_empty(self.project);
        let token = non_empty(self.token);
        let (Some(project_key), Some(token)) = (project_key, token) else {
            return Err(ConfigError::MissingArguments);
        };

        let refresh_period = self.refresh_period.unwrap_or(DEFAULT_REFRESH_PERIOD_SECS);
        if refresh_period == 0 {
            return Err(ConfigError::InvalidRefreshPeriod);
        }

        let endpoint = non_empty(self.server).unwrap_or_else(|| DEFAULT_SERVER.to_string());

        Ok(CheckSettings {
            server: ServerConfig {
                endpoint,
                auth: BasicAuth {
                    username: token,
                    password: non_empty(self.password),
                },
                proxy: non_empty(self.proxy),
            },
            project_key,
            poll: PollSettings {
                timeout: Duration::from_secs(self.timeout.unwrap_or(DEFAULT_TIMEOUT_SECS)),
                refresh_period: Duration::from_secs(refresh_period),
            },
        })
    }
}

/// Blank values count as unset.
fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

/// Everything a single run needs, after defaults and validation.
#[derive(Debug, Clone)]
pub struct CheckSettings {
    pub server: ServerConfig,
    pub project_key: String,
    pub poll: PollSettings,
}

#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub endpoint: String,
    pub auth: BasicAuth,
    pub proxy: Option<String>,
}

/// HTTP Basic credentials; the user token travels as the username.
#[derive(Clone)]
pub struct BasicAuth {
    pub username: String,
    pub password: Option<String>,
}

impl std::fmt::Debug for BasicAuth {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BasicAuth")
            .field("username", &"***redacted***")
            .field("password", &self.password.as_ref().map(|_| "***redacted***"))
            .finish()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PollSettings {
    pub timeout: Duration,
    pub refresh_period: Duration,
}

impl Default for PollSettings {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            refresh_period: Duration::from_secs(DEFAULT_REFRESH_PERIOD_SECS),
        }
    }
}
