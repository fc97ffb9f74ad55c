use anyhow::{Context, Result, bail};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Get the config directory path
pub fn config_dir() -> Result<PathBuf> {
    let home = dirs::home_dir().context("Could not determine home directory")?;
    Ok(home.join(".config").join("tamer"))
}

/// Default config file location
pub fn default_config_path() -> Result<PathBuf> {
    Ok(config_dir()?.join("config.toml"))
}

// ============================================================================
// Provider Config
// ============================================================================

/// Connection settings for the management API
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ProviderConfig {
    /// Server URL, without the `/api` suffix
    #[serde(default)]
    pub url: String,
    #[serde(default)]
    pub apikey: String,
    #[serde(default)]
    pub skip_ssl_validation: bool,
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct ConfigFile {
    #[serde(default)]
    provider: ProviderConfig,
}

/// Values that take precedence over the config file
///
/// The CLI fills these from flags, and from the `CLOUDTAMERIO_*`
/// environment variables when a flag is absent.
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub url: Option<String>,
    pub apikey: Option<String>,
    pub skip_ssl_validation: Option<bool>,
}

impl ProviderConfig {
    /// Load the `[provider]` table from a TOML file
    ///
    /// A missing file at the default location is not an error; a missing
    /// file that was asked for explicitly is.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let (path, explicit) = match path {
            Some(path) => (path.to_path_buf(), true),
            None => (default_config_path()?, false),
        };

        if !path.exists() {
            if explicit {
                bail!("Config file not found: {}", path.display());
            }
            log::debug!("No config file at {}", path.display());
            return Ok(Self::default());
        }

        let content = fs::read_to_string(&path)
            .with_context(|| format!("Could not read {}", path.display()))?;
        let file: ConfigFile = toml::from_str(&content)
            .with_context(|| format!("Invalid config format in {}", path.display()))?;
        log::debug!("Loaded config from {}", path.display());
        Ok(file.provider)
    }

    /// Apply higher-precedence values on top of this config
    pub fn merge(mut self, overrides: &Overrides) -> Self {
        if let Some(url) = &overrides.url {
            self.url.clone_from(url);
        }
        if let Some(apikey) = &overrides.apikey {
            self.apikey.clone_from(apikey);
        }
        if let Some(skip) = overrides.skip_ssl_validation {
            self.skip_ssl_validation = skip;
        }
        self
    }

    pub fn validate(&self) -> Result<()> {
        if self.url.is_empty() {
            bail!("url is required (set --url, CLOUDTAMERIO_URL, or [provider].url)");
        }
        if !self.url.starts_with("https://") && !self.url.starts_with("http://") {
            bail!("url must start with http:// or https://: {}", self.url);
        }
        if self.apikey.is_empty() {
            bail!("apikey is required (set --apikey, CLOUDTAMERIO_APIKEY, or [provider].apikey)");
        }
        Ok(())
    }
}
