//! Configuration management for the CLI.
//!
//! Settings are resolved once at startup. Precedence, highest first:
//! command-line flag, environment variable, TOML file, built-in default.

use crate::cli::Cli;
use crate::error::{CliError, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use sustain_ingest::IngestConfig;
use sustain_store::weaviate::{DEFAULT_MAX_RETRIES, DEFAULT_TIMEOUT_SECS};
use sustain_store::WeaviateConfig;

/// Report PDF used when none is configured
pub const DEFAULT_PDF: &str = "ferrero-group-2024-sustainability-report.pdf";

/// KPI dataset used when none is configured
pub const DEFAULT_KPIS: &str = "ferrero_environment_kpis.gold.json";

/// Config file picked up from the working directory
pub const LOCAL_CONFIG: &str = "sustain.toml";

/// CLI configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Report PDF path
    #[serde(default = "default_pdf")]
    pub pdf: PathBuf,

    /// KPI dataset path
    #[serde(default = "default_kpis")]
    pub kpis: PathBuf,

    /// Pipeline settings
    #[serde(default)]
    pub ingest: IngestConfig,

    /// Store connection settings
    #[serde(default)]
    pub store: StoreSettings,
}

/// Store connection settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoreSettings {
    /// Cluster URL
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,

    /// Weaviate API key, only ever taken from flags or the environment
    #[serde(skip)]
    pub api_key: Option<String>,

    /// Vectorizer provider key, only ever taken from flags or the environment
    #[serde(skip)]
    pub openai_api_key: Option<String>,

    /// Per-request timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// Attempts per request
    #[serde(default = "default_max_retries")]
    pub max_retries: u32,
}

impl Config {
    /// Config file used when `--config` is not given, if one exists.
    ///
    /// `./sustain.toml` wins over `<config dir>/sustain/config.toml`.
    pub fn default_path() -> Option<PathBuf> {
        let local = PathBuf::from(LOCAL_CONFIG);
        if local.exists() {
            return Some(local);
        }
        dirs::config_dir()
            .map(|dir| dir.join("sustain").join("config.toml"))
            .filter(|path| path.exists())
    }

    /// Load configuration from an explicit file, the default location, or defaults.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => Self::from_file(path),
            None => match Self::default_path() {
                Some(path) => Self::from_file(&path),
                None => Ok(Self::default()),
            },
        }
    }

    /// Load configuration from a TOML file.
    pub fn from_file(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path).map_err(|source| CliError::ConfigFile {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml(&contents)
    }

    /// Parse configuration from a TOML string.
    pub fn from_toml(contents: &str) -> Result<Self> {
        Ok(toml::from_str(contents)?)
    }

    /// Resolve the full configuration for a run.
    pub fn resolve(cli: &Cli) -> Result<Self> {
        let mut config = Self::load(cli.config.as_deref())?;
        config.apply_overrides(cli);
        config.validate()?;
        Ok(config)
    }

    /// Overlay flag and environment values onto file values.
    pub fn apply_overrides(&mut self, cli: &Cli) {
        if let Some(pdf) = &cli.pdf {
            self.pdf = pdf.clone();
        }
        if let Some(kpis) = &cli.kpis {
            self.kpis = kpis.clone();
        }
        if let Some(url) = &cli.weaviate_url {
            self.store.url = Some(url.clone());
        }
        if let Some(key) = &cli.weaviate_api_key {
            self.store.api_key = Some(key.clone());
        }
        if let Some(key) = &cli.openai_api_key {
            self.store.openai_api_key = Some(key.clone());
        }
        if let Some(on_error) = cli.on_error {
            self.ingest.loader.on_error = on_error.into();
        }
    }

    /// Validate the configuration.
    pub fn validate(&self) -> Result<()> {
        match self.store.url.as_deref() {
            Some(url) if !url.trim().is_empty() => {}
            _ => {
                return Err(CliError::Config(
                    "WEAVIATE_URL is not set (use --weaviate-url or [store] url)".to_string(),
                ))
            }
        }
        if self.store.timeout_secs == 0 {
            return Err(CliError::Config("store timeout_secs must be positive".to_string()));
        }
        if self.store.max_retries == 0 {
            return Err(CliError::Config("store max_retries must be at least 1".to_string()));
        }
        self.ingest.validate().map_err(CliError::Config)
    }

    /// Connection settings for the Weaviate store.
    pub fn weaviate_config(&self) -> Result<WeaviateConfig> {
        let url = self
            .store
            .url
            .as_deref()
            .ok_or_else(|| CliError::Config("WEAVIATE_URL is not set".to_string()))?;

        let mut config = WeaviateConfig::new(url)
            .with_timeout_secs(self.store.timeout_secs)
            .with_max_retries(self.store.max_retries);
        if let Some(key) = &self.store.api_key {
            config = config.with_api_key(key.as_str());
        }
        if let Some(key) = &self.store.openai_api_key {
            config = config.with_openai_api_key(key.as_str());
        }
        Ok(config)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            pdf: default_pdf(),
            kpis: default_kpis(),
            ingest: IngestConfig::default(),
            store: StoreSettings::default(),
        }
    }
}

impl Default for StoreSettings {
    fn default() -> Self {
        Self {
            url: None,
            api_key: None,
            openai_api_key: None,
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            max_retries: DEFAULT_MAX_RETRIES,
        }
    }
}

fn default_pdf() -> PathBuf {
    PathBuf::from(DEFAULT_PDF)
}

fn default_kpis() -> PathBuf {
    PathBuf::from(DEFAULT_KPIS)
}

fn default_timeout_secs() -> u64 {
    DEFAULT_TIMEOUT_SECS
}

fn default_max_retries() -> u32 {
    DEFAULT_MAX_RETRIES
}
