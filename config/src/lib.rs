//! `~/.axiom/config.toml` loading.
//!
//! Every section is optional. `${VAR}` references in provider strings are
//! expanded from the environment once, right after parsing.

use std::convert::Infallible;
use std::path::{Path, PathBuf};
use std::time::Duration;
use std::{env, fs};

use axiom_bench::{BenchmarkError, BenchmarkRunConfig, BenchmarkScenario, ScenarioSource};
use axiom_types::{BenchmarkMode, ModelId};
use serde::Deserialize;
use thiserror::Error;

/// Environment variable consulted when no key is configured.
pub const API_KEY_ENV: &str = "OPENAI_API_KEY";
pub const DEFAULT_MODEL: &str = "gpt-4o-mini";
pub const DEFAULT_API_BASE: &str = "https://api.openai.com/v1";
pub const DEFAULT_TIMEOUT_SECS: u64 = 60;
pub const DEFAULT_MAX_RETRIES: u32 = 2;

#[derive(Debug, Default, Deserialize)]
pub struct AxiomConfig {
    pub benchmark: Option<BenchmarkSection>,
    pub provider: Option<ProviderConfig>,
    #[serde(default)]
    pub scenarios: Vec<BenchmarkScenario>,
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config at {}: {source}", path.display())]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("failed to parse config at {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },
}

impl ConfigError {
    #[must_use]
    pub fn path(&self) -> &Path {
        match self {
            ConfigError::Read { path, .. } | ConfigError::Parse { path, .. } => path,
        }
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct BenchmarkSection {
    /// Defaults to both canonical modes.
    pub modes: Option<Vec<BenchmarkMode>>,
    pub repetitions: Option<u32>,
    pub concurrency: Option<usize>,
}

#[derive(Clone, Default, Deserialize)]
pub struct ProviderConfig {
    pub model: Option<ModelId>,
    pub api_base: Option<String>,
    pub api_key: Option<String>,
    pub timeout_secs: Option<u64>,
    pub max_retries: Option<u32>,
    pub temperature: Option<f64>,
}

// Manual Debug impl to keep the API key out of logs.
impl std::fmt::Debug for ProviderConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let key = if self.api_key.is_some() { "[REDACTED]" } else { "None" };
        f.debug_struct("ProviderConfig")
            .field("model", &self.model)
            .field("api_base", &self.api_base)
            .field("api_key", &key)
            .field("timeout_secs", &self.timeout_secs)
            .field("max_retries", &self.max_retries)
            .field("temperature", &self.temperature)
            .finish()
    }
}

impl ProviderConfig {
    #[must_use]
    pub fn model(&self) -> ModelId {
        self.model
            .clone()
            .unwrap_or_else(|| ModelId::from_static(DEFAULT_MODEL))
    }

    /// Base URL without a trailing slash.
    #[must_use]
    pub fn api_base(&self) -> &str {
        self.api_base
            .as_deref()
            .unwrap_or(DEFAULT_API_BASE)
            .trim_end_matches('/')
    }

    #[must_use]
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs.unwrap_or(DEFAULT_TIMEOUT_SECS))
    }

    #[must_use]
    pub fn max_retries(&self) -> u32 {
        self.max_retries.unwrap_or(DEFAULT_MAX_RETRIES)
    }

    #[must_use]
    pub fn temperature(&self) -> f64 {
        self.temperature.unwrap_or(0.0)
    }

    /// The configured key, or `$OPENAI_API_KEY` when the configured value is
    /// absent or expanded to nothing.
    #[must_use]
    pub fn resolved_api_key(&self) -> Option<String> {
        self.api_key
            .as_deref()
            .map(str::trim)
            .filter(|key| !key.is_empty())
            .map(str::to_string)
            .or_else(|| env::var(API_KEY_ENV).ok().filter(|key| !key.trim().is_empty()))
    }

    fn expand_env(&mut self) {
        for value in [&mut self.api_key, &mut self.api_base]
            .into_iter()
            .flatten()
        {
            *value = expand_env_vars(value);
        }
    }
}

/// Replace every `${VAR}` with the variable's value; unset variables become
/// empty and an unterminated `${` is left as-is.
#[must_use]
pub fn expand_env_vars(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    let mut rest = value;

    while let Some(start) = rest.find("${") {
        let Some(end) = rest[start + 2..].find('}') else {
            break;
        };
        out.push_str(&rest[..start]);
        let var = &rest[start + 2..start + 2 + end];
        if !var.is_empty() {
            out.push_str(&env::var(var).unwrap_or_default());
        }
        rest = &rest[start + 2 + end + 1..];
    }

    out.push_str(rest);
    out
}

impl AxiomConfig {
    /// Load from [`config_path`]. A missing file is `Ok(None)`.
    pub fn load() -> Result<Option<Self>, ConfigError> {
        let Some(path) = config_path() else {
            return Ok(None);
        };
        if !path.exists() {
            return Ok(None);
        }
        Self::load_from(&path).map(Some)
    }

    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|err| {
            tracing::warn!("Failed to read config at {:?}: {}", path, err);
            ConfigError::Read {
                path: path.to_path_buf(),
                source: err,
            }
        })?;
        Self::parse(&content).map_err(|err| {
            tracing::warn!("Failed to parse config at {:?}: {}", path, err);
            ConfigError::Parse {
                path: path.to_path_buf(),
                source: err,
            }
        })
    }

    /// Parse TOML text and expand environment references.
    pub fn parse(content: &str) -> Result<Self, toml::de::Error> {
        let mut config: Self = toml::from_str(content)?;
        if let Some(provider) = config.provider.as_mut() {
            provider.expand_env();
        }
        Ok(config)
    }

    #[must_use]
    pub fn path() -> Option<PathBuf> {
        config_path()
    }

    /// Provider settings, falling back to defaults when the section is absent.
    #[must_use]
    pub fn provider(&self) -> ProviderConfig {
        self.provider.clone().unwrap_or_default()
    }

    /// Build the runner configuration from `[benchmark]`.
    pub fn run_config(&self) -> Result<BenchmarkRunConfig, BenchmarkError> {
        let section = self.benchmark.as_ref();
        let modes = section
            .and_then(|b| b.modes.clone())
            .unwrap_or_else(BenchmarkMode::canonical);
        let repetitions = section.and_then(|b| b.repetitions).unwrap_or(1);
        let concurrency = section.and_then(|b| b.concurrency).unwrap_or(1);
        BenchmarkRunConfig::new(modes, repetitions)?.with_concurrency(concurrency)
    }

    #[must_use]
    pub fn scenarios(&self) -> &[BenchmarkScenario] {
        &self.scenarios
    }
}

impl ScenarioSource for AxiomConfig {
    type Error = Infallible;

    fn load(&self) -> Result<Vec<BenchmarkScenario>, Self::Error> {
        Ok(self.scenarios.clone())
    }
}

#[must_use]
pub fn config_path() -> Option<PathBuf> {
    dirs::home_dir().map(|home| home.join(".axiom").join("config.toml"))
}
