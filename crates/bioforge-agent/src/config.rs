//! Engine configuration
//!
//! [`EngineSettings`] is the serialisable form (file or environment);
//! [`EngineConfig`] is the runtime struct handed to the orchestrator at
//! construction. The execution mode is derived from the config, never held
//! in hidden global state.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

use bioforge_core::ExecutionMode;

use crate::backend::InferenceBackend;

/// Default per-phase delay of the local pipeline (UI pacing only)
pub const DEFAULT_PHASE_DELAY_MS: u64 = 600;

/// Default timeout for the remote inference call
pub const DEFAULT_REMOTE_TIMEOUT_SECS: u64 = 30;

/// Which remote provider to talk to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProviderKind {
    Gemini,
    Openai,
}

impl ProviderKind {
    pub fn parse(value: &str) -> Result<Self> {
        match value.trim().to_lowercase().as_str() {
            "gemini" | "google" => Ok(ProviderKind::Gemini),
            "openai" | "openai_compatible" | "openai-compatible" => Ok(ProviderKind::Openai),
            other => anyhow::bail!("Unknown remote provider: {}", other),
        }
    }

    pub fn default_model(self) -> &'static str {
        match self {
            ProviderKind::Gemini => "gemini-1.5-flash",
            ProviderKind::Openai => "gpt-4o-mini",
        }
    }

    pub fn default_api_key_env(self) -> &'static str {
        match self {
            ProviderKind::Gemini => "GEMINI_API_KEY",
            ProviderKind::Openai => "OPENAI_API_KEY",
        }
    }
}

/// Remote backend settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RemoteSettings {
    /// Provider to use
    pub provider: ProviderKind,

    /// Model identifier; provider default when absent
    #[serde(default)]
    pub model: Option<String>,

    /// Base URL override (OpenAI-compatible providers only)
    #[serde(default)]
    pub base_url: Option<String>,

    /// Environment variable holding the API key
    #[serde(default)]
    pub api_key_env: Option<String>,

    #[serde(default = "default_temperature")]
    pub temperature: f64,

    #[serde(default = "default_max_tokens")]
    pub max_tokens: u32,
}

fn default_temperature() -> f64 {
    0.2
}

fn default_max_tokens() -> u32 {
    2048
}

impl RemoteSettings {
    pub fn new(provider: ProviderKind) -> Self {
        Self {
            provider,
            model: None,
            base_url: None,
            api_key_env: None,
            temperature: default_temperature(),
            max_tokens: default_max_tokens(),
        }
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = Some(model.into());
        self
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = Some(base_url.into());
        self
    }

    pub fn model(&self) -> &str {
        self.model
            .as_deref()
            .unwrap_or_else(|| self.provider.default_model())
    }

    pub fn api_key_env(&self) -> &str {
        self.api_key_env
            .as_deref()
            .unwrap_or_else(|| self.provider.default_api_key_env())
    }
}

/// Serialisable engine settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EngineSettings {
    /// Delay inserted before each local phase, in milliseconds
    #[serde(default = "default_phase_delay_ms")]
    pub phase_delay_ms: u64,

    /// Remote call timeout, in seconds
    #[serde(default = "default_remote_timeout_secs")]
    pub remote_timeout_secs: u64,

    /// Remote backend; local mode when absent
    #[serde(default)]
    pub remote: Option<RemoteSettings>,
}

fn default_phase_delay_ms() -> u64 {
    DEFAULT_PHASE_DELAY_MS
}

fn default_remote_timeout_secs() -> u64 {
    DEFAULT_REMOTE_TIMEOUT_SECS
}

impl Default for EngineSettings {
    fn default() -> Self {
        Self {
            phase_delay_ms: DEFAULT_PHASE_DELAY_MS,
            remote_timeout_secs: DEFAULT_REMOTE_TIMEOUT_SECS,
            remote: None,
        }
    }
}

impl EngineSettings {
    /// Create settings with default values
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_phase_delay_ms(mut self, ms: u64) -> Self {
        self.phase_delay_ms = ms;
        self
    }

    pub fn with_remote_timeout_secs(mut self, secs: u64) -> Self {
        self.remote_timeout_secs = secs;
        self
    }

    pub fn with_remote(mut self, remote: RemoteSettings) -> Self {
        self.remote = Some(remote);
        self
    }

    /// Load settings from a `.toml` file, or JSON for any other extension
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;

        let settings = if path.extension().is_some_and(|ext| ext == "toml") {
            toml::from_str(&content)
                .with_context(|| format!("Failed to parse TOML config {}", path.display()))?
        } else {
            serde_json::from_str(&content)
                .with_context(|| format!("Failed to parse JSON config {}", path.display()))?
        };
        Ok(settings)
    }

    /// Save settings to a file, format chosen by extension
    pub fn to_file(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        let content = if path.extension().is_some_and(|ext| ext == "toml") {
            toml::to_string_pretty(self).context("Failed to encode TOML config")?
        } else {
            serde_json::to_string_pretty(self).context("Failed to encode JSON config")?
        };
        std::fs::write(path, content)
            .with_context(|| format!("Failed to write config file {}", path.display()))?;
        Ok(())
    }

    /// Build settings from `BIOFORGE_*` environment variables
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut settings = Self::default();

        if let Some(value) = lookup("BIOFORGE_PHASE_DELAY_MS") {
            settings.phase_delay_ms = value
                .trim()
                .parse()
                .with_context(|| format!("Invalid BIOFORGE_PHASE_DELAY_MS: {}", value))?;
        }
        if let Some(value) = lookup("BIOFORGE_REMOTE_TIMEOUT_SECS") {
            settings.remote_timeout_secs = value
                .trim()
                .parse()
                .with_context(|| format!("Invalid BIOFORGE_REMOTE_TIMEOUT_SECS: {}", value))?;
        }
        if let Some(provider) = lookup("BIOFORGE_REMOTE_PROVIDER") {
            let mut remote = RemoteSettings::new(ProviderKind::parse(&provider)?);
            remote.model = lookup("BIOFORGE_REMOTE_MODEL");
            remote.base_url = lookup("BIOFORGE_REMOTE_BASE_URL");
            remote.api_key_env = lookup("BIOFORGE_REMOTE_API_KEY_ENV");
            settings.remote = Some(remote);
        }

        Ok(settings)
    }
}

/// Runtime configuration passed to the orchestrator at construction
#[derive(Clone)]
pub struct EngineConfig {
    /// Remote inference backend; `None` means local mode
    pub backend: Option<Arc<dyn InferenceBackend>>,

    /// Delay before each local phase
    pub phase_delay: Duration,

    /// Timeout for the remote call
    pub remote_timeout: Duration,
}

impl fmt::Debug for EngineConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EngineConfig")
            .field("backend", &self.backend.as_ref().map(|b| b.name().to_string()))
            .field("phase_delay", &self.phase_delay)
            .field("remote_timeout", &self.remote_timeout)
            .finish()
    }
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            backend: None,
            phase_delay: Duration::from_millis(DEFAULT_PHASE_DELAY_MS),
            remote_timeout: Duration::from_secs(DEFAULT_REMOTE_TIMEOUT_SECS),
        }
    }
}

impl EngineConfig {
    /// Local-mode configuration with default timings
    pub fn local() -> Self {
        Self::default()
    }

    /// Build a runtime config; the backend is created when its key is set
    pub fn from_settings(settings: &EngineSettings) -> Result<Self> {
        let backend = match &settings.remote {
            Some(remote) => crate::providers::backend_from_settings(remote)?,
            None => None,
        };

        Ok(Self {
            backend,
            phase_delay: Duration::from_millis(settings.phase_delay_ms),
            remote_timeout: Duration::from_secs(settings.remote_timeout_secs),
        })
    }

    pub fn with_backend(mut self, backend: Arc<dyn InferenceBackend>) -> Self {
        self.backend = Some(backend);
        self
    }

    pub fn with_phase_delay(mut self, delay: Duration) -> Self {
        self.phase_delay = delay;
        self
    }

    /// Skip the per-phase pacing delays
    pub fn without_delays(self) -> Self {
        self.with_phase_delay(Duration::ZERO)
    }

    pub fn with_remote_timeout(mut self, timeout: Duration) -> Self {
        self.remote_timeout = timeout;
        self
    }

    /// Mode a run starts in
    pub fn mode(&self) -> ExecutionMode {
        if self.backend.is_some() {
            ExecutionMode::Remote
        } else {
            ExecutionMode::Local
        }
    }
}
