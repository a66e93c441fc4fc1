//! Application configuration management
//!
//! Configuration is layered: an optional TOML file, then environment variables
//! (including those loaded from `.env`). All values are validated at startup.

use crate::core::constants::language;
use crate::pipeline::options::{BackendMode, ProcessOptions, ResponseMode, TranslationBackend};
use anyhow::{Context, Result, bail};
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

/// Config file read when present and no path is given
const DEFAULT_CONFIG_PATH: &str = "config.toml";

/// Default OpenAI endpoint
const DEFAULT_OPENAI_BASE_URL: &str = "https://api.openai.com/v1";

/// Default chat model for both wrappers
const DEFAULT_MODEL: &str = "gpt-4o-mini";

/// Default request timeout in seconds for upstream model calls
const DEFAULT_REQUEST_TIMEOUT: u64 = 90;

/// Default timeout in seconds for UI calls to the backend
const DEFAULT_BACKEND_TIMEOUT: u64 = 10;

/// Default server port
const DEFAULT_PORT: u16 = 8000;

const DEFAULT_TRANSLATION_MAX_TOKENS: u32 = 1024;
const DEFAULT_RESPONSE_MAX_TOKENS: u32 = 256;
const DEFAULT_TRANSLATION_TEMPERATURE: f32 = 0.0;
const DEFAULT_RESPONSE_TEMPERATURE: f32 = 0.2;

const DEFAULT_EVALUATIONS_PATH: &str = "data/evaluations.json";

#[derive(Debug, Clone, Deserialize, Default)]
pub struct OpenAIConfig {
    #[serde(default)]
    pub api_key: Option<String>,
    #[serde(default)]
    pub base_url: Option<String>,
    #[serde(default)]
    pub azure_api_version: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ModelConfig {
    #[serde(default = "default_model")]
    pub translation_model: String,
    #[serde(default = "default_model")]
    pub response_model: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RequestConfig {
    #[serde(default = "default_request_timeout")]
    pub request_timeout: u64,
    #[serde(default = "default_translation_max_tokens")]
    pub translation_max_tokens: u32,
    #[serde(default = "default_response_max_tokens")]
    pub response_max_tokens: u32,
    #[serde(default = "default_translation_temperature")]
    pub translation_temperature: f32,
    #[serde(default = "default_response_temperature")]
    pub response_temperature: f32,
    #[serde(default = "default_target_language")]
    pub target_language: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct UiConfig {
    #[serde(default = "default_backend_url")]
    pub backend_url: String,
    #[serde(default = "default_backend_timeout")]
    pub backend_timeout: u64,
    #[serde(default = "default_backend_mode")]
    pub backend: String,
    #[serde(default = "default_translation_backend")]
    pub translation_backend: String,
    #[serde(default = "default_response_mode")]
    pub response_mode: String,
    #[serde(default = "default_generate_reply")]
    pub generate_reply: bool,
}

#[derive(Debug, Clone, Deserialize)]
pub struct StorageConfig {
    #[serde(default = "default_evaluations_path")]
    pub evaluations_path: PathBuf,
}

fn default_model() -> String {
    DEFAULT_MODEL.to_string()
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    DEFAULT_PORT
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_request_timeout() -> u64 {
    DEFAULT_REQUEST_TIMEOUT
}

fn default_translation_max_tokens() -> u32 {
    DEFAULT_TRANSLATION_MAX_TOKENS
}

fn default_response_max_tokens() -> u32 {
    DEFAULT_RESPONSE_MAX_TOKENS
}

fn default_translation_temperature() -> f32 {
    DEFAULT_TRANSLATION_TEMPERATURE
}

fn default_response_temperature() -> f32 {
    DEFAULT_RESPONSE_TEMPERATURE
}

fn default_target_language() -> String {
    language::DEFAULT_TARGET.to_string()
}

fn default_backend_url() -> String {
    format!("http://localhost:{}", DEFAULT_PORT)
}

fn default_backend_timeout() -> u64 {
    DEFAULT_BACKEND_TIMEOUT
}

fn default_backend_mode() -> String {
    "remote".to_string()
}

fn default_translation_backend() -> String {
    "auto".to_string()
}

fn default_response_mode() -> String {
    "ai".to_string()
}

fn default_generate_reply() -> bool {
    true
}

fn default_evaluations_path() -> PathBuf {
    PathBuf::from(DEFAULT_EVALUATIONS_PATH)
}

impl Default for ModelConfig {
    fn default() -> Self {
        Self {
            translation_model: default_model(),
            response_model: default_model(),
        }
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            log_level: default_log_level(),
        }
    }
}

impl Default for RequestConfig {
    fn default() -> Self {
        Self {
            request_timeout: default_request_timeout(),
            translation_max_tokens: default_translation_max_tokens(),
            response_max_tokens: default_response_max_tokens(),
            translation_temperature: default_translation_temperature(),
            response_temperature: default_response_temperature(),
            target_language: default_target_language(),
        }
    }
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            backend_url: default_backend_url(),
            backend_timeout: default_backend_timeout(),
            backend: default_backend_mode(),
            translation_backend: default_translation_backend(),
            response_mode: default_response_mode(),
            generate_reply: default_generate_reply(),
        }
    }
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            evaluations_path: default_evaluations_path(),
        }
    }
}

#[derive(Debug, Clone, Deserialize, Default)]
pub struct TomlConfig {
    #[serde(default)]
    pub openai: OpenAIConfig,
    #[serde(default)]
    pub models: ModelConfig,
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub request: RequestConfig,
    #[serde(default)]
    pub ui: UiConfig,
    #[serde(default)]
    pub storage: StorageConfig,
}

/// Resolved application configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// OpenAI API key; model-backed features are disabled without it
    pub openai_api_key: Option<String>,

    /// OpenAI API base URL (or Azure endpoint)
    pub openai_base_url: String,

    /// Azure API version (for Azure OpenAI deployments)
    pub azure_api_version: Option<String>,

    pub translation_model: String,
    pub response_model: String,

    /// Server host address
    pub host: String,

    /// Server port
    pub port: u16,

    /// Logging level
    pub log_level: String,

    /// Upstream request timeout in seconds
    pub request_timeout: u64,

    pub translation_max_tokens: u32,
    pub response_max_tokens: u32,
    pub translation_temperature: f32,
    pub response_temperature: f32,

    /// Language queries are translated into
    pub target_language: String,

    /// Backend base URL used by the UI in remote mode
    pub backend_url: String,

    /// Timeout in seconds for UI calls to the backend
    pub backend_timeout: u64,

    pub backend_mode: BackendMode,
    pub translation_backend: TranslationBackend,
    pub response_mode: ResponseMode,
    pub generate_reply: bool,

    /// JSON file holding saved evaluations
    pub evaluations_path: PathBuf,
}

impl Default for Config {
    fn default() -> Self {
        Self::assemble(
            TomlConfig::default(),
            BackendMode::Remote,
            TranslationBackend::Auto,
            ResponseMode::Ai,
        )
    }
}

impl Config {
    /// Build configuration from parsed TOML sections
    ///
    /// # Errors
    ///
    /// Returns error if a mode name is not recognized
    pub fn from_toml(config: TomlConfig) -> Result<Self> {
        let backend_mode = BackendMode::from_str(&config.ui.backend)
            .context("Invalid ui.backend value. Must be one of: remote, local")?;
        let translation_backend = TranslationBackend::from_str(&config.ui.translation_backend)
            .context("Invalid ui.translation_backend value. Must be one of: auto, openai, local")?;
        let response_mode = ResponseMode::from_str(&config.ui.response_mode)
            .context("Invalid ui.response_mode value. Must be one of: ai, canned")?;

        Ok(Self::assemble(
            config,
            backend_mode,
            translation_backend,
            response_mode,
        ))
    }

    fn assemble(
        config: TomlConfig,
        backend_mode: BackendMode,
        translation_backend: TranslationBackend,
        response_mode: ResponseMode,
    ) -> Self {
        Config {
            openai_api_key: config.openai.api_key.filter(|k| !k.trim().is_empty()),
            openai_base_url: config
                .openai
                .base_url
                .unwrap_or_else(|| DEFAULT_OPENAI_BASE_URL.to_string()),
            azure_api_version: config.openai.azure_api_version,
            translation_model: config.models.translation_model,
            response_model: config.models.response_model,
            host: config.server.host,
            port: config.server.port,
            log_level: config.server.log_level,
            request_timeout: config.request.request_timeout,
            translation_max_tokens: config.request.translation_max_tokens,
            response_max_tokens: config.request.response_max_tokens,
            translation_temperature: config.request.translation_temperature,
            response_temperature: config.request.response_temperature,
            target_language: config.request.target_language,
            backend_url: config.ui.backend_url,
            backend_timeout: config.ui.backend_timeout,
            backend_mode,
            translation_backend,
            response_mode,
            generate_reply: config.ui.generate_reply,
            evaluations_path: config.storage.evaluations_path,
        }
    }

    /// Load configuration from a TOML file
    ///
    /// # Errors
    ///
    /// Returns error if the file cannot be read or parsed, or holds invalid values
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(path).context("Failed to read configuration file")?;

        let config: TomlConfig =
            toml::from_str(&content).context("Failed to parse TOML configuration")?;

        Self::from_toml(config)
    }

    /// Load configuration for the running process
    ///
    /// An explicit path or `CONFIG_PATH` must point to an existing file.
    /// Otherwise `config.toml` is read when present, and built-in defaults are
    /// used when it is not. Environment overrides are applied last.
    pub fn load(explicit_path: Option<&Path>) -> Result<Self> {
        let env_path = std::env::var("CONFIG_PATH").ok();
        let mut config = Self::read_source(explicit_path, env_path.as_deref())?;

        config.apply_env_overrides(|key| std::env::var(key).ok())?;
        config.validate()?;
        Ok(config)
    }

    fn read_source(explicit_path: Option<&Path>, env_path: Option<&str>) -> Result<Self> {
        if let Some(path) = explicit_path {
            return Self::from_file(path)
                .with_context(|| format!("Cannot load config {}", path.display()));
        }

        if let Some(path) = env_path.map(str::trim).filter(|p| !p.is_empty()) {
            return Self::from_file(path)
                .with_context(|| format!("Cannot load CONFIG_PATH {}", path));
        }

        let default_path = Path::new(DEFAULT_CONFIG_PATH);
        if default_path.exists() {
            Self::from_file(default_path)
        } else {
            Ok(Self::default())
        }
    }

    /// Apply environment overrides through `lookup`
    ///
    /// Recognized keys: `OPENAI_API_KEY`, `OPENAI_BASE_URL`, `AZURE_API_VERSION`,
    /// `BACKEND_URL`, `HOST`, `PORT`, `LOG_LEVEL`.
    pub fn apply_env_overrides<F>(&mut self, lookup: F) -> Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        let lookup = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        if let Some(key) = lookup("OPENAI_API_KEY") {
            self.openai_api_key = Some(key.trim().to_string());
        }
        if let Some(url) = lookup("OPENAI_BASE_URL") {
            self.openai_base_url = url;
        }
        if let Some(version) = lookup("AZURE_API_VERSION") {
            self.azure_api_version = Some(version);
        }
        if let Some(url) = lookup("BACKEND_URL") {
            self.backend_url = url;
        }
        if let Some(host) = lookup("HOST") {
            self.host = host;
        }
        if let Some(port) = lookup("PORT") {
            self.port = port
                .trim()
                .parse()
                .with_context(|| format!("Invalid PORT value: {}", port))?;
        }
        if let Some(level) = lookup("LOG_LEVEL") {
            self.log_level = level;
        }
        Ok(())
    }

    /// Check value ranges
    ///
    /// # Errors
    ///
    /// Returns error for out-of-range temperatures or zero timeouts
    pub fn validate(&self) -> Result<()> {
        for (name, value) in [
            ("translation_temperature", self.translation_temperature),
            ("response_temperature", self.response_temperature),
        ] {
            if !(0.0..=1.0).contains(&value) {
                bail!("request.{} must be between 0.0 and 1.0, got {}", name, value);
            }
        }
        if self.request_timeout == 0 {
            bail!("request.request_timeout must be greater than zero");
        }
        if self.backend_timeout == 0 {
            bail!("ui.backend_timeout must be greater than zero");
        }
        if self.target_language.trim().is_empty() {
            bail!("request.target_language must not be empty");
        }
        Ok(())
    }

    /// Whether an OpenAI key is available
    pub fn has_openai_key(&self) -> bool {
        self.openai_api_key.is_some()
    }

    /// Default per-query options for the terminal UI
    pub fn process_options(&self) -> ProcessOptions {
        ProcessOptions {
            backend: self.backend_mode,
            translation_backend: self.translation_backend,
            response_mode: self.response_mode,
            temperature: self.response_temperature,
            generate_reply: self.generate_reply,
            target_language: self.target_language.clone(),
        }
    }
}
