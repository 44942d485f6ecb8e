use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::paths;

/// Model used when nothing pins one and the active role names none.
pub const DEFAULT_MODEL: &str = "gpt-4o-mini";
/// Model behind the `<role>-R` variants unless the config file names another.
pub const DEFAULT_REASONER_MODEL: &str = "o3-mini";
/// Built-in OpenAI-compatible API base.
pub const DEFAULT_ENDPOINT: &str = "https://api.openai.com/v1";
/// Environment variable holding the API key unless the config file names another.
pub const DEFAULT_API_KEY_ENV: &str = "OPENAI_API_KEY";
/// Environment variable overriding the model.
pub const MODEL_ENV: &str = "OPENAI_MODEL";
/// Environment variable overriding the API base.
pub const ENDPOINT_ENV: &str = "OPENAI_BASE_URL";
/// File name of the role definitions inside the config directory.
pub const PROMPTS_FILE: &str = "system_prompts.json";

/// Default settings in the `[llm]` section of config.toml.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LlmConfig {
    /// Model pinned for every role.
    pub model: Option<String>,
    /// Model used by the `<role>-R` variants.
    pub reasoner_model: Option<String>,
    /// Default OpenAI-compatible API base URL.
    pub endpoint: Option<String>,
    /// Role selected at startup.
    pub role: Option<String>,
    /// Environment variable name containing the API key.
    pub api_key_env: Option<String>,
    /// Path to the role definitions JSON file.
    pub prompts: Option<PathBuf>,
    /// Stream responses token by token.
    pub stream: Option<bool>,
}

/// The complete configuration file structure.
///
/// Corresponds to `~/.config/cli-llm/config.toml`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ConfigFile {
    #[serde(default)]
    pub llm: LlmConfig,
}

/// Values sourced from environment variables.
#[derive(Debug, Clone, Default)]
pub struct Environment {
    pub model: Option<String>,
    pub endpoint: Option<String>,
    pub api_key: Option<String>,
}

impl Environment {
    /// Captures the relevant variables, reading the key from `api_key_env`.
    pub fn capture(api_key_env: &str) -> Self {
        Self {
            model: non_empty_var(MODEL_ENV),
            endpoint: non_empty_var(ENDPOINT_ENV),
            api_key: non_empty_var(api_key_env),
        }
    }
}

fn non_empty_var(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|v| !v.trim().is_empty())
}

/// Options for resolving configuration.
///
/// Contains CLI overrides that take precedence over every other source.
#[derive(Debug, Clone, Default)]
pub struct ResolveOptions {
    /// Role override.
    pub role: Option<String>,
    /// Model name override.
    pub model: Option<String>,
    /// Temperature override (otherwise the role's default applies).
    pub temperature: Option<f32>,
    /// Disable streaming.
    pub no_stream: bool,
}

/// Resolved configuration after merging CLI, environment and config file.
#[derive(Debug, Clone)]
pub struct ResolvedConfig {
    /// Model pinned by the CLI, environment or config file; `None` lets the
    /// active role choose.
    pub model: Option<String>,
    pub reasoner_model: String,
    pub endpoint: String,
    /// The API key; endpoints without authentication leave this unset.
    pub api_key: Option<String>,
    /// Requested startup role, validated later against the loaded roles.
    pub role: Option<String>,
    pub temperature: Option<f32>,
    pub stream: bool,
}

/// Resolves configuration with priority CLI > environment > config file > built-in.
pub fn resolve_config(
    options: &ResolveOptions,
    env: &Environment,
    config_file: &ConfigFile,
) -> ResolvedConfig {
    let file = &config_file.llm;

    let model = options
        .model
        .clone()
        .or_else(|| env.model.clone())
        .or_else(|| file.model.clone());

    let reasoner_model = file
        .reasoner_model
        .clone()
        .unwrap_or_else(|| DEFAULT_REASONER_MODEL.to_string());

    let endpoint = env
        .endpoint
        .clone()
        .or_else(|| file.endpoint.clone())
        .unwrap_or_else(|| DEFAULT_ENDPOINT.to_string());

    let stream = !options.no_stream && file.stream.unwrap_or(true);

    ResolvedConfig {
        model,
        reasoner_model,
        endpoint,
        api_key: env.api_key.clone(),
        role: options.role.clone().or_else(|| file.role.clone()),
        temperature: options.temperature,
        stream,
    }
}

/// Manages locating and loading configuration files.
pub struct ConfigManager {
    config_dir: PathBuf,
}

impl ConfigManager {
    /// Creates a new config manager.
    ///
    /// Configuration lives in `$XDG_CONFIG_HOME/cli-llm/`
    /// or `~/.config/cli-llm/` if `XDG_CONFIG_HOME` is not set.
    pub fn new() -> Result<Self> {
        Ok(Self {
            config_dir: paths::config_dir()?,
        })
    }

    /// Creates a manager rooted at an explicit directory.
    pub fn with_dir(config_dir: impl Into<PathBuf>) -> Self {
        Self {
            config_dir: config_dir.into(),
        }
    }

    pub fn config_path(&self) -> PathBuf {
        self.config_dir.join("config.toml")
    }

    /// Where role definitions are read from.
    pub fn prompts_path(&self, config: &ConfigFile) -> PathBuf {
        config
            .llm
            .prompts
            .clone()
            .unwrap_or_else(|| self.config_dir.join(PROMPTS_FILE))
    }

    pub fn load(&self) -> Result<ConfigFile> {
        let path = self.config_path();
        let contents = fs::read_to_string(&path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        parse_config(&contents, &path)
    }

    /// Loads the config file; a missing file is silent, a broken one is logged.
    pub fn load_or_default(&self) -> ConfigFile {
        let path = self.config_path();
        if !path.exists() {
            tracing::debug!(path = %path.display(), "no config file");
            return ConfigFile::default();
        }

        self.load().unwrap_or_else(|e| {
            tracing::warn!("{e:#}; using defaults");
            ConfigFile::default()
        })
    }
}

fn parse_config(contents: &str, path: &Path) -> Result<ConfigFile> {
    toml::from_str(contents)
        .with_context(|| format!("Failed to parse config file: {}", path.display()))
}
