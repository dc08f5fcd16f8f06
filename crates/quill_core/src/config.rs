//! Process configuration.
//!
//! Configuration is layered with the `config` crate:
//! - Bundled defaults (include_str! from quill.toml)
//! - `~/.config/quill/quill.toml`
//! - `./quill.toml`
//! - `QUILL__<SECTION>__<KEY>` environment variables
//! - Legacy `CLAUDE_API_KEY`, `CLAUDE_MODEL_ID` and `CLAUDE_PROMPT` variables

use crate::PromptTemplate;
use config::{Config, ConfigBuilder, Environment, File, FileFormat, builder::DefaultState};
use quill_error::{ConfigError, QuillError, QuillResult};
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

const DEFAULT_CONFIG: &str = include_str!("../../../quill.toml");

/// Legacy environment variables and the keys they override.
const LEGACY_VARIABLES: [(&str, &str); 3] = [
    ("CLAUDE_API_KEY", "anthropic.api_key"),
    ("CLAUDE_MODEL_ID", "anthropic.model"),
    ("CLAUDE_PROMPT", "prompt.template"),
];

/// Anthropic Messages API settings.
#[derive(Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct AnthropicConfig {
    /// API key sent as `x-api-key`
    #[serde(default)]
    pub api_key: String,
    /// Model identifier
    #[serde(default)]
    pub model: String,
    /// Upper bound on generated tokens
    #[serde(default = "default_max_tokens")]
    pub max_tokens: u32,
    /// Base URL of the API
    #[serde(default = "default_api_url")]
    pub api_url: String,
    /// Value of the `anthropic-version` header
    #[serde(default = "default_version")]
    pub version: String,
    /// TCP connect timeout
    #[serde(default = "default_connect_timeout")]
    pub connect_timeout_secs: u64,
    /// Whole-request timeout, including reading the stream
    #[serde(default = "default_request_timeout")]
    pub request_timeout_secs: u64,
}

fn default_max_tokens() -> u32 {
    4000
}

fn default_api_url() -> String {
    "https://api.anthropic.com".to_string()
}

fn default_version() -> String {
    "2023-06-01".to_string()
}

fn default_connect_timeout() -> u64 {
    10
}

fn default_request_timeout() -> u64 {
    300
}

impl Default for AnthropicConfig {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            model: String::new(),
            max_tokens: default_max_tokens(),
            api_url: default_api_url(),
            version: default_version(),
            connect_timeout_secs: default_connect_timeout(),
            request_timeout_secs: default_request_timeout(),
        }
    }
}

impl std::fmt::Debug for AnthropicConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AnthropicConfig")
            .field("api_key", &"<redacted>")
            .field("model", &self.model)
            .field("max_tokens", &self.max_tokens)
            .field("api_url", &self.api_url)
            .field("version", &self.version)
            .field("connect_timeout_secs", &self.connect_timeout_secs)
            .field("request_timeout_secs", &self.request_timeout_secs)
            .finish()
    }
}

/// Retry behaviour for establishing a completion request.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct RetryConfig {
    /// Whether transient failures are retried at all
    #[serde(default = "default_true")]
    pub enabled: bool,
    /// Maximum number of retries after the first attempt
    #[serde(default = "default_max_retries")]
    pub max_retries: usize,
    /// First backoff delay
    #[serde(default = "default_initial_backoff")]
    pub initial_backoff_ms: u64,
    /// Cap on a single backoff delay
    #[serde(default = "default_max_delay")]
    pub max_delay_secs: u64,
}

fn default_true() -> bool {
    true
}

fn default_max_retries() -> usize {
    3
}

fn default_initial_backoff() -> u64 {
    1000
}

fn default_max_delay() -> u64 {
    30
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            max_retries: default_max_retries(),
            initial_backoff_ms: default_initial_backoff(),
            max_delay_secs: default_max_delay(),
        }
    }
}

/// Prompt settings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct PromptConfig {
    /// Template containing `{{topic}}`
    #[serde(default)]
    pub template: String,
}

/// Markdown rendering settings.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct RenderConfig {
    /// syntect theme name
    #[serde(default = "default_theme")]
    pub theme: String,
    /// Language for fences without a tag
    #[serde(default = "default_language")]
    pub default_block_language: String,
    /// Language for inline code without a `{:lang}` suffix
    #[serde(default = "default_language")]
    pub default_inline_language: String,
}

fn default_theme() -> String {
    "base16-ocean.dark".to_string()
}

fn default_language() -> String {
    "plaintext".to_string()
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            theme: default_theme(),
            default_block_language: default_language(),
            default_inline_language: default_language(),
        }
    }
}

/// HTTP boundary settings.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct HttpConfig {
    /// Listen address
    #[serde(default = "default_host")]
    pub host: String,
    /// Listen port
    #[serde(default = "default_port")]
    pub port: u16,
    /// Topic served at the blog index
    #[serde(default = "default_topic")]
    pub default_topic: String,
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    3000
}

fn default_topic() -> String {
    "Next.js".to_string()
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            default_topic: default_topic(),
        }
    }
}

/// Top-level Quill configuration.
///
/// # Example
///
/// ```no_run
/// use quill_core::QuillConfig;
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let config = QuillConfig::load()?;
/// config.validate()?;
/// println!("model: {}", config.anthropic.model);
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct QuillConfig {
    /// Completion service settings
    #[serde(default)]
    pub anthropic: AnthropicConfig,
    /// Retry settings
    #[serde(default)]
    pub retry: RetryConfig,
    /// Prompt settings
    #[serde(default)]
    pub prompt: PromptConfig,
    /// Rendering settings
    #[serde(default)]
    pub render: RenderConfig,
    /// HTTP settings
    #[serde(default)]
    pub server: HttpConfig,
}

impl QuillConfig {
    /// Load configuration from a specific file path.
    ///
    /// The file is layered over the bundled `quill.toml`, so keys it omits
    /// keep their bundled values. User config files and the environment are
    /// not consulted.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn from_file(path: impl AsRef<std::path::Path>) -> QuillResult<Self> {
        debug!("Loading configuration from file");

        Self::finish(
            Config::builder()
                .add_source(File::from_str(DEFAULT_CONFIG, FileFormat::Toml))
                .add_source(File::from(path.as_ref())),
        )
    }

    /// Parse configuration from a TOML string.
    pub fn from_toml_str(toml: &str) -> QuillResult<Self> {
        Self::finish(Config::builder().add_source(File::from_str(toml, FileFormat::Toml)))
    }

    /// The bundled defaults alone, without files or environment.
    pub fn bundled() -> QuillResult<Self> {
        Self::from_toml_str(DEFAULT_CONFIG)
    }

    /// Load configuration with the full precedence chain.
    ///
    /// User config files are optional and silently skipped if not found.
    #[instrument]
    pub fn load() -> QuillResult<Self> {
        debug!("Loading configuration with precedence: legacy env > env > current dir > home dir > bundled defaults");

        let mut builder =
            Config::builder().add_source(File::from_str(DEFAULT_CONFIG, FileFormat::Toml));

        if let Some(home) = dirs::home_dir() {
            let home_config = home.join(".config/quill/quill.toml");
            builder = builder.add_source(File::from(home_config).required(false));
        }

        builder = builder
            .add_source(File::with_name("quill").required(false))
            .add_source(
                Environment::with_prefix("QUILL")
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            );

        let builder = apply_overrides(builder, legacy_overrides(|key| std::env::var(key).ok()))?;
        Self::finish(builder)
    }

    fn finish(builder: ConfigBuilder<DefaultState>) -> QuillResult<Self> {
        builder
            .build()
            .map_err(|e| {
                QuillError::from(ConfigError::new(format!(
                    "Failed to build configuration: {}",
                    e
                )))
            })?
            .try_deserialize()
            .map_err(|e| {
                QuillError::from(ConfigError::new(format!(
                    "Failed to parse configuration: {}",
                    e
                )))
            })
    }

    /// Check the settings every generation depends on.
    ///
    /// # Errors
    ///
    /// Returns a configuration error for an empty API key, model, prompt
    /// template or token limit.
    pub fn validate(&self) -> QuillResult<()> {
        if self.anthropic.api_key.trim().is_empty() {
            Err(ConfigError::new(
                "API key is not configured (set CLAUDE_API_KEY or anthropic.api_key)",
            ))?
        }
        if self.anthropic.model.trim().is_empty() {
            Err(ConfigError::new(
                "Model is not configured (set CLAUDE_MODEL_ID or anthropic.model)",
            ))?
        }
        if self.anthropic.max_tokens == 0 {
            Err(ConfigError::new("anthropic.max_tokens must be positive"))?
        }
        self.prompt_template()?;
        Ok(())
    }

    /// The validated prompt template.
    pub fn prompt_template(&self) -> QuillResult<PromptTemplate> {
        Ok(PromptTemplate::new(self.prompt.template.as_str())?)
    }
}

/// Collect legacy variable overrides using `lookup` to read the environment.
///
/// Empty values are ignored so an unset-but-exported variable does not wipe
/// a configured value.
pub(crate) fn legacy_overrides(
    lookup: impl Fn(&str) -> Option<String>,
) -> Vec<(&'static str, String)> {
    LEGACY_VARIABLES
        .iter()
        .filter_map(|(variable, key)| {
            lookup(variable)
                .filter(|value| !value.is_empty())
                .map(|value| {
                    debug!(variable, key, "Applying legacy environment override");
                    (*key, value)
                })
        })
        .collect()
}

fn apply_overrides(
    mut builder: ConfigBuilder<DefaultState>,
    overrides: Vec<(&'static str, String)>,
) -> QuillResult<ConfigBuilder<DefaultState>> {
    for (key, value) in overrides {
        builder = builder.set_override(key, value).map_err(|e| {
            QuillError::from(ConfigError::new(format!(
                "Failed to apply override for {}: {}",
                key, e
            )))
        })?;
    }
    Ok(builder)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_bundled_defaults_parse() {
        let config = QuillConfig::from_toml_str(DEFAULT_CONFIG).unwrap();
        assert_eq!(config.anthropic.max_tokens, 4000);
        assert_eq!(config.anthropic.version, "2023-06-01");
        assert_eq!(config.server.default_topic, "Next.js");
        assert!(config.prompt.template.contains("{{topic}}"));
    }

    #[test]
    fn test_legacy_overrides_win() {
        let env: HashMap<&str, &str> = HashMap::from([
            ("CLAUDE_API_KEY", "sk-test"),
            ("CLAUDE_MODEL_ID", "claude-test"),
            ("CLAUDE_PROMPT", "Write about {{topic}}"),
        ]);
        let overrides = legacy_overrides(|k| env.get(k).map(|v| v.to_string()));
        assert_eq!(overrides.len(), 3);

        let builder =
            Config::builder().add_source(File::from_str(DEFAULT_CONFIG, FileFormat::Toml));
        let config = QuillConfig::finish(apply_overrides(builder, overrides).unwrap()).unwrap();

        assert_eq!(config.anthropic.api_key, "sk-test");
        assert_eq!(config.anthropic.model, "claude-test");
        assert_eq!(config.prompt.template, "Write about {{topic}}");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_empty_legacy_values_ignored() {
        let overrides = legacy_overrides(|k| (k == "CLAUDE_MODEL_ID").then(String::new));
        assert!(overrides.is_empty());
    }

    #[test]
    fn test_debug_redacts_api_key() {
        let config = AnthropicConfig {
            api_key: "sk-secret".to_string(),
            ..AnthropicConfig::default()
        };
        let debug = format!("{:?}", config);
        assert!(!debug.contains("sk-secret"));
        assert!(debug.contains("<redacted>"));
    }
}
