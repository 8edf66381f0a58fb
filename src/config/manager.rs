use anyhow::{Context, Result, bail};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

use crate::paths;

pub const DEFAULT_BASE_URL: &str = "http://localhost:8080/v1";
pub const DEFAULT_MODEL: &str = "gpt-oss-20b";
/// llama.cpp ignores auth, but OpenAI clients expect some key.
pub const DEFAULT_API_KEY: &str = "dummy-key";
pub const DEFAULT_TEMPERATURE: f32 = 0.7;
pub const DEFAULT_MAX_HISTORY_TOKENS: usize = 3000;
pub const DEFAULT_SESSION_ID: &str = "cli";

pub const ENV_BASE_URL: &str = "OPENAI_BASE_URL";
pub const ENV_MODEL: &str = "MODEL_NAME";
pub const ENV_API_KEY: &str = "OPENAI_API_KEY";

/// Settings in the `[chat]` section of config.toml.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ChatSection {
    /// OpenAI-compatible base URL including the version prefix.
    pub base_url: Option<String>,
    /// Model name sent with each request.
    pub model: Option<String>,
    /// API key stored directly in config (not recommended).
    pub api_key: Option<String>,
    /// Environment variable name containing the API key.
    pub api_key_env: Option<String>,
    pub temperature: Option<f32>,
    /// Token budget for the system prompt plus replayed history.
    pub max_history_tokens: Option<usize>,
    /// Request SSE streaming from the backend.
    pub stream: Option<bool>,
    /// Replaces the built-in Harmony system prompt.
    pub system_prompt: Option<String>,
}

impl ChatSection {
    /// Gets the API key, preferring the named environment variable over the config file.
    pub fn get_api_key(&self) -> Option<String> {
        if let Some(env_var) = &self.api_key_env
            && let Ok(key) = std::env::var(env_var)
            && !key.is_empty()
        {
            return Some(key);
        }
        self.api_key.clone()
    }
}

/// The complete configuration file structure.
///
/// Corresponds to `~/.config/harmony-chat/config.toml`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ConfigFile {
    #[serde(default)]
    pub chat: ChatSection,
}

/// Values taken from the process environment (after `.env` loading).
#[derive(Debug, Clone, Default)]
pub struct EnvOverrides {
    pub base_url: Option<String>,
    pub model: Option<String>,
    pub api_key: Option<String>,
}

impl EnvOverrides {
    pub fn from_env() -> Self {
        let read = |name: &str| std::env::var(name).ok().filter(|v| !v.trim().is_empty());
        Self {
            base_url: read(ENV_BASE_URL),
            model: read(ENV_MODEL),
            api_key: read(ENV_API_KEY),
        }
    }
}

/// CLI overrides that take precedence over every other source.
#[derive(Debug, Clone, Default)]
pub struct ResolveOptions {
    pub base_url: Option<String>,
    pub model: Option<String>,
    pub temperature: Option<f32>,
    pub max_history_tokens: Option<usize>,
    /// `true` forces streaming on; `false` defers to the config file.
    pub stream: bool,
    pub session_id: Option<String>,
}

/// Fully resolved configuration, built once at startup and passed down.
#[derive(Debug, Clone, PartialEq)]
pub struct ChatConfig {
    pub base_url: String,
    pub model: String,
    pub api_key: String,
    pub temperature: f32,
    pub max_history_tokens: usize,
    pub stream: bool,
    pub system_prompt: Option<String>,
    pub session_id: String,
}

impl Default for ChatConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            model: DEFAULT_MODEL.to_string(),
            api_key: DEFAULT_API_KEY.to_string(),
            temperature: DEFAULT_TEMPERATURE,
            max_history_tokens: DEFAULT_MAX_HISTORY_TOKENS,
            stream: false,
            system_prompt: None,
            session_id: DEFAULT_SESSION_ID.to_string(),
        }
    }
}

impl ChatConfig {
    /// API key with everything but the last four characters hidden.
    pub fn masked_api_key(&self) -> String {
        let chars: Vec<char> = self.api_key.chars().collect();
        if chars.len() <= 4 {
            return "*".repeat(chars.len());
        }
        let visible: String = chars[chars.len() - 4..].iter().collect();
        format!("{}{visible}", "*".repeat(chars.len() - 4))
    }

    fn validate(&self) -> Result<()> {
        if !(self.base_url.starts_with("http://") || self.base_url.starts_with("https://")) {
            bail!(
                "Invalid base URL: '{}'\n\n\
                 The base URL must start with http:// or https://, e.g. {DEFAULT_BASE_URL}",
                self.base_url
            );
        }
        if !(0.0..=2.0).contains(&self.temperature) {
            bail!(
                "Invalid temperature: {}\n\n\
                 Temperature must be between 0.0 and 2.0",
                self.temperature
            );
        }
        if self.max_history_tokens == 0 {
            bail!("Invalid max_history_tokens: must be greater than 0");
        }
        if self.model.trim().is_empty() {
            bail!("Missing required configuration: 'model'");
        }
        Ok(())
    }
}

/// Resolves configuration from every source.
///
/// Priority (highest first): CLI options, environment, config file, built-in defaults.
pub fn resolve_config(
    options: &ResolveOptions,
    env: &EnvOverrides,
    config_file: &ConfigFile,
) -> Result<ChatConfig> {
    let file = &config_file.chat;
    let defaults = ChatConfig::default();

    let config = ChatConfig {
        base_url: options
            .base_url
            .clone()
            .or_else(|| env.base_url.clone())
            .or_else(|| file.base_url.clone())
            .unwrap_or(defaults.base_url),
        model: options
            .model
            .clone()
            .or_else(|| env.model.clone())
            .or_else(|| file.model.clone())
            .unwrap_or(defaults.model),
        api_key: env
            .api_key
            .clone()
            .or_else(|| file.get_api_key())
            .unwrap_or(defaults.api_key),
        temperature: options
            .temperature
            .or(file.temperature)
            .unwrap_or(defaults.temperature),
        max_history_tokens: options
            .max_history_tokens
            .or(file.max_history_tokens)
            .unwrap_or(defaults.max_history_tokens),
        stream: options.stream || file.stream.unwrap_or(defaults.stream),
        system_prompt: file.system_prompt.clone(),
        session_id: options
            .session_id
            .clone()
            .unwrap_or(defaults.session_id),
    };

    config.validate()?;
    Ok(config)
}

/// Resolves configuration from the config file and current environment.
pub fn load_config(options: &ResolveOptions) -> Result<ChatConfig> {
    let manager = ConfigManager::new()?;
    let config_file = manager.load_or_default()?;
    resolve_config(options, &EnvOverrides::from_env(), &config_file)
}

/// Manages loading and saving configuration files.
pub struct ConfigManager {
    config_path: PathBuf,
}

impl ConfigManager {
    /// Creates a new config manager.
    ///
    /// Configuration is stored at `$XDG_CONFIG_HOME/harmony-chat/config.toml`
    /// or `~/.config/harmony-chat/config.toml` if `XDG_CONFIG_HOME` is not set.
    pub fn new() -> Result<Self> {
        Ok(Self {
            config_path: paths::config_dir()?.join("config.toml"),
        })
    }

    pub const fn config_path(&self) -> &PathBuf {
        &self.config_path
    }

    pub fn load(&self) -> Result<ConfigFile> {
        let contents = fs::read_to_string(&self.config_path).with_context(|| {
            format!("Failed to read config file: {}", self.config_path.display())
        })?;

        let config_file: ConfigFile =
            toml::from_str(&contents).with_context(|| "Failed to parse config file")?;

        Ok(config_file)
    }

    /// Loads the config file, treating a missing file as empty.
    ///
    /// A file that exists but cannot be parsed is still an error.
    pub fn load_or_default(&self) -> Result<ConfigFile> {
        if self.config_path.exists() {
            self.load()
        } else {
            Ok(ConfigFile::default())
        }
    }

    pub fn save(&self, config: &ConfigFile) -> Result<()> {
        if let Some(parent) = self.config_path.parent() {
            fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create config directory: {}", parent.display())
            })?;
        }

        let contents = toml::to_string_pretty(config).context("Failed to serialize config")?;

        crate::fs::atomic_write(&self.config_path, &contents).with_context(|| {
            format!(
                "Failed to write config file: {}",
                self.config_path.display()
            )
        })?;

        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use serial_test::serial;
    use tempfile::TempDir;

    fn create_test_manager(temp_dir: &TempDir) -> ConfigManager {
        ConfigManager {
            config_path: temp_dir.path().join("config.toml"),
        }
    }

    #[test]
    fn test_save_and_load_config() {
        let temp_dir = TempDir::new().unwrap();
        let manager = create_test_manager(&temp_dir);

        let config = ConfigFile {
            chat: ChatSection {
                base_url: Some("http://gpu-box:8080/v1".to_string()),
                model: Some("gpt-oss-120b".to_string()),
                temperature: Some(0.2),
                stream: Some(true),
                ..ChatSection::default()
            },
        };

        manager.save(&config).unwrap();
        let loaded = manager.load().unwrap();

        assert_eq!(loaded.chat.base_url.as_deref(), Some("http://gpu-box:8080/v1"));
        assert_eq!(loaded.chat.model.as_deref(), Some("gpt-oss-120b"));
        assert_eq!(loaded.chat.temperature, Some(0.2));
        assert_eq!(loaded.chat.stream, Some(true));
        assert!(loaded.chat.api_key.is_none());
    }

    #[test]
    fn test_load_nonexistent_config() {
        let temp_dir = TempDir::new().unwrap();
        let manager = create_test_manager(&temp_dir);

        assert!(manager.load().is_err());
        let config = manager.load_or_default().unwrap();
        assert!(config.chat.model.is_none());
    }

    #[test]
    fn test_load_or_default_rejects_malformed_file() {
        let temp_dir = TempDir::new().unwrap();
        let manager = create_test_manager(&temp_dir);
        fs::write(manager.config_path(), "[chat\nmodel = ").unwrap();

        assert!(manager.load_or_default().is_err());
    }

    #[test]
    fn test_parse_partial_config() {
        let config: ConfigFile = toml::from_str("[chat]\nmodel = \"qwen3\"\n").unwrap();
        assert_eq!(config.chat.model.as_deref(), Some("qwen3"));
        assert!(config.chat.base_url.is_none());

        let empty: ConfigFile = toml::from_str("").unwrap();
        assert!(empty.chat.model.is_none());
    }

    #[test]
    #[serial]
    fn test_section_api_key_from_env() {
        // SAFETY: serialized with the other env-mutating tests
        unsafe {
            std::env::set_var("HARMONY_CHAT_TEST_KEY", "from-env");
        }

        let section = ChatSection {
            api_key: Some("from-file".to_string()),
            api_key_env: Some("HARMONY_CHAT_TEST_KEY".to_string()),
            ..ChatSection::default()
        };
        assert_eq!(section.get_api_key(), Some("from-env".to_string()));

        // SAFETY: see above
        unsafe {
            std::env::remove_var("HARMONY_CHAT_TEST_KEY");
        }
        assert_eq!(section.get_api_key(), Some("from-file".to_string()));
    }

    #[test]
    fn test_resolve_defaults() {
        let resolved = resolve_config(
            &ResolveOptions::default(),
            &EnvOverrides::default(),
            &ConfigFile::default(),
        )
        .unwrap();

        assert_eq!(resolved, ChatConfig::default());
        assert_eq!(resolved.base_url, "http://localhost:8080/v1");
        assert_eq!(resolved.model, "gpt-oss-20b");
        assert_eq!(resolved.api_key, "dummy-key");
        assert!((resolved.temperature - 0.7).abs() < f32::EPSILON);
        assert_eq!(resolved.max_history_tokens, 3000);
        assert_eq!(resolved.session_id, "cli");
    }

    #[test]
    fn test_resolve_rejects_out_of_range_temperature() {
        let options = ResolveOptions {
            temperature: Some(3.5),
            ..ResolveOptions::default()
        };
        let err = resolve_config(&options, &EnvOverrides::default(), &ConfigFile::default())
            .unwrap_err();
        assert!(err.to_string().contains("temperature"));
    }

    #[test]
    fn test_resolve_rejects_bad_base_url() {
        let env = EnvOverrides {
            base_url: Some("localhost:8080".to_string()),
            ..EnvOverrides::default()
        };
        let err =
            resolve_config(&ResolveOptions::default(), &env, &ConfigFile::default()).unwrap_err();
        assert!(err.to_string().contains("base URL"));
    }

    #[test]
    fn test_resolve_rejects_zero_budget() {
        let options = ResolveOptions {
            max_history_tokens: Some(0),
            ..ResolveOptions::default()
        };
        assert!(
            resolve_config(&options, &EnvOverrides::default(), &ConfigFile::default()).is_err()
        );
    }

    #[test]
    fn test_masked_api_key() {
        let mut config = ChatConfig::default();
        config.api_key = "sk-abcdef1234".to_string();
        assert_eq!(config.masked_api_key(), "*********1234");

        config.api_key = "abc".to_string();
        assert_eq!(config.masked_api_key(), "***");
    }
}
