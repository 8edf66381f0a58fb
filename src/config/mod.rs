//! Configuration resolution.
//!
//! Settings come from CLI flags, the environment (`OPENAI_BASE_URL`,
//! `MODEL_NAME`, `OPENAI_API_KEY`, optionally loaded from `.env`), and
//! `config.toml`, in that order of precedence.

mod manager;

pub use manager::{
    ChatConfig, ChatSection, ConfigFile, ConfigManager, DEFAULT_API_KEY, DEFAULT_BASE_URL,
    DEFAULT_MAX_HISTORY_TOKENS, DEFAULT_MODEL, DEFAULT_TEMPERATURE, ENV_API_KEY, ENV_BASE_URL,
    ENV_MODEL, EnvOverrides, ResolveOptions, load_config, resolve_config,
};
