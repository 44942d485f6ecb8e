//! Configuration file management and setting resolution.

mod manager;

pub use manager::{
    ConfigFile, ConfigManager, DEFAULT_API_KEY_ENV, DEFAULT_ENDPOINT, DEFAULT_MODEL,
    DEFAULT_REASONER_MODEL, ENDPOINT_ENV, Environment, LlmConfig, MODEL_ENV, PROMPTS_FILE,
    ResolveOptions, ResolvedConfig, resolve_config,
};
