use anyhow::Result;

use crate::chat::{RoleContext, SessionState};
use crate::cli::Args;
use crate::config::{
    ConfigManager, DEFAULT_API_KEY_ENV, DEFAULT_MODEL, Environment, ResolveOptions,
    ResolvedConfig, resolve_config,
};
use crate::llm::{ChatClient, InvokeOptions, TerminalInvoker};
use crate::roles::RoleRegistry;
use crate::ui::print_warning;

/// Flags shared by every mode.
#[derive(Debug, Clone, Default)]
pub struct SetupOptions {
    pub role: Option<String>,
    pub model: Option<String>,
    pub temperature: Option<f32>,
    pub no_stream: bool,
    pub count_tokens: bool,
}

impl From<&Args> for SetupOptions {
    fn from(args: &Args) -> Self {
        Self {
            role: args.role.clone(),
            model: args.model.clone(),
            temperature: args.temperature,
            no_stream: args.no_stream,
            count_tokens: args.count_tokens,
        }
    }
}

/// Resolved settings plus the loaded role registry.
pub struct Setup {
    pub config: ResolvedConfig,
    pub registry: RoleRegistry,
    count_tokens: bool,
}

impl Setup {
    /// Reads the config file, environment and role definitions.
    pub fn load(options: &SetupOptions) -> Result<Self> {
        let manager = ConfigManager::new()?;
        let file_config = manager.load_or_default();

        let api_key_env = file_config
            .llm
            .api_key_env
            .as_deref()
            .unwrap_or(DEFAULT_API_KEY_ENV);
        let env = Environment::capture(api_key_env);
        if env.api_key.is_none() {
            tracing::debug!(var = api_key_env, "no API key set, sending unauthenticated requests");
        }

        let resolve = ResolveOptions {
            role: options.role.clone(),
            model: options.model.clone(),
            temperature: options.temperature,
            no_stream: options.no_stream,
        };
        let config = resolve_config(&resolve, &env, &file_config);
        tracing::debug!(
            model = ?config.model,
            endpoint = %config.endpoint,
            stream = config.stream,
            "resolved configuration"
        );

        let registry = RoleRegistry::load(&manager.prompts_path(&file_config));

        Ok(Self {
            config,
            registry,
            count_tokens: options.count_tokens,
        })
    }

    /// Session state in the requested role, or the default role if that is unknown.
    pub fn session_state(&self) -> SessionState {
        let mut state = SessionState::new(
            self.registry.clone(),
            DEFAULT_MODEL,
            self.config.endpoint.clone(),
        )
        .with_model(self.config.model.clone())
        .with_reasoner_model(self.config.reasoner_model.clone())
        .with_temperature(self.config.temperature);

        if let Some(role) = &self.config.role
            && let Err(e) = state.switch_role(role)
        {
            print_warning(&format!("{e}\nUsing role '{}'", state.current_role()));
        }
        state
    }

    pub fn invoker(&self) -> TerminalInvoker {
        TerminalInvoker::new(
            ChatClient::new(self.config.api_key.clone()),
            InvokeOptions {
                stream: self.config.stream,
                count_tokens: self.count_tokens,
            },
        )
    }
}
