//! Role personas: named system prompts with a default temperature and model.
//!
//! Roles are read once from a JSON document shaped like
//!
//! ```json
//! {
//!   "coder": { "content": "...", "description": "...", "temperature": 0.0, "model": "gpt-4o" },
//!   "chat": {
//!     "content": { "ROLE": "..." },
//!     "metadata": { "description": "...", "temperature": 1.3, "model_name": "gpt-4o-mini" }
//!   }
//! }
//! ```
//!
//! Every role also has a reasoning variant named `<role>-R`, which keeps the
//! role's prompt and temperature but sends requests to the reasoning model.
//!
//! Any problem with that document falls back to the built-in set, so loading
//! never fails.

use serde::Deserialize;
use std::fs;
use std::path::Path;
use thiserror::Error;

/// A named persona.
#[derive(Debug, Clone, PartialEq)]
pub struct RolePrompt {
    /// Unique key, matched exactly and case-sensitively.
    pub name: String,
    /// System prompt sent with every request.
    pub content: String,
    /// Default sampling temperature.
    pub temperature: f32,
    /// Human-readable description.
    pub description: String,
    /// Model used while this role is active, unless one is pinned.
    pub model: Option<String>,
}

/// A built-in role (used when no role definitions can be loaded).
struct BuiltinRole {
    name: &'static str,
    description: &'static str,
    temperature: f32,
    content: &'static str,
}

const BUILTIN_ROLES: &[BuiltinRole] = &[
    BuiltinRole {
        name: "coder",
        description: "Programming assistant, precise and deterministic",
        temperature: 0.0,
        content: "You are an expert software engineer. Answer with correct, idiomatic code \
                  and keep explanations short. Put code in fenced code blocks tagged with \
                  the language.",
    },
    BuiltinRole {
        name: "chat",
        description: "General conversation",
        temperature: 1.3,
        content: "You are a helpful, friendly assistant. Answer clearly and concisely.",
    },
    BuiltinRole {
        name: "creative",
        description: "Creative writing and brainstorming",
        temperature: 1.5,
        content: "You are a creative writer. Be imaginative, vivid and original while \
                  staying on topic.",
    },
];

/// Role that sessions start in when it exists.
pub const DEFAULT_ROLE: &str = "coder";

/// Suffix selecting a role's reasoning variant, e.g. `chat-R`.
pub const REASONER_SUFFIX: &str = "-R";

/// Errors raised when role definitions cannot be used.
#[derive(Debug, Error)]
pub enum RegistryError {
    #[error("failed to read role definitions from {path}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("role definitions are not a valid JSON object")]
    Parse(#[from] serde_json::Error),
    #[error("role '{name}' is invalid")]
    InvalidRole {
        name: String,
        #[source]
        source: serde_json::Error,
    },
    #[error("role definitions are empty")]
    Empty,
}

/// Raised when a role name does not resolve.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("Unknown role: {name}\nAvailable roles: {}", .available.join(", "))]
pub struct RoleError {
    pub name: String,
    pub available: Vec<String>,
}

/// One entry of the definitions document, flat or with a `metadata` table.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum RoleDefinition {
    Flat {
        content: serde_json::Value,
        #[serde(flatten)]
        metadata: RoleMetadata,
    },
    Nested {
        content: serde_json::Value,
        metadata: RoleMetadata,
    },
}

#[derive(Debug, Deserialize)]
struct RoleMetadata {
    description: String,
    temperature: f32,
    #[serde(default, alias = "model_name")]
    model: Option<String>,
}

impl RoleDefinition {
    fn into_prompt(self, name: String) -> RolePrompt {
        let (Self::Flat { content, metadata } | Self::Nested { content, metadata }) = self;
        // Structured prompts are sent as their compact JSON text
        let content = match content {
            serde_json::Value::String(text) => text,
            other => other.to_string(),
        };
        RolePrompt {
            name,
            content,
            temperature: metadata.temperature,
            description: metadata.description,
            model: metadata.model.filter(|m| !m.trim().is_empty()),
        }
    }
}

/// Ordered, non-empty collection of roles.
#[derive(Debug, Clone)]
pub struct RoleRegistry {
    roles: Vec<RolePrompt>,
}

impl RoleRegistry {
    /// Loads role definitions from `path`, falling back to the built-in set.
    pub fn load(path: &Path) -> Self {
        match Self::from_file(path) {
            Ok(registry) => {
                tracing::debug!(
                    path = %path.display(),
                    roles = registry.roles.len(),
                    "loaded role definitions"
                );
                registry
            }
            Err(RegistryError::Read { source, .. })
                if source.kind() == std::io::ErrorKind::NotFound =>
            {
                tracing::debug!(
                    path = %path.display(),
                    "no role definitions, using built-in roles"
                );
                Self::builtin()
            }
            Err(e) => {
                let error = anyhow::Error::new(e);
                tracing::warn!(
                    path = %path.display(),
                    "ignoring role definitions ({error:#}), using built-in roles"
                );
                Self::builtin()
            }
        }
    }

    /// Reads and parses a role definitions file.
    pub fn from_file(path: &Path) -> Result<Self, RegistryError> {
        let contents = fs::read_to_string(path).map_err(|source| RegistryError::Read {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_json(&contents)
    }

    /// Parses role definitions, keeping the document's key order.
    pub fn from_json(json: &str) -> Result<Self, RegistryError> {
        let entries: serde_json::Map<String, serde_json::Value> = serde_json::from_str(json)?;

        let roles = entries
            .into_iter()
            .map(
                |(name, value)| match serde_json::from_value::<RoleDefinition>(value) {
                    Ok(definition) => Ok(definition.into_prompt(name)),
                    Err(source) => Err(RegistryError::InvalidRole { name, source }),
                },
            )
            .collect::<Result<Vec<_>, _>>()?;

        if roles.is_empty() {
            return Err(RegistryError::Empty);
        }
        Ok(Self { roles })
    }

    /// The built-in `coder`, `chat` and `creative` roles.
    pub fn builtin() -> Self {
        let roles = BUILTIN_ROLES
            .iter()
            .map(|role| RolePrompt {
                name: role.name.to_string(),
                content: role.content.to_string(),
                temperature: role.temperature,
                description: role.description.to_string(),
                model: None,
            })
            .collect();
        Self { roles }
    }

    /// Looks up a role by exact name.
    pub fn get(&self, name: &str) -> Option<&RolePrompt> {
        self.roles.iter().find(|r| r.name == name)
    }

    /// Role names in definition order.
    pub fn names(&self) -> Vec<&str> {
        self.roles.iter().map(|r| r.name.as_str()).collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = &RolePrompt> {
        self.roles.iter()
    }

    /// Index of `name`, or a [`RoleError`] listing the valid names.
    pub fn position(&self, name: &str) -> Result<usize, RoleError> {
        self.roles
            .iter()
            .position(|r| r.name == name)
            .ok_or_else(|| RoleError {
                name: name.to_string(),
                available: self.names().into_iter().map(str::to_string).collect(),
            })
    }

    /// Index of `name`, or of its base role when `name` is a `-R` variant.
    ///
    /// The flag is `true` for a reasoning variant. An exact match always wins,
    /// so a role literally named `x-R` is not treated as a variant.
    pub fn resolve(&self, name: &str) -> Result<(usize, bool), RoleError> {
        match self.position(name) {
            Ok(index) => Ok((index, false)),
            Err(err) => name
                .strip_suffix(REASONER_SUFFIX)
                .and_then(|base| self.position(base).ok())
                .map(|index| (index, true))
                .ok_or(err),
        }
    }

    /// Index of [`DEFAULT_ROLE`], or of the first role when it is absent.
    pub fn default_position(&self) -> usize {
        self.position(DEFAULT_ROLE).unwrap_or(0)
    }

    pub(crate) fn at(&self, index: usize) -> &RolePrompt {
        &self.roles[index]
    }
}
