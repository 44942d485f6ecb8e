//! Subcommand implementations.

/// One-shot prompt handler.
pub mod ask;

/// Chat mode command handler.
pub mod chat;

/// Role listing command handler.
pub mod roles;

/// Configuration, role and client wiring shared by the commands.
pub mod setup;
