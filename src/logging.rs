//! Diagnostic logging on stderr.

use tracing::Level;
use tracing_subscriber::EnvFilter;

const DEBUG_DIRECTIVE: &str = "cli_llm=debug";

/// Installs the global subscriber.
///
/// `RUST_LOG` is used as given when set; otherwise only warnings and errors
/// are shown. `debug` adds this crate's debug events either way.
pub fn init(debug: bool) {
    let rust_log = std::env::var(EnvFilter::DEFAULT_ENV).ok();
    let env_filter = build_filter(rust_log.as_deref(), debug);

    // Another subscriber may already be installed (e.g. in tests)
    let _ = tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

fn build_filter(rust_log: Option<&str>, debug: bool) -> EnvFilter {
    let mut env_filter = rust_log
        .filter(|value| !value.trim().is_empty())
        .and_then(|value| EnvFilter::try_new(value).ok())
        .unwrap_or_else(|| EnvFilter::new(Level::WARN.to_string()));

    if debug && let Ok(directive) = DEBUG_DIRECTIVE.parse() {
        env_filter = env_filter.add_directive(directive);
    }
    env_filter
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_to_warn() {
        assert_eq!(build_filter(None, false).to_string(), "warn");
        assert_eq!(build_filter(Some("  "), false).to_string(), "warn");
    }

    #[test]
    fn test_rust_log_without_target_is_kept() {
        assert_eq!(build_filter(Some("debug"), false).to_string(), "debug");
    }

    #[test]
    fn test_debug_flag_adds_crate_directive() {
        let filter = build_filter(None, true).to_string();
        assert!(filter.contains("cli_llm=debug"));
        assert!(filter.contains("warn"));

        let filter = build_filter(Some("info"), true).to_string();
        assert!(filter.contains("cli_llm=debug"));
        assert!(filter.contains("info"));
    }
}
