//! Diagnostic logging.
//!
//! Logs always go to stderr so stdout carries nothing but the rendered panel
//! and can be piped or captured by calling scripts.

use std::env;
use std::sync::OnceLock;
use tracing::Level;

/// Environment variable that sets the log level when no `-v` flag is given.
pub const LOG_ENV: &str = "AGENTVIBES_LOG";

static TRACING_INIT: OnceLock<()> = OnceLock::new();

/// Map a `-v` count to a level: warnings by default, then info, debug, trace.
pub fn level_for_verbosity(verbose: u8) -> Level {
    match verbose {
        0 => Level::WARN,
        1 => Level::INFO,
        2 => Level::DEBUG,
        _ => Level::TRACE,
    }
}

fn parse_level(value: &str) -> Option<Level> {
    value.trim().parse().ok()
}

/// Effective log level: explicit verbosity beats the environment.
pub fn resolve_level(verbose: u8, env_value: Option<&str>) -> Level {
    if verbose > 0 {
        return level_for_verbosity(verbose);
    }
    env_value
        .and_then(parse_level)
        .unwrap_or_else(|| level_for_verbosity(0))
}

fn init_tracing_once(level: Level, json: bool, once: &OnceLock<()>) {
    once.get_or_init(|| {
        let builder = tracing_subscriber::fmt()
            .with_max_level(level)
            .with_writer(std::io::stderr)
            .with_target(false);
        // A global subscriber may already be installed (e.g. by a test
        // harness); that is not an error for us.
        let _ = if json {
            tracing::subscriber::set_global_default(builder.json().finish())
        } else {
            tracing::subscriber::set_global_default(builder.finish())
        };
    });
}

/// Install the global subscriber. Later calls are no-ops.
pub fn init_tracing(verbose: u8, json: bool) {
    let env_value = env::var(LOG_ENV).ok();
    let level = resolve_level(verbose, env_value.as_deref());
    init_tracing_once(level, json, &TRACING_INIT);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_verbosity_levels() {
        assert_eq!(level_for_verbosity(0), Level::WARN);
        assert_eq!(level_for_verbosity(1), Level::INFO);
        assert_eq!(level_for_verbosity(2), Level::DEBUG);
        assert_eq!(level_for_verbosity(3), Level::TRACE);
        assert_eq!(level_for_verbosity(200), Level::TRACE);
    }

    #[test]
    fn test_env_level_used_without_flags() {
        assert_eq!(resolve_level(0, Some("debug")), Level::DEBUG);
        assert_eq!(resolve_level(0, Some(" ERROR ")), Level::ERROR);
    }

    #[test]
    fn test_flags_beat_env() {
        assert_eq!(resolve_level(1, Some("trace")), Level::INFO);
    }

    #[test]
    fn test_invalid_env_falls_back_to_warn() {
        assert_eq!(resolve_level(0, Some("loud")), Level::WARN);
        assert_eq!(resolve_level(0, None), Level::WARN);
    }

    #[test]
    fn test_init_is_idempotent() {
        let once = OnceLock::new();
        init_tracing_once(Level::WARN, false, &once);
        init_tracing_once(Level::TRACE, true, &once);
        assert!(once.get().is_some());
    }
}
