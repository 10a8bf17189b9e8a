//! Tracing subscriber setup for the binary.

use tracing_subscriber::{EnvFilter, fmt, prelude::*};

/// Build the filter: `RUST_LOG` when set and valid, else `level`.
pub fn env_filter(level: &str) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level))
}

/// Initialize logging to stderr.
///
/// Results go to stdout, so log lines never mix into `--json` output. Calling
/// this twice is harmless: the second global subscriber is ignored.
pub fn init_logging(level: &str) {
    let _ = tracing_subscriber::registry()
        .with(env_filter(level))
        .with(fmt::layer().with_writer(std::io::stderr))
        .try_init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn init_logging_twice_does_not_panic() {
        init_logging("info");
        init_logging("debug");
    }

    #[test]
    fn env_filter_accepts_configured_levels() {
        for level in crate::config::LOG_LEVELS {
            let _ = env_filter(level);
        }
    }
}
