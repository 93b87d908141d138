use std::sync::Once;
use tracing_subscriber::EnvFilter;

static TRACING_INIT: Once = Once::new();

const DEFAULT_DIRECTIVE: &str = "checkout_flow=info";

/// Installs the global `tracing` subscriber, writing to stderr.
///
/// `RUST_LOG` replaces the default `checkout_flow=info` filter when it is set and valid.
pub fn init_tracing() {
    TRACING_INIT.call_once(|| {
        let filter = env_filter(std::env::var(EnvFilter::DEFAULT_ENV).ok().as_deref());

        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .init();
    });
}

fn env_filter(rust_log: Option<&str>) -> EnvFilter {
    rust_log
        .and_then(|directives| EnvFilter::try_new(directives).ok())
        .unwrap_or_else(|| EnvFilter::new(DEFAULT_DIRECTIVE))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tracing_subscriber::filter::LevelFilter;

    #[test]
    fn init_tracing_is_idempotent() {
        init_tracing();
        init_tracing();
    }

    #[test]
    fn test_default_filter_without_rust_log() {
        assert_eq!(env_filter(None).max_level_hint(), Some(LevelFilter::INFO));
    }

    #[test]
    fn test_rust_log_overrides_default() {
        let filter = env_filter(Some("checkout_flow=debug"));

        assert_eq!(filter.max_level_hint(), Some(LevelFilter::DEBUG));
        assert!(!filter.to_string().contains("checkout_flow=info"));
    }

    #[test]
    fn test_invalid_rust_log_falls_back_to_default() {
        let filter = env_filter(Some("checkout_flow=loud"));
        assert_eq!(filter.max_level_hint(), Some(LevelFilter::INFO));
    }
}
