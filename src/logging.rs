use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

pub(crate) const DEFAULT_FILTER: &str = "info";

/// Picks the log filter: `RUST_LOG` first, then `level`, then
/// [`DEFAULT_FILTER`]. An unparsable `level` is skipped.
fn env_filter(level: &str) -> EnvFilter {
    EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(level))
        .unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER))
}

/// Installs the global subscriber. Call once, at startup.
pub(crate) fn init_logging(level: &str) {
    let console_layer = fmt::layer()
        .with_target(true)
        .with_level(true)
        .with_timer(fmt::time::uptime());

    tracing_subscriber::registry()
        .with(env_filter(level))
        .with(console_layer)
        .init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn configured_level_is_used() {
        if std::env::var_os("RUST_LOG").is_some() {
            return;
        }
        assert_eq!(env_filter("debug").to_string(), "debug");
    }

    #[test]
    fn bad_level_falls_back() {
        if std::env::var_os("RUST_LOG").is_some() {
            return;
        }
        assert_eq!(env_filter("orrery_demo=loud").to_string(), DEFAULT_FILTER);
    }
}
