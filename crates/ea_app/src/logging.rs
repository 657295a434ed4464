use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Installs the global subscriber. `RUST_LOG` wins over the configured
/// filter. Calling this twice is harmless: the second call is ignored.
pub fn init(fallback_filter: &str) {
    let filter = build_filter(std::env::var("RUST_LOG").ok().as_deref(), fallback_filter);
    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_target(true))
        .try_init();
}

pub fn build_filter(rust_log: Option<&str>, fallback: &str) -> EnvFilter {
    rust_log
        .filter(|value| !value.trim().is_empty())
        .and_then(|value| EnvFilter::try_new(value).ok())
        .or_else(|| EnvFilter::try_new(fallback).ok())
        .unwrap_or_else(|| EnvFilter::new("info"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn t_log_001_rust_log_takes_precedence() {
        let filter = build_filter(Some("ea_core=trace"), "warn");
        assert_eq!(filter.to_string(), "ea_core=trace");
    }

    #[test]
    fn t_log_002_blank_rust_log_falls_back() {
        let filter = build_filter(Some("  "), "ea_app=debug");
        assert_eq!(filter.to_string(), "ea_app=debug");
        let filter = build_filter(None, "warn");
        assert_eq!(filter.to_string(), "warn");
    }

    #[test]
    fn t_log_003_init_is_idempotent() {
        init("info");
        init("debug");
    }
}
