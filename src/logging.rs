use crate::models::config::LoggingConfig;
use tracing_subscriber::{fmt, EnvFilter};

/// Install the global subscriber. Logs go to stderr so stdout stays clean
/// for reports. `RUST_LOG` wins over the configured level.
/// Calling this twice is harmless; the second call is ignored.
pub fn init_logging(config: &LoggingConfig) {
    let rust_log = std::env::var(EnvFilter::DEFAULT_ENV).ok();
    let filter = build_filter(rust_log.as_deref(), &config.level);

    let builder = fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false);

    let _ = if config.json {
        builder.json().try_init()
    } else {
        builder.try_init()
    };
}

/// First valid of `RUST_LOG`, the configured level, then "info"
fn build_filter(rust_log: Option<&str>, level: &str) -> EnvFilter {
    rust_log
        .filter(|v| !v.trim().is_empty())
        .and_then(|v| EnvFilter::try_new(v).ok())
        .or_else(|| EnvFilter::try_new(level).ok())
        .unwrap_or_else(|| EnvFilter::new("info"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_filter_uses_configured_level() {
        assert_eq!(build_filter(None, "debug").to_string(), "debug");
    }

    #[test]
    fn test_rust_log_wins() {
        assert_eq!(build_filter(Some("warn"), "debug").to_string(), "warn");
        assert_eq!(build_filter(Some("  "), "debug").to_string(), "debug");
    }

    #[test]
    fn test_invalid_levels_fall_back() {
        assert_eq!(build_filter(None, "medscan=lots").to_string(), "info");
        assert_eq!(build_filter(Some("medscan=lots"), "error").to_string(), "error");
    }

    #[test]
    fn test_init_twice_is_harmless() {
        init_logging(&LoggingConfig::default());
        init_logging(&LoggingConfig {
            level: "medscan=lots".to_string(),
            json: true,
        });
        tracing::info!("still logging");
    }
}
