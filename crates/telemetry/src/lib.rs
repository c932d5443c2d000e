//! Tracing subscriber bootstrap.

use anyhow::Context;
use shelf_kernel::settings::{LogFormat, TelemetrySettings};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Build the env filter: `RUST_LOG` when set, otherwise the configured filter.
pub fn env_filter(settings: &TelemetrySettings) -> anyhow::Result<EnvFilter> {
    match EnvFilter::try_from_default_env() {
        Ok(filter) => Ok(filter),
        Err(_) => EnvFilter::try_new(&settings.filter)
            .with_context(|| format!("invalid log filter '{}'", settings.filter)),
    }
}

/// Install the global tracing subscriber.
///
/// Returns `Ok(false)` when a subscriber was already installed, which happens
/// when several entry points share a process (tests, the CLI calling `serve`).
pub fn init(settings: &TelemetrySettings) -> anyhow::Result<bool> {
    let filter = env_filter(settings)?;
    let registry = tracing_subscriber::registry().with(filter);

    let installed = match settings.log_format {
        LogFormat::Pretty => registry.with(tracing_subscriber::fmt::layer()).try_init(),
        LogFormat::Json => registry
            .with(tracing_subscriber::fmt::layer().json())
            .try_init(),
    }
    .is_ok();

    if installed {
        tracing::debug!(
            target: "shelf-telemetry",
            format = ?settings.log_format,
            filter = %settings.filter,
            "telemetry initialized"
        );
    }

    Ok(installed)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_malformed_filter() {
        let settings = TelemetrySettings {
            log_format: LogFormat::Pretty,
            filter: "shelf=loud".to_string(),
        };
        if std::env::var("RUST_LOG").is_err() {
            assert!(env_filter(&settings).is_err());
        }
    }

    #[test]
    fn second_init_is_tolerated() {
        let settings = TelemetrySettings::default();
        let first = init(&settings).unwrap();
        let second = init(&settings).unwrap();
        assert!(!(first && second));
    }
}
