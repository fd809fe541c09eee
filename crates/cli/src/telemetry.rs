//! Observability wiring.
//!
//! Installs a `tracing-subscriber` registry with an `EnvFilter`, a text or
//! JSON formatting layer on stderr (stdout is reserved for the card id), and,
//! when `OTEL_EXPORTER_OTLP_ENDPOINT` is set, an OpenTelemetry OTLP exporter.

use anyhow::{Context, Result};
use opentelemetry::trace::TracerProvider as _;
use opentelemetry_sdk::{runtime, trace::TracerProvider};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};

use crate::config::LogFormat;

const OTLP_ENDPOINT_ENV: &str = "OTEL_EXPORTER_OTLP_ENDPOINT";

/// Handle that flushes exported spans when the run ends.
pub struct Telemetry {
    provider: Option<TracerProvider>,
}

impl Telemetry {
    /// Flushes and stops the OTLP exporter, if one was installed.
    pub fn shutdown(self) {
        if let Some(provider) = self.provider {
            if let Err(err) = provider.shutdown() {
                eprintln!("failed to flush trace exporter: {err}");
            }
        }
    }
}

/// Default filter directive when `RUST_LOG` is unset.
///
/// GitHub Actions step debug logging (`ACTIONS_STEP_DEBUG=true`) lowers it to
/// `debug`.
fn default_directive(step_debug: Option<&str>) -> &'static str {
    match step_debug {
        Some(value) if value.eq_ignore_ascii_case("true") => "debug",
        _ => "info",
    }
}

/// Installs the global subscriber.
///
/// # Errors
///
/// Fails if the OTLP exporter cannot be built or a global subscriber is
/// already installed.
pub fn init(format: LogFormat) -> Result<Telemetry> {
    let step_debug = std::env::var("ACTIONS_STEP_DEBUG").ok();
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directive(step_debug.as_deref())));

    let fmt_layer = match format {
        LogFormat::Text => fmt::layer().with_writer(std::io::stderr).boxed(),
        LogFormat::Json => fmt::layer().json().with_writer(std::io::stderr).boxed(),
    };

    let provider = match std::env::var_os(OTLP_ENDPOINT_ENV) {
        Some(_) => {
            let exporter = opentelemetry_otlp::SpanExporter::builder()
                .with_tonic()
                .build()
                .context("failed to build OTLP span exporter")?;
            Some(
                TracerProvider::builder()
                    .with_batch_exporter(exporter, runtime::Tokio)
                    .build(),
            )
        }
        None => None,
    };
    let otel_layer = provider
        .as_ref()
        .map(|provider| tracing_opentelemetry::layer().with_tracer(provider.tracer("project-card")));

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt_layer)
        .with(otel_layer)
        .try_init()
        .context("failed to install tracing subscriber")?;

    Ok(Telemetry { provider })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn step_debug_lowers_default_level() {
        assert_eq!(default_directive(Some("true")), "debug");
        assert_eq!(default_directive(Some("TRUE")), "debug");
        assert_eq!(default_directive(Some("false")), "info");
        assert_eq!(default_directive(None), "info");
    }
}
