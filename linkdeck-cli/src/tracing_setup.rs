//! Log and trace output for the linkdeck binary
//!
//! One registry: an `EnvFilter`, compact console output, and (with the
//! `telemetry` feature and `--otel`) an OTLP span exporter.
//!
//!   linkdeck --debug serve                   # request spans and store events
//!   RUST_LOG=linkdeck_server=trace linkdeck serve
//!   OTEL_EXPORTER_OTLP_ENDPOINT=http://collector:4317 linkdeck --otel serve

use anyhow::{anyhow, Result};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

/// Filter used when `RUST_LOG` is unset
const DEFAULT_DIRECTIVES: &str = "info";

/// `--debug` without `RUST_LOG`: our crates and the per-request spans, not sqlx internals
const DEBUG_DIRECTIVES: &str = "info,linkdeck=debug,linkdeck_server=debug,tower_http=debug";

#[derive(Debug, Clone, Default)]
pub struct TracingConfig {
    pub debug: bool,
    /// Export spans over OTLP
    pub otel: bool,
}

impl TracingConfig {
    fn filter(&self) -> EnvFilter {
        let fallback = if self.debug { DEBUG_DIRECTIVES } else { DEFAULT_DIRECTIVES };
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(fallback))
    }
}

/// Install the global subscriber. Fails if one is already set.
pub fn init(config: &TracingConfig) -> Result<()> {
    let console = tracing_subscriber::fmt::layer()
        .with_target(config.debug)
        .compact();

    let registry = tracing_subscriber::registry()
        .with(config.filter())
        .with(console);

    #[cfg(feature = "telemetry")]
    {
        let exporter = if config.otel { Some(otlp::layer()?) } else { None };
        let endpoint = exporter.as_ref().map(|(_, endpoint)| endpoint.clone());
        registry
            .with(exporter.map(|(layer, _)| layer))
            .try_init()
            .map_err(|err| anyhow!(err))?;

        if let Some(endpoint) = endpoint {
            tracing::info!(%endpoint, "exporting spans over OTLP");
        }
    }

    #[cfg(not(feature = "telemetry"))]
    {
        registry.try_init().map_err(|err| anyhow!(err))?;
        if config.otel {
            tracing::warn!("--otel ignored, linkdeck was built without the telemetry feature");
        }
    }

    Ok(())
}

/// Flush spans still buffered in the batch exporter
#[cfg(feature = "telemetry")]
pub fn shutdown_otel() {
    opentelemetry::global::shutdown_tracer_provider();
}

#[cfg(not(feature = "telemetry"))]
pub fn shutdown_otel() {}

#[cfg(feature = "telemetry")]
mod otlp {
    use anyhow::{anyhow, Result};
    use opentelemetry::trace::TracerProvider as _;
    use opentelemetry::KeyValue;
    use opentelemetry_otlp::WithExportConfig;
    use opentelemetry_sdk::trace::{Tracer, TracerProvider};
    use tracing::Subscriber;
    use tracing_opentelemetry::OpenTelemetryLayer;
    use tracing_subscriber::registry::LookupSpan;

    const DEFAULT_ENDPOINT: &str = "http://localhost:4317";
    const DEFAULT_SERVICE: &str = "linkdeck";

    /// Build the span export layer; returns it with the endpoint it sends to.
    ///
    /// Reads `OTEL_EXPORTER_OTLP_ENDPOINT` and `OTEL_SERVICE_NAME`.
    pub(super) fn layer<S>() -> Result<(OpenTelemetryLayer<S, Tracer>, String)>
    where
        S: Subscriber + for<'span> LookupSpan<'span>,
    {
        let endpoint = std::env::var("OTEL_EXPORTER_OTLP_ENDPOINT")
            .unwrap_or_else(|_| DEFAULT_ENDPOINT.to_string());
        let service =
            std::env::var("OTEL_SERVICE_NAME").unwrap_or_else(|_| DEFAULT_SERVICE.to_string());

        let exporter = opentelemetry_otlp::SpanExporter::builder()
            .with_tonic()
            .with_endpoint(&endpoint)
            .build()
            .map_err(|e| anyhow!("Failed to create OTLP exporter for {}: {}", endpoint, e))?;

        let provider = TracerProvider::builder()
            .with_batch_exporter(exporter, opentelemetry_sdk::runtime::Tokio)
            .with_resource(opentelemetry_sdk::Resource::new(vec![
                KeyValue::new("service.name", service),
                KeyValue::new("service.version", env!("CARGO_PKG_VERSION")),
            ]))
            .build();

        let tracer = provider.tracer(DEFAULT_SERVICE);
        // The global slot keeps the provider alive until shutdown_otel
        let _ = opentelemetry::global::set_tracer_provider(provider);

        Ok((tracing_opentelemetry::layer().with_tracer(tracer), endpoint))
    }
}
