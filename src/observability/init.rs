//! Subscriber setup: env filter plus the OpenTelemetry layer.

use super::tracer;
use crate::infrastructure::paths::get_data_dir;
use crate::Config;
use opentelemetry::trace::TracerProvider as _;
use opentelemetry::KeyValue;
use opentelemetry_sdk::resource::Resource;
use tracing_opentelemetry::OpenTelemetryLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

const SERVICE_NAME: &str = "Zatalog";
const TRACE_FILE: &str = "zatalog-otlp.json";
const DEFAULT_LEVEL: &str = "info";

/// Installs the global tracing subscriber.
///
/// Tracing is best effort: when the data directory cannot be created, or a
/// subscriber is already installed, this returns without doing anything.
///
/// # Example
///
/// ```rust,no_run
/// use zatalog::observability::init_tracing;
/// use zatalog::Config;
///
/// let config = Config {
///     trace_level: Some("zatalog=debug".to_string()),
///     ..Default::default()
/// };
/// init_tracing(&config);
/// ```
pub fn init_tracing(config: &Config) {
    let data_dir = get_data_dir();
    if std::fs::create_dir_all(&data_dir).is_err() {
        return;
    }

    let filter = EnvFilter::try_new(config.trace_level.as_deref().unwrap_or(DEFAULT_LEVEL))
        .unwrap_or_else(|_| EnvFilter::new(DEFAULT_LEVEL));

    let resource = Resource::new(vec![
        KeyValue::new("service.name", SERVICE_NAME),
        KeyValue::new("service.version", env!("CARGO_PKG_VERSION")),
    ]);
    let provider = tracer::create_tracer_provider(data_dir.join(TRACE_FILE), resource);
    let otel_layer = OpenTelemetryLayer::new(provider.tracer(SERVICE_NAME));

    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(otel_layer)
        .try_init();
}
