//! Subscriber setup.

use super::tracer;
use crate::Config;
use opentelemetry::trace::TracerProvider as _;
use opentelemetry_sdk::resource::Resource;
use tracing_opentelemetry::OpenTelemetryLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

const SERVICE_NAME: &str = "carlot";

/// File name of the span log inside the data directory.
pub const SPAN_FILE: &str = "carlot-spans.jsonl";

/// Installs the global subscriber: an `EnvFilter` (`RUST_LOG` wins over
/// `config.trace_level`) feeding an OpenTelemetry layer that writes finished spans
/// to `<data dir>/carlot-spans.jsonl`.
///
/// Does nothing if the data directory cannot be created. Only the first call in
/// a process takes effect.
pub fn init_tracing(config: &Config) {
    let data_dir = crate::infrastructure::get_data_dir();
    if std::fs::create_dir_all(&data_dir).is_err() {
        return;
    }

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.trace_level));

    let resource = Resource::new(vec![opentelemetry::KeyValue::new("service.name", SERVICE_NAME)]);
    let provider = tracer::create_tracer_provider(data_dir.join(SPAN_FILE), SERVICE_NAME, resource);
    let otel_layer = OpenTelemetryLayer::new(provider.tracer(SERVICE_NAME));

    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(otel_layer)
        .try_init();
}
