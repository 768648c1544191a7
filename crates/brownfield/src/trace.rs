use std::io::Write;

use metrics_exporter_prometheus::{BuildError, Matcher, PrometheusBuilder, PrometheusHandle};
use opentelemetry::{KeyValue, global, trace::TracerProvider};
use opentelemetry_sdk::{
  Resource,
  propagation::TraceContextPropagator,
  trace::{Sampler, SdkTracerProvider},
};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{EnvFilter, Layer, Registry, fmt, layer::SubscriberExt, util::SubscriberInitExt};

use crate::api::config::{Config, Env};

/// Install the global Prometheus recorder, which also receives the scoring
/// histograms recorded by the library.
pub fn build_prometheus() -> Result<PrometheusHandle, BuildError> {
  PrometheusBuilder::new()
    .add_global_label("service", "brownfield")
    .set_buckets_for_metric(Matcher::Full("brownfield_scoring_scores".into()), &[0.2, 0.4, 0.6, 0.8, 0.9])?
    .set_buckets_for_metric(Matcher::Full("brownfield_scoring_latency_seconds".into()), &[0.00001, 0.0001, 0.001, 0.01, 0.1])?
    .set_buckets_for_metric(Matcher::Full("brownfield_ranked_candidates".into()), &[10.0, 100.0, 1000.0, 10000.0])?
    .set_buckets_for_metric(Matcher::Full("http_request_duration_seconds".into()), &[0.001, 0.005, 0.025, 0.1, 0.5, 2.5])?
    .install_recorder()
}

/// Keeps the log writer and the trace exporter alive, flushing both on drop.
pub struct TraceGuards {
  _logging: WorkerGuard,
  provider: Option<SdkTracerProvider>,
}

impl Drop for TraceGuards {
  fn drop(&mut self) {
    if let Some(provider) = &self.provider
      && let Err(err) = provider.shutdown()
    {
      eprintln!("could not flush pending traces: {err}");
    }
  }
}

pub fn init_tracing(config: &Config, writer: impl Write + Send + 'static) -> TraceGuards {
  let (appender, logging_guard) = tracing_appender::non_blocking(writer);

  let logs: Box<dyn Layer<Registry> + Send + Sync> = match config.env {
    Env::Production => json_subscriber::layer()
      .with_writer(appender)
      .flatten_event(true)
      .flatten_span_list_on_top_level(true)
      .with_current_span(false)
      .with_span_list(false)
      .boxed(),

    Env::Dev => fmt::layer().compact().with_writer(appender).with_ansi(cfg!(not(test))).boxed(),
  };

  global::set_text_map_propagator(TraceContextPropagator::new());

  let (provider, error) = match config.enable_tracing {
    true => match otlp_provider(config) {
      Ok(provider) => (Some(provider), None),
      Err(err) => (None, Some(err)),
    },
    false => (None, None),
  };

  let otlp = provider.as_ref().map(|provider| tracing_opentelemetry::layer().with_tracer(provider.tracer("brownfield")));
  let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

  tracing_subscriber::registry().with(logs).with(otlp).with(filter).init();

  if let Some(err) = error {
    tracing::warn!(%err, "could not initialize trace exporter, traces will not be exported");
  }

  TraceGuards { _logging: logging_guard, provider }
}

fn otlp_provider(config: &Config) -> anyhow::Result<SdkTracerProvider> {
  let exporter = opentelemetry_otlp::SpanExporter::builder().with_tonic().build()?;

  let resource = Resource::builder()
    .with_service_name("brownfield")
    .with_attributes([KeyValue::new("service.version", env!("CARGO_PKG_VERSION"))])
    .build();

  Ok(
    SdkTracerProvider::builder()
      .with_sampler(Sampler::ParentBased(Box::new(Sampler::TraceIdRatioBased(config.trace_sample_ratio))))
      .with_resource(resource)
      .with_batch_exporter(exporter)
      .build(),
  )
}
