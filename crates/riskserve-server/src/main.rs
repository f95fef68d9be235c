//! riskserve
//!
//! HTTP service for mortality-risk predictions from a previously trained
//! classifier. Exposes a machine-readable JSON endpoint, a human-facing
//! form submission, and an interactive dashboard over one shared inference
//! pipeline.

use anyhow::Result;
use clap::Parser;
use metrics_exporter_prometheus::PrometheusHandle;
use riskserve_model::{load_artifacts, InferenceInvoker};
use riskserve_server::cli::Cli;
use riskserve_server::{run_server, AppState, ServerConfig};
use std::net::SocketAddr;
use std::time::Duration;
use tracing::info;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    init_tracing(cli.verbose);

    info!("Starting riskserve");

    // Load configuration
    let config = ServerConfig::load(&cli.config, &cli)?;
    info!("Configuration loaded successfully");
    info!("Models directory: {}", config.models_dir.display());

    // Initialize metrics
    let metrics_handle = init_metrics()?;

    // Load the trained artifacts once; they stay read-only for the life of
    // the process
    let (preprocessor, classifier) = load_artifacts(&config.models_dir)?;
    let invoker = InferenceInvoker::new(preprocessor, classifier)
        .with_timeout(Duration::from_millis(config.request_timeout_ms));

    let state = AppState::new(invoker, metrics_handle);

    let addr: SocketAddr = format!("{}:{}", config.listen, config.port).parse()?;
    run_server(state, addr).await
}

/// Initialize tracing/logging
fn init_tracing(verbose: bool) {
    use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

    let filter = if verbose {
        EnvFilter::new("riskserve=debug,tower_http=debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("riskserve=info"))
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer())
        .init();
}

/// Initialize metrics exporter and return handle for rendering
fn init_metrics() -> Result<PrometheusHandle> {
    use metrics_exporter_prometheus::PrometheusBuilder;

    let builder = PrometheusBuilder::new();
    let handle = builder
        .install_recorder()
        .map_err(|e| anyhow::anyhow!("Failed to install metrics: {}", e))?;

    metrics::describe_counter!(
        "riskserve_requests_total",
        "Total number of inference requests by endpoint"
    );
    metrics::describe_counter!(
        "riskserve_errors_total",
        "Total number of failed requests by error kind"
    );
    metrics::describe_histogram!(
        "riskserve_inference_latency_us",
        metrics::Unit::Microseconds,
        "Transform and classify latency in microseconds"
    );

    info!("Metrics exporter initialized");
    Ok(handle)
}
