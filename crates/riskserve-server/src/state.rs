//! Shared application state

use metrics_exporter_prometheus::PrometheusHandle;
use riskserve_model::InferenceInvoker;
use std::sync::Arc;

/// Shared application state
///
/// The invoker holds the loaded artifacts behind `Arc`s; everything here is
/// read-only at request time and safe to clone per request.
#[derive(Clone)]
pub struct AppState {
    /// Inference invoker over the loaded collaborators
    pub invoker: Arc<InferenceInvoker>,

    /// Prometheus render handle for the metrics endpoint
    pub metrics: PrometheusHandle,
}

impl AppState {
    pub fn new(invoker: InferenceInvoker, metrics: PrometheusHandle) -> Self {
        Self {
            invoker: Arc::new(invoker),
            metrics,
        }
    }
}
