//! Inference invocation over the loaded collaborators
//!
//! Single-row batch semantics: exactly one canonical record in, exactly one
//! assessment out. Collaborator faults never escape raw; they are wrapped
//! into the error taxonomy before crossing this boundary.

use crate::collaborator::{Classifier, Preprocessor, Prediction, RiskAssessment};
use riskserve_core::{CanonicalRecord, Error, Result};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing::{debug, warn};
use uuid::Uuid;

/// Default bound on one transform/classify pair
pub const DEFAULT_TIMEOUT: Duration = Duration::from_millis(5_000);

/// Runs the transform/classify pair for one request
#[derive(Clone)]
pub struct InferenceInvoker {
    preprocessor: Arc<dyn Preprocessor>,
    classifier: Arc<dyn Classifier>,
    timeout: Duration,
}

impl InferenceInvoker {
    /// Create an invoker over loaded collaborators
    pub fn new(preprocessor: Arc<dyn Preprocessor>, classifier: Arc<dyn Classifier>) -> Self {
        Self {
            preprocessor,
            classifier,
            timeout: DEFAULT_TIMEOUT,
        }
    }

    /// Override the request-level timeout
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Run one record through the transform and classifier
    ///
    /// The exposed probability equals the classifier's positive-class
    /// probability rounded to three decimal places.
    pub async fn infer(&self, record: &CanonicalRecord) -> Result<RiskAssessment> {
        let request_id = Uuid::new_v4();
        let start = Instant::now();

        let prediction = match tokio::time::timeout(self.timeout, self.run(record)).await {
            Ok(result) => result,
            Err(_) => {
                warn!(%request_id, timeout_ms = self.timeout.as_millis() as u64, "inference timed out");
                return Err(Error::Timeout);
            }
        }?;

        if !(0.0..=1.0).contains(&prediction.probability) {
            return Err(Error::inference(format!(
                "classifier {:?} returned probability {} outside [0, 1]",
                self.classifier.name(),
                prediction.probability
            )));
        }

        let latency_us = start.elapsed().as_micros() as u64;
        metrics::histogram!("riskserve_inference_latency_us").record(latency_us as f64);
        debug!(
            %request_id,
            label = prediction.label.as_int(),
            probability = prediction.probability,
            latency_us,
            "inference complete"
        );

        Ok(RiskAssessment {
            label: prediction.label,
            probability: round3(prediction.probability),
        })
    }

    async fn run(&self, record: &CanonicalRecord) -> Result<Prediction> {
        let features = self
            .preprocessor
            .transform(record)
            .await
            .map_err(|e| match e {
                e @ Error::Preprocessing(_) => e,
                other => Error::inference(other.to_string()),
            })?;

        self.classifier.predict(&features).await.map_err(|e| match e {
            e @ Error::Inference(_) => e,
            other => Error::inference(other.to_string()),
        })
    }
}

/// Round to three decimal places for exposure, ties to even
fn round3(value: f64) -> f64 {
    let scaled = value * 1000.0;
    let mut rounded = scaled.round();
    if (scaled - scaled.trunc()).abs() == 0.5 && rounded % 2.0 != 0.0 {
        rounded -= scaled.signum();
    }
    rounded / 1000.0
}
