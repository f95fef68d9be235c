//! Collaborator traits and common types
//!
//! The trained preprocessing transform and classifier are external
//! collaborators: loaded once before serving begins, read-only afterwards,
//! and shared across concurrent requests without synchronization. Both are
//! required to be deterministic and side-effect-free on read.

use async_trait::async_trait;
use riskserve_core::{CanonicalRecord, Result};
use serde::{Deserialize, Serialize};

/// A single-row numeric feature matrix produced by the transform
#[derive(Debug, Clone, PartialEq)]
pub struct FeatureMatrix {
    row: Vec<f64>,
}

impl FeatureMatrix {
    /// Create a matrix from one encoded row
    pub fn from_row(row: Vec<f64>) -> Self {
        Self { row }
    }

    /// The encoded feature width D of this 1xD matrix
    pub fn width(&self) -> usize {
        self.row.len()
    }

    /// The single encoded row
    pub fn row(&self) -> &[f64] {
        &self.row
    }
}

/// Trait for the trained preprocessing transform
#[async_trait]
pub trait Preprocessor: Send + Sync + std::fmt::Debug {
    /// Encode one canonical record into a fixed-width numeric matrix
    ///
    /// May fail with a preprocessing error on unseen categorical values or
    /// malformed numeric content.
    async fn transform(&self, record: &CanonicalRecord) -> Result<FeatureMatrix>;

    /// Get the transform name
    fn name(&self) -> &str;
}

/// Trait for the trained binary classifier
#[async_trait]
pub trait Classifier: Send + Sync + std::fmt::Debug {
    /// Predict the label and positive-class probability for one encoded row
    async fn predict(&self, features: &FeatureMatrix) -> Result<Prediction>;

    /// Get the classifier name
    fn name(&self) -> &str;
}

/// Raw classifier output for one record
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Prediction {
    /// Binary risk label
    pub label: RiskLabel,

    /// Positive-class probability in [0.0, 1.0]
    pub probability: f64,
}

/// Binary mortality-risk label
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RiskLabel {
    /// Negative class (0)
    Low,
    /// Positive class (1)
    High,
}

impl RiskLabel {
    /// Integer encoding used by machine consumers
    pub fn as_int(self) -> u8 {
        match self {
            Self::Low => 0,
            Self::High => 1,
        }
    }
}

/// Final outcome of one inference request
///
/// Created and consumed within a single request, never mutated. The
/// probability is already rounded for exposure.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RiskAssessment {
    /// Binary risk label from the classifier's own decision rule
    pub label: RiskLabel,

    /// Positive-class probability, rounded to three decimal places
    pub probability: f64,
}
