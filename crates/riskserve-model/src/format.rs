//! Result formatting for the three front-ends
//!
//! The decision boundary is entirely the classifier's own label; no
//! threshold is recomputed here.

use crate::collaborator::{RiskAssessment, RiskLabel};
use serde::{Deserialize, Serialize};

/// Structured payload for machine consumers
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PredictionResponse {
    /// Binary label: 1 for high risk, 0 for low risk
    pub prediction: u8,

    /// Positive-class probability, three decimal places
    pub mortality_risk_probability: f64,
}

impl From<RiskAssessment> for PredictionResponse {
    fn from(assessment: RiskAssessment) -> Self {
        Self {
            prediction: assessment.label.as_int(),
            mortality_risk_probability: assessment.probability,
        }
    }
}

/// Human-readable sentence for the form page
pub fn risk_sentence(assessment: &RiskAssessment) -> String {
    match assessment.label {
        RiskLabel::High => format!(
            "⚠️ High Mortality Risk (Probability: {:.3})",
            assessment.probability
        ),
        RiskLabel::Low => format!(
            "✅ Low Mortality Risk (Probability: {:.3})",
            assessment.probability
        ),
    }
}

/// Error sentence rendered inline by the page front-ends
pub fn error_sentence(message: impl std::fmt::Display) -> String {
    format!("❌ Error: {message}")
}

/// Display severity of a dashboard message
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// Nothing to show yet
    Idle,
    Low,
    High,
    Error,
}

/// Styled short message for the dashboard callback
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DashboardMessage {
    pub message: String,
    pub severity: Severity,
}

impl DashboardMessage {
    /// Empty output, produced before any triggering action
    pub fn idle() -> Self {
        Self {
            message: String::new(),
            severity: Severity::Idle,
        }
    }

    /// Message for a completed assessment
    pub fn from_assessment(assessment: &RiskAssessment) -> Self {
        Self {
            message: risk_sentence(assessment),
            severity: match assessment.label {
                RiskLabel::High => Severity::High,
                RiskLabel::Low => Severity::Low,
            },
        }
    }

    /// Message for a failed assessment
    pub fn from_error(message: impl std::fmt::Display) -> Self {
        Self {
            message: error_sentence(message),
            severity: Severity::Error,
        }
    }
}
