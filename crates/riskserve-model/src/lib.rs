//! riskserve Model
//!
//! Collaborator seams and inference orchestration:
//! - Traits for the trained preprocessing transform and classifier
//! - The inference invoker (transform → classify under a timeout)
//! - Loadable JSON artifacts exported by the training pipeline
//! - Result formatting for machine, form, and dashboard consumers

pub mod artifact;
pub mod collaborator;
pub mod format;
pub mod invoker;
pub mod loader;

pub use collaborator::{
    Classifier, FeatureMatrix, Prediction, Preprocessor, RiskAssessment, RiskLabel,
};
pub use format::{DashboardMessage, PredictionResponse, Severity};
pub use invoker::InferenceInvoker;
pub use loader::load_artifacts;
