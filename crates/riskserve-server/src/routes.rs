//! HTTP routes and handlers
//!
//! Each front-end maps the tagged pipeline errors to its own convention:
//! the JSON endpoint returns real error statuses with an `error` body, the
//! form and dashboard render an error sentence inline and never hard-fail
//! the page.

use axum::extract::{Form, State};
use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Response};
use axum::Json;
use serde::Deserialize;
use serde_json::json;
use std::collections::HashMap;
use tracing::{info, warn};

use crate::pages;
use crate::state::AppState;
use riskserve_core::{normalize, Error, RawValue};
use riskserve_model::format;
use riskserve_model::{DashboardMessage, PredictionResponse, RiskAssessment};

pub async fn health() -> &'static str {
    "OK"
}

pub async fn metrics(State(state): State<AppState>) -> String {
    state.metrics.render()
}

pub async fn home() -> Html<String> {
    Html(pages::home_page(None))
}

pub async fn dashboard() -> Html<String> {
    Html(pages::dashboard_page())
}

/// JSON inference request: the full positional feature array
#[derive(Debug, Deserialize)]
pub struct PredictRequest {
    pub features: Vec<RawValue>,
}

/// `POST /predict`: machine-readable endpoint
pub async fn predict_json(
    State(state): State<AppState>,
    Json(req): Json<PredictRequest>,
) -> Result<Json<PredictionResponse>, AppError> {
    metrics::counter!("riskserve_requests_total", "endpoint" => "predict").increment(1);

    let record = normalize::from_positional(&req.features)?;
    let assessment = state.invoker.infer(&record).await?;

    info!(
        prediction = assessment.label.as_int(),
        probability = assessment.probability,
        "json prediction served"
    );
    Ok(Json(PredictionResponse::from(assessment)))
}

/// Form inference request: one comma-delimited string
#[derive(Debug, Deserialize)]
pub struct PredictForm {
    pub features: String,
}

/// `POST /predict_page`: human-facing form submission
///
/// Always renders the page; failures become the inline error sentence.
pub async fn predict_page(
    State(state): State<AppState>,
    Form(form): Form<PredictForm>,
) -> Html<String> {
    metrics::counter!("riskserve_requests_total", "endpoint" => "predict_page").increment(1);

    let sentence = match assess_delimited(&state, &form.features).await {
        Ok(assessment) => format::risk_sentence(&assessment),
        Err(e) => {
            count_error(&e);
            warn!(error = %e, "form prediction failed");
            format::error_sentence(e)
        }
    };

    Html(pages::home_page(Some(&sentence)))
}

async fn assess_delimited(state: &AppState, input: &str) -> riskserve_core::Result<RiskAssessment> {
    let record = normalize::from_delimited(input)?;
    state.invoker.infer(&record).await
}

/// Dashboard callback request: a partial set of named values plus the
/// count of triggering actions
#[derive(Debug, Deserialize)]
pub struct AssessRequest {
    #[serde(default)]
    pub n_clicks: u64,

    #[serde(default)]
    pub values: HashMap<String, RawValue>,
}

/// `POST /api/assess`: interactive dashboard callback
///
/// Produces an empty message before any triggering action, without touching
/// the collaborators.
pub async fn dashboard_assess(
    State(state): State<AppState>,
    Json(req): Json<AssessRequest>,
) -> Json<DashboardMessage> {
    if req.n_clicks == 0 {
        return Json(DashboardMessage::idle());
    }

    metrics::counter!("riskserve_requests_total", "endpoint" => "assess").increment(1);

    let message = match assess_partial(&state, &req.values).await {
        Ok(assessment) => DashboardMessage::from_assessment(&assessment),
        Err(e) => {
            count_error(&e);
            warn!(error = %e, "dashboard assessment failed");
            DashboardMessage::from_error(e)
        }
    };

    Json(message)
}

async fn assess_partial(
    state: &AppState,
    values: &HashMap<String, RawValue>,
) -> riskserve_core::Result<RiskAssessment> {
    let record = normalize::from_partial(values)?;
    state.invoker.infer(&record).await
}

fn error_kind(error: &Error) -> &'static str {
    match error {
        Error::Validation(_) => "validation",
        Error::Preprocessing(_) => "preprocessing",
        Error::Inference(_) => "inference",
        Error::Timeout => "timeout",
        Error::Config(_) => "config",
        Error::Io(_) => "io",
        Error::Serialization(_) => "serialization",
    }
}

fn count_error(error: &Error) {
    metrics::counter!("riskserve_errors_total", "kind" => error_kind(error)).increment(1);
}

/// Error responder for the JSON endpoint
#[derive(Debug)]
pub struct AppError(Error);

impl From<Error> for AppError {
    fn from(error: Error) -> Self {
        Self(error)
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        count_error(&self.0);

        let status = match &self.0 {
            Error::Validation(_) => StatusCode::BAD_REQUEST,
            Error::Preprocessing(_) => StatusCode::UNPROCESSABLE_ENTITY,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        };
        warn!(%status, error = %self.0, "request failed");

        (status, Json(json!({ "error": self.0.to_string() }))).into_response()
    }
}
