//! Loadable trained artifacts
//!
//! The training pipeline exports its fitted parameters as JSON: a tabular
//! preprocessor (per-field imputation and standardization plus one-hot
//! encoding of the categorical field) and a logistic-regression classifier.
//! Both are immutable after load and safe to share across requests.

use crate::collaborator::{Classifier, FeatureMatrix, Prediction, Preprocessor, RiskLabel};
use async_trait::async_trait;
use riskserve_core::record::FeatureValue;
use riskserve_core::schema::{self, FieldKind};
use riskserve_core::{CanonicalRecord, Error, Result};
use serde::Deserialize;
use std::collections::BTreeMap;

/// Fitted encoding parameters for one numeric field
#[derive(Debug, Clone, Deserialize)]
pub struct NumericEncoding {
    /// Value substituted for missing input (training median)
    pub impute: f64,
    /// Training mean
    pub mean: f64,
    /// Training standard deviation
    pub scale: f64,
}

/// Fitted tabular preprocessing transform
///
/// Encodes a canonical record as the 26 standardized numeric fields in
/// schema order followed by the one-hot block for the categorical field.
#[derive(Debug, Deserialize)]
pub struct TabularPreprocessor {
    /// Per-field encodings keyed by exact schema name
    numeric: BTreeMap<String, NumericEncoding>,
    /// Category list the encoder was fitted on, in one-hot order
    categories: Vec<String>,
}

impl TabularPreprocessor {
    /// Check the fitted parameters against the schema
    pub fn validate(&self) -> Result<()> {
        for field in schema::fields() {
            match field.kind {
                FieldKind::Numeric => {
                    let encoding = self.numeric.get(field.name).ok_or_else(|| {
                        Error::config(format!(
                            "preprocessor is missing an encoding for field {:?}",
                            field.name
                        ))
                    })?;
                    if encoding.scale == 0.0 || !encoding.scale.is_finite() {
                        return Err(Error::config(format!(
                            "preprocessor has unusable scale {} for field {:?}",
                            encoding.scale, field.name
                        )));
                    }
                }
                FieldKind::Categorical { .. } => {}
            }
        }

        for name in self.numeric.keys() {
            if schema::position(name).is_none() {
                return Err(Error::config(format!(
                    "preprocessor encodes unknown field {name:?}"
                )));
            }
        }

        if self.categories.is_empty() {
            return Err(Error::config("preprocessor has an empty category list"));
        }

        Ok(())
    }

    /// Encoded width: numeric fields plus the one-hot block
    pub fn width(&self) -> usize {
        self.numeric.len() + self.categories.len()
    }

    fn encode_numeric(&self, name: &str, value: &FeatureValue) -> Result<f64> {
        // validate() guarantees the encoding exists
        let encoding = self.numeric.get(name).ok_or_else(|| {
            Error::preprocessing(format!("no encoding for field {name:?}"))
        })?;

        let raw = match value {
            FeatureValue::Number(n) if n.is_finite() => *n,
            FeatureValue::Number(_) | FeatureValue::Missing => encoding.impute,
            FeatureValue::Text(s) => s.trim().parse::<f64>().map_err(|_| {
                Error::preprocessing(format!(
                    "malformed numeric content {s:?} for field {name:?}"
                ))
            })?,
        };

        Ok((raw - encoding.mean) / encoding.scale)
    }

    fn encode_categorical(&self, name: &str, value: &FeatureValue, row: &mut Vec<f64>) -> Result<()> {
        match value {
            FeatureValue::Text(category) => {
                let hot = self.categories.iter().position(|c| c == category).ok_or_else(|| {
                    Error::preprocessing(format!(
                        "unseen category {category:?} for field {name:?}"
                    ))
                })?;
                for i in 0..self.categories.len() {
                    row.push(if i == hot { 1.0 } else { 0.0 });
                }
                Ok(())
            }
            // Unknown handling matches the fitted encoder: an all-zero block
            FeatureValue::Missing => {
                row.extend(std::iter::repeat(0.0).take(self.categories.len()));
                Ok(())
            }
            FeatureValue::Number(n) => Err(Error::preprocessing(format!(
                "numeric value {n} for categorical field {name:?}"
            ))),
        }
    }
}

#[async_trait]
impl Preprocessor for TabularPreprocessor {
    async fn transform(&self, record: &CanonicalRecord) -> Result<FeatureMatrix> {
        let mut row = Vec::with_capacity(self.width());

        // Numeric columns first, in schema order; the one-hot block trails,
        // matching the fitted column transformer's output layout
        for (field, value) in record.iter() {
            if field.kind == FieldKind::Numeric {
                row.push(self.encode_numeric(field.name, value)?);
            }
        }
        for (field, value) in record.iter() {
            if field.is_categorical() {
                self.encode_categorical(field.name, value, &mut row)?;
            }
        }

        Ok(FeatureMatrix::from_row(row))
    }

    fn name(&self) -> &str {
        "tabular-preprocessor"
    }
}

/// Fitted logistic-regression classifier over the encoded features
#[derive(Debug, Deserialize)]
pub struct LogisticModel {
    /// One coefficient per encoded feature
    weights: Vec<f64>,
    /// Intercept term
    intercept: f64,
}

impl LogisticModel {
    /// Number of encoded features the model was fitted on
    pub fn width(&self) -> usize {
        self.weights.len()
    }
}

#[async_trait]
impl Classifier for LogisticModel {
    async fn predict(&self, features: &FeatureMatrix) -> Result<Prediction> {
        if features.width() != self.weights.len() {
            return Err(Error::inference(format!(
                "feature width {} does not match model width {}",
                features.width(),
                self.weights.len()
            )));
        }

        let z: f64 = features
            .row()
            .iter()
            .zip(&self.weights)
            .map(|(x, w)| x * w)
            .sum::<f64>()
            + self.intercept;
        let probability = 1.0 / (1.0 + (-z).exp());

        let label = if probability >= 0.5 {
            RiskLabel::High
        } else {
            RiskLabel::Low
        };

        Ok(Prediction { label, probability })
    }

    fn name(&self) -> &str {
        "logistic-model"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use riskserve_core::normalize::{self, RawValue};
    use serde_json::json;

    fn fitted_preprocessor() -> TabularPreprocessor {
        let encodings: serde_json::Map<String, serde_json::Value> = schema::fields()
            .iter()
            .filter(|f| !f.is_categorical())
            .map(|f| {
                (
                    f.name.to_string(),
                    json!({ "impute": 1.0, "mean": 0.0, "scale": 2.0 }),
                )
            })
            .collect();

        let preprocessor: TabularPreprocessor = serde_json::from_value(json!({
            "numeric": encodings,
            "categories": ["Female", "Male"],
        }))
        .unwrap();
        preprocessor.validate().unwrap();
        preprocessor
    }

    fn full_record(sex: &str) -> CanonicalRecord {
        let values: Vec<RawValue> = schema::fields()
            .iter()
            .map(|f| {
                if f.is_categorical() {
                    RawValue::text(sex)
                } else {
                    RawValue::Number(4.0)
                }
            })
            .collect();
        normalize::from_positional(&values).unwrap()
    }

    #[tokio::test]
    async fn encodes_numeric_and_one_hot() {
        let preprocessor = fitted_preprocessor();
        let matrix = preprocessor.transform(&full_record("Male")).await.unwrap();

        assert_eq!(matrix.width(), 26 + 2);
        // (4.0 - 0.0) / 2.0
        assert_eq!(matrix.row()[0], 2.0);
        // One-hot block trails the numeric fields: ["Female", "Male"]
        assert_eq!(&matrix.row()[26..], &[0.0, 1.0]);
    }

    #[tokio::test]
    async fn missing_numeric_uses_imputation_value() {
        let preprocessor = fitted_preprocessor();
        let mut record = full_record("Female");
        record.set("Year", FeatureValue::Missing).unwrap();

        let matrix = preprocessor.transform(&record).await.unwrap();
        // (1.0 - 0.0) / 2.0
        assert_eq!(matrix.row()[0], 0.5);
    }

    #[tokio::test]
    async fn missing_category_encodes_to_zero_block() {
        let preprocessor = fitted_preprocessor();
        let mut record = full_record("Male");
        record.set(schema::SEX_FIELD, FeatureValue::Missing).unwrap();

        let matrix = preprocessor.transform(&record).await.unwrap();
        assert_eq!(&matrix.row()[26..], &[0.0, 0.0]);
    }

    #[tokio::test]
    async fn unseen_category_is_rejected() {
        let preprocessor = fitted_preprocessor();
        let mut record = full_record("Male");
        record
            .set(schema::SEX_FIELD, FeatureValue::text("Unknown"))
            .unwrap();

        let err = preprocessor.transform(&record).await.unwrap_err();
        assert!(matches!(err, Error::Preprocessing(_)));
    }

    #[test]
    fn validate_rejects_missing_field_encoding() {
        let preprocessor: TabularPreprocessor = serde_json::from_value(json!({
            "numeric": { "Year": { "impute": 0.0, "mean": 0.0, "scale": 1.0 } },
            "categories": ["Female", "Male"],
        }))
        .unwrap();
        assert!(matches!(preprocessor.validate(), Err(Error::Config(_))));
    }

    #[tokio::test]
    async fn logistic_model_prediction() {
        let model: LogisticModel = serde_json::from_value(json!({
            "weights": [1.0, 0.0],
            "intercept": 0.0,
        }))
        .unwrap();

        let positive = model
            .predict(&FeatureMatrix::from_row(vec![3.0, 0.0]))
            .await
            .unwrap();
        assert_eq!(positive.label, RiskLabel::High);
        assert!(positive.probability > 0.9);

        let negative = model
            .predict(&FeatureMatrix::from_row(vec![-3.0, 0.0]))
            .await
            .unwrap();
        assert_eq!(negative.label, RiskLabel::Low);
        assert!(negative.probability < 0.1);
        assert!((0.0..=1.0).contains(&negative.probability));
    }

    #[tokio::test]
    async fn logistic_model_rejects_width_mismatch() {
        let model: LogisticModel = serde_json::from_value(json!({
            "weights": [1.0, 0.0],
            "intercept": 0.0,
        }))
        .unwrap();

        let err = model
            .predict(&FeatureMatrix::from_row(vec![1.0]))
            .await
            .unwrap_err();
        assert!(matches!(err, Error::Inference(_)));
    }
}
