//! Canonical feature records
//!
//! A [`CanonicalRecord`] is the normalized, schema-complete representation of
//! one inference request: exactly one value per schema field, always in
//! schema order. Records are request-scoped and never shared mutably.

use crate::error::{Error, Result};
use crate::schema::{self, FIELD_COUNT};
use serde::Serialize;

/// A single normalized feature value
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum FeatureValue {
    /// A real-valued numeric feature
    Number(f64),
    /// The literal string of a categorical feature
    Text(String),
    /// Explicit missing-value marker, passed through to the transform
    Missing,
}

impl FeatureValue {
    /// Create a text value
    pub fn text(value: impl Into<String>) -> Self {
        Self::Text(value.into())
    }

    /// Whether this is the missing-value marker
    pub fn is_missing(&self) -> bool {
        matches!(self, Self::Missing)
    }

    /// Numeric content, if any
    pub fn as_number(&self) -> Option<f64> {
        match self {
            Self::Number(n) => Some(*n),
            _ => None,
        }
    }
}

/// One inference request's worth of features, schema-complete and ordered
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CanonicalRecord {
    values: Vec<FeatureValue>,
}

impl CanonicalRecord {
    /// Create a record with every field set to the missing-value marker
    pub fn filled_with_missing() -> Self {
        Self {
            values: vec![FeatureValue::Missing; FIELD_COUNT],
        }
    }

    /// Create a record from values already in schema order
    pub fn from_ordered_values(values: Vec<FeatureValue>) -> Result<Self> {
        if values.len() != FIELD_COUNT {
            return Err(Error::arity(FIELD_COUNT, values.len()));
        }
        Ok(Self { values })
    }

    /// Set a field by its exact schema name
    pub fn set(&mut self, name: &str, value: FeatureValue) -> Result<()> {
        let position = schema::position(name)
            .ok_or_else(|| Error::validation(format!("unknown field name: {name:?}")))?;
        self.values[position] = value;
        Ok(())
    }

    /// Get a field's value by its exact schema name
    pub fn get(&self, name: &str) -> Option<&FeatureValue> {
        schema::position(name).map(|position| &self.values[position])
    }

    /// Values in schema order
    pub fn values(&self) -> &[FeatureValue] {
        &self.values
    }

    /// Iterate (field, value) pairs in schema order
    pub fn iter<'a>(
        &'a self,
    ) -> impl Iterator<Item = (&'static schema::FeatureField, &'a FeatureValue)> + 'a {
        schema::fields().iter().zip(self.values.iter())
    }

    /// Number of fields, always [`FIELD_COUNT`]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Always false; a record is never empty
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn filled_record_is_schema_complete() {
        let record = CanonicalRecord::filled_with_missing();
        assert_eq!(record.len(), FIELD_COUNT);
        assert!(record.values().iter().all(FeatureValue::is_missing));
    }

    #[test]
    fn from_ordered_values_rejects_wrong_arity() {
        let err = CanonicalRecord::from_ordered_values(vec![FeatureValue::Number(1.0); 20])
            .unwrap_err();
        assert!(matches!(err, Error::Validation(_)));
    }

    #[test]
    fn set_and_get_by_name() {
        let mut record = CanonicalRecord::filled_with_missing();
        record.set("Year", FeatureValue::Number(2020.0)).unwrap();
        record
            .set("Tobacco Price\nIndex", FeatureValue::Number(120.5))
            .unwrap();

        assert_eq!(record.get("Year"), Some(&FeatureValue::Number(2020.0)));
        assert_eq!(record.values()[0], FeatureValue::Number(2020.0));
        assert_eq!(record.values()[2], FeatureValue::Number(120.5));
    }

    #[test]
    fn set_unknown_field_fails() {
        let mut record = CanonicalRecord::filled_with_missing();
        let err = record
            .set("not_a_field", FeatureValue::Number(1.0))
            .unwrap_err();
        assert!(matches!(err, Error::Validation(_)));
    }
}
