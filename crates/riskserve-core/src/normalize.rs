//! Normalization of raw request shapes into canonical records
//!
//! Three raw shapes arrive from the front-ends: a full positional value
//! sequence, a single comma-delimited string, and a partial name-to-value
//! map. All three normalize through one coercion policy:
//!
//! - numeric fields coerce leniently: anything that cannot be read as a
//!   number becomes [`FeatureValue::Missing`] rather than an error, since
//!   the transform tolerates missing values;
//! - the categorical field is checked against its declared domain in every
//!   mode, and an unknown value is a validation error;
//! - arity mismatches are always validation errors, never silent
//!   truncation or padding.

use crate::error::{Error, Result};
use crate::record::{CanonicalRecord, FeatureValue};
use crate::schema::{self, FeatureField, FieldKind, FIELD_COUNT};
use serde::Deserialize;
use std::collections::HashMap;

/// A raw input value prior to coercion
///
/// Deserializes from JSON numbers, strings, and null, in that order of
/// preference.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum RawValue {
    /// A JSON number
    Number(f64),
    /// A JSON string
    Text(String),
    /// JSON null
    Null,
}

impl RawValue {
    /// Create a text value
    pub fn text(value: impl Into<String>) -> Self {
        Self::Text(value.into())
    }
}

/// Normalize a sequence of exactly [`FIELD_COUNT`] positionally aligned values
pub fn from_positional(values: &[RawValue]) -> Result<CanonicalRecord> {
    if values.len() != FIELD_COUNT {
        return Err(Error::arity(FIELD_COUNT, values.len()));
    }

    let coerced = schema::fields()
        .iter()
        .zip(values)
        .map(|(field, raw)| coerce(field, raw))
        .collect::<Result<Vec<_>>>()?;

    CanonicalRecord::from_ordered_values(coerced)
}

/// Normalize one comma-delimited string of [`FIELD_COUNT`] tokens
///
/// Tokens are trimmed of surrounding whitespace, then follow the positional
/// alignment and coercion rule exactly.
pub fn from_delimited(input: &str) -> Result<CanonicalRecord> {
    let tokens: Vec<RawValue> = input
        .split(',')
        .map(|token| RawValue::text(token.trim()))
        .collect();

    from_positional(&tokens)
}

/// Normalize a partial map from field names to values
///
/// Every schema field absent from the map is set to the missing-value
/// marker. Keys that name no schema field are rejected rather than dropped.
pub fn from_partial(values: &HashMap<String, RawValue>) -> Result<CanonicalRecord> {
    let mut record = CanonicalRecord::filled_with_missing();

    for (name, raw) in values {
        let field = schema::position(name)
            .and_then(schema::field_at)
            .ok_or_else(|| Error::validation(format!("unknown field name: {name:?}")))?;
        record.set(name, coerce(field, raw)?)?;
    }

    Ok(record)
}

/// Apply the unified coercion policy to one field
fn coerce(field: &FeatureField, raw: &RawValue) -> Result<FeatureValue> {
    match field.kind {
        FieldKind::Numeric => Ok(coerce_numeric(raw)),
        FieldKind::Categorical { allowed } => coerce_categorical(field.name, allowed, raw),
    }
}

fn coerce_numeric(raw: &RawValue) -> FeatureValue {
    match raw {
        RawValue::Number(n) if n.is_finite() => FeatureValue::Number(*n),
        RawValue::Number(_) | RawValue::Null => FeatureValue::Missing,
        RawValue::Text(s) => match s.trim().parse::<f64>() {
            Ok(n) if n.is_finite() => FeatureValue::Number(n),
            _ => FeatureValue::Missing,
        },
    }
}

fn coerce_categorical(
    name: &str,
    allowed: &'static [&'static str],
    raw: &RawValue,
) -> Result<FeatureValue> {
    match raw {
        RawValue::Null => Ok(FeatureValue::Missing),
        RawValue::Text(s) => {
            let trimmed = s.trim();
            if trimmed.is_empty() {
                Ok(FeatureValue::Missing)
            } else if allowed.contains(&trimmed) {
                Ok(FeatureValue::text(trimmed))
            } else {
                Err(Error::validation(format!(
                    "unknown value {trimmed:?} for categorical field {name:?}, expected one of {allowed:?}"
                )))
            }
        }
        RawValue::Number(n) => Err(Error::validation(format!(
            "numeric value {n} supplied for categorical field {name:?}"
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn full_positional_input() -> Vec<RawValue> {
        schema::fields()
            .iter()
            .map(|field| {
                if field.is_categorical() {
                    RawValue::text("Male")
                } else {
                    RawValue::Number(1.5)
                }
            })
            .collect()
    }

    #[test]
    fn positional_happy_path() {
        let record = from_positional(&full_positional_input()).unwrap();
        assert_eq!(record.len(), FIELD_COUNT);
        assert_eq!(
            record.get(schema::SEX_FIELD),
            Some(&FeatureValue::text("Male"))
        );
        assert_eq!(record.get("Year"), Some(&FeatureValue::Number(1.5)));
    }

    #[test]
    fn positional_arity_mismatch() {
        let short = vec![RawValue::Number(1.0); 20];
        assert!(matches!(
            from_positional(&short),
            Err(Error::Validation(_))
        ));

        let long = vec![RawValue::Number(1.0); FIELD_COUNT + 1];
        assert!(matches!(from_positional(&long), Err(Error::Validation(_))));
    }

    #[test]
    fn non_numeric_tokens_become_missing_not_errors() {
        let values: Vec<RawValue> = schema::fields()
            .iter()
            .map(|field| {
                if field.is_categorical() {
                    RawValue::text("Female")
                } else {
                    RawValue::text("not a number")
                }
            })
            .collect();

        let record = from_positional(&values).unwrap();
        for (field, value) in record.iter() {
            if field.is_categorical() {
                assert_eq!(value, &FeatureValue::text("Female"));
            } else {
                assert!(value.is_missing(), "field {:?} should be missing", field.name);
            }
        }
    }

    #[test]
    fn numeric_strings_are_coerced() {
        let mut values = full_positional_input();
        values[0] = RawValue::text(" 2020 ");
        let record = from_positional(&values).unwrap();
        assert_eq!(record.get("Year"), Some(&FeatureValue::Number(2020.0)));
    }

    #[test]
    fn nan_input_becomes_missing() {
        let mut values = full_positional_input();
        values[0] = RawValue::Number(f64::NAN);
        let record = from_positional(&values).unwrap();
        assert!(record.get("Year").unwrap().is_missing());
    }

    #[test]
    fn unknown_sex_value_is_rejected() {
        let mut values = full_positional_input();
        values[1] = RawValue::text("Other");
        assert!(matches!(
            from_positional(&values),
            Err(Error::Validation(_))
        ));
    }

    #[test]
    fn absent_sex_value_is_missing() {
        let mut values = full_positional_input();
        values[1] = RawValue::Null;
        let record = from_positional(&values).unwrap();
        assert!(record.get(schema::SEX_FIELD).unwrap().is_missing());
    }

    #[test]
    fn delimited_happy_path() {
        let tokens: Vec<String> = schema::fields()
            .iter()
            .map(|field| {
                if field.is_categorical() {
                    " Male ".to_string()
                } else {
                    " 120.5".to_string()
                }
            })
            .collect();
        let record = from_delimited(&tokens.join(",")).unwrap();
        assert_eq!(
            record.get(schema::SEX_FIELD),
            Some(&FeatureValue::text("Male"))
        );
        assert_eq!(record.get("Year"), Some(&FeatureValue::Number(120.5)));
    }

    #[test]
    fn delimited_token_count_mismatch() {
        assert!(matches!(
            from_delimited("1, 2, 3"),
            Err(Error::Validation(_))
        ));
    }

    #[test]
    fn partial_fills_absent_fields_with_missing() {
        let mut values = HashMap::new();
        values.insert("Year".to_string(), RawValue::Number(2020.0));
        values.insert(schema::SEX_FIELD.to_string(), RawValue::text("Female"));

        let record = from_partial(&values).unwrap();
        assert_eq!(record.get("Year"), Some(&FeatureValue::Number(2020.0)));
        assert_eq!(
            record.get(schema::SEX_FIELD),
            Some(&FeatureValue::text("Female"))
        );
        let missing = record
            .values()
            .iter()
            .filter(|v| v.is_missing())
            .count();
        assert_eq!(missing, FIELD_COUNT - 2);
    }

    #[test]
    fn partial_rejects_unknown_keys() {
        let mut values = HashMap::new();
        values.insert("no_such_field".to_string(), RawValue::Number(1.0));
        assert!(matches!(from_partial(&values), Err(Error::Validation(_))));
    }

    #[test]
    fn partial_empty_map_is_all_missing() {
        let record = from_partial(&HashMap::new()).unwrap();
        assert!(record.values().iter().all(FeatureValue::is_missing));
    }

    #[test]
    fn raw_value_deserializes_mixed_json() {
        let values: Vec<RawValue> =
            serde_json::from_str(r#"[2020, "Male", 120.5, null]"#).unwrap();
        assert_eq!(values[0], RawValue::Number(2020.0));
        assert_eq!(values[1], RawValue::text("Male"));
        assert_eq!(values[2], RawValue::Number(120.5));
        assert_eq!(values[3], RawValue::Null);
    }

    fn numeric_token() -> impl Strategy<Value = String> {
        prop_oneof![
            (-1.0e6f64..1.0e6).prop_map(|n| format!("{n}")),
            "[a-z]{1,8}",
            Just(String::new()),
        ]
    }

    proptest! {
        // Every valid positional input yields a schema-complete record in
        // schema order, regardless of token content.
        #[test]
        fn positional_output_is_schema_complete(
            tokens in prop::collection::vec(numeric_token(), FIELD_COUNT - 1),
            sex in prop_oneof![Just("Male"), Just("Female")],
        ) {
            let mut values: Vec<RawValue> =
                tokens.iter().map(RawValue::text).collect();
            values.insert(1, RawValue::text(sex));

            let record = from_positional(&values).unwrap();
            prop_assert_eq!(record.len(), FIELD_COUNT);
            for (field, value) in record.iter() {
                match field.kind {
                    FieldKind::Categorical { .. } => {
                        prop_assert_eq!(value, &FeatureValue::text(sex));
                    }
                    FieldKind::Numeric => {
                        prop_assert!(!matches!(value, FeatureValue::Text(_)));
                    }
                }
            }
        }

        // Mode B equals Mode A on the same values split first, then coerced.
        #[test]
        fn delimited_agrees_with_positional(
            tokens in prop::collection::vec("[0-9]{1,4}(\\.[0-9]{1,3})?", FIELD_COUNT - 1),
            sex in prop_oneof![Just("Male"), Just("Female")],
        ) {
            let mut all: Vec<String> = tokens.clone();
            all.insert(1, sex.to_string());

            let delimited = from_delimited(&all.join(", ")).unwrap();
            let positional_input: Vec<RawValue> =
                all.iter().map(|t| RawValue::text(t.trim())).collect();
            let positional = from_positional(&positional_input).unwrap();

            prop_assert_eq!(delimited, positional);
        }
    }
}
