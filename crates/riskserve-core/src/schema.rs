//! Static catalogue of the model's input fields
//!
//! The trained transform expects exactly these 27 fields, in this order,
//! under these exact names. Two names carry an embedded line break from the
//! training data's column headers; they must be preserved verbatim as schema
//! keys, not normalized for display.

/// Number of input fields the trained transform expects
pub const FIELD_COUNT: usize = 27;

/// Name of the single categorical field
pub const SEX_FIELD: &str = "Sex_adm";

/// Declared domain of the categorical field
pub const SEX_DOMAIN: &[&str] = &["Male", "Female"];

/// Type tag for a schema field
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    /// Real-valued, may be missing
    Numeric,
    /// One of a closed set of string values
    Categorical { allowed: &'static [&'static str] },
}

/// A single field in the feature schema
#[derive(Debug, Clone, Copy)]
pub struct FeatureField {
    /// Exact column name from the training data
    pub name: &'static str,
    /// Type tag
    pub kind: FieldKind,
}

impl FeatureField {
    const fn numeric(name: &'static str) -> Self {
        Self {
            name,
            kind: FieldKind::Numeric,
        }
    }

    /// Whether this is the categorical field
    pub fn is_categorical(&self) -> bool {
        matches!(self.kind, FieldKind::Categorical { .. })
    }
}

/// Ordered field table, positionally aligned with the trained transform
static FIELDS: [FeatureField; FIELD_COUNT] = [
    FeatureField::numeric("Year"),
    FeatureField {
        name: SEX_FIELD,
        kind: FieldKind::Categorical { allowed: SEX_DOMAIN },
    },
    FeatureField::numeric("Tobacco Price\nIndex"),
    FeatureField::numeric("Retail Prices\nIndex"),
    FeatureField::numeric("Tobacco Price Index Relative to Retail Price Index"),
    FeatureField::numeric("Real Households' Disposable Income"),
    FeatureField::numeric("Affordability of Tobacco Index"),
    FeatureField::numeric("Household Expenditure on Tobacco"),
    FeatureField::numeric("Household Expenditure Total"),
    FeatureField::numeric("Expenditure on Tobacco as a Percentage of Expenditure"),
    FeatureField::numeric("smoking_prevalence"),
    FeatureField::numeric("total_prescriptions"),
    FeatureField::numeric("nrt_prescription_ratio"),
    FeatureField::numeric("bupropion_prescription_ratio"),
    FeatureField::numeric("varenicline_prescription_ratio"),
    FeatureField::numeric("total_prescription_cost"),
    FeatureField::numeric("nrt_cost_ratio"),
    FeatureField::numeric("bupropion_cost_ratio"),
    FeatureField::numeric("varenicline_cost_ratio"),
    FeatureField::numeric("tobacco_expenditure_ratio"),
    FeatureField::numeric("tobacco_price_relative_index"),
    FeatureField::numeric("16 and Over"),
    FeatureField::numeric("16-24"),
    FeatureField::numeric("25-34"),
    FeatureField::numeric("35-49"),
    FeatureField::numeric("50-59"),
    FeatureField::numeric("60 and Over"),
];

/// Get the ordered field table
pub fn fields() -> &'static [FeatureField; FIELD_COUNT] {
    &FIELDS
}

/// Get the field at a schema position
pub fn field_at(position: usize) -> Option<&'static FeatureField> {
    FIELDS.get(position)
}

/// Find a field's schema position by exact name
pub fn position(name: &str) -> Option<usize> {
    FIELDS.iter().position(|f| f.name == name)
}

/// Iterate the field names in schema order
pub fn field_names() -> impl Iterator<Item = &'static str> {
    FIELDS.iter().map(|f| f.name)
}
