//! riskserve Core
//!
//! Core types shared across riskserve components.
//!
//! This crate provides:
//! - The static feature schema the trained transform expects
//! - Canonical, schema-complete feature records
//! - Normalization of the three raw request shapes into canonical records
//! - Error types and result handling

pub mod error;
pub mod normalize;
pub mod record;
pub mod schema;

pub use error::{Error, Result};
pub use normalize::RawValue;
pub use record::{CanonicalRecord, FeatureValue};

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::error::{Error, Result};
    pub use crate::normalize::RawValue;
    pub use crate::record::{CanonicalRecord, FeatureValue};
    pub use crate::schema::{FeatureField, FieldKind, FIELD_COUNT};
}
