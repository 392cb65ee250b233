//! Property domain model.
//!
//! # Responsibility
//! - Define the canonical property record keyed by assessment roll number.
//! - Provide create/update input shapes and their shared validation rules.
//!
//! # Invariants
//! - `roll_number` is the primary key and never changes after creation.
//! - `assessment_value` must be strictly positive and at most
//!   [`max_assessment_value`] for accepted writes.
//! - `municipality_id` is non-empty but may reference an unknown municipality.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Assessment roll number, the stable primary key of a property.
pub type RollNumber = String;

/// Upper bound for accepted assessment values.
///
/// Keeps tax products and collection-wide sums inside `Decimal` range.
pub fn max_assessment_value() -> Decimal {
    Decimal::from(1_000_000_000_000_000_i64)
}

/// Canonical property record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Property {
    pub roll_number: RollNumber,
    /// Assessed value in currency units.
    pub assessment_value: Decimal,
    /// Foreign key into the municipality reference data.
    pub municipality_id: String,
}

/// Caller input for creating a property.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PropertyDraft {
    pub roll_number: RollNumber,
    pub assessment_value: Decimal,
    pub municipality_id: String,
}

/// Partial update for an existing property.
///
/// There is no roll-number field: the key is immutable, and a `roll_number`
/// key in deserialized input is ignored.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PropertyPatch {
    #[serde(default)]
    pub assessment_value: Option<Decimal>,
    #[serde(default)]
    pub municipality_id: Option<String>,
}

/// Property fields that can fail validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PropertyField {
    RollNumber,
    AssessmentValue,
    MunicipalityId,
}

impl PropertyField {
    /// Wire name of the field, matching the serialized record.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::RollNumber => "roll_number",
            Self::AssessmentValue => "assessment_value",
            Self::MunicipalityId => "municipality_id",
        }
    }
}

impl Display for PropertyField {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// All field violations found in one property input.
///
/// Every violated field is reported so callers can render all messages at
/// once instead of fixing one error per round trip.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PropertyValidationError {
    fields: BTreeMap<PropertyField, String>,
}

impl PropertyValidationError {
    /// Returns per-field messages ordered by field.
    pub fn fields(&self) -> &BTreeMap<PropertyField, String> {
        &self.fields
    }

    /// Returns the message for one field, if that field failed.
    pub fn message_for(&self, field: PropertyField) -> Option<&str> {
        self.fields.get(&field).map(String::as_str)
    }

    /// Returns whether the given field failed validation.
    pub fn has_field(&self, field: PropertyField) -> bool {
        self.fields.contains_key(&field)
    }
}

impl Display for PropertyValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "property validation failed: ")?;
        for (index, (field, message)) in self.fields.iter().enumerate() {
            if index > 0 {
                write!(f, "; ")?;
            }
            write!(f, "{field}: {message}")?;
        }
        Ok(())
    }
}

impl Error for PropertyValidationError {}

impl Property {
    /// Validates write-time invariants shared by create and update.
    pub fn validate(&self) -> Result<(), PropertyValidationError> {
        validate_fields(
            self.roll_number.as_str(),
            self.assessment_value,
            self.municipality_id.as_str(),
        )
    }

    /// Applies a partial update, leaving omitted fields untouched.
    ///
    /// The result is not validated; callers validate the merged record.
    pub fn apply_patch(&self, patch: &PropertyPatch) -> Property {
        Property {
            roll_number: self.roll_number.clone(),
            assessment_value: patch.assessment_value.unwrap_or(self.assessment_value),
            municipality_id: patch
                .municipality_id
                .as_deref()
                .map(|id| id.trim().to_string())
                .unwrap_or_else(|| self.municipality_id.clone()),
        }
    }
}

impl PropertyDraft {
    /// Validates the draft and converts it into a property record.
    ///
    /// Roll number and municipality id are trimmed before validation.
    pub fn into_property(self) -> Result<Property, PropertyValidationError> {
        let property = Property {
            roll_number: self.roll_number.trim().to_string(),
            assessment_value: self.assessment_value,
            municipality_id: self.municipality_id.trim().to_string(),
        };
        property.validate()?;
        Ok(property)
    }
}

fn validate_fields(
    roll_number: &str,
    assessment_value: Decimal,
    municipality_id: &str,
) -> Result<(), PropertyValidationError> {
    let mut fields = BTreeMap::new();

    if roll_number.trim().is_empty() {
        fields.insert(
            PropertyField::RollNumber,
            "Roll number is required".to_string(),
        );
    }
    if assessment_value <= Decimal::ZERO {
        fields.insert(
            PropertyField::AssessmentValue,
            "Value must be positive".to_string(),
        );
    } else if assessment_value > max_assessment_value() {
        fields.insert(
            PropertyField::AssessmentValue,
            format!("Value must not exceed {}", max_assessment_value()),
        );
    }
    if municipality_id.trim().is_empty() {
        fields.insert(
            PropertyField::MunicipalityId,
            "Municipality is required".to_string(),
        );
    }

    if fields.is_empty() {
        Ok(())
    } else {
        Err(PropertyValidationError { fields })
    }
}
