//! Municipality reference data.
//!
//! # Responsibility
//! - Define the read-only municipality record carrying tax rates.
//!
//! # Invariants
//! - `municipality_id` is non-empty and unique within one dataset.
//! - Both rates are percentages in `0..=100` (`1.25` means 1.25%).

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Display name used when a property references an unknown municipality.
pub const UNKNOWN_MUNICIPALITY_NAME: &str = "Unknown";

/// Largest accepted rate, as a percentage.
pub const MAX_RATE: Decimal = Decimal::ONE_HUNDRED;

/// Municipality with its municipal and education tax rates.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Municipality {
    pub municipality_id: String,
    pub name: String,
    /// Municipal rate as a percentage.
    pub municipal_rate: Decimal,
    /// Education rate as a percentage.
    pub education_rate: Decimal,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MunicipalityValidationError {
    EmptyId,
    NegativeRate {
        municipality_id: String,
        field: &'static str,
        value: Decimal,
    },
    RateTooHigh {
        municipality_id: String,
        field: &'static str,
        value: Decimal,
    },
}

impl Display for MunicipalityValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyId => write!(f, "municipality id cannot be empty"),
            Self::NegativeRate {
                municipality_id,
                field,
                value,
            } => write!(
                f,
                "municipality `{municipality_id}` has negative {field}: {value}"
            ),
            Self::RateTooHigh {
                municipality_id,
                field,
                value,
            } => write!(
                f,
                "municipality `{municipality_id}` has {field} above {MAX_RATE}: {value}"
            ),
        }
    }
}

impl Error for MunicipalityValidationError {}

impl Municipality {
    /// Combined municipal and education rate, as a percentage.
    pub fn total_rate(&self) -> Decimal {
        self.municipal_rate + self.education_rate
    }

    pub fn validate(&self) -> Result<(), MunicipalityValidationError> {
        if self.municipality_id.trim().is_empty() {
            return Err(MunicipalityValidationError::EmptyId);
        }
        for (field, value) in [
            ("municipal_rate", self.municipal_rate),
            ("education_rate", self.education_rate),
        ] {
            if value < Decimal::ZERO {
                return Err(MunicipalityValidationError::NegativeRate {
                    municipality_id: self.municipality_id.clone(),
                    field,
                    value,
                });
            }
            if value > MAX_RATE {
                return Err(MunicipalityValidationError::RateTooHigh {
                    municipality_id: self.municipality_id.clone(),
                    field,
                    value,
                });
            }
        }
        Ok(())
    }
}

/// Looks up a municipality by id in a reference slice.
pub fn find_municipality<'a>(
    municipalities: &'a [Municipality],
    municipality_id: &str,
) -> Option<&'a Municipality> {
    municipalities
        .iter()
        .find(|municipality| municipality.municipality_id == municipality_id)
}
