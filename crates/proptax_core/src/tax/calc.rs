//! Annual tax computation and dashboard aggregation.
//!
//! # Responsibility
//! - Compute per-property tax from municipal and education rates.
//! - Aggregate collection-wide totals for dashboard views.
//!
//! # Invariants
//! - `total_tax == municipal_tax + education_tax` exactly.
//! - A missing municipality yields zero rates and zero tax, not an error.
//! - Aggregates never divide by zero.
//! - Validated values and rates are bounded, so products and sums stay in
//!   `Decimal` range.

use crate::model::municipality::{find_municipality, Municipality};
use crate::model::property::Property;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

const PERCENT: Decimal = Decimal::ONE_HUNDRED;

/// Per-property tax figures together with the rates that produced them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaxBreakdown {
    pub municipal_rate: Decimal,
    pub education_rate: Decimal,
    pub total_rate: Decimal,
    pub municipal_tax: Decimal,
    pub education_tax: Decimal,
    pub total_tax: Decimal,
}

/// Collection-wide figures shown on the dashboard.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DashboardTotals {
    pub total_properties: usize,
    pub total_municipalities: usize,
    pub total_assessment_value: Decimal,
    pub total_annual_tax: Decimal,
    /// Mean of `municipal_rate + education_rate` over all municipalities.
    pub average_tax_rate: Decimal,
    pub average_assessment_value: Decimal,
}

/// Computes the tax breakdown for one property.
///
/// `municipality = None` means the property references an unknown
/// municipality; every rate is then zero.
pub fn compute_tax(property: &Property, municipality: Option<&Municipality>) -> TaxBreakdown {
    let (municipal_rate, education_rate) = municipality
        .map(|m| (m.municipal_rate, m.education_rate))
        .unwrap_or((Decimal::ZERO, Decimal::ZERO));

    let municipal_tax = property.assessment_value * municipal_rate / PERCENT;
    let education_tax = property.assessment_value * education_rate / PERCENT;

    TaxBreakdown {
        municipal_rate,
        education_rate,
        total_rate: municipal_rate + education_rate,
        municipal_tax,
        education_tax,
        total_tax: municipal_tax + education_tax,
    }
}

/// Total annual tax for a property, resolving its municipality by id.
pub fn annual_tax(property: &Property, municipalities: &[Municipality]) -> Decimal {
    compute_tax(
        property,
        find_municipality(municipalities, property.municipality_id.as_str()),
    )
    .total_tax
}

/// Aggregates dashboard totals over the given collections.
pub fn aggregate(properties: &[Property], municipalities: &[Municipality]) -> DashboardTotals {
    let total_assessment_value: Decimal = properties
        .iter()
        .map(|property| property.assessment_value)
        .sum();
    let total_annual_tax: Decimal = properties
        .iter()
        .map(|property| annual_tax(property, municipalities))
        .sum();

    let average_tax_rate = if municipalities.is_empty() {
        Decimal::ZERO
    } else {
        let rate_sum: Decimal = municipalities.iter().map(Municipality::total_rate).sum();
        rate_sum / Decimal::from(municipalities.len())
    };

    // Divisor falls back to 1 so an empty collection averages to zero.
    let divisor = Decimal::from(properties.len().max(1));

    DashboardTotals {
        total_properties: properties.len(),
        total_municipalities: municipalities.len(),
        total_assessment_value,
        total_annual_tax,
        average_tax_rate,
        average_assessment_value: total_assessment_value / divisor,
    }
}
