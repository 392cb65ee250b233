//! Property use-case service.
//!
//! # Responsibility
//! - Provide list/detail/create/update/delete entry points for callers.
//! - Join property records with municipality rates for tax figures.
//! - Translate repository errors into the caller-facing taxonomy.
//!
//! # Invariants
//! - Service APIs never bypass repository validation.
//! - Reads compute over a snapshot; the store lock is never held while
//!   tax figures are computed.

use crate::model::municipality::{Municipality, UNKNOWN_MUNICIPALITY_NAME};
use crate::model::property::{Property, PropertyDraft, PropertyPatch};
use crate::query::list::{list_properties, PageRequest, PagedResult, PropertyFilter, PropertyListItem};
use crate::repo::municipality_repo::{MunicipalityRepository, StoreMunicipalityRepository};
use crate::repo::property_repo::{PropertyRepository, StorePropertyRepository};
use crate::service::error::{ServiceError, ServiceResult};
use crate::store::Store;
use crate::tax::calc::{aggregate, compute_tax, DashboardTotals, TaxBreakdown};
use serde::{Deserialize, Serialize};

/// Detail view of one property with its tax breakdown.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PropertyDetail {
    pub property: Property,
    /// `None` when the property references an unknown municipality.
    pub municipality: Option<Municipality>,
    pub municipality_name: String,
    pub tax: TaxBreakdown,
}

/// Property service facade over repository implementations.
pub struct PropertyService<P: PropertyRepository, M: MunicipalityRepository> {
    properties: P,
    municipalities: M,
}

impl<'store> PropertyService<StorePropertyRepository<'store>, StoreMunicipalityRepository<'store>> {
    /// Creates a service over store-backed repositories.
    pub fn for_store(store: &'store Store) -> Self {
        Self::new(
            StorePropertyRepository::new(store),
            StoreMunicipalityRepository::new(store),
        )
    }
}

impl<P: PropertyRepository, M: MunicipalityRepository> PropertyService<P, M> {
    pub fn new(properties: P, municipalities: M) -> Self {
        Self {
            properties,
            municipalities,
        }
    }

    /// Lists one page of filtered properties joined with tax figures.
    pub fn list_properties(
        &self,
        filter: &PropertyFilter,
        page: &PageRequest,
    ) -> ServiceResult<PagedResult<PropertyListItem>> {
        let properties = self.properties.list_properties()?;
        let municipalities = self.municipalities.list_municipalities();
        Ok(list_properties(&properties, &municipalities, filter, page))
    }

    /// Gets one property by roll number.
    pub fn get_property(&self, roll_number: &str) -> ServiceResult<Property> {
        self.properties
            .get_property(roll_number)?
            .ok_or_else(|| ServiceError::PropertyNotFound(roll_number.to_string()))
    }

    /// Gets one property with its municipality and tax breakdown.
    pub fn get_property_detail(&self, roll_number: &str) -> ServiceResult<PropertyDetail> {
        let property = self.get_property(roll_number)?;
        let municipality = self
            .municipalities
            .get_municipality(property.municipality_id.as_str());
        let tax = compute_tax(&property, municipality.as_ref());
        let municipality_name = municipality
            .as_ref()
            .map(|m| m.name.clone())
            .unwrap_or_else(|| UNKNOWN_MUNICIPALITY_NAME.to_string());

        Ok(PropertyDetail {
            property,
            municipality,
            municipality_name,
            tax,
        })
    }

    /// Creates one property from caller input.
    ///
    /// # Errors
    /// - `ValidationFailed` listing every invalid field.
    /// - `DuplicateId` when the roll number already exists.
    pub fn create_property(&self, draft: PropertyDraft) -> ServiceResult<Property> {
        let property = draft.into_property()?;
        let roll_number = self.properties.create_property(&property)?;
        self.properties
            .get_property(roll_number.as_str())?
            .ok_or(ServiceError::InconsistentState(
                "created property not found in read-back",
            ))
    }

    /// Updates mutable fields of one property.
    ///
    /// The roll number is immutable; `PropertyPatch` cannot express a change.
    pub fn update_property(
        &self,
        roll_number: &str,
        patch: &PropertyPatch,
    ) -> ServiceResult<Property> {
        Ok(self.properties.update_property(roll_number, patch)?)
    }

    /// Deletes one property by roll number.
    pub fn delete_property(&self, roll_number: &str) -> ServiceResult<()> {
        Ok(self.properties.delete_property(roll_number)?)
    }

    /// Aggregates dashboard totals over the whole collection.
    pub fn dashboard(&self) -> ServiceResult<DashboardTotals> {
        let properties = self.properties.list_properties()?;
        let municipalities = self.municipalities.list_municipalities();
        Ok(aggregate(&properties, &municipalities))
    }
}
