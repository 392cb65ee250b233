//! Core domain logic for PropTax.
//! This crate is the single source of truth for property tax invariants.

pub mod logging;
pub mod model;
pub mod query;
pub mod repo;
pub mod service;
pub mod store;
pub mod tax;

pub use logging::{default_log_level, init_logging, logging_status, LoggingConfig, LoggingError};
pub use model::municipality::{
    Municipality, MunicipalityValidationError, MAX_RATE, UNKNOWN_MUNICIPALITY_NAME,
};
pub use model::property::{
    max_assessment_value, Property, PropertyDraft, PropertyField, PropertyPatch, PropertyValidationError, RollNumber,
};
pub use query::list::{
    find_property, list_properties, PageRequest, PagedResult, PropertyFilter, PropertyListItem,
    DEFAULT_PAGE_SIZE,
};
pub use repo::municipality_repo::{MunicipalityRepository, StoreMunicipalityRepository};
pub use repo::property_repo::{PropertyRepository, RepoError, RepoResult, StorePropertyRepository};
pub use service::error::{ServiceError, ServiceResult};
pub use service::municipality_service::MunicipalityService;
pub use service::property_service::{PropertyDetail, PropertyService};
pub use store::{SeedData, SeedError, Store, StoreError, StoreResult};
pub use tax::calc::{aggregate, annual_tax, compute_tax, DashboardTotals, TaxBreakdown};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
