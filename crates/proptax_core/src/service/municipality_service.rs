//! Municipality use-case service (read-only).

use crate::model::municipality::Municipality;
use crate::repo::municipality_repo::{MunicipalityRepository, StoreMunicipalityRepository};
use crate::service::error::{ServiceError, ServiceResult};
use crate::store::Store;

/// Read-only service over municipality reference data.
pub struct MunicipalityService<M: MunicipalityRepository> {
    repo: M,
}

impl<'store> MunicipalityService<StoreMunicipalityRepository<'store>> {
    pub fn for_store(store: &'store Store) -> Self {
        Self::new(StoreMunicipalityRepository::new(store))
    }
}

impl<M: MunicipalityRepository> MunicipalityService<M> {
    pub fn new(repo: M) -> Self {
        Self { repo }
    }

    /// Lists every municipality in seed order.
    pub fn list_municipalities(&self) -> Vec<Municipality> {
        self.repo.list_municipalities()
    }

    /// Gets one municipality by id.
    pub fn get_municipality(&self, municipality_id: &str) -> ServiceResult<Municipality> {
        self.repo
            .get_municipality(municipality_id)
            .ok_or_else(|| ServiceError::MunicipalityNotFound(municipality_id.to_string()))
    }
}
