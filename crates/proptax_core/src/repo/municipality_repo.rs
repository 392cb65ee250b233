//! Read-only municipality repository.

use crate::model::municipality::{find_municipality, Municipality};
use crate::store::Store;

/// Repository interface for municipality reference data.
pub trait MunicipalityRepository {
    /// Returns every municipality in seed order.
    fn list_municipalities(&self) -> Vec<Municipality>;
    fn get_municipality(&self, municipality_id: &str) -> Option<Municipality>;
}

/// Municipality repository backed by an in-memory [`Store`].
pub struct StoreMunicipalityRepository<'store> {
    store: &'store Store,
}

impl<'store> StoreMunicipalityRepository<'store> {
    pub fn new(store: &'store Store) -> Self {
        Self { store }
    }
}

impl MunicipalityRepository for StoreMunicipalityRepository<'_> {
    fn list_municipalities(&self) -> Vec<Municipality> {
        self.store.municipalities().to_vec()
    }

    fn get_municipality(&self, municipality_id: &str) -> Option<Municipality> {
        find_municipality(self.store.municipalities(), municipality_id).cloned()
    }
}
