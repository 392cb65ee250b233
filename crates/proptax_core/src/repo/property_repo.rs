//! Property repository contract and store-backed implementation.
//!
//! # Responsibility
//! - Provide stable CRUD APIs over the store's property collection.
//! - Keep locking details inside the store boundary.
//!
//! # Invariants
//! - Write paths validate the full record before mutating the collection.
//! - Duplicate check and insert happen under one write lock.
//! - Updates never change the roll number.

use crate::model::property::{Property, PropertyPatch, PropertyValidationError, RollNumber};
use crate::query::list::find_property;
use crate::store::Store;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub type RepoResult<T> = Result<T, RepoError>;

/// Repository error for property reads and writes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RepoError {
    Validation(PropertyValidationError),
    NotFound(RollNumber),
    DuplicateId(RollNumber),
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation(err) => write!(f, "{err}"),
            Self::NotFound(id) => write!(f, "property not found: {id}"),
            Self::DuplicateId(id) => write!(f, "property already exists: {id}"),
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            Self::NotFound(_) | Self::DuplicateId(_) => None,
        }
    }
}

impl From<PropertyValidationError> for RepoError {
    fn from(value: PropertyValidationError) -> Self {
        Self::Validation(value)
    }
}

/// Repository interface for property CRUD operations.
pub trait PropertyRepository {
    /// Inserts a new property and returns its roll number.
    fn create_property(&self, property: &Property) -> RepoResult<RollNumber>;
    /// Applies a partial update and returns the stored result.
    fn update_property(&self, roll_number: &str, patch: &PropertyPatch) -> RepoResult<Property>;
    fn get_property(&self, roll_number: &str) -> RepoResult<Option<Property>>;
    /// Returns every property in insertion order.
    fn list_properties(&self) -> RepoResult<Vec<Property>>;
    fn delete_property(&self, roll_number: &str) -> RepoResult<()>;
}

/// Property repository backed by an in-memory [`Store`].
pub struct StorePropertyRepository<'store> {
    store: &'store Store,
}

impl<'store> StorePropertyRepository<'store> {
    pub fn new(store: &'store Store) -> Self {
        Self { store }
    }
}

impl PropertyRepository for StorePropertyRepository<'_> {
    fn create_property(&self, property: &Property) -> RepoResult<RollNumber> {
        property.validate()?;

        self.store.with_properties_mut(|properties| -> RepoResult<RollNumber> {
            if find_property(properties, property.roll_number.as_str()).is_some() {
                return Err(RepoError::DuplicateId(property.roll_number.clone()));
            }
            properties.push(property.clone());
            Ok(property.roll_number.clone())
        })
    }

    fn update_property(&self, roll_number: &str, patch: &PropertyPatch) -> RepoResult<Property> {
        self.store.with_properties_mut(|properties| -> RepoResult<Property> {
            let slot = properties
                .iter_mut()
                .find(|property| property.roll_number == roll_number)
                .ok_or_else(|| RepoError::NotFound(roll_number.to_string()))?;

            let updated = slot.apply_patch(patch);
            updated.validate()?;
            *slot = updated.clone();
            Ok(updated)
        })
    }

    fn get_property(&self, roll_number: &str) -> RepoResult<Option<Property>> {
        Ok(self
            .store
            .with_properties(|properties| find_property(properties, roll_number).cloned()))
    }

    fn list_properties(&self) -> RepoResult<Vec<Property>> {
        Ok(self.store.properties_snapshot())
    }

    fn delete_property(&self, roll_number: &str) -> RepoResult<()> {
        self.store.with_properties_mut(|properties| -> RepoResult<()> {
            let index = properties
                .iter()
                .position(|property| property.roll_number == roll_number)
                .ok_or_else(|| RepoError::NotFound(roll_number.to_string()))?;
            properties.remove(index);
            Ok(())
        })
    }
}
