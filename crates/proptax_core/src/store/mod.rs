//! In-memory store bootstrap and lifecycle.
//!
//! # Responsibility
//! - Own the property collection and municipality reference data.
//! - Validate seed data before the store becomes usable.
//! - Serialize property mutations behind a single-writer lock.
//!
//! # Invariants
//! - Roll numbers and municipality ids are unique once a store is open.
//! - Municipalities never change after seeding.
//! - Nothing survives `dispose`; there is no persistence.

use crate::model::municipality::{Municipality, MunicipalityValidationError};
use crate::model::property::{Property, PropertyValidationError, RollNumber};
use log::{error, info};
use parking_lot::RwLock;
use std::collections::HashSet;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::time::Instant;

pub mod seed;

pub use seed::{SeedData, SeedError};

pub type StoreResult<T> = Result<T, StoreError>;

/// Seed validation failure raised while opening a store.
#[derive(Debug)]
pub enum StoreError {
    Seed(SeedError),
    InvalidMunicipality(MunicipalityValidationError),
    DuplicateMunicipality(String),
    InvalidProperty {
        roll_number: RollNumber,
        source: PropertyValidationError,
    },
    DuplicateProperty(RollNumber),
}

impl Display for StoreError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Seed(err) => write!(f, "{err}"),
            Self::InvalidMunicipality(err) => write!(f, "invalid seed municipality: {err}"),
            Self::DuplicateMunicipality(id) => write!(f, "duplicate seed municipality: {id}"),
            Self::InvalidProperty {
                roll_number,
                source,
            } => write!(f, "invalid seed property `{roll_number}`: {source}"),
            Self::DuplicateProperty(roll_number) => {
                write!(f, "duplicate seed property: {roll_number}")
            }
        }
    }
}

impl Error for StoreError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Seed(err) => Some(err),
            Self::InvalidMunicipality(err) => Some(err),
            Self::InvalidProperty { source, .. } => Some(source),
            Self::DuplicateMunicipality(_) | Self::DuplicateProperty(_) => None,
        }
    }
}

impl From<SeedError> for StoreError {
    fn from(value: SeedError) -> Self {
        Self::Seed(value)
    }
}

impl From<MunicipalityValidationError> for StoreError {
    fn from(value: MunicipalityValidationError) -> Self {
        Self::InvalidMunicipality(value)
    }
}

/// Process-local owner of property and municipality records.
#[derive(Debug)]
pub struct Store {
    properties: RwLock<Vec<Property>>,
    municipalities: Vec<Municipality>,
}

impl Store {
    /// Opens a store seeded with validated records.
    ///
    /// # Side effects
    /// - Emits `store_open` logging events with duration and record counts.
    pub fn open(seed: SeedData) -> StoreResult<Self> {
        let started_at = Instant::now();
        info!("event=store_open module=store status=start");

        match validate_seed(&seed) {
            Ok(()) => {
                info!(
                    "event=store_open module=store status=ok duration_ms={} municipalities={} properties={}",
                    started_at.elapsed().as_millis(),
                    seed.municipalities.len(),
                    seed.properties.len()
                );
                Ok(Self {
                    properties: RwLock::new(seed.properties),
                    municipalities: seed.municipalities,
                })
            }
            Err(err) => {
                error!(
                    "event=store_open module=store status=error duration_ms={} error_code=seed_invalid error={}",
                    started_at.elapsed().as_millis(),
                    err
                );
                Err(err)
            }
        }
    }

    /// Opens an empty store.
    pub fn open_in_memory() -> Self {
        Self {
            properties: RwLock::new(Vec::new()),
            municipalities: Vec::new(),
        }
    }

    /// Opens a store seeded with the built-in demo dataset.
    pub fn open_demo() -> StoreResult<Self> {
        Self::open(SeedData::demo())
    }

    /// Opens a store from the CSV exports in `dir`.
    pub fn open_dir(dir: impl AsRef<std::path::Path>) -> StoreResult<Self> {
        Self::open(SeedData::from_dir(dir)?)
    }

    /// Releases every record and returns how many properties were held.
    pub fn dispose(self) -> usize {
        let released = self.properties.into_inner().len();
        info!("event=store_dispose module=store status=ok properties={released}");
        released
    }

    /// Municipality reference data in seed order.
    pub fn municipalities(&self) -> &[Municipality] {
        &self.municipalities
    }

    /// Runs `read` against the property collection under the read lock.
    pub fn with_properties<T>(&self, read: impl FnOnce(&[Property]) -> T) -> T {
        let guard = self.properties.read();
        read(&guard)
    }

    /// Copies the current property collection.
    pub fn properties_snapshot(&self) -> Vec<Property> {
        self.properties.read().clone()
    }

    /// Runs `write` against the property collection under the write lock.
    ///
    /// Check-and-modify sequences inside `write` are atomic with respect to
    /// other callers.
    pub(crate) fn with_properties_mut<T>(&self, write: impl FnOnce(&mut Vec<Property>) -> T) -> T {
        let mut guard = self.properties.write();
        write(&mut guard)
    }
}

fn validate_seed(seed: &SeedData) -> StoreResult<()> {
    let mut municipality_ids = HashSet::new();
    for municipality in &seed.municipalities {
        municipality.validate()?;
        if !municipality_ids.insert(municipality.municipality_id.as_str()) {
            return Err(StoreError::DuplicateMunicipality(
                municipality.municipality_id.clone(),
            ));
        }
    }

    let mut roll_numbers = HashSet::new();
    for property in &seed.properties {
        property
            .validate()
            .map_err(|source| StoreError::InvalidProperty {
                roll_number: property.roll_number.clone(),
                source,
            })?;
        if !roll_numbers.insert(property.roll_number.as_str()) {
            return Err(StoreError::DuplicateProperty(property.roll_number.clone()));
        }
    }

    Ok(())
}
