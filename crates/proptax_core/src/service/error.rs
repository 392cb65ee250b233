//! Caller-facing error taxonomy for service use-cases.

use crate::model::property::{PropertyField, PropertyValidationError};
use crate::repo::property_repo::RepoError;
use std::collections::BTreeMap;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub type ServiceResult<T> = Result<T, ServiceError>;

/// Service error for property and municipality use-cases.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ServiceError {
    /// Input failed field validation; carries every failed field.
    ValidationFailed(PropertyValidationError),
    /// Target property does not exist.
    PropertyNotFound(String),
    /// Target municipality does not exist.
    MunicipalityNotFound(String),
    /// A property with the submitted roll number already exists.
    DuplicateId(String),
    /// Internal consistency mismatch between write and read-back.
    InconsistentState(&'static str),
}

impl ServiceError {
    /// Status code this error maps to at an HTTP boundary.
    pub fn http_status(&self) -> u16 {
        match self {
            Self::ValidationFailed(_) => 400,
            Self::PropertyNotFound(_) | Self::MunicipalityNotFound(_) => 404,
            Self::DuplicateId(_) => 409,
            Self::InconsistentState(_) => 500,
        }
    }

    /// Stable machine-readable error code.
    pub fn code(&self) -> &'static str {
        match self {
            Self::ValidationFailed(_) => "validation_failed",
            Self::PropertyNotFound(_) | Self::MunicipalityNotFound(_) => "not_found",
            Self::DuplicateId(_) => "duplicate_id",
            Self::InconsistentState(_) => "inconsistent_state",
        }
    }

    /// Per-field messages for validation failures, empty otherwise.
    pub fn field_errors(&self) -> BTreeMap<PropertyField, String> {
        match self {
            Self::ValidationFailed(err) => err.fields().clone(),
            _ => BTreeMap::new(),
        }
    }
}

impl Display for ServiceError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::ValidationFailed(err) => write!(f, "{err}"),
            Self::PropertyNotFound(id) => write!(f, "property not found: {id}"),
            Self::MunicipalityNotFound(id) => write!(f, "municipality not found: {id}"),
            Self::DuplicateId(id) => write!(f, "property already exists: {id}"),
            Self::InconsistentState(details) => write!(f, "inconsistent store state: {details}"),
        }
    }
}

impl Error for ServiceError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::ValidationFailed(err) => Some(err),
            _ => None,
        }
    }
}

impl From<RepoError> for ServiceError {
    fn from(value: RepoError) -> Self {
        match value {
            RepoError::Validation(err) => Self::ValidationFailed(err),
            RepoError::NotFound(id) => Self::PropertyNotFound(id),
            RepoError::DuplicateId(id) => Self::DuplicateId(id),
        }
    }
}

impl From<PropertyValidationError> for ServiceError {
    fn from(value: PropertyValidationError) -> Self {
        Self::ValidationFailed(value)
    }
}
