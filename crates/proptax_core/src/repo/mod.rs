//! Repository layer abstractions and store-backed implementations.
//!
//! # Responsibility
//! - Define use-case oriented data access contracts.
//! - Isolate locking and collection details from service orchestration.
//!
//! # Invariants
//! - Repository writes must enforce `Property::validate()` before mutation.
//! - Repository APIs return semantic errors (`NotFound`, `DuplicateId`).

pub mod municipality_repo;
pub mod property_repo;
