//! Domain model for property tax records.
//!
//! # Responsibility
//! - Define canonical property and municipality records.
//! - Own field-level validation shared by every write path.
//!
//! # Invariants
//! - A property is identified by its roll number for its whole lifetime.
//! - Municipalities are reference data and never mutated by the engine.

pub mod municipality;
pub mod property;
