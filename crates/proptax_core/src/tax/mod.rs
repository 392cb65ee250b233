//! Tax computation entry points.
//!
//! # Responsibility
//! - Expose pure tax and aggregate computations over in-memory records.
//! - Keep all money arithmetic in fixed-point decimal.

pub mod calc;
