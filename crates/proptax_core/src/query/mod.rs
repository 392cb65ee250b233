//! Property query entry points.
//!
//! # Responsibility
//! - Expose pure filter/paginate/lookup functions over property slices.
//! - Keep list result shaping (joins, totals) inside core.

pub mod list;
