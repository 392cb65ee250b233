//! Core use-case services.
//!
//! # Responsibility
//! - Orchestrate repository calls into use-case level APIs.
//! - Keep CLI and future transport layers decoupled from store details.

pub mod error;
pub mod municipality_service;
pub mod property_service;
