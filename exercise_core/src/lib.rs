#![forbid(unsafe_code)]

//! Core domain model and business logic for the Extrack exercise log.
//!
//! This crate provides:
//! - Domain types (identifiers, units, dates, exercise records)
//! - Request validation
//! - Exact-match filters
//! - Record store trait with in-memory and JSON-file backends
//! - The exercise service tying validation and storage together
//! - CSV export, configuration and logging

pub mod types;
pub mod error;
pub mod validation;
pub mod filter;
pub mod store;
pub mod service;
pub mod export;
pub mod config;
pub mod logging;

// Re-export commonly used types
pub use error::{Error, Result};
pub use types::*;
pub use validation::{validate, ExerciseCandidate};
pub use filter::{ExerciseField, ExerciseFilter, FieldValue};
pub use store::{connect, InMemoryStore, JsonFileStore, RecordStore};
pub use service::ExerciseService;
pub use config::Config;
