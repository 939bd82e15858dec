#![forbid(unsafe_code)]

//! HTTP layer for the Extrack exercise log.
//!
//! Translates verbs, paths and bodies into [`exercise_core::ExerciseService`]
//! calls and maps their outcomes to status codes.

pub mod app;
pub mod error;
pub mod handlers;

pub use app::{router, serve, AppState};
pub use error::ApiError;
