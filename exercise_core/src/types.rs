//! Core domain types for the exercise tracker.
//!
//! This module defines the fundamental types used throughout the system:
//! - Store-assigned identifiers
//! - Weight units and the `MM-DD-YY` date string
//! - Validated exercise payloads and persisted records

use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

// ============================================================================
// Identifier
// ============================================================================

/// Opaque identifier assigned by the store on creation
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(transparent)]
pub struct ExerciseId(Uuid);

impl ExerciseId {
    /// Mint a fresh identifier. Only stores should call this.
    pub fn generate() -> Self {
        Self(Uuid::new_v4())
    }

    /// Parse an externally supplied identifier.
    ///
    /// Anything that is not a UUID is rejected with `InvalidIdentifier`.
    pub fn parse(s: &str) -> Result<Self> {
        Uuid::parse_str(s)
            .map(Self)
            .map_err(|e| Error::InvalidIdentifier(format!("{:?}: {}", s, e)))
    }
}

impl fmt::Display for ExerciseId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.hyphenated())
    }
}

// ============================================================================
// Unit and Date
// ============================================================================

/// Unit the weight is recorded in
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum Unit {
    Lbs,
    Kgs,
}

impl Unit {
    pub fn as_str(&self) -> &'static str {
        match self {
            Unit::Lbs => "lbs",
            Unit::Kgs => "kgs",
        }
    }

    /// Exact, case-sensitive match against `"lbs"` / `"kgs"`.
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "lbs" => Some(Unit::Lbs),
            "kgs" => Some(Unit::Kgs),
            _ => None,
        }
    }
}

impl fmt::Display for Unit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Date in the fixed `MM-DD-YY` shape.
///
/// Only the shape is checked; `99-99-99` is accepted.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(try_from = "String", into = "String")]
pub struct ExerciseDate(String);

impl ExerciseDate {
    pub fn parse(s: &str) -> Result<Self> {
        if crate::validation::is_date_valid(s) {
            Ok(Self(s.to_string()))
        } else {
            Err(Error::Validation(format!(
                "date {:?} is not in MM-DD-YY format",
                s
            )))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for ExerciseDate {
    type Error = Error;

    fn try_from(s: String) -> Result<Self> {
        Self::parse(&s)
    }
}

impl From<ExerciseDate> for String {
    fn from(date: ExerciseDate) -> Self {
        date.0
    }
}

impl fmt::Display for ExerciseDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

// ============================================================================
// Exercise payloads
// ============================================================================

/// Exercise fields that have passed validation.
///
/// Fields are private so the only ways to obtain one are `NewExercise::new`
/// and `ExerciseCandidate::parse`, both of which enforce the field rules.
#[derive(Clone, Debug, PartialEq)]
pub struct NewExercise {
    name: String,
    reps: u32,
    weight: f64,
    unit: Unit,
    date: ExerciseDate,
}

impl NewExercise {
    /// Build from typed values, applying the same rules as request validation.
    pub fn new(
        name: impl Into<String>,
        reps: u32,
        weight: f64,
        unit: Unit,
        date: ExerciseDate,
    ) -> Result<Self> {
        let name = name.into();
        if name.is_empty() {
            return Err(Error::Validation("name must not be empty".into()));
        }
        if reps < 1 {
            return Err(Error::Validation("reps must be at least 1".into()));
        }
        if !weight.is_finite() || weight < 1.0 {
            return Err(Error::Validation("weight must be at least 1".into()));
        }
        Ok(Self {
            name,
            reps,
            weight,
            unit,
            date,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn reps(&self) -> u32 {
        self.reps
    }

    pub fn weight(&self) -> f64 {
        self.weight
    }

    pub fn unit(&self) -> Unit {
        self.unit
    }

    pub fn date(&self) -> &ExerciseDate {
        &self.date
    }

    /// Attach a store-assigned identifier.
    pub fn into_record(self, id: ExerciseId) -> ExerciseRecord {
        ExerciseRecord {
            id,
            name: self.name,
            reps: self.reps,
            weight: self.weight,
            unit: self.unit,
            date: self.date,
        }
    }
}

/// A persisted exercise entry
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct ExerciseRecord {
    #[serde(rename = "_id")]
    pub id: ExerciseId,
    pub name: String,
    pub reps: u32,
    #[serde(serialize_with = "serialize_weight")]
    pub weight: f64,
    pub unit: Unit,
    pub date: ExerciseDate,
}

// Whole weights go out as integers so `135` is echoed as `135`, not `135.0`.
pub(crate) fn serialize_weight<S>(weight: &f64, serializer: S) -> std::result::Result<S::Ok, S::Error>
where
    S: serde::Serializer,
{
    const MAX_EXACT: f64 = 9_007_199_254_740_992.0;
    if weight.fract() == 0.0 && weight.abs() <= MAX_EXACT {
        serializer.serialize_i64(*weight as i64)
    } else {
        serializer.serialize_f64(*weight)
    }
}
