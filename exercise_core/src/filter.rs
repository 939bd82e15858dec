//! Exact-match filters over exercise records.
//!
//! A filter holds at most one condition per field; a record matches when it
//! satisfies every condition. The empty filter matches everything.

use crate::{Error, ExerciseRecord, Result};
use std::collections::{BTreeMap, HashMap};
use std::fmt;

/// A filterable exercise field
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ExerciseField {
    Name,
    Reps,
    Weight,
    Unit,
    Date,
}

impl ExerciseField {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Name => "name",
            Self::Reps => "reps",
            Self::Weight => "weight",
            Self::Unit => "unit",
            Self::Date => "date",
        }
    }

    pub fn all() -> &'static [ExerciseField] {
        &[Self::Name, Self::Reps, Self::Weight, Self::Unit, Self::Date]
    }
}

impl fmt::Display for ExerciseField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Value a field must equal
#[derive(Clone, Debug, PartialEq)]
pub enum FieldValue {
    Name(String),
    Reps(u32),
    Weight(f64),
    /// Compared as text so an unknown unit simply matches nothing.
    Unit(String),
    /// Compared as text so a malformed date simply matches nothing.
    Date(String),
}

impl FieldValue {
    /// Parse a raw query-string value for `field`.
    ///
    /// Numeric fields must parse as numbers; text fields are taken verbatim.
    pub fn parse(field: ExerciseField, raw: &str) -> Result<Self> {
        match field {
            ExerciseField::Name => Ok(Self::Name(raw.to_string())),
            ExerciseField::Unit => Ok(Self::Unit(raw.to_string())),
            ExerciseField::Date => Ok(Self::Date(raw.to_string())),
            ExerciseField::Reps => raw
                .trim()
                .parse::<u32>()
                .map(Self::Reps)
                .map_err(|e| Error::InvalidFilter(format!("reps={:?}: {}", raw, e))),
            ExerciseField::Weight => match raw.trim().parse::<f64>() {
                Ok(w) if w.is_finite() => Ok(Self::Weight(w)),
                _ => Err(Error::InvalidFilter(format!("weight={:?} is not a number", raw))),
            },
        }
    }

    pub fn field(&self) -> ExerciseField {
        match self {
            Self::Name(_) => ExerciseField::Name,
            Self::Reps(_) => ExerciseField::Reps,
            Self::Weight(_) => ExerciseField::Weight,
            Self::Unit(_) => ExerciseField::Unit,
            Self::Date(_) => ExerciseField::Date,
        }
    }

    fn matches(&self, record: &ExerciseRecord) -> bool {
        match self {
            Self::Name(name) => record.name == *name,
            Self::Reps(reps) => record.reps == *reps,
            Self::Weight(weight) => record.weight == *weight,
            Self::Unit(unit) => record.unit.as_str() == unit,
            Self::Date(date) => record.date.as_str() == date,
        }
    }
}

/// Per-field equality filter
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ExerciseFilter {
    conditions: BTreeMap<ExerciseField, FieldValue>,
}

impl ExerciseFilter {
    /// The empty filter, matching every record.
    pub fn all() -> Self {
        Self::default()
    }

    /// Add (or overwrite) the condition for the value's field.
    pub fn with(mut self, value: FieldValue) -> Self {
        self.conditions.insert(value.field(), value);
        self
    }

    /// Build a filter from query parameters.
    ///
    /// Unrecognized keys are ignored. Every recognized key contributes its
    /// own condition.
    pub fn from_query(params: &HashMap<String, String>) -> Result<Self> {
        let mut filter = Self::all();
        for field in ExerciseField::all() {
            if let Some(raw) = params.get(field.as_str()) {
                filter = filter.with(FieldValue::parse(*field, raw)?);
            }
        }
        Ok(filter)
    }

    pub fn is_empty(&self) -> bool {
        self.conditions.is_empty()
    }

    pub fn get(&self, field: ExerciseField) -> Option<&FieldValue> {
        self.conditions.get(&field)
    }

    pub fn matches(&self, record: &ExerciseRecord) -> bool {
        self.conditions.values().all(|c| c.matches(record))
    }
}
