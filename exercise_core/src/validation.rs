//! Request validation for exercise payloads.
//!
//! Incoming bodies arrive as untyped JSON. They are first captured as an
//! [`ExerciseCandidate`] and then parsed field by field into a
//! [`NewExercise`]. A field that is missing or has the wrong JSON type is a
//! validation failure, never a fault.

use crate::{Error, ExerciseDate, NewExercise, Result, Unit};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use serde_json::Value;

// `\d` in the regex crate matches any Unicode digit; only ASCII counts here.
static DATE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[0-9]{2}-[0-9]{2}-[0-9]{2}$").expect("valid date regex"));

/// True if `date` has the shape `MM-DD-YY` (two ASCII digits per component).
pub fn is_date_valid(date: &str) -> bool {
    DATE_RE.is_match(date)
}

/// Proposed exercise exactly as the client sent it
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct ExerciseCandidate {
    #[serde(default)]
    pub name: Option<Value>,
    #[serde(default)]
    pub reps: Option<Value>,
    #[serde(default)]
    pub weight: Option<Value>,
    #[serde(default)]
    pub unit: Option<Value>,
    #[serde(default)]
    pub date: Option<Value>,
}

impl ExerciseCandidate {
    /// Capture a request body. Anything other than a JSON object is rejected.
    pub fn from_json(body: Value) -> Result<Self> {
        if !body.is_object() {
            return Err(Error::Validation("request body must be a JSON object".into()));
        }
        serde_json::from_value(body).map_err(|e| Error::Validation(e.to_string()))
    }

    /// Apply every field rule, producing a typed exercise.
    pub fn parse(&self) -> Result<NewExercise> {
        let name = match &self.name {
            Some(Value::String(s)) => s.clone(),
            _ => return Err(Error::Validation("name must be a string".into())),
        };
        let reps = parse_reps(self.reps.as_ref())?;
        let weight = parse_weight(self.weight.as_ref())?;
        let unit = match &self.unit {
            Some(Value::String(s)) => Unit::parse(s).ok_or_else(|| {
                Error::Validation(format!("unit {:?} must be \"lbs\" or \"kgs\"", s))
            })?,
            _ => return Err(Error::Validation("unit must be a string".into())),
        };
        let date = match &self.date {
            Some(Value::String(s)) => ExerciseDate::parse(s)?,
            _ => return Err(Error::Validation("date must be a string".into())),
        };

        NewExercise::new(name, reps, weight, unit, date)
    }
}

/// Returns true iff the candidate satisfies every field rule.
pub fn validate(candidate: &ExerciseCandidate) -> bool {
    candidate.parse().is_ok()
}

/// Numeric fields may arrive as JSON numbers or as numeric strings
/// (`"5"`, `" 135 "`). Anything else is not a number.
fn as_number(value: Option<&Value>) -> Option<f64> {
    match value? {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok().filter(|f| f.is_finite()),
        _ => None,
    }
}

fn parse_reps(value: Option<&Value>) -> Result<u32> {
    let count = match value {
        Some(Value::Number(n)) if n.as_u64().is_some() => n.as_u64(),
        other => as_number(other)
            .filter(|f| f.fract() == 0.0 && *f >= 0.0 && *f <= f64::from(u32::MAX))
            .map(|f| f as u64),
    };

    match count.map(u32::try_from) {
        Some(Ok(count)) if count >= 1 => Ok(count),
        Some(_) => Err(Error::Validation(format!(
            "reps {} must be a whole number of at least 1",
            value.unwrap_or(&Value::Null)
        ))),
        None => Err(Error::Validation("reps must be a whole number".into())),
    }
}

fn parse_weight(value: Option<&Value>) -> Result<f64> {
    match as_number(value) {
        Some(weight) if weight >= 1.0 => Ok(weight),
        Some(weight) => Err(Error::Validation(format!("weight {} must be at least 1", weight))),
        None => Err(Error::Validation("weight must be a number".into())),
    }
}
