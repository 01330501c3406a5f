//! Field-level validation primitives.
//!
//! Checks come in two flavours: typed (`check_*`, for values already parsed
//! into Rust types) and raw (`positive_integer`, `non_empty_string`, ...) for
//! untyped JSON input coming across the boundary. Both report a
//! [`FieldViolation`] naming the offending field, and [`Validator`] collects
//! them so a caller sees every problem at once instead of only the first.

use core::fmt;

use serde::Serialize;
use serde_json::Value;

/// A single violated rule on a named field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldViolation {
    pub field: String,
    pub message: String,
}

impl FieldViolation {
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

impl fmt::Display for FieldViolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

/// Every rule a candidate violated, in field order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ValidationFailure {
    violations: Vec<FieldViolation>,
}

impl ValidationFailure {
    pub fn violations(&self) -> &[FieldViolation] {
        &self.violations
    }

    /// First violation reported for `field`, if any.
    pub fn field(&self, field: &str) -> Option<&FieldViolation> {
        self.violations.iter().find(|v| v.field == field)
    }

    pub fn is_empty(&self) -> bool {
        self.violations.is_empty()
    }
}

impl From<FieldViolation> for ValidationFailure {
    fn from(value: FieldViolation) -> Self {
        Self {
            violations: vec![value],
        }
    }
}

impl From<Vec<FieldViolation>> for ValidationFailure {
    fn from(violations: Vec<FieldViolation>) -> Self {
        Self { violations }
    }
}

impl fmt::Display for ValidationFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, v) in self.violations.iter().enumerate() {
            if i > 0 {
                f.write_str("; ")?;
            }
            fmt::Display::fmt(v, f)?;
        }
        Ok(())
    }
}

/// Accumulates violations across several field checks.
#[derive(Debug, Default)]
pub struct Validator {
    violations: Vec<FieldViolation>,
}

impl Validator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record the violation (if any) and hand back the checked value.
    pub fn check<T>(&mut self, result: Result<T, FieldViolation>) -> Option<T> {
        match result {
            Ok(value) => Some(value),
            Err(violation) => {
                self.violations.push(violation);
                None
            }
        }
    }

    pub fn reject(&mut self, violation: FieldViolation) {
        self.violations.push(violation);
    }

    pub fn into_failure(self) -> ValidationFailure {
        ValidationFailure::from(self.violations)
    }

    pub fn finish(self) -> Result<(), ValidationFailure> {
        if self.violations.is_empty() {
            Ok(())
        } else {
            Err(ValidationFailure::from(self.violations))
        }
    }
}

pub fn check_positive_integer(field: &str, value: i64) -> Result<u64, FieldViolation> {
    if value <= 0 {
        return Err(FieldViolation::new(field, "must be a positive integer"));
    }
    Ok(value as u64)
}

pub fn check_non_negative_integer(field: &str, value: i64) -> Result<u64, FieldViolation> {
    if value < 0 {
        return Err(FieldViolation::new(field, "must be a non-negative integer"));
    }
    Ok(value as u64)
}

pub fn check_non_negative_number(field: &str, value: f64) -> Result<f64, FieldViolation> {
    if !value.is_finite() {
        return Err(FieldViolation::new(field, "must be a finite number"));
    }
    if value < 0.0 {
        return Err(FieldViolation::new(field, "must be a non-negative number"));
    }
    Ok(value)
}

/// Trims `value`; blank strings are rejected.
pub fn check_non_empty(field: &str, value: &str) -> Result<String, FieldViolation> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(FieldViolation::new(field, "cannot be empty"));
    }
    Ok(trimmed.to_string())
}

pub fn positive_integer(field: &str, value: Option<&Value>) -> Result<u64, FieldViolation> {
    let raw = integer(field, value, "must be a positive integer")?;
    check_positive_integer(field, raw)
}

pub fn non_negative_integer(field: &str, value: Option<&Value>) -> Result<u64, FieldViolation> {
    let raw = integer(field, value, "must be a non-negative integer")?;
    check_non_negative_integer(field, raw)
}

pub fn non_negative_number(field: &str, value: Option<&Value>) -> Result<f64, FieldViolation> {
    let raw = number(field, value, "must be a non-negative number")?;
    check_non_negative_number(field, raw)
}

pub fn non_empty_string(field: &str, value: Option<&Value>) -> Result<String, FieldViolation> {
    match value {
        None | Some(Value::Null) => Err(FieldViolation::new(field, "is required")),
        Some(Value::String(s)) => check_non_empty(field, s),
        Some(_) => Err(FieldViolation::new(field, "must be a string")),
    }
}

fn number(field: &str, value: Option<&Value>, expected: &str) -> Result<f64, FieldViolation> {
    match value {
        None | Some(Value::Null) => Err(FieldViolation::new(field, "is required")),
        Some(Value::Number(n)) => n
            .as_f64()
            .ok_or_else(|| FieldViolation::new(field, expected)),
        Some(_) => Err(FieldViolation::new(field, expected)),
    }
}

// Largest float that still represents every integer below it exactly.
const MAX_SAFE_INTEGER: f64 = 9_007_199_254_740_991.0;

fn integer(field: &str, value: Option<&Value>, expected: &str) -> Result<i64, FieldViolation> {
    if let Some(Value::Number(n)) = value {
        if let Some(i) = n.as_i64() {
            return Ok(i);
        }
        if n.as_u64().is_some() {
            return Err(FieldViolation::new(field, "is out of range"));
        }
    }

    let f = number(field, value, expected)?;
    if f.fract() != 0.0 {
        return Err(FieldViolation::new(field, "must be an integer"));
    }
    if f.abs() > MAX_SAFE_INTEGER {
        return Err(FieldViolation::new(field, "is out of range"));
    }
    Ok(f as i64)
}
