//! Feature vector assembly.
//!
//! Maps loosely-typed input records into the fixed-order 12-dimensional
//! vector the classifier and scaler were fit against. The HTTP path accepts
//! a named JSON object and substitutes defaults for optional fields; the CLI
//! path accepts a positional JSON array and requires all 12 values.

use serde_json::Value;

/// Canonical feature order. The scaler and classifier were fit against this
/// exact ordering; reordering silently corrupts predictions.
pub const FEATURE_NAMES: [&str; 12] = [
    "age", "sex", "trestbps", "chol", "fbs", "restecg", "thalach", "exang", "oldpeak", "slope",
    "ca", "thal",
];

/// Number of features in the canonical vector.
pub const FEATURE_COUNT: usize = 12;

/// Default maximum heart rate when `thalach` is absent.
pub const THALACH_DEFAULT: f64 = 150.0;

/// Defaults for optional fields, indexed to match [`FEATURE_NAMES`].
/// `None` marks a required field.
const FIELD_DEFAULTS: [Option<f64>; 12] = [
    None,                  // age
    None,                  // sex
    None,                  // trestbps
    None,                  // chol
    Some(0.0),             // fbs
    Some(0.0),             // restecg
    Some(THALACH_DEFAULT), // thalach
    Some(0.0),             // exang
    Some(0.0),             // oldpeak
    Some(0.0),             // slope
    Some(0.0),             // ca
    Some(0.0),             // thal
];

#[derive(Debug, thiserror::Error)]
pub enum VectorizeError {
    #[error("missing required field: {0}")]
    MissingField(&'static str),

    #[error("field {field} is not numeric: {value}")]
    NotNumeric { field: String, value: String },

    #[error("expected {FEATURE_COUNT} feature values, got {0}")]
    WrongLength(usize),
}

/// Coerce a JSON value to f64 the way the transport contracts allow:
/// numbers pass through, numeric strings are parsed, booleans map to 0/1.
fn coerce(field: &str, value: &Value) -> Result<f64, VectorizeError> {
    match value {
        Value::Number(n) => n.as_f64().ok_or_else(|| VectorizeError::NotNumeric {
            field: field.to_string(),
            value: n.to_string(),
        }),
        Value::String(s) => s.trim().parse::<f64>().map_err(|_| VectorizeError::NotNumeric {
            field: field.to_string(),
            value: s.clone(),
        }),
        Value::Bool(b) => Ok(if *b { 1.0 } else { 0.0 }),
        other => Err(VectorizeError::NotNumeric {
            field: field.to_string(),
            value: other.to_string(),
        }),
    }
}

/// Build the canonical vector from a named JSON object (HTTP path).
///
/// Required fields must be present and coercible; optional fields fall back
/// to their documented defaults when absent or null.
pub fn vectorize_named(record: &serde_json::Map<String, Value>) -> Result<[f64; FEATURE_COUNT], VectorizeError> {
    let mut vector = [0.0; FEATURE_COUNT];
    for (i, (&name, default)) in FEATURE_NAMES.iter().zip(FIELD_DEFAULTS).enumerate() {
        vector[i] = match record.get(name) {
            Some(Value::Null) | None => default.ok_or(VectorizeError::MissingField(FEATURE_NAMES[i]))?,
            Some(value) => coerce(name, value)?,
        };
    }
    Ok(vector)
}

/// Build the canonical vector from a positional JSON array (CLI path).
///
/// The caller supplies all 12 values in canonical order; no defaulting.
pub fn vectorize_positional(values: &[Value]) -> Result<[f64; FEATURE_COUNT], VectorizeError> {
    if values.len() != FEATURE_COUNT {
        return Err(VectorizeError::WrongLength(values.len()));
    }
    let mut vector = [0.0; FEATURE_COUNT];
    for (i, value) in values.iter().enumerate() {
        vector[i] = coerce(FEATURE_NAMES[i], value)?;
    }
    Ok(vector)
}
