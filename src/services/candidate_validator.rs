use serde_json::Value;
use thiserror::Error;

use crate::models::location::{LocationCandidate, LocationCategory, RawCandidate};

#[derive(Debug, Error, PartialEq)]
pub enum CandidateRejected {
    #[error("missing required field `{0}`")]
    MissingField(&'static str),
    #[error("malformed location record: {0}")]
    Malformed(String),
}

/// Convert one untyped entry of the model's `locations` array into a
/// candidate.
pub fn validate_value(value: Value) -> Result<LocationCandidate, CandidateRejected> {
    let raw: RawCandidate =
        serde_json::from_value(value).map_err(|e| CandidateRejected::Malformed(e.to_string()))?;
    validate(raw)
}

/// Check that all four fields are present. Unknown or non-string categories
/// are coerced to `other` rather than rejected.
pub fn validate(raw: RawCandidate) -> Result<LocationCandidate, CandidateRejected> {
    let name = raw.name.ok_or(CandidateRejected::MissingField("name"))?;
    let description = raw
        .description
        .ok_or(CandidateRejected::MissingField("description"))?;
    let category = match raw.category {
        Some(Value::String(label)) => LocationCategory::from_label(&label),
        Some(_) => LocationCategory::Other,
        None => return Err(CandidateRejected::MissingField("category")),
    };
    let address = raw.address.ok_or(CandidateRejected::MissingField("address"))?;

    Ok(LocationCandidate {
        name,
        description,
        category,
        address,
    })
}
