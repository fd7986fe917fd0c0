//! Normalization of loosely typed form values.
//!
//! HTML forms submit checkboxes as `"1"`, `"on"`, `"true"` or nothing at all, while
//! JSON clients send real booleans. Payload structs use [`form_bool`] so the rest of
//! the code only ever sees `bool`.

use chrono::NaiveDate;
use serde::{Deserialize, Deserializer};

use crate::AppError;

#[derive(Deserialize)]
#[serde(untagged)]
enum RawFormBool {
    Bool(bool),
    Int(i64),
    Text(String),
}

/// Interpret a form string as a boolean.
///
/// `1`, `true`, `on` and `yes` (any case, surrounding whitespace ignored) are true;
/// everything else, including the empty string, is false.
pub fn parse_form_bool(value: &str) -> bool {
    matches!(
        value.trim().to_ascii_lowercase().as_str(),
        "1" | "true" | "on" | "yes"
    )
}

/// Serde adapter for boolean form fields. Pair with `#[serde(default)]`.
pub fn form_bool<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<RawFormBool>::deserialize(deserializer)?;
    Ok(match raw {
        None => false,
        Some(RawFormBool::Bool(b)) => b,
        Some(RawFormBool::Int(i)) => i != 0,
        Some(RawFormBool::Text(s)) => parse_form_bool(&s),
    })
}

/// Parse an optional `YYYY-MM-DD` form date.
///
/// `None` or an empty string yields `Ok(None)`, meaning "leave unchanged".
pub fn parse_form_date(value: Option<&str>) -> Result<Option<NaiveDate>, AppError> {
    match value.map(str::trim) {
        None | Some("") => Ok(None),
        Some(raw) => NaiveDate::parse_from_str(raw, "%Y-%m-%d")
            .map(Some)
            .map_err(|_| AppError::InvalidInput(format!("Invalid date format: {}", raw))),
    }
}

/// Drop blank entries from a submitted id list and parse the rest.
pub fn parse_id_list(values: &[String]) -> Result<Vec<uuid::Uuid>, AppError> {
    values
        .iter()
        .map(|v| v.trim())
        .filter(|v| !v.is_empty())
        .map(|v| {
            uuid::Uuid::parse_str(v)
                .map_err(|e| AppError::InvalidInput(format!("Invalid id '{}': {}", v, e)))
        })
        .collect()
}
