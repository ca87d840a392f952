//! Sample files.
//!
//! A sample file is either a bare JSON array of integers, or an object whose
//! keys name columns of integers (select one with `column`).

use serde_json::Value;
use std::fs;
use std::path::Path;

use crate::error::{HostError, HostResult};

pub fn load_sample(path: &Path, column: Option<&str>) -> HostResult<Vec<i32>> {
    let data = fs::read_to_string(path)?;
    let json: Value = serde_json::from_str(&data)?;
    parse_sample(&json, column)
}

pub fn parse_sample(json: &Value, column: Option<&str>) -> HostResult<Vec<i32>> {
    let array = match (column, json) {
        (Some(name), Value::Object(columns)) => columns
            .get(name)
            .ok_or_else(|| HostError::Input(format!("column '{}' not found", name)))?,
        (Some(name), _) => {
            return Err(HostError::Input(format!(
                "expected a JSON object holding column '{}'",
                name
            )))
        }
        (None, Value::Array(_)) => json,
        (None, _) => {
            return Err(HostError::Input(
                "expected a JSON array of integers (or pass a column name)".to_string(),
            ))
        }
    };

    let items = array
        .as_array()
        .ok_or_else(|| HostError::Input(format!("expected an array, got {}", array)))?;

    items
        .iter()
        .map(|v| {
            v.as_i64()
                .and_then(|n| i32::try_from(n).ok())
                .ok_or_else(|| HostError::Input(format!("not a 32-bit integer: {}", v)))
        })
        .collect()
}
