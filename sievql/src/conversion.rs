use crate::ast::{FilterMap, FilterValue};
use crate::error::CompileError;
use serde_json::Value;

impl TryFrom<Value> for FilterValue {
    type Error = CompileError;

    fn try_from(value: Value) -> Result<Self, Self::Error> {
        match value {
            Value::String(s) => Ok(FilterValue::Scalar(s)),
            // Query-string decoding would have produced strings; accept
            // typed JSON scalars by stringifying them the same way.
            Value::Number(n) => Ok(FilterValue::Scalar(n.to_string())),
            Value::Bool(b) => Ok(FilterValue::Scalar(b.to_string())),
            Value::Object(map) => {
                let mut filters = FilterMap::new();
                for (key, value) in map {
                    filters.insert(key, FilterValue::try_from(value)?);
                }
                Ok(FilterValue::Nested(filters))
            }
            other => Err(CompileError::InvalidPayload(other.to_string())),
        }
    }
}

/// Convert a decoded JSON object into a filter payload.
pub fn filter_map_from_json(value: Value) -> Result<FilterMap, CompileError> {
    match FilterValue::try_from(value)? {
        FilterValue::Nested(filters) => Ok(filters),
        FilterValue::Scalar(scalar) => Err(CompileError::InvalidPayload(scalar)),
    }
}
