use crate::ast::FilterOperator;
use thiserror::Error;

/// Errors surfaced while compiling a filter payload.
///
/// In lenient mode (the default) unknown names are dropped rather than
/// reported, so only shape mismatches and coercion failures reach the
/// caller; strict mode additionally reports the `Unknown*` variants.
#[derive(Debug, Error)]
pub enum CompileError {
    #[error("unknown entity: {0}")]
    UnknownEntity(String),
    #[error("unknown field {field:?} on entity {entity:?}")]
    UnknownField { entity: String, field: String },
    #[error("unknown relationship {relation:?} on entity {entity:?}")]
    UnknownRelationship { entity: String, relation: String },
    #[error("field {field:?} does not support nested paths")]
    InvalidJsonPath { field: String },
    #[error("operator {operator} expects {expected}, got {got} operand(s)")]
    InvalidOperandCount { operator: FilterOperator, expected: &'static str, got: usize },
    #[error("operator {0} is declared but has no predicate form")]
    UnsupportedOperator(FilterOperator),
    #[error("invalid timestamp {value:?}: {source}")]
    InvalidTimestamp { value: String, source: chrono::ParseError },
    #[error("filter payload is not an object: {0}")]
    InvalidPayload(String),
}

/// Errors surfaced while rendering compiled predicates as SQL text.
#[derive(Debug, Error)]
pub enum SqlGenerationError {
    #[error("unsupported operator: {0}")]
    UnsupportedOperator(FilterOperator),
    #[error("operator {operator} expects {expected}, got {got} operand(s)")]
    InvalidOperands { operator: FilterOperator, expected: &'static str, got: usize },
}
