//! Render compiled filters as SQL text clauses.
//!
//! The compiler has already shape-checked operands, so this module only
//! turns structure into text. It stays a separate pass so engines that
//! consume structured predicates never pay for string assembly.

use crate::ast::{CompiledFilter, FilterOperator, Join, Literal, Operands, Predicate, Target};
use crate::error::SqlGenerationError;

/// Render a single predicate clause.
pub fn predicate_sql(predicate: &Predicate) -> Result<String, SqlGenerationError> {
    let mut buffer = String::new();
    push_predicate(predicate, &mut buffer)?;
    Ok(buffer)
}

/// Render the predicate conjunction of a compiled filter, `AND`-joined.
pub fn where_clause_sql(compiled: &CompiledFilter) -> Result<String, SqlGenerationError> {
    let mut buffer = String::new();
    for (i, predicate) in compiled.predicates.iter().enumerate() {
        if i > 0 {
            buffer.push_str(" AND ");
        }
        push_predicate(predicate, &mut buffer)?;
    }
    Ok(buffer)
}

/// Render a join registration as a `JOIN target alias WITH condition` clause.
pub fn join_sql(join: &Join) -> String { format!("JOIN {} {} WITH {}", join.target, join.relation, join.condition) }

fn push_predicate(predicate: &Predicate, buffer: &mut String) -> Result<(), SqlGenerationError> {
    use FilterOperator::*;

    let operator = predicate.operator;
    match operator {
        Equal | NotEqual | GreaterThan | GreaterThanOrEqual | LessThan | LessThanOrEqual => {
            let literal = single_operand(predicate)?;
            push_target(&predicate.target, buffer);
            buffer.push(' ');
            buffer.push_str(comparison_op_to_sql(operator)?);
            buffer.push(' ');
            push_literal(literal, buffer);
        }
        In | NotIn => {
            let literals = list_operands(predicate)?;
            push_target(&predicate.target, buffer);
            buffer.push(' ');
            buffer.push_str(comparison_op_to_sql(operator)?);
            buffer.push_str(" (");
            for (i, literal) in literals.iter().enumerate() {
                if i > 0 {
                    buffer.push_str(", ");
                }
                push_literal(literal, buffer);
            }
            buffer.push(')');
        }
        IsNull => {
            push_target(&predicate.target, buffer);
            buffer.push_str(" IS NULL");
        }
        IsNotNull => {
            push_target(&predicate.target, buffer);
            buffer.push_str(" IS NOT NULL");
        }
        Like => {
            // Case-insensitive containment: the operand was lowercased and
            // wildcarded during coercion, the column is lowered here.
            let literal = single_operand(predicate)?;
            buffer.push_str("LOWER(");
            push_target(&predicate.target, buffer);
            buffer.push_str(") LIKE ");
            push_literal(literal, buffer);
        }
        Between => {
            let literals = list_operands(predicate)?;
            if literals.len() != 2 {
                return Err(SqlGenerationError::InvalidOperands { operator, expected: "2", got: literals.len() });
            }
            push_target(&predicate.target, buffer);
            buffer.push_str(" BETWEEN ");
            push_quoted_literal(&literals[0], buffer);
            buffer.push_str(" AND ");
            push_quoted_literal(&literals[1], buffer);
        }
        StartsWith | EndsWith | Sort => return Err(SqlGenerationError::UnsupportedOperator(operator)),
    }

    Ok(())
}

fn comparison_op_to_sql(operator: FilterOperator) -> Result<&'static str, SqlGenerationError> {
    use FilterOperator::*;

    Ok(match operator {
        Equal => "=",
        NotEqual => "<>",
        GreaterThan => ">",
        GreaterThanOrEqual => ">=",
        LessThan => "<",
        LessThanOrEqual => "<=",
        In => "IN",
        NotIn => "NOT IN",
        Like => "LIKE",
        Between => "BETWEEN",
        IsNull | IsNotNull | StartsWith | EndsWith | Sort => return Err(SqlGenerationError::UnsupportedOperator(operator)),
    })
}

fn single_operand(predicate: &Predicate) -> Result<&Literal, SqlGenerationError> {
    match &predicate.operands {
        Operands::Single(literal) => Ok(literal),
        other => Err(SqlGenerationError::InvalidOperands { operator: predicate.operator, expected: "1", got: other.len() }),
    }
}

fn list_operands(predicate: &Predicate) -> Result<&[Literal], SqlGenerationError> {
    match &predicate.operands {
        Operands::List(literals) => Ok(literals),
        other => Err(SqlGenerationError::InvalidOperands { operator: predicate.operator, expected: "a list", got: other.len() }),
    }
}

fn push_target(target: &Target, buffer: &mut String) {
    match target {
        Target::Column { alias, column } => {
            buffer.push_str(alias);
            buffer.push('.');
            buffer.push_str(column);
        }
        Target::JsonPath { alias, column, path } => {
            // Fold the trailing segments into nested extractions; only the
            // final fold produces a comparable text scalar.
            let mut expr = format!("{}.{}", alias, column);
            for (i, segment) in path.iter().enumerate() {
                let getter = if i == path.len() - 1 { "JSON_GET_FIELD_AS_TEXT" } else { "JSON_GET_FIELD" };
                expr = format!("{}({}, '{}')", getter, expr, segment);
            }
            buffer.push_str(&expr);
        }
    }
}

fn push_literal(literal: &Literal, buffer: &mut String) {
    match literal {
        Literal::Integer(i) => buffer.push_str(&i.to_string()),
        Literal::String(s) => push_quoted_str(s, buffer),
        Literal::Timestamp(ts) => {
            buffer.push('\'');
            buffer.push_str(&ts.format("%Y-%m-%d %H:%M:%S").to_string());
            buffer.push('\'');
        }
    }
}

/// BETWEEN bounds are always rendered as quoted literals, whatever their
/// coerced type.
fn push_quoted_literal(literal: &Literal, buffer: &mut String) {
    match literal {
        Literal::Integer(i) => {
            buffer.push('\'');
            buffer.push_str(&i.to_string());
            buffer.push('\'');
        }
        other => push_literal(other, buffer),
    }
}

fn push_quoted_str(s: &str, buffer: &mut String) {
    buffer.push('\'');
    for c in s.chars() {
        match c {
            '\'' => buffer.push_str("''"),
            // Null bytes can truncate strings in C-based drivers; drop them.
            '\0' => continue,
            _ => buffer.push(c),
        }
    }
    buffer.push('\'');
}
