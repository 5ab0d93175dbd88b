//! Type-directed coercion of raw filter values into typed literals.

use crate::ast::{FilterOperator, Literal, Operands};
use crate::error::CompileError;
use crate::schema::FieldType;
use chrono::{NaiveDate, NaiveDateTime, NaiveTime};

/// Coerce a raw scalar into one or more typed literals. A comma splits the
/// value into a list whose elements are coerced independently, in order.
pub fn coerce(raw: &str, field_type: FieldType, operator: Option<FilterOperator>) -> Result<Operands, CompileError> {
    if raw.contains(',') {
        let literals = raw.split(',').map(|part| coerce_scalar(part, field_type, operator)).collect::<Result<Vec<_>, _>>()?;
        Ok(Operands::List(literals))
    } else {
        Ok(Operands::Single(coerce_scalar(raw, field_type, operator)?))
    }
}

fn coerce_scalar(raw: &str, field_type: FieldType, operator: Option<FilterOperator>) -> Result<Literal, CompileError> {
    if field_type.is_numeric() {
        return Ok(Literal::Integer(truncating_parse(raw)));
    }

    // Null checks ignore their operand, so a temporal field filtered with
    // `isnull` must not force a date parse of whatever value tagged along.
    if field_type.is_temporal() && !matches!(operator, Some(FilterOperator::IsNull | FilterOperator::IsNotNull)) {
        return Ok(Literal::Timestamp(parse_timestamp(raw)?));
    }

    Ok(match operator {
        Some(FilterOperator::Like) => Literal::String(format!("%{}%", raw.to_lowercase())),
        _ => Literal::String(raw.trim().to_owned()),
    })
}

/// Parse the leading integer of a string: optional sign, then digits.
/// Trailing garbage truncates and fully non-numeric input yields 0, the
/// casting semantics request inputs have always had here.
fn truncating_parse(raw: &str) -> i64 {
    let mut chars = raw.trim().chars().peekable();
    let mut negative = false;

    if let Some(&c) = chars.peek() {
        if c == '+' || c == '-' {
            negative = c == '-';
            chars.next();
        }
    }

    let mut value: i64 = 0;
    for c in chars {
        let Some(digit) = c.to_digit(10) else { break };
        value = value.saturating_mul(10).saturating_add(digit as i64);
    }

    if negative {
        -value
    } else {
        value
    }
}

/// Parse a calendar value in the shapes request inputs arrive in: RFC 3339,
/// then `YYYY-MM-DD HH:MM:SS`, then a bare date at midnight.
pub fn parse_timestamp(raw: &str) -> Result<NaiveDateTime, CompileError> {
    let trimmed = raw.trim();

    if let Ok(dt) = chrono::DateTime::parse_from_rfc3339(trimmed) {
        return Ok(dt.naive_utc());
    }
    if let Ok(dt) = NaiveDateTime::parse_from_str(trimmed, "%Y-%m-%d %H:%M:%S") {
        return Ok(dt);
    }
    match NaiveDate::parse_from_str(trimmed, "%Y-%m-%d") {
        Ok(date) => Ok(date.and_time(NaiveTime::MIN)),
        Err(source) => Err(CompileError::InvalidTimestamp { value: trimmed.to_owned(), source }),
    }
}
