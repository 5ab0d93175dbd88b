//! Filter-key parsing: `path.segment.column|operator` into a [`ParsedKey`].

use crate::ast::FilterOperator;

/// The decomposed form of a raw filter key.
#[derive(Debug, Clone, PartialEq)]
pub struct ParsedKey {
    /// Dot-separated name segments. The first names the field on the target
    /// entity; any trailing segments descend into a semi-structured column.
    pub segments: Vec<String>,
    /// Operator suffix, when one was recognized after `|`.
    pub operator: Option<FilterOperator>,
}

impl ParsedKey {
    /// The field name this key resolves against.
    pub fn field(&self) -> &str { self.segments.first().map(String::as_str).unwrap_or_default() }

    /// Path segments below the field, for semi-structured columns.
    pub fn json_path(&self) -> &[String] { self.segments.get(1..).unwrap_or_default() }
}

/// Split a raw filter key into name segments and an optional operator
/// suffix. Pure function of the key string; an unrecognized operator token
/// yields `operator: None` rather than an error.
pub fn parse_key(raw: &str) -> ParsedKey {
    let mut segments: Vec<String> = raw.split('.').map(str::to_owned).collect();
    let mut operator = None;

    if let Some(last) = segments.last_mut() {
        // Everything after the first `|` is the operator token.
        if let Some(bar) = last.find('|') {
            operator = parse_operator(&last[bar + 1..]);
            last.truncate(bar);
        }
    }

    for segment in &mut segments {
        *segment = segment.trim().to_owned();
    }

    ParsedKey { segments, operator }
}

/// Map an operator token onto the catalog. Symbolic tokens match verbatim;
/// word tokens are case- and separator-insensitive, so `isNull`, `is_null`,
/// and `Is Null` all resolve to [`FilterOperator::IsNull`].
pub fn parse_operator(token: &str) -> Option<FilterOperator> {
    use FilterOperator::*;

    match token.trim() {
        "=" => return Some(Equal),
        "!=" | "<>" => return Some(NotEqual),
        ">" => return Some(GreaterThan),
        ">=" => return Some(GreaterThanOrEqual),
        "<" => return Some(LessThan),
        "<=" => return Some(LessThanOrEqual),
        _ => {}
    }

    let normalized: String = token.chars().filter(char::is_ascii_alphanumeric).collect::<String>().to_lowercase();

    match normalized.as_str() {
        "eq" => Some(Equal),
        "neq" => Some(NotEqual),
        "gt" => Some(GreaterThan),
        "gte" => Some(GreaterThanOrEqual),
        "lt" => Some(LessThan),
        "lte" => Some(LessThanOrEqual),
        "between" => Some(Between),
        "like" => Some(Like),
        "startswith" => Some(StartsWith),
        "endswith" => Some(EndsWith),
        "in" => Some(In),
        "notin" => Some(NotIn),
        "isnull" => Some(IsNull),
        "isnotnull" => Some(IsNotNull),
        "sort" => Some(Sort),
        _ => None,
    }
}
