use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// One entry of a filter payload: either a scalar comparison value or a
/// nested set of filters scoped to a relationship.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FilterValue {
    Scalar(String),
    Nested(FilterMap),
}

/// A filter payload, as decoded from request query parameters.
pub type FilterMap = BTreeMap<String, FilterValue>;

impl From<&str> for FilterValue {
    fn from(value: &str) -> Self { FilterValue::Scalar(value.to_owned()) }
}

impl From<String> for FilterValue {
    fn from(value: String) -> Self { FilterValue::Scalar(value) }
}

impl From<FilterMap> for FilterValue {
    fn from(value: FilterMap) -> Self { FilterValue::Nested(value) }
}

/// The operator catalog. `StartsWith`, `EndsWith`, and `Sort` are declared
/// but have no predicate form; dispatching on them is an explicit error,
/// never an `Equal` fallthrough.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FilterOperator {
    Equal,
    NotEqual,
    GreaterThan,
    GreaterThanOrEqual,
    LessThan,
    LessThanOrEqual,
    Between,
    Like,
    StartsWith,
    EndsWith,
    In,
    NotIn,
    IsNull,
    IsNotNull,
    Sort,
}

impl FilterOperator {
    /// Every operator in the catalog, in declaration order.
    pub const ALL: [FilterOperator; 15] = [
        FilterOperator::Equal,
        FilterOperator::NotEqual,
        FilterOperator::GreaterThan,
        FilterOperator::GreaterThanOrEqual,
        FilterOperator::LessThan,
        FilterOperator::LessThanOrEqual,
        FilterOperator::Between,
        FilterOperator::Like,
        FilterOperator::StartsWith,
        FilterOperator::EndsWith,
        FilterOperator::In,
        FilterOperator::NotIn,
        FilterOperator::IsNull,
        FilterOperator::IsNotNull,
        FilterOperator::Sort,
    ];

    /// Canonical suffix token, as written after `|` in a filter key.
    pub fn token(&self) -> &'static str {
        match self {
            FilterOperator::Equal => "eq",
            FilterOperator::NotEqual => "neq",
            FilterOperator::GreaterThan => "gt",
            FilterOperator::GreaterThanOrEqual => "gte",
            FilterOperator::LessThan => "lt",
            FilterOperator::LessThanOrEqual => "lte",
            FilterOperator::Between => "between",
            FilterOperator::Like => "like",
            FilterOperator::StartsWith => "startswith",
            FilterOperator::EndsWith => "endswith",
            FilterOperator::In => "in",
            FilterOperator::NotIn => "notin",
            FilterOperator::IsNull => "isnull",
            FilterOperator::IsNotNull => "isnotnull",
            FilterOperator::Sort => "sort",
        }
    }
}

impl std::fmt::Display for FilterOperator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result { f.write_str(self.token()) }
}

/// A coerced operand literal.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Literal {
    String(String),
    Integer(i64),
    Timestamp(NaiveDateTime),
}

/// Operand shape attached to a predicate. Coercion produces `Single` or
/// `List`; the null-check operators carry `None`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Operands {
    None,
    Single(Literal),
    List(Vec<Literal>),
}

impl Operands {
    pub fn len(&self) -> usize {
        match self {
            Operands::None => 0,
            Operands::Single(_) => 1,
            Operands::List(literals) => literals.len(),
        }
    }

    pub fn is_empty(&self) -> bool { self.len() == 0 }
}

/// The left-hand expression a predicate binds to.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Target {
    /// A plain `alias.column` reference.
    Column { alias: String, column: String },
    /// A nested extraction into a semi-structured column. `path` holds the
    /// field keys below `column` and is non-empty by construction;
    /// single-segment JSON columns use `Column` directly.
    JsonPath { alias: String, column: String, path: Vec<String> },
}

impl Target {
    pub fn column(alias: impl Into<String>, column: impl Into<String>) -> Self {
        Target::Column { alias: alias.into(), column: column.into() }
    }
}

/// One emitted comparison clause. All predicates of a compiled filter are
/// combined as a conjunction; there is no OR or precedence grouping.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Predicate {
    pub target: Target,
    pub operator: FilterOperator,
    pub operands: Operands,
}

/// A registered relationship join. The relation name doubles as the join
/// alias for predicates scoped below it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Join {
    pub relation: String,
    pub target: String,
    pub condition: String,
}

/// The accumulator for one compilation pass: an ordered set of joins plus a
/// predicate conjunction. Built up by the walk and returned by value; the
/// caller hands it to the query engine or discards it wholesale on error.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CompiledFilter {
    pub joins: Vec<Join>,
    pub predicates: Vec<Predicate>,
}

impl CompiledFilter {
    pub fn is_empty(&self) -> bool { self.joins.is_empty() && self.predicates.is_empty() }

    /// Register a join. Registering the same relation twice is a no-op.
    pub fn add_join(&mut self, join: Join) {
        if !self.joins.iter().any(|existing| existing.relation == join.relation) {
            self.joins.push(join);
        }
    }

    pub fn push(&mut self, predicate: Predicate) { self.predicates.push(predicate); }

    /// Fold another accumulator into this one, keeping join registration
    /// idempotent.
    pub fn merge(&mut self, other: CompiledFilter) {
        for join in other.joins {
            self.add_join(join);
        }
        self.predicates.extend(other.predicates);
    }
}
