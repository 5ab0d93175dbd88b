//! The filter compiler: walks a [`FilterMap`] against schema metadata,
//! registering joins for relationship sub-filters and accumulating
//! predicate clauses for terminal entries.

use crate::ast::{CompiledFilter, FilterMap, FilterOperator, FilterValue, Join, Operands, Predicate, Target};
use crate::coerce::coerce;
use crate::error::CompileError;
use crate::parser::parse_key;
use crate::schema::{FieldType, SchemaProvider};
use tracing::{debug, trace};

/// Compiles filter payloads against the entity graph described by a
/// [`SchemaProvider`].
///
/// Lenient by default: filters naming unknown fields or relationships
/// contribute nothing. [`strict`](Self::strict) upgrades those drops to
/// errors. Compilation is all-or-nothing; on error the caller discards the
/// partial accumulator.
pub struct FilterCompiler<'a, S: SchemaProvider> {
    schema: &'a S,
    strict: bool,
}

impl<'a, S: SchemaProvider> FilterCompiler<'a, S> {
    pub fn new(schema: &'a S) -> Self { Self { schema, strict: false } }

    /// Reject unknown fields and relationships instead of dropping them.
    pub fn strict(mut self) -> Self {
        self.strict = true;
        self
    }

    /// Compile a filter payload against the given root entity.
    pub fn compile(&self, entity: &str, filters: &FilterMap) -> Result<CompiledFilter, CompileError> {
        let alias = self.schema.alias(entity).ok_or_else(|| CompileError::UnknownEntity(entity.to_owned()))?;
        self.walk(entity, &alias, filters)
    }

    fn walk(&self, entity: &str, alias: &str, filters: &FilterMap) -> Result<CompiledFilter, CompileError> {
        let mut out = CompiledFilter::default();

        for (key, value) in filters {
            // A key can name a relationship independently of being a field.
            let relation = self.schema.join(entity, key);

            if let FilterValue::Scalar(raw) = value {
                match self.resolve_filter(entity, alias, key, raw) {
                    Ok(Some(predicate)) => {
                        trace!(?predicate, "emitting predicate");
                        out.push(predicate);
                    }
                    Ok(None) => {}
                    // A scalar entry naming a declared relationship is not a
                    // field miss; the join registration below covers it.
                    Err(CompileError::UnknownField { .. }) if relation.is_some() => {}
                    Err(e) => return Err(e),
                }
            }

            match relation {
                Some(join) => {
                    let target = join.target.clone();
                    out.add_join(Join { relation: key.clone(), target: join.target, condition: join.condition });
                    if let FilterValue::Nested(nested) = value {
                        out.merge(self.walk(&target, key, nested)?);
                    }
                }
                None => {
                    if let FilterValue::Nested(_) = value {
                        if self.strict {
                            return Err(CompileError::UnknownRelationship { entity: entity.to_owned(), relation: key.clone() });
                        }
                        debug!(entity, relation = %key, "dropping filter for undeclared relationship");
                    }
                }
            }
        }

        Ok(out)
    }

    /// Resolve one scalar filter entry against the target entity's field
    /// metadata. `Ok(None)` means lenient mode dropped the filter.
    fn resolve_filter(&self, entity: &str, alias: &str, key: &str, raw: &str) -> Result<Option<Predicate>, CompileError> {
        let parsed = parse_key(key);

        let Some(field) = self.schema.field(entity, parsed.field()) else {
            if self.strict {
                return Err(CompileError::UnknownField { entity: entity.to_owned(), field: parsed.field().to_owned() });
            }
            debug!(entity, field = %parsed.field(), "dropping filter for unknown field");
            return Ok(None);
        };

        let target = match (field.field_type, parsed.json_path()) {
            (_, []) => Target::Column { alias: alias.to_owned(), column: field.column },
            (FieldType::Jsonb, path) => Target::JsonPath { alias: alias.to_owned(), column: field.column, path: path.to_vec() },
            (_, path) => {
                // A dotted path only descends into semi-structured columns.
                if self.strict {
                    return Err(CompileError::InvalidJsonPath { field: parsed.field().to_owned() });
                }
                debug!(entity, field = %parsed.field(), ?path, "dropping dotted filter on a flat column");
                return Ok(None);
            }
        };

        let operands = coerce(raw, field.field_type, parsed.operator)?;
        let operator = parsed.operator.unwrap_or(match operands {
            Operands::List(_) => FilterOperator::In,
            _ => FilterOperator::Equal,
        });

        build_predicate(target, operator, operands).map(Some)
    }
}

/// Shape-check coerced operands and produce a predicate clause. The match is
/// exhaustive over the operator catalog, so a catalog addition without an
/// emission arm is a build error rather than a silent equality fallthrough.
pub fn build_predicate(target: Target, operator: FilterOperator, operands: Operands) -> Result<Predicate, CompileError> {
    use FilterOperator::*;

    let operands = match operator {
        Equal | NotEqual | GreaterThan | GreaterThanOrEqual | LessThan | LessThanOrEqual | Like => match operands {
            Operands::Single(literal) => Operands::Single(literal),
            other => return Err(CompileError::InvalidOperandCount { operator, expected: "1", got: other.len() }),
        },
        In | NotIn => match operands {
            Operands::List(literals) => Operands::List(literals),
            Operands::Single(literal) => Operands::List(vec![literal]),
            Operands::None => return Err(CompileError::InvalidOperandCount { operator, expected: "1 or more", got: 0 }),
        },
        Between => match operands {
            Operands::List(literals) if literals.len() == 2 => Operands::List(literals),
            other => return Err(CompileError::InvalidOperandCount { operator, expected: "2", got: other.len() }),
        },
        IsNull | IsNotNull => Operands::None,
        StartsWith | EndsWith | Sort => return Err(CompileError::UnsupportedOperator(operator)),
    };

    Ok(Predicate { target, operator, operands })
}
