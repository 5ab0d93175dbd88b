//! The metadata-collaborator contract: field and join descriptors, the
//! [`SchemaProvider`] trait the compiler consumes, and an in-memory
//! provider for callers whose metadata is static.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Storage type tag for a field, as declared by the metadata provider.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FieldType {
    Text,
    Integer,
    BigInt,
    Date,
    DateTime,
    Jsonb,
}

impl FieldType {
    pub fn is_numeric(&self) -> bool { matches!(self, FieldType::Integer | FieldType::BigInt) }

    pub fn is_temporal(&self) -> bool { matches!(self, FieldType::Date | FieldType::DateTime) }
}

/// A filterable field: its storage type and resolved column name, which may
/// differ from the logical name used in filter keys.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldDescriptor {
    pub field_type: FieldType,
    pub column: String,
}

/// A declared relationship join, keyed by relationship name.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JoinDescriptor {
    /// Entity the relationship points at.
    pub target: String,
    /// Join condition expression, e.g. `performances.artist = artist.id`.
    pub condition: String,
}

/// Entity metadata lookups, resolved per name. Unknown names yield `None`,
/// never an error; the compiler decides whether absence drops the filter
/// (lenient mode) or rejects the compile (strict mode).
pub trait SchemaProvider {
    fn field(&self, entity: &str, name: &str) -> Option<FieldDescriptor>;
    fn join(&self, entity: &str, relation: &str) -> Option<JoinDescriptor>;
    fn alias(&self, entity: &str) -> Option<String>;
}

/// A [`SchemaProvider`] backed by registered maps.
#[derive(Debug, Clone, Default)]
pub struct StaticSchema {
    entities: HashMap<String, EntityDescriptor>,
}

#[derive(Debug, Clone, Default)]
struct EntityDescriptor {
    alias: String,
    fields: HashMap<String, FieldDescriptor>,
    joins: HashMap<String, JoinDescriptor>,
}

impl StaticSchema {
    pub fn new() -> Self { Self::default() }

    /// Register an entity and describe its fields and joins.
    pub fn entity(&mut self, name: impl Into<String>, alias: impl Into<String>) -> EntityBuilder<'_> {
        let descriptor = self.entities.entry(name.into()).or_default();
        descriptor.alias = alias.into();
        EntityBuilder { descriptor }
    }
}

/// Fluent registration handle returned by [`StaticSchema::entity`].
pub struct EntityBuilder<'a> {
    descriptor: &'a mut EntityDescriptor,
}

impl EntityBuilder<'_> {
    /// Declare a field whose column name matches its logical name.
    pub fn field(self, name: impl Into<String>, field_type: FieldType) -> Self {
        let name = name.into();
        let column = name.clone();
        self.field_as(name, field_type, column)
    }

    /// Declare a field with an explicit resolved column name.
    pub fn field_as(self, name: impl Into<String>, field_type: FieldType, column: impl Into<String>) -> Self {
        self.descriptor.fields.insert(name.into(), FieldDescriptor { field_type, column: column.into() });
        self
    }

    /// Declare a relationship join.
    pub fn join(self, relation: impl Into<String>, target: impl Into<String>, condition: impl Into<String>) -> Self {
        self.descriptor.joins.insert(relation.into(), JoinDescriptor { target: target.into(), condition: condition.into() });
        self
    }
}

impl SchemaProvider for StaticSchema {
    fn field(&self, entity: &str, name: &str) -> Option<FieldDescriptor> { self.entities.get(entity)?.fields.get(name).cloned() }

    fn join(&self, entity: &str, relation: &str) -> Option<JoinDescriptor> { self.entities.get(entity)?.joins.get(relation).cloned() }

    fn alias(&self, entity: &str) -> Option<String> { Some(self.entities.get(entity)?.alias.clone()) }
}
