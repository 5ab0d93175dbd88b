//! sievql compiles flat, string-keyed filter payloads — the shape produced
//! by decoding request query parameters — into joins and predicate clauses
//! against a relational entity graph.
//!
//! Filter keys carry an optional operator suffix (`age|gte`) and may dot
//! into semi-structured columns (`attributes.label.city`); nested payload
//! objects are sub-filters across declared relationships. Entity metadata
//! comes from a [`SchemaProvider`]; the compiled output is an ordered join
//! set plus a predicate conjunction, renderable as SQL text via [`sql`].
//!
//! ```
//! use sievql::{FieldType, FilterCompiler, StaticSchema};
//!
//! let mut schema = StaticSchema::new();
//! schema
//!     .entity("artist", "artist")
//!     .field("id", FieldType::Integer)
//!     .field("name", FieldType::Text)
//!     .join("performances", "performance", "performances.artist = artist.id");
//! schema.entity("performance", "performance").field("venue", FieldType::Text);
//!
//! let filters = sievql::conversion::filter_map_from_json(serde_json::json!({
//!     "name": "Bob",
//!     "performances": { "venue|like": "Arena" },
//! }))?;
//!
//! let compiled = FilterCompiler::new(&schema).compile("artist", &filters)?;
//! assert_eq!(compiled.joins.len(), 1);
//! assert_eq!(
//!     sievql::sql::where_clause_sql(&compiled)?,
//!     "artist.name = 'Bob' AND LOWER(performances.venue) LIKE '%arena%'"
//! );
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub mod ast;
pub mod coerce;
pub mod compile;
pub mod conversion;
pub mod error;
pub mod parser;
pub mod schema;
pub mod sql;

pub use ast::{CompiledFilter, FilterMap, FilterOperator, FilterValue, Join, Literal, Operands, Predicate, Target};
pub use compile::FilterCompiler;
pub use error::{CompileError, SqlGenerationError};
pub use schema::{FieldDescriptor, FieldType, JoinDescriptor, SchemaProvider, StaticSchema};
