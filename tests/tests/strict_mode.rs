use common::*;

use anyhow::Result;
use sievql::conversion::filter_map_from_json;
use sievql::{CompileError, FilterCompiler};
use serde_json::json;

#[test]
fn strict_mode_rejects_unknown_fields() {
    let schema = concert_schema();
    let err = FilterCompiler::new(&schema).strict().compile("artist", &filters(&[("unknownField", "x")])).unwrap_err();

    assert!(matches!(err, CompileError::UnknownField { ref field, .. } if field == "unknownField"));
}

#[test]
fn strict_mode_rejects_undeclared_relationships() -> Result<()> {
    let schema = concert_schema();
    let filters = filter_map_from_json(json!({ "managers": { "name": "Saul" } }))?;
    let err = FilterCompiler::new(&schema).strict().compile("artist", &filters).unwrap_err();

    assert!(matches!(err, CompileError::UnknownRelationship { ref relation, .. } if relation == "managers"));
    Ok(())
}

#[test]
fn strict_mode_rejects_dotted_paths_on_flat_columns() {
    let schema = concert_schema();
    let err = FilterCompiler::new(&schema).strict().compile("artist", &filters(&[("name.first", "Bob")])).unwrap_err();

    assert!(matches!(err, CompileError::InvalidJsonPath { ref field } if field == "name"));
}

#[test]
fn strict_mode_accepts_declared_names() -> Result<()> {
    let schema = concert_schema();
    let filters = filter_map_from_json(json!({
        "name": "Bob",
        "performances": { "venue": "Arena" },
    }))?;

    let compiled = FilterCompiler::new(&schema).strict().compile("artist", &filters)?;
    assert_eq!(compiled.joins.len(), 1);
    assert_eq!(compiled.predicates.len(), 2);
    Ok(())
}

#[test]
fn strict_mode_tolerates_scalar_valued_relationship_keys() -> Result<()> {
    // `performances` is a declared relationship, not a field; a scalar
    // entry under that key registers the join and filters nothing.
    let schema = concert_schema();
    let compiled = FilterCompiler::new(&schema).strict().compile("artist", &filters(&[("performances", "anything")]))?;

    assert_eq!(compiled.joins.len(), 1);
    assert!(compiled.predicates.is_empty());
    Ok(())
}
