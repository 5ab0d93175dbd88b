use common::*;

use anyhow::Result;
use sievql::conversion::filter_map_from_json;
use sievql::sql::where_clause_sql;
use sievql::{CompileError, FilterCompiler, FilterMap, FilterOperator};
use serde_json::json;

#[test]
fn empty_payloads_compile_to_nothing() -> Result<()> {
    let schema = concert_schema();
    let compiled = FilterCompiler::new(&schema).compile("artist", &FilterMap::new())?;
    assert!(compiled.is_empty());
    Ok(())
}

#[test]
fn between_with_wrong_arity_is_rejected() {
    let schema = concert_schema();
    let compiler = FilterCompiler::new(&schema);

    for (value, got) in [("1", 1), ("1,2,3", 3)] {
        let err = compiler.compile("artist", &filters(&[("id|between", value)])).unwrap_err();
        assert!(
            matches!(err, CompileError::InvalidOperandCount { operator: FilterOperator::Between, got: g, .. } if g == got),
            "value {value:?}"
        );
    }
}

#[test]
fn declared_but_unimplemented_operators_abort_the_compile() {
    let schema = concert_schema();
    let compiler = FilterCompiler::new(&schema);

    for key in ["name|startswith", "name|endswith", "name|sort"] {
        let err = compiler.compile("artist", &filters(&[(key, "x")])).unwrap_err();
        assert!(matches!(err, CompileError::UnsupportedOperator(_)), "key {key:?}");
    }
}

#[test]
fn malformed_dates_abort_the_compile() {
    let schema = concert_schema();
    let err = FilterCompiler::new(&schema).compile("artist", &filters(&[("createdAt|gte", "soon")])).unwrap_err();
    assert!(matches!(err, CompileError::InvalidTimestamp { ref value, .. } if value == "soon"));
}

#[test]
fn a_failed_entry_discards_sibling_output() {
    // Compile-or-abort: the valid `name` filter must not leak out alongside
    // the failing one.
    let schema = concert_schema();
    let result = FilterCompiler::new(&schema).compile("artist", &filters(&[("name", "Bob"), ("createdAt", "soon")]));
    assert!(result.is_err());
}

#[test]
fn explicit_in_promotes_a_single_value() -> Result<()> {
    let schema = concert_schema();
    let compiled = FilterCompiler::new(&schema).compile("artist", &filters(&[("id|in", "5")]))?;
    assert_eq!(where_clause_sql(&compiled)?, "artist.id IN (5)");
    Ok(())
}

#[test]
fn scalar_operators_reject_list_values() {
    let schema = concert_schema();
    let err = FilterCompiler::new(&schema).compile("artist", &filters(&[("id|gt", "1,2")])).unwrap_err();
    assert!(matches!(err, CompileError::InvalidOperandCount { operator: FilterOperator::GreaterThan, got: 2, .. }));
}

#[test]
fn null_checks_ignore_their_value() -> Result<()> {
    let schema = concert_schema();
    let compiled = FilterCompiler::new(&schema).compile("artist", &filters(&[("createdAt|isnull", "1")]))?;
    assert_eq!(where_clause_sql(&compiled)?, "artist.createdAt IS NULL");

    let compiled = FilterCompiler::new(&schema).compile("artist", &filters(&[("name|is_not_null", "")]))?;
    assert_eq!(where_clause_sql(&compiled)?, "artist.name IS NOT NULL");
    Ok(())
}

#[test]
fn unrecognized_operator_tokens_fall_back_to_inference() -> Result<()> {
    let schema = concert_schema();
    let compiled = FilterCompiler::new(&schema).compile("artist", &filters(&[("name|approximately", "Bob")]))?;
    assert_eq!(where_clause_sql(&compiled)?, "artist.name = 'Bob'");
    Ok(())
}

#[test]
fn non_numeric_text_coerces_to_zero_on_numeric_fields() -> Result<()> {
    let schema = concert_schema();
    let compiled = FilterCompiler::new(&schema).compile("artist", &filters(&[("id", "abc")]))?;
    assert_eq!(where_clause_sql(&compiled)?, "artist.id = 0");
    Ok(())
}

#[test]
fn json_payloads_with_typed_scalars_compile() -> Result<()> {
    let schema = concert_schema();
    let filters = filter_map_from_json(json!({ "id|lte": 10 }))?;
    let compiled = FilterCompiler::new(&schema).compile("artist", &filters)?;
    assert_eq!(where_clause_sql(&compiled)?, "artist.id <= 10");
    Ok(())
}

#[test]
fn the_operator_catalog_is_closed_and_enumerable() {
    assert_eq!(FilterOperator::ALL.len(), 15);
    assert_eq!(FilterOperator::Between.token(), "between");
}
