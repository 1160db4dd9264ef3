//! The exported grammar schema agrees with the validator on the fixtures

use blocks_validator::{validate_document, GrammarSchema};
use jsonschema::JSONSchema;
use serde_json::Value;

fn load(raw: &str) -> Value {
    serde_json::from_str(raw).unwrap()
}

fn compiled_document_schema() -> JSONSchema {
    let schema = GrammarSchema::build().unwrap().document_schema().unwrap();
    JSONSchema::compile(&schema).expect("document schema should compile")
}

#[test]
fn test_schema_accepts_valid_documents() {
    let schema = compiled_document_schema();
    for raw in [
        include_str!("fixtures/valid/full_document.json"),
        include_str!("fixtures/valid/minimal.json"),
    ] {
        let doc = load(raw);
        assert!(validate_document(&doc).is_ok());
        assert!(schema.is_valid(&doc), "schema rejected {}", doc);
    }
}

#[test]
fn test_schema_rejects_structural_violations() {
    let schema = compiled_document_schema();
    let cases = [
        ("heading_level_7", include_str!("fixtures/invalid/heading_level_7.json")),
        ("table_block", include_str!("fixtures/invalid/table_block.json")),
        ("empty_paragraph", include_str!("fixtures/invalid/empty_paragraph.json")),
        ("code_with_link", include_str!("fixtures/invalid/code_with_link.json")),
        ("diagonal_list", include_str!("fixtures/invalid/diagonal_list.json")),
        ("partial_version", include_str!("fixtures/invalid/partial_version.json")),
    ];
    for (name, raw) in cases {
        let doc = load(raw);
        assert!(validate_document(&doc).is_err(), "{} should be rejected by the validator", name);
        assert!(!schema.is_valid(&doc), "{} should be rejected by the schema", name);
    }
}

#[test]
fn test_blocks_schema_accepts_bare_array() {
    let schema = GrammarSchema::build().unwrap().blocks_schema().unwrap();
    let compiled = JSONSchema::compile(&schema).expect("blocks schema should compile");

    let blocks = load(include_str!("fixtures/valid/bare_blocks.json"));
    assert!(compiled.is_valid(&blocks));

    let document = load(include_str!("fixtures/valid/minimal.json"));
    assert!(!compiled.is_valid(&document));
}
