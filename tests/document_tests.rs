//! Document-level behavior of the blocks validator
//!
//! Exercises the public API against JSON fixtures: accepted documents
//! round-trip unchanged, rejected ones report the expected kind and path.

use blocks_validator::{
    validate_blocks, validate_document, BlockNode, BlocksError, BlocksValidator, ErrorKind, InlineNode, ListFormat,
    NodeKind, ValidationLimits,
};
use serde_json::{json, Value};

fn fixture(name: &str) -> Value {
    let raw = match name {
        "valid/full_document" => include_str!("fixtures/valid/full_document.json"),
        "valid/minimal" => include_str!("fixtures/valid/minimal.json"),
        "valid/bare_blocks" => include_str!("fixtures/valid/bare_blocks.json"),
        "invalid/heading_level_7" => include_str!("fixtures/invalid/heading_level_7.json"),
        "invalid/table_block" => include_str!("fixtures/invalid/table_block.json"),
        "invalid/code_with_link" => include_str!("fixtures/invalid/code_with_link.json"),
        "invalid/empty_paragraph" => include_str!("fixtures/invalid/empty_paragraph.json"),
        "invalid/bad_link_url" => include_str!("fixtures/invalid/bad_link_url.json"),
        "invalid/partial_version" => include_str!("fixtures/invalid/partial_version.json"),
        "invalid/diagonal_list" => include_str!("fixtures/invalid/diagonal_list.json"),
        other => panic!("unknown fixture {}", other),
    };
    serde_json::from_str(raw).unwrap()
}

// =============================================================================
// Accepted documents
// =============================================================================

#[test]
fn test_full_document_round_trips() {
    let input = fixture("valid/full_document");
    let doc = validate_document(&input).unwrap();

    assert_eq!(doc.blocks.len(), 9);
    let output = serde_json::to_value(&doc).unwrap();
    assert_eq!(output, input);
}

#[test]
fn test_validation_is_idempotent() {
    let input = fixture("valid/full_document");
    let first = validate_document(&input).unwrap();

    let text = serde_json::to_string(&first).unwrap();
    let reparsed: Value = serde_json::from_str(&text).unwrap();
    let second = validate_document(&reparsed).unwrap();

    assert_eq!(first, second);
}

#[test]
fn test_typed_view_of_full_document() {
    let doc = validate_document(&fixture("valid/full_document")).unwrap();

    match &doc.blocks[1] {
        BlockNode::Paragraph(p) => {
            assert_eq!(p.children.len(), 3);
            match &p.children[1] {
                InlineNode::Link(link) => {
                    assert_eq!(link.url, "https://docs.example.com/guide?lang=en#intro");
                    assert_eq!(link.children[0].bold, Some(true));
                }
                other => panic!("Expected link, got {:?}", other),
            }
        }
        other => panic!("Expected paragraph, got {:?}", other),
    }

    let syntaxes: Vec<_> = doc
        .blocks
        .iter()
        .filter_map(|b| match b {
            BlockNode::Code(code) => Some(code.syntax.clone()),
            _ => None,
        })
        .collect();
    assert_eq!(syntaxes, vec![Some(Some("rust".to_string())), Some(None), None]);

    match &doc.blocks[6] {
        BlockNode::List(list) => {
            assert_eq!(list.format, ListFormat::Unordered);
            assert!(list.children[1].children.is_empty());
            assert_eq!(list.extra["indentLevel"], 0);
        }
        other => panic!("Expected list, got {:?}", other),
    }

    match &doc.blocks[8] {
        BlockNode::Image(image) => {
            assert_eq!(image.image.name, "diagram.png");
            assert_eq!(image.image.caption, None);
            assert_eq!(image.image.extra["documentId"], "q8x1s0o2m3k5");
        }
        other => panic!("Expected image, got {:?}", other),
    }
}

#[test]
fn test_document_semver() {
    let doc = validate_document(&fixture("valid/full_document")).unwrap();
    let version = doc.semver().unwrap();
    assert_eq!(version.major, 1);
    assert_eq!(version.minor, 4);
    assert_eq!(version.pre.as_str(), "rc.2");
}

#[test]
fn test_minimal_document() {
    let doc = validate_document(&fixture("valid/minimal")).unwrap();
    assert!(doc.blocks.is_empty());
    assert_eq!(serde_json::to_value(&doc).unwrap(), fixture("valid/minimal"));
}

#[test]
fn test_bare_blocks_round_trip() {
    let input = fixture("valid/bare_blocks");
    let blocks = validate_blocks(&input).unwrap();
    assert_eq!(blocks.len(), 2);
    assert_eq!(serde_json::to_value(&blocks).unwrap(), input);
}

#[test]
fn test_unknown_keys_survive() {
    let input = json!({
        "version": "2.0.0",
        "locale": "en",
        "blocks": [{
            "type": "paragraph",
            "id": "p-1",
            "children": [{ "type": "text", "text": "hi", "color": "red" }]
        }]
    });
    let doc = validate_document(&input).unwrap();
    assert_eq!(doc.extra["locale"], "en");
    assert_eq!(serde_json::to_value(&doc).unwrap(), input);
}

#[test]
fn test_untagged_type_keys_survive() {
    let mut input = fixture("valid/full_document");
    input["type"] = json!("release-notes");
    input["blocks"][8]["image"]["type"] = json!("asset");

    let doc = validate_document(&input).unwrap();
    assert_eq!(doc.extra["type"], "release-notes");
    match &doc.blocks[8] {
        BlockNode::Image(image) => assert_eq!(image.image.extra["type"], "asset"),
        other => panic!("Expected image, got {:?}", other),
    }
    assert_eq!(serde_json::to_value(&doc).unwrap(), input);
}

// =============================================================================
// Rejected documents
// =============================================================================

#[test]
fn test_heading_level_out_of_range() {
    let err = validate_document(&fixture("invalid/heading_level_7")).unwrap_err();
    assert_eq!(err.kind, ErrorKind::RequiredField);
    assert_eq!(err.node, NodeKind::Heading);
    assert_eq!(err.path.to_string(), "blocks[0].level");
}

#[test]
fn test_unknown_block_type_names_allowed_set() {
    let err = validate_document(&fixture("invalid/table_block")).unwrap_err();
    assert_eq!(err.kind, ErrorKind::UnknownType);
    assert_eq!(err.path.to_string(), "blocks[1]");
    assert!(err.message.contains("paragraph, heading, quote, list, image, code"));
}

#[test]
fn test_code_block_with_link_child() {
    let err = validate_document(&fixture("invalid/code_with_link")).unwrap_err();
    assert_eq!(err.kind, ErrorKind::UnknownType);
    assert_eq!(err.node, NodeKind::Text);
    assert_eq!(err.path.to_string(), "blocks[0].children[1].type");
}

#[test]
fn test_empty_paragraph() {
    let err = validate_document(&fixture("invalid/empty_paragraph")).unwrap_err();
    assert_eq!(err.kind, ErrorKind::Cardinality);
    assert_eq!(err.path.to_string(), "blocks[0].children");
}

#[test]
fn test_bad_link_url() {
    let err = validate_document(&fixture("invalid/bad_link_url")).unwrap_err();
    assert_eq!(err.kind, ErrorKind::Format);
    assert_eq!(err.node, NodeKind::Link);
    assert_eq!(err.path.to_string(), "blocks[0].children[0].url");
}

#[test]
fn test_partial_version() {
    let err = validate_document(&fixture("invalid/partial_version")).unwrap_err();
    assert_eq!(err.kind, ErrorKind::Format);
    assert_eq!(err.field, Some("version"));
}

#[test]
fn test_diagonal_list() {
    let err = validate_document(&fixture("invalid/diagonal_list")).unwrap_err();
    assert_eq!(err.kind, ErrorKind::RequiredField);
    assert_eq!(err.field, Some("format"));
}

#[test]
fn test_error_json_body() {
    let err = validate_document(&fixture("invalid/bad_link_url")).unwrap_err();
    let body = serde_json::to_value(&err).unwrap();
    assert_eq!(
        body,
        json!({
            "kind": "format",
            "node": "link",
            "field": "url",
            "path": "blocks[0].children[0].url",
            "message": "link url `not-a-url` is not a valid absolute URL"
        })
    );
}

// =============================================================================
// Text entry points and limits
// =============================================================================

#[test]
fn test_parse_document_reports_json_errors() {
    let validator = BlocksValidator::new();
    assert!(matches!(validator.parse_document("{ not json"), Err(BlocksError::Json(_))));
    assert!(matches!(
        validator.parse_document(r#"{ "version": "1.0.0" }"#),
        Err(BlocksError::Validation(_))
    ));
    assert!(validator.parse_document(r#"{ "version": "1.0.0", "blocks": [] }"#).is_ok());
}

#[test]
fn test_limits_apply_to_full_document() {
    let input = fixture("valid/full_document");
    let tight = BlocksValidator::with_limits(ValidationLimits {
        max_depth: 0,
        max_nodes: 10,
    });
    let err = tight.validate_document(&input).unwrap_err();
    assert_eq!(err.kind, ErrorKind::Limit);

    let roomy = BlocksValidator::with_limits(ValidationLimits {
        max_depth: 4,
        max_nodes: 1_000,
    });
    assert!(roomy.validate_document(&input).is_ok());
}

#[test]
fn test_validator_shared_across_threads() {
    let validator = std::sync::Arc::new(BlocksValidator::new());
    let input = std::sync::Arc::new(fixture("valid/full_document"));

    let handles: Vec<_> = (0..4)
        .map(|_| {
            let validator = validator.clone();
            let input = input.clone();
            std::thread::spawn(move || validator.validate_document(&input).is_ok())
        })
        .collect();

    for handle in handles {
        assert!(handle.join().unwrap());
    }
}
