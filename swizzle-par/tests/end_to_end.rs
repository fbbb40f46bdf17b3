//! The six end-to-end scenarios (§8) plus the quantified ownership property.

use std::path::PathBuf;
use swizzle_lex::Tokenizer;
use swizzle_par::{
    ast::NodeKind, context::ImportError, ImportResolver, ParserError, ParserResult,
};
use swizzle_util::Symbol;

fn tokenize(source: &str) -> Vec<swizzle_lex::TokenInfo> {
    let mut tokens = Vec::new();
    Tokenizer::new(source, Symbol::intern("case.swizzle"))
        .run(&mut |t| tokens.push(t))
        .expect("fixtures in this file are lexically valid");
    tokens
}

fn parse(source: &str) -> ParserResult<swizzle_par::ParseOutput> {
    swizzle_par::Parser::without_imports(tokenize(source)).run()
}

#[test]
fn nested_namespace_and_enum_with_mixed_literals() {
    let output = parse("namespace foo; enum Metal : u8 { iron = 0x04, copper = 'a', gold = 200, }")
        .expect("well-formed input parses");

    let root = output.ast.root();
    let children = output.ast.children(root);
    assert_eq!(children.len(), 2);

    match output.ast.kind(children[0]) {
        NodeKind::Namespace { path } => assert_eq!(path.joined(), "foo"),
        other => panic!("expected Namespace, got {other:?}"),
    }

    let enum_id = children[1];
    match output.ast.kind(enum_id) {
        NodeKind::Enum { name, underlying } => {
            assert_eq!(name.as_str(), "Metal");
            assert_eq!(*underlying, swizzle_lex::BuiltinType::U8);
        }
        other => panic!("expected Enum, got {other:?}"),
    }

    let values: Vec<(String, i128)> = output
        .ast
        .children(enum_id)
        .iter()
        .map(|&c| match output.ast.kind(c) {
            NodeKind::EnumField { name, value } => {
                (name.as_str().to_string(), value.as_i128().unwrap())
            }
            other => panic!("expected EnumField, got {other:?}"),
        })
        .collect();
    assert_eq!(
        values,
        vec![
            ("iron".to_string(), 4),
            ("copper".to_string(), 97),
            ("gold".to_string(), 200),
        ]
    );

    assert!(output.symbol_table.get(&swizzle_par::ast::QualifiedName(vec![
        Symbol::intern("foo"),
        Symbol::intern("Metal"),
    ])).is_some());
}

#[test]
fn bitfield_field_out_of_range_is_a_syntax_error() {
    let err = parse("bitfield F : u8 { f1 : 5, f2 : 6..7, f3 : 258, }").unwrap_err();
    match err {
        ParserError::SyntaxError { message, .. } => {
            assert!(message.contains("258"), "message was: {message}");
        }
        other => panic!("expected SyntaxError, got {other:?}"),
    }
}

#[test]
fn struct_with_array_and_vector_fields() {
    let output =
        parse("struct Msg { u8[10] fixed; u8 size; u8[size] var; }").expect("valid struct");

    let root = output.ast.root();
    let struct_id = output.ast.children(root)[0];
    let fields = output.ast.children(struct_id);
    assert_eq!(fields.len(), 3);

    let fixed = fields[0];
    assert_eq!(output.ast.array_size(fixed), Some(10));
    assert!(!output.ast.is_vector(fixed));

    let size = fields[1];
    assert!(!output.ast.is_array(size));
    assert!(!output.ast.is_vector(size));

    let var = fields[2];
    let sizer = output.ast.vector_sizer(var).expect("var is sized by `size`");
    assert_eq!(sizer.field.as_str(), "size");
    assert!(sizer.member.is_none());
}

#[test]
fn duplicate_enum_value_fails_on_overflow_before_the_duplicate_check() {
    let err = parse("enum M : u8 { gold = 300, silver = 300, }").unwrap_err();
    match err {
        ParserError::SyntaxError { message, .. } => {
            assert!(message.contains("overflow"), "message was: {message}");
            assert!(message.contains("gold"), "message was: {message}");
        }
        other => panic!("expected SyntaxError, got {other:?}"),
    }
}

struct FakeResolver;

impl ImportResolver for FakeResolver {
    fn resolve(&self, segments: &[Symbol]) -> Result<PathBuf, ImportError> {
        let joined: Vec<_> = segments.iter().map(|s| s.as_str()).collect();
        if joined == ["foo", "bar", "Flan"] {
            Ok(PathBuf::from("foo/bar/Flan.swizzle"))
        } else {
            Err(ImportError::NotFound)
        }
    }
}

#[test]
fn import_of_a_nested_path_resolves_and_is_recorded() {
    let tokens = tokenize("import foo::bar::Flan;");
    let output = swizzle_par::Parser::new(tokens, Box::new(FakeResolver))
        .run()
        .expect("the fake resolver reports this path as present");

    let root = output.ast.root();
    let import_id = output.ast.children(root)[0];
    match output.ast.kind(import_id) {
        NodeKind::Import { path } => assert_eq!(path.joined(), "foo::bar::Flan"),
        other => panic!("expected Import, got {other:?}"),
    }
}

#[test]
fn import_that_does_not_resolve_is_rejected() {
    let tokens = tokenize("import nowhere::Thing;");
    let err = swizzle_par::Parser::new(tokens, Box::new(FakeResolver))
        .run()
        .unwrap_err();
    assert!(matches!(err, ParserError::Generic(_)));
}

#[test]
fn attributed_field_with_value_keeps_accumulation_order() {
    let output = parse(r#"struct S { @align="left" @padding=' ' u8[20] name; }"#)
        .expect("valid attributed field");

    let root = output.ast.root();
    let struct_id = output.ast.children(root)[0];
    let field_id = output.ast.children(struct_id)[0];

    let field_children = output.ast.children(field_id);
    // Attributes are attached as the field's leading children, in
    // accumulation order, ahead of the ArrayMarker.
    let attr_names: Vec<&str> = field_children
        .iter()
        .filter_map(|&c| match output.ast.kind(c) {
            NodeKind::Attribute { name } => Some(name.as_str()),
            _ => None,
        })
        .collect();
    assert_eq!(attr_names, vec!["align", "padding"]);

    let align_id = field_children[0];
    let align_value = output.ast.children(align_id)[0];
    assert!(matches!(output.ast.kind(align_value), NodeKind::StringLiteral(_)));

    let padding_id = field_children[1];
    let padding_value = output.ast.children(padding_id)[0];
    assert!(matches!(output.ast.kind(padding_value), NodeKind::CharLiteral(' ')));

    assert_eq!(output.ast.array_size(field_id), Some(20));
}

#[test]
fn every_non_root_node_has_exactly_one_parent_after_a_full_parse() {
    let output = parse(
        r#"
        namespace acme::wire;
        enum Kind : u8 { ping = 0, pong, }
        bitfield Flags : u8 { ack : 0, retry : 1..2, }
        struct Header { Kind kind; Flags flags; }
        struct Packet {
            Header header;
            variable_block : header.kind {
                case 0: Header;
            }
        }
        "#,
    )
    .expect("valid multi-declaration schema");

    let root = output.ast.root();
    for id in output.ast.iter_ids() {
        if id == root {
            assert!(output.ast.get(id).parent.is_none());
        } else {
            assert!(output.ast.get(id).parent.is_some());
        }
    }
}
