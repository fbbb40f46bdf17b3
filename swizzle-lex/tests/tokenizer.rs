use swizzle_lex::{BuiltinType, Keyword, TokenKind, Tokenizer, TokenizerError};
use swizzle_util::Symbol;

fn tokenize(source: &str) -> Result<Vec<swizzle_lex::TokenInfo>, TokenizerError> {
    let mut out = Vec::new();
    Tokenizer::new(source, Symbol::intern("case.swizzle")).run(&mut |t| out.push(t))?;
    Ok(out)
}

#[test]
fn tokenizes_a_namespace_declaration() {
    let tokens = tokenize("namespace foo::bar;").unwrap();
    let kinds: Vec<_> = tokens.iter().map(|t| t.token.kind.clone()).collect();
    assert_eq!(
        kinds,
        vec![
            TokenKind::Keyword(Keyword::Namespace),
            TokenKind::Ident,
            TokenKind::Colon,
            TokenKind::Colon,
            TokenKind::Ident,
            TokenKind::Semicolon,
        ]
    );
}

#[test]
fn tokenizes_an_enum_with_mixed_literals() {
    let tokens = tokenize("enum Metal : u8 { iron = 0x04, copper = 'a', gold = 200, }").unwrap();
    let kinds: Vec<_> = tokens.iter().map(|t| t.token.kind.clone()).collect();
    assert!(kinds.contains(&TokenKind::HexLiteral));
    assert!(kinds.contains(&TokenKind::CharLiteral));
    assert!(kinds.contains(&TokenKind::NumericLiteral));
    assert!(kinds.contains(&TokenKind::Type(BuiltinType::U8)));
}

#[test]
fn tokenizes_an_array_and_vector_struct() {
    let tokens = tokenize("struct Msg { u8[10] fixed; u8 size; u8[size] var; }").unwrap();
    let lexemes: Vec<_> = tokens.iter().map(|t| t.token.lexeme.as_str().to_string()).collect();
    assert!(lexemes.contains(&"fixed".to_string()));
    assert!(lexemes.contains(&"var".to_string()));
}

#[test]
fn attribute_without_braces_is_a_lone_sentinel() {
    let tokens = tokenize("@align").unwrap();
    assert_eq!(tokens[0].token.kind, TokenKind::Attribute);
    assert_eq!(tokens[1].token.kind, TokenKind::Ident);
}

#[test]
fn attribute_block_is_one_token() {
    let tokens = tokenize("@{pad=1}").unwrap();
    assert_eq!(tokens.len(), 1);
    assert_eq!(tokens[0].token.kind, TokenKind::AttributeBlock);
}

#[test]
fn line_comment_is_emitted_as_its_own_token() {
    let tokens = tokenize("// a comment\nnamespace foo;").unwrap();
    assert_eq!(tokens[0].token.kind, TokenKind::Comment);
}

#[test]
fn backslash_continued_comment_becomes_multiline() {
    let tokens = tokenize("// first \\\n// second\nnamespace foo;").unwrap();
    assert_eq!(tokens[0].token.kind, TokenKind::MultilineComment);
}

#[test]
fn unterminated_string_literal_is_a_syntax_error() {
    let err = tokenize("\"unterminated").unwrap_err();
    assert!(matches!(err, TokenizerError::SyntaxError { .. }));
}

#[test]
fn unknown_escape_sequence_is_a_syntax_error() {
    let err = tokenize("\"bad \\q escape\"").unwrap_err();
    assert!(matches!(err, TokenizerError::SyntaxError { .. }));
}

#[test]
fn lexeme_concatenation_equals_source_modulo_whitespace() {
    let source = "namespace foo::bar;";
    let tokens = tokenize(source).unwrap();
    let concatenated: String = tokens
        .iter()
        .map(|t| t.token.lexeme.as_str())
        .collect::<Vec<_>>()
        .join("");
    let without_whitespace: String = source.chars().filter(|c| !c.is_whitespace()).collect();
    assert_eq!(concatenated, without_whitespace);
}

// ----------------------------------------------------------------------
// Property-based tests over arbitrary inputs (§8's quantified invariants).
// ----------------------------------------------------------------------

use proptest::collection::vec as prop_vec;
use proptest::prelude::*;

proptest! {
    #[test]
    fn arbitrary_identifiers_produce_exactly_one_token(input in "[a-zA-Z_][a-zA-Z0-9_]{0,40}") {
        let tokens = tokenize(&input).unwrap();
        prop_assert_eq!(tokens.len(), 1);
        match &tokens[0].token.kind {
            TokenKind::Keyword(_) | TokenKind::Type(_) | TokenKind::Ident => {}
            other => prop_assert!(false, "expected an identifier-shaped token, got {:?}", other),
        }
    }

    #[test]
    fn arbitrary_decimal_digit_runs_produce_one_numeric_literal(digits in "[1-9][0-9]{0,18}") {
        let tokens = tokenize(&digits).unwrap();
        prop_assert_eq!(tokens.len(), 1);
        prop_assert_eq!(tokens[0].token.kind.clone(), TokenKind::NumericLiteral);
    }

    #[test]
    fn arbitrary_hex_digit_runs_produce_one_hex_literal(digits in "[0-9a-fA-F]{1,16}") {
        let source = format!("0x{digits}");
        let tokens = tokenize(&source).unwrap();
        prop_assert_eq!(tokens.len(), 1);
        prop_assert_eq!(tokens[0].token.kind.clone(), TokenKind::HexLiteral);
    }

    #[test]
    fn arbitrary_escape_free_string_bodies_produce_one_string_literal(
        body in "[^\"\\\\\n]{0,60}"
    ) {
        let source = format!("\"{body}\"");
        let tokens = tokenize(&source).unwrap();
        prop_assert_eq!(tokens.len(), 1);
        prop_assert_eq!(tokens[0].token.kind.clone(), TokenKind::StringLiteral);
    }

    #[test]
    fn surrounding_whitespace_never_changes_the_token_stream(spaces in 0usize..40) {
        let padding = " ".repeat(spaces);
        let source = format!("{padding}namespace{padding}");
        let tokens = tokenize(&source).unwrap();
        prop_assert_eq!(tokens.len(), 1);
        prop_assert_eq!(tokens[0].token.kind.clone(), TokenKind::Keyword(Keyword::Namespace));
    }

    #[test]
    fn lexeme_concatenation_equals_source_modulo_whitespace_for_identifier_paths(
        segments in prop_vec("[a-zA-Z_][a-zA-Z0-9_]{0,12}", 1..6)
    ) {
        let source = segments.join("::");
        let tokens = tokenize(&source).unwrap();
        let concatenated: String = tokens
            .iter()
            .map(|t| t.token.lexeme.as_str())
            .collect::<Vec<_>>()
            .join("");
        let without_whitespace: String = source.chars().filter(|c| !c.is_whitespace()).collect();
        prop_assert_eq!(concatenated, without_whitespace);
    }
}
