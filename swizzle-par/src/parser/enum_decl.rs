//! `enum` declarations and fields (§4.2.2, §4.2.3's "Enum" rules).

use super::{Parser, ParserState};
use crate::ast::NodeKind;
use crate::error::{ParserError, ParserResult};
use crate::symbol_table::SymbolKind;
use crate::value::{decode_escapes, set_value, set_value_from_char, set_value_hex, EnumValueKey, Value};
use swizzle_lex::{BuiltinType, TokenKind};

impl Parser {
    pub(crate) fn parse_enum(&mut self) -> ParserResult<()> {
        self.state = ParserState::StartEnum;
        self.advance(); // 'enum'

        self.state = ParserState::EnumName;
        let name = self.expect_ident()?;

        self.state = ParserState::EnumColon;
        self.expect_kind(TokenKind::Colon, "expected ':' before an enum's underlying type")?;

        self.state = ParserState::EnumUnderlyingType;
        let underlying_tok = self.peek();
        let underlying = self.expect_builtin_type()?;
        if !underlying.is_integer() {
            let tok = underlying_tok.unwrap();
            return Err(ParserError::syntax(
                "an enum's underlying type must be an integer width",
                &tok,
            ));
        }

        self.state = ParserState::EnumStartScope;
        self.expect_kind(TokenKind::LBrace, "expected '{' to open an enum body")?;

        let root = self.ast.root();
        let enum_id = self.ast.append_child(root, NodeKind::Enum { name, underlying });
        self.attach_attributes(enum_id);
        self.node_stack.push(enum_id);

        self.context.current_enum_value = Some(Value::zero(underlying));
        self.context.enum_value_allocations.clear();

        loop {
            match self.peek_kind() {
                Some(TokenKind::RBrace) => break,
                Some(TokenKind::Comment) => {
                    self.state = ParserState::CommentToken;
                    let tok = self.advance().unwrap();
                    self.ast.append_child(enum_id, NodeKind::Comment(tok.token.lexeme));
                }
                Some(TokenKind::MultilineComment) => {
                    self.state = ParserState::MultilineCommentToken;
                    let tok = self.advance().unwrap();
                    self.ast
                        .append_child(enum_id, NodeKind::MultilineComment(tok.token.lexeme));
                }
                Some(TokenKind::Attribute) | Some(TokenKind::AttributeBlock) => {
                    self.parse_attribute_decoration()?
                }
                Some(TokenKind::Ident) => {
                    self.parse_enum_field(enum_id, underlying)?;
                    self.state = ParserState::EnumFieldComma;
                    if self.peek_kind() == Some(TokenKind::Comma) {
                        self.advance();
                    }
                }
                Some(_) => {
                    let tok = self.peek().unwrap();
                    return Err(ParserError::syntax(
                        "expected an enum field, ',' or '}'",
                        &tok,
                    ));
                }
                None => {
                    return Err(ParserError::syntax("unterminated enum body", &self.eof_token()));
                }
            }
        }

        self.state = ParserState::EnumEndScope;
        let close = self.expect_kind(TokenKind::RBrace, "expected '}' to close an enum body")?;
        self.require_non_comment_child(enum_id, &close, "an enum must declare at least one field")?;

        self.node_stack.pop();
        self.context.enum_value_allocations.clear();
        self.context.current_enum_value = None;

        self.register_symbol(name, SymbolKind::Enum, enum_id, &close)?;
        Ok(())
    }

    fn parse_enum_field(&mut self, enum_id: crate::ast::NodeId, underlying: BuiltinType) -> ParserResult<()> {
        self.state = ParserState::EnumFieldName;
        let name = self.expect_ident()?;

        let value = if self.peek_kind() == Some(TokenKind::Equal) {
            self.state = ParserState::EnumFieldEqual;
            self.advance();

            self.state = ParserState::EnumFieldEqualRead;
            self.parse_scalar_literal(underlying, name.as_str())?
        } else {
            self.context
                .current_enum_value
                .expect("current_enum_value is set for the duration of an enum's scope")
        };

        let key = EnumValueKey::from_value(&value);
        if !self.context.enum_value_allocations.insert(key) {
            let tok = self.peek().unwrap_or_else(|| self.eof_token());
            return Err(ParserError::syntax(
                format!("duplicate enum value for field '{name}'"),
                &tok,
            ));
        }

        let field_id = self.ast.append_child(enum_id, NodeKind::EnumField { name, value });
        self.attach_attributes(field_id);

        let found = self.peek().unwrap_or_else(|| self.eof_token());
        let next = value
            .checked_increment()
            .map_err(|e| ParserError::from_value_error(e, name.as_str(), &found))?;
        self.context.current_enum_value = Some(next);
        Ok(())
    }

    /// Parses a numeric, hex, or char literal token into `target`'s width,
    /// consuming exactly one token. Shared by enum-field values and
    /// struct-field defaults (§4.2.3's "SetValue error rewrapping" rule).
    pub(crate) fn parse_scalar_literal(
        &mut self,
        target: BuiltinType,
        field_name: &str,
    ) -> ParserResult<Value> {
        let tok = self
            .peek()
            .ok_or_else(|| ParserError::syntax("expected a literal value", &self.eof_token()))?;
        let lexeme = tok.token.lexeme.as_str();

        let result = match tok.token.kind {
            TokenKind::NumericLiteral | TokenKind::FloatLiteral => {
                self.advance();
                set_value(target, lexeme)
            }
            TokenKind::HexLiteral => {
                self.advance();
                set_value_hex(target, lexeme)
            }
            TokenKind::CharLiteral => {
                self.advance();
                let body = &lexeme[1..lexeme.len() - 1];
                let decoded = decode_escapes(body);
                let ch = decoded.chars().next().unwrap_or('\0');
                set_value_from_char(target, ch)
            }
            _ => {
                return Err(ParserError::syntax(
                    format!("expected a numeric, hex, or character literal for '{field_name}'"),
                    &tok,
                ));
            }
        };

        result.map_err(|e| ParserError::from_value_error(e, field_name, &tok))
    }
}
