//! Attribute accumulation (§4.2.2, §4.2.3's "Attributes" rule).
//!
//! `@name` or `@name=literal` pushes an `Attribute` node onto
//! `attribute_stack`; `@{...}` is a single pre-fused `AttributeBlock` token
//! from the tokenizer. Neither is attached to the tree until the next
//! declaration or field calls `attach_attributes` — attributes never cross
//! declaration boundaries (§4.2.3).

use super::{Parser, ParserState};
use crate::ast::{NodeId, NodeKind};
use crate::error::{ParserError, ParserResult};
use crate::value::{decode_escapes, set_value, set_value_hex};
use swizzle_lex::{BuiltinType, TokenKind};

impl Parser {
    /// Consume one `@name`, `@name=literal`, or `@{...}` and push the
    /// resulting (unattached) node onto `attribute_stack`.
    pub(crate) fn parse_attribute_decoration(&mut self) -> ParserResult<()> {
        match self.peek_kind() {
            Some(TokenKind::AttributeBlock) => {
                self.state = ParserState::AttributeBlockToken;
                let tok = self.advance().unwrap();
                let id = self
                    .ast
                    .allocate_detached(NodeKind::AttributeBlock { lexeme: tok.token.lexeme });
                self.attribute_stack.push(id);
                Ok(())
            }
            Some(TokenKind::Attribute) => {
                self.state = ParserState::AttributeSigil;
                self.advance(); // '@'

                self.state = ParserState::AttributeName;
                let name = self.expect_ident()?;
                let attr_id = self.ast.allocate_detached(NodeKind::Attribute { name });

                if self.peek_kind() == Some(TokenKind::Equal) {
                    self.state = ParserState::AttributeEqual;
                    self.advance();

                    self.state = ParserState::AttributeValueRead;
                    let literal_id = self.parse_attribute_literal()?;
                    self.ast.attach_children(attr_id, vec![literal_id]);
                }

                self.attribute_stack.push(attr_id);
                Ok(())
            }
            _ => unreachable!("parse_attribute_decoration called on a non-attribute token"),
        }
    }

    /// String, char, numeric, or hex only — no `FloatLiteral` arm, since
    /// §4.2.2 lists attribute values as one of exactly those four kinds.
    fn parse_attribute_literal(&mut self) -> ParserResult<NodeId> {
        let tok = self
            .peek()
            .ok_or_else(|| ParserError::syntax("expected an attribute value", &self.eof_token()))?;

        let id = match tok.token.kind {
            TokenKind::StringLiteral => {
                self.advance();
                self.ast.allocate_detached(NodeKind::StringLiteral(tok.token.lexeme))
            }
            TokenKind::CharLiteral => {
                self.advance();
                let lexeme = tok.token.lexeme.as_str();
                let body = &lexeme[1..lexeme.len() - 1];
                let ch = decode_escapes(body).chars().next().unwrap_or('\0');
                self.ast.allocate_detached(NodeKind::CharLiteral(ch))
            }
            TokenKind::NumericLiteral => {
                self.advance();
                let value = set_value(BuiltinType::I64, tok.token.lexeme.as_str())
                    .map_err(|e| ParserError::from_value_error(e, "attribute value", &tok))?;
                self.ast.allocate_detached(NodeKind::NumericLiteral(
                    value.as_i128().unwrap_or(0) as i64,
                ))
            }
            TokenKind::HexLiteral => {
                self.advance();
                let value = set_value_hex(BuiltinType::U64, tok.token.lexeme.as_str())
                    .map_err(|e| ParserError::from_value_error(e, "attribute value", &tok))?;
                self.ast.allocate_detached(NodeKind::HexLiteral(
                    value.as_i128().unwrap_or(0) as u64,
                ))
            }
            _ => {
                return Err(ParserError::syntax(
                    "an attribute value must be a string, char, numeric, or hex literal",
                    &tok,
                ));
            }
        };

        Ok(id)
    }
}
