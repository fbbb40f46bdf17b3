//! `bitfield` declarations and fields (§4.2.2, §4.2.3's "Bitfield" rules).

use super::{Parser, ParserState};
use crate::ast::{NodeId, NodeKind};
use crate::error::{ParserError, ParserResult};
use crate::symbol_table::SymbolKind;
use swizzle_lex::{BuiltinType, TokenKind};

/// Bit width of an integer `BuiltinType`'s underlying storage.
fn bit_width(ty: BuiltinType) -> Option<i64> {
    Some(match ty {
        BuiltinType::U8 | BuiltinType::I8 => 8,
        BuiltinType::U16 | BuiltinType::I16 => 16,
        BuiltinType::U32 | BuiltinType::I32 => 32,
        BuiltinType::U64 | BuiltinType::I64 => 64,
        _ => return None,
    })
}

impl Parser {
    pub(crate) fn parse_bitfield(&mut self) -> ParserResult<()> {
        self.state = ParserState::StartBitfield;
        self.advance(); // the 'bitfield' type token

        self.state = ParserState::BitfieldName;
        let name = self.expect_ident()?;

        self.state = ParserState::BitfieldColon;
        self.expect_kind(TokenKind::Colon, "expected ':' before a bitfield's underlying type")?;

        self.state = ParserState::BitfieldUnderlyingType;
        let underlying_tok = self.peek();
        let underlying = self.expect_builtin_type()?;
        let width = bit_width(underlying).ok_or_else(|| {
            ParserError::syntax(
                "a bitfield's underlying type must be an integer width",
                &underlying_tok.clone().unwrap(),
            )
        })?;

        self.state = ParserState::BitfieldStartScope;
        self.expect_kind(TokenKind::LBrace, "expected '{' to open a bitfield body")?;

        let root = self.ast.root();
        let bf_id = self.ast.append_child(root, NodeKind::Bitfield { name, underlying });
        self.attach_attributes(bf_id);
        self.node_stack.push(bf_id);
        self.context.current_bitfield_bit = i64::MIN;

        loop {
            match self.peek_kind() {
                Some(TokenKind::RBrace) => break,
                Some(TokenKind::Comment) => {
                    self.state = ParserState::CommentToken;
                    let tok = self.advance().unwrap();
                    self.ast.append_child(bf_id, NodeKind::Comment(tok.token.lexeme));
                }
                Some(TokenKind::MultilineComment) => {
                    self.state = ParserState::MultilineCommentToken;
                    let tok = self.advance().unwrap();
                    self.ast
                        .append_child(bf_id, NodeKind::MultilineComment(tok.token.lexeme));
                }
                Some(TokenKind::Attribute) | Some(TokenKind::AttributeBlock) => {
                    self.parse_attribute_decoration()?
                }
                Some(TokenKind::Ident) => {
                    self.parse_bitfield_field(bf_id, width)?;
                    self.state = ParserState::BitfieldFieldComma;
                    if self.peek_kind() == Some(TokenKind::Comma) {
                        self.advance();
                    }
                }
                Some(_) => {
                    let tok = self.peek().unwrap();
                    return Err(ParserError::syntax(
                        "expected a bitfield field, ',' or '}'",
                        &tok,
                    ));
                }
                None => {
                    return Err(ParserError::syntax(
                        "unterminated bitfield body",
                        &self.eof_token(),
                    ));
                }
            }
        }

        self.state = ParserState::BitfieldEndScope;
        let close = self.expect_kind(TokenKind::RBrace, "expected '}' to close a bitfield body")?;

        self.node_stack.pop();
        self.register_symbol(name, SymbolKind::Bitfield, bf_id, &close)?;
        Ok(())
    }

    fn parse_bitfield_field(&mut self, bf_id: NodeId, width: i64) -> ParserResult<()> {
        self.state = ParserState::BitfieldFieldName;
        let name = self.expect_ident()?;

        self.state = ParserState::BitfieldFieldColon;
        self.expect_kind(TokenKind::Colon, "expected ':' before a bitfield field's bit range")?;

        self.state = ParserState::BitfieldFieldBeginRead;
        let (begin, begin_tok) = self.expect_bit_index()?;

        let end = if self.peek_kind() == Some(TokenKind::Dot) {
            self.state = ParserState::BitfieldFieldRangeOperator;
            self.expect_kind(TokenKind::Dot, "expected '.' to begin the range operator '..'")?;
            self.expect_kind(
                TokenKind::Dot,
                "expected a second '.' to complete the range operator '..'",
            )?;

            self.state = ParserState::BitfieldFieldEndRead;
            let (end, end_tok) = self.expect_bit_index()?;
            if end < begin {
                return Err(ParserError::syntax(
                    format!("bit range end {end} is before its begin {begin} in field '{name}'"),
                    &end_tok,
                ));
            }
            end
        } else {
            begin
        };

        if end >= width {
            return Err(ParserError::syntax(
                format!(
                    "bit {end} is out of range for a {width}-bit underlying type in field '{name}'"
                ),
                &begin_tok,
            ));
        }
        if begin <= self.context.current_bitfield_bit {
            return Err(ParserError::syntax(
                format!(
                    "field '{name}' begins at bit {begin}, which does not come strictly after the previous field's bit {}",
                    self.context.current_bitfield_bit
                ),
                &begin_tok,
            ));
        }

        self.context.current_bitfield_bit = end;
        let field_id = self.ast.append_child(
            bf_id,
            NodeKind::BitfieldField {
                name,
                begin,
                end,
            },
        );
        self.attach_attributes(field_id);
        Ok(())
    }

    fn expect_bit_index(&mut self) -> ParserResult<(i64, swizzle_lex::TokenInfo)> {
        let tok = self.expect_kind(TokenKind::NumericLiteral, "expected a bit index")?;
        let value: i64 = tok
            .token
            .lexeme
            .as_str()
            .parse()
            .map_err(|_| ParserError::syntax("invalid bit index", &tok))?;
        if value < 0 {
            return Err(ParserError::syntax("a bit index cannot be negative", &tok));
        }
        Ok((value, tok))
    }
}
