//! `BeginHexLiteral` / `HexLiteral` / `NumericLiteral` states (§4.1).
//!
//! Numeric/hex recognition is one-character lookahead only; a leading `0`
//! tentatively starts a hex literal and reclassifies to decimal the moment a
//! digit (not `x`) follows.

use super::Tokenizer;
use crate::token::{TokenInfo, TokenKind};

impl<'a> Tokenizer<'a> {
    /// Called with the leading `0` already consumed.
    pub(super) fn lex_begin_hex_literal(&mut self) -> TokenInfo {
        let mut lexeme = String::from("0");

        if self.cursor.current_char() == 'x' {
            lexeme.push(self.consume_char());
            while self.cursor.current_char().is_ascii_hexdigit() {
                lexeme.push(self.consume_char());
            }
            return self.emit(TokenKind::HexLiteral, &lexeme);
        }

        if self.cursor.current_char().is_ascii_digit() {
            while self.cursor.current_char().is_ascii_digit() {
                lexeme.push(self.consume_char());
            }
            return self.emit(TokenKind::NumericLiteral, &lexeme);
        }

        // Neither `x` nor another digit followed: the lone `0` is a decimal
        // numeric literal with value zero.
        self.emit(TokenKind::NumericLiteral, &lexeme)
    }

    /// Called with nothing consumed yet; handles the general decimal and
    /// signed-decimal case (the leading `0` case is handled separately above
    /// since it may turn into a hex literal).
    pub(super) fn lex_numeric_literal(&mut self) -> TokenInfo {
        let mut lexeme = String::new();

        if self.cursor.current_char() == '-' {
            lexeme.push(self.consume_char());
        }

        let mut is_float = false;
        while self.cursor.current_char().is_ascii_digit() {
            lexeme.push(self.consume_char());
        }
        if self.cursor.current_char() == '.' && self.cursor.peek_char(1).is_ascii_digit() {
            is_float = true;
            lexeme.push(self.consume_char());
            while self.cursor.current_char().is_ascii_digit() {
                lexeme.push(self.consume_char());
            }
        }

        self.emit(
            if is_float {
                TokenKind::FloatLiteral
            } else {
                TokenKind::NumericLiteral
            },
            &lexeme,
        )
    }
}
