//! `Attribute` / `AttributeBlock` states (§4.1).
//!
//! `@` is a single-character sentinel unless a `{` eventually follows, in
//! which case the whole run up to the matching `}` is reclassified as one
//! `AttributeBlock` token; otherwise `@` is emitted alone and the following
//! identifier arrives as its own, independent `Ident` token (the parser
//! reassembles `@name`).

use super::{TokenizerError, TokenizerResult, Tokenizer};
use crate::token::{TokenInfo, TokenKind};

impl<'a> Tokenizer<'a> {
    /// Called with the `@` already consumed.
    pub(super) fn lex_attribute(&mut self) -> TokenizerResult<TokenInfo> {
        if self.cursor.current_char() == '{' {
            return self.lex_attribute_block();
        }
        Ok(self.emit(TokenKind::Attribute, "@"))
    }

    fn lex_attribute_block(&mut self) -> TokenizerResult<TokenInfo> {
        let mut lexeme = String::from("@");
        lexeme.push(self.consume_char()); // the '{'

        let mut depth = 1u32;
        loop {
            if self.cursor.is_at_end() {
                return Err(self.syntax_error("unterminated attribute block"));
            }
            let c = self.cursor.current_char();
            match c {
                '{' => depth += 1,
                '}' => {
                    depth -= 1;
                    if depth == 0 {
                        lexeme.push(self.consume_char());
                        break;
                    }
                }
                _ => {}
            }
            lexeme.push(self.consume_char());
        }

        Ok(self.emit(TokenKind::AttributeBlock, &lexeme))
    }
}
