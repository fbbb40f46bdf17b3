//! `StringLiteral` / `CharLiteral` states (§4.1).
//!
//! Only six escapes are recognized: `\\ \' \n \r \a \0`. Anything else is a
//! `TokenizerSyntaxError` — this is a deliberately narrower escape set than
//! most C-family lexers accept.

use super::{TokenizerError, TokenizerResult, Tokenizer};
use crate::token::{TokenInfo, TokenKind};

impl<'a> Tokenizer<'a> {
    pub(super) fn lex_string_literal(&mut self) -> TokenizerResult<TokenInfo> {
        let mut lexeme = String::from("\"");

        loop {
            if self.cursor.is_at_end() {
                return Err(self.syntax_error("unterminated string literal"));
            }

            let c = self.cursor.current_char();

            if c == '"' {
                lexeme.push(self.consume_char());
                break;
            }

            if c == '\\' {
                lexeme.push(self.consume_char());
                lexeme.push(self.consume_escape()?);
                continue;
            }

            lexeme.push(self.consume_char());
        }

        Ok(self.emit(TokenKind::StringLiteral, &lexeme))
    }

    pub(super) fn lex_char_literal(&mut self) -> TokenizerResult<TokenInfo> {
        let mut lexeme = String::from("'");

        if self.cursor.is_at_end() || self.cursor.current_char() == '\'' {
            return Err(self.syntax_error("empty character literal"));
        }

        if self.cursor.current_char() == '\\' {
            lexeme.push(self.consume_char());
            lexeme.push(self.consume_escape()?);
        } else {
            lexeme.push(self.consume_char());
        }

        if self.cursor.is_at_end() || self.cursor.current_char() != '\'' {
            return Err(self.syntax_error("unterminated character literal"));
        }
        lexeme.push(self.consume_char());

        Ok(self.emit(TokenKind::CharLiteral, &lexeme))
    }

    /// Consumes one escape-sequence character after a `\` has already been
    /// consumed, returning the raw escape letter as written in the source
    /// (decoding happens later in `SetValue`, not here).
    fn consume_escape(&mut self) -> TokenizerResult<char> {
        if self.cursor.is_at_end() {
            return Err(self.syntax_error("unterminated escape sequence"));
        }
        let c = self.cursor.current_char();
        match c {
            '\\' | '\'' | 'n' | 'r' | 'a' | '0' => Ok(self.consume_char()),
            other => Err(self.syntax_error(format!("unrecognized escape sequence: \\{}", other))),
        }
    }
}
