//! `FirstSlash` / `Comment` / `MultilineComment` states (§4.1).
//!
//! A `\` immediately before the terminating `\n` promotes a line comment to a
//! `MultilineComment`, which continues to absorb lines the same way for as
//! long as each line still ends in a continuation backslash.

use super::{TokenizerError, TokenizerResult, Tokenizer};
use crate::token::{TokenInfo, TokenKind};

impl<'a> Tokenizer<'a> {
    /// Called with the first `/` already consumed.
    pub(super) fn lex_first_slash(&mut self) -> TokenizerResult<Option<TokenInfo>> {
        if self.cursor.current_char() != '/' {
            return Err(self.syntax_error("expected '/' to start a comment"));
        }
        self.consume_char();
        Ok(Some(self.lex_comment()))
    }

    fn lex_comment(&mut self) -> TokenInfo {
        let mut lexeme = String::from("//");
        let mut multiline = false;

        loop {
            if self.cursor.is_at_end() {
                break;
            }

            let c = self.cursor.current_char();

            if c == '\n' {
                if lexeme.ends_with('\\') {
                    multiline = true;
                    lexeme.push(self.consume_char());
                    continue;
                }
                self.consume_char();
                break;
            }

            lexeme.push(self.consume_char());
        }

        self.emit(
            if multiline {
                TokenKind::MultilineComment
            } else {
                TokenKind::Comment
            },
            &lexeme,
        )
    }
}
