//! `BeginString` / `String` states (§4.1): identifiers, keywords, and
//! built-in type mnemonics all share one accumulation loop, classified once
//! the run of identifier characters ends.

use super::Tokenizer;
use crate::token::{BuiltinType, Keyword, TokenInfo, TokenKind};

impl<'a> Tokenizer<'a> {
    pub(super) fn lex_identifier_or_keyword(&mut self) -> TokenInfo {
        let mut lexeme = String::new();

        // `BeginString` accepts its first character unconditionally (it is
        // only entered when nothing else claimed the character), then
        // continues like any other identifier run.
        lexeme.push(self.consume_char());
        while is_ident_continue(self.cursor.current_char()) {
            lexeme.push(self.consume_char());
        }

        let kind = if let Some(keyword) = Keyword::from_str(&lexeme) {
            TokenKind::Keyword(keyword)
        } else if let Some(builtin) = BuiltinType::from_str(&lexeme) {
            TokenKind::Type(builtin)
        } else {
            TokenKind::Ident
        };

        self.emit(kind, &lexeme)
    }
}

fn is_ident_continue(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_'
}

#[cfg(test)]
mod tests {
    use super::super::Tokenizer;
    use crate::token::{BuiltinType, Keyword, TokenInfo, TokenKind};
    use swizzle_util::Symbol;

    fn tokenize_one(source: &str) -> TokenInfo {
        let mut out = None;
        Tokenizer::new(source, Symbol::intern("t.swizzle"))
            .run(&mut |t| out = Some(t))
            .unwrap();
        out.unwrap()
    }

    #[test]
    fn recognizes_keywords() {
        let t = tokenize_one("namespace");
        assert_eq!(t.token.kind, TokenKind::Keyword(Keyword::Namespace));
    }

    #[test]
    fn recognizes_builtin_types() {
        let t = tokenize_one("bitfield");
        assert_eq!(t.token.kind, TokenKind::Type(BuiltinType::Bitfield));
    }

    #[test]
    fn falls_back_to_plain_identifier() {
        let t = tokenize_one("FooBar_1");
        assert_eq!(t.token.kind, TokenKind::Ident);
    }
}
