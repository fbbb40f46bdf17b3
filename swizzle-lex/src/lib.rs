//! Lexical analysis for Swizzle schema source.
//!
//! `Tokenizer` is the one entry point: it turns a source buffer into an
//! ordered stream of [`TokenInfo`] delivered through a sink callback. It
//! performs no file I/O and knows nothing about the grammar the parser
//! builds on top of it.

pub mod cursor;
pub mod error;
pub mod token;
pub mod tokenizer;

pub use error::{TokenizerError, TokenizerResult};
pub use token::{BuiltinType, Keyword, Token, TokenInfo, TokenKind};
pub use tokenizer::{Tokenizer, TokenizerState};
