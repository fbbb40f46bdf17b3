//! Parser error kinds (§6.4, §7): a generic message, a syntax error carrying
//! the offending token's position, and an unknown-parser-state error for the
//! pushdown machine's own breadcrumb trail.

use crate::parser::ParserState;
use swizzle_lex::TokenInfo;
use swizzle_util::ValueError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ParserError {
    /// An internal invariant violation — a stack-top precondition failed.
    /// Indicates a bug in this crate, not bad input (§7).
    #[error("parser error: {0}")]
    Generic(String),

    /// A user-facing grammar violation, carrying the offending token's
    /// position for diagnostics.
    #[error("{message} at {}", .found.file_info)]
    SyntaxError { message: String, found: TokenInfo },

    #[error("unknown parser state: {0:?}")]
    UnknownState(ParserState),
}

pub type ParserResult<T> = std::result::Result<T, ParserError>;

impl ParserError {
    pub fn syntax(message: impl Into<String>, found: &TokenInfo) -> Self {
        ParserError::SyntaxError {
            message: message.into(),
            found: found.clone(),
        }
    }

    /// Rewrap a `SetValue` failure as a `SyntaxError` naming the field,
    /// per §4.2.3's "SetValue error rewrapping" rule.
    pub fn from_value_error(err: ValueError, field_name: &str, found: &TokenInfo) -> Self {
        let message = match err {
            ValueError::Overflow(lexeme) => {
                format!("value '{lexeme}' overflows the type of field '{field_name}'")
            }
            ValueError::Underflow(lexeme) => {
                format!("value '{lexeme}' underflows the type of field '{field_name}'")
            }
            ValueError::InvalidStreamInput(lexeme) => {
                format!("value '{lexeme}' for field '{field_name}' contains an invalid character")
            }
            ValueError::StreamEmpty => {
                format!("field '{field_name}' is missing a value")
            }
        };
        ParserError::syntax(message, found)
    }
}
