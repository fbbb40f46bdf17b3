//! Error kinds shared between the tokenizer and the parser.
//!
//! `swizzle-lex` and `swizzle-par` each add their own error enum on top of
//! these (see their respective `error` modules); the two kinds here are
//! common to both because `SetValue` conversion is used while tokenizing hex
//! digits as well as while parsing enum/struct field values.

use thiserror::Error;

/// Errors raised while parsing a literal lexeme into a width-checked value.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ValueError {
    #[error("invalid stream input: {0}")]
    InvalidStreamInput(String),

    #[error("stream empty")]
    StreamEmpty,

    #[error("stream input causes overflow: {0}")]
    Overflow(String),

    #[error("stream input causes underflow: {0}")]
    Underflow(String),
}

/// Alias kept for call sites that conceptually deal with `SetValue` rather
/// than the lower-level value representation.
pub type SetValueError = ValueError;

pub type ValueResult<T> = std::result::Result<T, ValueError>;
