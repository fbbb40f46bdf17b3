//! Tokenizer error kinds (§6.4, cross-checked against `Exceptions.hpp`).

use crate::tokenizer::TokenizerState;
use swizzle_util::FileInfo;
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum TokenizerError {
    #[error("tokenizer error: {0}")]
    Generic(String),

    #[error("{reason} at {file_info}")]
    SyntaxError { file_info: FileInfo, reason: String },

    #[error("unknown tokenizer state: {0:?}")]
    UnknownState(TokenizerState),
}

pub type TokenizerResult<T> = std::result::Result<T, TokenizerError>;
