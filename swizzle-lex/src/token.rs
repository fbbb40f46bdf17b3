//! Token value types: the closed `TokenKind` set, keyword/builtin-type
//! tags, and the `Token`/`TokenInfo` pair the tokenizer emits.

use std::fmt;
use swizzle_util::{FileInfo, Symbol};

/// Schema-language keywords. `bitfield` and `variable_block` are deliberately
/// absent here — they are `Type` tokens, resolving the open question in the
/// design notes about which closed set they belong to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Keyword {
    Import,
    Namespace,
    Using,
    Struct,
    Enum,
    Const,
    Case,
    Extern,
}

impl Keyword {
    pub fn from_str(s: &str) -> Option<Self> {
        Some(match s {
            "import" => Keyword::Import,
            "namespace" => Keyword::Namespace,
            "using" => Keyword::Using,
            "struct" => Keyword::Struct,
            "enum" => Keyword::Enum,
            "const" => Keyword::Const,
            "case" => Keyword::Case,
            "extern" => Keyword::Extern,
            _ => return None,
        })
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Keyword::Import => "import",
            Keyword::Namespace => "namespace",
            Keyword::Using => "using",
            Keyword::Struct => "struct",
            Keyword::Enum => "enum",
            Keyword::Const => "const",
            Keyword::Case => "case",
            Keyword::Extern => "extern",
        }
    }
}

/// Built-in scalar widths plus the two compound type mnemonics.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum BuiltinType {
    U8,
    I8,
    U16,
    I16,
    U32,
    I32,
    U64,
    I64,
    F32,
    F64,
    Bitfield,
    VariableBlock,
}

impl BuiltinType {
    pub fn from_str(s: &str) -> Option<Self> {
        Some(match s {
            "u8" => BuiltinType::U8,
            "i8" => BuiltinType::I8,
            "u16" => BuiltinType::U16,
            "i16" => BuiltinType::I16,
            "u32" => BuiltinType::U32,
            "i32" => BuiltinType::I32,
            "u64" => BuiltinType::U64,
            "i64" => BuiltinType::I64,
            "f32" => BuiltinType::F32,
            "f64" => BuiltinType::F64,
            "bitfield" => BuiltinType::Bitfield,
            "variable_block" => BuiltinType::VariableBlock,
            _ => return None,
        })
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            BuiltinType::U8 => "u8",
            BuiltinType::I8 => "i8",
            BuiltinType::U16 => "u16",
            BuiltinType::I16 => "i16",
            BuiltinType::U32 => "u32",
            BuiltinType::I32 => "i32",
            BuiltinType::U64 => "u64",
            BuiltinType::I64 => "i64",
            BuiltinType::F32 => "f32",
            BuiltinType::F64 => "f64",
            BuiltinType::Bitfield => "bitfield",
            BuiltinType::VariableBlock => "variable_block",
        }
    }

    /// Whether this mnemonic names an integer width (as opposed to `f32`/`f64`
    /// or one of the two compound markers). Enum and bitfield underlying
    /// types are always one of these.
    pub fn is_integer(&self) -> bool {
        !matches!(
            self,
            BuiltinType::F32 | BuiltinType::F64 | BuiltinType::Bitfield | BuiltinType::VariableBlock
        )
    }
}

/// The closed token-kind set (§3.2).
#[derive(Clone, Debug, PartialEq)]
pub enum TokenKind {
    Ident,
    StringLiteral,
    CharLiteral,
    NumericLiteral,
    FloatLiteral,
    HexLiteral,
    Attribute,
    AttributeBlock,
    Keyword(Keyword),
    Type(BuiltinType),
    LBrace,
    RBrace,
    LBracket,
    RBracket,
    Equal,
    Semicolon,
    Dot,
    Comma,
    Colon,
    Comment,
    MultilineComment,
    Whitespace,
    Eof,
}

/// A lexeme tagged with its kind. The lexeme text is interned, not borrowed
/// from the source buffer (see the crate-level design notes).
#[derive(Clone, Debug, PartialEq)]
pub struct Token {
    pub kind: TokenKind,
    pub lexeme: Symbol,
}

impl Token {
    pub fn new(kind: TokenKind, lexeme: Symbol) -> Self {
        Self { kind, lexeme }
    }
}

/// A token plus the source range it came from; the unit the parser consumes.
#[derive(Clone, Debug, PartialEq)]
pub struct TokenInfo {
    pub token: Token,
    pub file_info: FileInfo,
}

impl TokenInfo {
    pub fn new(token: Token, file_info: FileInfo) -> Self {
        Self { token, file_info }
    }
}

impl fmt::Display for TokenInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?} {:?} at {}", self.token.kind, self.token.lexeme.as_str(), self.file_info)
    }
}
