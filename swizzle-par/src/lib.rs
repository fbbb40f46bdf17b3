//! Syntactic analysis for Swizzle schema source.
//!
//! [`Parser`] turns a [`swizzle_lex::TokenInfo`] stream into an [`Ast`]: a
//! pushdown state machine (§4.2) grouped into one module per syntactic
//! category (`namespace`, `enum_decl`, `bitfield`, `struct_decl`,
//! `attribute`) rather than a single file, the way `swizzle_lex::tokenizer`
//! splits its own states. It performs no file I/O itself — `import`/`extern`
//! resolution is delegated to an injected [`ImportResolver`].

pub mod ast;
pub mod context;
pub mod error;
pub mod matchers;
mod parser;
pub mod symbol_table;
pub mod value;
pub mod visitor;

pub use ast::{Ast, FieldRef, Node, NodeId, NodeKind, NodeKindTag, QualifiedName, StructFieldData};
pub use context::{ImportError, ImportResolver, NullImportResolver, ParserContext, SourceReader};
pub use error::{ParserError, ParserResult};
pub use matchers::{has_child_not_of, has_child_of, is_not_type_of};
pub use parser::{ParseOutput, Parser, ParserState};
pub use symbol_table::{SymbolInfo, SymbolKind, SymbolTable, TypeCache};
pub use value::{decode_escapes, set_value, set_value_from_char, set_value_hex, EnumValueKey, Value};
pub use visitor::{accept, Depth, Visitor};
