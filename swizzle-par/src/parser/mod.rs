//! The parser: a pushdown state machine turning a `TokenInfo` stream into
//! an [`Ast`] (§4.2). Grouped into one module per syntactic category
//! (attributes, bitfields, enums, namespaces, structs) rather than one
//! source file per individual state.

mod attribute;
mod bitfield;
mod enum_decl;
mod namespace;
mod struct_decl;

use crate::ast::{Ast, NodeId, NodeKindTag};
use crate::context::{ImportResolver, ParserContext};
use crate::error::{ParserError, ParserResult};
use crate::matchers::has_child_not_of;
use crate::symbol_table::{SymbolInfo, SymbolKind, TypeCache};
use crate::ast::QualifiedName;
use swizzle_lex::{BuiltinType, Keyword, Token, TokenInfo, TokenKind};
use swizzle_util::Symbol;

/// The closed parser state set (§4.2.1, §3.1 of the glossary): ~70 states,
/// tracked on `Parser::state` for diagnostics (`UnknownParserState`) and as
/// a breadcrumb of which production is active, rather than as a literal
/// transition table — either organization is a valid reading of a pushdown
/// parser, and this crate follows the same per-concern-module shape as the
/// tokenizer.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ParserState {
    Init,
    TranslationUnitMain,

    StartNamespace,
    NamespaceSegment,
    NamespaceScopeOperator,
    NamespaceSemicolon,

    StartImport,
    ImportSegment,
    ImportScopeOperator,
    ImportSemicolon,
    ImportValueState,

    StartExtern,
    ExternSegment,
    ExternScopeOperator,
    ExternSemicolon,

    StartUsing,
    UsingName,
    UsingEqual,
    UsingTarget,
    UsingTargetScopeOperator,
    UsingSemicolon,

    StartEnum,
    EnumName,
    EnumColon,
    EnumUnderlyingType,
    EnumStartScope,
    EnumFieldName,
    EnumFieldEqual,
    EnumFieldEqualRead,
    EnumFieldComma,
    EnumEndScope,

    StartBitfield,
    BitfieldName,
    BitfieldColon,
    BitfieldUnderlyingType,
    BitfieldStartScope,
    BitfieldFieldName,
    BitfieldFieldColon,
    BitfieldFieldBeginRead,
    BitfieldFieldRangeOperator,
    BitfieldFieldEndRead,
    BitfieldFieldComma,
    BitfieldEndScope,

    StartStruct,
    StructName,
    StructStartScope,
    StructFieldLabelRead,
    StructFieldConst,
    StructFieldType,
    StructFieldTypeScopeOperator,
    StructFieldBracketOpen,
    StructFieldArraySizeRead,
    StructFieldVectorSizerRead,
    StructFieldVectorSizerMember,
    StructFieldBracketClose,
    StructFieldNameRead,
    StructFieldEqual,
    StructFieldEqualRead,
    StructFieldSemicolon,
    StructEndScope,

    StartVariableBlock,
    VariableBlockColon,
    VariableBlockDiscriminant,
    VariableBlockDiscriminantMember,
    VariableBlockStartScope,
    VariableBlockCaseKeyword,
    VariableBlockCaseValue,
    VariableBlockCaseColon,
    VariableBlockCaseTarget,
    VariableBlockCaseTargetScopeOperator,
    VariableBlockCaseSemicolon,
    VariableBlockEndScope,

    AttributeSigil,
    AttributeName,
    AttributeEqual,
    AttributeValueRead,
    AttributeBlockToken,

    CommentToken,
    MultilineCommentToken,
}

/// The result of a completed parse: the tree plus the symbol tables built
/// alongside it.
pub struct ParseOutput {
    pub ast: Ast,
    pub symbol_table: crate::symbol_table::SymbolTable,
    pub type_cache: TypeCache,
}

/// The pushdown parser. Owns its `Ast`, its three working stacks (§3.5),
/// and its `ParserContext` (§3.4) — not `Sync`, and not meant to be shared
/// across threads (§5); callers parallelizing over files construct one
/// `Parser` per file.
pub struct Parser {
    tokens: Vec<TokenInfo>,
    pos: usize,
    pub(crate) state: ParserState,
    pub(crate) ast: Ast,
    pub(crate) node_stack: Vec<NodeId>,
    pub(crate) attribute_stack: Vec<NodeId>,
    pub(crate) token_stack: Vec<TokenInfo>,
    pub(crate) context: ParserContext,
}

impl Parser {
    pub fn new(tokens: Vec<TokenInfo>, import_resolver: Box<dyn ImportResolver>) -> Self {
        let mut ast = Ast::new();
        let root = ast.root();
        Self {
            tokens,
            pos: 0,
            state: ParserState::Init,
            ast,
            node_stack: vec![root],
            attribute_stack: Vec::new(),
            token_stack: Vec::new(),
            context: ParserContext::new(import_resolver),
        }
    }

    pub fn without_imports(tokens: Vec<TokenInfo>) -> Self {
        Self::new(tokens, Box::new(crate::context::NullImportResolver))
    }

    /// Consume the whole token stream, building the AST. Halts on the
    /// first error with no rewind (§4.2.5).
    pub fn run(mut self) -> ParserResult<ParseOutput> {
        self.state = ParserState::TranslationUnitMain;

        loop {
            let Some(tok) = self.peek() else { break };

            match &tok.token.kind {
                TokenKind::Keyword(Keyword::Namespace) => self.parse_namespace()?,
                TokenKind::Keyword(Keyword::Import) => self.parse_import()?,
                TokenKind::Keyword(Keyword::Extern) => self.parse_extern()?,
                TokenKind::Keyword(Keyword::Using) => self.parse_using()?,
                TokenKind::Keyword(Keyword::Enum) => self.parse_enum()?,
                TokenKind::Keyword(Keyword::Struct) => self.parse_struct()?,
                TokenKind::Type(BuiltinType::Bitfield) => self.parse_bitfield()?,
                TokenKind::Attribute | TokenKind::AttributeBlock => {
                    self.parse_attribute_decoration()?
                }
                TokenKind::Comment => {
                    self.state = ParserState::CommentToken;
                    let tok = self.advance().unwrap();
                    let root = self.ast.root();
                    self.ast.append_child(root, crate::ast::NodeKind::Comment(tok.token.lexeme));
                }
                TokenKind::MultilineComment => {
                    self.state = ParserState::MultilineCommentToken;
                    let tok = self.advance().unwrap();
                    let root = self.ast.root();
                    self.ast
                        .append_child(root, crate::ast::NodeKind::MultilineComment(tok.token.lexeme));
                }
                other => {
                    return Err(ParserError::syntax(
                        format!("unexpected token {other:?} at top level"),
                        &tok,
                    ));
                }
            }
        }

        if self.node_stack.len() != 1 || self.node_stack[0] != self.ast.root() {
            return Err(ParserError::Generic(
                "node stack not balanced at end of input".to_string(),
            ));
        }
        if !self.attribute_stack.is_empty() {
            return Err(ParserError::Generic(
                "dangling attributes never attached to a declaration".to_string(),
            ));
        }
        if !self.token_stack.is_empty() {
            return Err(ParserError::Generic(
                "dangling buffered tokens at end of input".to_string(),
            ));
        }

        Ok(ParseOutput {
            ast: self.ast,
            symbol_table: self.context.symbol_table,
            type_cache: self.context.type_cache,
        })
    }

    // -- token-stream helpers -------------------------------------------

    pub(crate) fn peek(&self) -> Option<TokenInfo> {
        self.tokens.get(self.pos).cloned()
    }

    pub(crate) fn peek_kind(&self) -> Option<TokenKind> {
        self.tokens.get(self.pos).map(|t| t.token.kind.clone())
    }

    pub(crate) fn peek2_kind(&self) -> Option<TokenKind> {
        self.tokens.get(self.pos + 1).map(|t| t.token.kind.clone())
    }

    pub(crate) fn advance(&mut self) -> Option<TokenInfo> {
        let tok = self.tokens.get(self.pos).cloned();
        if tok.is_some() {
            self.pos += 1;
        }
        tok
    }

    pub(crate) fn eof_token(&self) -> TokenInfo {
        self.tokens
            .last()
            .cloned()
            .unwrap_or_else(|| {
                TokenInfo::new(
                    Token::new(TokenKind::Eof, Symbol::intern("")),
                    swizzle_util::FileInfo::new(Symbol::intern("<eof>")),
                )
            })
    }

    /// Consume the current token, requiring it to have kind `kind`.
    pub(crate) fn expect_kind(&mut self, kind: TokenKind, message: &str) -> ParserResult<TokenInfo> {
        match self.peek() {
            Some(tok) if tok.token.kind == kind => {
                self.advance();
                Ok(tok)
            }
            Some(tok) => Err(ParserError::syntax(message.to_string(), &tok)),
            None => Err(ParserError::syntax(message.to_string(), &self.eof_token())),
        }
    }

    /// Consume the current token, requiring it to be an identifier, and
    /// return its interned lexeme.
    pub(crate) fn expect_ident(&mut self) -> ParserResult<Symbol> {
        match self.peek() {
            Some(tok) if tok.token.kind == TokenKind::Ident => {
                self.advance();
                Ok(tok.token.lexeme)
            }
            Some(tok) => Err(ParserError::syntax(
                format!("expected an identifier, found {:?}", tok.token.kind),
                &tok,
            )),
            None => Err(ParserError::syntax(
                "expected an identifier, found end of input",
                &self.eof_token(),
            )),
        }
    }

    /// Consume the current token, requiring it to be a built-in type
    /// mnemonic, and return the corresponding `BuiltinType`.
    pub(crate) fn expect_builtin_type(&mut self) -> ParserResult<BuiltinType> {
        match self.peek() {
            Some(tok) => match tok.token.kind {
                TokenKind::Type(t) => {
                    self.advance();
                    Ok(t)
                }
                _ => Err(ParserError::syntax(
                    format!("expected a built-in type, found {:?}", tok.token.kind),
                    &tok,
                )),
            },
            None => Err(ParserError::syntax(
                "expected a built-in type, found end of input",
                &self.eof_token(),
            )),
        }
    }

    /// Consume two adjacent `Colon` tokens as the `::` scope operator
    /// (§3.2: the tokenizer never fuses them itself).
    pub(crate) fn expect_scope_operator(&mut self) -> ParserResult<()> {
        self.expect_kind(TokenKind::Colon, "expected ':' to begin the scope operator '::'")?;
        self.expect_kind(
            TokenKind::Colon,
            "expected a second ':' to complete the scope operator '::'",
        )?;
        Ok(())
    }

    /// Parse `ident ('::' ident)*`, the shape shared by `namespace`,
    /// `import`, `extern`, and qualified type names.
    pub(crate) fn parse_path_segments(&mut self) -> ParserResult<Vec<Symbol>> {
        let mut segments = vec![self.expect_ident()?];
        while self.peek_kind() == Some(TokenKind::Colon) {
            self.expect_scope_operator()?;
            segments.push(self.expect_ident()?);
        }
        Ok(segments)
    }

    /// Drain any attributes accumulated on `attribute_stack` onto `target`
    /// as its leading children, in accumulation order (§4.2.3).
    pub(crate) fn attach_attributes(&mut self, target: NodeId) {
        if self.attribute_stack.is_empty() {
            return;
        }
        let pending = std::mem::take(&mut self.attribute_stack);
        self.ast.attach_children(target, pending);
    }

    pub(crate) fn current_namespace_qualified(&self, name: Symbol) -> QualifiedName {
        QualifiedName(self.context.qualify(name))
    }

    /// Register a freshly closed declaration in both the symbol table and
    /// the type cache under its fully-qualified name (§4.3).
    pub(crate) fn register_symbol(
        &mut self,
        name: Symbol,
        kind: SymbolKind,
        node: NodeId,
        found: &TokenInfo,
    ) -> ParserResult<()> {
        let qualified = self.current_namespace_qualified(name);
        self.context.symbol_table.insert(
            SymbolInfo {
                name: qualified.clone(),
                kind,
                node,
            },
            found,
        )?;
        self.context.type_cache.insert(qualified, node);
        Ok(())
    }

    /// Requires at least one child whose tag is outside `kinds` — the
    /// "non-comment children" check `EnumStartScopeState.cpp` performs at
    /// `}` (§4.2.3).
    pub(crate) fn require_non_comment_child(
        &self,
        id: NodeId,
        found: &TokenInfo,
        empty_message: &str,
    ) -> ParserResult<()> {
        if has_child_not_of(
            &self.ast,
            id,
            &[NodeKindTag::Comment, NodeKindTag::MultilineComment],
        ) {
            Ok(())
        } else {
            Err(ParserError::syntax(empty_message.to_string(), found))
        }
    }

    /// The node at the top of `node_stack` — the currently-open declaration.
    pub(crate) fn current_scope(&self) -> ParserResult<NodeId> {
        self.node_stack
            .last()
            .copied()
            .ok_or_else(|| ParserError::Generic("node stack underflow".to_string()))
    }
}
