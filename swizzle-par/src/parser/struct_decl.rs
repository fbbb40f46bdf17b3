//! `struct` declarations, fields, and `variable_block` members (§4.2.2,
//! §4.2.3's "Struct field"/"Variable block" rules).

use super::{Parser, ParserState};
use crate::ast::{FieldRef, NodeId, NodeKind, QualifiedName, StructFieldData};
use crate::error::{ParserError, ParserResult};
use crate::symbol_table::SymbolKind;
use crate::value::EnumValueKey;
use std::collections::HashSet;
use swizzle_lex::{BuiltinType, Keyword, TokenInfo, TokenKind};
use swizzle_util::Symbol;

impl Parser {
    pub(crate) fn parse_struct(&mut self) -> ParserResult<()> {
        self.state = ParserState::StartStruct;
        self.advance(); // 'struct'

        self.state = ParserState::StructName;
        let name = self.expect_ident()?;

        self.state = ParserState::StructStartScope;
        self.expect_kind(TokenKind::LBrace, "expected '{' to open a struct body")?;

        let root = self.ast.root();
        let struct_id = self.ast.append_child(root, NodeKind::Struct { name });
        self.attach_attributes(struct_id);
        self.node_stack.push(struct_id);

        loop {
            match self.peek_kind() {
                Some(TokenKind::RBrace) => break,
                Some(TokenKind::Comment) => {
                    self.state = ParserState::CommentToken;
                    let tok = self.advance().unwrap();
                    self.ast.append_child(struct_id, NodeKind::Comment(tok.token.lexeme));
                }
                Some(TokenKind::MultilineComment) => {
                    self.state = ParserState::MultilineCommentToken;
                    let tok = self.advance().unwrap();
                    self.ast
                        .append_child(struct_id, NodeKind::MultilineComment(tok.token.lexeme));
                }
                Some(TokenKind::Attribute) | Some(TokenKind::AttributeBlock) => {
                    self.parse_attribute_decoration()?
                }
                Some(TokenKind::Type(BuiltinType::VariableBlock)) => {
                    self.parse_variable_block(struct_id)?
                }
                Some(TokenKind::Keyword(Keyword::Const))
                | Some(TokenKind::Ident)
                | Some(TokenKind::Type(_))
                | Some(TokenKind::NumericLiteral) => self.parse_struct_member(struct_id)?,
                Some(_) => {
                    let tok = self.peek().unwrap();
                    return Err(ParserError::syntax("expected a struct member or '}'", &tok));
                }
                None => {
                    return Err(ParserError::syntax("unterminated struct body", &self.eof_token()));
                }
            }
        }

        self.state = ParserState::StructEndScope;
        let close = self.expect_kind(TokenKind::RBrace, "expected '}' to close a struct body")?;

        self.node_stack.pop();
        self.register_symbol(name, SymbolKind::Struct, struct_id, &close)?;
        Ok(())
    }

    fn parse_struct_member(&mut self, struct_id: NodeId) -> ParserResult<()> {
        self.state = ParserState::StructFieldLabelRead;
        let label = if self.peek_kind() == Some(TokenKind::NumericLiteral) {
            if self.peek2_kind() != Some(TokenKind::Colon) {
                let tok = self.peek().unwrap();
                return Err(ParserError::syntax(
                    "a bare numeric literal in a struct body is only valid as a field label ('N:')",
                    &tok,
                ));
            }
            let tok = self.advance().unwrap();
            let value: i64 = tok
                .token
                .lexeme
                .as_str()
                .parse()
                .map_err(|_| ParserError::syntax("invalid field label", &tok))?;
            self.advance(); // ':'
            Some(value)
        } else {
            None
        };

        self.state = ParserState::StructFieldConst;
        let is_const = if self.peek_kind() == Some(TokenKind::Keyword(Keyword::Const)) {
            self.advance();
            true
        } else {
            false
        };

        self.state = ParserState::StructFieldType;
        let (type_name, builtin) = self.parse_qualified_type()?;

        self.state = ParserState::StructFieldBracketOpen;
        let mut array_size: Option<i64> = None;
        let mut vector_sizer: Option<FieldRef> = None;
        if self.peek_kind() == Some(TokenKind::LBracket) {
            self.advance();
            match self.peek_kind() {
                Some(TokenKind::NumericLiteral) => {
                    self.state = ParserState::StructFieldArraySizeRead;
                    let tok = self.advance().unwrap();
                    let size: i64 = tok
                        .token
                        .lexeme
                        .as_str()
                        .parse()
                        .map_err(|_| ParserError::syntax("invalid array size", &tok))?;
                    array_size = Some(size);
                }
                Some(TokenKind::Ident) => {
                    self.state = ParserState::StructFieldVectorSizerRead;
                    let field = self.expect_ident()?;
                    let member = if self.peek_kind() == Some(TokenKind::Dot) {
                        self.state = ParserState::StructFieldVectorSizerMember;
                        self.advance();
                        Some(self.expect_ident()?)
                    } else {
                        None
                    };
                    vector_sizer = Some(FieldRef { field, member });
                }
                Some(_) => {
                    let tok = self.peek().unwrap();
                    return Err(ParserError::syntax(
                        "expected an array size or a vector sizer name inside '[...]'",
                        &tok,
                    ));
                }
                None => {
                    return Err(ParserError::syntax("unterminated '['", &self.eof_token()));
                }
            }
            self.state = ParserState::StructFieldBracketClose;
            self.expect_kind(TokenKind::RBracket, "expected ']' to close an array/vector size")?;
        }

        self.state = ParserState::StructFieldNameRead;
        let name_tok = self.peek();
        let field_name = self.expect_ident()?;

        if builtin.is_none() {
            let found = name_tok.clone().unwrap();
            self.resolve_type(&type_name, &found)?;
        }
        if let Some(sizer) = vector_sizer {
            let found = name_tok.unwrap();
            self.validate_vector_sizer(struct_id, sizer, &found)?;
        }

        self.state = ParserState::StructFieldEqual;
        let default_node = if self.peek_kind() == Some(TokenKind::Equal) {
            self.advance();
            self.state = ParserState::StructFieldEqualRead;
            Some(self.parse_struct_default(builtin, array_size, vector_sizer.is_some(), field_name)?)
        } else {
            None
        };

        self.state = ParserState::StructFieldSemicolon;
        self.expect_kind(TokenKind::Semicolon, "expected ';' to close a struct field")?;

        let data = StructFieldData {
            name: field_name,
            type_name,
            is_const,
        };
        let field_id = self.ast.append_child(struct_id, NodeKind::StructField(data));
        self.attach_attributes(field_id);

        if let Some(value) = label {
            self.ast.append_child(field_id, NodeKind::FieldLabel(value));
        }
        if let Some(size) = array_size {
            self.ast.append_child(field_id, NodeKind::ArrayMarker { size });
        }
        if let Some(sizer) = vector_sizer {
            self.ast.append_child(field_id, NodeKind::VectorMarker { sizer });
        }
        if let Some(default_id) = default_node {
            self.ast.attach_children(field_id, vec![default_id]);
        }

        Ok(())
    }

    /// `u8`/`i8`/... as a single `Type` token, or `ident ('::' ident)*`.
    fn parse_qualified_type(&mut self) -> ParserResult<(QualifiedName, Option<BuiltinType>)> {
        if let Some(TokenKind::Type(t)) = self.peek_kind() {
            self.advance();
            return Ok((QualifiedName::single(Symbol::intern(t.as_str())), Some(t)));
        }
        let segments = self.parse_path_segments()?;
        Ok((QualifiedName(segments), None))
    }

    /// Resolution order (§4.2.3): built-in mnemonic (handled by the caller
    /// before this is reached), the fully-qualified symbol as given, then
    /// `CurrentNamespace::name`.
    fn resolve_type(&self, type_name: &QualifiedName, found: &TokenInfo) -> ParserResult<()> {
        if self.lookup_type_node(type_name).is_some() {
            Ok(())
        } else {
            Err(ParserError::syntax(
                format!("unknown type '{}'", type_name.joined()),
                found,
            ))
        }
    }

    fn lookup_type_node(&self, name: &QualifiedName) -> Option<NodeId> {
        if let Some(node) = self.context.type_cache.get(name) {
            return Some(node);
        }
        let mut qualified = self.context.current_namespace.clone();
        qualified.extend(name.0.iter().copied());
        self.context.type_cache.get(&QualifiedName(qualified))
    }

    fn find_struct_field(&self, struct_id: NodeId, name: Symbol) -> Option<NodeId> {
        self.ast.children(struct_id).iter().copied().find(|&c| {
            matches!(self.ast.kind(c), NodeKind::StructField(data) if data.name == name)
        })
    }

    fn struct_field_data(&self, field_id: NodeId) -> &StructFieldData {
        match self.ast.kind(field_id) {
            NodeKind::StructField(data) => data,
            other => unreachable!("find_struct_field only ever returns StructField ids, got {other:?}"),
        }
    }

    /// §8's quantified property: a vector sizer must name a prior sibling
    /// field (optionally one member deep) whose declared type is an
    /// unsigned integer.
    fn validate_vector_sizer(
        &self,
        struct_id: NodeId,
        sizer: FieldRef,
        found: &TokenInfo,
    ) -> ParserResult<()> {
        let prior = self.find_struct_field(struct_id, sizer.field).ok_or_else(|| {
            ParserError::syntax(
                format!("vector sizer '{}' does not name a prior field of this struct", sizer.field),
                found,
            )
        })?;

        let target = if let Some(member) = sizer.member {
            let prior_data = self.struct_field_data(prior);
            let def = self.lookup_type_node(&prior_data.type_name).ok_or_else(|| {
                ParserError::syntax(
                    format!("'{}' does not name a struct type for nested sizer '{}.{}'", sizer.field, sizer.field, member),
                    found,
                )
            })?;
            self.find_struct_field(def, member).ok_or_else(|| {
                ParserError::syntax(format!("'{}' has no member '{}'", sizer.field, member), found)
            })?
        } else {
            prior
        };

        self.require_unsigned_integer_field(target, sizer.field, found)
    }

    fn require_unsigned_integer_field(
        &self,
        field_id: NodeId,
        sizer_name: Symbol,
        found: &TokenInfo,
    ) -> ParserResult<()> {
        let data = self.struct_field_data(field_id);
        let is_unsigned = matches!(
            data.type_name.0.as_slice(),
            [segment] if matches!(
                BuiltinType::from_str(segment.as_str()),
                Some(BuiltinType::U8 | BuiltinType::U16 | BuiltinType::U32 | BuiltinType::U64)
            )
        );
        if is_unsigned {
            Ok(())
        } else {
            Err(ParserError::syntax(
                format!("vector sizer '{sizer_name}' must name an unsigned integer field"),
                found,
            ))
        }
    }

    /// §4.2.3's default-value rules, confirmed against
    /// `StructFieldEqualReadState.cpp`.
    fn parse_struct_default(
        &mut self,
        builtin: Option<BuiltinType>,
        array_size: Option<i64>,
        is_vector: bool,
        field_name: Symbol,
    ) -> ParserResult<NodeId> {
        let tok = self
            .peek()
            .ok_or_else(|| ParserError::syntax("expected a default value", &self.eof_token()))?;

        if is_vector {
            return Err(ParserError::syntax(
                format!("default values are not permitted for vector field '{field_name}'"),
                &tok,
            ));
        }

        match tok.token.kind {
            TokenKind::LBrace => Err(ParserError::syntax(
                format!(
                    "initialization-list defaults are not supported; give '{field_name}' a single literal default instead"
                ),
                &tok,
            )),
            TokenKind::StringLiteral => {
                let Some(size) = array_size else {
                    return Err(ParserError::syntax(
                        format!("a string default is only permitted for array-typed fields ('{field_name}' is not an array)"),
                        &tok,
                    ));
                };
                self.advance();
                let lexeme = tok.token.lexeme.as_str();
                let body_len = lexeme.len().saturating_sub(2) as i64;
                if body_len > size {
                    return Err(ParserError::syntax(
                        format!(
                            "default string for '{field_name}' would be truncated (length {body_len} exceeds array size {size})"
                        ),
                        &tok,
                    ));
                }
                Ok(self
                    .ast
                    .allocate_detached(NodeKind::DefaultStringValue { value: tok.token.lexeme, storage_len: size }))
            }
            TokenKind::NumericLiteral
            | TokenKind::FloatLiteral
            | TokenKind::HexLiteral
            | TokenKind::CharLiteral => {
                if array_size.is_some() {
                    return Err(ParserError::syntax(
                        format!(
                            "array-typed field '{field_name}' cannot take a scalar default; use an initialization list instead"
                        ),
                        &tok,
                    ));
                }
                let target = builtin.ok_or_else(|| {
                    ParserError::syntax(
                        format!("field '{field_name}' has a user-defined type and cannot take a literal default"),
                        &tok,
                    )
                })?;
                let value = self.parse_scalar_literal(target, field_name.as_str())?;
                Ok(self.ast.allocate_detached(NodeKind::DefaultValue { value }))
            }
            _ => Err(ParserError::syntax(
                "expected a default value (string, numeric, hex, or character literal)",
                &tok,
            )),
        }
    }

    pub(crate) fn parse_variable_block(&mut self, struct_id: NodeId) -> ParserResult<()> {
        self.state = ParserState::StartVariableBlock;
        self.advance(); // the 'variable_block' type token

        self.state = ParserState::VariableBlockColon;
        self.expect_kind(TokenKind::Colon, "expected ':' after 'variable_block'")?;

        self.state = ParserState::VariableBlockDiscriminant;
        let field = self.expect_ident()?;
        let member = if self.peek_kind() == Some(TokenKind::Dot) {
            self.state = ParserState::VariableBlockDiscriminantMember;
            self.advance();
            Some(self.expect_ident()?)
        } else {
            None
        };
        let discriminant = FieldRef { field, member };

        let disc_found = self.peek().unwrap_or_else(|| self.eof_token());
        let underlying = self.validate_variable_block_discriminant(struct_id, discriminant, &disc_found)?;

        self.state = ParserState::VariableBlockStartScope;
        self.expect_kind(TokenKind::LBrace, "expected '{' to open a variable_block body")?;

        let vb_id = self.ast.append_child(struct_id, NodeKind::VariableBlock { discriminant });
        self.attach_attributes(vb_id);
        self.node_stack.push(vb_id);

        let mut seen = HashSet::new();
        loop {
            match self.peek_kind() {
                Some(TokenKind::RBrace) => break,
                Some(TokenKind::Comment) => {
                    self.state = ParserState::CommentToken;
                    let tok = self.advance().unwrap();
                    self.ast.append_child(vb_id, NodeKind::Comment(tok.token.lexeme));
                }
                Some(TokenKind::MultilineComment) => {
                    self.state = ParserState::MultilineCommentToken;
                    let tok = self.advance().unwrap();
                    self.ast.append_child(vb_id, NodeKind::MultilineComment(tok.token.lexeme));
                }
                Some(TokenKind::Keyword(Keyword::Case)) => {
                    self.parse_variable_block_case(vb_id, underlying, &mut seen)?
                }
                Some(_) => {
                    let tok = self.peek().unwrap();
                    return Err(ParserError::syntax("expected a 'case' arm or '}'", &tok));
                }
                None => {
                    return Err(ParserError::syntax(
                        "unterminated variable_block body",
                        &self.eof_token(),
                    ));
                }
            }
        }

        self.state = ParserState::VariableBlockEndScope;
        self.expect_kind(TokenKind::RBrace, "expected '}' to close a variable_block body")?;
        self.node_stack.pop();
        Ok(())
    }

    fn parse_variable_block_case(
        &mut self,
        vb_id: NodeId,
        underlying: BuiltinType,
        seen: &mut HashSet<EnumValueKey>,
    ) -> ParserResult<()> {
        self.state = ParserState::VariableBlockCaseKeyword;
        self.advance(); // 'case'

        self.state = ParserState::VariableBlockCaseValue;
        let value_tok = self.peek().unwrap_or_else(|| self.eof_token());
        let value = self.parse_scalar_literal(underlying, "case")?;

        self.state = ParserState::VariableBlockCaseColon;
        self.expect_kind(TokenKind::Colon, "expected ':' after a case value")?;

        if !seen.insert(EnumValueKey::from_value(&value)) {
            return Err(ParserError::syntax(
                "duplicate case value in variable_block",
                &value_tok,
            ));
        }

        self.state = ParserState::VariableBlockCaseTarget;
        let target = self.parse_path_segments()?;

        self.state = ParserState::VariableBlockCaseSemicolon;
        self.expect_kind(TokenKind::Semicolon, "expected ';' to close a case")?;

        self.ast.append_child(
            vb_id,
            NodeKind::VariableBlockCase {
                value,
                target: QualifiedName(target),
            },
        );
        Ok(())
    }

    /// §8's quantified property for `variable_block`: the discriminant must
    /// name a prior enum-typed field (optionally one member deep); returns
    /// that enum's underlying type.
    fn validate_variable_block_discriminant(
        &self,
        struct_id: NodeId,
        discriminant: FieldRef,
        found: &TokenInfo,
    ) -> ParserResult<BuiltinType> {
        let prior = self.find_struct_field(struct_id, discriminant.field).ok_or_else(|| {
            ParserError::syntax(
                format!(
                    "variable_block discriminant '{}' does not name a prior field of this struct",
                    discriminant.field
                ),
                found,
            )
        })?;

        let target = if let Some(member) = discriminant.member {
            let prior_data = self.struct_field_data(prior);
            let def = self.lookup_type_node(&prior_data.type_name).ok_or_else(|| {
                ParserError::syntax(
                    format!(
                        "'{}' does not name a struct type for nested discriminant '{}.{}'",
                        discriminant.field, discriminant.field, member
                    ),
                    found,
                )
            })?;
            self.find_struct_field(def, member).ok_or_else(|| {
                ParserError::syntax(
                    format!("'{}' has no member '{}'", discriminant.field, member),
                    found,
                )
            })?
        } else {
            prior
        };

        let target_data = self.struct_field_data(target);
        let enum_node = self.lookup_type_node(&target_data.type_name).ok_or_else(|| {
            ParserError::syntax(
                format!(
                    "variable_block discriminant '{}' is not an enum-typed field",
                    discriminant.field
                ),
                found,
            )
        })?;
        match self.ast.kind(enum_node) {
            NodeKind::Enum { underlying, .. } => Ok(*underlying),
            _ => Err(ParserError::syntax(
                format!(
                    "variable_block discriminant '{}' is not an enum-typed field",
                    discriminant.field
                ),
                found,
            )),
        }
    }
}
