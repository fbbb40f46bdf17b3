//! `namespace` / `import` / `extern` / `using` declarations (§4.2.2,
//! §4.2.3's "namespace segments" and "import resolution" rules).

use super::{Parser, ParserState};
use crate::ast::{NodeKind, QualifiedName};
use crate::error::{ParserError, ParserResult};
use crate::symbol_table::SymbolKind;
use swizzle_lex::TokenKind;

impl Parser {
    pub(crate) fn parse_namespace(&mut self) -> ParserResult<()> {
        self.state = ParserState::StartNamespace;
        self.advance(); // 'namespace'

        self.state = ParserState::NamespaceSegment;
        let segments = self.parse_path_segments()?;

        self.state = ParserState::NamespaceSemicolon;
        self.expect_kind(
            TokenKind::Semicolon,
            "expected ';' to close a namespace declaration",
        )?;

        self.context.current_namespace = segments.clone();

        let root = self.ast.root();
        let id = self.ast.append_child(
            root,
            NodeKind::Namespace {
                path: QualifiedName(segments),
            },
        );
        self.attach_attributes(id);
        Ok(())
    }

    pub(crate) fn parse_import(&mut self) -> ParserResult<()> {
        self.state = ParserState::StartImport;
        self.advance(); // 'import'

        self.state = ParserState::ImportSegment;
        let segments = self.parse_path_segments()?;

        self.state = ParserState::ImportSemicolon;
        self.expect_kind(
            TokenKind::Semicolon,
            "expected ';' to close an import declaration",
        )?;

        self.state = ParserState::ImportValueState;
        match self.context.resolve_import(&segments) {
            Ok(_) => {}
            Err(_) => {
                return Err(ParserError::Generic(format!(
                    "import path for '{}' does not exist or is a directory",
                    segments
                        .iter()
                        .map(|s| s.as_str())
                        .collect::<Vec<_>>()
                        .join("::")
                )));
            }
        }

        let root = self.ast.root();
        let id = self.ast.append_child(
            root,
            NodeKind::Import {
                path: QualifiedName(segments),
            },
        );
        self.attach_attributes(id);
        Ok(())
    }

    pub(crate) fn parse_extern(&mut self) -> ParserResult<()> {
        self.state = ParserState::StartExtern;
        self.advance(); // 'extern'

        self.state = ParserState::ExternSegment;
        let segments = self.parse_path_segments()?;

        self.state = ParserState::ExternSemicolon;
        self.expect_kind(
            TokenKind::Semicolon,
            "expected ';' to close an extern declaration",
        )?;

        let root = self.ast.root();
        let id = self.ast.append_child(
            root,
            NodeKind::Extern {
                path: QualifiedName(segments),
            },
        );
        self.attach_attributes(id);
        Ok(())
    }

    pub(crate) fn parse_using(&mut self) -> ParserResult<()> {
        self.state = ParserState::StartUsing;
        self.advance(); // 'using'

        self.state = ParserState::UsingName;
        let name = self.expect_ident()?;

        self.state = ParserState::UsingEqual;
        self.expect_kind(TokenKind::Equal, "expected '=' in a 'using' alias")?;

        self.state = ParserState::UsingTarget;
        let target = self.parse_path_segments()?;

        self.state = ParserState::UsingSemicolon;
        let found = self.expect_kind(
            TokenKind::Semicolon,
            "expected ';' to close a 'using' alias",
        )?;

        let root = self.ast.root();
        let id = self.ast.append_child(
            root,
            NodeKind::TypeAlias {
                name,
                target: QualifiedName(target),
            },
        );
        self.attach_attributes(id);
        self.register_symbol(name, SymbolKind::TypeAlias, id, &found)?;
        Ok(())
    }
}
