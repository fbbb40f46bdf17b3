//! Tree-structure predicates (§4.6): plain functions over `NodeKindTag`
//! rather than a generic predicate-object hierarchy, since every call site
//! just needs a yes/no answer. Used both by parser states (the empty-enum
//! check) and by the test suite.

use crate::ast::{Ast, NodeId, NodeKind, NodeKindTag};

/// True if any direct child of `id` has a kind tag in `kinds`.
pub fn has_child_of(ast: &Ast, id: NodeId, kinds: &[NodeKindTag]) -> bool {
    ast.children(id)
        .iter()
        .any(|&c| kinds.contains(&ast.kind(c).tag()))
}

/// True if any direct child of `id` has a kind tag *not* in `kinds` — the
/// complement, used by `EnumStartScopeState.cpp`'s "has at least one
/// non-comment field" check (`hasChildNotOf<Comment, MultilineComment>()`
/// in the original source).
pub fn has_child_not_of(ast: &Ast, id: NodeId, kinds: &[NodeKindTag]) -> bool {
    ast.children(id)
        .iter()
        .any(|&c| !kinds.contains(&ast.kind(c).tag()))
}

/// True if `kind`'s own tag is absent from `kinds`.
pub fn is_not_type_of(kind: &NodeKind, kinds: &[NodeKindTag]) -> bool {
    !kinds.contains(&kind.tag())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::QualifiedName;
    use swizzle_util::Symbol;

    #[test]
    fn has_child_of_finds_a_matching_tag() {
        let mut ast = Ast::new();
        let root = ast.root();
        ast.append_child(root, NodeKind::Comment(Symbol::intern("// x")));
        assert!(has_child_of(&ast, root, &[NodeKindTag::Comment]));
        assert!(!has_child_of(&ast, root, &[NodeKindTag::Struct]));
    }

    #[test]
    fn has_child_not_of_is_the_complement() {
        let mut ast = Ast::new();
        let root = ast.root();
        ast.append_child(root, NodeKind::Comment(Symbol::intern("// x")));
        assert!(!has_child_not_of(&ast, root, &[NodeKindTag::Comment]));

        ast.append_child(
            root,
            NodeKind::Namespace {
                path: QualifiedName::single(Symbol::intern("foo")),
            },
        );
        assert!(has_child_not_of(&ast, root, &[NodeKindTag::Comment]));
    }

    #[test]
    fn is_not_type_of_checks_the_nodes_own_tag() {
        let kind = NodeKind::Comment(Symbol::intern("// x"));
        assert!(!is_not_type_of(&kind, &[NodeKindTag::Comment]));
        assert!(is_not_type_of(&kind, &[NodeKindTag::Struct]));
    }
}
