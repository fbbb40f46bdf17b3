//! The AST arena.
//!
//! Every node lives in one `IndexVec<NodeId, Node>` owned by `Ast`; `NodeId`
//! is a plain index, so `Node::parent` is structurally a lookup relation and
//! can never become an ownership edge — there is no `Box<Node>` anywhere for
//! a cycle to hide in. The arena and its `Idx`/`IndexVec` machinery are
//! shared with the span- and symbol-id types elsewhere in the workspace.

use crate::value::Value;
use swizzle_lex::BuiltinType;
use swizzle_util::{define_idx, IndexVec, Symbol};

define_idx!(NodeId);

/// Namespace-qualified name: `a::b::C` as a sequence of interned segments.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct QualifiedName(pub Vec<Symbol>);

impl QualifiedName {
    pub fn single(name: Symbol) -> Self {
        Self(vec![name])
    }

    pub fn joined(&self) -> String {
        self.0
            .iter()
            .map(|s| s.as_str())
            .collect::<Vec<_>>()
            .join("::")
    }
}

/// A reference to a prior sibling field, optionally one member deep
/// (`ident` or `ident.ident`) — used by vector sizers and variable-block
/// discriminants.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct FieldRef {
    pub field: Symbol,
    pub member: Option<Symbol>,
}

/// Payload for a `StructField` node (§3.3).
///
/// Array size, vector sizer, field label, and default value are each their
/// own child node kind in the closed set (`ArrayMarker`, `VectorMarker`,
/// `FieldLabel`, `DefaultValue`/`DefaultStringValue`) rather than duplicated
/// here as inline options — a field's modifiers live where the rest of the
/// tree's structure lives, so a matcher query like "does this field have a
/// default" is the same `has_child_of` shape used everywhere else instead of
/// a one-off accessor.
#[derive(Clone, Debug, PartialEq)]
pub struct StructFieldData {
    pub name: Symbol,
    pub type_name: QualifiedName,
    pub is_const: bool,
}

/// The closed set of AST node kinds (§3.3), one variant per concrete
/// declaration, field, literal leaf, or structural marker the grammar names.
#[derive(Clone, Debug, PartialEq)]
pub enum NodeKind {
    Root,
    Namespace { path: QualifiedName },
    Import { path: QualifiedName },
    Extern { path: QualifiedName },
    TypeAlias { name: Symbol, target: QualifiedName },
    Enum { name: Symbol, underlying: BuiltinType },
    EnumField { name: Symbol, value: Value },
    Bitfield { name: Symbol, underlying: BuiltinType },
    BitfieldField { name: Symbol, begin: i64, end: i64 },
    Struct { name: Symbol },
    StructField(StructFieldData),
    ArrayMarker { size: i64 },
    VectorMarker { sizer: FieldRef },
    VariableBlock { discriminant: FieldRef },
    VariableBlockCase { value: Value, target: QualifiedName },
    Attribute { name: Symbol },
    AttributeBlock { lexeme: Symbol },
    CharLiteral(char),
    StringLiteral(Symbol),
    NumericLiteral(i64),
    HexLiteral(u64),
    DefaultValue { value: Value },
    DefaultStringValue { value: Symbol, storage_len: i64 },
    FieldLabel(i64),
    Comment(Symbol),
    MultilineComment(Symbol),
}

/// A unit-only mirror of [`NodeKind`], used by the matchers (§4.6) to
/// compare "is this node one of these kinds" without requiring `NodeKind`
/// itself (whose payloads are not all comparable in a meaningful way for
/// that question) to implement equality.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum NodeKindTag {
    Root,
    Namespace,
    Import,
    Extern,
    TypeAlias,
    Enum,
    EnumField,
    Bitfield,
    BitfieldField,
    Struct,
    StructField,
    ArrayMarker,
    VectorMarker,
    VariableBlock,
    VariableBlockCase,
    Attribute,
    AttributeBlock,
    CharLiteral,
    StringLiteral,
    NumericLiteral,
    HexLiteral,
    DefaultValue,
    DefaultStringValue,
    FieldLabel,
    Comment,
    MultilineComment,
}

impl NodeKind {
    pub fn tag(&self) -> NodeKindTag {
        match self {
            NodeKind::Root => NodeKindTag::Root,
            NodeKind::Namespace { .. } => NodeKindTag::Namespace,
            NodeKind::Import { .. } => NodeKindTag::Import,
            NodeKind::Extern { .. } => NodeKindTag::Extern,
            NodeKind::TypeAlias { .. } => NodeKindTag::TypeAlias,
            NodeKind::Enum { .. } => NodeKindTag::Enum,
            NodeKind::EnumField { .. } => NodeKindTag::EnumField,
            NodeKind::Bitfield { .. } => NodeKindTag::Bitfield,
            NodeKind::BitfieldField { .. } => NodeKindTag::BitfieldField,
            NodeKind::Struct { .. } => NodeKindTag::Struct,
            NodeKind::StructField(_) => NodeKindTag::StructField,
            NodeKind::ArrayMarker { .. } => NodeKindTag::ArrayMarker,
            NodeKind::VectorMarker { .. } => NodeKindTag::VectorMarker,
            NodeKind::VariableBlock { .. } => NodeKindTag::VariableBlock,
            NodeKind::VariableBlockCase { .. } => NodeKindTag::VariableBlockCase,
            NodeKind::Attribute { .. } => NodeKindTag::Attribute,
            NodeKind::AttributeBlock { .. } => NodeKindTag::AttributeBlock,
            NodeKind::CharLiteral(_) => NodeKindTag::CharLiteral,
            NodeKind::StringLiteral(_) => NodeKindTag::StringLiteral,
            NodeKind::NumericLiteral(_) => NodeKindTag::NumericLiteral,
            NodeKind::HexLiteral(_) => NodeKindTag::HexLiteral,
            NodeKind::DefaultValue { .. } => NodeKindTag::DefaultValue,
            NodeKind::DefaultStringValue { .. } => NodeKindTag::DefaultStringValue,
            NodeKind::FieldLabel(_) => NodeKindTag::FieldLabel,
            NodeKind::Comment(_) => NodeKindTag::Comment,
            NodeKind::MultilineComment(_) => NodeKindTag::MultilineComment,
        }
    }
}

/// One tree node: a typed payload, an ordered child list, and a parent
/// lookup index (`None` only for the root).
#[derive(Clone, Debug, PartialEq)]
pub struct Node {
    pub kind: NodeKind,
    pub children: Vec<NodeId>,
    pub parent: Option<NodeId>,
}

impl Node {
    fn new(kind: NodeKind, parent: Option<NodeId>) -> Self {
        Self {
            kind,
            children: Vec::new(),
            parent,
        }
    }
}

/// The tree produced by a single parser run, plus the arena that owns it.
pub struct Ast {
    nodes: IndexVec<NodeId, Node>,
    root: NodeId,
}

impl Ast {
    pub fn new() -> Self {
        let mut nodes = IndexVec::new();
        let root = nodes.push(Node::new(NodeKind::Root, None));
        Self { nodes, root }
    }

    pub fn root(&self) -> NodeId {
        self.root
    }

    pub fn get(&self, id: NodeId) -> &Node {
        self.nodes.get(id).expect("NodeId from a different Ast")
    }

    pub fn get_mut(&mut self, id: NodeId) -> &mut Node {
        self.nodes.get_mut(id).expect("NodeId from a different Ast")
    }

    pub fn kind(&self, id: NodeId) -> &NodeKind {
        &self.get(id).kind
    }

    pub fn children(&self, id: NodeId) -> &[NodeId] {
        &self.get(id).children
    }

    /// Allocate a new node as the last child of `parent`.
    pub fn append_child(&mut self, parent: NodeId, kind: NodeKind) -> NodeId {
        let id = self.nodes.push(Node::new(kind, Some(parent)));
        self.get_mut(parent).children.push(id);
        id
    }

    /// Allocate a node with no parent yet. Used for `Attribute`/
    /// `AttributeBlock` nodes and their literal-value children while they
    /// sit on `AttributeStack` awaiting `attach_children` (§3.5) — the
    /// arena still owns them, but they are not reachable from the root
    /// until attached.
    pub fn allocate_detached(&mut self, kind: NodeKind) -> NodeId {
        self.nodes.push(Node::new(kind, None))
    }

    /// Move `attribute` nodes (already allocated, currently parentless or
    /// parented to a transient holder) onto `target` as its leading
    /// children, draining `pending` in accumulation order. Used by
    /// `attach_attributes` (§4.2.3).
    pub fn attach_children(&mut self, target: NodeId, pending: Vec<NodeId>) {
        for id in pending {
            self.get_mut(id).parent = Some(target);
            self.get_mut(target).children.push(id);
        }
    }

    /// Total number of allocated nodes, including the root. Used by tests
    /// asserting the single-parent-ownership invariant (§8).
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn iter_ids(&self) -> impl Iterator<Item = NodeId> + '_ {
        self.nodes.indices()
    }
}

impl Default for Ast {
    fn default() -> Self {
        Self::new()
    }
}

impl Ast {
    /// The `ArrayMarker` child of a `StructField`, if the parser attached one.
    pub fn array_size(&self, field: NodeId) -> Option<i64> {
        self.children(field).iter().find_map(|&c| match self.kind(c) {
            NodeKind::ArrayMarker { size } => Some(*size),
            _ => None,
        })
    }

    /// The `VectorMarker` child of a `StructField`, if the parser attached one.
    pub fn vector_sizer(&self, field: NodeId) -> Option<FieldRef> {
        self.children(field).iter().find_map(|&c| match self.kind(c) {
            NodeKind::VectorMarker { sizer } => Some(*sizer),
            _ => None,
        })
    }

    /// The `FieldLabel` child of a `StructField`, if the source gave one.
    pub fn field_label(&self, field: NodeId) -> Option<i64> {
        self.children(field).iter().find_map(|&c| match self.kind(c) {
            NodeKind::FieldLabel(v) => Some(*v),
            _ => None,
        })
    }

    /// The `DefaultValue`/`DefaultStringValue` child of a `StructField` or
    /// `EnumField`, if the source declared a default.
    pub fn default_value(&self, field: NodeId) -> Option<&NodeKind> {
        self.children(field).iter().find_map(|&c| match self.kind(c) {
            k @ (NodeKind::DefaultValue { .. } | NodeKind::DefaultStringValue { .. }) => Some(k),
            _ => None,
        })
    }

    pub fn is_array(&self, field: NodeId) -> bool {
        self.array_size(field).is_some()
    }

    pub fn is_vector(&self, field: NodeId) -> bool {
        self.vector_sizer(field).is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn root_has_no_parent() {
        let ast = Ast::new();
        assert_eq!(ast.get(ast.root()).parent, None);
    }

    #[test]
    fn append_child_sets_parent_and_registers_with_the_parent() {
        let mut ast = Ast::new();
        let root = ast.root();
        let child = ast.append_child(root, NodeKind::Comment(Symbol::intern("// hi")));
        assert_eq!(ast.get(child).parent, Some(root));
        assert_eq!(ast.children(root), &[child]);
    }

    #[test]
    fn every_non_root_node_has_exactly_one_parent() {
        let mut ast = Ast::new();
        let root = ast.root();
        let ns = ast.append_child(
            root,
            NodeKind::Namespace {
                path: QualifiedName::single(Symbol::intern("foo")),
            },
        );
        ast.append_child(ns, NodeKind::Comment(Symbol::intern("// nested")));

        for id in ast.iter_ids() {
            if id == root {
                assert_eq!(ast.get(id).parent, None);
            } else {
                assert!(ast.get(id).parent.is_some());
            }
        }
    }
}
