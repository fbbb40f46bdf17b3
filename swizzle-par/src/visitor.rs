//! The `Visitor` interface (§4.5): the hook downstream code generators
//! (out of scope for this crate) use to traverse the AST.
//!
//! Dispatch is a `match` on the closed `NodeKind` enum rather than dynamic
//! downcasting; `Visitor` gets one default-no-op method per node-kind family
//! so a consumer interested in only a handful of kinds doesn't have to
//! implement all ~30. `accept` is unified on a single three-argument form
//! (node, depth, visitor) rather than one overload per depth.

use crate::ast::{Ast, FieldRef, NodeId, NodeKind, QualifiedName};
use crate::value::Value;
use swizzle_lex::BuiltinType;
use swizzle_util::Symbol;

/// How far a single `accept` call recurses.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Depth {
    /// Visit only the given node.
    One,
    /// Visit the given node, then every descendant.
    All,
}

/// One method per `NodeKind` family. All default to a no-op so a visitor
/// only needs to override the kinds it cares about.
pub trait Visitor {
    fn visit_root(&mut self, _ast: &Ast, _id: NodeId) {}
    fn visit_namespace(&mut self, _ast: &Ast, _id: NodeId, _path: &QualifiedName) {}
    fn visit_import(&mut self, _ast: &Ast, _id: NodeId, _path: &QualifiedName) {}
    fn visit_extern(&mut self, _ast: &Ast, _id: NodeId, _path: &QualifiedName) {}
    fn visit_type_alias(&mut self, _ast: &Ast, _id: NodeId, _name: Symbol, _target: &QualifiedName) {}
    fn visit_enum(&mut self, _ast: &Ast, _id: NodeId, _name: Symbol, _underlying: BuiltinType) {}
    fn visit_enum_field(&mut self, _ast: &Ast, _id: NodeId, _name: Symbol, _value: &Value) {}
    fn visit_bitfield(&mut self, _ast: &Ast, _id: NodeId, _name: Symbol, _underlying: BuiltinType) {}
    fn visit_bitfield_field(&mut self, _ast: &Ast, _id: NodeId, _name: Symbol, _begin: i64, _end: i64) {}
    fn visit_struct(&mut self, _ast: &Ast, _id: NodeId, _name: Symbol) {}
    fn visit_struct_field(&mut self, _ast: &Ast, _id: NodeId, _name: Symbol, _type_name: &QualifiedName, _is_const: bool) {}
    fn visit_array_marker(&mut self, _ast: &Ast, _id: NodeId, _size: i64) {}
    fn visit_vector_marker(&mut self, _ast: &Ast, _id: NodeId, _sizer: FieldRef) {}
    fn visit_variable_block(&mut self, _ast: &Ast, _id: NodeId, _discriminant: FieldRef) {}
    fn visit_variable_block_case(&mut self, _ast: &Ast, _id: NodeId, _value: &Value, _target: &QualifiedName) {}
    fn visit_attribute(&mut self, _ast: &Ast, _id: NodeId, _name: Symbol) {}
    fn visit_attribute_block(&mut self, _ast: &Ast, _id: NodeId, _lexeme: Symbol) {}
    fn visit_char_literal(&mut self, _ast: &Ast, _id: NodeId, _value: char) {}
    fn visit_string_literal(&mut self, _ast: &Ast, _id: NodeId, _value: Symbol) {}
    fn visit_numeric_literal(&mut self, _ast: &Ast, _id: NodeId, _value: i64) {}
    fn visit_hex_literal(&mut self, _ast: &Ast, _id: NodeId, _value: u64) {}
    fn visit_default_value(&mut self, _ast: &Ast, _id: NodeId, _value: &Value) {}
    fn visit_default_string_value(&mut self, _ast: &Ast, _id: NodeId, _value: Symbol, _storage_len: i64) {}
    fn visit_field_label(&mut self, _ast: &Ast, _id: NodeId, _value: i64) {}
    fn visit_comment(&mut self, _ast: &Ast, _id: NodeId, _text: Symbol) {}
    fn visit_multiline_comment(&mut self, _ast: &Ast, _id: NodeId, _text: Symbol) {}
}

/// Dispatch `id` to the matching `Visitor` method, then recurse into its
/// children if `depth` is `All`.
pub fn accept(ast: &Ast, id: NodeId, visitor: &mut dyn Visitor, depth: Depth) {
    dispatch(ast, id, visitor);
    if depth == Depth::All {
        for &child in ast.children(id) {
            accept(ast, child, visitor, Depth::All);
        }
    }
}

fn dispatch(ast: &Ast, id: NodeId, visitor: &mut dyn Visitor) {
    match ast.kind(id).clone() {
        NodeKind::Root => visitor.visit_root(ast, id),
        NodeKind::Namespace { path } => visitor.visit_namespace(ast, id, &path),
        NodeKind::Import { path } => visitor.visit_import(ast, id, &path),
        NodeKind::Extern { path } => visitor.visit_extern(ast, id, &path),
        NodeKind::TypeAlias { name, target } => visitor.visit_type_alias(ast, id, name, &target),
        NodeKind::Enum { name, underlying } => visitor.visit_enum(ast, id, name, underlying),
        NodeKind::EnumField { name, value } => visitor.visit_enum_field(ast, id, name, &value),
        NodeKind::Bitfield { name, underlying } => visitor.visit_bitfield(ast, id, name, underlying),
        NodeKind::BitfieldField { name, begin, end } => {
            visitor.visit_bitfield_field(ast, id, name, begin, end)
        }
        NodeKind::Struct { name } => visitor.visit_struct(ast, id, name),
        NodeKind::StructField(data) => {
            visitor.visit_struct_field(ast, id, data.name, &data.type_name, data.is_const)
        }
        NodeKind::ArrayMarker { size } => visitor.visit_array_marker(ast, id, size),
        NodeKind::VectorMarker { sizer } => visitor.visit_vector_marker(ast, id, sizer),
        NodeKind::VariableBlock { discriminant } => {
            visitor.visit_variable_block(ast, id, discriminant)
        }
        NodeKind::VariableBlockCase { value, target } => {
            visitor.visit_variable_block_case(ast, id, &value, &target)
        }
        NodeKind::Attribute { name } => visitor.visit_attribute(ast, id, name),
        NodeKind::AttributeBlock { lexeme } => visitor.visit_attribute_block(ast, id, lexeme),
        NodeKind::CharLiteral(c) => visitor.visit_char_literal(ast, id, c),
        NodeKind::StringLiteral(s) => visitor.visit_string_literal(ast, id, s),
        NodeKind::NumericLiteral(v) => visitor.visit_numeric_literal(ast, id, v),
        NodeKind::HexLiteral(v) => visitor.visit_hex_literal(ast, id, v),
        NodeKind::DefaultValue { value } => visitor.visit_default_value(ast, id, &value),
        NodeKind::DefaultStringValue { value, storage_len } => {
            visitor.visit_default_string_value(ast, id, value, storage_len)
        }
        NodeKind::FieldLabel(v) => visitor.visit_field_label(ast, id, v),
        NodeKind::Comment(s) => visitor.visit_comment(ast, id, s),
        NodeKind::MultilineComment(s) => visitor.visit_multiline_comment(ast, id, s),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use swizzle_util::Symbol;

    #[derive(Default)]
    struct CountingVisitor {
        namespaces: usize,
        comments: usize,
    }

    impl Visitor for CountingVisitor {
        fn visit_namespace(&mut self, _ast: &Ast, _id: NodeId, _path: &QualifiedName) {
            self.namespaces += 1;
        }
        fn visit_comment(&mut self, _ast: &Ast, _id: NodeId, _text: Symbol) {
            self.comments += 1;
        }
    }

    #[test]
    fn depth_one_visits_only_the_given_node() {
        let mut ast = Ast::new();
        let root = ast.root();
        let ns = ast.append_child(
            root,
            NodeKind::Namespace {
                path: QualifiedName::single(Symbol::intern("foo")),
            },
        );
        ast.append_child(ns, NodeKind::Comment(Symbol::intern("// hi")));

        let mut visitor = CountingVisitor::default();
        accept(&ast, root, &mut visitor, Depth::One);
        assert_eq!(visitor.namespaces, 0);
        assert_eq!(visitor.comments, 0);
    }

    #[test]
    fn depth_all_recurses_into_every_descendant() {
        let mut ast = Ast::new();
        let root = ast.root();
        let ns = ast.append_child(
            root,
            NodeKind::Namespace {
                path: QualifiedName::single(Symbol::intern("foo")),
            },
        );
        ast.append_child(ns, NodeKind::Comment(Symbol::intern("// hi")));

        let mut visitor = CountingVisitor::default();
        accept(&ast, root, &mut visitor, Depth::All);
        assert_eq!(visitor.namespaces, 1);
        assert_eq!(visitor.comments, 1);
    }
}
