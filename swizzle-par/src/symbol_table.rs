//! `SymbolTable` / `TypeCache` (§4.3): name → declaration lookup, scoped by
//! namespace. Both are insertion-order-preserving maps (`indexmap::IndexMap`
//! rather than `HashMap`) so that iteration order matches declaration order
//! wherever that matters for reproducible output.

use crate::ast::{NodeId, QualifiedName};
use crate::error::ParserError;
use indexmap::IndexMap;
use swizzle_lex::TokenInfo;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SymbolKind {
    Enum,
    Bitfield,
    Struct,
    TypeAlias,
}

#[derive(Clone, Debug, PartialEq)]
pub struct SymbolInfo {
    pub name: QualifiedName,
    pub kind: SymbolKind,
    pub node: NodeId,
}

/// Fully-qualified name → `SymbolInfo`. Redefinition is a `SyntaxError`.
#[derive(Default)]
pub struct SymbolTable(IndexMap<QualifiedName, SymbolInfo>);

impl SymbolTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(
        &mut self,
        info: SymbolInfo,
        found: &TokenInfo,
    ) -> Result<(), ParserError> {
        if self.0.contains_key(&info.name) {
            return Err(ParserError::syntax(
                format!("redefinition of '{}'", info.name.joined()),
                found,
            ));
        }
        self.0.insert(info.name.clone(), info);
        Ok(())
    }

    pub fn get(&self, name: &QualifiedName) -> Option<&SymbolInfo> {
        self.0.get(name)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// Fully-qualified name → defining `NodeId`. Separate from `SymbolTable`
/// because a type lookup during struct-field type resolution only ever
/// needs the node, never the symbol's kind/provenance (§4.3).
#[derive(Default)]
pub struct TypeCache(IndexMap<QualifiedName, NodeId>);

impl TypeCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, name: QualifiedName, node: NodeId) {
        self.0.insert(name, node);
    }

    pub fn get(&self, name: &QualifiedName) -> Option<NodeId> {
        self.0.get(name).copied()
    }

    pub fn contains(&self, name: &QualifiedName) -> bool {
        self.0.contains_key(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::NodeId;
    use swizzle_util::{FileInfo, Idx, Symbol};

    fn dummy_token() -> TokenInfo {
        TokenInfo::new(
            swizzle_lex::Token::new(swizzle_lex::TokenKind::Eof, Symbol::intern("")),
            FileInfo::new(Symbol::intern("t.swizzle")),
        )
    }

    #[test]
    fn redefinition_is_rejected() {
        let mut table = SymbolTable::new();
        let name = QualifiedName::single(Symbol::intern("Foo"));
        let info = SymbolInfo {
            name: name.clone(),
            kind: SymbolKind::Struct,
            node: NodeId::from_usize(0),
        };
        table.insert(info.clone(), &dummy_token()).unwrap();
        assert!(table.insert(info, &dummy_token()).is_err());
    }

    #[test]
    fn type_cache_round_trips_by_qualified_name() {
        let mut cache = TypeCache::new();
        let name = QualifiedName(vec![Symbol::intern("ns"), Symbol::intern("Foo")]);
        cache.insert(name.clone(), NodeId::from_usize(3));
        assert_eq!(cache.get(&name), Some(NodeId::from_usize(3)));
    }
}
