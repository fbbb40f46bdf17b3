//! `ParserContext` (§3.4): mutable parser state threaded through a single
//! translation unit, plus the `ImportResolver`/`SourceReader` collaborator
//! traits §6.3 names.

use crate::symbol_table::{SymbolTable, TypeCache};
use crate::value::{EnumValueKey, Value};
use std::collections::HashSet;
use std::path::{Path, PathBuf};
use swizzle_util::Symbol;
use thiserror::Error;

/// What an import segment sequence resolved to, or why it didn't.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ImportError {
    #[error("import path not found")]
    NotFound,
    #[error("import path resolves to a directory")]
    IsDirectory,
}

/// Resolves `import`/`extern` path segments to a filesystem path. Injected
/// rather than owned by this crate: §6.3 states the parser "only consumes a
/// `path-exists` predicate and a file reader callback", never touching the
/// filesystem itself.
pub trait ImportResolver {
    fn resolve(&self, segments: &[Symbol]) -> Result<PathBuf, ImportError>;
}

/// Reads a resolved import path into an owned source buffer. Kept as a
/// trait rather than a bare closure so a caller can hand the same object in
/// as both the `ImportResolver`'s backing store and this reader without a
/// lifetime-threading problem (§6.3).
pub trait SourceReader {
    fn read(&self, path: &Path) -> std::io::Result<String>;
}

/// A resolver that always reports `NotFound` — the default for a `Parser`
/// constructed without one. A caller who never expects `import` in their
/// input does not need to supply a real one.
pub struct NullImportResolver;

impl ImportResolver for NullImportResolver {
    fn resolve(&self, _segments: &[Symbol]) -> Result<PathBuf, ImportError> {
        Err(ImportError::NotFound)
    }
}

/// Per-file parser state (§3.4). Constructed fresh per translation unit —
/// there is no shared mutable state across files (§5), so "reset between
/// files" is realized as "build a new `ParserContext`" rather than a mutable
/// `reset()` method.
pub struct ParserContext {
    pub current_namespace: Vec<Symbol>,
    pub current_enum_value: Option<Value>,
    pub enum_value_allocations: HashSet<EnumValueKey>,
    /// Sentinel `i64::MIN` while no bitfield field has yet been accepted,
    /// matching the reference `EnumStartScopeState`-equivalent's "lowest
    /// representable signed sentinel".
    pub current_bitfield_bit: i64,
    pub member_is_const: bool,
    pub symbol_table: SymbolTable,
    pub type_cache: TypeCache,
    import_resolver: Box<dyn ImportResolver>,
}

impl ParserContext {
    pub fn new(import_resolver: Box<dyn ImportResolver>) -> Self {
        Self {
            current_namespace: Vec::new(),
            current_enum_value: None,
            enum_value_allocations: HashSet::new(),
            current_bitfield_bit: i64::MIN,
            member_is_const: false,
            symbol_table: SymbolTable::new(),
            type_cache: TypeCache::new(),
            import_resolver,
        }
    }

    pub fn without_imports() -> Self {
        Self::new(Box::new(NullImportResolver))
    }

    pub fn resolve_import(&self, segments: &[Symbol]) -> Result<PathBuf, ImportError> {
        self.import_resolver.resolve(segments)
    }

    /// The namespace-qualified form of a bare name declared under the
    /// current namespace, e.g. `foo::Metal` for `Metal` under `namespace foo`.
    pub fn qualify(&self, name: Symbol) -> Vec<Symbol> {
        let mut segments = self.current_namespace.clone();
        segments.push(name);
        segments
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn qualify_prefixes_the_current_namespace() {
        let mut ctx = ParserContext::without_imports();
        ctx.current_namespace = vec![Symbol::intern("foo")];
        let qualified = ctx.qualify(Symbol::intern("Metal"));
        assert_eq!(
            qualified,
            vec![Symbol::intern("foo"), Symbol::intern("Metal")]
        );
    }

    #[test]
    fn null_resolver_reports_not_found() {
        let ctx = ParserContext::without_imports();
        assert_eq!(
            ctx.resolve_import(&[Symbol::intern("foo")]),
            Err(ImportError::NotFound)
        );
    }
}
