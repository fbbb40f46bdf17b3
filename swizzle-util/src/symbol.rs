//! String interning.
//!
//! Every lexeme the tokenizer produces is interned here rather than kept as a
//! borrowed slice of the source buffer, so `Token`/`Node` payloads are owned
//! values with no lifetime parameter (see the crate-level design notes on
//! copy-on-construct token payloads).

use dashmap::DashMap;
use std::fmt;
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::OnceLock;

/// An interned string. Cheap to copy and compare; the backing bytes live in
/// [`STRING_TABLE`] for the lifetime of the process.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Symbol(u32);

impl Symbol {
    /// Intern `s`, returning the same `Symbol` for repeated interns of equal
    /// strings.
    pub fn intern(s: &str) -> Self {
        STRING_TABLE.intern(s)
    }

    /// Look up the original string. Always succeeds for a `Symbol` obtained
    /// from [`Symbol::intern`].
    pub fn as_str(&self) -> &'static str {
        STRING_TABLE.resolve(*self)
    }
}

impl fmt::Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl fmt::Debug for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Symbol({:?})", self.as_str())
    }
}

/// Global interner instance, lazily initialized on first use.
pub static STRING_TABLE: Interner = Interner::new();

/// Thread-safe string interner.
///
/// Strings are leaked onto the heap to obtain `'static` references; the
/// interner never shrinks and never removes an entry, so this is sound for
/// the lifetime of a compiler process.
pub struct Interner {
    map: OnceLock<DashMap<&'static str, u32>>,
    strings: OnceLock<DashMap<u32, &'static str>>,
    next: AtomicU32,
}

impl Interner {
    const fn new() -> Self {
        Self {
            map: OnceLock::new(),
            strings: OnceLock::new(),
            next: AtomicU32::new(0),
        }
    }

    fn map(&self) -> &DashMap<&'static str, u32> {
        self.map.get_or_init(|| DashMap::with_capacity(256))
    }

    fn strings(&self) -> &DashMap<u32, &'static str> {
        self.strings.get_or_init(|| DashMap::with_capacity(256))
    }

    fn intern(&self, s: &str) -> Symbol {
        if let Some(existing) = self.map().get(s) {
            return Symbol(*existing);
        }

        let leaked: &'static str = Box::leak(s.to_owned().into_boxed_str());
        let id = self.next.fetch_add(1, Ordering::SeqCst);
        self.map().insert(leaked, id);
        self.strings().insert(id, leaked);
        Symbol(id)
    }

    fn resolve(&self, symbol: Symbol) -> &'static str {
        self.strings()
            .get(&symbol.0)
            .map(|entry| *entry)
            .expect("Symbol resolved against a different interner instance")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn interning_is_idempotent() {
        let a = Symbol::intern("foo::bar");
        let b = Symbol::intern("foo::bar");
        assert_eq!(a, b);
    }

    #[test]
    fn distinct_strings_get_distinct_symbols() {
        let a = Symbol::intern("alpha");
        let b = Symbol::intern("beta");
        assert_ne!(a, b);
    }

    #[test]
    fn round_trips_through_as_str() {
        let sym = Symbol::intern("namespace::Type");
        assert_eq!(sym.as_str(), "namespace::Type");
    }
}
