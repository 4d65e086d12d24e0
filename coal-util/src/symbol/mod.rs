//! Interned identifiers.
//!
//! Identifier names and keyword lexemes are repeated constantly throughout a
//! source file and throughout the AST built from it (every use of a variable
//! repeats its name). A [`Symbol`] is a `Copy` 32-bit handle into a process-
//! wide string table, so scope lookups hash an integer instead of a `String`
//! and two identifiers with the same text compare equal in O(1).

use std::fmt;
use std::sync::{OnceLock, RwLock};

use rustc_hash::FxHashMap;

/// An interned string. Cheap to copy, compare, and hash.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Symbol(u32);

impl Symbol {
    /// Interns `s`, returning the symbol for it. Repeated interning of the
    /// same text returns the same symbol.
    pub fn intern(s: &str) -> Self {
        interner().intern(s)
    }

    /// The original string this symbol was interned from.
    pub fn as_str(&self) -> &'static str {
        interner().resolve(*self)
    }
}

impl fmt::Debug for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", self.as_str())
    }
}

impl fmt::Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

struct Interner {
    table: RwLock<InternerTable>,
}

#[derive(Default)]
struct InternerTable {
    strings: Vec<&'static str>,
    lookup: FxHashMap<&'static str, u32>,
}

impl Interner {
    fn intern(&self, s: &str) -> Symbol {
        if let Some(&id) = self.table.read().unwrap().lookup.get(s) {
            return Symbol(id);
        }

        let mut table = self.table.write().unwrap();
        // Another writer may have interned it while we waited for the lock.
        if let Some(&id) = table.lookup.get(s) {
            return Symbol(id);
        }

        let leaked: &'static str = Box::leak(s.to_string().into_boxed_str());
        let id = table.strings.len() as u32;
        table.strings.push(leaked);
        table.lookup.insert(leaked, id);
        Symbol(id)
    }

    fn resolve(&self, symbol: Symbol) -> &'static str {
        self.table.read().unwrap().strings[symbol.0 as usize]
    }
}

fn interner() -> &'static Interner {
    static INTERNER: OnceLock<Interner> = OnceLock::new();
    INTERNER.get_or_init(|| Interner {
        table: RwLock::new(InternerTable::default()),
    })
}
