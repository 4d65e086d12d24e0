//! Lexical scope stack: a function body and each block it contains push a
//! scope on entry and pop it on exit. Names in an inner scope shadow the
//! same name in an outer one; redeclaring a name already bound in the
//! *current* scope is an error the caller raises, not this module.
//!
//! Grounded on the rib-based scope tree pattern, generalized to bind a
//! [`Symbol`] straight to its resolved [`VarInfo`] — Coal has no separate
//! definition table to indirect through, since it has no user-defined types
//! or parameterized functions.

use std::collections::HashMap;

use coal_util::{define_idx, IndexVec, Symbol};

use crate::types::VarInfo;

define_idx!(
    /// Identifies one rib (lexical scope) in a [`ScopeTree`].
    RibId
);

struct Rib {
    bindings: HashMap<Symbol, VarInfo>,
    parent: Option<RibId>,
}

/// A stack of lexical scopes for one function body.
pub struct ScopeTree {
    ribs: IndexVec<RibId, Rib>,
    current: RibId,
}

impl ScopeTree {
    /// Starts a fresh tree with a single root rib representing the
    /// function's own body.
    pub fn new() -> Self {
        let mut ribs = IndexVec::new();
        let root = ribs.push(Rib { bindings: HashMap::new(), parent: None });
        Self { ribs, current: root }
    }

    pub fn enter_scope(&mut self) {
        let rib = Rib { bindings: HashMap::new(), parent: Some(self.current) };
        self.current = self.ribs.push(rib);
    }

    pub fn exit_scope(&mut self) {
        if let Some(parent) = self.ribs[self.current].parent {
            self.current = parent;
        }
    }

    /// Declares `name` in the current rib. Returns `false` without
    /// overwriting the existing binding if `name` is already bound there.
    pub fn declare(&mut self, name: Symbol, info: VarInfo) -> bool {
        let rib = &mut self.ribs[self.current];
        if rib.bindings.contains_key(&name) {
            return false;
        }
        rib.bindings.insert(name, info);
        true
    }

    /// Resolves `name` to its nearest visible declaration, searching
    /// outward through enclosing scopes.
    pub fn resolve(&self, name: Symbol) -> Option<VarInfo> {
        let mut rib_id = self.current;
        loop {
            let rib = &self.ribs[rib_id];
            if let Some(&info) = rib.bindings.get(&name) {
                return Some(info);
            }
            rib_id = rib.parent?;
        }
    }
}

impl Default for ScopeTree {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::NamedType;

    fn info(ty: NamedType) -> VarInfo {
        VarInfo { ty, is_const: false }
    }

    #[test]
    fn inner_scope_shadows_outer() {
        let mut tree = ScopeTree::new();
        let x = Symbol::intern("scope_shadow_x");
        tree.declare(x, info(NamedType::Int));
        tree.enter_scope();
        tree.declare(x, info(NamedType::String));
        assert_eq!(tree.resolve(x).unwrap().ty, NamedType::String);
        tree.exit_scope();
        assert_eq!(tree.resolve(x).unwrap().ty, NamedType::Int);
    }

    #[test]
    fn redeclaring_in_same_scope_fails() {
        let mut tree = ScopeTree::new();
        let y = Symbol::intern("scope_redecl_y");
        assert!(tree.declare(y, info(NamedType::Int)));
        assert!(!tree.declare(y, info(NamedType::Bool)));
        // The first binding is left untouched.
        assert_eq!(tree.resolve(y).unwrap().ty, NamedType::Int);
    }

    #[test]
    fn sibling_scopes_do_not_see_each_other() {
        let mut tree = ScopeTree::new();
        let z = Symbol::intern("scope_sibling_z");
        tree.enter_scope();
        tree.declare(z, info(NamedType::Float));
        tree.exit_scope();
        tree.enter_scope();
        assert!(tree.resolve(z).is_none());
    }

    #[test]
    fn resolve_unknown_name_is_none() {
        let tree = ScopeTree::new();
        assert!(tree.resolve(Symbol::intern("scope_never_declared")).is_none());
    }
}
