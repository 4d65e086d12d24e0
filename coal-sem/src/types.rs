//! Resolved types and the read-only table the analyzer populates.

use std::collections::HashMap;

use coal_par::{ExprId, TypeRef};
use coal_util::Symbol;

/// A fully resolved Coal type. Exactly the five supported source types —
/// there is no inference, no generics, and no user-defined types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NamedType {
    Int,
    Float,
    Bool,
    Char,
    String,
}

impl NamedType {
    pub fn name(self) -> &'static str {
        match self {
            NamedType::Int => "int",
            NamedType::Float => "float",
            NamedType::Bool => "bool",
            NamedType::Char => "char",
            NamedType::String => "string",
        }
    }

    /// Resolves a parsed [`TypeRef`], rejecting the `Named` catch-all the
    /// parser accepts syntactically for any identifier that isn't one of
    /// the five built-in type names.
    pub fn from_type_ref(type_ref: TypeRef) -> Option<NamedType> {
        match type_ref {
            TypeRef::Int => Some(NamedType::Int),
            TypeRef::Float => Some(NamedType::Float),
            TypeRef::Bool => Some(NamedType::Bool),
            TypeRef::Char => Some(NamedType::Char),
            TypeRef::String => Some(NamedType::String),
            TypeRef::Named(_) => None,
        }
    }
}

impl std::fmt::Display for NamedType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// The declared type and const-ness of one local variable.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VarInfo {
    pub ty: NamedType,
    pub is_const: bool,
}

/// The analyzer's read-only output: every expression's resolved type, keyed
/// by its [`ExprId`], and every local's declared type, keyed by the
/// function it lives in and its name. The emitter never computes a type
/// itself — it only reads this table.
#[derive(Default)]
pub struct TypeTable {
    expr_types: HashMap<ExprId, NamedType>,
    var_types: HashMap<(Symbol, Symbol), VarInfo>,
}

impl TypeTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn set_expr_type(&mut self, id: ExprId, ty: NamedType) {
        self.expr_types.insert(id, ty);
    }

    pub fn expr_type(&self, id: ExprId) -> Option<NamedType> {
        self.expr_types.get(&id).copied()
    }

    pub(crate) fn set_var_type(&mut self, func: Symbol, name: Symbol, info: VarInfo) {
        self.var_types.insert((func, name), info);
    }

    pub fn var_type(&self, func: Symbol, name: Symbol) -> Option<VarInfo> {
        self.var_types.get(&(func, name)).copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn expr_type_round_trips() {
        let mut table = TypeTable::new();
        let id = coal_par::ExprId(7);
        table.set_expr_type(id, NamedType::Bool);
        assert_eq!(table.expr_type(id), Some(NamedType::Bool));
        assert_eq!(table.expr_type(coal_par::ExprId(8)), None);
    }

    #[test]
    fn var_type_is_keyed_by_function_and_name() {
        let mut table = TypeTable::new();
        let main = Symbol::intern("main");
        let other = Symbol::intern("other");
        let x = Symbol::intern("x");
        table.set_var_type(main, x, VarInfo { ty: NamedType::Int, is_const: false });
        assert_eq!(table.var_type(main, x).unwrap().ty, NamedType::Int);
        assert!(table.var_type(other, x).is_none());
    }
}
