//! Per-function emission state: a stable SSA counter, a scope-stack of
//! local slot names, and the accumulated instruction text for one
//! function body.
//!
//! There is no separate block-creation pass here: blocks are opened in
//! source order as control-flow constructs are lowered, and there is only
//! ever one "current" open block at a time.

use std::collections::HashMap;

use coal_par::{Block, FnDecl};
use coal_sem::{NamedType, TypeTable};
use coal_util::{Handler, Symbol};

use crate::error::Result;
use crate::module::ModuleEmitter;

pub(crate) struct FunctionEmitter<'m, 't, 'h> {
    pub(crate) module: &'m mut ModuleEmitter,
    pub(crate) table: &'t TypeTable,
    pub(crate) handler: &'h Handler,
    pub(crate) fn_name: Symbol,
    ssa_counter: u32,
    scopes: Vec<HashMap<Symbol, (String, NamedType)>>,
    slot_counts: HashMap<Symbol, u32>,
    body: String,
}

impl<'m, 't, 'h> FunctionEmitter<'m, 't, 'h> {
    pub(crate) fn new(
        module: &'m mut ModuleEmitter,
        fn_name: Symbol,
        table: &'t TypeTable,
        handler: &'h Handler,
    ) -> Self {
        Self {
            module,
            table,
            handler,
            fn_name,
            ssa_counter: 0,
            scopes: vec![HashMap::new()],
            slot_counts: HashMap::new(),
            body: String::new(),
        }
    }

    /// Lowers the whole function and returns its `define …` text. Always
    /// returns `i32 0` — Coal has no user return statements.
    pub(crate) fn lower(mut self, f: &FnDecl) -> Result<String> {
        self.lower_block(&f.body)?;
        Ok(format!(
            "define i32 @{}() {{\nentry:\n{}  ret i32 0\n}}\n",
            f.name, self.body
        ))
    }

    pub(crate) fn lower_block(&mut self, block: &Block) -> Result<()> {
        self.enter_scope();
        for stmt in &block.stmts {
            self.lower_stmt(stmt)?;
        }
        self.exit_scope();
        Ok(())
    }

    pub(crate) fn fresh_ssa(&mut self) -> String {
        let id = self.ssa_counter;
        self.ssa_counter += 1;
        format!("%t{id}")
    }

    /// Allocates a fresh module-wide-unique label with `prefix`, e.g.
    /// `if.then.3`. The counter lives on the module, not the function, per
    /// the "separate global label counter" rule.
    pub(crate) fn fresh_label(&mut self, prefix: &str) -> String {
        let id = self.module.fresh_label_id();
        format!("{prefix}.{id}")
    }

    pub(crate) fn emit(&mut self, line: impl AsRef<str>) {
        self.body.push_str("  ");
        self.body.push_str(line.as_ref());
        self.body.push('\n');
    }

    pub(crate) fn emit_label(&mut self, label: &str) {
        self.body.push_str(label);
        self.body.push_str(":\n");
    }

    fn enter_scope(&mut self) {
        self.scopes.push(HashMap::new());
    }

    fn exit_scope(&mut self) {
        self.scopes.pop();
    }

    /// Allocates a fresh, function-unique slot name for `name` — `%name` on
    /// first declaration, `%name.1`, `%name.2`, … on any later one, so a
    /// shadowed re-declaration in a sibling or nested block never collides
    /// with an earlier `alloca` of the same source name.
    pub(crate) fn declare_local(&mut self, name: Symbol, ty: NamedType) -> String {
        let count = self.slot_counts.entry(name).or_insert(0);
        let slot = if *count == 0 {
            format!("%{name}")
        } else {
            format!("%{name}.{count}")
        };
        *count += 1;
        self.scopes
            .last_mut()
            .expect("function scope stack is never empty")
            .insert(name, (slot.clone(), ty));
        slot
    }

    pub(crate) fn resolve_local(&self, name: Symbol) -> Option<(String, NamedType)> {
        self.scopes.iter().rev().find_map(|scope| scope.get(&name).cloned())
    }
}
