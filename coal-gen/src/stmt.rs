//! Statement lowering: variable declarations, assignment, bare expression
//! statements, and the two control-flow constructs.
//!
//! `if`/`elif`/`else` chains and `while` loops each maintain a "current
//! block" pointer as they open new labels — there is no separate
//! block-creation pass ahead of time.

use coal_par::{Assign, IfStmt, Stmt, VarDecl, WhileStmt};
use coal_sem::VarInfo;

use crate::error::{EmitError, Result};
use crate::function::FunctionEmitter;
use crate::types::{ir_type, zero_value};

impl<'m, 't, 'h> FunctionEmitter<'m, 't, 'h> {
    pub(crate) fn lower_stmt(&mut self, stmt: &Stmt) -> Result<()> {
        match stmt {
            Stmt::VarDecl(v) => self.lower_var_decl(v),
            Stmt::Assign(a) => self.lower_assign(a),
            Stmt::ExprStmt(e) => {
                self.lower_expr(e)?;
                Ok(())
            }
            Stmt::IfStmt(i) => self.lower_if(i),
            Stmt::WhileStmt(w) => self.lower_while(w),
        }
    }

    fn var_info(&self, name: coal_util::Symbol) -> Result<VarInfo> {
        self.table
            .var_type(self.fn_name, name)
            .ok_or_else(|| EmitError::MissingVarType(name.to_string(), self.fn_name.to_string()))
    }

    /// `alloca`s a fresh slot, stores the initializer (or a zero value if
    /// there isn't one), then mirrors the stored value to the variable's
    /// `__dbg_<fn>_<var>` global — in that order.
    fn lower_var_decl(&mut self, v: &VarDecl) -> Result<()> {
        let info = self.var_info(v.name)?;
        let ty = ir_type(info.ty);

        let slot = self.declare_local(v.name, info.ty);
        self.emit(format!("{slot} = alloca {ty}"));

        let stored = match &v.init {
            Some(init) => {
                let value = self.lower_expr(init)?;
                value.operand
            }
            None => zero_value(info.ty).to_string(),
        };
        self.emit(format!("store {ty} {stored}, ptr {slot}"));
        self.mirror_to_debug_global(v.name, info.ty, &stored);
        Ok(())
    }

    /// Writes the RHS to the variable's slot, then mirrors it, matching
    /// the `VarDecl` initialization order.
    fn lower_assign(&mut self, a: &Assign) -> Result<()> {
        let (slot, ty) = self
            .resolve_local(a.name)
            .ok_or_else(|| EmitError::Internal(format!("no slot for local `{}`", a.name)))?;
        let value = self.lower_expr(&a.value)?;
        self.emit(format!("store {} {}, ptr {slot}", ir_type(ty), value.operand));
        self.mirror_to_debug_global(a.name, ty, &value.operand);
        Ok(())
    }

    fn mirror_to_debug_global(&mut self, name: coal_util::Symbol, ty: coal_sem::NamedType, operand: &str) {
        let fn_name = self.fn_name.to_string();
        let var_name = name.to_string();
        let global = self.module.debug_mirror(&fn_name, &var_name, ty);
        self.emit(format!("store {} {operand}, ptr {global}", ir_type(ty)));
    }

    /// `if`/`elif`/`else`: one `end` label, one `then` label per branch,
    /// one `check` label per branch after the first, and an optional
    /// `else` label.
    fn lower_if(&mut self, stmt: &IfStmt) -> Result<()> {
        let n = stmt.branches.len();
        let end_label = self.fresh_label("if.end");
        let then_labels: Vec<String> = (0..n).map(|_| self.fresh_label("if.then")).collect();
        let check_labels: Vec<String> = (0..n - 1).map(|_| self.fresh_label("if.check")).collect();
        let else_label = stmt.else_branch.as_ref().map(|_| self.fresh_label("if.else"));

        let fallthrough_after = |check_labels: &[String], else_label: &Option<String>, i: usize| -> String {
            check_labels
                .get(i)
                .cloned()
                .or_else(|| else_label.clone())
                .unwrap_or_else(|| end_label.clone())
        };

        let cond0 = self.lower_expr(&stmt.branches[0].cond)?;
        let first_false = fallthrough_after(&check_labels, &else_label, 0);
        self.emit(format!(
            "br i1 {}, label %{}, label %{}",
            cond0.operand, then_labels[0], first_false
        ));

        for i in 0..n {
            self.emit_label(&then_labels[i]);
            self.lower_block(&stmt.branches[i].body)?;
            self.emit(format!("br label %{end_label}"));

            if i < check_labels.len() {
                self.emit_label(&check_labels[i]);
                let cond = self.lower_expr(&stmt.branches[i + 1].cond)?;
                let next_false = fallthrough_after(&check_labels, &else_label, i + 1);
                self.emit(format!(
                    "br i1 {}, label %{}, label %{}",
                    cond.operand,
                    then_labels[i + 1],
                    next_false
                ));
            }
        }

        if let (Some(else_label), Some(else_block)) = (&else_label, &stmt.else_branch) {
            self.emit_label(else_label);
            self.lower_block(else_block)?;
            self.emit(format!("br label %{end_label}"));
        }

        self.emit_label(&end_label);
        Ok(())
    }

    /// `while`: header re-evaluates the condition every iteration before
    /// branching to `body` or `end`; the body ends with a backward branch
    /// to the header. A re-evaluate-inside-body shape would leave the body
    /// block with two terminators; this header-first shape avoids that.
    fn lower_while(&mut self, stmt: &WhileStmt) -> Result<()> {
        let head_label = self.fresh_label("while.head");
        let body_label = self.fresh_label("while.body");
        let end_label = self.fresh_label("while.end");

        self.emit(format!("br label %{head_label}"));
        self.emit_label(&head_label);
        let cond = self.lower_expr(&stmt.cond)?;
        self.emit(format!(
            "br i1 {}, label %{}, label %{}",
            cond.operand, body_label, end_label
        ));

        self.emit_label(&body_label);
        self.lower_block(&stmt.body)?;
        self.emit(format!("br label %{head_label}"));

        self.emit_label(&end_label);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use coal_par::parse;
    use coal_sem::analyze;
    use coal_util::{FileId, Handler};

    fn compile(source: &str) -> String {
        let handler = Handler::new();
        let program = parse(source, FileId::DUMMY, &handler);
        assert!(!handler.has_errors(), "fixture should parse cleanly: {source}");
        let table = analyze(&program, &handler);
        assert!(!handler.has_errors(), "fixture should type-check cleanly: {source}");
        crate::emit(&program, &table, "t.coal", &handler).expect("emission should succeed")
    }

    /// Distinct label *names* defined with `prefix`, one per `fresh_label`
    /// call — as opposed to how many times each is referenced, which varies
    /// with how many branches jump to it.
    fn distinct_labels(ir: &str, prefix: &str) -> HashSet<String> {
        ir.lines()
            .filter_map(|line| line.strip_suffix(':'))
            .filter(|label| label.starts_with(prefix))
            .map(str::to_string)
            .collect()
    }

    #[test]
    fn if_elif_else_emits_expected_label_shape() {
        let ir = compile(
            r#"fn main() {
                var x: int = 3
                if (x == 1) { println(1) }
                elif (x == 2) { println(2) }
                else { println(3) }
            }"#,
        );
        // 2 branches (`if`, `elif`): one end label, one then label per
        // branch, one check label per branch after the first, one else
        // label for the trailing `else`.
        assert_eq!(distinct_labels(&ir, "if.end.").len(), 1);
        assert_eq!(distinct_labels(&ir, "if.then.").len(), 2);
        assert_eq!(distinct_labels(&ir, "if.check.").len(), 1);
        assert_eq!(distinct_labels(&ir, "if.else.").len(), 1);
    }

    #[test]
    fn while_loop_has_header_body_and_end_once_each() {
        let ir = compile("fn main() { var i: int = 0 while (i < 10) { i += 1 } }");
        assert_eq!(ir.matches("while.head.").count(), 1);
        assert_eq!(ir.matches("while.body.").count(), 1);
        assert_eq!(ir.matches("while.end.").count(), 1);
    }

    #[test]
    fn var_decl_stores_then_mirrors_to_debug_global() {
        let ir = compile("fn main() { var x: int = 1 }");
        assert!(ir.contains("@__dbg_main_x = global i32 0"));
        assert!(ir.contains("store i32 1, ptr %x"));
        assert!(ir.contains("store i32 1, ptr @__dbg_main_x"));
    }

    #[test]
    fn assign_mirrors_the_new_value() {
        let ir = compile("fn main() { var x: int = 1\nx = 2 }");
        assert!(ir.contains("store i32 2, ptr @__dbg_main_x"));
    }

    #[test]
    fn uninitialized_var_decl_stores_zero() {
        let ir = compile("fn main() { var x: bool }");
        assert!(ir.contains("store i1 0, ptr %x"));
    }
}
