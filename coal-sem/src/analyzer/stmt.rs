//! Statement-level type checking: `VarDecl`, `Assign`, `if`, `while`, and
//! bare expression statements.

use coal_par::{Assign, Block, Expr, IfStmt, Stmt, VarDecl, WhileStmt};
use coal_util::DiagnosticCode;

use crate::types::{NamedType, VarInfo};

use super::Analyzer;

impl<'a> Analyzer<'a> {
    pub(super) fn analyze_stmt(&mut self, stmt: &Stmt) {
        match stmt {
            Stmt::VarDecl(v) => self.analyze_var_decl(v),
            Stmt::Assign(a) => self.analyze_assign(a),
            Stmt::ExprStmt(e) => {
                self.analyze_expr(e);
            }
            Stmt::IfStmt(i) => self.analyze_if(i),
            Stmt::WhileStmt(w) => self.analyze_while(w),
        }
    }

    /// Stops at the first statement that raises a diagnostic rather than
    /// checking the rest of the block, matching the pipeline's fail-fast,
    /// single-diagnostic contract.
    fn analyze_block(&mut self, block: &Block) {
        self.scopes.enter_scope();
        for stmt in &block.stmts {
            self.analyze_stmt(stmt);
            if self.handler.has_errors() {
                break;
            }
        }
        self.scopes.exit_scope();
    }

    fn analyze_var_decl(&mut self, v: &VarDecl) {
        let init_ty = v.init.as_ref().and_then(|e| self.analyze_expr(e));

        let annotated_ty = v.annotated_type.and_then(NamedType::from_type_ref);
        if let Some(unresolved) = v.annotated_type {
            if annotated_ty.is_none() {
                self.error(
                    DiagnosticCode::INVALID_TYPE,
                    format!("`{}` is not a known type", type_ref_display(unresolved)),
                    v.span,
                );
            }
        }

        let resolved_ty = match (annotated_ty, init_ty) {
            (Some(a), Some(i)) => {
                if a != i {
                    self.error(
                        DiagnosticCode::TYPE_MISMATCH,
                        format!("declared type `{a}` does not match initializer type `{i}`"),
                        v.span,
                    );
                }
                Some(a)
            }
            (Some(a), None) => Some(a),
            (None, Some(i)) => Some(i),
            // Neither present: the parser already raised `VarNeedsType`.
            (None, None) => None,
        };

        if v.is_const && v.init.is_none() {
            self.error(
                DiagnosticCode::CONST_NEEDS_INIT,
                format!("`const {}` needs an initializer", v.name),
                v.span,
            );
        }

        if let Some(ty) = resolved_ty {
            let info = VarInfo { ty, is_const: v.is_const };
            if !self.scopes.declare(v.name, info) {
                self.error(
                    DiagnosticCode::REDECLARED_VARIABLE,
                    format!("`{}` is already declared in this scope", v.name),
                    v.span,
                );
            }
            self.table.set_var_type(self.fn_name, v.name, info);
        }
    }

    fn analyze_assign(&mut self, a: &Assign) {
        let value_ty = self.analyze_expr(&a.value);
        match self.scopes.resolve(a.name) {
            None => self.error(
                DiagnosticCode::UNDEFINED_VARIABLE,
                format!("undefined variable `{}`", a.name),
                a.span,
            ),
            Some(info) => {
                if info.is_const {
                    self.error(
                        DiagnosticCode::ASSIGN_TO_CONST,
                        format!("cannot assign to `const {}`", a.name),
                        a.span,
                    );
                }
                if let Some(vt) = value_ty {
                    if vt != info.ty {
                        self.error(
                            DiagnosticCode::TYPE_MISMATCH,
                            format!("cannot assign `{}` to `{}`, which has type `{}`", vt, a.name, info.ty),
                            a.span,
                        );
                    }
                }
            }
        }
    }

    fn analyze_if(&mut self, i: &IfStmt) {
        for branch in &i.branches {
            self.check_condition(&branch.cond);
            if self.handler.has_errors() {
                return;
            }
            self.analyze_block(&branch.body);
            if self.handler.has_errors() {
                return;
            }
        }
        if let Some(else_block) = &i.else_branch {
            self.analyze_block(else_block);
        }
    }

    fn analyze_while(&mut self, w: &WhileStmt) {
        self.check_condition(&w.cond);
        self.analyze_block(&w.body);
    }

    fn check_condition(&mut self, cond: &Expr) {
        if let Some(ty) = self.analyze_expr(cond) {
            if ty != NamedType::Bool {
                self.error(
                    DiagnosticCode::NON_BOOL_CONDITION,
                    format!("condition must be `bool`, found `{ty}`"),
                    cond.span,
                );
            }
        }
    }
}

fn type_ref_display(t: coal_par::TypeRef) -> String {
    match t {
        coal_par::TypeRef::Named(sym) => sym.to_string(),
        _ => unreachable!("every other TypeRef variant resolves via NamedType::from_type_ref"),
    }
}
