//! Expression-level type checking: literals, identifiers, unary/binary
//! operators, and the two recognized callables (`print`/`println` calls,
//! `toString`/`toInt`/`toFloat` method calls).
//!
//! Every branch that successfully resolves a type records it in the shared
//! `TypeTable` keyed by the expression's `ExprId` before returning it, so
//! that after a clean analysis run every expression in the AST is present
//! in the table. A branch that fails to resolve a
//! type reports a diagnostic and returns `None` without recording anything;
//! callers propagate `None` rather than guessing a type to keep checking
//! with.

use coal_par::{BinOp, Expr, ExprKind, UnOp};
use coal_util::{DiagnosticCode, Symbol};

use crate::types::NamedType;

use super::Analyzer;

impl<'a> Analyzer<'a> {
    pub(super) fn analyze_expr(&mut self, expr: &Expr) -> Option<NamedType> {
        let ty = self.infer_expr(expr)?;
        self.table.set_expr_type(expr.id, ty);
        Some(ty)
    }

    fn infer_expr(&mut self, expr: &Expr) -> Option<NamedType> {
        match &*expr.kind {
            ExprKind::IntLit(_) => Some(NamedType::Int),
            ExprKind::FloatLit(_) => Some(NamedType::Float),
            ExprKind::BoolLit(_) => Some(NamedType::Bool),
            ExprKind::CharLit(_) => Some(NamedType::Char),
            ExprKind::StringLit(_) => Some(NamedType::String),
            ExprKind::Ident { name } => self.infer_ident(*name, expr),
            ExprKind::Unary { op, expr: operand } => self.infer_unary(*op, operand, expr),
            ExprKind::Binary { op, left, right } => self.infer_binary(*op, left, right, expr),
            ExprKind::Call { callee, args } => self.infer_call(*callee, args, expr),
            ExprKind::MethodCall { receiver, method, args } => {
                self.infer_method_call(receiver, *method, args, expr)
            }
        }
    }

    fn infer_ident(&mut self, name: Symbol, expr: &Expr) -> Option<NamedType> {
        match self.scopes.resolve(name) {
            Some(info) => Some(info.ty),
            None => {
                self.error(
                    DiagnosticCode::UNDEFINED_VARIABLE,
                    format!("undefined variable `{name}`"),
                    expr.span,
                );
                None
            }
        }
    }

    fn infer_unary(&mut self, op: UnOp, operand: &Expr, expr: &Expr) -> Option<NamedType> {
        let operand_ty = self.analyze_expr(operand)?;
        match op {
            UnOp::Not => {
                if operand_ty != NamedType::Bool {
                    self.error(
                        DiagnosticCode::NOT_CONDITION_BOOL,
                        format!("`!` requires `bool`, found `{operand_ty}`"),
                        expr.span,
                    );
                    return None;
                }
                Some(NamedType::Bool)
            }
        }
    }

    fn infer_binary(&mut self, op: BinOp, left: &Expr, right: &Expr, expr: &Expr) -> Option<NamedType> {
        let lhs = self.analyze_expr(left);
        let rhs = self.analyze_expr(right);
        let (lhs, rhs) = (lhs?, rhs?);

        match op {
            BinOp::And | BinOp::Or => {
                if lhs != NamedType::Bool || rhs != NamedType::Bool {
                    self.error(
                        DiagnosticCode::LOGIC_NEEDS_BOOL,
                        format!("`{}` requires both operands to be `bool`, found `{lhs}` and `{rhs}`", op_text(op)),
                        expr.span,
                    );
                    return None;
                }
                Some(NamedType::Bool)
            }
            BinOp::Eq | BinOp::Ne => {
                if lhs != rhs {
                    self.error(
                        DiagnosticCode::COMPARE_TYPE_MISMATCH,
                        format!("cannot compare `{lhs}` with `{rhs}`"),
                        expr.span,
                    );
                    return None;
                }
                Some(NamedType::Bool)
            }
            BinOp::Lt | BinOp::Le | BinOp::Gt | BinOp::Ge => {
                if lhs != rhs {
                    self.error(
                        DiagnosticCode::COMPARE_TYPE_MISMATCH,
                        format!("cannot compare `{lhs}` with `{rhs}`"),
                        expr.span,
                    );
                    return None;
                }
                if !matches!(lhs, NamedType::Int | NamedType::Float | NamedType::Char) {
                    self.error(
                        DiagnosticCode::RELOP_TYPE_INVALID,
                        format!("`{}` is not valid on `{lhs}`", op_text(op)),
                        expr.span,
                    );
                    return None;
                }
                Some(NamedType::Bool)
            }
            BinOp::Add if lhs == NamedType::String || rhs == NamedType::String => {
                if lhs != NamedType::String || rhs != NamedType::String {
                    self.error(
                        DiagnosticCode::STRINGS_ONLY_ADD,
                        format!("`+` on `string` requires both operands to be `string`, found `{lhs}` and `{rhs}`"),
                        expr.span,
                    );
                    return None;
                }
                Some(NamedType::String)
            }
            BinOp::Sub | BinOp::Mul | BinOp::Div | BinOp::Mod | BinOp::Pow
                if lhs == NamedType::String || rhs == NamedType::String =>
            {
                self.error(
                    DiagnosticCode::STRINGS_ONLY_ADD,
                    format!("`{}` is not defined on `string`; only `+` is", op_text(op)),
                    expr.span,
                );
                None
            }
            BinOp::Add | BinOp::Sub | BinOp::Mul | BinOp::Div | BinOp::Mod | BinOp::Pow => {
                if lhs != rhs {
                    self.error(
                        DiagnosticCode::TYPE_MISMATCH,
                        format!("`{}` requires both operands to be the same type, found `{lhs}` and `{rhs}`", op_text(op)),
                        expr.span,
                    );
                    return None;
                }
                if !matches!(lhs, NamedType::Int | NamedType::Float) {
                    self.error(
                        DiagnosticCode::INVALID_TYPE,
                        format!("`{}` is not defined on `{lhs}`", op_text(op)),
                        expr.span,
                    );
                    return None;
                }
                if op == BinOp::Mod && lhs != NamedType::Int {
                    self.error(
                        DiagnosticCode::INVALID_TYPE,
                        "`%` requires `int` operands".to_string(),
                        expr.span,
                    );
                    return None;
                }
                Some(lhs)
            }
        }
    }

    fn infer_call(&mut self, callee: Symbol, args: &[Expr], expr: &Expr) -> Option<NamedType> {
        let arg_types: Vec<Option<NamedType>> = args.iter().map(|a| self.analyze_expr(a)).collect();

        let is_print = callee.as_str() == "print" || callee.as_str() == "println";
        if !is_print {
            self.error(
                DiagnosticCode::UNKNOWN_FUNCTION,
                format!("unknown function `{callee}`"),
                expr.span,
            );
            return None;
        }

        if args.len() != 1 {
            self.error(
                DiagnosticCode::ARITY_MISMATCH,
                format!("`{callee}` takes exactly one argument, found {}", args.len()),
                expr.span,
            );
            return None;
        }

        let arg_ty = arg_types[0]?;
        if !matches!(
            arg_ty,
            NamedType::Int | NamedType::Float | NamedType::Bool | NamedType::Char | NamedType::String
        ) {
            self.error(
                DiagnosticCode::UNSUPPORTED_PRINT_TYPE,
                format!("`{callee}` cannot print a `{arg_ty}`"),
                expr.span,
            );
            return None;
        }

        Some(NamedType::Int)
    }

    fn infer_method_call(
        &mut self,
        receiver: &Expr,
        method: Symbol,
        args: &[Expr],
        expr: &Expr,
    ) -> Option<NamedType> {
        let receiver_ty = self.analyze_expr(receiver)?;
        for arg in args {
            self.analyze_expr(arg);
        }

        if !args.is_empty() {
            self.error(
                DiagnosticCode::ARITY_MISMATCH,
                format!("`.{method}()` takes no arguments, found {}", args.len()),
                expr.span,
            );
            return None;
        }

        match method.as_str() {
            "toString" => Some(NamedType::String),
            "toInt" => Some(NamedType::Int),
            "toFloat" => Some(NamedType::Float),
            _ => {
                self.error(
                    DiagnosticCode::UNKNOWN_METHOD,
                    format!("`{receiver_ty}` has no method `.{method}()`"),
                    expr.span,
                );
                None
            }
        }
    }
}

fn op_text(op: BinOp) -> &'static str {
    match op {
        BinOp::Add => "+",
        BinOp::Sub => "-",
        BinOp::Mul => "*",
        BinOp::Div => "/",
        BinOp::Mod => "%",
        BinOp::Pow => "^",
        BinOp::Eq => "==",
        BinOp::Ne => "!=",
        BinOp::Lt => "<",
        BinOp::Le => "<=",
        BinOp::Gt => ">",
        BinOp::Ge => ">=",
        BinOp::And => "&&",
        BinOp::Or => "||",
    }
}

#[cfg(test)]
mod tests {
    use coal_par::parse;
    use coal_util::{FileId, Handler};

    use super::*;
    use crate::analyzer::analyze;

    fn check(source: &str) -> Handler {
        let handler = Handler::new();
        let program = parse(source, FileId::DUMMY, &handler);
        assert!(!handler.has_errors(), "fixture should parse cleanly: {source}");
        analyze(&program, &handler);
        handler
    }

    #[test]
    fn not_on_non_bool_is_an_error() {
        let handler = check("fn main() { var x = !1 }");
        assert!(handler.diagnostics().iter().any(|d| d.code == Some(DiagnosticCode::NOT_CONDITION_BOOL)));
    }

    #[test]
    fn logic_op_requires_bool_operands() {
        let handler = check("fn main() { var x = 1 && true }");
        assert!(handler.diagnostics().iter().any(|d| d.code == Some(DiagnosticCode::LOGIC_NEEDS_BOOL)));
    }

    #[test]
    fn equality_permitted_on_any_matching_type() {
        let handler = check(r#"fn main() { var x = "a" == "a" var y = 1.0 == 1.0 }"#);
        assert!(!handler.has_errors());
    }

    #[test]
    fn relop_rejects_bool_operands() {
        let handler = check("fn main() { var x = true < false }");
        assert!(handler.diagnostics().iter().any(|d| d.code == Some(DiagnosticCode::RELOP_TYPE_INVALID)));
    }

    #[test]
    fn mixed_int_float_arithmetic_is_a_type_mismatch() {
        let handler = check("fn main() { var x = 1 + 1.0 }");
        assert!(handler.diagnostics().iter().any(|d| d.code == Some(DiagnosticCode::TYPE_MISMATCH)));
    }

    #[test]
    fn string_concat_of_two_strings_is_ok() {
        let handler = check(r#"fn main() { var x: string = "a" + "b" }"#);
        assert!(!handler.has_errors());
    }

    #[test]
    fn print_accepts_every_supported_scalar() {
        let handler = check(
            r#"fn main() {
                println(1)
                println(1.0)
                println(true)
                println('c')
                println("s")
            }"#,
        );
        assert!(!handler.has_errors());
    }

    #[test]
    fn print_wrong_arity_is_an_error() {
        let handler = check("fn main() { println(1, 2) }");
        assert!(handler.diagnostics().iter().any(|d| d.code == Some(DiagnosticCode::ARITY_MISMATCH)));
    }

    #[test]
    fn to_string_yields_string_from_any_type() {
        let handler = check("fn main() { var x: string = (1).toString() }");
        assert!(!handler.has_errors());
    }

    #[test]
    fn to_int_and_to_float_convert_between_numeric_types() {
        let handler = check(
            r#"fn main() {
                var a: int = (1.5).toInt()
                var b: float = (1).toFloat()
                var c: int = ("5").toInt()
            }"#,
        );
        assert!(!handler.has_errors());
    }

    #[test]
    fn unknown_method_is_an_error() {
        let handler = check("fn main() { var x = (1).frobnicate() }");
        assert!(handler.diagnostics().iter().any(|d| d.code == Some(DiagnosticCode::UNKNOWN_METHOD)));
    }

    #[test]
    fn method_call_with_arguments_is_an_arity_mismatch() {
        let handler = check(r#"fn main() { var x = (1).toString("oops") }"#);
        assert!(handler.diagnostics().iter().any(|d| d.code == Some(DiagnosticCode::ARITY_MISMATCH)));
    }
}
