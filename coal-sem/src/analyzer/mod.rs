//! The type analyzer: one scope-checking pass per function, emitting into a
//! shared [`TypeTable`] and reporting violations through the same
//! [`Handler`] the lexer and parser use.

mod expr;
mod stmt;

use std::collections::HashSet;

use coal_par::{Decl, FnDecl, Program};
use coal_util::{DiagnosticBuilder, DiagnosticCode, Handler, Span, Symbol};

use crate::scope::ScopeTree;
use crate::types::TypeTable;

struct Analyzer<'a> {
    handler: &'a Handler,
    table: &'a mut TypeTable,
    fn_name: Symbol,
    scopes: ScopeTree,
}

/// Type-checks `program`, stopping at the first function that raises a
/// diagnostic. Callers check `handler.has_errors()` afterward and decide
/// whether to proceed to code generation; the returned table holds only
/// the entries recorded before the failure.
pub fn analyze(program: &Program, handler: &Handler) -> TypeTable {
    // Functions are collected in a pre-pass into a global table keyed by
    // name. Nothing downstream resolves a call against it — `Call` only
    // ever recognizes the two hard-coded names `print`/`println` — but the
    // pass documents the scope model's shape and would be the hook point
    // for user-defined callables if Coal ever grew them.
    let _fn_names: HashSet<Symbol> = program.decls.iter().map(|Decl::FnDecl(f)| f.name).collect();

    let mut table = TypeTable::new();
    for decl in &program.decls {
        let Decl::FnDecl(f) = decl;
        let mut analyzer = Analyzer {
            handler,
            table: &mut table,
            fn_name: f.name,
            scopes: ScopeTree::new(),
        };
        analyzer.analyze_fn(f);
        if handler.has_errors() {
            break;
        }
    }
    table
}

impl<'a> Analyzer<'a> {
    /// Stops at the first statement that raises a diagnostic rather than
    /// checking the rest of the function body.
    fn analyze_fn(&mut self, f: &FnDecl) {
        for stmt in &f.body.stmts {
            self.analyze_stmt(stmt);
            if self.handler.has_errors() {
                break;
            }
        }
    }

    fn error(&self, code: DiagnosticCode, message: impl Into<String>, span: Span) {
        DiagnosticBuilder::error(message).code(code).span(span).emit(self.handler);
    }
}

#[cfg(test)]
mod tests {
    use coal_par::parse;
    use coal_util::{FileId, Handler};

    use super::*;
    use crate::types::NamedType;

    fn check(source: &str) -> (TypeTable, Handler) {
        let handler = Handler::new();
        let program = parse(source, FileId::DUMMY, &handler);
        assert!(!handler.has_errors(), "fixture should parse cleanly: {source}");
        let table = analyze(&program, &handler);
        (table, handler)
    }

    #[test]
    fn well_typed_program_has_no_errors() {
        let (_, handler) = check(
            r#"
            fn main() {
                var x: int = 1
                var y = x + 2
                if (y > 0) {
                    println(y)
                } else {
                    println(0)
                }
            }
            "#,
        );
        assert!(!handler.has_errors());
    }

    #[test]
    fn var_decl_records_declared_type() {
        let (table, _) = check("fn main() { var x: int = 1 }");
        let main = Symbol::intern("main");
        let x = Symbol::intern("x");
        assert_eq!(table.var_type(main, x).unwrap().ty, NamedType::Int);
    }

    #[test]
    fn mismatched_annotation_and_initializer_is_an_error() {
        let (_, handler) = check("fn main() { var x: int = \"oops\" }");
        assert!(handler.has_errors());
        assert!(handler
            .diagnostics()
            .iter()
            .any(|d| d.code == Some(DiagnosticCode::TYPE_MISMATCH)));
    }

    #[test]
    fn redeclared_variable_is_an_error() {
        let (_, handler) = check("fn main() { var x: int = 1\nvar x: int = 2 }");
        assert!(handler
            .diagnostics()
            .iter()
            .any(|d| d.code == Some(DiagnosticCode::REDECLARED_VARIABLE)));
    }

    #[test]
    fn undefined_variable_is_an_error() {
        let (_, handler) = check("fn main() { println(missing) }");
        assert!(handler
            .diagnostics()
            .iter()
            .any(|d| d.code == Some(DiagnosticCode::UNDEFINED_VARIABLE)));
    }

    #[test]
    fn assigning_to_const_is_an_error() {
        let (_, handler) = check("fn main() { const x: int = 1\nx = 2 }");
        assert!(handler
            .diagnostics()
            .iter()
            .any(|d| d.code == Some(DiagnosticCode::ASSIGN_TO_CONST)));
    }

    #[test]
    fn non_bool_while_condition_is_an_error() {
        let (_, handler) = check("fn main() { while (1) { println(1) } }");
        assert!(handler
            .diagnostics()
            .iter()
            .any(|d| d.code == Some(DiagnosticCode::NON_BOOL_CONDITION)));
    }

    #[test]
    fn unknown_function_call_is_an_error() {
        let (_, handler) = check("fn main() { frobnicate(1) }");
        assert!(handler
            .diagnostics()
            .iter()
            .any(|d| d.code == Some(DiagnosticCode::UNKNOWN_FUNCTION)));
    }

    #[test]
    fn string_minus_int_is_strings_only_add() {
        let (_, handler) = check(r#"fn main() { var x = "a" - 1 }"#);
        assert!(handler
            .diagnostics()
            .iter()
            .any(|d| d.code == Some(DiagnosticCode::STRINGS_ONLY_ADD)));
    }

    #[test]
    fn modulo_on_float_is_invalid_type() {
        let (_, handler) = check("fn main() { var x = 1.0 % 2.0 }");
        assert!(handler
            .diagnostics()
            .iter()
            .any(|d| d.code == Some(DiagnosticCode::INVALID_TYPE)));
    }

    #[test]
    fn every_well_typed_expr_is_recorded() {
        let (table, _) = check("fn main() { var x: int = 1 + 2 * 3 }");
        let main = Symbol::intern("main");
        let x = Symbol::intern("x");
        assert_eq!(table.var_type(main, x).unwrap().ty, NamedType::Int);
    }
}
