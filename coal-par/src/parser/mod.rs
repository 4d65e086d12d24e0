//! Recursive-descent parser with Pratt-style precedence climbing for
//! expressions. Organized the way the lexer is: a core dispatch/cursor here,
//! one focused submodule per grammar layer.

mod expr;
mod items;
mod stmt;
mod types;

use coal_util::{DiagnosticBuilder, DiagnosticCode, Handler, Span};

use coal_lex::{Token, TokenKind};

use crate::ast::{Expr, ExprId, ExprKind, Program};

/// Parses a whole source file's token stream into a [`Program`].
///
/// Tokens are collected up front (the grammar never needs more than one- or
/// two-token lookahead, but indexing a `Vec` is simpler than threading a
/// peekable iterator through every submodule).
pub struct Parser<'a> {
    tokens: Vec<Token>,
    pos: usize,
    handler: &'a Handler,
    next_expr_id: u32,
}

impl<'a> Parser<'a> {
    pub fn new(tokens: Vec<Token>, handler: &'a Handler) -> Self {
        Self { tokens, pos: 0, handler, next_expr_id: 0 }
    }

    /// Parses a complete program. Stops at the first syntax error — callers
    /// check `handler.has_errors()` afterward; a `Program` is still returned
    /// on error, holding only the declarations parsed before the failure.
    pub fn parse_program(&mut self) -> Program {
        self.parse_program_impl()
    }

    fn fresh_expr_id(&mut self) -> ExprId {
        let id = ExprId(self.next_expr_id);
        self.next_expr_id += 1;
        id
    }

    fn make_expr(&mut self, kind: ExprKind, span: Span) -> Expr {
        Expr { id: self.fresh_expr_id(), span, kind: Box::new(kind) }
    }

    fn current(&self) -> &Token {
        self.tokens.get(self.pos).expect("token stream always ends with EOF")
    }

    fn peek(&self, offset: usize) -> &Token {
        self.tokens
            .get(self.pos + offset)
            .unwrap_or_else(|| self.tokens.last().expect("token stream always ends with EOF"))
    }

    fn is_at_end(&self) -> bool {
        matches!(self.current().kind, TokenKind::Eof)
    }

    fn advance(&mut self) -> Token {
        let tok = *self.current();
        if !self.is_at_end() {
            self.pos += 1;
        }
        tok
    }

    fn check(&self, kind: &TokenKind) -> bool {
        std::mem::discriminant(&self.current().kind) == std::mem::discriminant(kind)
    }

    fn match_kind(&mut self, kind: &TokenKind) -> Option<Token> {
        if self.check(kind) {
            Some(self.advance())
        } else {
            None
        }
    }

    /// Consumes the current token if it matches `kind`, else reports
    /// `ExpectedToken` and returns `None` without advancing.
    fn expect(&mut self, kind: &TokenKind, what: &str) -> Option<Token> {
        if let Some(tok) = self.match_kind(kind) {
            Some(tok)
        } else {
            let got = self.current().kind.name();
            self.error_expected_token(what, got, self.current().span);
            None
        }
    }

    fn error_expected_token(&self, expected: &str, got: &str, span: Span) {
        DiagnosticBuilder::error(format!("expected {expected}, found {got}"))
            .code(DiagnosticCode::EXPECTED_TOKEN)
            .span(span)
            .emit(self.handler);
    }

    fn error_expected_expr(&self, span: Span) {
        DiagnosticBuilder::error("expected an expression".to_string())
            .code(DiagnosticCode::EXPECTED_EXPR)
            .span(span)
            .emit(self.handler);
    }

    fn error_var_needs_type(&self, span: Span) {
        DiagnosticBuilder::error(
            "a variable declaration needs either a type annotation or an initializer".to_string(),
        )
        .code(DiagnosticCode::VAR_NEEDS_TYPE)
        .span(span)
        .emit(self.handler);
    }
}

#[cfg(test)]
mod tests {
    use coal_util::{FileId, Handler};

    use crate::ast::{BinOp, Decl, ExprKind, Stmt};
    use crate::parse;

    fn parse_ok(source: &str) -> crate::Program {
        let handler = Handler::new();
        let program = parse(source, FileId::DUMMY, &handler);
        assert!(!handler.has_errors(), "unexpected parse errors for {source:?}");
        program
    }

    fn parse_err(source: &str) -> bool {
        let handler = Handler::new();
        parse(source, FileId::DUMMY, &handler);
        handler.has_errors()
    }

    #[test]
    fn parses_empty_function() {
        let program = parse_ok("fn main() {}");
        assert_eq!(program.decls.len(), 1);
        let Decl::FnDecl(f) = &program.decls[0];
        assert_eq!(f.body.stmts.len(), 0);
    }

    #[test]
    fn parses_var_decl_with_type_and_init() {
        let program = parse_ok("fn main() { var x: int = 1 }");
        let Decl::FnDecl(f) = &program.decls[0];
        assert!(matches!(&f.body.stmts[0], Stmt::VarDecl(v) if v.annotated_type.is_some() && v.init.is_some()));
    }

    #[test]
    fn var_decl_missing_both_type_and_init_is_an_error() {
        assert!(parse_err("fn main() { var x }"));
    }

    #[test]
    fn assignment_lookahead_distinguishes_assign_from_expr_stmt() {
        let program = parse_ok("fn main() { x = 1 foo() }");
        let Decl::FnDecl(f) = &program.decls[0];
        assert!(matches!(&f.body.stmts[0], Stmt::Assign(_)));
        assert!(matches!(&f.body.stmts[1], Stmt::ExprStmt(_)));
    }

    #[test]
    fn plus_eq_desugars_to_add_binary() {
        let program = parse_ok("fn main() { x += 1 }");
        let Decl::FnDecl(f) = &program.decls[0];
        let Stmt::Assign(assign) = &f.body.stmts[0] else { panic!("expected assign") };
        assert!(matches!(*assign.value.kind, ExprKind::Binary { op: BinOp::Add, .. }));
    }

    #[test]
    fn precedence_respects_the_full_table() {
        let program = parse_ok("fn main() { x = a || b && c == d < e + f * g ^ h }");
        let Decl::FnDecl(f) = &program.decls[0];
        let Stmt::Assign(assign) = &f.body.stmts[0] else { panic!("expected assign") };
        assert!(matches!(*assign.value.kind, ExprKind::Binary { op: BinOp::Or, .. }));
    }

    #[test]
    fn left_associativity_nests_left() {
        let program = parse_ok("fn main() { x = a - b - c }");
        let Decl::FnDecl(f) = &program.decls[0];
        let Stmt::Assign(assign) = &f.body.stmts[0] else { panic!("expected assign") };
        let ExprKind::Binary { op: BinOp::Sub, left, .. } = &*assign.value.kind else {
            panic!("expected subtraction")
        };
        assert!(matches!(*left.kind, ExprKind::Binary { op: BinOp::Sub, .. }));
    }

    #[test]
    fn method_call_binds_tighter_than_not() {
        let program = parse_ok("fn main() { x = !a.toString().toInt() }");
        let Decl::FnDecl(f) = &program.decls[0];
        let Stmt::Assign(assign) = &f.body.stmts[0] else { panic!("expected assign") };
        assert!(matches!(*assign.value.kind, ExprKind::Unary { .. }));
    }

    #[test]
    fn if_elif_else_chain_parses() {
        let program = parse_ok(
            "fn main() { if (a) { b } elif (c) { d } elif (e) { f } else { g } }",
        );
        let Decl::FnDecl(fdecl) = &program.decls[0];
        let Stmt::IfStmt(ifs) = &fdecl.body.stmts[0] else { panic!("expected if") };
        assert_eq!(ifs.branches.len(), 3);
        assert!(ifs.else_branch.is_some());
    }

    #[test]
    fn while_loop_parses() {
        let program = parse_ok("fn main() { while (i < 10) { i += 1 } }");
        let Decl::FnDecl(f) = &program.decls[0];
        assert!(matches!(&f.body.stmts[0], Stmt::WhileStmt(_)));
    }

    #[test]
    fn call_with_args_parses() {
        let program = parse_ok(r#"fn main() { println("hi") }"#);
        let Decl::FnDecl(f) = &program.decls[0];
        assert!(matches!(&f.body.stmts[0], Stmt::ExprStmt(e) if matches!(*e.kind, ExprKind::Call { .. })));
    }

    #[test]
    fn parenthesized_expr_overrides_precedence() {
        let program = parse_ok("fn main() { x = (a + b) * c }");
        let Decl::FnDecl(f) = &program.decls[0];
        let Stmt::Assign(assign) = &f.body.stmts[0] else { panic!("expected assign") };
        let ExprKind::Binary { op: BinOp::Mul, left, .. } = &*assign.value.kind else {
            panic!("expected multiplication")
        };
        assert!(matches!(*left.kind, ExprKind::Binary { op: BinOp::Add, .. }));
    }

    #[test]
    fn missing_closing_brace_is_an_error() {
        assert!(parse_err("fn main() { var x: int = 1"));
    }

    #[test]
    fn expression_ids_are_unique_across_the_program() {
        let program = parse_ok("fn main() { var x: int = 1 + 2 var y: int = 3 * 4 }");
        let Decl::FnDecl(f) = &program.decls[0];
        let mut ids = Vec::new();
        for stmt in &f.body.stmts {
            if let Stmt::VarDecl(v) = stmt {
                if let Some(init) = &v.init {
                    ids.push(init.id);
                }
            }
        }
        assert_eq!(ids.len(), 2);
        assert_ne!(ids[0], ids[1]);
    }
}
