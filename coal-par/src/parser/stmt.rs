//! Statements: `block`, `varDecl`, `assignStmt`, `ifStmt`, `whileStmt`, `exprStmt`.

use coal_lex::TokenKind;

use crate::ast::{
    Assign, BinOp, Block, ExprKind, IfBranch, IfStmt, Stmt, VarDecl, WhileStmt,
};

use super::Parser;

impl<'a> Parser<'a> {
    /// Stops at the first statement that fails to parse rather than
    /// recovering and continuing — a syntax error aborts the whole parse,
    /// per the pipeline's fail-fast, single-diagnostic contract.
    pub(super) fn parse_block(&mut self) -> Option<Block> {
        let start = self.expect(&TokenKind::LBrace, "'{'")?.span;

        let mut stmts = Vec::new();
        while !self.check(&TokenKind::RBrace) && !self.is_at_end() {
            let stmt = self.parse_stmt()?;
            stmts.push(stmt);
        }

        let end = self.expect(&TokenKind::RBrace, "'}'")?.span;
        Some(Block { stmts, span: start.merge(end) })
    }

    fn parse_stmt(&mut self) -> Option<Stmt> {
        match &self.current().kind {
            TokenKind::Var | TokenKind::Const => self.parse_var_decl().map(Stmt::VarDecl),
            TokenKind::If => self.parse_if_stmt().map(Stmt::IfStmt),
            TokenKind::While => self.parse_while_stmt().map(Stmt::WhileStmt),
            TokenKind::Identifier(_)
                if matches!(self.peek(1).kind, TokenKind::Eq | TokenKind::PlusEq) =>
            {
                self.parse_assign_stmt().map(Stmt::Assign)
            }
            _ => {
                let expr = self.parse_expr()?;
                Some(Stmt::ExprStmt(expr))
            }
        }
    }

    fn parse_var_decl(&mut self) -> Option<VarDecl> {
        let is_const = matches!(self.current().kind, TokenKind::Const);
        let start = self.advance().span;

        let name = self.parse_identifier("a variable name")?;

        let annotated_type = if self.match_kind(&TokenKind::Colon).is_some() {
            self.parse_type_ref()
        } else {
            None
        };

        let init = if self.match_kind(&TokenKind::Eq).is_some() {
            Some(self.parse_expr()?)
        } else {
            None
        };

        let span = match &init {
            Some(expr) => start.merge(expr.span),
            None => start,
        };

        if annotated_type.is_none() && init.is_none() {
            self.error_var_needs_type(span);
        }

        Some(VarDecl { name, annotated_type, init, is_const, span })
    }

    /// `IDENT '=' expr` or the `+=` form, desugared per the grammar:
    /// `a += e` becomes `a = a + e` as a synthesized `Binary{Add, a, e}`.
    fn parse_assign_stmt(&mut self) -> Option<Assign> {
        let name = self.parse_identifier("a variable name")?;
        let name_span = self.tokens[self.pos - 1].span;

        let op_tok = self.advance();
        let rhs = self.parse_expr()?;

        let value = match op_tok.kind {
            TokenKind::Eq => rhs,
            TokenKind::PlusEq => {
                let lhs = self.make_expr(ExprKind::Ident { name }, name_span);
                let span = name_span.merge(rhs.span);
                self.make_expr(ExprKind::Binary { op: BinOp::Add, left: lhs, right: rhs }, span)
            }
            _ => unreachable!("assign lookahead only matches '=' or '+='"),
        };

        let span = name_span.merge(value.span);
        Some(Assign { name, value, span })
    }

    fn parse_if_stmt(&mut self) -> Option<IfStmt> {
        let start = self.advance().span;

        let mut branches = vec![self.parse_if_branch()?];
        while self.match_kind(&TokenKind::Elif).is_some() {
            branches.push(self.parse_if_branch()?);
        }

        let else_branch =
            if self.match_kind(&TokenKind::Else).is_some() { Some(self.parse_block()?) } else { None };

        let end = else_branch
            .as_ref()
            .map(|b| b.span)
            .unwrap_or_else(|| branches.last().unwrap().body.span);

        Some(IfStmt { branches, else_branch, span: start.merge(end) })
    }

    fn parse_if_branch(&mut self) -> Option<IfBranch> {
        self.expect(&TokenKind::LParen, "'('")?;
        let cond = self.parse_expr()?;
        self.expect(&TokenKind::RParen, "')'")?;
        let body = self.parse_block()?;
        Some(IfBranch { cond, body })
    }

    fn parse_while_stmt(&mut self) -> Option<WhileStmt> {
        let start = self.advance().span;
        self.expect(&TokenKind::LParen, "'('")?;
        let cond = self.parse_expr()?;
        self.expect(&TokenKind::RParen, "')'")?;
        let body = self.parse_block()?;
        let span = start.merge(body.span);
        Some(WhileStmt { cond, body, span })
    }
}
