//! Expressions: Pratt-style precedence climbing over a left-associative
//! binary-operator table, with `!` as the sole prefix operator and `.method()`
//! postfix chaining that binds tighter than `!`.

use coal_lex::TokenKind;

use crate::ast::{BinOp, Expr, ExprKind, UnOp};

use super::Parser;

/// Binding power of each binary operator; higher binds tighter. Matches the
/// grammar's stated table exactly so there's no ambiguity translating it.
fn precedence(kind: &TokenKind) -> Option<(BinOp, u8)> {
    Some(match kind {
        TokenKind::OrOr => (BinOp::Or, 10),
        TokenKind::AndAnd => (BinOp::And, 20),
        TokenKind::EqEq => (BinOp::Eq, 30),
        TokenKind::NotEq => (BinOp::Ne, 30),
        TokenKind::Lt => (BinOp::Lt, 40),
        TokenKind::LtEq => (BinOp::Le, 40),
        TokenKind::Gt => (BinOp::Gt, 40),
        TokenKind::GtEq => (BinOp::Ge, 40),
        TokenKind::Plus => (BinOp::Add, 50),
        TokenKind::Minus => (BinOp::Sub, 50),
        TokenKind::Star => (BinOp::Mul, 60),
        TokenKind::Slash => (BinOp::Div, 60),
        TokenKind::Percent => (BinOp::Mod, 60),
        TokenKind::Caret => (BinOp::Pow, 70),
        _ => return None,
    })
}

impl<'a> Parser<'a> {
    pub(super) fn parse_expr(&mut self) -> Option<Expr> {
        self.parse_binary(0)
    }

    /// All operators are left-associative, so the recursive call for the
    /// right-hand side uses this operator's own `prec` as its minimum: the
    /// loop's `prec <= min_prec` check then rejects a same-precedence
    /// operator immediately, which is what stops `a - b - c` from being
    /// swallowed as `a - (b - c)`.
    fn parse_binary(&mut self, min_prec: u8) -> Option<Expr> {
        let mut lhs = self.parse_unary()?;

        while let Some((op, prec)) = precedence(&self.current().kind) {
            if prec <= min_prec {
                break;
            }
            self.advance();
            let rhs = self.parse_binary(prec)?;
            let span = lhs.span.merge(rhs.span);
            lhs = self.make_expr(ExprKind::Binary { op, left: lhs, right: rhs }, span);
        }

        Some(lhs)
    }

    fn parse_unary(&mut self) -> Option<Expr> {
        if matches!(self.current().kind, TokenKind::Bang) {
            let start = self.advance().span;
            let operand = self.parse_unary()?;
            let span = start.merge(operand.span);
            return Some(self.make_expr(ExprKind::Unary { op: UnOp::Not, expr: operand }, span));
        }
        self.parse_postfix()
    }

    fn parse_postfix(&mut self) -> Option<Expr> {
        let mut expr = self.parse_primary()?;

        while self.match_kind(&TokenKind::Dot).is_some() {
            let method = self.parse_identifier("a method name")?;
            self.expect(&TokenKind::LParen, "'('")?;
            let args = self.parse_arg_list()?;
            let end = self.expect(&TokenKind::RParen, "')'")?.span;
            let span = expr.span.merge(end);
            expr = self.make_expr(
                ExprKind::MethodCall { receiver: expr, method, args },
                span,
            );
        }

        Some(expr)
    }

    fn parse_primary(&mut self) -> Option<Expr> {
        let tok = self.current().clone();
        match tok.kind {
            TokenKind::IntLiteral(v) => {
                self.advance();
                Some(self.make_expr(ExprKind::IntLit(v), tok.span))
            }
            TokenKind::FloatLiteral(v) => {
                self.advance();
                Some(self.make_expr(ExprKind::FloatLit(v), tok.span))
            }
            TokenKind::CharLiteral(c) => {
                self.advance();
                Some(self.make_expr(ExprKind::CharLit(c), tok.span))
            }
            TokenKind::StringLiteral(s) => {
                self.advance();
                Some(self.make_expr(ExprKind::StringLit(s), tok.span))
            }
            TokenKind::True => {
                self.advance();
                Some(self.make_expr(ExprKind::BoolLit(true), tok.span))
            }
            TokenKind::False => {
                self.advance();
                Some(self.make_expr(ExprKind::BoolLit(false), tok.span))
            }
            TokenKind::Identifier(name) => {
                self.advance();
                if self.match_kind(&TokenKind::LParen).is_some() {
                    let args = self.parse_arg_list()?;
                    let end = self.expect(&TokenKind::RParen, "')'")?.span;
                    let span = tok.span.merge(end);
                    Some(self.make_expr(ExprKind::Call { callee: name, args }, span))
                } else {
                    Some(self.make_expr(ExprKind::Ident { name }, tok.span))
                }
            }
            TokenKind::LParen => {
                self.advance();
                let inner = self.parse_expr()?;
                let end = self.expect(&TokenKind::RParen, "')'")?.span;
                let span = tok.span.merge(end);
                Some(Expr { span, ..inner })
            }
            _ => {
                self.error_expected_expr(tok.span);
                None
            }
        }
    }

    fn parse_arg_list(&mut self) -> Option<Vec<Expr>> {
        let mut args = Vec::new();
        if self.check(&TokenKind::RParen) {
            return Some(args);
        }
        loop {
            args.push(self.parse_expr()?);
            if self.match_kind(&TokenKind::Comma).is_none() {
                break;
            }
        }
        Some(args)
    }
}
