//! Top-level declarations: `program := fnDecl*`, `fnDecl := 'fn' IDENT '(' ')' block`.

use coal_lex::TokenKind;
use coal_util::Symbol;

use crate::ast::{Decl, FnDecl, Program};

use super::Parser;

impl<'a> Parser<'a> {
    /// Stops at the first declaration that fails to parse rather than
    /// recovering and continuing — a syntax error aborts the whole parse,
    /// per the pipeline's fail-fast, single-diagnostic contract.
    pub(super) fn parse_program_impl(&mut self) -> Program {
        let mut decls = Vec::new();
        while !self.is_at_end() {
            match self.parse_decl() {
                Some(decl) => decls.push(decl),
                None => break,
            }
        }
        Program { decls }
    }

    fn parse_decl(&mut self) -> Option<Decl> {
        match &self.current().kind {
            TokenKind::Fn => self.parse_fn_decl().map(Decl::FnDecl),
            _ => {
                let got = self.current().kind.name();
                self.error_expected_token("a function declaration", got, self.current().span);
                None
            }
        }
    }

    /// Parses one function declaration. The parameter list is accepted but
    /// discarded — Coal functions take no arguments — and a return-type
    /// annotation, if present, is parsed and kept only for `--emit-ast`; the
    /// analyzer and emitter always treat a function as returning `int`.
    fn parse_fn_decl(&mut self) -> Option<FnDecl> {
        let start = self.expect(&TokenKind::Fn, "'fn'")?.span;

        let name = self.parse_identifier("a function name")?;

        self.expect(&TokenKind::LParen, "'('")?;
        let params = self.parse_params();
        self.expect(&TokenKind::RParen, "')'")?;

        let return_type = if self.match_kind(&TokenKind::Colon).is_some() {
            self.parse_type_ref()
        } else {
            None
        };

        let body = self.parse_block()?;
        let span = start.merge(body.span);

        Some(FnDecl { name, params, return_type, body, span })
    }

    /// `name (: typeRef)?` repeated with commas. The grammar only promises
    /// parameter lists are *accepted*; nothing downstream reads this list.
    fn parse_params(&mut self) -> Vec<Symbol> {
        let mut params = Vec::new();
        if self.check(&TokenKind::RParen) {
            return params;
        }
        loop {
            match self.parse_identifier("a parameter name") {
                Some(name) => params.push(name),
                None => break,
            }
            if self.match_kind(&TokenKind::Colon).is_some() {
                self.parse_type_ref();
            }
            if self.match_kind(&TokenKind::Comma).is_none() {
                break;
            }
        }
        params
    }

    pub(super) fn parse_identifier(&mut self, what: &str) -> Option<Symbol> {
        match self.current().kind {
            TokenKind::Identifier(sym) => {
                self.advance();
                Some(sym)
            }
            _ => {
                let got = self.current().kind.name();
                self.error_expected_token(what, got, self.current().span);
                None
            }
        }
    }
}
