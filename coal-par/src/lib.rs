//! coal-par - the Coal parser.
//!
//! Recursive-descent with Pratt-style precedence climbing, grounded on the
//! token stream [`coal_lex`] produces. Builds a [`ast::Program`] and reports
//! syntax errors through the same [`coal_util::Handler`] the lexer uses.

pub mod ast;
mod parser;

pub use ast::{
    Assign, BinOp, Block, Decl, Expr, ExprId, ExprKind, FnDecl, IfBranch, IfStmt, Program, Stmt,
    TypeRef, UnOp, VarDecl, WhileStmt,
};
pub use parser::Parser;

use coal_lex::Lexer;
use coal_util::{FileId, Handler};

/// Lexes and parses a whole source file in one call — the shape every
/// downstream crate actually wants, rather than wiring a `Lexer` to a
/// `Parser` by hand at every call site.
pub fn parse(source: &str, file: FileId, handler: &Handler) -> Program {
    let mut lexer = Lexer::new(source, file, handler);
    let mut tokens = Vec::new();
    loop {
        let tok = lexer.next_token();
        let eof = tok.is_eof();
        tokens.push(tok);
        if eof {
            break;
        }
    }
    let mut parser = Parser::new(tokens, handler);
    parser.parse_program()
}
