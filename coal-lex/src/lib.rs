//! coal-lex - the Coal lexer.
//!
//! Turns a source buffer into a stream of [`Token`]s, reporting lexical
//! errors through a [`coal_util::Handler`] rather than returning a `Result`
//! per token — callers drain the iterator to completion and then check
//! `handler.has_errors()`, matching the fail-fast single-diagnostic
//! contract the rest of the pipeline follows.

mod cursor;
mod lexer;
mod token;

pub use lexer::Lexer;
pub use token::{Token, TokenKind};
