//! The lexer, organized the way the pipeline's other stages are: a core
//! dispatch loop plus one focused submodule per literal kind.

mod comment;
mod number;
mod string;

use coal_util::{DiagnosticBuilder, DiagnosticCode, FileId, Handler, Span, Symbol};

use crate::cursor::Cursor;
use crate::token::{Token, TokenKind};

/// Scans a source buffer into [`Token`]s on demand.
///
/// Implements [`Iterator`] so callers that just want "all the tokens" can
/// `collect()`; the parser instead drives [`Lexer::next_token`] directly to
/// keep one- and two-token lookahead explicit.
pub struct Lexer<'a> {
    cursor: Cursor<'a>,
    handler: &'a Handler,
    file: FileId,
    token_start: usize,
    token_start_line: u32,
    token_start_column: u32,
}

impl<'a> Lexer<'a> {
    pub fn new(source: &'a str, file: FileId, handler: &'a Handler) -> Self {
        Self {
            cursor: Cursor::new(source),
            handler,
            file,
            token_start: 0,
            token_start_line: 1,
            token_start_column: 1,
        }
    }

    pub fn next_token(&mut self) -> Token {
        self.skip_trivia();

        self.token_start = self.cursor.position();
        self.token_start_line = self.cursor.line();
        self.token_start_column = self.cursor.column();

        if self.cursor.is_at_end() {
            return Token::new(TokenKind::Eof, self.span_from_start());
        }

        let kind = match self.cursor.current_char() {
            '(' => self.single(TokenKind::LParen),
            ')' => self.single(TokenKind::RParen),
            '{' => self.single(TokenKind::LBrace),
            '}' => self.single(TokenKind::RBrace),
            ',' => self.single(TokenKind::Comma),
            ':' => self.single(TokenKind::Colon),
            '.' => {
                self.cursor.advance();
                if self.cursor.match_char('.') {
                    TokenKind::DotDot
                } else {
                    TokenKind::Dot
                }
            }
            '+' => {
                self.cursor.advance();
                if self.cursor.match_char('=') {
                    TokenKind::PlusEq
                } else {
                    TokenKind::Plus
                }
            }
            '-' => self.single(TokenKind::Minus),
            '*' => self.single(TokenKind::Star),
            '/' => self.single(TokenKind::Slash),
            '%' => self.single(TokenKind::Percent),
            '^' => self.single(TokenKind::Caret),
            '=' => {
                self.cursor.advance();
                if self.cursor.match_char('=') {
                    TokenKind::EqEq
                } else {
                    TokenKind::Eq
                }
            }
            '!' => {
                self.cursor.advance();
                if self.cursor.match_char('=') {
                    TokenKind::NotEq
                } else {
                    TokenKind::Bang
                }
            }
            '<' => {
                self.cursor.advance();
                if self.cursor.match_char('=') {
                    TokenKind::LtEq
                } else {
                    TokenKind::Lt
                }
            }
            '>' => {
                self.cursor.advance();
                if self.cursor.match_char('=') {
                    TokenKind::GtEq
                } else {
                    TokenKind::Gt
                }
            }
            '&' => {
                self.cursor.advance();
                if self.cursor.match_char('&') {
                    TokenKind::AndAnd
                } else {
                    self.report_error(
                        "unexpected character '&'; bitwise operators are not supported"
                            .to_string(),
                        DiagnosticCode::UNEXPECTED_CHAR,
                    );
                    return self.next_token();
                }
            }
            '|' => {
                self.cursor.advance();
                if self.cursor.match_char('|') {
                    TokenKind::OrOr
                } else {
                    self.report_error(
                        "unexpected character '|'; bitwise operators are not supported"
                            .to_string(),
                        DiagnosticCode::UNEXPECTED_CHAR,
                    );
                    return self.next_token();
                }
            }
            '"' => return self.lex_string(),
            '\'' => return self.lex_char(),
            c if c == '_' || c.is_ascii_alphabetic() => self.lex_identifier(),
            c if c.is_ascii_digit() => return self.lex_number(),
            c => {
                self.report_error(
                    format!("unexpected character '{c}'"),
                    DiagnosticCode::UNEXPECTED_CHAR,
                );
                self.cursor.advance();
                return self.next_token();
            }
        };

        Token::new(kind, self.span_from_start())
    }

    fn single(&mut self, kind: TokenKind) -> TokenKind {
        self.cursor.advance();
        kind
    }

    fn lex_identifier(&mut self) -> TokenKind {
        while {
            let c = self.cursor.current_char();
            c == '_' || c.is_ascii_alphanumeric()
        } {
            self.cursor.advance();
        }
        let text = self.cursor.slice_from(self.token_start);
        TokenKind::keyword(text).unwrap_or_else(|| TokenKind::Identifier(Symbol::intern(text)))
    }

    fn span_from_start(&self) -> Span {
        Span::with_file(
            self.token_start,
            self.cursor.position(),
            self.token_start_line,
            self.token_start_column,
            self.file,
        )
    }

    fn report_error(&mut self, message: String, code: DiagnosticCode) {
        let span = self.span_from_start();
        DiagnosticBuilder::error(message)
            .code(code)
            .span(span)
            .emit(self.handler);
    }
}

impl<'a> Iterator for Lexer<'a> {
    type Item = Token;

    fn next(&mut self) -> Option<Token> {
        let token = self.next_token();
        if token.is_eof() {
            None
        } else {
            Some(token)
        }
    }
}
