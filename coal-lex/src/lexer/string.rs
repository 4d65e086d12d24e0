//! String and char literal lexing.

use coal_util::{DiagnosticCode, Symbol};

use crate::token::{Token, TokenKind};

use super::Lexer;

impl<'a> Lexer<'a> {
    /// Lexes a `"`-delimited string literal. Escapes: `\" \\ \n \t \r`. A
    /// literal (unescaped) newline inside the string is an error.
    pub(super) fn lex_string(&mut self) -> Token {
        self.cursor.advance();
        let mut content = String::new();

        loop {
            if self.cursor.is_at_end() {
                self.report_error(
                    "unterminated string literal".to_string(),
                    DiagnosticCode::UNTERMINATED_STRING,
                );
                break;
            }
            match self.cursor.current_char() {
                '"' => {
                    self.cursor.advance();
                    break;
                }
                '\n' => {
                    self.report_error(
                        "unterminated string literal".to_string(),
                        DiagnosticCode::UNTERMINATED_STRING,
                    );
                    break;
                }
                '\\' => {
                    self.cursor.advance();
                    if let Some(c) = self.parse_escape() {
                        content.push(c);
                    }
                }
                c => {
                    content.push(c);
                    self.cursor.advance();
                }
            }
        }

        Token::new(
            TokenKind::StringLiteral(Symbol::intern(&content)),
            self.span_from_start(),
        )
    }

    /// Lexes a `'`-delimited char literal. Escapes: `\' \\ \n \t \r`.
    pub(super) fn lex_char(&mut self) -> Token {
        self.cursor.advance();

        if self.cursor.is_at_end() || self.cursor.current_char() == '\'' {
            self.report_error(
                "empty character literal".to_string(),
                DiagnosticCode::EMPTY_CHAR_LITERAL,
            );
            if self.cursor.current_char() == '\'' {
                self.cursor.advance();
            }
            return Token::new(TokenKind::CharLiteral('\0'), self.span_from_start());
        }

        let value = if self.cursor.current_char() == '\\' {
            self.cursor.advance();
            self.parse_escape().unwrap_or('\0')
        } else {
            let c = self.cursor.current_char();
            self.cursor.advance();
            c
        };

        if self.cursor.current_char() == '\'' {
            self.cursor.advance();
        } else {
            self.report_error(
                "unterminated character literal".to_string(),
                DiagnosticCode::UNTERMINATED_CHAR,
            );
        }

        Token::new(TokenKind::CharLiteral(value), self.span_from_start())
    }

    fn parse_escape(&mut self) -> Option<char> {
        if self.cursor.is_at_end() {
            self.report_error(
                "unterminated escape sequence".to_string(),
                DiagnosticCode::UNTERMINATED_STRING,
            );
            return None;
        }
        let c = self.cursor.current_char();
        self.cursor.advance();
        match c {
            'n' => Some('\n'),
            't' => Some('\t'),
            'r' => Some('\r'),
            '\\' => Some('\\'),
            '"' => Some('"'),
            '\'' => Some('\''),
            other => {
                self.report_error(
                    format!("unknown escape sequence '\\{other}'"),
                    DiagnosticCode::UNKNOWN_ESCAPE_SEQUENCE,
                );
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use coal_util::{FileId, Handler, Symbol};

    use crate::token::TokenKind;
    use crate::Lexer;

    fn lex_one(source: &str) -> (TokenKind, bool) {
        let handler = Handler::new();
        let mut lexer = Lexer::new(source, FileId::DUMMY, &handler);
        let kind = lexer.next_token().kind;
        (kind, handler.has_errors())
    }

    #[test]
    fn plain_string() {
        let (kind, errs) = lex_one("\"hello\"");
        assert_eq!(kind, TokenKind::StringLiteral(Symbol::intern("hello")));
        assert!(!errs);
    }

    #[test]
    fn string_with_newline_escape() {
        let (kind, errs) = lex_one("\"a\\nb\"");
        assert_eq!(kind, TokenKind::StringLiteral(Symbol::intern("a\nb")));
        assert!(!errs);
    }

    #[test]
    fn unterminated_string_is_an_error() {
        let (_, errs) = lex_one("\"abc");
        assert!(errs);
    }

    #[test]
    fn literal_newline_in_string_is_an_error() {
        let (_, errs) = lex_one("\"abc\ndef\"");
        assert!(errs);
    }

    #[test]
    fn unknown_escape_is_an_error() {
        let (_, errs) = lex_one("\"\\q\"");
        assert!(errs);
    }

    #[test]
    fn plain_char() {
        let (kind, errs) = lex_one("'a'");
        assert_eq!(kind, TokenKind::CharLiteral('a'));
        assert!(!errs);
    }

    #[test]
    fn escaped_char() {
        let (kind, errs) = lex_one("'\\n'");
        assert_eq!(kind, TokenKind::CharLiteral('\n'));
        assert!(!errs);
    }

    #[test]
    fn empty_char_literal_is_an_error() {
        let (_, errs) = lex_one("''");
        assert!(errs);
    }

    #[test]
    fn unterminated_char_literal_is_an_error() {
        let (_, errs) = lex_one("'ab");
        assert!(errs);
    }
}
