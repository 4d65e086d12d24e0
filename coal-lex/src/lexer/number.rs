//! Numeric literal lexing: decimal integers and floats, `_`-separated.

use crate::token::{Token, TokenKind};

use super::Lexer;

impl<'a> Lexer<'a> {
    /// Lexes an `IntLiteral` or `FloatLiteral`. A run of digits becomes a
    /// float iff it's followed by `.` and at least one further digit —
    /// `1.` is the integer `1` followed by a `Dot` token, not a float.
    pub(super) fn lex_number(&mut self) -> Token {
        self.consume_digits();

        let is_float =
            self.cursor.current_char() == '.' && self.cursor.peek_char(1).is_ascii_digit();

        if is_float {
            self.cursor.advance();
            self.consume_digits();
        }

        let text = self.cursor.slice_from(self.token_start);
        let cleaned: String = text.chars().filter(|&c| c != '_').collect();
        let span = self.span_from_start();

        let kind = if is_float {
            TokenKind::FloatLiteral(cleaned.parse::<f64>().unwrap_or(0.0))
        } else {
            TokenKind::IntLiteral(cleaned.parse::<i64>().unwrap_or(i64::MAX))
        };

        Token::new(kind, span)
    }

    fn consume_digits(&mut self) {
        while {
            let c = self.cursor.current_char();
            c.is_ascii_digit() || c == '_'
        } {
            self.cursor.advance();
        }
    }
}

#[cfg(test)]
mod tests {
    use coal_util::{FileId, Handler};

    use crate::token::TokenKind;
    use crate::Lexer;

    fn lex_one(source: &str) -> TokenKind {
        let handler = Handler::new();
        let mut lexer = Lexer::new(source, FileId::DUMMY, &handler);
        lexer.next_token().kind
    }

    #[test]
    fn plain_integer() {
        assert_eq!(lex_one("42"), TokenKind::IntLiteral(42));
    }

    #[test]
    fn underscore_separated_integer() {
        assert_eq!(lex_one("1_000_000"), TokenKind::IntLiteral(1_000_000));
    }

    #[test]
    fn float_requires_digit_after_dot() {
        assert_eq!(lex_one("3.14"), TokenKind::FloatLiteral(3.14));
    }

    #[test]
    fn trailing_dot_without_digit_is_integer_then_dot() {
        assert_eq!(lex_one("1."), TokenKind::IntLiteral(1));
    }

    #[test]
    fn underscore_separated_float() {
        assert_eq!(lex_one("1_0.5_0"), TokenKind::FloatLiteral(10.50));
    }
}
