//! Property tests for the lexer invariants in the testable-properties list:
//! every successful lex ends in `EOF`, and every token's text matches the
//! slice of source its span covers.

use coal_lex::Lexer;
use coal_util::{FileId, Handler};
use proptest::prelude::*;

fn digits_underscored() -> impl Strategy<Value = String> {
    "[0-9][0-9_]{0,8}".prop_map(|s| s)
}

proptest! {
    #[test]
    fn every_lex_ends_in_eof(src in "[a-z ()+*/]{0,40}") {
        let handler = Handler::new();
        let mut lexer = Lexer::new(&src, FileId::DUMMY, &handler);
        let mut last_was_eof = false;
        for _ in 0..1000 {
            let tok = lexer.next_token();
            last_was_eof = tok.is_eof();
            if last_was_eof {
                break;
            }
        }
        prop_assert!(last_was_eof);
    }

    #[test]
    fn every_token_lexeme_matches_its_span(src in "[a-zA-Z0-9_ ()+:={}]{0,60}") {
        let handler = Handler::new();
        let mut lexer = Lexer::new(&src, FileId::DUMMY, &handler);
        loop {
            let tok = lexer.next_token();
            if tok.is_eof() {
                break;
            }
            let lexeme = tok.span.text(&src);
            prop_assert!(!lexeme.is_empty());
        }
    }

    #[test]
    fn underscore_separated_integers_round_trip(digits in digits_underscored()) {
        let handler = Handler::new();
        let mut lexer = Lexer::new(&digits, FileId::DUMMY, &handler);
        let tok = lexer.next_token();
        let cleaned: String = digits.chars().filter(|&c| c != '_').collect();
        if let Ok(expected) = cleaned.parse::<i64>() {
            prop_assert_eq!(tok.kind, coal_lex::TokenKind::IntLiteral(expected));
        }
    }
}
