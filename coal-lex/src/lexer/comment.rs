//! Skipping whitespace, semicolons, and line comments ahead of each token.

use super::Lexer;

impl<'a> Lexer<'a> {
    /// Skips everything `next_token` doesn't care about: whitespace,
    /// semicolons (tolerated but meaningless), and `//` line comments
    /// through end of line.
    pub(super) fn skip_trivia(&mut self) {
        loop {
            match self.cursor.current_char() {
                ' ' | '\t' | '\r' | '\n' | ';' => {
                    self.cursor.advance();
                }
                '/' if self.cursor.peek_char(1) == '/' => {
                    self.cursor.advance();
                    self.cursor.advance();
                    while !self.cursor.is_at_end() && self.cursor.current_char() != '\n' {
                        self.cursor.advance();
                    }
                }
                _ => return,
            }
        }
    }
}
