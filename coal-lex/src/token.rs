//! The closed token set.

use coal_util::{Span, Symbol};

/// The kind of a lexed token, together with any decoded literal payload.
///
/// Numeric and string payloads are decoded at lex time: an `IntLiteral`
/// already carries its `i64` value, not the raw digit text.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum TokenKind {
    // Keywords
    Fn,
    Var,
    Const,
    True,
    False,
    KwInt,
    KwFloat,
    KwBool,
    KwChar,
    KwString,
    If,
    Elif,
    Else,
    While,

    // Literals
    IntLiteral(i64),
    FloatLiteral(f64),
    CharLiteral(char),
    StringLiteral(Symbol),
    Identifier(Symbol),

    // Punctuation
    LParen,
    RParen,
    LBrace,
    RBrace,
    Colon,
    Comma,
    Dot,
    DotDot,
    Semicolon,

    // Operators
    Eq,
    EqEq,
    Bang,
    NotEq,
    PlusEq,
    Plus,
    Minus,
    Star,
    Slash,
    Percent,
    Caret,
    Lt,
    LtEq,
    Gt,
    GtEq,
    AndAnd,
    OrOr,

    Eof,
}

impl TokenKind {
    /// Looks up a reserved keyword by its exact identifier text, if any.
    pub fn keyword(ident: &str) -> Option<TokenKind> {
        Some(match ident {
            "fn" => TokenKind::Fn,
            "var" => TokenKind::Var,
            "const" => TokenKind::Const,
            "true" => TokenKind::True,
            "false" => TokenKind::False,
            "int" => TokenKind::KwInt,
            "float" => TokenKind::KwFloat,
            "bool" => TokenKind::KwBool,
            "char" => TokenKind::KwChar,
            "string" => TokenKind::KwString,
            "if" => TokenKind::If,
            "elif" => TokenKind::Elif,
            "else" => TokenKind::Else,
            "while" => TokenKind::While,
            _ => return None,
        })
    }

    /// A short tag for `--emit-tokens` dumps, matching the keyword/operator
    /// spelling where there's an obvious one.
    pub fn name(&self) -> &'static str {
        match self {
            TokenKind::Fn => "fn",
            TokenKind::Var => "var",
            TokenKind::Const => "const",
            TokenKind::True => "true",
            TokenKind::False => "false",
            TokenKind::KwInt => "int",
            TokenKind::KwFloat => "float",
            TokenKind::KwBool => "bool",
            TokenKind::KwChar => "char",
            TokenKind::KwString => "string",
            TokenKind::If => "if",
            TokenKind::Elif => "elif",
            TokenKind::Else => "else",
            TokenKind::While => "while",
            TokenKind::IntLiteral(_) => "IntLiteral",
            TokenKind::FloatLiteral(_) => "FloatLiteral",
            TokenKind::CharLiteral(_) => "CharLiteral",
            TokenKind::StringLiteral(_) => "StringLiteral",
            TokenKind::Identifier(_) => "Identifier",
            TokenKind::LParen => "(",
            TokenKind::RParen => ")",
            TokenKind::LBrace => "{",
            TokenKind::RBrace => "}",
            TokenKind::Colon => ":",
            TokenKind::Comma => ",",
            TokenKind::Dot => ".",
            TokenKind::DotDot => "..",
            TokenKind::Semicolon => ";",
            TokenKind::Eq => "=",
            TokenKind::EqEq => "==",
            TokenKind::Bang => "!",
            TokenKind::NotEq => "!=",
            TokenKind::PlusEq => "+=",
            TokenKind::Plus => "+",
            TokenKind::Minus => "-",
            TokenKind::Star => "*",
            TokenKind::Slash => "/",
            TokenKind::Percent => "%",
            TokenKind::Caret => "^",
            TokenKind::Lt => "<",
            TokenKind::LtEq => "<=",
            TokenKind::Gt => ">",
            TokenKind::GtEq => ">=",
            TokenKind::AndAnd => "&&",
            TokenKind::OrOr => "||",
            TokenKind::Eof => "EOF",
        }
    }
}

/// A token and the span of source it was lexed from.
///
/// The lexeme isn't stored redundantly — `span.text(source)` recovers it
/// from the original buffer.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Token {
    pub kind: TokenKind,
    pub span: Span,
}

impl Token {
    pub fn new(kind: TokenKind, span: Span) -> Self {
        Self { kind, span }
    }

    pub fn is_eof(&self) -> bool {
        matches!(self.kind, TokenKind::Eof)
    }
}
