//! `typeRef := 'int' | 'float' | 'bool' | 'char' | 'string' | IDENT`.

use coal_lex::TokenKind;

use crate::ast::TypeRef;

use super::Parser;

impl<'a> Parser<'a> {
    pub(super) fn parse_type_ref(&mut self) -> Option<TypeRef> {
        let (name, sym) = match self.current().kind {
            TokenKind::KwInt => ("int", None),
            TokenKind::KwFloat => ("float", None),
            TokenKind::KwBool => ("bool", None),
            TokenKind::KwChar => ("char", None),
            TokenKind::KwString => ("string", None),
            TokenKind::Identifier(sym) => ("", Some(sym)),
            _ => {
                let got = self.current().kind.name();
                self.error_expected_token("a type", got, self.current().span);
                return None;
            }
        };
        self.advance();
        Some(match sym {
            Some(sym) => TypeRef::Named(sym),
            None => TypeRef::from_name(name, coal_util::Symbol::intern(name)),
        })
    }
}
