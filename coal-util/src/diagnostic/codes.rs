//! The fixed registry of diagnostic codes.
//!
//! Codes are grouped by the stage that raises them: lexical (`E0001`-`E0005`),
//! syntactic (`E0101`-`E0102`), semantic (`E0103`-`E0125`), and internal
//! (`E1001`). The numbering has gaps reserved for future diagnostics within
//! each stage; it is not meant to be contiguous forever.

/// A diagnostic code, e.g. `E0104`.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct DiagnosticCode {
    number: u32,
}

impl DiagnosticCode {
    const fn new(number: u32) -> Self {
        Self { number }
    }

    pub fn as_str(&self) -> String {
        format!("E{:04}", self.number)
    }

    // Lexical: E0001-E0005
    pub const UNEXPECTED_CHAR: Self = Self::new(1);
    pub const UNTERMINATED_STRING: Self = Self::new(2);
    pub const UNTERMINATED_CHAR: Self = Self::new(3);
    pub const EMPTY_CHAR_LITERAL: Self = Self::new(4);
    pub const UNKNOWN_ESCAPE_SEQUENCE: Self = Self::new(5);

    // Syntactic: E0101-E0102
    pub const EXPECTED_TOKEN: Self = Self::new(101);
    pub const EXPECTED_EXPR: Self = Self::new(102);

    // Semantic: E0103-E0125
    pub const VAR_NEEDS_TYPE: Self = Self::new(103);
    pub const REDECLARED_VARIABLE: Self = Self::new(104);
    pub const UNDEFINED_VARIABLE: Self = Self::new(105);
    pub const ASSIGN_TO_CONST: Self = Self::new(106);
    pub const CONST_NEEDS_INIT: Self = Self::new(107);
    pub const TYPE_MISMATCH: Self = Self::new(108);
    pub const COMPARE_TYPE_MISMATCH: Self = Self::new(109);
    pub const RELOP_TYPE_INVALID: Self = Self::new(110);
    pub const LOGIC_NEEDS_BOOL: Self = Self::new(111);
    pub const NOT_CONDITION_BOOL: Self = Self::new(112);
    pub const NON_BOOL_CONDITION: Self = Self::new(113);
    pub const STRINGS_ONLY_ADD: Self = Self::new(114);
    pub const INVALID_TYPE: Self = Self::new(115);
    pub const UNKNOWN_FUNCTION: Self = Self::new(116);
    pub const ARITY_MISMATCH: Self = Self::new(117);
    pub const UNSUPPORTED_PRINT_TYPE: Self = Self::new(118);
    pub const UNKNOWN_METHOD: Self = Self::new(119);
    pub const UNSUPPORTED_CONVERSION: Self = Self::new(120);

    // Internal: E1001
    pub const INTERNAL: Self = Self::new(1001);
}

impl std::fmt::Debug for DiagnosticCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::fmt::Display for DiagnosticCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn formats_with_four_digit_padding() {
        assert_eq!(DiagnosticCode::UNEXPECTED_CHAR.as_str(), "E0001");
        assert_eq!(DiagnosticCode::EXPECTED_TOKEN.as_str(), "E0101");
        assert_eq!(DiagnosticCode::INTERNAL.as_str(), "E1001");
    }
}
