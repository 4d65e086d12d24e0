//! Mapping from Coal's five built-in types to their LLVM IR representation.
//!
//! There is no generic lowering to do here, so a plain function is enough:
//! no context or lifetime plumbing the way an LLVM-context-backed type
//! mapper would need.

use coal_sem::NamedType;

/// An LLVM IR type as it appears in emitted text.
pub fn ir_type(ty: NamedType) -> &'static str {
    match ty {
        NamedType::Int => "i32",
        NamedType::Float => "double",
        NamedType::Bool => "i1",
        NamedType::Char => "i8",
        NamedType::String => "{ ptr, i32 }",
    }
}

/// The zero-initialized literal for a slot with no initializer.
pub fn zero_value(ty: NamedType) -> &'static str {
    match ty {
        NamedType::Int => "0",
        NamedType::Float => "0.0",
        NamedType::Bool => "0",
        NamedType::Char => "0",
        NamedType::String => "{ ptr null, i32 0 }",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn string_is_a_two_field_aggregate() {
        assert_eq!(ir_type(NamedType::String), "{ ptr, i32 }");
        assert_eq!(zero_value(NamedType::String), "{ ptr null, i32 0 }");
    }

    #[test]
    fn numeric_types_map_to_their_llvm_counterpart() {
        assert_eq!(ir_type(NamedType::Int), "i32");
        assert_eq!(ir_type(NamedType::Float), "double");
        assert_eq!(ir_type(NamedType::Bool), "i1");
        assert_eq!(ir_type(NamedType::Char), "i8");
    }
}
