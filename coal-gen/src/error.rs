//! Internal failure modes of the IR emitter.
//!
//! These describe bugs in the compiler itself — a missing `TypeTable` entry,
//! an operator the analyzer should never have let through — never a problem
//! with the input program. A user-facing problem is always a [`coal_util::Diagnostic`];
//! this enum exists so emitter code can propagate `?` like every other phase
//! crate does with its own internal error type. The one exception is
//! [`EmitError::Diagnosed`]: the emitter does occasionally hit a problem with
//! the input program itself (an unparseable `.toInt()`/`.toFloat()` literal),
//! and for those it reports a proper [`coal_util::Diagnostic`] through the
//! shared [`coal_util::Handler`] and returns this variant purely to unwind —
//! the driver must not wrap it in another, internal-compiler-error diagnostic.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum EmitError {
    #[error("no resolved type for expression")]
    MissingExprType,

    #[error("no resolved type for variable `{0}` in function `{1}`")]
    MissingVarType(String, String),

    #[error("operator `{0}` is not defined for IR type `{1}`")]
    UnsupportedOperator(String, String),

    #[error("unknown function `{0}` reached code generation")]
    UnknownFunction(String),

    #[error("unknown method `{0}` reached code generation")]
    UnknownMethod(String),

    #[error("internal error: {0}")]
    Internal(String),

    /// A diagnostic describing this failure has already been emitted through
    /// the shared `Handler`; this variant only unwinds the `?` chain.
    #[error("a problem with the input program was already reported")]
    Diagnosed,
}

pub type Result<T> = std::result::Result<T, EmitError>;
