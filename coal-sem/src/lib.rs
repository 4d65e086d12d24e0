//! coal-sem - the type analyzer for Coal.
//!
//! Walks a parsed [`coal_par::Program`] function by function, checking every
//! variable declaration, assignment, condition, and expression against
//! Coal's five built-in types, and records the result in a [`TypeTable`] the
//! IR emitter reads from afterward. Like the lexer and parser, analysis
//! stops at the first error: it reports one violation through the shared
//! [`coal_util::Handler`] and leaves the caller to check
//! `handler.has_errors()` before moving on to code generation.
//!
//! Built around a rib-based scope tree, generalized to Coal's much smaller
//! type system: five built-in scalar types, no inference beyond literal and
//! initializer types, and no user-defined types or generics.

mod analyzer;
mod scope;
mod types;

pub use analyzer::analyze;
pub use types::{NamedType, TypeTable, VarInfo};
