//! The Coal IR emitter: lowers a type-checked [`coal_par::Program`] into a
//! single textual LLVM IR module.
//!
//! Walks one function at a time, same as a builder-driven codegen pass
//! would, but assembles IR text directly rather than going through an LLVM
//! context — Coal has no need for a real LLVM dependency. See
//! [`DESIGN.md`](../DESIGN.md) for the tradeoff.

mod error;
mod expr;
mod function;
mod module;
mod stmt;
mod strings;
mod types;

pub use error::{EmitError, Result};

use coal_par::{Decl, Program};
use coal_sem::TypeTable;
use coal_util::Handler;

use function::FunctionEmitter;
use module::ModuleEmitter;

/// Lowers every function in `program` into one self-contained LLVM IR
/// module, using `source_name` for the module's `source_filename`.
///
/// `table` must be the [`TypeTable`] produced by analyzing the same
/// `program` — this function trusts it completely and never re-derives a
/// type the analyzer already resolved. `handler` is the same one lexing,
/// parsing, and analysis already reported into — a handful of conversions
/// (an unparseable `.toInt()`/`.toFloat()` literal) are only caught this
/// late, and are reported through it rather than as an [`EmitError`].
pub fn emit(program: &Program, table: &TypeTable, source_name: &str, handler: &Handler) -> Result<String> {
    let mut module = ModuleEmitter::new(source_name);
    for decl in &program.decls {
        let Decl::FnDecl(f) = decl;
        let function = FunctionEmitter::new(&mut module, f.name, table, handler);
        let text = function.lower(f)?;
        module.push_function(text);
    }
    Ok(module.finish())
}
