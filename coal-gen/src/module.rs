//! Module-level text assembly: header, fixed externs, the string pool, the
//! debug-mirror globals, and the concatenated function bodies, in the order
//! the language's persisted IR shape fixes.
//!
//! Runtime externs are declared once up front, and one accumulator owns
//! every function's emitted text — a plain string builder stands in for
//! the in-memory module a real LLVM context would otherwise own.

use std::collections::HashSet;

use coal_sem::NamedType;

use crate::strings::StringPool;
use crate::types::{ir_type, zero_value};

const EXTERNS: &str = "\
declare i32 @printf(ptr, ...)
declare i32 @snprintf(ptr, i64, ptr, ...)
declare ptr @malloc(i64)
declare ptr @memcpy(ptr, ptr, i64)
declare i64 @strtol(ptr, ptr, i32)
declare double @strtod(ptr, ptr)
declare double @llvm.pow.f64(double, double)
";

pub(crate) struct ModuleEmitter {
    source_name: String,
    strings: StringPool,
    debug_globals: Vec<String>,
    debug_seen: HashSet<(String, String)>,
    label_counter: u32,
    functions: Vec<String>,
}

impl ModuleEmitter {
    pub(crate) fn new(source_name: &str) -> Self {
        Self {
            source_name: source_name.to_string(),
            strings: StringPool::new(),
            debug_globals: Vec::new(),
            debug_seen: HashSet::new(),
            label_counter: 0,
            functions: Vec::new(),
        }
    }

    pub(crate) fn intern_string(&mut self, value: &str) -> usize {
        self.strings.intern(value)
    }

    pub(crate) fn string_byte_len(&self, idx: usize) -> usize {
        self.strings.byte_len(idx)
    }

    pub(crate) fn fresh_label_id(&mut self) -> u32 {
        let id = self.label_counter;
        self.label_counter += 1;
        id
    }

    /// Registers `__dbg_<fn>_<var>`, the per-(fn,var) debug-mirror global,
    /// returning its name. Safe to call more than once for the same pair —
    /// the global's definition is only appended the first time.
    pub(crate) fn debug_mirror(&mut self, fn_name: &str, var_name: &str, ty: NamedType) -> String {
        let global_name = format!("@__dbg_{fn_name}_{var_name}");
        let key = (fn_name.to_string(), var_name.to_string());
        if self.debug_seen.insert(key) {
            self.debug_globals.push(format!(
                "{global_name} = global {} {}\n",
                ir_type(ty),
                zero_value(ty)
            ));
        }
        global_name
    }

    pub(crate) fn push_function(&mut self, text: String) {
        self.functions.push(text);
    }

    pub(crate) fn finish(self) -> String {
        let mut out = String::new();
        out.push_str(&format!("; ModuleID = '{}'\n", self.source_name));
        out.push_str(&format!("source_filename = \"{}\"\n\n", self.source_name));
        out.push_str(EXTERNS);
        out.push('\n');
        out.push_str(&self.strings.render_globals());
        if !self.debug_globals.is_empty() {
            out.push('\n');
            for global in &self.debug_globals {
                out.push_str(global);
            }
        }
        out.push('\n');
        for function in &self.functions {
            out.push_str(function);
            out.push('\n');
        }
        out
    }
}
