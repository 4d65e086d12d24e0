//! Compiler diagnostics: errors and warnings surfaced to the user.
//!
//! This is deliberately a different error channel than [`crate::UtilError`]
//! and the `thiserror` enums each phase crate defines for itself: those are
//! internal, programmer-facing failures (bad indices, missing files).
//! [`Diagnostic`] is the user-facing report of something wrong with the
//! *input program*, with enough structure (code, span, notes) to render a
//! rustc-style message.

mod builder;
mod codes;

pub use builder::DiagnosticBuilder;
pub use codes::DiagnosticCode;

use std::cell::RefCell;
use std::fmt;

use crate::Span;

/// Diagnostic severity.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Level {
    Error,
    Warning,
    Note,
    Help,
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Level::Error => "error",
            Level::Warning => "warning",
            Level::Note => "note",
            Level::Help => "help",
        };
        f.write_str(s)
    }
}

/// A single reported problem: a level, a message, the span it's anchored to,
/// and any supporting notes/helps attached by the phase that raised it.
#[derive(Clone, Debug)]
pub struct Diagnostic {
    pub level: Level,
    pub message: String,
    pub span: Span,
    pub code: Option<DiagnosticCode>,
    pub notes: Vec<String>,
    pub helps: Vec<String>,
}

impl Diagnostic {
    pub fn new(level: Level, message: impl Into<String>, span: Span) -> Self {
        Self {
            level,
            message: message.into(),
            span,
            code: None,
            notes: Vec::new(),
            helps: Vec::new(),
        }
    }

    pub fn error(message: impl Into<String>, span: Span) -> Self {
        Self::new(Level::Error, message, span)
    }

    pub fn warning(message: impl Into<String>, span: Span) -> Self {
        Self::new(Level::Warning, message, span)
    }

    pub fn with_code(mut self, code: DiagnosticCode) -> Self {
        self.code = Some(code);
        self
    }

    pub fn with_note(mut self, note: impl Into<String>) -> Self {
        self.notes.push(note.into());
        self
    }

    pub fn with_help(mut self, help: impl Into<String>) -> Self {
        self.helps.push(help.into());
        self
    }

    /// Renders as `file:line:col: level[code]: message`, followed by the
    /// offending source line and a caret under the span's start column, if
    /// the source map has the referenced file.
    pub fn render(&self, file_name: &str, source_line: Option<&str>) -> String {
        let mut out = String::new();
        let code = self
            .code
            .map(|c| format!("[{}] ", c.as_str()))
            .unwrap_or_default();
        out.push_str(&format!(
            "{}:{}:{}: {}{}: {}\n",
            file_name, self.span.line, self.span.column, code, self.level, self.message
        ));
        if let Some(line) = source_line {
            out.push_str(line);
            out.push('\n');
            let col = self.span.column.saturating_sub(1) as usize;
            out.push_str(&" ".repeat(col));
            out.push('^');
            out.push('\n');
        }
        for note in &self.notes {
            out.push_str(&format!("  note: {}\n", note));
        }
        for help in &self.helps {
            out.push_str(&format!("  help: {}\n", help));
        }
        out
    }
}

/// Accumulates diagnostics raised across a compilation run.
///
/// Every phase of the pipeline takes a `&Handler` and emits into it rather
/// than returning errors eagerly; the driver checks [`Handler::has_errors`]
/// after each phase and stops before running the next one.
#[derive(Default)]
pub struct Handler {
    diagnostics: RefCell<Vec<Diagnostic>>,
}

impl Handler {
    pub fn new() -> Self {
        Self {
            diagnostics: RefCell::new(Vec::new()),
        }
    }

    pub fn emit(&self, diagnostic: Diagnostic) {
        self.diagnostics.borrow_mut().push(diagnostic);
    }

    pub fn build_error(&self, span: Span, message: impl Into<String>) -> DiagnosticBuilder {
        DiagnosticBuilder::error(message).span(span)
    }

    pub fn build_warning(&self, span: Span, message: impl Into<String>) -> DiagnosticBuilder {
        DiagnosticBuilder::warning(message).span(span)
    }

    pub fn has_errors(&self) -> bool {
        self.diagnostics
            .borrow()
            .iter()
            .any(|d| d.level == Level::Error)
    }

    pub fn error_count(&self) -> usize {
        self.diagnostics
            .borrow()
            .iter()
            .filter(|d| d.level == Level::Error)
            .count()
    }

    pub fn diagnostics(&self) -> Vec<Diagnostic> {
        self.diagnostics.borrow().clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn level_displays_lowercase() {
        assert_eq!(Level::Error.to_string(), "error");
        assert_eq!(Level::Warning.to_string(), "warning");
    }

    #[test]
    fn handler_tracks_error_count_separately_from_warnings() {
        let handler = Handler::new();
        handler.emit(Diagnostic::error("bad thing", Span::DUMMY));
        handler.emit(Diagnostic::warning("unused x", Span::DUMMY));
        assert!(handler.has_errors());
        assert_eq!(handler.error_count(), 1);
        assert_eq!(handler.diagnostics().len(), 2);
    }

    #[test]
    fn render_includes_code_and_caret() {
        let diag = Diagnostic::error("undefined variable `x`", Span::new(0, 1, 3, 5))
            .with_code(DiagnosticCode::UNDEFINED_VARIABLE);
        let rendered = diag.render("t.coal", Some("  x = 1"));
        assert!(rendered.contains("t.coal:3:5"));
        assert!(rendered.contains("E0105"));
        assert!(rendered.contains('^'));
    }
}
