//! A compilation session: the configuration for one run, the one source
//! file it loaded, and the diagnostic sink every phase reports into.

use std::fs;

use anyhow::{Context, Result};
use coal_util::{FileId, Handler, SourceMap};

use crate::config::Config;

pub struct Session {
    pub config: Config,
    pub handler: Handler,
    sources: SourceMap,
    pub file: FileId,
}

impl Session {
    /// Reads `config.input` into a fresh [`SourceMap`] and registers it.
    pub fn load(config: Config) -> Result<Self> {
        let content = fs::read_to_string(&config.input)
            .with_context(|| format!("failed to read `{}`", config.input.display()))?;
        let mut sources = SourceMap::new();
        let file = sources.add_file(config.input.display().to_string(), content);
        Ok(Self {
            config,
            handler: Handler::new(),
            sources,
            file,
        })
    }

    pub fn source_text(&self) -> &str {
        self.sources
            .get(self.file)
            .expect("session always registers its own input file")
            .content()
    }

    pub fn file_name(&self) -> &str {
        self.sources
            .get(self.file)
            .expect("session always registers its own input file")
            .name()
    }

    /// Renders every diagnostic collected so far, source line and caret
    /// included, ready to write straight to stderr.
    pub fn render_diagnostics(&self) -> String {
        let file_name = self.file_name().to_string();
        let source_file = self.sources.get(self.file);
        let mut out = String::new();
        for diag in self.handler.diagnostics() {
            let line = source_file.and_then(|f| f.line_text(diag.span.line));
            out.push_str(&diag.render(&file_name, line));
        }
        out
    }
}
