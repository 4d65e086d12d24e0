//! coal-drv - the Coal compiler driver, bundled into the `coal` binary.
//!
//! Orchestrates the four phase crates in sequence (lex, parse, analyze,
//! emit), then hands the generated LLVM IR to a system `clang` to link a
//! native binary. Each phase shares one [`coal_util::Handler`]; the driver
//! stops at the first phase that leaves diagnostics behind and never calls
//! into the next one.

mod config;
mod dump;
mod session;

pub use config::{Action, Config};
pub use session::Session;

use std::process::{Command, ExitCode};

use coal_util::{DiagnosticBuilder, DiagnosticCode, Span};

/// What happened after driving the pipeline as far as it would go.
enum Outcome {
    /// A diagnostic was emitted; the caller exits with code `2`.
    Diagnosed,
    /// An `--emit-*` flag asked for an intermediate form, already printed.
    Printed,
    /// The pipeline ran to completion and invoked the linker; carries its
    /// exit status.
    Linked(i32),
}

/// Parses `args`, drives the pipeline, and returns the process exit code.
pub fn run(args: &[String]) -> ExitCode {
    match config::parse_args(args) {
        Ok(Action::Help) => {
            print!("{}", config::USAGE);
            ExitCode::SUCCESS
        }
        Ok(Action::Run(cfg)) => run_config(cfg),
        Err(message) => {
            eprintln!("error: {message}");
            eprint!("{}", config::USAGE);
            ExitCode::from(1)
        }
    }
}

fn run_config(config: Config) -> ExitCode {
    init_tracing();

    let mut session = match Session::load(config) {
        Ok(session) => session,
        Err(err) => {
            eprintln!("error: {err:#}");
            return ExitCode::from(1);
        }
    };

    match drive(&mut session) {
        Ok(Outcome::Diagnosed) => {
            eprint!("{}", session.render_diagnostics());
            ExitCode::from(2)
        }
        Ok(Outcome::Printed) => ExitCode::SUCCESS,
        Ok(Outcome::Linked(code)) => exit_code_from(code),
        Err(err) => {
            eprintln!("error: {err:#}");
            ExitCode::from(1)
        }
    }
}

fn exit_code_from(code: i32) -> ExitCode {
    ExitCode::from(code.clamp(0, 255) as u8)
}

fn drive(session: &mut Session) -> anyhow::Result<Outcome> {
    let source = session.source_text().to_string();
    let file = session.file;

    if session.config.emit_tokens || session.config.emit_json_tokens {
        let tokens = {
            let _span = tracing::debug_span!("lex").entered();
            lex_all(&source, file, &session.handler)
        };
        if session.handler.has_errors() {
            return Ok(Outcome::Diagnosed);
        }
        let text = if session.config.emit_tokens {
            dump::tokens_text(&tokens, &source)
        } else {
            dump::tokens_json(&tokens, &source)
        };
        print!("{text}");
        return Ok(Outcome::Printed);
    }

    let program = {
        let _span = tracing::debug_span!("parse").entered();
        coal_par::parse(&source, file, &session.handler)
    };
    if session.handler.has_errors() {
        return Ok(Outcome::Diagnosed);
    }

    if session.config.emit_ast {
        print!("{}", dump::ast_json(&program));
        return Ok(Outcome::Printed);
    }

    let table = {
        let _span = tracing::debug_span!("analyze").entered();
        coal_sem::analyze(&program, &session.handler)
    };
    if session.handler.has_errors() {
        return Ok(Outcome::Diagnosed);
    }

    let emitted = {
        let _span = tracing::debug_span!("emit").entered();
        coal_gen::emit(&program, &table, session.file_name(), &session.handler)
    };
    let ir = match emitted {
        Ok(ir) => ir,
        // A `Diagnostic` was already reported through `session.handler`;
        // don't wrap it in a second, internal-compiler-error one.
        Err(coal_gen::EmitError::Diagnosed) => return Ok(Outcome::Diagnosed),
        Err(err) => {
            DiagnosticBuilder::error(format!("internal compiler error: {err}"))
                .code(DiagnosticCode::INTERNAL)
                .span(Span::DUMMY)
                .emit(&session.handler);
            return Ok(Outcome::Diagnosed);
        }
    };

    if session.config.emit_ir {
        print!("{ir}");
        return Ok(Outcome::Printed);
    }

    link(session, &ir)
}

fn lex_all(source: &str, file: coal_util::FileId, handler: &coal_util::Handler) -> Vec<coal_lex::Token> {
    let mut lexer = coal_lex::Lexer::new(source, file, handler);
    let mut tokens = Vec::new();
    loop {
        let tok = lexer.next_token();
        let eof = tok.is_eof();
        tokens.push(tok);
        if eof {
            break;
        }
    }
    tokens
}

fn link(session: &Session, ir: &str) -> anyhow::Result<Outcome> {
    use anyhow::Context;

    let ll_path = session.config.ll_path();
    std::fs::write(&ll_path, ir)
        .with_context(|| format!("failed to write `{}`", ll_path.display()))?;

    let output_path = session.config.output_path();
    let _span = tracing::debug_span!("link", cc = %session.config.cc).entered();
    let status = Command::new(&session.config.cc)
        .arg(&ll_path)
        .arg("-o")
        .arg(&output_path)
        .status()
        .with_context(|| format!("failed to invoke `{}`", session.config.cc))?;

    if !session.config.keep_ll {
        let _ = std::fs::remove_file(&ll_path);
    }

    Ok(Outcome::Linked(status.code().unwrap_or(1)))
}

fn init_tracing() {
    use tracing_subscriber::EnvFilter;
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    let _ = tracing_subscriber::fmt().with_env_filter(filter).try_init();
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn args(v: &[&str]) -> Vec<String> {
        v.iter().map(|s| s.to_string()).collect()
    }

    // `ExitCode` doesn't expose its wrapped value, so these exercise `run`
    // only for the branches that don't need to inspect which code came
    // back; the rest test `drive` and its `Outcome` directly.
    #[test]
    fn help_runs_without_panicking() {
        let _ = run(&args(&["--help"]));
    }

    #[test]
    fn missing_input_runs_without_panicking() {
        let _ = run(&args(&[]));
    }

    fn write_source(source: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::Builder::new().suffix(".coal").tempfile().unwrap();
        write!(file, "{source}").unwrap();
        file
    }

    fn config_for(path: std::path::PathBuf, emit_ir: bool) -> Config {
        Config {
            input: path,
            output: None,
            cc: "clang".to_string(),
            emit_tokens: false,
            emit_json_tokens: false,
            emit_ast: false,
            emit_ir,
            keep_ll: false,
        }
    }

    #[test]
    fn drive_emits_ir_without_invoking_the_linker() {
        let file = write_source("fn main() { println(1) }");
        let mut session = Session::load(config_for(file.path().to_path_buf(), true)).unwrap();
        let outcome = drive(&mut session).unwrap();
        assert!(matches!(outcome, Outcome::Printed));
    }

    #[test]
    fn drive_reports_a_type_error_as_diagnosed() {
        let file = write_source("fn main() { var x: int = \"oops\" }");
        let mut session = Session::load(config_for(file.path().to_path_buf(), true)).unwrap();
        let outcome = drive(&mut session).unwrap();
        assert!(matches!(outcome, Outcome::Diagnosed));
        assert!(session.handler.has_errors());
    }

    #[test]
    fn drive_reports_a_parse_error_as_diagnosed() {
        let file = write_source("fn main( { }");
        let mut session = Session::load(config_for(file.path().to_path_buf(), true)).unwrap();
        let outcome = drive(&mut session).unwrap();
        assert!(matches!(outcome, Outcome::Diagnosed));
    }
}
