//! Hand-parsed command-line configuration. No `clap` — the driver hand-rolls
//! its own flag loop instead.

use std::path::PathBuf;

/// What the CLI asked the driver to do.
pub enum Action {
    /// `--help` / `-h` was given; print usage and exit `0`.
    Help,
    Run(Config),
}

/// Every CLI flag, parsed once and threaded immutably through a run.
#[derive(Debug, Clone)]
pub struct Config {
    pub input: PathBuf,
    pub output: Option<PathBuf>,
    pub cc: String,
    pub emit_tokens: bool,
    pub emit_json_tokens: bool,
    pub emit_ast: bool,
    pub emit_ir: bool,
    pub keep_ll: bool,
}

pub const USAGE: &str = "\
Usage: coal --input FILE [options]

Options:
  --input FILE, -i FILE     source file to compile (required)
  --output FILE, -o FILE    path of the final binary (default: input's base name)
  --cc NAME                 C compiler driver to link with (default: clang)
  --emit-tokens             print the token stream and exit
  --emit-json-tokens        print the token stream as JSON and exit
  --emit-ast                print the parsed AST as JSON and exit
  --emit-ir                 print the generated LLVM IR and exit
  --keep-ll                 keep the intermediate .ll file next to the output
  --help, -h                print this message
";

/// Parses `argv` (without the program name) into an [`Action`].
///
/// Returns `Err(message)` on any usage error — an unrecognized flag, a flag
/// missing its value, or no input file given.
pub fn parse_args(args: &[String]) -> Result<Action, String> {
    let mut input = None;
    let mut output = None;
    let mut cc = "clang".to_string();
    let mut emit_tokens = false;
    let mut emit_json_tokens = false;
    let mut emit_ast = false;
    let mut emit_ir = false;
    let mut keep_ll = false;

    let mut iter = args.iter();
    while let Some(arg) = iter.next() {
        match arg.as_str() {
            "--help" | "-h" => return Ok(Action::Help),
            "--input" | "-i" => input = Some(PathBuf::from(next_value(&mut iter, arg)?)),
            "--output" | "-o" => output = Some(PathBuf::from(next_value(&mut iter, arg)?)),
            "--cc" => cc = next_value(&mut iter, arg)?,
            "--emit-tokens" => emit_tokens = true,
            "--emit-json-tokens" => emit_json_tokens = true,
            "--emit-ast" => emit_ast = true,
            "--emit-ir" => emit_ir = true,
            "--keep-ll" => keep_ll = true,
            other if !other.starts_with('-') && input.is_none() => input = Some(PathBuf::from(other)),
            other => return Err(format!("unrecognized argument `{other}`")),
        }
    }

    let input = input.ok_or_else(|| "missing input file (pass --input FILE or a bare path)".to_string())?;

    Ok(Action::Run(Config {
        input,
        output,
        cc,
        emit_tokens,
        emit_json_tokens,
        emit_ast,
        emit_ir,
        keep_ll,
    }))
}

fn next_value(iter: &mut std::slice::Iter<'_, String>, flag: &str) -> Result<String, String> {
    iter.next()
        .cloned()
        .ok_or_else(|| format!("missing value for `{flag}`"))
}

impl Config {
    /// The final binary path: the explicit `--output`, or the input's file
    /// stem in the current directory, with `.exe` appended on Windows.
    pub fn output_path(&self) -> PathBuf {
        if let Some(output) = &self.output {
            return output.clone();
        }
        let stem = self.input.file_stem().map(|s| s.to_owned()).unwrap_or_else(|| "a.out".into());
        let mut path = PathBuf::from(stem);
        if cfg!(windows) {
            path.set_extension("exe");
        }
        path
    }

    /// The intermediate `.ll` file path, sitting next to the output binary.
    pub fn ll_path(&self) -> PathBuf {
        let mut path = self.output_path();
        path.set_extension("ll");
        path
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(v: &[&str]) -> Vec<String> {
        v.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn parses_required_input_flag() {
        let action = parse_args(&args(&["--input", "main.coal"])).unwrap();
        match action {
            Action::Run(config) => assert_eq!(config.input, PathBuf::from("main.coal")),
            Action::Help => panic!("expected Action::Run"),
        }
    }

    #[test]
    fn accepts_a_bare_path_as_input() {
        let action = parse_args(&args(&["main.coal"])).unwrap();
        match action {
            Action::Run(config) => assert_eq!(config.input, PathBuf::from("main.coal")),
            Action::Help => panic!("expected Action::Run"),
        }
    }

    #[test]
    fn short_flags_are_accepted() {
        let action = parse_args(&args(&["-i", "main.coal", "-o", "out"])).unwrap();
        match action {
            Action::Run(config) => {
                assert_eq!(config.input, PathBuf::from("main.coal"));
                assert_eq!(config.output, Some(PathBuf::from("out")));
            }
            Action::Help => panic!("expected Action::Run"),
        }
    }

    #[test]
    fn missing_input_is_a_usage_error() {
        assert!(parse_args(&args(&["--emit-ir"])).is_err());
    }

    #[test]
    fn unrecognized_flag_is_a_usage_error() {
        assert!(parse_args(&args(&["--input", "main.coal", "--bogus"])).is_err());
    }

    #[test]
    fn help_short_circuits_before_requiring_input() {
        assert!(matches!(parse_args(&args(&["--help"])), Ok(Action::Help)));
    }

    #[test]
    fn output_path_defaults_to_input_stem() {
        let config = Config {
            input: PathBuf::from("programs/hello.coal"),
            output: None,
            cc: "clang".to_string(),
            emit_tokens: false,
            emit_json_tokens: false,
            emit_ast: false,
            emit_ir: false,
            keep_ll: false,
        };
        let output = config.output_path();
        assert_eq!(output.file_stem().unwrap(), "hello");
    }
}
