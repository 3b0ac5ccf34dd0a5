use std::{fs, process::ExitCode};

use clap::Parser;
use foolang::{
    ast::Statement,
    error::Error,
    interpreter::{
        evaluator::core::{Config, Context, DEFAULT_MAX_DEPTH},
        value::core::Value,
    },
};
use rustyline::{DefaultEditor, error::ReadlineError};
use tracing::debug;
use tracing_subscriber::EnvFilter;

const PROMPT: &str = "foo > ";
const CONTINUATION_PROMPT: &str = "... > ";

/// foolang is a small imperative scripting language with lists, loops and
/// recursive functions.
///
/// Without CONTENTS an interactive session is started.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Treat CONTENTS as source code instead of a path to a script.
    #[arg(short, long)]
    eval: bool,

    /// Pipe mode is a feature that automatically prints out the last value
    /// of a foolang script.
    #[arg(short, long)]
    pipe_mode: bool,

    /// Maximum number of nested function calls.
    #[arg(long, default_value_t = DEFAULT_MAX_DEPTH)]
    max_depth: usize,

    /// Raise log verbosity; repeat for more detail. `FOO_LOG` takes
    /// precedence.
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Path to a script, or source code with `--eval`.
    contents: Option<String>,
}

fn main() -> ExitCode {
    let args = Args::parse();
    install_tracing(args.verbose);

    let config = Config { max_depth: args.max_depth };

    let Some(contents) = args.contents else {
        return run_repl(config);
    };

    let script = if args.eval {
        contents
    } else {
        match fs::read_to_string(&contents) {
            Ok(script) => script,
            Err(e) => {
                eprintln!("Failed to read the input file '{contents}': {e}");
                return ExitCode::FAILURE;
            },
        }
    };

    run_script(&script, config, args.pipe_mode)
}

/// Logs go to stderr so printed values on stdout stay clean.
fn install_tracing(verbose: u8) {
    let fallback = match verbose {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_env("FOO_LOG").unwrap_or_else(|_| EnvFilter::new(fallback));

    let _ = tracing_subscriber::fmt().with_env_filter(filter)
                                     .with_writer(std::io::stderr)
                                     .try_init();
}

fn run_script(script: &str, config: Config, pipe_mode: bool) -> ExitCode {
    let mut context = Context::new().with_config(config);

    match context.run(script) {
        Ok(results) => {
            if pipe_mode && let Some(value) = results.into_iter().flatten().last() {
                println!("{value}");
            }
            ExitCode::SUCCESS
        },
        Err(e) => {
            eprintln!("{}", e.render(script));
            ExitCode::FAILURE
        },
    }
}

fn run_repl(config: Config) -> ExitCode {
    let mut editor = match DefaultEditor::new() {
        Ok(editor) => editor,
        Err(e) => {
            eprintln!("Failed to start the interactive session: {e}");
            return ExitCode::FAILURE;
        },
    };
    let mut context = Context::new().with_config(config);

    loop {
        let input = match read_input(&mut editor) {
            Ok(input) => input,
            Err(ReadlineError::Interrupted | ReadlineError::Eof) => break,
            Err(e) => {
                eprintln!("Error: {e}");
                return ExitCode::FAILURE;
            },
        };

        if input.trim().is_empty() {
            continue;
        }
        let _ = editor.add_history_entry(input.as_str());

        match run_input(&mut context, &input) {
            Ok(Some(value)) => println!("{value}"),
            Ok(None) => {},
            Err(e) => eprintln!("{}", e.render(&input)),
        }
    }

    ExitCode::SUCCESS
}

/// Reads one complete input.
///
/// Every line is completed with `;` unless it already ends in `;` or opens a
/// block with `{`. An opened block keeps reading continuation lines until all
/// braces are closed and the last line ends in `};`.
fn read_input(editor: &mut DefaultEditor) -> Result<String, ReadlineError> {
    let first = editor.readline(PROMPT)?;
    let mut input = terminate(first.trim_end());

    if !input.ends_with('{') {
        return Ok(input);
    }

    loop {
        let next = editor.readline(CONTINUATION_PROMPT)?;
        if append_line(&mut input, &next) {
            return Ok(input);
        }
    }
}

/// Adds a continuation line to a pending block and reports whether the block
/// is now complete.
fn append_line(input: &mut String, line: &str) -> bool {
    let line = terminate(line.trim_end());
    input.push('\n');
    input.push_str(&line);

    line.ends_with("};") && open_braces(input) <= 0
}

fn terminate(line: &str) -> String {
    if line.is_empty() || line.ends_with(';') || line.ends_with('{') {
        line.to_string()
    } else {
        format!("{line};")
    }
}

/// Counts `{` minus `}` outside of string literals.
fn open_braces(text: &str) -> isize {
    let mut depth = 0;
    let mut in_string = false;
    let mut escaped = false;

    for c in text.chars() {
        if in_string {
            match c {
                _ if escaped => escaped = false,
                '\\' => escaped = true,
                '"' => in_string = false,
                _ => {},
            }
            continue;
        }

        match c {
            '"' => in_string = true,
            '{' => depth += 1,
            '}' => depth -= 1,
            _ => {},
        }
    }

    depth
}

/// Runs one REPL input and returns the value to echo: that of a trailing
/// expression statement. `print` has already written its own value.
fn run_input(context: &mut Context, input: &str) -> Result<Option<Value>, Error> {
    let program = foolang::parse(input)?;
    let results = context.run_program(&program)?;
    debug!(statements = results.len(), "evaluated input");

    match (program.statements.last(), results.last()) {
        (Some(Statement::Expression { .. }), Some(Some(value))) => Ok(Some(value.clone())),
        _ => Ok(None),
    }
}
