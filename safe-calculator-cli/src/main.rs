mod keypad;

use std::io;
use std::io::{BufRead, Write};
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Parser;
use clap_verbosity_flag::Verbosity;
use log::{debug, info};
use safe_calculator::interpreter::format::format_number;
use safe_calculator::interpreter::{
    evaluate, parse, tokens_to_string, CalculatorError, ERROR_PLACEHOLDER,
};

use crate::keypad::{parse_keys, Screen};

/// Evaluates arithmetic expressions without running arbitrary code
#[derive(Parser, Debug)]
#[clap(author, version, about, long_about = None)]
struct Arguments {
    /// The expression to evaluate. When omitted, expressions are read line by line from stdin
    expression: Option<String>,

    /// Replays calculator key presses (0-9 . + - * / %, C clear, < backspace, s sign, = equals)
    #[clap(long, conflicts_with = "expression")]
    keys: Option<String>,

    /// Also prints the parsed expression tree
    #[clap(long)]
    tree: bool,

    /// Also prints the expression with redundant parentheses removed
    #[clap(long)]
    canonical: bool,

    #[clap(flatten)]
    verbose: Verbosity,
}

fn main() -> ExitCode {
    let arguments = Arguments::parse();

    env_logger::Builder::new()
        .filter_level(arguments.verbose.log_level_filter())
        .parse_default_env()
        .init();

    match run(&arguments) {
        Ok(code) => code,
        Err(error) => {
            eprintln!("Error: {:?}", error);
            ExitCode::FAILURE
        }
    }
}

fn run(arguments: &Arguments) -> Result<ExitCode> {
    let stdout = io::stdout();
    let mut out = stdout.lock();
    let mut err = io::stderr();

    if let Some(keys) = &arguments.keys {
        return exit_code(run_keys(keys, &mut out, &mut err)?);
    }

    match &arguments.expression {
        Some(expression) => exit_code(calculate(expression, arguments, &mut out, &mut err)?),
        None => {
            let stdin = io::stdin();
            run_lines(stdin.lock(), arguments, &mut out, &mut err)?;
            Ok(ExitCode::SUCCESS)
        }
    }
}

fn exit_code(succeeded: bool) -> Result<ExitCode> {
    if succeeded {
        Ok(ExitCode::SUCCESS)
    } else {
        Ok(ExitCode::FAILURE)
    }
}

/// Evaluates every non-blank line of the input until it is exhausted.
fn run_lines(
    input: impl BufRead,
    arguments: &Arguments,
    out: &mut impl Write,
    err: &mut impl Write,
) -> Result<()> {
    info!("reading expressions line by line");
    for line in input.lines() {
        let line = line.context("Failed to read expression")?;
        if line.trim().is_empty() {
            continue;
        }
        calculate(&line, arguments, out, err)?;
    }
    Ok(())
}

/// Replays the key presses and prints the final screen.
///
/// returns: Whether the screen ended up showing a value rather than an error.
fn run_keys(keys: &str, out: &mut impl Write, err: &mut impl Write) -> Result<bool> {
    let mut screen = Screen::default();
    for key in parse_keys(keys)? {
        screen.press(key);
        debug!("{:?} -> {}", key, screen.shown());
    }

    writeln!(out, "{}", screen.shown())?;
    match screen.error() {
        Some(message) => {
            writeln!(err, "Invalid expression:\n{}", message)?;
            Ok(false)
        }
        None => Ok(true),
    }
}

/// Prints the value of the given expression, or the error placeholder when it has none.
///
/// returns: Whether the expression could be evaluated.
fn calculate(
    expression: &str,
    arguments: &Arguments,
    out: &mut impl Write,
    err: &mut impl Write,
) -> Result<bool> {
    let tree = match parse(expression) {
        Ok(tree) => tree,
        Err(error) => return report(error.into(), out, err),
    };

    if arguments.tree {
        writeln!(out, "{}", tree)?;
    }
    if arguments.canonical {
        writeln!(out, "{}", tokens_to_string(tree.to_infix())?)?;
    }

    match evaluate(&tree) {
        Ok(value) => {
            writeln!(out, "{}", format_number(value))?;
            Ok(true)
        }
        Err(error) => report(error.into(), out, err),
    }
}

fn report(error: CalculatorError, out: &mut impl Write, err: &mut impl Write) -> Result<bool> {
    debug!("evaluation failed with {:?}", error.kind());
    writeln!(out, "{}", ERROR_PLACEHOLDER)?;
    writeln!(err, "Invalid expression:\n{}", error)?;
    Ok(false)
}
