mod analysis;
mod ast;
mod builtins;
mod env;
mod error;
mod eval;
mod lexer;
mod parser;
mod token;
mod value;

use clap::{CommandFactory, Parser};
use env::Environment;
use error::Diagnostics;
use log::debug;
use std::path::PathBuf;
use std::process::ExitCode;

/// Interpreter for a small C-family scripting language
#[derive(Parser, Debug)]
#[command(name = "ascript")]
#[command(version)]
#[command(about = "A tree-walking interpreter for a small C-family scripting language")]
struct CliArgs {
    /// Script file to execute
    #[arg(value_name = "FILE")]
    script: Option<PathBuf>,

    /// Enable debug logging of the pipeline stages
    #[arg(long, short)]
    verbose: bool,
}

fn main() -> ExitCode {
    let args = CliArgs::parse();

    let level = if args.verbose {
        log::Level::Debug
    } else {
        log::Level::Warn
    };
    let _ = simple_logger::init_with_level(level);

    let Some(script) = args.script else {
        // Bare invocation prints usage and succeeds
        println!("{}", CliArgs::command().render_usage());
        return ExitCode::SUCCESS;
    };

    // Source files are 8-bit byte sequences; the pipeline keeps them raw
    let source = match std::fs::read(&script) {
        Ok(bytes) => bytes,
        Err(err) => {
            eprintln!("Error : Could not read {} ({})", script.display(), err);
            return ExitCode::FAILURE;
        }
    };

    run(&source)
}

fn run(source: &[u8]) -> ExitCode {
    let mut diags = Diagnostics::new();

    let tokens = lexer::scan(source, &mut diags);
    debug!("lexed {} tokens", tokens.len());

    let statements = parser::Parser::new(tokens, &mut diags).parse();
    debug!("parsed {} top-level statements", statements.len());

    analysis::analyze(&statements, &mut diags);

    for warning in diags.warnings() {
        eprintln!("{}", warning);
    }
    if diags.has_errors() {
        for error in diags.errors() {
            eprintln!("{}", error);
        }
        return ExitCode::FAILURE;
    }

    let env = Environment::new();
    builtins::register_builtins(env.clone());

    match eval::eval_program(&statements, &env) {
        Ok(_) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("{}", err);
            ExitCode::FAILURE
        }
    }
}
