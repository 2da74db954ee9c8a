//! # Lazyc
//!
//! This binary is the compiler driver for Lazylang. It sequences the four
//! pipeline stages over a single source file, reports the first diagnostic
//! of a failing stage on standard error and exits with status 1.

mod cli;

use std::{fs, process::exit};

use anyhow::Context;

use lazylang::analyzer::Analyzer;
use lazylang::codegen::Codegen;
use lazylang::lexer::{Lexer, Span};
use lazylang::parser::Parser;

use cli::Cli;

fn main() -> anyhow::Result<()> {
    let args = Cli::init();

    simple_logger::init_with_level((&args.verbosity).into()).unwrap();

    let source = fs::read_to_string(&args.file)
        .with_context(|| format!("could not read file '{}'", args.file.display()))?;

    let tokens = match Lexer::new(&source).lex() {
        Ok(tokens) => tokens,
        Err(err) => fail(&source, &err.to_string(), Some(err.position())),
    };

    let program = match Parser::new(tokens).parse_program() {
        Ok(program) => program,
        Err(err) => {
            let position = err.position;
            fail(&source, &err.to_string(), position)
        }
    };

    println!(
        "Parsed {} import(s) and {} declaration(s)",
        program.imports.len(),
        program.declarations.len()
    );

    if let Err(err) = Analyzer::new(&program).analyze() {
        fail(&source, &err.to_string(), Some(err.span()));
    }

    println!("Semantic analysis completed successfully");

    if let Err(err) =
        Codegen::new(&program).compile_program(&args.c_output, &args.binary_output)
    {
        let position = err.position;
        fail(&source, &err.to_string(), position);
    }

    println!(
        "Code generation completed: {} -> {}",
        args.c_output.display(),
        args.binary_output.display()
    );

    Ok(())
}

/// Print the canonical one-line diagnostic, annotate the offending source
/// line when we have a location, and abort with status 1.
fn fail(source: &str, message: &str, position: Option<Span>) -> ! {
    eprintln!("{message}");

    if let Some(position) = position {
        let annotation = position.annotate(source);
        if !annotation.is_empty() {
            eprintln!("{annotation}");
        }
    }

    exit(1);
}
