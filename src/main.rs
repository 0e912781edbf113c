//! MiniLang CLI
//!
//! Command-line interface for the MiniLang compiler front end.

use std::fs;
use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use minilang::{compile, Diagnostic, Lexer, Report, VERSION};

/// Check a MiniLang source file and report its diagnostics
#[derive(Debug, Parser)]
#[command(name = "minilang", version = VERSION)]
struct Cli {
    /// MiniLang source file
    #[arg(value_name = "FILE")]
    path: PathBuf,

    /// Print the token stream and stop
    #[arg(short, long)]
    tokens: bool,

    /// Print the AST of a valid program
    #[arg(long)]
    ast: bool,

    /// Disable colored output
    #[arg(long)]
    no_color: bool,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(std::io::stderr)
        .init();

    if cli.no_color {
        colored::control::set_override(false);
    }

    let filename = cli.path.display().to_string();
    let source = match fs::read_to_string(&cli.path) {
        Ok(source) => source,
        Err(e) => {
            eprintln!("Failed to read file '{}': {}", filename, e);
            return ExitCode::FAILURE;
        }
    };

    let report = Report::with_source(Some(&filename), &source);

    if cli.tokens {
        return show_tokens(&source, &report);
    }

    match compile(&source) {
        Ok(program) => {
            tracing::info!(file = %filename, "compiled without diagnostics");
            if cli.ast {
                print!("{}", program);
            }
            ExitCode::SUCCESS
        }
        Err(diagnostics) => fail(&report, &diagnostics),
    }
}

/// Print every token with its position and category
fn show_tokens(source: &str, report: &Report) -> ExitCode {
    for token in Lexer::new(source) {
        match token {
            Ok(token) => println!(
                "{:>4}:{:<4} {:<16} {}",
                token.location.line,
                token.location.column,
                token.token_type.category(),
                token.describe()
            ),
            Err(diagnostic) => return fail(report, &[diagnostic]),
        }
    }
    ExitCode::SUCCESS
}

fn fail(report: &Report, diagnostics: &[Diagnostic]) -> ExitCode {
    eprint!("{}", report.render_all(diagnostics));
    ExitCode::FAILURE
}
