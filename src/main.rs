use std::io;

use calculon::format::{format_number, format_operand};
use calculon::{CalcError, Lexer};
use clap::Parser;
use clap::Subcommand;
use miette::IntoDiagnostic;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(version, about = "Evaluate arithmetic expressions")]
struct Args {
    /// Log more; repeat for more detail (overridden by RUST_LOG)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Print the value of an expression
    Eval { expr: Vec<String> },
    /// Print the tokens of an expression
    Tokenize { expr: Vec<String> },
    /// Print an expression in postfix order
    Postfix { expr: Vec<String> },
    /// Evaluate lines from stdin, remembering the last answer as `ans`
    Repl,
}

fn main() -> miette::Result<()> {
    let args = Args::parse();
    init_logging(args.verbose);

    match args.command {
        Commands::Eval { expr } => {
            let input = expr.join(" ");
            match calculon::evaluate(&input) {
                Ok(value) => println!("{}", format_number(value)),
                Err(e) => fail(e, input),
            }
        }
        Commands::Tokenize { expr } => {
            let input = expr.join(" ");
            for token in Lexer::new(&input) {
                match token {
                    Ok(token) => println!("{token}"),
                    Err(e) => fail(e, input.clone()),
                }
            }
        }
        Commands::Postfix { expr } => {
            let input = expr.join(" ");
            match calculon::Parser::parse_str(&input) {
                Ok(rpn) => println!("{rpn}"),
                Err(e) => fail(e, input),
            }
        }
        Commands::Repl => repl()?,
    }
    Ok(())
}

fn repl() -> miette::Result<()> {
    use rustyline::error::ReadlineError;
    let mut rl = rustyline::DefaultEditor::new().into_diagnostic()?;
    let mut ans: Option<f64> = None;

    loop {
        let line = match rl.readline(">> ") {
            Err(ReadlineError::Interrupted) | Err(ReadlineError::Eof) => return Ok(()),
            Err(e) => return Err(e).into_diagnostic(),
            Ok(line) => line,
        };
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        let _ = rl.add_history_entry(line);

        let input = expand_ans(line, ans);
        match calculon::evaluate(&input) {
            Ok(value) => {
                println!("{}", format_number(value));
                ans = Some(value);
            }
            Err(e) => {
                eprintln!("Error: {}", e.kind());
                tracing::info!("{:?}", miette::Report::new(e).with_source_code(input));
            }
        }
    }
}

/// Replaces every `ans` in `line` with the exact last answer.
fn expand_ans(line: &str, ans: Option<f64>) -> String {
    match ans {
        Some(value) => line.replace("ans", &format_operand(value)),
        None => line.to_string(),
    }
}

fn fail(e: CalcError, input: String) -> ! {
    eprintln!("[col {}] Error: {}", e.span().offset() + 1, e.kind());
    eprintln!("{:?}", miette::Report::new(e).with_source_code(input));
    std::process::exit(65);
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}
