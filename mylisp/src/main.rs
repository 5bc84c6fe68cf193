//! MyLisp CLI

use clap::{Parser, Subcommand};
use mylisp::config::Config;
use mylisp::error::report_error;
use mylisp::interp::Interpreter;
use mylisp::repl::Repl;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

type CliResult = Result<ExitCode, Box<dyn std::error::Error>>;

#[derive(Parser)]
#[command(name = "mylisp", version, about = "MyLisp - a small Lisp interpreter")]
struct Cli {
    /// Configuration file (TOML)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Start the interactive REPL (default)
    Repl {
        /// Print the parse tree before each result
        #[arg(long)]
        ast: bool,
        /// Do not read or write the history file
        #[arg(long)]
        no_history: bool,
    },
    /// Evaluate a single expression line
    Eval {
        /// Source to evaluate
        expr: String,
    },
    /// Evaluate a file line by line in one environment
    Run {
        /// Source file to run
        file: PathBuf,
    },
    /// Parse and dump the parse tree as JSON (debug)
    Parse {
        /// Source file to parse
        file: PathBuf,
    },
    /// Tokenize and dump tokens (debug)
    Tokens {
        /// Source file to tokenize
        file: PathBuf,
    },
}

fn main() -> ExitCode {
    mylisp::logging::init_tracing();
    let cli = Cli::parse();

    let result = load_config(cli.config.as_deref()).and_then(|config| {
        match cli.command.unwrap_or(Command::Repl {
            ast: false,
            no_history: false,
        }) {
            Command::Repl { ast, no_history } => run_repl(config, ast, no_history),
            Command::Eval { expr } => eval_expr(&config, &expr),
            Command::Run { file } => run_file(&config, &file),
            Command::Parse { file } => parse_file(&file),
            Command::Tokens { file } => tokenize_file(&file),
        }
    });

    match result {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}

fn load_config(path: Option<&Path>) -> Result<Config, Box<dyn std::error::Error>> {
    Ok(match path {
        Some(path) => Config::load(path)?,
        None => Config::default(),
    })
}

fn run_repl(mut config: Config, ast: bool, no_history: bool) -> CliResult {
    config.show_ast |= ast;
    if no_history {
        config.history = false;
    }
    Repl::new(config)?.run()?;
    Ok(ExitCode::SUCCESS)
}

fn eval_expr(config: &Config, source: &str) -> CliResult {
    let mut interp = Interpreter::new().with_max_depth(config.max_depth);
    match interp.eval_source(source) {
        Ok(value) => {
            println!("{value}");
            Ok(ExitCode::SUCCESS)
        }
        Err(err) => {
            report_error("<expr>", source, &err);
            Ok(ExitCode::FAILURE)
        }
    }
}

/// Feed each non-empty line to one interpreter, as the REPL would
fn run_file(config: &Config, path: &Path) -> CliResult {
    let source = std::fs::read_to_string(path)?;
    let filename = path.display().to_string();
    let mut interp = Interpreter::new().with_max_depth(config.max_depth);

    for (index, line) in source.lines().enumerate() {
        if line.trim().is_empty() {
            continue;
        }
        let tree = match mylisp::parser::parse_source(&filename, line) {
            Ok(tree) => tree,
            Err(err) => {
                report_error(&format!("{filename}:{}", index + 1), line, &err);
                return Ok(ExitCode::FAILURE);
            }
        };
        if config.show_ast {
            print!("{tree}");
        }
        let value = interp.read(&tree);
        println!("{}", interp.eval(value));
    }

    Ok(ExitCode::SUCCESS)
}

fn parse_file(path: &Path) -> CliResult {
    let source = std::fs::read_to_string(path)?;
    let filename = path.display().to_string();

    match mylisp::parser::parse_source(&filename, &source) {
        Ok(tree) => {
            println!("{}", serde_json::to_string_pretty(&tree)?);
            Ok(ExitCode::SUCCESS)
        }
        Err(err) => {
            report_error(&filename, &source, &err);
            Ok(ExitCode::FAILURE)
        }
    }
}

fn tokenize_file(path: &Path) -> CliResult {
    let source = std::fs::read_to_string(path)?;
    let filename = path.display().to_string();

    match mylisp::lexer::tokenize(&source) {
        Ok(tokens) => {
            for (tok, span) in &tokens {
                println!("{:?} @ {}..{}", tok, span.start, span.end);
            }
            Ok(ExitCode::SUCCESS)
        }
        Err(err) => {
            report_error(&filename, &source, &err);
            Ok(ExitCode::FAILURE)
        }
    }
}
