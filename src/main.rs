// src/main.rs

// sem_steps
// Prints the natural-semantics derivation of an arithmetic or boolean expression.

use clap::{Parser as ClapParser, ValueEnum};
use env_logger::Env;
use std::io::IsTerminal;
use std::path::{Path, PathBuf};

use sem_steps::{
    export::{self, ExportOptions},
    step::{Ansi, Highlighter, Plain},
    Derivation,
};

#[derive(ClapParser, Debug)]
#[command(version, about = "Step-by-step natural semantics derivations", long_about = None)]
struct Cli {
    /// The expression to derive, e.g. "((x - y) * 3) + 2".
    #[arg(required_unless_present = "file")]
    expr: Option<String>,

    /// Read the expression from a file instead.
    #[arg(short, long, conflicts_with = "expr")]
    file: Option<PathBuf>,

    /// Variable binding, repeatable.
    #[arg(short = 'v', long = "var", value_name = "NAME=VALUE")]
    vars: Vec<String>,

    /// Also print the expression tree.
    #[arg(long)]
    tree: bool,

    /// Show the inference rule each step applies.
    #[arg(long)]
    rules: bool,

    /// Colour the focused parts of each step.
    #[arg(long, value_enum, env = "SEM_STEPS_COLOR", default_value = "auto")]
    color: ColorMode,

    /// Write the derivation to a file instead of stdout.
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Set log level
    #[arg(long, value_enum, env = "SEM_STEPS_LOG", default_value = "warn")]
    log_level: LogLevel,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum ColorMode {
    Auto,
    Always,
    Never,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl From<LogLevel> for log::LevelFilter {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Error => log::LevelFilter::Error,
            LogLevel::Warn => log::LevelFilter::Warn,
            LogLevel::Info => log::LevelFilter::Info,
            LogLevel::Debug => log::LevelFilter::Debug,
            LogLevel::Trace => log::LevelFilter::Trace,
        }
    }
}

fn main() {
    let cli = Cli::parse();

    env_logger::Builder::from_env(Env::default())
        .filter_level(cli.log_level.into())
        .init();

    if let Err(e) = run(&cli) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run(cli: &Cli) -> Result<(), String> {
    let source = match (&cli.expr, &cli.file) {
        (_, Some(path)) => read_source(path)?,
        (Some(expr), None) => expr.clone(),
        (None, None) => return Err("no expression given".to_string()),
    };

    // "x=6" -> ("x", "6"); a missing '=' leaves the value empty so validation reports it.
    let pairs: Vec<(&str, &str)> = cli
        .vars
        .iter()
        .map(|v| v.split_once('=').unwrap_or((v.as_str(), "")))
        .collect();

    let derivation = sem_steps::run(source.trim(), pairs.as_slice()).map_err(|e| e.to_string())?;
    log::info!("{} steps for {}", derivation.steps.len(), derivation.expr);

    let colored = match cli.color {
        ColorMode::Always => true,
        ColorMode::Never => false,
        ColorMode::Auto => cli.output.is_none() && std::io::stdout().is_terminal(),
    };
    let highlighter: &dyn Highlighter = if colored { &Ansi } else { &Plain };

    let text = render(&derivation, cli, highlighter);
    match &cli.output {
        Some(path) => std::fs::write(path, text)
            .map_err(|e| format!("Failed to write file '{}': {}", path.display(), e)),
        None => {
            print!("{}", text);
            Ok(())
        }
    }
}

fn read_source(path: &Path) -> Result<String, String> {
    std::fs::read_to_string(path).map_err(|e| format!("Failed to read file '{}': {}", path.display(), e))
}

fn render(derivation: &Derivation, cli: &Cli, highlighter: &dyn Highlighter) -> String {
    let mut text = String::new();
    if cli.tree {
        text.push_str(&derivation.expr.to_tree().to_string());
        text.push('\n');
    }
    text.push_str(&export::to_text(&derivation.steps, highlighter, ExportOptions { rules: cli.rules }));
    text
}
