//! A thin local CLI that exercises the command registry in place of a
//! real network transport. It reads a script of commands as JSON, runs each
//! one through a fresh `SymbolTable` + `CommandRegistry`, and prints the
//! resulting `ReplyMsg`s — one interaction per line, ending the process
//! with a non-zero exit code if any command errored.

use clap::{
    builder::{styling::{AnsiColor, Effects}, Styles},
    Parser, ValueHint,
};
use ndserver::{CommandRegistry, ReplyMsg, ServerConfig, SymbolTable};
use serde::Deserialize;
use std::fs;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::info;
use tracing_subscriber::EnvFilter;

const HELP_STR: &str = r#"
{before-help}{name} {version}
{author-with-newline}
{about-with-newline}
{usage-heading} {usage}

{all-args}{after-help}"#;

fn custom_styles() -> Styles {
    Styles::styled()
        .header(AnsiColor::BrightCyan.on_default() | Effects::BOLD)
        .literal(AnsiColor::BrightMagenta.on_default() | Effects::BOLD)
        .error(AnsiColor::BrightRed.on_default() | Effects::BOLD)
        .valid(AnsiColor::BrightGreen.on_default() | Effects::BOLD)
        .invalid(AnsiColor::BrightYellow.on_default() | Effects::BOLD | Effects::UNDERLINE)
        .placeholder(AnsiColor::BrightBlue.on_default())
        .usage(AnsiColor::BrightCyan.on_default() | Effects::BOLD | Effects::UNDERLINE)
}

/// A single line of the command script: a registered command name plus
/// its already-structured argument payload.
#[derive(Debug, Deserialize)]
struct ScriptStep {
    command: String,
    args: serde_json::Value,
}

#[derive(Parser, Debug)]
#[command(
    name = "ndserver-cli",
    version = clap::crate_version!(),
    author = clap::crate_authors!("\n"),
    about = "Run a scripted sequence of array-server commands against an in-process symbol table",
    long_about = None,
    help_template = HELP_STR,
    styles = custom_styles()
)]
struct Args {
    /// JSON file holding an array of `{ "command": ..., "args": {...} }` steps
    #[arg(value_name = "SCRIPT", value_hint = ValueHint::FilePath)]
    script: PathBuf,

    /// Optional TOML config file (log level, default max_bits, bind address)
    #[arg(short, long, value_name = "FILE", value_hint = ValueHint::FilePath)]
    config: Option<PathBuf>,
}

fn load_config(path: Option<&PathBuf>) -> ServerConfig {
    match path {
        None => ServerConfig::default(),
        Some(p) => match fs::read_to_string(p) {
            Ok(raw) => ServerConfig::from_toml_str(&raw).unwrap_or_else(|e| {
                eprintln!("Error: malformed config '{}': {e}", p.display());
                ServerConfig::default()
            }),
            Err(e) => {
                eprintln!("Error: cannot read config '{}': {e}", p.display());
                ServerConfig::default()
            }
        },
    }
}

fn init_tracing(log_level: &str) {
    let filter = EnvFilter::try_new(log_level).unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();
}

fn main() -> ExitCode {
    let args = Args::parse();
    let config = load_config(args.config.as_ref());
    init_tracing(&config.log_level);
    info!(bind_addr = %config.bind_addr, "ndserver-cli starting");

    let raw = match fs::read_to_string(&args.script) {
        Ok(raw) => raw,
        Err(e) => {
            eprintln!("Error: cannot read script '{}': {e}", args.script.display());
            return ExitCode::FAILURE;
        }
    };
    let steps: Vec<ScriptStep> = match serde_json::from_str(&raw) {
        Ok(steps) => steps,
        Err(e) => {
            eprintln!("Error: malformed script '{}': {e}", args.script.display());
            return ExitCode::FAILURE;
        }
    };

    let symtab = SymbolTable::new();
    let registry = CommandRegistry::new();
    let mut saw_error = false;

    for step in &steps {
        let reply: ReplyMsg = registry.dispatch(&symtab, &step.command, &step.args);
        saw_error |= reply.is_error();
        println!("{reply}");
    }

    if saw_error {
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    }
}
