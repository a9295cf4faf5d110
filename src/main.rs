use anyhow::{Context, Result};
use clap::{error::ErrorKind, CommandFactory, Parser};
use std::io::IsTerminal;
use std::path::PathBuf;

mod acronym;
mod commands;
mod config;
mod distance;
mod exit_codes;
mod output;
mod tips;
use acronym::SharedRepository;
use commands::Outcome;
use config::Config;
use output::{HelpResponse, JsonError, Output, VersionResponse};

/// Version from Cargo.toml
const VERSION: &str = env!("CARGO_PKG_VERSION");

const EXAMPLES: &str = "\
Examples:
  tmdr abg               Look up ABG (Arterial Blood Gas)
  tmdr hiv               Look up HIV (Human Immunodeficiency Virus)
  tmdr abc               Unknown acronyms get 'Did you mean' suggestions
  tmdr --search blood    Match codes and expansions containing 'blood'
  tmdr --interactive     Look up several acronyms at a prompt";

#[derive(Parser)]
#[command(name = "tmdr")]
#[command(version = VERSION)]
#[command(about = "Too Medical; Didn't Read - look up medical acronyms", long_about = None)]
#[command(after_help = EXAMPLES)]
struct Cli {
    /// Acronym to look up (case-insensitive)
    #[arg(conflicts_with_all = ["random", "list", "search", "interactive"])]
    acronym: Option<String>,

    /// Display a random acronym
    #[arg(short, long, conflicts_with_all = ["list", "search", "interactive"])]
    random: bool,

    /// List every acronym
    #[arg(short, long, conflicts_with_all = ["search", "interactive"])]
    list: bool,

    /// Show acronyms whose code or expansion contains TEXT
    #[arg(short, long, value_name = "TEXT", conflicts_with = "interactive")]
    search: Option<String>,

    /// Prompt for lookups until an empty line or :quit
    #[arg(short, long)]
    interactive: bool,

    /// Maximum fuzzy suggestions when an acronym is not found (default: 3)
    #[arg(short = 'n', long, value_name = "N")]
    limit: Option<usize>,

    /// Acronym CSV to use instead of the built-in dataset (overrides TMDR_DATA and config)
    #[arg(long, value_name = "PATH")]
    data: Option<PathBuf>,

    /// Path to config file (default: ./tmdr.toml)
    #[arg(long = "config", value_name = "PATH")]
    config_path: Option<PathBuf>,

    /// Output as JSON instead of human-readable text
    #[arg(long)]
    json: bool,

    /// Minimal output (answers and errors only)
    #[arg(long)]
    quiet: bool,

    /// Show diagnostics such as fuzzy match scores
    #[arg(long)]
    verbose: bool,

    /// Disable colored output
    #[arg(long)]
    no_color: bool,
}

enum Mode {
    Lookup(String),
    Random,
    List,
    Search(String),
    Interactive,
}

impl Cli {
    /// The requested mode, or None when nothing was asked for.
    fn mode(&self) -> Option<Mode> {
        if let Some(ref acronym) = self.acronym {
            Some(Mode::Lookup(acronym.clone()))
        } else if self.random {
            Some(Mode::Random)
        } else if self.list {
            Some(Mode::List)
        } else if let Some(ref text) = self.search {
            Some(Mode::Search(text.clone()))
        } else if self.interactive {
            Some(Mode::Interactive)
        } else {
            None
        }
    }
}

fn main() {
    // Load .env file if present (before parsing CLI so TMDR_DATA is available)
    let _ = dotenvy::dotenv();

    // Check for --json flag early (before full parsing) for error handling
    let json_mode = std::env::args().any(|arg| arg == "--json");

    // Use try_parse to handle clap errors in JSON mode
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) => {
            if json_mode {
                match e.kind() {
                    ErrorKind::DisplayHelp => {
                        HelpResponse::new(e.to_string()).print();
                        std::process::exit(exit_codes::FOUND);
                    }
                    ErrorKind::DisplayVersion => {
                        VersionResponse::new(VERSION.to_string()).print();
                        std::process::exit(exit_codes::FOUND);
                    }
                    _ => {
                        JsonError::new("usage_error", e.to_string()).print();
                        std::process::exit(exit_codes::USAGE);
                    }
                }
            } else {
                // Human mode: let clap print its formatted output
                e.exit();
            }
        }
    };

    let output = Output::new(cli.json, cli.quiet, cli.verbose);

    // Interactive mode needs a terminal and human output
    let mode = match cli.mode() {
        Some(Mode::Interactive) if cli.json => {
            JsonError::new("usage_error", "--json is not supported in interactive mode").print();
            std::process::exit(exit_codes::USAGE);
        }
        Some(mode) => mode,
        None if !cli.json && std::io::stdin().is_terminal() => Mode::Interactive,
        None => {
            if cli.json {
                JsonError::new("usage_error", "an acronym or a mode flag is required").print();
            } else {
                eprint!("{}", Cli::command().render_help());
            }
            std::process::exit(exit_codes::USAGE);
        }
    };

    match run(&cli, mode, &output) {
        Ok(outcome) => std::process::exit(outcome.exit_code()),
        Err(e) => {
            let code = exit_codes::for_error(&e);
            if json_mode {
                // Only include details when the chain adds something to the message
                let message = e.to_string();
                let full_chain = format!("{e:#}");
                let json_err = if full_chain == message {
                    JsonError::new(exit_codes::error_code(&e), message)
                } else {
                    JsonError::with_details(exit_codes::error_code(&e), message, full_chain)
                };
                json_err.print();
            } else {
                eprintln!("Error: {e:#}");
            }
            std::process::exit(code);
        }
    }
}

fn run(cli: &Cli, mode: Mode, output: &Output) -> Result<Outcome> {
    let config = Config::load(cli.config_path.as_deref())?;

    if cli.no_color || !config.color_enabled() || !std::io::stdout().is_terminal() {
        colored::control::set_override(false);
    }

    let source = config.resolve_data_source(cli.data.as_deref());
    output.verbose(&format!("Loading acronyms from {}", source.describe()));
    let repo = source
        .load()
        .with_context(|| format!("Error loading acronym database from {}", source.describe()))?;
    output.verbose(&format!("Loaded {} acronyms", repo.len()));
    if repo.is_empty() {
        output.warn(&format!("Warning: no acronyms found in {}", source.describe()));
    }

    let limit = config.max_results(cli.limit);

    match mode {
        Mode::Lookup(query) => commands::lookup(&repo, &query, limit, output),
        Mode::Random => commands::random(&repo, &mut rand::thread_rng(), output),
        Mode::List => commands::list(&repo, output),
        Mode::Search(text) => commands::search(&repo, &text, output),
        Mode::Interactive => {
            let shared = SharedRepository::new(repo);
            commands::interactive(&shared, &source, limit, output)?;
            Ok(Outcome::Found)
        }
    }
}
