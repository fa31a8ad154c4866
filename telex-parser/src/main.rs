use std::io::{self, Read, Write};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use tracing::{info, warn};

use telex_parser::config::{ConfigError, ParserConfig};
use telex_parser::domain::{AirlineCode, InvalidAirlineCode};
use telex_parser::schedule::ScheduleParser;
use telex_parser::telegram::{RawTelegram, TelegramParser};

/// Parse AFTN telegrams and airline schedule telexes read from stdin.
#[derive(Debug, Parser)]
#[command(name = "telex-parser", version)]
struct Args {
    /// JSON file with grammar and template tables (defaults to the built-in sets)
    #[arg(long, global = true, value_name = "FILE")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Parse one telegram and print its JSON envelope
    Telegram,

    /// Parse a schedule telex and print one JSON line per schedule line
    Schedule {
        /// Two-character airline designator, e.g. MF
        #[arg(long)]
        airline: String,
    },
}

#[derive(Debug, thiserror::Error)]
enum CliError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Airline(#[from] InvalidAirlineCode),

    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("failed to write JSON: {0}")]
    Json(#[from] serde_json::Error),
}

fn init_logging() {
    use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_target(false)
                .with_writer(io::stderr),
        )
        .init();
}

fn load_config(path: Option<&Path>) -> Result<ParserConfig, ConfigError> {
    match path {
        Some(path) => ParserConfig::load(path),
        None => Ok(ParserConfig::default()),
    }
}

fn read_stdin() -> io::Result<String> {
    let mut text = String::new();
    io::stdin().read_to_string(&mut text)?;
    Ok(text)
}

/// Returns whether the telegram parsed.
fn run_telegram(config: &ParserConfig) -> Result<bool, CliError> {
    let parser = TelegramParser::new(config.pattern_table()?);
    let envelope = parser.ingest(RawTelegram::new(read_stdin()?));

    match &envelope.parsed {
        Some(parsed) => {
            info!(category = %parsed.category, "telegram parsed");
            if let Err(e) = parsed.record.validate() {
                warn!(error = %e, "telegram is incomplete");
            }
        }
        None => warn!(error = envelope.error.as_deref().unwrap_or_default(), "telegram rejected"),
    }

    let mut out = io::stdout().lock();
    serde_json::to_writer_pretty(&mut out, &envelope)?;
    writeln!(out)?;
    Ok(envelope.is_parsed())
}

fn run_schedule(config: &ParserConfig, airline: &str) -> Result<(), CliError> {
    let airline = AirlineCode::parse(airline)?;
    let parser = ScheduleParser::new(config.template_table()?);
    let lines = parser.parse_telex(&read_stdin()?, airline);
    info!(%airline, lines = lines.len(), "schedule telex parsed");

    let mut out = io::stdout().lock();
    for line in &lines {
        serde_json::to_writer(&mut out, line)?;
        writeln!(out)?;
    }
    Ok(())
}

fn run(args: Args) -> Result<bool, CliError> {
    let config = load_config(args.config.as_deref())?;
    match args.command {
        Command::Telegram => run_telegram(&config),
        Command::Schedule { airline } => run_schedule(&config, &airline).map(|()| true),
    }
}

fn main() -> ExitCode {
    let args = Args::parse();
    init_logging();

    match run(args) {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::FAILURE,
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}
