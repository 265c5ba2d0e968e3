use anyhow::Result;
use clap::{Parser, Subcommand, ValueEnum};
use tracing_subscriber::EnvFilter;

mod commands;
mod settings;
mod tables;

use commands::analyze::{handle_analyze_command, AnalyzeArgs};
use commands::config::handle_config_command;
use settings::ConfigArgs;

#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about = "Race timing analysis for RFID timing exports",
    long_about = None
)]
struct Cli {
    /// Log line format on stderr
    #[arg(long, value_enum, global = true, default_value_t = LogFormat::Json)]
    log_format: LogFormat,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Analyze a timing export and print participants, sessions or attempts
    Analyze(AnalyzeArgs),
    /// Print the effective analysis configuration as TOML
    Config(ConfigArgs),
}

#[derive(Copy, Clone, Debug, ValueEnum)]
enum LogFormat {
    Json,
    Pretty,
}

fn main() -> Result<()> {
    // Loaded before parsing so RACETIME_* variables from .env reach clap.
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    init_tracing(cli.log_format);

    match cli.command {
        Command::Analyze(args) => handle_analyze_command(args),
        Command::Config(args) => handle_config_command(args),
    }
}

fn init_tracing(format: LogFormat) {
    let builder = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr);

    match format {
        LogFormat::Json => builder.json().init(),
        LogFormat::Pretty => builder.pretty().init(),
    }
}
