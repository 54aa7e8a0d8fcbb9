//! CLI application that renames the latest downloaded PDF after its contents.

mod commands;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

use commands::{Context, config, dump, inspect, menu, rename};

/// Rename the latest downloaded PDF from its company name and registration number
#[derive(Parser)]
#[command(name = "pdfname")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Path to config file
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Directory to search instead of the configured download directory
    #[arg(short, long, global = true)]
    dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Rename the latest PDF
    Rename(rename::RenameArgs),

    /// Show what would be extracted from the latest PDF without renaming it
    Inspect(inspect::InspectArgs),

    /// Print the text content of the latest PDF
    Dump(dump::DumpArgs),

    /// Manage configuration
    Config(config::ConfigArgs),
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Set up logging based on verbosity
    let level = match cli.verbose {
        0 => Level::WARN,
        1 => Level::INFO,
        2 => Level::DEBUG,
        _ => Level::TRACE,
    };

    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(false)
        .with_writer(std::io::stderr)
        .finish();

    tracing::subscriber::set_global_default(subscriber)?;

    let config_path = cli.config.as_deref();

    match cli.command {
        Some(Commands::Rename(args)) => rename::run(args, &Context::load(config_path, cli.dir)?),
        Some(Commands::Inspect(args)) => inspect::run(args, &Context::load(config_path, cli.dir)?),
        Some(Commands::Dump(args)) => dump::run(args, &Context::load(config_path, cli.dir)?),
        Some(Commands::Config(args)) => config::run(args, config_path),
        None => menu::run(&Context::load(config_path, cli.dir)?),
    }
}
