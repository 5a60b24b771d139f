use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

mod commands;
mod env;
mod formatter;

use commands::{count, list, probe, process, read};

#[derive(Parser)]
#[command(name = "sheetscan")]
#[command(about = "Extract labeled fields and identifiers from Excel folders into a JSON log", long_about = None)]
#[command(version)]
struct Cli {
    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Count files under the offers folder by extension
    #[command(visible_alias = "c")]
    Count(count::CountArgs),

    /// Write the list of .xlsx files under the offers folder to a CSV report
    #[command(visible_alias = "cl")]
    CountAndList(list::ListArgs),

    /// Extract fields from one workbook or a whole year folder
    #[command(visible_alias = "r")]
    Read(read::ReadArgs),

    /// Process only the files missing from a previous results log
    #[command(visible_alias = "p")]
    Process(process::ProcessArgs),

    /// Show the sheets of a workbook and which ones would be read
    #[command(visible_alias = "t")]
    Probe(probe::ProbeArgs),
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let debug = matches!(&cli.command, Commands::Read(args) if args.debug);
    let level = match (cli.verbose, debug) {
        (0, false) => Level::INFO,
        (0, true) | (1, _) => Level::DEBUG,
        _ => Level::TRACE,
    };

    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(false)
        .with_writer(std::io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let env = env::RunEnv::load();

    match cli.command {
        Commands::Count(args) => count::run(args, &env),
        Commands::CountAndList(args) => list::run(args, &env),
        Commands::Read(args) => read::run(args, &env),
        Commands::Process(args) => process::run(args, &env),
        Commands::Probe(args) => probe::run(args),
    }
}
