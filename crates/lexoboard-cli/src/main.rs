//! lexoboard CLI
//!
//! Command-line front end for the board engine. Prints each response body as
//! JSON on stdout; logs go to stderr when `--log` is given.

use clap::{Parser, Subcommand};

mod commands;

use commands::GlobalArgs;

#[derive(Debug, Parser)]
#[command(name = "lexoboard")]
#[command(about = "lexoboard - ordered kanban boards", long_about = None)]
struct Cli {
    #[command(flatten)]
    global: GlobalArgs,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Board operations
    Board(commands::board::BoardArgs),
    /// Column operations
    Column(commands::column::ColumnArgs),
    /// Card operations
    Card(commands::card::CardArgs),
    /// Idempotency cache maintenance
    Idempotency(commands::idempotency::IdempotencyArgs),
}

fn main() {
    let cli = Cli::parse();

    if let Some(profile) = cli.global.log {
        lexoboard_core::logging_facility::init(profile);
    }

    let cmd = match cli.command {
        Commands::Board(args) => commands::board::to_command(args, &cli.global),
        Commands::Column(args) => commands::column::to_command(args),
        Commands::Card(args) => commands::card::to_command(args),
        Commands::Idempotency(args) => commands::idempotency::to_command(args),
    };

    if let Err(e) = commands::execute(cmd, &cli.global) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
