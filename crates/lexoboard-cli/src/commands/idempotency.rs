//! Idempotency cache maintenance

use clap::{Args, Subcommand};
use lexoboard_engine::commands::engine_command::EngineCommand;

#[derive(Debug, Args)]
pub struct IdempotencyArgs {
    #[command(subcommand)]
    pub command: IdempotencyCommand,
}

#[derive(Debug, Subcommand)]
pub enum IdempotencyCommand {
    /// Delete cached responses older than the configured TTL
    Purge,
}

pub fn to_command(args: IdempotencyArgs) -> EngineCommand {
    match args.command {
        IdempotencyCommand::Purge => EngineCommand::IdempotencyPurge,
    }
}
