//! Board commands

use clap::{Args, Subcommand};
use lexoboard_core::ops::CreateBoard;
use lexoboard_engine::commands::engine_command::EngineCommand;

use super::GlobalArgs;

#[derive(Debug, Args)]
pub struct BoardArgs {
    #[command(subcommand)]
    pub command: BoardCommand,
}

#[derive(Debug, Subcommand)]
pub enum BoardCommand {
    /// Create a board owned by the acting user
    Create {
        #[arg(long)]
        name: String,
        #[arg(long)]
        description: Option<String>,
    },
    /// Print a board with its columns and cards in order
    Show { board_id: String },
    /// Delete a board with all of its columns and cards
    Delete { board_id: String },
}

pub fn to_command(args: BoardArgs, global: &GlobalArgs) -> EngineCommand {
    match args.command {
        BoardCommand::Create { name, description } => EngineCommand::BoardCreate(CreateBoard {
            name,
            description,
            owner_id: global.actor.clone(),
        }),
        BoardCommand::Show { board_id } => EngineCommand::BoardView { board_id },
        BoardCommand::Delete { board_id } => EngineCommand::BoardDelete { board_id },
    }
}
