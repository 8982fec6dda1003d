//! Column commands

use clap::{Args, Subcommand};
use lexoboard_core::ops::{CreateColumn, MoveColumn};
use lexoboard_engine::commands::engine_command::EngineCommand;

#[derive(Debug, Args)]
pub struct ColumnArgs {
    #[command(subcommand)]
    pub command: ColumnCommand,
}

#[derive(Debug, Subcommand)]
pub enum ColumnCommand {
    /// Create a column; appended last unless anchored
    Create {
        #[arg(long)]
        board: String,
        #[arg(long)]
        name: String,
        /// Place immediately before this column
        #[arg(long)]
        before: Option<String>,
        /// Place immediately after this column
        #[arg(long)]
        after: Option<String>,
    },
    /// Move a column next to its new neighbours
    Move {
        #[arg(long)]
        board: String,
        #[arg(long)]
        column: String,
        #[arg(long)]
        before: Option<String>,
        #[arg(long)]
        after: Option<String>,
    },
    /// Delete a column with its cards
    Delete {
        #[arg(long)]
        board: String,
        #[arg(long)]
        column: String,
    },
}

pub fn to_command(args: ColumnArgs) -> EngineCommand {
    match args.command {
        ColumnCommand::Create {
            board,
            name,
            before,
            after,
        } => EngineCommand::ColumnCreate(CreateColumn {
            board_id: board,
            name,
            before_column_id: before,
            after_column_id: after,
        }),
        ColumnCommand::Move {
            board,
            column,
            before,
            after,
        } => EngineCommand::ColumnMove(MoveColumn {
            board_id: board,
            column_id: column,
            before_column_id: before,
            after_column_id: after,
        }),
        ColumnCommand::Delete { board, column } => EngineCommand::ColumnDelete {
            board_id: board,
            column_id: column,
        },
    }
}
