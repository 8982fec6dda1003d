//! Card commands

use clap::{Args, Subcommand};
use lexoboard_core::ops::{CreateCard, MoveCard};
use lexoboard_engine::commands::engine_command::EngineCommand;

#[derive(Debug, Args)]
pub struct CardArgs {
    #[command(subcommand)]
    pub command: CardCommand,
}

#[derive(Debug, Subcommand)]
pub enum CardCommand {
    /// Create a card; appended last in its column unless anchored
    Create {
        #[arg(long)]
        board: String,
        #[arg(long)]
        column: String,
        #[arg(long)]
        title: String,
        #[arg(long)]
        description: Option<String>,
        /// Place immediately before this card
        #[arg(long)]
        before: Option<String>,
        /// Place immediately after this card
        #[arg(long)]
        after: Option<String>,
    },
    /// Move a card within its column or to another column of the board
    Move {
        #[arg(long)]
        board: String,
        #[arg(long)]
        card: String,
        /// Target column; defaults to the card's current column
        #[arg(long = "to-column")]
        to_column: Option<String>,
        #[arg(long)]
        before: Option<String>,
        #[arg(long)]
        after: Option<String>,
        /// Fail unless the card is still at this version
        #[arg(long = "expected-version")]
        expected_version: Option<u64>,
    },
}

pub fn to_command(args: CardArgs) -> EngineCommand {
    match args.command {
        CardCommand::Create {
            board,
            column,
            title,
            description,
            before,
            after,
        } => EngineCommand::CardCreate(CreateCard {
            board_id: board,
            column_id: column,
            title,
            description,
            before_card_id: before,
            after_card_id: after,
        }),
        CardCommand::Move {
            board,
            card,
            to_column,
            before,
            after,
            expected_version,
        } => EngineCommand::CardMove(MoveCard {
            board_id: board,
            card_id: card,
            to_column_id: to_column,
            before_card_id: before,
            after_card_id: after,
            expected_version,
        }),
    }
}
