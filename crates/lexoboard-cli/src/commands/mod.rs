pub mod board;
pub mod card;
pub mod column;
pub mod idempotency;

use std::path::PathBuf;

use clap::Args;
use lexoboard_core::logging_facility::Profile;
use lexoboard_core::{Actor, ExError, Role};
use lexoboard_core_types::RequestContext;
use lexoboard_engine::commands::engine_command::{apply_engine_command, EngineCommand};
use lexoboard_engine::commands::open_store;
use lexoboard_engine::EngineConfig;

/// Options shared by every subcommand
#[derive(Debug, Args)]
pub struct GlobalArgs {
    /// SQLite database file (created on first use)
    #[arg(long, global = true, default_value = ".lexoboard/board.db")]
    pub db: PathBuf,

    /// TOML engine config; built-in defaults when absent
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Acting user id; recorded as owner of boards it creates
    #[arg(long, global = true, default_value = "cli")]
    pub actor: String,

    /// Role of the acting user: admin, writer or reader
    #[arg(long, global = true, default_value = "writer")]
    pub role: Role,

    /// Opaque token; retrying a write with the same token replays its response
    #[arg(long = "idempotency-key", global = true)]
    pub idempotency_key: Option<String>,

    /// Emit logs to stderr: dev or json
    #[arg(long, global = true)]
    pub log: Option<Profile>,
}

/// Gate, run and print one engine command
pub fn execute(cmd: EngineCommand, global: &GlobalArgs) -> Result<(), Box<dyn std::error::Error>> {
    if cmd.is_write() {
        Actor::new(global.actor.as_str(), global.role)
            .require_writer()
            .map_err(ExError::from)?;
    }

    let config = match &global.config {
        Some(path) => EngineConfig::load(path)?,
        None => EngineConfig::default(),
    };

    if let Some(parent) = global.db.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)?;
    }
    let mut store = open_store(&global.db, &config)?;

    let mut ctx = RequestContext::new();
    if let Some(token) = &global.idempotency_key {
        ctx = ctx.with_idempotency_token(token.as_str());
    }

    let result = apply_engine_command(cmd, &mut store, &config, &ctx)?;
    println!("{}", result.to_json()?);
    Ok(())
}
