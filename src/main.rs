use std::path::PathBuf;

use clap::Parser;
use mazecore::config::{ConfigError, GameConfig, Ruleset};
use mazecore::replay::{self, Script};
use mazecore::transport::{Transport, TransportError, decode_message};
use tokio::sync::mpsc;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

#[derive(Debug, thiserror::Error)]
enum ReplayError {
    #[error("invalid configuration: {0}")]
    Config(#[from] ConfigError),
    #[error("cannot read script: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid script: {0}")]
    Script(#[from] serde_json::Error),
    #[error("transport failed: {0}")]
    Transport(#[from] TransportError),
    #[error("frame reader failed: {0}")]
    Join(#[from] tokio::task::JoinError),
}

#[derive(Parser, Debug)]
#[command(name = "maze-replay", about = "Replay a scripted input session through the maze rule engine")]
struct Cli {
    /// JSON script with the initial state and input events.
    script: PathBuf,

    /// Overrides `MAZE_RULESET`.
    #[arg(long)]
    ruleset: Option<Ruleset>,

    /// Overrides `MAZE_SCENARIO`. Clamped to the supported range.
    #[arg(long)]
    scenario: Option<i64>,

    #[arg(long, env = "MAZE_GAME_ID")]
    game_id: Option<String>,

    #[arg(long, env = "MAZE_PLAYER_ID", default_value = "replay")]
    player_id: String,
}

#[tokio::main]
async fn main() -> Result<(), ReplayError> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let cli = Cli::parse();
    let mut config = GameConfig::from_env()?;
    if let Some(ruleset) = cli.ruleset {
        config.ruleset = ruleset;
    }
    if let Some(scenario) = cli.scenario {
        config = config.with_scenario(scenario);
    }

    let raw = tokio::fs::read_to_string(&cli.script).await?;
    let script: Script = serde_json::from_str(&raw)?;
    info!(
        script = %cli.script.display(),
        ruleset = ?config.ruleset,
        scenario = config.scenario,
        events = script.events.len(),
        "replay starting"
    );

    let (tx, mut rx) = mpsc::unbounded_channel::<Vec<u8>>();
    let mut transport = Transport::new(tx).with_from(cli.player_id);
    if let Some(game_id) = cli.game_id {
        transport = transport.with_game_id(game_id);
    }

    let reader = tokio::spawn(async move {
        let mut frames = 0usize;
        while let Some(bytes) = rx.recv().await {
            frames += 1;
            match decode_message(&bytes) {
                Ok(message) => info!(syscall = message.syscall(), ?message, "frame"),
                Err(e) => warn!(error = %e, "undecodable frame"),
            }
        }
        frames
    });

    let mut engine = script.build(config);
    for event in &script.events {
        replay::apply(&mut engine, event);
        transport.flush(&mut engine.outbox)?;
    }
    drop(transport);

    let frames = reader.await?;
    info!(
        frames,
        mode = ?engine.mode(),
        stock = engine.tiles.stock_size(),
        ended = engine.is_ended(),
        "replay finished"
    );
    Ok(())
}
