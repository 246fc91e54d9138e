use std::path::PathBuf;

use clap::Parser;
use duel_core::{
    catalog::{Catalog, PlayerEntry},
    exception::GameError,
    game::{ClientCommand, Game},
    setup_logger,
};
use serde::Deserialize;
use tracing::{error, info};

#[derive(Parser)]
#[command(
    name = "duel_core",
    author = env!("CARGO_PKG_AUTHORS"),
    version = env!("CARGO_PKG_VERSION"),
    about = env!("CARGO_PKG_DESCRIPTION"),
    long_about = None,
)]
struct Args {
    /// 카드/리더 카탈로그 JSON
    #[arg(long)]
    catalog: PathBuf,

    /// 두 플레이어의 PlayerEntry 배열 JSON
    #[arg(long = "match")]
    match_file: PathBuf,

    /// {player, command} 배열 JSON
    #[arg(long)]
    script: Option<PathBuf>,

    #[arg(long, default_value_t = 0)]
    seed: u64,

    /// 지정하면 그 플레이어 시점으로 가린 상태를 출력
    #[arg(long)]
    viewer: Option<String>,
}

#[derive(Deserialize)]
struct ScriptStep {
    player: String,
    command: ClientCommand,
}

fn read_json<T: serde::de::DeserializeOwned>(path: &PathBuf) -> Result<T, GameError> {
    let content = std::fs::read_to_string(path)?;
    serde_json::from_str(&content).map_err(|e| GameError::CatalogParse(e.to_string()))
}

fn run(args: Args) -> Result<String, GameError> {
    let catalog = Catalog::from_path(&args.catalog)?;
    let entries: [PlayerEntry; 2] = read_json(&args.match_file)?;
    let mut game = Game::with_global_rules(&catalog, entries, args.seed)?;

    if let Some(script) = &args.script {
        let steps: Vec<ScriptStep> = read_json(script)?;
        for (i, step) in steps.into_iter().enumerate() {
            let response = game.dispatch(&step.player, step.command);
            info!("step {}: player={}, response={:?}", i, step.player, response);
            println!(
                "{}",
                serde_json::to_string(&response).map_err(|e| GameError::Io(e.to_string()))?
            );
        }
    }

    let view = match &args.viewer {
        Some(viewer) => game.get_secret_state(viewer),
        None => game.get_state(),
    };
    serde_json::to_string_pretty(&view).map_err(|e| GameError::Io(e.to_string()))
}

fn main() {
    setup_logger();
    let args = Args::parse();

    match run(args) {
        Ok(state) => println!("{}", state),
        Err(e) => {
            error!("실행 실패: {}", e);
            eprintln!("error: {} ({})", e, e.code());
            std::process::exit(1);
        }
    }
}
