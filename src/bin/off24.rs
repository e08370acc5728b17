//! OFF24 player executable.
//!
//! Reads one board snapshot from stdin and prints the chosen move code on
//! stdout. Logs go to stderr (`RUST_LOG=info` shows the search verdict).

use anyhow::{Context, Result};
use clap::Parser;
use std::io::{self, Read};
use std::path::PathBuf;
use tracing::info;

use off24_rs::agents::SearchAgent;
use off24_rs::config::{load_config, EngineConfig};
use off24_rs::render::{colorize, BoardView};
use off24_rs::snapshot::{PlayerColor, Snapshot};

#[derive(Parser, Debug)]
#[command(
    name = "off24",
    about = "Pick a move for an OFF24 board read from stdin",
    version
)]
struct Args {
    /// YAML engine configuration
    #[arg(long)]
    config: Option<PathBuf>,

    /// Full rounds to search (overrides the config)
    #[arg(long)]
    depth: Option<usize>,

    /// Search root moves on parallel workers
    #[arg(long)]
    parallel: bool,

    /// Rounds simulated by the survival heuristic (overrides the config)
    #[arg(long)]
    lookahead: Option<u32>,

    /// Print the parsed board to stderr
    #[arg(long)]
    render: bool,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::filter::EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .init();

    let args = Args::parse();

    let mut config = match &args.config {
        Some(path) => load_config(path)?,
        None => EngineConfig::default(),
    };
    if let Some(depth) = args.depth {
        anyhow::ensure!(depth >= 1, "--depth must be at least 1");
        config.search.depth = depth;
    }
    if args.parallel {
        config.search.parallel_root = true;
    }
    if let Some(lookahead) = args.lookahead {
        config.heuristic.lookahead_rounds = lookahead;
    }

    let mut input = String::new();
    io::stdin()
        .read_to_string(&mut input)
        .context("Failed to read board from stdin")?;
    let snapshot: Snapshot = input.parse().context("Failed to parse board")?;

    let walls = snapshot.walls();
    if args.render {
        let projectiles = snapshot.projectile_field();
        let view = BoardView {
            walls: &walls,
            projectiles: &projectiles,
            red: snapshot.position(PlayerColor::Red),
            blue: snapshot.position(PlayerColor::Blue),
        };
        eprint!("{}", colorize(&view.render_rows(false)));
    }

    let state = snapshot.game_state(&walls, config.game.max_round);
    let agent = SearchAgent::new(config);
    let result = agent.search(&state);
    info!(
        player = %snapshot.perspective(),
        best_move = %result.best_move,
        verdict = %result.verdict,
        leaves = result.leaves,
        "move selected"
    );

    println!("{}", result.best_move.code());
    Ok(())
}
