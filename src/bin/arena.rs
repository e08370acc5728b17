//! OFF24 match runner.
//!
//! Generates a mirrored arena, plays two built-in agents against each other
//! and prints the board after every round.

use anyhow::{ensure, Result};
use clap::Parser;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::path::PathBuf;
use tracing::info;

use off24_rs::agents::{create_agent, AgentKind};
use off24_rs::config::{load_config, EngineConfig};
use off24_rs::game_runner::{play_match, MatchEnd, MatchOutcome};
use off24_rs::grid::{generate_arena, start_cells, Walls};
use off24_rs::render::{colorize, BoardView};
use off24_rs::snapshot::PlayerColor;

#[derive(Parser, Debug)]
#[command(name = "arena", about = "Play OFF24 matches between built-in agents", version)]
struct Args {
    /// Red player: search, random, cautious or the path of a player executable
    #[arg(short, long, default_value = "search")]
    red: AgentKind,

    /// Blue player: search, random, cautious or the path of a player executable
    #[arg(short, long, default_value = "cautious")]
    blue: AgentKind,

    /// Game field height
    #[arg(short = 'n', long, default_value_t = 15)]
    height: usize,

    /// Game field width
    #[arg(short = 'm', long, default_value_t = 20)]
    width: usize,

    /// Approximate wall count
    #[arg(short, long, default_value_t = 20)]
    wall_count: usize,

    /// Number of rounds after which the match is a tie [default: game.max_round, 400]
    #[arg(long)]
    round_count: Option<u32>,

    /// Time a player executable gets per move before it is made to wait
    /// [default: game.move_timeout_ms, 500]
    #[arg(long)]
    timeout_ms: Option<u64>,

    /// Game seed (random if not given)
    #[arg(long)]
    seed: Option<u64>,

    /// Don't print the board after each round
    #[arg(short, long)]
    silent: bool,

    /// Print one character per tile instead of four. Might hide some projectiles.
    #[arg(long)]
    nice_print: bool,

    /// Number of matches to play, each on a fresh arena
    #[arg(long, default_value_t = 1)]
    games: u32,

    /// YAML engine configuration for search agents
    #[arg(long)]
    config: Option<PathBuf>,
}

#[derive(Debug, Default)]
struct Tally {
    red: u32,
    blue: u32,
    ties: u32,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::filter::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();

    let mut config = match &args.config {
        Some(path) => load_config(path)?,
        None => EngineConfig::default(),
    };
    if let Some(round_count) = args.round_count {
        config.game.max_round = round_count;
    }
    if let Some(timeout_ms) = args.timeout_ms {
        config.game.move_timeout_ms = timeout_ms;
    }
    let max_round = config.game.max_round;

    for kind in [&args.red, &args.blue] {
        if let AgentKind::Exec(path) = kind {
            ensure!(path.is_file(), "Player executable {} not found", path.display());
        }
    }
    let seed = args.seed.unwrap_or_else(|| rand::thread_rng().gen());
    info!(seed, "starting arena");

    let mut rng = StdRng::seed_from_u64(seed);
    let mut tally = Tally::default();

    for game in 0..args.games {
        let tiles = generate_arena(args.height, args.width, args.wall_count, &mut rng)?;
        let walls = Walls::from_tiles(&tiles.view())?;
        let (red_start, blue_start) = start_cells(walls.dims());

        let agent_seed = seed.wrapping_add(game as u64);
        let mut red = create_agent(&args.red, PlayerColor::Red, &config, Some(agent_seed));
        let mut blue = create_agent(
            &args.blue,
            PlayerColor::Blue,
            &config,
            Some(agent_seed.wrapping_add(1)),
        );

        let silent = args.silent;
        let nice = args.nice_print;
        let result = play_match(
            &walls,
            red_start,
            blue_start,
            red.as_mut(),
            blue.as_mut(),
            max_round,
            |state, round| {
                if silent {
                    return;
                }
                let view = BoardView {
                    walls: state.walls(),
                    projectiles: state.projectiles(),
                    red: state.hero(),
                    blue: state.enemy(),
                };
                println!("{}", colorize(&view.render(round, None, nice)));
            },
        );

        match result.end {
            MatchEnd::Surrender => {
                println!("{} ({} rounds, by surrender)", result.outcome, result.rounds)
            }
            _ => println!("{} ({} rounds)", result.outcome, result.rounds),
        }
        match result.outcome {
            MatchOutcome::RedWins => tally.red += 1,
            MatchOutcome::BlueWins => tally.blue += 1,
            MatchOutcome::Tie => tally.ties += 1,
        }
    }

    if args.games > 1 {
        println!(
            "Red: {}, Blue: {}, Ties: {} (of {} games)",
            tally.red, tally.blue, tally.ties, args.games
        );
    }
    Ok(())
}
