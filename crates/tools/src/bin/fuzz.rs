use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use rand_chacha::{
    ChaCha8Rng,
    rand_core::{Rng, SeedableRng},
};
use tracing_subscriber::EnvFilter;
use wordmaze_core::{Dictionary, GameConfig, GameSession, InputEvent, SessionEvent};

const STANDARD_CONFIG: &str = include_str!("../../../../config/standard.toml");

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Game configuration TOML; the standard configuration is used when omitted
    #[arg(short, long)]
    config: Option<PathBuf>,
    #[arg(short, long, default_value_t = 42)]
    seed: u64,
    #[arg(short, long, default_value_t = 5000)]
    frames: u64,
    #[arg(long, default_value_t = 16)]
    frame_ms: u64,
}

fn choose<T: Clone>(rng: &mut ChaCha8Rng, slice: &[T]) -> T {
    let p = rng.next_u64() as usize % slice.len();
    slice[p].clone()
}

fn load_config(path: Option<&PathBuf>, seed: u64) -> Result<GameConfig> {
    let source = match path {
        Some(path) => fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?,
        None => STANDARD_CONFIG.to_string(),
    };
    let mut config = GameConfig::from_toml_str(&source).context("Invalid game configuration")?;
    config.base_seed = seed.to_string();
    Ok(config)
}

fn main() -> Result<()> {
    tracing_subscriber::fmt().with_env_filter(EnvFilter::from_default_env()).init();
    let args = Args::parse();

    println!("Starting Fuzz harness on seed {} for max {} frames...", args.seed, args.frames);
    let config = load_config(args.config.as_ref(), args.seed)?;
    let mut session = GameSession::new(config, Dictionary::builtin())?;
    let mut rng = ChaCha8Rng::seed_from_u64(args.seed);
    let mut deaths = 0;

    for frame in 0..args.frames {
        let offered: Vec<char> =
            session.typeable_neighbors().iter().filter_map(|tile| tile.letter()).collect();
        let input = match rng.next_u64() % 8 {
            0 => Some(InputEvent::DeleteChar),
            1 => Some(InputEvent::DeleteWord),
            2 => Some(InputEvent::Char(choose(&mut rng, &['q', 'z', 'x', '7']))),
            3 | 4 if !offered.is_empty() => Some(InputEvent::Char(choose(&mut rng, &offered))),
            _ => None,
        };
        if let Some(input) = input {
            session.apply_input(input);
        }
        session.tick(frame * args.frame_ms);

        for event in session.drain_events() {
            if let SessionEvent::PlayerDied { score } = event {
                deaths += 1;
                println!("Player died at column {score} after {frame} frames");
            }
        }

        // Assert invariants
        let current = session.current_tile().expect("Invariant failed: current tile evicted");
        assert!(current.is_path(), "Invariant failed: player inside wall");
        assert!(deaths <= 1, "Invariant failed: death reported twice");
        for tile in session.store().iter() {
            assert!(tile.back_count() <= tile.visit_count(), "Invariant failed: back > visit");
            assert!((0.0..=1.0).contains(&tile.heat()), "Invariant failed: heat out of range");
        }
        assert!(
            session.frontier_x() > session.current().x,
            "Invariant failed: player beyond generated world"
        );

        if !session.is_running() {
            break;
        }
    }

    println!(
        "Fuzz finished at column {} with status {:?} (hash {})",
        session.current().x,
        session.status(),
        session.snapshot_hash()
    );
    Ok(())
}
