//! Adaptive Breakout entry point
//!
//! Runs headless autopilot sessions and reports on stored records.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};

use adaptive_breakout::GameConfig;
use adaptive_breakout::records::{DEFAULT_DATA_FILE, RecordStore, Statistics};
use adaptive_breakout::runner::{Autopilot, Pacing, run_session_with};
use adaptive_breakout::sim::{GameEvent, GameMode, GameState};

/// Adaptive brick-breaking simulation
#[derive(Parser)]
#[command(name = "adaptive-breakout")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Verbose output (debug logging)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Play one session with the autopilot
    Play {
        /// Game mode (classic or challenge)
        #[arg(short, long, default_value = "classic")]
        mode: GameMode,

        /// RNG seed (defaults to the current time)
        #[arg(short, long)]
        seed: Option<u64>,

        /// JSON config file
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Record store file
        #[arg(short, long, default_value = DEFAULT_DATA_FILE)]
        data: PathBuf,

        /// Stop after this many ticks
        #[arg(long)]
        max_ticks: Option<u64>,

        /// Pace ticks at the configured frame rate
        #[arg(long)]
        realtime: bool,

        /// How far the autopilot's aim drifts across the paddle (0..1)
        #[arg(long, default_value_t = 0.6)]
        drift: f32,
    },

    /// Print statistics over stored records
    Stats {
        /// Record store file
        #[arg(short, long, default_value = DEFAULT_DATA_FILE)]
        data: PathBuf,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let default_filter = if cli.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter))
        .init();

    match cli.command {
        Commands::Play {
            mode,
            seed,
            config,
            data,
            max_ticks,
            realtime,
            drift,
        } => play(mode, seed, config, data, max_ticks, realtime, drift),
        Commands::Stats { data } => stats(data),
    }
}

fn play(
    mode: GameMode,
    seed: Option<u64>,
    config: Option<PathBuf>,
    data: PathBuf,
    max_ticks: Option<u64>,
    realtime: bool,
    drift: f32,
) -> Result<()> {
    let config = match config {
        Some(path) => GameConfig::load(&path)
            .with_context(|| format!("loading config {}", path.display()))?,
        None => GameConfig::default(),
    };
    let seed = seed.unwrap_or_else(|| chrono::Utc::now().timestamp_millis() as u64);
    log::info!("Seed {seed}");

    let mut state = GameState::new(config, mode, seed).context("creating session")?;
    let mut pilot = Autopilot::new(drift);
    let pacing = if realtime { Pacing::RealTime } else { Pacing::Unpaced };

    let mut raises = 0u32;
    let result = run_session_with(&mut state, &mut pilot, pacing, max_ticks, |_, report| {
        for event in &report.events {
            if let GameEvent::DifficultyRaised { .. } = event {
                raises += 1;
            }
        }
    });
    let record = result.record;

    println!("Session over after {} ticks ({:?})", result.ticks, result.status);
    println!("Mode:            {}", record.mode);
    println!("Score:           {}", record.score);
    println!("Level:           {}", record.level);
    println!("Hit rate:        {:.2}%", record.hit_rate * 100.0);
    println!("Bricks hit:      {}", record.bricks_hit);
    println!("Lives remaining: {}", record.lives_remaining);
    println!("Duration:        {:.1} s", record.duration);
    println!("Difficulty ups:  {raises}");
    println!("{}", if record.won { "Won!" } else { "Not won" });

    if record.score > 0 {
        let store = RecordStore::new(&data);
        store
            .append(record)
            .with_context(|| format!("saving record to {}", data.display()))?;
    }
    Ok(())
}

fn stats(data: PathBuf) -> Result<()> {
    let store = RecordStore::new(&data);
    let records = store
        .load()
        .with_context(|| format!("reading records from {}", data.display()))?;

    let Some(stats) = Statistics::from_records(&records) else {
        println!("No game records in {}", data.display());
        return Ok(());
    };

    println!("Games played:    {}", stats.total_games);
    println!("Total score:     {}", stats.total_score);
    println!("Average score:   {:.2}", stats.average_score);
    println!("Best score:      {}", stats.max_score);
    println!("Wins:            {} ({:.1}%)", stats.wins, stats.win_ratio * 100.0);
    println!("Avg hit rate:    {:.2}%", stats.average_hit_rate * 100.0);
    println!("Classic games:   {}", stats.classic_games);
    println!("Challenge games: {}", stats.challenge_games);
    println!();
    println!("Recent games:");
    for (i, game) in stats.recent.iter().enumerate() {
        println!(
            "{}. [{}] score {}, hit rate {:.1}%, {}, {}",
            i + 1,
            game.mode,
            game.score,
            game.hit_rate * 100.0,
            if game.won { "won" } else { "not won" },
            game.timestamp
        );
    }
    Ok(())
}
