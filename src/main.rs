use anyhow::Result;
use clap::{Parser, ValueEnum};
use snake_arcade::game::{GameConfig, GameEngine, SnakePreset, SnakeProfile};
use snake_arcade::logging;
use snake_arcade::modes::HumanMode;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "snake_arcade")]
#[command(version, about = "Arcade Snake with scoring multipliers and power-ups")]
struct Cli {
    /// Snake to play with
    #[arg(long, value_enum, default_value = "rattlesnake")]
    snake: Snake,

    /// Load the snake profile from a JSON file instead of a preset
    #[arg(long, conflicts_with = "snake")]
    profile: Option<PathBuf>,

    /// Override the profile's scoring multiplier
    #[arg(long)]
    multiplier: Option<f64>,

    /// Game configuration JSON file
    #[arg(long)]
    config: Option<PathBuf>,

    /// Seed for food and power-up placement
    #[arg(long)]
    seed: Option<u64>,

    /// Training mode: scores earn no XP
    #[arg(long)]
    training: bool,

    /// Write logs to this file (the terminal is taken by the game)
    #[arg(long)]
    log_file: Option<PathBuf>,
}

#[derive(Clone, Copy, ValueEnum)]
enum Snake {
    Rattlesnake,
    CoralSnake,
    KingCobra,
    BlackMamba,
}

impl From<Snake> for SnakePreset {
    fn from(snake: Snake) -> Self {
        match snake {
            Snake::Rattlesnake => SnakePreset::Rattlesnake,
            Snake::CoralSnake => SnakePreset::CoralSnake,
            Snake::KingCobra => SnakePreset::KingCobra,
            Snake::BlackMamba => SnakePreset::BlackMamba,
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    logging::init(cli.log_file.as_deref())?;

    let config = match &cli.config {
        Some(path) => GameConfig::load(path)?,
        None => GameConfig::default(),
    };

    let mut profile = match &cli.profile {
        Some(path) => SnakeProfile::load(path)?,
        None => SnakePreset::from(cli.snake).profile(),
    };
    if let Some(multiplier) = cli.multiplier {
        profile.scoring_multiplier = multiplier;
    }

    let engine = match cli.seed {
        Some(seed) => GameEngine::seeded(config, profile, seed),
        None => GameEngine::new(config, profile),
    };

    let mut human_mode = HumanMode::new(engine, cli.training);
    let report = human_mode.run().await?;

    println!("Final score: {}", report.final_score);
    println!(
        "Games played: {}    High score: {}",
        report.games_played, report.high_score
    );
    if cli.training {
        println!("Training mode - no XP earned");
    } else {
        println!("XP earned: {}", report.total_xp);
    }

    Ok(())
}
