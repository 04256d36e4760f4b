//! cardfan CLI
//!
//! Replay pointer traces through the card selector, inspect layouts, and show
//! the effective configuration.

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use tracing::info;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use cardfan_core::Size;
use cardfan_platform::WindowConfig;
use cardfan_selector::{CardData, CardSelector};

mod config;
mod replay;
mod trace;

use trace::Trace;

#[derive(Parser)]
#[command(name = "cardfan")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Overlapping card selector - trace replay and layout tools", long_about = None)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Replay a pointer trace headlessly and print the resulting states
    Replay {
        /// Trace file (TOML)
        trace: PathBuf,

        /// Selector config file (defaults to ./cardfan.toml when present)
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Print the report as JSON
        #[arg(long)]
        json: bool,

        /// Frames per second used for `frame` events and settling
        #[arg(long, default_value = "60")]
        fps: f32,
    },

    /// Print the rest rectangles of a strip of cards
    Layout {
        /// Number of cards
        #[arg(short = 'n', long, default_value = "5")]
        cards: usize,

        /// Viewport width (defaults to the standard window width)
        #[arg(long)]
        width: Option<f32>,

        /// Viewport height (defaults to the standard window height)
        #[arg(long)]
        height: Option<f32>,

        /// Selector config file
        #[arg(short, long)]
        config: Option<PathBuf>,
    },

    /// Show the effective selector configuration
    Info {
        /// Selector config file
        #[arg(short, long)]
        config: Option<PathBuf>,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .init();

    match cli.command {
        Commands::Replay {
            trace,
            config,
            json,
            fps,
        } => cmd_replay(&trace, config.as_deref(), json, fps),

        Commands::Layout {
            cards,
            width,
            height,
            config,
        } => cmd_layout(cards, width, height, config.as_deref()),

        Commands::Info { config } => cmd_info(config.as_deref()),
    }
}

fn cmd_replay(trace_path: &Path, config_path: Option<&Path>, json: bool, fps: f32) -> Result<()> {
    let config = config::load(config_path)?;
    let trace = Trace::load(trace_path)?;

    info!(
        "Replaying {} ({} cards, {} events)",
        trace_path.display(),
        trace.cards.len(),
        trace.events.len()
    );

    let report = replay::run(&trace, config, fps)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print!("{}", replay::format_text(&report));
    }

    Ok(())
}

fn cmd_layout(
    count: usize,
    width: Option<f32>,
    height: Option<f32>,
    config_path: Option<&Path>,
) -> Result<()> {
    let config = config::load(config_path)?;
    let window = WindowConfig::default();
    let width = width.unwrap_or(window.width as f32);
    let height = height.unwrap_or(window.height as f32);

    let cards = (0..count)
        .map(|i| CardData::new(i as u64 + 1, format!("Card {}", i + 1)))
        .collect();
    let selector = CardSelector::new(cards, config, Size::new(width, height))?;
    let layout = selector.layout();

    println!("viewport     {} x {}", width, height);
    println!(
        "card size    {:.1} x {:.1}",
        layout.card_size().width,
        layout.card_size().height
    );
    println!("step         {:.1}", layout.step());
    let band = layout.hit_band();
    println!(
        "hit band     x {:.1}..{:.1}  y {:.1}..{:.1}",
        band.x(),
        band.right(),
        band.y(),
        band.bottom()
    );
    println!();

    for frame in selector.card_frames() {
        let r = frame.rest;
        println!(
            "#{:<3} {:<12} x {:>7.1}..{:<7.1} y {:>7.1}..{:<7.1} z {}",
            frame.index,
            frame.title,
            r.x(),
            r.right(),
            r.y(),
            r.bottom(),
            frame.transform.z_index
        );
    }

    Ok(())
}

fn cmd_info(config_path: Option<&Path>) -> Result<()> {
    let config = config::load(config_path)?;

    println!("cardfan");
    println!("=======");
    println!();
    println!("Version: {}", env!("CARGO_PKG_VERSION"));
    println!();
    println!("Effective configuration:");
    println!();
    print!("{}", config::to_toml(&config)?);

    Ok(())
}
