//! # Offline Advisor CLI (`advisor`)
//!
//! Loads the four topic datasets and answers one request per invocation.
//!
//! ## Usage
//!
//! ```bash
//! advisor --config ./config/advisor.toml <command>
//! ```
//!
//! ## Commands
//!
//! | Command | Description |
//! |---------|-------------|
//! | `advisor search "<query>"` | Keyword advice across all topics |
//! | `advisor cpr` | CPR brief steps and detailed guide |
//! | `advisor contacts` | Emergency phone numbers |
//! | `advisor category <name>` | Browse medical, plant, or women's advice |
//! | `advisor classify <frame>` | Run the green heuristic on a raw RGBA frame |
//! | `advisor identify <frame>` | Identify a plant from a raw RGBA frame |
//! | `advisor voice` | Transcribe one utterance and answer it |
//! | `advisor sources` | Show where each dataset came from |
//!
//! Logs go to stderr and are controlled with `RUST_LOG` (default `warn`).

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

use offline_advisor::advice::{self, Category};
use offline_advisor::capture::{
    CameraService, CommandTranscriber, FileCamera, TranscriptionService, UnsupportedTranscriber,
};
use offline_advisor::classifier::{self, Frame, PLANT_RATIO_THRESHOLD};
use offline_advisor::config::{self, Config};
use offline_advisor::loader;
use offline_advisor::matcher;
use offline_advisor::session::Session;
use offline_advisor::sources;
use offline_advisor::store::KnowledgeStore;

/// Offline Advisor: advice from bundled emergency, health, plant, and
/// women's health knowledge bases.
#[derive(Parser)]
#[command(name = "advisor", version, about)]
struct Cli {
    /// Path to configuration file (TOML).
    ///
    /// Defaults to `./config/advisor.toml`. When the file does not exist the
    /// bundled datasets are used.
    #[arg(long, global = true, default_value = "./config/advisor.toml")]
    config: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Find advice matching free text.
    Search {
        /// The question or symptom description.
        query: String,

        /// Print matches as JSON instead of a card.
        #[arg(long)]
        json: bool,
    },

    /// Show CPR steps.
    Cpr,

    /// Show emergency contacts.
    Contacts,

    /// Browse a category: `medical`, `plant`, or `women`.
    Category { name: Category },

    /// Report the green-pixel share of a raw RGBA8 frame.
    Classify {
        /// Path to a tightly packed RGBA8 file.
        frame: PathBuf,
        #[arg(long)]
        width: Option<u32>,
        #[arg(long)]
        height: Option<u32>,
        #[arg(long)]
        json: bool,
    },

    /// Identify a plant from a raw RGBA8 frame.
    Identify {
        /// Path to a tightly packed RGBA8 file.
        frame: PathBuf,
        #[arg(long)]
        width: Option<u32>,
        #[arg(long)]
        height: Option<u32>,
    },

    /// Record one utterance with the configured speech-to-text program.
    Voice,

    /// Show which datasets loaded.
    Sources,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let cfg = config::load_config(&cli.config)?;

    // Reject blank queries before touching any dataset.
    if let Commands::Search { query, .. } = &cli.command {
        if query.trim().is_empty() {
            bail!("query must not be empty");
        }
    }

    let data_loader = loader::build_loader(&cfg.data)?;
    let store = KnowledgeStore::load(data_loader.as_ref()).await;

    match cli.command {
        Commands::Search { query, json } => {
            if json {
                let results = matcher::search(&store, query.trim());
                println!("{}", serde_json::to_string_pretty(&results)?);
            } else if let Some(card) = Session::new(&store).submit(&query) {
                print!("{}", card);
            }
        }
        Commands::Cpr => {
            let [brief, detailed] = advice::cpr_cards(&store);
            print!("{}", brief);
            println!();
            print!("{}", detailed);
        }
        Commands::Contacts => {
            print!("{}", advice::contacts_card(&store));
        }
        Commands::Category { name } => {
            print!("{}", advice::category_card(&store, name));
        }
        Commands::Classify {
            frame,
            width,
            height,
            json,
        } => {
            let (width, height) = frame_dims(&cfg, width, height)?;
            run_classify(&frame, width, height, json).await?;
        }
        Commands::Identify {
            frame,
            width,
            height,
        } => {
            let (width, height) = frame_dims(&cfg, width, height)?;
            run_identify(&store, frame, width, height).await;
        }
        Commands::Voice => {
            run_voice(&store, &cfg).await;
        }
        Commands::Sources => {
            sources::list_sources(&store)?;
        }
    }

    Ok(())
}

fn frame_dims(cfg: &Config, width: Option<u32>, height: Option<u32>) -> Result<(u32, u32)> {
    match (width.or(cfg.camera.width), height.or(cfg.camera.height)) {
        (Some(w), Some(h)) => Ok((w, h)),
        _ => bail!("frame dimensions required: pass --width and --height or set [camera] in config"),
    }
}

async fn run_classify(path: &Path, width: u32, height: u32, json: bool) -> Result<()> {
    let data = tokio::fs::read(path)
        .await
        .with_context(|| format!("Failed to read frame: {}", path.display()))?;
    let frame = Frame::new(width, height, data)?;
    let analysis = classifier::analyze(frame.pixels());

    if json {
        println!("{}", serde_json::to_string_pretty(&analysis)?);
    } else {
        println!("green pixels: {} / {}", analysis.green, analysis.total);
        println!(
            "ratio:        {:.4} (threshold > {})",
            analysis.ratio, PLANT_RATIO_THRESHOLD
        );
        println!(
            "plant-like:   {}",
            if analysis.plant_like { "yes" } else { "no" }
        );
    }
    Ok(())
}

async fn run_identify(store: &KnowledgeStore, frame: PathBuf, width: u32, height: u32) {
    let mut camera = FileCamera::new(frame, width, height);
    let mut session = Session::new(store);

    let card = match session.start_camera(&mut camera).await {
        Ok(()) => session.capture_and_identify(&mut camera).await,
        Err(card) => card,
    };
    print!("{}", card);

    session.close(Some(&mut camera as &mut dyn CameraService));
}

async fn run_voice(store: &KnowledgeStore, cfg: &Config) {
    let transcriber: Box<dyn TranscriptionService> = match &cfg.voice.command {
        Some(argv) => Box::new(CommandTranscriber::new(argv.clone())),
        None => Box::new(UnsupportedTranscriber),
    };

    let mut session = Session::new(store);
    match session
        .record_voice(transcriber.as_ref(), &cfg.voice.lang)
        .await
    {
        Some(card) => print!("{}", card),
        None => println!("Nothing was heard."),
    }
    session.close(None);
}
