//! Flashcards · terminal vocabulary trainer
//!
//! - Loads word/meaning lists from JSON files
//! - Memorize Mode (three-stage mastery), Learn Mode (practice), Test Mode (scored)
//!
//! Important env variables:
//!   WORDLISTS_DIR        : wordlist directory (default "wordlists")
//!   TRAINER_SEED         : fixed RNG seed for reproducible sessions
//!   TRAINER_CONFIG_PATH  : path to TOML config (see `config::TrainerConfig`)
//!   LOG_LEVEL            : tracing filter, e.g. "debug" or full directives
//!   LOG_FORMAT           : "pretty" (default) or "json"
//!   NO_COLOR             : disable coloured output

mod app;
mod config;
mod console;
mod domain;
mod learn;
mod memorize;
mod quiz;
mod telemetry;
mod util;
mod wordlist;

use std::path::PathBuf;

use clap::Parser;
use rand::{rngs::StdRng, SeedableRng};
use tracing::info;

use crate::app::App;
use crate::config::{load_config, Overrides};
use crate::console::Console;
use crate::wordlist::WordlistManager;

#[derive(Parser)]
#[command(name = "flashcards", about = "Flashcard trainer for the terminal", version)]
struct Cli {
  /// TOML config file (overrides TRAINER_CONFIG_PATH)
  #[arg(long)]
  config: Option<PathBuf>,

  /// Directory holding the JSON wordlists
  #[arg(long, env = "WORDLISTS_DIR")]
  wordlists: Option<PathBuf>,

  /// Seed for all random choices
  #[arg(long, env = "TRAINER_SEED")]
  seed: Option<u64>,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
  let cli = Cli::parse();
  telemetry::init_tracing();

  let config = load_config(cli.config.as_deref())
    .with_overrides(Overrides { wordlists_dir: cli.wordlists, seed: cli.seed });

  let manager = WordlistManager::new(&config.wordlists_dir)?;
  let rng = match config.seed {
    Some(seed) => StdRng::seed_from_u64(seed),
    None => StdRng::from_entropy(),
  };
  info!(
    target: "flashcards",
    dir = %config.wordlists_dir.display(),
    seeded = config.seed.is_some(),
    "Starting flashcard trainer"
  );

  let console = Console::stdio(&config.cancel_keyword);
  let mut app = App::new(console, manager, config, rng);
  app.run();
  Ok(())
}
