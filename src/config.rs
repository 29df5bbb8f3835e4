//! Loading trainer configuration from TOML, with command-line overrides.
//!
//! Every field is optional in the file; see `TrainerConfig` for defaults.

use std::path::{Path, PathBuf};

use serde::Deserialize;
use tracing::{error, info};

pub const DEFAULT_CANCEL_KEYWORD: &str = "end session";

#[derive(Clone, Debug, Deserialize)]
#[serde(default)]
pub struct TrainerConfig {
  /// Directory scanned for `*.json` wordlists (one level of subfolders too).
  pub wordlists_dir: PathBuf,
  /// Typing this at any prompt ends the current session.
  pub cancel_keyword: String,
  /// Upper bound for the Test Mode question count.
  pub max_test_questions: usize,
  /// Fixed RNG seed for reproducible sessions.
  pub seed: Option<u64>,
}

impl Default for TrainerConfig {
  fn default() -> Self {
    Self {
      wordlists_dir: PathBuf::from("wordlists"),
      cancel_keyword: DEFAULT_CANCEL_KEYWORD.into(),
      max_test_questions: 100,
      seed: None,
    }
  }
}

/// Values given on the command line; `Some` wins over the file.
#[derive(Clone, Debug, Default)]
pub struct Overrides {
  pub wordlists_dir: Option<PathBuf>,
  pub seed: Option<u64>,
}

impl TrainerConfig {
  pub fn with_overrides(mut self, o: Overrides) -> Self {
    if let Some(dir) = o.wordlists_dir { self.wordlists_dir = dir; }
    if let Some(seed) = o.seed { self.seed = Some(seed); }
    if self.cancel_keyword.trim().is_empty() {
      self.cancel_keyword = DEFAULT_CANCEL_KEYWORD.into();
    }
    if self.max_test_questions == 0 {
      self.max_test_questions = 1;
    }
    self
  }
}

/// Parse a TOML config document.
pub fn parse_config(s: &str) -> Result<TrainerConfig, toml::de::Error> {
  toml::from_str::<TrainerConfig>(s)
}

/// Load config from an explicit path, else from TRAINER_CONFIG_PATH.
/// On any parsing/IO error the defaults are returned.
pub fn load_config(explicit: Option<&Path>) -> TrainerConfig {
  let path = match explicit {
    Some(p) => p.to_path_buf(),
    None => match std::env::var("TRAINER_CONFIG_PATH") {
      Ok(p) => PathBuf::from(p),
      Err(_) => return TrainerConfig::default(),
    },
  };
  let shown = path.display().to_string();
  match std::fs::read_to_string(&path) {
    Ok(s) => match parse_config(&s) {
      Ok(cfg) => {
        info!(target: "flashcards", path = %shown, "Loaded trainer config (TOML)");
        cfg
      }
      Err(e) => {
        error!(target: "flashcards", path = %shown, error = %e, "Failed to parse TOML config");
        TrainerConfig::default()
      }
    },
    Err(e) => {
      error!(target: "flashcards", path = %shown, error = %e, "Failed to read TOML config file");
      TrainerConfig::default()
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn empty_document_yields_defaults() {
    let cfg = parse_config("").expect("parse");
    assert_eq!(cfg.wordlists_dir, PathBuf::from("wordlists"));
    assert_eq!(cfg.cancel_keyword, "end session");
    assert_eq!(cfg.max_test_questions, 100);
    assert!(cfg.seed.is_none());
  }

  #[test]
  fn partial_document_keeps_other_defaults() {
    let cfg = parse_config("seed = 7\ncancel_keyword = \"stop\"\n").expect("parse");
    assert_eq!(cfg.seed, Some(7));
    assert_eq!(cfg.cancel_keyword, "stop");
    assert_eq!(cfg.max_test_questions, 100);
  }

  #[test]
  fn command_line_overrides_file_values() {
    let cfg = parse_config("wordlists_dir = \"lists\"\nseed = 1\n")
      .expect("parse")
      .with_overrides(Overrides { wordlists_dir: Some("other".into()), seed: None });
    assert_eq!(cfg.wordlists_dir, PathBuf::from("other"));
    assert_eq!(cfg.seed, Some(1));
  }

  #[test]
  fn blank_cancel_keyword_falls_back() {
    let cfg = parse_config("cancel_keyword = \"  \"\nmax_test_questions = 0\n")
      .expect("parse")
      .with_overrides(Overrides::default());
    assert_eq!(cfg.cancel_keyword, DEFAULT_CANCEL_KEYWORD);
    assert_eq!(cfg.max_test_questions, 1);
  }

  #[test]
  fn missing_file_falls_back_to_defaults() {
    let cfg = load_config(Some(Path::new("/definitely/not/here.toml")));
    assert_eq!(cfg.max_test_questions, 100);
  }
}
