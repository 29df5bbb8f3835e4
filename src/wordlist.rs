//! Wordlist discovery and loading.
//!
//! A wordlist is a JSON object mapping word → meaning:
//!
//! ```json
//! { "hello": "hola", "goodbye": "adiós" }
//! ```
//!
//! Files may sit directly in the wordlists directory (`spanish.json` → "spanish")
//! or one folder down (`dutch/a2.json` → "dutch/a2"). Pairs keep file order.

use std::path::{Path, PathBuf};

use serde_json::Value;
use thiserror::Error;
use tracing::{debug, info, instrument, warn};

use crate::domain::{WordPair, Wordlist};

#[derive(Debug, Error)]
pub enum WordlistError {
  #[error("wordlist '{0}' not found")]
  NotFound(String),
  #[error("failed to read wordlist '{name}': {source}")]
  Io { name: String, #[source] source: std::io::Error },
  #[error("invalid JSON in '{name}.json': {source}")]
  Json { name: String, #[source] source: serde_json::Error },
  #[error("invalid format in '{0}.json': expected an object of word/meaning pairs")]
  NotAnObject(String),
  #[error("invalid entry '{key}' in '{name}.json': word and meaning must be non-empty strings")]
  InvalidEntry { name: String, key: String },
  #[error("wordlist '{0}' is empty")]
  Empty(String),
}

pub struct WordlistManager {
  dir: PathBuf,
}

impl WordlistManager {
  /// Use `dir` as the wordlist root, creating it if missing.
  pub fn new(dir: impl Into<PathBuf>) -> std::io::Result<Self> {
    let dir = dir.into();
    if !dir.exists() {
      std::fs::create_dir_all(&dir)?;
      info!(target: "wordlist", dir = %dir.display(), "Created wordlists directory");
    }
    Ok(Self { dir })
  }

  pub fn dir(&self) -> &Path { &self.dir }

  /// Sorted names of all wordlists in the root and its direct subfolders.
  #[instrument(level = "debug", skip(self), fields(dir = %self.dir.display()))]
  pub fn available(&self) -> Vec<String> {
    let mut names = Vec::new();
    let entries = match std::fs::read_dir(&self.dir) {
      Ok(e) => e,
      Err(e) => {
        warn!(target: "wordlist", error = %e, "Cannot scan wordlists directory");
        return names;
      }
    };
    for entry in entries.flatten() {
      let path = entry.path();
      if path.is_dir() {
        let Some(folder) = path.file_name().and_then(|s| s.to_str()) else { continue };
        for stem in json_stems(&path) {
          names.push(format!("{folder}/{stem}"));
        }
      } else if let Some(stem) = json_stem(&path) {
        names.push(stem);
      }
    }
    names.sort();
    debug!(target: "wordlist", count = names.len(), "Scanned wordlists");
    names
  }

  /// Map a menu choice to a wordlist name: a 1-based index into `names`
  /// or a case-insensitive exact name.
  pub fn resolve(names: &[String], choice: &str) -> Option<String> {
    let choice = choice.trim();
    if !choice.is_empty() && choice.chars().all(|c| c.is_ascii_digit()) {
      let n: usize = choice.parse().ok()?;
      return n.checked_sub(1).and_then(|i| names.get(i)).cloned();
    }
    let lower = choice.to_lowercase();
    names.iter().find(|n| n.to_lowercase() == lower).cloned()
  }

  #[instrument(level = "info", skip(self))]
  pub fn load(&self, name: &str) -> Result<Wordlist, WordlistError> {
    let path = self.dir.join(format!("{name}.json"));
    if !path.is_file() {
      return Err(WordlistError::NotFound(name.to_string()));
    }
    let text = std::fs::read_to_string(&path)
      .map_err(|source| WordlistError::Io { name: name.to_string(), source })?;
    let wordlist = parse_wordlist(name, &text)?;
    info!(target: "wordlist", %name, pairs = wordlist.pairs.len(), "Loaded wordlist");
    Ok(wordlist)
  }
}

/// Parse wordlist JSON text into pairs, preserving key order.
pub fn parse_wordlist(name: &str, text: &str) -> Result<Wordlist, WordlistError> {
  let value: Value = serde_json::from_str(text)
    .map_err(|source| WordlistError::Json { name: name.to_string(), source })?;
  let Value::Object(map) = value else {
    return Err(WordlistError::NotAnObject(name.to_string()));
  };

  let mut pairs = Vec::with_capacity(map.len());
  for (word, meaning) in map {
    match meaning {
      Value::String(m) if !word.trim().is_empty() && !m.trim().is_empty() => {
        pairs.push(WordPair::new(word, m));
      }
      _ => return Err(WordlistError::InvalidEntry { name: name.to_string(), key: word }),
    }
  }
  if pairs.is_empty() {
    return Err(WordlistError::Empty(name.to_string()));
  }
  Ok(Wordlist { name: name.to_string(), pairs })
}

fn json_stem(path: &Path) -> Option<String> {
  if path.extension().and_then(|e| e.to_str()) != Some("json") {
    return None;
  }
  path.file_stem().and_then(|s| s.to_str()).map(str::to_string)
}

fn json_stems(dir: &Path) -> Vec<String> {
  match std::fs::read_dir(dir) {
    Ok(entries) => entries
      .flatten()
      .map(|e| e.path())
      .filter(|p| p.is_file())
      .filter_map(|p| json_stem(&p))
      .collect(),
    Err(_) => Vec::new(),
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use std::fs;

  fn names(v: &[&str]) -> Vec<String> { v.iter().map(|s| s.to_string()).collect() }

  #[test]
  fn pairs_keep_file_order() {
    let wl = parse_wordlist("t", r#"{"zebra": "cebra", "apple": "manzana", "moon": "luna"}"#).expect("parse");
    let words: Vec<_> = wl.pairs.iter().map(|p| p.word.as_str()).collect();
    assert_eq!(words, ["zebra", "apple", "moon"]);
    assert_eq!(wl.pairs[1].meaning, "manzana");
  }

  #[test]
  fn rejects_non_object_and_empty() {
    assert!(matches!(parse_wordlist("t", "[1, 2]"), Err(WordlistError::NotAnObject(_))));
    assert!(matches!(parse_wordlist("t", "{}"), Err(WordlistError::Empty(_))));
    assert!(matches!(parse_wordlist("t", "{"), Err(WordlistError::Json { .. })));
  }

  #[test]
  fn rejects_non_string_or_blank_meanings() {
    match parse_wordlist("t", r#"{"one": 1}"#) {
      Err(WordlistError::InvalidEntry { key, .. }) => assert_eq!(key, "one"),
      other => panic!("unexpected: {other:?}"),
    }
    assert!(matches!(parse_wordlist("t", r#"{"two": "  "}"#), Err(WordlistError::InvalidEntry { .. })));
  }

  #[test]
  fn lists_root_and_subfolder_files_sorted() {
    let tmp = tempfile::tempdir().expect("tempdir");
    fs::write(tmp.path().join("spanish.json"), "{}").unwrap();
    fs::write(tmp.path().join("notes.txt"), "x").unwrap();
    fs::create_dir(tmp.path().join("dutch")).unwrap();
    fs::write(tmp.path().join("dutch").join("a2.json"), "{}").unwrap();

    let mgr = WordlistManager::new(tmp.path()).expect("manager");
    assert_eq!(mgr.available(), names(&["dutch/a2", "spanish"]));
  }

  #[test]
  fn creates_missing_directory() {
    let tmp = tempfile::tempdir().expect("tempdir");
    let dir = tmp.path().join("lists");
    let mgr = WordlistManager::new(&dir).expect("manager");
    assert!(dir.is_dir());
    assert!(mgr.available().is_empty());
  }

  #[test]
  fn loads_from_subfolder() {
    let tmp = tempfile::tempdir().expect("tempdir");
    fs::create_dir(tmp.path().join("dutch")).unwrap();
    fs::write(tmp.path().join("dutch").join("a2.json"), r#"{"huis": "house"}"#).unwrap();
    let mgr = WordlistManager::new(tmp.path()).expect("manager");

    let wl = mgr.load("dutch/a2").expect("load");
    assert_eq!(wl.name, "dutch/a2");
    assert_eq!(wl.pairs, vec![WordPair::new("huis", "house")]);
    assert!(matches!(mgr.load("missing"), Err(WordlistError::NotFound(_))));
  }

  #[test]
  fn resolves_by_number_or_name() {
    let list = names(&["dutch/a2", "Spanish"]);
    assert_eq!(WordlistManager::resolve(&list, "1").as_deref(), Some("dutch/a2"));
    assert_eq!(WordlistManager::resolve(&list, "spanish").as_deref(), Some("Spanish"));
    assert_eq!(WordlistManager::resolve(&list, "0"), None);
    assert_eq!(WordlistManager::resolve(&list, "3"), None);
    assert_eq!(WordlistManager::resolve(&list, "french"), None);
  }
}
