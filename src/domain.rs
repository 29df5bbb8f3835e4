//! Domain models: word pairs, wordlists, mastery stages and quiz directions.

use std::fmt;

/// One flashcard. Identified by its index in the owning `Wordlist`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct WordPair {
  pub word: String,
  pub meaning: String,
}

impl WordPair {
  pub fn new(word: impl Into<String>, meaning: impl Into<String>) -> Self {
    Self { word: word.into(), meaning: meaning.into() }
  }
}

/// A loaded wordlist. Pair order is the file order and never changes.
#[derive(Clone, Debug)]
pub struct Wordlist {
  pub name: String,
  pub pairs: Vec<WordPair>,
}

/// Mastery level of a single word in Memorize Mode.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub enum Stage {
  /// Not introduced yet.
  #[default]
  Unseen,
  /// Word and meaning shown, user types both.
  TypeBoth,
  /// Word shown, user types the meaning.
  WordToMeaning,
  /// Meaning shown, user types the word.
  MeaningToWord,
  /// Fully memorized.
  Complete,
}

impl Stage {
  /// The stage reached after a correct answer at `self`.
  pub fn advance(self) -> Stage {
    match self {
      Stage::Unseen => Stage::TypeBoth,
      Stage::TypeBoth => Stage::WordToMeaning,
      Stage::WordToMeaning => Stage::MeaningToWord,
      Stage::MeaningToWord | Stage::Complete => Stage::Complete,
    }
  }

  /// True for the three stages that produce questions.
  pub fn is_active(self) -> bool {
    matches!(self, Stage::TypeBoth | Stage::WordToMeaning | Stage::MeaningToWord)
  }

  pub fn number(self) -> u8 {
    match self {
      Stage::Unseen => 0,
      Stage::TypeBoth => 1,
      Stage::WordToMeaning => 2,
      Stage::MeaningToWord => 3,
      Stage::Complete => 4,
    }
  }

  pub fn label(self) -> &'static str {
    match self {
      Stage::Unseen => "Not started",
      Stage::TypeBoth => "Type both",
      Stage::WordToMeaning => "Word → Meaning",
      Stage::MeaningToWord => "Meaning → Word",
      Stage::Complete => "Memorized",
    }
  }
}

impl fmt::Display for Stage {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "Stage {}: {}", self.number(), self.label())
  }
}

/// Which side of a pair is shown in Learn and Test modes.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Direction {
  WordToMeaning,
  MeaningToWord,
  /// Re-drawn for every question.
  Random,
}

impl Direction {
  pub fn label(self) -> &'static str {
    match self {
      Direction::WordToMeaning => "Word → Meaning",
      Direction::MeaningToWord => "Meaning → Word",
      Direction::Random => "Random Direction",
    }
  }

  /// Resolve `Random` into a concrete direction.
  pub fn pick<R: rand::Rng>(self, rng: &mut R) -> Direction {
    match self {
      Direction::Random => {
        if rng.gen_bool(0.5) { Direction::WordToMeaning } else { Direction::MeaningToWord }
      }
      fixed => fixed,
    }
  }

  /// (shown, expected) for a pair. `Random` must be resolved first.
  pub fn sides(self, pair: &WordPair) -> (&str, &str) {
    match self {
      Direction::MeaningToWord => (pair.meaning.as_str(), pair.word.as_str()),
      _ => (pair.word.as_str(), pair.meaning.as_str()),
    }
  }

  /// Name of the side shown to the user.
  pub fn shown_label(self) -> &'static str {
    match self {
      Direction::MeaningToWord => "Meaning",
      _ => "Word",
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use rand::{rngs::StdRng, SeedableRng};

  #[test]
  fn stages_only_move_forward() {
    let mut s = Stage::Unseen;
    let mut seen = vec![s];
    for _ in 0..6 {
      let next = s.advance();
      assert!(next >= s);
      s = next;
      seen.push(s);
    }
    assert_eq!(s, Stage::Complete);
    assert_eq!(seen[1..5], [Stage::TypeBoth, Stage::WordToMeaning, Stage::MeaningToWord, Stage::Complete]);
  }

  #[test]
  fn only_middle_stages_are_active() {
    assert!(!Stage::Unseen.is_active());
    assert!(Stage::TypeBoth.is_active());
    assert!(Stage::MeaningToWord.is_active());
    assert!(!Stage::Complete.is_active());
  }

  #[test]
  fn random_direction_resolves_to_a_fixed_one() {
    let mut rng = StdRng::seed_from_u64(3);
    for _ in 0..20 {
      assert_ne!(Direction::Random.pick(&mut rng), Direction::Random);
    }
    assert_eq!(Direction::MeaningToWord.pick(&mut rng), Direction::MeaningToWord);
  }

  #[test]
  fn sides_follow_direction() {
    let p = WordPair::new("hond", "dog");
    assert_eq!(Direction::WordToMeaning.sides(&p), ("hond", "dog"));
    assert_eq!(Direction::MeaningToWord.sides(&p), ("dog", "hond"));
  }
}
