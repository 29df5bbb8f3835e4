//! Learn Mode: endless random practice with immediate feedback.
//!
//! A wrong answer may be waved through ("mark as correct anyway"); otherwise
//! the user re-types the word and then the meaning until both match.

use rand::seq::SliceRandom;
use rand::Rng;
use tracing::{debug, info, instrument};

use crate::domain::{Direction, WordPair};
use crate::memorize::Reply;
use crate::util::{answers_match, trunc_for_log};

/// Which side of the pair is being re-typed.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Field {
  Word,
  Meaning,
}

pub trait LearnIo {
  /// Show one side of a pair and read the answer.
  fn ask(&mut self, direction: Direction, shown: &str) -> Reply<String>;
  fn show_result(&mut self, correct: bool, expected: &str);
  /// "Mark as correct anyway?" after a wrong answer.
  fn confirm_override(&mut self) -> bool;
  fn retype(&mut self, field: Field) -> Reply<String>;
  fn show_retype_result(&mut self, field: Field, correct: bool, expected: &str);
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct PracticeSummary {
  pub asked: usize,
  pub correct: usize,
  pub overridden: usize,
}

/// Practice until the user cancels. `pairs` must not be empty.
#[instrument(level = "info", target = "learn", skip_all, fields(words = pairs.len(), direction = ?direction))]
pub fn run_practice<R: Rng, IO: LearnIo>(
  pairs: &[WordPair],
  direction: Direction,
  rng: &mut R,
  io: &mut IO,
) -> PracticeSummary {
  let mut summary = PracticeSummary::default();
  while let Some(pair) = pairs.choose(rng) {
    let dir = direction.pick(rng);
    let (shown, expected) = dir.sides(pair);

    let answer = match io.ask(dir, shown) {
      Reply::Answer(a) => a,
      Reply::Cancel => break,
    };
    summary.asked += 1;

    if answers_match(&answer, expected) {
      summary.correct += 1;
      io.show_result(true, expected);
      continue;
    }
    io.show_result(false, expected);
    debug!(target: "learn", answer = %trunc_for_log(&answer, 40), "Wrong answer");

    if io.confirm_override() {
      summary.overridden += 1;
      continue;
    }
    if !drill(io, Field::Word, &pair.word) || !drill(io, Field::Meaning, &pair.meaning) {
      break;
    }
  }
  info!(target: "learn", asked = summary.asked, correct = summary.correct, "Practice ended");
  summary
}

/// Re-type until correct. False if the user cancelled.
fn drill<IO: LearnIo>(io: &mut IO, field: Field, expected: &str) -> bool {
  loop {
    match io.retype(field) {
      Reply::Answer(a) => {
        let ok = answers_match(&a, expected);
        io.show_retype_result(field, ok, expected);
        if ok {
          return true;
        }
      }
      Reply::Cancel => return false,
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use rand::{rngs::StdRng, SeedableRng};
  use std::collections::VecDeque;

  struct Script {
    pairs: Vec<WordPair>,
    /// true = answer correctly, false = answer wrong; empty = cancel.
    answers: VecDeque<bool>,
    overrides: VecDeque<bool>,
    retypes: VecDeque<&'static str>,
    directions: Vec<Direction>,
    retyped: Vec<Field>,
    last_shown: Option<(Direction, String)>,
  }

  impl Script {
    fn new(pairs: &[WordPair]) -> Self {
      Self {
        pairs: pairs.to_vec(),
        answers: VecDeque::new(),
        overrides: VecDeque::new(),
        retypes: VecDeque::new(),
        directions: Vec::new(),
        retyped: Vec::new(),
        last_shown: None,
      }
    }

    fn current_pair(&self) -> WordPair {
      let (_, shown) = self.last_shown.as_ref().expect("asked");
      self.pairs.iter().find(|p| &p.word == shown || &p.meaning == shown).cloned().expect("pair")
    }
  }

  impl LearnIo for Script {
    fn ask(&mut self, direction: Direction, shown: &str) -> Reply<String> {
      self.directions.push(direction);
      self.last_shown = Some((direction, shown.to_string()));
      let pair = self.current_pair();
      match self.answers.pop_front() {
        Some(true) => Reply::Answer(direction.sides(&pair).1.to_uppercase()),
        Some(false) => Reply::Answer("???".into()),
        None => Reply::Cancel,
      }
    }
    fn show_result(&mut self, _correct: bool, _expected: &str) {}
    fn confirm_override(&mut self) -> bool { self.overrides.pop_front().unwrap_or(false) }
    fn retype(&mut self, field: Field) -> Reply<String> {
      self.retyped.push(field);
      let pair = self.current_pair();
      match self.retypes.pop_front() {
        Some("ok") => Reply::Answer(match field {
          Field::Word => pair.word,
          Field::Meaning => pair.meaning,
        }),
        Some(other) => Reply::Answer(other.to_string()),
        None => Reply::Cancel,
      }
    }
    fn show_retype_result(&mut self, _field: Field, _correct: bool, _expected: &str) {}
  }

  fn pairs() -> Vec<WordPair> {
    vec![WordPair::new("gato", "cat"), WordPair::new("perro", "dog"), WordPair::new("casa", "house")]
  }

  #[test]
  fn counts_correct_answers_until_cancel() {
    let p = pairs();
    let mut io = Script::new(&p);
    io.answers = VecDeque::from(vec![true, true, true]);
    let s = run_practice(&p, Direction::WordToMeaning, &mut StdRng::seed_from_u64(1), &mut io);
    assert_eq!(s, PracticeSummary { asked: 3, correct: 3, overridden: 0 });
    assert!(io.retyped.is_empty());
  }

  #[test]
  fn override_skips_retyping() {
    let p = pairs();
    let mut io = Script::new(&p);
    io.answers = VecDeque::from(vec![false]);
    io.overrides = VecDeque::from(vec![true]);
    let s = run_practice(&p, Direction::MeaningToWord, &mut StdRng::seed_from_u64(2), &mut io);
    assert_eq!(s.overridden, 1);
    assert_eq!(s.correct, 0);
    assert!(io.retyped.is_empty());
  }

  #[test]
  fn wrong_answer_drills_word_then_meaning() {
    let p = pairs();
    let mut io = Script::new(&p);
    io.answers = VecDeque::from(vec![false]);
    io.retypes = VecDeque::from(vec!["x", "ok", "ok"]);
    let s = run_practice(&p, Direction::WordToMeaning, &mut StdRng::seed_from_u64(3), &mut io);
    assert_eq!(s.asked, 1);
    assert_eq!(io.retyped, vec![Field::Word, Field::Word, Field::Meaning]);
  }

  #[test]
  fn cancel_during_drill_ends_practice() {
    let p = pairs();
    let mut io = Script::new(&p);
    io.answers = VecDeque::from(vec![false, true]);
    io.retypes = VecDeque::from(vec!["ok"]);
    let s = run_practice(&p, Direction::WordToMeaning, &mut StdRng::seed_from_u64(4), &mut io);
    assert_eq!(s.asked, 1);
    assert_eq!(io.retyped, vec![Field::Word, Field::Meaning]);
  }

  #[test]
  fn random_direction_uses_both_sides() {
    let p = pairs();
    let mut io = Script::new(&p);
    io.answers = VecDeque::from(vec![true; 40]);
    run_practice(&p, Direction::Random, &mut StdRng::seed_from_u64(5), &mut io);
    assert!(io.directions.contains(&Direction::WordToMeaning));
    assert!(io.directions.contains(&Direction::MeaningToWord));
    assert!(!io.directions.contains(&Direction::Random));
  }

  #[test]
  fn empty_list_returns_immediately() {
    let p: Vec<WordPair> = Vec::new();
    let mut io = Script::new(&p);
    let s = run_practice(&p, Direction::Random, &mut StdRng::seed_from_u64(6), &mut io);
    assert_eq!(s, PracticeSummary::default());
  }
}
