//! Test Mode: a scored pass over a random sample of distinct pairs.

use rand::seq::SliceRandom;
use rand::Rng;
use tracing::{info, instrument};

use crate::domain::{Direction, WordPair};
use crate::memorize::Reply;
use crate::util::{answers_match, percentage};

pub trait QuizIo {
  fn ask(&mut self, position: usize, total: usize, direction: Direction, shown: &str) -> Reply<String>;
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct QuizResult {
  pub position: usize,
  pub direction: Direction,
  pub shown: String,
  pub given: String,
  pub expected: String,
  pub correct: bool,
  pub pair: WordPair,
}

#[derive(Clone, Debug)]
pub struct QuizReport {
  pub direction: Direction,
  /// Questions planned; `results` is shorter if the quiz was cancelled.
  pub planned: usize,
  pub results: Vec<QuizResult>,
}

/// Colour band for a score.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Grade {
  Excellent,
  Fair,
  Poor,
}

impl QuizReport {
  pub fn answered(&self) -> usize { self.results.len() }
  pub fn correct(&self) -> usize { self.results.iter().filter(|r| r.correct).count() }
  pub fn percentage(&self) -> f64 { percentage(self.correct(), self.answered()) }
  pub fn was_cancelled(&self) -> bool { self.answered() < self.planned }

  pub fn wrong(&self) -> impl Iterator<Item = &QuizResult> {
    self.results.iter().filter(|r| !r.correct)
  }

  pub fn grade(&self) -> Grade {
    let pct = self.percentage();
    if pct >= 90.0 {
      Grade::Excellent
    } else if pct >= 70.0 {
      Grade::Fair
    } else {
      Grade::Poor
    }
  }
}

/// Largest question count allowed for a list of `n` pairs.
pub fn max_questions(n: usize, cap: usize) -> usize {
  n.min(cap)
}

/// Parse a typed question count, accepting `1..=max`.
pub fn parse_count(input: &str, max: usize) -> Option<usize> {
  input.trim().parse::<usize>().ok().filter(|n| (1..=max).contains(n))
}

#[instrument(level = "info", target = "quiz", skip_all, fields(words = pairs.len(), count = count, direction = ?direction))]
pub fn run_quiz<R: Rng, IO: QuizIo>(
  pairs: &[WordPair],
  count: usize,
  direction: Direction,
  rng: &mut R,
  io: &mut IO,
) -> QuizReport {
  let picked: Vec<&WordPair> = pairs.choose_multiple(rng, count.min(pairs.len())).collect();
  let planned = picked.len();
  let mut results = Vec::with_capacity(planned);

  for (i, pair) in picked.into_iter().enumerate() {
    let dir = direction.pick(rng);
    let (shown, expected) = dir.sides(pair);
    let given = match io.ask(i + 1, planned, dir, shown) {
      Reply::Answer(a) => a,
      Reply::Cancel => break,
    };
    results.push(QuizResult {
      position: i + 1,
      direction: dir,
      shown: shown.to_string(),
      correct: answers_match(&given, expected),
      given,
      expected: expected.to_string(),
      pair: pair.clone(),
    });
  }

  let report = QuizReport { direction, planned, results };
  info!(target: "quiz", correct = report.correct(), answered = report.answered(), planned, "Quiz finished");
  report
}
