//! Memorize Mode: progressive three-stage mastery scheduler.
//!
//! Every word moves Unseen → TypeBoth → WordToMeaning → MeaningToWord → Complete.
//! A session is a sequence of runs. Each run:
//!   1) introduces up to `INTRO_BATCH` unseen words (random, no replacement),
//!   2) builds one question per active word at its current stage, shuffles,
//!      keeps the first `RUN_SIZE`,
//!   3) asks them in order; correct answers advance the word, wrong answers
//!      keep it where it is.
//!
//! Terminal I/O lives behind `MemorizeIo`; randomness is injected.

use std::collections::BTreeSet;

use rand::seq::SliceRandom;
use rand::Rng;
use tracing::{debug, info, instrument};
use uuid::Uuid;

use crate::domain::{Stage, WordPair};
use crate::util::{answers_match, percentage};

/// New words introduced at the start of each run.
pub const INTRO_BATCH: usize = 10;
/// Questions asked per run.
pub const RUN_SIZE: usize = 10;

/// One question instance: a word index at a stage.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Question {
  pub word: usize,
  pub stage: Stage,
}

/// Answer from the interaction boundary: typed text or a cancellation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Reply<T> {
  Answer(T),
  Cancel,
}

/// Graded outcome of one question.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Verdict {
  Correct,
  Incorrect,
  Cancel,
}

/// Which parts of an answer were right. `None` means the part was not asked.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct AnswerCheck {
  pub stage: Stage,
  pub word_ok: Option<bool>,
  pub meaning_ok: Option<bool>,
}

impl AnswerCheck {
  pub fn is_correct(&self) -> bool {
    self.word_ok.unwrap_or(true) && self.meaning_ok.unwrap_or(true)
  }
}

/// Counts shown after each run.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ProgressReport {
  pub type_both: usize,
  pub word_to_meaning: usize,
  pub meaning_to_word: usize,
  pub complete: usize,
  pub total: usize,
}

impl ProgressReport {
  pub fn percent_complete(&self) -> f64 {
    percentage(self.complete, self.total)
  }
}

/// Snapshot of every word's stage, indexed like the pair list.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MasteryState {
  stages: Vec<Stage>,
}

impl MasteryState {
  fn new(n: usize) -> Self {
    Self { stages: vec![Stage::Unseen; n] }
  }

  #[cfg(test)]
  pub fn stage(&self, word: usize) -> Option<Stage> {
    self.stages.get(word).copied()
  }

  #[cfg(test)]
  pub fn stages(&self) -> &[Stage] { &self.stages }

  pub fn count(&self, stage: Stage) -> usize {
    self.stages.iter().filter(|s| **s == stage).count()
  }

  pub fn report(&self) -> ProgressReport {
    ProgressReport {
      type_both: self.count(Stage::TypeBoth),
      word_to_meaning: self.count(Stage::WordToMeaning),
      meaning_to_word: self.count(Stage::MeaningToWord),
      complete: self.count(Stage::Complete),
      total: self.stages.len(),
    }
  }
}

/// How a session ended.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Completion {
  /// Every word reached `Stage::Complete`.
  Mastered,
  /// The cancellation keyword was entered mid-run.
  Cancelled,
  /// The user declined to continue between runs.
  Paused,
}

#[derive(Clone, Debug)]
pub struct SessionOutcome {
  pub completion: Completion,
  pub state: MasteryState,
  pub runs: usize,
}

impl SessionOutcome {
  pub fn is_full(&self) -> bool { self.completion == Completion::Mastered }
}

/// Result of processing one run's question list.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RunEnd {
  Finished,
  Cancelled { answered: usize },
}

/// Terminal side of Memorize Mode. Display hooks default to no-ops.
pub trait MemorizeIo {
  fn present_type_both(&mut self, word: &str, meaning: &str) -> Reply<(String, String)>;
  fn present_word_to_meaning(&mut self, word: &str) -> Reply<String>;
  fn present_meaning_to_word(&mut self, meaning: &str) -> Reply<String>;
  fn show_progress(&mut self, report: &ProgressReport);
  fn ask_continue(&mut self) -> bool;

  fn begin_run(&mut self, _run: usize) {}
  fn begin_question(&mut self, _position: usize, _total: usize, _stage: Stage) {}
  fn show_feedback(&mut self, _pair: &WordPair, _check: &AnswerCheck) {}
  fn session_finished(&mut self, _completion: Completion) {}
}

pub struct MasteryScheduler<'a, R: Rng> {
  pairs: &'a [WordPair],
  state: MasteryState,
  pool: BTreeSet<usize>,
  not_yet_introduced: BTreeSet<usize>,
  last_failed: Option<Question>,
  runs: usize,
  rng: R,
}

impl<'a, R: Rng> MasteryScheduler<'a, R> {
  pub fn new(pairs: &'a [WordPair], rng: R) -> Self {
    Self {
      pairs,
      state: MasteryState::new(pairs.len()),
      pool: BTreeSet::new(),
      not_yet_introduced: (0..pairs.len()).collect(),
      last_failed: None,
      runs: 0,
      rng,
    }
  }

  #[cfg(test)]
  pub fn state(&self) -> &MasteryState { &self.state }
  #[cfg(test)]
  pub fn pool(&self) -> &BTreeSet<usize> { &self.pool }
  #[cfg(test)]
  pub fn not_yet_introduced(&self) -> &BTreeSet<usize> { &self.not_yet_introduced }
  #[cfg(test)]
  pub fn last_failed(&self) -> Option<Question> { self.last_failed }

  pub fn is_complete(&self) -> bool {
    self.pool.is_empty() && self.not_yet_introduced.is_empty()
  }

  /// Drive runs until everything is memorized, the user cancels, or declines
  /// to continue. State is kept as-is on early exit, and the progress
  /// report follows the early-exit notice.
  #[instrument(level = "info", target = "memorize", skip_all, fields(session = %Uuid::new_v4(), words = self.pairs.len()))]
  pub fn run_session<IO: MemorizeIo>(&mut self, io: &mut IO) -> SessionOutcome {
    let completion = loop {
      if self.is_complete() {
        break Completion::Mastered;
      }
      self.introduce_new_words();
      let questions = self.prepare_run_questions(self.last_failed);
      if questions.is_empty() {
        break Completion::Mastered;
      }
      self.runs += 1;
      io.begin_run(self.runs);

      if let RunEnd::Cancelled { answered } = self.execute_run(&questions, io) {
        debug!(target: "memorize", run = self.runs, answered, "Run cancelled");
        break Completion::Cancelled;
      }
      let report = self.state.report();
      io.show_progress(&report);
      info!(
        target: "memorize",
        run = self.runs,
        complete = report.complete,
        total = report.total,
        pool = self.pool.len(),
        "Run finished"
      );

      if self.is_complete() {
        break Completion::Mastered;
      }
      if !io.ask_continue() {
        break Completion::Paused;
      }
    };

    info!(target: "memorize", ?completion, runs = self.runs, "Session ended");
    io.session_finished(completion);
    if completion != Completion::Mastered {
      io.show_progress(&self.state.report());
    }
    SessionOutcome { completion, state: self.state.clone(), runs: self.runs }
  }

  /// Move up to `INTRO_BATCH` random unseen words into the pool at TypeBoth.
  /// Returns the indices introduced.
  pub fn introduce_new_words(&mut self) -> Vec<usize> {
    let take = INTRO_BATCH.min(self.not_yet_introduced.len());
    if take == 0 {
      return Vec::new();
    }
    let candidates: Vec<usize> = self.not_yet_introduced.iter().copied().collect();
    let chosen: Vec<usize> = candidates.choose_multiple(&mut self.rng, take).copied().collect();
    for &word in &chosen {
      self.not_yet_introduced.remove(&word);
      self.pool.insert(word);
      self.state.stages[word] = Stage::TypeBoth;
    }
    debug!(target: "memorize", introduced = chosen.len(), remaining = self.not_yet_introduced.len(), "Introduced new words");
    chosen
  }

  /// One question per pool word at its current stage, shuffled, capped at
  /// `RUN_SIZE`. If the first question repeats `last`, swap the first two.
  pub fn prepare_run_questions(&mut self, last: Option<Question>) -> Vec<Question> {
    let mut questions: Vec<Question> = self
      .pool
      .iter()
      .map(|&word| Question { word, stage: self.state.stages[word] })
      .collect();
    questions.shuffle(&mut self.rng);
    questions.truncate(RUN_SIZE);
    debug_assert!(questions.iter().all(|q| q.stage.is_active()));
    avoid_immediate_repeat(&mut questions, last);
    questions
  }

  /// Ask each question in order and apply the verdicts. Stops at the first
  /// cancellation without touching that question's word.
  pub fn execute_run<IO: MemorizeIo>(&mut self, questions: &[Question], io: &mut IO) -> RunEnd {
    for (i, &q) in questions.iter().enumerate() {
      io.begin_question(i + 1, questions.len(), q.stage);
      match self.ask(q, io) {
        Verdict::Correct => self.advance(q),
        Verdict::Incorrect => self.last_failed = Some(q),
        Verdict::Cancel => return RunEnd::Cancelled { answered: i },
      }
    }
    RunEnd::Finished
  }

  fn ask<IO: MemorizeIo>(&self, q: Question, io: &mut IO) -> Verdict {
    let pair = &self.pairs[q.word];
    let check = match q.stage {
      Stage::TypeBoth => match io.present_type_both(&pair.word, &pair.meaning) {
        Reply::Answer((word, meaning)) => AnswerCheck {
          stage: q.stage,
          word_ok: Some(answers_match(&word, &pair.word)),
          meaning_ok: Some(answers_match(&meaning, &pair.meaning)),
        },
        Reply::Cancel => return Verdict::Cancel,
      },
      Stage::WordToMeaning => match io.present_word_to_meaning(&pair.word) {
        Reply::Answer(meaning) => AnswerCheck {
          stage: q.stage,
          word_ok: None,
          meaning_ok: Some(answers_match(&meaning, &pair.meaning)),
        },
        Reply::Cancel => return Verdict::Cancel,
      },
      Stage::MeaningToWord => match io.present_meaning_to_word(&pair.meaning) {
        Reply::Answer(word) => AnswerCheck {
          stage: q.stage,
          word_ok: Some(answers_match(&word, &pair.word)),
          meaning_ok: None,
        },
        Reply::Cancel => return Verdict::Cancel,
      },
      // Pool words are always at an active stage.
      Stage::Unseen | Stage::Complete => return Verdict::Incorrect,
    };
    io.show_feedback(pair, &check);
    if check.is_correct() { Verdict::Correct } else { Verdict::Incorrect }
  }

  fn advance(&mut self, q: Question) {
    let next = q.stage.advance();
    self.state.stages[q.word] = next;
    if next == Stage::Complete {
      self.pool.remove(&q.word);
      debug!(target: "memorize", word = q.word, "Word memorized");
    }
  }
}

/// Swap the first two questions if the first one equals `last`.
/// Single attempt only; the new first question is not re-checked.
pub fn avoid_immediate_repeat(questions: &mut [Question], last: Option<Question>) {
  if let Some(last) = last {
    if questions.len() > 1 && questions[0] == last {
      questions.swap(0, 1);
    }
  }
}
