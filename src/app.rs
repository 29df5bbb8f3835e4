//! Application flow: wordlist selection, mode menu, and mode launchers.
//!
//! This module owns:
//!   - the console (terminal I/O)
//!   - the wordlist manager
//!   - the single RNG shared by every mode
//!
//! Each Memorize Mode launch starts from scratch; nothing is persisted.

use std::io::{BufRead, Write};

use rand::rngs::StdRng;
use tracing::{info, instrument, warn};

use crate::config::TrainerConfig;
use crate::console::Console;
use crate::domain::{Direction, Wordlist};
use crate::learn::run_practice;
use crate::memorize::MasteryScheduler;
use crate::quiz::{max_questions, parse_count, run_quiz};
use crate::wordlist::WordlistManager;

pub struct App<R, W> {
  console: Console<R, W>,
  manager: WordlistManager,
  config: TrainerConfig,
  rng: StdRng,
}

impl<R: BufRead, W: Write> App<R, W> {
  pub fn new(console: Console<R, W>, manager: WordlistManager, config: TrainerConfig, rng: StdRng) -> Self {
    Self { console, manager, config, rng }
  }

  /// Main loop until the user quits (or input ends).
  #[instrument(level = "info", target = "flashcards", skip_all)]
  pub fn run(&mut self) {
    self.console.welcome();
    loop {
      self.console.header();
      let Some(wordlist) = self.select_wordlist() else { break };
      if !self.select_mode(&wordlist) {
        break;
      }
    }
    self.console.goodbye();
    info!(target: "flashcards", "Exiting");
  }

  fn select_wordlist(&mut self) -> Option<Wordlist> {
    let names = self.manager.available();
    if names.is_empty() {
      let dir = self.manager.dir().display().to_string();
      self.console.no_wordlists(&dir);
      return None;
    }
    self.console.wordlist_menu(&names);

    loop {
      let choice = self.console.read_line("\nEnter wordlist name or number (or 'quit' to exit): ")?;
      if choice.eq_ignore_ascii_case("quit") {
        return None;
      }
      let Some(name) = WordlistManager::resolve(&names, &choice) else {
        if choice.chars().all(|c| c.is_ascii_digit()) && !choice.is_empty() {
          self.console.error(format!("Invalid number. Please enter a number between 1 and {}.", names.len()));
        } else {
          self.console.error(format!("Wordlist '{choice}' not found. Please enter a valid name or number."));
        }
        continue;
      };
      match self.manager.load(&name) {
        Ok(wl) => {
          self.console.wordlist_loaded(&wl.name, wl.pairs.len());
          return Some(wl);
        }
        Err(e) => {
          warn!(target: "wordlist", %name, error = %e, "Wordlist rejected");
          self.console.error(format!("Error: {e}"));
        }
      }
    }
  }

  /// Mode menu. True to pick another wordlist, false to quit.
  fn select_mode(&mut self, wordlist: &Wordlist) -> bool {
    loop {
      self.console.mode_menu();
      let Some(choice) = self.console.choice("\nYour choice: ") else { return false };
      match choice.as_str() {
        "1" => self.run_memorize(wordlist),
        "2" => self.run_learn(wordlist),
        "3" => self.run_test(wordlist),
        "4" | "back" => return true,
        "5" | "quit" => return false,
        _ => self.console.error("Invalid choice. Please enter 1, 2, 3, 4, or 5."),
      }
    }
  }

  #[instrument(level = "info", target = "flashcards", skip_all, fields(wordlist = %wordlist.name))]
  fn run_memorize(&mut self, wordlist: &Wordlist) {
    if !self.console.memorize_intro() {
      return;
    }
    let mut scheduler = MasteryScheduler::new(&wordlist.pairs, &mut self.rng);
    let outcome = scheduler.run_session(&mut self.console);
    info!(
      target: "flashcards",
      full = outcome.is_full(),
      runs = outcome.runs,
      memorized = outcome.state.report().complete,
      total = wordlist.pairs.len(),
      "Memorize session finished"
    );
  }

  fn run_learn(&mut self, wordlist: &Wordlist) {
    loop {
      self.console.learn_menu();
      let Some(choice) = self.console.choice("\nYour choice: ") else { return };
      let direction = match choice.as_str() {
        "1" => Direction::WordToMeaning,
        "2" => Direction::MeaningToWord,
        "3" => Direction::Random,
        "4" | "back" => return,
        _ => {
          self.console.error("Invalid choice. Please enter 1, 2, 3, or 4.");
          continue;
        }
      };
      self.console.practice_start();
      let summary = run_practice(&wordlist.pairs, direction, &mut self.rng, &mut self.console);
      self.console.practice_end(&summary);
    }
  }

  fn run_test(&mut self, wordlist: &Wordlist) {
    let Some(direction) = self.select_test_direction() else { return };
    let max = max_questions(wordlist.pairs.len(), self.config.max_test_questions);

    let count = loop {
      self.console.test_size(wordlist.pairs.len(), max);
      let Some(input) = self.console.read_line(&format!("\nHow many questions (1-{max}, or 'back' to cancel)? ")) else {
        return;
      };
      if input.eq_ignore_ascii_case("back") {
        return;
      }
      match parse_count(&input, max) {
        Some(n) => break n,
        None if input.parse::<usize>().is_ok() => {
          self.console.error(format!("Please enter a number between 1 and {max}."))
        }
        None => self.console.error("Invalid input. Please enter a number."),
      }
    };

    self.console.banner(&format!("TEST STARTED - {count} questions"));
    self.console.line(format!("  Mode: {}", direction.label()));
    self.console.rule();
    self.console.blank();

    let report = run_quiz(&wordlist.pairs, count, direction, &mut self.rng, &mut self.console);
    self.console.quiz_report(&report);
    self.console.pause("\nPress Enter to return to main menu...");
  }

  fn select_test_direction(&mut self) -> Option<Direction> {
    loop {
      self.console.test_direction_menu();
      match self.console.choice("\nYour choice: ")?.as_str() {
        "1" => return Some(Direction::WordToMeaning),
        "2" => return Some(Direction::MeaningToWord),
        "3" => return Some(Direction::Random),
        "4" | "back" => return None,
        _ => self.console.error("Invalid choice. Please enter 1, 2, 3, or 4."),
      }
    }
  }
}
