//! Terminal front end: menus, prompts, feedback and reports.
//!
//! `Console` is generic over its input and output so the whole interaction
//! can be driven from a script. Reads are trimmed; the cancellation keyword
//! and end of input both come back as `Reply::Cancel`. Write failures are
//! logged and otherwise ignored.

use std::fmt::Display;
use std::io::{self, BufRead, Stdout, StdinLock, Write};

use crossterm::style::Stylize;
use tracing::{debug, warn};

use crate::domain::{Direction, Stage, WordPair};
use crate::learn::{Field, LearnIo, PracticeSummary};
use crate::memorize::{AnswerCheck, Completion, MemorizeIo, ProgressReport, Reply};
use crate::quiz::{Grade, QuizIo, QuizReport};
use crate::util::is_cancel_keyword;

const RULE_WIDTH: usize = 50;
const EARLY_EXIT_NOTICE: &str = "Session ended. Progress is kept for this session only.";

pub struct Console<R, W> {
  input: R,
  out: W,
  cancel_keyword: String,
}

impl Console<StdinLock<'static>, Stdout> {
  pub fn stdio(cancel_keyword: &str) -> Self {
    Self::new(io::stdin().lock(), io::stdout(), cancel_keyword)
  }
}

impl<R: BufRead, W: Write> Console<R, W> {
  pub fn new(input: R, out: W, cancel_keyword: &str) -> Self {
    Self { input, out, cancel_keyword: cancel_keyword.to_string() }
  }

  #[cfg(test)]
  pub fn into_output(self) -> W { self.out }

  // -------- Low-level output/input --------

  pub fn line(&mut self, text: impl Display) {
    if let Err(e) = writeln!(self.out, "{text}") {
      warn!(target: "console", error = %e, "Failed to write to terminal");
    }
  }

  pub fn blank(&mut self) { self.line(""); }

  pub fn rule(&mut self) { self.line("=".repeat(RULE_WIDTH).cyan()); }

  pub fn banner(&mut self, title: &str) {
    self.blank();
    self.rule();
    self.line(centered(title).bold().cyan());
    self.rule();
  }

  /// Prompt and read one trimmed line. `None` on end of input or read error.
  pub fn read_line(&mut self, prompt: &str) -> Option<String> {
    let written = write!(self.out, "{}", prompt.magenta()).and_then(|_| self.out.flush());
    if let Err(e) = written {
      warn!(target: "console", error = %e, "Failed to write prompt");
    }
    let mut buf = String::new();
    match self.input.read_line(&mut buf) {
      Ok(0) => {
        debug!(target: "console", "End of input");
        None
      }
      Ok(_) => Some(buf.trim().to_string()),
      Err(e) => {
        warn!(target: "console", error = %e, "Failed to read from terminal");
        None
      }
    }
  }

  /// Read an answer, turning the cancellation keyword into `Reply::Cancel`.
  pub fn ask(&mut self, prompt: &str) -> Reply<String> {
    match self.read_line(prompt) {
      Some(s) if is_cancel_keyword(&s, &self.cancel_keyword) => Reply::Cancel,
      Some(s) => Reply::Answer(s),
      None => Reply::Cancel,
    }
  }

  /// Lower-cased menu choice; `None` on end of input.
  pub fn choice(&mut self, prompt: &str) -> Option<String> {
    self.read_line(prompt).map(|s| s.to_lowercase())
  }

  pub fn pause(&mut self, prompt: &str) {
    let _ = self.read_line(prompt);
  }

  pub fn error(&mut self, text: impl Display) {
    self.line(format!("❌ {text}").red());
  }

  // -------- Menus and screens --------

  pub fn welcome(&mut self) {
    self.blank();
    self.rule();
    self.line(centered("Welcome to Flashcard Learning Application!").bold().cyan());
    self.rule();
  }

  pub fn header(&mut self) {
    self.banner("FLASHCARD LEARNING APPLICATION");
  }

  pub fn goodbye(&mut self) {
    self.line("\nThank you for using Flashcard Learning Application!".yellow());
    self.line("Goodbye! 👋".bold().green());
  }

  pub fn no_wordlists(&mut self, dir: &str) {
    self.blank();
    self.error("No wordlists found!");
    self.line(format!("Please add JSON files to the '{dir}' directory."));
    self.line("\nExample format (spanish.json):");
    self.line("{\n  \"hello\": \"hola\",\n  \"goodbye\": \"adiós\"\n}");
  }

  pub fn wordlist_menu(&mut self, names: &[String]) {
    self.line("\nAvailable Word Lists:".bold());
    self.line("-".repeat(RULE_WIDTH));
    for (i, name) in names.iter().enumerate() {
      self.line(format!("  {} {}", format!("{}.", i + 1).yellow(), name.as_str().cyan()));
    }
    self.line("-".repeat(RULE_WIDTH));
  }

  pub fn wordlist_loaded(&mut self, name: &str, pairs: usize) {
    self.line(format!("\n✓ Loaded '{name}' with {pairs} word pairs.").bold().green());
  }

  fn numbered_menu(&mut self, title: &str, items: &[&str]) {
    self.banner(title);
    for (i, item) in items.iter().enumerate() {
      self.line(format!("  {} {}", format!("{}.", i + 1).yellow(), item));
    }
    self.rule();
  }

  pub fn mode_menu(&mut self) {
    self.numbered_menu(
      "SELECT MODE",
      &[
        "Memorize Mode - Master all words",
        "Learn Mode - Practice with feedback",
        "Test Mode - Scored assessment",
        "Back to wordlist selection",
        "Quit application",
      ],
    );
  }

  pub fn learn_menu(&mut self) {
    self.numbered_menu("LEARN MODE OPTIONS", &["Word → Meaning", "Meaning → Word", "Random", "Back to main menu"]);
  }

  pub fn test_direction_menu(&mut self) {
    self.banner("TEST MODE");
    self.line("\nSelect Test Direction:".bold());
    for (i, item) in [
      "Word → Meaning (you see the word, type the meaning)",
      "Meaning → Word (you see the meaning, type the word)",
      "Random (questions in random directions)",
      "Back to menu",
    ]
    .iter()
    .enumerate()
    {
      self.line(format!("  {} {}", format!("{}.", i + 1).yellow(), item));
    }
    self.rule();
  }

  pub fn test_size(&mut self, words: usize, max: usize) {
    self.line(format!("\nWordlist size: {} words", words.to_string().cyan()));
    self.line(format!("Maximum questions: {}", max.to_string().cyan()));
  }

  // -------- Learn Mode screens --------

  pub fn practice_start(&mut self) {
    self.blank();
    self.rule();
    self.line("  Starting practice session!".bold().cyan());
    self.line(format!("  Type '{}' at any time to return to learn menu", self.cancel_keyword).yellow());
    self.rule();
    self.blank();
  }

  pub fn practice_end(&mut self, summary: &PracticeSummary) {
    if summary.asked > 0 {
      self.line(format!(
        "\nAnswered {} question(s): {} correct, {} marked correct.",
        summary.asked, summary.correct, summary.overridden
      ));
    }
    self.line("Returning to learn mode menu...".yellow());
  }

  // -------- Memorize Mode screens --------

  /// Explain the stages and wait for Enter. False on end of input.
  pub fn memorize_intro(&mut self) -> bool {
    self.banner("MEMORIZE MODE");
    self.line("\nThis mode helps you fully memorize all words.".yellow());
    self.line("Each word has 3 stages:".yellow());
    self.line("  1. Type both word and meaning".yellow());
    self.line("  2. See word → type meaning".yellow());
    self.line("  3. See meaning → type word".yellow());
    self.line("\nAnswer all questions correctly to complete!".yellow());
    self.line(format!("Type '{}' at any time to quit.", self.cancel_keyword).yellow());
    self.rule();
    self.read_line("\nPress Enter to start...").is_some()
  }

  // -------- Test Mode screens --------

  pub fn quiz_report(&mut self, report: &QuizReport) {
    self.banner("TEST RESULTS");
    self.line(format!("       Mode: {}", report.direction.label().blue()).bold());
    self.rule();

    let score = format!("{}/{}", report.correct(), report.answered());
    let pct = format!("{:.1}%", report.percentage());
    let (score, pct) = match report.grade() {
      Grade::Excellent => (score.bold().green(), pct.bold().green()),
      Grade::Fair => (score.yellow(), pct.yellow()),
      Grade::Poor => (score.red(), pct.red()),
    };
    self.line(format!("\n{} {}", "Score:".bold(), score));
    self.line(format!("{} {}", "Percentage:".bold(), pct));
    if report.was_cancelled() {
      self.line(format!("(stopped after {} of {} questions)", report.answered(), report.planned).yellow());
    }

    let wrong: Vec<_> = report.wrong().cloned().collect();
    if wrong.is_empty() {
      if report.answered() > 0 {
        self.line("\n🎉 Perfect score! All answers correct!".bold().green());
      }
    } else {
      self.blank();
      self.rule();
      self.line(format!("  INCORRECT ANSWERS ({})", wrong.len()).bold().red());
      self.rule();
      self.blank();
      for r in wrong {
        self.line(format!("Question {}:", r.position).yellow());
        self.line(format!("  Asked: {} - {}", r.direction.label().cyan(), r.shown.blue()));
        self.line(format!("  Your answer: {}", r.given.red()));
        self.line(format!("  Correct answer: {}", r.expected.green()));
        self.line(format!(
          "  [Word: '{}' = Meaning: '{}']",
          r.pair.word.cyan(),
          r.pair.meaning.cyan()
        ));
        self.blank();
      }
    }
    self.rule();
  }
}

impl<R: BufRead, W: Write> MemorizeIo for Console<R, W> {
  fn present_type_both(&mut self, word: &str, meaning: &str) -> Reply<(String, String)> {
    self.line("Stage 1: Type both word and meaning".bold());
    self.line(format!("Word: {word}").blue());
    self.line(format!("Meaning: {meaning}").blue());
    self.line("Please type both to memorize them:".yellow());
    let typed_word = match self.ask("Type the word: ") {
      Reply::Answer(w) => w,
      Reply::Cancel => return Reply::Cancel,
    };
    match self.ask("Type the meaning: ") {
      Reply::Answer(m) => Reply::Answer((typed_word, m)),
      Reply::Cancel => Reply::Cancel,
    }
  }

  fn present_word_to_meaning(&mut self, word: &str) -> Reply<String> {
    self.line("Stage 2: Word → Meaning".bold());
    self.line(format!("{}: {}", "Word".bold(), word.blue()));
    self.ask("Type the meaning: ")
  }

  fn present_meaning_to_word(&mut self, meaning: &str) -> Reply<String> {
    self.line("Stage 3: Meaning → Word".bold());
    self.line(format!("{}: {}", "Meaning".bold(), meaning.blue()));
    self.ask("Type the word: ")
  }

  fn show_progress(&mut self, report: &ProgressReport) {
    self.banner("PROGRESS REPORT");
    self.line(format!("Total words: {}", report.total.to_string().cyan()));
    self.line(format!(
      "Fully memorized: {} / {}",
      report.complete.to_string().bold().green(),
      report.total.to_string().cyan()
    ));
    if report.complete < report.total {
      self.line("\nWords by stage:");
      for (stage, count) in [
        (Stage::TypeBoth, report.type_both),
        (Stage::WordToMeaning, report.word_to_meaning),
        (Stage::MeaningToWord, report.meaning_to_word),
      ] {
        self.line(format!("  Stage {} ({}): {}", stage.number(), stage.label(), count.to_string().yellow()));
      }
    }
    self.line(format!("\nCompletion: {}", format!("{:.1}%", report.percent_complete()).bold().green()));
    self.rule();
  }

  fn ask_continue(&mut self) -> bool {
    match self.choice("\nContinue to next run? [Y/n]: ") {
      Some(c) => matches!(c.as_str(), "" | "y" | "yes"),
      None => false,
    }
  }

  fn begin_run(&mut self, run: usize) {
    self.banner(&format!("RUN {run}"));
    self.blank();
  }

  fn begin_question(&mut self, position: usize, total: usize, _stage: Stage) {
    self.line(format!("Question {position}/{total}").yellow());
  }

  fn show_feedback(&mut self, pair: &WordPair, check: &AnswerCheck) {
    match check.stage {
      Stage::TypeBoth if check.is_correct() => self.line("✓ Perfect! Both correct!".bold().green()),
      Stage::TypeBoth => {
        self.line("✗ Not quite right.".bold().red());
        if check.word_ok == Some(false) {
          self.line(format!("  Word should be: {}", pair.word.as_str().green()));
        }
        if check.meaning_ok == Some(false) {
          self.line(format!("  Meaning should be: {}", pair.meaning.as_str().green()));
        }
      }
      _ if check.is_correct() => self.line("✓ Correct!".bold().green()),
      stage => {
        let expected = if stage == Stage::MeaningToWord { &pair.word } else { &pair.meaning };
        self.line(format!("{} The correct answer is: {}", "✗ Incorrect.".bold().red(), expected.as_str().green()));
      }
    }
    self.blank();
  }

  fn session_finished(&mut self, completion: Completion) {
    match completion {
      Completion::Mastered => {
        self.line("\n🎉 CONGRATULATIONS! 🎉".bold().green());
        self.line("You have successfully memorized all words!".bold().green());
        self.rule();
      }
      Completion::Cancelled | Completion::Paused => {
        self.line(format!("\n{EARLY_EXIT_NOTICE}").yellow());
      }
    }
  }
}

impl<R: BufRead, W: Write> LearnIo for Console<R, W> {
  fn ask(&mut self, direction: Direction, shown: &str) -> Reply<String> {
    self.line(format!("{}: {}", direction.shown_label().bold(), shown.blue()));
    Console::ask(self, "Your answer: ")
  }

  fn show_result(&mut self, correct: bool, expected: &str) {
    if correct {
      self.line("✓ Correct!\n".bold().green());
    } else {
      self.line(format!("{} The correct answer is: {}", "✗ Incorrect.".bold().red(), expected.green()));
    }
  }

  fn confirm_override(&mut self) -> bool {
    let yes = self.choice("Mark as correct anyway? [y/n]: ").as_deref() == Some("y");
    if yes {
      self.blank();
    } else {
      self.line("\nPlease practice typing both:".yellow());
    }
    yes
  }

  fn retype(&mut self, field: Field) -> Reply<String> {
    match field {
      Field::Word => Console::ask(self, "Type the word: "),
      Field::Meaning => Console::ask(self, "Type the meaning: "),
    }
  }

  fn show_retype_result(&mut self, field: Field, correct: bool, expected: &str) {
    if correct {
      self.line("✓ Correct!".green());
      if field == Field::Meaning {
        self.blank();
      }
    } else {
      let name = if field == Field::Word { "word" } else { "meaning" };
      self.line(format!("✗ Try again. The {name} is: {}", expected.green()).red());
    }
  }
}

impl<R: BufRead, W: Write> QuizIo for Console<R, W> {
  fn ask(&mut self, position: usize, total: usize, direction: Direction, shown: &str) -> Reply<String> {
    self.line(format!("Question {position}/{total}").yellow());
    self.line(format!("{}: {}", direction.label().bold(), shown.blue()));
    let reply = Console::ask(self, "Your answer: ");
    self.blank();
    reply
  }
}

/// Pad a title so it sits roughly in the middle of a rule.
fn centered(title: &str) -> String {
  let width = title.chars().count();
  let pad = RULE_WIDTH.saturating_sub(width) / 2;
  format!("{}{}", " ".repeat(pad), title)
}

#[cfg(test)]
mod tests {
  use super::*;
  use std::io::Cursor;

  fn console(input: &str) -> Console<Cursor<Vec<u8>>, Vec<u8>> {
    Console::new(Cursor::new(input.as_bytes().to_vec()), Vec::new(), "end session")
  }

  fn output(c: &Console<Cursor<Vec<u8>>, Vec<u8>>) -> String {
    String::from_utf8_lossy(&c.out).into_owned()
  }

  #[test]
  fn reads_are_trimmed_and_keyword_cancels() {
    let mut c = console("  hola  \nEND SESSION\n");
    assert_eq!(c.ask("> "), Reply::Answer("hola".to_string()));
    assert_eq!(c.ask("> "), Reply::Cancel);
    // End of input also cancels.
    assert_eq!(c.ask("> "), Reply::Cancel);
  }

  #[test]
  fn stage_one_stops_before_meaning_on_cancel() {
    let mut c = console("end session\nnever read\n");
    assert_eq!(c.present_type_both("hola", "hello"), Reply::Cancel);
    assert!(!output(&c).contains("Type the meaning"));
  }

  #[test]
  fn stage_one_collects_both_fields() {
    let mut c = console("Hola\nhello\n");
    assert_eq!(
      c.present_type_both("hola", "hello"),
      Reply::Answer(("Hola".to_string(), "hello".to_string()))
    );
  }

  #[test]
  fn continue_prompt_defaults_to_yes() {
    let mut c = console("\nYES\nn\n");
    assert!(c.ask_continue());
    assert!(c.ask_continue());
    assert!(!c.ask_continue());
    assert!(!c.ask_continue());
  }

  #[test]
  fn progress_report_hides_stage_counts_when_done() {
    let mut c = console("");
    c.show_progress(&ProgressReport { type_both: 1, word_to_meaning: 0, meaning_to_word: 2, complete: 1, total: 4 });
    let out = output(&c);
    assert!(out.contains("Words by stage"));
    assert!(out.contains("25.0%"));

    let mut c = console("");
    c.show_progress(&ProgressReport { type_both: 0, word_to_meaning: 0, meaning_to_word: 0, complete: 3, total: 3 });
    let out = output(&c);
    assert!(!out.contains("Words by stage"));
    assert!(out.contains("100.0%"));
  }

  #[test]
  fn stage_one_feedback_names_wrong_field() {
    let mut c = console("");
    let pair = WordPair::new("hola", "hello");
    let check = AnswerCheck { stage: Stage::TypeBoth, word_ok: Some(true), meaning_ok: Some(false) };
    c.show_feedback(&pair, &check);
    let out = output(&c);
    assert!(out.contains("Meaning should be"));
    assert!(!out.contains("Word should be"));
  }

  #[test]
  fn cancel_and_pause_share_one_notice() {
    let mut c = console("");
    c.session_finished(Completion::Cancelled);
    let cancelled = output(&c);
    let mut c = console("");
    c.session_finished(Completion::Paused);
    assert_eq!(output(&c), cancelled);
    assert!(cancelled.contains(EARLY_EXIT_NOTICE));
  }

  #[test]
  fn override_requires_exact_y() {
    let mut c = console("Y\nyes\n");
    assert!(c.confirm_override());
    assert!(!c.confirm_override());
  }

  #[test]
  fn centered_titles_fit_the_rule() {
    assert_eq!(centered("RUN 1").len(), 22 + 5);
    assert_eq!(centered(&"x".repeat(60)), "x".repeat(60));
  }
}
