//! Small utility helpers used across modules.

/// Case-insensitive comparison of a typed answer against the expected text.
/// Surrounding whitespace in the typed answer is ignored.
pub fn answers_match(typed: &str, expected: &str) -> bool {
  typed.trim().to_lowercase() == expected.to_lowercase()
}

/// True if the typed text is the session cancellation keyword.
pub fn is_cancel_keyword(typed: &str, keyword: &str) -> bool {
  answers_match(typed, keyword.trim())
}

/// `part / total * 100`, or 0 for an empty total.
pub fn percentage(part: usize, total: usize) -> f64 {
  if total == 0 { 0.0 } else { part as f64 / total as f64 * 100.0 }
}

/// Log-safe truncation for user-typed strings.
pub fn trunc_for_log(s: &str, max: usize) -> String {
  if s.chars().count() <= max {
    s.to_string()
  } else {
    let head: String = s.chars().take(max).collect();
    format!("{}… ({} chars total)", head, s.chars().count())
  }
}
