//! Telemetry initialization (tracing/tracing-subscriber).
//!
//! - LOG_LEVEL controls the filter (e.g. "debug" or detailed directives like
//!   "warn,memorize=debug,wordlist=info").
//! - LOG_FORMAT selects "pretty" (default) or "json" structured logs.
//! - NO_COLOR disables ANSI colours in the pretty format.
//!
//! Logs go to stderr; stdout belongs to the interactive prompts.

use tracing_subscriber::EnvFilter;

const DEFAULT_DIRECTIVES: &str = "warn,flashcards=info,memorize=info,wordlist=info";

pub fn init_tracing() {
    let filter = EnvFilter::try_from_env("LOG_LEVEL")
        .unwrap_or_else(|_| EnvFilter::new(DEFAULT_DIRECTIVES));
    let ansi = std::env::var_os("NO_COLOR").is_none();

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_line_number(true);

    match std::env::var("LOG_FORMAT").as_deref() {
        Ok("json") => builder.json().with_ansi(false).init(),
        _ => builder.with_ansi(ansi).init(),
    }
}
