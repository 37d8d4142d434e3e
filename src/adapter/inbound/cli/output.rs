//! Terminal rendering for dealsight commands.
//!
//! Every message goes through [`emit`], which either prints a
//! `{"type", "payload"}` JSON line (`--json`) or runs the human renderer.
//! `--quiet` drops human output except warnings and errors.

use std::fmt::Display;
use std::sync::OnceLock;
use std::time::Duration;

use indicatif::{ProgressBar, ProgressStyle};
use owo_colors::OwoColorize;
use parking_lot::RwLock;
use serde_json::{json, Value};

use crate::application::row::{BarColor, RowViewModel};

/// Width of a full (100%) risk bar in terminal cells.
pub const BAR_CELLS: usize = 20;

const SPINNER_FRAMES: &[&str] = &["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"];

/// Output flags taken from the global CLI options.
#[derive(Debug, Clone, Copy, Default)]
pub struct OutputConfig {
    pub json: bool,
    pub quiet: bool,
    /// Number of `-v` flags.
    pub verbose: u8,
}

impl OutputConfig {
    #[must_use]
    pub const fn new(json: bool, quiet: bool, verbose: u8) -> Self {
        Self {
            json,
            quiet,
            verbose,
        }
    }
}

static SETTINGS: OnceLock<RwLock<OutputConfig>> = OnceLock::new();

fn settings() -> OutputConfig {
    *SETTINGS
        .get_or_init(|| RwLock::new(OutputConfig::default()))
        .read()
}

/// Install the flags for the rest of the process.
pub fn configure(config: OutputConfig) {
    *SETTINGS
        .get_or_init(|| RwLock::new(OutputConfig::default()))
        .write() = config;
}

#[must_use]
pub fn is_json() -> bool {
    settings().json
}

#[must_use]
pub fn is_quiet() -> bool {
    settings().quiet
}

#[must_use]
pub fn verbosity() -> u8 {
    settings().verbose
}

/// How a message behaves under `--quiet`.
#[derive(Clone, Copy, PartialEq, Eq)]
enum Level {
    Info,
    Alert,
}

fn emit(kind: &str, level: Level, payload: Value, human: impl FnOnce()) {
    let config = settings();
    if config.json {
        println!("{}", json!({ "type": kind, "payload": payload }));
    } else if !config.quiet || level == Level::Alert {
        human();
    }
}

/// Banner printed before a command's output.
pub fn header(version: &str) {
    emit(
        "header",
        Level::Info,
        json!({ "app": "dealsight", "version": version }),
        || println!("{} {}\n", "dealsight".bold(), version.dimmed()),
    );
}

/// Aligned `label value` pair.
pub fn field(label: &str, value: impl Display) {
    let value = value.to_string();
    emit(
        "field",
        Level::Info,
        json!({ "label": label, "value": value }),
        || println!("  {:<12} {value}", label.dimmed()),
    );
}

pub fn success(message: &str) {
    emit("success", Level::Info, json!({ "message": message }), || {
        println!("  {} {message}", "✓".green());
    });
}

pub fn warning(message: &str) {
    emit("warning", Level::Alert, json!({ "message": message }), || {
        println!("  {} {message}", "⚠".yellow());
    });
}

/// Fatal error, written to stderr in both modes.
pub fn error(message: &str) {
    if is_json() {
        eprintln!("{}", json!({ "type": "error", "payload": { "message": message } }));
    } else {
        eprintln!("  {} {message}", "×".red());
    }
}

pub fn section(title: &str) {
    emit("section", Level::Info, json!({ "title": title }), || {
        println!("\n{}", title.bold());
    });
}

pub fn note(message: &str) {
    emit("note", Level::Info, json!({ "message": message }), || {
        println!("  {}", message.dimmed());
    });
}

pub fn hint(message: &str) {
    emit("hint", Level::Info, json!({ "message": message }), || {
        println!("  {}: {}", "hint".cyan().dimmed(), message.dimmed());
    });
}

/// Block of text such as a rendered table, indented two spaces.
pub fn lines(content: &str) {
    emit("lines", Level::Info, json!({ "content": content }), || {
        for line in content.lines() {
            println!("  {line}");
        }
    });
}

/// Bare JSON value, for per-row records.
pub fn json_output(value: Value) {
    println!("{value}");
}

/// Spinner shown while requests are in flight; hidden under `--json` or
/// `--quiet`.
pub fn spinner(message: &str) -> ProgressBar {
    let config = settings();
    let pb = if config.json || config.quiet {
        ProgressBar::hidden()
    } else {
        let pb = ProgressBar::new_spinner();
        if let Ok(style) = ProgressStyle::default_spinner()
            .tick_strings(SPINNER_FRAMES)
            .template("  {spinner:.cyan} {msg}")
        {
            pb.set_style(style);
        }
        pb.enable_steady_tick(Duration::from_millis(80));
        pb
    };
    pb.set_message(message.to_string());
    pb
}

pub fn spinner_success(pb: &ProgressBar, message: &str) {
    finish(pb, "spinner_success", Level::Info, format!("{} {message}", "✓".green()), message);
}

pub fn spinner_fail(pb: &ProgressBar, message: &str) {
    finish(pb, "spinner_fail", Level::Alert, format!("{} {message}", "×".red()), message);
}

fn finish(pb: &ProgressBar, kind: &str, level: Level, rendered: String, message: &str) {
    let mut shown = false;
    emit(kind, level, json!({ "message": message }), || {
        pb.finish_with_message(rendered);
        shown = true;
    });
    if !shown {
        pb.finish_and_clear();
    }
}

/// Render a row's risk bar as truecolor block characters.
///
/// A pending or failed row renders as an empty track.
#[must_use]
pub fn risk_bar(row: &RowViewModel) -> String {
    let filled = filled_cells(row.display_percent.unwrap_or(0));
    let track = "░".repeat(BAR_CELLS - filled);

    match row.bar_color {
        BarColor::Rgb(rgb) => format!(
            "{}{}",
            "█".repeat(filled).truecolor(rgb.r, rgb.g, rgb.b),
            track.dimmed()
        ),
        BarColor::Transparent => format!("{}", "░".repeat(BAR_CELLS).dimmed()),
    }
}

#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn filled_cells(percent: i64) -> usize {
    let clamped = percent.clamp(0, 100) as usize;
    (clamped * BAR_CELLS + 50) / 100
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bar_cells_scale_with_percent() {
        assert_eq!(filled_cells(0), 0);
        assert_eq!(filled_cells(73), 15);
        assert_eq!(filled_cells(100), BAR_CELLS);
        assert_eq!(filled_cells(140), BAR_CELLS);
        assert_eq!(filled_cells(-5), 0);
    }
}
