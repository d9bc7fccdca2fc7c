//! Status messages on stderr.
//!
//! Results go to stdout so they can be piped; everything a human reads while
//! a command runs goes through these helpers.

use std::sync::atomic::{AtomicBool, Ordering};

use owo_colors::OwoColorize;

use crate::logger::should_use_colors;

static COLORS: AtomicBool = AtomicBool::new(false);
static QUIET: AtomicBool = AtomicBool::new(false);

/// Decide once whether messages are colored and whether info and success
/// lines are shown at all.
pub fn init(no_color: bool, quiet: bool) {
    COLORS.store(!no_color && should_use_colors(), Ordering::Relaxed);
    QUIET.store(quiet, Ordering::Relaxed);
}

fn colors() -> bool {
    COLORS.load(Ordering::Relaxed)
}

fn quiet() -> bool {
    QUIET.load(Ordering::Relaxed)
}

pub fn success(message: &str) {
    if quiet() {
        return;
    }
    if colors() {
        eprintln!("{} {}", "✓".green().bold(), message);
    } else {
        eprintln!("✓ {message}");
    }
}

pub fn info(message: &str) {
    if quiet() {
        return;
    }
    if colors() {
        eprintln!("{} {}", "ℹ".blue().bold(), message);
    } else {
        eprintln!("ℹ {message}");
    }
}

pub fn warning(message: &str) {
    if colors() {
        eprintln!("{} {}", "⚠".yellow().bold(), message.yellow());
    } else {
        eprintln!("⚠ {message}");
    }
}

/// Dim text for secondary output on stdout, such as `(unchanged)`.
pub fn dim(text: &str) -> String {
    if colors() {
        text.dimmed().to_string()
    } else {
        text.to_string()
    }
}
