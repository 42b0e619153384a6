//! CLI progress display utilities
//!
//! Step lines with emojis for each pipeline phase, a spinner while archives
//! are built, and a bar for batch runs.

use std::time::Duration;

use console::{Emoji, style};
use indicatif::{HumanDuration, ProgressBar, ProgressStyle};

use crate::repack::{RepackPhase, RepackProgress};

/// Magnifying glass - name resolution
pub static LOOKING_GLASS: Emoji<'_, '_> = Emoji("🔍 ", "");
/// Package - extraction
pub static PACKAGE: Emoji<'_, '_> = Emoji("📦 ", "");
/// Gear - archive building
pub static GEAR: Emoji<'_, '_> = Emoji("⚙️  ", "");
/// Floppy disk - archives written
pub static DISK: Emoji<'_, '_> = Emoji("💾 ", "");
/// Broom - cleanup
pub static BROOM: Emoji<'_, '_> = Emoji("🧹 ", "");
/// Sparkles - completion
pub static SPARKLE: Emoji<'_, '_> = Emoji("✨ ", "");
/// Warning sign
pub static WARNING: Emoji<'_, '_> = Emoji("⚠️  ", "! ");

/// Print a step indicator: `[2/5] 📦 Message`
pub fn print_step(current: usize, total: usize, emoji: Emoji, msg: &str) {
    println!(
        "{} {}{}",
        style(format!("[{current}/{total}]")).bold().dim(),
        emoji,
        msg
    );
}

/// Print completion message: `✨ Done in 2s`
pub fn print_done(elapsed: Duration) {
    println!("{} Done in {}", SPARKLE, HumanDuration(elapsed));
}

/// Print a per-file warning line.
pub fn print_warning(msg: &str) {
    println!("  {}{}", WARNING, style(msg).yellow());
}

/// Step line for a phase transition.
///
/// Returns `None` for per-archive updates inside the building phase, which
/// go to the spinner instead.
#[must_use]
pub fn phase_line(progress: &RepackProgress) -> Option<(Emoji<'static, 'static>, String)> {
    let line = match progress.phase {
        RepackPhase::Resolved => (
            LOOKING_GLASS,
            format!(
                "Looking for {}",
                progress.current_file.as_deref().unwrap_or("inner archive")
            ),
        ),
        RepackPhase::Extracted => (PACKAGE, format!("Extracted {} files", progress.total)),
        RepackPhase::Building if progress.current == 0 => {
            (GEAR, format!("Building {} archives...", progress.total))
        }
        RepackPhase::Building => return None,
        RepackPhase::Built => (DISK, format!("Wrote {} archives", progress.total)),
        RepackPhase::CleanedUp => (
            BROOM,
            format!("Removed {} intermediate files", progress.current),
        ),
    };
    Some(line)
}

/// Create a simple spinner
///
/// # Panics
/// Panics if the template string is invalid (this is a compile-time constant).
#[must_use]
pub fn simple_spinner(msg: &str) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    pb.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner:.cyan} {msg}")
            .expect("valid template"),
    );
    pb.set_message(msg.to_string());
    pb.enable_steady_tick(Duration::from_millis(100));
    pb
}

/// Create a progress bar for batch runs
///
/// # Panics
/// Panics if the template string is invalid (this is a compile-time constant).
#[must_use]
pub fn batch_bar(total: u64) -> ProgressBar {
    let pb = ProgressBar::new(total);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{msg} [{bar:40.cyan/blue}] {pos}/{len} ({percent}%)")
            .expect("valid template")
            .progress_chars("##-"),
    );
    pb
}
