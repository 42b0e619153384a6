//! CLI command for repackaging firmware zips

use std::path::{Path, PathBuf};
use std::time::Instant;

use anyhow::{Context, bail};
use indicatif::ProgressBar;

use crate::cli::progress::{
    batch_bar, phase_line, print_done, print_step, print_warning, simple_spinner,
};
use crate::repack::{
    RepackOptions, RepackPhase, RepackProgress, batch_repackage, find_firmware_zips,
    repackage_with_progress,
};

/// Repackage every zip named by `sources`.
///
/// Directories expand to the firmware zips found beneath them.
///
/// # Errors
///
/// Returns an error if a source path does not exist, no zip is found, the
/// output directory cannot be created, or any job fails fatally. Per-file
/// warnings are printed but never produce an error.
pub fn execute(
    sources: &[PathBuf],
    output: &Path,
    delete_original: bool,
    quiet: bool,
) -> anyhow::Result<()> {
    let jobs = collect_jobs(sources)?;
    if jobs.is_empty() {
        bail!("No firmware zip files found");
    }

    std::fs::create_dir_all(output)
        .with_context(|| format!("Failed to create output directory {}", output.display()))?;

    let options = RepackOptions::new()
        .with_output_dir(output)
        .with_delete_original(delete_original);

    match jobs.as_slice() {
        [single] => repack_single(single, &options, quiet),
        _ => repack_batch(&jobs, &options, quiet),
    }
}

fn collect_jobs(sources: &[PathBuf]) -> anyhow::Result<Vec<PathBuf>> {
    let mut jobs = Vec::new();

    for source in sources {
        if source.is_dir() {
            let found = find_firmware_zips(source);
            if found.is_empty() {
                tracing::warn!("No zip files in {}", source.display());
            }
            jobs.extend(found);
        } else if source.is_file() {
            jobs.push(source.clone());
        } else {
            bail!("No such file or directory: {}", source.display());
        }
    }

    Ok(jobs)
}

fn repack_single(source: &Path, options: &RepackOptions, quiet: bool) -> anyhow::Result<()> {
    let started = Instant::now();
    let pb = if quiet {
        ProgressBar::hidden()
    } else {
        println!("Repackaging {}", source.display());
        simple_spinner("Resolving...")
    };

    let show = |progress: &RepackProgress| {
        if quiet {
            return;
        }
        match phase_line(progress) {
            Some((emoji, msg)) => pb.suspend(|| {
                print_step(progress.phase.step(), RepackPhase::COUNT, emoji, &msg);
            }),
            None => {
                if let Some(ref name) = progress.current_file {
                    pb.set_message(format!("{name} ({}/{})", progress.current, progress.total));
                }
            }
        }
    };

    let result = repackage_with_progress(source, options, &show);
    pb.finish_and_clear();
    let report = result.with_context(|| format!("Failed to repackage {}", source.display()))?;

    if quiet {
        return Ok(());
    }

    println!();
    println!("Archives:");
    for archive in report.archives() {
        println!("  {}", archive.display());
    }

    let warnings = report.warnings();
    if !warnings.is_empty() {
        println!();
        println!("Warnings:");
        for warning in warnings {
            print_warning(&warning.to_string());
        }
    }

    print_done(started.elapsed());
    Ok(())
}

fn repack_batch(jobs: &[PathBuf], options: &RepackOptions, quiet: bool) -> anyhow::Result<()> {
    let started = Instant::now();
    let pb = if quiet {
        ProgressBar::hidden()
    } else {
        println!("Found {} firmware zips to repackage", jobs.len());
        batch_bar(jobs.len() as u64)
    };

    let result = batch_repackage(jobs, options, |progress| match progress.phase {
        RepackPhase::Resolved => {
            if let Some(ref name) = progress.current_file {
                pb.set_message(name.clone());
            }
        }
        RepackPhase::CleanedUp => pb.inc(1),
        _ => {}
    });

    pb.finish_and_clear();

    if !quiet {
        println!();
        println!("Repackaging complete:");
        println!("  Success: {}", result.success_count);
        println!("  Failed: {}", result.fail_count);
        for msg in result.results.iter().filter(|m| m.contains("warnings")) {
            println!("  {msg}");
        }
    }

    if result.fail_count > 0 {
        println!();
        println!("Failures:");
        for msg in result.results.iter().filter(|m| m.starts_with("Failed")) {
            println!("  {msg}");
        }
        bail!("{} of {} jobs failed", result.fail_count, jobs.len());
    }

    if !quiet {
        print_done(started.elapsed());
    }
    Ok(())
}
