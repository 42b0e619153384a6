//! Repackaging pipeline
//!
//! A job runs `Resolved → Extracted → Building → Built → CleanedUp`.
//! Naming and extraction failures abort the job before anything is built.
//! The four derivative archives are then built on a dedicated four-thread
//! pool and joined before cleanup starts. Per-file build and cleanup
//! failures are collected in the [`RepackReport`].

mod batch;
mod options;
mod progress;

pub use batch::{BatchRepackResult, batch_repackage, find_firmware_zips};
pub use options::RepackOptions;
pub use progress::{ProgressCallback, RepackPhase, RepackProgress};

use std::path::Path;
use std::sync::atomic::{AtomicUsize, Ordering};

use rayon::prelude::*;

use crate::cleanup::{CleanupReport, cleanup};
use crate::error::{Error, Result};
use crate::extract::{ExtractedFileSet, extract_firmware};
use crate::firmware::{DerivativeArchiveSpec, FirmwareBundle};
use crate::tarball::{BuildReport, build_archive};

/// Everything a finished job produced.
#[derive(Debug)]
pub struct RepackReport {
    pub bundle: FirmwareBundle,
    pub extracted: ExtractedFileSet,
    /// One report per derivative archive, in [`DerivativeKind::ALL`] order.
    ///
    /// [`DerivativeKind::ALL`]: crate::firmware::DerivativeKind::ALL
    pub builds: Vec<BuildReport>,
    pub cleanup: CleanupReport,
}

impl RepackReport {
    /// All non-fatal failures: build failures first, then cleanup failures.
    #[must_use]
    pub fn warnings(&self) -> Vec<&Error> {
        self.builds
            .iter()
            .flat_map(|b| b.failures.iter())
            .chain(self.cleanup.failures.iter())
            .collect()
    }

    /// Paths of the derivative archives.
    #[must_use]
    pub fn archives(&self) -> Vec<&Path> {
        self.builds.iter().map(|b| b.archive.as_path()).collect()
    }
}

/// Repackage one firmware container.
///
/// # Errors
///
/// See [`repackage_with_progress`].
pub fn repackage<P: AsRef<Path>>(source: P, options: &RepackOptions) -> Result<RepackReport> {
    repackage_with_progress(source, options, &|_| {})
}

/// Repackage one firmware container, reporting each phase transition.
///
/// # Errors
///
/// Returns [`Error::MalformedFilename`] if the source name cannot be parsed,
/// any extraction error from [`extract_firmware`], or
/// [`Error::WorkerPool`] if the build workers cannot be started. Failures
/// while building or cleaning up are reported in the [`RepackReport`].
pub fn repackage_with_progress<P: AsRef<Path>>(
    source: P,
    options: &RepackOptions,
    progress: ProgressCallback,
) -> Result<RepackReport> {
    let source = source.as_ref();

    let bundle = FirmwareBundle::resolve(source, &options.output_dir)?;
    tracing::info!(
        "Resolved {}: product {}, carrier {}",
        source.display(),
        bundle.product_code(),
        bundle.carrier_code()
    );
    progress(&RepackProgress::with_file(
        RepackPhase::Resolved,
        1,
        1,
        bundle.inner_archive_name(),
    ));

    let extracted = extract_firmware(&bundle)?;
    tracing::info!("Extracted {} files", extracted.len());
    progress(&RepackProgress::new(
        RepackPhase::Extracted,
        extracted.len(),
        extracted.len(),
    ));

    let specs = bundle.derivative_specs(extracted.bootloader_files());
    let builds = build_all(bundle.working_dir(), &specs, progress)?;
    tracing::info!("Built {} archives", builds.len());
    progress(&RepackProgress::new(
        RepackPhase::Built,
        builds.len(),
        builds.len(),
    ));

    let cleaned = cleanup(&bundle, &extracted, options.delete_original);
    let attempted = cleaned.removed.len() + cleaned.failures.len();
    progress(&RepackProgress::new(
        RepackPhase::CleanedUp,
        cleaned.removed.len(),
        attempted,
    ));

    Ok(RepackReport {
        bundle,
        extracted,
        builds,
        cleanup: cleaned,
    })
}

/// Build every spec concurrently, one worker per spec, and wait for all.
fn build_all(
    work_dir: &Path,
    specs: &[DerivativeArchiveSpec],
    progress: ProgressCallback,
) -> Result<Vec<BuildReport>> {
    let total = specs.len();
    progress(&RepackProgress::new(RepackPhase::Building, 0, total));

    let pool = rayon::ThreadPoolBuilder::new()
        .num_threads(total)
        .thread_name(|i| format!("odinpack-build-{i}"))
        .build()?;

    let finished = AtomicUsize::new(0);
    let builds: Vec<BuildReport> = pool.install(|| {
        specs
            .par_iter()
            .with_max_len(1)
            .map(|spec| {
                let report = build_archive(work_dir, spec);
                let current = finished.fetch_add(1, Ordering::SeqCst) + 1;
                progress(&RepackProgress::with_file(
                    RepackPhase::Building,
                    current,
                    total,
                    spec.archive_name.as_str(),
                ));
                report
            })
            .collect()
    });

    Ok(builds)
}
