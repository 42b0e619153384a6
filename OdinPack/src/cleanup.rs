//! Removal of intermediate files after a repackaging job

use std::path::PathBuf;

use crate::error::Error;
use crate::extract::ExtractedFileSet;
use crate::firmware::{FirmwareBundle, MODEM_FILES};

/// Outcome of the cleanup step.
#[derive(Debug, Default)]
pub struct CleanupReport {
    /// Files that were deleted.
    pub removed: Vec<PathBuf>,
    /// Files that could not be deleted.
    pub failures: Vec<Error>,
    /// Whether the original container was deleted.
    pub original_removed: bool,
}

/// Delete the extracted members and the inner archive of `bundle`.
///
/// Every extracted bootloader file, both modem files and the inner archive
/// are attempted regardless of earlier failures. With `delete_original` the
/// source container is removed last, after all other deletions.
#[must_use]
pub fn cleanup(
    bundle: &FirmwareBundle,
    extracted: &ExtractedFileSet,
    delete_original: bool,
) -> CleanupReport {
    tracing::info!("Cleaning up {}", bundle.working_dir().display());
    let mut report = CleanupReport::default();

    let targets = extracted
        .bootloader_files()
        .iter()
        .chain(MODEM_FILES.iter())
        .map(|name| bundle.working_dir().join(name))
        .chain(std::iter::once(bundle.inner_archive_path()));

    for path in targets {
        remove_into(&mut report, path);
    }

    if delete_original {
        let original = bundle.source_path().to_path_buf();
        report.original_removed = remove_into(&mut report, original);
    }

    report
}

fn remove_into(report: &mut CleanupReport, path: PathBuf) -> bool {
    match std::fs::remove_file(&path) {
        Ok(()) => {
            tracing::debug!("Removed {}", path.display());
            report.removed.push(path);
            true
        }
        Err(source) => {
            tracing::warn!("{} not deleted: {}", path.display(), source);
            report.failures.push(Error::FileDeleteFailure { path, source });
            false
        }
    }
}
