//! Batch repackaging
//!
//! Jobs run one after another: they share the output directory and two
//! bundles for the same product would write the same archive names.

use std::path::{Path, PathBuf};

use walkdir::WalkDir;

use super::{RepackOptions, RepackProgress, repackage_with_progress};

/// Result of a batch repackaging run
#[derive(Debug, Clone)]
pub struct BatchRepackResult {
    /// Number of jobs that completed
    pub success_count: usize,
    /// Number of jobs that failed fatally
    pub fail_count: usize,
    /// One message per job, in input order
    pub results: Vec<String>,
}

impl BatchRepackResult {
    #[must_use]
    pub fn all_succeeded(&self) -> bool {
        self.fail_count == 0
    }
}

/// Find all .zip files in a directory recursively
///
/// # Returns
/// A sorted list of paths; the extension match is case-insensitive.
#[must_use]
pub fn find_firmware_zips<P: AsRef<Path>>(dir: P) -> Vec<PathBuf> {
    let mut zips: Vec<_> = WalkDir::new(dir)
        .follow_links(true)
        .into_iter()
        .filter_map(std::result::Result::ok)
        .filter(|e| {
            e.file_type().is_file()
                && e.path()
                    .extension()
                    .is_some_and(|ext| ext.eq_ignore_ascii_case("zip"))
        })
        .map(walkdir::DirEntry::into_path)
        .collect();

    zips.sort();
    zips
}

/// Repackage each source in turn.
///
/// A fatal failure is recorded for that source and the next one is started.
#[must_use]
pub fn batch_repackage<F>(sources: &[PathBuf], options: &RepackOptions, progress: F) -> BatchRepackResult
where
    F: Fn(&RepackProgress) + Send + Sync,
{
    let mut success_count = 0;
    let mut fail_count = 0;
    let mut results = Vec::with_capacity(sources.len());

    for source in sources {
        let shown = source.display();
        match repackage_with_progress(source, options, &progress) {
            Ok(report) => {
                success_count += 1;
                let warnings = report.warnings().len();
                if warnings == 0 {
                    results.push(format!("Repackaged: {shown}"));
                } else {
                    results.push(format!("Repackaged: {shown} ({warnings} warnings)"));
                }
            }
            Err(e) => {
                fail_count += 1;
                tracing::error!("Failed {}: {}", shown, e);
                results.push(format!("Failed {shown}: {e}"));
            }
        }
    }

    BatchRepackResult {
        success_count,
        fail_count,
        results,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_find_firmware_zips_sorted_and_case_insensitive() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::create_dir(dir.path().join("nested")).unwrap();
        std::fs::create_dir(dir.path().join("folder.zip")).unwrap();
        for name in ["b_X.zip", "a_Y.ZIP", "nested/c_Z.Zip", "notes.txt", "G960_XYZ.tar"] {
            std::fs::write(dir.path().join(name), b"").unwrap();
        }

        let found: Vec<_> = find_firmware_zips(dir.path())
            .into_iter()
            .map(|p| p.strip_prefix(dir.path()).unwrap().to_path_buf())
            .collect();
        assert_eq!(
            found,
            vec![
                PathBuf::from("a_Y.ZIP"),
                PathBuf::from("b_X.zip"),
                PathBuf::from("nested/c_Z.Zip"),
            ]
        );
    }

    #[test]
    fn test_failed_job_does_not_stop_batch() {
        let dir = tempfile::tempdir().unwrap();
        let sources = vec![dir.path().join("firmware.zip"), dir.path().join("G960_XYZ.zip")];
        let options = RepackOptions::new().with_output_dir(dir.path());

        let result = batch_repackage(&sources, &options, |_| {});
        assert_eq!(result.fail_count, 2);
        assert_eq!(result.success_count, 0);
        assert_eq!(result.results.len(), 2);
        assert!(result.results.iter().all(|r| r.starts_with("Failed")));
        assert!(!result.all_succeeded());
    }
}
