//! Two-stage extraction of a firmware bundle
//!
//! Stage A pulls the inner tar payload out of the zip container. Stage B
//! writes the bootloader and modem members of that payload into the working
//! directory. The payload is untrusted: every member name is checked by the
//! path-traversal guard before anything is written, and a single hostile
//! name aborts the whole extraction.

mod sanitize;

use std::collections::BTreeSet;
use std::fs::File;
use std::io::{self, BufReader};
use std::path::{Path, PathBuf};

use zip::result::ZipError;

use crate::error::{Error, Result};
use crate::firmware::{BOOTLOADER_FILES, FirmwareBundle, MODEM_FILES, MemberClass, known_member};

/// Bootloader and modem files that were actually present in the payload.
///
/// Computed once during extraction and only read afterwards.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExtractedFileSet {
    bootloader: Vec<&'static str>,
    modems: Vec<&'static str>,
}

impl ExtractedFileSet {
    /// Filter the fixed name sets down to the names in `present`.
    ///
    /// Order follows the fixed sets, not the archive.
    pub(crate) fn from_present(present: &BTreeSet<&'static str>) -> Self {
        Self {
            bootloader: BOOTLOADER_FILES
                .into_iter()
                .filter(|name| present.contains(name))
                .collect(),
            modems: MODEM_FILES
                .into_iter()
                .filter(|name| present.contains(name))
                .collect(),
        }
    }

    /// Bootloader components found in the payload.
    #[must_use]
    pub fn bootloader_files(&self) -> &[&'static str] {
        &self.bootloader
    }

    /// Modem images found in the payload.
    #[must_use]
    pub fn modem_files(&self) -> &[&'static str] {
        &self.modems
    }

    /// Whether `name` was extracted.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.bootloader.contains(&name) || self.modems.contains(&name)
    }

    /// Total number of extracted files.
    #[must_use]
    pub fn len(&self) -> usize {
        self.bootloader.len() + self.modems.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Run both extraction stages for `bundle`.
///
/// Creates the working directory if it does not exist.
///
/// # Errors
///
/// Returns [`Error::ContainerEntryMissing`] if the container lacks the inner
/// archive, [`Error::InvalidContainer`] if it is not a readable zip,
/// [`Error::PathTraversalDetected`] if any payload member escapes the working
/// directory, and [`Error::ExtractionFailed`] on I/O failure.
pub fn extract_firmware(bundle: &FirmwareBundle) -> Result<ExtractedFileSet> {
    extract_container_entry(bundle)?;
    extract_inner_members(bundle)
}

/// Stage A: copy the inner archive out of the zip container.
///
/// Returns the path of the extracted inner archive.
///
/// # Errors
///
/// Returns [`Error::ContainerEntryMissing`] if the entry does not exist.
pub fn extract_container_entry(bundle: &FirmwareBundle) -> Result<PathBuf> {
    let container = bundle.source_path();
    let entry_name = bundle.inner_archive_name();
    tracing::info!("Extracting {} from {}", entry_name, container.display());

    let file = File::open(container).map_err(|source| Error::ExtractionFailed {
        path: container.to_path_buf(),
        source,
    })?;
    let mut archive = zip::ZipArchive::new(BufReader::new(file)).map_err(|source| {
        Error::InvalidContainer {
            path: container.to_path_buf(),
            source,
        }
    })?;

    let mut entry = match archive.by_name(entry_name) {
        Ok(entry) => entry,
        Err(ZipError::FileNotFound) => {
            return Err(Error::ContainerEntryMissing {
                container: container.to_path_buf(),
                entry: entry_name.to_string(),
            });
        }
        Err(source) => {
            return Err(Error::InvalidContainer {
                path: container.to_path_buf(),
                source,
            });
        }
    };

    std::fs::create_dir_all(bundle.working_dir()).map_err(|source| Error::ExtractionFailed {
        path: bundle.working_dir().to_path_buf(),
        source,
    })?;

    let target = bundle.inner_archive_path();
    let write_failed = |source| Error::ExtractionFailed {
        path: target.clone(),
        source,
    };
    let mut out = File::create(&target).map_err(write_failed)?;
    let size = io::copy(&mut entry, &mut out).map_err(write_failed)?;
    tracing::debug!("Wrote {} ({} bytes)", target.display(), size);

    Ok(target)
}

/// Stage B: extract the bootloader and modem members of the inner archive.
///
/// The archive is read twice. The first pass checks every member name
/// against the working directory and records which known names are
/// present; the second pass writes them. Nothing is written if any member
/// fails the check.
///
/// # Errors
///
/// Returns [`Error::PathTraversalDetected`] for a hostile member name and
/// [`Error::ExtractionFailed`] on read or write failure.
pub fn extract_inner_members(bundle: &FirmwareBundle) -> Result<ExtractedFileSet> {
    let inner = bundle.inner_archive_path();
    tracing::info!("Extracting members of {}", inner.display());

    let base = sanitize::absolute_base(bundle.working_dir()).map_err(|source| {
        Error::ExtractionFailed {
            path: bundle.working_dir().to_path_buf(),
            source,
        }
    })?;

    let present = scan_members(&inner, &base)?;
    let extracted = ExtractedFileSet::from_present(&present);

    let mut written = Vec::new();
    if let Err(e) = write_members(&inner, &base, &present, &mut written) {
        remove_partial(&base, &written);
        return Err(e);
    }

    if extracted.bootloader_files().is_empty() {
        tracing::warn!("No bootloader components found in {}", inner.display());
    }
    for modem in MODEM_FILES {
        if !extracted.contains(modem) {
            tracing::warn!("{} not found in {}", modem, inner.display());
        }
    }

    Ok(extracted)
}

fn read_failed(inner: &Path) -> impl Fn(io::Error) -> Error + '_ {
    move |source| Error::ExtractionFailed {
        path: inner.to_path_buf(),
        source,
    }
}

fn open_tar(inner: &Path) -> Result<tar::Archive<BufReader<File>>> {
    let file = File::open(inner).map_err(read_failed(inner))?;
    Ok(tar::Archive::new(BufReader::new(file)))
}

/// Guard every member and collect the known regular-file names.
fn scan_members(inner: &Path, base: &Path) -> Result<BTreeSet<&'static str>> {
    let mut archive = open_tar(inner)?;
    let mut present = BTreeSet::new();

    for entry in archive.entries().map_err(read_failed(inner))? {
        let entry = entry.map_err(read_failed(inner))?;
        let path = entry.path().map_err(read_failed(inner))?;

        sanitize::resolve_member_path(&path, base)?;

        let Some(name) = path.to_str().and_then(known_member) else {
            continue;
        };
        if entry.header().entry_type().is_file() {
            tracing::debug!("Found {} ({:?})", name, MemberClass::classify(name));
            present.insert(name);
        } else {
            tracing::warn!("Skipping {}: not a regular file", name);
        }
    }

    Ok(present)
}

/// Stream the selected members into the working directory.
///
/// Every file this pass creates is pushed to `written`, including one whose
/// copy then fails.
fn write_members(
    inner: &Path,
    base: &Path,
    present: &BTreeSet<&'static str>,
    written: &mut Vec<&'static str>,
) -> Result<()> {
    let mut archive = open_tar(inner)?;

    for entry in archive.entries().map_err(read_failed(inner))? {
        let mut entry = entry.map_err(read_failed(inner))?;
        if !entry.header().entry_type().is_file() {
            continue;
        }

        let name = {
            let path = entry.path().map_err(read_failed(inner))?;
            match path.to_str().and_then(known_member) {
                Some(name) if present.contains(name) => name,
                _ => continue,
            }
        };

        let target = sanitize::resolve_member_path(Path::new(name), base)?;
        let write_failed = |source| Error::ExtractionFailed {
            path: target.clone(),
            source,
        };
        let mut out = File::create(&target).map_err(write_failed)?;
        written.push(name);
        let size = io::copy(&mut entry, &mut out).map_err(write_failed)?;
        tracing::debug!("Extracted {} ({} bytes)", name, size);
    }

    Ok(())
}

/// Best-effort removal of the files a failed extraction wrote.
fn remove_partial(base: &Path, written: &[&'static str]) {
    for name in written {
        let path = base.join(name);
        match std::fs::remove_file(&path) {
            Ok(()) => tracing::debug!("Removed partial file {}", path.display()),
            Err(e) if e.kind() == io::ErrorKind::NotFound => {}
            Err(e) => tracing::warn!("Failed to remove partial file {}: {}", path.display(), e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_file_set_follows_fixed_order() {
        let present: BTreeSet<&'static str> =
            ["tz.mbn", "NON-HLOS.bin", "aboot.mbn", "rpm.mbn"].into_iter().collect();
        let set = ExtractedFileSet::from_present(&present);
        assert_eq!(set.bootloader_files(), &["aboot.mbn", "rpm.mbn", "tz.mbn"]);
        assert_eq!(set.modem_files(), &["NON-HLOS.bin"]);
        assert_eq!(set.len(), 4);
        assert!(set.contains("rpm.mbn"));
        assert!(!set.contains("modem.bin"));
    }

    #[test]
    fn test_failed_write_removes_only_files_it_wrote() {
        let work = tempfile::tempdir().unwrap();
        // Pre-existing file with a known name, and a directory blocking modem.bin
        std::fs::write(work.path().join("tz.mbn"), b"keep me").unwrap();
        std::fs::create_dir(work.path().join("modem.bin")).unwrap();

        let bundle = FirmwareBundle::resolve("G960_XYZ.zip", work.path()).unwrap();
        let mut builder = tar::Builder::new(Vec::new());
        let members: [(&str, &[u8]); 3] =
            [("aboot.mbn", b"aboot"), ("modem.bin", b"gsm"), ("tz.mbn", b"tz")];
        for (name, data) in members {
            let mut header = tar::Header::new_ustar();
            header.set_path(name).unwrap();
            header.set_size(data.len() as u64);
            header.set_mode(0o644);
            header.set_entry_type(tar::EntryType::Regular);
            header.set_cksum();
            builder.append(&header, data).unwrap();
        }
        std::fs::write(bundle.inner_archive_path(), builder.into_inner().unwrap()).unwrap();

        let err = extract_inner_members(&bundle).unwrap_err();
        assert!(matches!(err, Error::ExtractionFailed { .. }));

        // aboot.mbn was written by the failed run and removed again
        assert!(!work.path().join("aboot.mbn").exists());
        // tz.mbn was never reached and keeps its contents
        assert_eq!(std::fs::read(work.path().join("tz.mbn")).unwrap(), b"keep me");
        assert!(work.path().join("modem.bin").is_dir());
    }

    #[test]
    fn test_empty_file_set() {
        let set = ExtractedFileSet::from_present(&BTreeSet::new());
        assert!(set.is_empty());
        assert!(set.bootloader_files().is_empty());
    }
}
