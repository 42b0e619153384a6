//! Derivative tar archive creation
//!
//! Archives are plain USTAR with deterministic headers, each file stored
//! under its base name. A source file that cannot be added is recorded and
//! skipped; it never aborts the archive.

use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};

use tar::{Builder, Header, HeaderMode};

use crate::error::Error;
use crate::firmware::{DerivativeArchiveSpec, DerivativeKind};

/// Outcome of building one derivative archive.
#[derive(Debug)]
pub struct BuildReport {
    /// Which derivative archive this is.
    pub kind: DerivativeKind,
    /// Path of the written archive.
    pub archive: PathBuf,
    /// Files stored in the archive, in order.
    pub added: Vec<&'static str>,
    /// Per-file (and archive write) failures.
    pub failures: Vec<Error>,
}

impl BuildReport {
    fn new(kind: DerivativeKind, archive: PathBuf) -> Self {
        Self {
            kind,
            archive,
            added: Vec::new(),
            failures: Vec::new(),
        }
    }

    /// Whether every listed file made it into the archive.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.failures.is_empty()
    }
}

/// Build the archive described by `spec` inside `work_dir`.
///
/// Source files are read from `work_dir`. Failures are collected in the
/// returned report rather than propagated.
#[must_use]
pub fn build_archive(work_dir: &Path, spec: &DerivativeArchiveSpec) -> BuildReport {
    let archive_path = work_dir.join(&spec.archive_name);
    let mut report = BuildReport::new(spec.kind, archive_path.clone());
    tracing::info!("Creating {} archive {}", spec.kind.display_name(), spec.archive_name);

    let file = match File::create(&archive_path) {
        Ok(file) => file,
        Err(source) => {
            tracing::warn!("Cannot create {}: {}", archive_path.display(), source);
            report.failures.push(Error::ArchiveWriteFailure {
                archive: archive_path,
                source,
            });
            return report;
        }
    };

    let mut builder = Builder::new(BufWriter::new(file));
    builder.mode(HeaderMode::Deterministic);

    for &name in &spec.files {
        match append_file(&mut builder, &work_dir.join(name), name) {
            Ok(()) => {
                tracing::debug!("Added {} to {}", name, spec.archive_name);
                report.added.push(name);
            }
            Err(source) => {
                tracing::warn!("{} not added to {}: {}", name, spec.archive_name, source);
                report.failures.push(Error::FileAddFailure {
                    archive: spec.archive_name.clone(),
                    file: name.to_string(),
                    source,
                });
            }
        }
    }

    if let Err(source) = builder.into_inner().and_then(|mut writer| writer.flush()) {
        tracing::warn!("Cannot finish {}: {}", archive_path.display(), source);
        report.failures.push(Error::ArchiveWriteFailure {
            archive: archive_path,
            source,
        });
    }

    report
}

fn append_file<W: Write>(builder: &mut Builder<W>, source: &Path, name: &str) -> io::Result<()> {
    let file = File::open(source)?;
    let metadata = file.metadata()?;
    if !metadata.is_file() {
        return Err(io::Error::new(
            io::ErrorKind::InvalidInput,
            format!("{} is not a regular file", source.display()),
        ));
    }

    let mut header = Header::new_ustar();
    header.set_metadata_in_mode(&metadata, HeaderMode::Deterministic);
    builder.append_data(&mut header, name, file)
}
