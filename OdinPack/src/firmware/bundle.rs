//! Naming resolution for a firmware bundle

use std::path::{Path, PathBuf};

use crate::error::{Error, Result};

use super::derivative::DerivativeArchiveSpec;

/// One repackaging job: the source container and the names derived from it.
///
/// The working directory is where the inner archive and its selected members
/// are extracted, and where the derivative archives are written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FirmwareBundle {
    source_path: PathBuf,
    working_dir: PathBuf,
    product_code: String,
    carrier_code: String,
    inner_archive_name: String,
}

impl FirmwareBundle {
    /// Resolve product and carrier codes from the source file's base name.
    ///
    /// `G960_XYZ_something.zip` yields product `G960`, carrier `XYZ` and the
    /// inner archive name `G960_XYZ_G960_HOME.tar.md5`. No I/O is performed.
    ///
    /// # Errors
    ///
    /// Returns [`Error::MalformedFilename`] if the base name (without
    /// extension) has fewer than two non-empty `_`-separated fields.
    pub fn resolve<P: AsRef<Path>, W: AsRef<Path>>(source: P, working_dir: W) -> Result<Self> {
        let source = source.as_ref();
        let malformed = || Error::MalformedFilename {
            path: source.to_path_buf(),
        };

        let stem = source
            .file_stem()
            .and_then(|s| s.to_str())
            .ok_or_else(malformed)?;

        let mut fields = stem.split('_');
        let product = fields.next().filter(|f| !f.is_empty()).ok_or_else(malformed)?;
        let carrier = fields.next().filter(|f| !f.is_empty()).ok_or_else(malformed)?;

        Ok(Self {
            source_path: source.to_path_buf(),
            working_dir: working_dir.as_ref().to_path_buf(),
            product_code: product.to_string(),
            carrier_code: carrier.to_string(),
            inner_archive_name: format!("{product}_{carrier}_{product}_HOME.tar.md5"),
        })
    }

    /// Path to the outer zip container.
    #[must_use]
    pub fn source_path(&self) -> &Path {
        &self.source_path
    }

    /// Directory used for extraction and as the output location.
    #[must_use]
    pub fn working_dir(&self) -> &Path {
        &self.working_dir
    }

    #[must_use]
    pub fn product_code(&self) -> &str {
        &self.product_code
    }

    #[must_use]
    pub fn carrier_code(&self) -> &str {
        &self.carrier_code
    }

    /// Name of the tar payload inside the container.
    #[must_use]
    pub fn inner_archive_name(&self) -> &str {
        &self.inner_archive_name
    }

    /// Where the inner archive lands once pulled out of the container.
    #[must_use]
    pub fn inner_archive_path(&self) -> PathBuf {
        self.working_dir.join(&self.inner_archive_name)
    }

    /// The four derivative archives for this product.
    ///
    /// `bootloader_files` is the subset of bootloader names actually found in
    /// the inner archive.
    #[must_use]
    pub fn derivative_specs(&self, bootloader_files: &[&'static str]) -> Vec<DerivativeArchiveSpec> {
        DerivativeArchiveSpec::for_product(&self.product_code, bootloader_files)
    }
}
