//! # `OdinPack`
//!
//! Repackages a vendor firmware zip into the smaller tar archives that
//! flashing tools expect.
//!
//! A firmware zip named `<product>_<carrier>[_...].zip` carries a single tar
//! payload, `<product>_<carrier>_<product>_HOME.tar.md5`. This crate pulls the
//! bootloader and modem images out of that payload and writes:
//!
//! - **`BL_<product>_user_low_ship_MULTI_CERT.tar`** - the bootloader files present
//! - **`<product>_MODEM.tar`** - the GSM modem image
//! - **`<product>_WiFi_FIX.tar`** - the LTE modem image
//! - **`GSM_Modem_<product>_and_LTE_Modem_<product>.tar`** - both modem images
//!
//! The payload is treated as untrusted: a member whose path would land
//! outside the output directory aborts the job.
//!
//! ## Quick Start
//!
//! ```no_run
//! use odinpack::repack::{RepackOptions, repackage};
//!
//! let options = RepackOptions::new().with_output_dir("out");
//! let report = repackage("G960_XYZ_something.zip", &options)?;
//! for archive in report.archives() {
//!     println!("{}", archive.display());
//! }
//! for warning in report.warnings() {
//!     eprintln!("warning: {warning}");
//! }
//! # Ok::<(), odinpack::Error>(())
//! ```
//!
//! ## Feature Flags
//!
//! - `cli` - Enables the `odinpack` command-line binary

pub mod cleanup;
pub mod error;
pub mod extract;
pub mod firmware;
pub mod repack;
pub mod tarball;

// Re-exports for convenience
pub use error::{Error, Result};

/// Prelude module for common imports
pub mod prelude {
    pub use crate::error::{Error, Result};

    pub use crate::firmware::{
        BOOTLOADER_FILES, DerivativeArchiveSpec, DerivativeKind, FirmwareBundle, MODEM_FILES,
        MemberClass,
    };
    pub use crate::extract::{ExtractedFileSet, extract_firmware};
    pub use crate::tarball::{BuildReport, build_archive};
    pub use crate::cleanup::{CleanupReport, cleanup};

    pub use crate::repack::{
        BatchRepackResult, ProgressCallback, RepackOptions, RepackPhase, RepackProgress,
        RepackReport, batch_repackage, find_firmware_zips, repackage, repackage_with_progress,
    };
}

pub const VERSION: &str = env!("CARGO_PKG_VERSION");

// CLI module (feature-gated)
#[cfg(feature = "cli")]
pub mod cli;
