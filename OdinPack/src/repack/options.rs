//! Options for a repackaging job

use std::path::PathBuf;

/// Where derivative archives go and what happens to the source afterwards.
///
/// The output directory doubles as the working directory: the inner archive
/// and its members are extracted there, the four archives are written there,
/// and cleanup removes the intermediates from it.
///
/// # Example
///
/// ```no_run
/// use odinpack::repack::RepackOptions;
///
/// let options = RepackOptions::new()
///     .with_output_dir("out")
///     .with_delete_original(true);
/// ```
#[derive(Debug, Clone)]
pub struct RepackOptions {
    /// Directory for intermediates and output archives.
    /// Default: the current directory
    pub output_dir: PathBuf,

    /// Delete the source container once cleanup has run.
    /// Default: false
    pub delete_original: bool,
}

impl RepackOptions {
    /// Options writing to the current directory and keeping the source.
    #[must_use]
    pub fn new() -> Self {
        Self {
            output_dir: PathBuf::from("."),
            delete_original: false,
        }
    }

    #[must_use]
    pub fn with_output_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.output_dir = dir.into();
        self
    }

    #[must_use]
    pub fn with_delete_original(mut self, delete: bool) -> Self {
        self.delete_original = delete;
        self
    }
}

impl Default for RepackOptions {
    fn default() -> Self {
        Self::new()
    }
}
