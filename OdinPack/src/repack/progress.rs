//! Progress reporting for repackaging jobs

/// Pipeline state reached by a job.
///
/// States are entered strictly in declaration order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum RepackPhase {
    /// Product and carrier codes parsed from the source name
    Resolved,
    /// Inner archive and its members written to the working directory
    Extracted,
    /// Derivative archives being written
    Building,
    /// All four derivative archives attempted
    Built,
    /// Intermediate files removed
    CleanedUp,
}

impl RepackPhase {
    /// Number of phases.
    pub const COUNT: usize = 5;

    /// 1-based position of this phase.
    #[must_use]
    pub fn step(self) -> usize {
        self as usize + 1
    }

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            RepackPhase::Resolved => "Resolved",
            RepackPhase::Extracted => "Extracted",
            RepackPhase::Building => "Building",
            RepackPhase::Built => "Built",
            RepackPhase::CleanedUp => "Cleaned up",
        }
    }
}

/// Progress information delivered at each phase transition and once per
/// finished derivative archive.
#[derive(Debug, Clone)]
pub struct RepackProgress {
    pub phase: RepackPhase,
    /// Current item number (1-indexed, 0 when the phase starts)
    pub current: usize,
    pub total: usize,
    /// Source container, inner archive or derivative archive name
    pub current_file: Option<String>,
}

impl RepackProgress {
    #[must_use]
    pub fn new(phase: RepackPhase, current: usize, total: usize) -> Self {
        Self {
            phase,
            current,
            total,
            current_file: None,
        }
    }

    #[must_use]
    pub fn with_file(
        phase: RepackPhase,
        current: usize,
        total: usize,
        file: impl Into<String>,
    ) -> Self {
        Self {
            phase,
            current,
            total,
            current_file: Some(file.into()),
        }
    }

    /// Get the progress percentage (0.0 - 1.0)
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn percentage(&self) -> f32 {
        if self.total == 0 {
            1.0
        } else {
            self.current as f32 / self.total as f32
        }
    }
}

/// Progress callback for repackaging.
///
/// Must be `Sync + Send`: build workers report from their own threads.
///
/// # Example
/// ```no_run
/// use odinpack::repack::{RepackOptions, RepackPhase, repackage_with_progress};
///
/// repackage_with_progress("G960_XYZ_a.zip", &RepackOptions::default(), &|progress| {
///     if progress.phase == RepackPhase::Building {
///         println!("{}/{}: {:?}", progress.current, progress.total, progress.current_file);
///     }
/// })?;
/// # Ok::<(), odinpack::Error>(())
/// ```
pub type ProgressCallback<'a> = &'a (dyn Fn(&RepackProgress) + Sync + Send);
