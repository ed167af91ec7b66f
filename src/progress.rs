//! Progress reporting for surface rebuilds.
//!
//! A rebuild runs in a fixed sequence of [`Stage`]s. Callers that want to show
//! progress pass a [`Progress`] callback; it is invoked once as each stage
//! starts and once more when the rebuild finishes.
//!
//! # Example
//!
//! ```
//! use femsurf::progress::Progress;
//!
//! let progress = Progress::new(|current, total, message| {
//!     println!("[{}/{}] {}", current, total, message);
//! });
//! progress.report(0, 5, "Synthesizing faces");
//! ```

/// The stages of one surface rebuild, in execution order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Stage {
    /// Decomposing elements into face records.
    SynthesizeFaces,
    /// Hiding faces shared by two elements.
    EliminateInternalFaces,
    /// Building the node index map and vertex buffer.
    CompactNodes,
    /// Counting the index buffer size.
    CountTriangles,
    /// Writing the triangle index stream.
    EmitTriangles,
}

impl Stage {
    /// Number of stages.
    pub const COUNT: usize = 5;

    /// Zero-based position of this stage.
    pub fn index(self) -> usize {
        self as usize
    }

    /// Human-readable description.
    pub fn message(self) -> &'static str {
        match self {
            Stage::SynthesizeFaces => "Synthesizing faces",
            Stage::EliminateInternalFaces => "Eliminating internal faces",
            Stage::CompactNodes => "Building node map",
            Stage::CountTriangles => "Counting triangles",
            Stage::EmitTriangles => "Building triangle indices",
        }
    }
}

/// A progress callback that receives updates during a rebuild.
///
/// The callback receives:
/// - `current`: Current step (0-based)
/// - `total`: Total number of steps
/// - `message`: Description of the current operation
pub struct Progress {
    callback: Box<dyn Fn(usize, usize, &str) + Send + Sync>,
}

impl Progress {
    /// Create a new progress reporter with the given callback.
    pub fn new<F>(callback: F) -> Self
    where
        F: Fn(usize, usize, &str) + Send + Sync + 'static,
    {
        Self {
            callback: Box::new(callback),
        }
    }

    /// Report progress.
    #[inline]
    pub fn report(&self, current: usize, total: usize, message: &str) {
        (self.callback)(current, total, message);
    }

    /// Report that `stage` is starting.
    #[inline]
    pub fn stage(&self, stage: Stage) {
        self.report(stage.index(), Stage::COUNT, stage.message());
    }

    /// Report that all stages are done.
    #[inline]
    pub fn finish(&self) {
        self.report(Stage::COUNT, Stage::COUNT, "Done");
    }

    /// Create a no-op progress reporter that discards all updates.
    pub fn none() -> Self {
        Self::new(|_, _, _| {})
    }
}

impl Default for Progress {
    fn default() -> Self {
        Self::none()
    }
}

impl std::fmt::Debug for Progress {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Progress").finish_non_exhaustive()
    }
}
