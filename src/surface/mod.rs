//! Boundary surface extraction.
//!
//! A rebuild turns the volume elements of a [`MeshSource`](crate::mesh::MeshSource)
//! into a renderable [`SurfaceMesh`] in five stages:
//!
//! 1. **Face synthesis**: every element is decomposed into [`FaceRecord`]s
//!    using the static tables in [`element`].
//! 2. **Internal-face elimination**: faces shared by two elements are hidden
//!    ([`dedup`]), unless inner faces are requested.
//! 3. **Node compaction**: the nodes of the visible faces get dense vertex
//!    slots in ascending node order ([`compact`]).
//! 4. **Counting**: the index buffer size is computed up front.
//! 5. **Emission**: each visible face is written as triangles running
//!    clockwise as seen from outside, each followed by [`END_FACE_INDEX`]
//!    ([`emit`]).
//!
//! # Example
//!
//! ```
//! use femsurf::mesh::{build_from_tetrahedra, FemMesh};
//! use femsurf::surface::{extract_surface, SurfaceMesh, SurfaceOptions};
//! use nalgebra::Point3;
//!
//! let vertices = vec![
//!     Point3::new(0.0, 0.0, 0.0),
//!     Point3::new(0.0, 1.0, 0.0),
//!     Point3::new(1.0, 0.0, 0.0),
//!     Point3::new(0.0, 0.0, 1.0),
//!     Point3::new(0.0, 0.0, -1.0),
//! ];
//! let mesh: FemMesh = build_from_tetrahedra(&vertices, &[[0, 1, 2, 3], [1, 0, 2, 4]]).unwrap();
//!
//! let surface: SurfaceMesh = extract_surface(&mesh, &SurfaceOptions::default()).unwrap();
//! assert_eq!(surface.num_triangles(), 6);
//!
//! let inner: SurfaceMesh =
//!     extract_surface(&mesh, &SurfaceOptions::default().with_show_inner(true)).unwrap();
//! assert_eq!(inner.num_triangles(), 8);
//! ```

pub mod compact;
pub mod dedup;
pub mod element;
pub mod emit;
mod extract;
pub mod face;
mod output;
mod view;

pub use compact::{compact_nodes, CompactedNodes, NodeIndexMap};
pub use dedup::{hide_internal_faces, DedupStrategy, ManifoldPolicy};
pub use element::ElementKind;
pub use emit::{count_indices, emit_triangles, END_FACE_INDEX};
pub use extract::{extract_surface, rebuild, rebuild_with_progress, Rebuild, SurfaceStats};
pub use face::{surface_face, volume_faces, FaceRecord};
pub use output::SurfaceMesh;
pub use view::{ShapeHints, ShapeType, SurfaceView, VertexOrdering};

/// Options controlling a surface rebuild.
///
/// # Example
/// ```
/// use femsurf::surface::{DedupStrategy, SurfaceOptions};
///
/// let options = SurfaceOptions::default()
///     .with_show_inner(true)
///     .with_dedup(DedupStrategy::Pairwise);
/// assert!(options.show_inner);
/// assert!(!options.parallel);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SurfaceOptions {
    /// Keep faces shared by two elements.
    pub show_inner: bool,
    /// How shared faces are located.
    pub dedup: DedupStrategy,
    /// Handling of faces shared by more than two elements.
    pub manifold: ManifoldPolicy,
    /// Also render the mesh's native 2-D face elements.
    pub surface_elements: bool,
    /// Synthesize faces on the rayon thread pool.
    pub parallel: bool,
}

impl SurfaceOptions {
    /// Set whether inner faces are kept.
    pub fn with_show_inner(mut self, show_inner: bool) -> Self {
        self.show_inner = show_inner;
        self
    }

    /// Set the dedup strategy.
    pub fn with_dedup(mut self, dedup: DedupStrategy) -> Self {
        self.dedup = dedup;
        self
    }

    /// Set the non-manifold policy.
    pub fn with_manifold(mut self, manifold: ManifoldPolicy) -> Self {
        self.manifold = manifold;
        self
    }

    /// Set whether native 2-D face elements are rendered.
    pub fn with_surface_elements(mut self, surface_elements: bool) -> Self {
        self.surface_elements = surface_elements;
        self
    }

    /// Set whether face synthesis runs in parallel.
    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }
}
