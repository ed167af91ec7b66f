//! # femsurf
//!
//! Boundary surface extraction for volumetric finite-element meshes.
//!
//! femsurf turns a mesh of tetrahedra, hexahedra or quadratic tetrahedra into
//! the data a scene graph needs to draw it: a single-precision vertex buffer
//! and an indexed face set of triangles wound clockwise as seen from outside.
//!
//! ## Features
//!
//! - **Element support**: 4-node tetrahedra, 8-node hexahedra, 10-node tetrahedra,
//!   and optionally native 3/4/6-node face elements
//! - **Internal-face elimination**: faces shared by two elements are dropped,
//!   or kept on request to show the inner structure
//! - **Flexible indexing**: Support for 16-bit, 32-bit, and 64-bit node handles
//! - **Parallel synthesis**: optional rayon fan-out with identical output
//!
//! ## Quick Start
//!
//! ```
//! use femsurf::prelude::*;
//!
//! // A 2 x 2 x 2 block of unit hexahedra
//! let mesh: FemMesh = structured_block(BlockKind::Hexahedra, 2, 2, 2).unwrap();
//!
//! let surface: SurfaceMesh = extract_surface(&mesh, &SurfaceOptions::default()).unwrap();
//! assert_eq!(surface.num_vertices(), 26);
//! assert_eq!(surface.num_triangles(), 48);
//!
//! // Each triangle is three vertex slots and a terminator
//! for tri in surface.triangles() {
//!     let normal = surface.triangle_normal(tri).unwrap();
//!     assert!(normal.norm() > 0.0);
//! }
//! assert!(surface.indices.chunks(4).all(|c| c[3] == END_FACE_INDEX));
//! ```
//!
//! ## Keeping a Surface Up to Date
//!
//! ```
//! use femsurf::prelude::*;
//!
//! let mesh: FemMesh = structured_block(BlockKind::Tetrahedra, 1, 1, 1).unwrap();
//! let mut view: SurfaceView = SurfaceView::default();
//!
//! view.mesh_changed(&mesh).unwrap();
//! assert_eq!(view.surface().num_triangles(), 12);
//!
//! // Showing inner faces rebuilds; asking twice does not.
//! view.set_show_inner(&mesh, true).unwrap();
//! assert_eq!(view.surface().num_triangles(), 24);
//! assert_eq!(view.set_show_inner(&mesh, true).unwrap(), Rebuild::Skipped);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod error;
pub mod mesh;
pub mod progress;
pub mod surface;

/// Prelude module for convenient imports.
///
/// This module re-exports the most commonly used types and functions:
///
/// ```
/// use femsurf::prelude::*;
/// ```
pub mod prelude {
    pub use crate::error::{Result, SurfaceError};
    pub use crate::mesh::{
        build_from_hexahedra, build_from_quadratic_tetrahedra, build_from_tetrahedra,
        structured_block, BlockKind, ElementId, ElementView, FemMesh, FemMeshBuilder, MeshIndex,
        MeshSource, NodeId,
    };
    pub use crate::progress::Progress;
    pub use crate::surface::{
        extract_surface, rebuild, rebuild_with_progress, DedupStrategy, ManifoldPolicy, Rebuild,
        SurfaceMesh, SurfaceOptions, SurfaceStats, SurfaceView, END_FACE_INDEX,
    };
}

// Re-export nalgebra types for convenience
pub use nalgebra;
