//! Finite-element mesh input.
//!
//! This module provides the [`MeshSource`] trait through which surface
//! extraction reads a volumetric mesh, plus [`FemMesh`], an in-memory
//! implementation, and builders for it.
//!
//! # Index Types
//!
//! Mesh entities are identified by type-safe handles:
//! - [`NodeId`] - Identifies a node
//! - [`ElementId`] - Identifies a volume, face or edge element
//!
//! These are generic over the underlying integer type ([`MeshIndex`] trait).
//!
//! # Element Conventions
//!
//! | element | nodes | local order |
//! |---|---|---|
//! | tetrahedron | 4 | right-hand normal of 0-1-2 points away from node 3 |
//! | hexahedron | 8 | bottom quad 0..4 with right-hand normal away from the top quad 4..8 |
//! | quadratic tetrahedron | 10 | corners, then mid-edge nodes of (0,1) (1,2) (2,0) (0,3) (1,3) (2,3) |
//!
//! Elements in these orders produce surface triangles that run clockwise as
//! seen from outside the solid.
//!
//! # Construction
//!
//! ```
//! use femsurf::mesh::{build_from_hexahedra, FemMesh};
//! use nalgebra::Point3;
//!
//! let vertices = vec![
//!     Point3::new(0.0, 0.0, 0.0),
//!     Point3::new(0.0, 1.0, 0.0),
//!     Point3::new(1.0, 1.0, 0.0),
//!     Point3::new(1.0, 0.0, 0.0),
//!     Point3::new(0.0, 0.0, 1.0),
//!     Point3::new(0.0, 1.0, 1.0),
//!     Point3::new(1.0, 1.0, 1.0),
//!     Point3::new(1.0, 0.0, 1.0),
//! ];
//! let mesh: FemMesh = build_from_hexahedra(&vertices, &[[0, 1, 2, 3, 4, 5, 6, 7]]).unwrap();
//! assert_eq!(mesh.num_volumes(), 1);
//! ```

mod builder;
mod fem;
mod index;

pub use builder::{
    build_from_hexahedra, build_from_quadratic_tetrahedra, build_from_tetrahedra,
    structured_block, BlockKind, FemMeshBuilder,
};
pub use fem::{Element, ElementView, FemMesh, MeshSource};
pub use index::{ElementId, MeshIndex, NodeId};
