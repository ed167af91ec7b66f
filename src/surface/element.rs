//! Element types and their face and winding tables.
//!
//! For every supported element type two tables are kept side by side:
//!
//! - the **face table** lists, per 1-based local face number, the local nodes
//!   forming that face (corners first, then mid-edge nodes);
//! - the **triangle table** lists, per local face, the sub-triangles tiling
//!   that face as element-local node indices. For an element following the
//!   node conventions of [`crate::mesh`] every triangle runs clockwise as seen
//!   from outside the element. A wrong entry silently flips a normal.

use crate::error::{Result, SurfaceError};

/// Maximum number of nodes on one face record.
pub const MAX_FACE_NODES: usize = 8;

/// The element types surface extraction understands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ElementKind {
    /// Linear tetrahedron, 4 nodes.
    Tetra4,
    /// Linear hexahedron, 8 nodes.
    Hexa8,
    /// Quadratic tetrahedron, 10 nodes.
    Tetra10,
    /// Linear triangle, 3 nodes.
    Tria3,
    /// Linear quadrangle, 4 nodes.
    Quad4,
    /// Quadratic triangle, 6 nodes.
    Tria6,
}

const TETRA4_FACES: &[&[usize]] = &[&[0, 1, 2], &[0, 3, 1], &[1, 3, 2], &[2, 3, 0]];

const TETRA4_TRIANGLES: &[&[[usize; 3]]] = &[
    &[[0, 2, 1]],
    &[[0, 1, 3]],
    &[[1, 2, 3]],
    &[[0, 3, 2]],
];

// Faces 3 and 5 list their nodes in a crossed order; only the node set matters
// for matching, emission goes through the triangle table.
const HEXA8_FACES: &[&[usize]] = &[
    &[0, 1, 2, 3],
    &[4, 5, 6, 7],
    &[0, 1, 4, 5],
    &[1, 2, 5, 6],
    &[2, 3, 6, 7],
    &[0, 3, 4, 7],
];

const HEXA8_TRIANGLES: &[&[[usize; 3]]] = &[
    &[[1, 0, 3], [3, 2, 1]],
    &[[4, 5, 7], [5, 6, 7]],
    &[[0, 1, 5], [0, 5, 4]],
    &[[5, 1, 2], [5, 2, 6]],
    &[[2, 3, 7], [2, 7, 6]],
    &[[3, 0, 4], [3, 4, 7]],
];

const TETRA10_FACES: &[&[usize]] = &[
    &[0, 1, 2, 4, 5, 6],
    &[0, 3, 1, 7, 8, 4],
    &[1, 3, 2, 8, 9, 5],
    &[2, 3, 0, 9, 7, 6],
];

const TETRA10_TRIANGLES: &[&[[usize; 3]]] = &[
    &[[0, 6, 4], [6, 2, 5], [5, 1, 4], [4, 6, 5]],
    &[[0, 4, 7], [4, 1, 8], [8, 3, 7], [4, 8, 7]],
    &[[1, 5, 8], [5, 2, 9], [9, 3, 8], [5, 9, 8]],
    &[[6, 0, 7], [2, 6, 9], [9, 7, 3], [6, 7, 9]],
];

const TRIA3_FACES: &[&[usize]] = &[&[0, 1, 2]];

const TRIA3_TRIANGLES: &[&[[usize; 3]]] = &[&[[0, 1, 2]]];

const QUAD4_FACES: &[&[usize]] = &[&[0, 1, 2, 3]];

const QUAD4_TRIANGLES: &[&[[usize; 3]]] = &[&[[0, 1, 2], [0, 2, 3]]];

const TRIA6_FACES: &[&[usize]] = &[&[0, 1, 2, 3, 4, 5]];

const TRIA6_TRIANGLES: &[&[[usize; 3]]] = &[&[[0, 3, 5], [3, 1, 4], [5, 4, 2], [3, 4, 5]]];

impl ElementKind {
    /// Every element kind.
    pub const ALL: [ElementKind; 6] = [
        ElementKind::Tetra4,
        ElementKind::Hexa8,
        ElementKind::Tetra10,
        ElementKind::Tria3,
        ElementKind::Quad4,
        ElementKind::Tria6,
    ];

    /// Classify a volume element by node count.
    pub fn volume(node_count: usize) -> Option<Self> {
        match node_count {
            4 => Some(ElementKind::Tetra4),
            8 => Some(ElementKind::Hexa8),
            10 => Some(ElementKind::Tetra10),
            _ => None,
        }
    }

    /// Classify a native 2-D face element by node count.
    pub fn surface(node_count: usize) -> Option<Self> {
        match node_count {
            3 => Some(ElementKind::Tria3),
            4 => Some(ElementKind::Quad4),
            6 => Some(ElementKind::Tria6),
            _ => None,
        }
    }

    /// Number of nodes on an element of this kind.
    pub fn node_count(self) -> usize {
        match self {
            ElementKind::Tetra4 => 4,
            ElementKind::Hexa8 => 8,
            ElementKind::Tetra10 => 10,
            ElementKind::Tria3 => 3,
            ElementKind::Quad4 => 4,
            ElementKind::Tria6 => 6,
        }
    }

    /// Whether this is a volume element.
    pub fn is_volume(self) -> bool {
        matches!(
            self,
            ElementKind::Tetra4 | ElementKind::Hexa8 | ElementKind::Tetra10
        )
    }

    fn faces(self) -> &'static [&'static [usize]] {
        match self {
            ElementKind::Tetra4 => TETRA4_FACES,
            ElementKind::Hexa8 => HEXA8_FACES,
            ElementKind::Tetra10 => TETRA10_FACES,
            ElementKind::Tria3 => TRIA3_FACES,
            ElementKind::Quad4 => QUAD4_FACES,
            ElementKind::Tria6 => TRIA6_FACES,
        }
    }

    fn triangles(self) -> &'static [&'static [[usize; 3]]] {
        match self {
            ElementKind::Tetra4 => TETRA4_TRIANGLES,
            ElementKind::Hexa8 => HEXA8_TRIANGLES,
            ElementKind::Tetra10 => TETRA10_TRIANGLES,
            ElementKind::Tria3 => TRIA3_TRIANGLES,
            ElementKind::Quad4 => QUAD4_TRIANGLES,
            ElementKind::Tria6 => TRIA6_TRIANGLES,
        }
    }

    /// Number of local faces.
    pub fn num_faces(self) -> usize {
        self.faces().len()
    }

    /// Local nodes of 1-based face `face_no`.
    pub fn face_nodes(self, face_no: usize) -> Result<&'static [usize]> {
        face_no
            .checked_sub(1)
            .and_then(|i| self.faces().get(i))
            .copied()
            .ok_or(SurfaceError::InvalidFaceNumber {
                node_count: self.node_count(),
                face_no,
            })
    }

    /// Wound sub-triangles of 1-based face `face_no`, as element-local nodes.
    pub fn face_triangles(self, face_no: usize) -> Result<&'static [[usize; 3]]> {
        face_no
            .checked_sub(1)
            .and_then(|i| self.triangles().get(i))
            .copied()
            .ok_or(SurfaceError::InvalidFaceNumber {
                node_count: self.node_count(),
                face_no,
            })
    }
}

/// Number of triangles a face of `size` nodes is split into.
pub fn triangles_per_face(size: usize) -> Option<usize> {
    match size {
        3 => Some(1),
        4 => Some(2),
        6 => Some(4),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeSet;

    #[test]
    fn test_classification() {
        assert_eq!(ElementKind::volume(4), Some(ElementKind::Tetra4));
        assert_eq!(ElementKind::volume(8), Some(ElementKind::Hexa8));
        assert_eq!(ElementKind::volume(10), Some(ElementKind::Tetra10));
        assert_eq!(ElementKind::volume(5), None);
        assert_eq!(ElementKind::volume(6), None);
        assert_eq!(ElementKind::surface(6), Some(ElementKind::Tria6));
        assert_eq!(ElementKind::surface(8), None);
    }

    #[test]
    fn test_face_counts() {
        assert_eq!(ElementKind::Tetra4.num_faces(), 4);
        assert_eq!(ElementKind::Hexa8.num_faces(), 6);
        assert_eq!(ElementKind::Tetra10.num_faces(), 4);
        assert_eq!(ElementKind::Quad4.num_faces(), 1);
    }

    #[test]
    fn test_face_number_range() {
        assert!(ElementKind::Tetra4.face_nodes(0).is_err());
        assert!(ElementKind::Tetra4.face_nodes(4).is_ok());
        assert_eq!(
            ElementKind::Tetra4.face_triangles(5),
            Err(SurfaceError::InvalidFaceNumber {
                node_count: 4,
                face_no: 5
            })
        );
    }

    #[test]
    fn test_triangles_per_face() {
        assert_eq!(triangles_per_face(3), Some(1));
        assert_eq!(triangles_per_face(4), Some(2));
        assert_eq!(triangles_per_face(6), Some(4));
        assert_eq!(triangles_per_face(5), None);
    }

    #[test]
    fn test_triangles_tile_their_face() {
        // Each face's sub-triangles use exactly the face's nodes, and there are
        // as many of them as the face size calls for.
        for kind in ElementKind::ALL {
            for face_no in 1..=kind.num_faces() {
                let face = kind.face_nodes(face_no).unwrap();
                let triangles = kind.face_triangles(face_no).unwrap();

                assert!(face.len() <= MAX_FACE_NODES);
                assert!(face.iter().all(|&n| n < kind.node_count()));
                assert_eq!(triangles_per_face(face.len()), Some(triangles.len()));

                let face_set: BTreeSet<usize> = face.iter().copied().collect();
                let tri_set: BTreeSet<usize> = triangles.iter().flatten().copied().collect();
                assert_eq!(face_set, tri_set, "{:?} face {}", kind, face_no);
                assert_eq!(face_set.len(), face.len());
            }
        }
    }

    #[test]
    fn test_volume_faces_are_distinct() {
        for kind in [ElementKind::Tetra4, ElementKind::Hexa8, ElementKind::Tetra10] {
            let sets: BTreeSet<BTreeSet<usize>> = (1..=kind.num_faces())
                .map(|f| kind.face_nodes(f).unwrap().iter().copied().collect())
                .collect();
            assert_eq!(sets.len(), kind.num_faces());
        }
    }
}
