//! Extracted surface buffers.

use nalgebra::{Point3, Vector3};

use super::emit::END_FACE_INDEX;
use crate::mesh::{MeshIndex, NodeId};

/// A renderable surface: a vertex buffer and a terminated triangle index stream.
///
/// `indices` holds runs of three vertex slots, each followed by
/// [`END_FACE_INDEX`]. `nodes[i]` is the mesh node that vertex `i` came from.
#[derive(Debug, Clone, PartialEq)]
pub struct SurfaceMesh<I: MeshIndex = u32> {
    /// Vertex positions, one per distinct surface node.
    pub vertices: Vec<Point3<f32>>,
    /// Triangle index stream.
    pub indices: Vec<i32>,
    /// Source node of each vertex.
    pub nodes: Vec<NodeId<I>>,
}

impl<I: MeshIndex> Default for SurfaceMesh<I> {
    fn default() -> Self {
        Self::new()
    }
}

impl<I: MeshIndex> SurfaceMesh<I> {
    /// Create an empty surface.
    pub fn new() -> Self {
        Self {
            vertices: Vec::new(),
            indices: Vec::new(),
            nodes: Vec::new(),
        }
    }

    /// Number of vertices.
    #[inline]
    pub fn num_vertices(&self) -> usize {
        self.vertices.len()
    }

    /// Number of index-buffer entries, terminators included.
    #[inline]
    pub fn num_indices(&self) -> usize {
        self.indices.len()
    }

    /// Number of triangles.
    #[inline]
    pub fn num_triangles(&self) -> usize {
        self.indices.len() / 4
    }

    /// Whether the surface has no triangles.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }

    /// Iterate over triangles as vertex slot triples.
    ///
    /// A negative slot in a malformed stream comes out as `usize::MAX`, which
    /// [`SurfaceMesh::triangle_positions`] rejects; see [`SurfaceMesh::is_valid`].
    pub fn triangles(&self) -> impl Iterator<Item = [usize; 3]> + '_ {
        self.indices
            .chunks_exact(4)
            .map(|c| [slot(c[0]), slot(c[1]), slot(c[2])])
    }

    /// Positions of a triangle's corners, or `None` if a slot is out of range.
    pub fn triangle_positions(&self, triangle: [usize; 3]) -> Option<[Point3<f32>; 3]> {
        let [a, b, c] = triangle;
        Some([
            *self.vertices.get(a)?,
            *self.vertices.get(b)?,
            *self.vertices.get(c)?,
        ])
    }

    /// Unnormalized normal of a triangle, following its winding.
    pub fn triangle_normal(&self, triangle: [usize; 3]) -> Option<Vector3<f32>> {
        let [a, b, c] = self.triangle_positions(triangle)?;
        Some((b - a).cross(&(c - a)))
    }

    /// Check the stream layout.
    ///
    /// Every group of four entries must be three in-range slots and one
    /// terminator, and `nodes` must match `vertices` in length.
    pub fn is_valid(&self) -> bool {
        if self.nodes.len() != self.vertices.len() || self.indices.len() % 4 != 0 {
            return false;
        }
        let n = self.vertices.len();
        self.indices.chunks_exact(4).all(|c| {
            c[3] == END_FACE_INDEX && c[..3].iter().all(|&i| i >= 0 && (i as usize) < n)
        })
    }

    /// Axis-aligned bounding box of the vertices.
    pub fn bounding_box(&self) -> Option<(Point3<f32>, Point3<f32>)> {
        let first = self.vertices.first()?;
        let mut min = *first;
        let mut max = *first;
        for p in &self.vertices[1..] {
            min = min.inf(p);
            max = max.sup(p);
        }
        Some((min, max))
    }

    /// Drop all buffers.
    pub fn clear(&mut self) {
        self.vertices.clear();
        self.indices.clear();
        self.nodes.clear();
    }
}

#[inline]
fn slot(index: i32) -> usize {
    usize::try_from(index).unwrap_or(usize::MAX)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn single_triangle() -> SurfaceMesh {
        SurfaceMesh {
            vertices: vec![
                Point3::new(0.0, 0.0, 0.0),
                Point3::new(1.0, 0.0, 0.0),
                Point3::new(0.0, 1.0, 0.0),
            ],
            indices: vec![0, 1, 2, END_FACE_INDEX],
            nodes: vec![NodeId::new(3), NodeId::new(5), NodeId::new(8)],
        }
    }

    #[test]
    fn test_triangles() {
        let surface = single_triangle();
        assert!(surface.is_valid());
        assert_eq!(surface.num_triangles(), 1);
        assert_eq!(surface.triangles().collect::<Vec<_>>(), vec![[0, 1, 2]]);

        let normal = surface.triangle_normal([0, 1, 2]);
        assert_eq!(normal, Some(Vector3::new(0.0, 0.0, 1.0)));
    }

    #[test]
    fn test_malformed_triangles() {
        let mut surface = single_triangle();
        surface.indices[1] = 7;
        let tri = surface.triangles().next().unwrap();
        assert_eq!(tri, [0, 7, 2]);
        assert!(surface.triangle_positions(tri).is_none());
        assert!(surface.triangle_normal(tri).is_none());

        surface.indices[1] = -3;
        let tri = surface.triangles().next().unwrap();
        assert_eq!(tri[1], usize::MAX);
        assert!(surface.triangle_normal(tri).is_none());
    }

    #[test]
    fn test_invalid_streams() {
        let mut surface = single_triangle();
        surface.indices[3] = 0;
        assert!(!surface.is_valid());

        let mut surface = single_triangle();
        surface.indices[1] = 3;
        assert!(!surface.is_valid());

        let mut surface = single_triangle();
        surface.indices.pop();
        assert!(!surface.is_valid());

        let mut surface = single_triangle();
        surface.nodes.pop();
        assert!(!surface.is_valid());
    }

    #[test]
    fn test_clear() {
        let mut surface = single_triangle();
        surface.clear();
        assert!(surface.is_empty());
        assert!(surface.is_valid());
        assert!(surface.bounding_box().is_none());
    }
}
